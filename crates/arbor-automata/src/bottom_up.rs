use std::collections::VecDeque;

use arbor_term::{CompositeState, State, Term, binarize_forest};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::Result;
use crate::options::Options;
use crate::search::{Budget, apply, rebuild};
use crate::transition::Transition;

/// A nondeterministic automaton that computes states from the leaves to the root.
///
/// Every subtree is reduced to the state-annotated terms reachable by applying
/// transitions to the subtree rebuilt from its children's reductions. A term
/// is accepted when one of its root reductions carries a final state.
#[derive(Debug, Clone)]
pub struct BottomUpTreeAutomaton {
    final_states: CompositeState,
    transitions: Vec<Transition>,
    options: Options,
}

impl BottomUpTreeAutomaton {
    pub fn new(
        final_states: impl IntoIterator<Item = State>,
        transitions: impl IntoIterator<Item = impl Into<Transition>>,
    ) -> Self {
        Self {
            final_states: final_states.into_iter().collect(),
            transitions: transitions.into_iter().map(Into::into).collect(),
            options: Options::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn set_max_steps(&mut self, max_steps: usize) {
        self.options.max_steps = max_steps;
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.options.max_depth = max_depth;
    }

    pub fn set_memoize(&mut self, memoize: bool) {
        self.options.memoize = memoize;
    }

    #[inline(always)]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[inline(always)]
    pub fn final_states(&self) -> &CompositeState {
        &self.final_states
    }

    #[inline(always)]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Every state mentioned by a transition or declared final.
    pub fn states(&self) -> CompositeState {
        self.transitions
            .iter()
            .fold(self.final_states.clone(), |states, transition| {
                states.union(&transition.states())
            })
    }

    /// The state-annotated terms `term` reduces to, in discovery order.
    pub fn reduce(&self, term: &Term) -> Result<Vec<Term>> {
        let mut reduction = Reduction::new(self);
        let reached = reduction.reduce(term)?;

        tracing::debug!(
            "{} reduced to {} annotated terms in {} steps",
            term,
            reached.len(),
            reduction.budget.steps()
        );
        Ok(reached)
    }

    /// Returns `true` if some reduction of `term` carries a final state.
    ///
    /// An absent term is never accepted.
    pub fn accept<'a>(&self, term: impl Into<Option<&'a Term>>) -> Result<bool> {
        let Some(term) = term.into() else {
            return Ok(false);
        };

        Ok(self
            .reduce(term)?
            .iter()
            .filter_map(Term::as_annotated)
            .any(|reached| reached.annotation.is_in(&self.final_states)))
    }

    /// The distinct residual terms of every reduction of `term` in a final state.
    pub fn translate<'a>(&self, term: impl Into<Option<&'a Term>>) -> Result<FxHashSet<Term>> {
        let Some(term) = term.into() else {
            return Ok(FxHashSet::default());
        };

        let translations = self
            .reduce(term)?
            .into_iter()
            .filter_map(|reached| match reached {
                Term::Annotated(annotated) if annotated.annotation.is_in(&self.final_states) => {
                    Some(*annotated.term)
                }
                _ => None,
            })
            .collect::<FxHashSet<_>>();

        tracing::debug!("{} translated to {} terms", term, translations.len());
        Ok(translations)
    }

    /// Accepts the binary encoding of an unranked forest.
    pub fn accept_forest(&self, forest: &[Term]) -> Result<bool> {
        let encoded = binarize_forest(forest)?;
        self.accept(&encoded)
    }
}

/// Working state of one `reduce` call.
struct Reduction<'a> {
    transitions: &'a [Transition],
    budget: Budget,
    memo: Option<FxHashMap<Term, Vec<Term>>>,
}

impl<'a> Reduction<'a> {
    fn new(automaton: &'a BottomUpTreeAutomaton) -> Self {
        Self {
            transitions: &automaton.transitions,
            budget: Budget::new(&automaton.options),
            memo: automaton.options.memoize.then(FxHashMap::default),
        }
    }

    fn reduce(&mut self, term: &Term) -> Result<Vec<Term>> {
        if let Some(cached) = self.memo.as_ref().and_then(|memo| memo.get(term)) {
            tracing::trace!("reusing reductions of {}", term);
            return Ok(cached.clone());
        }

        let seeds = match term {
            Term::Tree(_) | Term::BinaryTree(_) => {
                let children = term
                    .children()
                    .into_iter()
                    .map(|child| self.reduce(child))
                    .collect::<Result<Vec<_>>>()?;
                rebuild(term, children)
            }
            other => vec![other.clone()],
        };
        let reached = self.close(seeds)?;

        if let Some(memo) = self.memo.as_mut() {
            memo.insert(term.clone(), reached.clone());
        }
        Ok(reached)
    }

    /// Applies transitions until no new term appears, returning the annotated terms reached.
    fn close(&mut self, seeds: Vec<Term>) -> Result<Vec<Term>> {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::new();
        let mut reached = Vec::new();

        for seed in seeds {
            if seen.insert(seed.clone()) {
                queue.push_back(seed);
            }
        }

        while let Some(term) = queue.pop_front() {
            for output in apply(self.transitions, &term, &mut self.budget)? {
                self.budget.admit(&output)?;
                if seen.insert(output.clone()) {
                    queue.push_back(output);
                } else {
                    tracing::trace!("{} was already reached", output);
                }
            }

            if term.is_annotated() {
                reached.push(term);
            }
        }

        Ok(reached)
    }
}
