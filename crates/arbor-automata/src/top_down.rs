use arbor_term::{CompositeState, State, Term};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::Result;
use crate::options::Options;
use crate::search::{Budget, apply, rebuild};
use crate::transition::Transition;

/// A nondeterministic automaton that pushes states from the root to the leaves.
///
/// Derivation starts from the input wrapped in the start state. Each matching
/// transition produces an output whose annotated subterms are derived in turn.
/// A node is translated only when every annotated subterm below it derives,
/// and the alternatives of its children combine as a product.
#[derive(Debug, Clone)]
pub struct TopDownTreeAutomaton {
    start_state: State,
    transitions: Vec<Transition>,
    options: Options,
}

impl TopDownTreeAutomaton {
    pub fn new(
        start_state: State,
        transitions: impl IntoIterator<Item = impl Into<Transition>>,
    ) -> Self {
        Self {
            start_state,
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
    pub fn start_state(&self) -> &State {
        &self.start_state
    }

    #[inline(always)]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Every state mentioned by a transition, plus the start state.
    pub fn states(&self) -> CompositeState {
        let start = std::iter::once(self.start_state.clone()).collect::<CompositeState>();
        self.transitions
            .iter()
            .fold(start, |states, transition| states.union(&transition.states()))
    }

    /// Returns `true` if `term` has at least one translation.
    ///
    /// Stops at the first complete derivation of the root.
    pub fn accept<'a>(&self, term: impl Into<Option<&'a Term>>) -> Result<bool> {
        let Some(term) = term.into() else {
            return Ok(false);
        };

        let mut derivation = Derivation::new(self);
        let accepted = derivation.derives_any(&self.goal(term))?;

        tracing::debug!(
            "{} {} after {} steps",
            term,
            if accepted { "accepted" } else { "rejected" },
            derivation.budget.steps()
        );
        Ok(accepted)
    }

    /// Every fully derived output for `term`.
    pub fn translate<'a>(&self, term: impl Into<Option<&'a Term>>) -> Result<FxHashSet<Term>> {
        let Some(term) = term.into() else {
            return Ok(FxHashSet::default());
        };

        let mut derivation = Derivation::new(self);
        let translations = derivation
            .derive(&self.goal(term))?
            .into_iter()
            .collect::<FxHashSet<_>>();

        tracing::debug!(
            "{} translated to {} terms in {} steps",
            term,
            translations.len(),
            derivation.budget.steps()
        );
        Ok(translations)
    }

    fn goal(&self, term: &Term) -> Term {
        Term::annotated(self.start_state.clone(), term.clone())
    }
}

/// Working state of one `accept` or `translate` call.
struct Derivation<'a> {
    transitions: &'a [Transition],
    budget: Budget,
    in_progress: FxHashSet<Term>,
    memo: Option<FxHashMap<Term, Vec<Term>>>,
    refusals: usize,
}

impl<'a> Derivation<'a> {
    fn new(automaton: &'a TopDownTreeAutomaton) -> Self {
        Self {
            transitions: &automaton.transitions,
            budget: Budget::new(&automaton.options),
            in_progress: FxHashSet::default(),
            memo: automaton.options.memoize.then(FxHashMap::default),
            refusals: 0,
        }
    }

    /// Every expansion of the outputs of `goal`, an annotated term.
    fn derive(&mut self, goal: &Term) -> Result<Vec<Term>> {
        if let Some(cached) = self.memo.as_ref().and_then(|memo| memo.get(goal)) {
            tracing::trace!("reusing derivations of {}", goal);
            return Ok(cached.clone());
        }

        if !self.in_progress.insert(goal.clone()) {
            tracing::trace!("refusing to re-enter {}", goal);
            self.refusals += 1;
            return Ok(Vec::new());
        }

        let refusals = self.refusals;
        self.budget.enter()?;
        let derived = self.derive_outputs(goal);
        self.budget.leave();
        self.in_progress.remove(goal);
        let derived = derived?;

        // A refusal below makes the result depend on the current path
        if refusals == self.refusals
            && let Some(memo) = self.memo.as_mut()
        {
            memo.insert(goal.clone(), derived.clone());
        }
        Ok(derived)
    }

    fn derive_outputs(&mut self, goal: &Term) -> Result<Vec<Term>> {
        let mut seen = FxHashSet::default();
        let mut derived = Vec::new();

        for output in apply(self.transitions, goal, &mut self.budget)? {
            for expanded in self.expand(&output)? {
                if seen.insert(expanded.clone()) {
                    derived.push(expanded);
                }
            }
        }

        Ok(derived)
    }

    fn derives_any(&mut self, goal: &Term) -> Result<bool> {
        let transitions = self.transitions;
        self.budget.enter()?;
        self.in_progress.insert(goal.clone());

        for transition in transitions {
            self.budget.tick()?;
            for output in transition.transit_all(goal) {
                if !self.expand(&output)?.is_empty() {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// Derives every annotated subterm of `term`, combining children as a product.
    fn expand(&mut self, term: &Term) -> Result<Vec<Term>> {
        match term {
            Term::Annotated(_) => self.derive(term),
            Term::Tree(_) | Term::BinaryTree(_) => {
                let mut children = Vec::new();
                for child in term.children() {
                    let alternatives = self.expand(child)?;
                    if alternatives.is_empty() {
                        return Ok(Vec::new());
                    }
                    children.push(alternatives);
                }
                Ok(rebuild(term, children))
            }
            other => Ok(vec![other.clone()]),
        }
    }
}
