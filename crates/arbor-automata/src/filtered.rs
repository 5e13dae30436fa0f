use std::fmt;
use std::sync::Arc;

use arbor_term::{CompositeState, MatchContext, Symbol, Term, VariableReplacer};

use crate::error::{AutomatonError, Result};
use crate::transition::TreeTransition;

/// Side condition over the resolved input label and the bindings of a match.
pub type Condition = Arc<dyn Fn(&Symbol, &MatchContext) -> bool + Send + Sync>;

/// Rewrites the instantiated outputs of a transition, given the resolved input label.
pub type Filter = Arc<dyn Fn(&Symbol, Vec<Term>) -> Vec<Term> + Send + Sync>;

/// A [`TreeTransition`] gated by a condition and post-processed by a filter.
///
/// The label handed to both closures is the principal label of the input
/// pattern, resolved through the bindings of the match. A label variable
/// therefore yields the label of the subject.
#[derive(Clone)]
pub struct FilteredTreeTransition {
    transition: TreeTransition,
    label: Symbol,
    condition: Condition,
    filter: Filter,
}

impl FilteredTreeTransition {
    /// Creates a filtered transition that accepts every match and keeps every output.
    ///
    /// Fails if `input` has no principal label.
    pub fn new(input: Term, output: Term) -> Result<Self> {
        let label = input
            .principal_label()
            .cloned()
            .ok_or_else(|| AutomatonError::UnlabeledInput {
                pattern: input.to_string(),
            })?;

        Ok(Self {
            transition: TreeTransition::new(input, output),
            label,
            condition: Arc::new(|_, _| true),
            filter: Arc::new(|_, outputs| outputs),
        })
    }

    pub fn with_condition(
        mut self,
        condition: impl Fn(&Symbol, &MatchContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.condition = Arc::new(condition);
        self
    }

    pub fn with_filter(
        mut self,
        filter: impl Fn(&Symbol, Vec<Term>) -> Vec<Term> + Send + Sync + 'static,
    ) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    /// A filter that replaces the principal label of every output with `relabel(label)`.
    pub fn relabel(
        relabel: impl Fn(&Symbol) -> Symbol + Send + Sync + 'static,
    ) -> impl Fn(&Symbol, Vec<Term>) -> Vec<Term> + Send + Sync + 'static {
        move |label, outputs| {
            let label = relabel(label);
            outputs
                .into_iter()
                .map(|output| with_principal_label(output, label.clone()))
                .collect()
        }
    }

    #[inline(always)]
    pub fn input(&self) -> &Term {
        self.transition.input()
    }

    #[inline(always)]
    pub fn output(&self) -> &Term {
        self.transition.output()
    }

    /// Structural match of the input pattern, then the side condition.
    pub fn accept(&self, subject: &Term, ctx: &mut MatchContext) -> bool {
        self.transition.accept(subject, ctx)
            && (self.condition)(ctx.resolve_symbol(&self.label), ctx)
    }

    /// The first filtered output, if the rule applies.
    pub fn transit(&self, subject: &Term) -> Option<Term> {
        self.transit_all(subject).into_iter().next()
    }

    /// Every filtered output of applying the rule to `subject`.
    pub fn transit_all(&self, subject: &Term) -> Vec<Term> {
        let mut ctx = MatchContext::new();
        if !self.accept(subject, &mut ctx) {
            return Vec::new();
        }

        let output = VariableReplacer::new(&ctx).replace(self.transition.output());
        (self.filter)(ctx.resolve_symbol(&self.label), vec![output])
    }

    pub fn states(&self) -> CompositeState {
        self.transition.states()
    }
}

fn with_principal_label(term: Term, label: Symbol) -> Term {
    match term {
        Term::Tree(mut tree) => {
            tree.label = label;
            Term::Tree(tree)
        }
        Term::BinaryTree(mut tree) => {
            tree.label = label;
            Term::BinaryTree(tree)
        }
        Term::Annotated(mut annotated) => {
            annotated.term = Box::new(with_principal_label(*annotated.term, label));
            Term::Annotated(annotated)
        }
        other => other,
    }
}

impl fmt::Debug for FilteredTreeTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredTreeTransition")
            .field("input", self.transition.input())
            .field("output", self.transition.output())
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for FilteredTreeTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} (filtered)", self.transition.input(), self.transition.output())
    }
}
