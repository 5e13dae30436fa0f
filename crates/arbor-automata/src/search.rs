//! Working state shared by the bottom-up and top-down searches.

use arbor_term::{BinaryTree, Term, Tree};
use itertools::Itertools;

use crate::error::{AutomatonError, Result};
use crate::options::Options;
use crate::transition::Transition;

/// Counts transition attempts and derivation nesting against the configured limits.
#[derive(Debug)]
pub(crate) struct Budget {
    limit: usize,
    steps: usize,
    max_depth: usize,
    depth: usize,
}

impl Budget {
    pub(crate) fn new(options: &Options) -> Self {
        Self {
            limit: options.max_steps,
            steps: 0,
            max_depth: options.max_depth,
            depth: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn tick(&mut self) -> Result<()> {
        self.steps += 1;
        if self.steps > self.limit {
            Err(AutomatonError::StepLimitExceeded { limit: self.limit })
        } else {
            Ok(())
        }
    }

    /// Enters one more level of nested derivation.
    pub(crate) fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        self.check_depth(self.depth)
    }

    #[inline(always)]
    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Rejects `term` if it is deeper than the limit.
    pub(crate) fn admit(&self, term: &Term) -> Result<()> {
        self.check_depth(term.depth())
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            Err(AutomatonError::DepthLimitExceeded {
                limit: self.max_depth,
            })
        } else {
            Ok(())
        }
    }

    #[inline(always)]
    pub(crate) fn steps(&self) -> usize {
        self.steps
    }
}

/// Applies every transition to `subject`, collecting all outputs.
pub(crate) fn apply(
    transitions: &[Transition],
    subject: &Term,
    budget: &mut Budget,
) -> Result<Vec<Term>> {
    let mut outputs = Vec::new();

    for transition in transitions {
        budget.tick()?;
        let produced = transition.transit_all(subject);
        if !produced.is_empty() {
            tracing::trace!("{} applied to {}", transition, subject);
        }
        outputs.extend(produced);
    }

    Ok(outputs)
}

/// Every way of picking one alternative per position.
///
/// An empty input has exactly one combination, the empty one.
pub(crate) fn product(alternatives: Vec<Vec<Term>>) -> Vec<Vec<Term>> {
    if alternatives.is_empty() {
        return vec![Vec::new()];
    }

    alternatives.into_iter().multi_cartesian_product().collect()
}

/// Rebuilds `term` once for every combination of its children's alternatives.
///
/// `children` holds one alternative list per child of `term`, in the order
/// [`Term::children`] yields them.
pub(crate) fn rebuild(term: &Term, children: Vec<Vec<Term>>) -> Vec<Term> {
    match term {
        Term::Tree(tree) => product(children)
            .into_iter()
            .map(|children| {
                Term::Tree(Tree {
                    label: tree.label.clone(),
                    children,
                })
            })
            .collect(),
        Term::BinaryTree(tree) => product(children)
            .into_iter()
            .filter_map(|sides| {
                let [left, right]: [Term; 2] = sides.try_into().ok()?;
                Some(Term::BinaryTree(BinaryTree {
                    label: tree.label.clone(),
                    left: Box::new(left),
                    right: Box::new(right),
                }))
            })
            .collect(),
        other => vec![other.clone()],
    }
}
