//! `arbor-automata` evaluates nondeterministic tree automata built from
//! [`arbor_term`] patterns.
//!
//! A [`BottomUpTreeAutomaton`] computes states from the leaves to the root and
//! accepts a term when the root reaches a final state. A
//! [`TopDownTreeAutomaton`] starts from the root in its start state and
//! derives outputs towards the leaves. Both explore every applicable
//! transition and return set-valued translations.
//!
//! ## Example
//!
//! ```rust
//! use arbor_automata::{BottomUpTreeAutomaton, LEAF, State, Term, TreeTransition};
//!
//! let s = |name| State::new(name);
//! let at = |state, term| Term::annotated(State::new(state), term);
//!
//! // Every node labeled `n` whose children are both accepted is accepted.
//! let automaton = BottomUpTreeAutomaton::new(
//!     [s("ok")],
//!     [
//!         TreeTransition::new(LEAF, at("ok", LEAF)),
//!         TreeTransition::new(
//!             Term::binary("n", at("ok", Term::binary_var("l")), at("ok", Term::binary_var("r"))),
//!             at("ok", Term::binary("n", Term::binary_var("l"), Term::binary_var("r"))),
//!         ),
//!     ],
//! );
//!
//! let accepted = Term::binary("n", Term::binary_leaf("n"), LEAF);
//! let rejected = Term::binary("n", Term::binary_leaf("m"), LEAF);
//!
//! assert!(automaton.accept(&accepted).unwrap());
//! assert!(!automaton.accept(&rejected).unwrap());
//! assert!(automaton.translate(&accepted).unwrap().contains(&accepted));
//! ```
mod bottom_up;
mod error;
mod filtered;
mod options;
mod search;
mod top_down;
mod transition;

pub use arbor_term::{
    Annotation, Binding, CompositeState, LEAF, MatchContext, ShapeError, State, Symbol, Term,
    Variable, VariableReplacer, binarize, binarize_forest, unbinarize,
};
pub use bottom_up::BottomUpTreeAutomaton;
pub use error::{AutomatonError, Result};
pub use filtered::{Condition, Filter, FilteredTreeTransition};
pub use options::Options;
pub use top_down::TopDownTreeAutomaton;
pub use transition::{Transition, TreeTransition};
