//! `arbor-term` provides the data model of the arbor tree automata: labels,
//! unranked and binary trees, automaton states, pattern variables, and the
//! matching and substitution machinery used by transitions.
//!
//! ## Example
//!
//! ```rust
//! use arbor_term::{MatchContext, Symbol, Term, VariableReplacer, binarize, unbinarize};
//!
//! // t(x, x) matches t(a, a) but not t(a, b)
//! let pattern = Term::tree("t", vec![Term::var("x"), Term::var("x")]);
//! let same = Term::tree("t", vec![Term::leaf_tree("a"), Term::leaf_tree("a")]);
//! let different = Term::tree("t", vec![Term::leaf_tree("a"), Term::leaf_tree("b")]);
//!
//! let mut ctx = MatchContext::new();
//! assert!(pattern.matches(&same, &mut ctx));
//! assert!(!pattern.matches(&different, &mut MatchContext::new()));
//!
//! // Instantiate another pattern with the bindings
//! let output = Term::tree(Symbol::constant("pair"), vec![Term::var("x")]);
//! let replaced = VariableReplacer::new(&ctx).replace(&output);
//! assert_eq!(replaced.to_string(), "pair[a]");
//!
//! // Binarization is invertible
//! let binary = binarize(&same).unwrap();
//! assert_eq!(unbinarize(&binary).unwrap(), vec![same]);
//! ```
mod binarize;
mod context;
mod error;
mod matching;
mod replace;
mod state;
mod symbol;
mod term;

pub use binarize::{binarize, binarize_forest, unbinarize};
pub use context::{Binding, MatchContext, Variable};
pub use error::{Result, ShapeError};
pub use matching::matches;
pub use replace::{VariableReplacer, replace};
pub use state::{Annotation, CompositeState, State};
pub use symbol::{Symbol, SymbolKind};
pub use term::{BinaryTree, LEAF, Shape, StateAnnotatedTerm, Term, Tree};
