use std::fmt;

use itertools::Itertools;
use smol_str::SmolStr;

use crate::context::Variable;
use crate::state::{Annotation, CompositeState, State};
use crate::symbol::Symbol;

/// The sentinel for an absent binary child.
pub const LEAF: Term = Term::Leaf;

/// Whether a term lives in the unranked or the binary world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Unranked,
    Binary,
}

/// A labeled tree value or pattern.
///
/// Equality, hashing and ordering are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// An absent binary child.
    Leaf,
    /// A node with an ordered, arbitrary number of children.
    Tree(Tree),
    /// A node with a left and a right child, either of which may be [`LEAF`].
    BinaryTree(BinaryTree),
    /// Matches any unranked term.
    TreeVariable(SmolStr),
    /// Matches any binary term, including [`LEAF`].
    BinaryTreeVariable(SmolStr),
    /// A subterm paired with an automaton state.
    Annotated(StateAnnotatedTerm),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tree {
    pub label: Symbol,
    pub children: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BinaryTree {
    pub label: Symbol,
    pub left: Box<Term>,
    pub right: Box<Term>,
}

/// "This subtree is, or will be, in the given state."
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateAnnotatedTerm {
    pub annotation: Annotation,
    pub term: Box<Term>,
}

impl Tree {
    pub fn new(label: impl Into<Symbol>, children: Vec<Term>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.children.len()
    }
}

impl BinaryTree {
    pub fn new(label: impl Into<Symbol>, left: Term, right: Term) -> Self {
        Self {
            label: label.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Number of children that are not [`LEAF`].
    pub fn size(&self) -> usize {
        [&self.left, &self.right]
            .into_iter()
            .filter(|child| !child.is_leaf())
            .count()
    }

    #[inline(always)]
    pub fn is_leaf_node(&self) -> bool {
        self.left.is_leaf() && self.right.is_leaf()
    }
}

impl StateAnnotatedTerm {
    pub fn new(annotation: impl Into<Annotation>, term: Term) -> Self {
        Self {
            annotation: annotation.into(),
            term: Box::new(term),
        }
    }

    /// Returns the single state, if the annotation is not composite.
    pub fn state(&self) -> Option<&State> {
        self.annotation.state()
    }
}

impl Term {
    /// Creates an unranked tree.
    pub fn tree(label: impl Into<Symbol>, children: Vec<Term>) -> Self {
        Term::Tree(Tree::new(label, children))
    }

    /// Creates an unranked tree without children.
    pub fn leaf_tree(label: impl Into<Symbol>) -> Self {
        Term::Tree(Tree::new(label, Vec::new()))
    }

    /// Creates a binary tree.
    pub fn binary(label: impl Into<Symbol>, left: Term, right: Term) -> Self {
        Term::BinaryTree(BinaryTree::new(label, left, right))
    }

    /// Creates a binary tree whose children are both [`LEAF`].
    pub fn binary_leaf(label: impl Into<Symbol>) -> Self {
        Term::binary(label, Term::Leaf, Term::Leaf)
    }

    /// Creates a tree variable.
    pub fn var(name: impl Into<SmolStr>) -> Self {
        Term::TreeVariable(name.into())
    }

    /// Creates a binary-tree variable.
    pub fn binary_var(name: impl Into<SmolStr>) -> Self {
        Term::BinaryTreeVariable(name.into())
    }

    /// Wraps a term with a state or a composite state.
    pub fn annotated(annotation: impl Into<Annotation>, term: Term) -> Self {
        Term::Annotated(StateAnnotatedTerm::new(annotation, term))
    }

    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Term::Leaf)
    }

    #[inline(always)]
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::TreeVariable(_) | Term::BinaryTreeVariable(_))
    }

    #[inline(always)]
    pub fn is_annotated(&self) -> bool {
        matches!(self, Term::Annotated(_))
    }

    pub fn shape(&self) -> Shape {
        match self {
            Term::Tree(_) | Term::TreeVariable(_) => Shape::Unranked,
            Term::Leaf | Term::BinaryTree(_) | Term::BinaryTreeVariable(_) => Shape::Binary,
            Term::Annotated(annotated) => annotated.term.shape(),
        }
    }

    /// The label of a tree node, `None` for leaves, variables and annotated terms.
    pub fn label(&self) -> Option<&Symbol> {
        match self {
            Term::Tree(tree) => Some(&tree.label),
            Term::BinaryTree(tree) => Some(&tree.label),
            _ => None,
        }
    }

    /// The label of the first node reached after looking through annotations.
    pub fn principal_label(&self) -> Option<&Symbol> {
        match self {
            Term::Annotated(annotated) => annotated.term.principal_label(),
            term => term.label(),
        }
    }

    /// Number of direct children.
    pub fn size(&self) -> usize {
        match self {
            Term::Tree(tree) => tree.size(),
            Term::BinaryTree(tree) => tree.size(),
            Term::Annotated(_) => 1,
            Term::Leaf | Term::TreeVariable(_) | Term::BinaryTreeVariable(_) => 0,
        }
    }

    /// Direct children in order. Binary trees yield both sides, including [`LEAF`].
    pub fn children(&self) -> Vec<&Term> {
        match self {
            Term::Tree(tree) => tree.children.iter().collect(),
            Term::BinaryTree(tree) => vec![tree.left.as_ref(), tree.right.as_ref()],
            Term::Annotated(annotated) => vec![annotated.term.as_ref()],
            Term::Leaf | Term::TreeVariable(_) | Term::BinaryTreeVariable(_) => Vec::new(),
        }
    }

    pub fn as_annotated(&self) -> Option<&StateAnnotatedTerm> {
        match self {
            Term::Annotated(annotated) => Some(annotated),
            _ => None,
        }
    }

    /// Returns `true` if the term contains no variables of any namespace.
    pub fn is_ground(&self) -> bool {
        self.variables().is_empty()
    }

    /// Every variable occurring in the term, in first-occurrence order.
    pub fn variables(&self) -> Vec<Variable> {
        let mut variables = Vec::new();
        self.collect_variables(&mut variables);
        variables
    }

    fn collect_variables(&self, variables: &mut Vec<Variable>) {
        match self {
            Term::Leaf => {}
            Term::TreeVariable(name) => push_unique(variables, Variable::Tree(name.clone())),
            Term::BinaryTreeVariable(name) => {
                push_unique(variables, Variable::BinaryTree(name.clone()))
            }
            Term::Tree(tree) => {
                if tree.label.is_variable() {
                    push_unique(variables, Variable::Symbol(tree.label.name().into()));
                }
                for child in &tree.children {
                    child.collect_variables(variables);
                }
            }
            Term::BinaryTree(tree) => {
                if tree.label.is_variable() {
                    push_unique(variables, Variable::Symbol(tree.label.name().into()));
                }
                tree.left.collect_variables(variables);
                tree.right.collect_variables(variables);
            }
            Term::Annotated(annotated) => annotated.term.collect_variables(variables),
        }
    }

    /// Every state textually present in the term.
    pub fn states(&self) -> CompositeState {
        let mut states = CompositeState::new();
        self.collect_states(&mut states);
        states
    }

    fn collect_states(&self, states: &mut CompositeState) {
        match self {
            Term::Annotated(annotated) => {
                states.extend(annotated.annotation.states().cloned());
                annotated.term.collect_states(states);
            }
            Term::Tree(tree) => tree.children.iter().for_each(|c| c.collect_states(states)),
            Term::BinaryTree(tree) => {
                tree.left.collect_states(states);
                tree.right.collect_states(states);
            }
            Term::Leaf | Term::TreeVariable(_) | Term::BinaryTreeVariable(_) => {}
        }
    }

    /// Total number of nodes, counting [`LEAF`] and annotations as nodes.
    pub fn node_count(&self) -> usize {
        1 + self.children().into_iter().map(Term::node_count).sum::<usize>()
    }

    /// Number of nodes on the longest path from the root, counted like [`Term::node_count`].
    pub fn depth(&self) -> usize {
        1 + self.children().into_iter().map(Term::depth).max().unwrap_or(0)
    }
}

fn push_unique(variables: &mut Vec<Variable>, variable: Variable) {
    if !variables.contains(&variable) {
        variables.push(variable);
    }
}

impl From<Tree> for Term {
    fn from(tree: Tree) -> Self {
        Term::Tree(tree)
    }
}

impl From<BinaryTree> for Term {
    fn from(tree: BinaryTree) -> Self {
        Term::BinaryTree(tree)
    }
}

impl From<StateAnnotatedTerm> for Term {
    fn from(annotated: StateAnnotatedTerm) -> Self {
        Term::Annotated(annotated)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Leaf => write!(f, "LEAF"),
            Term::Tree(tree) if tree.children.is_empty() => write!(f, "{}", tree.label),
            Term::Tree(tree) => write!(f, "{}[{}]", tree.label, tree.children.iter().join(",")),
            Term::BinaryTree(tree) if tree.is_leaf_node() => write!(f, "{}", tree.label),
            Term::BinaryTree(tree) => write!(f, "{}({}; {})", tree.label, tree.left, tree.right),
            Term::TreeVariable(name) => write!(f, "?{}", name),
            Term::BinaryTreeVariable(name) => write!(f, "??{}", name),
            Term::Annotated(annotated) => {
                write!(f, "<{}>({})", annotated.annotation, annotated.term)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Term::leaf_tree("a"), Term::leaf_tree("a"), true)]
    #[case(Term::leaf_tree("a"), Term::leaf_tree("b"), false)]
    #[case(
        Term::tree("t", vec![Term::leaf_tree("a"), Term::leaf_tree("b")]),
        Term::tree("t", vec![Term::leaf_tree("a"), Term::leaf_tree("b")]),
        true
    )]
    #[case(
        Term::tree("t", vec![Term::leaf_tree("a"), Term::leaf_tree("b")]),
        Term::tree("t", vec![Term::leaf_tree("b"), Term::leaf_tree("a")]),
        false
    )]
    #[case(
        Term::tree("t", vec![Term::leaf_tree("a")]),
        Term::tree("t", vec![Term::leaf_tree("a"), Term::leaf_tree("a")]),
        false
    )]
    #[case(Term::binary_leaf("a"), Term::leaf_tree("a"), false)]
    #[case(
        Term::binary("a", LEAF, Term::binary_leaf("b")),
        Term::binary("a", LEAF, Term::binary_leaf("b")),
        true
    )]
    #[case(
        Term::binary("a", LEAF, Term::binary_leaf("b")),
        Term::binary("a", Term::binary_leaf("b"), LEAF),
        false
    )]
    #[case(Term::var("x"), Term::binary_var("x"), false)]
    fn test_structural_equality(#[case] a: Term, #[case] b: Term, #[case] expected: bool) {
        assert_eq!(a == b, expected);
        assert_eq!(a.clone() == b.clone(), expected);
    }

    #[rstest]
    #[case(Term::leaf_tree("a"), 0)]
    #[case(Term::tree("t", vec![Term::leaf_tree("a"), Term::var("x"), Term::leaf_tree("c")]), 3)]
    #[case(Term::binary_leaf("a"), 0)]
    #[case(Term::binary("a", LEAF, Term::binary_leaf("b")), 1)]
    #[case(Term::binary("a", Term::binary_leaf("b"), Term::binary_leaf("c")), 2)]
    #[case(LEAF, 0)]
    fn test_size(#[case] term: Term, #[case] expected: usize) {
        assert_eq!(term.size(), expected);
    }

    #[rstest]
    #[case(Term::leaf_tree("a"), Shape::Unranked)]
    #[case(Term::var("x"), Shape::Unranked)]
    #[case(LEAF, Shape::Binary)]
    #[case(Term::binary_var("x"), Shape::Binary)]
    #[case(Term::annotated(State::new("s"), Term::binary_leaf("a")), Shape::Binary)]
    #[case(Term::annotated(State::new("s"), Term::leaf_tree("a")), Shape::Unranked)]
    fn test_shape(#[case] term: Term, #[case] expected: Shape) {
        assert_eq!(term.shape(), expected);
    }

    #[rstest]
    #[case(
        Term::tree(
            "u1",
            vec![
                Term::tree("u1", vec![Term::leaf_tree("u2"), Term::leaf_tree("u1")]),
                Term::leaf_tree("u1"),
            ]
        ),
        "u1[u1[u2,u1],u1]"
    )]
    #[case(Term::binary("t11", LEAF, Term::binary_leaf("t13")), "t11(LEAF; t13)")]
    #[case(Term::annotated(State::new("s1"), LEAF), "<s1>(LEAF)")]
    #[case(
        Term::tree(Symbol::variable("L"), vec![Term::var("x"), Term::binary_var("y")]),
        "$L[?x,??y]"
    )]
    #[case(
        Term::annotated(
            [State::new("s2"), State::new("s1")].into_iter().collect::<CompositeState>(),
            Term::var("x")
        ),
        "<{s1,s2}>(?x)"
    )]
    fn test_display(#[case] term: Term, #[case] expected: &str) {
        assert_eq!(term.to_string(), expected);
    }

    #[test]
    fn test_variables_in_first_occurrence_order() {
        let term = Term::tree(
            Symbol::variable("L"),
            vec![
                Term::var("x"),
                Term::annotated(State::new("s"), Term::binary_var("y")),
                Term::var("x"),
            ],
        );

        assert_eq!(
            term.variables(),
            vec![
                Variable::Symbol("L".into()),
                Variable::Tree("x".into()),
                Variable::BinaryTree("y".into()),
            ]
        );
        assert!(!term.is_ground());
        assert!(Term::leaf_tree("a").is_ground());
    }

    #[test]
    fn test_states() {
        let term = Term::tree(
            "u1",
            vec![
                Term::annotated(State::new("s3"), Term::var("x")),
                Term::annotated(State::new("s1"), Term::var("y")),
            ],
        );
        let names = term.states().iter().map(|s| s.name().to_string()).collect::<Vec<_>>();

        assert_eq!(names, vec!["s1", "s3"]);
    }

    #[rstest]
    #[case(Term::leaf_tree("a"), 1)]
    #[case(Term::tree("t", vec![Term::leaf_tree("a"), Term::tree("f", vec![Term::var("x")])]), 3)]
    #[case(Term::binary_leaf("a"), 2)]
    #[case(Term::annotated(State::new("q"), Term::tree("f", vec![Term::leaf_tree("a")])), 3)]
    #[case(LEAF, 1)]
    fn test_depth(#[case] term: Term, #[case] expected: usize) {
        assert_eq!(term.depth(), expected);
    }

    #[test]
    fn test_principal_label() {
        let term = Term::annotated(State::new("q"), Term::tree("f", vec![Term::var("x")]));

        assert_eq!(term.principal_label(), Some(&Symbol::constant("f")));
        assert_eq!(term.label(), None);
        assert_eq!(Term::var("x").principal_label(), None);
    }
}
