//! Left-child/right-sibling encoding of unranked trees and forests.
//!
//! A node's first child becomes its left subtree and its next sibling its
//! right subtree, so a forest `[t1, t2, ...]` becomes a single binary tree
//! rooted at `t1`. The encoding is invertible: unbinarizing a binarized forest
//! returns it unchanged, and binarizing an unbinarized encoding does too.

use crate::error::{Result, ShapeError};
use crate::term::{BinaryTree, Term, Tree};

/// Encodes a single unranked tree.
///
/// The result is rooted at the tree's label with its children on the left
/// and [`LEAF`](crate::LEAF) on the right.
pub fn binarize(tree: &Term) -> Result<Term> {
    match tree {
        Term::Tree(tree) => Ok(Term::BinaryTree(BinaryTree {
            label: tree.label.clone(),
            left: Box::new(encode(&tree.children)?),
            right: Box::new(Term::Leaf),
        })),
        other => Err(ShapeError::NotATree(other.to_string())),
    }
}

/// Encodes a sibling list. The empty forest encodes to [`LEAF`](crate::LEAF).
pub fn binarize_forest(forest: &[Term]) -> Result<Term> {
    encode(forest)
}

fn encode(siblings: &[Term]) -> Result<Term> {
    // Right spine is built from the last sibling backwards
    siblings
        .iter()
        .rev()
        .try_fold(Term::Leaf, |right, sibling| match sibling {
            Term::Tree(tree) => Ok(Term::BinaryTree(BinaryTree {
                label: tree.label.clone(),
                left: Box::new(encode(&tree.children)?),
                right: Box::new(right),
            })),
            other => Err(ShapeError::NotATree(other.to_string())),
        })
}

/// Decodes a binary encoding back into the forest it represents.
pub fn unbinarize(binary: &Term) -> Result<Vec<Term>> {
    let mut forest = Vec::new();
    let mut current = binary;

    // Walk the right spine iteratively; each node is one sibling.
    loop {
        match current {
            Term::Leaf => return Ok(forest),
            Term::BinaryTree(node) => {
                forest.push(Term::Tree(Tree {
                    label: node.label.clone(),
                    children: unbinarize(&node.left)?,
                }));
                current = &node.right;
            }
            other => return Err(ShapeError::NotABinaryTree(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::term::LEAF;

    fn sample_forest() -> Vec<Term> {
        vec![
            Term::leaf_tree("t11"),
            Term::tree("t12", vec![Term::leaf_tree("t121"), Term::leaf_tree("t122")]),
            Term::leaf_tree("t13"),
        ]
    }

    #[test]
    fn test_binarize_forest() {
        let binary = binarize_forest(&sample_forest()).unwrap();

        assert_eq!(binary.to_string(), "t11(LEAF; t12(t121(LEAF; t122); t13))");
        assert_eq!(
            binary,
            Term::binary(
                "t11",
                LEAF,
                Term::binary(
                    "t12",
                    Term::binary("t121", LEAF, Term::binary_leaf("t122")),
                    Term::binary_leaf("t13"),
                ),
            )
        );
    }

    #[test]
    fn test_unbinarize_forest() {
        let binary = binarize_forest(&sample_forest()).unwrap();
        let forest = unbinarize(&binary).unwrap();

        assert_eq!(forest.len(), 3);
        assert_eq!(forest, sample_forest());
    }

    #[test]
    fn test_binarize_single_tree() {
        let tree = Term::tree("t", vec![Term::leaf_tree("a"), Term::leaf_tree("b")]);
        let binary = binarize(&tree).unwrap();

        assert_eq!(binary.to_string(), "t(a(LEAF; b); LEAF)");
        assert_eq!(binary, binarize_forest(std::slice::from_ref(&tree)).unwrap());
        assert_eq!(unbinarize(&binary).unwrap(), vec![tree]);
    }

    #[rstest]
    #[case(Vec::new())]
    #[case(vec![Term::leaf_tree("a")])]
    #[case(vec![Term::tree("a", vec![Term::tree("b", vec![Term::leaf_tree("c")])])])]
    #[case(vec![Term::leaf_tree("a"), Term::leaf_tree("b"), Term::leaf_tree("c")])]
    fn test_round_trip(#[case] forest: Vec<Term>) {
        let binary = binarize_forest(&forest).unwrap();
        let decoded = unbinarize(&binary).unwrap();

        assert_eq!(decoded, forest);
        assert_eq!(binarize_forest(&decoded).unwrap(), binary);
    }

    #[test]
    fn test_empty_forest_is_leaf() {
        assert_eq!(binarize_forest(&[]).unwrap(), LEAF);
        assert_eq!(unbinarize(&LEAF).unwrap(), Vec::<Term>::new());
    }

    #[rstest]
    #[case(Term::binary_leaf("a"))]
    #[case(Term::var("x"))]
    #[case(LEAF)]
    fn test_binarize_rejects_non_trees(#[case] term: Term) {
        assert!(matches!(binarize(&term), Err(ShapeError::NotATree(_))));
    }

    #[test]
    fn test_binarize_rejects_variable_children() {
        let tree = Term::tree("t", vec![Term::leaf_tree("a"), Term::var("x")]);
        assert_eq!(binarize(&tree), Err(ShapeError::NotATree("?x".to_string())));
    }

    #[rstest]
    #[case(Term::leaf_tree("a"))]
    #[case(Term::binary("a", Term::leaf_tree("b"), LEAF))]
    #[case(Term::binary("a", LEAF, Term::binary_var("x")))]
    fn test_unbinarize_rejects_non_binary(#[case] term: Term) {
        assert!(matches!(unbinarize(&term), Err(ShapeError::NotABinaryTree(_))));
    }
}
