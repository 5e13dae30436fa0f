//! Structural matching of patterns against subject terms.

use crate::context::{Binding, MatchContext, Variable};
use crate::term::{Shape, Term};

/// Matches `pattern` against `subject`, recording bindings in `ctx`.
///
/// A failed match is an ordinary `false`. On success `ctx` holds every
/// binding made during the attempt. On failure its contents are unspecified
/// and the context should be discarded.
pub fn matches(pattern: &Term, subject: &Term, ctx: &mut MatchContext) -> bool {
    match (pattern, subject) {
        // Variables bind any subject of their shape
        (Term::TreeVariable(name), subject) => {
            subject.shape() == Shape::Unranked
                && ctx.bind(Variable::Tree(name.clone()), Binding::Term(subject.clone()))
        }
        (Term::BinaryTreeVariable(name), subject) => {
            subject.shape() == Shape::Binary
                && ctx.bind(
                    Variable::BinaryTree(name.clone()),
                    Binding::Term(subject.clone()),
                )
        }

        // LEAF matches only LEAF
        (Term::Leaf, Term::Leaf) => true,

        (Term::Tree(pattern), Term::Tree(subject)) => {
            pattern.children.len() == subject.children.len()
                && pattern.label.matches(&subject.label, ctx)
                && pattern
                    .children
                    .iter()
                    .zip(subject.children.iter())
                    .all(|(p, s)| matches(p, s, ctx))
        }

        (Term::BinaryTree(pattern), Term::BinaryTree(subject)) => {
            pattern.label.matches(&subject.label, ctx)
                && matches(&pattern.left, &subject.left, ctx)
                && matches(&pattern.right, &subject.right, ctx)
        }

        (Term::Annotated(pattern), Term::Annotated(subject)) => {
            pattern.annotation.admits(&subject.annotation)
                && matches(&pattern.term, &subject.term, ctx)
        }

        // Mismatch
        _ => false,
    }
}

impl Term {
    /// Matches this term, used as a pattern, against `subject`.
    ///
    /// See [`matches`].
    #[inline(always)]
    pub fn matches(&self, subject: &Term, ctx: &mut MatchContext) -> bool {
        matches(self, subject, ctx)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::state::{CompositeState, State};
    use crate::symbol::Symbol;
    use crate::term::LEAF;

    fn t(label: &str, children: Vec<Term>) -> Term {
        Term::tree(label, children)
    }

    fn a(label: &str) -> Term {
        Term::leaf_tree(label)
    }

    #[rstest]
    #[case(t("t", vec![Term::var("x"), Term::var("x")]), t("t", vec![a("a"), a("a")]), true)]
    #[case(t("t", vec![Term::var("x"), Term::var("x")]), t("t", vec![a("a"), a("b")]), false)]
    #[case(t("t", vec![Term::var("x"), Term::var("y")]), t("t", vec![a("a"), a("b")]), true)]
    #[case(t("t", vec![Term::var("x")]), t("t", vec![a("a"), a("b")]), false)]
    #[case(t("t", vec![Term::var("x")]), t("u", vec![a("a")]), false)]
    #[case(Term::var("x"), t("t", vec![a("a"), a("b")]), true)]
    #[case(Term::var("x"), Term::binary_leaf("a"), false)]
    #[case(Term::binary_var("x"), Term::binary_leaf("a"), true)]
    #[case(Term::binary_var("x"), LEAF, true)]
    #[case(Term::binary_var("x"), a("a"), false)]
    #[case(LEAF, LEAF, true)]
    #[case(LEAF, Term::binary_leaf("a"), false)]
    #[case(Term::binary_leaf("a"), LEAF, false)]
    #[case(a("a"), Term::binary_leaf("a"), false)]
    fn test_matches(#[case] pattern: Term, #[case] subject: Term, #[case] expected: bool) {
        let mut ctx = MatchContext::new();
        assert_eq!(pattern.matches(&subject, &mut ctx), expected);
    }

    #[test]
    fn test_binary_children_match_positionally() {
        let pattern = Term::binary("u1", Term::binary_var("x"), LEAF);
        let mut ctx = MatchContext::new();

        assert!(pattern.matches(&Term::binary("u1", Term::binary_leaf("a"), LEAF), &mut ctx));
        assert_eq!(ctx.binary_tree("x"), Some(&Term::binary_leaf("a")));

        let mut ctx = MatchContext::new();
        assert!(!pattern.matches(&Term::binary("u1", LEAF, Term::binary_leaf("a")), &mut ctx));
    }

    #[test]
    fn test_label_variable_binds_subject_label() {
        let pattern = Term::tree(Symbol::variable("L"), vec![Term::var("x")]);
        let mut ctx = MatchContext::new();

        assert!(pattern.matches(&t("f", vec![a("a")]), &mut ctx));
        assert_eq!(ctx.symbol("L"), Some(&Symbol::constant("f")));
        assert_eq!(ctx.tree("x"), Some(&a("a")));
    }

    #[test]
    fn test_repeated_label_variable_must_agree() {
        let pattern = Term::tree(
            "t",
            vec![
                Term::leaf_tree(Symbol::variable("L")),
                Term::leaf_tree(Symbol::variable("L")),
            ],
        );

        let mut ctx = MatchContext::new();
        assert!(pattern.matches(&t("t", vec![a("a"), a("a")]), &mut ctx));

        let mut ctx = MatchContext::new();
        assert!(!pattern.matches(&t("t", vec![a("a"), a("b")]), &mut ctx));
    }

    #[test]
    fn test_label_and_tree_variables_do_not_collide() {
        let pattern = Term::tree(Symbol::variable("x"), vec![Term::var("x")]);
        let mut ctx = MatchContext::new();

        assert!(pattern.matches(&t("f", vec![a("g")]), &mut ctx));
        assert_eq!(ctx.len(), 2);
    }

    #[rstest]
    #[case(
        Term::annotated(State::new("s1"), Term::var("x")),
        Term::annotated(State::new("s1"), a("a")),
        true
    )]
    #[case(
        Term::annotated(State::new("s1"), Term::var("x")),
        Term::annotated(State::new("s2"), a("a")),
        false
    )]
    #[case(Term::annotated(State::new("s1"), Term::var("x")), a("a"), false)]
    #[case(Term::var("x"), Term::annotated(State::new("s1"), a("a")), true)]
    #[case(
        Term::annotated(
            [State::new("s1"), State::new("s3")].into_iter().collect::<CompositeState>(),
            Term::var("x")
        ),
        Term::annotated(State::new("s3"), a("a")),
        true
    )]
    #[case(
        Term::annotated(
            [State::new("s1"), State::new("s3")].into_iter().collect::<CompositeState>(),
            Term::var("x")
        ),
        Term::annotated(State::new("s2"), a("a")),
        false
    )]
    fn test_matches_annotated(
        #[case] pattern: Term,
        #[case] subject: Term,
        #[case] expected: bool,
    ) {
        let mut ctx = MatchContext::new();
        assert_eq!(pattern.matches(&subject, &mut ctx), expected);
    }

    #[test]
    fn test_bindings_record_every_variable() {
        let pattern = Term::tree(
            "u1",
            vec![
                Term::annotated(State::new("s1"), Term::var("x")),
                Term::annotated(State::new("s1"), Term::var("y")),
            ],
        );
        let subject = Term::tree(
            "u1",
            vec![
                Term::annotated(State::new("s1"), a("a")),
                Term::annotated(State::new("s1"), a("b")),
            ],
        );
        let mut ctx = MatchContext::new();

        assert!(pattern.matches(&subject, &mut ctx));
        assert_eq!(ctx.tree("x"), Some(&a("a")));
        assert_eq!(ctx.tree("y"), Some(&a("b")));
    }
}
