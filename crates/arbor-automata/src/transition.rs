use std::fmt;

use arbor_term::{CompositeState, MatchContext, Term, VariableReplacer};

use crate::filtered::FilteredTreeTransition;

/// A rewrite rule from an input pattern to an output pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeTransition {
    input: Term,
    output: Term,
}

impl TreeTransition {
    pub fn new(input: Term, output: Term) -> Self {
        Self { input, output }
    }

    #[inline(always)]
    pub fn input(&self) -> &Term {
        &self.input
    }

    #[inline(always)]
    pub fn output(&self) -> &Term {
        &self.output
    }

    /// Matches the input pattern against `subject`, recording bindings in `ctx`.
    pub fn accept(&self, subject: &Term, ctx: &mut MatchContext) -> bool {
        self.input.matches(subject, ctx)
    }

    /// Applies the rule to `subject`, returning `None` if the input does not match.
    pub fn transit(&self, subject: &Term) -> Option<Term> {
        let mut ctx = MatchContext::new();
        self.accept(subject, &mut ctx)
            .then(|| VariableReplacer::new(&ctx).replace(&self.output))
    }

    /// Every output of applying the rule to `subject`; at most one for a plain transition.
    pub fn transit_all(&self, subject: &Term) -> Vec<Term> {
        self.transit(subject).into_iter().collect()
    }

    /// Every state mentioned by the input or the output pattern.
    pub fn states(&self) -> CompositeState {
        self.input.states().union(&self.output.states())
    }
}

impl fmt::Display for TreeTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.input, self.output)
    }
}

/// A transition held by an automaton.
#[derive(Debug, Clone)]
pub enum Transition {
    Tree(TreeTransition),
    Filtered(FilteredTreeTransition),
}

impl Transition {
    pub fn input(&self) -> &Term {
        match self {
            Transition::Tree(t) => t.input(),
            Transition::Filtered(t) => t.input(),
        }
    }

    pub fn output(&self) -> &Term {
        match self {
            Transition::Tree(t) => t.output(),
            Transition::Filtered(t) => t.output(),
        }
    }

    pub fn accept(&self, subject: &Term, ctx: &mut MatchContext) -> bool {
        match self {
            Transition::Tree(t) => t.accept(subject, ctx),
            Transition::Filtered(t) => t.accept(subject, ctx),
        }
    }

    pub fn transit(&self, subject: &Term) -> Option<Term> {
        match self {
            Transition::Tree(t) => t.transit(subject),
            Transition::Filtered(t) => t.transit(subject),
        }
    }

    pub fn transit_all(&self, subject: &Term) -> Vec<Term> {
        match self {
            Transition::Tree(t) => t.transit_all(subject),
            Transition::Filtered(t) => t.transit_all(subject),
        }
    }

    pub fn states(&self) -> CompositeState {
        match self {
            Transition::Tree(t) => t.states(),
            Transition::Filtered(t) => t.states(),
        }
    }
}

impl From<TreeTransition> for Transition {
    fn from(transition: TreeTransition) -> Self {
        Transition::Tree(transition)
    }
}

impl From<FilteredTreeTransition> for Transition {
    fn from(transition: FilteredTreeTransition) -> Self {
        Transition::Filtered(transition)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Tree(t) => write!(f, "{}", t),
            Transition::Filtered(t) => write!(f, "{}", t),
        }
    }
}

#[cfg(test)]
mod tests {
    use arbor_term::{LEAF, State, Symbol};
    use rstest::rstest;

    use super::*;

    fn s(name: &str) -> State {
        State::new(name)
    }

    #[test]
    fn test_transit_substitutes_bindings() {
        let transition = TreeTransition::new(
            Term::binary(
                "u1",
                Term::annotated(s("s1"), Term::binary_var("x")),
                Term::annotated(s("s1"), Term::binary_var("y")),
            ),
            Term::annotated(
                s("s1"),
                Term::binary("u1", Term::binary_var("x"), Term::binary_var("y")),
            ),
        );
        let subject = Term::binary(
            "u1",
            Term::annotated(s("s1"), LEAF),
            Term::annotated(s("s1"), LEAF),
        );

        assert_eq!(
            transition.transit(&subject),
            Some(Term::annotated(s("s1"), Term::binary_leaf("u1")))
        );
    }

    #[rstest]
    #[case(Term::binary("u2", Term::annotated(s("s1"), LEAF), Term::annotated(s("s1"), LEAF)))]
    #[case(Term::binary("u1", Term::annotated(s("s2"), LEAF), Term::annotated(s("s1"), LEAF)))]
    #[case(Term::binary("u1", LEAF, LEAF))]
    #[case(Term::leaf_tree("u1"))]
    fn test_transit_rejects(#[case] subject: Term) {
        let transition = TreeTransition::new(
            Term::binary(
                "u1",
                Term::annotated(s("s1"), Term::binary_var("x")),
                Term::annotated(s("s1"), Term::binary_var("y")),
            ),
            Term::annotated(s("s1"), Term::binary_var("x")),
        );

        assert_eq!(transition.transit(&subject), None);
        assert!(transition.transit_all(&subject).is_empty());
    }

    #[test]
    fn test_accept_records_bindings() {
        let transition = TreeTransition::new(
            Term::tree(Symbol::variable("L"), vec![Term::var("x")]),
            Term::var("x"),
        );
        let mut ctx = MatchContext::new();

        assert!(transition.accept(&Term::tree("f", vec![Term::leaf_tree("a")]), &mut ctx));
        assert_eq!(ctx.symbol("L"), Some(&Symbol::constant("f")));
        assert_eq!(ctx.tree("x"), Some(&Term::leaf_tree("a")));
    }

    #[test]
    fn test_states() {
        let transition = TreeTransition::new(
            Term::tree(
                "u1",
                vec![
                    Term::annotated(s("s1"), Term::var("x")),
                    Term::annotated(s("s3"), Term::var("y")),
                ],
            ),
            Term::annotated(s("s2"), Term::var("y")),
        );

        assert_eq!(
            transition.states(),
            [s("s1"), s("s2"), s("s3")].into_iter().collect::<CompositeState>()
        );
    }

    #[test]
    fn test_display() {
        let transition: Transition =
            TreeTransition::new(LEAF, Term::annotated(s("s1"), LEAF)).into();
        assert_eq!(transition.to_string(), "LEAF -> <s1>(LEAF)");
    }
}
