#![no_main]

use arbitrary::Arbitrary;
use arbor_automata::{
    BottomUpTreeAutomaton, LEAF, MatchContext, State, Symbol, Term, TreeTransition,
    VariableReplacer, binarize_forest, unbinarize,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum Node {
    Leaf(u8),
    Branch(u8, Vec<Node>),
}

impl Node {
    fn to_term(&self, depth: usize) -> Term {
        match self {
            Node::Branch(label, children) if depth < 16 => Term::tree(
                label_of(*label),
                children.iter().take(4).map(|child| child.to_term(depth + 1)).collect(),
            ),
            Node::Leaf(label) | Node::Branch(label, _) => Term::leaf_tree(label_of(*label)),
        }
    }
}

fn label_of(label: u8) -> String {
    format!("l{}", label % 8)
}

/// Replaces the nodes selected by `holes` with fresh variables.
fn abstract_term(term: &Term, holes: &[bool], position: &mut usize) -> Term {
    let index = *position;
    *position += 1;

    match term {
        _ if holes.get(index).copied().unwrap_or(false) => Term::var(format!("x{index}")),
        Term::Tree(tree) => Term::tree(
            tree.label.clone(),
            tree.children
                .iter()
                .map(|child| abstract_term(child, holes, position))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[derive(Debug, Clone, Arbitrary)]
struct Input {
    forest: Vec<Node>,
    holes: Vec<bool>,
}

fuzz_target!(|input: Input| {
    let forest = input
        .forest
        .iter()
        .take(8)
        .map(|node| node.to_term(0))
        .collect::<Vec<_>>();

    let encoded = binarize_forest(&forest).unwrap();
    assert_eq!(unbinarize(&encoded).unwrap(), forest);

    for tree in &forest {
        let pattern = abstract_term(tree, &input.holes, &mut 0);
        let mut ctx = MatchContext::new();
        assert!(pattern.matches(tree, &mut ctx));
        assert_eq!(&VariableReplacer::new(&ctx).replace(&pattern), tree);
    }

    let at = |term| Term::annotated(State::new("ok"), term);
    let universal = BottomUpTreeAutomaton::new(
        [State::new("ok")],
        [
            TreeTransition::new(LEAF, at(LEAF)),
            TreeTransition::new(
                Term::binary(
                    Symbol::variable("L"),
                    at(Term::binary_var("l")),
                    at(Term::binary_var("r")),
                ),
                at(Term::binary(
                    Symbol::variable("L"),
                    Term::binary_var("l"),
                    Term::binary_var("r"),
                )),
            ),
        ],
    );
    assert!(universal.accept(&encoded).unwrap());
});
