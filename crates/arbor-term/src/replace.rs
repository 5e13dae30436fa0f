use crate::context::{MatchContext, Variable};
use crate::symbol::Symbol;
use crate::term::{BinaryTree, StateAnnotatedTerm, Term, Tree};

/// Instantiates patterns with the bindings of a [`MatchContext`].
#[derive(Debug, Clone, Copy)]
pub struct VariableReplacer<'a> {
    ctx: &'a MatchContext,
}

impl<'a> VariableReplacer<'a> {
    pub fn new(ctx: &'a MatchContext) -> Self {
        Self { ctx }
    }

    /// Replaces every bound variable of `pattern` with its value.
    ///
    /// Unbound variables and all other structure are copied unchanged.
    pub fn replace(&self, pattern: &Term) -> Term {
        match pattern {
            Term::Leaf => Term::Leaf,
            Term::TreeVariable(name) => self
                .ctx
                .term(&Variable::Tree(name.clone()))
                .cloned()
                .unwrap_or_else(|| pattern.clone()),
            Term::BinaryTreeVariable(name) => self
                .ctx
                .term(&Variable::BinaryTree(name.clone()))
                .cloned()
                .unwrap_or_else(|| pattern.clone()),
            Term::Tree(tree) => Term::Tree(Tree {
                label: self.replace_symbol(&tree.label),
                children: tree.children.iter().map(|child| self.replace(child)).collect(),
            }),
            Term::BinaryTree(tree) => Term::BinaryTree(BinaryTree {
                label: self.replace_symbol(&tree.label),
                left: Box::new(self.replace(&tree.left)),
                right: Box::new(self.replace(&tree.right)),
            }),
            Term::Annotated(annotated) => Term::Annotated(StateAnnotatedTerm {
                annotation: annotated.annotation.clone(),
                term: Box::new(self.replace(&annotated.term)),
            }),
        }
    }

    /// Replaces a bound label variable with its value.
    pub fn replace_symbol(&self, symbol: &Symbol) -> Symbol {
        self.ctx.resolve_symbol(symbol).clone()
    }
}

/// Shorthand for `VariableReplacer::new(ctx).replace(pattern)`.
pub fn replace(pattern: &Term, ctx: &MatchContext) -> Term {
    VariableReplacer::new(ctx).replace(pattern)
}
