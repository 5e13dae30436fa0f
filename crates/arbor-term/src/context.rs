use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;
use smol_str::SmolStr;

use crate::symbol::Symbol;
use crate::term::Term;

/// A variable key, tagged with its namespace.
///
/// Variables of different namespaces never share a binding even when their
/// names coincide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    Symbol(SmolStr),
    Tree(SmolStr),
    BinaryTree(SmolStr),
}

impl Variable {
    pub fn name(&self) -> &str {
        match self {
            Variable::Symbol(name) | Variable::Tree(name) | Variable::BinaryTree(name) => {
                name.as_str()
            }
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Symbol(name) => write!(f, "${}", name),
            Variable::Tree(name) => write!(f, "?{}", name),
            Variable::BinaryTree(name) => write!(f, "??{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding {
    Symbol(Symbol),
    Term(Term),
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Symbol(symbol) => write!(f, "{}", symbol),
            Binding::Term(term) => write!(f, "{}", term),
        }
    }
}

/// The binding environment of one matching attempt.
///
/// Bindings are kept in insertion order. A context is populated by a single
/// recursive match and then read by substitution; it is never reused for
/// another attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchContext {
    bindings: IndexMap<Variable, Binding>,
}

impl MatchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `variable` if it is unbound, otherwise checks the existing binding.
    ///
    /// Returns `false` when the variable is already bound to a different value.
    pub fn bind(&mut self, variable: Variable, binding: Binding) -> bool {
        match self.bindings.get(&variable) {
            Some(existing) => *existing == binding,
            None => {
                self.bindings.insert(variable, binding);
                true
            }
        }
    }

    #[inline(always)]
    pub fn get(&self, variable: &Variable) -> Option<&Binding> {
        self.bindings.get(variable)
    }

    /// The label bound to the symbol variable `name`.
    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        match self.bindings.get(&Variable::Symbol(name.into()))? {
            Binding::Symbol(symbol) => Some(symbol),
            Binding::Term(_) => None,
        }
    }

    /// The term bound to the tree variable `name`.
    pub fn tree(&self, name: &str) -> Option<&Term> {
        self.term(&Variable::Tree(name.into()))
    }

    /// The term bound to the binary-tree variable `name`.
    pub fn binary_tree(&self, name: &str) -> Option<&Term> {
        self.term(&Variable::BinaryTree(name.into()))
    }

    pub fn term(&self, variable: &Variable) -> Option<&Term> {
        match self.bindings.get(variable)? {
            Binding::Term(term) => Some(term),
            Binding::Symbol(_) => None,
        }
    }

    /// Resolves a label through the bindings.
    ///
    /// Constants and unbound variables resolve to themselves.
    pub fn resolve_symbol<'a>(&'a self, symbol: &'a Symbol) -> &'a Symbol {
        if symbol.is_variable() {
            self.symbol(symbol.name()).unwrap_or(symbol)
        } else {
            symbol
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Binding)> {
        self.bindings.iter()
    }
}

impl fmt::Display for MatchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.bindings
                .iter()
                .map(|(variable, binding)| format!("{} = {}", variable, binding))
                .join(", ")
        )
    }
}
