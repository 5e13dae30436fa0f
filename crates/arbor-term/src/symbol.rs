use std::fmt;

use smol_str::SmolStr;

use crate::context::{Binding, MatchContext, Variable};

/// Distinguishes fixed labels from label placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    /// Matches only a symbol with the same name.
    Constant,
    /// Binds to whatever label it is matched against.
    Variable,
}

/// An immutable node label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    kind: SymbolKind,
    name: SmolStr,
}

impl Symbol {
    pub fn new(kind: SymbolKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Creates a constant label.
    pub fn constant(name: impl Into<SmolStr>) -> Self {
        Self::new(SymbolKind::Constant, name)
    }

    /// Creates a label variable.
    pub fn variable(name: impl Into<SmolStr>) -> Self {
        Self::new(SymbolKind::Variable, name)
    }

    #[inline(always)]
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[inline(always)]
    pub fn is_variable(&self) -> bool {
        matches!(self.kind, SymbolKind::Variable)
    }

    #[inline(always)]
    pub fn is_constant(&self) -> bool {
        matches!(self.kind, SymbolKind::Constant)
    }

    /// Matches this symbol, used as a pattern, against a subject label.
    ///
    /// A constant matches an equal symbol. A variable binds the subject on
    /// first use and afterwards only matches the label it was bound to.
    pub fn matches(&self, subject: &Symbol, ctx: &mut MatchContext) -> bool {
        match self.kind {
            SymbolKind::Constant => self == subject,
            SymbolKind::Variable => ctx.bind(
                Variable::Symbol(self.name.clone()),
                Binding::Symbol(subject.clone()),
            ),
        }
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::constant(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self::constant(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SymbolKind::Constant => write!(f, "{}", self.name),
            SymbolKind::Variable => write!(f, "${}", self.name),
        }
    }
}
