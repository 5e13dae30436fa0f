use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use smol_str::SmolStr;

/// An opaque automaton state, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    name: SmolStr,
}

impl State {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self { name: name.into() }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A set of states, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeState {
    states: BTreeSet<State>,
}

impl CompositeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, state: &State) -> bool {
        self.states.contains(state)
    }

    pub fn iter(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns `true` if at least one state is shared with `other`.
    pub fn intersects(&self, other: &CompositeState) -> bool {
        self.states.intersection(&other.states).next().is_some()
    }

    /// Returns a new set holding the states of both operands.
    pub fn union(&self, other: &CompositeState) -> CompositeState {
        self.states.union(&other.states).cloned().collect()
    }
}

impl FromIterator<State> for CompositeState {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

impl Extend<State> for CompositeState {
    fn extend<I: IntoIterator<Item = State>>(&mut self, iter: I) {
        self.states.extend(iter);
    }
}

impl<'a> IntoIterator for &'a CompositeState {
    type Item = &'a State;
    type IntoIter = std::collections::btree_set::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

impl fmt::Display for CompositeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.states.iter().join(","))
    }
}

/// The state part of a state-annotated term.
///
/// Subjects produced by automata always carry a single state. Patterns may
/// carry a composite state to accept any of several states at one position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Annotation {
    State(State),
    Composite(CompositeState),
}

impl Annotation {
    /// Returns the single state, if this annotation is not composite.
    pub fn state(&self) -> Option<&State> {
        match self {
            Annotation::State(state) => Some(state),
            Annotation::Composite(_) => None,
        }
    }

    pub fn contains(&self, state: &State) -> bool {
        match self {
            Annotation::State(s) => s == state,
            Annotation::Composite(states) => states.contains(state),
        }
    }

    pub fn states(&self) -> Box<dyn Iterator<Item = &State> + '_> {
        match self {
            Annotation::State(state) => Box::new(std::iter::once(state)),
            Annotation::Composite(states) => Box::new(states.iter()),
        }
    }

    /// Returns `true` if every state of `subject` is one of this annotation's states.
    ///
    /// A subject with no states is never admitted.
    pub fn admits(&self, subject: &Annotation) -> bool {
        match (self, subject) {
            (Annotation::State(p), Annotation::State(s)) => p == s,
            (pattern, subject) => {
                let mut states = subject.states().peekable();
                states.peek().is_some() && states.all(|s| pattern.contains(s))
            }
        }
    }

    /// Returns `true` if any state of this annotation is in `states`.
    pub fn is_in(&self, states: &CompositeState) -> bool {
        self.states().any(|s| states.contains(s))
    }
}

impl From<State> for Annotation {
    fn from(state: State) -> Self {
        Annotation::State(state)
    }
}

impl From<CompositeState> for Annotation {
    fn from(states: CompositeState) -> Self {
        Annotation::Composite(states)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::State(state) => write!(f, "{}", state),
            Annotation::Composite(states) => write!(f, "{}", states),
        }
    }
}
