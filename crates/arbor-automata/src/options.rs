/// Search settings shared by both automaton kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of transition attempts in a single `accept` or `translate` call.
    pub max_steps: usize,
    /// Maximum nesting of top-down derivations and depth of terms built bottom-up.
    pub max_depth: usize,
    /// Reuse the result of a structurally equal subtree within one call.
    pub memoize: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_steps: 1_000_000,
            max_depth: 256,
            memoize: true,
        }
    }
}
