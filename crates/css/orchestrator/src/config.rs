use css_variables::DEFAULT_MAX_DEPTH;

/// Engine tuning knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleEngineConfig {
    /// When false, [`crate::StyleEngine::restyle`] never emits requests.
    pub transitions_enabled: bool,
    /// Bound on nested `var()` expansion.
    pub max_variable_depth: usize,
}

impl Default for StyleEngineConfig {
    #[inline]
    fn default() -> Self {
        Self {
            transitions_enabled: true,
            max_variable_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl StyleEngineConfig {
    #[must_use]
    pub fn with_transitions(mut self, enabled: bool) -> Self {
        self.transitions_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_max_variable_depth(mut self, depth: usize) -> Self {
        self.max_variable_depth = depth;
        self
    }
}
