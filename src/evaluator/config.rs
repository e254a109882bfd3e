/// Evaluator configuration
///
/// Built with chained setters, starting from [`EvaluatorConfig::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Reject fields whose tag differs from an input ref's declared type
    pub strict_field_types: bool,

    /// Deepest expression tree accepted when preparing an evaluator
    pub max_depth: usize,
}

impl EvaluatorConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub fn new() -> Self {
        Self {
            strict_field_types: true,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Skip the per-row field type check and trust the planner's schema
    pub fn relaxed(mut self) -> Self {
        self.strict_field_types = false;
        self
    }

    /// Set strict field type checking
    pub fn strict_field_types(mut self, strict: bool) -> Self {
        self.strict_field_types = strict;
        self
    }

    /// Set maximum tree depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
