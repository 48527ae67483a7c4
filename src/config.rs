/// How `asin`, `acos` and `atan` treat their argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InverseTrigInput {
    /// Convert the argument from degrees to radians before applying the
    /// inverse function. Matches the behavior existing formulas were written
    /// against, even though an inverse function takes a ratio, not an angle.
    #[default]
    Degrees,
    /// Pass the argument through untouched as a dimensionless ratio.
    Ratio,
}

/// Tunables for an [`Evaluator`](crate::Evaluator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Deepest allowed nesting of unary operators, parentheses, function
    /// arguments and exponents.
    pub max_depth: usize,
    pub inverse_trig: InverseTrigInput,
}

impl EvaluatorConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_inverse_trig(mut self, inverse_trig: InverseTrigInput) -> Self {
        self.inverse_trig = inverse_trig;
        self
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            inverse_trig: InverseTrigInput::default(),
        }
    }
}
