use std::{collections::HashMap, sync::OnceLock};

use log::debug;

use crate::{EvaluationError, EvaluatorConfig, lex::Cursor, parse::Parser};

/// The name used for the expression in diagnostics unless one is given.
pub const DEFAULT_NAME: &str = "<expression>";

/// Mathematical constants every evaluator starts with.
pub fn constants() -> &'static HashMap<&'static str, f64> {
    static CONSTANTS: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
    CONSTANTS.get_or_init(|| {
        let phi = 0.5 * (1.0 + 5f64.sqrt());
        HashMap::from([
            ("PI", std::f64::consts::PI),
            ("Pi", std::f64::consts::PI),
            ("E", std::f64::consts::E),
            ("e", std::f64::consts::E),
            ("phi", phi),
            ("Phi", phi),
            ("PHI", phi),
        ])
    })
}

/// Name to value table consulted before function names.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    values: HashMap<String, f64>,
}

impl Environment {
    /// An environment holding only the built-in constants.
    pub fn new() -> Self {
        Self {
            values: constants()
                .iter()
                .map(|(&name, &value)| (name.to_string(), value))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn define(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, &value)| (name.as_str(), value))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates one arithmetic expression against a set of variables.
///
/// The expression is stored as given and only checked when [`Evaluator::eval`]
/// runs. Each call re-reads it from scratch, so variables registered between
/// calls are picked up.
///
/// ```
/// use double_eval::Evaluator;
///
/// let mut evaluator = Evaluator::new("14 * 9 + 5^x / 78.5");
/// evaluator.register_variable("x", 2.0);
/// let value = evaluator.eval().unwrap();
/// assert!((value - (126.0 + 25.0 / 78.5)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator {
    expression: String,
    name: String,
    environment: Environment,
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(expression: impl Into<String>) -> Self {
        Self::with_config(expression, EvaluatorConfig::default())
    }

    pub fn with_config(expression: impl Into<String>, config: EvaluatorConfig) -> Self {
        Self {
            expression: expression.into(),
            name: DEFAULT_NAME.to_string(),
            environment: Environment::new(),
            config,
        }
    }

    /// Sets the source name shown in error reports, e.g. a file and line.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Adds `name`, or overwrites it. Built-in constants can be shadowed this
    /// way; only this evaluator sees the change.
    pub fn register_variable(&mut self, name: impl Into<String>, value: f64) {
        self.environment.define(name, value);
    }

    /// Registers every entry in iteration order; a later entry for the same
    /// name wins.
    pub fn register_variables<K, I>(&mut self, variables: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        for (name, value) in variables {
            self.environment.define(name, value);
        }
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.environment.get(name)
    }

    /// Every defined name with its value, constants included, in no
    /// particular order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, f64)> {
        self.environment.iter()
    }

    pub fn eval(&self) -> Result<f64, EvaluationError> {
        debug!("Evaluating expression: {}", self.expression);
        let cursor = Cursor::new(&self.name, &self.expression);
        let result = Parser::new(cursor, &self.environment.values, &self.config).parse();
        match &result {
            Ok(value) => debug!("{} = {value}", self.expression),
            Err(e) => debug!("{} failed: {e}", self.expression),
        }
        result
    }
}

/// Evaluates `expression` with only the built-in constants defined.
pub fn evaluate(expression: &str) -> Result<f64, EvaluationError> {
    Evaluator::new(expression).eval()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_are_seeded() {
        let environment = Environment::new();
        assert_eq!(environment.iter().count(), 7);
        assert_eq!(environment.get("PI"), Some(std::f64::consts::PI));
        assert_eq!(environment.get("Pi"), Some(std::f64::consts::PI));
        assert_eq!(environment.get("e"), Some(std::f64::consts::E));
        assert_eq!(environment.get("PHI"), environment.get("phi"));
        assert_eq!(environment.get("pi"), None);
    }

    #[test]
    fn test_register_variables_keeps_order() {
        let mut evaluator = Evaluator::new("x");
        evaluator.register_variables([("x", 1.0), ("y", 2.0), ("x", 3.0)]);
        assert_eq!(evaluator.variable("x"), Some(3.0));
        assert_eq!(evaluator.variable("y"), Some(2.0));
        assert_eq!(evaluator.eval().unwrap(), 3.0);

        let mut names: Vec<_> = evaluator.variables().map(|(name, _)| name).collect();
        names.sort_unstable();
        assert_eq!(names, ["E", "PHI", "PI", "Phi", "Pi", "e", "phi", "x", "y"]);
    }

    #[test]
    fn test_shadowing_is_per_instance() {
        let mut shadowed = Evaluator::new("PI");
        let untouched = shadowed.clone();
        shadowed.register_variable("PI", 1.0);

        assert_eq!(shadowed.eval().unwrap(), 1.0);
        assert_eq!(untouched.eval().unwrap(), std::f64::consts::PI);
        assert_eq!(evaluate("PI").unwrap(), std::f64::consts::PI);
    }

    #[test]
    fn test_source_name_in_errors() {
        let evaluator = Evaluator::new("1 +").with_name("damage.txt:3");
        assert_eq!(evaluator.name(), "damage.txt:3");
        match evaluator.eval() {
            Err(EvaluationError::UnexpectedEof { src, .. }) => {
                assert_eq!(src.name(), "damage.txt:3");
                assert_eq!(src.inner(), "1 +");
            }
            other => panic!("expected end of input error, got {other:?}"),
        }
    }
}
