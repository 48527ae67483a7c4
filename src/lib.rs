//! One-pass evaluation of arithmetic expressions such as `14 * 9 + 5^x / 78.5`.
//!
//! The expression is read by a recursive-descent parser that computes each
//! sub-expression as soon as it is recognised. Identifiers are looked up among
//! the registered variables first, then among the built-in [`Function`]s.

pub mod config;
pub mod error;
pub mod eval;
pub mod lex;
pub mod parse;
pub mod system;

pub use config::{EvaluatorConfig, InverseTrigInput};
pub use error::EvaluationError;
pub use eval::{Environment, Evaluator, evaluate};
pub use system::Function;
