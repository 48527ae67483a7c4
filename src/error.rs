use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Everything that can stop an evaluation.
///
/// Every variant carries the whole expression as its source code and a span
/// pointing at the offending lexeme, so a `miette::Report` built from it
/// renders the expression with the problem underlined.
#[derive(Error, Debug, Diagnostic)]
pub enum EvaluationError {
    #[error("Unexpected character '{token}'")]
    #[diagnostic(
        code(double_eval::unexpected_character),
        help("remove or correct the character: `{token}`")
    )]
    UnexpectedCharacter {
        #[source_code]
        src: NamedSource<String>,
        #[label("this character")]
        span: SourceSpan,
        token: char,
    },

    #[error("Unexpected end of expression")]
    #[diagnostic(
        code(double_eval::unexpected_eof),
        help("the expression ended where a number, variable or function was expected")
    )]
    UnexpectedEof {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected an operand here")]
        span: SourceSpan,
    },

    #[error("Missing ')'{}", call_suffix(.function))]
    #[diagnostic(
        code(double_eval::unclosed_parenthesis),
        help("add a closing `)` to balance the parenthesis")
    )]
    UnclosedParenthesis {
        #[source_code]
        src: NamedSource<String>,
        #[label("this parenthesis is never closed")]
        span: SourceSpan,
        function: Option<String>,
    },

    #[error("Unknown function or variable: {name}")]
    #[diagnostic(
        code(double_eval::unknown_identifier),
        help("register `{name}` as a variable, or use one of the built-in functions")
    )]
    UnknownIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("not a variable or function")]
        span: SourceSpan,
        name: String,
    },

    #[error("Unexpected trailing input starting at '{token}'")]
    #[diagnostic(
        code(double_eval::trailing_input),
        help("everything after the complete expression must be removed")
    )]
    TrailingInput {
        #[source_code]
        src: NamedSource<String>,
        #[label("the expression should have ended here")]
        span: SourceSpan,
        token: char,
    },

    #[error("Invalid numeric literal '{literal}'")]
    #[diagnostic(
        code(double_eval::invalid_number),
        url("https://doc.rust-lang.org/std/num/struct.ParseFloatError.html"),
        help("a number has digits and at most one decimal point")
    )]
    InvalidNumber {
        #[source_code]
        src: NamedSource<String>,
        #[label("this numeric literal")]
        span: SourceSpan,
        literal: String,
    },

    #[error("Expression nests deeper than {limit} levels")]
    #[diagnostic(
        code(double_eval::depth_limit),
        help("simplify the expression or raise the evaluator's `max_depth`")
    )]
    DepthLimitExceeded {
        #[source_code]
        src: NamedSource<String>,
        #[label("nesting limit reached here")]
        span: SourceSpan,
        limit: usize,
    },
}

fn call_suffix(function: &Option<String>) -> String {
    match function {
        Some(name) => format!(" after argument to {name}"),
        None => String::new(),
    }
}

impl EvaluationError {
    /// Byte span of the offending lexeme within the expression.
    pub fn span(&self) -> SourceSpan {
        match self {
            Self::UnexpectedCharacter { span, .. }
            | Self::UnexpectedEof { span, .. }
            | Self::UnclosedParenthesis { span, .. }
            | Self::UnknownIdentifier { span, .. }
            | Self::TrailingInput { span, .. }
            | Self::InvalidNumber { span, .. }
            | Self::DepthLimitExceeded { span, .. } => *span,
        }
    }
}
