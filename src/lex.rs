use miette::{NamedSource, SourceSpan};

use crate::EvaluationError;

/// A word scanned out of the expression, remembered with where it started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'de> {
    pub literal: &'de str,
    pub offset: usize,
}

impl Token<'_> {
    pub fn span(&self) -> SourceSpan {
        SourceSpan::from(self.offset..self.offset + self.literal.len())
    }
}

/// Scanning state for a single evaluation.
///
/// `rest` always starts at the lookahead character; `byte` is its offset in
/// `whole`. Whitespace is only skipped by [`Cursor::eat`] and
/// [`Cursor::skip_whitespace`], never inside numbers or identifiers.
pub struct Cursor<'de> {
    name: &'de str,
    whole: &'de str,
    rest: &'de str,
    byte: usize,
}

impl<'de> Cursor<'de> {
    pub fn new(name: &'de str, input: &'de str) -> Self {
        Cursor {
            name,
            whole: input,
            rest: input,
            byte: 0,
        }
    }

    pub fn byte(&self) -> usize {
        self.byte
    }

    /// The lookahead character, `None` at end of input.
    pub fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self, bytes: usize) -> &'de str {
        let (taken, rest) = self.rest.split_at(bytes);
        self.rest = rest;
        self.byte += bytes;
        taken
    }

    pub fn skip_whitespace(&mut self) {
        let trimmed = self.rest.trim_start();
        let skipped = self.rest.len() - trimmed.len();
        self.bump(skipped);
    }

    /// Skips whitespace, then consumes `expected` if it is the lookahead.
    pub fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.rest.starts_with(expected) {
            self.bump(expected.len_utf8());
            true
        } else {
            false
        }
    }

    /// Scans digits and decimal points greedily and parses them as one literal.
    pub fn number(&mut self) -> Result<f64, EvaluationError> {
        let end = self
            .rest
            .find(|c: char| !matches!(c, '0'..='9' | '.'))
            .unwrap_or(self.rest.len());
        let offset = self.byte;
        let literal = self.bump(end);

        literal.parse().map_err(|_| EvaluationError::InvalidNumber {
            src: self.source(),
            span: SourceSpan::from(offset..self.byte),
            literal: literal.to_string(),
        })
    }

    /// Scans an identifier starting at the lookahead.
    ///
    /// Identifiers are runs of letters. When the longer run of letters and
    /// digits is itself `known` (`log10`, a variable named `x1`), that run is
    /// taken instead, so `sqrt4` still reads as `sqrt 4`.
    pub fn identifier(&mut self, known: impl Fn(&str) -> bool) -> Token<'de> {
        let letters = self
            .rest
            .find(|c: char| !c.is_alphabetic())
            .unwrap_or(self.rest.len());
        let alphanumerics = self
            .rest
            .find(|c: char| !c.is_alphanumeric())
            .unwrap_or(self.rest.len());

        let end = if alphanumerics > letters && known(&self.rest[..alphanumerics]) {
            alphanumerics
        } else {
            letters
        };

        let offset = self.byte;
        Token {
            literal: self.bump(end),
            offset,
        }
    }

    pub fn source(&self) -> NamedSource<String> {
        NamedSource::new(self.name, self.whole.to_string())
    }

    fn lookahead_span(&self) -> SourceSpan {
        let len = self.peek().map_or(0, char::len_utf8);
        SourceSpan::from(self.byte..self.byte + len)
    }

    /// The error for whatever sits at the lookahead when an operand was expected.
    pub fn unexpected(&self) -> EvaluationError {
        match self.peek() {
            Some(token) => EvaluationError::UnexpectedCharacter {
                src: self.source(),
                span: self.lookahead_span(),
                token,
            },
            None => EvaluationError::UnexpectedEof {
                src: self.source(),
                span: SourceSpan::from(self.whole.len()..self.whole.len()),
            },
        }
    }

    pub fn trailing(&self, token: char) -> EvaluationError {
        EvaluationError::TrailingInput {
            src: self.source(),
            span: SourceSpan::from(self.byte..self.whole.len()),
            token,
        }
    }

    /// `open` is the offset of the `(` that was never closed.
    pub fn unclosed(&self, open: usize, function: Option<&str>) -> EvaluationError {
        EvaluationError::UnclosedParenthesis {
            src: self.source(),
            span: SourceSpan::from(open..self.whole.len()),
            function: function.map(str::to_string),
        }
    }

    pub fn unknown_identifier(&self, token: &Token<'_>) -> EvaluationError {
        EvaluationError::UnknownIdentifier {
            src: self.source(),
            span: token.span(),
            name: token.literal.to_string(),
        }
    }

    pub fn depth_limit(&self, limit: usize) -> EvaluationError {
        EvaluationError::DepthLimitExceeded {
            src: self.source(),
            span: self.lookahead_span(),
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eat_skips_leading_whitespace() {
        let mut cursor = Cursor::new("<test>", "  \t+ 1");
        assert!(!cursor.eat('-'));
        assert_eq!(cursor.byte(), 3);
        assert!(cursor.eat('+'));
        assert_eq!(cursor.byte(), 4);
        assert_eq!(cursor.peek(), Some(' '));
    }

    #[test]
    fn test_number_scanning() {
        let mut cursor = Cursor::new("<test>", "14.5*2");
        assert_eq!(cursor.number().unwrap(), 14.5);
        assert_eq!(cursor.peek(), Some('*'));

        let mut cursor = Cursor::new("<test>", ".5");
        assert_eq!(cursor.number().unwrap(), 0.5);
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_number_with_two_points_is_rejected() {
        let mut cursor = Cursor::new("<test>", "1.2.3 + 4");
        match cursor.number() {
            Err(EvaluationError::InvalidNumber { literal, span, .. }) => {
                assert_eq!(literal, "1.2.3");
                assert_eq!(span, SourceSpan::from(0..5));
            }
            other => panic!("expected an invalid number, got {other:?}"),
        }
    }

    #[test]
    fn test_identifier_stops_at_digits_unless_known() {
        let mut cursor = Cursor::new("<test>", "sqrt4");
        let token = cursor.identifier(|_| false);
        assert_eq!(token.literal, "sqrt");
        assert_eq!(cursor.peek(), Some('4'));

        let mut cursor = Cursor::new("<test>", "log10(100)");
        let token = cursor.identifier(|word| word == "log10");
        assert_eq!(token.literal, "log10");
        assert_eq!(token.span(), SourceSpan::from(0..5));
        assert_eq!(cursor.peek(), Some('('));
    }

    #[test]
    fn test_unexpected_at_end_of_input() {
        let mut cursor = Cursor::new("<test>", "2 ");
        cursor.number().unwrap();
        cursor.skip_whitespace();
        assert!(matches!(
            cursor.unexpected(),
            EvaluationError::UnexpectedEof { .. }
        ));
    }
}
