use std::collections::HashMap;

use log::trace;

use crate::{EvaluationError, EvaluatorConfig, Function, lex::Cursor};

// Grammar:
// expression = term | expression `+` term | expression `-` term
// term       = factor | term `*` factor | term `/` factor
// factor     = `+` factor | `-` factor | `(` expression `)` | number
//            | name `(` expression `)` | name factor
//            | factor `^` factor
//
// Every rule returns the value of what it just read; there is no tree.

pub struct Parser<'a, 'de> {
    cursor: Cursor<'de>,
    variables: &'a HashMap<String, f64>,
    config: &'a EvaluatorConfig,
    depth: usize,
}

impl<'a, 'de> Parser<'a, 'de> {
    pub fn new(
        cursor: Cursor<'de>,
        variables: &'a HashMap<String, f64>,
        config: &'a EvaluatorConfig,
    ) -> Self {
        Parser {
            cursor,
            variables,
            config,
            depth: 0,
        }
    }

    /// Evaluates the whole input; anything left over is an error.
    pub fn parse(mut self) -> Result<f64, EvaluationError> {
        let value = self.parse_expression()?;
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            Some(token) => Err(self.cursor.trailing(token)),
            None => Ok(value),
        }
    }

    fn parse_expression(&mut self) -> Result<f64, EvaluationError> {
        let mut x = self.parse_term()?;
        loop {
            if self.cursor.eat('+') {
                x += self.parse_term()?;
            } else if self.cursor.eat('-') {
                x -= self.parse_term()?;
            } else {
                return Ok(x);
            }
        }
    }

    fn parse_term(&mut self) -> Result<f64, EvaluationError> {
        let mut x = self.parse_factor()?;
        loop {
            if self.cursor.eat('*') {
                x *= self.parse_factor()?;
            } else if self.cursor.eat('/') {
                x /= self.parse_factor()?;
            } else {
                return Ok(x);
            }
        }
    }

    fn parse_factor(&mut self) -> Result<f64, EvaluationError> {
        if self.depth >= self.config.max_depth {
            self.cursor.skip_whitespace();
            return Err(self.cursor.depth_limit(self.config.max_depth));
        }
        self.depth += 1;
        let x = self.parse_factor_within();
        self.depth -= 1;
        x
    }

    fn parse_factor_within(&mut self) -> Result<f64, EvaluationError> {
        if self.cursor.eat('+') {
            return self.parse_factor();
        }
        if self.cursor.eat('-') {
            return Ok(-self.parse_factor()?);
        }

        let mut x = if self.cursor.eat('(') {
            let open = self.cursor.byte() - 1;
            let x = self.parse_expression()?;
            if !self.cursor.eat(')') {
                return Err(self.cursor.unclosed(open, None));
            }
            x
        } else {
            match self.cursor.peek() {
                Some('0'..='9' | '.') => self.cursor.number()?,
                Some(c) if c.is_alphabetic() => self.parse_name()?,
                _ => return Err(self.cursor.unexpected()),
            }
        };

        if self.cursor.eat('^') {
            x = x.powf(self.parse_factor()?);
        }
        Ok(x)
    }

    /// A variable, or a function applied to a parenthesised argument or to the
    /// next factor.
    fn parse_name(&mut self) -> Result<f64, EvaluationError> {
        let variables = self.variables;
        let token = self
            .cursor
            .identifier(|word| variables.contains_key(word) || Function::from_name(word).is_some());

        if let Some(&value) = variables.get(token.literal) {
            trace!("variable {} = {value}", token.literal);
            return Ok(value);
        }

        let Some(function) = Function::from_name(token.literal) else {
            return Err(self.cursor.unknown_identifier(&token));
        };

        let argument = if self.cursor.eat('(') {
            let open = self.cursor.byte() - 1;
            let x = self.parse_expression()?;
            if !self.cursor.eat(')') {
                return Err(self.cursor.unclosed(open, Some(token.literal)));
            }
            x
        } else {
            self.parse_factor()?
        };

        let x = function.apply(argument, self.config.inverse_trig);
        trace!("{function}({argument}) = {x}");
        Ok(x)
    }
}
