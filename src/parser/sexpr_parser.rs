//! S-expression parser
//!
//! Turns a token sequence into [`Expression`] trees. A stray `)` is reported
//! with the line and column the scanner recorded for it.

use super::ast::{Expression, Program};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Recursive-descent S-expression parser
///
/// Holds the token vector immutably and walks it with a cursor, so one parser
/// can hand out several top-level forms in order.
pub struct SExprParser {
    tokens: Vec<Token>,
    current: usize,
}

impl SExprParser {
    /// Creates a new S-expression parser
    pub fn new(tokens: Vec<Token>) -> Self {
        SExprParser { tokens, current: 0 }
    }

    /// Parses every remaining top-level form
    pub fn parse(&mut self) -> Result<Program> {
        let mut forms = Vec::new();

        while !self.is_at_end() {
            forms.push(self.parse_expression()?);
        }

        Ok(Program { forms })
    }

    /// Parses exactly one expression, leaving the cursor right after it
    pub fn parse_expression(&mut self) -> Result<Expression> {
        let token = match self.advance() {
            Some(token) => token,
            None => return Err(Error::UnexpectedEof),
        };

        match token.kind {
            TokenKind::LeftParen => self.parse_list(),
            TokenKind::RightParen => Err(Error::syntax(format!(
                "unexpected ')' at line {}, column {}",
                token.line, token.column
            ))),
            TokenKind::Atom => Ok(classify_atom(&token.lexeme)),
        }
    }

    /// True once every token has been consumed
    pub fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Tokens not yet consumed
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.current.min(self.tokens.len())..]
    }

    fn parse_list(&mut self) -> Result<Expression> {
        let mut items = Vec::new();

        loop {
            match self.peek() {
                None => return Err(Error::syntax("expected ')'")),
                Some(token) if token.is_close() => {
                    self.current += 1;
                    return Ok(Expression::List(items));
                }
                Some(_) => items.push(self.parse_expression()?),
            }
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).cloned();
        if token.is_some() {
            self.current += 1;
        }
        token
    }
}

/// Parses the first expression of `tokens`.
///
/// Use [`SExprParser`] directly to read several top-level forms.
pub fn parse(tokens: &[Token]) -> Result<Expression> {
    SExprParser::new(tokens.to_vec()).parse_expression()
}

/// Classifies a single atom lexeme. Never fails.
///
/// Anything that parses as an `f64` is a number, `#t`/`#f` are booleans and
/// every other lexeme is kept verbatim as a symbol.
pub fn classify_atom(lexeme: &str) -> Expression {
    if let Ok(n) = lexeme.parse::<f64>() {
        return Expression::Number(n);
    }
    match lexeme {
        "#t" => Expression::Boolean(true),
        "#f" => Expression::Boolean(false),
        _ => Expression::Symbol(lexeme.to_string()),
    }
}
