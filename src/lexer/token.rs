use serde::{Deserialize, Serialize};
use std::fmt;

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }

    /// Returns true for `(`
    pub fn is_open(&self) -> bool {
        self.kind == TokenKind::LeftParen
    }

    /// Returns true for `)`
    pub fn is_close(&self) -> bool {
        self.kind == TokenKind::RightParen
    }
}

/// All possible token types
///
/// The scanner does no classification beyond parentheses; atoms are typed
/// later by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Any other whitespace-delimited lexeme
    Atom,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}
