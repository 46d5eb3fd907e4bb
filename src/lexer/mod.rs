//! Lexical analysis for schemelet
//!
//! Splits source text into parenthesis and atom tokens.

mod sexpr_scanner;
mod token;

pub use sexpr_scanner::SExprScanner;
pub use token::{Token, TokenKind};

/// Tokenizes `source` into a flat token sequence.
///
/// `(` and `)` are always standalone tokens; everything else is split on
/// whitespace runs. Never fails.
pub fn tokenize(source: &str) -> Vec<Token> {
    SExprScanner::new(source).scan_tokens()
}

/// Tokenizes `source` as text whose first line is line `line` of a file
pub fn tokenize_from_line(source: &str, line: usize) -> Vec<Token> {
    SExprScanner::starting_at_line(source, line).scan_tokens()
}
