//! Character-level scanner for S-expression source
//!
//! Every token records the line and column where it starts, so parse errors
//! can point back into the original file.

use super::token::{Token, TokenKind};

/// Scanner for S-expression source text
pub struct SExprScanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of current token
    start: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Column where the current token started
    start_column: usize,
}

impl SExprScanner {
    /// Creates a new S-expression scanner from source code
    pub fn new(source: &str) -> Self {
        Self::starting_at_line(source, 1)
    }

    /// Creates a scanner for text that begins on `line` of a larger source
    pub fn starting_at_line(source: &str, line: usize) -> Self {
        SExprScanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line,
            column: 1,
            start_column: 1,
        }
    }

    /// Scans all tokens from source code and returns them as a vector
    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_column = self.column;
            self.scan_token();
        }

        self.tokens
    }

    fn scan_token(&mut self) {
        let c = self.advance();

        match c {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            c if c.is_whitespace() => {}
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            _ => self.scan_atom(),
        }
    }

    fn scan_atom(&mut self) {
        while !self.is_at_end() && !Self::is_delimiter(self.peek()) {
            self.advance();
        }
        self.add_token(TokenKind::Atom);
    }

    fn is_delimiter(c: char) -> bool {
        c.is_whitespace() || c == '(' || c == ')'
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        self.tokens
            .push(Token::new(kind, lexeme, self.line, self.start_column));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexemes(source: &str) -> Vec<String> {
        SExprScanner::new(source)
            .scan_tokens()
            .into_iter()
            .map(|t| t.lexeme)
            .collect()
    }

    #[test]
    fn test_simple_sexpr() {
        let tokens = SExprScanner::new("(+ 1 2)").scan_tokens();

        assert_eq!(tokens.len(), 5); // ( + 1 2 )
        assert_eq!(tokens[0].kind, TokenKind::LeftParen);
        assert_eq!(tokens[1].kind, TokenKind::Atom);
        assert_eq!(tokens[1].lexeme, "+");
        assert_eq!(tokens[3].lexeme, "2");
        assert_eq!(tokens[4].kind, TokenKind::RightParen);
    }

    #[test]
    fn test_parens_split_without_whitespace() {
        assert_eq!(
            lexemes("((lambda(x)x)5)"),
            vec!["(", "(", "lambda", "(", "x", ")", "x", ")", "5", ")"]
        );
    }

    #[test]
    fn test_whitespace_runs() {
        assert_eq!(lexemes("  a\t\tb \n\n c  "), vec!["a", "b", "c"]);
        assert!(lexemes("   \n\t ").is_empty());
        assert!(lexemes("").is_empty());
    }

    #[test]
    fn test_no_comment_handling() {
        // Comments are stripped by the drivers, not the scanner
        assert_eq!(lexemes("; hi"), vec![";", "hi"]);
    }

    #[test]
    fn test_positions() {
        let tokens = SExprScanner::new("(a\n  bc)").scan_tokens();

        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (1, 2));
        assert_eq!((tokens[2].line, tokens[2].column), (2, 3));
        assert_eq!(tokens[2].lexeme, "bc");
        assert_eq!((tokens[3].line, tokens[3].column), (2, 5));
    }

    #[test]
    fn test_starting_line_offset() {
        let tokens = SExprScanner::starting_at_line("\n    )", 4).scan_tokens();

        assert_eq!(tokens.len(), 1);
        assert_eq!((tokens[0].line, tokens[0].column), (5, 5));
    }
}
