//! # Schemelet - a minimal Scheme interpreter
//!
//! A small tree-walking interpreter for a Scheme subset: floating-point
//! numbers, booleans, symbols, lexically scoped closures and a handful of
//! builtins. It ships as a library plus a `schemelet` binary with a batch
//! mode and an interactive REPL.
//!
//! ## Language
//!
//! - Literals: numbers (`42`, `-3.5`, `1e3`) and booleans (`#t`, `#f`)
//! - Special forms: `define`, `if`, `lambda`, `and`, `or`
//! - Builtins: `+ - * /`, `= < > <= >=`, `not`
//!
//! Only `#f` is false. `0` and every procedure are true.
//!
//! ## Quick Start
//!
//! ```rust
//! use schemelet::{Evaluator, Parser, Scanner, Value};
//!
//! # fn main() -> schemelet::Result<()> {
//! let code = r#"
//!     (define fact
//!       (lambda (n)
//!         (if (= n 0) 1 (* n (fact (- n 1))))))
//!     (fact 5)
//! "#;
//!
//! // Tokenize (scan)
//! let tokens = Scanner::new(code).scan_tokens();
//!
//! // Parse into AST
//! let program = Parser::new(tokens).parse()?;
//!
//! // Execute
//! let evaluator = Evaluator::new();
//! let result = evaluator.execute(&program)?;
//!
//! assert_eq!(result, Value::Number(120.0));
//! assert_eq!(result.to_string(), "120.0");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is an [`Error`] whose [`ErrorKind`] tells syntax, name,
//! type, arity and resource errors apart:
//!
//! ```rust
//! use schemelet::{ErrorKind, Evaluator};
//!
//! let evaluator = Evaluator::new();
//! let err = evaluator.eval_source("(+ 1 #t)").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Type);
//! assert_eq!(err.to_string(), "Type error: expected number, got bool");
//! ```

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod driver;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod tools;

// Re-export main types
pub use error::{Error, ErrorKind, Result};
pub use lexer::{tokenize, SExprScanner, Token, TokenKind};
pub use parser::{parse, Expression, Program, SExprParser};
pub use runtime::{create_global_env, Environment, LispEvaluator, Procedure, Value};
pub use tools::{Arity, Tool, ToolRegistry};

/// Type alias for the S-expression scanner (lexer).
pub type Scanner = SExprScanner;

/// Type alias for the S-expression parser.
pub type Parser = SExprParser;

/// Type alias for the evaluator.
pub type Evaluator = LispEvaluator;

/// Evaluates one expression in `env`
///
/// ```rust
/// use schemelet::{create_global_env, evaluate, parse, tokenize, Value};
///
/// let env = create_global_env();
/// let expr = parse(&tokenize("(* 5 5)")).unwrap();
/// assert_eq!(evaluate(&expr, &env).unwrap(), Value::Number(25.0));
/// ```
pub fn evaluate(expr: &Expression, env: &Environment) -> Result<Value> {
    LispEvaluator::with_env(env.clone()).evaluate(expr, env)
}
