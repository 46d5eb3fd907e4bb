//! Parser module
//!
//! Builds [`Expression`] trees from scanner tokens.

mod ast;
mod sexpr_parser;

pub use ast::{format_number, Expression, Program};
pub use sexpr_parser::{classify_atom, parse, SExprParser};
