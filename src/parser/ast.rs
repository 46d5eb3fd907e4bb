use serde::{Deserialize, Serialize};
use std::fmt;

/// A sequence of top-level forms read from one source unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Program {
    /// Top-level forms in source order
    pub forms: Vec<Expression>,
}

/// Parsed S-expression
///
/// Immutable after parsing. A `List` always comes from a balanced,
/// fully-consumed parenthesis group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Numeric literal
    Number(f64),
    /// `#t` / `#f`
    Boolean(bool),
    /// Any other atom
    Symbol(String),
    /// Parenthesized group: a form, an argument list or a parameter list
    List(Vec<Expression>),
}

impl Expression {
    /// Returns the symbol name if this is a symbol
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expression::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the elements if this is a list
    pub fn as_list(&self) -> Option<&[Expression]> {
        match self {
            Expression::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Expression::Number(_) => "number",
            Expression::Boolean(_) => "bool",
            Expression::Symbol(_) => "symbol",
            Expression::List(_) => "list",
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", format_number(*n)),
            Expression::Boolean(true) => write!(f, "#t"),
            Expression::Boolean(false) => write!(f, "#f"),
            Expression::Symbol(name) => write!(f, "{}", name),
            Expression::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Renders a number the way the drivers print it.
///
/// Finite integral values always carry a `.0` suffix (`3.0`, never `3`);
/// negative zero prints as `0.0`. Everything else uses the default `f64`
/// formatting.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        let n = if n == 0.0 { 0.0 } else { n };
        format!("{:.1}", n)
    } else {
        format!("{}", n)
    }
}
