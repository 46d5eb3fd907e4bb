use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::parser::{format_number, Expression};
use crate::runtime::Environment;
use crate::tools::Tool;

/// Runtime value representation
#[derive(Clone)]
pub enum Value {
    /// 64-bit floating-point number
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Builtin or closure
    Procedure(Procedure),
    /// No value; produced only by `define` and never printed
    Null,
}

/// Callable value
#[derive(Clone)]
pub enum Procedure {
    /// Native procedure from the tool registry
    Builtin(Arc<dyn Tool>),
    /// Procedure created by `lambda`
    Closure(Rc<Closure>),
}

/// A `lambda` paired with the environment it was created in
///
/// The environment is held by handle, so bindings added to it after the
/// closure was created (including the closure's own name) are visible when
/// the body runs.
pub struct Closure {
    /// Parameter names, in call order
    pub params: Vec<String>,
    /// Unevaluated body
    pub body: Rc<Expression>,
    /// Defining environment
    pub env: Environment,
}

impl Value {
    /// Returns the type name as a string
    pub fn type_name(&self) -> String {
        match self {
            Value::Number(_) => "number".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Procedure(_) => "procedure".to_string(),
            Value::Null => "null".to_string(),
        }
    }

    /// Only `#f` is falsy; zero and every procedure are truthy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }

    /// Extracts a number or fails with a type error
    pub fn as_number(&self) -> Result<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(Error::type_error("number", other.type_name())),
        }
    }

    /// Returns the procedure if this value is callable
    pub fn as_procedure(&self) -> Option<&Procedure> {
        match self {
            Value::Procedure(proc) => Some(proc),
            _ => None,
        }
    }

    /// True for the no-value marker
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Procedure {
    /// Builtin name, or `lambda` for closures
    pub fn name(&self) -> &str {
        match self {
            Procedure::Builtin(tool) => tool.name(),
            Procedure::Closure(_) => "lambda",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Procedure(a), Value::Procedure(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Procedure {
    /// Procedures compare by identity
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Procedure::Builtin(a), Procedure::Builtin(b)) => Arc::ptr_eq(a, b),
            (Procedure::Closure(a), Procedure::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Bool(true) => write!(f, "#t"),
            Value::Bool(false) => write!(f, "#f"),
            Value::Procedure(proc) => write!(f, "{}", proc),
            Value::Null => Ok(()),
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Procedure::Builtin(tool) => write!(f, "#<builtin {}>", tool.name()),
            Procedure::Closure(_) => write!(f, "#<procedure>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({})", n),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Procedure(proc) => write!(f, "Procedure({:?})", proc),
            Value::Null => write!(f, "Null"),
        }
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Procedure::Builtin(tool) => write!(f, "Builtin({})", tool.name()),
            // The captured environment may contain this closure; don't recurse into it
            Procedure::Closure(closure) => f
                .debug_struct("Closure")
                .field("params", &closure.params)
                .field("body", &closure.body.to_string())
                .finish(),
        }
    }
}
