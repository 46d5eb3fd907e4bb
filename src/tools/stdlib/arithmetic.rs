//! Arithmetic builtins
//!
//! All operands must be numbers. Division follows IEEE 754, so dividing by
//! zero yields an infinity or NaN rather than an error.

use crate::error::Result;
use crate::runtime::Value;
use crate::tools::{arity_mismatch, Arity, Tool, ToolRegistry};

/// Register arithmetic tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(AddTool);
    registry.register(SubtractTool);
    registry.register(MultiplyTool);
    registry.register(DivideTool);
}

fn numbers(args: &[Value]) -> Result<Vec<f64>> {
    args.iter().map(Value::as_number).collect()
}

/// Variadic sum
///
/// Usage: `(+ n...) -> number`
/// Example: `(+)` returns `0`, `(+ 1 2 3)` returns `6`
pub struct AddTool;

impl Tool for AddTool {
    fn name(&self) -> &str {
        "+"
    }

    fn description(&self) -> &str {
        "Sum of all arguments"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(0)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        Ok(Value::Number(numbers(args)?.into_iter().sum()))
    }
}

/// Negation or subtraction
///
/// Usage: `(- n) -> -n`, `(- a b c...) -> a - (b + c + ...)`
pub struct SubtractTool;

impl Tool for SubtractTool {
    fn name(&self) -> &str {
        "-"
    }

    fn description(&self) -> &str {
        "Negate one argument, or subtract the rest from the first"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        match numbers(args)?.as_slice() {
            [] => Err(arity_mismatch(self, 0)),
            [x] => Ok(Value::Number(-x)),
            [x, rest @ ..] => Ok(Value::Number(x - rest.iter().sum::<f64>())),
        }
    }
}

/// Product of one or two numbers
///
/// Usage: `(* n) -> n`, `(* a b) -> a * b`
/// Three or more operands are rejected.
pub struct MultiplyTool;

impl Tool for MultiplyTool {
    fn name(&self) -> &str {
        "*"
    }

    fn description(&self) -> &str {
        "Product of one or two arguments"
    }

    fn arity(&self) -> Arity {
        Arity::Range(1, 2)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        match args {
            [x] => Ok(Value::Number(x.as_number()?)),
            [a, b] => Ok(Value::Number(a.as_number()? * b.as_number()?)),
            _ => Err(arity_mismatch(self, args.len())),
        }
    }
}

/// Binary division
///
/// Usage: `(/ a b) -> a / b`
/// Example: `(/ 1 0)` returns `inf`
pub struct DivideTool;

impl Tool for DivideTool {
    fn name(&self) -> &str {
        "/"
    }

    fn description(&self) -> &str {
        "Divide the first argument by the second"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(2)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        match args {
            [a, b] => Ok(Value::Number(a.as_number()? / b.as_number()?)),
            _ => Err(arity_mismatch(self, args.len())),
        }
    }
}
