//! Logic builtins

use crate::error::Result;
use crate::runtime::Value;
use crate::tools::{arity_mismatch, Arity, Tool, ToolRegistry};

/// Register logic tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(NotTool);
}

/// Logical negation
///
/// Usage: `(not value) -> bool`
/// Only `#f` negates to `#t`; `(not 0)` is `#f`.
pub struct NotTool;

impl Tool for NotTool {
    fn name(&self) -> &str {
        "not"
    }

    fn description(&self) -> &str {
        "Logical NOT"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        match args {
            [value] => Ok(Value::Bool(!value.is_truthy())),
            _ => Err(arity_mismatch(self, args.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not() {
        assert_eq!(NotTool.call(&[Value::Bool(false)]).unwrap(), Value::Bool(true));
        assert_eq!(NotTool.call(&[Value::Bool(true)]).unwrap(), Value::Bool(false));
        assert_eq!(NotTool.call(&[Value::Number(0.0)]).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_not_arity() {
        assert!(NotTool.call(&[]).is_err());
        assert!(NotTool.call(&[Value::Bool(true), Value::Bool(true)]).is_err());
    }
}
