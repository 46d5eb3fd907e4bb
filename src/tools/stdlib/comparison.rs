//! Numeric comparison builtins

use crate::error::Result;
use crate::runtime::Value;
use crate::tools::{arity_mismatch, Arity, Tool, ToolRegistry};

/// Register comparison tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(ComparisonTool::new("=", "Numeric equality", |a, b| a == b));
    registry.register(ComparisonTool::new("<", "Less than", |a, b| a < b));
    registry.register(ComparisonTool::new(">", "Greater than", |a, b| a > b));
    registry.register(ComparisonTool::new("<=", "Less than or equal", |a, b| a <= b));
    registry.register(ComparisonTool::new(">=", "Greater than or equal", |a, b| a >= b));
}

/// Binary numeric comparison
///
/// Usage: `(< a b) -> bool`
pub struct ComparisonTool {
    name: &'static str,
    description: &'static str,
    op: fn(f64, f64) -> bool,
}

impl ComparisonTool {
    /// Creates a comparison bound to `name`
    pub fn new(name: &'static str, description: &'static str, op: fn(f64, f64) -> bool) -> Self {
        ComparisonTool {
            name,
            description,
            op,
        }
    }
}

impl Tool for ComparisonTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn arity(&self) -> Arity {
        Arity::Exact(2)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        match args {
            [a, b] => Ok(Value::Bool((self.op)(a.as_number()?, b.as_number()?))),
            _ => Err(arity_mismatch(self, args.len())),
        }
    }
}
