//! Builtin procedure system
//!
//! Every builtin bound in the global environment is a [`Tool`] registered in
//! a [`ToolRegistry`].

pub mod stdlib;

use crate::error::{Error, Result};
use crate::runtime::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Tool trait - all builtin procedures implement this
pub trait Tool: Send + Sync {
    /// Name the tool is bound to in the global environment
    fn name(&self) -> &str;

    /// Tool description
    fn description(&self) -> &str;

    /// Accepted argument counts, checked before `execute` runs
    fn arity(&self) -> Arity;

    /// Execute the tool on already-evaluated arguments
    fn execute(&self, args: &[Value]) -> Result<Value>;

    /// Checks the argument count, then executes
    fn call(&self, args: &[Value]) -> Result<Value> {
        self.arity().check(self.name(), args.len())?;
        self.execute(args)
    }
}

/// Arity error for `tool` called with `got` arguments
pub fn arity_mismatch(tool: &dyn Tool, got: usize) -> Error {
    Error::ArityMismatch {
        procedure: tool.name().to_string(),
        expected: tool.arity().to_string(),
        got,
    }
}

/// Accepted argument counts of a builtin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many
    Exact(usize),
    /// Inclusive range
    Range(usize, usize),
    /// This many or more
    AtLeast(usize),
}

impl Arity {
    /// True if `count` arguments are accepted
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::Range(min, max) => (min..=max).contains(&count),
            Arity::AtLeast(min) => count >= min,
        }
    }

    /// Fails with an arity error naming `procedure` unless `count` is accepted
    pub fn check(&self, procedure: &str, count: usize) -> Result<()> {
        if self.accepts(count) {
            Ok(())
        } else {
            Err(Error::ArityMismatch {
                procedure: procedure.to_string(),
                expected: self.to_string(),
                got: count,
            })
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::Range(min, max) if max == min + 1 => write!(f, "{} or {}", min, max),
            Arity::Range(min, max) => write!(f, "{} to {}", min, max),
            Arity::AtLeast(min) => write!(f, "at least {}", min),
        }
    }
}

/// Tool registry
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create new registry with the standard builtins
    pub fn new() -> Self {
        let mut registry = ToolRegistry {
            tools: HashMap::new(),
        };

        stdlib::register_all(&mut registry);

        registry
    }

    /// Create empty registry (for testing)
    pub fn empty() -> Self {
        ToolRegistry {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, replacing any tool of the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Get tool by exact name
    pub fn get(&self, name: &str) -> Result<Arc<dyn Tool>> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UndefinedVariable {
                name: name.to_string(),
            })
    }

    /// Check if tool exists
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tool names
    pub fn list_tools(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get tool count
    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Iterates over `(name, tool)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Tool>)> {
        self.tools.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
