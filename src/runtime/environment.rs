use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::Value;

/// Lexical environment: a handle to one scope in a parent-linked chain
///
/// Cloning an `Environment` clones the handle, not the bindings. Closures keep
/// such a handle, so later `define`s in their defining scope stay visible to
/// them.
#[derive(Clone)]
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
}

/// Single scope in the chain
struct Scope {
    /// Variables defined in this scope
    variables: HashMap<String, Value>,
    /// Enclosing scope (None for the global scope)
    parent: Option<Environment>,
}

impl Environment {
    /// Creates a new root environment with no bindings
    pub fn new() -> Self {
        Environment {
            scope: Rc::new(RefCell::new(Scope {
                variables: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Creates an empty child scope of `self`
    pub fn child(&self) -> Self {
        Environment {
            scope: Rc::new(RefCell::new(Scope {
                variables: HashMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Creates a child scope binding `params` to `args` positionally
    pub fn extend(&self, params: &[String], args: Vec<Value>) -> Result<Self> {
        if params.len() != args.len() {
            return Err(Error::ArityMismatch {
                procedure: "lambda".to_string(),
                expected: params.len().to_string(),
                got: args.len(),
            });
        }

        let env = self.child();
        {
            let mut scope = env.scope.borrow_mut();
            for (param, arg) in params.iter().zip(args) {
                scope.variables.insert(param.clone(), arg);
            }
        }
        Ok(env)
    }

    /// Defines (or overwrites) a variable in this scope only
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.scope.borrow_mut().variables.insert(name.into(), value);
    }

    /// Looks a variable up, innermost scope first
    pub fn lookup(&self, name: &str) -> Result<Value> {
        let mut env = self.clone();
        loop {
            let parent = {
                let scope = env.scope.borrow();
                if let Some(val) = scope.variables.get(name) {
                    return Ok(val.clone());
                }
                scope.parent.clone()
            };
            match parent {
                Some(parent) => env = parent,
                None => {
                    return Err(Error::UndefinedVariable {
                        name: name.to_string(),
                    })
                }
            }
        }
    }

    /// Checks if a variable exists anywhere in the chain
    pub fn exists(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Names bound directly in this scope, sorted
    pub fn bindings(&self) -> Vec<(String, Value)> {
        let mut result: Vec<_> = self
            .scope
            .borrow()
            .variables
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        result.sort_by(|a, b| a.0.cmp(&b.0));
        result
    }

    /// Returns the chain length (1 for a root scope)
    pub fn scope_depth(&self) -> usize {
        let mut depth = 1;
        let mut parent = self.scope.borrow().parent.clone();
        while let Some(env) = parent {
            depth += 1;
            parent = env.scope.borrow().parent.clone();
        }
        depth
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.scope.borrow();
        let mut names: Vec<_> = scope.variables.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("depth", &self.scope_depth())
            .field("names", &names)
            .finish()
    }
}
