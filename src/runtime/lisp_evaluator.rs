use std::cell::Cell;

use crate::error::{Error, Result};
use crate::lexer::tokenize;
use crate::parser::{Expression, Program, SExprParser};
use crate::runtime::special_forms::{eval_define, SpecialForms, SPECIAL_FORMS};
use crate::runtime::{Environment, Procedure, Value};
use crate::tools::ToolRegistry;

/// Tree-walking evaluator
///
/// Dispatch order for a form:
/// - number and boolean literals evaluate to themselves
/// - symbols are looked up through the environment chain
/// - `()` is a syntax error
/// - `(define ...)`
/// - forms headed by a special-form name (`if`, `lambda`, `and`, `or`)
/// - anything else is a procedure application, arguments evaluated left to right
///
/// There is no tail-call elimination: each nested application is a host
/// stack frame. `max_depth` optionally bounds nesting.
pub struct LispEvaluator {
    /// Global environment
    pub env: Environment,
    /// Special-form table
    special_forms: &'static SpecialForms,
    /// Maximum evaluation depth (None for unbounded)
    max_depth: Option<usize>,
    /// Current evaluation depth
    depth: Cell<usize>,
}

/// Decrements the depth counter when an evaluation frame unwinds
struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

impl LispEvaluator {
    /// Creates an evaluator over a fresh global environment
    pub fn new() -> Self {
        Self::with_env(create_global_env())
    }

    /// Creates an evaluator whose global environment is `env`
    pub fn with_env(env: Environment) -> Self {
        LispEvaluator {
            env,
            special_forms: &*SPECIAL_FORMS,
            max_depth: None,
            depth: Cell::new(0),
        }
    }

    /// Limits evaluation nesting to `limit` frames
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Configured depth limit, if any
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Evaluates every form of `program` in the global environment and
    /// returns the last value (`Null` for an empty program)
    pub fn execute(&self, program: &Program) -> Result<Value> {
        let mut last_val = Value::Null;

        for form in &program.forms {
            last_val = self.evaluate(form, &self.env)?;
        }

        Ok(last_val)
    }

    /// Tokenizes, parses and executes `source`
    pub fn eval_source(&self, source: &str) -> Result<Value> {
        let program = SExprParser::new(tokenize(source)).parse()?;
        self.execute(&program)
    }

    /// Evaluates `expr` in `env`
    pub fn evaluate(&self, expr: &Expression, env: &Environment) -> Result<Value> {
        let _guard = self.enter()?;

        match expr {
            Expression::Number(n) => Ok(Value::Number(*n)),
            Expression::Boolean(b) => Ok(Value::Bool(*b)),
            Expression::Symbol(name) => env.lookup(name),
            Expression::List(items) => self.evaluate_list(items, env),
        }
    }

    fn evaluate_list(&self, items: &[Expression], env: &Environment) -> Result<Value> {
        let (head, operands) = match items.split_first() {
            Some(split) => split,
            None => return Err(Error::syntax("malformed expression: ()")),
        };

        if let Expression::Symbol(name) = head {
            if name == "define" {
                return eval_define(self, items, env);
            }
            if let Some(handler) = self.special_forms.get(name) {
                return handler(self, items, env);
            }
        }

        let callee = self.evaluate(head, env)?;
        let procedure = callee.as_procedure().ok_or_else(|| Error::NotCallable {
            expr: head.to_string(),
        })?;

        let args = operands
            .iter()
            .map(|operand| self.evaluate(operand, env))
            .collect::<Result<Vec<_>>>()?;

        self.apply(procedure, args)
    }

    /// Applies a procedure to already-evaluated arguments
    pub fn apply(&self, procedure: &Procedure, args: Vec<Value>) -> Result<Value> {
        tracing::trace!(
            procedure = procedure.name(),
            args = args.len(),
            depth = self.depth.get(),
            "apply"
        );
        match procedure {
            Procedure::Builtin(tool) => tool.call(&args),
            Procedure::Closure(closure) => {
                let call_env = closure.env.extend(&closure.params, args)?;
                self.evaluate(&closure.body, &call_env)
            }
        }
    }

    fn enter(&self) -> Result<DepthGuard<'_>> {
        let depth = self.depth.get() + 1;
        if let Some(limit) = self.max_depth {
            if depth > limit {
                tracing::warn!(limit, "recursion limit exceeded");
                return Err(Error::RecursionLimitExceeded { limit });
            }
        }
        self.depth.set(depth);
        Ok(DepthGuard { depth: &self.depth })
    }
}

impl Default for LispEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a root environment holding every standard builtin
pub fn create_global_env() -> Environment {
    create_global_env_with(&ToolRegistry::new())
}

/// Creates a root environment holding every tool in `registry`
pub fn create_global_env_with(registry: &ToolRegistry) -> Environment {
    let env = Environment::new();
    for (name, tool) in registry.iter() {
        env.define(name, Value::Procedure(Procedure::Builtin(tool.clone())));
    }
    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn eval_str(source: &str) -> Result<Value> {
        LispEvaluator::new().eval_source(source)
    }

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn test_literals() {
        assert_eq!(eval_str("42").unwrap(), num(42.0));
        assert_eq!(eval_str("#t").unwrap(), Value::Bool(true));
        assert_eq!(eval_str("").unwrap(), Value::Null);
    }

    #[test]
    fn test_define_and_reference() {
        assert_eq!(eval_str("(define x 42) x").unwrap(), num(42.0));
        assert_eq!(eval_str("(define x 42)").unwrap(), Value::Null);
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval_str("(+ 1 2 3)").unwrap(), num(6.0));
        assert_eq!(eval_str("(- 10 (* 2 3))").unwrap(), num(4.0));
        assert_eq!(eval_str("(/ 9 2)").unwrap(), num(4.5));
    }

    #[test]
    fn test_if() {
        assert_eq!(eval_str("(if #f 1 2)").unwrap(), num(2.0));
        assert_eq!(eval_str("(if 0 1 2)").unwrap(), num(1.0));
        assert_eq!(eval_str("(if #t 1 2)").unwrap(), num(1.0));
    }

    #[test]
    fn test_if_only_evaluates_taken_branch() {
        assert_eq!(eval_str("(if #t 1 undefined-name)").unwrap(), num(1.0));
    }

    #[test]
    fn test_and_or() {
        assert_eq!(eval_str("(and)").unwrap(), Value::Bool(true));
        assert_eq!(eval_str("(or)").unwrap(), Value::Bool(false));
        assert_eq!(eval_str("(and 1 2)").unwrap(), num(2.0));
        assert_eq!(eval_str("(and 1 #f 2)").unwrap(), Value::Bool(false));
        assert_eq!(eval_str("(or #f 3)").unwrap(), num(3.0));
        assert_eq!(eval_str("(or #f #f)").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_short_circuit() {
        assert_eq!(eval_str("(and #f (undefined))").unwrap(), Value::Bool(false));
        assert_eq!(eval_str("(or #t (undefined))").unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_lambda_application() {
        assert_eq!(eval_str("((lambda (x y) (+ x y)) 3 4)").unwrap(), num(7.0));
        assert_eq!(eval_str("((lambda () 5))").unwrap(), num(5.0));
    }

    #[test]
    fn test_closure_captures_environment() {
        let source = "
            (define make-adder (lambda (n) (lambda (x) (+ x n))))
            (define add5 (make-adder 5))
            (add5 10)";
        assert_eq!(eval_str(source).unwrap(), num(15.0));
    }

    #[test]
    fn test_empty_list_is_syntax_error() {
        assert_eq!(eval_str("()").unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_not_callable() {
        let err = eval_str("(1 2 3)").unwrap_err();
        assert_eq!(
            err,
            Error::NotCallable {
                expr: "1.0".to_string()
            }
        );
    }

    #[test]
    fn test_special_forms_shadow_bindings() {
        assert_eq!(eval_str("(define if 3) (if #f 1 if)").unwrap(), num(3.0));
    }

    #[test]
    fn test_builtins_are_first_class() {
        assert_eq!(
            eval_str("(define apply2 (lambda (f a b) (f a b))) (apply2 * 3 4)").unwrap(),
            num(12.0)
        );
    }

    #[test]
    fn test_depth_limit() {
        let evaluator = LispEvaluator::new().with_max_depth(64);
        let err = evaluator
            .eval_source("(define spin (lambda (n) (spin n))) (spin 1)")
            .unwrap_err();
        assert_eq!(err, Error::RecursionLimitExceeded { limit: 64 });

        // The counter unwinds after a failure
        assert_eq!(evaluator.eval_source("(+ 1 2)").unwrap(), num(3.0));
    }

    #[test]
    fn test_global_env_builtins() {
        let env = create_global_env();
        for name in ["+", "-", "*", "/", "=", "<", ">", "<=", ">=", "not"] {
            assert!(env.exists(name), "missing builtin {}", name);
        }
    }
}
