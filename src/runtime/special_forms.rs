//! Special forms
//!
//! Each handler receives the whole, unevaluated form (head included) and the
//! current environment. The table is built once and shared read-only;
//! `define` is dispatched ahead of it by the evaluator.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::parser::Expression;
use crate::runtime::{Closure, Environment, LispEvaluator, Procedure, Value};

/// Signature shared by all special-form handlers
pub type SpecialForm = fn(&LispEvaluator, &[Expression], &Environment) -> Result<Value>;

/// Immutable head-symbol → handler table
pub struct SpecialForms {
    handlers: HashMap<&'static str, SpecialForm>,
}

lazy_static::lazy_static! {
    /// The standard table: `if`, `lambda`, `and`, `or`
    pub static ref SPECIAL_FORMS: SpecialForms = SpecialForms::standard();
}

impl SpecialForms {
    /// Builds the standard table
    pub fn standard() -> Self {
        let mut handlers: HashMap<&'static str, SpecialForm> = HashMap::new();
        handlers.insert("if", eval_if);
        handlers.insert("lambda", eval_lambda);
        handlers.insert("and", eval_and);
        handlers.insert("or", eval_or);
        SpecialForms { handlers }
    }

    /// Handler for `name`, if it is a special form
    pub fn get(&self, name: &str) -> Option<SpecialForm> {
        self.handlers.get(name).copied()
    }

    /// True if `name` heads a special form
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Sorted special-form names
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// (define name expr) - bind in the current environment, returns Null
pub fn eval_define(
    evaluator: &LispEvaluator,
    form: &[Expression],
    env: &Environment,
) -> Result<Value> {
    let (name, value_expr) = match form {
        [_, Expression::Symbol(name), value_expr] => (name, value_expr),
        _ => return Err(Error::syntax("malformed define expression")),
    };

    let value = evaluator.evaluate(value_expr, env)?;
    tracing::debug!(name = %name, value = %value, "define");
    env.define(name.clone(), value);
    Ok(Value::Null)
}

/// (if test consequent alternative) - only #f selects the alternative
fn eval_if(evaluator: &LispEvaluator, form: &[Expression], env: &Environment) -> Result<Value> {
    let (test, consequent, alternative) = match form {
        [_, test, consequent, alternative] => (test, consequent, alternative),
        _ => return Err(Error::syntax("malformed if expression")),
    };

    if evaluator.evaluate(test, env)?.is_truthy() {
        evaluator.evaluate(consequent, env)
    } else {
        evaluator.evaluate(alternative, env)
    }
}

/// (lambda (params...) body) - closure over the current environment
fn eval_lambda(_: &LispEvaluator, form: &[Expression], env: &Environment) -> Result<Value> {
    let (params, body) = match form {
        [_, Expression::List(params), body] => (params, body),
        _ => return Err(Error::syntax("malformed lambda expression")),
    };

    let params = params
        .iter()
        .map(|param| match param {
            Expression::Symbol(name) => Ok(name.clone()),
            other => Err(Error::syntax(format!(
                "lambda parameters must be symbols, got {}",
                other
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Value::Procedure(Procedure::Closure(Rc::new(Closure {
        params,
        body: Rc::new(body.clone()),
        env: env.clone(),
    }))))
}

/// (and x ...) - first #f, else the last value; `(and)` is #t
fn eval_and(evaluator: &LispEvaluator, form: &[Expression], env: &Environment) -> Result<Value> {
    let mut result = Value::Bool(true);
    for operand in form.iter().skip(1) {
        result = evaluator.evaluate(operand, env)?;
        if !result.is_truthy() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(result)
}

/// (or x ...) - first non-#f value, else #f; `(or)` is #f
fn eval_or(evaluator: &LispEvaluator, form: &[Expression], env: &Environment) -> Result<Value> {
    for operand in form.iter().skip(1) {
        let value = evaluator.evaluate(operand, env)?;
        if value.is_truthy() {
            return Ok(value);
        }
    }
    Ok(Value::Bool(false))
}
