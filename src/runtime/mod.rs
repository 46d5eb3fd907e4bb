//! Runtime: environments, values and the evaluator

mod environment;
mod lisp_evaluator;
pub mod special_forms;
mod value;

pub use environment::Environment;
pub use lisp_evaluator::{create_global_env, create_global_env_with, LispEvaluator};
pub use special_forms::{SpecialForm, SpecialForms, SPECIAL_FORMS};
pub use value::{Closure, Procedure, Value};
