/// End-to-end integration tests
/// Demonstrates: Lexer → Parser → Evaluator working together
use schemelet::lexer::SExprScanner;
use schemelet::parser::SExprParser;
use schemelet::runtime::{LispEvaluator, Value};
use schemelet::{Error, ErrorKind};

fn eval_str(source: &str) -> schemelet::Result<Value> {
    let tokens = SExprScanner::new(source).scan_tokens();
    let program = SExprParser::new(tokens).parse()?;
    LispEvaluator::new().execute(&program)
}

fn eval_ok(source: &str) -> Value {
    eval_str(source).unwrap_or_else(|e| panic!("{} failed: {}", source, e))
}

fn eval_err(source: &str) -> Error {
    match eval_str(source) {
        Ok(value) => panic!("{} should fail, got {}", source, value),
        Err(e) => e,
    }
}

#[test]
fn test_lisp_e2e_simple_arithmetic() {
    let result = eval_ok("(+ 1 2)");
    assert_eq!(result, Value::Number(3.0));
    assert_eq!(result.to_string(), "3.0");
}

#[test]
fn test_lisp_e2e_square() {
    let source = r#"
        (define square (lambda (x) (* x x)))
        (square 5)
    "#;
    assert_eq!(eval_ok(source).to_string(), "25.0");
}

#[test]
fn test_lisp_e2e_comparison_in_if() {
    assert_eq!(eval_ok("(if (> 3 2) #t #f)").to_string(), "#t");
    assert_eq!(eval_ok("(if (< 3 2) #t #f)").to_string(), "#f");
}

#[test]
fn test_lisp_e2e_only_false_is_falsy() {
    assert_eq!(eval_ok("(if #f 1 2)"), Value::Number(2.0));
    assert_eq!(eval_ok("(if 0 1 2)"), Value::Number(1.0));
    assert_eq!(eval_ok("(if #t 1 2)"), Value::Number(1.0));
    assert_eq!(eval_ok("(if + 1 2)"), Value::Number(1.0));
}

#[test]
fn test_lisp_e2e_recursive_factorial() {
    let source = r#"
        (define fact
          (lambda (n)
            (if (= n 0)
                1
                (* n (fact (- n 1))))))
        (fact 5)
    "#;
    assert_eq!(eval_ok(source).to_string(), "120.0");
}

#[test]
fn test_lisp_e2e_recursive_factorial_base_case_le() {
    let source = r#"
        (define factorial
          (lambda (n)
            (if (<= n 1)
                1
                (* n (factorial (- n 1))))))
        (factorial 5)
    "#;
    assert_eq!(eval_ok(source).to_string(), "120.0");
}

#[test]
fn test_lisp_e2e_closure_sees_later_redefinition() {
    let source = r#"
        (define x 1)
        (define f (lambda () x))
        (define x 2)
        (f)
    "#;
    assert_eq!(eval_ok(source).to_string(), "2.0");
}

#[test]
fn test_lisp_e2e_parameter_shadows_global() {
    let evaluator = LispEvaluator::new();
    assert_eq!(
        evaluator.eval_source("(define x 1) ((lambda (x) x) 99)").unwrap(),
        Value::Number(99.0)
    );
    assert_eq!(evaluator.eval_source("x").unwrap(), Value::Number(1.0));
}

#[test]
fn test_lisp_e2e_define_inside_lambda_is_local() {
    let evaluator = LispEvaluator::new();
    let source = r#"
        (define y 1)
        (define f (lambda (n) (if (define y n) y y)))
        (f 7)
    "#;
    // `define` yields Null, which is truthy; the binding lands in the call frame
    assert_eq!(evaluator.eval_source(source).unwrap(), Value::Number(7.0));
    assert_eq!(evaluator.eval_source("y").unwrap(), Value::Number(1.0));
}

#[test]
fn test_lisp_e2e_short_circuit() {
    assert_eq!(eval_ok("(and #f (/ 1 0))"), Value::Bool(false));
    assert_eq!(eval_ok("(or #t (/ 1 0))"), Value::Bool(true));
    assert_eq!(eval_ok("(and #f (missing))"), Value::Bool(false));
    assert_eq!(eval_ok("(or 5 (missing))"), Value::Number(5.0));
}

#[test]
fn test_lisp_e2e_not() {
    assert_eq!(eval_ok("(not #f)"), Value::Bool(true));
    assert_eq!(eval_ok("(not 0)"), Value::Bool(false));
    assert_eq!(eval_ok("(not (= 1 2))"), Value::Bool(true));
}

#[test]
fn test_lisp_e2e_higher_order() {
    let source = r#"
        (define twice (lambda (f x) (f (f x))))
        (define inc (lambda (x) (+ x 1)))
        (twice inc 5)
    "#;
    assert_eq!(eval_ok(source), Value::Number(7.0));
}

#[test]
fn test_lisp_e2e_division_by_zero_is_ieee() {
    assert_eq!(eval_ok("(/ 1 0)").to_string(), "inf");
    assert_eq!(eval_ok("(/ -1 0)").to_string(), "-inf");
    assert_eq!(eval_ok("(/ 0 0)").to_string(), "NaN");
}

#[test]
fn test_lisp_e2e_number_rendering() {
    assert_eq!(eval_ok("(/ 10 4)").to_string(), "2.5");
    assert_eq!(eval_ok("(- 0)").to_string(), "0.0");
    assert_eq!(eval_ok("1e3").to_string(), "1000.0");
}

#[test]
fn test_lisp_e2e_type_errors() {
    assert_eq!(eval_err("(+ 1 #t)").kind(), ErrorKind::Type);
    assert_eq!(eval_err("(< #f 1)").kind(), ErrorKind::Type);
    assert_eq!(
        eval_err("(1 2 3)"),
        Error::NotCallable {
            expr: "1.0".to_string()
        }
    );
    assert_eq!(eval_err("(#t)").kind(), ErrorKind::Type);
}

#[test]
fn test_lisp_e2e_arity_errors() {
    let err = eval_err("(define add (lambda (a b) (+ a b))) (add 1)");
    assert_eq!(err.kind(), ErrorKind::Arity);
    assert_eq!(eval_err("((lambda (x) x) 1 2)").kind(), ErrorKind::Arity);
    assert_eq!(eval_err("(* 1 2 3)").kind(), ErrorKind::Arity);
    assert_eq!(eval_err("(/ 1)").kind(), ErrorKind::Arity);
    assert_eq!(eval_err("(not)").kind(), ErrorKind::Arity);
}

#[test]
fn test_lisp_e2e_name_error() {
    let err = eval_err("(+ undefined-thing 1)");
    assert_eq!(err.kind(), ErrorKind::Name);
    assert_eq!(err.to_string(), "Variable 'undefined-thing' not found");
}

#[test]
fn test_lisp_e2e_syntax_errors() {
    assert_eq!(eval_err("(+ 1 2").kind(), ErrorKind::Syntax);
    assert_eq!(eval_err(")").kind(), ErrorKind::Syntax);
    assert_eq!(eval_err("()").kind(), ErrorKind::Syntax);
    assert_eq!(eval_err("(if #t 1)").kind(), ErrorKind::Syntax);
    assert_eq!(eval_err("(define 1 2)").kind(), ErrorKind::Syntax);
    assert_eq!(eval_err("(lambda (1) 1)").kind(), ErrorKind::Syntax);
    assert_eq!(eval_err("(lambda x x)").kind(), ErrorKind::Syntax);
    assert_eq!(eval_err("(lambda (x))").kind(), ErrorKind::Syntax);
}

#[test]
fn test_lisp_e2e_definitions_survive_later_error() {
    let evaluator = LispEvaluator::new();
    assert!(evaluator.eval_source("(define kept 5) (missing)").is_err());
    assert_eq!(evaluator.eval_source("kept").unwrap(), Value::Number(5.0));
}
