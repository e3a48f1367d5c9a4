use njie::context::{Context, SymbolTable};
use njie::error::{ErrorKind, RuntimeErrorKind};
use njie::{evaluate, parse, tokenize, Interpreter, NjieError, Value};
use pretty_assertions::assert_eq;

fn eval(source: &str) -> Result<Value, NjieError> {
    Interpreter::new("<test>").run(source)
}

fn eval_ok(source: &str) -> Value {
    match eval(source) {
        Ok(value) => value,
        Err(error) => panic!("'{}' failed: {}", source, error.render()),
    }
}

fn eval_err(source: &str) -> NjieError {
    match eval(source) {
        Ok(value) => panic!("'{}' should fail but gave {}", source, value),
        Err(error) => error,
    }
}

#[test]
fn integer_contagion() {
    assert_eq!(eval_ok("1 + 1"), Value::Int(2));
    assert_eq!(eval_ok("1 + 1.0"), Value::Float(2.0));
    assert_eq!(eval_ok("7 / 2"), Value::Int(3));
    assert_eq!(eval_ok("-7 / 2"), Value::Int(-3));
    assert_eq!(eval_ok("7.0 / 2"), Value::Float(3.5));
    assert_eq!(eval_ok("2 * 2.5"), Value::Float(5.0));
}

#[test]
fn precedence_and_associativity() {
    assert_eq!(eval_ok("2 + 3 * 4"), Value::Int(14));
    assert_eq!(eval_ok("(2 + 3) * 4"), Value::Int(20));
    assert_eq!(eval_ok("2 ^ 3 ^ 2"), Value::Int(512));
    assert_eq!(eval_ok("10 - 4 - 3"), Value::Int(3));
    assert_eq!(eval_ok("-2 ^ 2"), Value::Int(-4));
}

#[test]
fn power_truncates_for_integers() {
    assert_eq!(eval_ok("2 ^ -1"), Value::Int(0));
    assert_eq!(eval_ok("2.0 ^ -1"), Value::Float(0.5));
    assert_eq!(eval_ok("4 ^ 0.5"), Value::Float(2.0));
}

#[test]
fn unary_signs() {
    assert_eq!(eval_ok("-5"), Value::Int(-5));
    assert_eq!(eval_ok("+5"), Value::Int(5));
    assert_eq!(eval_ok("--5"), Value::Int(5));
    assert_eq!(eval_ok("-1.5"), Value::Float(-1.5));
    assert_eq!(eval_ok("-TRUE"), Value::Int(-1));
}

#[test]
fn comparisons_yield_booleans() {
    assert_eq!(eval_ok("1 == 1.0"), Value::Bool(true));
    assert_eq!(eval_ok("1 != 1"), Value::Bool(false));
    assert_eq!(eval_ok("1 < 2"), Value::Bool(true));
    assert_eq!(eval_ok("2 <= 2"), Value::Bool(true));
    assert_eq!(eval_ok("3 > 4"), Value::Bool(false));
    assert_eq!(eval_ok("3 >= 4"), Value::Bool(false));
}

#[test]
fn logical_operators() {
    assert_eq!(eval_ok("(1 < 2) AND (3 > 2)"), Value::Bool(true));
    assert_eq!(eval_ok("TRUE AND FALSE"), Value::Bool(false));
    assert_eq!(eval_ok("FALSE OR TRUE"), Value::Bool(true));
    assert_eq!(eval_ok("NOT TRUE"), Value::Bool(false));
    assert_eq!(eval_ok("NOT 1 < 2"), Value::Bool(false));
    assert_eq!(eval_ok("NOT NOT FALSE"), Value::Bool(false));
}

#[test]
fn truthiness_is_nonzero_magnitude() {
    assert!(eval_ok("TRUE").is_truthy());
    assert!(eval_ok("0.5").is_truthy());
    assert!(eval_ok("-3").is_truthy());
    assert!(!eval_ok("NULL").is_truthy());
    assert!(!eval_ok("0.0").is_truthy());
}

#[test]
fn booleans_count_as_integers() {
    assert_eq!(eval_ok("TRUE + 1"), Value::Int(2));
    assert_eq!(eval_ok("TRUE == 1"), Value::Bool(true));
    assert_eq!(eval_ok("FALSE * 2.5"), Value::Float(0.0));
}

#[test]
fn not_on_number_is_illegal() {
    let error = eval_err("NOT 5");
    assert_eq!(
        error.kind,
        ErrorKind::Runtime(RuntimeErrorKind::IllegalOperation)
    );
    assert_eq!(error.span.text(), "5");
}

#[test]
fn logic_on_number_blames_the_operand() {
    let error = eval_err("5 AND TRUE");
    assert_eq!(error.runtime_kind(), Some(RuntimeErrorKind::IllegalOperation));
    assert_eq!(error.span.text(), "5");

    let error = eval_err("TRUE OR 2 + 2");
    assert_eq!(error.span.text(), "2 + 2");
}

#[test]
fn division_by_zero_spans_the_divisor() {
    let error = eval_err("10 / 0");
    assert_eq!(error.runtime_kind(), Some(RuntimeErrorKind::DivisionByZero));
    assert_eq!(error.details, "Division by zero");
    assert_eq!(error.span.text(), "0");
    assert_eq!(error.span.start.index, 5);

    let error = eval_err("1 / (2 - 2.0)");
    assert_eq!(error.runtime_kind(), Some(RuntimeErrorKind::DivisionByZero));
    assert_eq!(error.span.text(), "2 - 2.0");
}

#[test]
fn undefined_variable_is_named() {
    let error = eval_err("y + 1");
    assert_eq!(
        error.runtime_kind(),
        Some(RuntimeErrorKind::UndefinedVariable)
    );
    assert_eq!(error.details, "'y' is not defined");
    assert_eq!(error.span.text(), "y");
}

#[test]
fn builtins_are_seeded() {
    assert_eq!(eval_ok("NULL"), Value::Int(0));
    assert_eq!(eval_ok("TRUE"), Value::Bool(true));
    assert_eq!(eval_ok("FALSE"), Value::Bool(false));
}

#[test]
fn assignment_is_an_expression() {
    let interpreter = Interpreter::new("<test>");
    assert_eq!(interpreter.run("VAR a = VAR b = 10").ok(), Some(Value::Int(10)));
    assert_eq!(interpreter.run("a").ok(), Some(Value::Int(10)));
    assert_eq!(interpreter.run("b").ok(), Some(Value::Int(10)));
    assert_eq!(interpreter.run("1 + (VAR c = 2) * c").ok(), Some(Value::Int(5)));
}

#[test]
fn variables_persist_and_last_write_wins() {
    let interpreter = Interpreter::new("<test>");
    assert_eq!(interpreter.run("VAR x = 5").ok(), Some(Value::Int(5)));
    assert_eq!(interpreter.run("VAR x = 5").ok(), Some(Value::Int(5)));
    assert_eq!(interpreter.run("x * 2").ok(), Some(Value::Int(10)));
    assert_eq!(interpreter.run("VAR x = x + 0.5").ok(), Some(Value::Float(5.5)));
    assert_eq!(interpreter.globals().borrow().get("x"), Some(Value::Float(5.5)));
}

#[test]
fn assignments_through_a_shared_session_borrow() {
    let interpreter = Interpreter::new("<test>");
    let session = &interpreter;
    let expr = session.parse("VAR total = 4 * 2").unwrap();
    assert_eq!(session.evaluate(&expr).ok(), Some(Value::Int(8)));
    assert_eq!(interpreter.run("total + 1").ok(), Some(Value::Int(9)));
}

#[test]
fn pure_expressions_are_repeatable() {
    let interpreter = Interpreter::new("<test>");
    let first = interpreter.run("3 * (2 + 1.5)").ok();
    let second = interpreter.run("3 * (2 + 1.5)").ok();
    assert_eq!(first, Some(Value::Float(10.5)));
    assert_eq!(first, second);
}

#[test]
fn earlier_assignments_survive_a_failing_line() {
    let interpreter = Interpreter::new("<test>");
    assert!(interpreter.run("VAR a = (VAR b = 2) / 0").is_err());
    assert_eq!(interpreter.run("b").ok(), Some(Value::Int(2)));
    assert!(interpreter.run("a").is_err());
}

#[test]
fn sessions_are_independent() {
    let first = Interpreter::new("<one>");
    let second = Interpreter::new("<two>");
    assert!(first.run("VAR shared = 1").is_ok());
    assert!(second.run("shared").is_err());
}

#[test]
fn inner_scope_shadows_outer_binding() {
    let globals = SymbolTable::with_builtins().shared();
    globals.borrow_mut().set("x", Value::Int(1));
    let local = SymbolTable::with_parent(globals.clone()).shared();
    let context = Context::new("<inner>", local.clone());

    let read = parse(tokenize("<test>", "x + TRUE").unwrap()).unwrap();
    assert_eq!(evaluate(&read, &context).ok(), Some(Value::Int(2)));

    let write = parse(tokenize("<test>", "VAR x = 42").unwrap()).unwrap();
    assert_eq!(evaluate(&write, &context).ok(), Some(Value::Int(42)));
    assert_eq!(local.borrow().get("x"), Some(Value::Int(42)));
    assert_eq!(globals.borrow().get("x"), Some(Value::Int(1)));
    assert!(local.borrow().contains_local("x"));

    assert_eq!(local.borrow_mut().remove("x"), Some(Value::Int(42)));
    assert_eq!(local.borrow().get("x"), Some(Value::Int(1)));
}

#[test]
fn values_display_like_the_language() {
    assert_eq!(eval_ok("1 + 1").to_string(), "2");
    assert_eq!(eval_ok("1 + 1.0").to_string(), "2.0");
    assert_eq!(eval_ok("1 / 4.0").to_string(), "0.25");
    assert_eq!(eval_ok("1 < 2").to_string(), "TRUE");
    assert_eq!(eval_ok("1 > 2").to_string(), "FALSE");
}
