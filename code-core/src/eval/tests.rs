use crate::environment::prelude::ValueType;
use crate::parser::prelude::parse_program;

use super::prelude::*;

fn run(src: &str) -> (Result<(), RuntimeError>, String) {
    run_with_input(src, &[])
}

fn run_with_input(src: &str, input: &[&str]) -> (Result<(), RuntimeError>, String) {
    let program = parse_program(src).expect("program should parse");

    let mut io = ScriptedIO::with_input(input);
    let result = Evaluator::new(&mut io).run(&program);

    (result, io.output)
}

#[test]
fn declared_variable_holds_its_initializer() {
    let (result, output) = run(r#"BEGIN CODE
INT x = 5
DISPLAY: x
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "5");
}

#[test]
fn redeclaration_is_a_name_error() {
    let (result, _) = run(r#"BEGIN CODE
INT x
INT x
END CODE"#);

    let err = result.unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::Redeclared { name: "x".to_string() });
    assert_eq!(err.kind(), "name error");
}

#[test]
fn undeclared_use_is_a_name_error() {
    let (result, _) = run(r#"BEGIN CODE
x = 1
END CODE"#);

    let err = result.unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::Undeclared { name: "x".to_string() });
    assert_eq!(err.kind(), "name error");
}

#[test]
fn integer_division_truncates() {
    let (result, output) = run(r#"BEGIN CODE
INT x = 10 / 3
DISPLAY: x
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "3");
}

#[test]
fn division_by_zero_is_an_arithmetic_error() {
    let (result, _) = run(r#"BEGIN CODE
INT x = 10 / 0
END CODE"#);

    let err = result.unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::DivisionByZero);
    assert_eq!(err.kind(), "arithmetic error");
}

#[test]
fn modulo_by_zero_is_an_arithmetic_error() {
    let (result, _) = run(r#"BEGIN CODE
INT x = 10 % 0
END CODE"#);

    assert_eq!(result.unwrap_err().error, RuntimeErrorType::ModuloByZero);
}

#[test]
fn float_write_into_int_truncates_toward_zero() {
    let (result, output) = run(r#"BEGIN CODE
INT x
x = 7.9
DISPLAY: x
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "7");
}

#[test]
fn int_write_into_float_widens() {
    let (result, output) = run(r#"BEGIN CODE
FLOAT f
f = 3
DISPLAY: f
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "3");
}

#[test]
fn display_joins_operands_into_one_write() {
    let (result, output) = run(r#"BEGIN CODE
DISPLAY: "A" & [&] & "B" & $
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "A&B\n");
}

#[test]
fn display_renders_booleans_as_keywords() {
    let (result, output) = run(r#"BEGIN CODE
BOOL b
DISPLAY: b
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "FALSE");
}

#[test]
fn scan_assigns_values_by_declared_type() {
    let (result, output) = run_with_input(
        r#"BEGIN CODE
INT a
FLOAT b
SCAN: a, b
DISPLAY: a & " " & b
END CODE"#,
        &["5, 2.5"],
    );

    assert!(result.is_ok());
    assert_eq!(output, "Enter values for a, b: 5 2.5");
}

#[test]
fn scan_rejects_wrong_value_count() {
    let (result, _) = run_with_input(
        r#"BEGIN CODE
INT a
INT b
SCAN: a, b
END CODE"#,
        &["5"],
    );

    let err = result.unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::InputCountMismatch { expected: 2, got: 1 });
    assert_eq!(err.kind(), "input error");
}

#[test]
fn scan_rejects_unparsable_values() {
    let (result, _) = run_with_input(
        r#"BEGIN CODE
INT a
SCAN: a
END CODE"#,
        &["five"],
    );

    let err = result.unwrap_err();
    assert!(matches!(err.error, RuntimeErrorType::InvalidInput { .. }));
}

#[test]
fn while_loop_runs_until_condition_fails() {
    let (result, output) = run(r#"BEGIN CODE
INT i = 0
WHILE i <> 3
BEGIN WHILE
i = i + 1
END WHILE
DISPLAY: i
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "3");
}

#[test]
fn if_else_selects_the_matching_branch() {
    let (result, output) = run(r#"BEGIN CODE
INT x = 5
IF x > 3
BEGIN IF
DISPLAY: "big"
END IF
ELSE
BEGIN IF
DISPLAY: "small"
END IF
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "big");
}

#[test]
fn else_if_chains_fall_through_in_order() {
    let (result, output) = run(r#"BEGIN CODE
INT x = 0
IF x > 0
BEGIN IF
DISPLAY: "positive"
END IF
ELSE IF x < 0
BEGIN IF
DISPLAY: "negative"
END IF
ELSE
BEGIN IF
DISPLAY: "zero"
END IF
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "zero");
}

#[test]
fn block_declarations_stay_inside_the_block() {
    let (result, _) = run(r#"BEGIN CODE
IF "TRUE"
BEGIN IF
INT y = 1
END IF
DISPLAY: y
END CODE"#);

    let err = result.unwrap_err();
    assert_eq!(err.error, RuntimeErrorType::Undeclared { name: "y".to_string() });
}

#[test]
fn block_assignments_reach_the_enclosing_scope() {
    let (result, output) = run(r#"BEGIN CODE
INT x = 1
IF "TRUE"
BEGIN IF
x = 2
END IF
DISPLAY: x
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "2");
}

#[test]
fn condition_must_be_a_boolean() {
    let (result, _) = run(r#"BEGIN CODE
IF 1
BEGIN IF
DISPLAY: "no"
END IF
END CODE"#);

    let err = result.unwrap_err();
    assert_eq!(
        err.error,
        RuntimeErrorType::ConditionNotBoolean { got: ValueType::Integer }
    );
    assert_eq!(err.kind(), "type error");
}

#[test]
fn mismatched_operands_are_a_type_error() {
    let (result, _) = run(r#"BEGIN CODE
INT x = 1 + 'a'
END CODE"#);

    let err = result.unwrap_err();
    assert!(matches!(err.error, RuntimeErrorType::InvalidOperands { .. }));
    assert_eq!(err.kind(), "type error");
}

#[test]
fn not_negates_booleans() {
    let (result, output) = run(r#"BEGIN CODE
BOOL b = NOT "TRUE"
DISPLAY: b
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "FALSE");
}

#[test]
fn logical_operators_short_circuit() {
    // The right operand would divide by zero if it were evaluated.
    let (result, output) = run(r#"BEGIN CODE
BOOL b = "FALSE" AND 1 / 0 == 0
DISPLAY: b
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "FALSE");
}

#[test]
fn assignment_chains_right_to_left() {
    let (result, output) = run(r#"BEGIN CODE
INT a
INT b
a = b = 5
DISPLAY: a & " " & b
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "5 5");
}

#[test]
fn fuel_bounds_runaway_loops() {
    let program = parse_program(r#"BEGIN CODE
WHILE "TRUE"
BEGIN WHILE
INT unused_here
END WHILE
END CODE"#)
    .expect("program should parse");

    let mut io = ScriptedIO::new();
    let result = Evaluator::with_fuel(&mut io, 100).run(&program);

    assert_eq!(result.unwrap_err().error, RuntimeErrorType::FuelExhausted);
}
