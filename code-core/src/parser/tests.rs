use crate::lexer::prelude::Token;

use super::prelude::*;

fn parse(src: &str) -> Program {
    parse_program(src).expect("program should parse")
}

fn parse_err(src: &str) -> ParseError {
    parse_program(src).expect_err("program should not parse")
}

fn only_statement(program: &Program) -> &Statement {
    assert_eq!(program.statements.len(), 1, "expected a single statement");
    &program.statements[0]
}

#[test]
fn empty_program_parses() {
    let program = parse("BEGIN CODE\nEND CODE");

    assert!(program.statements.is_empty());
}

#[test]
fn missing_begin_is_rejected() {
    let err = parse_err("INT x\nEND CODE");

    assert_eq!(err.error, ParseErrorType::ExpectedBegin);
}

#[test]
fn begin_without_code_is_rejected() {
    let err = parse_err("BEGIN\nEND CODE");

    assert_eq!(err.error, ParseErrorType::ExpectedCode);
}

#[test]
fn declaration_list_parses() {
    let program = parse("BEGIN CODE\nINT a, b = 2, c\nEND CODE");

    let declaration = match only_statement(&program) {
        Statement::Declaration(declaration) => declaration,
        other => panic!("expected a declaration, got {other:?}"),
    };

    assert_eq!(declaration.declared_type, DeclaredType::Int);
    assert_eq!(declaration.bindings.len(), 3);
    assert_eq!(declaration.bindings[0].name.name, "a");
    assert!(declaration.bindings[0].initializer.is_none());
    assert!(declaration.bindings[1].initializer.is_some());
    assert!(declaration.bindings[2].initializer.is_none());
}

#[test]
fn product_binds_tighter_than_sum() {
    let program = parse("BEGIN CODE\nx = 1 + 2 * 3\nEND CODE");

    let assignment = match only_statement(&program) {
        Statement::Expression(Expression::Assignment(assignment)) => assignment,
        other => panic!("expected an assignment, got {other:?}"),
    };

    let infix = match assignment.value.as_ref() {
        Expression::Infix(infix) => infix,
        other => panic!("expected an infix, got {other:?}"),
    };

    assert_eq!(infix.operator, Token::Plus);
    assert!(matches!(
        infix.right.as_ref(),
        Expression::Infix(Infix { operator: Token::Asterisk, .. }),
    ));
}

#[test]
fn comparison_binds_looser_than_sum() {
    let program = parse("BEGIN CODE\nx = y < 1 + 2\nEND CODE");

    let assignment = match only_statement(&program) {
        Statement::Expression(Expression::Assignment(assignment)) => assignment,
        other => panic!("expected an assignment, got {other:?}"),
    };

    assert!(matches!(
        assignment.value.as_ref(),
        Expression::Infix(Infix { operator: Token::LessThan, .. }),
    ));
}

#[test]
fn assignment_target_must_be_an_identifier() {
    let err = parse_err("BEGIN CODE\n1 = 2\nEND CODE");

    assert_eq!(err.error, ParseErrorType::InvalidAssignmentTarget);
}

#[test]
fn declaration_initializer_does_not_chain() {
    let err = parse_err("BEGIN CODE\nINT x = y = 5\nEND CODE");

    // `y = 5` inside the initializer leaves `= 5` dangling.
    assert_eq!(err.error, ParseErrorType::ExpectedNewline);
}

#[test]
fn if_with_else_parses() {
    let program = parse(
        "BEGIN CODE\nIF x > 3\nBEGIN IF\nDISPLAY: \"big\"\nEND IF\nELSE\nBEGIN IF\nDISPLAY: \"small\"\nEND IF\nEND CODE",
    );

    let if_stmt = match only_statement(&program) {
        Statement::If(if_stmt) => if_stmt,
        other => panic!("expected an if, got {other:?}"),
    };

    assert_eq!(if_stmt.consequence.statements.len(), 1);
    assert!(matches!(if_stmt.alternative, Some(ElseBranch::Else(_))));
}

#[test]
fn else_if_chain_parses() {
    let program = parse(
        "BEGIN CODE\nIF x > 0\nBEGIN IF\nEND IF\nELSE IF x < 0\nBEGIN IF\nEND IF\nELSE\nBEGIN IF\nEND IF\nEND CODE",
    );

    let if_stmt = match only_statement(&program) {
        Statement::If(if_stmt) => if_stmt,
        other => panic!("expected an if, got {other:?}"),
    };

    let nested = match &if_stmt.alternative {
        Some(ElseBranch::ElseIf(nested)) => nested,
        other => panic!("expected an else-if, got {other:?}"),
    };

    assert!(matches!(nested.alternative, Some(ElseBranch::Else(_))));
}

#[test]
fn while_parses() {
    let program = parse("BEGIN CODE\nWHILE x < 10\nBEGIN WHILE\nx = x + 1\nEND WHILE\nEND CODE");

    let while_stmt = match only_statement(&program) {
        Statement::While(while_stmt) => while_stmt,
        other => panic!("expected a while, got {other:?}"),
    };

    assert_eq!(while_stmt.body.statements.len(), 1);
}

#[test]
fn display_operand_list_parses() {
    let program = parse("BEGIN CODE\nDISPLAY: x & \"txt\" & [&] & $\nEND CODE");

    let display = match only_statement(&program) {
        Statement::Display(display) => display,
        other => panic!("expected a display, got {other:?}"),
    };

    assert_eq!(display.operands.len(), 4);
    assert!(matches!(display.operands[0], DisplayOperand::Identifier(_)));
    assert!(matches!(display.operands[1], DisplayOperand::Text { .. }));
    assert!(matches!(display.operands[2], DisplayOperand::Escape { value: '&', .. }));
    assert!(matches!(display.operands[3], DisplayOperand::Newline { .. }));
}

#[test]
fn display_without_colon_is_rejected() {
    let err = parse_err("BEGIN CODE\nDISPLAY x\nEND CODE");

    assert_eq!(err.error, ParseErrorType::ExpectedColon);
}

#[test]
fn scan_targets_parse() {
    let program = parse("BEGIN CODE\nSCAN: a, b, c\nEND CODE");

    let scan = match only_statement(&program) {
        Statement::Scan(scan) => scan,
        other => panic!("expected a scan, got {other:?}"),
    };

    let names = scan.targets.iter().map(|t| t.name.as_str()).collect::<Vec<&str>>();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn quoted_true_and_false_become_booleans() {
    let program = parse("BEGIN CODE\nBOOL b = \"TRUE\"\nEND CODE");

    let declaration = match only_statement(&program) {
        Statement::Declaration(declaration) => declaration,
        other => panic!("expected a declaration, got {other:?}"),
    };

    assert!(matches!(
        declaration.bindings[0].initializer,
        Some(Expression::Primitive(Primitive::Bool { value: true, .. })),
    ));
}

#[test]
fn statements_require_line_breaks() {
    let err = parse_err("BEGIN CODE\nINT x INT y\nEND CODE");

    assert_eq!(err.error, ParseErrorType::ExpectedNewline);
}

#[test]
fn lexical_errors_surface_through_parse() {
    let err = parse_err("BEGIN CODE\nINT x = @\nEND CODE");

    assert!(matches!(err.error, ParseErrorType::LexError { .. }));
}

#[test]
fn programs_render_back_to_source() {
    let src = "BEGIN CODE\nINT x = 5, y\nx = x + 1\nDISPLAY: x & \" \" & $\nWHILE x < 10\nBEGIN WHILE\nx = x + 1\nEND WHILE\nSCAN: x, y\nEND CODE";

    let program = parse(src);

    assert_eq!(format!("{program}"), src);
}
