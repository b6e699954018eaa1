use super::prelude::{Lexer, LexicalErrorType, Token};

fn lex(input: &str) -> Vec<Token> {
    Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)))
        .map(|result| result.expect("token").1)
        .collect()
}

fn lex_without_newlines(input: &str) -> Vec<Token> {
    lex(input)
        .into_iter()
        .filter(|token| *token != Token::Newline)
        .collect()
}

#[test]
fn test_program_frame() {
    let tokens = lex_without_newlines("BEGIN CODE\nEND CODE");

    assert_eq!(
        tokens,
        vec![
            Token::Begin,
            Token::Code,
            Token::Eof,
            Token::Code,
            Token::Eof,
        ],
    );
}

#[test]
fn test_two_word_keywords() {
    let tokens = lex_without_newlines("BEGIN IF END IF BEGIN WHILE END WHILE ELSE IF");

    assert_eq!(
        tokens,
        vec![
            Token::BeginIf,
            Token::EndIf,
            Token::BeginWhile,
            Token::EndWhile,
            Token::ElseIf,
            Token::Eof,
        ],
    );
}

#[test]
fn test_keywords_and_idents() {
    let tokens = lex_without_newlines("INT counter WHILE while_loop NOT");

    assert_eq!(
        tokens,
        vec![
            Token::IntType,
            Token::Ident("counter".to_string()),
            Token::While,
            Token::Ident("while_loop".to_string()),
            Token::Not,
            Token::Eof,
        ],
    );
}

#[test]
fn test_operators() {
    let tokens = lex_without_newlines("a < b <= c <> d == e >= f > g = h");

    assert_eq!(
        tokens,
        vec![
            Token::Ident("a".to_string()),
            Token::LessThan,
            Token::Ident("b".to_string()),
            Token::LessThanOrEqual,
            Token::Ident("c".to_string()),
            Token::NotEqual,
            Token::Ident("d".to_string()),
            Token::Equal,
            Token::Ident("e".to_string()),
            Token::GreaterThanOrEqual,
            Token::Ident("f".to_string()),
            Token::GreaterThan,
            Token::Ident("g".to_string()),
            Token::Assign,
            Token::Ident("h".to_string()),
            Token::Eof,
        ],
    );
}

#[test]
fn test_numbers() {
    let tokens = lex_without_newlines("10 1.5 0.25");

    assert_eq!(
        tokens,
        vec![
            Token::Int(10),
            Token::Float(1.5),
            Token::Float(0.25),
            Token::Eof,
        ],
    );
}

#[test]
fn test_signed_numbers_after_operators() {
    // A sign is part of the literal unless the previous token could end
    // an expression.
    let tokens = lex_without_newlines("x = -5 + -3");

    assert_eq!(
        tokens,
        vec![
            Token::Ident("x".to_string()),
            Token::Assign,
            Token::Int(-5),
            Token::Plus,
            Token::Int(-3),
            Token::Eof,
        ],
    );
}

#[test]
fn test_minus_after_ident_is_subtraction() {
    let tokens = lex_without_newlines("x - 5");

    assert_eq!(
        tokens,
        vec![
            Token::Ident("x".to_string()),
            Token::Minus,
            Token::Int(5),
            Token::Eof,
        ],
    );
}

#[test]
fn test_float_context() {
    // A bare integer literal on a FLOAT declaration line lexes as a float.
    let tokens = lex_without_newlines("FLOAT f = 3");

    assert_eq!(
        tokens,
        vec![
            Token::FloatType,
            Token::Ident("f".to_string()),
            Token::Assign,
            Token::Float(3.0),
            Token::Eof,
        ],
    );
}

#[test]
fn test_float_context_resets_on_newline() {
    let tokens = lex("FLOAT f\nINT x = 3");

    assert_eq!(
        tokens,
        vec![
            Token::FloatType,
            Token::Ident("f".to_string()),
            Token::Newline,
            Token::IntType,
            Token::Ident("x".to_string()),
            Token::Assign,
            Token::Int(3),
            Token::Eof,
        ],
    );
}

#[test]
fn test_char_string_and_escape_literals() {
    let tokens = lex_without_newlines(r#"'a' "hello" [&]"#);

    assert_eq!(
        tokens,
        vec![
            Token::Char('a'),
            Token::Str("hello".to_string()),
            Token::Escape('&'),
            Token::Eof,
        ],
    );
}

#[test]
fn test_comments_are_discarded() {
    let tokens = lex("INT x # the counter\nx = 1");

    assert_eq!(
        tokens,
        vec![
            Token::IntType,
            Token::Ident("x".to_string()),
            Token::Newline,
            Token::Ident("x".to_string()),
            Token::Assign,
            Token::Int(1),
            Token::Eof,
        ],
    );
}

#[test]
fn test_display_tokens() {
    let tokens = lex_without_newlines(r#"DISPLAY: "a" & x & $"#);

    assert_eq!(
        tokens,
        vec![
            Token::Display,
            Token::Colon,
            Token::Str("a".to_string()),
            Token::Ampersand,
            Token::Ident("x".to_string()),
            Token::Ampersand,
            Token::Dollar,
            Token::Eof,
        ],
    );
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new(r#""oops"#.char_indices().map(|(i, c)| (i as u32, c)));

    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.error, LexicalErrorType::UnterminatedString);
}

#[test]
fn test_unterminated_character() {
    let mut lexer = Lexer::new("'ab'".char_indices().map(|(i, c)| (i as u32, c)));

    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.error, LexicalErrorType::UnterminatedCharacter);
}

#[test]
fn test_unrecognized_character() {
    let mut lexer = Lexer::new("^".char_indices().map(|(i, c)| (i as u32, c)));

    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.error, LexicalErrorType::UnrecognizedCharacter { ch: '^' });
}

#[test]
fn test_keyword_end_spans_its_text() {
    let mut lexer = Lexer::new("END CODE".char_indices().map(|(i, c)| (i as u32, c)));

    let (start, token, end) = lexer.next_token().expect("token");
    assert_eq!(token, Token::Eof);
    assert!(start < end);

    let (_, token, _) = lexer.next_token().expect("token");
    assert_eq!(token, Token::Code);

    // The synthetic end-of-input token is empty.
    let (start, token, end) = lexer.next_token().expect("token");
    assert_eq!(token, Token::Eof);
    assert_eq!(start, end);
}
