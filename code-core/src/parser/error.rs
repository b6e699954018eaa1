use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedBegin,
    ExpectedCode,
    ExpectedIdent,
    ExpectedColon,
    ExpectedNewline,
    ExpectedOperator,
    ExpectedDisplayOperand,
    InvalidAssignmentTarget,
    UnexpectedEof,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan,
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedBegin => ("The program must open with `BEGIN CODE`", vec![]),
            ParseErrorType::ExpectedCode => ("Expected `CODE` after `BEGIN`", vec![]),
            ParseErrorType::ExpectedIdent => ("Expected an identifier", vec![]),
            ParseErrorType::ExpectedColon => ("Expected `:`", vec![]),
            ParseErrorType::ExpectedNewline => ("Expected the statement to end here", vec![]),
            ParseErrorType::ExpectedOperator => ("Expected an operator", vec![]),
            ParseErrorType::ExpectedDisplayOperand => {
                ("Expected an identifier, string, escape literal or `$`", vec![])
            },
            ParseErrorType::InvalidAssignmentTarget => {
                ("Only an identifier can be assigned to", vec![])
            },
            ParseErrorType::UnexpectedEof => ("Unexpected end of file", vec![]),
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = match token {
                    Token::Int(_) => "an integer".to_string(),
                    Token::Float(_) => "a float".to_string(),
                    Token::Str(_) => "a string".to_string(),
                    Token::Char(_) => "a character".to_string(),
                    Token::Ident(_) => "an identifier".to_string(),
                    _ if token.is_reserved_word() => {
                        format!("the keyword `{}`", token.as_literal())
                    },
                    _ => format!("`{}`", token.as_literal()),
                };

                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this", messages)
            },
            ParseErrorType::LexError { error } => error.details(),
        }
    }
}
