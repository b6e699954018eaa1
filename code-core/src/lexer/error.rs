use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedCharacter { ch: char },
    UnterminatedString,
    UnterminatedCharacter,
    UnterminatedEscape,
    NumberOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan,
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedCharacter { .. } => {
                ("I don't know what to do with this character", vec![])
            },
            LexicalErrorType::UnterminatedString => {
                ("Missing closing `\"` for this string literal", vec![])
            },
            LexicalErrorType::UnterminatedCharacter => {
                ("A character literal is one character between `'` quotes", vec![])
            },
            LexicalErrorType::UnterminatedEscape => {
                ("An escape literal is one character between `[` and `]`", vec![])
            },
            LexicalErrorType::NumberOutOfRange => {
                ("This number does not fit the numeric range", vec![])
            },
        }
    }
}
