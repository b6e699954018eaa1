#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // letters and underscores only
    Ident(String),
    Int(i64),
    Float(f64),
    // 'x'
    Char(char),
    // "..."
    Str(String),
    // [x], one raw character, only meaningful inside DISPLAY chains
    Escape(char),

    // Arithmetic operators
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,

    // Relational operators
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Equal,    // ==
    NotEqual, // <>

    // Logical operators
    And,
    Or,
    Not,

    // Assignment
    Assign, // =

    // DISPLAY chain pieces
    Ampersand, // & concatenation
    Dollar,    // $ explicit newline marker

    // Delimiters
    LParen,
    RParen,
    Comma,
    Colon,

    // Keywords
    Begin,
    Code,
    IntType,
    FloatType,
    CharType,
    BoolType,
    StringType,
    Display,
    Scan,
    If,
    Else,
    ElseIf,
    While,
    BeginIf,
    EndIf,
    BeginWhile,
    EndWhile,

    Newline,

    // `END` maps here: the program body ends where the keyword appears
    Eof,
}

pub fn str_to_keyword(word: &str) -> Option<Token> {
    Some(match word {
        "BEGIN" => Token::Begin,
        "CODE" => Token::Code,
        "END" => Token::Eof,

        "INT" => Token::IntType,
        "FLOAT" => Token::FloatType,
        "CHAR" => Token::CharType,
        "BOOL" => Token::BoolType,
        "STRING" => Token::StringType,

        "DISPLAY" => Token::Display,
        "SCAN" => Token::Scan,

        "IF" => Token::If,
        "ELSE" => Token::Else,
        "WHILE" => Token::While,

        "AND" => Token::And,
        "OR" => Token::Or,
        "NOT" => Token::Not,

        _ => return None,
    })
}

impl Token {
    pub fn is_reserved_word(&self) -> bool {
        matches!(
            self,
            Token::Begin
            | Token::Code
            | Token::IntType
            | Token::FloatType
            | Token::CharType
            | Token::BoolType
            | Token::StringType
            | Token::Display
            | Token::Scan
            | Token::If
            | Token::Else
            | Token::ElseIf
            | Token::While
            | Token::BeginIf
            | Token::EndIf
            | Token::BeginWhile
            | Token::EndWhile
        )
    }

    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            Token::IntType
            | Token::FloatType
            | Token::CharType
            | Token::BoolType
            | Token::StringType
        )
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::Plus
            | Token::Minus
            | Token::Asterisk
            | Token::Slash
            | Token::Percent
            | Token::LessThan
            | Token::LessThanOrEqual
            | Token::GreaterThan
            | Token::GreaterThanOrEqual
            | Token::Equal
            | Token::NotEqual
            | Token::And
            | Token::Or
            | Token::Assign
        )
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Int(value) => format!("{}", value),
            Token::Float(value) => format!("{}", value),
            Token::Char(value) => format!("'{}'", value),
            Token::Str(value) => format!("\"{}\"", value),
            Token::Escape(value) => format!("[{}]", value),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Asterisk => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Percent => "%".to_string(),

            Token::LessThan => "<".to_string(),
            Token::LessThanOrEqual => "<=".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::GreaterThanOrEqual => ">=".to_string(),
            Token::Equal => "==".to_string(),
            Token::NotEqual => "<>".to_string(),

            Token::And => "AND".to_string(),
            Token::Or => "OR".to_string(),
            Token::Not => "NOT".to_string(),

            Token::Assign => "=".to_string(),

            Token::Ampersand => "&".to_string(),
            Token::Dollar => "$".to_string(),

            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Comma => ",".to_string(),
            Token::Colon => ":".to_string(),

            Token::Begin => "BEGIN".to_string(),
            Token::Code => "CODE".to_string(),
            Token::IntType => "INT".to_string(),
            Token::FloatType => "FLOAT".to_string(),
            Token::CharType => "CHAR".to_string(),
            Token::BoolType => "BOOL".to_string(),
            Token::StringType => "STRING".to_string(),
            Token::Display => "DISPLAY".to_string(),
            Token::Scan => "SCAN".to_string(),
            Token::If => "IF".to_string(),
            Token::Else => "ELSE".to_string(),
            Token::ElseIf => "ELSE IF".to_string(),
            Token::While => "WHILE".to_string(),
            Token::BeginIf => "BEGIN IF".to_string(),
            Token::EndIf => "END IF".to_string(),
            Token::BeginWhile => "BEGIN WHILE".to_string(),
            Token::EndWhile => "END WHILE".to_string(),

            Token::Newline => "\n".to_string(),
            Token::Eof => "END".to_string(),
        }
    }
}
