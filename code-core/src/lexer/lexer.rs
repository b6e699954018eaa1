use super::error::{LexicalError, LexicalErrorType};
use super::token::{str_to_keyword, Token};
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

/// Lexer over a buffered character sequence. The input iterator is drained
/// once at construction; an explicit cursor allows the multi-character
/// lookahead the two-word keywords and signed literals need.
#[derive(Debug)]
pub struct Lexer {
    chars: Vec<(u32, char)>,
    cursor: usize,
    limit: u32,

    // Most recently seen type keyword on the current line. A bare numeric
    // literal in FLOAT context lexes as a float.
    float_context: bool,
    // Last emitted token, for `+`/`-` sign disambiguation.
    prev: Option<Token>,
    exhausted: bool,
}

impl Lexer {
    pub fn new(input: impl Iterator<Item = (u32, char)>) -> Self {
        let chars: Vec<(u32, char)> = input.collect();
        let limit = chars
            .last()
            .map(|(pos, ch)| pos + ch.len_utf8() as u32)
            .unwrap_or(0);

        Self {
            chars,
            cursor: 0,
            limit,
            float_context: false,
            prev: None,
            exhausted: false,
        }
    }

    pub fn next_token(&mut self) -> LexResult {
        let spanned = match self.ch() {
            Some(ch) => match ch {
                '(' => self.eat_one(Token::LParen),
                ')' => self.eat_one(Token::RParen),
                ',' => self.eat_one(Token::Comma),
                ':' => self.eat_one(Token::Colon),
                '&' => self.eat_one(Token::Ampersand),
                '$' => self.eat_one(Token::Dollar),
                '*' => self.eat_one(Token::Asterisk),
                '/' => self.eat_one(Token::Slash),
                '%' => self.eat_one(Token::Percent),
                '#' => {
                    self.skip_comment();
                    return self.next_token();
                },
                '+' | '-' => {
                    if self.absorbs_sign() {
                        self.lex_number()?
                    } else if ch == '+' {
                        self.eat_one(Token::Plus)
                    } else {
                        self.eat_one(Token::Minus)
                    }
                },
                '<' | '>' | '=' => self.lex_comparison(),
                '\'' => self.lex_char()?,
                '"' => self.lex_string()?,
                '[' => self.lex_escape()?,
                '0'..='9' => self.lex_number()?,
                'a'..='z' | 'A'..='Z' | '_' => self.lex_word(),
                '\n' => self.eat_one(Token::Newline),
                ' ' | '\t' | '\r' | '\x0C' => {
                    self.bump();
                    return self.next_token();
                },
                ch => {
                    let location = self.pos();
                    // Consume the offender so lexing can make progress.
                    self.bump();
                    return Err(LexicalError {
                        error: LexicalErrorType::UnrecognizedCharacter { ch },
                        location: SrcSpan {
                            start: location,
                            end: location + ch.len_utf8() as u32,
                        },
                    });
                },
            },
            None => (self.limit, Token::Eof, self.limit),
        };

        match spanned.1 {
            Token::FloatType => self.float_context = true,
            Token::IntType
            | Token::CharType
            | Token::BoolType
            | Token::StringType
            | Token::Newline => self.float_context = false,
            _ => {},
        }
        self.prev = Some(spanned.1.clone());

        Ok(spanned)
    }

    fn ch(&self) -> Option<char> {
        self.chars.get(self.cursor).map(|(_, ch)| *ch)
    }

    fn peek(&self, n: usize) -> Option<char> {
        self.chars.get(self.cursor + n).map(|(_, ch)| *ch)
    }

    fn pos(&self) -> u32 {
        match self.chars.get(self.cursor) {
            Some((pos, _)) => *pos,
            None => self.limit,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.ch();
        if ch.is_some() {
            self.cursor += 1;
        }
        ch
    }

    fn eat_one(&mut self, token: Token) -> Spanned {
        let start = self.pos();
        self.bump();
        (start, token, self.pos())
    }

    fn skip_comment(&mut self) {
        // Through end of line, leaving the `\n` to terminate the statement.
        while self.ch().is_some_and(|ch| ch != '\n') {
            self.bump();
        }
    }

    // A leading sign belongs to the literal unless the previous token could
    // end an expression, in which case `x -1` is a subtraction.
    fn absorbs_sign(&self) -> bool {
        if !self.peek(1).is_some_and(|ch| ch.is_ascii_digit()) {
            return false;
        }

        !matches!(
            self.prev,
            Some(Token::Ident(_) | Token::Int(_) | Token::Float(_) | Token::RParen)
        )
    }

    fn lex_comparison(&mut self) -> Spanned {
        let start = self.pos();
        let first = self.bump().expect("comparison start");

        let token = match (first, self.ch()) {
            ('<', Some('=')) => {
                self.bump();
                Token::LessThanOrEqual
            },
            ('<', Some('>')) => {
                self.bump();
                Token::NotEqual
            },
            ('<', _) => Token::LessThan,
            ('>', Some('=')) => {
                self.bump();
                Token::GreaterThanOrEqual
            },
            ('>', _) => Token::GreaterThan,
            ('=', Some('=')) => {
                self.bump();
                Token::Equal
            },
            (_, _) => Token::Assign,
        };

        (start, token, self.pos())
    }

    fn lex_char(&mut self) -> LexResult {
        let start = self.pos();
        self.bump();

        let value = match self.bump() {
            Some(ch) if ch != '\'' && ch != '\n' => ch,
            _ => {
                return Err(LexicalError {
                    error: LexicalErrorType::UnterminatedCharacter,
                    location: SrcSpan { start, end: self.pos() },
                })
            }
        };

        match self.bump() {
            Some('\'') => Ok((start, Token::Char(value), self.pos())),
            _ => Err(LexicalError {
                error: LexicalErrorType::UnterminatedCharacter,
                location: SrcSpan { start, end: self.pos() },
            }),
        }
    }

    fn lex_string(&mut self) -> LexResult {
        let start = self.pos();
        self.bump();

        let mut value = String::new();

        loop {
            match self.bump() {
                Some('"') => break,
                Some(ch) => value.push(ch),
                None => {
                    return Err(LexicalError {
                        error: LexicalErrorType::UnterminatedString,
                        location: SrcSpan { start, end: self.pos() },
                    })
                }
            }
        }

        Ok((start, Token::Str(value), self.pos()))
    }

    fn lex_escape(&mut self) -> LexResult {
        let start = self.pos();
        self.bump();

        let value = match self.bump() {
            Some(ch) if ch != '\n' => ch,
            _ => {
                return Err(LexicalError {
                    error: LexicalErrorType::UnterminatedEscape,
                    location: SrcSpan { start, end: self.pos() },
                })
            }
        };

        match self.bump() {
            Some(']') => Ok((start, Token::Escape(value), self.pos())),
            _ => Err(LexicalError {
                error: LexicalErrorType::UnterminatedEscape,
                location: SrcSpan { start, end: self.pos() },
            }),
        }
    }

    fn lex_number(&mut self) -> LexResult {
        let start = self.pos();
        let mut value = String::new();
        let mut has_period = false;

        if matches!(self.ch(), Some('+') | Some('-')) {
            value.push(self.bump().expect("number sign"));
        }

        while self.ch().is_some_and(|ch| ch.is_ascii_digit()) {
            value.push(self.bump().expect("number digit"));
        }

        if self.ch() == Some('.') && self.peek(1).is_some_and(|ch| ch.is_ascii_digit()) {
            has_period = true;
            value.push(self.bump().expect("decimal point"));

            while self.ch().is_some_and(|ch| ch.is_ascii_digit()) {
                value.push(self.bump().expect("fraction digit"));
            }
        }

        let end = self.pos();

        let token = if has_period || self.float_context {
            match value.parse::<f64>() {
                Ok(value) => Token::Float(value),
                Err(_) => {
                    return Err(LexicalError {
                        error: LexicalErrorType::NumberOutOfRange,
                        location: SrcSpan { start, end },
                    })
                }
            }
        } else {
            match value.parse::<i64>() {
                Ok(value) => Token::Int(value),
                Err(_) => {
                    return Err(LexicalError {
                        error: LexicalErrorType::NumberOutOfRange,
                        location: SrcSpan { start, end },
                    })
                }
            }
        };

        Ok((start, token, end))
    }

    fn lex_word(&mut self) -> Spanned {
        let start = self.pos();
        let mut word = String::new();

        while self.ch().is_some_and(is_word_char) {
            word.push(self.bump().expect("word char"));
        }

        let token = match word.as_str() {
            "BEGIN" if self.follows_word("IF") => Token::BeginIf,
            "BEGIN" if self.follows_word("WHILE") => Token::BeginWhile,
            "END" if self.follows_word("IF") => Token::EndIf,
            "END" if self.follows_word("WHILE") => Token::EndWhile,
            "ELSE" if self.follows_word("IF") => Token::ElseIf,
            word => match str_to_keyword(word) {
                Some(token) => token,
                None => Token::Ident(word.to_string()),
            },
        };

        (start, token, self.pos())
    }

    // Consumes the next word on the same line when it matches, turning
    // `BEGIN IF` and friends into a single token.
    fn follows_word(&mut self, expected: &str) -> bool {
        let mut i = self.cursor;
        while matches!(self.chars.get(i), Some((_, ' ')) | Some((_, '\t'))) {
            i += 1;
        }

        let word_start = i;
        while self.chars.get(i).is_some_and(|(_, ch)| is_word_char(*ch)) {
            i += 1;
        }

        let word: String = self.chars[word_start..i].iter().map(|(_, ch)| *ch).collect();

        if word == expected {
            self.cursor = i;
            true
        } else {
            false
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

impl Iterator for Lexer {
    type Item = LexResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let token = self.next_token();

        if matches!(token, Ok((_, Token::Eof, _))) && self.cursor >= self.chars.len() {
            self.exhausted = true;
        }

        Some(token)
    }
}
