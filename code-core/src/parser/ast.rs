use std::fmt::Display;

use crate::{
    lexer::prelude::{LexResult, Token},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan,
};

// program -> BEGIN CODE {<statement> \n} END CODE
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Program {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        parser.skip_newline();
        let (start, _) = match parser.expect_one(Token::Begin) {
            Ok(span) => span,
            Err(err) => return parse_error(ParseErrorType::ExpectedBegin, err.span),
        };
        let (_, mut end) = match parser.expect_one(Token::Code) {
            Ok(span) => span,
            Err(err) => return parse_error(ParseErrorType::ExpectedCode, err.span),
        };

        let mut statements = vec![];

        loop {
            parser.skip_newline();

            match parser.current_token.clone() {
                Some((_, Token::Eof, eof_end)) => {
                    end = eof_end;
                    parser.step();

                    // The END keyword carries Eof; a CODE closer may follow it.
                    if let Some((_, Token::Code, code_end)) = parser.current_token {
                        end = code_end;
                        parser.step();
                    }
                    break;
                },
                None => break,
                Some(_) => {
                    statements.push(Statement::parse(parser, None)?);

                    match &parser.current_token {
                        Some((_, Token::Newline | Token::Eof, _)) | None => {},
                        Some((start, _, end)) => {
                            return parse_error(
                                ParseErrorType::ExpectedNewline,
                                SrcSpan { start: *start, end: *end },
                            )
                        },
                    }
                },
            }
        }

        Ok(Self {
            statements,
            location: SrcSpan { start, end },
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "BEGIN CODE\n{}\nEND CODE", statements.join("\n"))
    }
}

// statement -> <declaration> | <conditional> | <loop> | <display> | <scan> | <expression>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declaration(Declaration),
    If(IfStmt),
    While(WhileStmt),
    Display(DisplayStmt),
    Scan(ScanStmt),
    Expression(Expression),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Statement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        let token = match &parser.current_token {
            Some((_, token, _)) => token.clone(),
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        };

        let res = match token {
            token if token.is_type_keyword() => {
                Self::Declaration(Declaration::parse(parser, None)?)
            },
            Token::If => Self::If(IfStmt::parse(parser, None)?),
            Token::While => Self::While(WhileStmt::parse(parser, None)?),
            Token::Display => Self::Display(DisplayStmt::parse(parser, None)?),
            Token::Scan => Self::Scan(ScanStmt::parse(parser, None)?),
            _ => Self::Expression(Expression::parse(parser, None)?),
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Declaration(declaration) => write!(f, "{declaration}"),
            Self::If(if_stmt) => write!(f, "{if_stmt}"),
            Self::While(while_stmt) => write!(f, "{while_stmt}"),
            Self::Display(display) => write!(f, "{display}"),
            Self::Scan(scan) => write!(f, "{scan}"),
            Self::Expression(expression) => write!(f, "{expression}"),
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Declaration(declaration) => declaration.location,
            Self::If(if_stmt) => if_stmt.location,
            Self::While(while_stmt) => while_stmt.location,
            Self::Display(display) => display.location,
            Self::Scan(scan) => scan.location,
            Self::Expression(expression) => expression.location(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeclaredType {
    Int,
    Float,
    Char,
    Bool,
    String,
}

impl Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keyword = match self {
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Char => "CHAR",
            Self::Bool => "BOOL",
            Self::String => "STRING",
        };

        write!(f, "{keyword}")
    }
}

impl From<&Token> for DeclaredType {
    fn from(value: &Token) -> Self {
        match value {
            Token::IntType => Self::Int,
            Token::FloatType => Self::Float,
            Token::CharType => Self::Char,
            Token::BoolType => Self::Bool,
            Token::StringType => Self::String,
            _ => panic!("Invalid token to declared type conversion"),
        }
    }
}

// declaration -> <type> <identifier> [= <expression>] {, <identifier> [= <expression>]}
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub declared_type: DeclaredType,
    pub bindings: Vec<DeclBinding>,
    pub location: SrcSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclBinding {
    pub name: Identifier,
    pub initializer: Option<Expression>,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Declaration {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        let (start, token, mut end) = match parser.next_token() {
            Some(spanned) => spanned,
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        };

        let declared_type = DeclaredType::from(&token);
        let mut bindings = vec![];

        loop {
            let ident = parser.expect_ident()?;
            end = ident.2;
            let name = Identifier::from(ident);

            let initializer = if matches!(parser.current_token, Some((_, Token::Assign, _))) {
                parser.step();

                let value = Expression::parse(parser, Some(Precedence::Assign))?;
                end = value.location().end;

                Some(value)
            } else {
                None
            };

            bindings.push(DeclBinding { name, initializer });

            if matches!(parser.current_token, Some((_, Token::Comma, _))) {
                parser.step();
                continue;
            }

            break;
        }

        Ok(Self {
            declared_type,
            bindings,
            location: SrcSpan { start, end },
        })
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bindings = self.bindings.iter()
            .map(|binding| match &binding.initializer {
                Some(value) => format!("{} = {}", binding.name, value),
                None => format!("{}", binding.name),
            })
            .collect::<Vec<String>>();

        write!(f, "{} {}", self.declared_type, bindings.join(", "))
    }
}

// block -> <open> {<statement> \n} <close>
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan,
}

impl Block {
    pub fn parse_delimited<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>,
        open: Token,
        close: Token,
    ) -> Result<Self, ParseError> {
        let (start, mut end) = parser.expect_one(open)?;

        let mut statements = vec![];

        loop {
            parser.skip_newline();

            match parser.current_token.clone() {
                Some((_, token, close_end)) if token == close => {
                    end = close_end;
                    parser.step();
                    break;
                },
                Some((start, Token::Eof, end)) => {
                    return parse_error(
                        ParseErrorType::UnexpectedToken {
                            token: Token::Eof,
                            expected: vec![close.as_literal()],
                        },
                        SrcSpan { start, end },
                    )
                },
                None => {
                    return parse_error(
                        ParseErrorType::UnexpectedEof,
                        SrcSpan { start: end, end },
                    )
                },
                Some(_) => {},
            }

            statements.push(Statement::parse(parser, None)?);

            match &parser.current_token {
                Some((_, Token::Newline, _)) | None => {},
                Some((_, token, _)) if *token == close => {},
                Some((start, _, end)) => {
                    return parse_error(
                        ParseErrorType::ExpectedNewline,
                        SrcSpan { start: *start, end: *end },
                    )
                },
            }
        }

        Ok(Self {
            statements,
            location: SrcSpan { start, end },
        })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join("\n"))
    }
}

// conditional -> IF <expression> BEGIN IF <block> END IF [ELSE <block> | ELSE IF ...]
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expression,
    pub consequence: Block,
    pub alternative: Option<ElseBranch>,
    pub location: SrcSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Else(Block),
    ElseIf(Box<IfStmt>),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for IfStmt {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::If)?;

        IfStmt::parse_tail(parser, start)
    }
}

impl IfStmt {
    // Everything after the IF (or ELSE IF) keyword itself.
    fn parse_tail<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>,
        start: u32,
    ) -> Result<Self, ParseError> {
        let condition = Expression::parse(parser, None)?;

        parser.skip_newline();
        let consequence = Block::parse_delimited(parser, Token::BeginIf, Token::EndIf)?;
        let mut end = consequence.location.end;

        // An ELSE may sit on the same line as END IF or on the next one. The
        // newline is only consumed when an ELSE actually follows, so that it
        // still terminates this statement otherwise.
        if matches!(parser.current_token, Some((_, Token::Newline, _)))
            && matches!(parser.next_token, Some((_, Token::Else | Token::ElseIf, _)))
        {
            parser.step();
        }

        let alternative = match parser.current_token.clone() {
            Some((_, Token::Else, _)) => {
                parser.step();
                parser.skip_newline();

                let block = Block::parse_delimited(parser, Token::BeginIf, Token::EndIf)?;
                end = block.location.end;

                Some(ElseBranch::Else(block))
            },
            Some((elseif_start, Token::ElseIf, _)) => {
                parser.step();

                let nested = IfStmt::parse_tail(parser, elseif_start)?;
                end = nested.location.end;

                Some(ElseBranch::ElseIf(Box::new(nested)))
            },
            _ => None,
        };

        Ok(Self {
            condition,
            consequence,
            alternative,
            location: SrcSpan { start, end },
        })
    }
}

impl Display for IfStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IF {}\nBEGIN IF\n{}\nEND IF", self.condition, self.consequence)?;

        match &self.alternative {
            Some(ElseBranch::Else(block)) => {
                write!(f, "\nELSE\nBEGIN IF\n{}\nEND IF", block)
            },
            Some(ElseBranch::ElseIf(nested)) => write!(f, "\nELSE {}", nested),
            None => Ok(()),
        }
    }
}

// loop -> WHILE <expression> BEGIN WHILE <block> END WHILE
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expression,
    pub body: Block,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for WhileStmt {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::While)?;

        let condition = Expression::parse(parser, None)?;

        parser.skip_newline();
        let body = Block::parse_delimited(parser, Token::BeginWhile, Token::EndWhile)?;

        let location = SrcSpan { start, end: body.location.end };

        Ok(Self {
            condition,
            body,
            location,
        })
    }
}

impl Display for WhileStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WHILE {}\nBEGIN WHILE\n{}\nEND WHILE", self.condition, self.body)
    }
}

// display -> DISPLAY: <operand> {& <operand>}
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayStmt {
    pub operands: Vec<DisplayOperand>,
    pub location: SrcSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayOperand {
    Identifier(Identifier),
    Text { value: String, location: SrcSpan },
    Escape { value: char, location: SrcSpan },
    Newline { location: SrcSpan },
}

impl<T: Iterator<Item = LexResult>> Parse<T> for DisplayStmt {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Display)?;

        if let Err(err) = parser.expect_one(Token::Colon) {
            return parse_error(ParseErrorType::ExpectedColon, err.span);
        }

        let first = DisplayOperand::parse(parser, None)?;
        let mut end = first.location().end;
        let mut operands = vec![first];

        while matches!(parser.current_token, Some((_, Token::Ampersand, _))) {
            parser.step();

            let operand = DisplayOperand::parse(parser, None)?;
            end = operand.location().end;
            operands.push(operand);
        }

        Ok(Self {
            operands,
            location: SrcSpan { start, end },
        })
    }
}

impl<T: Iterator<Item = LexResult>> Parse<T> for DisplayOperand {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        match parser.current_token.clone() {
            Some((_, Token::Ident(_), _)) => {
                let ident = parser.expect_ident()?;

                Ok(Self::Identifier(Identifier::from(ident)))
            },
            Some((start, Token::Str(value), end)) => {
                parser.step();

                Ok(Self::Text { value, location: SrcSpan { start, end } })
            },
            Some((start, Token::Escape(value), end)) => {
                parser.step();

                Ok(Self::Escape { value, location: SrcSpan { start, end } })
            },
            Some((start, Token::Dollar, end)) => {
                parser.step();

                Ok(Self::Newline { location: SrcSpan { start, end } })
            },
            Some((start, _, end)) => parse_error(
                ParseErrorType::ExpectedDisplayOperand,
                SrcSpan { start, end },
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        }
    }
}

impl DisplayOperand {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(ident) => ident.location,
            Self::Text { location, .. }
            | Self::Escape { location, .. }
            | Self::Newline { location } => *location,
        }
    }
}

impl Display for DisplayStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operands = self.operands.iter()
            .map(|operand| format!("{}", operand))
            .collect::<Vec<String>>();

        write!(f, "DISPLAY: {}", operands.join(" & "))
    }
}

impl Display for DisplayOperand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Text { value, .. } => write!(f, "\"{value}\""),
            Self::Escape { value, .. } => write!(f, "[{value}]"),
            Self::Newline { .. } => write!(f, "$"),
        }
    }
}

// scan -> SCAN: <identifier> {, <identifier>}
#[derive(Debug, Clone, PartialEq)]
pub struct ScanStmt {
    pub targets: Vec<Identifier>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for ScanStmt {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Scan)?;

        if let Err(err) = parser.expect_one(Token::Colon) {
            return parse_error(ParseErrorType::ExpectedColon, err.span);
        }

        let first = parser.expect_ident()?;
        let mut end = first.2;
        let mut targets = vec![Identifier::from(first)];

        while matches!(parser.current_token, Some((_, Token::Comma, _))) {
            parser.step();

            let ident = parser.expect_ident()?;
            end = ident.2;
            targets.push(Identifier::from(ident));
        }

        Ok(Self {
            targets,
            location: SrcSpan { start, end },
        })
    }
}

impl Display for ScanStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let targets = self.targets.iter()
            .map(|ident| ident.name.clone())
            .collect::<Vec<String>>();

        write!(f, "SCAN: {}", targets.join(", "))
    }
}

// expression -> <identifier> | <primitive> | <infix> | <prefix> | <assignment> | "(" <expression> ")"
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Primitive(Primitive),
    Infix(Infix),
    Prefix(Prefix),
    Assignment(Assignment),
    Nested {
        expression: Box<Expression>,
        location: SrcSpan,
    },
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Expression {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        let mut expr = match parser.current_token.clone() {
            Some((start, token, end)) => match token {
                Token::Ident(_) => {
                    let ident = parser.expect_ident()?;

                    Self::Identifier(Identifier::from(ident))
                },
                Token::Int(_)
                | Token::Float(_)
                | Token::Char(_)
                | Token::Str(_) => Self::Primitive(Primitive::parse(parser, None)?),
                Token::Not => Self::Prefix(Prefix::parse(parser, None)?),
                Token::LParen => {
                    let (start, _) = parser.expect_one(Token::LParen)?;

                    let expression = Box::new(Expression::parse(parser, None)?);

                    let (_, end) = parser.expect_one(Token::RParen)?;

                    Self::Nested {
                        expression,
                        location: SrcSpan { start, end },
                    }
                },
                token => return parse_error(
                    ParseErrorType::UnexpectedToken {
                        token,
                        expected: vec!["an identifier, a literal, `NOT` or `(`".to_string()],
                    },
                    SrcSpan { start, end },
                ),
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        };

        loop {
            if precedence.unwrap_or(Precedence::Lowest) >= parser.current_precedence() {
                break;
            }

            let token = match &parser.current_token {
                Some((_, token, _)) => token.clone(),
                None => break,
            };

            expr = match token {
                Token::Assign => Self::Assignment(Assignment::parse(parser, expr, precedence)?),
                token if token.is_operator() => {
                    Self::Infix(Infix::parse(parser, expr, precedence)?)
                },
                _ => break,
            };
        }

        Ok(expr)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Assignment(assignment) => write!(f, "{assignment}"),
            Self::Nested { expression, .. } => write!(f, "({expression})"),
        }
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(ident) => ident.location,
            Self::Primitive(primitive) => primitive.location(),
            Self::Infix(infix) => infix.location,
            Self::Prefix(prefix) => prefix.location,
            Self::Assignment(assignment) => assignment.location,
            Self::Nested { location, .. } => *location,
        }
    }
}

// identifier -> <letter> {<letter> | _}
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub location: SrcSpan,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            name: value.1,
            location: SrcSpan { start: value.0, end: value.2 },
        }
    }
}

// primitive -> <int> | <float> | <char> | <string> | <bool>
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Int {
        value: i64,
        location: SrcSpan,
    },
    Float {
        value: f64,
        location: SrcSpan,
    },
    Char {
        value: char,
        location: SrcSpan,
    },
    Str {
        value: String,
        location: SrcSpan,
    },
    Bool {
        value: bool,
        location: SrcSpan,
    },
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Primitive {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        match parser.next_token() {
            Some((start, token, end)) => {
                let location = SrcSpan { start, end };

                match token {
                    Token::Int(value) => Ok(Self::Int { value, location }),
                    Token::Float(value) => Ok(Self::Float { value, location }),
                    Token::Char(value) => Ok(Self::Char { value, location }),
                    // Booleans are written as quoted TRUE/FALSE strings.
                    Token::Str(value) => match value.as_str() {
                        "TRUE" => Ok(Self::Bool { value: true, location }),
                        "FALSE" => Ok(Self::Bool { value: false, location }),
                        _ => Ok(Self::Str { value, location }),
                    },
                    token => parse_error(
                        ParseErrorType::UnexpectedToken {
                            token,
                            expected: vec!["a literal".to_string()],
                        },
                        location,
                    ),
                }
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        }
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int { value, .. } => write!(f, "{value}"),
            Self::Float { value, .. } => write!(f, "{value}"),
            Self::Char { value, .. } => write!(f, "'{value}'"),
            Self::Str { value, .. } => write!(f, "\"{value}\""),
            Self::Bool { value, .. } => {
                write!(f, "\"{}\"", if *value { "TRUE" } else { "FALSE" })
            },
        }
    }
}

impl Primitive {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Int { location, .. }
            | Self::Float { location, .. }
            | Self::Char { location, .. }
            | Self::Str { location, .. }
            | Self::Bool { location, .. } => *location,
        }
    }
}

// infix -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for Infix {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();

        let SrcSpan { start, .. } = left.location();

        let operator = match parser.next_token() {
            Some((_, token, _)) if token.is_operator() => token,
            Some((start, _, end)) => return parse_error(
                ParseErrorType::ExpectedOperator,
                SrcSpan { start, end },
            ),
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        };

        let right = Expression::parse(parser, Some(precedence))?;

        let SrcSpan { end, .. } = right.location();

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location: SrcSpan { start, end },
        })
    }
}

impl Display for Infix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.as_literal(), self.right)
    }
}

// prefix -> NOT <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: Token,
    pub expression: Box<Expression>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Prefix {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        let (start, operator, _) = match parser.next_token() {
            Some(spanned) => spanned,
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 },
            ),
        };

        let expression = Expression::parse(parser, Some(Precedence::Prefix))?;
        let end = expression.location().end;

        Ok(Self {
            operator,
            expression: Box::new(expression),
            location: SrcSpan { start, end },
        })
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.operator.as_literal(), self.expression)
    }
}

// assignment -> <identifier> = <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Identifier,
    pub value: Box<Expression>,
    pub location: SrcSpan,
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for Assignment {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>,
    ) -> Result<Self, ParseError> {
        let target = match left {
            Expression::Identifier(ident) => ident,
            other => return parse_error(
                ParseErrorType::InvalidAssignmentTarget,
                other.location(),
            ),
        };

        parser.expect_one(Token::Assign)?;

        // Right-associative: `a = b = 1` assigns `b` first.
        let value = Expression::parse(parser, Some(Precedence::Lowest))?;

        let location = SrcSpan {
            start: target.location.start,
            end: value.location().end,
        };

        Ok(Self {
            target,
            value: Box::new(value),
            location,
        })
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}
