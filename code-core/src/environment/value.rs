use std::fmt::Display;

use crate::parser::prelude::DeclaredType;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };

/// A runtime value. `Null` is the result of statements that produce nothing;
/// `Display` marks output that has already been written.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer {
        value: i64,
    },
    Float {
        value: f64,
    },
    Char {
        value: char,
    },
    String {
        value: String,
    },
    Boolean {
        value: bool,
    },
    Display,
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, ""),
            Value::Integer { value } => write!(f, "{value}"),
            Value::Float { value } => write!(f, "{value}"),
            Value::Char { value } => write!(f, "{value}"),
            Value::String { value } => write!(f, "{value}"),
            Value::Boolean { value } => {
                write!(f, "{}", if *value { "TRUE" } else { "FALSE" })
            },
            Value::Display => write!(f, ""),
        }
    }
}

impl Value {
    pub fn _type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Integer { .. } => ValueType::Integer,
            Self::Float { .. } => ValueType::Float,
            Self::Char { .. } => ValueType::Char,
            Self::String { .. } => ValueType::String,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::Display => ValueType::Null,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Null,
    Integer,
    Float,
    Char,
    String,
    Boolean,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Null => "NULL",
            Self::Integer => "INT",
            Self::Float => "FLOAT",
            Self::Char => "CHAR",
            Self::String => "STRING",
            Self::Boolean => "BOOL",
        };

        write!(f, "{name}")
    }
}

impl From<DeclaredType> for ValueType {
    fn from(value: DeclaredType) -> Self {
        match value {
            DeclaredType::Int => Self::Integer,
            DeclaredType::Float => Self::Float,
            DeclaredType::Char => Self::Char,
            DeclaredType::Bool => Self::Boolean,
            DeclaredType::String => Self::String,
        }
    }
}

impl ValueType {
    /// The value a freshly declared binding of this type holds.
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Integer => Value::Integer { value: 0 },
            Self::Float => Value::Float { value: 0.0 },
            Self::Char => Value::Char { value: '\0' },
            Self::String => Value::String { value: String::new() },
            Self::Boolean => FALSE,
        }
    }
}
