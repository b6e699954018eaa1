use crate::environment::prelude::ValueType;
use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorType {
    Redeclared {
        name: String,
    },
    Undeclared {
        name: String,
    },
    TypeMismatch {
        name: String,
        expected: ValueType,
        got: ValueType,
    },
    InvalidOperands {
        operator: String,
        left: ValueType,
        right: ValueType,
    },
    InvalidUnaryOperand {
        operator: String,
        got: ValueType,
    },
    ConditionNotBoolean {
        got: ValueType,
    },
    DivisionByZero,
    ModuloByZero,
    InputCountMismatch {
        expected: usize,
        got: usize,
    },
    InvalidInput {
        value: String,
        expected: ValueType,
    },
    Io {
        message: String,
    },
    FuelExhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan,
}

impl RuntimeError {
    pub fn kind(&self) -> &'static str {
        match self.error {
            RuntimeErrorType::Redeclared { .. }
            | RuntimeErrorType::Undeclared { .. } => "name error",
            RuntimeErrorType::TypeMismatch { .. }
            | RuntimeErrorType::InvalidOperands { .. }
            | RuntimeErrorType::InvalidUnaryOperand { .. }
            | RuntimeErrorType::ConditionNotBoolean { .. } => "type error",
            RuntimeErrorType::DivisionByZero
            | RuntimeErrorType::ModuloByZero => "arithmetic error",
            RuntimeErrorType::InputCountMismatch { .. }
            | RuntimeErrorType::InvalidInput { .. } => "input error",
            RuntimeErrorType::Io { .. } => "i/o error",
            RuntimeErrorType::FuelExhausted => "limit error",
        }
    }

    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            RuntimeErrorType::Redeclared { name } => (
                "Variable is already declared in this scope",
                vec![format!("`{name}` cannot be declared twice.")],
            ),
            RuntimeErrorType::Undeclared { name } => (
                "Variable has not been declared",
                vec![format!("`{name}` must be declared before it is used.")],
            ),
            RuntimeErrorType::TypeMismatch { name, expected, got } => (
                "Value does not match the declared type",
                vec![format!(
                    "`{name}` was declared as {expected} but is given a {got} value."
                )],
            ),
            RuntimeErrorType::InvalidOperands { operator, left, right } => (
                "Operator cannot be applied to these operands",
                vec![format!(
                    "`{operator}` is not defined for {left} and {right}."
                )],
            ),
            RuntimeErrorType::InvalidUnaryOperand { operator, got } => (
                "Operator cannot be applied to this operand",
                vec![format!("`{operator}` is not defined for {got}.")],
            ),
            RuntimeErrorType::ConditionNotBoolean { got } => (
                "Condition must be a BOOL value",
                vec![format!("This condition evaluates to {got}.")],
            ),
            RuntimeErrorType::DivisionByZero => (
                "Division by zero",
                vec!["The divisor evaluates to zero.".to_string()],
            ),
            RuntimeErrorType::ModuloByZero => (
                "Modulo by zero",
                vec!["The divisor evaluates to zero.".to_string()],
            ),
            RuntimeErrorType::InputCountMismatch { expected, got } => (
                "Wrong number of input values",
                vec![format!("Expected {expected} comma-separated values, got {got}.")],
            ),
            RuntimeErrorType::InvalidInput { value, expected } => (
                "Input value cannot be read with the expected type",
                vec![format!("`{value}` is not a valid {expected} value.")],
            ),
            RuntimeErrorType::Io { message } => (
                "Input/output failed",
                vec![message.clone()],
            ),
            RuntimeErrorType::FuelExhausted => (
                "Evaluation budget exhausted",
                vec!["The program ran for more steps than allowed.".to_string()],
            ),
        }
    }
}
