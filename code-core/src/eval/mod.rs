pub mod error;
pub mod io;

pub mod prelude {
    pub use super::{error::*, io::*, Evaluator};
}

#[cfg(test)]
mod tests;

use std::{cell::RefCell, rc::Rc};

use crate::{
    environment::prelude::{Environment, Value, ValueType, FALSE, TRUE},
    lexer::prelude::Token,
    parser::prelude::{
        Assignment, Block, Declaration, DisplayOperand, DisplayStmt, ElseBranch, Expression,
        Identifier, IfStmt, Infix, Prefix, Primitive, Program, ScanStmt, Statement, WhileStmt,
    },
    utils::prelude::SrcSpan,
};

use self::error::{RuntimeError, RuntimeErrorType};
use self::io::ProgramIO;

/// Tree-walking evaluator. IO goes through the [`ProgramIO`] seam; an
/// optional fuel budget bounds the number of evaluated statements so that
/// runaway loops fail instead of hanging the host.
pub struct Evaluator<'io> {
    io: &'io mut dyn ProgramIO,
    fuel: Option<u64>,
}

impl<'io> Evaluator<'io> {
    pub fn new(io: &'io mut dyn ProgramIO) -> Self {
        Self { io, fuel: None }
    }

    pub fn with_fuel(io: &'io mut dyn ProgramIO, fuel: u64) -> Self {
        Self { io, fuel: Some(fuel) }
    }

    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        let env = Rc::new(RefCell::new(Environment::new()));

        for statement in &program.statements {
            self.eval_statement(statement, env.clone())?;
        }

        Ok(())
    }

    fn spend(&mut self, location: SrcSpan) -> Result<(), RuntimeError> {
        match &mut self.fuel {
            Some(0) => Err(RuntimeError {
                error: RuntimeErrorType::FuelExhausted,
                location,
            }),
            Some(fuel) => {
                *fuel -= 1;
                Ok(())
            },
            None => Ok(()),
        }
    }

    pub fn eval_statement(
        &mut self,
        statement: &Statement,
        env: Rc<RefCell<Environment>>,
    ) -> Result<Value, RuntimeError> {
        self.spend(statement.location())?;

        match statement {
            Statement::Declaration(declaration) => self.eval_declaration(declaration, env),
            Statement::If(if_stmt) => self.eval_if(if_stmt, env),
            Statement::While(while_stmt) => self.eval_while(while_stmt, env),
            Statement::Display(display) => self.eval_display(display, env),
            Statement::Scan(scan) => self.eval_scan(scan, env),
            Statement::Expression(expression) => self.eval_expression(expression, env),
        }
    }

    fn eval_declaration(
        &mut self,
        declaration: &Declaration,
        env: Rc<RefCell<Environment>>,
    ) -> Result<Value, RuntimeError> {
        let declared = ValueType::from(declaration.declared_type);

        for binding in &declaration.bindings {
            // The initializer is evaluated before the name exists, so
            // `INT x = x` still reports an undeclared variable.
            let initial = match &binding.initializer {
                Some(expression) => Some(self.eval_expression(expression, env.clone())?),
                None => None,
            };

            let name = &binding.name;

            if !env.borrow_mut().declare(&name.name, declared) {
                return Err(RuntimeError {
                    error: RuntimeErrorType::Redeclared { name: name.name.clone() },
                    location: name.location,
                });
            }

            if let Some(value) = initial {
                let location = binding
                    .initializer
                    .as_ref()
                    .map(|expression| expression.location())
                    .unwrap_or(name.location);

                self.store(&env, name, value, location)?;
            }
        }

        Ok(Value::Null)
    }

    /// Coerces `value` to the declared type of `name` and writes it.
    /// INT and FLOAT convert into each other, truncating toward zero on the
    /// way into INT; every other cross-type write is an error.
    fn store(
        &mut self,
        env: &Rc<RefCell<Environment>>,
        name: &Identifier,
        value: Value,
        location: SrcSpan,
    ) -> Result<Value, RuntimeError> {
        let declared = match env.borrow().type_of(&name.name) {
            Some(declared) => declared,
            None => {
                return Err(RuntimeError {
                    error: RuntimeErrorType::Undeclared { name: name.name.clone() },
                    location: name.location,
                })
            }
        };

        let coerced = match (declared, value) {
            (ValueType::Integer, Value::Float { value }) => {
                Value::Integer { value: value.trunc() as i64 }
            },
            (ValueType::Float, Value::Integer { value }) => {
                Value::Float { value: value as f64 }
            },
            (declared, value) if value._type() == declared => value,
            (declared, value) => {
                return Err(RuntimeError {
                    error: RuntimeErrorType::TypeMismatch {
                        name: name.name.clone(),
                        expected: declared,
                        got: value._type(),
                    },
                    location,
                })
            }
        };

        env.borrow_mut().assign(&name.name, coerced.clone());

        Ok(coerced)
    }

    fn eval_block(
        &mut self,
        block: &Block,
        env: Rc<RefCell<Environment>>,
    ) -> Result<Value, RuntimeError> {
        let scope = Rc::new(RefCell::new(Environment::with_parent(env)));

        for statement in &block.statements {
            self.eval_statement(statement, scope.clone())?;
        }

        Ok(Value::Null)
    }

    fn eval_condition(
        &mut self,
        condition: &Expression,
        env: Rc<RefCell<Environment>>,
    ) -> Result<bool, RuntimeError> {
        match self.eval_expression(condition, env)? {
            Value::Boolean { value } => Ok(value),
            other => Err(RuntimeError {
                error: RuntimeErrorType::ConditionNotBoolean { got: other._type() },
                location: condition.location(),
            }),
        }
    }

    fn eval_if(
        &mut self,
        if_stmt: &IfStmt,
        env: Rc<RefCell<Environment>>,
    ) -> Result<Value, RuntimeError> {
        if self.eval_condition(&if_stmt.condition, env.clone())? {
            return self.eval_block(&if_stmt.consequence, env);
        }

        match &if_stmt.alternative {
            Some(ElseBranch::Else(block)) => self.eval_block(block, env),
            Some(ElseBranch::ElseIf(nested)) => self.eval_if(nested, env),
            None => Ok(Value::Null),
        }
    }

    fn eval_while(
        &mut self,
        while_stmt: &WhileStmt,
        env: Rc<RefCell<Environment>>,
    ) -> Result<Value, RuntimeError> {
        // Each iteration gets a fresh scope, so declarations inside the
        // body do not collide with themselves on the next pass.
        while self.eval_condition(&while_stmt.condition, env.clone())? {
            self.spend(while_stmt.location)?;
            self.eval_block(&while_stmt.body, env.clone())?;
        }

        Ok(Value::Null)
    }

    fn eval_display(
        &mut self,
        display: &DisplayStmt,
        env: Rc<RefCell<Environment>>,
    ) -> Result<Value, RuntimeError> {
        let mut out = String::new();

        for operand in &display.operands {
            match operand {
                DisplayOperand::Identifier(ident) => {
                    let value = match env.borrow().lookup(&ident.name) {
                        Some(value) => value,
                        None => {
                            return Err(RuntimeError {
                                error: RuntimeErrorType::Undeclared {
                                    name: ident.name.clone(),
                                },
                                location: ident.location,
                            })
                        }
                    };

                    out.push_str(&format!("{value}"));
                },
                DisplayOperand::Text { value, .. } => out.push_str(value),
                DisplayOperand::Escape { value, .. } => out.push(*value),
                DisplayOperand::Newline { .. } => out.push('\n'),
            }
        }

        // One atomic write per statement.
        self.io.display(&out).map_err(|err| RuntimeError {
            error: RuntimeErrorType::Io { message: err.to_string() },
            location: display.location,
        })?;

        Ok(Value::Display)
    }

    fn eval_scan(
        &mut self,
        scan: &ScanStmt,
        env: Rc<RefCell<Environment>>,
    ) -> Result<Value, RuntimeError> {
        for target in &scan.targets {
            if env.borrow().type_of(&target.name).is_none() {
                return Err(RuntimeError {
                    error: RuntimeErrorType::Undeclared { name: target.name.clone() },
                    location: target.location,
                });
            }
        }

        let names = scan
            .targets
            .iter()
            .map(|target| target.name.clone())
            .collect::<Vec<String>>();

        let io_error = |err: std::io::Error| RuntimeError {
            error: RuntimeErrorType::Io { message: err.to_string() },
            location: scan.location,
        };

        self.io
            .display(&format!("Enter values for {}: ", names.join(", ")))
            .map_err(io_error)?;

        let line = self.io.request_line().map_err(io_error)?;

        let values = line.split(',').map(str::trim).collect::<Vec<&str>>();

        if values.len() != scan.targets.len() {
            return Err(RuntimeError {
                error: RuntimeErrorType::InputCountMismatch {
                    expected: scan.targets.len(),
                    got: values.len(),
                },
                location: scan.location,
            });
        }

        for (target, raw) in scan.targets.iter().zip(values) {
            let declared = env
                .borrow()
                .type_of(&target.name)
                .unwrap_or(ValueType::Null);

            let value = parse_input(raw, declared).ok_or_else(|| RuntimeError {
                error: RuntimeErrorType::InvalidInput {
                    value: raw.to_string(),
                    expected: declared,
                },
                location: target.location,
            })?;

            env.borrow_mut().assign(&target.name, value);
        }

        Ok(Value::Null)
    }

    pub fn eval_expression(
        &mut self,
        expression: &Expression,
        env: Rc<RefCell<Environment>>,
    ) -> Result<Value, RuntimeError> {
        match expression {
            Expression::Identifier(ident) => match env.borrow().lookup(&ident.name) {
                Some(value) => Ok(value),
                None => Err(RuntimeError {
                    error: RuntimeErrorType::Undeclared { name: ident.name.clone() },
                    location: ident.location,
                }),
            },
            Expression::Primitive(primitive) => Ok(eval_primitive(primitive)),
            Expression::Infix(infix) => self.eval_infix(infix, env),
            Expression::Prefix(prefix) => self.eval_prefix(prefix, env),
            Expression::Assignment(assignment) => self.eval_assignment(assignment, env),
            Expression::Nested { expression, .. } => self.eval_expression(expression, env),
        }
    }

    fn eval_assignment(
        &mut self,
        assignment: &Assignment,
        env: Rc<RefCell<Environment>>,
    ) -> Result<Value, RuntimeError> {
        let value = self.eval_expression(&assignment.value, env.clone())?;

        // The stored, coerced value is the result, so `a = b = 7.5` gives
        // `a` whatever `b` actually ended up holding.
        self.store(&env, &assignment.target, value, assignment.value.location())
    }

    fn eval_prefix(
        &mut self,
        prefix: &Prefix,
        env: Rc<RefCell<Environment>>,
    ) -> Result<Value, RuntimeError> {
        match self.eval_expression(&prefix.expression, env)? {
            Value::Boolean { value } => Ok(Value::Boolean { value: !value }),
            other => Err(RuntimeError {
                error: RuntimeErrorType::InvalidUnaryOperand {
                    operator: prefix.operator.as_literal(),
                    got: other._type(),
                },
                location: prefix.location,
            }),
        }
    }

    fn eval_infix(
        &mut self,
        infix: &Infix,
        env: Rc<RefCell<Environment>>,
    ) -> Result<Value, RuntimeError> {
        if matches!(infix.operator, Token::And | Token::Or) {
            return self.eval_logical(infix, env);
        }

        let left = self.eval_expression(&infix.left, env.clone())?;
        let right = self.eval_expression(&infix.right, env)?;

        match &infix.operator {
            Token::Plus
            | Token::Minus
            | Token::Asterisk
            | Token::Slash
            | Token::Percent => self.eval_arithmetic(infix, left, right),
            Token::LessThan
            | Token::LessThanOrEqual
            | Token::GreaterThan
            | Token::GreaterThanOrEqual => self.eval_ordering(infix, left, right),
            Token::Equal | Token::NotEqual => self.eval_equality(infix, left, right),
            operator => Err(RuntimeError {
                error: RuntimeErrorType::InvalidOperands {
                    operator: operator.as_literal(),
                    left: left._type(),
                    right: right._type(),
                },
                location: infix.location,
            }),
        }
    }

    // AND and OR short-circuit, so the right operand is only evaluated
    // when it can still change the result.
    fn eval_logical(
        &mut self,
        infix: &Infix,
        env: Rc<RefCell<Environment>>,
    ) -> Result<Value, RuntimeError> {
        let left = match self.eval_expression(&infix.left, env.clone())? {
            Value::Boolean { value } => value,
            other => {
                return Err(RuntimeError {
                    error: RuntimeErrorType::InvalidOperands {
                        operator: infix.operator.as_literal(),
                        left: other._type(),
                        right: ValueType::Boolean,
                    },
                    location: infix.location,
                })
            }
        };

        match (&infix.operator, left) {
            (Token::And, false) => return Ok(FALSE),
            (Token::Or, true) => return Ok(TRUE),
            _ => {},
        }

        match self.eval_expression(&infix.right, env)? {
            Value::Boolean { value } => Ok(Value::Boolean { value }),
            other => Err(RuntimeError {
                error: RuntimeErrorType::InvalidOperands {
                    operator: infix.operator.as_literal(),
                    left: ValueType::Boolean,
                    right: other._type(),
                },
                location: infix.location,
            }),
        }
    }

    fn eval_arithmetic(
        &mut self,
        infix: &Infix,
        left: Value,
        right: Value,
    ) -> Result<Value, RuntimeError> {
        match (left, right) {
            (Value::Integer { value: left }, Value::Integer { value: right }) => {
                let value = match &infix.operator {
                    Token::Plus => left.wrapping_add(right),
                    Token::Minus => left.wrapping_sub(right),
                    Token::Asterisk => left.wrapping_mul(right),
                    // Truncates toward zero, like every other INT write.
                    Token::Slash if right != 0 => left.wrapping_div(right),
                    Token::Percent if right != 0 => left.wrapping_rem(right),
                    Token::Slash => {
                        return Err(RuntimeError {
                            error: RuntimeErrorType::DivisionByZero,
                            location: infix.right.location(),
                        })
                    },
                    _ => {
                        return Err(RuntimeError {
                            error: RuntimeErrorType::ModuloByZero,
                            location: infix.right.location(),
                        })
                    },
                };

                Ok(Value::Integer { value })
            },
            (left, right) => match (as_float(&left), as_float(&right)) {
                (Some(left_value), Some(right_value)) => {
                    let value = match &infix.operator {
                        Token::Plus => left_value + right_value,
                        Token::Minus => left_value - right_value,
                        Token::Asterisk => left_value * right_value,
                        Token::Slash if right_value != 0.0 => left_value / right_value,
                        Token::Percent if right_value != 0.0 => left_value % right_value,
                        Token::Slash => {
                            return Err(RuntimeError {
                                error: RuntimeErrorType::DivisionByZero,
                                location: infix.right.location(),
                            })
                        },
                        _ => {
                            return Err(RuntimeError {
                                error: RuntimeErrorType::ModuloByZero,
                                location: infix.right.location(),
                            })
                        },
                    };

                    Ok(Value::Float { value })
                },
                _ => Err(RuntimeError {
                    error: RuntimeErrorType::InvalidOperands {
                        operator: infix.operator.as_literal(),
                        left: left._type(),
                        right: right._type(),
                    },
                    location: infix.location,
                }),
            },
        }
    }

    fn eval_ordering(
        &mut self,
        infix: &Infix,
        left: Value,
        right: Value,
    ) -> Result<Value, RuntimeError> {
        match (as_float(&left), as_float(&right)) {
            (Some(left_value), Some(right_value)) => {
                let value = match &infix.operator {
                    Token::LessThan => left_value < right_value,
                    Token::LessThanOrEqual => left_value <= right_value,
                    Token::GreaterThan => left_value > right_value,
                    _ => left_value >= right_value,
                };

                Ok(Value::Boolean { value })
            },
            _ => Err(RuntimeError {
                error: RuntimeErrorType::InvalidOperands {
                    operator: infix.operator.as_literal(),
                    left: left._type(),
                    right: right._type(),
                },
                location: infix.location,
            }),
        }
    }

    fn eval_equality(
        &mut self,
        infix: &Infix,
        left: Value,
        right: Value,
    ) -> Result<Value, RuntimeError> {
        let equal = match (&left, &right) {
            // Mixed numerics compare by value, so 1 == 1.0.
            (Value::Integer { .. } | Value::Float { .. }, Value::Integer { .. } | Value::Float { .. }) => {
                match (as_float(&left), as_float(&right)) {
                    (Some(left), Some(right)) => left == right,
                    _ => false,
                }
            },
            (left, right) if left._type() == right._type() => left == right,
            (left, right) => {
                return Err(RuntimeError {
                    error: RuntimeErrorType::InvalidOperands {
                        operator: infix.operator.as_literal(),
                        left: left._type(),
                        right: right._type(),
                    },
                    location: infix.location,
                })
            }
        };

        let value = match &infix.operator {
            Token::Equal => equal,
            _ => !equal,
        };

        Ok(Value::Boolean { value })
    }
}

fn eval_primitive(primitive: &Primitive) -> Value {
    match primitive {
        Primitive::Int { value, .. } => Value::Integer { value: *value },
        Primitive::Float { value, .. } => Value::Float { value: *value },
        Primitive::Char { value, .. } => Value::Char { value: *value },
        Primitive::Str { value, .. } => Value::String { value: value.clone() },
        Primitive::Bool { value, .. } => Value::Boolean { value: *value },
    }
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Integer { value } => Some(*value as f64),
        Value::Float { value } => Some(*value),
        _ => None,
    }
}

fn parse_input(raw: &str, declared: ValueType) -> Option<Value> {
    match declared {
        ValueType::Integer => raw
            .parse::<i64>()
            .ok()
            .map(|value| Value::Integer { value }),
        ValueType::Float => raw
            .parse::<f64>()
            .ok()
            .map(|value| Value::Float { value }),
        ValueType::Char => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(value), None) => Some(Value::Char { value }),
                _ => None,
            }
        },
        ValueType::Boolean => match raw {
            "TRUE" | "\"TRUE\"" => Some(TRUE),
            "FALSE" | "\"FALSE\"" => Some(FALSE),
            _ => None,
        },
        ValueType::String => Some(Value::String { value: raw.to_string() }),
        ValueType::Null => None,
    }
}
