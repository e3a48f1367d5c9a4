use std::fmt;
use thiserror::Error;

/// Runtime value. `Bool` is the boolean-flavored integer: it behaves as 1 or
/// 0 in arithmetic and counts as an integer for result typing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Which side of an operator a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("'{operator}' expects a boolean operand")]
    NotBoolean {
        operator: &'static str,
        operand: Operand,
    },
}

impl Value {
    pub fn magnitude(&self) -> f64 {
        match self {
            Value::Int(n) => *n as f64,
            Value::Float(n) => *n,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self, Value::Float(_))
    }

    pub fn is_truthy(&self) -> bool {
        self.magnitude() != 0.0
    }

    /// Applies `op` on the float pathway and re-tags the result as an
    /// integer only when both operands were integers.
    fn arithmetic(&self, other: &Value, op: impl Fn(f64, f64) -> f64) -> Value {
        let result = op(self.magnitude(), other.magnitude());
        if self.is_integer() && other.is_integer() {
            Value::Int(result as i64)
        } else {
            Value::Float(result)
        }
    }

    fn compare(&self, other: &Value, predicate: impl Fn(f64, f64) -> bool) -> Value {
        Value::Bool(predicate(self.magnitude(), other.magnitude()))
    }

    pub fn plus(&self, other: &Value) -> Value {
        self.arithmetic(other, |x, y| x + y)
    }

    pub fn minus(&self, other: &Value) -> Value {
        self.arithmetic(other, |x, y| x - y)
    }

    pub fn times(&self, other: &Value) -> Value {
        self.arithmetic(other, |x, y| x * y)
    }

    pub fn divided_by(&self, other: &Value) -> Result<Value, OperationError> {
        if other.magnitude() == 0.0 {
            return Err(OperationError::DivisionByZero);
        }
        Ok(self.arithmetic(other, |x, y| x / y))
    }

    pub fn power(&self, other: &Value) -> Value {
        self.arithmetic(other, f64::powf)
    }

    pub fn equals(&self, other: &Value) -> Value {
        self.compare(other, |x, y| x == y)
    }

    pub fn not_equals(&self, other: &Value) -> Value {
        self.compare(other, |x, y| x != y)
    }

    pub fn less_than(&self, other: &Value) -> Value {
        self.compare(other, |x, y| x < y)
    }

    pub fn less_equal(&self, other: &Value) -> Value {
        self.compare(other, |x, y| x <= y)
    }

    pub fn greater_than(&self, other: &Value) -> Value {
        self.compare(other, |x, y| x > y)
    }

    pub fn greater_equal(&self, other: &Value) -> Value {
        self.compare(other, |x, y| x >= y)
    }

    fn logic(
        &self,
        other: &Value,
        operator: &'static str,
        op: impl Fn(bool, bool) -> bool,
    ) -> Result<Value, OperationError> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(op(*a, *b))),
            (Value::Bool(_), _) => Err(OperationError::NotBoolean {
                operator,
                operand: Operand::Right,
            }),
            _ => Err(OperationError::NotBoolean {
                operator,
                operand: Operand::Left,
            }),
        }
    }

    pub fn and(&self, other: &Value) -> Result<Value, OperationError> {
        self.logic(other, "AND", |a, b| a && b)
    }

    pub fn or(&self, other: &Value) -> Result<Value, OperationError> {
        self.logic(other, "OR", |a, b| a || b)
    }

    /// Arithmetic negation. A boolean negates as the integer it stands for.
    pub fn negated(&self) -> Value {
        match self {
            Value::Int(n) => Value::Int(n.wrapping_neg()),
            Value::Float(n) => Value::Float(-n),
            Value::Bool(b) => Value::Int(-(*b as i64)),
        }
    }

    pub fn inverted(&self) -> Result<Value, OperationError> {
        match self {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            _ => Err(OperationError::NotBoolean {
                operator: "NOT",
                operand: Operand::Right,
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => {
                // Always show at least one decimal place for floats
                if n.fract() == 0.0 {
                    write!(f, "{:.1}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Bool(true) => write!(f, "TRUE"),
            Value::Bool(false) => write!(f, "FALSE"),
        }
    }
}
