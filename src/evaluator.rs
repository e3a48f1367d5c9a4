use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::context::Context;
use crate::error::{NjieError, RuntimeErrorKind};
use crate::lexer::{Keyword, Token, TokenType, TokenValue};
use crate::position::Span;
use crate::value::{Operand, OperationError, Value};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::{debug, trace};

static BINARY_OPERATORS: Lazy<HashMap<TokenType, BinaryOp>> = Lazy::new(|| {
    HashMap::from([
        (TokenType::Plus, BinaryOp::Add),
        (TokenType::Minus, BinaryOp::Subtract),
        (TokenType::Star, BinaryOp::Multiply),
        (TokenType::Slash, BinaryOp::Divide),
        (TokenType::Caret, BinaryOp::Power),
        (TokenType::EqualEqual, BinaryOp::Equal),
        (TokenType::BangEqual, BinaryOp::NotEqual),
        (TokenType::Less, BinaryOp::Less),
        (TokenType::LessEqual, BinaryOp::LessEqual),
        (TokenType::Greater, BinaryOp::Greater),
        (TokenType::GreaterEqual, BinaryOp::GreaterEqual),
        (TokenType::Keyword(Keyword::And), BinaryOp::And),
        (TokenType::Keyword(Keyword::Or), BinaryOp::Or),
    ])
});

static UNARY_OPERATORS: Lazy<HashMap<TokenType, UnaryOp>> = Lazy::new(|| {
    HashMap::from([
        (TokenType::Plus, UnaryOp::Identity),
        (TokenType::Minus, UnaryOp::Negate),
        (TokenType::Keyword(Keyword::Not), UnaryOp::Not),
    ])
});

impl BinaryOp {
    pub fn for_token(token_type: TokenType) -> Option<BinaryOp> {
        BINARY_OPERATORS.get(&token_type).copied()
    }

    pub fn apply(self, left: &Value, right: &Value) -> Result<Value, OperationError> {
        match self {
            BinaryOp::Add => Ok(left.plus(right)),
            BinaryOp::Subtract => Ok(left.minus(right)),
            BinaryOp::Multiply => Ok(left.times(right)),
            BinaryOp::Divide => left.divided_by(right),
            BinaryOp::Power => Ok(left.power(right)),
            BinaryOp::Equal => Ok(left.equals(right)),
            BinaryOp::NotEqual => Ok(left.not_equals(right)),
            BinaryOp::Less => Ok(left.less_than(right)),
            BinaryOp::LessEqual => Ok(left.less_equal(right)),
            BinaryOp::Greater => Ok(left.greater_than(right)),
            BinaryOp::GreaterEqual => Ok(left.greater_equal(right)),
            BinaryOp::And => left.and(right),
            BinaryOp::Or => left.or(right),
        }
    }
}

impl UnaryOp {
    pub fn for_token(token_type: TokenType) -> Option<UnaryOp> {
        UNARY_OPERATORS.get(&token_type).copied()
    }

    pub fn apply(self, operand: &Value) -> Result<Value, OperationError> {
        match self {
            UnaryOp::Identity => Ok(*operand),
            UnaryOp::Negate => Ok(operand.negated()),
            UnaryOp::Not => operand.inverted(),
        }
    }
}

impl Expr {
    /// Evaluates this node in `context`. Children are evaluated left to right
    /// and the first failure aborts the walk.
    pub fn evaluate(&self, context: &Context) -> Result<Value, NjieError> {
        match self {
            Expr::Number { token } => literal(token, context),
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left_val = left.evaluate(context)?;
                let right_val = right.evaluate(context)?;
                let op = BinaryOp::for_token(operator.token_type)
                    .ok_or_else(|| unknown_operator(operator, context))?;

                op.apply(&left_val, &right_val).map_err(|error| {
                    let span = match error {
                        OperationError::DivisionByZero => right.span(),
                        OperationError::NotBoolean {
                            operand: Operand::Left,
                            ..
                        } => left.span(),
                        OperationError::NotBoolean {
                            operand: Operand::Right,
                            ..
                        } => right.span(),
                    };
                    operation_error(error, span, context)
                })
            }
            Expr::Unary { operator, operand } => {
                let value = operand.evaluate(context)?;
                let op = UnaryOp::for_token(operator.token_type)
                    .ok_or_else(|| unknown_operator(operator, context))?;

                op.apply(&value)
                    .map_err(|error| operation_error(error, operand.span(), context))
            }
            Expr::VarAccess { name } => {
                let var_name = name.name().unwrap_or_default();
                trace!(name = var_name, "variable read");

                context.lookup(var_name).ok_or_else(|| {
                    NjieError::runtime(
                        RuntimeErrorKind::UndefinedVariable,
                        name.span.clone(),
                        format!("'{}' is not defined", var_name),
                        context,
                    )
                })
            }
            Expr::VarAssign { name, value } => {
                let var_name = name.name().unwrap_or_default();
                let val = value.evaluate(context)?;

                debug!(name = var_name, value = %val, "assign");
                context.assign(var_name, val);
                Ok(val)
            }
        }
    }
}

fn literal(token: &Token, context: &Context) -> Result<Value, NjieError> {
    match token.value {
        Some(TokenValue::Int(n)) => Ok(Value::Int(n)),
        Some(TokenValue::Float(n)) => Ok(Value::Float(n)),
        _ => Err(NjieError::runtime(
            RuntimeErrorKind::IllegalOperation,
            token.span.clone(),
            format!("'{}' is not a number", token),
            context,
        )),
    }
}

fn unknown_operator(operator: &Token, context: &Context) -> NjieError {
    NjieError::runtime(
        RuntimeErrorKind::IllegalOperation,
        operator.span.clone(),
        format!("Unknown operator '{}'", operator.token_type.symbol()),
        context,
    )
}

fn operation_error(error: OperationError, span: Span, context: &Context) -> NjieError {
    let kind = match error {
        OperationError::DivisionByZero => RuntimeErrorKind::DivisionByZero,
        OperationError::NotBoolean { .. } => RuntimeErrorKind::IllegalOperation,
    };
    NjieError::runtime(kind, span, error.to_string(), context)
}

/// Evaluates a parsed tree against `context`.
pub fn evaluate(node: &Expr, context: &Context) -> Result<Value, NjieError> {
    node.evaluate(context)
}
