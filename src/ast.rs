use crate::lexer::{Token, TokenType, TokenValue};
use crate::position::Span;
use std::fmt;

/// Expression tree produced by the parser. Operator nodes keep the token
/// they were built from so evaluation can dispatch on it.
#[derive(Debug, Clone)]
pub enum Expr {
    Number {
        token: Token,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    VarAccess {
        name: Token,
    },
    VarAssign {
        name: Token,
        value: Box<Expr>,
    },
}

impl Expr {
    /// From the leftmost token or child to the rightmost one.
    pub fn span(&self) -> Span {
        match self {
            Expr::Number { token } => token.span.clone(),
            Expr::Binary { left, right, .. } => left.span().to(&right.span()),
            Expr::Unary { operator, operand } => operator.span.to(&operand.span()),
            Expr::VarAccess { name } => name.span.clone(),
            Expr::VarAssign { name, value } => name.span.to(&value.span()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Identity,
    Negate,
    Not,
}

fn name_of(token: &Token) -> &str {
    token.name().unwrap_or("?")
}

/// Fully parenthesized rendering, so precedence is visible at a glance.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Number { token } => match &token.value {
                Some(TokenValue::Int(n)) => write!(f, "{}", n),
                Some(TokenValue::Float(n)) => write!(f, "{:?}", n),
                _ => write!(f, "{}", token),
            },
            Expr::Binary {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator.token_type.symbol(), right),
            Expr::Unary { operator, operand } => match operator.token_type {
                TokenType::Keyword(_) => write!(f, "({} {})", operator.token_type.symbol(), operand),
                _ => write!(f, "({}{})", operator.token_type.symbol(), operand),
            },
            Expr::VarAccess { name } => write!(f, "{}", name_of(name)),
            Expr::VarAssign { name, value } => write!(f, "(VAR {} = {})", name_of(name), value),
        }
    }
}
