use crate::ast::Expr;
use crate::error::NjieError;
use crate::lexer::{Keyword, Token, TokenType};
use crate::position::{Position, SourceFile, Span};
use tracing::debug;

const LOGICAL_OPERATORS: &[TokenType] = &[
    TokenType::Keyword(Keyword::And),
    TokenType::Keyword(Keyword::Or),
];

const COMPARISON_OPERATORS: &[TokenType] = &[
    TokenType::EqualEqual,
    TokenType::BangEqual,
    TokenType::Less,
    TokenType::Greater,
    TokenType::LessEqual,
    TokenType::GreaterEqual,
];

const ADDITIVE_OPERATORS: &[TokenType] = &[TokenType::Plus, TokenType::Minus];

const MULTIPLICATIVE_OPERATORS: &[TokenType] = &[TokenType::Star, TokenType::Slash];

const POWER_OPERATORS: &[TokenType] = &[TokenType::Caret];

type Rule = fn(&mut Parser) -> Result<Expr, NjieError>;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// A stream missing its end-of-input marker gets one appended, so an
    /// empty stream parses to an "expected expression" error.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let eof_span = match tokens.last() {
            None => Some(Span::single(Position::start_of(SourceFile::new("<empty>", "")))),
            Some(last) if last.token_type == TokenType::Eof => None,
            Some(last) => Some(Span::single(last.span.end.copy())),
        };
        if let Some(span) = eof_span {
            tokens.push(Token::new(TokenType::Eof, span));
        }

        Self { tokens, current: 0 }
    }

    /// Parses a whole line; the expression must be followed by end of input.
    pub fn parse(&mut self) -> Result<Expr, NjieError> {
        let expr = self.expression()?;

        if !self.is_at_end() {
            return Err(NjieError::invalid_syntax(
                self.peek().span.clone(),
                "Expected '+', '-', '*', '/', '^', '==', '!=', '<', '>', '<=', '>=', 'AND' or 'OR'"
                    .to_string(),
            ));
        }

        debug!(ast = %expr, "parsed expression");
        Ok(expr)
    }

    fn expression(&mut self) -> Result<Expr, NjieError> {
        let entry = self.current;

        if self.match_type(TokenType::Keyword(Keyword::Var)) {
            let name = self.consume(TokenType::Identifier, "Expected identifier")?;
            self.consume(TokenType::Equal, "Expected '='")?;
            let value = self.expression()?;

            return Ok(Expr::VarAssign {
                name,
                value: Box::new(value),
            });
        }

        self.binary_operation(Self::comparison, LOGICAL_OPERATORS, Self::comparison)
            .map_err(|error| {
                self.unless_advanced(
                    entry,
                    error,
                    "Expected 'VAR', INT, FLOAT, IDENTIFIER, '+', '-', '(' or 'NOT'",
                )
            })
    }

    fn comparison(&mut self) -> Result<Expr, NjieError> {
        let entry = self.current;

        if self.check(TokenType::Keyword(Keyword::Not)) {
            let operator = self.advance().clone();
            let operand = self.comparison()?;

            return Ok(Expr::Unary {
                operator,
                operand: Box::new(operand),
            });
        }

        self.binary_operation(Self::arithmetic, COMPARISON_OPERATORS, Self::arithmetic)
            .map_err(|error| {
                self.unless_advanced(
                    entry,
                    error,
                    "Expected INT, FLOAT, IDENTIFIER, '+', '-', '(' or 'NOT'",
                )
            })
    }

    fn arithmetic(&mut self) -> Result<Expr, NjieError> {
        self.binary_operation(Self::term, ADDITIVE_OPERATORS, Self::term)
    }

    fn term(&mut self) -> Result<Expr, NjieError> {
        self.binary_operation(Self::factor, MULTIPLICATIVE_OPERATORS, Self::factor)
    }

    fn factor(&mut self) -> Result<Expr, NjieError> {
        if self.check(TokenType::Plus) || self.check(TokenType::Minus) {
            let operator = self.advance().clone();
            let operand = self.factor()?;

            return Ok(Expr::Unary {
                operator,
                operand: Box::new(operand),
            });
        }

        self.power()
    }

    /// The exponent goes through `factor`, which makes `^` right-associative
    /// and allows a sign straight after it.
    fn power(&mut self) -> Result<Expr, NjieError> {
        self.binary_operation(Self::atom, POWER_OPERATORS, Self::factor)
    }

    fn atom(&mut self) -> Result<Expr, NjieError> {
        let token = self.peek().clone();

        match token.token_type {
            TokenType::Int | TokenType::Float => {
                self.advance();
                Ok(Expr::Number { token })
            }
            TokenType::Identifier => {
                self.advance();
                Ok(Expr::VarAccess { name: token })
            }
            TokenType::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(TokenType::RightParen, "Expected ')'")?;
                Ok(expr)
            }
            _ => Err(NjieError::invalid_syntax(
                token.span,
                "Expected INT, FLOAT, IDENTIFIER, '+', '-' or '('".to_string(),
            )),
        }
    }

    /// `left (op right)*`, folded to the left.
    fn binary_operation(
        &mut self,
        left: Rule,
        operators: &[TokenType],
        right: Rule,
    ) -> Result<Expr, NjieError> {
        let mut expr = left(self)?;

        while operators.contains(&self.peek().token_type) {
            let operator = self.advance().clone();
            let rhs = right(self)?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(rhs),
            };
        }

        Ok(expr)
    }

    /// Keeps a deeper error once tokens were consumed past `entry`; otherwise
    /// replaces it with the rule's own list of what could have started it.
    fn unless_advanced(&self, entry: usize, error: NjieError, expected: &str) -> NjieError {
        if self.current != entry {
            error
        } else {
            NjieError::invalid_syntax(self.peek().span.clone(), expected.to_string())
        }
    }

    fn match_type(&mut self, token_type: TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.peek().token_type == token_type
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::Eof
    }

    /// The current token; past the end this keeps returning the last one.
    fn peek(&self) -> &Token {
        let index = self.current.min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> Result<Token, NjieError> {
        if self.check(token_type) {
            Ok(self.advance().clone())
        } else {
            Err(NjieError::invalid_syntax(
                self.peek().span.clone(),
                message.to_string(),
            ))
        }
    }
}

/// Parses a token stream produced by [`crate::lexer::tokenize`].
pub fn parse(tokens: Vec<Token>) -> Result<Expr, NjieError> {
    Parser::new(tokens).parse()
}
