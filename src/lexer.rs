use crate::error::NjieError;
use crate::position::{Position, SourceFile, Span};
use std::fmt;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Var,
    And,
    Or,
    Not,
}

impl Keyword {
    pub fn lookup(name: &str) -> Option<Keyword> {
        match name {
            "VAR" => Some(Keyword::Var),
            "AND" => Some(Keyword::And),
            "OR" => Some(Keyword::Or),
            "NOT" => Some(Keyword::Not),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Var => "VAR",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Literals
    Int,
    Float,
    Identifier,
    Keyword(Keyword),

    // Single-character tokens
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen,

    // One or two character tokens
    Equal,
    EqualEqual,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Special
    Eof,
}

impl TokenType {
    pub fn symbol(&self) -> &'static str {
        match self {
            TokenType::Int => "INT",
            TokenType::Float => "FLOAT",
            TokenType::Identifier => "IDENTIFIER",
            TokenType::Keyword(keyword) => keyword.as_str(),
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Star => "*",
            TokenType::Slash => "/",
            TokenType::Caret => "^",
            TokenType::LeftParen => "(",
            TokenType::RightParen => ")",
            TokenType::Equal => "=",
            TokenType::EqualEqual => "==",
            TokenType::BangEqual => "!=",
            TokenType::Less => "<",
            TokenType::LessEqual => "<=",
            TokenType::Greater => ">",
            TokenType::GreaterEqual => ">=",
            TokenType::Eof => "EOF",
        }
    }
}

/// Payload of literal and identifier tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Int(i64),
    Float(f64),
    Name(String),
}

#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub value: Option<TokenValue>,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, span: Span) -> Self {
        Self {
            token_type,
            value: None,
            span,
        }
    }

    pub fn with_value(token_type: TokenType, value: TokenValue, span: Span) -> Self {
        Self {
            token_type,
            value: Some(value),
            span,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::Name(name)) => Some(name),
            _ => None,
        }
    }
}

/// Tokens compare by kind and payload only; where they sit in the source
/// does not matter.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.token_type == other.token_type && self.value == other.value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.value {
            Some(TokenValue::Int(n)) => write!(f, "INT:{}", n),
            Some(TokenValue::Float(n)) => write!(f, "FLOAT:{}", n),
            Some(TokenValue::Name(name)) => write!(f, "IDENTIFIER:{}", name),
            None => match self.token_type {
                TokenType::Keyword(keyword) => write!(f, "KEYWORD:{}", keyword.as_str()),
                other => write!(f, "{}", other.symbol()),
            },
        }
    }
}

pub struct Lexer {
    pos: Position,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(source_name: &str, text: &str) -> Self {
        Self {
            pos: Position::start_of(SourceFile::new(source_name, text)),
            tokens: Vec::new(),
        }
    }

    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, NjieError> {
        while let Some(c) = self.peek() {
            self.scan_token(c)?;
        }

        self.tokens
            .push(Token::new(TokenType::Eof, Span::single(self.pos.copy())));

        debug!(
            source = self.pos.source_name(),
            count = self.tokens.len(),
            "scanned tokens"
        );
        Ok(std::mem::take(&mut self.tokens))
    }

    fn scan_token(&mut self, c: char) -> Result<(), NjieError> {
        match c {
            ' ' | '\t' => {
                // Ignore whitespace
                self.advance();
            }
            '+' => self.single(TokenType::Plus),
            '-' => self.single(TokenType::Minus),
            '*' => self.single(TokenType::Star),
            '/' => self.single(TokenType::Slash),
            '^' => self.single(TokenType::Caret),
            '(' => self.single(TokenType::LeftParen),
            ')' => self.single(TokenType::RightParen),
            '!' => self.not_equals()?,
            '=' => self.either_or_equals(TokenType::Equal, TokenType::EqualEqual),
            '<' => self.either_or_equals(TokenType::Less, TokenType::LessEqual),
            '>' => self.either_or_equals(TokenType::Greater, TokenType::GreaterEqual),
            c if c.is_ascii_digit() => self.number()?,
            '.' if self.peek_next().is_some_and(|next| next.is_ascii_digit()) => self.number()?,
            c if c.is_alphabetic() => self.identifier(),
            _ => {
                let start = self.pos.copy();
                self.advance();
                return Err(NjieError::illegal_character(
                    Span::new(start, self.pos.copy()),
                    format!("'{}'", c),
                ));
            }
        }

        Ok(())
    }

    fn peek(&self) -> Option<char> {
        self.pos.current_char()
    }

    fn peek_next(&self) -> Option<char> {
        self.pos.source.char_at(self.pos.index + 1)
    }

    fn advance(&mut self) {
        self.pos.advance();
    }

    fn single(&mut self, token_type: TokenType) {
        let start = self.pos.copy();
        self.advance();
        self.add_token(Token::new(token_type, Span::new(start, self.pos.copy())));
    }

    /// `=`, `<` and `>` each take an optional trailing `=`.
    fn either_or_equals(&mut self, plain: TokenType, with_equals: TokenType) {
        let start = self.pos.copy();
        self.advance();

        let token_type = if self.peek() == Some('=') {
            self.advance();
            with_equals
        } else {
            plain
        };
        self.add_token(Token::new(token_type, Span::new(start, self.pos.copy())));
    }

    fn not_equals(&mut self) -> Result<(), NjieError> {
        let start = self.pos.copy();
        self.advance();

        if self.peek() == Some('=') {
            self.advance();
            self.add_token(Token::new(
                TokenType::BangEqual,
                Span::new(start, self.pos.copy()),
            ));
            return Ok(());
        }

        Err(NjieError::expected_character(
            Span::new(start, self.pos.copy()),
            "'=' (after '!')".to_string(),
        ))
    }

    /// Digits with at most one `.`; a second `.` ends the literal and is left
    /// for the next token.
    fn number(&mut self) -> Result<(), NjieError> {
        let start = self.pos.copy();
        let mut literal = String::new();
        let mut seen_dot = false;

        while let Some(c) = self.peek() {
            if c == '.' {
                if seen_dot {
                    break;
                }
                seen_dot = true;
            } else if !c.is_ascii_digit() {
                break;
            }
            literal.push(c);
            self.advance();
        }

        let span = Span::new(start, self.pos.copy());
        let token = if seen_dot {
            let value = literal.parse::<f64>().map_err(|_| {
                NjieError::invalid_syntax(span.clone(), format!("Invalid float literal {}", literal))
            })?;
            Token::with_value(TokenType::Float, TokenValue::Float(value), span)
        } else {
            let value = literal.parse::<i64>().map_err(|_| {
                NjieError::invalid_syntax(
                    span.clone(),
                    format!("Integer literal {} is out of range", literal),
                )
            })?;
            Token::with_value(TokenType::Int, TokenValue::Int(value), span)
        };

        self.add_token(token);
        Ok(())
    }

    fn identifier(&mut self) {
        let start = self.pos.copy();
        let mut name = String::new();

        while let Some(c) = self.peek().filter(|c| c.is_alphanumeric()) {
            name.push(c);
            self.advance();
        }

        let span = Span::new(start, self.pos.copy());
        let token = match Keyword::lookup(&name) {
            Some(keyword) => Token::new(TokenType::Keyword(keyword), span),
            None => Token::with_value(TokenType::Identifier, TokenValue::Name(name), span),
        };
        self.add_token(token);
    }

    fn add_token(&mut self, token: Token) {
        trace!(token = %token, "token");
        self.tokens.push(token);
    }
}

/// Tokenizes `text`, tagging every position with `source_name`.
pub fn tokenize(source_name: &str, text: &str) -> Result<Vec<Token>, NjieError> {
    Lexer::new(source_name, text).scan_tokens()
}
