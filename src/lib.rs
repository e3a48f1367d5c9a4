// njie Language Interpreter Library
//
// Core of a small line-oriented interpreter for arithmetic and boolean
// expressions with named variables, with positioned error reporting.

// Public modules
pub mod ast;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use ast::{BinaryOp, Expr, UnaryOp};
pub use context::{Context, SymbolTable};
pub use error::{ErrorKind, NjieError, RuntimeErrorKind};
pub use lexer::{Keyword, Lexer, Token, TokenType, TokenValue};
pub use parser::Parser;
pub use position::{Position, Span};
pub use runner::Interpreter;
pub use value::Value;

// Re-export the pipeline entry points
pub use evaluator::evaluate;
pub use lexer::tokenize;
pub use parser::parse;
pub use repl::start as start_repl;
