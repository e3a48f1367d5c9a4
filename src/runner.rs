use crate::ast::Expr;
use crate::context::{Context, SharedSymbolTable, SymbolTable};
use crate::error::NjieError;
use crate::evaluator::evaluate;
use crate::lexer::{tokenize, Token};
use crate::parser::parse;
use crate::value::Value;
use tracing::debug;

/// Display name of the top-level frame.
pub const PROGRAM_FRAME: &str = "<program>";

/// An interpreter session. Variables assigned on one line stay visible to
/// every later line run through the same session.
pub struct Interpreter {
    source_name: String,
    globals: SharedSymbolTable,
}

impl Interpreter {
    pub fn new(source_name: &str) -> Self {
        Self {
            source_name: source_name.to_string(),
            globals: SymbolTable::with_builtins().shared(),
        }
    }

    pub fn globals(&self) -> &SharedSymbolTable {
        &self.globals
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, NjieError> {
        tokenize(&self.source_name, text)
    }

    pub fn parse(&self, text: &str) -> Result<Expr, NjieError> {
        parse(self.tokenize(text)?)
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<Value, NjieError> {
        let context = Context::new(PROGRAM_FRAME, self.globals.clone());
        evaluate(expr, &context)
    }

    /// Lexes, parses and evaluates one line. Assignments land in the shared
    /// global table, so a shared borrow of the session is enough.
    pub fn run(&self, text: &str) -> Result<Value, NjieError> {
        let expr = self.parse(text)?;
        let value = self.evaluate(&expr)?;
        debug!(source = %self.source_name, %value, "evaluated line");
        Ok(value)
    }
}
