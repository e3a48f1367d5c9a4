use crate::position::Position;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type SharedSymbolTable = Rc<RefCell<SymbolTable>>;

/// Variable bindings with an optional enclosing table.
///
/// Lookups fall through to the parent on a miss. Writes always land in this
/// table, so an inner scope shadows an outer binding rather than mutating it.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Value>,
    parent: Option<SharedSymbolTable>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: SharedSymbolTable) -> Self {
        Self {
            symbols: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Global table seeded with `NULL`, `TRUE` and `FALSE`.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        table.set("NULL", Value::Int(0));
        table.set("TRUE", Value::Bool(true));
        table.set("FALSE", Value::Bool(false));
        table
    }

    pub fn shared(self) -> SharedSymbolTable {
        Rc::new(RefCell::new(self))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.symbols.get(name) {
            Some(*value)
        } else if let Some(ref parent) = self.parent {
            parent.borrow().get(name)
        } else {
            None
        }
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.symbols.insert(name.to_string(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.symbols.remove(name)
    }

    /// Whether `name` is bound in this table itself, ignoring parents.
    pub fn contains_local(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }
}

/// One evaluation frame. Frames only point at their caller, which is what
/// the traceback walks.
#[derive(Debug)]
pub struct Context<'a> {
    pub display_name: String,
    pub parent: Option<&'a Context<'a>>,
    pub parent_entry: Option<Position>,
    pub symbol_table: SharedSymbolTable,
}

impl<'a> Context<'a> {
    pub fn new(display_name: &str, symbol_table: SharedSymbolTable) -> Self {
        Self {
            display_name: display_name.to_string(),
            parent: None,
            parent_entry: None,
            symbol_table,
        }
    }

    /// A frame entered from `parent` at `entry`.
    pub fn child(
        display_name: &str,
        parent: &'a Context<'a>,
        entry: Position,
        symbol_table: SharedSymbolTable,
    ) -> Self {
        Self {
            display_name: display_name.to_string(),
            parent: Some(parent),
            parent_entry: Some(entry),
            symbol_table,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.symbol_table.borrow().get(name)
    }

    pub fn assign(&self, name: &str, value: Value) {
        self.symbol_table.borrow_mut().set(name, value);
    }
}
