use std::fmt;
use std::rc::Rc;

/// A named piece of source text shared by every position that points into it.
#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
    chars: Vec<char>,
}

impl SourceFile {
    pub fn new(name: &str, text: &str) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            text: text.to_string(),
            chars: text.chars().collect(),
        })
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Returns the text of the given zero-based line, without its newline.
    pub fn line_text(&self, line: usize) -> &str {
        self.text.split('\n').nth(line).unwrap_or("")
    }

    /// Zero-based line containing `index`.
    pub fn line_of(&self, index: usize) -> usize {
        let index = index.min(self.chars.len());
        self.chars[..index].iter().filter(|&&c| c == '\n').count()
    }

    /// Index of the first character of the line containing `index`.
    pub fn line_start(&self, index: usize) -> usize {
        let index = index.min(self.chars.len());
        self.chars[..index]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |newline| newline + 1)
    }
}

/// Cursor into a [`SourceFile`]. `index` counts code points, `line` and
/// `column` are zero-based.
#[derive(Clone)]
pub struct Position {
    pub index: usize,
    pub line: usize,
    pub column: usize,
    pub source: Rc<SourceFile>,
}

impl Position {
    pub fn start_of(source: Rc<SourceFile>) -> Self {
        Self {
            index: 0,
            line: 0,
            column: 0,
            source,
        }
    }

    /// Moves one code point forward. Landing on a newline resets the column
    /// and bumps the line, so the newline itself sits at column 0.
    pub fn advance(&mut self) {
        self.index += 1;
        self.column += 1;

        if self.source.char_at(self.index) == Some('\n') {
            self.column = 0;
            self.line += 1;
        }
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn current_char(&self) -> Option<char> {
        self.source.char_at(self.index)
    }

    pub fn source_name(&self) -> &str {
        &self.source.name
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} (#{})",
            self.source.name,
            self.line + 1,
            self.column,
            self.index
        )
    }
}

/// A half-open `[start, end)` range of source text.
#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span covering exactly the character under `start`.
    pub fn single(start: Position) -> Self {
        let mut end = start.copy();
        end.advance();
        Self { start, end }
    }

    pub fn to(&self, other: &Span) -> Span {
        Span::new(self.start.copy(), other.end.copy())
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start.index..self.end.index.max(self.start.index)
    }

    pub fn text(&self) -> String {
        self.source()
            .text
            .chars()
            .skip(self.start.index)
            .take(self.end.index.saturating_sub(self.start.index))
            .collect()
    }

    pub fn source(&self) -> &SourceFile {
        &self.start.source
    }
}
