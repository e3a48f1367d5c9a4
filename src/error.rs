use crate::context::Context;
use crate::position::{Position, Span};
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    DivisionByZero,
    UndefinedVariable,
    /// An operator applied to a value it has no meaning for, such as
    /// `NOT` on a plain number.
    IllegalOperation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IllegalCharacter,
    ExpectedCharacter,
    InvalidSyntax,
    Runtime(RuntimeErrorKind),
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::IllegalCharacter => "Illegal Character",
            ErrorKind::ExpectedCharacter => "Expected Character",
            ErrorKind::InvalidSyntax => "Invalid Syntax",
            ErrorKind::Runtime(_) => "Runtime Error",
        }
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, ErrorKind::Runtime(_))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One line of a runtime traceback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub file: String,
    /// One-based line number.
    pub line: usize,
    pub name: String,
}

#[derive(Debug, Clone, Error)]
#[error("{kind}: {details}")]
pub struct NjieError {
    pub kind: ErrorKind,
    pub details: String,
    pub span: Span,
    /// Outermost frame first. Empty for lexical and syntax errors.
    pub traceback: Vec<Frame>,
}

impl NjieError {
    pub fn new(kind: ErrorKind, span: Span, details: String) -> Self {
        Self {
            kind,
            details,
            span,
            traceback: Vec::new(),
        }
    }

    pub fn illegal_character(span: Span, details: String) -> Self {
        Self::new(ErrorKind::IllegalCharacter, span, details)
    }

    pub fn expected_character(span: Span, details: String) -> Self {
        Self::new(ErrorKind::ExpectedCharacter, span, details)
    }

    pub fn invalid_syntax(span: Span, details: String) -> Self {
        Self::new(ErrorKind::InvalidSyntax, span, details)
    }

    /// Builds a runtime error and captures the traceback of `context`.
    pub fn runtime(kind: RuntimeErrorKind, span: Span, details: String, context: &Context) -> Self {
        let traceback = traceback(&span.start, context);
        Self {
            kind: ErrorKind::Runtime(kind),
            details,
            span,
            traceback,
        }
    }

    pub fn runtime_kind(&self) -> Option<RuntimeErrorKind> {
        match self.kind {
            ErrorKind::Runtime(kind) => Some(kind),
            _ => None,
        }
    }

    /// Plain-text report: traceback (runtime only), header, locator and the
    /// offending source underlined with carets.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.kind.is_runtime() {
            out.push_str("Traceback (most recent call last):\n");
            for frame in &self.traceback {
                out.push_str(&format!(
                    "  File {}, line {}, in {}\n",
                    frame.file, frame.line, frame.name
                ));
            }
            out.push_str(&format!("{}\n", self));
        } else {
            out.push_str(&format!("{}\n", self));
            out.push_str(&format!(
                "File {}, line {}\n",
                self.span.start.source_name(),
                self.span.start.line + 1
            ));
        }

        out.push('\n');
        out.push_str(&underline(&self.span));
        out
    }

    pub fn report(&self) -> std::io::Result<()> {
        let source = self.span.source();
        let filename = source.name.as_str();

        let color = match self.kind {
            ErrorKind::IllegalCharacter | ErrorKind::ExpectedCharacter => Color::Red,
            ErrorKind::InvalidSyntax => Color::Yellow,
            ErrorKind::Runtime(_) => Color::Magenta,
        };

        let mut report_builder = Report::build(ReportKind::Error, filename, self.span.start.index)
            .with_message(format!("{}: {}", self.kind.name().fg(color), self.details))
            .with_label(
                Label::new((filename, self.span.range()))
                    .with_message(&self.details)
                    .with_color(color),
            );

        if !self.traceback.is_empty() {
            let frames: Vec<String> = self
                .traceback
                .iter()
                .map(|frame| format!("{} (line {})", frame.name, frame.line))
                .collect();
            report_builder = report_builder.with_note(format!(
                "{}: {}",
                "traceback".fg(Color::Cyan),
                frames.join(" -> ")
            ));
        }

        report_builder
            .finish()
            .eprint((filename, Source::from(source.text.as_str())))
    }
}

/// Walks from the innermost context outwards, switching to each frame's
/// entry position as it goes.
fn traceback(start: &Position, context: &Context) -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut position = Some(start.copy());
    let mut current = Some(context);

    while let (Some(pos), Some(ctx)) = (position, current) {
        frames.push(Frame {
            file: pos.source_name().to_string(),
            line: pos.line + 1,
            name: ctx.display_name.clone(),
        });
        position = ctx.parent_entry.clone();
        current = ctx.parent;
    }

    frames.reverse();
    frames
}

/// Re-slices every source line the span touches and puts carets under the
/// covered columns. Tabs are dropped from the echoed line, so caret columns
/// skip them as well.
fn underline(span: &Span) -> String {
    let source = span.source();
    let start = span.start.index;
    let last = span.end.index.saturating_sub(1).max(start);
    let first_line = source.line_of(start);
    let last_line = source.line_of(last);
    let mut out = String::new();

    for line in first_line..=last_line {
        let text = source.line_text(line);
        let width = text.chars().count();

        let col_start = if line == first_line {
            start - source.line_start(start)
        } else {
            0
        };
        let col_end = if line == last_line {
            span.end.index.saturating_sub(source.line_start(last))
        } else {
            width
        };
        let col_start = col_start - tabs_before(text, col_start);
        let col_end = col_end - tabs_before(text, col_end);
        let carets = col_end.saturating_sub(col_start).max(1);

        out.extend(text.chars().filter(|c| *c != '\t'));
        out.push('\n');
        out.push_str(&" ".repeat(col_start));
        out.push_str(&"^".repeat(carets));
        out.push('\n');
    }

    out
}

fn tabs_before(text: &str, column: usize) -> usize {
    text.chars().take(column).filter(|c| *c == '\t').count()
}
