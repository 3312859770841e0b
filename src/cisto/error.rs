//! Parse errors and source-position reporting
//!
//! A [ParseError] stores only what is cheap to capture at the failure site: the source,
//! a kind, a message, a byte offset and an underline length in characters. Line, column
//! and the offending source line are derived when asked for.
//!
//! The pretty form is the canonical way failures are shown to template authors and its
//! layout is fixed:
//!
//! ```text
//! Parse error at 2:5
//! 2 |     img src=
//!           ^
//!           Unexpected multilineCommentEnd
//! ```
//!
//! The caret line is indented by the width of the `LINE | ` prefix plus `column - 1`, so
//! carets sit exactly under the offending characters. Tabs in the echoed line are shown
//! as single spaces for the same reason.

use crate::cisto::token::Token;
use std::fmt;
use std::sync::Arc;

/// Broad classification of parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// No token pattern matches at the cursor.
    Lex,
    /// The indentation of a line cannot be placed in the tree.
    Structural,
    /// A token is not acceptable in the current parser state.
    Grammar,
}

/// The specific reason a parse failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownInput,
    InconsistentIndentation,
    /// A dedent that lands on no open depth; carries the offending depth.
    UnknownIndentation(usize),
    UnexpectedToken,
    MalformedAttributeName,
    UnterminatedString,
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::UnknownInput => ErrorCategory::Lex,
            ErrorKind::InconsistentIndentation | ErrorKind::UnknownIndentation(_) => {
                ErrorCategory::Structural
            }
            ErrorKind::UnexpectedToken
            | ErrorKind::MalformedAttributeName
            | ErrorKind::UnterminatedString => ErrorCategory::Grammar,
        }
    }
}

/// A line/column pair, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Read-only view of a source text that answers position queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    text: Arc<str>,
}

impl Source {
    pub fn new(text: &str) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Line and column of a byte offset.
    ///
    /// The line is one plus the number of line feeds strictly before `offset`; the
    /// column counts characters from the start of that line, starting at 1.
    pub fn location(&self, offset: usize) -> Location {
        let before = self.prefix(offset);
        let line = 1 + before.matches('\n').count();
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = 1 + before[line_start..].chars().count();
        Location::new(line, column)
    }

    /// The full physical line containing `offset`, without its line feed.
    pub fn code(&self, offset: usize) -> &str {
        let before = self.prefix(offset);
        let from = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let to = self.text[before.len()..]
            .find('\n')
            .map(|i| before.len() + i)
            .unwrap_or(self.text.len());
        &self.text[from..to]
    }

    /// Text before `offset`, clamped to the source and to a character boundary.
    fn prefix(&self, offset: usize) -> &str {
        let mut end = offset.min(self.text.len());
        while !self.text.is_char_boundary(end) {
            end -= 1;
        }
        &self.text[..end]
    }
}

/// A fatal parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    source: Source,
    kind: ErrorKind,
    message: String,
    offset: usize,
    length: usize,
}

impl ParseError {
    pub fn new(source: &Source, kind: ErrorKind, message: impl Into<String>, offset: usize) -> Self {
        Self {
            source: source.clone(),
            kind,
            message: message.into(),
            offset,
            length: 1,
        }
    }

    /// An error underlining the whole of `token`.
    pub fn at_token(
        source: &Source,
        kind: ErrorKind,
        message: impl Into<String>,
        token: &Token,
    ) -> Self {
        Self::new(source, kind, message, token.offset()).with_length(token.char_len())
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length.max(1);
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset of the failure in the source.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of characters to underline.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn source_text(&self) -> &str {
        self.source.text()
    }

    pub fn location(&self) -> Location {
        self.source.location(self.offset)
    }

    pub fn line(&self) -> usize {
        self.location().line
    }

    pub fn column(&self) -> usize {
        self.location().column
    }

    /// The source line the error points into.
    pub fn code(&self) -> &str {
        self.source.code(self.offset)
    }

    /// Multi-line diagnostic with the source line and a caret underline.
    pub fn to_pretty_string(&self) -> String {
        let location = self.location();
        let code = self.code().replace('\t', " ");
        let code_line = format!("{} | ", location.line);
        let indent = " ".repeat(code_line.chars().count() + location.column - 1);

        [
            format!("Parse error at {}", location),
            format!("{code_line}{code}"),
            format!("{indent}{}", "^".repeat(self.length)),
            format!("{indent}{}", self.message),
            String::new(),
        ]
        .join("\n")
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pretty_string())
    }
}

impl std::error::Error for ParseError {}

/// Type alias for parser results.
pub type ParseResult<T> = Result<T, ParseError>;
