//! Core token types shared by the tokenizer, the parser and tooling.
//!
//! A token is the raw text matched by one of the tokenizer patterns, the byte offset at
//! which it was matched and its kind. Tokens are created fresh for every match and never
//! mutated afterwards.

use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

/// All token kinds the cisto tokenizer can produce.
///
/// The declaration order of the first twelve variants is the tokenizer priority order
/// (see [`crate::cisto::lexing`]). `StringContents` is only ever produced by the
/// quoted-string routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    NewLine,
    Indent,
    Comment,
    MultilineCommentStart,
    MultilineCommentEnd,
    AttributeName,
    Name,
    InstantClass,
    InstantId,
    Value,
    StringLimiter,
    StringContents,
    Content,
}

impl TokenKind {
    /// Name used in diagnostics, e.g. `Unexpected instantClass`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::NewLine => "newLine",
            TokenKind::Indent => "indent",
            TokenKind::Comment => "comment",
            TokenKind::MultilineCommentStart => "multilineCommentStart",
            TokenKind::MultilineCommentEnd => "multilineCommentEnd",
            TokenKind::AttributeName => "attributeName",
            TokenKind::Name => "name",
            TokenKind::InstantClass => "instantClass",
            TokenKind::InstantId => "instantId",
            TokenKind::Value => "value",
            TokenKind::StringLimiter => "stringLimiter",
            TokenKind::StringContents => "stringContents",
            TokenKind::Content => "content",
        }
    }

    /// Tokens that only carry layout and never contribute to a node.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Indent | TokenKind::Comment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lexical unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    kind: TokenKind,
    text: String,
    offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// The raw matched text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Absolute byte offset of the first matched character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte offset just past the token; the cursor position after consuming it.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn span(&self) -> ByteRange<usize> {
        self.offset..self.end()
    }

    /// Number of characters matched, used as the underline width in diagnostics.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{} '{}'",
            self.kind,
            self.offset,
            self.text.replace('\n', "\\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_and_lengths() {
        let token = Token::new(TokenKind::Content, "í ok", 4);
        assert_eq!(token.span(), 4..9);
        assert_eq!(token.char_len(), 4);
        assert!(token.is(TokenKind::Content));
    }

    #[test]
    fn test_display_escapes_newlines() {
        let token = Token::new(TokenKind::StringContents, "a\nb", 0);
        assert_eq!(token.to_string(), "stringContents@0 'a\\nb'");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TokenKind::InstantClass.to_string(), "instantClass");
        assert_eq!(TokenKind::NewLine.as_str(), "newLine");
        assert!(TokenKind::Comment.is_trivia());
        assert!(!TokenKind::Name.is_trivia());
    }
}
