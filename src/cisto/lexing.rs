//! Tokenizer
//!
//! The tokenizer never runs ahead of the parser: it is asked for exactly one token at the
//! parser's cursor and answers with the first pattern that matches there.
//!
//! Priority, not longest match
//!
//!     Several character classes overlap on purpose. A run of letters is a valid `Name`
//!     and a valid `Value`, and almost anything is valid free-form `Content`. The patterns
//!     in [TOKEN_PATTERNS] are tried in declaration order and the first one that matches a
//!     non-empty span anchored at the cursor wins, so `Name` always shadows `Value` and
//!     `Content` only picks up what nothing else wants.
//!
//! Modes
//!
//!     `Content` is a catch-all for the rest of a line, so it is only offered while the
//!     parser is capturing free-form text ([LexMode::FreeText]). On descriptor lines
//!     ([LexMode::Descriptor]) a character outside every descriptor class is unknown input.
//!     Inside a block comment ([LexMode::Comment]) only line feeds, the closing marker and
//!     an opaque comment body are recognised, so nothing can swallow the `*/`.
//!
//! `StringContents` is not part of the priority list at all: it can match an empty span
//! and is requested explicitly by the quoted-string routine through [match_kind].

use crate::cisto::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Token patterns in priority order.
///
/// Each entry is a (kind, pattern) pair. Patterns are compiled anchored at the cursor.
/// Letters are matched case-insensitively through explicit `[a-zA-Z]` classes.
pub(crate) const TOKEN_PATTERNS: &[(TokenKind, &str)] = &[
    (TokenKind::NewLine, r"\n"),
    (TokenKind::Indent, r"[ \t]"),
    (TokenKind::Comment, r"//[^\n]*"),
    (TokenKind::MultilineCommentStart, r"/\*"),
    (TokenKind::MultilineCommentEnd, r"\*/"),
    (TokenKind::AttributeName, r"[a-zA-Z0-9\-:@]*\s*=\s*"),
    (TokenKind::Name, r"[a-zA-Z]+"),
    (TokenKind::InstantClass, r"\.[a-zA-Z][a-zA-Z0-9_\-]*"),
    (TokenKind::InstantId, r"#[a-zA-Z][a-zA-Z0-9_\-]*"),
    (TokenKind::Value, r"[a-zA-Z0-9\-_\\#:@]+"),
    (TokenKind::StringLimiter, r#"""#),
    (TokenKind::Content, r"(?:\\\n|[^\n])+"),
];

const STRING_CONTENTS_PATTERN: &str = r#"(?:\\"|[^"])*"#;

/// Lazily compiled, anchored versions of [TOKEN_PATTERNS].
static COMPILED_PATTERNS: Lazy<Vec<(TokenKind, Regex)>> = Lazy::new(|| {
    TOKEN_PATTERNS
        .iter()
        .map(|(kind, pattern)| (*kind, anchored(pattern)))
        .collect()
});

static STRING_CONTENTS: Lazy<Regex> = Lazy::new(|| anchored(STRING_CONTENTS_PATTERN));

/// Extracts the key from an attribute-name token such as `data-id =`.
pub(crate) static ATTRIBUTE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z0-9\-:@]+)").unwrap());

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{pattern})")).unwrap()
}

/// Which token kinds the tokenizer offers at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexMode {
    /// Element descriptor lines: every kind of the priority list except `Content`.
    Descriptor,
    /// Free-form text capture: the full priority list, `Content` last.
    FreeText,
    /// Inside `/* ... */`: line feeds, the closing marker and opaque comment bodies.
    Comment,
}

impl LexMode {
    fn offers(&self, kind: TokenKind) -> bool {
        match self {
            LexMode::Descriptor => kind != TokenKind::Content,
            LexMode::FreeText => true,
            LexMode::Comment => {
                matches!(kind, TokenKind::NewLine | TokenKind::MultilineCommentEnd)
            }
        }
    }
}

/// Returns the first token matching at `offset`, or `None` if no pattern offered by
/// `mode` matches a non-empty span there (including at end of input).
pub fn next_token(text: &str, offset: usize, mode: LexMode) -> Option<Token> {
    let rest = text.get(offset..)?;
    if rest.is_empty() {
        return None;
    }

    let matched = COMPILED_PATTERNS
        .iter()
        .filter(|(kind, _)| mode.offers(*kind))
        .find_map(|(kind, regex)| {
            regex
                .find(rest)
                .filter(|m| !m.as_str().is_empty())
                .map(|m| Token::new(*kind, m.as_str(), offset))
        });

    match (matched, mode) {
        (Some(token), _) => Some(token),
        (None, LexMode::Comment) => comment_body(rest, offset),
        (None, _) => None,
    }
}

/// Matches a single, explicitly requested kind at `offset`.
///
/// `StringContents` may match an empty span; every other kind must match at least one
/// character.
pub fn match_kind(text: &str, offset: usize, kind: TokenKind) -> Option<Token> {
    let rest = text.get(offset..)?;

    if kind == TokenKind::StringContents {
        return STRING_CONTENTS
            .find(rest)
            .map(|m| Token::new(kind, m.as_str(), offset));
    }

    COMPILED_PATTERNS
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .and_then(|(_, regex)| regex.find(rest))
        .filter(|m| !m.as_str().is_empty())
        .map(|m| Token::new(kind, m.as_str(), offset))
}

/// Everything up to, but not including, the next `*/` or line feed.
fn comment_body(rest: &str, offset: usize) -> Option<Token> {
    let end = [rest.find("*/"), rest.find('\n')]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(rest.len());

    if end == 0 {
        return None;
    }
    Some(Token::new(TokenKind::Content, &rest[..end], offset))
}

/// Turns the payload of a quoted string into its value: only `\"` is unescaped.
pub fn unescape_string(contents: &str) -> String {
    contents.replace("\\\"", "\"")
}

/// Inverse of [unescape_string], used when a quoted value is written back out.
pub fn escape_string(value: &str) -> String {
    value.replace('"', "\\\"")
}
