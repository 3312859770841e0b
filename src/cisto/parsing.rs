//! Parser
//!
//! The parser is a small state machine that pulls one token at a time from the tokenizer
//! and grows the element tree as it goes. There is no separate lexing pass: which tokens
//! are even possible depends on the state (see [crate::cisto::lexing::LexMode]).
//!
//! States
//!
//!     Newline           start of a physical line; counts indentation, then starts an element
//!     Name              first descriptor of a fresh element; a bare word is its tag name
//!     Props             further descriptors: `.class`, `#id`, `key=`, `"content"`, content
//!     PropValue         right after `key=`; expects one value
//!     Content           free-form text up to the end of the line
//!     MultilineComment  inside `/* ... */`; resumes the saved state on `*/`
//!
//! Indentation
//!
//!     Each element records how many indentation characters preceded it. The parent of a
//!     new element is found by walking up from the current element (see [indentation]).
//!     A document indents with tabs or with spaces, never both.
//!
//! Every error is fatal: parsing stops at the first problem and no partial tree is
//! returned.

pub mod indentation;
mod session;

use crate::cisto::ast::Element;
use crate::cisto::error::ParseResult;
use crate::cisto::token::Token;
use session::Session;

/// Parser states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Newline,
    Name,
    Props,
    PropValue,
    Content,
    MultilineComment,
}

/// Entry point for parsing cisto templates.
///
/// The parser holds no state between calls; every call to [Parser::parse] runs in its own
/// session, so one parser can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    /// Parses `text` into a tree hanging from a synthetic root element.
    #[tracing::instrument(skip_all, fields(source_len = text.len()))]
    pub fn parse(&self, text: &str) -> ParseResult<Element> {
        Session::new(text, false).run().map(|(root, _)| root)
    }

    /// Parses `text` and also returns every token the parser consumed, in order.
    #[tracing::instrument(skip_all, fields(source_len = text.len()))]
    pub fn parse_with_tokens(&self, text: &str) -> ParseResult<(Element, Vec<Token>)> {
        Session::new(text, true).run()
    }
}

/// Parses `text` with a default [Parser].
pub fn parse(text: &str) -> ParseResult<Element> {
    Parser::new().parse(text)
}
