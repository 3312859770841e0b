//! Parser session
//!
//! A [Session] holds every piece of mutable state of one parse: the cursor, the state
//! machine, the element under construction, the pending attribute key, the indentation
//! counter and the single saved state used to resume after a block comment. It is
//! created by [crate::cisto::parsing::Parser::parse], consumed by [Session::run] and
//! never shared.

use super::indentation::{IndentationError, NodeArena, NodeId};
use super::State;
use crate::cisto::ast::{AttributeValue, Element};
use crate::cisto::error::{ErrorKind, ParseError, ParseResult, Source};
use crate::cisto::lexing::{self, LexMode, ATTRIBUTE_KEY};
use crate::cisto::token::{Token, TokenKind};

pub(super) struct Session<'a> {
    text: &'a str,
    source: Source,
    position: usize,
    state: State,
    /// State to return to when the current block comment closes.
    resume_state: Option<State>,
    arena: NodeArena,
    current: NodeId,
    attribute_name: String,
    /// Indentation characters seen since the start of the line.
    indent: usize,
    /// The whitespace character the document indents with, fixed by its first use.
    indent_char: Option<char>,
    /// Consumed tokens, kept only when requested.
    log: Option<Vec<Token>>,
}

impl<'a> Session<'a> {
    pub fn new(text: &'a str, keep_tokens: bool) -> Self {
        Self {
            text,
            source: Source::new(text),
            position: 0,
            state: State::Newline,
            resume_state: None,
            arena: NodeArena::new(),
            current: NodeArena::ROOT,
            attribute_name: String::new(),
            indent: 0,
            indent_char: None,
            log: keep_tokens.then(Vec::new),
        }
    }

    /// Drives the state machine to the end of the input.
    pub fn run(mut self) -> ParseResult<(Element, Vec<Token>)> {
        while self.position < self.text.len() {
            let token = self.consume_any().ok_or_else(|| {
                ParseError::new(
                    &self.source,
                    ErrorKind::UnknownInput,
                    "Unknown input encountered",
                    self.position,
                )
            })?;
            self.dispatch(token)?;
        }

        tracing::debug!(elements = self.arena.len() - 1, "parse finished");
        Ok((self.arena.into_tree(), self.log.unwrap_or_default()))
    }

    fn dispatch(&mut self, token: Token) -> ParseResult<()> {
        match self.state {
            State::Newline => self.on_newline(token),
            State::Name | State::Props => self.on_props(token),
            State::PropValue => self.on_prop_value(token),
            State::Content => {
                self.on_content(token);
                Ok(())
            }
            State::MultilineComment => {
                self.on_comment(token);
                Ok(())
            }
        }
    }

    fn on_newline(&mut self, token: Token) -> ParseResult<()> {
        match token.kind() {
            TokenKind::Comment => {}
            TokenKind::MultilineCommentStart => self.enter_comment(),
            TokenKind::Indent => {
                self.check_indent_char(&token)?;
                self.indent += 1;
            }
            TokenKind::NewLine => self.indent = 0,
            _ => {
                self.start_element(&token)?;
                self.on_props(token)?;
            }
        }
        Ok(())
    }

    fn on_props(&mut self, token: Token) -> ParseResult<()> {
        match token.kind() {
            TokenKind::Indent | TokenKind::Comment => {}
            TokenKind::Name if self.state == State::Name => {
                self.element().name = Some(token.into_text());
                self.state = State::Props;
            }
            TokenKind::Name => {
                // A second bare word starts free-form content.
                self.element().content = Some(token.into_text());
                self.state = State::Content;
            }
            TokenKind::InstantClass => {
                let class = token.text()[1..].to_string();
                self.element().classes.push(class);
                self.state = State::Props;
            }
            TokenKind::InstantId => {
                let id = token.text()[1..].to_string();
                self.element().id = Some(id);
                self.state = State::Props;
            }
            TokenKind::AttributeName => {
                let key = ATTRIBUTE_KEY
                    .captures(token.text())
                    .and_then(|captures| captures.get(1))
                    .map(|key| key.as_str().to_string())
                    .ok_or_else(|| {
                        ParseError::at_token(
                            &self.source,
                            ErrorKind::MalformedAttributeName,
                            "Attribute name was not matched",
                            &token,
                        )
                    })?;
                self.attribute_name = key;
                self.state = State::PropValue;
            }
            TokenKind::StringLimiter => {
                let content = self.consume_string()?;
                self.element().content = Some(content);
                self.state = State::Newline;
            }
            TokenKind::NewLine => {
                self.indent = 0;
                self.state = State::Newline;
            }
            TokenKind::MultilineCommentStart => self.enter_comment(),
            kind => {
                return Err(ParseError::at_token(
                    &self.source,
                    ErrorKind::UnexpectedToken,
                    format!("Unexpected {kind}"),
                    &token,
                ));
            }
        }
        Ok(())
    }

    fn on_prop_value(&mut self, token: Token) -> ParseResult<()> {
        match token.kind() {
            TokenKind::MultilineCommentStart => self.enter_comment(),
            TokenKind::StringLimiter => {
                let value = AttributeValue::Quoted(self.consume_string()?);
                self.set_attribute(value);
            }
            TokenKind::Name | TokenKind::Value | TokenKind::InstantClass | TokenKind::InstantId => {
                let value = AttributeValue::Identifier(token.into_text());
                self.set_attribute(value);
            }
            _ => {}
        }
        Ok(())
    }

    fn on_content(&mut self, token: Token) {
        match token.kind() {
            TokenKind::NewLine => {
                self.indent = 0;
                self.state = State::Newline;
            }
            TokenKind::Comment => {}
            TokenKind::MultilineCommentStart => self.enter_comment(),
            _ => self
                .element()
                .content
                .get_or_insert_with(String::new)
                .push_str(token.text()),
        }
    }

    fn on_comment(&mut self, token: Token) {
        if token.is(TokenKind::MultilineCommentEnd) {
            self.state = self.resume_state.take().unwrap_or(State::Newline);
        }
    }

    fn enter_comment(&mut self) {
        self.resume_state = Some(self.state);
        self.state = State::MultilineComment;
    }

    fn set_attribute(&mut self, value: AttributeValue) {
        let key = std::mem::take(&mut self.attribute_name);
        self.element().attributes.insert(key, value);
        self.state = State::Props;
    }

    /// Places a new element according to the indentation of its line and makes it current.
    fn start_element(&mut self, token: &Token) -> ParseResult<()> {
        let parent = self
            .arena
            .resolve_parent(self.current, self.indent)
            .map_err(|IndentationError::Unknown(depth)| {
                ParseError::at_token(
                    &self.source,
                    ErrorKind::UnknownIndentation(depth),
                    format!("Element has unknown indentation {depth}"),
                    token,
                )
            })?;

        let indent = i32::try_from(self.indent).unwrap_or(i32::MAX);
        self.current = self.arena.append(parent, indent);
        tracing::debug!(indent, parent, offset = token.offset(), "element created");

        self.indent = 0;
        self.state = State::Name;
        Ok(())
    }

    fn check_indent_char(&mut self, token: &Token) -> ParseResult<()> {
        let Some(found) = token.text().chars().next() else {
            return Ok(());
        };
        match self.indent_char {
            None => {
                self.indent_char = Some(found);
                Ok(())
            }
            Some(expected) if expected == found => Ok(()),
            Some(_) => Err(ParseError::at_token(
                &self.source,
                ErrorKind::InconsistentIndentation,
                "Inconsistent indentation, use either tabs or spaces",
                token,
            )),
        }
    }

    /// Reads the rest of a quoted string; the opening quote is already consumed.
    fn consume_string(&mut self) -> ParseResult<String> {
        let contents = self
            .consume_specific(TokenKind::StringContents)
            .ok_or_else(|| self.unterminated("Expected string contents"))?;
        self.consume_specific(TokenKind::StringLimiter)
            .ok_or_else(|| self.unterminated("Expected end of string"))?;

        Ok(lexing::unescape_string(contents.text()))
    }

    fn unterminated(&self, message: &str) -> ParseError {
        ParseError::new(
            &self.source,
            ErrorKind::UnterminatedString,
            message,
            self.position,
        )
    }

    fn lex_mode(&self) -> LexMode {
        match self.state {
            State::Content => LexMode::FreeText,
            State::MultilineComment => LexMode::Comment,
            State::Newline | State::Name | State::Props | State::PropValue => {
                LexMode::Descriptor
            }
        }
    }

    fn consume_any(&mut self) -> Option<Token> {
        let token = lexing::next_token(self.text, self.position, self.lex_mode())?;
        self.advance(&token);
        Some(token)
    }

    fn consume_specific(&mut self, kind: TokenKind) -> Option<Token> {
        let token = lexing::match_kind(self.text, self.position, kind)?;
        self.advance(&token);
        Some(token)
    }

    fn advance(&mut self, token: &Token) {
        tracing::trace!(state = ?self.state, token = %token, "consumed");
        self.position = token.end();
        if let Some(log) = self.log.as_mut() {
            log.push(token.clone());
        }
    }

    fn element(&mut self) -> &mut Element {
        self.arena.element_mut(self.current)
    }
}
