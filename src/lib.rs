//! # cisto
//!
//! A parser for cisto, an indentation-based markup shorthand:
//!
//! ```text
//! ul.menu#main
//!   li.item a href="/" Home
//!   li.item Contact
//! ```
//!
//! Every line declares one element (tag name, `.class` and `#id` sigils, `key=value`
//! attributes, trailing content); nesting follows indentation. Parsing produces an
//! [Element] tree rooted at a synthetic root, which the [formats](cisto::formats)
//! turn into HTML, DOM-like nodes or plain data.
//!
//! ## Testing
//!
//! See the [testing module](cisto::testing) for the fluent tree assertions and the
//! curated sample templates used across the test suite.

pub mod cisto;

pub use cisto::ast::{AttributeValue, Attributes, Element};
pub use cisto::error::{ErrorCategory, ErrorKind, ParseError, ParseResult};
pub use cisto::formats::{Compiler, Context};
pub use cisto::parsing::{parse, Parser};
pub use cisto::token::{Token, TokenKind};
