//! Attribute values
//!
//! An attribute value is either a quoted literal (`src="logo.png"`) or a bare identifier
//! (`alt=logo`). Consumers treat them differently: literals are used as-is, identifiers
//! are handed to a resolution hook first. The distinction is made once, by the parser.
//!
//! In plain-data output values keep a "marked" string form: a quoted
//! literal is written with its surrounding quotes (and `"` re-escaped), an identifier is
//! written bare. [AttributeValue::from_marked] reads that form back.

use crate::cisto::lexing::{escape_string, unescape_string};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    /// Text captured between double quotes, already unescaped.
    Quoted(String),
    /// A bare token, to be resolved by the consumer.
    Identifier(String),
}

impl AttributeValue {
    pub fn quoted(text: impl Into<String>) -> Self {
        AttributeValue::Quoted(text.into())
    }

    pub fn identifier(text: impl Into<String>) -> Self {
        AttributeValue::Identifier(text.into())
    }

    /// The text without quote markers.
    pub fn as_str(&self) -> &str {
        match self {
            AttributeValue::Quoted(text) | AttributeValue::Identifier(text) => text,
        }
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, AttributeValue::Quoted(_))
    }

    /// The marked form: `"text"` for literals, `text` for identifiers.
    pub fn to_marked(&self) -> String {
        match self {
            AttributeValue::Quoted(text) => format!("\"{}\"", escape_string(text)),
            AttributeValue::Identifier(text) => text.clone(),
        }
    }

    pub fn from_marked(marked: &str) -> Self {
        match marked
            .strip_prefix('"')
            .and_then(|inner| inner.strip_suffix('"'))
        {
            Some(inner) => AttributeValue::Quoted(unescape_string(inner)),
            None => AttributeValue::Identifier(marked.to_string()),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_marked())
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_marked())
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let marked = String::deserialize(deserializer)?;
        Ok(AttributeValue::from_marked(&marked))
    }
}
