//! Output formats
//!
//! Every format is a consumer of the element tree: it walks a parsed tree and produces
//! some target representation. Formats share two things:
//!
//! - the [Compiler] trait, so callers can go from template text to output in one call;
//! - the [Resolve] hook, which decides what a value in the tree stands for. Quoted
//!   literals stand for themselves; bare identifiers are looked up in a [Context] and
//!   fall back to their own text when the context does not know them.
//!
//! Format constraints (such as HTML void elements refusing children) are checked here,
//! never in the parser.
//!
//! Formats
//!
//!     html        markup string with `{name}` placeholder substitution
//!     dom         owned DOM-like node tree with every value resolved
//!     serialize   plain data, no resolution; reads back into an identical tree
//!     treeviz     one line per element, for debugging

pub mod dom;
pub mod html;
pub mod serialize;
pub mod treeviz;

pub use dom::{DomCompiler, DomNode};
pub use html::HtmlCompiler;
pub use serialize::{SerializeCompiler, SerializedElement};
pub use treeviz::to_treeviz_str;

use crate::cisto::ast::{AttributeValue, Element};
use crate::cisto::error::ParseError;
use crate::cisto::parsing::parse;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fmt;

/// Values available to bare identifiers and `{name}` placeholders.
pub type Context = BTreeMap<String, serde_json::Value>;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]*)\}").unwrap());

/// Errors raised while turning a template into output.
#[derive(Debug, Clone)]
pub enum CompileError {
    /// The template did not parse.
    Parse(ParseError),
    /// An element that may not have children (e.g. `img` in HTML) has some.
    ChildlessElement { name: String },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Parse(err) => write!(f, "{}", err),
            CompileError::ChildlessElement { name } => {
                write!(f, "Element type {} can't have children.", name)
            }
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Parse(err) => Some(err),
            CompileError::ChildlessElement { .. } => None,
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse(err)
    }
}

/// Resolution hook for bare identifiers.
pub trait Resolve {
    /// Looks up a bare identifier.
    fn lookup(&self, name: &str) -> Option<String>;

    /// What an attribute value stands for.
    fn resolve(&self, value: &AttributeValue) -> String {
        match value {
            AttributeValue::Quoted(text) => text.clone(),
            AttributeValue::Identifier(name) => self.resolve_name(name),
        }
    }

    /// What a bare name (an id, a class) stands for.
    fn resolve_name(&self, name: &str) -> String {
        self.lookup(name).unwrap_or_else(|| name.to_string())
    }

    /// Replaces `{name}` placeholders in content. Unknown names become empty.
    fn substitute(&self, content: &str) -> String {
        PLACEHOLDER
            .replace_all(content, |captures: &Captures| {
                self.lookup(&captures[1]).unwrap_or_default()
            })
            .into_owned()
    }
}

impl Resolve for Context {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(value_to_string)
    }
}

/// No resolution at all: every identifier stands for itself.
impl Resolve for () {
    fn lookup(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Renders a context value as text: strings as-is, anything else in its JSON form.
pub fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// A consumer of parsed trees.
pub trait Compiler {
    type Output;

    /// Compiles a parsed tree, starting at its root.
    fn compile(&self, root: &Element) -> Result<Self::Output, CompileError>;

    /// Parses `template` and compiles the result.
    fn process(&self, template: &str) -> Result<Self::Output, CompileError> {
        let root = parse(template)?;
        self.compile(&root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> Context {
        let mut context = Context::new();
        context.insert("user".to_string(), json!("Ada"));
        context.insert("count".to_string(), json!(3));
        context
    }

    #[test]
    fn test_resolve_quoted_is_literal() {
        let value = AttributeValue::quoted("user");
        assert_eq!(context().resolve(&value), "user");
    }

    #[test]
    fn test_resolve_identifier_uses_context() {
        assert_eq!(context().resolve(&AttributeValue::identifier("user")), "Ada");
        assert_eq!(context().resolve(&AttributeValue::identifier("count")), "3");
        assert_eq!(
            context().resolve(&AttributeValue::identifier("other")),
            "other"
        );
    }

    #[test]
    fn test_substitute_placeholders() {
        assert_eq!(
            context().substitute("Hi {user}, {count} new, {missing}!"),
            "Hi Ada, 3 new, !"
        );
    }

    #[test]
    fn test_unit_resolver_passes_through() {
        assert_eq!(().resolve(&AttributeValue::identifier("user")), "user");
        assert_eq!(().substitute("{user}"), "");
    }
}
