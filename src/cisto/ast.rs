//! Element tree
//!
//! The parser produces a tree of [Element]s hanging from a synthetic root whose indent is
//! [ROOT_INDENT]. Elements own their children; nothing in the returned tree points back
//! up (the parent links used while parsing live in the parser's arena only).

pub mod attributes;
pub mod element;
pub mod value;

pub use attributes::Attributes;
pub use element::{Element, ROOT_INDENT};
pub use value::AttributeValue;
