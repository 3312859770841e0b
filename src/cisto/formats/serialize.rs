//! Plain-data serializer
//!
//! Reproduces the tree verbatim as serde-friendly data: no identifier is resolved and no
//! placeholder is substituted. Attribute values keep their marked form, so a quoted
//! literal reads `"\"logo.png\""` and a bare identifier reads `"logo"`.
//!
//! [SerializedElement::into_element] reads the data back. Indentation widths are not part
//! of the data; rebuilt elements get their nesting depth instead (root `-1`, top level
//! `0`, ...), which the parser would also produce for a one-character indent.

use super::{CompileError, Compiler};
use crate::cisto::ast::{Attributes, Element, ROOT_INDENT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedElement {
    pub name: Option<String>,
    pub id: Option<String>,
    pub attributes: Attributes,
    pub classes: Vec<String>,
    pub content: Option<String>,
    pub children: Vec<SerializedElement>,
}

impl SerializedElement {
    /// Rebuilds an element tree, treating `self` as the root.
    pub fn into_element(self) -> Element {
        self.into_element_at(ROOT_INDENT)
    }

    fn into_element_at(self, indent: i32) -> Element {
        Element {
            indent,
            name: self.name,
            id: self.id,
            content: self.content,
            attributes: self.attributes,
            classes: self.classes,
            children: self
                .children
                .into_iter()
                .map(|child| child.into_element_at(indent + 1))
                .collect(),
        }
    }
}

impl From<&Element> for SerializedElement {
    fn from(element: &Element) -> Self {
        Self {
            name: element.name.clone(),
            id: element.id.clone(),
            attributes: element.attributes.clone(),
            classes: element.classes.clone(),
            content: element.content.clone(),
            children: element.children.iter().map(SerializedElement::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SerializeCompiler;

impl SerializeCompiler {
    pub fn new() -> Self {
        SerializeCompiler
    }
}

impl Compiler for SerializeCompiler {
    type Output = SerializedElement;

    fn compile(&self, root: &Element) -> Result<SerializedElement, CompileError> {
        Ok(SerializedElement::from(root))
    }
}
