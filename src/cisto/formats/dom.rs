//! DOM-like node builder
//!
//! Builds an owned tree of [DomNode]s, the shape a UI toolkit binding would walk to create
//! native nodes. Unlike the HTML serializer every value is resolved, including the id,
//! and the root itself becomes a container `div`.

use super::{CompileError, Compiler, Context, Resolve};
use crate::cisto::ast::Element;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomNode {
    pub tag: String,
    /// Resolved attributes in source order; `id` comes first when present.
    pub attributes: Vec<(String, String)>,
    pub class_name: String,
    pub inner_html: Option<String>,
    pub children: Vec<DomNode>,
}

impl DomNode {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DomCompiler {
    context: Context,
}

impl DomCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: Context) -> Self {
        Self { context }
    }

    fn out_element(&self, element: &Element) -> DomNode {
        let mut attributes = Vec::with_capacity(element.attributes.len() + 1);
        if let Some(id) = element.id() {
            attributes.push(("id".to_string(), self.context.resolve_name(id)));
        }
        for (key, value) in element.attributes.iter() {
            attributes.push((key.to_string(), self.context.resolve(value)));
        }

        DomNode {
            tag: element.name().unwrap_or("div").to_string(),
            attributes,
            class_name: element.classes.join(" "),
            inner_html: element
                .content()
                .filter(|content| !content.is_empty())
                .map(|content| self.context.substitute(content)),
            children: element
                .children
                .iter()
                .map(|child| self.out_element(child))
                .collect(),
        }
    }
}

impl Compiler for DomCompiler {
    type Output = DomNode;

    fn compile(&self, root: &Element) -> Result<DomNode, CompileError> {
        Ok(self.out_element(root))
    }
}
