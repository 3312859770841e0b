//! Element node

use super::attributes::Attributes;
use super::value::AttributeValue;

/// Indent of the synthetic document root, lower than any real element.
pub const ROOT_INDENT: i32 = -1;

/// One parsed markup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Number of indentation characters before the element's line.
    pub indent: i32,
    /// Tag or type name (`img` in `img.logo`).
    pub name: Option<String>,
    /// Value of the `#id` sigil.
    pub id: Option<String>,
    /// Raw text payload. Placeholders such as `{user}` are left for consumers.
    pub content: Option<String>,
    pub children: Vec<Element>,
    pub attributes: Attributes,
    /// Values of the `.class` sigils, in source order.
    pub classes: Vec<String>,
}

impl Element {
    pub fn new(indent: i32) -> Self {
        Self {
            indent,
            name: None,
            id: None,
            content: None,
            children: Vec::new(),
            attributes: Attributes::new(),
            classes: Vec::new(),
        }
    }

    /// The synthetic document root.
    pub fn root() -> Self {
        Self::new(ROOT_INDENT)
    }

    pub fn is_root(&self) -> bool {
        self.indent == ROOT_INDENT
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first search for the first element carrying `id`, including `self`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_by_id(id))
    }

    /// Number of elements below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Whether two trees carry the same data, ignoring indentation widths.
    pub fn same_structure(&self, other: &Element) -> bool {
        self.name == other.name
            && self.id == other.id
            && self.content == other.content
            && self.attributes == other.attributes
            && self.classes == other.classes
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_structure(b))
    }
}
