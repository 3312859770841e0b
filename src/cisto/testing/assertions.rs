//! Fluent assertion API for element trees

use crate::cisto::ast::{AttributeValue, Element};

/// Create an assertion builder for a parsed tree (usually the root).
pub fn assert_tree(element: &Element) -> ElementAssertion<'_> {
    ElementAssertion {
        element,
        context: "root".to_string(),
    }
}

pub struct ElementAssertion<'a> {
    pub(crate) element: &'a Element,
    pub(crate) context: String,
}

impl<'a> ElementAssertion<'a> {
    pub fn element(&self) -> &'a Element {
        self.element
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.element.children.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize(&self.element.children)
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ElementAssertion<'a>),
    {
        let children = &self.element.children;
        assert!(
            index < children.len(),
            "{}: Child index {} out of bounds ({} children)",
            self.context,
            index,
            children.len()
        );
        assertion(ElementAssertion {
            element: &children[index],
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.element.name(),
            Some(expected),
            "{}: Expected name {:?}",
            self.context,
            expected
        );
        self
    }

    pub fn no_name(self) -> Self {
        assert_eq!(
            self.element.name(),
            None,
            "{}: Expected no name",
            self.context
        );
        self
    }

    pub fn id(self, expected: &str) -> Self {
        assert_eq!(
            self.element.id(),
            Some(expected),
            "{}: Expected id {:?}",
            self.context,
            expected
        );
        self
    }

    pub fn no_id(self) -> Self {
        assert_eq!(self.element.id(), None, "{}: Expected no id", self.context);
        self
    }

    pub fn class_list(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.element.classes, expected,
            "{}: Unexpected classes",
            self.context
        );
        self
    }

    pub fn content(self, expected: &str) -> Self {
        assert_eq!(
            self.element.content(),
            Some(expected),
            "{}: Unexpected content",
            self.context
        );
        self
    }

    pub fn no_content(self) -> Self {
        assert_eq!(
            self.element.content(),
            None,
            "{}: Expected no content",
            self.context
        );
        self
    }

    pub fn attribute_count(self, expected: usize) -> Self {
        assert_eq!(
            self.element.attributes.len(),
            expected,
            "{}: Expected {} attributes, found [{}]",
            self.context,
            expected,
            self.element.attributes.keys().collect::<Vec<_>>().join(", ")
        );
        self
    }

    /// Asserts `key` holds the quoted literal `expected`.
    pub fn quoted(self, key: &str, expected: &str) -> Self {
        self.attribute(key, AttributeValue::quoted(expected))
    }

    /// Asserts `key` holds the bare identifier `expected`.
    pub fn identifier(self, key: &str, expected: &str) -> Self {
        self.attribute(key, AttributeValue::identifier(expected))
    }

    fn attribute(self, key: &str, expected: AttributeValue) -> Self {
        assert_eq!(
            self.element.attribute(key),
            Some(&expected),
            "{}: Unexpected value for attribute {:?}",
            self.context,
            key
        );
        self
    }

    pub fn indent(self, expected: i32) -> Self {
        assert_eq!(
            self.element.indent, expected,
            "{}: Unexpected indent",
            self.context
        );
        self
    }
}

/// One-line summary of elements for failure messages, e.g. `img#logo, .item`.
fn summarize(elements: &[Element]) -> String {
    elements
        .iter()
        .map(|element| {
            let mut label = element.name().unwrap_or_default().to_string();
            if let Some(id) = element.id() {
                label.push('#');
                label.push_str(id);
            }
            for class in &element.classes {
                label.push('.');
                label.push_str(class);
            }
            label
        })
        .collect::<Vec<_>>()
        .join(", ")
}
