//! HTML serializer
//!
//! Layout:
//!
//! ```text
//! <ul class="menu">
//!   <li>
//!     one
//!   </li>
//! </ul>
//! ```
//!
//! Elements without a name render as `div`. Content sits on its own line, one indent
//! deeper than its tag; each child follows on its own line. Void elements render as
//! `<img ... />` and must not have children.

use super::{CompileError, Compiler, Context, Resolve};
use crate::cisto::ast::Element;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "br", "base", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "track", "wbr",
];

pub const DEFAULT_INDENT: &str = "  ";

#[derive(Debug, Clone)]
pub struct HtmlCompiler {
    context: Context,
    indent: String,
}

impl HtmlCompiler {
    pub fn new() -> Self {
        Self::with_context(Context::new())
    }

    pub fn with_context(context: Context) -> Self {
        Self {
            context,
            indent: DEFAULT_INDENT.to_string(),
        }
    }

    /// Sets the string used for one level of nesting.
    pub fn indent_with(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    fn out_element(&self, element: &Element) -> Result<String, CompileError> {
        let tag = element.name().unwrap_or("div");
        let mut html = format!("<{tag}");

        if let Some(id) = element.id() {
            html.push_str(&format!(" id=\"{}\"", escape_attribute(id)));
        }
        if !element.classes.is_empty() {
            html.push_str(&format!(
                " class=\"{}\"",
                escape_attribute(&element.classes.join(" "))
            ));
        }
        for (key, value) in element.attributes.iter() {
            let resolved = self.context.resolve(value);
            html.push_str(&format!(" {}=\"{}\"", key, escape_attribute(&resolved)));
        }

        if is_void(tag) {
            if !element.children.is_empty() {
                return Err(CompileError::ChildlessElement {
                    name: tag.to_string(),
                });
            }
            html.push_str(" />\n");
            return Ok(html);
        }

        html.push('>');

        if let Some(content) = element.content().filter(|c| !c.is_empty()) {
            html.push('\n');
            html.push_str(&self.indent);
            html.push_str(&self.context.substitute(content));
            html.push('\n');
        }

        for child in &element.children {
            let rendered = self.out_element(child)?;
            html.push('\n');
            html.push_str(&self.indent);
            html.push_str(&indent_continuations(&rendered, &self.indent));
        }

        html.push_str(&format!("</{tag}>\n"));
        Ok(html)
    }
}

impl Default for HtmlCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler for HtmlCompiler {
    type Output = String;

    /// Renders the root's children, separated by blank lines.
    fn compile(&self, root: &Element) -> Result<String, CompileError> {
        let parts = root
            .children
            .iter()
            .map(|element| self.out_element(element))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join("\n"))
    }
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(tag))
}

fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Prefixes `indent` to every line after the first that is not empty.
fn indent_continuations(text: &str, indent: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut lines = text.split('\n');
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(indent);
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(template: &str) -> String {
        HtmlCompiler::new().process(template).unwrap()
    }

    #[test]
    fn test_plain_element() {
        assert_eq!(render("p.lead#intro"), "<p id=\"intro\" class=\"lead\"></p>\n");
    }

    #[test]
    fn test_nameless_element_is_div() {
        assert_eq!(render(".a.b"), "<div class=\"a b\"></div>\n");
    }

    #[test]
    fn test_content_and_children() {
        assert_eq!(
            render("ul\n  li one\n  li two"),
            "<ul>\n  <li>\n    one\n  </li>\n\n  <li>\n    two\n  </li>\n</ul>\n"
        );
    }

    #[test]
    fn test_void_element() {
        assert_eq!(
            render("img src=\"a.png\" alt=logo"),
            "<img src=\"a.png\" alt=\"logo\" />\n"
        );
    }

    #[test]
    fn test_void_element_rejects_children() {
        let err = HtmlCompiler::new().process("IMG\n  span").unwrap_err();
        assert!(matches!(err, CompileError::ChildlessElement { ref name } if name == "IMG"));
        assert_eq!(err.to_string(), "Element type IMG can't have children.");
    }

    #[test]
    fn test_context_resolution() {
        let mut context = Context::new();
        context.insert("logo".to_string(), json!("/static/logo.svg"));
        context.insert("user".to_string(), json!("Ada"));
        let html = HtmlCompiler::with_context(context)
            .process("img src=logo alt=\"logo\"\np Hi {user}")
            .unwrap();
        assert_eq!(
            html,
            "<img src=\"/static/logo.svg\" alt=\"logo\" />\n\n<p>\n  Hi Ada\n</p>\n"
        );
    }

    #[test]
    fn test_custom_indent() {
        let html = HtmlCompiler::new()
            .indent_with("\t")
            .process("p hi")
            .unwrap();
        assert_eq!(html, "<p>\n\thi\n</p>\n");
    }

    #[test]
    fn test_parse_errors_propagate() {
        let err = HtmlCompiler::new().process("???").unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
    }

    #[test]
    fn test_indent_continuations() {
        assert_eq!(indent_continuations("a\nb\n\nc\n", "  "), "a\n  b\n\n  c\n");
    }
}
