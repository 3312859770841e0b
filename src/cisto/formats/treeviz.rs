//! Treeviz formatter for element trees
//!
//! One line per element, drawn with box connectors, so the shape of a template can be
//! checked at a glance:
//!
//! ```text
//! ⧉ root
//! └─ ◇ html
//!   ├─ ◇ head
//!   │ └─ ◇ title ↵ Welcome
//!   └─ ◇ body#top.home
//! ```
//!
//! Icons
//!     Root: ⧉
//!     Named element: ◇
//!     Nameless element (rendered as div by markup formats): ○
//!     Content marker: ↵
//!
//! Labels (descriptor and content) are truncated to 30 characters.

use crate::cisto::ast::Element;

const LABEL_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizOptions {
    /// Prefix every line with the element's indentation width.
    pub show_indent: bool,
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(element: &Element) -> &'static str {
    if element.is_root() {
        "⧉"
    } else if element.name.is_some() {
        "◇"
    } else {
        "○"
    }
}

/// `img#logo.logo [src="logo.png" alt=logo]`
fn descriptor(element: &Element) -> String {
    let mut label = element.name().unwrap_or_default().to_string();
    if let Some(id) = element.id() {
        label.push('#');
        label.push_str(id);
    }
    for class in &element.classes {
        label.push('.');
        label.push_str(class);
    }
    if !element.attributes.is_empty() {
        let attributes = element
            .attributes
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        label.push_str(&format!(" [{attributes}]"));
    }
    label
}

fn label(element: &Element) -> String {
    let mut label = truncate(&descriptor(element), LABEL_WIDTH);
    if let Some(content) = element.content() {
        label.push_str(" ↵ ");
        label.push_str(&truncate(&content.replace('\n', "\\n"), LABEL_WIDTH));
    }
    label
}

fn format_element(
    element: &Element,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    options: TreevizOptions,
) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let indent_prefix = if options.show_indent {
        format!("{:02} ", element.indent)
    } else {
        String::new()
    };

    output.push_str(&format!(
        "{}{}{} {} {}\n",
        indent_prefix,
        prefix,
        connector,
        get_icon(element),
        label(element)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = element.children.len();
    for (i, child) in element.children.iter().enumerate() {
        output.push_str(&format_element(child, &child_prefix, i, child_count, options));
    }

    output
}

pub fn to_treeviz_str(root: &Element) -> String {
    to_treeviz_str_with_options(root, TreevizOptions::default())
}

pub fn to_treeviz_str_with_options(root: &Element, options: TreevizOptions) -> String {
    let mut output = format!("{} root\n", get_icon(root));
    let child_count = root.children.len();
    for (i, child) in root.children.iter().enumerate() {
        output.push_str(&format_element(child, "", i, child_count, options));
    }
    output
}
