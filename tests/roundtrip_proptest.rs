//! Property-based tests for the parser
//!
//! Templates are generated from element descriptors (name, sigils, attributes, content)
//! laid out with a consistent indentation step, so every generated template is valid:
//! - parsing never fails on them
//! - the serialized form reads back into the same tree
//! - arbitrary input never panics, it either parses or reports an error inside the source

use cisto::cisto::formats::{Compiler, SerializeCompiler, SerializedElement};
use cisto::cisto::parsing::parse;
use proptest::prelude::*;

/// A generated element line and its nested children.
#[derive(Debug, Clone)]
struct Node {
    descriptor: String,
    children: Vec<Node>,
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn sigil_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_-]{0,8}".prop_map(|class| format!(".{}", class)),
        "[a-z][a-z0-9_-]{0,8}".prop_map(|id| format!("#{}", id)),
    ]
}

fn attribute_strategy() -> impl Strategy<Value = String> {
    let key = "[a-z][a-z0-9-]{0,6}";
    prop_oneof![
        // Bare values are either a plain word or start with a digit, never a word
        // directly followed by digits (that would lex as two tokens).
        (key, "[a-z]{1,8}|[0-9][a-z0-9]{0,7}").prop_map(|(k, v)| format!("{}={}", k, v)),
        (key, "[a-zA-Z0-9 ./]{0,12}").prop_map(|(k, v)| format!("{}=\"{}\"", k, v)),
    ]
}

fn content_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ,.!{}]{0,20}"
}

/// One descriptor line: at least a name or a sigil.
fn descriptor_strategy() -> impl Strategy<Value = String> {
    (
        proptest::option::of(name_strategy()),
        prop::collection::vec(sigil_strategy(), 0..3),
        prop::collection::vec(attribute_strategy(), 0..3),
        proptest::option::of(content_strategy()),
    )
        .prop_filter("element needs a name or a sigil", |(name, sigils, _, _)| {
            name.is_some() || !sigils.is_empty()
        })
        .prop_map(|(name, sigils, attributes, content)| {
            let mut line = name.unwrap_or_default();
            line.push_str(&sigils.concat());
            for attribute in attributes {
                line.push(' ');
                line.push_str(&attribute);
            }
            if let Some(content) = content {
                line.push(' ');
                line.push_str(&content);
            }
            line
        })
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = descriptor_strategy().prop_map(|descriptor| Node {
        descriptor,
        children: Vec::new(),
    });
    leaf.prop_recursive(3, 24, 4, |inner| {
        (descriptor_strategy(), prop::collection::vec(inner, 0..4))
            .prop_map(|(descriptor, children)| Node { descriptor, children })
    })
}

fn render(nodes: &[Node], step: &str, depth: usize, out: &mut String) {
    for node in nodes {
        out.push_str(&step.repeat(depth));
        out.push_str(&node.descriptor);
        out.push('\n');
        render(&node.children, step, depth + 1, out);
    }
}

fn template_strategy() -> impl Strategy<Value = (String, usize)> {
    (
        prop::collection::vec(node_strategy(), 1..4),
        prop_oneof![Just("\t"), Just("  "), Just("    ")],
    )
        .prop_map(|(nodes, step)| {
            let mut template = String::new();
            render(&nodes, step, 0, &mut template);
            let count = nodes.iter().map(count_nodes).sum();
            (template, count)
        })
}

fn count_nodes(node: &Node) -> usize {
    1 + node.children.iter().map(count_nodes).sum::<usize>()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn test_generated_templates_parse((template, count) in template_strategy()) {
        let root = parse(&template);
        prop_assert!(root.is_ok(), "Failed to parse:\n{}\n{:?}", template, root.as_ref().err());
        prop_assert_eq!(root.unwrap().descendant_count(), count);
    }

    #[test]
    fn test_serialized_tree_reads_back((template, _) in template_strategy()) {
        let root = parse(&template).unwrap();
        let data = SerializeCompiler::new().compile(&root).unwrap();

        let json = serde_json::to_string(&data).unwrap();
        let decoded: SerializedElement = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&decoded, &data);

        let rebuilt = decoded.into_element();
        prop_assert!(rebuilt.same_structure(&root), "Tree changed for:\n{}", template);
    }

    #[test]
    fn test_arbitrary_input_never_panics(input in "[ \t\na-z0-9.#=\"/*{}~-]{0,40}") {
        if let Err(err) = parse(&input) {
            prop_assert!(err.offset() <= input.len());
            prop_assert!(err.line() >= 1 && err.column() >= 1);
            prop_assert!(err.to_pretty_string().starts_with("Parse error at "));
        }
    }
}
