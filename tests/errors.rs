//! Parse error tests: kinds, positions and the rendered diagnostic.

use cisto::cisto::error::{ErrorCategory, ErrorKind};
use cisto::cisto::parsing::parse;
use rstest::rstest;

#[rstest(
    template,
    kind,
    offset,
    line,
    column,
    case("???", ErrorKind::UnknownInput, 0, 1, 1),
    case("div\n  span ?", ErrorKind::UnknownInput, 11, 2, 8),
    case("div\r\n", ErrorKind::UnknownInput, 3, 1, 4),
    case("div\n  span\n\tp", ErrorKind::InconsistentIndentation, 11, 3, 1),
    case("div\n\tspan\n  p", ErrorKind::InconsistentIndentation, 10, 3, 1),
    case("div\n    span\n  p", ErrorKind::UnknownIndentation(2), 15, 3, 3),
    case("div 42", ErrorKind::UnexpectedToken, 4, 1, 5),
    case("div.a =x", ErrorKind::MalformedAttributeName, 6, 1, 7),
    case("p \"abc", ErrorKind::UnterminatedString, 6, 1, 7),
)]
fn test_error_position(
    template: &str,
    kind: ErrorKind,
    offset: usize,
    line: usize,
    column: usize,
) {
    let err = parse(template).unwrap_err();
    assert_eq!(err.kind(), &kind, "{}", err);
    assert_eq!(err.offset(), offset);
    assert_eq!((err.line(), err.column()), (line, column));
}

#[rstest(
    kind,
    category,
    case(ErrorKind::UnknownInput, ErrorCategory::Lex),
    case(ErrorKind::InconsistentIndentation, ErrorCategory::Structural),
    case(ErrorKind::UnknownIndentation(3), ErrorCategory::Structural),
    case(ErrorKind::UnexpectedToken, ErrorCategory::Grammar),
    case(ErrorKind::MalformedAttributeName, ErrorCategory::Grammar),
    case(ErrorKind::UnterminatedString, ErrorCategory::Grammar)
)]
fn test_error_category(kind: ErrorKind, category: ErrorCategory) {
    assert_eq!(kind.category(), category);
}

#[test]
fn test_messages() {
    let message = |template: &str| parse(template).unwrap_err().message().to_string();

    assert_eq!(message("???"), "Unknown input encountered");
    assert_eq!(
        message("div\n  span\n\tp"),
        "Inconsistent indentation, use either tabs or spaces"
    );
    assert_eq!(
        message("div\n    span\n  p"),
        "Element has unknown indentation 2"
    );
    assert_eq!(message("div 42"), "Unexpected value");
    assert_eq!(message("div.a =x"), "Attribute name was not matched");
    assert_eq!(message("p \"abc"), "Expected end of string");
}

#[test]
fn test_unknown_input_at_start() {
    let err = parse("???").unwrap_err();
    insta::assert_snapshot!(err.to_pretty_string(), @r###"
Parse error at 1:1
1 | ???
    ^
    Unknown input encountered
"###);
}

#[test]
fn test_caret_spans_token() {
    let err = parse("section\n  div 1234").unwrap_err();
    assert_eq!(err.length(), 4);
    insta::assert_snapshot!(err.to_pretty_string(), @r###"
Parse error at 2:7
2 |   div 1234
          ^^^^
          Unexpected value
"###);
}

#[test]
fn test_tabs_render_as_spaces() {
    let err = parse("ul\n\tli\n\t\tb ~").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"
Parse error at 3:5
3 |   b ~
        ^
        Unknown input encountered
"###);
}

#[test]
fn test_unknown_indentation_points_at_element() {
    let err = parse("nav\n    a\n  b").unwrap_err();
    assert_eq!(err.code(), "  b");
    insta::assert_snapshot!(err.to_pretty_string(), @r###"
Parse error at 3:3
3 |   b
      ^
      Element has unknown indentation 2
"###);
}

#[test]
fn test_pretty_string_ends_with_newline() {
    let err = parse("div\n  ?").unwrap_err();
    assert!(err.to_pretty_string().ends_with("Unknown input encountered\n"));
}

#[test]
fn test_leading_word_before_equals_is_an_attribute() {
    let root = parse("div =x").unwrap();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].name(), None);
    assert_eq!(
        root.children[0].attribute("div").map(|value| value.as_str()),
        Some("x")
    );
}
