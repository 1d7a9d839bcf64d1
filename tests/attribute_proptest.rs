//! Property-based tests for attribute parsing
//!
//! - Attributes come back in source order, duplicates included
//! - Quoted values are taken literally, unquoted ones as host expressions
//! - Delimited values capture balanced nested groups whole, and unbalanced ones fail

use proptest::prelude::*;
use slim::slim::ast::{AttrValue, Attribute, Node};
use slim::slim::error::SyntaxErrorKind;
use slim::slim::parsing::parse_document;

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9]{0,8}",
        "[a-z][a-z0-9_-]{1,8}",
        "data-[a-z]{1,6}",
    ]
}

fn value_strategy() -> impl Strategy<Value = AttrValue> {
    prop_oneof![
        "[a-zA-Z0-9 ./:-]{0,16}".prop_map(AttrValue::Static),
        "[a-z_][a-z0-9_.\\[\\]:]{0,12}".prop_map(AttrValue::Dynamic),
    ]
}

fn render_value(value: &AttrValue) -> String {
    match value {
        AttrValue::Static(text) => format!("\"{text}\""),
        AttrValue::Dynamic(code) => code.clone(),
    }
}

fn attributes_of(tree: &Node) -> Vec<Attribute> {
    match &tree.children()[0] {
        Node::Tag { attributes, .. } => attributes.clone(),
        other => panic!("expected Tag, found {}", other.node_type()),
    }
}

/// Balanced groups of parentheses around identifiers, e.g. `f(a(b)c)`.
fn balanced_strategy() -> impl Strategy<Value = String> {
    let leaf = "[a-z]{1,4}";
    leaf.prop_recursive(3, 16, 3, |inner| {
        (
            "[a-z]{0,3}",
            prop::collection::vec(inner, 1..3),
            "[a-z]{0,3}",
        )
            .prop_map(|(before, parts, after)| format!("{before}({}){after}", parts.join(" ")))
    })
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_attribute_order_preserved(
            pairs in prop::collection::vec((key_strategy(), value_strategy()), 1..6),
        ) {
            let rendered: Vec<String> = pairs
                .iter()
                .map(|(key, value)| format!("{key}={}", render_value(value)))
                .collect();
            let source = format!("a {} Link", rendered.join(" "));

            let tree = parse_document(&source).unwrap();
            let expected: Vec<Attribute> = pairs
                .into_iter()
                .map(|(key, value)| Attribute::new(key, value))
                .collect();
            prop_assert_eq!(attributes_of(&tree), expected);
        }

        #[test]
        fn test_wrapped_list_matches_bare_list(
            pairs in prop::collection::vec((key_strategy(), value_strategy()), 1..6),
        ) {
            let rendered: Vec<String> = pairs
                .iter()
                .map(|(key, value)| format!("{key}={}", render_value(value)))
                .collect();
            let bare = parse_document(&format!("a {} Link", rendered.join(" "))).unwrap();
            let wrapped = parse_document(&format!("a({}) Link", rendered.join(" "))).unwrap();
            prop_assert_eq!(attributes_of(&bare), attributes_of(&wrapped));
        }

        #[test]
        fn test_balanced_group_is_one_value(group in balanced_strategy()) {
            let source = format!("p key=({group}) text");
            let tree = parse_document(&source).unwrap();
            prop_assert_eq!(
                attributes_of(&tree),
                vec![Attribute::new("key", AttrValue::Dynamic(group))]
            );
        }

        #[test]
        fn test_unbalanced_group_fails(group in balanced_strategy()) {
            let source = format!("p key=(({group})");
            let err = parse_document(&source).unwrap_err();
            prop_assert_eq!(err.kind, SyntaxErrorKind::MissingAttributeEndDelimiter(')'));
            prop_assert_eq!(err.column, 6);
        }
    }
}
