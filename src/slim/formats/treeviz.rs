//! Treeviz formatter for both trees
//!
//! Treeviz renders a tree one node per line, which makes it quick to scan and easy to compare in
//! snapshot tests. Nesting is drawn with connectors:
//!
//!     ⧉
//!     └─ ◇ div class="box"
//!       ├─ ◦ Hello
//!       └─ λ if user
//!         └─ ◦ Welcome back
//!
//! The format is:
//! <prefix><connector> <icon> <label> (label truncated to 30 characters, omitted when empty)
//!
//! Icons
//!     Raw tree:
//!         Multi: ⧉
//!         Text: ◦
//!         Newline: ↵
//!         Tag: ◇
//!         Directive: !
//!         Control: λ
//!         Output: = (escaped), ≡ (unescaped)
//!         Embedded: 𝒱
//!     Intermediate tree:
//!         Multi: ⧉
//!         StaticText: ◦
//!         DynamicText: ƒ
//!         LiteralCode: λ
//!         Newline: ↵
//!         Capture: ⊂
//!         Tag: ◇
//!         Doctype: !

use crate::slim::ast::{AttrValue, Attribute, Node};
use crate::slim::compiling::ir::{CompiledAttribute, Expr};

const MAX_LABEL_CHARS: usize = 30;

/// Display form of a node, detached from the tree it came from.
struct Snapshot {
    icon: &'static str,
    label: String,
    children: Vec<Snapshot>,
}

impl Snapshot {
    fn leaf(icon: &'static str, label: impl Into<String>) -> Self {
        Self {
            icon,
            label: label.into(),
            children: Vec::new(),
        }
    }

    fn with_children(mut self, children: Vec<Snapshot>) -> Self {
        self.children = children;
        self
    }
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

fn node_snapshot(node: &Node) -> Snapshot {
    let children = || -> Vec<Snapshot> { node.children().iter().map(node_snapshot).collect() };
    match node {
        Node::Multi(_) => Snapshot::leaf("⧉", "").with_children(children()),
        Node::Text(text) => Snapshot::leaf("◦", text.as_str()),
        Node::Newline => Snapshot::leaf("↵", ""),
        Node::Tag {
            name, attributes, ..
        } => Snapshot::leaf("◇", tag_label(name, attributes.iter().map(raw_attribute)))
            .with_children(children()),
        Node::Directive(directive) => Snapshot::leaf("!", format!("doctype {}", directive.payload)),
        Node::Control { code, .. } => Snapshot::leaf("λ", code.as_str()).with_children(children()),
        Node::Output { escape, code, .. } => {
            let icon = if *escape { "=" } else { "≡" };
            Snapshot::leaf(icon, code.as_str()).with_children(children())
        }
        Node::Embedded { engine, .. } => {
            Snapshot::leaf("𝒱", engine.as_str()).with_children(children())
        }
    }
}

fn expr_snapshot(expr: &Expr) -> Snapshot {
    match expr {
        Expr::Multi(children) => {
            Snapshot::leaf("⧉", "").with_children(children.iter().map(expr_snapshot).collect())
        }
        Expr::StaticText(text) => Snapshot::leaf("◦", text.as_str()),
        Expr::DynamicText(code) => Snapshot::leaf("ƒ", code.as_str()),
        Expr::LiteralCode(code) => Snapshot::leaf("λ", code.as_str()),
        Expr::Newline => Snapshot::leaf("↵", ""),
        Expr::Capture { name, body } => {
            Snapshot::leaf("⊂", name.as_str()).with_children(vec![expr_snapshot(body)])
        }
        Expr::Tag {
            name,
            attributes,
            body,
        } => Snapshot::leaf("◇", tag_label(name, attributes.iter().map(compiled_attribute)))
            .with_children(vec![expr_snapshot(body)]),
        Expr::Doctype(payload) => Snapshot::leaf("!", payload.as_str()),
    }
}

fn raw_attribute(attribute: &Attribute) -> String {
    match &attribute.value {
        AttrValue::Static(value) => format!("{}=\"{}\"", attribute.key, value),
        AttrValue::Dynamic(code) => format!("{}={}", attribute.key, code),
    }
}

fn compiled_attribute(attribute: &CompiledAttribute) -> String {
    match &attribute.value {
        Expr::StaticText(value) => format!("{}=\"{}\"", attribute.key, value),
        Expr::DynamicText(code) => format!("{}={}", attribute.key, code),
        _ => attribute.key.clone(),
    }
}

fn tag_label(name: &str, attributes: impl Iterator<Item = String>) -> String {
    let mut label = name.to_string();
    for attribute in attributes {
        label.push(' ');
        label.push_str(&attribute);
    }
    label
}

fn node_line(snapshot: &Snapshot) -> String {
    let label = truncate(&snapshot.label, MAX_LABEL_CHARS);
    if label.is_empty() {
        snapshot.icon.to_string()
    } else {
        format!("{} {}", snapshot.icon, label)
    }
}

fn format_snapshot(
    snapshot: &Snapshot,
    prefix: &str,
    child_index: usize,
    child_count: usize,
) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let mut output = format!("{}{} {}\n", prefix, connector, node_line(snapshot));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, &child_prefix, i, child_count));
    }
    output
}

fn format_root(snapshot: &Snapshot) -> String {
    let mut output = format!("{}\n", node_line(snapshot));
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i, child_count));
    }
    output
}

/// Render a raw tree.
pub fn to_treeviz(tree: &Node) -> String {
    format_root(&node_snapshot(tree))
}

/// Render an intermediate tree.
pub fn ir_to_treeviz(tree: &Expr) -> String {
    format_root(&expr_snapshot(tree))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_raw_tree_rendering() {
        let tree = Node::Multi(vec![Node::Tag {
            name: "a".into(),
            attributes: vec![
                Attribute::new("class", AttrValue::Static("x".into())),
                Attribute::new("href", AttrValue::Dynamic("url".into())),
            ],
            body: vec![Node::Text("Home".into()), Node::Newline],
        }]);

        let expected = "⧉\n└─ ◇ a class=\"x\" href=url\n  ├─ ◦ Home\n  └─ ↵\n";
        assert_eq!(to_treeviz(&tree), expected);
    }

    #[test]
    fn test_siblings_use_vertical_connector() {
        let tree = Node::Multi(vec![
            Node::Control {
                code: "if a".into(),
                body: vec![Node::Text("x".into())],
            },
            Node::Text("y".into()),
        ]);

        let expected = "⧉\n├─ λ if a\n│ └─ ◦ x\n└─ ◦ y\n";
        assert_eq!(to_treeviz(&tree), expected);
    }

    #[test]
    fn test_ir_rendering() {
        let tree = Expr::Multi(vec![Expr::Capture {
            name: "_slimtmp2".into(),
            body: Box::new(Expr::Multi(vec![Expr::DynamicText("x".into())])),
        }]);

        let expected = "⧉\n└─ ⊂ _slimtmp2\n  └─ ⧉\n    └─ ƒ x\n";
        assert_eq!(ir_to_treeviz(&tree), expected);
    }
}
