//! Raw node tree
//!
//!     The parser's output. Every line of the template ends up as at most one node in this
//!     tree (blank lines become [Node::Newline] markers), and nodes that expect deeper content
//!     own that content as their `body`.
//!
//!     Host-language code (`code` fields, dynamic attribute values) is never looked at here.
//!     It is stored verbatim and handed on to the compiler and backend unchanged.
//!
//!     The tree is built once by [crate::slim::parsing] and never mutated afterwards; the
//!     compiler reads it and produces a separate tree.

use serde::Serialize;

/// A node of the raw tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
    /// Ordered sequence of nodes. Order is output order.
    Multi(Vec<Node>),
    /// Literal text, possibly containing `#{...}` interpolations.
    Text(String),
    /// Keeps source line alignment; produces no output.
    Newline,
    /// An element. `body` is the element's content (always present, possibly empty).
    Tag {
        name: String,
        attributes: Vec<Attribute>,
        body: Vec<Node>,
    },
    Directive(Directive),
    /// A control statement (`- if x`) whose body is rendered under it.
    Control { code: String, body: Vec<Node> },
    /// An output expression (`= x`, `== x`). A non-empty body means the code opens a
    /// block whose yielded content is that body.
    Output {
        escape: bool,
        code: String,
        body: Vec<Node>,
    },
    /// A block handed to a named sub-language engine. The body holds the captured lines.
    Embedded { engine: String, body: Vec<Node> },
}

impl Node {
    pub fn node_type(&self) -> &'static str {
        match self {
            Node::Multi(_) => "Multi",
            Node::Text(_) => "Text",
            Node::Newline => "Newline",
            Node::Tag { .. } => "Tag",
            Node::Directive(_) => "Directive",
            Node::Control { .. } => "Control",
            Node::Output { .. } => "Output",
            Node::Embedded { .. } => "Embedded",
        }
    }

    /// Children of the node, if it has any.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Multi(children) => children,
            Node::Tag { body, .. }
            | Node::Control { body, .. }
            | Node::Output { body, .. }
            | Node::Embedded { body, .. } => body,
            Node::Text(_) | Node::Newline | Node::Directive(_) => &[],
        }
    }

    pub fn is_newline(&self) -> bool {
        matches!(self, Node::Newline)
    }
}

/// A `key=value` pair on a tag line, in source order. Duplicate keys are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub key: String,
    pub value: AttrValue,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: AttrValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttrValue {
    /// Quoted or shorthand value, taken literally.
    Static(String),
    /// Host expression to be interpolated at render time.
    Dynamic(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DirectiveKind {
    Doctype,
}

/// A `!` line, e.g. `! doctype html`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub payload: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_of_leaf_nodes_are_empty() {
        assert!(Node::Text("hi".into()).children().is_empty());
        assert!(Node::Newline.children().is_empty());
    }

    #[test]
    fn test_children_of_tag_is_body() {
        let tag = Node::Tag {
            name: "p".into(),
            attributes: vec![],
            body: vec![Node::Text("x".into())],
        };
        assert_eq!(tag.children(), &[Node::Text("x".into())]);
        assert_eq!(tag.node_type(), "Tag");
    }
}
