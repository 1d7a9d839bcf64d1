//! Fluent assertion API for raw tree nodes

use crate::slim::ast::{AttrValue, DirectiveKind, Node};

/// Create an assertion builder for a parsed template.
pub fn assert_tree(tree: &Node) -> ChildrenAssertion<'_> {
    ChildrenAssertion {
        children: tree.children(),
        context: "items".to_string(),
    }
}

fn visible(children: &[Node]) -> impl Iterator<Item = &Node> {
    children.iter().filter(|node| !node.is_newline())
}

fn summarize(children: &[Node]) -> String {
    visible(children)
        .map(Node::node_type)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Children
// ============================================================================

pub struct ChildrenAssertion<'a> {
    children: &'a [Node],
    context: String,
}

impl<'a> ChildrenAssertion<'a> {
    /// Assert the number of children, not counting newline markers
    pub fn count(self, expected: usize) -> Self {
        let actual = visible(self.children).count();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {} children: [{}]",
            self.context,
            expected,
            actual,
            summarize(self.children)
        );
        self
    }

    pub fn newline_count(self, expected: usize) -> Self {
        let actual = self.children.iter().filter(|n| n.is_newline()).count();
        assert_eq!(
            actual, expected,
            "{}: Expected {} newline markers, found {}",
            self.context, expected, actual
        );
        self
    }

    /// Assert on a specific child by index, not counting newline markers
    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let count = visible(self.children).count();
        let Some(node) = visible(self.children).nth(index) else {
            panic!(
                "{}: Child index {} out of bounds ({} children)",
                self.context, index, count
            );
        };
        assertion(NodeAssertion {
            node,
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    pub fn all_tags(self) -> Self {
        for (i, child) in visible(self.children).enumerate() {
            assert!(
                matches!(child, Node::Tag { .. }),
                "{}[{}]: Expected Tag, found {}",
                self.context,
                i,
                child.node_type()
            );
        }
        self
    }
}

// ============================================================================
// Single node
// ============================================================================

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    fn unexpected(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.node.node_type()
        )
    }

    pub fn assert_tag(self) -> TagAssertion<'a> {
        match self.node {
            Node::Tag {
                name,
                attributes,
                body,
            } => TagAssertion {
                name,
                attributes: attributes
                    .iter()
                    .map(|a| (a.key.as_str(), &a.value))
                    .collect(),
                body,
                context: self.context,
            },
            _ => self.unexpected("Tag"),
        }
    }

    /// Assert this node is literal text with the given value
    pub fn assert_text(self, expected: &str) {
        match self.node {
            Node::Text(text) => assert_eq!(
                text, expected,
                "{}: Expected text {:?}, found {:?}",
                self.context, expected, text
            ),
            _ => self.unexpected("Text"),
        }
    }

    pub fn assert_control(self) -> CodeAssertion<'a> {
        match self.node {
            Node::Control { code, body } => CodeAssertion {
                code,
                escape: None,
                body,
                context: self.context,
            },
            _ => self.unexpected("Control"),
        }
    }

    pub fn assert_output(self) -> CodeAssertion<'a> {
        match self.node {
            Node::Output { escape, code, body } => CodeAssertion {
                code,
                escape: Some(*escape),
                body,
                context: self.context,
            },
            _ => self.unexpected("Output"),
        }
    }

    pub fn assert_embedded(self) -> EmbeddedAssertion<'a> {
        match self.node {
            Node::Embedded { engine, body } => EmbeddedAssertion {
                engine,
                body,
                context: self.context,
            },
            _ => self.unexpected("Embedded"),
        }
    }

    pub fn assert_doctype(self, expected: &str) {
        match self.node {
            Node::Directive(directive) => {
                assert_eq!(directive.kind, DirectiveKind::Doctype);
                assert_eq!(
                    directive.payload, expected,
                    "{}: Expected doctype {:?}, found {:?}",
                    self.context, expected, directive.payload
                );
            }
            _ => self.unexpected("Directive"),
        }
    }

    /// Assert this node is a sequence (e.g. a text block) and return its children
    pub fn assert_multi(self) -> ChildrenAssertion<'a> {
        match self.node {
            Node::Multi(children) => ChildrenAssertion {
                children,
                context: self.context,
            },
            _ => self.unexpected("Multi"),
        }
    }
}

// ============================================================================
// Tags
// ============================================================================

pub struct TagAssertion<'a> {
    name: &'a str,
    attributes: Vec<(&'a str, &'a AttrValue)>,
    body: &'a [Node],
    context: String,
}

impl<'a> TagAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.name, expected,
            "{}: Expected tag name {:?}, found {:?}",
            self.context, expected, self.name
        );
        self
    }

    pub fn attribute_count(self, expected: usize) -> Self {
        assert_eq!(
            self.attributes.len(),
            expected,
            "{}: Expected {} attributes, found {:?}",
            self.context,
            expected,
            self.attributes
        );
        self
    }

    /// Assert the attribute at `index` is `key` with a literal value
    pub fn static_attribute(self, index: usize, key: &str, value: &str) -> Self {
        self.attribute(index, key, &AttrValue::Static(value.to_string()))
    }

    /// Assert the attribute at `index` is `key` with a host expression value
    pub fn dynamic_attribute(self, index: usize, key: &str, code: &str) -> Self {
        self.attribute(index, key, &AttrValue::Dynamic(code.to_string()))
    }

    fn attribute(self, index: usize, key: &str, value: &AttrValue) -> Self {
        let Some(&(actual_key, actual_value)) = self.attributes.get(index) else {
            panic!(
                "{}: Attribute index {} out of bounds ({} attributes)",
                self.context,
                index,
                self.attributes.len()
            );
        };
        assert_eq!(
            (actual_key, actual_value),
            (key, value),
            "{}: Attribute {} mismatch",
            self.context,
            index
        );
        self
    }

    /// Assert the tag holds exactly one inline text
    pub fn text(self, expected: &str) -> Self {
        match self.body {
            [Node::Text(text)] => assert_eq!(
                text, expected,
                "{}: Expected inline text {:?}, found {:?}",
                self.context, expected, text
            ),
            _ => panic!(
                "{}: Expected a single text child, found [{}]",
                self.context,
                summarize(self.body)
            ),
        }
        self
    }

    pub fn body<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ChildrenAssertion<'a>),
    {
        assertion(ChildrenAssertion {
            children: self.body,
            context: format!("{}.body", self.context),
        });
        self
    }
}

// ============================================================================
// Control and output code
// ============================================================================

pub struct CodeAssertion<'a> {
    code: &'a str,
    /// `None` for control code.
    escape: Option<bool>,
    body: &'a [Node],
    context: String,
}

impl<'a> CodeAssertion<'a> {
    pub fn code(self, expected: &str) -> Self {
        assert_eq!(
            self.code, expected,
            "{}: Expected code {:?}, found {:?}",
            self.context, expected, self.code
        );
        self
    }

    pub fn escaped(self, expected: bool) -> Self {
        assert_eq!(
            self.escape,
            Some(expected),
            "{}: Expected escape {}, found {:?}",
            self.context,
            expected,
            self.escape
        );
        self
    }

    pub fn empty_body(self) -> Self {
        assert!(
            self.body.is_empty(),
            "{}: Expected empty body, found [{}]",
            self.context,
            summarize(self.body)
        );
        self
    }

    pub fn body<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ChildrenAssertion<'a>),
    {
        assertion(ChildrenAssertion {
            children: self.body,
            context: format!("{}.body", self.context),
        });
        self
    }
}

// ============================================================================
// Embedded blocks
// ============================================================================

pub struct EmbeddedAssertion<'a> {
    engine: &'a str,
    body: &'a [Node],
    context: String,
}

impl<'a> EmbeddedAssertion<'a> {
    pub fn engine(self, expected: &str) -> Self {
        assert_eq!(
            self.engine, expected,
            "{}: Expected engine {:?}, found {:?}",
            self.context, expected, self.engine
        );
        self
    }

    /// Assert the captured text lines, in order
    pub fn lines(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .body
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            actual, expected,
            "{}: Embedded lines mismatch",
            self.context
        );
        self
    }
}
