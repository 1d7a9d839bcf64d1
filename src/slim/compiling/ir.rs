//! Intermediate tree
//!
//!     The compiler's output and the hand-off to a code generation backend. It only knows
//!     about output text, host code and HTML structure; all slim syntax is gone by this point.
//!
//!     The backend linearizes the tree in order: [Expr::StaticText] is emitted as is,
//!     [Expr::DynamicText] is evaluated and emitted, [Expr::LiteralCode] is spliced into the
//!     generated program, and [Expr::Capture] renders its body into a buffer bound to `name`
//!     instead of the output. Closing host-language blocks opened by [Expr::LiteralCode] is up
//!     to the backend.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expr {
    Multi(Vec<Expr>),
    StaticText(String),
    DynamicText(String),
    LiteralCode(String),
    Newline,
    Capture {
        name: String,
        body: Box<Expr>,
    },
    Tag {
        name: String,
        attributes: Vec<CompiledAttribute>,
        body: Box<Expr>,
    },
    Doctype(String),
}

/// An attribute whose value is [Expr::StaticText] or [Expr::DynamicText].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledAttribute {
    pub key: String,
    pub value: Expr,
}

impl Expr {
    pub fn node_type(&self) -> &'static str {
        match self {
            Expr::Multi(_) => "Multi",
            Expr::StaticText(_) => "StaticText",
            Expr::DynamicText(_) => "DynamicText",
            Expr::LiteralCode(_) => "LiteralCode",
            Expr::Newline => "Newline",
            Expr::Capture { .. } => "Capture",
            Expr::Tag { .. } => "Tag",
            Expr::Doctype(_) => "Doctype",
        }
    }

    /// JSON form of the tree, for backends running out of process.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_shape() {
        let expr = Expr::Tag {
            name: "p".to_string(),
            attributes: vec![CompiledAttribute {
                key: "id".to_string(),
                value: Expr::StaticText("first".to_string()),
            }],
            body: Box::new(Expr::Multi(vec![Expr::Newline])),
        };

        assert_eq!(
            expr.to_json().unwrap(),
            json!({
                "Tag": {
                    "name": "p",
                    "attributes": [{"key": "id", "value": {"StaticText": "first"}}],
                    "body": {"Multi": ["Newline"]}
                }
            })
        );
    }
}
