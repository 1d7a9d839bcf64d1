//! Embedded engines
//!
//!     A line like `markdown:` hands the verbatim block below it to another template engine.
//!     The compiler knows nothing about these engines; the caller injects them through
//!     [EmbeddedEngines] and the compiler only forwards the captured lines.
//!
//!     An engine reports either finished output ([EmbeddedOutput::Static]), which the compiler
//!     inlines as static text, or a host expression ([EmbeddedOutput::Expression]) that renders
//!     the block against the render context at run time.

use crate::slim::ast::Node;
use crate::slim::error::EmbedError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddedOutput {
    Static(String),
    Expression(String),
}

pub trait EmbeddedEngines {
    /// Compile the block's lines with the engine named `engine`.
    fn compile(&self, engine: &str, lines: &[String]) -> Result<EmbeddedOutput, EmbedError>;
}

impl<F> EmbeddedEngines for F
where
    F: Fn(&str, &[String]) -> Result<EmbeddedOutput, EmbedError>,
{
    fn compile(&self, engine: &str, lines: &[String]) -> Result<EmbeddedOutput, EmbedError> {
        self(engine, lines)
    }
}

/// The verbatim lines of an embedded block body, as handed to the engine.
///
/// Every captured line is followed by its own newline marker. Any other marker comes from a
/// blank source line and becomes an empty line.
pub fn block_lines(body: &[Node]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut after_text = false;
    for node in body {
        match node {
            Node::Text(text) => {
                lines.push(text.clone());
                after_text = true;
            }
            Node::Newline if after_text => after_text = false,
            Node::Newline => lines.push(String::new()),
            _ => after_text = false,
        }
    }
    lines
}

/// Knows no engines. Any embedded block fails to compile.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEmbeddedEngines;

impl EmbeddedEngines for NoEmbeddedEngines {
    fn compile(&self, engine: &str, _lines: &[String]) -> Result<EmbeddedOutput, EmbedError> {
        Err(EmbedError::UnknownEngine(engine.to_string()))
    }
}
