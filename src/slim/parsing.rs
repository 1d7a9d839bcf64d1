//! Parsing
//!
//!     Turns slim source into the raw tree ([crate::slim::ast::Node]). Lines are measured by the
//!     [indentation tracker](crate::slim::lexing::indentation), classified by
//!     [line_classification](crate::slim::lexing::line_classification) and assembled into
//!     nested blocks by the [builder]. Tag lines go through the [tag] parser, and verbatim
//!     regions through [text_block].
//!
//!     The first error aborts the parse. There is no partial tree.

pub mod builder;
pub mod cursor;
pub mod tag;
pub mod text_block;

use crate::slim::ast::Node;
use crate::slim::error::SyntaxError;
use crate::slim::lexing::indentation::IndentationTracker;
use crate::slim::options::ParserOptions;
use builder::BlockBuilder;

#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Parse a template into its raw tree, a [Node::Multi] holding the top-level nodes.
    pub fn parse(&self, source: &str) -> Result<Node, SyntaxError> {
        let mut builder = BlockBuilder::new(&self.options);
        for line in IndentationTracker::new(source, self.options.tab_size) {
            builder.push_line(line)?;
        }
        Ok(builder.finish())
    }
}

/// Parse a template with default options.
pub fn parse_document(source: &str) -> Result<Node, SyntaxError> {
    Parser::default().parse(source)
}
