//! Main module for slim library functionality
//!
//!     Slim is a whitespace-significant, line-oriented markup for HTML. Nesting comes from
//!     indentation alone, every line starts with an indicator telling what it is (a tag, text,
//!     host code, a comment, a directive or an embedded engine), and host-language code is
//!     carried around as opaque text.
//!
//! The Pipeline
//!
//!     raw text
//!       → [lexing::indentation]            (width, dedented text) per line
//!       → [lexing::line_classification]    what kind of line it is
//!       → [parsing::builder]               raw node tree ([ast::Node])
//!       → [compiling::Compiler]            intermediate tree ([compiling::ir::Expr])
//!
//!     Parsing is a single pass with an explicit stack of frames; compiling is a pure rewrite.
//!     Neither stage keeps state between calls, so independent templates can be processed
//!     concurrently.

pub mod ast;
pub mod compiling;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod options;
pub mod parsing;
pub mod testing;

use crate::slim::compiling::embedded::EmbeddedEngines;
use crate::slim::compiling::ir::Expr;
use crate::slim::compiling::Compiler;
use crate::slim::error::Error;
use crate::slim::options::{CompilerOptions, ParserOptions};

pub use crate::slim::parsing::parse_document;

/// Parse and compile a template in one go.
pub fn compile_template(
    source: &str,
    parser_options: &ParserOptions,
    compiler_options: &CompilerOptions,
    engines: &dyn EmbeddedEngines,
) -> Result<Expr, Error> {
    let tree = parsing::Parser::new(parser_options.clone()).parse(source)?;
    let compiled = Compiler::new(compiler_options.clone(), engines).compile(&tree)?;
    Ok(compiled)
}
