//! Compiling
//!
//!     Rewrites the raw tree ([crate::slim::ast::Node]) into the intermediate tree
//!     ([ir::Expr]) handed to a code generation backend. The rewrite is pure: the raw tree is
//!     only read, and the result is a new tree.
//!
//! Node by node
//!
//!     - Text without `#{` stays static. Text with it becomes a quoted host string whose
//!       interpolations are escaped (see [interpolation]).
//!     - `- code` becomes the code followed by its compiled body.
//!     - `= code` without a body becomes dynamic text, wrapped in the escape helper unless it
//!       was `==`.
//!     - `= code` with a body is a block helper. Its value is captured in a temporary, the body
//!       is rendered into a second temporary that the block yields, and the first temporary is
//!       then output like a bodiless `= code`:
//!
//!           _slimtmp1 = form_for @user do |f|
//!           capture _slimtmp2 { ...body... }
//!           _slimtmp2
//!           output _slimtmp1
//!
//!     - Tags keep their name; attribute values are compiled like text.
//!     - Embedded blocks are handed to the injected [embedded::EmbeddedEngines].
//!
//!     Temporaries are numbered from 1 in each [Compiler::compile] call, so a compiler can be
//!     shared and reused freely.

pub mod embedded;
pub mod interpolation;
pub mod ir;

use log::debug;

use crate::slim::ast::{AttrValue, Attribute, Node};
use crate::slim::error::EmbedError;
use crate::slim::options::CompilerOptions;
use embedded::{block_lines, EmbeddedEngines, EmbeddedOutput};
use interpolation::{has_interpolation, rewrite_interpolation};
use ir::{CompiledAttribute, Expr};

pub struct Compiler<'e> {
    options: CompilerOptions,
    engines: &'e dyn EmbeddedEngines,
}

impl<'e> Compiler<'e> {
    pub fn new(options: CompilerOptions, engines: &'e dyn EmbeddedEngines) -> Self {
        Self { options, engines }
    }

    /// Compile a raw tree. Fails only when an embedded engine does.
    pub fn compile(&self, tree: &Node) -> Result<Expr, EmbedError> {
        CompilePass {
            options: &self.options,
            engines: self.engines,
            temp_counter: 0,
        }
        .compile(tree)
    }
}

/// State of a single [Compiler::compile] call.
struct CompilePass<'c> {
    options: &'c CompilerOptions,
    engines: &'c dyn EmbeddedEngines,
    temp_counter: usize,
}

impl CompilePass<'_> {
    fn compile(&mut self, node: &Node) -> Result<Expr, EmbedError> {
        let expr = match node {
            Node::Multi(children) => self.compile_body(children)?,
            Node::Text(text) => self.compile_text(text),
            Node::Newline => Expr::Newline,
            Node::Tag {
                name,
                attributes,
                body,
            } => Expr::Tag {
                name: name.clone(),
                attributes: attributes
                    .iter()
                    .map(|attribute| self.compile_attribute(attribute))
                    .collect(),
                body: Box::new(self.compile_body(body)?),
            },
            Node::Directive(directive) => Expr::Doctype(directive.payload.clone()),
            Node::Control { code, body } => Expr::Multi(vec![
                Expr::LiteralCode(code.clone()),
                self.compile_body(body)?,
            ]),
            Node::Output { escape, code, body } => self.compile_output(*escape, code, body)?,
            Node::Embedded { engine, body } => self.compile_embedded(engine, body)?,
        };
        Ok(expr)
    }

    fn compile_body(&mut self, body: &[Node]) -> Result<Expr, EmbedError> {
        let children = body
            .iter()
            .map(|node| self.compile(node))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Expr::Multi(children))
    }

    fn compile_text(&self, text: &str) -> Expr {
        if !has_interpolation(text) {
            return Expr::StaticText(text.to_string());
        }
        let rewritten = rewrite_interpolation(text, |payload| self.interpolation_payload(payload));
        Expr::DynamicText(format!("\"{}\"", rewritten))
    }

    fn compile_attribute(&self, attribute: &Attribute) -> CompiledAttribute {
        let value = match &attribute.value {
            AttrValue::Static(text) => self.compile_text(text),
            AttrValue::Dynamic(code) => {
                Expr::DynamicText(format!("\"#{{{}}}\"", self.interpolation_payload(code)))
            }
        };
        CompiledAttribute {
            key: attribute.key.clone(),
            value,
        }
    }

    fn interpolation_payload(&self, code: &str) -> String {
        if self.options.escape_interpolation {
            self.options.escape_code(code)
        } else {
            code.to_string()
        }
    }

    fn compile_output(
        &mut self,
        escape: bool,
        code: &str,
        body: &[Node],
    ) -> Result<Expr, EmbedError> {
        // Blank lines alone do not make a block.
        if body.iter().all(Node::is_newline) {
            let output = self.output_expr(escape, code);
            if body.is_empty() {
                return Ok(output);
            }
            let mut children = vec![output];
            children.extend(body.iter().map(|_| Expr::Newline));
            return Ok(Expr::Multi(children));
        }

        let value = self.temp_var();
        let buffer = self.temp_var();
        debug!("output block `{}` uses {} and {}", code, value, buffer);
        Ok(Expr::Multi(vec![
            Expr::LiteralCode(format!("{} = {}", value, code)),
            Expr::Capture {
                name: buffer.clone(),
                body: Box::new(self.compile_body(body)?),
            },
            Expr::LiteralCode(buffer),
            self.output_expr(escape, &value),
        ]))
    }

    fn output_expr(&self, escape: bool, code: &str) -> Expr {
        if escape {
            Expr::DynamicText(self.options.escape_code(code))
        } else {
            Expr::DynamicText(code.to_string())
        }
    }

    fn compile_embedded(&mut self, engine: &str, body: &[Node]) -> Result<Expr, EmbedError> {
        let lines = block_lines(body);
        debug!("embedded block: {} lines for engine {}", lines.len(), engine);

        Ok(match self.engines.compile(engine, &lines)? {
            EmbeddedOutput::Static(output) => Expr::StaticText(output),
            EmbeddedOutput::Expression(code) => Expr::DynamicText(code),
        })
    }

    fn temp_var(&mut self) -> String {
        self.temp_counter += 1;
        format!("{}{}", self.options.temp_prefix, self.temp_counter)
    }
}
