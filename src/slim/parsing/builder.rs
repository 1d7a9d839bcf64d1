//! Block builder
//!
//!     Builds the raw tree from measured lines in a single pass.
//!
//! Frames
//!
//!     Open blocks are kept on a stack of frames. Each frame pairs an indentation width with the
//!     block receiving lines at that width. The root block sits below the stack at width 0 and
//!     is never popped.
//!
//!     A line that can own deeper content (a bare tag, code, a text marker, ...) does not push a
//!     frame right away, since its width is only known once the next line shows up. Instead its
//!     block is kept as `pending`. On the next non-blank line:
//!
//!         - deeper than the current frame: the pending block becomes a new frame at that width.
//!           Without a pending block this is an "Unexpected indentation" error.
//!         - otherwise the pending block is closed with whatever it received so far (usually
//!           nothing) and added to the current frame.
//!
//!     A shallower line then pops frames until it reaches one at exactly its width. Passing
//!     below its width without a match is a "Malformed indentation" error:
//!
//!         p
//!             a
//!           b      <- between 0 and 4
//!
//!     Holding the pending block apart from the frames keeps "at most one block waits for
//!     indentation" a property of the types rather than of two stacks kept in sync.
//!
//! Closing
//!
//!     Blocks own their children, and a closed block is appended to the frame below it. Since
//!     nothing is added to a frame while one of its children is open, appending on close keeps
//!     source order. Running out of input closes everything that is still open; trailing
//!     indentation is not an error.

use log::{debug, trace};

use crate::slim::ast::{Attribute, Directive, DirectiveKind, Node};
use crate::slim::error::{SyntaxError, SyntaxErrorKind};
use crate::slim::lexing::indentation::SourceLine;
use crate::slim::lexing::line_classification::{classify_line, LineType};
use crate::slim::options::ParserOptions;
use crate::slim::parsing::tag::{parse_tag, TagContent};
use crate::slim::parsing::text_block::TextBlock;

/// The construct a block belongs to, which decides the node it turns into once closed.
#[derive(Debug)]
enum Opener {
    Tag {
        name: String,
        attributes: Vec<Attribute>,
    },
    /// A tag whose inline `= code` receives the deeper lines.
    TagOutput {
        name: String,
        attributes: Vec<Attribute>,
        escape: bool,
        code: String,
    },
    Control {
        code: String,
    },
    Output {
        escape: bool,
        code: String,
    },
    Text,
    Embedded {
        engine: String,
    },
}

#[derive(Debug)]
struct Block {
    opener: Opener,
    children: Vec<Node>,
}

impl Block {
    fn new(opener: Opener) -> Self {
        Self {
            opener,
            children: Vec::new(),
        }
    }

    fn close(self) -> Node {
        let body = self.children;
        match self.opener {
            Opener::Tag { name, attributes } => Node::Tag {
                name,
                attributes,
                body,
            },
            Opener::TagOutput {
                name,
                attributes,
                escape,
                code,
            } => Node::Tag {
                name,
                attributes,
                body: vec![Node::Output { escape, code, body }],
            },
            Opener::Control { code } => Node::Control { code, body },
            Opener::Output { escape, code } => Node::Output { escape, code, body },
            Opener::Text => Node::Multi(body),
            Opener::Embedded { engine } => Node::Embedded { engine, body },
        }
    }
}

#[derive(Debug)]
struct Frame {
    depth: usize,
    block: Block,
}

/// Incremental builder of the raw tree. Feed it lines with [BlockBuilder::push_line], then
/// take the tree with [BlockBuilder::finish].
#[derive(Debug)]
pub struct BlockBuilder<'o> {
    options: &'o ParserOptions,
    root: Vec<Node>,
    frames: Vec<Frame>,
    pending: Option<Block>,
    text_block: Option<TextBlock>,
}

impl<'o> BlockBuilder<'o> {
    pub fn new(options: &'o ParserOptions) -> Self {
        Self {
            options,
            root: Vec::new(),
            frames: Vec::new(),
            pending: None,
            text_block: None,
        }
    }

    /// Whether the previous line opened a block that is waiting for deeper lines.
    pub fn is_expecting_indentation(&self) -> bool {
        self.pending.is_some()
    }

    /// Width of the innermost open frame.
    pub fn current_depth(&self) -> usize {
        self.frames.last().map_or(0, |frame| frame.depth)
    }

    pub fn push_line(&mut self, line: SourceLine<'_>) -> Result<(), SyntaxError> {
        if line.is_blank() {
            self.insertion_point().push(Node::Newline);
            return Ok(());
        }

        let line_type = classify_line(line.text);
        trace!(
            "line {} (width {}): {}",
            line.number,
            line.width,
            line_type.name()
        );

        if line_type == LineType::Comment {
            return Ok(());
        }
        if self.capture_text(&line) {
            return Ok(());
        }

        self.adjust_indentation(&line)?;
        self.build(&line, line_type)
    }

    /// Close every open block and return the root.
    pub fn finish(mut self) -> Node {
        if let Some(block) = self.pending.take() {
            let node = block.close();
            self.current().push(node);
        }
        while !self.frames.is_empty() {
            self.pop_frame();
        }
        Node::Multi(self.root)
    }

    fn current(&mut self) -> &mut Vec<Node> {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.block.children,
            None => &mut self.root,
        }
    }

    /// Where a blank line's newline goes: the pending block if there is one.
    fn insertion_point(&mut self) -> &mut Vec<Node> {
        match (&mut self.pending, self.frames.last_mut()) {
            (Some(block), _) => &mut block.children,
            (None, Some(frame)) => &mut frame.block.children,
            (None, None) => &mut self.root,
        }
    }

    fn pop_frame(&mut self) {
        if let Some(frame) = self.frames.pop() {
            debug!("close frame at width {}", frame.depth);
            let node = frame.block.close();
            self.current().push(node);
        }
    }

    /// Take the line into the open text block, if it belongs there.
    fn capture_text(&mut self, line: &SourceLine<'_>) -> bool {
        let opener_width = self.current_depth();
        let captured = match self.text_block.as_mut() {
            Some(text_block) => text_block.capture(line.width, line.text, opener_width),
            None => return false,
        };
        let Some(text) = captured else {
            self.text_block = None;
            return false;
        };

        let lines = [Node::Text(text), Node::Newline];
        match self.pending.take() {
            Some(mut block) => {
                block.children.extend(lines);
                debug!("open text frame at width {}", line.width);
                self.frames.push(Frame {
                    depth: line.width,
                    block,
                });
            }
            None => self.current().extend(lines),
        }
        true
    }

    fn adjust_indentation(&mut self, line: &SourceLine<'_>) -> Result<(), SyntaxError> {
        let depth = self.current_depth();

        if line.width > depth {
            let Some(block) = self.pending.take() else {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnexpectedIndentation,
                    line.text,
                    line.number,
                ));
            };
            debug!("open frame at width {}", line.width);
            self.frames.push(Frame {
                depth: line.width,
                block,
            });
            return Ok(());
        }

        if let Some(block) = self.pending.take() {
            let node = block.close();
            self.current().push(node);
        }

        if line.width < depth {
            self.text_block = None;
            while self.current_depth() > line.width {
                self.pop_frame();
            }
            if self.current_depth() != line.width {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::MalformedIndentation,
                    line.text,
                    line.number,
                ));
            }
        }
        Ok(())
    }

    fn open(&mut self, opener: Opener) {
        self.pending = Some(Block::new(opener));
    }

    fn build(&mut self, line: &SourceLine<'_>, line_type: LineType<'_>) -> Result<(), SyntaxError> {
        match line_type {
            LineType::Blank | LineType::Comment => {}
            LineType::Text(text) if text.trim().is_empty() => {
                self.open(Opener::Text);
                self.text_block = Some(TextBlock::new());
            }
            LineType::Text(text) => self.current().push(Node::Text(text.to_string())),
            LineType::Control(code) => self.open(Opener::Control {
                code: code.to_string(),
            }),
            LineType::Output { escape, code } => self.open(Opener::Output {
                escape,
                code: code.to_string(),
            }),
            LineType::Directive(rest) => {
                let directive = parse_directive(rest, line)?;
                self.current().push(Node::Directive(directive));
            }
            LineType::Embedded(engine) => {
                self.open(Opener::Embedded {
                    engine: engine.to_string(),
                });
                self.text_block = Some(TextBlock::new());
            }
            LineType::Tag => {
                let tag = parse_tag(line.text, line.number, &self.options.default_tag)?;
                match tag.content {
                    TagContent::Open => self.open(Opener::Tag {
                        name: tag.name,
                        attributes: tag.attributes,
                    }),
                    TagContent::Output { escape, code } => self.open(Opener::TagOutput {
                        name: tag.name,
                        attributes: tag.attributes,
                        escape,
                        code,
                    }),
                    TagContent::Text(text) => self.current().push(Node::Tag {
                        name: tag.name,
                        attributes: tag.attributes,
                        body: vec![Node::Text(text)],
                    }),
                }
            }
        }
        Ok(())
    }
}

/// Parse the part of a `!` line after the marker. Only doctypes are known.
fn parse_directive(rest: &str, line: &SourceLine<'_>) -> Result<Directive, SyntaxError> {
    let keyword_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (keyword, payload) = rest.split_at(keyword_len);
    match keyword {
        "doctype" => Ok(Directive {
            kind: DirectiveKind::Doctype,
            payload: payload.trim().to_string(),
        }),
        _ => Err(SyntaxError::new(
            SyntaxErrorKind::UnknownDirective(keyword.to_string()),
            line.text,
            line.number,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slim::lexing::indentation::IndentationTracker;

    fn build(source: &str) -> Result<Node, SyntaxError> {
        let options = ParserOptions::default();
        let mut builder = BlockBuilder::new(&options);
        for line in IndentationTracker::new(source, options.tab_size) {
            builder.push_line(line)?;
        }
        Ok(builder.finish())
    }

    fn tag(name: &str, body: Vec<Node>) -> Node {
        Node::Tag {
            name: name.to_string(),
            attributes: vec![],
            body,
        }
    }

    fn text(value: &str) -> Node {
        Node::Text(value.to_string())
    }

    #[test]
    fn test_pending_block_waits_for_next_line() {
        let options = ParserOptions::default();
        let mut builder = BlockBuilder::new(&options);
        let mut lines = IndentationTracker::new("div\n  p", 4);

        builder.push_line(lines.next().unwrap()).unwrap();
        assert!(builder.is_expecting_indentation());
        assert_eq!(builder.current_depth(), 0);

        builder.push_line(lines.next().unwrap()).unwrap();
        assert_eq!(builder.current_depth(), 2);
    }

    #[test]
    fn test_nested_tags() {
        let tree = build("div\n  p Hello\n").unwrap();
        assert_eq!(
            tree,
            Node::Multi(vec![tag("div", vec![tag("p", vec![text("Hello")])])])
        );
    }

    #[test]
    fn test_unused_pending_block_closes_empty() {
        let tree = build("hr\np\n  | x\n").unwrap();
        assert_eq!(
            tree,
            Node::Multi(vec![tag("hr", vec![]), tag("p", vec![text("x")])])
        );
    }

    #[test]
    fn test_blank_line_goes_to_pending_block() {
        let tree = build("body\n\n  p Hi\n").unwrap();
        assert_eq!(
            tree,
            Node::Multi(vec![tag("body", vec![Node::Newline, tag("p", vec![text("Hi")])])])
        );
    }

    #[test]
    fn test_dedent_pops_to_matching_width() {
        let tree = build("ul\n  li\n    a\nfooter\n").unwrap();
        assert_eq!(
            tree,
            Node::Multi(vec![
                tag("ul", vec![tag("li", vec![tag("a", vec![])])]),
                tag("footer", vec![]),
            ])
        );
    }

    #[test]
    fn test_unexpected_indentation() {
        let err = build("p Hello\n  span\n").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedIndentation);
        assert_eq!(err.line_number, 2);
        assert_eq!(err.line, "span");
    }

    #[test]
    fn test_malformed_indentation() {
        let err = build("p\n    a\n  b\n").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::MalformedIndentation);
        assert_eq!(err.line_number, 3);
    }

    #[test]
    fn test_text_block_keeps_relative_indentation() {
        let tree = build("p\n  |\n    Hello\n      World\n").unwrap();
        assert_eq!(
            tree,
            Node::Multi(vec![tag(
                "p",
                vec![Node::Multi(vec![
                    text("Hello"),
                    Node::Newline,
                    text("  World"),
                    Node::Newline,
                ])]
            )])
        );
    }

    #[test]
    fn test_text_block_ends_on_dedent() {
        let tree = build("|\n  a\n  - b\np\n").unwrap();
        assert_eq!(
            tree,
            Node::Multi(vec![
                Node::Multi(vec![text("a"), Node::Newline, text("- b"), Node::Newline]),
                tag("p", vec![]),
            ])
        );
    }

    #[test]
    fn test_text_marker_without_deeper_line_is_empty() {
        let tree = build("|\np\n").unwrap();
        assert_eq!(tree, Node::Multi(vec![Node::Multi(vec![]), tag("p", vec![])]));
    }

    #[test]
    fn test_embedded_block_captures_lines() {
        let tree = build("markdown:\n  # Title\n\n  text\n").unwrap();
        assert_eq!(
            tree,
            Node::Multi(vec![Node::Embedded {
                engine: "markdown".to_string(),
                body: vec![
                    text("# Title"),
                    Node::Newline,
                    Node::Newline,
                    text("text"),
                    Node::Newline,
                ],
            }])
        );
    }

    #[test]
    fn test_inline_output_receives_block() {
        let tree = build("p = form do\n  | inside\n").unwrap();
        assert_eq!(
            tree,
            Node::Multi(vec![tag(
                "p",
                vec![Node::Output {
                    escape: true,
                    code: "form do".to_string(),
                    body: vec![text("inside")],
                }]
            )])
        );
    }

    #[test]
    fn test_comment_lines_are_dropped() {
        let tree = build("p\n  / note\n  | shown\n").unwrap();
        assert_eq!(tree, Node::Multi(vec![tag("p", vec![text("shown")])]));
    }

    #[test]
    fn test_doctype_directive() {
        let tree = build("! doctype html5\n").unwrap();
        assert_eq!(
            tree,
            Node::Multi(vec![Node::Directive(Directive {
                kind: DirectiveKind::Doctype,
                payload: "html5".to_string(),
            })])
        );
    }

    #[test]
    fn test_unknown_directive() {
        let err = build("! cdata x\n").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnknownDirective("cdata".to_string()));
    }

    #[test]
    fn test_trailing_open_blocks_are_closed() {
        let tree = build("- if a\n  - if b\n    p\n").unwrap();
        assert_eq!(
            tree,
            Node::Multi(vec![Node::Control {
                code: "if a".to_string(),
                body: vec![Node::Control {
                    code: "if b".to_string(),
                    body: vec![tag("p", vec![])],
                }],
            }])
        );
    }
}
