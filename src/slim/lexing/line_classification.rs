//! Line Classification
//!
//! Decides what construct a dedented line is from its leading indicator. This is a pure
//! function of the line text; nesting and text-block state are handled by the block builder.
//!
//!     / { [    comment, dropped
//!     | ' `    text (an empty remainder opens a text block)
//!     - = ==   control code, escaped output, unescaped output
//!     !        directive
//!     ...:     embedded engine block, named by everything before the colon
//!     else     tag line, handed to the tag parser

/// The construct a single line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType<'a> {
    Blank,
    Comment,
    /// Text after the marker, with one optional leading space removed.
    Text(&'a str),
    Control(&'a str),
    Output { escape: bool, code: &'a str },
    /// Everything after `!`, trimmed.
    Directive(&'a str),
    /// Everything before the trailing colon, naming the engine.
    Embedded(&'a str),
    Tag,
}

impl LineType<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            LineType::Blank => "blank",
            LineType::Comment => "comment",
            LineType::Text(_) => "text",
            LineType::Control(_) => "control",
            LineType::Output { .. } => "output",
            LineType::Directive(_) => "directive",
            LineType::Embedded(_) => "embedded",
            LineType::Tag => "tag",
        }
    }
}

/// Determine the type of a dedented line.
pub fn classify_line(text: &str) -> LineType<'_> {
    if text.trim().is_empty() {
        return LineType::Blank;
    }
    if is_comment(text) {
        return LineType::Comment;
    }
    if let Some(rest) = text.strip_prefix(&['|', '\'', '`'][..]) {
        return LineType::Text(rest.strip_prefix(' ').unwrap_or(rest));
    }
    if let Some(code) = text.strip_prefix("==") {
        return LineType::Output {
            escape: false,
            code: code.trim(),
        };
    }
    if let Some(code) = text.strip_prefix('=') {
        return LineType::Output {
            escape: true,
            code: code.trim(),
        };
    }
    if let Some(code) = text.strip_prefix('-') {
        return LineType::Control(code.trim());
    }
    if let Some(rest) = text.strip_prefix('!') {
        return LineType::Directive(rest.trim());
    }
    if let Some(engine) = embedded_engine(text) {
        return LineType::Embedded(engine);
    }
    LineType::Tag
}

/// Check if line is a comment
pub fn is_comment(text: &str) -> bool {
    text.starts_with(&['/', '{', '['][..])
}

fn embedded_engine(text: &str) -> Option<&str> {
    text.trim_end().strip_suffix(':')
}
