//! Error types for parsing and compiling
//!
//!     Every error is fatal: a failed parse or compile yields no tree. Syntax errors carry the
//!     offending source line, its 1-based number and a 0-based column so they can be shown
//!     the way template authors expect:
//!
//!         <blank line>
//!         Unexpected indentation
//!           Line 3
//!             p Hello
//!             ^

use std::fmt;

/// What went wrong on a line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    /// A line is deeper than the previous one, which did not open a body.
    #[error("Unexpected indentation")]
    UnexpectedIndentation,
    /// A dedent lands between two recorded depths.
    #[error("Malformed indentation")]
    MalformedIndentation,
    #[error("Unknown line indicator")]
    UnknownLineIndicator,
    #[error("Missing attribute end delimiter {0}")]
    MissingAttributeEndDelimiter(char),
    #[error("Invalid attribute value")]
    InvalidAttributeValue,
    #[error("Expected closing attribute delimiter {0}")]
    ExpectedClosingAttributeDelimiter(char),
    #[error("Unknown directive {0}")]
    UnknownDirective(String),
}

/// A fatal parse error with its position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// The offending source line, trimmed.
    pub line: String,
    /// 1-based.
    pub line_number: usize,
    /// 0-based, counted in characters of the trimmed line.
    pub column: usize,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, line: &str, line_number: usize) -> Self {
        Self {
            kind,
            line: line.trim().to_string(),
            line_number,
            column: 0,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.kind)?;
        writeln!(f, "  Line {}", self.line_number)?;
        writeln!(f, "    {}", self.line)?;
        writeln!(f, "    {}^", " ".repeat(self.column))
    }
}

impl std::error::Error for SyntaxError {}

/// Failures reported by an embedded engine capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmbedError {
    #[error("Unknown embedded engine {0}")]
    UnknownEngine(String),
    #[error("Embedded engine {engine} failed: {message}")]
    Failed { engine: String, message: String },
}

/// Anything [crate::slim::compile_template] can fail with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Embed(#[from] EmbedError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_caret_at_column() {
        let err = SyntaxError::new(
            SyntaxErrorKind::ExpectedClosingAttributeDelimiter(')'),
            "  p(id=\"a\" Hello  ",
            2,
        )
        .with_column(9);

        let rendered = err.to_string();
        let expected = "\nExpected closing attribute delimiter )\n  Line 2\n    p(id=\"a\" Hello\n             ^\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_default_column_is_zero() {
        let err = SyntaxError::new(SyntaxErrorKind::UnexpectedIndentation, "p", 1);
        assert_eq!(err.column, 0);
        assert!(err.to_string().ends_with("    p\n    ^\n"));
    }

    #[test]
    fn test_message_matches_kind() {
        let err = SyntaxError::new(SyntaxErrorKind::MissingAttributeEndDelimiter(']'), "a", 1);
        assert_eq!(err.message(), "Missing attribute end delimiter ]");
    }
}
