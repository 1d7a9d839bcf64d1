//! Indentation tracker
//!
//!     Turns raw source into a sequence of [SourceLine]s: the 1-based line number, the
//!     indentation width in columns, and the content with indentation and the line terminator
//!     removed.
//!
//!     Only spaces and tabs count as indentation. A tab adds `tab_size` columns regardless of
//!     where it sits. Blank lines are still emitted (with [SourceLine::is_blank] set), since
//!     they keep the line numbers of the generated code aligned with the template.
//!
//!     Errors about the width (too deep, or landing between two known depths) are raised by
//!     the block builder, which knows what depths are currently open.

/// One line of source after measuring its indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based.
    pub number: usize,
    /// Indentation in columns.
    pub width: usize,
    /// Content with leading whitespace removed. Trailing whitespace is kept.
    pub text: &'a str,
}

impl<'a> SourceLine<'a> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Measure the indentation of a single line (without its terminator).
///
/// Returns the width in columns and the dedented content.
pub fn measure(line: &str, tab_size: usize) -> (usize, &str) {
    let width = line
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { tab_size } else { 1 })
        .sum();
    (width, line.trim_start())
}

/// Iterator over the measured lines of a source string.
pub struct IndentationTracker<'a> {
    lines: std::str::Lines<'a>,
    number: usize,
    tab_size: usize,
}

impl<'a> IndentationTracker<'a> {
    pub fn new(source: &'a str, tab_size: usize) -> Self {
        Self {
            lines: source.lines(),
            number: 0,
            tab_size,
        }
    }
}

impl<'a> Iterator for IndentationTracker<'a> {
    type Item = SourceLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.lines.next()?;
        self.number += 1;
        let (width, text) = measure(raw, self.tab_size);
        Some(SourceLine {
            number: self.number,
            width,
            text,
        })
    }
}
