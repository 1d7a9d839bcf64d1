//! Text blocks
//!
//!     A text marker with nothing after it (`|` on its own line) and an embedded engine line
//!     (`markdown:`) both open a block whose lines are taken verbatim instead of being
//!     classified:
//!
//!         p
//!           |
//!             Hello
//!               World
//!
//!     The first line of the block fixes its base indentation. Later lines at or beyond the
//!     base belong to the block, and whatever indentation they have beyond the base is kept as
//!     leading spaces ("  World" above). The first line shallower than the base ends the block
//!     and goes through the usual indentation handling.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    base: Option<usize>,
}

impl TextBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base indentation, once the first line has been captured.
    pub fn base(&self) -> Option<usize> {
        self.base
    }

    /// Capture a line if it belongs to the block.
    ///
    /// `opener_width` is the indentation of the line that opened the block; the first captured
    /// line has to be deeper than it. Returns the line text with its extra indentation restored,
    /// or `None` when the line ends the block.
    pub fn capture(&mut self, width: usize, text: &str, opener_width: usize) -> Option<String> {
        let base = match self.base {
            Some(base) => base,
            None if width > opener_width => {
                self.base = Some(width);
                width
            }
            None => return None,
        };
        if width < base {
            return None;
        }
        let mut captured = " ".repeat(width - base);
        captured.push_str(text);
        Some(captured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_sets_base() {
        let mut block = TextBlock::new();
        assert_eq!(block.capture(4, "Hello", 2), Some("Hello".to_string()));
        assert_eq!(block.base(), Some(4));
    }

    #[test]
    fn test_extra_indentation_is_kept() {
        let mut block = TextBlock::new();
        block.capture(4, "Hello", 2);
        assert_eq!(block.capture(7, "World", 2), Some("   World".to_string()));
        assert_eq!(block.capture(4, "again", 2), Some("again".to_string()));
    }

    #[test]
    fn test_shallower_line_ends_block() {
        let mut block = TextBlock::new();
        block.capture(4, "Hello", 2);
        assert_eq!(block.capture(3, "p", 2), None);
    }

    #[test]
    fn test_first_line_must_be_deeper_than_opener() {
        let mut block = TextBlock::new();
        assert_eq!(block.capture(2, "p", 2), None);
        assert_eq!(block.base(), None);
    }
}
