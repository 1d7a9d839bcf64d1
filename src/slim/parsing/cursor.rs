//! Character cursor over a single line
//!
//! A byte offset into the line plus a few helpers to consume characters. Scanning with a cursor
//! keeps every step explicit: each helper advances the offset and returns what it consumed, and
//! a failed attempt can be undone by restoring a saved offset.

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Byte offset of the cursor.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move back to an offset obtained from [Cursor::pos].
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Column of the cursor, in characters.
    pub fn column(&self) -> usize {
        self.line[..self.pos].chars().count()
    }

    pub fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `expected` if it is the next character.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds and return them.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.line[start..self.pos]
    }

    pub fn skip_whitespace(&mut self) -> usize {
        self.eat_while(|c| c == ' ' || c == '\t').len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eat_while_and_rest() {
        let mut cursor = Cursor::new("div#main text");
        assert_eq!(cursor.eat_while(char::is_alphanumeric), "div");
        assert!(cursor.eat('#'));
        assert!(!cursor.eat('#'));
        assert_eq!(cursor.rest(), "main text");
    }

    #[test]
    fn test_column_counts_characters() {
        let mut cursor = Cursor::new("ü.x");
        cursor.bump();
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.column(), 1);
    }

    #[test]
    fn test_reset() {
        let mut cursor = Cursor::new("  key");
        let saved = cursor.pos();
        assert_eq!(cursor.skip_whitespace(), 2);
        cursor.reset(saved);
        assert_eq!(cursor.peek(), Some(' '));
    }
}
