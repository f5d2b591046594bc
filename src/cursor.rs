//! Character cursor over in-memory input, with line and column tracking
use crate::coords::Coords;

/// A [Cursor] walks a borrowed source string one character at a time, maintaining the byte
/// offset of the next character along with 1-based line and column positions. The offset is
/// always on a character boundary, which allows zero-copy extraction of sub-slices between
/// any two previously observed offsets.
pub struct Cursor<'a> {
    /// The source text
    source: &'a str,
    /// Byte offset of the next character to be consumed
    offset: usize,
    /// Current line position
    line: usize,
    /// Current column position
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// The character at the current position, [None] once the input is exhausted
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The unconsumed remainder of the source
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// Number of bytes left in the input
    pub fn remaining(&self) -> usize {
        self.source.len() - self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset == self.source.len()
    }

    /// Byte offset of the next character to be consumed
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The current position within the input
    pub fn coords(&self) -> Coords {
        Coords {
            absolute: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    /// Borrow a sub-slice of the source between two byte offsets
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    /// Advance past the current character, maintaining the line and column positions. The
    /// column resets on every consumed newline
    pub fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Advance up to `count` characters, stopping at the end of the input
    pub fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Skip past any whitespace at the current position
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.current() {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;

    #[test]
    fn should_track_lines_and_columns() {
        let mut cursor = Cursor::new("ab\ncd");
        assert_eq!(cursor.coords().line, 1);
        assert_eq!(cursor.coords().column, 1);
        cursor.advance_by(3);
        assert_eq!(cursor.coords().line, 2);
        assert_eq!(cursor.coords().column, 1);
        cursor.advance();
        assert_eq!(cursor.coords().column, 2);
    }

    #[test]
    fn should_stop_at_the_end_of_the_input() {
        let mut cursor = Cursor::new("xy");
        cursor.advance_by(10);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn should_skip_whitespace() {
        let mut cursor = Cursor::new("  \t\n  true");
        cursor.skip_whitespace();
        assert_eq!(cursor.current(), Some('t'));
        assert_eq!(cursor.coords().line, 2);
    }

    #[test]
    fn should_slice_between_offsets() {
        let mut cursor = Cursor::new("null,");
        let start = cursor.offset();
        cursor.advance_by(4);
        assert_eq!(cursor.slice(start, cursor.offset()), "null");
        assert_eq!(cursor.current(), Some(','));
    }

    #[test]
    fn should_handle_multibyte_characters() {
        let mut cursor = Cursor::new("\u{1f680}!");
        assert_eq!(cursor.advance(), Some('\u{1f680}'));
        assert_eq!(cursor.offset(), 4);
        assert_eq!(cursor.coords().column, 2);
        assert_eq!(cursor.current(), Some('!'));
    }
}
