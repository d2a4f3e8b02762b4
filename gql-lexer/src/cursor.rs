//! Byte cursor for traversing GraphQL source text.
//!
//! Tracks byte position plus 1-based line/column, and retains exactly one
//! step of rewind state so [`Cursor::unread`] can undo the single most
//! recent [`Cursor::advance`] call, including across a newline boundary.

use gql_util::Span;

/// A cursor over a borrowed source string.
///
/// # Examples
///
/// ```
/// use gql_lexer::cursor::Cursor;
///
/// let mut cursor = Cursor::new("{ a }");
/// assert_eq!(cursor.current_char(), '{');
/// cursor.advance();
/// assert_eq!(cursor.current_char(), ' ');
/// ```
pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
    last_advance_len: usize,
    before_last_terminator: (u32, u32),
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
            last_advance_len: 0,
            before_last_terminator: (1, 1),
        }
    }

    /// Reset this cursor to the start of a (possibly different) source.
    pub fn set_input(&mut self, source: &'a str) {
        self.source = source;
        self.position = 0;
        self.line = 1;
        self.column = 1;
        self.last_advance_len = 0;
        self.before_last_terminator = (1, 1);
    }

    /// Character at the cursor, or `'\0'` at end of input.
    #[inline]
    pub fn current_char(&self) -> char {
        self.char_at(0)
    }

    /// Character `offset` bytes ahead of the cursor, or `'\0'` past the end.
    #[inline]
    pub fn char_at(&self, offset: usize) -> char {
        let pos = self.position + offset;
        if pos >= self.source.len() {
            return '\0';
        }
        let b = self.source.as_bytes()[pos];
        if b < 128 {
            return b as char;
        }
        self.source[pos..].chars().next().unwrap_or('\0')
    }

    /// True once the cursor has consumed the whole source.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Current byte offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current 1-based line number.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Current 1-based column number.
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// A point span at the cursor's current position.
    pub fn span_here(&self) -> Span {
        Span::point(self.position, self.line, self.column)
    }

    /// Advance past the current character, updating line/column.
    ///
    /// Does nothing at end of input. Remembers enough to undo exactly
    /// this step via [`Cursor::unread`].
    pub fn advance(&mut self) {
        if self.is_at_end() {
            self.last_advance_len = 0;
            return;
        }
        let c = self.current_char();
        self.last_advance_len = c.len_utf8();
        self.position += self.last_advance_len;
        if c == '\n' {
            self.before_last_terminator = (self.line, self.column);
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Undo the single most recent [`Cursor::advance`].
    ///
    /// Returns `false` if there is nothing to undo (cursor at the start,
    /// or already unread since the last advance).
    pub fn unread(&mut self) -> bool {
        if self.last_advance_len == 0 {
            return false;
        }
        let unread_pos = self.position - self.last_advance_len;
        let c = self.source.as_bytes().get(unread_pos).copied().unwrap_or(0) as char;
        self.position = unread_pos;
        if c == '\n' {
            (self.line, self.column) = self.before_last_terminator;
        } else {
            self.column -= 1;
        }
        self.last_advance_len = 0;
        true
    }

    /// Byte slice of the source from `start` to the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    /// Byte slice of the source between two arbitrary offsets.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    /// True if the bytes immediately ahead of the cursor equal `s`.
    pub fn peek_equals(&self, s: &str) -> bool {
        let end = self.position + s.len();
        end <= self.source.len() && &self.source[self.position..end] == s
    }

    /// The rest of the source, from the cursor onward.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }
}
