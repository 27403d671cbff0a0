//! Position-tracking cursor over template text.
//!
//! All positions are byte offsets into the original text and always sit on a
//! character boundary. End of input is reported as `None` by the peeking
//! methods rather than by a sentinel character.

/// A cheap, copyable cursor. Copying it is how callers take a checkpoint.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
        }
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The character at the cursor.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character `n` characters ahead of the cursor (`peek_nth(0)` is
    /// `peek()`).
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    #[inline]
    pub fn starts_with(&self, token: &str) -> bool {
        self.rest().starts_with(token)
    }

    /// Consumes and returns one character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Advances by `n` bytes, clamped to the end of the text.
    ///
    /// Only call this with the length of a token just matched with
    /// [`starts_with`](Self::starts_with) or found in [`rest`](Self::rest),
    /// so the new position stays on a character boundary.
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.text.len());
        debug_assert!(self.text.is_char_boundary(self.pos));
    }

    /// Skips Unicode whitespace.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Unconsumed text.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Text consumed since `start`.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.text[start.min(self.pos)..self.pos]
    }

    /// The full text the cursor runs over.
    pub fn text(&self) -> &'a str {
        self.text
    }
}
