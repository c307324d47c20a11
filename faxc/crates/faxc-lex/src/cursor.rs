//! Character cursor for traversing source text.
//!
//! The lexer's contract calls for "a character source with one-character
//! pushback". `Cursor` realizes that as non-destructive lookahead: callers
//! peek at the next character before deciding whether to consume it, which
//! is equivalent to consume-then-pushback but needs no undo state.

pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, position: 0 }
    }

    /// Character at the cursor, or `'\0'` at end of input.
    pub fn current(&self) -> char {
        self.peek(0)
    }

    /// Character `offset` positions ahead of the cursor (0 = current),
    /// without consuming anything. This is the "pushback" half of the
    /// contract: look before you leap.
    pub fn peek(&self, offset: usize) -> char {
        self.source[self.position..].chars().nth(offset).unwrap_or('\0')
    }

    pub fn advance(&mut self) -> char {
        let c = self.current();
        if c != '\0' {
            self.position += c.len_utf8();
        }
        c
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    pub fn byte_offset(&self) -> u32 {
        self.position as u32
    }
}
