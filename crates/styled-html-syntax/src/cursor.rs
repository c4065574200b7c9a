/// A byte cursor over the inside of a single tag.
///
/// Tag syntax is ASCII-delimited, so every position the cursor stops at is a
/// char boundary even when names or values contain multi-byte text.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The tag text being scanned.
    pub s: &'a str,
    /// Offset of `s` in the source document, for diagnostics.
    pub base: usize,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Current absolute byte position.
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances while `pred` holds and returns the consumed slice.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        &self.s[start..self.i]
    }

    pub fn skip_whitespace(&mut self) {
        self.eat_while(|b| b.is_ascii_whitespace());
    }
}
