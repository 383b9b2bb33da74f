/// A byte cursor for left-to-right delimiter scanning.
///
/// Cloze markers are ASCII, so scanning byte-wise is safe: every slice the
/// parser takes is bounded by a marker position or the end of input, both of
/// which are UTF-8 character boundaries.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The text being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of input.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Finds the next occurrence of `byte` at or after `from`.
    pub fn find_from(&self, from: usize, byte: u8) -> Option<usize> {
        self.s
            .as_bytes()
            .get(from..)?
            .iter()
            .position(|&b| b == byte)
            .map(|off| from + off)
    }

    /// Returns the remaining input from the current position.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }
}
