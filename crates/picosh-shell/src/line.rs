//! The editable command line.
//!
//! A fixed-capacity byte buffer with an insertion cursor. Every mutation
//! keeps `0 <= cursor <= len <= line_max - 1`.

/// Clear the current terminal line and return to column 0.
const CLEAR_LINE: &[u8] = b"\x1b[2K\r";

/// Line buffer for one console.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    text: Vec<u8>,
    cursor: usize,
    /// Live character limit (`line_max - 1`).
    limit: usize,
}

impl LineBuffer {
    /// Buffer for lines of at most `line_max - 1` characters.
    pub fn new(line_max: usize) -> Self {
        let limit = line_max.saturating_sub(1).max(1);
        Self {
            text: Vec::with_capacity(limit),
            cursor: 0,
            limit,
        }
    }

    /// Maximum number of live characters.
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.text.len() == self.limit
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    /// Insert `c` at the cursor and advance past it.
    ///
    /// Returns `false` (and changes nothing) when the line is full.
    pub fn insert(&mut self, c: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.text.insert(self.cursor, c);
        self.cursor += 1;
        true
    }

    /// Remove the character that ends at column `pos`, i.e. index `pos - 1`.
    ///
    /// Backspace is `remove_at(cursor)`, delete is `remove_at(cursor + 1)`.
    /// A removal left of the cursor pulls the cursor back by one.
    pub fn remove_at(&mut self, pos: usize) -> bool {
        if pos == 0 || pos > self.text.len() {
            return false;
        }
        self.text.remove(pos - 1);
        if pos <= self.cursor {
            self.cursor -= 1;
        }
        self.cursor = self.cursor.min(self.text.len());
        true
    }

    /// Empty the line.
    pub fn reset(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Move the cursor by `delta` columns.
    ///
    /// Returns `false` when the cursor already sits at the boundary in that
    /// direction; otherwise the cursor moves as far as the line allows.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        let target = self
            .cursor
            .saturating_add_signed(delta)
            .min(self.text.len());
        if target == self.cursor {
            return false;
        }
        self.cursor = target;
        true
    }

    /// Place the cursor at `pos`, clamped to the line.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.text.len());
    }

    /// Overwrite the whole line with `text` (truncated to the limit) and put
    /// the cursor at its end.
    pub fn replace(&mut self, text: &[u8]) {
        let n = text.len().min(self.limit);
        self.text.clear();
        self.text.extend_from_slice(&text[..n]);
        self.cursor = n;
    }

    /// Redraw sequence: clear the terminal line, print prompt and text, then
    /// move the cursor `prompt.len() + cursor` columns right of column 0.
    pub fn render(&self, prompt: &str) -> Vec<u8> {
        let column = prompt.len() + self.cursor;
        let mut out = Vec::with_capacity(CLEAR_LINE.len() + prompt.len() + self.text.len() + 8);
        out.extend_from_slice(CLEAR_LINE);
        out.extend_from_slice(prompt.as_bytes());
        out.extend_from_slice(&self.text);
        out.push(b'\r');
        out.extend_from_slice(format!("\x1b[{column}C").as_bytes());
        out
    }
}
