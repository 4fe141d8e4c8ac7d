//! Console key codes and decoded editing keys.
//!
//! A console delivers raw bytes. The shell decodes them into [`Key`]s, so
//! the editing logic never matches on byte values directly.

/// Raw byte values recognised on the console stream.
pub mod code {
    pub const NUL: u8 = 0x00;
    pub const CTRL_A: u8 = 0x01;
    pub const CTRL_B: u8 = 0x02;
    pub const CTRL_C: u8 = 0x03;
    pub const CTRL_E: u8 = 0x05;
    pub const CTRL_F: u8 = 0x06;
    pub const CTRL_H: u8 = 0x08;
    pub const TAB: u8 = 0x09;
    pub const ENTER: u8 = 0x0D;
    pub const CTRL_U: u8 = 0x15;
    pub const CTRL_Z: u8 = 0x1A;
    pub const ESC: u8 = 0x1B;
    pub const SPACE: u8 = 0x20;
    pub const BACKSPACE: u8 = 0x7F;

    /// Second byte of a CSI sequence (`ESC [`).
    pub const CSI: u8 = b'[';
    pub const UP_ARROW: u8 = b'A';
    pub const DOWN_ARROW: u8 = b'B';
    pub const RIGHT_ARROW: u8 = b'C';
    pub const LEFT_ARROW: u8 = b'D';
    pub const HOME_XTERM: u8 = b'H';
    pub const END_XTERM: u8 = b'F';
    pub const HOME_VT100: u8 = b'1';
    pub const DELETE: u8 = b'3';
    pub const END_VT100: u8 = b'4';
    /// Terminator of `ESC [ <digit> ~` sequences.
    pub const TILDE: u8 = b'~';
}

/// An editing intent decoded from one or more console bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A byte to insert at the cursor.
    Char(u8),
    /// Cursor to start of line (Ctrl-A, Home).
    Home,
    /// Cursor to end of line (Ctrl-E, End).
    End,
    /// Cursor one column left (Ctrl-B, arrow left).
    Left,
    /// Cursor one column right (Ctrl-F, arrow right).
    Right,
    /// Recall an older history entry.
    Up,
    /// Recall a newer history entry.
    Down,
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character under the cursor.
    Delete,
    /// Trigger completion.
    Tab,
    /// Finalize the line.
    Enter,
    /// Clear the whole line (Ctrl-U).
    ClearLine,
    /// Abandon the line (Ctrl-C).
    Interrupt,
    /// A control code or escape sequence with no binding.
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_codes_are_contiguous() {
        assert_eq!(code::CTRL_A, 1);
        assert_eq!(code::CTRL_Z, 26);
        assert_eq!(code::CTRL_H, code::CTRL_A + 7);
        assert_eq!(code::CTRL_U, code::CTRL_A + 20);
    }

    #[test]
    fn keys_compare_by_payload() {
        assert_eq!(Key::Char(b'a'), Key::Char(b'a'));
        assert_ne!(Key::Char(b'a'), Key::Char(b'b'));
        assert_ne!(Key::Enter, Key::Tab);
    }
}
