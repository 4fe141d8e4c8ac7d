//! Decoding of console bytes into editing keys.
//!
//! One call reads exactly as many bytes as the key needs and no more. A
//! partial escape sequence blocks on the console like a real terminal would.

use picosh_types::error::Result;
use picosh_types::input::{Key, code};

use crate::console::Console;

/// Read and decode the next key.
pub fn read_key<C: Console + ?Sized>(console: &mut C) -> Result<Key> {
    let byte = console.read_byte()?;
    let key = match byte {
        code::CTRL_A => Key::Home,
        code::CTRL_B => Key::Left,
        code::CTRL_C => Key::Interrupt,
        code::CTRL_E => Key::End,
        code::CTRL_F => Key::Right,
        code::CTRL_H | code::BACKSPACE => Key::Backspace,
        code::TAB => Key::Tab,
        code::ENTER => Key::Enter,
        code::CTRL_U => Key::ClearLine,
        code::ESC => read_escape(console)?,
        code::NUL..=code::CTRL_Z => Key::Ignored,
        other => Key::Char(other),
    };
    log::trace!("key 0x{byte:02x} -> {key:?}");
    Ok(key)
}

/// Decode the bytes following `ESC`.
///
/// Two bytes are always consumed. `ESC [ 1` and `ESC [ 4` (VT100 Home/End)
/// consume one more byte without checking it; `ESC [ 3` needs a trailing
/// `~` to count as Delete.
fn read_escape<C: Console + ?Sized>(console: &mut C) -> Result<Key> {
    let lead = console.read_byte()?;
    let select = console.read_byte()?;
    if lead != code::CSI {
        return Ok(Key::Ignored);
    }
    let key = match select {
        code::UP_ARROW => Key::Up,
        code::DOWN_ARROW => Key::Down,
        code::RIGHT_ARROW => Key::Right,
        code::LEFT_ARROW => Key::Left,
        code::HOME_XTERM => Key::Home,
        code::END_XTERM => Key::End,
        code::HOME_VT100 => {
            console.read_byte()?;
            Key::Home
        },
        code::END_VT100 => {
            console.read_byte()?;
            Key::End
        },
        code::DELETE => {
            if console.read_byte()? == code::TILDE {
                Key::Delete
            } else {
                Key::Ignored
            }
        },
        _ => Key::Ignored,
    };
    Ok(key)
}
