//! Byte-stream console endpoints.
//!
//! The shell needs exactly two things from a console: a blocking read of one
//! byte and an ordered write of a byte slice.

use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};

use picosh_types::error::{PicoshError, Result};

/// Clear the screen and home the cursor.
pub const CLEAR_SCREEN: &[u8] = b"\x1b[H\x1b[2J";

/// A bidirectional byte stream.
pub trait Console {
    /// Read one byte, blocking until it is available.
    fn read_byte(&mut self) -> Result<u8>;

    /// Write every byte of `bytes`, in order.
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Write a string.
    fn puts(&mut self, s: &str) -> Result<()> {
        self.write_all(s.as_bytes())
    }
}

/// Clear the terminal behind `console`.
pub fn clear_screen(console: &mut dyn Console) -> Result<()> {
    console.write_all(CLEAR_SCREEN)
}

/// Console over any reader/writer pair (a serial device, stdin/stdout).
#[derive(Debug)]
pub struct StreamConsole<R, W> {
    reader: R,
    writer: W,
}

impl<R: Read, W: Write> StreamConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Give back the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: Read, W: Write> Console for StreamConsole<R, W> {
    fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Err(PicoshError::Console("console closed".into())),
                Ok(_) => return Ok(byte[0]),
                Err(e) if e.kind() == ErrorKind::Interrupted => {},
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Console with scripted input and captured output.
///
/// Useful for tests and for driving a session without a terminal. Reading
/// past the end of the script reports the console as closed.
#[derive(Debug, Default)]
pub struct MemoryConsole {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Console pre-loaded with `input`.
    pub fn with_input(input: impl AsRef<[u8]>) -> Self {
        let mut console = Self::new();
        console.feed(input);
        console
    }

    /// Queue more input bytes.
    pub fn feed(&mut self, input: impl AsRef<[u8]>) {
        self.input.extend(input.as_ref());
    }

    /// Bytes not yet read.
    pub fn pending(&self) -> usize {
        self.input.len()
    }

    /// Everything written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Everything written so far, lossily decoded.
    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Drain and return the captured output.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}

impl Console for MemoryConsole {
    fn read_byte(&mut self) -> Result<u8> {
        self.input
            .pop_front()
            .ok_or_else(|| PicoshError::Console("console closed".into()))
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }
}
