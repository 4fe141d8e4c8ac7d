//! Tab completion of the command name.
//!
//! Only the first token is completed. The typed part of the token (from its
//! start up to the cursor) is the prefix; every command name starting with
//! it becomes a candidate line. Repeated Tab presses cycle through the
//! candidates and finally back to what the user typed.

use picosh_types::input::code;

use crate::line::LineBuffer;

/// Byte range of the first token, as seen from the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

/// Locate the first token for completion at `cursor`.
///
/// Returns `None` when the cursor sits past the end of the first token.
/// When the cursor sits inside the leading spaces the span is empty and
/// anchored at the cursor.
pub fn first_token(text: &[u8], cursor: usize) -> Option<TokenSpan> {
    let start = text.iter().position(|&b| b != code::SPACE).unwrap_or(text.len());
    let end = text[start..]
        .iter()
        .position(|&b| b == code::SPACE)
        .map_or(text.len(), |n| start + n);

    if cursor > end {
        return None;
    }
    if cursor < start {
        return Some(TokenSpan {
            start: cursor,
            end: cursor,
        });
    }
    Some(TokenSpan { start, end })
}

/// Completion state for one line.
#[derive(Debug, Clone, Default)]
pub struct Autocomplete {
    candidates: Vec<Vec<u8>>,
    current: usize,
    active: bool,
    /// Cursor position when the cycle started.
    trigger_cursor: usize,
    /// Cursor position the last completion step left behind.
    resume_cursor: usize,
    /// The line as typed before the cycle started.
    snapshot: Vec<u8>,
}

impl Autocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Candidate lines of the current cycle.
    pub fn candidates(&self) -> &[Vec<u8>] {
        &self.candidates
    }

    /// Drop out of the current cycle, keeping the buffer as it is.
    pub fn reset(&mut self) {
        self.active = false;
    }

    /// Handle one Tab press.
    ///
    /// Continues the current cycle when the cursor has not moved since the
    /// last step; otherwise starts a new one from the buffer as it stands.
    /// Returns `true` when `line` must be redrawn.
    pub fn trigger<'a>(
        &mut self,
        line: &mut LineBuffer,
        names: impl IntoIterator<Item = &'a str>,
    ) -> bool {
        if !(self.active && line.cursor() == self.resume_cursor) {
            self.active = false;
            let cursor = line.cursor();
            let Some(span) = first_token(line.as_bytes(), cursor) else {
                return false;
            };
            self.snapshot.clear();
            self.snapshot.extend_from_slice(line.as_bytes());
            self.generate(span, cursor, names);
            self.trigger_cursor = cursor;
            self.current = 0;
            self.active = true;
            log::debug!(
                "autocomplete: {} candidate(s) for {:?}",
                self.candidates.len(),
                String::from_utf8_lossy(&self.snapshot[span.start..cursor])
            );
        }

        if self.current == self.candidates.len() {
            line.replace(&self.snapshot);
            line.set_cursor(self.trigger_cursor);
            self.active = false;
        } else {
            line.replace(&self.candidates[self.current]);
            self.current += 1;
            self.resume_cursor = line.cursor();
        }
        true
    }

    /// Build one candidate line per matching name: the name replaces the
    /// typed prefix, everything else on the line is kept.
    fn generate<'a>(
        &mut self,
        span: TokenSpan,
        cursor: usize,
        names: impl IntoIterator<Item = &'a str>,
    ) {
        let text = &self.snapshot;
        let prefix = &text[span.start..cursor];
        self.candidates = names
            .into_iter()
            .filter(|name| name.as_bytes().starts_with(prefix))
            .map(|name| {
                let mut cand = Vec::with_capacity(text.len() + name.len());
                cand.extend_from_slice(&text[..span.start]);
                cand.extend_from_slice(name.as_bytes());
                cand.extend_from_slice(&text[cursor..span.end]);
                cand.extend_from_slice(&text[span.end..]);
                cand
            })
            .collect();
    }
}
