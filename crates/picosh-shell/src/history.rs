//! Recall of previously submitted lines.
//!
//! A fixed number of slots is allocated up front and recycled: once every
//! slot holds a line, each push overwrites the oldest one. `write` is the
//! next slot to fill, so the newest entry sits just behind it.

use crate::line::LineBuffer;

/// In-progress recall started by arrow-up.
#[derive(Debug, Clone)]
struct Navigation {
    /// How far back the buffer currently shows (1 = newest entry).
    depth: usize,
    /// The unsubmitted line to restore when recall runs off either end.
    snapshot: Vec<u8>,
}

/// Fixed-capacity, recency-ordered history of submitted lines.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    slots: Vec<Vec<u8>>,
    write: usize,
    count: usize,
    nav: Option<Navigation>,
}

impl HistoryRing {
    /// Ring holding up to `capacity` lines of up to `line_max - 1` bytes.
    pub fn new(capacity: usize, line_max: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| Vec::with_capacity(line_max)).collect(),
            write: 0,
            count: 0,
            nav: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_navigating(&self) -> bool {
        self.nav.is_some()
    }

    /// Entry `age` steps back; age 0 is the most recent line.
    pub fn entry(&self, age: usize) -> Option<&[u8]> {
        if age >= self.count {
            return None;
        }
        let cap = self.slots.len();
        let idx = (self.write + cap - 1 - age) % cap;
        Some(&self.slots[idx])
    }

    /// Entries in submission order, oldest first.
    pub fn iter_oldest_first(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.count).rev().filter_map(move |age| self.entry(age))
    }

    /// Record a submitted line, evicting the oldest when full.
    pub fn push(&mut self, line: &[u8]) {
        self.nav = None;
        let cap = self.slots.len();
        if cap == 0 {
            return;
        }
        let slot = &mut self.slots[self.write];
        slot.clear();
        slot.extend_from_slice(line);
        self.write = (self.write + 1) % cap;
        self.count = (self.count + 1).min(cap);
        log::debug!("history: pushed entry ({} of {cap})", self.count);
    }

    /// Leave recall mode, keeping whatever the buffer holds now.
    pub fn cancel_navigation(&mut self) {
        self.nav = None;
    }

    /// Show the next older entry.
    ///
    /// The first step snapshots `line`. Stepping past the oldest entry
    /// restores the snapshot and ends recall. Returns `false` when there is
    /// nothing to recall.
    pub fn navigate_back(&mut self, line: &mut LineBuffer) -> bool {
        if self.count == 0 {
            return false;
        }
        let nav = self.nav.get_or_insert_with(|| Navigation {
            depth: 0,
            snapshot: line.as_bytes().to_vec(),
        });
        nav.depth += 1;
        let depth = nav.depth;
        self.show(depth, line);
        true
    }

    /// Show the next newer entry.
    ///
    /// Stepping past the newest entry restores the snapshot and ends recall.
    /// Returns `false` when recall is not active.
    pub fn navigate_forward(&mut self, line: &mut LineBuffer) -> bool {
        let Some(nav) = self.nav.as_mut() else {
            return false;
        };
        nav.depth -= 1;
        let depth = nav.depth;
        self.show(depth, line);
        true
    }

    /// Load the entry at `depth` into `line`, or restore the snapshot when
    /// `depth` has reached the sentinel at either end.
    fn show(&mut self, depth: usize, line: &mut LineBuffer) {
        if depth == 0 || depth > self.count {
            if let Some(nav) = self.nav.take() {
                line.replace(&nav.snapshot);
            }
            log::debug!("history: recall finished, input restored");
            return;
        }
        if let Some(entry) = self.entry(depth - 1) {
            line.replace(entry);
        }
    }
}
