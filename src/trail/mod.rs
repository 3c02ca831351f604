// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking for the subtree search.
//!
//! Every write to trailed search state records the slot it touched and the
//! value it overwrote. Backtracking rewinds the trail to an earlier length,
//! replaying the old values in reverse order, so undoing a branch costs time
//! proportional to the work done inside it.
//!
//! # Example
//!
//! ```
//! use flis_search::trail::{Trail, TrailRestore};
//!
//! struct Cells(Vec<u64>);
//!
//! impl TrailRestore for Cells {
//!     fn restore(&mut self, slot: usize, old_value: u64) {
//!         self.0[slot] = old_value;
//!     }
//! }
//!
//! let mut trail = Trail::new();
//! let mut cells = Cells(vec![0; 2]);
//!
//! let checkpoint = trail.len();
//! trail.record_change(1, cells.0[1]);
//! cells.0[1] = 7;
//! assert_eq!(cells.0[1], 7);
//!
//! trail.rewind_to(checkpoint, &mut cells);
//! assert_eq!(cells.0[1], 0);
//! ```

/// A single entry in the trail, recording one state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrailEntry {
    /// Slot of the value that changed
    slot: usize,
    /// The value before the change
    old_value: u64,
}

/// Something whose `u64` slots can be restored from the trail.
pub trait TrailRestore {
    /// Put `old_value` back into `slot`.
    fn restore(&mut self, slot: usize, old_value: u64);
}

/// The trail: an undo log of slot writes.
///
/// Each search worker owns its own trail, next to the state it protects.
#[derive(Debug, Default)]
pub struct Trail {
    entries: Vec<TrailEntry>,
}

impl Trail {
    /// Create a new empty trail.
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(1024),
        }
    }

    /// Record that `slot` is about to be overwritten; `old_value` is its
    /// current content.
    #[inline]
    pub fn record_change(&mut self, slot: usize, old_value: u64) {
        self.entries.push(TrailEntry { slot, old_value });
    }

    /// Undo every change recorded after `checkpoint`, newest first.
    ///
    /// `checkpoint` is a value previously returned by [`Trail::len`].
    ///
    /// # Panics
    ///
    /// Panics if `checkpoint` lies beyond the current end of the trail.
    pub fn rewind_to<R: TrailRestore + ?Sized>(&mut self, checkpoint: usize, target: &mut R) {
        assert!(
            checkpoint <= self.entries.len(),
            "Trail checkpoint {} beyond trail length {}",
            checkpoint,
            self.entries.len()
        );
        while self.entries.len() > checkpoint {
            if let Some(entry) = self.entries.pop() {
                target.restore(entry.slot, entry.old_value);
            }
        }
    }

    /// Current number of entries; usable as a checkpoint.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
