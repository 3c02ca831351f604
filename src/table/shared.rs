// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Best-so-far table shared between search workers.
//!
//! Workers read the best leaf count of every size on every search node, so
//! those live in atomics. Witnesses are only written on a strict improvement,
//! which is rare, and go through a mutex.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use super::{Entry, LeafFunctionTable};
use crate::graph::Vertex;

const UNREACHED: usize = usize::MAX;

#[derive(Debug)]
pub struct SharedLeafTable {
    best: Vec<AtomicUsize>,
    table: Mutex<LeafFunctionTable>,
}

impl SharedLeafTable {
    /// Create the seeded table for a graph on `n` vertices.
    pub fn new(n: usize) -> Self {
        let table = LeafFunctionTable::new(n);
        let best = table
            .values()
            .into_iter()
            .map(|value| AtomicUsize::new(value.unwrap_or(UNREACHED)))
            .collect();
        Self {
            best,
            table: Mutex::new(table),
        }
    }

    /// Best leaf count found so far for `size`.
    #[inline]
    pub fn best(&self, size: usize) -> Option<usize> {
        match self.best[size].load(Ordering::Acquire) {
            UNREACHED => None,
            value => Some(value),
        }
    }

    /// Offer a subtree; returns whether it strictly improved the table.
    pub fn offer<F>(&self, size: usize, leaves: usize, witness: F) -> bool
    where
        F: FnOnce() -> Vec<Vertex>,
    {
        if self.best(size).is_some_and(|current| current >= leaves) {
            return false;
        }
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        if table.offer(size, leaves, witness) {
            self.best[size].store(leaves, Ordering::Release);
            true
        } else {
            false
        }
    }

    /// Offer every realized entry of `other`.
    pub fn merge(&self, other: &LeafFunctionTable) {
        for (size, entry) in other.iter() {
            if let Entry::Realized { leaves, witness } = entry {
                self.offer(size, *leaves, || witness.clone());
            }
        }
    }

    /// Forget everything but the seeded sizes.
    pub fn reset(&self) {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        *table = LeafFunctionTable::new(table.max_size());
        for (best, value) in self.best.iter().zip(table.values()) {
            best.store(value.unwrap_or(UNREACHED), Ordering::Release);
        }
    }

    /// Copy of the current table.
    pub fn snapshot(&self) -> LeafFunctionTable {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_table(self) -> LeafFunctionTable {
        self.table
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
