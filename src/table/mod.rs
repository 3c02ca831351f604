// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The leaf function table: one result per subtree size.

pub mod shared;

pub use shared::SharedLeafTable;

use std::fmt;

use crate::graph::Vertex;

/// The result for one subtree size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// No induced tree of this size has been found. Once a search is
    /// exhausted this means none exists.
    Unreachable,
    /// The best leaf count found, with a subtree that achieves it.
    Realized { leaves: usize, witness: Vec<Vertex> },
}

impl Entry {
    pub fn leaves(&self) -> Option<usize> {
        match self {
            Entry::Unreachable => None,
            Entry::Realized { leaves, .. } => Some(*leaves),
        }
    }

    pub fn witness(&self) -> Option<&[Vertex]> {
        match self {
            Entry::Unreachable => None,
            Entry::Realized { witness, .. } => Some(witness),
        }
    }
}

/// Best leaf count and witness for every size `0..=n`.
///
/// Size 0 (the empty tree) and size 1 (a single vertex) are realized with no
/// leaves from the start; every other size starts unreachable. Entries only
/// ever improve.
///
/// ```
/// use flis_search::table::LeafFunctionTable;
///
/// let mut table = LeafFunctionTable::new(3);
/// assert_eq!(table.values(), vec![Some(0), Some(0), None, None]);
///
/// assert!(table.offer(2, 2, || vec![0, 1]));
/// assert!(!table.offer(2, 2, || vec![1, 2]));
/// assert_eq!(table.witness(2), Some(&[0, 1][..]));
/// assert_eq!(table.to_string(), "{0: 0, 1: 0, 2: 2, 3: ∅}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafFunctionTable {
    entries: Vec<Entry>,
}

impl LeafFunctionTable {
    /// Create the seeded table for a graph on `n` vertices.
    pub fn new(n: usize) -> Self {
        let mut entries = vec![Entry::Unreachable; n + 1];
        entries[0] = Entry::Realized {
            leaves: 0,
            witness: Vec::new(),
        };
        if n > 0 {
            entries[1] = Entry::Realized {
                leaves: 0,
                witness: vec![0],
            };
        }
        Self { entries }
    }

    /// The largest size in the table, which is the vertex count.
    pub fn max_size(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn entry(&self, size: usize) -> &Entry {
        &self.entries[size]
    }

    /// Best leaf count for `size`, `None` if unreachable.
    pub fn leaves(&self, size: usize) -> Option<usize> {
        self.entries[size].leaves()
    }

    pub fn witness(&self, size: usize) -> Option<&[Vertex]> {
        self.entries[size].witness()
    }

    /// Record a subtree of `size` vertices with `leaves` leaves if it beats
    /// the current entry. The witness is only built on improvement.
    pub fn offer<F>(&mut self, size: usize, leaves: usize, witness: F) -> bool
    where
        F: FnOnce() -> Vec<Vertex>,
    {
        if self.entries[size].leaves().is_some_and(|current| current >= leaves) {
            return false;
        }
        self.entries[size] = Entry::Realized {
            leaves,
            witness: witness(),
        };
        true
    }

    /// Leaf counts for every size.
    pub fn values(&self) -> Vec<Option<usize>> {
        self.entries.iter().map(Entry::leaves).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Entry)> + '_ {
        self.entries.iter().enumerate()
    }
}

impl fmt::Display for LeafFunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (size, entry) in self.iter() {
            if size > 0 {
                write!(f, ", ")?;
            }
            match entry.leaves() {
                Some(leaves) => write!(f, "{}: {}", size, leaves)?,
                None => write!(f, "{}: ∅", size)?,
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeding() {
        let empty = LeafFunctionTable::new(0);
        assert_eq!(empty.values(), vec![Some(0)]);
        assert_eq!(empty.witness(0), Some(&[][..]));

        let table = LeafFunctionTable::new(2);
        assert_eq!(table.max_size(), 2);
        assert_eq!(table.witness(1), Some(&[0][..]));
        assert_eq!(table.entry(2), &Entry::Unreachable);
    }

    #[test]
    fn test_offer_is_strict() {
        let mut table = LeafFunctionTable::new(5);
        assert!(table.offer(4, 2, || vec![0, 1, 2, 3]));
        assert!(!table.offer(4, 2, || unreachable!()));
        assert!(!table.offer(4, 1, || unreachable!()));
        assert!(table.offer(4, 3, || vec![0, 1, 2, 4]));
        assert_eq!(table.leaves(4), Some(3));
        assert_eq!(table.witness(4), Some(&[0, 1, 2, 4][..]));
    }
}
