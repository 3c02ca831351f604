// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Each search worker keeps its own counters in its context; the driver merges
//! them once every worker has finished.

use std::fmt;

use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

#[derive(EnumCountMacro, EnumIter, Display, Debug, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Counters {
    /// Search nodes visited.
    Nodes,
    /// Strict improvements to the shared table.
    Improvements,
    /// Nodes cut off by the bound.
    BoundPrunes,
    /// Children skipped because an equivalent subtree was already explored.
    SymmetrySkips,
    /// Nodes with nothing left to branch on.
    Exhausted,
    /// Seed jobs started.
    Seeds,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    #[inline]
    pub fn increment_counter(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// Add every counter of `other` into `self`.
    pub fn merge(&mut self, other: &Statistics) {
        for (mine, theirs) in self.stats.iter_mut().zip(other.stats.iter()) {
            *mine += theirs;
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for counter in Counters::iter() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}={}", counter, self.get(counter))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_and_merge() {
        let mut a = Statistics::new();
        a.increment_counter(Counters::Nodes);
        a.increment_counter(Counters::Nodes);
        a.increment_counter(Counters::BoundPrunes);

        let mut b = Statistics::new();
        b.increment_counter(Counters::Nodes);
        b.increment_counter(Counters::SymmetrySkips);

        a.merge(&b);
        assert_eq!(a.get(Counters::Nodes), 3);
        assert_eq!(a.get(Counters::BoundPrunes), 1);
        assert_eq!(a.get(Counters::SymmetrySkips), 1);
        assert_eq!(a.get(Counters::Improvements), 0);
    }

    #[test]
    fn test_display() {
        let mut stats = Statistics::new();
        stats.increment_counter(Counters::Seeds);
        let text = stats.to_string();
        assert!(text.starts_with("nodes=0, improvements=0, bound_prunes=0"));
        assert!(text.ends_with("seeds=1"));
    }
}
