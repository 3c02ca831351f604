// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Stopping a search before it is exhausted.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use strum_macros::Display;

/// Number of nodes between two reads of the clock.
const CLOCK_INTERVAL: u64 = 1024;

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Termination {
    /// Every branch was explored or pruned; the results are optimal.
    #[strum(serialize = "exhausted")]
    Exhausted,
    /// The cancellation token was triggered.
    #[strum(serialize = "cancelled")]
    Cancelled,
    /// The configured node budget ran out.
    #[strum(serialize = "node limit")]
    NodeLimit,
    /// The configured wall-clock budget ran out.
    #[strum(serialize = "time limit")]
    TimeLimit,
}

impl Termination {
    /// Combine the outcomes of two parts of one search. Any early stop wins
    /// over exhaustion; otherwise the first reason is kept.
    pub fn and(self, other: Termination) -> Termination {
        match self {
            Termination::Exhausted => other,
            stopped => stopped,
        }
    }

    pub fn is_exhausted(self) -> bool {
        self == Termination::Exhausted
    }
}

/// A cloneable flag that asks running searches to stop.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Limits shared by every worker of one solve.
#[derive(Debug)]
pub struct SearchControl {
    token: CancellationToken,
    node_limit: Option<u64>,
    deadline: Option<Instant>,
    expired: AtomicBool,
    nodes: AtomicU64,
}

impl SearchControl {
    pub fn new(token: CancellationToken, node_limit: Option<u64>, time_limit: Option<Duration>) -> Self {
        Self {
            token,
            node_limit,
            deadline: time_limit.map(|limit| Instant::now() + limit),
            expired: AtomicBool::new(false),
            nodes: AtomicU64::new(0),
        }
    }

    /// A control that never stops a search.
    pub fn unlimited() -> Self {
        Self::new(CancellationToken::new(), None, None)
    }

    /// Account for one more search node; returns the reason to stop, if any.
    #[inline]
    pub fn tick(&self) -> Option<Termination> {
        if self.token.is_cancelled() {
            return Some(Termination::Cancelled);
        }
        if self.expired.load(Ordering::Relaxed) {
            return Some(Termination::TimeLimit);
        }
        let visited = self.nodes.fetch_add(1, Ordering::Relaxed) + 1;
        if self.node_limit.is_some_and(|limit| visited > limit) {
            return Some(Termination::NodeLimit);
        }
        if visited % CLOCK_INTERVAL == 0 && self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            self.expired.store(true, Ordering::Relaxed);
            return Some(Termination::TimeLimit);
        }
        None
    }

    /// Check the limits without counting a node.
    pub fn check(&self) -> Option<Termination> {
        if self.token.is_cancelled() {
            Some(Termination::Cancelled)
        } else if self.node_limit.is_some_and(|limit| self.nodes.load(Ordering::Relaxed) >= limit) {
            Some(Termination::NodeLimit)
        } else if self.expired.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
        {
            self.expired.store(true, Ordering::Relaxed);
            Some(Termination::TimeLimit)
        } else {
            None
        }
    }

    /// Nodes counted so far across all workers.
    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_limit() {
        let control = SearchControl::new(CancellationToken::new(), Some(2), None);
        assert_eq!(control.tick(), None);
        assert_eq!(control.tick(), None);
        assert_eq!(control.tick(), Some(Termination::NodeLimit));
        assert_eq!(control.check(), Some(Termination::NodeLimit));
    }

    #[test]
    fn test_cancellation_is_shared() {
        let token = CancellationToken::new();
        let control = SearchControl::new(token.clone(), None, None);
        assert_eq!(control.check(), None);
        token.cancel();
        assert_eq!(control.tick(), Some(Termination::Cancelled));
    }

    #[test]
    fn test_expired_deadline() {
        let control = SearchControl::new(CancellationToken::new(), None, Some(Duration::ZERO));
        assert_eq!(control.check(), Some(Termination::TimeLimit));
    }

    #[test]
    fn test_termination_and() {
        use Termination::*;
        assert_eq!(Exhausted.and(Exhausted), Exhausted);
        assert_eq!(Exhausted.and(NodeLimit), NodeLimit);
        assert_eq!(Cancelled.and(NodeLimit), Cancelled);
        assert_eq!(TimeLimit.to_string(), "time limit");
    }
}
