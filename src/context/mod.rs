// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context: everything one worker touches during a search.
//!
//! The context combines read-only data shared by all workers (the graph memo,
//! the best-so-far table, the limits) with the worker's own mutable state (the
//! trail, the subtree, the bound scratch space and the statistics). Parallel
//! jobs each build their own context over the same shared references.

use log::trace;

use crate::bound::{BoundEstimator, BoundStrategy};
use crate::engine::SearchControl;
use crate::graph::{GraphMemo, Vertex};
use crate::state::{Counters, InducedSubtreeState, Statistics};
use crate::table::SharedLeafTable;
use crate::trail::Trail;

pub struct SearchContext<'a> {
    /// Immutable graph data, shared.
    pub memo: &'a GraphMemo,

    /// Best-so-far results, shared.
    pub table: &'a SharedLeafTable,

    /// Cancellation and limits, shared.
    pub control: &'a SearchControl,

    /// Undo log for `state`.
    pub trail: Trail,

    /// The subtree under construction.
    pub state: InducedSubtreeState,

    pub bound: BoundEstimator,

    pub statistics: Statistics,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        memo: &'a GraphMemo,
        table: &'a SharedLeafTable,
        control: &'a SearchControl,
        strategy: BoundStrategy,
    ) -> Self {
        Self {
            memo,
            table,
            control,
            trail: Trail::new(),
            state: InducedSubtreeState::new(memo),
            bound: BoundEstimator::new(strategy, memo.max_degree()),
            statistics: Statistics::new(),
        }
    }

    /// Add `v` to the subtree; see [`InducedSubtreeState::include`].
    pub fn include(&mut self, v: Vertex) {
        self.state.include(self.memo, &mut self.trail, v);
    }

    /// Forbid `v`; see [`InducedSubtreeState::exclude`].
    pub fn exclude(&mut self, v: Vertex) {
        self.state.exclude(self.memo, &mut self.trail, v);
    }

    /// Undo every change made after `checkpoint`.
    pub fn rewind_to(&mut self, checkpoint: usize) {
        self.trail.rewind_to(checkpoint, &mut self.state);
    }

    /// Offer the current subtree to the shared table.
    pub fn record(&mut self) -> bool {
        let size = self.state.size();
        let leaves = self.state.leaf_count();
        let state = &self.state;
        let improved = self.table.offer(size, leaves, || state.witness());
        if improved {
            self.statistics.increment_counter(Counters::Improvements);
            trace!("size {} improved to {} leaves: {:?}", size, leaves, state.vertices());
        }
        improved
    }

    /// Whether some size reachable from here could still beat the table.
    pub fn is_promising(&mut self) -> bool {
        let limit = self.memo.vertex_count() - self.state.excluded_count();
        let table = self.table;
        self.bound
            .is_promising(&self.state, limit, |size| table.best(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyList;

    #[test]
    fn test_record_only_improvements() {
        let memo = GraphMemo::new(&AdjacencyList::from_edges(3, &[(0, 1), (1, 2)]).unwrap()).unwrap();
        let table = SharedLeafTable::new(3);
        let control = SearchControl::unlimited();
        let mut ctx = SearchContext::new(&memo, &table, &control, BoundStrategy::default());

        ctx.include(1);
        assert!(!ctx.record());
        ctx.include(0);
        assert!(ctx.record());
        assert!(!ctx.record());
        assert_eq!(table.best(2), Some(2));
        assert_eq!(ctx.statistics.get(Counters::Improvements), 1);
        assert!(ctx.is_promising());

        ctx.include(2);
        assert!(ctx.record());
        assert_eq!(table.snapshot().witness(3), Some(&[0, 1, 2][..]));
        assert!(!ctx.is_promising());

        ctx.rewind_to(0);
        assert!(ctx.state.is_empty());
    }
}
