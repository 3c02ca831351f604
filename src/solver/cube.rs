// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Symmetry-pruned search on hypercubes.
//!
//! The search grows subtrees one border vertex at a time from the empty set,
//! trying every border vertex at every node. A child is explored only if no
//! subtree in the same orbit under the cube's automorphisms has been explored
//! at that size, which removes both symmetric copies and the repeated
//! orderings of the same vertex set.

use std::collections::HashSet;

use log::debug;

use crate::bound::BoundStrategy;
use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult, SearchControl, SearchEngine, Termination};
use crate::graph::{GraphMemo, Vertex};
use crate::state::{Counters, Statistics};
use crate::symmetry::{HypercubeLabeling, SymmetryGroup, SymmetryReducer};
use crate::table::SharedLeafTable;
use crate::validate;

/// Frontier growth with a per-size memo of canonical forms.
#[derive(Debug)]
struct OrbitPredicate<'r> {
    labeling: &'r HypercubeLabeling,
    reducer: &'r SymmetryReducer,
    /// Candidates at each depth.
    frontiers: Vec<Vec<Vertex>>,
    /// Label mask of the subtree at each depth.
    masks: Vec<u64>,
    /// Canonical forms already explored, per subtree size.
    seen: Vec<HashSet<u64>>,
    /// Cut branches with the bound; off when every class is wanted.
    prune: bool,
}

impl<'r> OrbitPredicate<'r> {
    fn new(labeling: &'r HypercubeLabeling, reducer: &'r SymmetryReducer, n: usize, prune: bool) -> Self {
        Self {
            labeling,
            reducer,
            frontiers: vec![Vec::new(); n + 1],
            masks: vec![0; n + 1],
            seen: vec![HashSet::new(); n + 1],
            prune,
        }
    }

    fn distinct_subtrees(&self) -> usize {
        self.seen.iter().map(HashSet::len).sum()
    }
}

impl Predicate for OrbitPredicate<'_> {
    fn try_pred(&mut self, ctx: &mut SearchContext<'_>, depth: usize) -> PredicateResult {
        ctx.record();
        if self.prune && !ctx.is_promising() {
            ctx.statistics.increment_counter(Counters::BoundPrunes);
            return PredicateResult::Failure;
        }
        ctx.state.collect_frontier(&mut self.frontiers[depth]);
        if self.frontiers[depth].is_empty() {
            ctx.statistics.increment_counter(Counters::Exhausted);
            return PredicateResult::Failure;
        }
        PredicateResult::Choices(self.frontiers[depth].len())
    }

    fn retry_pred(&mut self, ctx: &mut SearchContext<'_>, depth: usize, choice: usize) -> PredicateResult {
        let v = self.frontiers[depth][choice];
        let mask = self.masks[depth] | (1u64 << self.labeling.label(v));
        if !self.seen[depth + 1].insert(self.reducer.canonical(mask)) {
            ctx.statistics.increment_counter(Counters::SymmetrySkips);
            return PredicateResult::Failure;
        }
        ctx.include(v);
        self.masks[depth + 1] = mask;
        PredicateResult::SuccessSamePredicate
    }

    fn name(&self) -> &str {
        "Orbit"
    }
}

/// The cube solver for one recognized hypercube.
#[derive(Debug)]
pub struct CubeSolver<'a> {
    memo: &'a GraphMemo,
    labeling: &'a HypercubeLabeling,
    reducer: SymmetryReducer,
    strategy: BoundStrategy,
}

impl<'a> CubeSolver<'a> {
    /// `labeling` must come from [`HypercubeLabeling::recognize`] on `memo`.
    pub fn new(
        memo: &'a GraphMemo,
        labeling: &'a HypercubeLabeling,
        group: SymmetryGroup,
        strategy: BoundStrategy,
    ) -> Self {
        let reducer = SymmetryReducer::new(labeling.dimension(), group);
        Self {
            memo,
            labeling,
            reducer,
            strategy,
        }
    }

    /// Record the stars K_{1,j}, j <= d, centered on vertex 0.
    pub fn seed_stars(&self, table: &SharedLeafTable) {
        let neighbors = self.memo.neighbors(0);
        for rays in 1..=neighbors.len() {
            let mut star = Vec::with_capacity(rays + 1);
            star.push(0);
            star.extend_from_slice(&neighbors[..rays]);
            star.sort_unstable();
            let leaves = validate::leaf_count(self.memo, &star);
            table.offer(rays + 1, leaves, || star);
        }
    }

    /// Search the cube, improving `table` in place.
    pub fn run(&self, table: &SharedLeafTable, control: &SearchControl) -> (Termination, Statistics) {
        self.seed_stars(table);
        let (termination, statistics, _) = self.search(table, control, true);
        (termination, statistics)
    }

    /// One induced subtree per class under the configured group, ordered by
    /// size. Every class is visited, so `table` ends up with the full leaf
    /// function.
    pub fn subtree_classes(&self, table: &SharedLeafTable, control: &SearchControl) -> (Vec<Vec<Vertex>>, Termination) {
        let (termination, _, seen) = self.search(table, control, false);
        let classes = seen
            .iter()
            .flat_map(|masks| {
                let mut masks: Vec<u64> = masks.iter().copied().collect();
                masks.sort_unstable();
                masks
            })
            .map(|mask| self.vertices_of(mask))
            .collect();
        (classes, termination)
    }

    fn search(
        &self,
        table: &SharedLeafTable,
        control: &SearchControl,
        prune: bool,
    ) -> (Termination, Statistics, Vec<HashSet<u64>>) {
        let mut ctx = SearchContext::new(self.memo, table, control, self.strategy);
        let mut orbits = OrbitPredicate::new(self.labeling, &self.reducer, self.memo.vertex_count(), prune);
        let termination = {
            let mut engine = SearchEngine::new(vec![Box::new(&mut orbits)]);
            engine.search(&mut ctx)
        };
        debug!(
            "Q_{} under a group of order {}: {} distinct subtrees, {} symmetric skips",
            self.labeling.dimension(),
            self.reducer.order(),
            orbits.distinct_subtrees(),
            ctx.statistics.get(Counters::SymmetrySkips)
        );
        (termination, ctx.statistics, orbits.seen)
    }

    /// The vertices whose labels are set in `mask`, sorted.
    fn vertices_of(&self, mask: u64) -> Vec<Vertex> {
        let mut vertices: Vec<Vertex> = (0..self.memo.vertex_count())
            .filter(|&label| mask & (1u64 << label) != 0)
            .map(|label| self.labeling.vertex(label))
            .collect();
        vertices.sort_unstable();
        vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyList;

    fn cube(d: usize) -> GraphMemo {
        let mut g = AdjacencyList::empty(1 << d);
        for u in 0..(1usize << d) {
            for bit in 0..d {
                let w = u ^ (1 << bit);
                if u < w {
                    g.add_edge(u, w).unwrap();
                }
            }
        }
        GraphMemo::new(&g).unwrap()
    }

    fn solve(memo: &GraphMemo, group: SymmetryGroup) -> (Vec<Option<usize>>, Statistics) {
        let labeling = HypercubeLabeling::recognize(memo).unwrap();
        let table = SharedLeafTable::new(memo.vertex_count());
        let solver = CubeSolver::new(memo, &labeling, group, BoundStrategy::default());
        let (termination, stats) = solver.run(&table, &SearchControl::unlimited());
        assert_eq!(termination, Termination::Exhausted);
        (table.into_table().values(), stats)
    }

    #[test]
    fn test_q3() {
        let expected = vec![Some(0), Some(0), Some(2), Some(2), Some(3), Some(2), None, None, None];
        for group in [SymmetryGroup::Full, SymmetryGroup::Flips, SymmetryGroup::Trivial] {
            assert_eq!(solve(&cube(3), group).0, expected, "group {}", group);
        }
    }

    #[test]
    fn test_full_group_skips_more() {
        let (_, full) = solve(&cube(3), SymmetryGroup::Full);
        let (_, trivial) = solve(&cube(3), SymmetryGroup::Trivial);
        assert!(full.get(Counters::Nodes) < trivial.get(Counters::Nodes));
    }

    #[test]
    fn test_seed_stars() {
        let memo = cube(3);
        let labeling = HypercubeLabeling::recognize(&memo).unwrap();
        let table = SharedLeafTable::new(8);
        CubeSolver::new(&memo, &labeling, SymmetryGroup::Full, BoundStrategy::default()).seed_stars(&table);
        assert_eq!(table.best(2), Some(2));
        assert_eq!(table.best(3), Some(2));
        assert_eq!(table.best(4), Some(3));
        assert_eq!(table.best(5), None);
        assert_eq!(table.snapshot().witness(4), Some(&[0, 1, 2, 4][..]));
    }

    #[test]
    fn test_square_classes() {
        // Q_2 is C_4: one vertex, one edge and one path of three, up to symmetry
        let memo = cube(2);
        let labeling = HypercubeLabeling::recognize(&memo).unwrap();
        let table = SharedLeafTable::new(4);
        let solver = CubeSolver::new(&memo, &labeling, SymmetryGroup::Full, BoundStrategy::default());
        let (classes, termination) = solver.subtree_classes(&table, &SearchControl::unlimited());
        assert_eq!(termination, Termination::Exhausted);
        assert_eq!(classes.iter().map(Vec::len).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(classes[0], vec![0]);
        assert_eq!(table.into_table().values(), vec![Some(0), Some(0), Some(2), Some(2), None]);
    }
}
