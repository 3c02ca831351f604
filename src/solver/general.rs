// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Branch-and-bound over arbitrary graphs.
//!
//! Every connected induced subtree is generated exactly once. The top level
//! splits the work into one job per seed vertex s: the subtrees that contain
//! s but none of `0..s`. Below that, each node picks the first border vertex
//! and branches on including or excluding it, so a subtree is completed at
//! the unique node where its whole border has been decided. Each node offers
//! its subtree to the shared table and is pruned when no reachable size can
//! beat the table any more.

use log::debug;
use rayon::prelude::*;

use crate::bound::BoundStrategy;
use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult, SearchControl, SearchEngine, Termination};
use crate::error::Result;
use crate::graph::{GraphMemo, Vertex};
use crate::state::{Counters, Statistics};
use crate::table::SharedLeafTable;

/// Starts a seed job: forbids every smaller vertex, then takes the seed.
#[derive(Debug)]
pub(crate) struct SeedPredicate {
    pub(crate) seed: Vertex,
}

impl Predicate for SeedPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext<'_>, _round: usize) -> PredicateResult {
        for v in 0..self.seed {
            ctx.exclude(v);
        }
        ctx.include(self.seed);
        PredicateResult::Success
    }

    fn name(&self) -> &str {
        "Seed"
    }
}

/// Include/exclude branching on the first border vertex, one round per
/// decision.
#[derive(Debug)]
struct BranchPredicate {
    /// The vertex decided at each round.
    branch: Vec<Vertex>,
}

impl BranchPredicate {
    fn new(n: usize) -> Self {
        Self {
            branch: vec![0; n + 1],
        }
    }
}

impl Predicate for BranchPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext<'_>, round: usize) -> PredicateResult {
        ctx.record();
        let Some(v) = ctx.state.next_candidate() else {
            ctx.statistics.increment_counter(Counters::Exhausted);
            return PredicateResult::Failure;
        };
        if !ctx.is_promising() {
            ctx.statistics.increment_counter(Counters::BoundPrunes);
            return PredicateResult::Failure;
        }
        self.branch[round] = v;
        PredicateResult::Choices(2)
    }

    fn retry_pred(&mut self, ctx: &mut SearchContext<'_>, round: usize, choice: usize) -> PredicateResult {
        let v = self.branch[round];
        match choice {
            0 => ctx.include(v),
            1 => ctx.exclude(v),
            _ => unreachable!("binary branch"),
        }
        PredicateResult::SuccessSamePredicate
    }

    fn name(&self) -> &str {
        "Branch"
    }
}

/// The general solver for one graph.
#[derive(Debug)]
pub struct GeneralSolver<'a> {
    memo: &'a GraphMemo,
    strategy: BoundStrategy,
    threads: Option<usize>,
}

impl<'a> GeneralSolver<'a> {
    /// `threads`: `Some(1)` runs every job on the calling thread, `None`
    /// uses rayon's default pool size.
    pub fn new(memo: &'a GraphMemo, strategy: BoundStrategy, threads: Option<usize>) -> Self {
        Self {
            memo,
            strategy,
            threads,
        }
    }

    /// Search every seed job, improving `table` in place.
    pub fn run(&self, table: &SharedLeafTable, control: &SearchControl) -> Result<(Termination, Statistics)> {
        let n = self.memo.vertex_count();
        let outcomes: Vec<(Termination, Statistics)> = if self.threads == Some(1) {
            (0..n).map(|seed| self.run_seed(seed, table, control)).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads.unwrap_or(0))
                .build()?;
            pool.install(|| {
                (0..n)
                    .into_par_iter()
                    .map(|seed| self.run_seed(seed, table, control))
                    .collect()
            })
        };

        let mut termination = Termination::Exhausted;
        let mut statistics = Statistics::new();
        for (outcome, stats) in &outcomes {
            termination = termination.and(*outcome);
            statistics.merge(stats);
        }
        Ok((termination, statistics))
    }

    fn run_seed(&self, seed: Vertex, table: &SharedLeafTable, control: &SearchControl) -> (Termination, Statistics) {
        if let Some(stop) = control.check() {
            return (stop, Statistics::new());
        }
        let mut ctx = SearchContext::new(self.memo, table, control, self.strategy);
        ctx.statistics.increment_counter(Counters::Seeds);
        let mut engine = SearchEngine::new(vec![
            Box::new(SeedPredicate { seed }),
            Box::new(BranchPredicate::new(self.memo.vertex_count())),
        ]);
        let termination = engine.search(&mut ctx);
        debug!(
            "seed {}: {} after {} nodes, {} prunes",
            seed,
            termination,
            ctx.statistics.get(Counters::Nodes),
            ctx.statistics.get(Counters::BoundPrunes)
        );
        (termination, ctx.statistics)
    }
}
