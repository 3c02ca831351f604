// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Enumeration of induced subtrees.
//!
//! [`induced_subtrees`] lists every nonempty induced subtree of a graph
//! exactly once, using the same seed jobs and include/exclude branching as the
//! general solver but without any pruning. [`induced_subtree_classes`] lists
//! one subtree per isomorphism class under a group of hypercube automorphisms.
//!
//! Both also fill in the leaf function of everything they visit, which makes
//! them a slow but independent check on the solvers.
//!
//! ```
//! use flis_search::engine::SearchControl;
//! use flis_search::enumerate::induced_subtrees;
//! use flis_search::graph::{AdjacencyList, GraphMemo};
//!
//! let triangle = AdjacencyList::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
//! let memo = GraphMemo::new(&triangle).unwrap();
//! let found = induced_subtrees(&memo, &SearchControl::unlimited());
//! assert_eq!(found.subtrees.len(), 6);
//! ```

use log::debug;

use crate::bound::BoundStrategy;
use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult, SearchControl, SearchEngine, Termination};
use crate::graph::{GraphMemo, Vertex};
use crate::solver::general::SeedPredicate;
use crate::solver::CubeSolver;
use crate::symmetry::{HypercubeLabeling, SymmetryGroup};
use crate::table::{LeafFunctionTable, SharedLeafTable};

/// Subtrees found by an enumeration, as sorted vertex lists.
#[derive(Debug, Clone)]
pub struct SubtreeEnumeration {
    pub subtrees: Vec<Vec<Vertex>>,
    /// Leaf function over the visited subtrees.
    pub table: LeafFunctionTable,
    pub termination: Termination,
}

/// Include/exclude branching that reports each completed subtree.
#[derive(Debug)]
struct CollectPredicate {
    branch: Vec<Vertex>,
    subtrees: Vec<Vec<Vertex>>,
}

impl Predicate for CollectPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext<'_>, round: usize) -> PredicateResult {
        match ctx.state.next_candidate() {
            None => {
                ctx.record();
                self.subtrees.push(ctx.state.witness());
                PredicateResult::Failure
            }
            Some(v) => {
                self.branch[round] = v;
                PredicateResult::Choices(2)
            }
        }
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
        "Collect"
    }
}

/// Every nonempty induced subtree of `memo`, seed by seed.
///
/// A stopped enumeration returns what it found so far.
pub fn induced_subtrees(memo: &GraphMemo, control: &SearchControl) -> SubtreeEnumeration {
    let n = memo.vertex_count();
    let table = SharedLeafTable::new(n);
    let mut collector = CollectPredicate {
        branch: vec![0; n + 1],
        subtrees: Vec::new(),
    };

    let mut termination = Termination::Exhausted;
    for seed in 0..n {
        let mut ctx = SearchContext::new(memo, &table, control, BoundStrategy::default());
        let mut engine = SearchEngine::new(vec![Box::new(SeedPredicate { seed }), Box::new(&mut collector)]);
        termination = engine.search(&mut ctx);
        if !termination.is_exhausted() {
            break;
        }
    }
    debug!("{} induced subtrees: {}", collector.subtrees.len(), termination);

    SubtreeEnumeration {
        subtrees: collector.subtrees,
        table: table.into_table(),
        termination,
    }
}

/// One induced subtree per class of the hypercube `memo` under `group`.
///
/// With [`SymmetryGroup::Trivial`] this lists every induced subtree, in size
/// order.
pub fn induced_subtree_classes(
    memo: &GraphMemo,
    labeling: &HypercubeLabeling,
    group: SymmetryGroup,
    control: &SearchControl,
) -> SubtreeEnumeration {
    let table = SharedLeafTable::new(memo.vertex_count());
    let solver = CubeSolver::new(memo, labeling, group, BoundStrategy::default());
    let (subtrees, termination) = solver.subtree_classes(&table, control);
    SubtreeEnumeration {
        subtrees,
        table: table.into_table(),
        termination,
    }
}
