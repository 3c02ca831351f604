// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Solver selection and the top-level solve.
//!
//! ```
//! use flis_search::graph::AdjacencyList;
//! use flis_search::solver::{Algorithm, FlisSolver, SolverConfig};
//!
//! // A star with four rays
//! let star = AdjacencyList::from_edges(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]).unwrap();
//!
//! for algorithm in [Algorithm::General, Algorithm::Tree] {
//!     let config = SolverConfig::default().with_algorithm(algorithm);
//!     let table = FlisSolver::new(&star, config).unwrap().solve().unwrap().into_proven().unwrap();
//!     assert_eq!(table.values(), vec![Some(0), Some(0), Some(2), Some(2), Some(3), Some(4)]);
//! }
//! ```

pub mod cube;
pub mod general;
pub mod tree;

pub use cube::CubeSolver;
pub use general::GeneralSolver;
pub use tree::TreeSolver;

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::info;
use strum_macros::{Display, EnumString};

use crate::bound::BoundStrategy;
use crate::engine::{CancellationToken, SearchControl, Termination};
use crate::error::{FlisError, Result};
use crate::graph::{GraphMemo, GraphView};
use crate::state::Statistics;
use crate::symmetry::{HypercubeLabeling, SymmetryGroup};
use crate::table::{LeafFunctionTable, SharedLeafTable};

/// Which solver to run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Algorithm {
    /// Branch-and-bound; any graph.
    #[default]
    General,
    /// Dynamic programming; trees only.
    Tree,
    /// Symmetry-pruned branch-and-bound; hypercubes only.
    Cube,
}

/// Configuration for one solve.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub algorithm: Algorithm,
    pub bound: BoundStrategy,
    /// Canonicalization group for [`Algorithm::Cube`].
    pub symmetry: SymmetryGroup,
    /// Worker threads for [`Algorithm::General`]; `None` for rayon's default.
    pub threads: Option<usize>,
    /// Stop after visiting this many search nodes.
    pub node_limit: Option<u64>,
    /// Stop after this much wall-clock time.
    pub time_limit: Option<Duration>,
    pub cancellation: CancellationToken,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::General,
            bound: BoundStrategy::DegreeProfile,
            symmetry: SymmetryGroup::Full,
            threads: None,
            node_limit: None,
            time_limit: None,
            cancellation: CancellationToken::new(),
        }
    }
}

impl SolverConfig {
    pub fn with_algorithm(self, algorithm: Algorithm) -> Self {
        Self { algorithm, ..self }
    }

    pub fn with_bound(self, bound: BoundStrategy) -> Self {
        Self { bound, ..self }
    }

    pub fn with_symmetry(self, symmetry: SymmetryGroup) -> Self {
        Self { symmetry, ..self }
    }

    pub fn with_threads(self, threads: usize) -> Self {
        Self {
            threads: Some(threads),
            ..self
        }
    }

    pub fn with_node_limit(self, node_limit: u64) -> Self {
        Self {
            node_limit: Some(node_limit),
            ..self
        }
    }

    pub fn with_time_limit(self, time_limit: Duration) -> Self {
        Self {
            time_limit: Some(time_limit),
            ..self
        }
    }

    pub fn with_cancellation(self, cancellation: CancellationToken) -> Self {
        Self { cancellation, ..self }
    }
}

/// The outcome of a solve.
#[derive(Debug, Clone)]
pub struct Solution {
    pub table: LeafFunctionTable,
    pub termination: Termination,
    pub statistics: Statistics,
}

impl Solution {
    /// Whether every entry of the table is optimal.
    pub fn is_proven(&self) -> bool {
        self.termination.is_exhausted()
    }

    /// The table, provided the search ran to exhaustion.
    pub fn into_proven(self) -> Result<LeafFunctionTable> {
        if self.is_proven() {
            Ok(self.table)
        } else {
            Err(FlisError::ResourceExhausted {
                termination: self.termination,
            })
        }
    }
}

/// Read-only view of a running solve, usable from another thread.
#[derive(Debug, Clone)]
pub struct Progress {
    table: Arc<SharedLeafTable>,
    cancellation: CancellationToken,
}

impl Progress {
    /// Best leaf count found so far for `size`.
    pub fn best(&self, size: usize) -> Option<usize> {
        self.table.best(size)
    }

    /// Copy of the best-so-far table.
    pub fn snapshot(&self) -> LeafFunctionTable {
        self.table.snapshot()
    }

    /// Ask the solve to stop.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }
}

/// What the precondition check of each algorithm produced.
#[derive(Debug)]
enum Prepared {
    General,
    Tree,
    Cube(HypercubeLabeling),
}

/// A validated graph plus a configuration, ready to solve.
#[derive(Debug)]
pub struct FlisSolver {
    memo: GraphMemo,
    config: SolverConfig,
    prepared: Prepared,
    table: Arc<SharedLeafTable>,
}

impl FlisSolver {
    /// Snapshot `graph` and check the precondition of the chosen algorithm.
    pub fn new<G: GraphView + ?Sized>(graph: &G, config: SolverConfig) -> Result<Self> {
        let memo = GraphMemo::new(graph)?;
        let prepared = match config.algorithm {
            Algorithm::General => Prepared::General,
            Algorithm::Tree => {
                memo.require_tree()?;
                Prepared::Tree
            }
            Algorithm::Cube => Prepared::Cube(HypercubeLabeling::recognize(&memo)?),
        };
        let table = Arc::new(SharedLeafTable::new(memo.vertex_count()));
        Ok(Self {
            memo,
            config,
            prepared,
            table,
        })
    }

    pub fn memo(&self) -> &GraphMemo {
        &self.memo
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn progress(&self) -> Progress {
        Progress {
            table: Arc::clone(&self.table),
            cancellation: self.config.cancellation.clone(),
        }
    }

    /// Run the configured solver.
    ///
    /// Every call starts from the seeded table; [`Progress`] handles taken
    /// earlier follow the new run. A search stopped by cancellation or a
    /// limit still returns `Ok`, with the best values found and a
    /// termination other than `Exhausted`.
    pub fn solve(&self) -> Result<Solution> {
        let start = Instant::now();
        self.table.reset();
        info!(
            "solving leaf function: {} vertices, {} edges, {} with {} bound",
            self.memo.vertex_count(),
            self.memo.edge_count(),
            self.config.algorithm,
            self.config.bound
        );
        let control = SearchControl::new(
            self.config.cancellation.clone(),
            self.config.node_limit,
            self.config.time_limit,
        );

        let (termination, statistics) = match &self.prepared {
            Prepared::General => {
                GeneralSolver::new(&self.memo, self.config.bound, self.config.threads).run(&self.table, &control)?
            }
            Prepared::Tree => {
                let (table, termination) = TreeSolver::new(&self.memo)?.solve(&control);
                self.table.merge(&table);
                (termination, Statistics::new())
            }
            Prepared::Cube(labeling) => {
                CubeSolver::new(&self.memo, labeling, self.config.symmetry, self.config.bound)
                    .run(&self.table, &control)
            }
        };

        let table = self.table.snapshot();
        info!(
            "{} in {:.3}s after {} nodes: {} [{}]",
            termination,
            start.elapsed().as_secs_f64(),
            control.nodes(),
            table,
            statistics
        );
        Ok(Solution {
            table,
            termination,
            statistics,
        })
    }
}

/// Compute the proven leaf function of `graph` with the general solver.
pub fn leaf_function<G: GraphView + ?Sized>(graph: &G) -> Result<LeafFunctionTable> {
    FlisSolver::new(graph, SolverConfig::default())?.solve()?.into_proven()
}
