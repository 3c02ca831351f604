// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Leaf functions and fully leafed induced subtrees.
//!
//! For a simple undirected graph G on n vertices, the *leaf function* maps
//! each size i in `0..=n` to the largest number of leaves of an induced
//! subtree of G with exactly i vertices, or to nothing when G has no induced
//! tree of that size. A subtree achieving the maximum is *fully leafed*.
//!
//! # Architecture
//!
//! Data is split in two tiers:
//!
//! ## Tier 1: MEMO Data (Immutable)
//!
//! - [`graph::GraphMemo`]: validated adjacency, computed once per solve and
//!   shared by reference between workers
//! - [`symmetry::HypercubeLabeling`] and [`symmetry::SymmetryReducer`] for cubes
//!
//! ## Tier 2: DYNAMIC Data (Mutable)
//!
//! Per-worker search state, tracked on the trail:
//! - [`trail::Trail`]: records state changes for cheap backtracking
//! - [`state::InducedSubtreeState`]: the subtree under construction, its
//!   border, leaf count and open degrees
//!
//! # Solvers
//!
//! 1. **General**: include/exclude branch-and-bound with admissible bounds
//!    ([`bound`]), one job per seed vertex, run in parallel with rayon
//! 2. **Tree**: directed-edge dynamic programming in polynomial time
//! 3. **Cube**: frontier growth on Q_d, skipping subtrees isomorphic to one
//!    already explored
//!
//! The search solvers run on the explicit-stack [`engine`]; all of them
//! report into a [`table::LeafFunctionTable`].
//!
//! Around them, [`enumerate`] lists induced subtrees (all of them, or one per
//! class on a hypercube) and [`classify`] groups a family of trees by leaf
//! function.
//!
//! # Example
//!
//! ```
//! use flis_search::graph::AdjacencyList;
//! use flis_search::leaf_function;
//!
//! // The 4-cycle
//! let square = AdjacencyList::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
//! let table = leaf_function(&square).unwrap();
//! assert_eq!(table.values(), vec![Some(0), Some(0), Some(2), Some(2), None]);
//! ```
//!
//! # References
//!
//! - Blondin Massé, A., de Carufel, J., Goupil, A., Lapointe, M., Nadeau, É.,
//!   Vandomme, É. (2018). "Fully leafed induced subtrees." IWOCA 2018.

pub mod bound;
pub mod classify;
pub mod context;
pub mod engine;
pub mod enumerate;
pub mod error;
pub mod graph;
pub mod solver;
pub mod state;
pub mod symmetry;
pub mod table;
pub mod trail;
pub mod validate;

// Re-export commonly used types
pub use classify::LeafClassification;
pub use context::SearchContext;
pub use engine::{CancellationToken, Predicate, PredicateResult, SearchEngine, Termination};
pub use enumerate::{induced_subtrees, SubtreeEnumeration};
pub use error::{FlisError, InvalidInputKind, Result};
pub use graph::{AdjacencyList, GraphMemo, GraphView, Vertex};
pub use solver::{leaf_function, Algorithm, FlisSolver, Progress, Solution, SolverConfig};
pub use table::{Entry, LeafFunctionTable};
pub use trail::Trail;
