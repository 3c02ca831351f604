// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for solver construction and result extraction.
//!
//! Every failure is detected before a search starts (structural
//! preconditions) or after it stops (a result that was not proven). State
//! transitions inside a search never fail.

use crate::engine::Termination;
use crate::graph::Vertex;

/// Why a supplied graph cannot be handed to a solver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputKind {
    /// The adjacency relation breaks the simple-graph invariant.
    #[error("not a simple graph: {reason} at vertex {vertex}")]
    NotSimple { vertex: Vertex, reason: &'static str },

    /// The tree solver was asked to run on a graph that is not a tree.
    #[error("graph is not a tree ({vertices} vertices, {edges} edges, connected: {connected})")]
    NotATree {
        vertices: usize,
        edges: usize,
        connected: bool,
    },

    /// The cube solver was asked to run on a graph that is not a hypercube.
    #[error("graph is not a hypercube: {reason}")]
    NotAHypercube { reason: String },

    /// The hypercube is too large for the `u64` canonical forms.
    #[error("hypercube of dimension {dimension} exceeds the supported maximum {max}")]
    CubeTooLarge { dimension: usize, max: usize },
}

/// Error type for the library.
#[derive(Debug, thiserror::Error)]
pub enum FlisError {
    /// The graph does not satisfy the solver's precondition.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputKind),

    /// The search stopped before every size was proven optimal.
    #[error("search stopped before exhaustion ({termination})")]
    ResourceExhausted { termination: Termination },

    /// The worker pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for the library.
pub type Result<T> = std::result::Result<T, FlisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = FlisError::from(InvalidInputKind::NotATree {
            vertices: 4,
            edges: 4,
            connected: true,
        });
        assert_eq!(
            err.to_string(),
            "invalid input: graph is not a tree (4 vertices, 4 edges, connected: true)"
        );
    }

    #[test]
    fn test_resource_exhausted_display() {
        let err = FlisError::ResourceExhausted {
            termination: Termination::NodeLimit,
        };
        assert_eq!(
            err.to_string(),
            "search stopped before exhaustion (node limit)"
        );
    }
}
