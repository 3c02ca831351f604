// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Graph input for the solvers.
//!
//! Solvers only need an adjacency relation over the vertex set `0..n`. Any
//! representation can take part by implementing [`GraphView`]; the solvers
//! then take one validated snapshot of it, the [`GraphMemo`], and never touch
//! the source graph again.
//!
//! # Example
//!
//! ```
//! use flis_search::graph::{AdjacencyList, GraphView};
//!
//! // A path on four vertices
//! let path = AdjacencyList::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
//! assert_eq!(path.vertex_count(), 4);
//! assert_eq!(path.degree(1), 2);
//! assert!(path.has_edge(3, 2));
//! ```

pub mod memo;
#[cfg(feature = "petgraph")]
pub mod petgraph_view;

pub use memo::GraphMemo;

use crate::error::{InvalidInputKind, Result};

/// A vertex identifier in `0..n`.
pub type Vertex = usize;

/// Read-only capability interface over a simple undirected graph.
///
/// Implementations must describe a symmetric, irreflexive relation without
/// parallel edges. [`GraphMemo::new`] checks this once and rejects anything
/// else.
pub trait GraphView {
    /// Number of vertices; vertices are `0..vertex_count()`.
    fn vertex_count(&self) -> usize;

    /// Neighbors of `v`, in any order.
    fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_;

    /// Number of neighbors of `v`.
    fn degree(&self, v: Vertex) -> usize {
        self.neighbors(v).count()
    }

    /// Whether `u` and `v` are adjacent.
    fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        self.neighbors(u).any(|w| w == v)
    }
}

/// A plain adjacency-list graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyList {
    adjacency: Vec<Vec<Vertex>>,
}

impl AdjacencyList {
    /// Create a graph with `n` vertices and no edges.
    pub fn empty(n: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); n],
        }
    }

    /// Build a graph from an undirected edge list.
    ///
    /// Fails on self-loops, repeated edges and out-of-range endpoints.
    pub fn from_edges(n: usize, edges: &[(Vertex, Vertex)]) -> Result<Self> {
        let mut graph = Self::empty(n);
        for &(u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Add the undirected edge `u`–`v`.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> Result<()> {
        let n = self.adjacency.len();
        if u >= n || v >= n {
            return Err(InvalidInputKind::NotSimple {
                vertex: u.max(v),
                reason: "edge endpoint out of range",
            }
            .into());
        }
        if u == v {
            return Err(InvalidInputKind::NotSimple {
                vertex: u,
                reason: "self-loop",
            }
            .into());
        }
        if self.adjacency[u].contains(&v) {
            return Err(InvalidInputKind::NotSimple {
                vertex: u,
                reason: "parallel edge",
            }
            .into());
        }
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
        Ok(())
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}

impl GraphView for AdjacencyList {
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.adjacency[v].iter().copied()
    }

    fn degree(&self, v: Vertex) -> usize {
        self.adjacency[v].len()
    }
}
