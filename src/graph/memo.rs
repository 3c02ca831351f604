// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Immutable adjacency snapshot shared by every search worker.
//!
//! The memo is computed once per solve from a [`GraphView`] and never changes
//! afterwards, so parallel workers share it by reference while each owns its
//! own mutable search state.

use std::collections::VecDeque;

use super::{GraphView, Vertex};
use crate::error::{InvalidInputKind, Result};

/// Validated adjacency lists plus a few derived quantities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphMemo {
    /// Sorted neighbor lists.
    adjacency: Vec<Vec<Vertex>>,

    /// Number of undirected edges.
    edge_count: usize,

    /// Largest vertex degree (0 for edgeless graphs).
    max_degree: usize,
}

impl GraphMemo {
    /// Snapshot `graph`, checking the simple-graph invariant.
    ///
    /// Neighbor lists are sorted so that every traversal of the memo is
    /// deterministic regardless of the source representation.
    pub fn new<G: GraphView + ?Sized>(graph: &G) -> Result<Self> {
        let n = graph.vertex_count();
        let mut adjacency: Vec<Vec<Vertex>> = Vec::with_capacity(n);
        for v in 0..n {
            let mut neighbors: Vec<Vertex> = graph.neighbors(v).collect();
            neighbors.sort_unstable();
            if let Some(&w) = neighbors.iter().find(|&&w| w >= n) {
                return Err(InvalidInputKind::NotSimple {
                    vertex: w,
                    reason: "neighbor out of range",
                }
                .into());
            }
            if neighbors.binary_search(&v).is_ok() {
                return Err(InvalidInputKind::NotSimple {
                    vertex: v,
                    reason: "self-loop",
                }
                .into());
            }
            if neighbors.windows(2).any(|pair| pair[0] == pair[1]) {
                return Err(InvalidInputKind::NotSimple {
                    vertex: v,
                    reason: "parallel edge",
                }
                .into());
            }
            adjacency.push(neighbors);
        }

        for (u, neighbors) in adjacency.iter().enumerate() {
            for &w in neighbors {
                if adjacency[w].binary_search(&u).is_err() {
                    return Err(InvalidInputKind::NotSimple {
                        vertex: u,
                        reason: "asymmetric adjacency",
                    }
                    .into());
                }
            }
        }

        let degree_sum: usize = adjacency.iter().map(Vec::len).sum();
        let max_degree = adjacency.iter().map(Vec::len).max().unwrap_or(0);

        Ok(Self {
            adjacency,
            edge_count: degree_sum / 2,
            max_degree,
        })
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Sorted neighbors of `v`.
    #[inline]
    pub fn neighbors(&self, v: Vertex) -> &[Vertex] {
        &self.adjacency[v]
    }

    /// Degree of `v`.
    #[inline]
    pub fn degree(&self, v: Vertex) -> usize {
        self.adjacency[v].len()
    }

    /// Largest degree in the graph.
    #[inline]
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Whether `u` and `v` are adjacent.
    pub fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        self.adjacency[u].binary_search(&v).is_ok()
    }

    /// Whether the graph is connected. The empty graph is not.
    pub fn is_connected(&self) -> bool {
        let n = self.vertex_count();
        if n == 0 {
            return false;
        }
        let mut seen = vec![false; n];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(v) = queue.pop_front() {
            for &w in self.neighbors(v) {
                if !seen[w] {
                    seen[w] = true;
                    reached += 1;
                    queue.push_back(w);
                }
            }
        }
        reached == n
    }

    /// Whether the graph is a tree: connected with exactly `n - 1` edges.
    pub fn is_tree(&self) -> bool {
        self.vertex_count() > 0 && self.edge_count + 1 == self.vertex_count() && self.is_connected()
    }

    /// Fail with [`InvalidInputKind::NotATree`] unless the graph is a tree.
    pub fn require_tree(&self) -> Result<()> {
        if self.is_tree() {
            Ok(())
        } else {
            Err(InvalidInputKind::NotATree {
                vertices: self.vertex_count(),
                edges: self.edge_count,
                connected: self.is_connected(),
            }
            .into())
        }
    }
}

impl GraphView for GraphMemo {
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.adjacency[v].iter().copied()
    }

    fn degree(&self, v: Vertex) -> usize {
        self.adjacency[v].len()
    }

    fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        GraphMemo::has_edge(self, u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlisError;
    use crate::graph::AdjacencyList;

    /// A deliberately broken view, to exercise the memo's validation.
    struct OneWay;

    impl GraphView for OneWay {
        fn vertex_count(&self) -> usize {
            2
        }

        fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
            (v == 0).then_some(1).into_iter()
        }
    }

    #[test]
    fn test_memo_sorts_neighbors() {
        let g = AdjacencyList::from_edges(4, &[(0, 3), (0, 1), (0, 2)]).unwrap();
        let memo = GraphMemo::new(&g).unwrap();
        assert_eq!(memo.neighbors(0), &[1, 2, 3]);
        assert_eq!(memo.edge_count(), 3);
        assert_eq!(memo.max_degree(), 3);
    }

    #[test]
    fn test_rejects_asymmetric() {
        let err = GraphMemo::new(&OneWay).unwrap_err();
        assert!(matches!(
            err,
            FlisError::InvalidInput(InvalidInputKind::NotSimple {
                reason: "asymmetric adjacency",
                ..
            })
        ));
    }

    #[test]
    fn test_is_tree() {
        let path = AdjacencyList::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert!(GraphMemo::new(&path).unwrap().is_tree());

        let triangle = AdjacencyList::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        let memo = GraphMemo::new(&triangle).unwrap();
        assert!(!memo.is_tree());
        assert!(memo.require_tree().is_err());

        // Right edge count, but a cycle plus an isolated vertex
        let split = AdjacencyList::from_edges(4, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        let memo = GraphMemo::new(&split).unwrap();
        assert!(!memo.is_connected());
        assert!(!memo.is_tree());

        let empty = GraphMemo::new(&AdjacencyList::empty(0)).unwrap();
        assert!(!empty.is_tree());

        let single = GraphMemo::new(&AdjacencyList::empty(1)).unwrap();
        assert!(single.is_tree());
    }
}
