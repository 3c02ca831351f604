// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! [`GraphView`] for petgraph's undirected graphs.
//!
//! Vertices are node indices, so the graph must not have had nodes removed
//! (petgraph's `Graph` keeps indices compact in that case).

use petgraph::graph::{Graph, IndexType, NodeIndex, UnGraph};

use super::{GraphView, Vertex};

impl<N, E, Ix: IndexType> GraphView for UnGraph<N, E, Ix> {
    fn vertex_count(&self) -> usize {
        self.node_count()
    }

    fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        Graph::neighbors(self, NodeIndex::new(v)).map(|w| w.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphMemo;

    #[test]
    fn test_petgraph_view() {
        let g: UnGraph<(), ()> = UnGraph::from_edges([(0u32, 1), (1, 2), (2, 3)]);
        let memo = GraphMemo::new(&g).unwrap();
        assert_eq!(memo.vertex_count(), 4);
        assert_eq!(memo.neighbors(1), &[0, 2]);
        assert!(memo.is_tree());
    }
}
