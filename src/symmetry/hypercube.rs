// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Hypercube recognition and coordinate labeling.

use std::collections::VecDeque;

use crate::error::{InvalidInputKind, Result};
use crate::graph::{GraphMemo, Vertex};

/// Largest supported dimension: labels of Q_6 fill one `u64` vertex mask.
pub const MAX_CUBE_DIMENSION: usize = 6;

/// A bijection between the vertices of a graph and the bit strings of Q_d,
/// under which adjacency is Hamming distance 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HypercubeLabeling {
    dimension: usize,
    label: Vec<usize>,
    vertex: Vec<Vertex>,
}

impl HypercubeLabeling {
    /// Recognize `memo` as a hypercube, whatever its vertex numbering.
    ///
    /// Vertex 0 gets label 0 and its neighbors the unit vectors in neighbor
    /// order. Every vertex at distance k from vertex 0 must then have exactly
    /// k neighbors at distance k − 1, and its label is the union of theirs.
    /// The result is checked to be an isomorphism onto Q_d.
    pub fn recognize(memo: &GraphMemo) -> Result<Self> {
        let n = memo.vertex_count();
        if n == 0 || !n.is_power_of_two() {
            return Err(not_a_hypercube(format!("{} vertices is not a power of two", n)));
        }
        let dimension = n.trailing_zeros() as usize;
        if dimension > MAX_CUBE_DIMENSION {
            return Err(InvalidInputKind::CubeTooLarge {
                dimension,
                max: MAX_CUBE_DIMENSION,
            }
            .into());
        }
        if let Some(v) = (0..n).find(|&v| memo.degree(v) != dimension) {
            return Err(not_a_hypercube(format!(
                "vertex {} has degree {}, expected {}",
                v,
                memo.degree(v),
                dimension
            )));
        }

        let mut distance = vec![usize::MAX; n];
        let mut label = vec![0usize; n];
        let mut queue = VecDeque::with_capacity(n);
        distance[0] = 0;
        for (bit, &w) in memo.neighbors(0).iter().enumerate() {
            distance[w] = 1;
            label[w] = 1 << bit;
            queue.push_back(w);
        }

        while let Some(v) = queue.pop_front() {
            for &w in memo.neighbors(v) {
                if distance[w] != usize::MAX {
                    continue;
                }
                let depth = distance[v] + 1;
                distance[w] = depth;
                let predecessors: Vec<Vertex> = memo
                    .neighbors(w)
                    .iter()
                    .copied()
                    .filter(|&u| distance[u] == distance[v])
                    .collect();
                if predecessors.len() != depth {
                    return Err(not_a_hypercube(format!(
                        "vertex {} at distance {} has {} neighbors closer to vertex 0",
                        w,
                        depth,
                        predecessors.len()
                    )));
                }
                label[w] = predecessors.iter().fold(0, |acc, &u| acc | label[u]);
                if label[w].count_ones() as usize != depth {
                    return Err(not_a_hypercube(format!("vertex {} has inconsistent coordinates", w)));
                }
                queue.push_back(w);
            }
        }

        if let Some(v) = distance.iter().position(|&d| d == usize::MAX) {
            return Err(not_a_hypercube(format!("vertex {} is unreachable from vertex 0", v)));
        }

        let mut vertex = vec![usize::MAX; n];
        for (v, &l) in label.iter().enumerate() {
            if vertex[l] != usize::MAX {
                return Err(not_a_hypercube(format!(
                    "vertices {} and {} share coordinates",
                    vertex[l], v
                )));
            }
            vertex[l] = v;
        }
        for u in 0..n {
            for &w in memo.neighbors(u) {
                if (label[u] ^ label[w]).count_ones() != 1 {
                    return Err(not_a_hypercube(format!("edge {}-{} is not a cube edge", u, w)));
                }
            }
        }

        Ok(Self {
            dimension,
            label,
            vertex,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Coordinates of `v`.
    #[inline]
    pub fn label(&self, v: Vertex) -> usize {
        self.label[v]
    }

    /// The vertex with coordinates `label`.
    pub fn vertex(&self, label: usize) -> Vertex {
        self.vertex[label]
    }
}

fn not_a_hypercube(reason: String) -> crate::error::FlisError {
    InvalidInputKind::NotAHypercube { reason }.into()
}
