// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Polynomial leaf function of a tree.
//!
//! For every directed edge p→v, `rooted[p→v][i]` is the largest number of
//! leaves of a subtree with i vertices that lies on v's side of the edge p–v,
//! contains v, and is attached to p. Attached means v counts as a leaf exactly
//! when it has no selected children. These tables are computed for all
//! directed edges in order of increasing side size, each one by merging its
//! children's tables knapsack-style, so every edge is computed once whichever
//! vertex the tree is rooted at.
//!
//! Any subtree with at least two vertices contains an edge u–v and splits
//! there into an attached part on each side, so
//! `L(i) = max over edges u–v and 1 <= j < i of rooted[v→u][j] + rooted[u→v][i − j]`.

use std::collections::VecDeque;

use log::debug;

use crate::engine::{SearchControl, Termination};
use crate::error::Result;
use crate::graph::{GraphMemo, Vertex};
use crate::table::LeafFunctionTable;

/// The tree solver, with the rooted structure of the tree precomputed.
#[derive(Debug)]
pub struct TreeSolver<'a> {
    memo: &'a GraphMemo,
    /// Parent of each vertex when rooted at vertex 0.
    parent: Vec<Option<Vertex>>,
    /// Subtree size of each vertex when rooted at vertex 0.
    subtree_size: Vec<usize>,
    /// First directed-edge id of the edges pointing at each vertex.
    offset: Vec<usize>,
}

/// The best split found for one size.
#[derive(Debug, Clone, Copy)]
struct Split {
    leaves: usize,
    u: Vertex,
    v: Vertex,
    u_side: usize,
}

impl<'a> TreeSolver<'a> {
    /// Fails with `NotATree` unless `memo` is a tree.
    pub fn new(memo: &'a GraphMemo) -> Result<Self> {
        memo.require_tree()?;
        let n = memo.vertex_count();

        let mut parent = vec![None; n];
        let mut order = Vec::with_capacity(n);
        let mut seen = vec![false; n];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        while let Some(v) = queue.pop_front() {
            order.push(v);
            for &w in memo.neighbors(v) {
                if !seen[w] {
                    seen[w] = true;
                    parent[w] = Some(v);
                    queue.push_back(w);
                }
            }
        }

        let mut subtree_size = vec![1; n];
        for &v in order.iter().rev() {
            if let Some(p) = parent[v] {
                subtree_size[p] += subtree_size[v];
            }
        }

        let mut offset = Vec::with_capacity(n + 1);
        let mut total = 0;
        for v in 0..n {
            offset.push(total);
            total += memo.degree(v);
        }
        offset.push(total);

        Ok(Self {
            memo,
            parent,
            subtree_size,
            offset,
        })
    }

    /// Id of the directed edge `from → to`.
    fn directed(&self, from: Vertex, to: Vertex) -> usize {
        match self.memo.neighbors(to).binary_search(&from) {
            Ok(position) => self.offset[to] + position,
            Err(_) => panic!("{}-{} is not an edge", from, to),
        }
    }

    /// Number of vertices on `to`'s side of the edge `from`–`to`.
    fn side_size(&self, from: Vertex, to: Vertex) -> usize {
        if self.parent[to] == Some(from) {
            self.subtree_size[to]
        } else {
            self.memo.vertex_count() - self.subtree_size[from]
        }
    }

    fn children(&self, from: Vertex, to: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.memo.neighbors(to).iter().copied().filter(move |&c| c != from)
    }

    /// Compute the leaf function. The control is consulted between edges;
    /// a stopped run returns the seeded table.
    pub fn solve(&self, control: &SearchControl) -> (LeafFunctionTable, Termination) {
        let n = self.memo.vertex_count();
        let mut table = LeafFunctionTable::new(n);

        let mut edges: Vec<(Vertex, Vertex)> = (0..n)
            .flat_map(|to| self.memo.neighbors(to).iter().map(move |&from| (from, to)))
            .collect();
        edges.sort_by_key(|&(from, to)| self.side_size(from, to));

        let mut rooted: Vec<Vec<usize>> = vec![Vec::new(); self.offset[n]];
        for &(from, to) in &edges {
            if let Some(stop) = control.tick() {
                return (table, stop);
            }
            let mut forest = vec![0];
            for c in self.children(from, to) {
                forest = merge(&forest, &rooted[self.directed(to, c)]);
            }
            let mut attached = Vec::with_capacity(forest.len() + 1);
            attached.push(0);
            attached.push(1);
            attached.extend_from_slice(&forest[1..]);
            rooted[self.directed(from, to)] = attached;
        }

        let mut best: Vec<Option<Split>> = vec![None; n + 1];
        for u in 0..n {
            for &v in self.memo.neighbors(u).iter().filter(|&&v| u < v) {
                let u_part = &rooted[self.directed(v, u)];
                let v_part = &rooted[self.directed(u, v)];
                for (j, &left) in u_part.iter().enumerate().skip(1) {
                    for (k, &right) in v_part.iter().enumerate().skip(1) {
                        let leaves = left + right;
                        if best[j + k].map_or(true, |split| leaves > split.leaves) {
                            best[j + k] = Some(Split {
                                leaves,
                                u,
                                v,
                                u_side: j,
                            });
                        }
                    }
                }
            }
        }

        for (size, split) in best.iter().enumerate() {
            if let Some(split) = split {
                table.offer(size, split.leaves, || {
                    let mut witness = Vec::with_capacity(size);
                    self.collect(&rooted, split.v, split.u, split.u_side, &mut witness);
                    self.collect(&rooted, split.u, split.v, size - split.u_side, &mut witness);
                    witness.sort_unstable();
                    witness
                });
            }
        }
        debug!("tree DP over {} directed edges: {}", edges.len(), table);
        (table, Termination::Exhausted)
    }

    /// Append an optimal attached subtree of `size` vertices on `to`'s side
    /// of `from`–`to` to `out`.
    fn collect(&self, rooted: &[Vec<usize>], from: Vertex, to: Vertex, size: usize, out: &mut Vec<Vertex>) {
        let mut pending = vec![(from, to, size)];
        while let Some((from, to, size)) = pending.pop() {
            out.push(to);
            if size == 1 {
                continue;
            }
            let children: Vec<Vertex> = self.children(from, to).collect();
            let mut prefixes = vec![vec![0]];
            for &c in &children {
                let next = merge(&prefixes[prefixes.len() - 1], &rooted[self.directed(to, c)]);
                prefixes.push(next);
            }

            let mut remaining = size - 1;
            for (t, &c) in children.iter().enumerate().rev() {
                let target = prefixes[t + 1][remaining];
                let child = &rooted[self.directed(to, c)];
                let before = &prefixes[t];
                let Some(take) = (0..child.len().min(remaining + 1))
                    .find(|&s| remaining - s < before.len() && before[remaining - s] + child[s] == target)
                else {
                    unreachable!("forest table of {} is inconsistent", to);
                };
                if take > 0 {
                    pending.push((to, c, take));
                }
                remaining -= take;
            }
        }
    }
}

/// Combine a forest table with one more child table: the best leaf count for
/// every total size.
fn merge(forest: &[usize], child: &[usize]) -> Vec<usize> {
    let mut merged = vec![0; forest.len() + child.len() - 1];
    for (a, &forest_leaves) in forest.iter().enumerate() {
        for (b, &child_leaves) in child.iter().enumerate() {
            merged[a + b] = merged[a + b].max(forest_leaves + child_leaves);
        }
    }
    merged
}
