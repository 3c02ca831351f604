// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Independent checks on solver output.
//!
//! Nothing here shares code with the incremental search state, so these
//! functions can be used to cross-check it.

use crate::graph::{GraphMemo, Vertex};
use crate::table::{Entry, LeafFunctionTable};

/// Whether `vertices` (distinct, in range) induce a tree in `memo`.
///
/// The empty set does not; a single vertex does.
pub fn is_induced_tree(memo: &GraphMemo, vertices: &[Vertex]) -> bool {
    let k = vertices.len();
    if k == 0 {
        return false;
    }
    let mut inside = vec![false; memo.vertex_count()];
    for &v in vertices {
        if v >= inside.len() || inside[v] {
            return false;
        }
        inside[v] = true;
    }

    let edges: usize = vertices
        .iter()
        .map(|&v| memo.neighbors(v).iter().filter(|&&w| inside[w]).count())
        .sum::<usize>()
        / 2;
    if edges + 1 != k {
        return false;
    }

    // k - 1 edges: a tree iff connected
    let mut reached = vec![false; memo.vertex_count()];
    let mut stack = vec![vertices[0]];
    reached[vertices[0]] = true;
    let mut count = 1;
    while let Some(v) = stack.pop() {
        for &w in memo.neighbors(v) {
            if inside[w] && !reached[w] {
                reached[w] = true;
                count += 1;
                stack.push(w);
            }
        }
    }
    count == k
}

/// Number of vertices of `vertices` with exactly one neighbor among them.
pub fn leaf_count(memo: &GraphMemo, vertices: &[Vertex]) -> usize {
    let mut inside = vec![false; memo.vertex_count()];
    for &v in vertices {
        inside[v] = true;
    }
    vertices
        .iter()
        .filter(|&&v| memo.neighbors(v).iter().filter(|&&w| inside[w]).count() == 1)
        .count()
}

/// Check every realized entry of `table`: its witness must be an induced
/// tree of the right size with the recorded leaf count.
///
/// Returns the first offending size.
pub fn verify_witnesses(memo: &GraphMemo, table: &LeafFunctionTable) -> Result<(), usize> {
    for (size, entry) in table.iter() {
        if let Entry::Realized { leaves, witness } = entry {
            let valid = witness.len() == size
                && (size == 0 || is_induced_tree(memo, witness))
                && leaf_count(memo, witness) == *leaves;
            if !valid {
                return Err(size);
            }
        }
    }
    Ok(())
}
