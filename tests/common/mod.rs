// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests: graph families and
//! a brute-force leaf function.

#![allow(dead_code)]

use flis_search::graph::{AdjacencyList, GraphMemo, Vertex};
use flis_search::validate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn from_edges(n: usize, edges: &[(Vertex, Vertex)]) -> AdjacencyList {
    AdjacencyList::from_edges(n, edges).unwrap()
}

pub fn complete(n: usize) -> AdjacencyList {
    let mut g = AdjacencyList::empty(n);
    for u in 0..n {
        for v in u + 1..n {
            g.add_edge(u, v).unwrap();
        }
    }
    g
}

pub fn cycle(n: usize) -> AdjacencyList {
    let mut g = AdjacencyList::empty(n);
    for i in 0..n {
        g.add_edge(i, (i + 1) % n).unwrap();
    }
    g
}

pub fn path(n: usize) -> AdjacencyList {
    let mut g = AdjacencyList::empty(n);
    for i in 1..n {
        g.add_edge(i - 1, i).unwrap();
    }
    g
}

/// Wheel on `n` vertices: hub 0 joined to the cycle `1..n`.
pub fn wheel(n: usize) -> AdjacencyList {
    let rim = n - 1;
    let mut g = AdjacencyList::empty(n);
    for i in 0..rim {
        g.add_edge(0, i + 1).unwrap();
        g.add_edge(i + 1, (i + 1) % rim + 1).unwrap();
    }
    g
}

pub fn complete_bipartite(a: usize, b: usize) -> AdjacencyList {
    let mut g = AdjacencyList::empty(a + b);
    for u in 0..a {
        for v in a..a + b {
            g.add_edge(u, v).unwrap();
        }
    }
    g
}

pub fn petersen() -> AdjacencyList {
    let mut g = AdjacencyList::empty(10);
    for i in 0..5 {
        g.add_edge(i, (i + 1) % 5).unwrap();
        g.add_edge(i, i + 5).unwrap();
        g.add_edge(i + 5, (i + 2) % 5 + 5).unwrap();
    }
    g
}

pub fn hypercube(d: usize) -> AdjacencyList {
    let mut g = AdjacencyList::empty(1 << d);
    for u in 0..(1usize << d) {
        for bit in 0..d {
            let w = u ^ (1 << bit);
            if u < w {
                g.add_edge(u, w).unwrap();
            }
        }
    }
    g
}

/// Balanced tree where the root and every internal vertex have `r` children,
/// `h` levels below the root.
pub fn balanced_tree(r: usize, h: usize) -> AdjacencyList {
    let mut edges = Vec::new();
    let mut level = vec![0];
    let mut next_vertex = 1;
    for _ in 0..h {
        let mut next_level = Vec::new();
        for &parent in &level {
            for _ in 0..r {
                edges.push((parent, next_vertex));
                next_level.push(next_vertex);
                next_vertex += 1;
            }
        }
        level = next_level;
    }
    from_edges(next_vertex, &edges)
}

/// Uniform random recursive tree: vertex i attaches to a random earlier vertex.
pub fn random_tree(n: usize, seed: u64) -> AdjacencyList {
    let mut rng = StdRng::seed_from_u64(seed);
    let edges: Vec<_> = (1..n).map(|i| (rng.gen_range(0..i), i)).collect();
    from_edges(n, &edges)
}

/// Graph on `n` vertices whose edges are the set bits of `mask`, in the order
/// (0,1), (0,2), ..., (1,2), ...
pub fn graph_from_mask(n: usize, mask: u64) -> AdjacencyList {
    let mut g = AdjacencyList::empty(n);
    let mut bit = 0;
    for u in 0..n {
        for v in u + 1..n {
            if mask & (1 << bit) != 0 {
                g.add_edge(u, v).unwrap();
            }
            bit += 1;
        }
    }
    g
}

/// Leaf function by enumerating every vertex subset. Only for small graphs.
pub fn brute_force(graph: &AdjacencyList) -> Vec<Option<usize>> {
    let memo = GraphMemo::new(graph).unwrap();
    let n = memo.vertex_count();
    assert!(n <= 16, "brute force is exponential");
    let mut best: Vec<Option<usize>> = vec![None; n + 1];
    best[0] = Some(0);
    for subset in 1u32..(1 << n) {
        let vertices: Vec<Vertex> = (0..n).filter(|&v| subset & (1 << v) != 0).collect();
        if validate::is_induced_tree(&memo, &vertices) {
            let leaves = validate::leaf_count(&memo, &vertices);
            let size = vertices.len();
            best[size] = Some(best[size].map_or(leaves, |current| current.max(leaves)));
        }
    }
    best
}

/// Parse a leaf function written as `[0, 0, 2, ∅]`.
pub fn values(text: &str) -> Vec<Option<usize>> {
    text.trim_matches(|c| c == '[' || c == ']')
        .split(',')
        .map(str::trim)
        .map(|item| match item {
            "∅" => None,
            number => Some(number.parse().unwrap()),
        })
        .collect()
}
