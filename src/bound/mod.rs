// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Upper bounds on the leaves reachable from a partial subtree.
//!
//! Given the current subtree T (size m, raw leaf count l, border size b) and a
//! target size i >= m, the estimator returns an upper bound on the leaf count
//! of any induced tree T' ⊇ T of size i that avoids the excluded vertices, or
//! `None` if no such T' can exist.
//!
//! # Derivation
//!
//! Write a = i − m for the number of added vertices. Root T' at T.
//!
//! - A vertex of T with two or more neighbors in T stays internal, so at most
//!   l leaves of T' lie in T.
//! - An added vertex adjacent to T has exactly one neighbor in T (otherwise T'
//!   has a cycle), so it is currently a border vertex. At most b added
//!   vertices hang directly off T.
//! - Every other added vertex has its parent among the added vertices, and
//!   that parent is internal in T'. An internal added vertex u has at most
//!   `open_degree(u) − 1` children.
//!
//! So if k added vertices are internal, their capacities must cover at least
//! a − b children, and T' has at most l + a − k leaves. [`BoundStrategy::DegreeProfile`]
//! takes the smallest k for which the k largest capacities among the
//! remaining candidates reach a − b; if even all of them cannot, size i is
//! unreachable. [`BoundStrategy::Naive`] only uses k >= 1 whenever a > b.
//!
//! Both are then capped by what any tree can have: no leaves below two
//! vertices, two leaves on an edge, at most i − 1 leaves otherwise, and at
//! most i − ceil((i − 2)/(Δ − 1)) leaves when every degree is at most Δ (from
//! the degree sum 2(i − 1) over i − k leaves and k internal vertices).

use strum_macros::{Display, EnumString};

use crate::state::{InducedSubtreeState, VertexStatus};

/// How the estimator bounds the leaves of an extension.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum BoundStrategy {
    /// One internal added vertex whenever the border cannot absorb the growth.
    Naive,
    /// Fewest internal added vertices allowed by the open-degree profile.
    #[default]
    DegreeProfile,
}

/// Per-worker bound evaluator with reusable scratch buffers.
#[derive(Debug, Clone)]
pub struct BoundEstimator {
    strategy: BoundStrategy,
    max_degree: usize,
    /// Number of vertices that are neither included nor excluded.
    candidates: usize,
    /// `prefix[k]` is the sum of the k largest candidate capacities.
    prefix: Vec<usize>,
    /// Candidate count per capacity.
    buckets: Vec<usize>,
}

impl BoundEstimator {
    pub fn new(strategy: BoundStrategy, max_degree: usize) -> Self {
        Self {
            strategy,
            max_degree,
            candidates: 0,
            prefix: Vec::new(),
            buckets: vec![0; max_degree + 1],
        }
    }

    /// Largest leaf count any tree on `i` vertices can have in a graph of
    /// maximum degree Δ, or `None` if no such tree exists.
    pub fn structural_cap(&self, i: usize) -> Option<usize> {
        match i {
            0 | 1 => Some(0),
            2 => (self.max_degree >= 1).then_some(2),
            _ if self.max_degree < 2 => None,
            _ => {
                let internal = (i - 2).div_ceil(self.max_degree - 1);
                Some((i - 1).min(i - internal))
            }
        }
    }

    /// Collect the capacity profile of `state`. Must be called before
    /// [`bound`](Self::bound) whenever the state changed.
    pub fn prepare(&mut self, state: &InducedSubtreeState) {
        self.buckets.iter_mut().for_each(|count| *count = 0);
        self.candidates = 0;
        for v in 0..state.vertex_count() {
            if matches!(state.status(v), VertexStatus::Unseen | VertexStatus::Border) {
                self.candidates += 1;
                let capacity = state.open_degree(v).saturating_sub(1);
                self.buckets[capacity.min(self.max_degree)] += 1;
            }
        }

        self.prefix.clear();
        if self.strategy == BoundStrategy::DegreeProfile {
            let mut sum = 0;
            self.prefix.push(sum);
            for capacity in (0..self.buckets.len()).rev() {
                for _ in 0..self.buckets[capacity] {
                    sum += capacity;
                    self.prefix.push(sum);
                }
            }
        }
    }

    /// Upper bound on the leaves of an extension of `state` to `i` vertices,
    /// or `None` if no extension of that size exists.
    pub fn bound(&self, state: &InducedSubtreeState, i: usize) -> Option<usize> {
        let cap = self.structural_cap(i)?;
        let m = state.size();
        if i < m {
            return None;
        }
        if m == 0 {
            return Some(cap);
        }
        let added = i - m;
        if added > self.candidates {
            return None;
        }

        let leaves = state.raw_leaf_count();
        let border = state.border_size();
        let estimate = if added <= border {
            leaves + added
        } else {
            match self.strategy {
                BoundStrategy::Naive => leaves + added - 1,
                BoundStrategy::DegreeProfile => {
                    let need = added - border;
                    let internal = self.prefix.partition_point(|&sum| sum < need);
                    if internal == self.prefix.len() {
                        return None;
                    }
                    leaves + added - internal
                }
            }
        };
        Some(estimate.min(cap))
    }

    /// Whether some size in `state.size()..=limit` could still beat `best`.
    pub fn is_promising<F>(&mut self, state: &InducedSubtreeState, limit: usize, best: F) -> bool
    where
        F: Fn(usize) -> Option<usize>,
    {
        self.prepare(state);
        (state.size()..=limit).any(|i| match self.bound(state, i) {
            None => false,
            Some(bound) => best(i).map_or(true, |current| bound > current),
        })
    }
}
