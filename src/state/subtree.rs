// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Incrementally maintained induced subtree.
//!
//! The state holds a vertex set T that is always an induced tree of the
//! graph. It only grows through vertices adjacent to exactly one vertex of T
//! (the *border*), so no cycle or connectivity check is ever needed. A vertex
//! adjacent to two vertices of T can never join it again and becomes
//! *excluded*; vertices can also be excluded by a branching decision.
//!
//! All mutable quantities live in one `u64` slot array so that every write can
//! be recorded on the [`Trail`] and undone by rewinding it.

use crate::graph::{GraphMemo, Vertex};
use crate::trail::{Trail, TrailRestore};

/// The relation of one vertex to the current subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexStatus {
    /// Not adjacent to the subtree, not excluded.
    Unseen,
    /// Adjacent to exactly one subtree vertex; adding it keeps a tree.
    Border,
    /// In the subtree, with `degree` neighbors in the subtree.
    Included { degree: usize },
    /// Can no longer join the subtree. `by` is the vertex whose inclusion
    /// closed a cycle through it, or the vertex itself when it was excluded
    /// by a branching decision.
    Excluded { by: Vertex },
}

const TAG_BITS: u32 = 2;
const TAG_MASK: u64 = (1 << TAG_BITS) - 1;

impl VertexStatus {
    fn encode(self) -> u64 {
        match self {
            VertexStatus::Unseen => 0,
            VertexStatus::Border => 1,
            VertexStatus::Included { degree } => 2 | ((degree as u64) << TAG_BITS),
            VertexStatus::Excluded { by } => 3 | ((by as u64) << TAG_BITS),
        }
    }

    fn decode(raw: u64) -> Self {
        let info = (raw >> TAG_BITS) as usize;
        match raw & TAG_MASK {
            0 => VertexStatus::Unseen,
            1 => VertexStatus::Border,
            2 => VertexStatus::Included { degree: info },
            _ => VertexStatus::Excluded { by: info },
        }
    }

    /// Whether the vertex is in the subtree.
    pub fn is_included(self) -> bool {
        matches!(self, VertexStatus::Included { .. })
    }

    /// Whether the vertex is excluded.
    pub fn is_excluded(self) -> bool {
        matches!(self, VertexStatus::Excluded { .. })
    }
}

/// An induced subtree under construction, plus its surroundings.
///
/// Slot layout: `n` statuses, then `n` open degrees, then four counters.
#[derive(Debug, Clone)]
pub struct InducedSubtreeState {
    n: usize,
    cells: Vec<u64>,
    /// Subtree vertices in insertion order; entries past `size()` are stale.
    members: Vec<Vertex>,
}

impl InducedSubtreeState {
    /// Create the empty subtree for `memo`'s graph.
    pub fn new(memo: &GraphMemo) -> Self {
        let n = memo.vertex_count();
        let mut cells = vec![0u64; 2 * n + 4];
        for v in 0..n {
            cells[n + v] = memo.degree(v) as u64;
        }
        Self {
            n,
            cells,
            members: vec![0; n],
        }
    }

    #[inline]
    fn size_slot(&self) -> usize {
        2 * self.n
    }

    #[inline]
    fn leaves_slot(&self) -> usize {
        2 * self.n + 1
    }

    #[inline]
    fn border_slot(&self) -> usize {
        2 * self.n + 2
    }

    #[inline]
    fn excluded_slot(&self) -> usize {
        2 * self.n + 3
    }

    #[inline]
    fn set(&mut self, trail: &mut Trail, slot: usize, value: u64) {
        trail.record_change(slot, self.cells[slot]);
        self.cells[slot] = value;
    }

    #[inline]
    fn add(&mut self, trail: &mut Trail, slot: usize, delta: i64) {
        let value = (self.cells[slot] as i64 + delta) as u64;
        self.set(trail, slot, value);
    }

    #[inline]
    fn set_status(&mut self, trail: &mut Trail, v: Vertex, status: VertexStatus) {
        self.set(trail, v, status.encode());
    }

    /// Number of vertices of the underlying graph.
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Current status of `v`.
    #[inline]
    pub fn status(&self, v: Vertex) -> VertexStatus {
        VertexStatus::decode(self.cells[v])
    }

    /// Number of vertices in the subtree.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells[self.size_slot()] as usize
    }

    /// Whether the subtree is empty.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of subtree vertices with at most one subtree neighbor.
    ///
    /// This counts a lone vertex as a leaf, which keeps every update local;
    /// see [`leaf_count`](Self::leaf_count) for the conventional count.
    #[inline]
    pub fn raw_leaf_count(&self) -> usize {
        self.cells[self.leaves_slot()] as usize
    }

    /// Number of leaves of the subtree. Trees with fewer than two vertices
    /// have no leaves.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        if self.size() < 2 {
            0
        } else {
            self.raw_leaf_count()
        }
    }

    /// Number of border vertices.
    #[inline]
    pub fn border_size(&self) -> usize {
        self.cells[self.border_slot()] as usize
    }

    /// Number of excluded vertices.
    #[inline]
    pub fn excluded_count(&self) -> usize {
        self.cells[self.excluded_slot()] as usize
    }

    /// Number of neighbors of `v` that are not excluded.
    #[inline]
    pub fn open_degree(&self, v: Vertex) -> usize {
        self.cells[self.n + v] as usize
    }

    /// Subtree vertices in the order they were added.
    pub fn vertices(&self) -> &[Vertex] {
        &self.members[..self.size()]
    }

    /// Subtree vertices in increasing order.
    pub fn witness(&self) -> Vec<Vertex> {
        let mut vertices = self.vertices().to_vec();
        vertices.sort_unstable();
        vertices
    }

    /// Whether `v` can be added while keeping an induced tree.
    pub fn can_include(&self, v: Vertex) -> bool {
        match self.status(v) {
            VertexStatus::Border => true,
            VertexStatus::Unseen => self.is_empty(),
            _ => false,
        }
    }

    /// The vertex the branch-and-bound branches on next: the first border
    /// vertex, or the first unseen vertex while the subtree is empty.
    pub fn next_candidate(&self) -> Option<Vertex> {
        (0..self.n).find(|&v| self.can_include(v))
    }

    /// Collect every vertex that can extend the subtree into `out`.
    pub fn collect_frontier(&self, out: &mut Vec<Vertex>) {
        out.clear();
        out.extend((0..self.n).filter(|&v| self.can_include(v)));
    }

    /// Add `v` to the subtree.
    ///
    /// Returns the subtree degree of the vertex `v` attaches to, after the
    /// attachment (0 when `v` is the first vertex).
    ///
    /// # Panics
    ///
    /// Panics if `v` is neither a border vertex nor the first vertex of an
    /// empty subtree.
    pub fn include(&mut self, memo: &GraphMemo, trail: &mut Trail, v: Vertex) -> usize {
        assert!(
            self.can_include(v),
            "Vertex {} cannot extend the subtree (status {:?})",
            v,
            self.status(v)
        );
        let was_border = self.status(v) == VertexStatus::Border;
        let mut attach_degree = 0;

        for &u in memo.neighbors(v) {
            match self.status(u) {
                VertexStatus::Unseen => {
                    self.set_status(trail, u, VertexStatus::Border);
                    self.add(trail, self.border_slot(), 1);
                }
                VertexStatus::Included { degree } => {
                    attach_degree = degree + 1;
                    self.set_status(trail, u, VertexStatus::Included { degree: attach_degree });
                    if degree == 1 {
                        self.add(trail, self.leaves_slot(), -1);
                    }
                }
                VertexStatus::Border => {
                    // Second subtree neighbor: adding u would close a cycle
                    self.set_status(trail, u, VertexStatus::Excluded { by: v });
                    self.add(trail, self.border_slot(), -1);
                    self.mark_excluded(memo, trail, u);
                }
                VertexStatus::Excluded { .. } => {}
            }
        }

        let degree = if was_border {
            self.add(trail, self.border_slot(), -1);
            1
        } else {
            0
        };
        self.set_status(trail, v, VertexStatus::Included { degree });

        let size = self.size();
        self.members[size] = v;
        self.set(trail, self.size_slot(), size as u64 + 1);
        self.add(trail, self.leaves_slot(), 1);
        attach_degree
    }

    /// Forbid `v` from joining the subtree.
    ///
    /// # Panics
    ///
    /// Panics unless `v` could currently be included.
    pub fn exclude(&mut self, memo: &GraphMemo, trail: &mut Trail, v: Vertex) {
        assert!(
            self.can_include(v),
            "Vertex {} cannot be excluded (status {:?})",
            v,
            self.status(v)
        );
        if self.status(v) == VertexStatus::Border {
            self.add(trail, self.border_slot(), -1);
        }
        self.set_status(trail, v, VertexStatus::Excluded { by: v });
        self.mark_excluded(memo, trail, v);
    }

    fn mark_excluded(&mut self, memo: &GraphMemo, trail: &mut Trail, v: Vertex) {
        self.add(trail, self.excluded_slot(), 1);
        for &w in memo.neighbors(v) {
            self.add(trail, self.n + w, -1);
        }
    }

    /// Recompute every derived quantity from scratch and compare.
    ///
    /// Returns a description of the first mismatch. Intended for tests.
    pub fn check_consistency(&self, memo: &GraphMemo) -> Result<(), String> {
        let members = self.vertices();
        let in_tree = |v: Vertex| members.contains(&v);

        if !crate::validate::is_induced_tree(memo, members) && !members.is_empty() {
            return Err(format!("{:?} is not an induced tree", members));
        }

        let mut border = 0;
        let mut excluded = 0;
        let mut raw_leaves = 0;
        for v in 0..self.n {
            let inside = memo.neighbors(v).iter().filter(|&&w| in_tree(w)).count();
            match self.status(v) {
                VertexStatus::Included { degree } => {
                    if !in_tree(v) || degree != inside {
                        return Err(format!("vertex {} has stale subtree degree {}", v, degree));
                    }
                    if degree <= 1 {
                        raw_leaves += 1;
                    }
                }
                VertexStatus::Border => {
                    if inside != 1 {
                        return Err(format!("border vertex {} has {} subtree neighbors", v, inside));
                    }
                    border += 1;
                }
                VertexStatus::Unseen => {
                    if inside != 0 {
                        return Err(format!("unseen vertex {} touches the subtree", v));
                    }
                }
                VertexStatus::Excluded { by } => {
                    if by != v && inside < 2 {
                        return Err(format!("vertex {} excluded without a cycle", v));
                    }
                    excluded += 1;
                }
            }
            let open = memo
                .neighbors(v)
                .iter()
                .filter(|&&w| !self.status(w).is_excluded())
                .count();
            if open != self.open_degree(v) {
                return Err(format!("vertex {} has stale open degree", v));
            }
        }

        if border != self.border_size() {
            return Err(format!("border size {} != {}", self.border_size(), border));
        }
        if excluded != self.excluded_count() {
            return Err(format!("excluded count {} != {}", self.excluded_count(), excluded));
        }
        if raw_leaves != self.raw_leaf_count() {
            return Err(format!("leaf count {} != {}", self.raw_leaf_count(), raw_leaves));
        }
        Ok(())
    }
}

impl TrailRestore for InducedSubtreeState {
    #[inline]
    fn restore(&mut self, slot: usize, old_value: u64) {
        self.cells[slot] = old_value;
    }
}
