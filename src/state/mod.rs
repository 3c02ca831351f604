// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable per-worker search state.
//!
//! Everything in here belongs to exactly one worker. The subtree state is
//! trail-tracked and shrinks only by rewinding; the statistics only grow.

pub mod statistics;
pub mod subtree;

pub use statistics::{Counters, Statistics};
pub use subtree::{InducedSubtreeState, VertexStatus};
