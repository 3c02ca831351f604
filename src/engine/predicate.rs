// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Predicate trait for the backtracking search.
//!
//! A search program is a sequence of predicates. Each one either advances to
//! the next predicate, descends into itself with the next round, fails, or
//! opens a choice point that the engine explores with `retry_pred`.
//!
//! # Example
//!
//! ```
//! use flis_search::context::SearchContext;
//! use flis_search::engine::{Predicate, PredicateResult};
//!
//! /// Grows a path along the lowest-numbered border vertex, one round per vertex.
//! #[derive(Debug)]
//! struct GreedyPath;
//!
//! impl Predicate for GreedyPath {
//!     fn try_pred(&mut self, ctx: &mut SearchContext<'_>, _round: usize) -> PredicateResult {
//!         ctx.record();
//!         match ctx.state.next_candidate() {
//!             Some(_) => PredicateResult::Choices(1),
//!             None => PredicateResult::Failure,
//!         }
//!     }
//!
//!     fn retry_pred(&mut self, ctx: &mut SearchContext<'_>, _round: usize, _choice: usize) -> PredicateResult {
//!         match ctx.state.next_candidate() {
//!             Some(v) => {
//!                 ctx.include(v);
//!                 PredicateResult::SuccessSamePredicate
//!             }
//!             None => PredicateResult::Failure,
//!         }
//!     }
//!
//!     fn name(&self) -> &str {
//!         "GreedyPath"
//!     }
//! }
//! ```

use std::fmt::Debug;

use crate::context::SearchContext;

/// Result of attempting a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateResult {
    /// Predicate succeeded. Move to next predicate in sequence.
    Success,

    /// Predicate succeeded; run the same predicate again with the next round.
    /// Recursive branching is expressed this way, one round per depth.
    SuccessSamePredicate,

    /// Predicate has no (more) valid choices. Backtrack.
    Failure,

    /// Predicate has `n` choices; the engine calls `retry_pred` for each of
    /// `0..n`, rewinding the trail before every one.
    Choices(usize),
}

/// A step of a search program.
///
/// The engine takes a trail checkpoint before every call, so anything a
/// predicate changes through the context is undone on backtrack. State a
/// predicate keeps in itself (per-round scratch, memo tables) is not trailed
/// and must be indexed by round if it has to survive backtracking.
pub trait Predicate: Debug {
    /// Try this predicate for round `round`.
    ///
    /// The round starts at 0 and increments each time the predicate returns
    /// `SuccessSamePredicate`.
    fn try_pred(&mut self, ctx: &mut SearchContext<'_>, round: usize) -> PredicateResult;

    /// Retry this predicate with `choice`, after `try_pred` returned
    /// `Choices(n)` with `choice < n`.
    ///
    /// Must not return `Choices`.
    #[allow(unused)]
    fn retry_pred(&mut self, ctx: &mut SearchContext<'_>, round: usize, choice: usize) -> PredicateResult {
        panic!("{}::retry_pred should never be called", self.name());
    }

    /// Name for logging and panics. Defaults to the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<P: Predicate + ?Sized> Predicate for &mut P {
    fn try_pred(&mut self, ctx: &mut SearchContext<'_>, round: usize) -> PredicateResult {
        (**self).try_pred(ctx, round)
    }

    fn retry_pred(&mut self, ctx: &mut SearchContext<'_>, round: usize, choice: usize) -> PredicateResult {
        (**self).retry_pred(ctx, round, choice)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
