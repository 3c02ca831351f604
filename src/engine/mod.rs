// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Backtracking search engine.
//!
//! The engine runs a sequence of predicates with an explicit stack instead of
//! recursion, so search depth is bounded only by memory. Each stack entry
//! tracks:
//! - Which predicate is executing
//! - Current round number (the depth, for predicates that descend into themselves)
//! - Choice mode state (whether we're trying alternatives)
//! - The trail checkpoint to rewind to before running the entry
//!
//! Execution model:
//! 1. Call `try_pred(round)` on the predicate at the top of the stack
//! 2. If `Success`: push the next predicate at round 0
//! 3. If `SuccessSamePredicate`: push the same predicate at the next round
//! 4. If `Choices(n)`: enter choice mode, call `retry_pred(round, 0..n)`
//! 5. If `Failure`: pop, returning to the previous choice point
//!
//! The search is exhausted when the stack empties. Before every `try_pred`
//! the engine consults the [`SearchControl`]; a stop rewinds the whole trail
//! and returns the reason.

pub mod control;
pub mod predicate;

pub use control::{CancellationToken, SearchControl, Termination};
pub use predicate::{Predicate, PredicateResult};

use crate::context::SearchContext;
use crate::state::Counters;

/// Initial capacity of the predicate stack.
const INITIAL_STACK_SIZE: usize = 256;

/// Stack entry tracking the state of one predicate execution.
#[derive(Debug)]
struct StackEntry {
    /// Index of the predicate in the predicates list.
    predicate_index: usize,

    /// Current round number (incremented by SuccessSamePredicate).
    round: usize,

    /// Whether we're in choice mode (exploring alternatives).
    in_choice_mode: bool,

    /// Next choice to try (when in_choice_mode is true).
    current_choice: usize,

    /// Total number of choices (when in_choice_mode is true).
    num_choices: usize,

    /// Trail checkpoint for this stack entry.
    trail_checkpoint: usize,
}

impl StackEntry {
    fn call(predicate_index: usize, round: usize, trail_checkpoint: usize) -> Self {
        Self {
            predicate_index,
            round,
            in_choice_mode: false,
            current_choice: 0,
            num_choices: 0,
            trail_checkpoint,
        }
    }
}

/// Search engine that coordinates predicate execution and backtracking.
pub struct SearchEngine<'p> {
    /// Predicates to execute in sequence.
    predicates: Vec<Box<dyn Predicate + 'p>>,

    /// Stack of predicate execution states.
    stack: Vec<StackEntry>,

    /// Statistics: number of try_pred calls.
    try_count: u64,

    /// Statistics: number of retry_pred calls.
    retry_count: u64,
}

impl<'p> SearchEngine<'p> {
    /// Create a new search engine with the given predicates.
    ///
    /// The program must never run past its last predicate: the last one
    /// either fails or descends into itself.
    pub fn new(predicates: Vec<Box<dyn Predicate + 'p>>) -> Self {
        Self {
            predicates,
            stack: Vec::with_capacity(INITIAL_STACK_SIZE),
            try_count: 0,
            retry_count: 0,
        }
    }

    /// Run the program to exhaustion or until the control says stop.
    ///
    /// On return the context's trail and state are back where they were when
    /// the search started.
    ///
    /// # Panics
    ///
    /// Panics if a predicate returns `Success` from the last position, or
    /// `Choices` from `retry_pred`.
    pub fn search(&mut self, ctx: &mut SearchContext<'_>) -> Termination {
        self.stack.clear();
        self.try_count = 0;
        self.retry_count = 0;

        if self.predicates.is_empty() {
            return Termination::Exhausted;
        }

        let base = ctx.trail.len();
        self.stack.push(StackEntry::call(0, 0, base));

        while let Some(entry) = self.stack.last_mut() {
            // Rewind trail to this entry's checkpoint
            ctx.rewind_to(entry.trail_checkpoint);
            let predicate_index = entry.predicate_index;
            let round = entry.round;
            let choice_mode = entry.in_choice_mode;

            let result = if !choice_mode {
                if let Some(stop) = ctx.control.tick() {
                    self.stack.clear();
                    ctx.rewind_to(base);
                    return stop;
                }
                ctx.statistics.increment_counter(Counters::Nodes);
                self.try_count += 1;
                let result = self.predicates[predicate_index].try_pred(ctx, round);
                match result {
                    PredicateResult::Choices(n) => {
                        entry.in_choice_mode = true;
                        entry.current_choice = 0;
                        entry.num_choices = n;
                        entry.trail_checkpoint = ctx.trail.len();
                        continue;
                    }
                    // A success is a single choice: pop when its child backtracks
                    PredicateResult::Success | PredicateResult::SuccessSamePredicate => {
                        entry.in_choice_mode = true;
                        entry.current_choice = 0;
                        entry.num_choices = 0;
                    }
                    PredicateResult::Failure => {}
                }
                result
            } else {
                if entry.current_choice >= entry.num_choices {
                    self.stack.pop();
                    continue;
                }
                let choice = entry.current_choice;
                entry.current_choice += 1;
                self.retry_count += 1;
                let result = self.predicates[predicate_index].retry_pred(ctx, round, choice);
                if let PredicateResult::Choices(_) = result {
                    panic!(
                        "{}::retry_pred returned invalid result: {:?}",
                        self.predicates[predicate_index].name(),
                        result
                    );
                }
                result
            };

            match result {
                PredicateResult::Success => {
                    let next_index = predicate_index + 1;
                    assert!(
                        next_index < self.predicates.len(),
                        "Invalid predicate sequence: {} succeeded as the last predicate",
                        self.predicates[predicate_index].name()
                    );
                    self.stack.push(StackEntry::call(next_index, 0, ctx.trail.len()));
                }
                PredicateResult::SuccessSamePredicate => {
                    self.stack
                        .push(StackEntry::call(predicate_index, round + 1, ctx.trail.len()));
                }
                PredicateResult::Failure => {
                    // In choice mode the loop moves on to the next choice
                    if !choice_mode {
                        self.stack.pop();
                    }
                }
                PredicateResult::Choices(_) => unreachable!(),
            }
        }

        ctx.rewind_to(base);
        Termination::Exhausted
    }

    /// Returns (try_count, retry_count) for the last search.
    pub fn statistics(&self) -> (u64, u64) {
        (self.try_count, self.retry_count)
    }
}
