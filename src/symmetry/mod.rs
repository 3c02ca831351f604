// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Canonical forms of vertex sets under hypercube automorphisms.
//!
//! Every automorphism of Q_d permutes the d coordinates and then flips some
//! of them. A vertex set is represented by the `u64` mask of its labels; its
//! canonical form is the smallest mask in its orbit under the chosen group.
//! Two sets with the same canonical form are isomorphic, so a search only
//! needs to explore one of them.
//!
//! ## Module Structure
//!
//! - `hypercube`: recognition of Q_d and the coordinate labeling
//! - `mod`: symmetry groups and canonicalization

pub mod hypercube;

pub use hypercube::{HypercubeLabeling, MAX_CUBE_DIMENSION};

use strum_macros::{Display, EnumString};

/// Which automorphisms of Q_d are used for canonicalization.
///
/// Any subgroup gives a sound canonicalization; larger groups prune more but
/// cost more per canonical form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SymmetryGroup {
    /// Coordinate permutations and flips: d!·2^d elements.
    #[default]
    Full,
    /// Coordinate permutations only: d! elements.
    Permutations,
    /// Coordinate flips only: 2^d elements.
    Flips,
    /// The identity only; every set is its own canonical form.
    Trivial,
}

/// Precomputed group action on labels.
#[derive(Debug, Clone)]
pub struct SymmetryReducer {
    /// For each coordinate permutation, the image of every label.
    permutations: Vec<Vec<u8>>,
    /// Flip masks to XOR into permuted labels.
    flips: Vec<u8>,
}

impl SymmetryReducer {
    pub fn new(dimension: usize, group: SymmetryGroup) -> Self {
        assert!(
            dimension <= MAX_CUBE_DIMENSION,
            "Dimension {} exceeds {}",
            dimension,
            MAX_CUBE_DIMENSION
        );
        let all_flips = || (0..1u8 << dimension).collect::<Vec<_>>();
        let orders = match group {
            SymmetryGroup::Full | SymmetryGroup::Permutations => coordinate_permutations(dimension),
            SymmetryGroup::Flips | SymmetryGroup::Trivial => vec![(0..dimension).collect()],
        };
        let flips = match group {
            SymmetryGroup::Full | SymmetryGroup::Flips => all_flips(),
            SymmetryGroup::Permutations | SymmetryGroup::Trivial => vec![0],
        };

        let permutations = orders
            .iter()
            .map(|order| {
                (0..1usize << dimension)
                    .map(|label| {
                        order
                            .iter()
                            .enumerate()
                            .filter(|&(from, _)| label & (1 << from) != 0)
                            .fold(0u8, |image, (_, &to)| image | (1 << to))
                    })
                    .collect()
            })
            .collect();

        Self { permutations, flips }
    }

    /// Number of group elements.
    pub fn order(&self) -> usize {
        self.permutations.len() * self.flips.len()
    }

    /// Image of a label mask under one permutation and one flip.
    #[inline]
    fn image(&self, permutation: &[u8], flip: u8, mask: u64) -> u64 {
        let mut remaining = mask;
        let mut image = 0u64;
        while remaining != 0 {
            let label = remaining.trailing_zeros() as usize;
            remaining &= remaining - 1;
            image |= 1u64 << (permutation[label] ^ flip);
        }
        image
    }

    /// The smallest mask in the orbit of `mask`.
    pub fn canonical(&self, mask: u64) -> u64 {
        let mut best = mask;
        for permutation in &self.permutations {
            for &flip in &self.flips {
                best = best.min(self.image(permutation, flip, mask));
            }
        }
        best
    }
}

/// All orderings of `0..d`, in lexicographic order.
fn coordinate_permutations(d: usize) -> Vec<Vec<usize>> {
    let mut current: Vec<usize> = (0..d).collect();
    let mut result = vec![current.clone()];
    // Standard next-permutation step
    loop {
        let Some(i) = (1..current.len()).rev().find(|&i| current[i - 1] < current[i]) else {
            return result;
        };
        let pivot = i - 1;
        let Some(j) = (i..current.len()).rev().find(|&j| current[j] > current[pivot]) else {
            return result;
        };
        current.swap(pivot, j);
        current[i..].reverse();
        result.push(current.clone());
    }
}
