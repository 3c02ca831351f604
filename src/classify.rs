// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Grouping a family of trees by leaf function.

use std::collections::BTreeMap;

use log::debug;

use crate::engine::SearchControl;
use crate::error::{FlisError, Result};
use crate::graph::{GraphMemo, GraphView};
use crate::solver::TreeSolver;

/// Trees grouped by their leaf function, with the tree solver.
#[derive(Debug, Clone)]
pub struct LeafClassification<G> {
    classes: BTreeMap<Vec<Option<usize>>, Vec<G>>,
}

impl<G: GraphView> LeafClassification<G> {
    /// Solve every member of `family` and group equal leaf functions.
    ///
    /// Fails with `NotATree` on the first member that is not a tree, and with
    /// `ResourceExhausted` if `control` stops the run.
    pub fn new<I>(family: I, control: &SearchControl) -> Result<Self>
    where
        I: IntoIterator<Item = G>,
    {
        let mut classes: BTreeMap<Vec<Option<usize>>, Vec<G>> = BTreeMap::new();
        for tree in family {
            if let Some(termination) = control.check() {
                return Err(FlisError::ResourceExhausted { termination });
            }
            let memo = GraphMemo::new(&tree)?;
            let (table, termination) = TreeSolver::new(&memo)?.solve(control);
            if !termination.is_exhausted() {
                return Err(FlisError::ResourceExhausted { termination });
            }
            classes.entry(table.values()).or_default().push(tree);
        }
        debug!("{} leaf functions", classes.len());
        Ok(Self { classes })
    }

    /// Number of distinct leaf functions.
    pub fn number_of_classes(&self) -> usize {
        self.classes.len()
    }

    /// Mean number of trees per class; 0 for an empty family.
    pub fn average_class_size(&self) -> f64 {
        if self.classes.is_empty() {
            return 0.0;
        }
        let total: usize = self.classes.values().map(Vec::len).sum();
        total as f64 / self.classes.len() as f64
    }

    /// The trees whose leaf function is `values`.
    pub fn class_of(&self, values: &[Option<usize>]) -> Option<&[G]> {
        self.classes.get(values).map(Vec::as_slice)
    }

    /// Every class, ordered by leaf function.
    pub fn classes(&self) -> impl Iterator<Item = (&[Option<usize>], &[G])> + '_ {
        self.classes
            .iter()
            .map(|(values, trees)| (values.as_slice(), trees.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CancellationToken, Termination};
    use crate::error::InvalidInputKind;
    use crate::graph::AdjacencyList;

    fn tree(edges: &[(usize, usize)]) -> AdjacencyList {
        AdjacencyList::from_edges(edges.len() + 1, edges).unwrap()
    }

    #[test]
    fn test_trees_on_five_vertices() {
        let family = vec![
            tree(&[(0, 1), (1, 2), (2, 3), (3, 4)]),
            tree(&[(0, 1), (1, 2), (2, 3), (2, 4)]),
            tree(&[(0, 1), (0, 2), (0, 3), (0, 4)]),
            // The path again, numbered differently
            tree(&[(4, 2), (2, 0), (0, 3), (3, 1)]),
        ];
        let classification = LeafClassification::new(family, &SearchControl::unlimited()).unwrap();
        assert_eq!(classification.number_of_classes(), 3);
        assert!((classification.average_class_size() - 4.0 / 3.0).abs() < 1e-9);

        let paths = classification
            .class_of(&[Some(0), Some(0), Some(2), Some(2), Some(2), Some(2)])
            .unwrap();
        assert_eq!(paths.len(), 2);
        let star = classification
            .class_of(&[Some(0), Some(0), Some(2), Some(2), Some(3), Some(4)])
            .unwrap();
        assert_eq!(star.len(), 1);
        assert!(classification
            .class_of(&[Some(0), Some(0), Some(2), Some(2), Some(3), Some(3)])
            .is_some());
    }

    #[test]
    fn test_empty_family() {
        let classification =
            LeafClassification::<AdjacencyList>::new(Vec::new(), &SearchControl::unlimited()).unwrap();
        assert_eq!(classification.number_of_classes(), 0);
        assert_eq!(classification.average_class_size(), 0.0);
        assert_eq!(classification.classes().count(), 0);
    }

    #[test]
    fn test_rejects_non_tree() {
        let triangle = AdjacencyList::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        let err = LeafClassification::new(vec![triangle], &SearchControl::unlimited()).unwrap_err();
        assert!(matches!(err, FlisError::InvalidInput(InvalidInputKind::NotATree { .. })));
    }

    #[test]
    fn test_cancelled_classification() {
        let token = CancellationToken::new();
        token.cancel();
        let control = SearchControl::new(token, None, None);
        let err = LeafClassification::new(vec![tree(&[(0, 1)])], &control).unwrap_err();
        assert!(matches!(
            err,
            FlisError::ResourceExhausted {
                termination: Termination::Cancelled
            }
        ));
    }
}
