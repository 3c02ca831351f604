// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tree dynamic programming against the general solver.

mod common;

use common::*;
use flis_search::classify::LeafClassification;
use flis_search::engine::SearchControl;
use flis_search::error::{FlisError, InvalidInputKind};
use flis_search::graph::{AdjacencyList, GraphMemo};
use flis_search::solver::{Algorithm, FlisSolver, SolverConfig};
use flis_search::validate;
use test_log::test;

fn solve(graph: &AdjacencyList, algorithm: Algorithm) -> Vec<Option<usize>> {
    let config = SolverConfig::default().with_algorithm(algorithm).with_threads(1);
    let solution = FlisSolver::new(graph, config).unwrap().solve().unwrap();
    let memo = GraphMemo::new(graph).unwrap();
    assert_eq!(validate::verify_witnesses(&memo, &solution.table), Ok(()));
    solution.into_proven().unwrap().values()
}

#[test]
fn test_balanced_binary_tree() {
    assert_eq!(
        solve(&balanced_tree(2, 2), Algorithm::Tree),
        values("[0, 0, 2, 2, 3, 3, 3, 4]")
    );
}

#[test]
fn test_balanced_ternary_tree() {
    let tree = balanced_tree(3, 2);
    assert_eq!(solve(&tree, Algorithm::Tree), solve(&tree, Algorithm::General));
}

#[test]
fn test_path_and_star() {
    assert_eq!(solve(&path(8), Algorithm::Tree), values("[0, 0, 2, 2, 2, 2, 2, 2, 2]"));
    assert_eq!(
        solve(&balanced_tree(6, 1), Algorithm::Tree),
        values("[0, 0, 2, 2, 3, 4, 5, 6]")
    );
}

#[test]
fn test_seeded_random_trees() {
    for seed in 0..20 {
        let tree = random_tree(20, seed);
        assert_eq!(
            solve(&tree, Algorithm::Tree),
            solve(&tree, Algorithm::General),
            "seed {}",
            seed
        );
    }
}

#[test]
fn test_classify_random_trees() {
    let family: Vec<AdjacencyList> = (0..30).map(|seed| random_tree(8, seed)).collect();
    let classification = LeafClassification::new(family.clone(), &SearchControl::unlimited()).unwrap();

    let mut total = 0;
    for (values, trees) in classification.classes() {
        total += trees.len();
        for tree in trees {
            assert_eq!(solve(tree, Algorithm::General), values);
        }
    }
    assert_eq!(total, family.len());
    assert!(classification.number_of_classes() > 1);
    assert!(classification.average_class_size() >= 1.0);
}

#[test]
fn test_rejects_non_trees() {
    let config = SolverConfig::default().with_algorithm(Algorithm::Tree);
    for graph in [cycle(5), AdjacencyList::empty(0), AdjacencyList::empty(2)] {
        assert!(matches!(
            FlisSolver::new(&graph, config.clone()),
            Err(FlisError::InvalidInput(InvalidInputKind::NotATree { .. }))
        ));
    }
}

mod properties {
    use super::common::from_edges;
    use super::solve;
    use flis_search::solver::Algorithm;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_tree_matches_general(parents in (1usize..20).prop_flat_map(|n| {
            (0..n).map(|i| 0..=i).collect::<Vec<_>>()
        })) {
            // Vertex i + 1 hangs under parents[i]
            let edges: Vec<_> = parents.iter().enumerate().map(|(i, &p)| (p, i + 1)).collect();
            let tree = from_edges(parents.len() + 1, &edges);
            prop_assert_eq!(solve(&tree, Algorithm::Tree), solve(&tree, Algorithm::General));
        }
    }
}
