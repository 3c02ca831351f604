// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! General branch-and-bound solver against known leaf functions and brute
//! force.

mod common;

use common::*;
use flis_search::bound::BoundStrategy;
use flis_search::graph::{AdjacencyList, GraphMemo};
use flis_search::solver::{FlisSolver, SolverConfig};
use flis_search::table::LeafFunctionTable;
use flis_search::validate;
use test_log::test;

fn solve_with(graph: &AdjacencyList, config: SolverConfig) -> LeafFunctionTable {
    let solution = FlisSolver::new(graph, config).unwrap().solve().unwrap();
    assert!(solution.is_proven());
    let memo = GraphMemo::new(graph).unwrap();
    assert_eq!(validate::verify_witnesses(&memo, &solution.table), Ok(()));
    solution.table
}

fn solve(graph: &AdjacencyList) -> Vec<Option<usize>> {
    solve_with(graph, SolverConfig::default()).values()
}

#[test]
fn test_complete_graph() {
    assert_eq!(solve(&complete(7)), values("[0, 0, 2, ∅, ∅, ∅, ∅, ∅]"));
}

#[test]
fn test_cycle() {
    assert_eq!(solve(&cycle(10)), values("[0, 0, 2, 2, 2, 2, 2, 2, 2, 2, ∅]"));
}

#[test]
fn test_wheel() {
    assert_eq!(solve(&wheel(11)), values("[0, 0, 2, 2, 3, 4, 5, 2, 2, 2, ∅, ∅]"));
}

#[test]
fn test_complete_bipartite() {
    assert_eq!(
        solve(&complete_bipartite(7, 5)),
        values("[0, 0, 2, 2, 3, 4, 5, 6, 7, ∅, ∅, ∅, ∅]")
    );
}

#[test]
fn test_petersen() {
    assert_eq!(solve(&petersen()), values("[0, 0, 2, 2, 3, 3, 4, 3, ∅, ∅, ∅]"));
}

#[test]
fn test_hypercubes() {
    assert_eq!(solve(&hypercube(3)), values("[0, 0, 2, 2, 3, 2, ∅, ∅, ∅]"));
    assert_eq!(
        solve(&hypercube(4)),
        values("[0, 0, 2, 2, 3, 4, 3, 4, 3, 4, ∅, ∅, ∅, ∅, ∅, ∅, ∅]")
    );
}

#[test]
fn test_balanced_tree() {
    assert_eq!(solve(&balanced_tree(2, 2)), values("[0, 0, 2, 2, 3, 3, 3, 4]"));
}

#[test]
fn test_trivial_graphs() {
    assert_eq!(solve(&AdjacencyList::empty(0)), vec![Some(0)]);
    assert_eq!(solve(&AdjacencyList::empty(1)), vec![Some(0), Some(0)]);
    assert_eq!(solve(&AdjacencyList::empty(3)), vec![Some(0), Some(0), None, None]);
    assert_eq!(solve(&path(2)), vec![Some(0), Some(0), Some(2)]);
}

#[test]
fn test_families_match_brute_force() {
    let graphs = [
        complete(5),
        cycle(7),
        path(6),
        wheel(8),
        complete_bipartite(3, 4),
        balanced_tree(3, 1),
        hypercube(3),
        from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4)]),
    ];
    for graph in &graphs {
        assert_eq!(solve(graph), brute_force(graph));
    }
}

#[test]
fn test_strategies_agree() {
    for graph in [petersen(), wheel(9), hypercube(3)] {
        let naive = solve_with(&graph, SolverConfig::default().with_bound(BoundStrategy::Naive));
        let profile = solve_with(&graph, SolverConfig::default().with_bound(BoundStrategy::DegreeProfile));
        assert_eq!(naive.values(), profile.values());
    }
}

#[test]
fn test_degree_profile_prunes_more() {
    let graph = petersen();
    let run = |bound| {
        FlisSolver::new(&graph, SolverConfig::default().with_bound(bound).with_threads(1))
            .unwrap()
            .solve()
            .unwrap()
            .statistics
            .get(flis_search::state::Counters::Nodes)
    };
    assert!(run(BoundStrategy::DegreeProfile) <= run(BoundStrategy::Naive));
}

#[test]
fn test_sequential_and_parallel_agree() {
    let graph = complete_bipartite(4, 4);
    let sequential = solve_with(&graph, SolverConfig::default().with_threads(1));
    let parallel = solve_with(&graph, SolverConfig::default().with_threads(4));
    assert_eq!(sequential.values(), parallel.values());
}
