//! Property-based tests for u-tsp.
//!
//! Checks the exact searches against brute-force enumeration on many small
//! random instances.

use proptest::prelude::*;
use u_tsp::astar::{
    AStarConfig, AStarRunner, EngineState, Heuristic, HeuristicKind, PruningRule, SearchEngine,
};
use u_tsp::dfs::{DfsConfig, DfsRunner};
use u_tsp::exhaustive::ExhaustiveRunner;
use u_tsp::model::{CostMatrix, SearchStatus, Tour};

// ============================================================================
// Instance Generation Strategies
// ============================================================================

/// Random asymmetric instance with `cities` cities and integer costs.
fn random_matrix(cities: std::ops::Range<usize>) -> impl Strategy<Value = CostMatrix> {
    (cities, 1u32..100, any::<u64>())
        .prop_map(|(n, max_cost, seed)| CostMatrix::random(n, max_cost, seed).unwrap())
}

fn any_heuristic() -> impl Strategy<Value = HeuristicKind> {
    prop_oneof![
        Just(HeuristicKind::NearestUnvisited),
        Just(HeuristicKind::MinIncomingEdges),
        Just(HeuristicKind::Zero),
    ]
}

fn any_pruning() -> impl Strategy<Value = PruningRule> {
    prop_oneof![
        Just(PruningRule::Disabled),
        Just(PruningRule::PartialCost),
        Just(PruningRule::Estimate),
    ]
}

// ============================================================================
// Optimality
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_astar_matches_exhaustive(
        matrix in random_matrix(1..9),
        heuristic in any_heuristic(),
        pruning in any_pruning(),
    ) {
        let expected = ExhaustiveRunner::solve(&matrix, 0).unwrap().best.cost;
        let config = AStarConfig::default()
            .with_heuristic(heuristic)
            .with_pruning(pruning);
        let result = AStarRunner::run(&matrix, &config).unwrap();

        prop_assert_eq!(result.status, SearchStatus::Optimal);
        prop_assert_eq!(result.best_cost(), expected);
    }

    #[test]
    fn prop_dfs_matches_exhaustive(matrix in random_matrix(1..9), pruning in any::<bool>()) {
        let expected = ExhaustiveRunner::solve(&matrix, 0).unwrap().best.cost;
        let config = DfsConfig::default().with_pruning(pruning);
        let result = DfsRunner::run(&matrix, &config).unwrap();

        prop_assert_eq!(result.status, SearchStatus::Optimal);
        prop_assert_eq!(result.best_cost(), expected);
    }

    #[test]
    fn prop_any_origin_gives_same_cost(matrix in random_matrix(2..8), pick in any::<usize>()) {
        let origin = pick % matrix.len();
        let from_zero = AStarRunner::run(&matrix, &AStarConfig::default()).unwrap();
        let from_origin =
            AStarRunner::run(&matrix, &AStarConfig::default().with_origin(origin)).unwrap();

        // A cycle costs the same whichever city it is read from.
        prop_assert_eq!(from_origin.best_cost(), from_zero.best_cost());
        prop_assert_eq!(from_origin.best.unwrap().origin(), origin);
    }
}

// ============================================================================
// Result Validity
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_returned_tour_is_valid_cycle(
        matrix in random_matrix(1..9),
        heuristic in any_heuristic(),
    ) {
        let config = AStarConfig::default().with_heuristic(heuristic);
        let best = AStarRunner::run(&matrix, &config).unwrap().best.unwrap();

        // Re-evaluating checks the cycle shape and recomputes its cost.
        let checked = Tour::evaluate(&matrix, best.cities.clone()).unwrap();
        prop_assert_eq!(checked.cost, best.cost);
        prop_assert_eq!(best.cities.len(), matrix.len() + 1);
    }

    #[test]
    fn prop_cost_history_strictly_decreases(matrix in random_matrix(2..9)) {
        let result = AStarRunner::run(&matrix, &AStarConfig::default()).unwrap();

        prop_assert!(!result.cost_history.is_empty());
        for pair in result.cost_history.windows(2) {
            prop_assert!(pair[1] < pair[0]);
        }
        prop_assert_eq!(result.cost_history.last().copied(), Some(result.best_cost()));
        prop_assert_eq!(result.stats.improvements, result.cost_history.len());
    }
}

// ============================================================================
// Heuristic Admissibility
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every queued estimate stays at or below the cheapest completion of
    /// its path.
    #[test]
    fn prop_heuristics_are_admissible(
        matrix in random_matrix(2..7),
        heuristic in any_heuristic(),
        steps in 1usize..40,
    ) {
        let config = AStarConfig::default()
            .with_heuristic(heuristic)
            .with_pruning(PruningRule::Disabled);
        let mut engine = SearchEngine::new(&matrix, &config).unwrap();
        engine.initialize(0).unwrap();

        for _ in 0..steps {
            for state in engine.frontier().iter() {
                let completion = ExhaustiveRunner::complete(&matrix, &state.path().to_vec())
                    .unwrap()
                    .best
                    .cost;
                prop_assert!(
                    state.f() <= completion + 1e-9,
                    "f = {} exceeds cheapest completion {} for {:?}",
                    state.f(),
                    completion,
                    state.path().to_vec()
                );
            }
            if engine.step() == EngineState::Terminated {
                break;
            }
        }
    }

    #[test]
    fn prop_min_incoming_is_exact_when_only_return_remains(matrix in random_matrix(2..7)) {
        let heuristic = HeuristicKind::MinIncomingEdges;
        let n = matrix.len();
        let mut visited = u_tsp::astar::VisitedSet::new(n);
        for city in 0..n {
            visited.insert(city);
        }
        let last = n - 1;
        prop_assert_eq!(
            heuristic.estimate(&matrix, last, &visited, 0),
            matrix.distance(last, 0)
        );
    }
}

// ============================================================================
// Pruning and Repeatability
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_pruning_never_adds_work(matrix in random_matrix(3..8)) {
        let run = |pruning| {
            AStarRunner::run(&matrix, &AStarConfig::default().with_pruning(pruning)).unwrap()
        };
        let disabled = run(PruningRule::Disabled);
        let partial = run(PruningRule::PartialCost);

        prop_assert_eq!(disabled.best_cost(), partial.best_cost());
        prop_assert!(partial.stats.complete_tours <= disabled.stats.complete_tours);
        prop_assert_eq!(disabled.stats.pruned, 0);
    }

    #[test]
    fn prop_runs_are_repeatable(matrix in random_matrix(1..8), heuristic in any_heuristic()) {
        let config = AStarConfig::default().with_heuristic(heuristic);
        let first = AStarRunner::run(&matrix, &config).unwrap();
        let second = AStarRunner::run(&matrix, &config).unwrap();

        prop_assert_eq!(first.best, second.best);
        prop_assert_eq!(first.stats, second.stats);
        prop_assert_eq!(first.cost_history, second.cost_history);
    }

    #[test]
    fn prop_step_count_is_bounded(matrix in random_matrix(1..7)) {
        let config = AStarConfig::default().with_pruning(PruningRule::Disabled);
        let mut engine = SearchEngine::new(&matrix, &config).unwrap();
        engine.initialize(0).unwrap();

        // One pop per node of the permutation tree rooted at the origin.
        let n = matrix.len();
        let mut nodes = 1usize;
        let mut level = 1usize;
        for k in (1..n).rev() {
            level *= k;
            nodes += level;
        }

        let mut steps = 0usize;
        while engine.step() == EngineState::Running {
            steps += 1;
            prop_assert!(steps <= nodes);
        }
        prop_assert_eq!(engine.stats().expanded, nodes);
    }
}
