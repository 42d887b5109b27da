use state_search::domains::{DeliveryPuzzle, JugConfig, JugPuzzle};
use state_search::heuristics::{lookup, HeuristicCatalog};
use state_search::{evaluate_heuristic, exact_distances, state_graph, GoalTest, StateSpace};

#[test]
fn delivery_goal_heuristics_are_admissible_and_consistent() {
    let puzzle = DeliveryPuzzle::default();
    let goal = GoalTest::from_model(&puzzle);
    for key in ["zero", "remaining", "distance"] {
        let heuristic = lookup::<DeliveryPuzzle>(key).unwrap();
        let report = evaluate_heuristic(&puzzle, &goal, key, heuristic.bind(&puzzle));
        assert!(report.admissible, "{} overestimates", key);
        assert!(report.consistent, "{} is inconsistent", key);
        assert_eq!(report.states_checked, puzzle.all_states().len());
    }
}

#[test]
fn start_distance_is_not_a_goal_heuristic() {
    let puzzle = DeliveryPuzzle::default();
    let heuristic = lookup::<DeliveryPuzzle>("start-distance").unwrap();
    let report = evaluate_heuristic(
        &puzzle,
        &GoalTest::from_model(&puzzle),
        heuristic.key(),
        heuristic.bind(&puzzle),
    );
    // Goal states away from the start cell get a positive estimate.
    assert!(!report.admissible);
    assert!(report.admissibility_violations > 0);
}

#[test]
fn measuring_catalog_validates_on_other_capacities() {
    let puzzle = JugPuzzle::new(JugConfig {
        capacities: [3, 5],
        goal: 1,
    })
    .unwrap();
    let goal = GoalTest::from_model(&puzzle);
    for heuristic in JugPuzzle::heuristics() {
        let report = evaluate_heuristic(&puzzle, &goal, heuristic.key(), heuristic.bind(&puzzle));
        assert!(report.admissible, "{} overestimates", heuristic.key());
        assert!(report.consistent, "{} is inconsistent", heuristic.key());
    }
}

#[test]
fn report_counts_match_graph_export() {
    let puzzle = JugPuzzle::default();
    let graph = state_graph(&puzzle);
    let report = evaluate_heuristic(&puzzle, &GoalTest::from_model(&puzzle), "zero", |_| 0);
    assert_eq!(report.states_checked, graph.node_count());
    assert_eq!(report.transitions_checked, graph.edge_count());
}

#[test]
fn exact_distances_bound_every_goal_path() {
    let puzzle = DeliveryPuzzle::default();
    let distances = exact_distances(&puzzle, &GoalTest::from_model(&puzzle));
    for goal in puzzle.goal_states() {
        assert_eq!(distances.get(&goal), Some(&0));
    }
    let start = distances[&puzzle.initial_state()];
    assert!(start >= 57, "start is at least the heuristic estimate away");
}
