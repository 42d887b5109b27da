use state_search::domains::{DeliveryLayout, DeliveryPuzzle, DeliveryState, JugPuzzle, Position};
use state_search::heuristics::{delivery_distance, jug_difference, start_distance};
use state_search::{
    a_star, backward_a_star, backward_breadth_first, breadth_first, depth_first, run_strategy,
    verify_result, GoalTest, SearchLimits, StateSpace, Strategy, Termination,
};

fn all_strategies() -> Vec<Strategy> {
    Strategy::KEYS
        .iter()
        .map(|key| key.parse().unwrap())
        .collect()
}

fn walled_crate() -> DeliveryPuzzle {
    DeliveryPuzzle::new(DeliveryLayout {
        width: 3,
        height: 1,
        base: Position::new(0, 0),
        start: Position::new(0, 0),
        crates: vec![Position::new(2, 0)],
        obstacles: vec![Position::new(1, 0)],
    })
    .unwrap()
}

fn delivery_estimate(
    puzzle: &DeliveryPuzzle,
    strategy: Strategy,
) -> impl Fn(&DeliveryState) -> u32 + '_ {
    let backward = strategy == Strategy::BackwardAStar;
    move |state: &DeliveryState| {
        if backward {
            start_distance(puzzle, state)
        } else {
            delivery_distance(puzzle, state)
        }
    }
}

#[test]
fn every_measuring_result_replays() {
    let puzzle = JugPuzzle::default();
    let goal = GoalTest::from_model(&puzzle);
    for strategy in all_strategies() {
        let result = run_strategy(
            &puzzle,
            strategy,
            &goal,
            |s| jug_difference(&puzzle, s),
            &SearchLimits::default(),
        );
        assert!(result.found, "{} found nothing", strategy.name());
        assert_eq!(result.path[0], puzzle.initial_state());
        assert!(puzzle.is_goal(result.path.last().unwrap()));
        assert!(verify_result(&puzzle, &result), "{} does not replay", strategy.name());
    }
}

#[test]
fn every_delivery_result_replays() {
    let puzzle = DeliveryPuzzle::default();
    let goal = GoalTest::from_model(&puzzle);
    for strategy in all_strategies() {
        // The default depth bound is far shorter than any delivery tour.
        let strategy = match strategy {
            Strategy::DepthFirst { .. } => Strategy::DepthFirst { depth_limit: None },
            other => other,
        };
        let result = run_strategy(
            &puzzle,
            strategy,
            &goal,
            delivery_estimate(&puzzle, strategy),
            &SearchLimits::default(),
        );
        assert!(result.found, "{} found nothing", strategy.name());
        assert_eq!(result.path[0], puzzle.initial_state());
        assert!(result.path.last().unwrap().all_delivered());
        assert!(verify_result(&puzzle, &result), "{} does not replay", strategy.name());
    }
}

#[test]
fn optimal_strategies_agree_on_delivery_cost() {
    let puzzle = DeliveryPuzzle::default();
    let goal = GoalTest::from_model(&puzzle);
    let start = puzzle.initial_state();
    let limits = SearchLimits::default();

    let bfs = breadth_first(&puzzle, &start, &goal, &limits);
    let uniform = a_star(&puzzle, &start, &goal, |_| 0, &limits);
    let informed = a_star(&puzzle, &start, &goal, |s| delivery_distance(&puzzle, s), &limits);
    let backward = backward_breadth_first(&puzzle, &goal, &start, &limits);
    let backward_informed =
        backward_a_star(&puzzle, &goal, &start, |s| start_distance(&puzzle, s), &limits);

    assert!(bfs.found);
    for other in [&uniform, &informed, &backward, &backward_informed] {
        assert_eq!(other.cost, bfs.cost, "{} disagrees with BFS", other.strategy);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let puzzle = DeliveryPuzzle::default();
    let goal = GoalTest::from_model(&puzzle);
    let start = puzzle.initial_state();
    let limits = SearchLimits::default();

    let runs = || {
        vec![
            breadth_first(&puzzle, &start, &goal, &limits),
            depth_first(&puzzle, &start, &goal, Some(60), &limits),
            a_star(&puzzle, &start, &goal, |s| delivery_distance(&puzzle, s), &limits),
            backward_breadth_first(&puzzle, &goal, &start, &limits),
        ]
    };
    for (first, second) in runs().iter().zip(runs().iter()) {
        assert!(first.same_outcome(second), "{} is not deterministic", first.strategy);
    }
}

#[test]
fn backward_path_starts_at_declared_start() {
    let puzzle = DeliveryPuzzle::default();
    let goal = GoalTest::from_model(&puzzle);
    let elsewhere = puzzle
        .state(Position::new(7, 7), None, &[false, false, false])
        .unwrap();
    let result = backward_breadth_first(&puzzle, &goal, &elsewhere, &SearchLimits::default());

    assert!(result.found);
    assert_eq!(result.path[0], elsewhere);
    assert!(verify_result(&puzzle, &result));
    assert!(result.actions.iter().all(|a| !a.starts_with("Reverse")));
}

#[test]
fn unreachable_crate_is_reported_not_raised() {
    let puzzle = walled_crate();
    let goal = GoalTest::from_model(&puzzle);
    for strategy in all_strategies() {
        let result = run_strategy(&puzzle, strategy, &goal, |_| 0, &SearchLimits::default());
        assert!(!result.found, "{} crossed a wall", strategy.name());
        assert!(result.path.is_empty());
        assert!(result.actions.is_empty());
        assert!(result.visited > 0);
        assert_eq!(result.termination, Termination::FrontierExhausted);
    }
}

#[test]
fn expansion_limit_applies_to_every_strategy() {
    let puzzle = DeliveryPuzzle::default();
    let goal = GoalTest::from_model(&puzzle);
    let limits = SearchLimits {
        max_expansions: Some(1),
        timeout: None,
    };
    for strategy in all_strategies() {
        let result = run_strategy(&puzzle, strategy, &goal, |_| 0, &limits);
        assert!(!result.found);
        assert_eq!(result.visited, 1, "{} overran its budget", strategy.name());
        assert_eq!(result.termination, Termination::ExpansionLimit);
    }
}

#[test]
fn result_json_uses_camel_case() {
    let puzzle = JugPuzzle::default();
    let result = breadth_first(
        &puzzle,
        &puzzle.initial_state(),
        &GoalTest::from_model(&puzzle),
        &SearchLimits::default(),
    );
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["found"], true);
    assert_eq!(value["termination"], "goal_reached");
    assert!(value["expansionOrder"].is_array());
    assert_eq!(value["actions"].as_array().map(Vec::len), Some(6));
}
