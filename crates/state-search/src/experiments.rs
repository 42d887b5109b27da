//! Comparison batteries: run a fixed list of strategies on one model and
//! collect a row of measurements per run.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::heuristics::{lookup, HeuristicCatalog};
use crate::model::{GoalTest, StateSpace};
use crate::search::{run_strategy, SearchLimits, SearchResult, Strategy};

/// One entry of a battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experiment {
    pub strategy: Strategy,
    /// Catalog key; `None` for uninformed strategies
    pub heuristic: Option<&'static str>,
}

impl Experiment {
    pub const fn new(strategy: Strategy, heuristic: Option<&'static str>) -> Self {
        Self {
            strategy,
            heuristic,
        }
    }
}

pub fn measuring_battery() -> Vec<Experiment> {
    vec![
        Experiment::new(
            Strategy::DepthFirst {
                depth_limit: Some(10),
            },
            None,
        ),
        Experiment::new(Strategy::BreadthFirst, None),
        Experiment::new(Strategy::Greedy, Some("difference")),
        Experiment::new(Strategy::AStar, Some("difference")),
        Experiment::new(Strategy::BackwardBreadthFirst, None),
        Experiment::new(Strategy::Hybrid { bfs_depth: 2 }, Some("difference")),
    ]
}

pub fn delivery_battery() -> Vec<Experiment> {
    vec![
        Experiment::new(Strategy::AStar, Some("zero")),
        Experiment::new(Strategy::AStar, Some("remaining")),
        Experiment::new(Strategy::AStar, Some("distance")),
        Experiment::new(Strategy::BackwardAStar, Some("start-distance")),
        Experiment::new(Strategy::BackwardBreadthFirst, None),
        Experiment::new(Strategy::Bidirectional, None),
        Experiment::new(Strategy::BreadthFirst, None),
        Experiment::new(Strategy::Greedy, Some("distance")),
        Experiment::new(Strategy::Hybrid { bfs_depth: 2 }, Some("distance")),
    ]
}

/// Which way a strategy grows its search.
pub fn search_type(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::BackwardBreadthFirst | Strategy::BackwardAStar => "backward",
        Strategy::Bidirectional => "bidirectional",
        _ => "forward",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentRow {
    pub algorithm: String,
    pub search_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heuristic: Option<String>,
    pub found: bool,
    pub cost: u64,
    pub visited: usize,
    pub generated: usize,
    pub depth: usize,
    pub runtime_ms: f64,
    pub branching: f64,
}

impl ExperimentRow {
    fn from_result<S: PartialEq>(experiment: &Experiment, result: &SearchResult<S>) -> Self {
        Self {
            algorithm: result.strategy.clone(),
            search_type: search_type(experiment.strategy).to_string(),
            heuristic: experiment.heuristic.map(str::to_string),
            found: result.found,
            cost: result.cost,
            visited: result.visited,
            generated: result.generated,
            depth: result.depth(),
            runtime_ms: result.runtime.as_secs_f64() * 1000.0,
            branching: result.branching_factor(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryReport {
    pub rows: Vec<ExperimentRow>,
    /// Cost agreed on by the optimality-guaranteeing runs, if any found a path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimal_cost: Option<u64>,
    /// Optimality-guaranteeing runs whose cost differs from the cheapest one
    pub disagreements: Vec<String>,
    /// Mean out-degree over the first states of a breadth-first sweep
    pub sampled_branching: f64,
}

/// States sampled by [`run_battery`] for the branching estimate.
pub const BRANCHING_SAMPLES: usize = 100;

/// Run every experiment against the model's own goal set.
///
/// Fails only on an unknown heuristic key; search failures become rows with
/// `found == false`.
pub fn run_battery<M: HeuristicCatalog>(
    model: &M,
    battery: &[Experiment],
    limits: &SearchLimits,
) -> Result<BatteryReport> {
    let goal = GoalTest::from_model(model);
    let mut rows = Vec::with_capacity(battery.len());

    for experiment in battery {
        let heuristic = experiment.heuristic.map(lookup::<M>).transpose()?;
        let estimate = move |state: &M::State| heuristic.map_or(0, |h| h.estimate(model, state));
        let result = run_strategy(model, experiment.strategy, &goal, estimate, limits);
        let row = ExperimentRow::from_result(experiment, &result);
        info!(
            algorithm = %row.algorithm,
            heuristic = row.heuristic.as_deref().unwrap_or("-"),
            found = row.found,
            cost = row.cost,
            visited = row.visited,
            "experiment finished"
        );
        rows.push(row);
    }

    let (optimal_cost, disagreements) = cross_check(battery, &rows);
    Ok(BatteryReport {
        rows,
        optimal_cost,
        disagreements,
        sampled_branching: sample_branching_factor(model, BRANCHING_SAMPLES),
    })
}

/// Compare costs of the runs that promise optimality.
fn cross_check(battery: &[Experiment], rows: &[ExperimentRow]) -> (Option<u64>, Vec<String>) {
    let optimal: Vec<&ExperimentRow> = battery
        .iter()
        .zip(rows)
        .filter(|(experiment, row)| experiment.strategy.guarantees_optimal() && row.found)
        .map(|(_, row)| row)
        .collect();
    let Some(best) = optimal.iter().map(|row| row.cost).min() else {
        return (None, Vec::new());
    };

    let disagreements: Vec<String> = optimal
        .iter()
        .filter(|row| row.cost != best)
        .map(|row| {
            format!(
                "{} ({}) reported cost {} but {} is achievable",
                row.algorithm,
                row.heuristic.as_deref().unwrap_or("no heuristic"),
                row.cost,
                best
            )
        })
        .collect();
    for disagreement in &disagreements {
        warn!("{}", disagreement);
    }
    (Some(best), disagreements)
}

/// Mean number of successors over the first `samples` states reached by a
/// breadth-first sweep from the initial state.
pub fn sample_branching_factor<M: StateSpace>(model: &M, samples: usize) -> f64 {
    let start = model.initial_state();
    let mut seen = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([start]);
    let mut sampled = 0usize;
    let mut total = 0usize;

    while sampled < samples {
        let Some(state) = queue.pop_front() else {
            break;
        };
        let successors = model.successors(&state);
        total += successors.len();
        sampled += 1;
        for transition in successors {
            if seen.insert(transition.target.clone()) {
                queue.push_back(transition.target);
            }
        }
    }

    if sampled == 0 {
        0.0
    } else {
        total as f64 / sampled as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::{DeliveryLayout, DeliveryPuzzle, JugPuzzle, Position};

    #[test]
    fn test_measuring_battery_agrees_on_cost() {
        let puzzle = JugPuzzle::default();
        let report = run_battery(&puzzle, &measuring_battery(), &SearchLimits::default()).unwrap();

        assert_eq!(report.rows.len(), 6);
        assert!(report.rows.iter().all(|row| row.found));
        assert_eq!(report.optimal_cost, Some(6));
        assert!(report.disagreements.is_empty());

        let backward = &report.rows[4];
        assert_eq!(backward.algorithm, "Backward BFS");
        assert_eq!(backward.search_type, "backward");
        assert_eq!(backward.heuristic, None);
    }

    #[test]
    fn test_delivery_battery_on_corridor() {
        let puzzle = DeliveryPuzzle::new(DeliveryLayout {
            width: 4,
            height: 1,
            base: Position::new(0, 0),
            start: Position::new(3, 0),
            crates: vec![Position::new(2, 0)],
            obstacles: vec![],
        })
        .unwrap();
        let report = run_battery(&puzzle, &delivery_battery(), &SearchLimits::default()).unwrap();

        assert_eq!(report.rows.len(), 9);
        assert!(report.rows.iter().all(|row| row.found));
        assert_eq!(report.optimal_cost, Some(5));
        assert!(report.disagreements.is_empty());
    }

    #[test]
    fn test_unknown_heuristic_key_fails_the_battery() {
        let battery = [Experiment::new(Strategy::AStar, Some("euclid"))];
        assert!(run_battery(&JugPuzzle::default(), &battery, &SearchLimits::default()).is_err());
    }

    #[test]
    fn test_cross_check_flags_suboptimal_run() {
        let battery = [
            Experiment::new(Strategy::BreadthFirst, None),
            Experiment::new(Strategy::AStar, Some("bad")),
            Experiment::new(Strategy::Greedy, Some("bad")),
        ];
        let row = |algorithm: &str, cost| ExperimentRow {
            algorithm: algorithm.to_string(),
            search_type: "forward".to_string(),
            heuristic: None,
            found: true,
            cost,
            visited: 1,
            generated: 1,
            depth: 1,
            runtime_ms: 0.0,
            branching: 1.0,
        };
        let rows = [row("BFS", 6), row("A*", 8), row("Greedy", 9)];
        let (best, disagreements) = cross_check(&battery, &rows);

        assert_eq!(best, Some(6));
        // Greedy promises nothing, so only A* is reported.
        assert_eq!(disagreements.len(), 1);
        assert!(disagreements[0].starts_with("A*"));
    }

    #[test]
    fn test_sample_branching_factor() {
        let puzzle = JugPuzzle::default();
        assert_eq!(sample_branching_factor(&puzzle, 1), 2.0);
        assert_eq!(sample_branching_factor(&puzzle, 0), 0.0);
        assert!(sample_branching_factor(&puzzle, 1000) > 0.0);
    }
}
