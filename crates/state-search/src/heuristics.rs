//! Named heuristic catalog.
//!
//! Each domain publishes its heuristics under stable string keys so callers
//! can pick one by name without knowing the implementation.

use crate::domains::{DeliveryPuzzle, DeliveryState, JugPuzzle, JugState};
use crate::error::{Error, Result};
use crate::model::StateSpace;

/// Estimate of the remaining cost from a state to the goal.
pub type HeuristicFn<M> = fn(&M, &<M as StateSpace>::State) -> u32;

/// A catalog entry.
pub struct Heuristic<M: StateSpace> {
    key: &'static str,
    description: &'static str,
    eval: HeuristicFn<M>,
}

impl<M: StateSpace> Clone for Heuristic<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: StateSpace> Copy for Heuristic<M> {}

impl<M: StateSpace> std::fmt::Debug for Heuristic<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Heuristic").field("key", &self.key).finish()
    }
}

impl<M: StateSpace> Heuristic<M> {
    pub fn new(key: &'static str, description: &'static str, eval: HeuristicFn<M>) -> Self {
        Self {
            key,
            description,
            eval,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn estimate(&self, model: &M, state: &M::State) -> u32 {
        (self.eval)(model, state)
    }

    /// Close over a model, giving the plain `state -> estimate` function the
    /// search strategies take.
    pub fn bind<'a>(&self, model: &'a M) -> impl Fn(&M::State) -> u32 + 'a {
        let eval = self.eval;
        move |state: &M::State| eval(model, state)
    }
}

/// Domains that publish named heuristics.
pub trait HeuristicCatalog: StateSpace + Sized {
    fn heuristics() -> Vec<Heuristic<Self>>;
}

/// Find a heuristic by key.
pub fn lookup<M: HeuristicCatalog>(key: &str) -> Result<Heuristic<M>> {
    M::heuristics()
        .into_iter()
        .find(|h| h.key == key)
        .ok_or_else(|| Error::UnknownHeuristic(key.to_string()))
}

/// Always zero; turns A* into uniform-cost search.
pub fn zero<M: StateSpace>(_model: &M, _state: &M::State) -> u32 {
    0
}

/// Half the gap between container A and the target volume.
///
/// Admissible and consistent for the default 4L/3L puzzle with a 2L goal,
/// where it never exceeds one. Other capacities can make it overestimate
/// (9L/4L with a 1L goal, for one); run the validator before trusting it
/// there.
pub fn jug_difference(puzzle: &JugPuzzle, state: &JugState) -> u32 {
    state.first().abs_diff(puzzle.config().goal) / 2
}

impl HeuristicCatalog for JugPuzzle {
    fn heuristics() -> Vec<Heuristic<Self>> {
        vec![
            Heuristic::new("zero", "no information", zero::<JugPuzzle>),
            Heuristic::new(
                "difference",
                "half the gap between container A and the goal volume (admissible for 4/3 -> 2 only)",
                jug_difference,
            ),
        ]
    }
}

/// Crates still to deliver, plus one when the held crate is away from base.
pub fn remaining_crates(puzzle: &DeliveryPuzzle, state: &DeliveryState) -> u32 {
    let undelivered = state.delivered().iter().filter(|&&done| !done).count() as u32;
    let away = state.carrying().is_some() && state.agent() != puzzle.layout().base;
    undelivered + u32::from(away)
}

/// Manhattan relaxation of the remaining delivery tour.
///
/// The held crate (if any) still has to reach the base; otherwise the agent
/// must first walk to the nearest undelivered crate. Every other undelivered
/// crate then needs at least its own crate-to-base leg.
pub fn delivery_distance(puzzle: &DeliveryPuzzle, state: &DeliveryState) -> u32 {
    let layout = puzzle.layout();
    let pending = state
        .delivered()
        .iter()
        .enumerate()
        .filter(|&(idx, &done)| !done && Some(idx) != state.carrying())
        .map(|(idx, _)| layout.crates[idx]);

    let mut total = 0;
    match state.carrying() {
        Some(_) => total += state.agent().manhattan(layout.base),
        None => {
            total += pending
                .clone()
                .map(|cell| state.agent().manhattan(cell))
                .min()
                .unwrap_or(0);
        }
    }
    total + pending.map(|cell| cell.manhattan(layout.base)).sum::<u32>()
}

/// Manhattan distance back to the start cell, for searches run over
/// predecessors toward the initial state.
pub fn start_distance(puzzle: &DeliveryPuzzle, state: &DeliveryState) -> u32 {
    state.agent().manhattan(puzzle.layout().start)
}

impl HeuristicCatalog for DeliveryPuzzle {
    fn heuristics() -> Vec<Heuristic<Self>> {
        vec![
            Heuristic::new("zero", "no information", zero::<DeliveryPuzzle>),
            Heuristic::new(
                "remaining",
                "undelivered crates, plus one if carrying away from base",
                remaining_crates,
            ),
            Heuristic::new(
                "distance",
                "Manhattan relaxation of the remaining delivery tour",
                delivery_distance,
            ),
            Heuristic::new(
                "start-distance",
                "Manhattan distance to the start cell (backward search)",
                start_distance,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::Position;

    #[test]
    fn test_lookup_by_key() {
        let h = lookup::<JugPuzzle>("difference").unwrap();
        assert_eq!(h.key(), "difference");
        assert!(matches!(
            lookup::<JugPuzzle>("manhattan"),
            Err(Error::UnknownHeuristic(key)) if key == "manhattan"
        ));
    }

    #[test]
    fn test_catalog_keys_are_unique() {
        let keys: Vec<&str> = DeliveryPuzzle::heuristics().iter().map(|h| h.key()).collect();
        let mut deduped = keys.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(keys.len(), deduped.len());
    }

    #[test]
    fn test_jug_difference_values() {
        let puzzle = JugPuzzle::default();
        let h = lookup::<JugPuzzle>("difference").unwrap().bind(&puzzle);
        assert_eq!(h(&puzzle.state(0, 0).unwrap()), 1);
        assert_eq!(h(&puzzle.state(4, 3).unwrap()), 1);
        assert_eq!(h(&puzzle.state(3, 0).unwrap()), 0);
        assert_eq!(h(&puzzle.state(2, 1).unwrap()), 0);
    }

    #[test]
    fn test_jug_difference_overestimates_on_other_capacities() {
        use crate::domains::JugConfig;
        use crate::model::GoalTest;
        use crate::validator::evaluate_heuristic;

        let puzzle = JugPuzzle::new(JugConfig {
            capacities: [9, 4],
            goal: 1,
        })
        .unwrap();
        let report = evaluate_heuristic(
            &puzzle,
            &GoalTest::from_model(&puzzle),
            "difference",
            |s| jug_difference(&puzzle, s),
        );
        assert!(!report.admissible);
        assert!(lookup::<JugPuzzle>("difference")
            .unwrap()
            .description()
            .contains("4/3 -> 2 only"));
    }

    #[test]
    fn test_delivery_heuristics_on_start() {
        let puzzle = DeliveryPuzzle::default();
        let start = puzzle.initial_state();

        assert_eq!(remaining_crates(&puzzle, &start), 3);
        assert_eq!(start_distance(&puzzle, &start), 0);
        // nearest crate (3, 10) is 7 away; crate legs to base 25 + 12 + 13
        assert_eq!(delivery_distance(&puzzle, &start), 7 + 25 + 12 + 13);
    }

    #[test]
    fn test_delivery_heuristics_vanish_on_goals() {
        let puzzle = DeliveryPuzzle::default();
        for goal in puzzle.goal_states() {
            assert_eq!(remaining_crates(&puzzle, &goal), 0);
            assert_eq!(delivery_distance(&puzzle, &goal), 0);
        }
    }

    #[test]
    fn test_remaining_counts_carried_crate_away_from_base() {
        let puzzle = DeliveryPuzzle::default();
        let carrying = puzzle
            .state(Position::new(7, 5), Some(1), &[false, false, false])
            .unwrap();
        assert_eq!(remaining_crates(&puzzle, &carrying), 4);
        let at_base = puzzle
            .state(Position::new(0, 0), Some(1), &[false, false, false])
            .unwrap();
        assert_eq!(remaining_crates(&puzzle, &at_base), 3);
    }
}
