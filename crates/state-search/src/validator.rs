//! Exhaustive heuristic validation.
//!
//! Exact distance-to-goal is computed for the whole space by a reverse
//! traversal from every goal state at once over a predecessor index built
//! from `all_states` and `successors`. The index is rebuilt on every call.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;
use tracing::info;

use crate::frontier::PriorityFrontier;
use crate::model::{GoalTest, StateSpace};

/// Incoming edges of every state, as `(source, cost)` pairs.
#[derive(Debug)]
pub struct PredecessorIndex<S> {
    states: Vec<S>,
    incoming: HashMap<S, Vec<(S, u32)>>,
    transitions: usize,
}

impl<S: Clone + Eq + Hash> PredecessorIndex<S> {
    pub fn build<M: StateSpace<State = S>>(model: &M) -> Self {
        let states = model.all_states();
        let mut incoming: HashMap<S, Vec<(S, u32)>> = HashMap::new();
        let mut transitions = 0;
        for state in &states {
            for transition in model.successors(state) {
                transitions += 1;
                incoming
                    .entry(transition.target)
                    .or_default()
                    .push((state.clone(), transition.cost));
            }
        }
        Self {
            states,
            incoming,
            transitions,
        }
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn incoming(&self, state: &S) -> &[(S, u32)] {
        self.incoming.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Forward transitions seen while building the index.
    pub fn transition_count(&self) -> usize {
        self.transitions
    }

    /// Cheapest cost from each state to any of `goals`. States that cannot
    /// reach a goal are absent.
    ///
    /// Runs Dijkstra keyed by distance; with unit costs this expands states
    /// in the same layers a breadth-first sweep would.
    pub fn distances_to(&self, goals: impl IntoIterator<Item = S>) -> HashMap<S, u64> {
        let mut distance: HashMap<S, u64> = HashMap::new();
        let mut frontier = PriorityFrontier::new();
        for goal in goals {
            if !distance.contains_key(&goal) {
                distance.insert(goal.clone(), 0);
                frontier.push(0, 0, goal);
            }
        }

        while let Some((state, cost)) = frontier.pop() {
            if distance.get(&state).is_some_and(|&best| cost > best) {
                continue;
            }
            for (source, step) in self.incoming(&state) {
                let tentative = cost + u64::from(*step);
                if distance.get(source).map_or(true, |&best| tentative < best) {
                    distance.insert(source.clone(), tentative);
                    frontier.push(tentative, tentative, source.clone());
                }
            }
        }

        distance
    }
}

/// Exact distance-to-goal for every state that can reach the goal set.
pub fn exact_distances<M: StateSpace>(
    model: &M,
    goal: &GoalTest<M::State>,
) -> HashMap<M::State, u64> {
    PredecessorIndex::build(model).distances_to(goal.states(model))
}

/// Admissibility and consistency of one heuristic over the full space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeuristicReport {
    pub heuristic: String,
    pub admissible: bool,
    pub consistent: bool,
    pub states_checked: usize,
    pub transitions_checked: usize,
    /// States with no path to any goal; excluded from the admissibility scan
    pub unreachable_states: usize,
    pub admissibility_violations: usize,
    pub consistency_violations: usize,
}

/// Check `heuristic` against exact distances to `goal` on every state, and
/// against every forward transition for consistency.
///
/// Both scans always cover the whole space.
pub fn evaluate_heuristic<M, H>(
    model: &M,
    goal: &GoalTest<M::State>,
    name: &str,
    heuristic: H,
) -> HeuristicReport
where
    M: StateSpace,
    H: Fn(&M::State) -> u32,
{
    let index = PredecessorIndex::build(model);
    let distances = index.distances_to(goal.states(model));

    let mut unreachable_states = 0;
    let mut admissibility_violations = 0;
    for state in index.states() {
        match distances.get(state) {
            Some(&exact) => {
                if u64::from(heuristic(state)) > exact {
                    admissibility_violations += 1;
                }
            }
            None => unreachable_states += 1,
        }
    }

    let mut transitions_checked = 0;
    let mut consistency_violations = 0;
    for state in index.states() {
        let estimate = u64::from(heuristic(state));
        for transition in model.successors(state) {
            transitions_checked += 1;
            if estimate > u64::from(transition.cost) + u64::from(heuristic(&transition.target)) {
                consistency_violations += 1;
            }
        }
    }

    let report = HeuristicReport {
        heuristic: name.to_string(),
        admissible: admissibility_violations == 0,
        consistent: consistency_violations == 0,
        states_checked: index.states().len(),
        transitions_checked,
        unreachable_states,
        admissibility_violations,
        consistency_violations,
    };
    info!(
        heuristic = name,
        admissible = report.admissible,
        consistent = report.consistent,
        states = report.states_checked,
        "heuristic validated"
    );
    report
}
