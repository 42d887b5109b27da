//! Replaying action lists through a model.
//!
//! Reported paths are checked by feeding their forward action labels back
//! through `successors`, the same way a caller would drive the domain.

use serde::Serialize;

use crate::model::StateSpace;
use crate::search::SearchResult;

/// How a replay ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplayStatus {
    /// Every action matched a successor
    Completed,
    /// No successor of the current state carries this label
    UnknownAction { index: usize, action: String },
}

/// States passed through during a replay, plus accumulated cost.
#[derive(Debug, Clone)]
pub struct ReplayResult<S> {
    pub status: ReplayStatus,
    /// Starts with the replay's start state
    pub states: Vec<S>,
    pub cost: u64,
}

impl<S> ReplayResult<S> {
    pub fn completed(&self) -> bool {
        self.status == ReplayStatus::Completed
    }
}

/// Apply `actions` from `start`, picking the first successor whose forward
/// label matches each action. Stops at the first unmatched action.
pub fn replay<M: StateSpace>(
    model: &M,
    start: &M::State,
    actions: &[String],
) -> ReplayResult<M::State> {
    let mut states = vec![start.clone()];
    let mut cost = 0u64;
    let mut current = start.clone();

    for (index, action) in actions.iter().enumerate() {
        let step = model
            .successors(&current)
            .into_iter()
            .find(|t| t.action.forward_label() == action.as_str());
        match step {
            Some(transition) => {
                cost += u64::from(transition.cost);
                current = transition.target;
                states.push(current.clone());
            }
            None => {
                return ReplayResult {
                    status: ReplayStatus::UnknownAction {
                        index,
                        action: action.clone(),
                    },
                    states,
                    cost,
                };
            }
        }
    }

    ReplayResult {
        status: ReplayStatus::Completed,
        states,
        cost,
    }
}

/// Check that a result is self-consistent: a failed search carries no path,
/// and a successful one replays to exactly its reported path and cost.
pub fn verify_result<M: StateSpace>(model: &M, result: &SearchResult<M::State>) -> bool {
    if !result.found {
        return result.path.is_empty() && result.actions.is_empty();
    }
    let Some(start) = result.path.first() else {
        return false;
    };
    if result.actions.len() + 1 != result.path.len() {
        return false;
    }
    let outcome = replay(model, start, &result.actions);
    outcome.completed() && outcome.states == result.path && outcome.cost == result.cost
}
