//! Two-container liquid measuring puzzle.
//!
//! Container A and container B start empty. Each move fills one container
//! from the tap, empties one onto the ground, or pours one into the other
//! until the source is empty or the target is full. The goal is container A
//! holding exactly the configured volume.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{push_transition, StateSpace, Transition, Transitions};

/// Capacities and target volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JugConfig {
    /// Capacities of container A and container B
    pub capacities: [u32; 2],
    /// Volume container A must hold
    pub goal: u32,
}

impl Default for JugConfig {
    fn default() -> Self {
        Self {
            capacities: [4, 3],
            goal: 2,
        }
    }
}

/// Liters held by container A and container B.
///
/// Only [`JugPuzzle`] can build one, so a value always fits the capacities
/// of the puzzle that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct JugState {
    first: u32,
    second: u32,
}

impl JugState {
    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn second(&self) -> u32 {
        self.second
    }
}

impl fmt::Display for JugState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

#[derive(Debug, Clone)]
pub struct JugPuzzle {
    config: JugConfig,
}

impl Default for JugPuzzle {
    fn default() -> Self {
        Self {
            config: JugConfig::default(),
        }
    }
}

impl JugPuzzle {
    pub fn new(config: JugConfig) -> Result<Self> {
        let [a, b] = config.capacities;
        if a == 0 || b == 0 {
            return Err(Error::InvalidLayout(format!(
                "container capacities must be positive, got {}L and {}L",
                a, b
            )));
        }
        if config.goal > a {
            return Err(Error::InvalidLayout(format!(
                "goal volume {}L does not fit container A ({}L)",
                config.goal, a
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &JugConfig {
        &self.config
    }

    /// Build a state, rejecting volumes outside the capacities.
    pub fn state(&self, first: u32, second: u32) -> Result<JugState> {
        let [a, b] = self.config.capacities;
        if first > a || second > b {
            return Err(Error::invalid_state(format!(
                "volumes ({}, {}) exceed capacities ({}, {})",
                first, second, a, b
            )));
        }
        Ok(JugState { first, second })
    }

    fn label(&self, index: usize) -> String {
        let name = if index == 0 { "A" } else { "B" };
        format!("{} ({}L)", name, self.config.capacities[index])
    }
}

impl StateSpace for JugPuzzle {
    type State = JugState;

    fn initial_state(&self) -> JugState {
        JugState {
            first: 0,
            second: 0,
        }
    }

    fn is_goal(&self, state: &JugState) -> bool {
        state.first == self.config.goal
    }

    fn goal_states(&self) -> Vec<JugState> {
        (0..=self.config.capacities[1])
            .map(|second| JugState {
                first: self.config.goal,
                second,
            })
            .collect()
    }

    fn canonical_goal(&self) -> JugState {
        JugState {
            first: self.config.goal,
            second: 0,
        }
    }

    fn successors(&self, state: &JugState) -> Transitions<JugState> {
        let [cap_a, cap_b] = self.config.capacities;
        let (x, y) = (state.first, state.second);
        let mut out = Transitions::new();
        let mut add = |first: u32, second: u32, action: String| {
            push_transition(
                &mut out,
                Transition::new(action, *state, JugState { first, second }),
            );
        };

        if x < cap_a {
            add(cap_a, y, format!("Fill {}", self.label(0)));
        }
        if y < cap_b {
            add(x, cap_b, format!("Fill {}", self.label(1)));
        }
        if x > 0 {
            add(0, y, format!("Empty {}", self.label(0)));
        }
        if y > 0 {
            add(x, 0, format!("Empty {}", self.label(1)));
        }
        if x > 0 && y < cap_b {
            let poured = x.min(cap_b - y);
            add(x - poured, y + poured, "Pour A -> B".to_string());
        }
        if y > 0 && x < cap_a {
            let poured = y.min(cap_a - x);
            add(x + poured, y - poured, "Pour B -> A".to_string());
        }

        out
    }

    fn all_states(&self) -> Vec<JugState> {
        let [cap_a, cap_b] = self.config.capacities;
        (0..=cap_a)
            .flat_map(|first| (0..=cap_b).map(move |second| JugState { first, second }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_successors_are_the_two_fills() {
        let puzzle = JugPuzzle::default();
        let moves = puzzle.successors(&puzzle.initial_state());

        let labels: Vec<String> = moves.iter().map(|t| t.action.to_string()).collect();
        assert_eq!(labels, vec!["Fill A (4L)", "Fill B (3L)"]);
        assert_eq!(moves[0].target, puzzle.state(4, 0).unwrap());
        assert_eq!(moves[1].target, puzzle.state(0, 3).unwrap());
    }

    #[test]
    fn test_no_self_loops_anywhere() {
        let puzzle = JugPuzzle::default();
        for state in puzzle.all_states() {
            for transition in puzzle.successors(&state) {
                assert_ne!(transition.source, transition.target);
                assert_eq!(transition.cost, 1);
            }
        }
    }

    #[test]
    fn test_pour_stops_when_target_full() {
        let puzzle = JugPuzzle::default();
        let state = puzzle.state(4, 1).unwrap();
        let pour = puzzle
            .successors(&state)
            .into_iter()
            .find(|t| t.action.forward_label() == "Pour A -> B")
            .unwrap();
        assert_eq!(pour.target, puzzle.state(2, 3).unwrap());
    }

    #[test]
    fn test_state_construction_rejects_overflow() {
        let puzzle = JugPuzzle::default();
        assert!(puzzle.state(4, 3).is_ok());
        assert!(matches!(
            puzzle.state(5, 0),
            Err(Error::InvalidState { .. })
        ));
        assert!(puzzle.state(0, 4).is_err());
    }

    #[test]
    fn test_config_validation() {
        assert!(JugPuzzle::new(JugConfig {
            capacities: [0, 3],
            goal: 0
        })
        .is_err());
        assert!(JugPuzzle::new(JugConfig {
            capacities: [4, 3],
            goal: 5
        })
        .is_err());
        assert!(JugPuzzle::new(JugConfig {
            capacities: [5, 3],
            goal: 4
        })
        .is_ok());
    }

    #[test]
    fn test_goal_states() {
        let puzzle = JugPuzzle::default();
        let goals = puzzle.goal_states();
        assert_eq!(goals.len(), 4);
        assert!(goals.iter().all(|g| puzzle.is_goal(g)));
        assert_eq!(puzzle.canonical_goal(), puzzle.state(2, 0).unwrap());
        assert_eq!(puzzle.all_states().len(), 20);
    }

    #[test]
    fn test_predecessors_invert_successors() {
        let puzzle = JugPuzzle::default();
        for state in puzzle.all_states() {
            for forward in puzzle.successors(&state) {
                let incoming = puzzle.predecessors(&forward.target);
                assert!(incoming.contains(&forward.clone().reversed()));
            }
        }
    }
}
