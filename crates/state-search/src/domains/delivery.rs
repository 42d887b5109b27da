//! Grid delivery puzzle.
//!
//! An agent walks a rectangular grid with blocked cells. Crates sit on fixed
//! cells; the agent picks one up when standing on it with empty hands and
//! drops it when carrying it onto the base cell. The puzzle is solved once
//! every crate has been delivered.
//!
//! Layouts load from camelCase JSON, for example:
//!
//! ```json
//! {
//!   "width": 5, "height": 5,
//!   "base": {"x": 0, "y": 0}, "start": {"x": 4, "y": 4},
//!   "crates": [{"x": 2, "y": 3}],
//!   "obstacles": [{"x": 1, "y": 1}]
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::model::{push_transition, StateSpace, Transition, Transitions};

/// Upper bound on crates; the state space doubles with each one.
pub const MAX_CRATES: usize = 8;

/// Compass direction of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Enumeration order used by successor generation.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn code(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "N" => Ok(Direction::North),
            "S" => Ok(Direction::South),
            "E" => Ok(Direction::East),
            "W" => Ok(Direction::West),
            other => Err(Error::UnknownDirection(other.to_string())),
        }
    }
}

/// Cell on the grid, `y` growing southwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Static description of a delivery puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryLayout {
    pub width: i32,
    pub height: i32,
    /// Drop-off cell
    pub base: Position,
    /// Agent start cell
    pub start: Position,
    /// Pick-up cell of each crate, indexed by crate number
    pub crates: Vec<Position>,
    #[serde(default)]
    pub obstacles: Vec<Position>,
}

impl Default for DeliveryLayout {
    fn default() -> Self {
        let obstacles = [
            (2, 2),
            (3, 2),
            (4, 2),
            (5, 5),
            (6, 5),
            (8, 5),
            (6, 9),
            (7, 9),
            (8, 9),
            (9, 9),
            (10, 9),
            (11, 9),
            (6, 10),
            (6, 11),
            (4, 11),
            (5, 11),
            (10, 3),
            (11, 3),
            (12, 3),
            (9, 4),
        ];
        Self {
            width: 15,
            height: 15,
            base: Position::new(0, 0),
            start: Position::new(0, 14),
            crates: vec![
                Position::new(12, 13),
                Position::new(7, 5),
                Position::new(3, 10),
            ],
            obstacles: obstacles
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect(),
        }
    }
}

/// Agent cell, held crate, and per-crate delivery flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeliveryState {
    agent: Position,
    carrying: Option<usize>,
    delivered: SmallVec<[bool; MAX_CRATES]>,
}

impl DeliveryState {
    pub fn agent(&self) -> Position {
        self.agent
    }

    pub fn carrying(&self) -> Option<usize> {
        self.carrying
    }

    pub fn delivered(&self) -> &[bool] {
        &self.delivered
    }

    pub fn all_delivered(&self) -> bool {
        self.delivered.iter().all(|&done| done)
    }

    fn at(&self, agent: Position) -> Self {
        Self {
            agent,
            carrying: self.carrying,
            delivered: self.delivered.clone(),
        }
    }
}

impl fmt::Display for DeliveryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .delivered
            .iter()
            .map(|&done| if done { '1' } else { '0' })
            .collect();
        match self.carrying {
            Some(idx) => write!(f, "{} carrying {} [{}]", self.agent, idx, flags),
            None => write!(f, "{} empty [{}]", self.agent, flags),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeliveryPuzzle {
    layout: DeliveryLayout,
    obstacles: HashSet<Position>,
}

impl Default for DeliveryPuzzle {
    fn default() -> Self {
        let layout = DeliveryLayout::default();
        let obstacles = layout.obstacles.iter().copied().collect();
        Self { layout, obstacles }
    }
}

impl DeliveryPuzzle {
    pub fn new(layout: DeliveryLayout) -> Result<Self> {
        if layout.width <= 0 || layout.height <= 0 {
            return Err(Error::InvalidLayout(format!(
                "grid must be non-empty, got {}x{}",
                layout.width, layout.height
            )));
        }
        if layout.crates.len() > MAX_CRATES {
            return Err(Error::InvalidLayout(format!(
                "at most {} crates are supported, got {}",
                MAX_CRATES,
                layout.crates.len()
            )));
        }

        let puzzle = Self {
            obstacles: layout.obstacles.iter().copied().collect(),
            layout,
        };

        let named = [("base", puzzle.layout.base), ("start", puzzle.layout.start)];
        let crates = puzzle
            .layout
            .crates
            .iter()
            .map(|&pos| ("crate", pos));
        for (name, pos) in named.into_iter().chain(crates) {
            if !puzzle.is_free(pos) {
                return Err(Error::InvalidLayout(format!(
                    "{} cell {} is outside the grid or blocked",
                    name, pos
                )));
            }
        }
        let distinct: HashSet<Position> = puzzle.layout.crates.iter().copied().collect();
        if distinct.len() != puzzle.layout.crates.len() {
            return Err(Error::InvalidLayout(
                "two crates share a cell".to_string(),
            ));
        }

        Ok(puzzle)
    }

    pub fn layout(&self) -> &DeliveryLayout {
        &self.layout
    }

    pub fn crate_count(&self) -> usize {
        self.layout.crates.len()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        (0..self.layout.width).contains(&pos.x) && (0..self.layout.height).contains(&pos.y)
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    /// In bounds and not blocked.
    pub fn is_free(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.is_obstacle(pos)
    }

    /// Build a state, rejecting anything the rules could never produce.
    pub fn state(
        &self,
        agent: Position,
        carrying: Option<usize>,
        delivered: &[bool],
    ) -> Result<DeliveryState> {
        if !self.is_free(agent) {
            return Err(Error::invalid_state(format!(
                "agent cell {} is outside the grid or blocked",
                agent
            )));
        }
        if delivered.len() != self.crate_count() {
            return Err(Error::invalid_state(format!(
                "expected {} delivery flags, got {}",
                self.crate_count(),
                delivered.len()
            )));
        }
        if let Some(idx) = carrying {
            if idx >= self.crate_count() {
                return Err(Error::invalid_state(format!("no crate {}", idx)));
            }
            if delivered[idx] {
                return Err(Error::invalid_state(format!(
                    "crate {} is both carried and delivered",
                    idx
                )));
            }
        }
        Ok(DeliveryState {
            agent,
            carrying,
            delivered: SmallVec::from_slice(delivered),
        })
    }

    /// Column by column: x outer, y inner.
    fn free_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.layout.width)
            .flat_map(move |x| (0..self.layout.height).map(move |y| Position::new(x, y)))
            .filter(move |&pos| !self.is_obstacle(pos))
    }

    fn all_delivered_flags(&self) -> SmallVec<[bool; MAX_CRATES]> {
        SmallVec::from_elem(true, self.crate_count())
    }
}

impl StateSpace for DeliveryPuzzle {
    type State = DeliveryState;

    fn initial_state(&self) -> DeliveryState {
        DeliveryState {
            agent: self.layout.start,
            carrying: None,
            delivered: SmallVec::from_elem(false, self.crate_count()),
        }
    }

    fn is_goal(&self, state: &DeliveryState) -> bool {
        state.all_delivered()
    }

    fn goal_states(&self) -> Vec<DeliveryState> {
        let delivered = self.all_delivered_flags();
        self.free_cells()
            .map(|agent| DeliveryState {
                agent,
                carrying: None,
                delivered: delivered.clone(),
            })
            .collect()
    }

    fn canonical_goal(&self) -> DeliveryState {
        DeliveryState {
            agent: self.layout.base,
            carrying: None,
            delivered: self.all_delivered_flags(),
        }
    }

    fn successors(&self, state: &DeliveryState) -> Transitions<DeliveryState> {
        let mut out = Transitions::new();

        for direction in Direction::ALL {
            let next = state.agent.step(direction);
            if self.is_free(next) {
                push_transition(
                    &mut out,
                    Transition::new(
                        format!("Move {}", direction.code()),
                        state.clone(),
                        state.at(next),
                    ),
                );
            }
        }

        match state.carrying {
            None => {
                for (idx, &cell) in self.layout.crates.iter().enumerate() {
                    if cell == state.agent && !state.delivered[idx] {
                        let target = DeliveryState {
                            agent: state.agent,
                            carrying: Some(idx),
                            delivered: state.delivered.clone(),
                        };
                        push_transition(
                            &mut out,
                            Transition::new(format!("Pick crate {}", idx), state.clone(), target),
                        );
                    }
                }
            }
            Some(idx) if state.agent == self.layout.base => {
                let mut delivered = state.delivered.clone();
                delivered[idx] = true;
                let target = DeliveryState {
                    agent: state.agent,
                    carrying: None,
                    delivered,
                };
                push_transition(
                    &mut out,
                    Transition::new(format!("Drop crate {}", idx), state.clone(), target),
                );
            }
            Some(_) => {}
        }

        out
    }

    fn predecessors(&self, state: &DeliveryState) -> Transitions<DeliveryState> {
        let mut out = Transitions::new();

        // Undo a drop: hands were full at the base, crate not yet delivered.
        if state.carrying.is_none() && state.agent == self.layout.base {
            for (idx, &done) in state.delivered.iter().enumerate() {
                if done {
                    let mut delivered = state.delivered.clone();
                    delivered[idx] = false;
                    let prev = DeliveryState {
                        agent: state.agent,
                        carrying: Some(idx),
                        delivered,
                    };
                    let forward =
                        Transition::new(format!("Drop crate {}", idx), prev, state.clone());
                    push_transition(&mut out, forward.reversed());
                }
            }
        }

        // Undo a pick: the held crate is back on its own cell.
        if let Some(idx) = state.carrying {
            if self.layout.crates[idx] == state.agent {
                let prev = DeliveryState {
                    agent: state.agent,
                    carrying: None,
                    delivered: state.delivered.clone(),
                };
                let forward = Transition::new(format!("Pick crate {}", idx), prev, state.clone());
                push_transition(&mut out, forward.reversed());
            }
        }

        for direction in Direction::ALL {
            let prev = state.agent.step(direction.opposite());
            if self.is_free(prev) {
                let forward = Transition::new(
                    format!("Move {}", direction.code()),
                    state.at(prev),
                    state.clone(),
                );
                push_transition(&mut out, forward.reversed());
            }
        }

        out
    }

    fn all_states(&self) -> Vec<DeliveryState> {
        let crates = self.crate_count();
        let mut states = Vec::new();
        for agent in self.free_cells() {
            for mask in 0u32..(1 << crates) {
                let delivered: SmallVec<[bool; MAX_CRATES]> =
                    (0..crates).map(|idx| mask & (1 << idx) != 0).collect();
                states.push(DeliveryState {
                    agent,
                    carrying: None,
                    delivered: delivered.clone(),
                });
                for idx in (0..crates).filter(|&idx| !delivered[idx]) {
                    states.push(DeliveryState {
                        agent,
                        carrying: Some(idx),
                        delivered: delivered.clone(),
                    });
                }
            }
        }
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> DeliveryPuzzle {
        // B . C .   base at 0, crate at 2, start at 3
        DeliveryPuzzle::new(DeliveryLayout {
            width: 4,
            height: 1,
            base: Position::new(0, 0),
            start: Position::new(3, 0),
            crates: vec![Position::new(2, 0)],
            obstacles: vec![],
        })
        .unwrap()
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("N".parse::<Direction>().unwrap(), Direction::North);
        assert_eq!("W".parse::<Direction>().unwrap(), Direction::West);
        assert!(matches!(
            "Q".parse::<Direction>(),
            Err(Error::UnknownDirection(code)) if code == "Q"
        ));
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            let back = Position::new(3, 3).step(direction).step(direction.opposite());
            assert_eq!(back, Position::new(3, 3));
        }
    }

    #[test]
    fn test_default_layout_is_valid() {
        let layout = DeliveryLayout::default();
        let puzzle = DeliveryPuzzle::new(layout).unwrap();
        assert_eq!(puzzle.crate_count(), 3);
        assert!(!puzzle.is_goal(&puzzle.initial_state()));
        assert!(puzzle.is_goal(&puzzle.canonical_goal()));
    }

    #[test]
    fn test_layout_rejects_blocked_crate() {
        let mut layout = DeliveryLayout::default();
        layout.crates.push(Position::new(2, 2));
        assert!(matches!(
            DeliveryPuzzle::new(layout),
            Err(Error::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_layout_from_json() {
        let json = r#"{
            "width": 3, "height": 2,
            "base": {"x": 0, "y": 0}, "start": {"x": 2, "y": 1},
            "crates": [{"x": 1, "y": 1}]
        }"#;
        let layout: DeliveryLayout = serde_json::from_str(json).unwrap();
        assert!(layout.obstacles.is_empty());
        assert!(DeliveryPuzzle::new(layout).is_ok());
    }

    #[test]
    fn test_state_construction_rejects_invalid() {
        let puzzle = DeliveryPuzzle::default();
        let base = Position::new(0, 0);
        assert!(puzzle.state(base, None, &[false, false, false]).is_ok());
        assert!(puzzle.state(Position::new(2, 2), None, &[false; 3]).is_err());
        assert!(puzzle.state(Position::new(-1, 0), None, &[false; 3]).is_err());
        assert!(puzzle.state(base, None, &[false; 2]).is_err());
        assert!(puzzle.state(base, Some(3), &[false; 3]).is_err());
        assert!(puzzle.state(base, Some(1), &[false, true, false]).is_err());
    }

    #[test]
    fn test_successors_respect_walls_and_bounds() {
        let puzzle = DeliveryPuzzle::default();
        let start = puzzle.initial_state();
        let labels: Vec<String> = puzzle
            .successors(&start)
            .iter()
            .map(|t| t.action.to_string())
            .collect();
        // (0, 14) is the south-west corner.
        assert_eq!(labels, vec!["Move N", "Move E"]);
    }

    #[test]
    fn test_pick_and_drop() {
        let puzzle = corridor();
        let on_crate = puzzle.state(Position::new(2, 0), None, &[false]).unwrap();
        let pick = puzzle
            .successors(&on_crate)
            .into_iter()
            .find(|t| t.action.forward_label() == "Pick crate 0")
            .unwrap();
        assert_eq!(pick.target.carrying(), Some(0));

        let at_base = puzzle.state(Position::new(0, 0), Some(0), &[false]).unwrap();
        let drop = puzzle
            .successors(&at_base)
            .into_iter()
            .find(|t| t.action.forward_label() == "Drop crate 0")
            .unwrap();
        assert_eq!(drop.target.carrying(), None);
        assert!(puzzle.is_goal(&drop.target));
    }

    #[test]
    fn test_predecessors_are_exact_inverses() {
        let puzzle = corridor();
        for state in puzzle.all_states() {
            let mut expected: Vec<_> = puzzle
                .all_states()
                .iter()
                .flat_map(|s| puzzle.successors(s))
                .filter(|t| t.target == state)
                .map(|t| t.reversed())
                .collect();
            let mut actual: Vec<_> = puzzle.predecessors(&state).into_vec();
            let key = |t: &Transition<DeliveryState>| t.action.to_string();
            expected.sort_by_key(key);
            actual.sort_by_key(key);
            assert_eq!(actual, expected, "predecessors of {}", state);
        }
    }

    #[test]
    fn test_all_states_counts() {
        let puzzle = corridor();
        // 4 cells x (delivered: empty hands | undelivered: empty or carrying)
        assert_eq!(puzzle.all_states().len(), 4 * 3);
        assert_eq!(puzzle.goal_states().len(), 4);
    }

    #[test]
    fn test_goal_states_run_column_by_column() {
        let puzzle = DeliveryPuzzle::default();
        let agents: Vec<Position> = puzzle.goal_states().iter().map(|g| g.agent()).collect();
        assert_eq!(agents[0], Position::new(0, 0));
        assert_eq!(agents[1], Position::new(0, 1));
        assert_eq!(agents[14], Position::new(0, 14));
        assert_eq!(agents[15], Position::new(1, 0));
    }
}
