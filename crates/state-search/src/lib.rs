//! Instrumented state-space search.
//!
//! Domains describe themselves through the [`StateSpace`] trait; the search
//! strategies, heuristic validator and experiment harness are written once
//! against it. Two domains ship with the crate: a two-container measuring
//! puzzle and a grid crate-delivery puzzle.

pub mod domains;
pub mod error;
pub mod experiments;
pub mod frontier;
pub mod graph;
pub mod heuristics;
pub mod model;
pub mod replay;
pub mod search;
pub mod validator;

// Re-export main types
pub use error::{Error, Result};
pub use experiments::{
    delivery_battery, measuring_battery, run_battery, sample_branching_factor, BatteryReport,
    Experiment, ExperimentRow,
};
pub use graph::{state_graph, GraphEdge, StateGraph};
pub use heuristics::{lookup, Heuristic, HeuristicCatalog};
pub use model::{Action, GoalTest, StateSpace, Transition, Transitions};
pub use replay::{replay, verify_result, ReplayResult, ReplayStatus};
pub use search::{
    a_star, backward_a_star, backward_breadth_first, bidirectional, breadth_first, depth_first,
    greedy_best_first, hybrid, run_strategy, SearchLimits, SearchResult, Strategy, Termination,
};
pub use validator::{evaluate_heuristic, exact_distances, HeuristicReport, PredecessorIndex};
