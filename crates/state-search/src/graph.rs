//! Full node and edge enumeration of a state space, for export.

use serde::Serialize;

use crate::model::StateSpace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge<S> {
    pub source: S,
    pub target: S,
    pub action: String,
    pub cost: u32,
}

/// Every state and every forward transition, in model enumeration order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateGraph<S> {
    pub initial: S,
    pub goals: Vec<S>,
    pub nodes: Vec<S>,
    pub edges: Vec<GraphEdge<S>>,
}

impl<S> StateGraph<S> {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

pub fn state_graph<M: StateSpace>(model: &M) -> StateGraph<M::State> {
    let nodes = model.all_states();
    let edges = nodes
        .iter()
        .flat_map(|state| model.successors(state))
        .map(|t| GraphEdge {
            action: t.action.forward_label().to_string(),
            source: t.source,
            target: t.target,
            cost: t.cost,
        })
        .collect();
    StateGraph {
        initial: model.initial_state(),
        goals: model.goal_states(),
        nodes,
        edges,
    }
}
