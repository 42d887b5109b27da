//! The capability contract shared by every domain model.
//!
//! The search engine is written once against [`StateSpace`] and never sees a
//! concrete domain. A model hands out states, enumerates transitions lazily,
//! and answers goal questions; the engine owns everything else.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;
use serde::Serialize;
use smallvec::SmallVec;

/// Transition lists produced by one enumeration call.
pub type Transitions<S> = SmallVec<[Transition<S>; 8]>;

/// Human-readable label of a transition.
///
/// A reverse transition keeps the label of the forward move it inverts, so a
/// path found over predecessors can still be reported (and replayed) in
/// forward terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Action {
    Forward(String),
    Reverse(String),
}

impl Action {
    /// Label of the forward move this action stands for.
    pub fn forward_label(&self) -> &str {
        match self {
            Action::Forward(label) | Action::Reverse(label) => label,
        }
    }

    /// The same move seen from the other end of the edge.
    pub fn inverted(&self) -> Action {
        match self {
            Action::Forward(label) => Action::Reverse(label.clone()),
            Action::Reverse(label) => Action::Forward(label.clone()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Forward(label) => write!(f, "{}", label),
            Action::Reverse(label) => write!(f, "Reverse {}", label),
        }
    }
}

/// A labeled, costed directed edge between two states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Transition<S> {
    pub action: Action,
    pub source: S,
    pub target: S,
    pub cost: u32,
}

impl<S: PartialEq> Transition<S> {
    pub const DEFAULT_COST: u32 = 1;

    pub fn new(action: impl Into<String>, source: S, target: S) -> Self {
        Self {
            action: Action::Forward(action.into()),
            source,
            target,
            cost: Self::DEFAULT_COST,
        }
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// The inverse edge: endpoints swapped, same cost, reverse label.
    pub fn reversed(self) -> Self {
        Self {
            action: self.action.inverted(),
            source: self.target,
            target: self.source,
            cost: self.cost,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Append a transition unless it leads back to its own source.
pub fn push_transition<S: PartialEq>(out: &mut Transitions<S>, transition: Transition<S>) {
    if !transition.is_self_loop() {
        out.push(transition);
    }
}

/// A finite, deterministic state space.
///
/// Enumeration order matters: depth-first exploration and every tie-break in
/// the engine follow it, so implementations must return the same order on
/// every call.
pub trait StateSpace {
    type State: Clone + Eq + Hash + fmt::Debug;

    fn initial_state(&self) -> Self::State;

    /// The model's own goal predicate.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Every goal configuration, in a stable order.
    fn goal_states(&self) -> Vec<Self::State>;

    /// The single goal configuration bidirectional search grows from.
    fn canonical_goal(&self) -> Self::State;

    /// Outgoing transitions; never contains self-loops.
    fn successors(&self, state: &Self::State) -> Transitions<Self::State>;

    /// Every structurally valid state, in a stable order.
    fn all_states(&self) -> Vec<Self::State>;

    /// Incoming transitions, each the inverse of a forward transition that
    /// ends in `state`.
    ///
    /// The default scans the whole space; domains with a cheap closed-form
    /// inverse should override it.
    fn predecessors(&self, state: &Self::State) -> Transitions<Self::State> {
        let mut incoming = Transitions::new();
        for candidate in self.all_states() {
            for transition in self.successors(&candidate) {
                if transition.target == *state {
                    incoming.push(transition.reversed());
                }
            }
        }
        incoming
    }
}

/// How a search decides it has arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalTest<S: Eq + Hash> {
    /// Defer to [`StateSpace::is_goal`].
    Intrinsic,
    /// Membership in an explicit set, kept in insertion order.
    Members(IndexSet<S>),
}

impl<S: Clone + Eq + Hash> GoalTest<S> {
    pub fn members(goals: impl IntoIterator<Item = S>) -> Self {
        GoalTest::Members(goals.into_iter().collect())
    }

    /// Explicit goal set taken from the model.
    pub fn from_model<M: StateSpace<State = S>>(model: &M) -> Self {
        Self::members(model.goal_states())
    }

    pub fn is_satisfied_by<M: StateSpace<State = S>>(&self, model: &M, state: &S) -> bool {
        match self {
            GoalTest::Intrinsic => model.is_goal(state),
            GoalTest::Members(goals) => goals.contains(state),
        }
    }

    /// One goal state for searches that grow backward from a single state.
    ///
    /// Prefers the model's canonical goal when it passes this test, then
    /// the first explicit member. `None` when the test admits no state.
    pub fn canonical<M: StateSpace<State = S>>(&self, model: &M) -> Option<S> {
        let preferred = model.canonical_goal();
        if self.is_satisfied_by(model, &preferred) {
            return Some(preferred);
        }
        match self {
            GoalTest::Intrinsic => model.goal_states().into_iter().next(),
            GoalTest::Members(goals) => goals.first().cloned(),
        }
    }

    /// Goal states in seeding order for multi-source searches.
    pub fn states<M: StateSpace<State = S>>(&self, model: &M) -> Vec<S> {
        match self {
            GoalTest::Intrinsic => model.goal_states(),
            GoalTest::Members(goals) => goals.iter().cloned().collect(),
        }
    }
}
