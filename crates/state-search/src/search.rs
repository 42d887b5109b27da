//! Search strategies over any [`StateSpace`].
//!
//! Every strategy owns its frontier, parent map and counters for the length
//! of one call and returns a fresh [`SearchResult`]. Running out of frontier,
//! expansions or time is reported through `found == false`, never as an
//! error.
//!
//! Counters are shared across strategies:
//! - `visited` counts states popped from the frontier and expanded;
//! - `generated` counts every transition enumerated during expansion,
//!   including ones leading to states already seen.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::frontier::PriorityFrontier;
use crate::model::{GoalTest, StateSpace, Transitions};

/// Depth bound used by depth-first search when none is given
pub const DEFAULT_DEPTH_LIMIT: usize = 10;

/// Breadth-first depth after which the hybrid strategy switches to greedy
pub const DEFAULT_HYBRID_DEPTH: usize = 2;

/// Cooperative bounds checked once per expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Stop after this many expansions
    pub max_expansions: Option<usize>,
    /// Stop once this much wall-clock time has passed
    pub timeout: Option<Duration>,
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    GoalReached,
    FrontierExhausted,
    ExpansionLimit,
    Timeout,
}

/// Outcome of one strategy invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<S> {
    pub strategy: String,
    pub found: bool,
    /// States from start to goal; empty when nothing was found
    pub path: Vec<S>,
    /// Forward action labels, one per step of `path`
    pub actions: Vec<String>,
    pub visited: usize,
    pub generated: usize,
    /// Sum of transition costs along `path`
    pub cost: u64,
    pub runtime: Duration,
    pub termination: Termination,
    /// States in the order they were expanded
    pub expansion_order: Vec<S>,
}

impl<S: PartialEq> SearchResult<S> {
    /// Number of steps on the path.
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Generated transitions per expanded state.
    pub fn branching_factor(&self) -> f64 {
        if self.visited == 0 {
            0.0
        } else {
            self.generated as f64 / self.visited as f64
        }
    }

    /// Equal in everything except wall-clock runtime.
    pub fn same_outcome(&self, other: &Self) -> bool {
        self.strategy == other.strategy
            && self.found == other.found
            && self.path == other.path
            && self.actions == other.actions
            && self.visited == other.visited
            && self.generated == other.generated
            && self.cost == other.cost
            && self.termination == other.termination
            && self.expansion_order == other.expansion_order
    }
}

/// How a state was first (or most cheaply) reached.
#[derive(Debug, Clone)]
struct Parent<S> {
    state: S,
    action: String,
    cost: u32,
}

type ParentMap<S> = HashMap<S, Option<Parent<S>>>;

/// A reconstructed path with its labels and cost.
#[derive(Debug, Clone)]
struct Trail<S> {
    states: Vec<S>,
    actions: Vec<String>,
    cost: u64,
}

impl<S> Trail<S> {
    /// Flip a path found over predecessors into forward order.
    fn reversed(mut self) -> Self {
        self.states.reverse();
        self.actions.reverse();
        self
    }
}

/// Walk parent links from `node` back to a root and return the path in
/// root-to-node order.
fn reconstruct<S: Clone + Eq + Hash>(parents: &ParentMap<S>, node: &S) -> Trail<S> {
    let mut states = vec![node.clone()];
    let mut actions = Vec::new();
    let mut cost = 0u64;
    let mut current = node.clone();
    while let Some(Some(parent)) = parents.get(&current) {
        actions.push(parent.action.clone());
        cost += u64::from(parent.cost);
        states.push(parent.state.clone());
        current = parent.state.clone();
    }
    states.reverse();
    actions.reverse();
    Trail {
        states,
        actions,
        cost,
    }
}

/// Per-call bookkeeping shared by all strategies.
struct Run<S> {
    strategy: &'static str,
    limits: SearchLimits,
    started: Instant,
    visited: usize,
    generated: usize,
    expansion_order: Vec<S>,
}

impl<S: Clone> Run<S> {
    fn new(strategy: &'static str, limits: &SearchLimits) -> Self {
        debug!(strategy, ?limits, "search started");
        Self {
            strategy,
            limits: *limits,
            started: Instant::now(),
            visited: 0,
            generated: 0,
            expansion_order: Vec::new(),
        }
    }

    fn interrupted(&self) -> Option<Termination> {
        if let Some(max) = self.limits.max_expansions {
            if self.visited >= max {
                return Some(Termination::ExpansionLimit);
            }
        }
        if let Some(timeout) = self.limits.timeout {
            if self.started.elapsed() >= timeout {
                return Some(Termination::Timeout);
            }
        }
        None
    }

    fn expand(&mut self, state: &S) {
        self.visited += 1;
        self.expansion_order.push(state.clone());
    }

    /// Whatever budget is left, for handing to a sub-search.
    fn remaining_limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self
                .limits
                .max_expansions
                .map(|max| max.saturating_sub(self.visited)),
            timeout: self
                .limits
                .timeout
                .map(|timeout| timeout.saturating_sub(self.started.elapsed())),
        }
    }

    fn absorb(&mut self, sub: &SearchResult<S>) {
        self.visited += sub.visited;
        self.generated += sub.generated;
        self.expansion_order.extend(sub.expansion_order.iter().cloned());
    }

    fn finish(self, outcome: std::result::Result<Trail<S>, Termination>) -> SearchResult<S> {
        let runtime = self.started.elapsed();
        let (found, trail, termination) = match outcome {
            Ok(trail) => (true, Some(trail), Termination::GoalReached),
            Err(termination) => (false, None, termination),
        };
        if matches!(
            termination,
            Termination::ExpansionLimit | Termination::Timeout
        ) {
            warn!(
                strategy = self.strategy,
                ?termination,
                visited = self.visited,
                "search stopped before exhausting its frontier"
            );
        }
        debug!(
            strategy = self.strategy,
            found,
            visited = self.visited,
            generated = self.generated,
            "search finished"
        );
        let (path, actions, cost) = match trail {
            Some(trail) => (trail.states, trail.actions, trail.cost),
            None => (Vec::new(), Vec::new(), 0),
        };
        SearchResult {
            strategy: self.strategy.to_string(),
            found,
            path,
            actions,
            visited: self.visited,
            generated: self.generated,
            cost,
            runtime,
            termination,
            expansion_order: self.expansion_order,
        }
    }
}

fn parent_of<S>(state: &S, transition_label: &str, cost: u32) -> Option<Parent<S>>
where
    S: Clone,
{
    Some(Parent {
        state: state.clone(),
        action: transition_label.to_string(),
        cost,
    })
}

/// FIFO search from one or more roots, marking states at discovery.
fn breadth_first_core<S, G, E>(
    run: &mut Run<S>,
    roots: Vec<S>,
    is_target: G,
    expand: E,
) -> std::result::Result<Trail<S>, Termination>
where
    S: Clone + Eq + Hash,
    G: Fn(&S) -> bool,
    E: Fn(&S) -> Transitions<S>,
{
    let mut parents: ParentMap<S> = HashMap::new();
    let mut queue = VecDeque::new();
    for root in roots {
        if !parents.contains_key(&root) {
            parents.insert(root.clone(), None);
            queue.push_back(root);
        }
    }

    while let Some(current) = queue.pop_front() {
        if let Some(stop) = run.interrupted() {
            return Err(stop);
        }
        run.expand(&current);
        if is_target(&current) {
            return Ok(reconstruct(&parents, &current));
        }
        for transition in expand(&current) {
            run.generated += 1;
            if !parents.contains_key(&transition.target) {
                parents.insert(
                    transition.target.clone(),
                    parent_of(&current, transition.action.forward_label(), transition.cost),
                );
                queue.push_back(transition.target);
            }
        }
    }

    Err(Termination::FrontierExhausted)
}

/// Priority search keyed by `g + h` with cost relaxation.
///
/// A state reached again more cheaply is re-pushed even if it was already
/// expanded; entries superseded that way are skipped when popped.
fn best_first_core<S, G, E, H>(
    run: &mut Run<S>,
    roots: Vec<S>,
    is_target: G,
    expand: E,
    heuristic: &H,
) -> std::result::Result<Trail<S>, Termination>
where
    S: Clone + Eq + Hash,
    G: Fn(&S) -> bool,
    E: Fn(&S) -> Transitions<S>,
    H: Fn(&S) -> u32,
{
    let mut best_cost: HashMap<S, u64> = HashMap::new();
    let mut parents: ParentMap<S> = HashMap::new();
    let mut frontier = PriorityFrontier::new();
    for root in roots {
        if !best_cost.contains_key(&root) {
            best_cost.insert(root.clone(), 0);
            parents.insert(root.clone(), None);
            frontier.push(u64::from(heuristic(&root)), 0, root);
        }
    }

    while let Some((current, cost)) = frontier.pop() {
        if best_cost.get(&current).is_some_and(|&best| cost > best) {
            continue;
        }
        if let Some(stop) = run.interrupted() {
            return Err(stop);
        }
        run.expand(&current);
        if is_target(&current) {
            return Ok(reconstruct(&parents, &current));
        }
        for transition in expand(&current) {
            run.generated += 1;
            let tentative = cost + u64::from(transition.cost);
            let improves = best_cost
                .get(&transition.target)
                .map_or(true, |&best| tentative < best);
            if improves {
                best_cost.insert(transition.target.clone(), tentative);
                parents.insert(
                    transition.target.clone(),
                    parent_of(&current, transition.action.forward_label(), transition.cost),
                );
                let priority = tentative + u64::from(heuristic(&transition.target));
                frontier.push(priority, tentative, transition.target);
            }
        }
    }

    Err(Termination::FrontierExhausted)
}

/// Breadth-first search: shortest path in steps.
pub fn breadth_first<M: StateSpace>(
    model: &M,
    start: &M::State,
    goal: &GoalTest<M::State>,
    limits: &SearchLimits,
) -> SearchResult<M::State> {
    let mut run = Run::new("BFS", limits);
    let outcome = breadth_first_core(
        &mut run,
        vec![start.clone()],
        |s| goal.is_satisfied_by(model, s),
        |s| model.successors(s),
    );
    run.finish(outcome)
}

/// Depth-first search, optionally bounded in depth.
///
/// Successors are pushed in reverse so the first enumerated move is explored
/// first. Nodes at the depth limit are goal-tested but not expanded.
pub fn depth_first<M: StateSpace>(
    model: &M,
    start: &M::State,
    goal: &GoalTest<M::State>,
    depth_limit: Option<usize>,
    limits: &SearchLimits,
) -> SearchResult<M::State> {
    let mut run = Run::new("DFS", limits);
    let mut parents: ParentMap<M::State> = HashMap::new();
    parents.insert(start.clone(), None);
    let mut stack = vec![(start.clone(), 0usize)];

    let outcome = loop {
        let Some((current, depth)) = stack.pop() else {
            break Err(Termination::FrontierExhausted);
        };
        if let Some(stop) = run.interrupted() {
            break Err(stop);
        }
        run.expand(&current);
        if goal.is_satisfied_by(model, &current) {
            break Ok(reconstruct(&parents, &current));
        }
        if depth_limit.is_some_and(|limit| depth >= limit) {
            continue;
        }
        for transition in model.successors(&current).into_iter().rev() {
            run.generated += 1;
            if !parents.contains_key(&transition.target) {
                parents.insert(
                    transition.target.clone(),
                    parent_of(&current, transition.action.forward_label(), transition.cost),
                );
                stack.push((transition.target, depth + 1));
            }
        }
    };

    run.finish(outcome)
}

/// Greedy best-first search ordered by the heuristic alone.
///
/// Ties go to the state pushed first. States are marked at discovery and
/// never reopened, so accumulated cost plays no part.
pub fn greedy_best_first<M, H>(
    model: &M,
    start: &M::State,
    goal: &GoalTest<M::State>,
    heuristic: H,
    limits: &SearchLimits,
) -> SearchResult<M::State>
where
    M: StateSpace,
    H: Fn(&M::State) -> u32,
{
    let mut run = Run::new("Greedy", limits);
    let mut parents: ParentMap<M::State> = HashMap::new();
    parents.insert(start.clone(), None);
    let mut frontier = PriorityFrontier::new();
    frontier.push(u64::from(heuristic(start)), 0, start.clone());

    let outcome = loop {
        let Some((current, _)) = frontier.pop() else {
            break Err(Termination::FrontierExhausted);
        };
        if let Some(stop) = run.interrupted() {
            break Err(stop);
        }
        run.expand(&current);
        if goal.is_satisfied_by(model, &current) {
            break Ok(reconstruct(&parents, &current));
        }
        for transition in model.successors(&current) {
            run.generated += 1;
            if !parents.contains_key(&transition.target) {
                parents.insert(
                    transition.target.clone(),
                    parent_of(&current, transition.action.forward_label(), transition.cost),
                );
                frontier.push(u64::from(heuristic(&transition.target)), 0, transition.target);
            }
        }
    };

    run.finish(outcome)
}

/// A* search; optimal whenever the heuristic is admissible.
pub fn a_star<M, H>(
    model: &M,
    start: &M::State,
    goal: &GoalTest<M::State>,
    heuristic: H,
    limits: &SearchLimits,
) -> SearchResult<M::State>
where
    M: StateSpace,
    H: Fn(&M::State) -> u32,
{
    let mut run = Run::new("A*", limits);
    let outcome = best_first_core(
        &mut run,
        vec![start.clone()],
        |s| goal.is_satisfied_by(model, s),
        |s| model.successors(s),
        &heuristic,
    );
    run.finish(outcome)
}

/// Breadth-first search over predecessors, seeded with every goal state at
/// once and stopping at `target`. The reported path runs target to goal.
pub fn backward_breadth_first<M: StateSpace>(
    model: &M,
    goal: &GoalTest<M::State>,
    target: &M::State,
    limits: &SearchLimits,
) -> SearchResult<M::State> {
    let mut run = Run::new("Backward BFS", limits);
    let outcome = breadth_first_core(
        &mut run,
        goal.states(model),
        |s| s == target,
        |s| model.predecessors(s),
    );
    run.finish(outcome.map(Trail::reversed))
}

/// A* over predecessors from the whole goal set toward `target`.
///
/// The heuristic estimates the distance back to `target`, not to the goal.
pub fn backward_a_star<M, H>(
    model: &M,
    goal: &GoalTest<M::State>,
    target: &M::State,
    heuristic: H,
    limits: &SearchLimits,
) -> SearchResult<M::State>
where
    M: StateSpace,
    H: Fn(&M::State) -> u32,
{
    let mut run = Run::new("Backward A*", limits);
    let outcome = best_first_core(
        &mut run,
        goal.states(model),
        |s| s == target,
        |s| model.predecessors(s),
        &heuristic,
    );
    run.finish(outcome.map(Trail::reversed))
}

/// Expand one state of one side of a bidirectional search. Returns the
/// first newly discovered state the other side already knows.
fn bidirectional_step<S, E>(
    run: &mut Run<S>,
    queue: &mut VecDeque<S>,
    own: &mut ParentMap<S>,
    other: &ParentMap<S>,
    expand: E,
) -> std::result::Result<Option<S>, Termination>
where
    S: Clone + Eq + Hash,
    E: Fn(&S) -> Transitions<S>,
{
    let Some(current) = queue.pop_front() else {
        return Ok(None);
    };
    if let Some(stop) = run.interrupted() {
        return Err(stop);
    }
    run.expand(&current);
    for transition in expand(&current) {
        run.generated += 1;
        if own.contains_key(&transition.target) {
            continue;
        }
        own.insert(
            transition.target.clone(),
            parent_of(&current, transition.action.forward_label(), transition.cost),
        );
        if other.contains_key(&transition.target) {
            return Ok(Some(transition.target));
        }
        queue.push_back(transition.target);
    }
    Ok(None)
}

/// Join the forward path to `meeting` with the backward path from it.
fn merge_at<S: Clone + Eq + Hash>(
    forward: &ParentMap<S>,
    backward: &ParentMap<S>,
    meeting: &S,
) -> Trail<S> {
    let mut trail = reconstruct(forward, meeting);
    let tail = reconstruct(backward, meeting).reversed();
    trail.states.extend(tail.states.into_iter().skip(1));
    trail.actions.extend(tail.actions);
    trail.cost += tail.cost;
    trail
}

/// Meet-in-the-middle breadth-first search between `start` and one goal
/// state, alternating one expansion per side.
///
/// The search stops at the first meeting state without comparing the cost
/// of other possible meetings, so the path is shortest only up to the
/// granularity of a round and is not cost-optimal on weighted spaces.
pub fn bidirectional<M: StateSpace>(
    model: &M,
    start: &M::State,
    goal_state: &M::State,
    limits: &SearchLimits,
) -> SearchResult<M::State> {
    let mut run = Run::new("Bidirectional", limits);
    let mut forward: ParentMap<M::State> = HashMap::from([(start.clone(), None)]);
    let mut backward: ParentMap<M::State> = HashMap::from([(goal_state.clone(), None)]);
    let mut forward_queue = VecDeque::from([start.clone()]);
    let mut backward_queue = VecDeque::from([goal_state.clone()]);

    if start == goal_state {
        return run.finish(Ok(merge_at(&forward, &backward, start)));
    }

    let outcome = loop {
        if forward_queue.is_empty() || backward_queue.is_empty() {
            break Err(Termination::FrontierExhausted);
        }
        match bidirectional_step(
            &mut run,
            &mut forward_queue,
            &mut forward,
            &backward,
            |s| model.successors(s),
        ) {
            Ok(Some(meeting)) => break Ok(merge_at(&forward, &backward, &meeting)),
            Ok(None) => {}
            Err(stop) => break Err(stop),
        }
        match bidirectional_step(
            &mut run,
            &mut backward_queue,
            &mut backward,
            &forward,
            |s| model.predecessors(s),
        ) {
            Ok(Some(meeting)) => break Ok(merge_at(&forward, &backward, &meeting)),
            Ok(None) => {}
            Err(stop) => break Err(stop),
        }
    };

    run.finish(outcome)
}

/// Breadth-first up to `bfs_depth`, then greedy best-first from each state
/// left on the frontier at that depth, in discovery order.
///
/// The first successful greedy run is spliced onto its breadth-first prefix.
/// Counters include the breadth-first phase and every greedy run attempted.
pub fn hybrid<M, H>(
    model: &M,
    start: &M::State,
    goal: &GoalTest<M::State>,
    bfs_depth: usize,
    heuristic: H,
    limits: &SearchLimits,
) -> SearchResult<M::State>
where
    M: StateSpace,
    H: Fn(&M::State) -> u32,
{
    let mut run = Run::new("Hybrid", limits);
    let mut parents: ParentMap<M::State> = HashMap::new();
    parents.insert(start.clone(), None);
    let mut queue = VecDeque::from([(start.clone(), 0usize)]);
    let mut seeds = Vec::new();

    while let Some((current, depth)) = queue.pop_front() {
        if let Some(stop) = run.interrupted() {
            return run.finish(Err(stop));
        }
        run.expand(&current);
        if goal.is_satisfied_by(model, &current) {
            let trail = reconstruct(&parents, &current);
            return run.finish(Ok(trail));
        }
        if depth >= bfs_depth {
            seeds.push(current);
            continue;
        }
        for transition in model.successors(&current) {
            run.generated += 1;
            if !parents.contains_key(&transition.target) {
                parents.insert(
                    transition.target.clone(),
                    parent_of(&current, transition.action.forward_label(), transition.cost),
                );
                queue.push_back((transition.target, depth + 1));
            }
        }
    }

    debug!(seeds = seeds.len(), "hybrid switching to greedy");
    for seed in seeds {
        if let Some(stop) = run.interrupted() {
            return run.finish(Err(stop));
        }
        let sub = greedy_best_first(model, &seed, goal, &heuristic, &run.remaining_limits());
        run.absorb(&sub);
        if sub.found {
            let mut trail = reconstruct(&parents, &seed);
            trail.states.extend(sub.path.into_iter().skip(1));
            trail.actions.extend(sub.actions);
            trail.cost += sub.cost;
            return run.finish(Ok(trail));
        }
        if sub.termination != Termination::FrontierExhausted {
            return run.finish(Err(sub.termination));
        }
    }

    run.finish(Err(Termination::FrontierExhausted))
}

/// A strategy together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Strategy {
    BreadthFirst,
    DepthFirst { depth_limit: Option<usize> },
    Greedy,
    AStar,
    BackwardBreadthFirst,
    BackwardAStar,
    Bidirectional,
    Hybrid { bfs_depth: usize },
}

impl Strategy {
    /// Command-line keys, in the order they are listed in help output.
    pub const KEYS: [&'static str; 8] = [
        "bfs",
        "dfs",
        "greedy",
        "astar",
        "backward-bfs",
        "backward-astar",
        "bidirectional",
        "hybrid",
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "bfs",
            Strategy::DepthFirst { .. } => "dfs",
            Strategy::Greedy => "greedy",
            Strategy::AStar => "astar",
            Strategy::BackwardBreadthFirst => "backward-bfs",
            Strategy::BackwardAStar => "backward-astar",
            Strategy::Bidirectional => "bidirectional",
            Strategy::Hybrid { .. } => "hybrid",
        }
    }

    /// Display name, as reported in [`SearchResult::strategy`].
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "BFS",
            Strategy::DepthFirst { .. } => "DFS",
            Strategy::Greedy => "Greedy",
            Strategy::AStar => "A*",
            Strategy::BackwardBreadthFirst => "Backward BFS",
            Strategy::BackwardAStar => "Backward A*",
            Strategy::Bidirectional => "Bidirectional",
            Strategy::Hybrid { .. } => "Hybrid",
        }
    }

    pub fn uses_heuristic(&self) -> bool {
        matches!(
            self,
            Strategy::Greedy
                | Strategy::AStar
                | Strategy::BackwardAStar
                | Strategy::Hybrid { .. }
        )
    }

    /// Whether the returned cost is optimal on unit-cost spaces, given an
    /// admissible heuristic where one is used.
    pub fn guarantees_optimal(&self) -> bool {
        matches!(
            self,
            Strategy::BreadthFirst
                | Strategy::AStar
                | Strategy::BackwardBreadthFirst
                | Strategy::BackwardAStar
        )
    }

    /// Replace default parameters with explicit ones where they apply.
    pub fn with_params(self, depth_limit: Option<usize>, bfs_depth: Option<usize>) -> Self {
        match self {
            Strategy::DepthFirst { depth_limit: current } => Strategy::DepthFirst {
                depth_limit: depth_limit.or(current),
            },
            Strategy::Hybrid { bfs_depth: current } => Strategy::Hybrid {
                bfs_depth: bfs_depth.unwrap_or(current),
            },
            other => other,
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bfs" => Ok(Strategy::BreadthFirst),
            "dfs" => Ok(Strategy::DepthFirst {
                depth_limit: Some(DEFAULT_DEPTH_LIMIT),
            }),
            "greedy" => Ok(Strategy::Greedy),
            "astar" => Ok(Strategy::AStar),
            "backward-bfs" => Ok(Strategy::BackwardBreadthFirst),
            "backward-astar" => Ok(Strategy::BackwardAStar),
            "bidirectional" => Ok(Strategy::Bidirectional),
            "hybrid" => Ok(Strategy::Hybrid {
                bfs_depth: DEFAULT_HYBRID_DEPTH,
            }),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

/// Run `strategy` from the model's initial state.
///
/// Backward strategies search from the goal set toward the initial state;
/// bidirectional search grows its backward half from one state of `goal`
/// (see [`GoalTest::canonical`]). Strategies that take no heuristic ignore
/// `heuristic`.
pub fn run_strategy<M, H>(
    model: &M,
    strategy: Strategy,
    goal: &GoalTest<M::State>,
    heuristic: H,
    limits: &SearchLimits,
) -> SearchResult<M::State>
where
    M: StateSpace,
    H: Fn(&M::State) -> u32,
{
    let start = model.initial_state();
    match strategy {
        Strategy::BreadthFirst => breadth_first(model, &start, goal, limits),
        Strategy::DepthFirst { depth_limit } => {
            depth_first(model, &start, goal, depth_limit, limits)
        }
        Strategy::Greedy => greedy_best_first(model, &start, goal, heuristic, limits),
        Strategy::AStar => a_star(model, &start, goal, heuristic, limits),
        Strategy::BackwardBreadthFirst => backward_breadth_first(model, goal, &start, limits),
        Strategy::BackwardAStar => backward_a_star(model, goal, &start, heuristic, limits),
        Strategy::Bidirectional => match goal.canonical(model) {
            Some(target) => bidirectional(model, &start, &target, limits),
            None => Run::new(strategy.name(), limits).finish(Err(Termination::FrontierExhausted)),
        },
        Strategy::Hybrid { bfs_depth } => {
            hybrid(model, &start, goal, bfs_depth, heuristic, limits)
        }
    }
}
