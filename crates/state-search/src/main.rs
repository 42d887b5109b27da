//! CLI entry point for state-space search.
//!
//! Usage:
//!   state-search search --domain jugs --strategy astar --heuristic difference
//!   state-search search --domain delivery --layout layout.json --strategy bfs
//!   state-search validate --domain delivery --heuristic distance
//!   state-search experiments --domain jugs
//!   state-search graph --domain jugs --capacities 5,3 --goal 4
//!   state-search heuristics --domain delivery
//!
//! Results are printed to stdout as JSON; logs go to stderr and follow
//! `RUST_LOG` (default `info`).

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use state_search::domains::{DeliveryLayout, DeliveryPuzzle, JugConfig, JugPuzzle};
use state_search::{
    delivery_battery, evaluate_heuristic, lookup, measuring_battery, run_battery, run_strategy,
    state_graph, Experiment, GoalTest, HeuristicCatalog, SearchLimits, SearchResult, Strategy,
    Termination,
};

#[derive(Parser)]
#[command(name = "state-search")]
#[command(about = "Instrumented state-space search over bundled puzzle domains")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Domain {
    /// Two-container measuring puzzle
    Jugs,
    /// Grid crate-delivery puzzle
    Delivery,
}

#[derive(Args)]
struct DomainArgs {
    #[arg(long, value_enum, default_value_t = Domain::Jugs)]
    domain: Domain,

    /// Path to a delivery layout JSON file
    #[arg(long, value_name = "FILE", conflicts_with = "stdin")]
    layout: Option<PathBuf>,

    /// Read the delivery layout from stdin
    #[arg(long)]
    stdin: bool,

    /// Container capacities as A,B
    #[arg(long, value_delimiter = ',')]
    capacities: Option<Vec<u32>>,

    /// Volume container A must end up holding
    #[arg(long)]
    goal: Option<u32>,
}

#[derive(Args)]
struct LimitArgs {
    /// Stop after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Stop after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl LimitArgs {
    fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self.max_expansions,
            timeout: self.timeout_ms.map(Duration::from_millis),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run one strategy from the initial state
    Search {
        #[command(flatten)]
        domain: DomainArgs,

        #[command(flatten)]
        limits: LimitArgs,

        /// Strategy key (bfs, dfs, greedy, astar, backward-bfs,
        /// backward-astar, bidirectional, hybrid)
        #[arg(long, default_value = "bfs")]
        strategy: String,

        /// Heuristic key for informed strategies
        #[arg(long)]
        heuristic: Option<String>,

        /// Depth bound for dfs
        #[arg(long)]
        depth_limit: Option<usize>,

        /// Breadth-first depth before hybrid switches to greedy
        #[arg(long)]
        bfs_depth: Option<usize>,

        /// Include the expansion order in the output
        #[arg(long)]
        trace: bool,
    },

    /// Check a heuristic for admissibility and consistency
    Validate {
        #[command(flatten)]
        domain: DomainArgs,

        #[arg(long)]
        heuristic: String,
    },

    /// Run the comparison battery for a domain
    Experiments {
        #[command(flatten)]
        domain: DomainArgs,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Export every state and transition
    Graph {
        #[command(flatten)]
        domain: DomainArgs,
    },

    /// List the heuristics a domain provides
    Heuristics {
        #[command(flatten)]
        domain: DomainArgs,
    },
}

/// Output format for a single search
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchOutput<S> {
    strategy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    heuristic: Option<String>,
    found: bool,
    termination: Termination,
    cost: u64,
    depth: usize,
    visited: usize,
    generated: usize,
    branching_factor: f64,
    time_elapsed_ms: u64,
    path: Vec<S>,
    actions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expansion_order: Option<Vec<S>>,
}

#[derive(Debug, Serialize)]
struct HeuristicEntry {
    key: &'static str,
    description: &'static str,
}

enum Model {
    Jugs(JugPuzzle),
    Delivery(DeliveryPuzzle),
}

struct SearchRequest {
    strategy: Strategy,
    heuristic: Option<String>,
    limits: SearchLimits,
    trace: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Dispatch a command; the returned flag becomes the exit status.
fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Search {
            domain,
            limits,
            strategy,
            heuristic,
            depth_limit,
            bfs_depth,
            trace,
        } => {
            let request = SearchRequest {
                strategy: strategy.parse::<Strategy>()?.with_params(depth_limit, bfs_depth),
                heuristic,
                limits: limits.limits(),
                trace,
            };
            match load(&domain)? {
                Model::Jugs(puzzle) => search(&puzzle, &request, "difference"),
                Model::Delivery(puzzle) => {
                    let fallback = if request.strategy == Strategy::BackwardAStar {
                        "start-distance"
                    } else {
                        "distance"
                    };
                    search(&puzzle, &request, fallback)
                }
            }
        }
        Commands::Validate { domain, heuristic } => match load(&domain)? {
            Model::Jugs(puzzle) => validate(&puzzle, &heuristic),
            Model::Delivery(puzzle) => validate(&puzzle, &heuristic),
        },
        Commands::Experiments { domain, limits } => match load(&domain)? {
            Model::Jugs(puzzle) => experiments(&puzzle, &measuring_battery(), &limits.limits()),
            Model::Delivery(puzzle) => {
                experiments(&puzzle, &delivery_battery(), &limits.limits())
            }
        },
        Commands::Graph { domain } => match load(&domain)? {
            Model::Jugs(puzzle) => print_json(&state_graph(&puzzle)),
            Model::Delivery(puzzle) => print_json(&state_graph(&puzzle)),
        },
        Commands::Heuristics { domain } => match load(&domain)? {
            Model::Jugs(_) => list_heuristics::<JugPuzzle>(),
            Model::Delivery(_) => list_heuristics::<DeliveryPuzzle>(),
        },
    }
}

fn load(args: &DomainArgs) -> anyhow::Result<Model> {
    match args.domain {
        Domain::Jugs => {
            let mut config = JugConfig::default();
            if let Some(capacities) = &args.capacities {
                match capacities.as_slice() {
                    &[a, b] => config.capacities = [a, b],
                    other => bail!("expected two capacities, got {}", other.len()),
                }
            }
            if let Some(goal) = args.goal {
                config.goal = goal;
            }
            Ok(Model::Jugs(JugPuzzle::new(config)?))
        }
        Domain::Delivery => {
            let layout = match read_layout(args)? {
                Some(json) => serde_json::from_str::<DeliveryLayout>(&json)
                    .context("failed to parse delivery layout JSON")?,
                None => DeliveryLayout::default(),
            };
            Ok(Model::Delivery(DeliveryPuzzle::new(layout)?))
        }
    }
}

/// Layout JSON from `--stdin` or `--layout`, if either was given.
fn read_layout(args: &DomainArgs) -> anyhow::Result<Option<String>> {
    if args.stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read layout from stdin")?;
        Ok(Some(buffer))
    } else if let Some(path) = &args.layout {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout file {}", path.display()))?;
        Ok(Some(json))
    } else {
        Ok(None)
    }
}

fn search<M>(model: &M, request: &SearchRequest, fallback: &str) -> anyhow::Result<bool>
where
    M: HeuristicCatalog,
    M::State: Serialize,
{
    let heuristic = if request.strategy.uses_heuristic() {
        let key = request.heuristic.as_deref().unwrap_or(fallback);
        Some(lookup::<M>(key)?)
    } else {
        None
    };
    let estimate = |state: &M::State| heuristic.map_or(0, |h| h.estimate(model, state));
    let goal = GoalTest::from_model(model);
    let result = run_strategy(model, request.strategy, &goal, estimate, &request.limits);

    let found = result.found;
    print_json(&format_result(
        result,
        heuristic.map(|h| h.key().to_string()),
        request.trace,
    ))?;
    Ok(found)
}

fn format_result<S: PartialEq>(
    result: SearchResult<S>,
    heuristic: Option<String>,
    trace: bool,
) -> SearchOutput<S> {
    SearchOutput {
        depth: result.depth(),
        branching_factor: result.branching_factor(),
        time_elapsed_ms: result.runtime.as_millis() as u64,
        strategy: result.strategy,
        heuristic,
        found: result.found,
        termination: result.termination,
        cost: result.cost,
        visited: result.visited,
        generated: result.generated,
        path: result.path,
        actions: result.actions,
        expansion_order: trace.then_some(result.expansion_order),
    }
}

fn validate<M: HeuristicCatalog>(model: &M, key: &str) -> anyhow::Result<bool> {
    let heuristic = lookup::<M>(key)?;
    let report = evaluate_heuristic(
        model,
        &GoalTest::from_model(model),
        heuristic.key(),
        heuristic.bind(model),
    );
    print_json(&report)?;
    Ok(report.admissible && report.consistent)
}

fn experiments<M: HeuristicCatalog>(
    model: &M,
    battery: &[Experiment],
    limits: &SearchLimits,
) -> anyhow::Result<bool> {
    let report = run_battery(model, battery, limits)?;
    print_json(&report)?;
    Ok(report.disagreements.is_empty())
}

fn list_heuristics<M: HeuristicCatalog>() -> anyhow::Result<bool> {
    let entries: Vec<HeuristicEntry> = M::heuristics()
        .iter()
        .map(|h| HeuristicEntry {
            key: h.key(),
            description: h.description(),
        })
        .collect();
    print_json(&entries)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<bool> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(true)
}
