//! `flowline`: solve a graph description from the command line.
//!
//! Prints the best score on stdout. Progress goes to stderr via `tracing`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::Level;
use tracing_subscriber::prelude::*;

use flowline_harness::runner::{run_file, RunConfig};
use flowline_search::policy::{SearchPolicyV1, TraversalV1};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Traversal {
    Bfs,
    Dfs,
}

#[derive(Debug, Parser)]
#[command(name = "flowline", version, about = "Maximize accrued reward over a bounded horizon")]
struct Cli {
    #[arg(long, help = "Path to the graph description")]
    input: PathBuf,

    #[arg(long, default_value = "AA", help = "Start node id")]
    start: String,

    #[arg(long, default_value_t = 1, help = "Number of agents")]
    agents: usize,

    #[arg(long, default_value_t = 30, help = "Number of ticks")]
    horizon: u32,

    #[arg(long, value_enum, default_value = "bfs", help = "Traversal order")]
    traversal: Traversal,

    #[arg(long, help = "Expand breadth-first levels in parallel")]
    parallel: bool,

    #[arg(long, help = "Stop after this many expansions")]
    max_expansions: Option<u64>,

    #[arg(long, help = "Stop when the frontier exceeds this many states")]
    max_frontier: Option<u64>,

    #[arg(long, help = "Wall-clock limit in milliseconds")]
    time_limit_ms: Option<u64>,

    #[arg(long, help = "Write the canonical JSON report here")]
    report: Option<PathBuf>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = RunConfig {
        start: cli.start,
        agent_count: cli.agents,
        horizon: cli.horizon,
        policy: SearchPolicyV1 {
            traversal: match cli.traversal {
                Traversal::Bfs => TraversalV1::BreadthFirst,
                Traversal::Dfs => TraversalV1::DepthFirst,
            },
            parallel_expansion: cli.parallel,
            max_expansions: cli.max_expansions,
            max_frontier_size: cli.max_frontier,
            time_limit: cli.time_limit_ms.map(Duration::from_millis),
            ..SearchPolicyV1::default()
        },
    };

    let output = run_file(&cli.input, &config)
        .with_context(|| format!("solving {}", cli.input.display()))?;

    if let Some(path) = &cli.report {
        std::fs::write(path, &output.report_bytes)
            .with_context(|| format!("writing report to {}", path.display()))?;
        tracing::info!(path = %path.display(), digest = %output.report_digest, "report written");
    }
    if !output.outcome.exact {
        tracing::warn!(
            termination = output.outcome.termination.as_str(),
            "search stopped early; score is a lower bound"
        );
    }

    println!("{}", output.outcome.best_score);
    Ok(())
}
