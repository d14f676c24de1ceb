//! tsp-search CLI: exact tour search over a comma-separated cost matrix.

use clap::{Parser, ValueEnum};
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;
use u_tsp::astar::{AStarConfig, AStarRunner, HeuristicKind, PruningRule};
use u_tsp::dfs::{DfsConfig, DfsRunner};
use u_tsp::exhaustive::ExhaustiveRunner;
use u_tsp::io::{load_matrix, FileSink, ResultSink, SearchReport, WriterSink};
use u_tsp::TspResult;

#[derive(Parser)]
#[command(name = "tsp-search")]
#[command(about = "Exact traveling salesman search over a cost matrix")]
#[command(version)]
struct Cli {
    /// Cost matrix file: one comma-separated row per city
    input: PathBuf,

    /// Search strategy
    #[arg(short, long, value_enum, default_value_t = Algorithm::Astar)]
    algorithm: Algorithm,

    /// Lower bound used by the A* search
    #[arg(long, value_enum, default_value_t = HeuristicArg::Nearest)]
    heuristic: HeuristicArg,

    /// Branch-and-bound cutoff
    #[arg(long, value_enum, default_value_t = PruningArg::PartialCost)]
    pruning: PruningArg,

    /// City every tour starts and ends at
    #[arg(long, default_value_t = 0)]
    origin: usize,

    /// Stop after this many milliseconds and report the best tour so far
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Also write the report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log verbosity on stderr
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum Algorithm {
    Astar,
    Dfs,
    Exhaustive,
}

#[derive(Clone, Copy, ValueEnum)]
enum HeuristicArg {
    Nearest,
    MinIncoming,
    Zero,
}

impl From<HeuristicArg> for HeuristicKind {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Nearest => HeuristicKind::NearestUnvisited,
            HeuristicArg::MinIncoming => HeuristicKind::MinIncomingEdges,
            HeuristicArg::Zero => HeuristicKind::Zero,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PruningArg {
    Disabled,
    PartialCost,
    Estimate,
}

impl From<PruningArg> for PruningRule {
    fn from(arg: PruningArg) -> Self {
        match arg {
            PruningArg::Disabled => PruningRule::Disabled,
            PruningArg::PartialCost => PruningRule::PartialCost,
            PruningArg::Estimate => PruningRule::Estimate,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn init_logger(level: LogLevel) {
    let mut builder = Builder::new();
    builder
        .filter_level(level.to_filter())
        .target(Target::Stderr)
        .format(|buf, record| writeln!(buf, "{} {}", record.level(), record.args()));
    if builder.try_init().is_err() {
        log::debug!("logger already installed, keeping it");
    }
}

fn run(cli: &Cli) -> TspResult<()> {
    let matrix = load_matrix(&cli.input)?;

    let report = match cli.algorithm {
        Algorithm::Astar => {
            let config = AStarConfig {
                time_limit_ms: cli.time_limit_ms,
                ..AStarConfig::default()
            }
            .with_origin(cli.origin)
            .with_heuristic(cli.heuristic.into())
            .with_pruning(cli.pruning.into());
            SearchReport::from(&AStarRunner::run(&matrix, &config)?)
        }
        Algorithm::Dfs => {
            let config = DfsConfig {
                time_limit_ms: cli.time_limit_ms,
                ..DfsConfig::default()
            }
            .with_origin(cli.origin)
            .with_pruning(!matches!(cli.pruning, PruningArg::Disabled));
            SearchReport::from(&DfsRunner::run(&matrix, &config)?)
        }
        Algorithm::Exhaustive => {
            SearchReport::from(&ExhaustiveRunner::solve(&matrix, cli.origin)?)
        }
    };

    WriterSink::new(std::io::stdout().lock()).accept(&report)?;
    if let Some(path) = &cli.output {
        FileSink::new(path.clone()).accept(&report)?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.log_level);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
