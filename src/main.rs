//! route-optimizer command line interface.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use env_logger::{Builder, Target};
use log::{error, LevelFilter};

use route_optimizer::config::{DepotRef, SolverConfig, Strategy};
use route_optimizer::demo::random_instance;
use route_optimizer::io::{load_matrix, write_matrix, write_raw_matrix, MatrixFormat};
use route_optimizer::report::Report;
use route_optimizer::solver::Solver;

/// Exit status when the instance has no feasible solution.
const EXIT_INFEASIBLE: u8 = 2;

#[derive(Parser)]
#[command(name = "route-optimizer")]
#[command(version)]
#[command(about = "Assigns delivery stops to a fixed fleet and orders each vehicle's tour")]
struct Cli {
    /// Logging verbosity; RUST_LOG overrides it
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an instance given as a CSV cost matrix
    Solve {
        /// CSV file holding the N×N cost matrix
        #[arg(short, long)]
        matrix: PathBuf,

        /// Number of vehicles
        #[arg(short, long)]
        vehicles: Option<usize>,

        /// Depot location, by label or by row index
        #[arg(short, long)]
        depot: Option<DepotRef>,

        /// Assignment strategy
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Apply 2-opt to each route after construction
        #[arg(long)]
        improve: bool,

        /// Matrix layout
        #[arg(long, value_enum)]
        matrix_format: Option<MatrixFormatArg>,

        /// JSON configuration file; flags given on the command line win
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print a random symmetric instance as CSV
    Generate {
        /// Number of locations, depot included
        #[arg(short, long)]
        locations: usize,

        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Omit the header row and label column
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    CheapestArc,
    NearestNeighbor,
    Sequential,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::CheapestArc => Strategy::CheapestArc,
            StrategyArg::NearestNeighbor => Strategy::NearestNeighbor,
            StrategyArg::Sequential => Strategy::Sequential,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MatrixFormatArg {
    Auto,
    Labeled,
    Raw,
}

impl From<MatrixFormatArg> for MatrixFormat {
    fn from(arg: MatrixFormatArg) -> Self {
        match arg {
            MatrixFormatArg::Auto => MatrixFormat::Auto,
            MatrixFormatArg::Labeled => MatrixFormat::Labeled,
            MatrixFormatArg::Raw => MatrixFormat::Raw,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn init_logger(level: LogLevel) {
    Builder::new()
        .filter_level(level.to_filter())
        .parse_default_env()
        .target(Target::Stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.log_level);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> route_optimizer::Result<ExitCode> {
    match command {
        Commands::Solve {
            matrix,
            vehicles,
            depot,
            strategy,
            improve,
            matrix_format,
            config,
            format,
        } => {
            let mut settings = match config {
                Some(path) => SolverConfig::from_file(path)?,
                None => SolverConfig::default(),
            };
            if let Some(vehicles) = vehicles {
                settings.vehicles = vehicles;
            }
            if let Some(depot) = depot {
                settings.depot = depot;
            }
            if let Some(strategy) = strategy {
                settings.strategy = strategy.into();
            }
            if let Some(matrix_format) = matrix_format {
                settings.matrix_format = matrix_format.into();
            }
            settings.improve |= improve;

            let solver = Solver::new(settings)?;
            let config = solver.config();
            let problem = load_matrix(&matrix, config.matrix_format)?.into_problem(&config.depot)?;
            let outcome = solver.solve(&problem)?;
            let report = Report::new(&problem, &outcome, config.strategy);

            match format {
                OutputFormat::Text => print!("{report}"),
                OutputFormat::Json => println!("{}", report.to_json()?),
            }

            Ok(if report.feasible {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_INFEASIBLE)
            })
        }
        Commands::Generate {
            locations,
            seed,
            raw,
        } => {
            let instance = random_instance(locations, seed)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if raw {
                write_raw_matrix(&mut out, &instance.matrix)?;
            } else {
                write_matrix(&mut out, &instance.labels, &instance.matrix)?;
            }
            out.flush()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
