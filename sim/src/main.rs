//! MARKOV SIM: simulate a robot in a circular wall/door corridor and localize it with a
//! discrete Bayes filter.
//!
//! Each time step the simulated robot tries to move one cell forward and reads a noisy
//! wall/door sensor. The filter only sees the readings. One trace line is printed per step:
//!
//! ```text
//! step true_location "most_likely" belief_0 ... belief_{N-1} observation moved sensed_correctly
//! ```
//!
//! You can run simulations either by:
//!   1. Loading all parameters from a configuration file (TOML/JSON/YAML)
//!   2. Specifying parameters via command-line flags
mod common;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use common::{init_logger, is_config_file, validate_output_file};
use log::info;
use markov::corridor::CorridorLayout;
use markov::filter::UpdateOrder;
use markov::model::LabelProbabilities;
use markov::report::{TraceFormat, TraceReporter};
use markov::sim::{LoggingConfig, Simulation, SimulationConfig, SimulationResult};

const LONG_ABOUT: &str =
    "MARKOV SIM: simulate a robot in a circular wall/door corridor and localize it with a discrete Bayes filter.

Each time step the robot tries to move one cell forward (which may fail) and takes a noisy
wall/door reading. The filter never sees the true location, only the readings.

You can run simulations either by:
  1. Loading all parameters from a configuration file (TOML/JSON/YAML)
  2. Specifying parameters via command-line flags";

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about = "Discrete Markov localization in a wall/door corridor.", long_about = LONG_ABOUT)]
struct Cli {
    /// Run simulation from a configuration file (TOML/JSON/YAML)
    /// This option overrides any subcommand arguments
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Command to execute (ignored if --config is provided)
    #[command(subcommand)]
    command: Option<Command>,

    /// Also write the step records to this CSV file
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Log file path (if not specified, logs to stderr)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

/// Top-level commands
#[derive(Subcommand, Clone)]
enum Command {
    #[command(
        name = "run",
        about = "Run a simulation from command line flags",
        long_about = "Run a simulation from command line flags. Every flag has a default, so `markov-sim run` on its own simulates ten steps in the ten-cell debug corridor."
    )]
    Run(RunArgs),

    #[command(name = "config", about = "Generate a template configuration file")]
    CreateConfig(CreateConfigArgs),
}

/// Named corridor layouts selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LayoutPreset {
    /// Thirty cells with three doors (Probabilistic Robotics, Figure 1.1)
    Textbook,
    /// Ten cells with four doors
    Debug,
    /// One door followed by walls; length set by --length
    SingleDoor,
}

/// Simulation parameters
#[derive(Args, Clone, Debug)]
struct RunArgs {
    /// Preset corridor layout
    #[arg(long, value_enum, default_value_t = LayoutPreset::Debug)]
    layout: LayoutPreset,

    /// Corridor length for the single-door layout
    #[arg(long, default_value_t = 10)]
    length: usize,

    /// Explicit corridor as a string of W/D characters; overrides --layout
    #[arg(long)]
    corridor: Option<String>,

    /// Number of time steps
    #[arg(short = 'n', long, default_value_t = 10)]
    steps: usize,

    /// Random number generator seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Probability that a move attempted from a wall cell succeeds
    #[arg(long, default_value_t = 0.999)]
    move_wall: f64,

    /// Probability that a move attempted from a door cell succeeds
    #[arg(long, default_value_t = 0.999)]
    move_door: f64,

    /// Probability that a wall cell is sensed as a wall
    #[arg(long, default_value_t = 0.999)]
    sense_wall: f64,

    /// Probability that a door cell is sensed as a door
    #[arg(long, default_value_t = 0.999)]
    sense_door: f64,

    /// Order of the predict and update steps
    #[arg(long, value_enum, default_value_t = UpdateOrder::PredictThenUpdate)]
    order: UpdateOrder,

    /// Skip the motion model on the last step (update-then-predict only)
    #[arg(long)]
    skip_final_predict: bool,

    /// Fixed start cell; drawn at random when omitted
    #[arg(long)]
    start: Option<usize>,

    /// Absolute tolerance for reporting tied most likely cells
    #[arg(long, default_value_t = 0.01)]
    tolerance: f64,

    /// Leave the quoted most-likely set out of the trace
    #[arg(long)]
    no_prediction: bool,

    /// Decimal places for belief values in the trace
    #[arg(long, default_value_t = 6)]
    precision: usize,
}
impl RunArgs {
    fn to_config(&self) -> SimulationConfig {
        let layout = match (&self.corridor, self.layout) {
            (Some(cells), _) => CorridorLayout::Custom {
                cells: cells.clone(),
            },
            (None, LayoutPreset::Textbook) => CorridorLayout::Textbook,
            (None, LayoutPreset::Debug) => CorridorLayout::Debug,
            (None, LayoutPreset::SingleDoor) => CorridorLayout::SingleDoor {
                length: self.length,
            },
        };
        SimulationConfig {
            layout,
            steps: self.steps,
            seed: self.seed,
            motion: LabelProbabilities::new(self.move_wall, self.move_door),
            sensor: LabelProbabilities::new(self.sense_wall, self.sense_door),
            order: self.order,
            skip_final_predict: self.skip_final_predict,
            tolerance: self.tolerance,
            start_location: self.start,
            trace: TraceFormat {
                report_prediction: !self.no_prediction,
                precision: self.precision,
            },
            logging: LoggingConfig::default(),
        }
    }
}

/// Arguments for create-config command
#[derive(Args, Clone, Debug)]
struct CreateConfigArgs {
    /// Output file path for the config file
    /// File extension determines format: .json, .yaml/.yml, or .toml (recommended)
    #[arg(short = 'f', long = "file", value_parser)]
    file: PathBuf,

    /// Parameters written to the template
    #[command(flatten)]
    run: RunArgs,
}

/// Run a simulation, streaming trace lines to `out` and optionally writing a CSV.
fn run_simulation_cli<W: Write>(
    config: &SimulationConfig,
    output: Option<&Path>,
    out: W,
) -> Result<SimulationResult> {
    if let Some(path) = output {
        validate_output_file(path)?;
    }
    let simulation = Simulation::new(config).context("invalid simulation configuration")?;
    let mut reporter = TraceReporter::new(out, config.trace);
    let mut result = SimulationResult::new("Markov Localization");
    for record in simulation {
        reporter.report(&record).context("writing trace line")?;
        result.records.push(record);
    }
    reporter.flush()?;
    result.log_summary();

    if let Some(path) = output {
        result
            .to_csv(path)
            .with_context(|| format!("writing results to '{}'", path.display()))?;
        info!("Results written to {}", path.display());
    }
    Ok(result)
}

/// Run a configuration loaded from file, tracing to stdout.
fn run_from_config(config: &SimulationConfig, output: Option<&Path>) -> Result<()> {
    let stdout = io::stdout();
    run_simulation_cli(config, output, stdout.lock())?;
    Ok(())
}

/// Write a configuration template built from the given flags.
fn create_config_file(args: &CreateConfigArgs) -> Result<()> {
    if !is_config_file(&args.file) {
        bail!(
            "Unsupported configuration extension for '{}'; use .toml, .json, .yaml or .yml",
            args.file.display()
        );
    }
    let config = args.run.to_config();
    config.validate().context("template parameters are invalid")?;
    config
        .to_file(&args.file)
        .with_context(|| format!("writing configuration to '{}'", args.file.display()))?;
    info!("Configuration template written to {}", args.file.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // If --config is provided, load config and potentially override logger with config values
    if let Some(ref config_path) = cli.config {
        let config = SimulationConfig::from_file(config_path)
            .with_context(|| format!("reading configuration '{}'", config_path.display()))?;

        // Config file sets the level; a CLI log file takes precedence over the configured one
        let config_log_file = config.logging.file.as_ref().map(PathBuf::from);
        let log_file = cli.log_file.as_ref().or(config_log_file.as_ref());
        init_logger(&config.logging.level, log_file)?;

        info!("Running simulation from {}", config_path.display());
        return run_from_config(&config, cli.output.as_deref());
    }

    // Initialize logger with CLI settings for command-line mode
    init_logger(&cli.log_level, cli.log_file.as_ref())?;

    match cli.command {
        Some(Command::Run(args)) => {
            let stdout = io::stdout();
            run_simulation_cli(&args.to_config(), cli.output.as_deref(), stdout.lock())?;
            Ok(())
        }
        Some(Command::CreateConfig(args)) => create_config_file(&args),
        None => {
            eprintln!("Error: No command provided. Use -h or --help for usage information.");
            std::process::exit(1);
        }
    }
}
