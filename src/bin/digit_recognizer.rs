//! Hopfield digit recognizer CLI
//!
//! Usage:
//!   cargo run --bin digit_recognizer                       # interactive menu
//!   cargo run --bin digit_recognizer -- recall --digits --pattern 11111001100110011110
//!   cargo run --bin digit_recognizer -- init-config --output hopfield.toml

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hopfield_digits::glyph::{digit_pattern, glyph_nodes, train_digits};
use hopfield_digits::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "digit_recognizer")]
#[command(about = "Hopfield network digit recognizer", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu on stdin/stdout (default)
    Shell,

    /// Train patterns and recall a single probe
    Recall(RecallArgs),

    /// Write the default configuration file
    InitConfig {
        #[arg(short, long, default_value = "hopfield.toml")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct RecallArgs {
    /// Probe pattern as a '0'/'1' string
    #[arg(short, long)]
    pattern: String,

    /// Training pattern (repeatable)
    #[arg(short, long)]
    train: Vec<String>,

    /// Train the ten builtin digit glyphs (requires 5x4 glyphs)
    #[arg(long)]
    digits: bool,

    /// Recall algorithm
    #[arg(short, long, value_enum, default_value_t = RecallMode::Async)]
    mode: RecallMode,

    /// Glyph columns; defaults to the configured value
    #[arg(long)]
    columns: Option<usize>,

    /// Flip this many random bits of the probe before recall
    #[arg(long, default_value = "0")]
    noise: usize,

    /// Seed for --noise
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Print every intermediate matrix
    #[arg(long)]
    show_math: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum RecallMode {
    /// One synchronous pass
    Sync,
    /// Asynchronous sweeps until stable
    Async,
}

fn parse_level(s: &str) -> Level {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Filter used when RUST_LOG is unset
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::new(parse_level(level).as_str().to_ascii_lowercase())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    // RUST_LOG wins over --log-level and the config file.
    // Logs go to stderr so stdout stays the transcript
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut session = Session::new(stdin.lock(), stdout.lock(), config);
            session.run()?;
        }
        Commands::Recall(args) => run_recall(&config, &args)?,
        Commands::InitConfig { output } => {
            Config::default().save(&output)?;
            println!("Wrote default configuration to {}", output.display());
        }
    }

    Ok(())
}

fn run_recall(config: &Config, args: &RecallArgs) -> Result<()> {
    let rows = config.glyph.rows;
    let columns = args.columns.unwrap_or(config.glyph.columns);
    let size = glyph_nodes(rows, columns).ok_or(Error::InvalidNodeCount(
        rows.saturating_mul(columns),
    ))?;

    let mut network = HopfieldNetwork::with_config(size, config.recall.clone())?;

    let mut transcript = MathTranscript::new();
    let mut silent = Silent;
    let observer: &mut dyn NetworkObserver = if args.show_math {
        &mut transcript
    } else {
        &mut silent
    };

    if args.digits {
        train_digits(&mut network).context("Builtin digits need a 5x4 glyph")?;
    }
    for text in &args.train {
        let pattern = parse_pattern(text, size)?;
        network.train_with(&pattern, observer)?;
    }
    info!(
        patterns = network.pattern_count(),
        capacity = network.capacity_estimate(),
        "Training complete"
    );

    let mut probe = parse_pattern(&args.pattern, size)?;
    if args.noise > 0 {
        let mut rng = StdRng::seed_from_u64(args.seed);
        probe = flip_bits(&probe, args.noise, &mut rng);
    }

    let (output, sweeps, converged) = match args.mode {
        RecallMode::Sync => (network.recognize_with(&probe, observer)?, Vec::new(), true),
        RecallMode::Async => {
            let result = network.recall_async_with(&probe, observer)?;
            (result.pattern, result.sweeps, result.converged)
        }
    };

    print!("{}", transcript.as_str());
    for report in &sweeps {
        println!(
            "Sweep {:>3}: {:>3} change(s), energy {}",
            report.sweep, report.changes, report.energy
        );
    }
    if !converged {
        println!("Stopped at the sweep cap before converging");
    }

    println!("Input pattern:");
    print!("{}", render_grid(&probe, rows)?);
    println!("Output pattern:");
    print!("{}", render_grid(&output, rows)?);
    println!("Output: {}", format_pattern(&output));

    if args.digits {
        let matched =
            (0..DIGIT_PATTERNS.len()).find(|&d| digit_pattern(d).as_deref() == Some(&output[..]));
        match matched {
            Some(digit) => println!("Matched digit: {}", digit),
            None => println!("No builtin digit matched (spurious state)"),
        }
    }

    Ok(())
}
