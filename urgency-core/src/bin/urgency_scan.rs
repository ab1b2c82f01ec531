//! Complaint urgency scanner.
//!
//! Runs the urgency engine over ad-hoc texts or over a batch of complaint
//! records exported from the complaint store.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze one or more texts
//! urgency_scan --lexicon vader_lexicon.txt analyze "please help now" "all good"
//!
//! # Build the urgent queue from a JSON array of complaint records
//! urgency_scan --lexicon vader_lexicon.txt queue --input complaints.json
//!
//! # Same, reading records from stdin and printing JSON
//! cat complaints.json | urgency_scan --config engine.toml --format json queue
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).
//! The exit code is 2 when the lexicon cannot be loaded.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use urgency_core::{
    AnalysisResult, AnalyzeError, ComplaintRecord, EngineConfig, MatchMode, UrgencyEngine,
    UrgentQueue,
};

#[derive(Parser)]
#[command(name = "urgency_scan")]
#[command(version)]
#[command(about = "Flag complaint narratives that need immediate attention")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Lexicon file (overrides the config file)
    #[arg(long, short, global = true)]
    lexicon: Option<PathBuf>,

    /// Engine configuration (TOML)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Match keywords against whole tokens instead of substrings
    #[arg(long, global = true)]
    exact: bool,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze complaint texts given on the command line
    Analyze {
        /// Complaint texts
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Build the urgent queue from a JSON array of complaint records
    Queue {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if e.downcast_ref::<AnalyzeError>().is_some() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let engine = build_engine(&cli)?;

    match cli.command {
        Commands::Analyze { texts } => {
            let mut results = Vec::with_capacity(texts.len());
            for text in &texts {
                results.push(engine.analyze(Some(text.as_str())).await?);
            }
            print_analyses(cli.format, &texts, &results)?;
        }
        Commands::Queue { input } => {
            let records = read_records(input.as_ref())?;
            let total = records.len();
            let queue = UrgentQueue::build(&engine, records).await?;
            print_queue(cli.format, total, &queue)?;
        }
    }

    Ok(())
}

fn build_engine(cli: &Cli) -> Result<UrgencyEngine> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(lexicon) = &cli.lexicon {
        config.lexicon_path = Some(lexicon.clone());
    }
    if cli.exact {
        config.match_mode = MatchMode::ExactToken;
    }
    Ok(config.build_engine()?)
}

fn read_records(input: Option<&PathBuf>) -> Result<Vec<ComplaintRecord>> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading complaint records from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("complaint records must be a JSON array")
}

fn print_analyses(
    format: OutputFormat,
    texts: &[String],
    results: &[Option<AnalysisResult>],
) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    for (text, result) in texts.iter().zip(results) {
        println!("--------------------------------");
        match result {
            Some(r) => {
                println!("Urgency     : {}", r.urgency);
                println!("Sentiment   : {}", r.sentiment);
                println!("Score       : {:.3}", r.score);
            }
            None => println!("Urgency     : -"),
        }
        println!("Text        : {}", text);
    }
    println!("--------------------------------");
    Ok(())
}

fn print_queue(format: OutputFormat, total: usize, queue: &UrgentQueue) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(queue)?);
        return Ok(());
    }

    let counts = queue.counts();
    println!("Records     : {}", total);
    println!("Critical    : {}", counts.critical);
    println!("High        : {}", counts.high);

    for item in queue.iter() {
        println!("--------------------------------");
        println!("Priority    : {}", item.priority);
        println!("Id          : {}", item.id.as_deref().unwrap_or("N/A"));
        println!("Category    : {}", item.category.as_deref().unwrap_or("Uncategorized"));
        println!("Submitted   : {}", item.submission_date.as_deref().unwrap_or("N/A"));
        println!("Snippet     : {}", item.snippet);
    }
    if queue.is_empty() {
        println!("No urgent complaints found");
    } else {
        println!("--------------------------------");
    }
    Ok(())
}
