//! Querysplit CLI
//!
//! Command-line interface for query preparation:
//! - Split metric and log query ranges into chunks
//! - Compile trace filter rows into TraceQL
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use querysplit::config::{generate_default_config, Config};
use querysplit::logging::init_tracing;
use querysplit::split::{parse_duration, parse_timestamp, Chunk, RangeChunker, TimeRange};
use querysplit::traceql::{self, FilterDescriptor};

/// Exit code when a range cannot be split within the limits
const EXIT_UNSPLITTABLE: u8 = 2;

#[derive(Parser)]
#[command(name = "querysplit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Split query ranges into chunks and compile trace filters")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a metric query range into step-aligned chunks
    Split {
        /// Range start: epoch ms, "now-1h", or ISO 8601
        #[arg(long)]
        start: String,
        /// Range end: epoch ms, "now", or ISO 8601
        #[arg(long, default_value = "now")]
        end: String,
        /// Query step (e.g. 10s, 1m, 15000)
        #[arg(long)]
        step: String,
        /// Largest chunk span (e.g. 1h, 30m)
        #[arg(long)]
        max_chunk: String,
    },

    /// Split a log query range into contiguous chunks
    SplitLogs {
        /// Range start: epoch ms, "now-1h", or ISO 8601
        #[arg(long)]
        start: String,
        /// Range end: epoch ms, "now", or ISO 8601
        #[arg(long, default_value = "now")]
        end: String,
        /// Chunk span (e.g. 1h, 30m)
        #[arg(long)]
        chunk: String,
    },

    /// Compile a JSON array of filter rows into a TraceQL query
    Traceql {
        /// JSON file with filter rows (default: stdin)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    let chunker = config.split.chunker();

    let status = run(
        cli.command,
        cli.format,
        &chunker,
        std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;

    Ok(ExitCode::from(status))
}

/// Execute one command, returning the process exit status
fn run<R: Read, W: Write, E: Write>(
    command: Commands,
    format: OutputFormat,
    chunker: &RangeChunker,
    mut stdin: R,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<u8> {
    match command {
        Commands::Split {
            start,
            end,
            step,
            max_chunk,
        } => {
            let range = parse_range(&start, &end)?;
            let step = parse_duration(&step)?;
            let max_chunk = parse_duration(&max_chunk)?;

            let chunks = chunker.chunk_range(range, step, max_chunk);
            write_chunks(out, err, chunks.as_deref(), chunker, format)
        }

        Commands::SplitLogs { start, end, chunk } => {
            let range = parse_range(&start, &end)?;
            let chunk = parse_duration(&chunk)?;

            let chunks = chunker.log_chunks_range(range, chunk);
            write_chunks(out, err, chunks.as_deref(), chunker, format)
        }

        Commands::Traceql { file } => {
            let input = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    stdin
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };

            let query = traceql::compile(&read_filters(&input)?);

            match format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::json!({ "query": query }))?,
                OutputFormat::Table => writeln!(out, "{}", query)?,
            }
            Ok(0)
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            if let Some(path) = output {
                std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                writeln!(out, "Config written to {}", path.display())?;
            } else {
                write!(out, "{}", content)?;
            }
            Ok(0)
        }
    }
}

fn parse_range(start: &str, end: &str) -> anyhow::Result<TimeRange> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;

    TimeRange::try_new(start, end)
        .with_context(|| format!("Range start {} is after end {}", start, end))
}

/// Parse a JSON array of filter rows, skipping malformed rows
fn read_filters(input: &str) -> anyhow::Result<Vec<FilterDescriptor>> {
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(input).context("Expected a JSON array of filter rows")?;
    Ok(traceql::rows_from_json(rows))
}

/// Write split results, returning the exit status
fn write_chunks<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    chunks: Option<&[Chunk]>,
    chunker: &RangeChunker,
    format: OutputFormat,
) -> anyhow::Result<u8> {
    let Some(chunks) = chunks else {
        writeln!(
            err,
            "Cannot split range: chunk size is below the step, the range is empty, \
             or more than {} chunks would be needed",
            chunker.max_chunk_count()
        )?;
        if format == OutputFormat::Json {
            writeln!(out, "null")?;
        }
        return Ok(EXIT_UNSPLITTABLE);
    };

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(chunks)?)?,
        OutputFormat::Table => {
            writeln!(out, "{:>4}  {:<26}  {:<26}  {:>10}", "#", "START", "END", "SPAN")?;
            for (i, chunk) in chunks.iter().enumerate() {
                writeln!(
                    out,
                    "{:>4}  {:<26}  {:<26}  {:>10}",
                    i + 1,
                    format_timestamp(chunk.start),
                    format_timestamp(chunk.end),
                    format!("{}ms", chunk.duration_millis())
                )?;
            }
            writeln!(out, "{} chunk(s)", chunks.len())?;
        }
    }

    Ok(0)
}

fn format_timestamp(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
        .unwrap_or_else(|| ms.to_string())
}
