//! apidump - decode an A53LITE API capture file
//!
//! Usage:
//!   apidump /data/dump_core0.bin
//!   apidump --json /data/dump_core0.bin > report.json
//!   apidump --config decoder.toml --log-level debug /data/dump_core0.bin

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use codec::{DecoderConfig, ReaderSource, StreamDecoder};
use render::{render_json, TextRenderer};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "apidump")]
#[command(about = "Decode A53LITE API message captures")]
#[command(version)]
struct Args {
    /// Capture file to decode
    file: PathBuf,

    /// Decoder configuration file (TOML); environment overrides apply otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit the full report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Enable JSON logging format
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args)?;

    let config = load_config(&args)?;
    info!("Decoder configuration: {:?}", config);

    let source = ReaderSource::open(&args.file)
        .with_context(|| format!("Failed to open capture {}", args.file.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.json {
        dump_json(&args, source, config, &mut out)?;
    } else {
        dump_text(&args, source, config, &mut out)?;
    }

    out.flush()?;
    Ok(())
}

/// Write the report as JSON, including the partial one left by a source failure
fn dump_json<R: io::Read, W: Write>(
    args: &Args,
    source: ReaderSource<R>,
    config: DecoderConfig,
    mut out: W,
) -> Result<()> {
    let (report, failure) = match StreamDecoder::with_config(source, config).finish() {
        Ok(report) => (report, None),
        Err(incomplete) => {
            let (report, e) = incomplete.into_parts();
            error!("{}", e);
            (report, Some(e))
        }
    };

    render_json(&mut out, &report).context("Failed to write JSON report")?;
    writeln!(out)?;
    out.flush()?;

    match failure {
        Some(e) => Err(e).with_context(|| format!("Failed to decode {}", args.file.display())),
        None => Ok(()),
    }
}

/// Render messages as they decode; on a source failure the summary of what
/// was decoded is still written before the error is returned
fn dump_text<R: io::Read, W: Write>(
    args: &Args,
    source: ReaderSource<R>,
    config: DecoderConfig,
    out: W,
) -> Result<()> {
    let mut renderer = TextRenderer::new(out);
    let mut decoder = StreamDecoder::with_config(source, config);

    renderer.preamble(
        &args.file.display().to_string(),
        decoder.report().source_len,
    )?;

    let mut failure = None;
    for item in decoder.by_ref() {
        match item {
            Ok(message) => renderer.message(&message)?,
            Err(e) => {
                error!("{}", e);
                failure = Some(e);
            }
        }
    }

    renderer.summary(decoder.report())?;

    match failure {
        Some(e) => Err(e).with_context(|| format!("Failed to decode {}", args.file.display())),
        None => Ok(()),
    }
}

fn load_config(args: &Args) -> Result<DecoderConfig> {
    let config = match &args.config {
        Some(path) => DecoderConfig::from_file(path)
            .with_context(|| format!("Failed to load decoder config {}", path.display()))?,
        None => DecoderConfig::from_env(),
    };
    config.validate().context("Invalid decoder configuration")?;
    Ok(config)
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(args.log_level.to_lowercase()))
        .context("Invalid log level")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}
