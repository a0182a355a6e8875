use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use subkit::logging::init_logging;
use subkit::media::ProcessRunner;
use subkit::{extract_subtitles, Config, ExtractionReport};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "subkit-extract")]
#[command(version, about = "Extract subtitle streams from a media container")]
#[command(long_about = "Extract every subtitle stream from a media container with FFmpeg and print a JSON report.")]
struct Cli {
    /// Media container (e.g. an MKV file)
    container: Option<PathBuf>,

    /// Directory for the extracted subtitle files
    output_dir: Option<PathBuf>,

    /// Timeout for each ffmpeg/ffprobe call, in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Extra positional arguments are ignored
    #[arg(hide = true)]
    extra: Vec<String>,
}

/// Parse the command line. Help and version exit through clap; any other
/// parse error becomes a JSON report on stdout.
fn parse_cli() -> std::result::Result<Cli, ExitCode> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            print_json(&serde_json::json!({
                "success": false,
                "error": e.to_string().trim(),
                "message": "Invalid arguments. Usage: subkit-extract <container_path> <output_dir>",
            }));
            Err(ExitCode::from(1))
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => println!(
            "{}",
            serde_json::json!({ "success": false, "error": e.to_string() })
        ),
    }
}

async fn run(container: &Path, output_dir: &Path, timeout: Option<u64>) -> Result<ExtractionReport> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(secs) = timeout {
        config.tool_timeout_secs = secs;
    }
    config.validate().context("Configuration validation failed")?;

    info!("Input:  {}", container.display());
    info!("Output: {}", output_dir.display());

    let runner = ProcessRunner::new(config.tool_timeout());
    Ok(extract_subtitles(container, output_dir, &config, &runner).await)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match parse_cli() {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    init_logging(cli.verbose);
    if !cli.extra.is_empty() {
        warn!("Ignoring extra arguments: {:?}", cli.extra);
    }

    let (Some(container), Some(output_dir)) = (cli.container, cli.output_dir) else {
        print_json(&serde_json::json!({
            "success": false,
            "error": "Usage: subkit-extract <container_path> <output_dir>",
            "message": "Missing arguments",
        }));
        return ExitCode::from(1);
    };

    let report = match run(&container, &output_dir, cli.timeout).await {
        Ok(report) => report,
        Err(e) => ExtractionReport::failure(format!("Error during extraction: {e:#}"), format!("{e:#}")),
    };

    print_json(&report);
    ExitCode::SUCCESS
}
