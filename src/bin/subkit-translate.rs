use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use serde::Serialize;
use std::io::Read;
use std::process::ExitCode;
use subkit::logging::init_logging;
use subkit::subtitle::ClassifyMode;
use subkit::translate::LibreTranslateClient;
use subkit::{translate_subtitles, Config, TranslateOptions, TranslationReport};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "subkit-translate")]
#[command(version, about = "Translate the text lines of an SRT document")]
#[command(long_about = "Translate SRT subtitle text with a LibreTranslate-compatible service, keeping indices and timings intact, and print a JSON report.")]
struct Cli {
    /// SRT document text, or '-' to read it from stdin. It may start with a
    /// hyphen, so options go after it.
    #[arg(allow_hyphen_values = true)]
    srt_text: Option<String>,

    /// Target language name (e.g. Spanish) or code (e.g. es)
    target_language: Option<String>,

    /// Translation endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// API key for the translation service
    #[arg(long)]
    api_key: Option<String>,

    /// Index line detection: line-local or structural
    #[arg(long, default_value = "line-local")]
    mode: String,

    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,

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
                "message": "Invalid arguments. Usage: subkit-translate <srt_text> <target_language>",
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

fn read_content(srt_text: String) -> Result<String> {
    if srt_text != "-" {
        return Ok(srt_text);
    }
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read SRT from stdin")?;
    Ok(content)
}

async fn run(cli: Cli, srt_text: String, target_language: String) -> Result<TranslationReport> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(endpoint) = cli.endpoint {
        config.translate_url = endpoint;
    }
    if let Some(key) = cli.api_key {
        config.api_key = Some(key);
    }
    config.validate().context("Configuration validation failed")?;

    let mode: ClassifyMode = cli.mode.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let content = read_content(srt_text)?;

    info!("Endpoint: {}", config.translate_url);
    info!("Target:   {}", target_language);

    let translator = LibreTranslateClient::from_config(&config)?;
    let options = TranslateOptions {
        mode,
        show_progress: cli.progress,
        ..TranslateOptions::from_config(&config)
    };

    Ok(translate_subtitles(&content, &target_language, &translator, &options).await)
}

#[tokio::main]
async fn main() -> ExitCode {
    let mut cli = match parse_cli() {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    init_logging(cli.verbose);
    if !cli.extra.is_empty() {
        warn!("Ignoring extra arguments: {:?}", cli.extra);
    }

    let (Some(srt_text), Some(target_language)) = (cli.srt_text.take(), cli.target_language.take())
    else {
        print_json(&serde_json::json!({
            "success": false,
            "error": "Usage: subkit-translate <srt_text> <target_language>",
            "message": "Missing arguments",
        }));
        return ExitCode::from(1);
    };

    let report = match run(cli, srt_text, target_language).await {
        Ok(report) => report,
        Err(e) => TranslationReport::failure(format!("Error during translation: {e:#}"), format!("{e:#}")),
    };

    print_json(&report);
    ExitCode::SUCCESS
}
