use crate::config::Config;
use crate::error::{Result, SubkitError};
use crate::media::{
    check_tool, extract_all, probe_subtitle_streams, ExtractedSubtitle, ToolRunner,
};
use crate::subtitle::{classify_lines, ClassifyMode};
use crate::translate::{resolve_language_code, translate_or_original, Translator};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of extracting every subtitle stream from one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub success: bool,
    pub message: String,
    pub subtitles: Vec<ExtractedSubtitle>,
    pub error: Option<String>,
}

impl ExtractionReport {
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            subtitles: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Result of translating one SRT document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationReport {
    pub success: bool,
    pub message: String,
    pub translated_content: String,
    pub error: Option<String>,
}

impl TranslationReport {
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            translated_content: String::new(),
            error: Some(error.into()),
        }
    }
}

/// Extract every subtitle stream of `input` into `output_dir`.
///
/// Never fails: a missing input, a broken probe or any unexpected error comes
/// back as a report with `success == false`. Individual streams that cannot be
/// extracted are skipped and only shorten `subtitles`.
pub async fn extract_subtitles(
    input: &Path,
    output_dir: &Path,
    config: &Config,
    runner: &dyn ToolRunner,
) -> ExtractionReport {
    match run_extraction(input, output_dir, config, runner).await {
        Ok(report) => report,
        Err(e @ SubkitError::FileNotFound(_)) => {
            ExtractionReport::failure("Input file does not exist", e.to_string())
        }
        Err(e @ SubkitError::ToolUnavailable(_)) => {
            ExtractionReport::failure("FFmpeg is not installed or not runnable", e.to_string())
        }
        Err(e @ SubkitError::Probe(_)) => {
            ExtractionReport::failure("Failed to probe media container", e.to_string())
        }
        Err(e) => ExtractionReport::failure(format!("Error during extraction: {e}"), e.to_string()),
    }
}

async fn run_extraction(
    input: &Path,
    output_dir: &Path,
    config: &Config,
    runner: &dyn ToolRunner,
) -> Result<ExtractionReport> {
    let start_time = Instant::now();

    if !input.exists() {
        return Err(SubkitError::FileNotFound(input.display().to_string()));
    }

    check_tool(runner, &config.ffprobe_path).await?;
    check_tool(runner, &config.ffmpeg_path).await?;

    tokio::fs::create_dir_all(output_dir).await?;

    let streams = probe_subtitle_streams(runner, &config.ffprobe_path, input).await?;
    if streams.is_empty() {
        info!("No subtitle streams in {}", input.display());
        return Ok(ExtractionReport {
            success: true,
            message: "No subtitle streams found".to_string(),
            subtitles: Vec::new(),
            error: None,
        });
    }

    info!("Extracting {} subtitle stream(s)", streams.len());
    let (subtitles, error) =
        extract_all(runner, &config.ffmpeg_path, input, output_dir, &streams).await;

    info!(
        "Extracted {}/{} subtitle stream(s) in {:.2}s",
        subtitles.len(),
        streams.len(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(ExtractionReport {
        success: true,
        message: format!("Successfully extracted {} subtitle(s)", subtitles.len()),
        subtitles,
        error,
    })
}

/// Options for [`translate_subtitles`].
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    pub mode: ClassifyMode,
    /// Pause after every translated line.
    pub pacing_delay: Duration,
    pub show_progress: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            mode: ClassifyMode::default(),
            pacing_delay: Duration::from_millis(50),
            show_progress: false,
        }
    }
}

impl TranslateOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pacing_delay: config.pacing_delay(),
            ..Self::default()
        }
    }
}

/// Translate the text lines of an SRT document, copying index, timing and
/// blank lines verbatim.
///
/// The output has exactly as many lines as the input. A line the translator
/// gives up on keeps its original text.
pub async fn translate_subtitles(
    content: &str,
    target_language: &str,
    translator: &dyn Translator,
    options: &TranslateOptions,
) -> TranslationReport {
    let target = resolve_language_code(target_language);
    let lines: Vec<&str> = content.split('\n').collect();
    let kinds = classify_lines(&lines, options.mode);
    let translatable = kinds.iter().filter(|k| k.is_translatable()).count();

    info!(
        "Translating {} of {} line(s) to {} with {}",
        translatable,
        lines.len(),
        target,
        translator.name()
    );

    let progress = if options.show_progress {
        let pb = ProgressBar::new(translatable as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} lines")
        {
            pb.set_style(style);
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut output = Vec::with_capacity(lines.len());
    for (line, kind) in lines.iter().zip(&kinds) {
        if !kind.is_translatable() {
            output.push((*line).to_string());
            continue;
        }

        let text = line.trim();
        let leading = &line[..line.len() - line.trim_start().len()];
        let trailing = &line[line.trim_end().len()..];

        let translated = translate_or_original(translator, text, &target).await;
        debug!("{:?} -> {:?}", text, translated);
        output.push(format!("{leading}{}{trailing}", single_line(&translated)));

        progress.inc(1);
        tokio::time::sleep(options.pacing_delay).await;
    }
    progress.finish_and_clear();

    TranslationReport {
        success: true,
        message: "Subtitles translated successfully".to_string(),
        translated_content: output.join("\n"),
        error: None,
    }
}

/// Keep a translation on one line so the document's line count is unchanged.
fn single_line(text: &str) -> String {
    if text.contains('\n') {
        text.lines().map(str::trim).collect::<Vec<_>>().join(" ")
    } else {
        text.to_string()
    }
}
