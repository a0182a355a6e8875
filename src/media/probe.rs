//! Subtitle stream discovery via ffprobe.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, SubkitError};

use super::tool::{ToolOutcome, ToolRunner};
use super::SubtitleStream;

#[derive(Debug, Deserialize)]
struct ProbeResponse {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    index: u32,
    codec_name: Option<String>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

impl From<ProbeStream> for SubtitleStream {
    fn from(stream: ProbeStream) -> Self {
        let mut tags = stream.tags;
        SubtitleStream {
            index: stream.index,
            codec: stream.codec_name.unwrap_or_else(|| "unknown".to_string()),
            language: tags
                .remove("language")
                .unwrap_or_else(|| "unknown".to_string()),
            title: tags
                .remove("title")
                .unwrap_or_else(|| format!("Subtitle {}", stream.index)),
        }
    }
}

/// ffprobe arguments selecting subtitle streams only, as JSON.
pub fn probe_args(input: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-v",
        "error",
        "-select_streams",
        "s",
        "-show_entries",
        "stream=index,codec_name:stream_tags=title,language",
        "-of",
        "json",
    ]
    .iter()
    .map(OsString::from)
    .collect();
    args.push(input.as_os_str().to_os_string());
    args
}

/// Parse ffprobe JSON into descriptors ordered by stream index.
pub fn parse_probe_output(stdout: &str) -> Result<Vec<SubtitleStream>> {
    let response: ProbeResponse = serde_json::from_str(stdout)
        .map_err(|e| SubkitError::Probe(format!("Invalid JSON from ffprobe: {e}")))?;

    let mut streams: Vec<SubtitleStream> =
        response.streams.into_iter().map(SubtitleStream::from).collect();
    streams.sort_by_key(|s| s.index);
    Ok(streams)
}

/// Discover every subtitle stream in `input`.
///
/// Fails with [`SubkitError::FileNotFound`] before running anything when the
/// input is missing. An empty list is a valid result.
pub async fn probe_subtitle_streams(
    runner: &dyn ToolRunner,
    ffprobe: &Path,
    input: &Path,
) -> Result<Vec<SubtitleStream>> {
    if !input.exists() {
        return Err(SubkitError::FileNotFound(input.display().to_string()));
    }

    info!("Probing subtitle streams in {}", input.display());

    let outcome = runner
        .run(ffprobe, &probe_args(input))
        .await
        .map_err(|e| SubkitError::Probe(e.to_string()))?;

    let stdout = match outcome {
        ToolOutcome::Completed {
            success: true,
            stdout,
            ..
        } => stdout,
        ToolOutcome::Completed { stderr, .. } => {
            return Err(SubkitError::Probe(stderr.trim().to_string()));
        }
        ToolOutcome::TimedOut => {
            return Err(SubkitError::Probe("ffprobe timed out".to_string()));
        }
    };

    let streams = parse_probe_output(&stdout)?;
    debug!("Found {} subtitle stream(s)", streams.len());
    Ok(streams)
}
