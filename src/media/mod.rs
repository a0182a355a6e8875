pub mod extract;
pub mod probe;
pub mod tool;

pub use extract::{extract_all, extract_stream, fallback_output_path, primary_output_path};
pub use probe::{parse_probe_output, probe_subtitle_streams};
pub use tool::{check_tool, ProcessRunner, ToolOutcome, ToolRunner};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One subtitle-type stream as reported by the container probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleStream {
    /// Container-wide stream index.
    pub index: u32,
    pub codec: String,
    /// Language tag, or `"unknown"`.
    pub language: String,
    pub title: String,
}

/// Target file format for an extracted stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    Srt,
    Ass,
}

impl SubtitleFormat {
    /// ASS/SSA streams keep their styling; everything else (including bitmap
    /// codecs such as `dvd_subtitle`) targets SRT.
    pub fn for_codec(codec: &str) -> Self {
        match codec.to_lowercase().as_str() {
            "ass" | "ssa" => SubtitleFormat::Ass,
            _ => SubtitleFormat::Srt,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Ass => "ass",
        }
    }
}

impl std::fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// A subtitle file written to disk by a successful extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSubtitle {
    pub file_path: PathBuf,
    pub index: u32,
    pub codec: String,
    pub language: String,
    pub title: String,
    pub format: SubtitleFormat,
    pub size_bytes: u64,
}
