use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Result, SubkitError};

use super::tool::{ToolOutcome, ToolRunner};
use super::{ExtractedSubtitle, SubtitleFormat, SubtitleStream};

/// Where the stream-copy attempt writes: `subtitle_{index}_{language}.{ext}`.
pub fn primary_output_path(output_dir: &Path, stream: &SubtitleStream) -> PathBuf {
    let format = SubtitleFormat::for_codec(&stream.codec);
    output_dir.join(format!(
        "subtitle_{}_{}.{}",
        stream.index,
        file_name_safe(&stream.language),
        format.extension()
    ))
}

/// Where the SRT re-encode fallback writes: `subtitle_{index}.srt`.
pub fn fallback_output_path(output_dir: &Path, stream: &SubtitleStream) -> PathBuf {
    output_dir.join(format!("subtitle_{}.srt", stream.index))
}

/// Language tags come from the container; keep them from escaping the output dir.
fn file_name_safe(tag: &str) -> String {
    tag.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// ffmpeg arguments for one subtitle stream. `ordinal` is the stream's
/// position among the container's subtitle streams (`-map 0:s:N`).
fn ffmpeg_args(input: &Path, ordinal: usize, codec_args: &[&str], output: &Path) -> Vec<OsString> {
    let mut args = vec![OsString::from("-i"), input.as_os_str().to_os_string()];
    args.push(OsString::from("-map"));
    args.push(OsString::from(format!("0:s:{ordinal}")));
    args.extend(codec_args.iter().map(OsString::from));
    args.push(OsString::from("-y"));
    args.push(output.as_os_str().to_os_string());
    args
}

pub fn stream_copy_args(input: &Path, ordinal: usize, output: &Path) -> Vec<OsString> {
    ffmpeg_args(input, ordinal, &["-c", "copy"], output)
}

pub fn srt_transcode_args(input: &Path, ordinal: usize, output: &Path) -> Vec<OsString> {
    ffmpeg_args(input, ordinal, &["-c:s", "srt"], output)
}

/// Run one ffmpeg attempt; succeeds only on exit code zero with the output
/// file present. Returns the file size.
async fn run_attempt(
    runner: &dyn ToolRunner,
    ffmpeg: &Path,
    args: &[OsString],
    output: &Path,
    stream_index: u32,
) -> Result<u64> {
    match runner.run(ffmpeg, args).await? {
        ToolOutcome::TimedOut => Err(SubkitError::ExtractionTimeout(stream_index)),
        ToolOutcome::Completed { success: false, stderr, .. } => Err(SubkitError::Extraction(
            format!(
                "ffmpeg exited with an error for stream {stream_index}: {}",
                stderr.trim()
            ),
        )),
        ToolOutcome::Completed { success: true, .. } => match tokio::fs::metadata(output).await {
            Ok(metadata) => Ok(metadata.len()),
            Err(_) => Err(SubkitError::Extraction(format!(
                "Output file was not created: {}",
                output.display()
            ))),
        },
    }
}

/// Extract one stream: stream-copy into its native format first, then a single
/// SRT re-encode fallback.
pub async fn extract_stream(
    runner: &dyn ToolRunner,
    ffmpeg: &Path,
    input: &Path,
    output_dir: &Path,
    stream: &SubtitleStream,
    ordinal: usize,
) -> Result<ExtractedSubtitle> {
    let format = SubtitleFormat::for_codec(&stream.codec);
    let primary = primary_output_path(output_dir, stream);

    debug!(
        "Extracting stream {} ({}) to {}",
        stream.index,
        stream.codec,
        primary.display()
    );

    let args = stream_copy_args(input, ordinal, &primary);
    let primary_error = match run_attempt(runner, ffmpeg, &args, &primary, stream.index).await {
        Ok(size_bytes) => {
            return Ok(ExtractedSubtitle {
                file_path: primary,
                index: stream.index,
                codec: stream.codec.clone(),
                language: stream.language.clone(),
                title: stream.title.clone(),
                format,
                size_bytes,
            });
        }
        Err(e) => e,
    };

    warn!(
        "Stream copy failed for subtitle {}, retrying as SRT: {}",
        stream.index, primary_error
    );

    let fallback = fallback_output_path(output_dir, stream);
    let args = srt_transcode_args(input, ordinal, &fallback);
    let size_bytes = run_attempt(runner, ffmpeg, &args, &fallback, stream.index).await?;

    Ok(ExtractedSubtitle {
        file_path: fallback,
        index: stream.index,
        codec: stream.codec.clone(),
        language: stream.language.clone(),
        title: stream.title.clone(),
        format: SubtitleFormat::Srt,
        size_bytes,
    })
}

/// Extract every stream in order. A failed stream is skipped; the message of the
/// most recent failure is returned alongside the successes.
pub async fn extract_all(
    runner: &dyn ToolRunner,
    ffmpeg: &Path,
    input: &Path,
    output_dir: &Path,
    streams: &[SubtitleStream],
) -> (Vec<ExtractedSubtitle>, Option<String>) {
    let mut extracted = Vec::with_capacity(streams.len());
    let mut last_error = None;

    for (ordinal, stream) in streams.iter().enumerate() {
        match extract_stream(runner, ffmpeg, input, output_dir, stream, ordinal).await {
            Ok(subtitle) => {
                info!(
                    "Extracted subtitle {} ({}) to {}",
                    subtitle.index,
                    subtitle.format,
                    subtitle.file_path.display()
                );
                extracted.push(subtitle);
            }
            Err(e) => {
                warn!("Skipping subtitle {}: {}", stream.index, e);
                last_error = Some(e.to_string());
            }
        }
    }

    (extracted, last_error)
}
