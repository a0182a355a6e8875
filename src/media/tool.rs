use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, SubkitError};

/// How an external tool invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Completed {
        success: bool,
        stdout: String,
        stderr: String,
    },
    TimedOut,
}

impl ToolOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, ToolOutcome::Completed { success: true, .. })
    }
}

/// Runs ffmpeg/ffprobe style programs.
///
/// An `Err` means the program could not be started at all; a non-zero exit or
/// a timeout is reported through [`ToolOutcome`].
#[async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[OsString]) -> Result<ToolOutcome>;
}

/// Spawns real child processes, each bounded by a fixed timeout.
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&self, program: &Path, args: &[OsString]) -> Result<ToolOutcome> {
        debug!("Running {} {:?}", program.display(), args);

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Dropping the output future on timeout kills the child.
        match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(output) => {
                let output = output.map_err(|e| {
                    SubkitError::Io(std::io::Error::new(
                        e.kind(),
                        format!("Failed to run {}: {e}", program.display()),
                    ))
                })?;
                Ok(ToolOutcome::Completed {
                    success: output.status.success(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                })
            }
            Err(_) => {
                debug!(
                    "{} timed out after {:?}",
                    program.display(),
                    self.timeout
                );
                Ok(ToolOutcome::TimedOut)
            }
        }
    }
}

/// Check that a tool is installed by asking it for its version.
pub async fn check_tool(runner: &dyn ToolRunner, program: &Path) -> Result<()> {
    let outcome = runner
        .run(program, &[OsString::from("-version")])
        .await
        .map_err(|e| {
            SubkitError::ToolUnavailable(format!(
                "{} not found. Please install FFmpeg and ensure it's in your PATH. Error: {e}",
                program.display()
            ))
        })?;

    if !outcome.succeeded() {
        return Err(SubkitError::ToolUnavailable(format!(
            "{} check failed",
            program.display()
        )));
    }

    debug!("{} is available", program.display());
    Ok(())
}
