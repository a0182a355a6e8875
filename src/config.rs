use crate::error::{Result, SubkitError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Public LibreTranslate instance used when nothing else is configured.
pub const DEFAULT_TRANSLATE_URL: &str = "https://libretranslate.com/translate";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    /// Upper bound for every ffmpeg/ffprobe invocation.
    pub tool_timeout_secs: u64,
    pub translate_url: String,
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    /// Pause after each translated line, independent of retry backoff.
    pub pacing_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            tool_timeout_secs: 300,
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            api_key: None,
            request_timeout_secs: 30,
            retry_attempts: 3,
            retry_delay_ms: 2000,
            pacing_delay_ms: 50,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                config = toml::from_str::<Config>(&contents).map_err(|e| {
                    SubkitError::Config(format!("{}: {e}", config_path.display()))
                })?;
            }
        }

        config.apply_env();
        Ok(config)
    }

    /// Override fields from `SUBKIT_*` environment variables.
    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("SUBKIT_FFMPEG") {
            self.ffmpeg_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("SUBKIT_FFPROBE") {
            self.ffprobe_path = PathBuf::from(path);
        }
        if let Ok(url) = std::env::var("SUBKIT_TRANSLATE_URL") {
            self.translate_url = url;
        }
        if let Ok(key) = std::env::var("LIBRETRANSLATE_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(v) = env_parse("SUBKIT_TOOL_TIMEOUT_SECS") {
            self.tool_timeout_secs = v;
        }
        if let Some(v) = env_parse("SUBKIT_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = v;
        }
        if let Some(v) = env_parse("SUBKIT_RETRY_ATTEMPTS") {
            self.retry_attempts = v;
        }
        if let Some(v) = env_parse("SUBKIT_RETRY_DELAY_MS") {
            self.retry_delay_ms = v;
        }
        if let Some(v) = env_parse("SUBKIT_PACING_DELAY_MS") {
            self.pacing_delay_ms = v;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.retry_attempts == 0 {
            return Err(SubkitError::Config(
                "retry_attempts must be greater than 0".to_string(),
            ));
        }

        if self.tool_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(SubkitError::Config(
                "Timeouts must be greater than 0".to_string(),
            ));
        }

        reqwest::Url::parse(&self.translate_url).map_err(|e| {
            SubkitError::Config(format!(
                "Invalid translation endpoint '{}': {e}",
                self.translate_url
            ))
        })?;

        Ok(())
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("subkit").join("config.toml"))
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
