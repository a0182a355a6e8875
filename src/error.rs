use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubkitError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Tool unavailable: {0}")]
    ToolUnavailable(String),

    #[error("Probe failed: {0}")]
    Probe(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Timeout extracting subtitle {0}")]
    ExtractionTimeout(u32),

    #[error("Translation service error: {0}")]
    TranslationService(String),

    #[error("Translation rate limited after {0} attempt(s)")]
    RateLimited(u32),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SubkitError>;
