pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod pipeline;
pub mod subtitle;
pub mod translate;

pub use config::Config;
pub use error::{Result, SubkitError};
pub use pipeline::{
    extract_subtitles, translate_subtitles, ExtractionReport, TranslateOptions, TranslationReport,
};
