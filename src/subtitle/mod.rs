pub mod srt;

pub use srt::{classify_line, classify_lines, ClassifyMode, SrtLine};
