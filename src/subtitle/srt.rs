// SRT line classification
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static INDEX_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*$").expect("valid index regex"));

const TIMING_ARROW: &str = "-->";

/// Role of one line of an SRT payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrtLine {
    Index,
    Timing,
    Text,
    Blank,
}

impl SrtLine {
    /// Only text lines are sent for translation; everything else is copied verbatim.
    pub fn is_translatable(&self) -> bool {
        matches!(self, SrtLine::Text)
    }
}

/// How index lines are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifyMode {
    /// Any line whose first non-blank character is a digit is an index line.
    /// Text that opens with a numeral is never translated.
    #[default]
    LineLocal,
    /// A digit-only line is an index only when a timing line follows it.
    Structural,
}

impl std::str::FromStr for ClassifyMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line-local" | "linelocal" => Ok(ClassifyMode::LineLocal),
            "structural" => Ok(ClassifyMode::Structural),
            _ => Err(format!(
                "Unknown classify mode: {s}. Use 'line-local' or 'structural'"
            )),
        }
    }
}

/// Classify a single line without looking at its neighbours.
pub fn classify_line(line: &str) -> SrtLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        SrtLine::Blank
    } else if line.contains(TIMING_ARROW) {
        SrtLine::Timing
    } else if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        SrtLine::Index
    } else {
        SrtLine::Text
    }
}

/// Classify every line of `lines` under `mode`.
pub fn classify_lines(lines: &[&str], mode: ClassifyMode) -> Vec<SrtLine> {
    match mode {
        ClassifyMode::LineLocal => lines.iter().map(|l| classify_line(l)).collect(),
        ClassifyMode::Structural => lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    SrtLine::Blank
                } else if line.contains(TIMING_ARROW) {
                    SrtLine::Timing
                } else if INDEX_LINE.is_match(line)
                    && lines.get(i + 1).is_some_and(|next| next.contains(TIMING_ARROW))
                {
                    SrtLine::Index
                } else {
                    SrtLine::Text
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line(""), SrtLine::Blank);
        assert_eq!(classify_line("   \t"), SrtLine::Blank);
        assert_eq!(classify_line("\r"), SrtLine::Blank);
        assert_eq!(classify_line("12"), SrtLine::Index);
        assert_eq!(classify_line("  7"), SrtLine::Index);
        assert_eq!(
            classify_line("00:00:01,000 --> 00:00:02,000"),
            SrtLine::Timing
        );
        assert_eq!(classify_line("Hello"), SrtLine::Text);
        assert_eq!(classify_line("<i>Hello</i>"), SrtLine::Text);
    }

    #[test]
    fn test_arrow_anywhere_is_timing() {
        assert_eq!(classify_line("go --> there"), SrtLine::Timing);
    }

    #[test]
    fn test_line_local_skips_numeric_text() {
        assert_eq!(classify_line("42 days later"), SrtLine::Index);
        assert!(!classify_line("42 days later").is_translatable());
    }

    #[test]
    fn test_classify_lines_line_local() {
        let lines = ["1", "00:00:01,000 --> 00:00:02,000", "Hello", ""];
        assert_eq!(
            classify_lines(&lines, ClassifyMode::LineLocal),
            vec![SrtLine::Index, SrtLine::Timing, SrtLine::Text, SrtLine::Blank]
        );
    }

    #[test]
    fn test_classify_lines_structural() {
        let lines = [
            "1",
            "00:00:01,000 --> 00:00:02,000",
            "42 days later",
            "2021",
            "",
            "2",
            "00:00:03,000 --> 00:00:04,000",
            "Bye",
        ];
        assert_eq!(
            classify_lines(&lines, ClassifyMode::Structural),
            vec![
                SrtLine::Index,
                SrtLine::Timing,
                SrtLine::Text,
                SrtLine::Text,
                SrtLine::Blank,
                SrtLine::Index,
                SrtLine::Timing,
                SrtLine::Text,
            ]
        );
    }

    #[test]
    fn test_classify_mode_parsing() {
        assert_eq!(
            "structural".parse::<ClassifyMode>().unwrap(),
            ClassifyMode::Structural
        );
        assert_eq!(
            "line-local".parse::<ClassifyMode>().unwrap(),
            ClassifyMode::LineLocal
        );
        assert!("blocks".parse::<ClassifyMode>().is_err());
    }
}
