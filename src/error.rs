//! Structured error types for folio.
//!
//! Covers the real failure sources: reading or validating a style file, writing the
//! output PDF, and layout configurations that would produce degenerate
//! geometry or run off the bottom of a page.

use std::path::PathBuf;

use thiserror::Error;

/// The unified error type returned by all public folio API functions.
#[derive(Debug, Error)]
pub enum FolioError {
    /// The style file could not be read.
    #[error("Failed to read style file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The style file is not valid style JSON.
    #[error("Failed to parse style file {}: {source}{}", .path.display(), format_hint(.hint))]
    Config {
        path: PathBuf,
        source: serde_json::Error,
        hint: String,
    },

    /// A style value that would produce unusable page geometry.
    #[error("Invalid style value {field} = {value}: {reason}")]
    InvalidStyle {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The output file could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A scale needs at least two labels to have a segment between ticks.
    #[error("Scale needs at least 2 labels, got {labels}")]
    DegenerateScale { labels: usize },

    /// A column split was requested with zero columns.
    #[error("Column layout needs at least one column")]
    NoColumns,

    /// A page composer finished below the bottom margin.
    #[error("Page {page} overflows: cursor ended at {cursor:.2}pt, below the {floor:.2}pt margin")]
    Overflow { page: usize, cursor: f64, floor: f64 },
}

impl FolioError {
    /// Wrap a style-file parse error with a hint for the common mistakes.
    pub fn config(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        let hint = match source.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the style schema. Check field names and types."
                    .to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the file truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FolioError::Config {
            path: path.into(),
            source,
            hint,
        }
    }
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_carry_a_hint() {
        let source = serde_json::from_str::<serde_json::Value>("{ \"margin\": 20, }").unwrap_err();
        let err = FolioError::config("style.json", source);
        let text = err.to_string();
        assert!(text.contains("style.json"));
        assert!(text.contains("Hint: Check for trailing commas"));
    }

    #[test]
    fn invalid_style_message_names_the_field() {
        let err = FolioError::InvalidStyle {
            field: "device.dpi",
            value: 0.0,
            reason: "must be positive",
        };
        assert_eq!(err.to_string(), "Invalid style value device.dpi = 0: must be positive");
    }

    #[test]
    fn overflow_message_names_the_page() {
        let err = FolioError::Overflow {
            page: 3,
            cursor: 12.5,
            floor: 20.0,
        };
        assert_eq!(
            err.to_string(),
            "Page 3 overflows: cursor ended at 12.50pt, below the 20.00pt margin"
        );
    }
}
