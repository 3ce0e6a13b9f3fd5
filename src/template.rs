//! JSON templates: a complete, reusable snapshot of a card
//!
//! A template is the whole state, nothing less. Loading one either parses
//! completely and replaces everything, or fails and changes nothing.

use std::path::{Path, PathBuf};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::background::Background;
use crate::fields::Fields;
use crate::layers::{LayerMap, LayerStyle, Position};

/// Default file name when saving a template
pub const TEMPLATE_FILE_NAME: &str = "eqsl-template.json";

/// Byte range in template source text
pub type Span = std::ops::Range<usize>;

/// Errors that can occur when loading a template
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template is not valid UTF-8")]
    Utf8,

    #[error("invalid template at line {line}, column {column}: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },
}

impl TemplateError {
    fn from_json(err: serde_json::Error) -> Self {
        // serde_json appends " at line L column C" to its Display output
        let full = err.to_string();
        let message = match full.rfind(" at line ") {
            Some(idx) => full[..idx].to_string(),
            None => full,
        };
        TemplateError::Json {
            line: err.line(),
            column: err.column(),
            message,
        }
    }

    /// Source span of a JSON error, if known
    pub fn span(&self, source: &str) -> Option<Span> {
        match self {
            TemplateError::Json { line, column, .. } if *line > 0 => {
                let offset = line_column_to_offset(source, *line, *column);
                Some(offset..(offset + 1).min(source.len()).max(offset))
            }
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span(source) else {
            return self.to_string();
        };
        let message = match self {
            TemplateError::Json { message, .. } => message.clone(),
            other => other.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_config(
                Config::default()
                    .with_color(false)
                    .with_index_type(IndexType::Byte),
            )
            .with_message("invalid template")
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Full snapshot of a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub fields: Fields,
    pub styles: LayerMap<LayerStyle>,
    pub positions: LayerMap<Position>,
    pub background: Background,
}

impl Template {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("template maps are keyed by strings")
    }

    pub fn from_json(source: &str) -> Result<Self, TemplateError> {
        serde_json::from_str(source).map_err(TemplateError::from_json)
    }

    /// Parse raw uploaded bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TemplateError> {
        let source = std::str::from_utf8(bytes).map_err(|_| TemplateError::Utf8)?;
        Self::from_json(source)
    }

    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let bytes = std::fs::read(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }
}

/// Convert a 1-based line and column into a byte offset
fn line_column_to_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let line_text = source[line_start..].split('\n').next().unwrap_or("");
    // serde_json columns count bytes and point one past the offending byte
    let within = column.saturating_sub(1).min(line_text.len());
    let mut offset = line_start + within;
    while offset > 0 && !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKey;
    use crate::layers::LayerId;
    use crate::state::CardState;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&CardState::new().snapshot().to_json()).unwrap();
        assert_eq!(json["fields"]["callsign"], "N0CALL");
        assert_eq!(json["styles"]["contact"]["color"], "#ffd700");
        assert_eq!(json["positions"]["qso"]["x"], 60.0);
        assert_eq!(json["background"]["kind"], "bundled");
    }

    #[test]
    fn test_save_then_load_restores_state() {
        let mut state = CardState::new();
        state.set_field(FieldKey::Comments, "Tnx \"QSO\"\n73");
        state.set_color(LayerId::Comments, "#123456");
        let json = state.snapshot().to_json();

        let loaded = Template::from_json(&json).unwrap();
        assert_eq!(loaded, state.snapshot());
    }

    #[test]
    fn test_syntax_error_position() {
        let err = Template::from_json("{\n  \"fields\": ,\n}").unwrap_err();
        match err {
            TemplateError::Json { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_layer_is_rejected() {
        let mut json: serde_json::Value =
            serde_json::from_str(&CardState::new().snapshot().to_json()).unwrap();
        json["positions"].as_object_mut().unwrap().remove("qso");
        let err = Template::from_json(&json.to_string()).unwrap_err();
        assert!(err.to_string().contains("missing entry for layer 'qso'"), "{}", err);
    }

    #[test]
    fn test_non_utf8_upload() {
        assert!(matches!(
            Template::from_bytes(&[0xff, 0xfe, 0x00]),
            Err(TemplateError::Utf8)
        ));
    }

    #[test]
    fn test_format_contains_filename() {
        let source = "{\n  \"fields\": ,\n}";
        let err = Template::from_json(source).unwrap_err();
        let report = err.format(source, "card.json");
        assert!(report.contains("card.json"));
        assert!(report.contains("invalid template"));
    }

    #[test]
    fn test_format_after_multibyte_text() {
        let source = "{\n  \"qth\": \"Zürich äöü 日本語\",\n  \"styles\": ,\n}";
        let err = Template::from_json(source).unwrap_err();
        let report = err.format(source, "card.json");
        assert!(report.contains("card.json:3:"), "{}", report);
        assert!(report.contains("expected value"), "{}", report);
    }

    #[test]
    fn test_line_column_to_offset() {
        let source = "ab\ncdé\nf";
        assert_eq!(line_column_to_offset(source, 1, 1), 0);
        assert_eq!(line_column_to_offset(source, 2, 2), 4);
        assert_eq!(line_column_to_offset(source, 3, 99), source.len());
    }
}
