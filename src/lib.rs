//! eQSL card editor - compose amateur-radio QSL confirmation cards
//!
//! This library holds the card state (text fields, per-layer positions and
//! styles, background), composes it into an SVG canvas, rasterizes it to PNG
//! and saves or restores the whole state as a JSON template.
//!
//! # Example
//!
//! ```rust
//! use eqsl_card::{Editor, FieldKey, PanelEdit};
//!
//! let mut editor = Editor::default();
//! editor
//!     .apply(PanelEdit::SetField(FieldKey::Callsign, "DL1ABC".into()))
//!     .unwrap();
//!
//! let svg = editor.render_svg();
//! assert!(svg.contains("DL1ABC"));
//! ```

pub mod background;
pub mod config;
pub mod editor;
pub mod export;
pub mod fields;
pub mod layers;
pub mod panel;
pub mod renderer;
pub mod state;
pub mod template;

pub use background::{Background, BackgroundError, BundledBackground};
pub use config::{ConfigError, EditorConfig};
pub use editor::Editor;
pub use export::ExportError;
pub use fields::{FieldKey, Fields};
pub use layers::{LayerId, LayerStyle, Position};
pub use panel::{PanelEdit, PanelError};
pub use renderer::{render_svg, SvgConfig};
pub use state::CardState;
pub use template::{Template, TemplateError};

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur anywhere in an editing session
#[derive(Debug, Error)]
pub enum CardError {
    /// Error loading a template
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Error selecting or decoding a background
    #[error("background error: {0}")]
    Background(#[from] BackgroundError),

    /// Rejected panel input
    #[error("{0}")]
    Panel(#[from] PanelError),

    /// Error rendering or writing an export
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Error loading configuration
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Error reading an input file
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
