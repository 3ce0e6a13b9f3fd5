//! PNG export and file "downloads"
//!
//! The compositor's SVG is rasterized with resvg. Text is shaped with
//! whatever fonts the font database finds, so a machine without any fonts
//! still produces a valid image, just without lettering.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{debug, info, warn};
use thiserror::Error;

use crate::config::EditorConfig;
use crate::renderer::render_svg;
use crate::state::CardState;

/// Fallback download name when the callsign has no usable characters
pub const FALLBACK_PNG_NAME: &str = "eqsl-card.png";

/// Largest PNG the exporter will allocate (10000x10000)
pub const MAX_PIXELS: u64 = 100_000_000;

/// Errors that can occur while exporting a card
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to parse composed SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("cannot allocate a {width}x{height} pixel canvas")]
    Canvas { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Encode(String),

    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn usvg_options(config: &EditorConfig) -> usvg::Options<'static> {
    let mut options = usvg::Options::default();
    let fontdb = options.fontdb_mut();
    if config.system_fonts {
        fontdb.load_system_fonts();
    }
    for dir in &config.font_dirs {
        fontdb.load_fonts_dir(dir);
    }
    if fontdb.is_empty() {
        warn!("no fonts available, text layers will not be drawn");
    } else {
        debug!("font database holds {} faces", fontdb.len());
    }
    options
}

/// Rasterize the card to PNG bytes at the configured pixel ratio
pub fn render_png(state: &CardState, config: &EditorConfig) -> Result<Vec<u8>, ExportError> {
    let scale = config.export_scale;
    let width = (config.width as f32 * scale).ceil() as u32;
    let height = (config.height as f32 * scale).ceil() as u32;
    if u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(ExportError::Canvas { width, height });
    }

    let svg = render_svg(state, &config.svg_config());
    let tree = usvg::Tree::from_str(&svg, &usvg_options(config))?;
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(ExportError::Canvas { width, height })?;

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let png = pixmap
        .encode_png()
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    info!("rendered {}x{} PNG ({} bytes)", width, height, png.len());
    Ok(png)
}

/// Encode PNG bytes as a `data:` URL
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Download name for a card, derived from its callsign
///
/// Portable callsigns such as `DL/W1AW/P` become `eqsl-DL-W1AW-P.png`.
pub fn default_png_name(callsign: &str) -> String {
    let cleaned: String = callsign
        .trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || c == '-' => Some(c),
            '/' => Some('-'),
            _ => None,
        })
        .collect();
    let cleaned = cleaned.trim_matches('-');
    if cleaned.is_empty() {
        FALLBACK_PNG_NAME.to_string()
    } else {
        format!("eqsl-{}.png", cleaned)
    }
}

/// Write `bytes` to `target`, or to `target/default_name` when `target` is a directory
pub fn download(target: &Path, default_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    let path = if target.is_dir() {
        target.join(default_name)
    } else {
        target.to_path_buf()
    };
    std::fs::write(&path, bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    info!("saved {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}
