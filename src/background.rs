//! Background images: bundled artwork or an uploaded picture
//!
//! A card always has exactly one background. Uploaded images are kept inline
//! as raw bytes plus a MIME type so that templates carry them along as data
//! URLs and never point at files on the machine that saved them.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when selecting or decoding a background
#[derive(Debug, Error, PartialEq)]
pub enum BackgroundError {
    #[error("unknown bundled background '{name}' (available: {available})")]
    UnknownBundled { name: String, available: String },

    #[error("uploaded image is empty")]
    Empty,

    #[error("unsupported image format: {0} (expected PNG, JPEG, GIF, WebP or SVG)")]
    UnsupportedFormat(String),

    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),
}

/// Artwork compiled into the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundledBackground {
    Classic,
    Ocean,
    Sunset,
    Night,
}

impl BundledBackground {
    pub const ALL: [BundledBackground; 4] = [
        BundledBackground::Classic,
        BundledBackground::Ocean,
        BundledBackground::Sunset,
        BundledBackground::Night,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BundledBackground::Classic => "classic",
            BundledBackground::Ocean => "ocean",
            BundledBackground::Sunset => "sunset",
            BundledBackground::Night => "night",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BundledBackground::Classic => "Blue gradient with an antenna mast",
            BundledBackground::Ocean => "Sea waves under a light sky",
            BundledBackground::Sunset => "Purple-to-orange dusk over the horizon",
            BundledBackground::Night => "Starry sky with a crescent moon",
        }
    }

    /// SVG source of the artwork
    pub fn svg(self) -> &'static str {
        match self {
            BundledBackground::Classic => include_str!("../assets/backgrounds/classic.svg"),
            BundledBackground::Ocean => include_str!("../assets/backgrounds/ocean.svg"),
            BundledBackground::Sunset => include_str!("../assets/backgrounds/sunset.svg"),
            BundledBackground::Night => include_str!("../assets/backgrounds/night.svg"),
        }
    }
}

impl fmt::Display for BundledBackground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BundledBackground {
    type Err = BackgroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        BundledBackground::ALL
            .into_iter()
            .find(|b| b.name() == normalized)
            .ok_or_else(|| BackgroundError::UnknownBundled {
                name: s.to_string(),
                available: BundledBackground::ALL
                    .iter()
                    .map(|b| b.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// An uploaded image kept inline
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    mime: String,
    data: Vec<u8>,
}

impl EmbeddedImage {
    /// Accept raw upload bytes, detecting the format from their content
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, BackgroundError> {
        let mime = sniff_mime(&data)?;
        Ok(Self {
            mime: mime.to_string(),
            data,
        })
    }

    /// Parse a `data:<mime>;base64,<payload>` URL
    pub fn from_data_url(url: &str) -> Result<Self, BackgroundError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| BackgroundError::InvalidDataUrl("missing 'data:' prefix".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| BackgroundError::InvalidDataUrl("missing ',' separator".to_string()))?;
        let mime = header.strip_suffix(";base64").ok_or_else(|| {
            BackgroundError::InvalidDataUrl("only base64 payloads are supported".to_string())
        })?;
        if mime.is_empty() {
            return Err(BackgroundError::InvalidDataUrl("missing MIME type".to_string()));
        }
        let data = STANDARD
            .decode(payload.trim())
            .map_err(|e| BackgroundError::InvalidDataUrl(e.to_string()))?;
        if data.is_empty() {
            return Err(BackgroundError::Empty);
        }
        Ok(Self {
            mime: mime.to_string(),
            data,
        })
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_url(&self) -> String {
        data_url(&self.mime, &self.data)
    }
}

/// The active background of a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireBackground", into = "WireBackground")]
pub enum Background {
    Bundled(BundledBackground),
    Embedded(EmbeddedImage),
}

impl Default for Background {
    fn default() -> Self {
        Background::Bundled(BundledBackground::Classic)
    }
}

impl Background {
    /// Select bundled artwork by name
    pub fn bundled(name: &str) -> Result<Self, BackgroundError> {
        Ok(Background::Bundled(name.parse()?))
    }

    /// Use an uploaded image
    pub fn from_upload(data: Vec<u8>) -> Result<Self, BackgroundError> {
        Ok(Background::Embedded(EmbeddedImage::from_bytes(data)?))
    }

    /// Data URL suitable for an SVG `<image href>`
    pub fn data_url(&self) -> String {
        match self {
            Background::Bundled(b) => data_url("image/svg+xml", b.svg().as_bytes()),
            Background::Embedded(img) => img.data_url(),
        }
    }

    /// Short description for logs and the panel
    pub fn describe(&self) -> String {
        match self {
            Background::Bundled(b) => format!("bundled '{}'", b),
            Background::Embedded(img) => {
                format!("uploaded {} ({} bytes)", img.mime(), img.data().len())
            }
        }
    }
}

/// JSON shape of a background inside a template
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum WireBackground {
    Bundled { name: BundledBackground },
    Embedded { data_url: String },
}

impl TryFrom<WireBackground> for Background {
    type Error = BackgroundError;

    fn try_from(wire: WireBackground) -> Result<Self, Self::Error> {
        match wire {
            WireBackground::Bundled { name } => Ok(Background::Bundled(name)),
            WireBackground::Embedded { data_url } => {
                Ok(Background::Embedded(EmbeddedImage::from_data_url(&data_url)?))
            }
        }
    }
}

impl From<Background> for WireBackground {
    fn from(background: Background) -> Self {
        match background {
            Background::Bundled(name) => WireBackground::Bundled { name },
            Background::Embedded(img) => WireBackground::Embedded {
                data_url: img.data_url(),
            },
        }
    }
}

fn data_url(mime: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(data))
}

fn sniff_mime(data: &[u8]) -> Result<&'static str, BackgroundError> {
    if data.is_empty() {
        return Err(BackgroundError::Empty);
    }
    if looks_like_svg(data) {
        return Ok("image/svg+xml");
    }
    match image::guess_format(data) {
        Ok(ImageFormat::Png) => Ok("image/png"),
        Ok(ImageFormat::Jpeg) => Ok("image/jpeg"),
        Ok(ImageFormat::Gif) => Ok("image/gif"),
        Ok(ImageFormat::WebP) => Ok("image/webp"),
        Ok(other) => Err(BackgroundError::UnsupportedFormat(
            other.to_mime_type().to_string(),
        )),
        Err(_) => Err(BackgroundError::UnsupportedFormat("unknown".to_string())),
    }
}

fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}
