//! Canvas compositor
//!
//! This module takes a CardState and produces an SVG document: the
//! background stretched over the whole canvas with every text layer drawn
//! on top in layer order. The PNG exporter rasterizes this same document.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{hit_test, render_svg};
