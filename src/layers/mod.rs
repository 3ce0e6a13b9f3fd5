//! Text layers composed onto the card
//!
//! Each layer draws one block of text built from the [`Fields`]. The set of
//! layers is fixed; what changes during a session is each layer's position
//! and style, which live in the [`crate::state::CardState`].

mod map;
mod types;

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fields::Fields;

pub use map::{LayerMap, LayerMapError};
pub use types::{BoundingBox, LayerStyle, Position};

/// Line box height as a multiple of the font size
pub const LINE_HEIGHT: f64 = 1.2;

/// Distance from the top of a line box to its baseline, as a multiple of the font size
pub const BASELINE_OFFSET: f64 = 0.9;

/// Estimated glyph advance as a multiple of the font size
pub const GLYPH_ADVANCE: f64 = 0.6;

/// Separator between labelled segments on one line
const SEGMENT_GAP: &str = "   ";

/// A draggable text layer, listed in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerId {
    Callsign,
    Operator,
    Location,
    Contact,
    Qso,
    Comments,
}

/// Unknown layer name given on the command line or in a panel edit
#[derive(Debug, Error, PartialEq)]
#[error("unknown layer '{0}'")]
pub struct UnknownLayer(pub String);

impl LayerId {
    pub const COUNT: usize = 6;

    /// All layers, bottom to top
    pub const ALL: [LayerId; LayerId::COUNT] = [
        LayerId::Callsign,
        LayerId::Operator,
        LayerId::Location,
        LayerId::Contact,
        LayerId::Qso,
        LayerId::Comments,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            LayerId::Callsign => "callsign",
            LayerId::Operator => "operator",
            LayerId::Location => "location",
            LayerId::Contact => "contact",
            LayerId::Qso => "qso",
            LayerId::Comments => "comments",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LayerId::Callsign => "Callsign",
            LayerId::Operator => "Operator / QTH",
            LayerId::Location => "Grid and zones",
            LayerId::Contact => "To radio",
            LayerId::Qso => "QSO details",
            LayerId::Comments => "Comments",
        }
    }

    /// Anchor used on a fresh card and after a position reset
    pub fn default_position(self) -> Position {
        match self {
            LayerId::Callsign => Position::new(60.0, 50.0),
            LayerId::Operator => Position::new(60.0, 190.0),
            LayerId::Location => Position::new(60.0, 285.0),
            LayerId::Contact => Position::new(60.0, 420.0),
            LayerId::Qso => Position::new(60.0, 500.0),
            LayerId::Comments => Position::new(60.0, 690.0),
        }
    }

    /// Style used on a fresh card and after a style reset
    pub fn default_style(self) -> LayerStyle {
        match self {
            LayerId::Callsign => LayerStyle::new("#ffffff", 96.0),
            LayerId::Operator => LayerStyle::new("#ffffff", 28.0),
            LayerId::Location => LayerStyle::new("#f0f0f0", 22.0),
            LayerId::Contact => LayerStyle::new("#ffd700", 40.0),
            LayerId::Qso => LayerStyle::new("#ffffff", 26.0),
            LayerId::Comments => LayerStyle::new("#eeeeee", 22.0),
        }
    }

    /// Font sizes the property panel accepts for this layer
    pub fn font_size_range(self) -> RangeInclusive<f64> {
        match self {
            LayerId::Callsign => 24.0..=160.0,
            LayerId::Operator => 12.0..=64.0,
            LayerId::Location => 10.0..=48.0,
            LayerId::Contact => 16.0..=96.0,
            LayerId::Qso => 12.0..=56.0,
            LayerId::Comments => 10.0..=48.0,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, LayerId::Callsign | LayerId::Contact)
    }

    /// Text lines this layer draws for the given fields
    ///
    /// Blank values drop their segment; lines left without segments are
    /// dropped too, so an all-blank layer yields no lines.
    pub fn lines(self, fields: &Fields) -> Vec<String> {
        let lines = match self {
            LayerId::Callsign => vec![plain(&fields.callsign)],
            LayerId::Operator => vec![plain(&fields.operator_name), plain(&fields.qth)],
            LayerId::Location => vec![join_segments(&[
                labelled("Grid: ", &fields.grid, ""),
                labelled("CQ: ", &fields.cq_zone, ""),
                labelled("ITU: ", &fields.itu_zone, ""),
            ])],
            LayerId::Contact => vec![labelled("To Radio: ", &fields.contact, "")],
            LayerId::Qso => vec![
                join_segments(&[
                    labelled("Date: ", &fields.date, ""),
                    labelled("Time: ", &fields.time, " UTC"),
                ]),
                join_segments(&[
                    labelled("Freq: ", &fields.frequency, " MHz"),
                    labelled("Band: ", &fields.band, ""),
                ]),
                join_segments(&[
                    labelled("Mode: ", &fields.mode, ""),
                    labelled("RST: ", &fields.rst, ""),
                ]),
            ],
            LayerId::Comments => fields.comments.lines().map(plain).collect(),
        };
        lines.into_iter().flatten().collect()
    }

    /// Estimated extent of the layer's text when anchored at `position`
    pub fn bounds(self, fields: &Fields, position: Position, style: &LayerStyle) -> BoundingBox {
        let lines = self.lines(fields);
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        BoundingBox::new(
            position.x,
            position.y,
            longest as f64 * GLYPH_ADVANCE * style.font_size,
            lines.len() as f64 * LINE_HEIGHT * style.font_size,
        )
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayerId {
    type Err = UnknownLayer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        LayerId::ALL
            .into_iter()
            .find(|layer| layer.name() == normalized)
            .ok_or_else(|| UnknownLayer(s.to_string()))
    }
}

fn plain(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn labelled(label: &str, value: &str, suffix: &str) -> Option<String> {
    plain(value).map(|v| format!("{}{}{}", label, v, suffix))
}

fn join_segments(segments: &[Option<String>]) -> Option<String> {
    let present: Vec<&str> = segments.iter().flatten().map(String::as_str).collect();
    (!present.is_empty()).then(|| present.join(SEGMENT_GAP))
}
