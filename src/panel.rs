//! Property panel: the form bound to the card state
//!
//! The panel owns the input limits. The store itself accepts any value, which
//! is what lets a template restore exactly what it saved.

use std::fmt::Write as _;

use thiserror::Error;

use crate::background::{Background, BackgroundError};
use crate::fields::{FieldKey, UnknownField};
use crate::layers::{LayerId, Position, UnknownLayer};
use crate::state::CardState;

/// Errors from panel input
#[derive(Debug, Error, PartialEq)]
pub enum PanelError {
    #[error(transparent)]
    UnknownField(#[from] UnknownField),

    #[error(transparent)]
    UnknownLayer(#[from] UnknownLayer),

    #[error(transparent)]
    Background(#[from] BackgroundError),

    #[error("invalid color '{0}' (expected #rgb or #rrggbb)")]
    InvalidColor(String),

    #[error("font size {size} for layer '{layer}' is outside {min}..={max}")]
    FontSizeOutOfRange {
        layer: LayerId,
        size: f64,
        min: f64,
        max: f64,
    },

    #[error("coordinates for layer '{layer}' must be finite (got {x}, {y})")]
    NonFiniteCoordinates { layer: LayerId, x: f64, y: f64 },

    #[error("invalid value '{input}': expected {expected}")]
    Syntax { input: String, expected: &'static str },
}

/// One input of the panel
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Text {
        key: FieldKey,
        label: &'static str,
    },
    Color {
        layer: LayerId,
        label: &'static str,
    },
    FontSize {
        layer: LayerId,
        label: &'static str,
        min: f64,
        max: f64,
    },
}

/// Every control of the panel, fields first, then per-layer style controls
pub fn controls() -> Vec<Control> {
    let fields = FieldKey::ALL.into_iter().map(|key| Control::Text {
        key,
        label: key.label(),
    });
    let styles = LayerId::ALL.into_iter().flat_map(|layer| {
        let range = layer.font_size_range();
        [
            Control::Color {
                layer,
                label: layer.label(),
            },
            Control::FontSize {
                layer,
                label: layer.label(),
                min: *range.start(),
                max: *range.end(),
            },
        ]
    });
    fields.chain(styles).collect()
}

/// A single user edit
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEdit {
    SetField(FieldKey, String),
    SetColor(LayerId, String),
    SetFontSize(LayerId, f64),
    Move(LayerId, Position),
    Drag(LayerId, f64, f64),
    ResetPositions,
    ResetStyles,
    SelectBackground(String),
}

/// Validate an edit and apply it; a rejected edit changes nothing
pub fn apply(state: &mut CardState, edit: PanelEdit, canvas: (f64, f64)) -> Result<(), PanelError> {
    match edit {
        PanelEdit::SetField(key, value) => state.set_field(key, value),
        PanelEdit::SetColor(layer, color) => {
            validate_color(&color)?;
            state.set_color(layer, color);
        }
        PanelEdit::SetFontSize(layer, size) => {
            let range = layer.font_size_range();
            if !range.contains(&size) {
                return Err(PanelError::FontSizeOutOfRange {
                    layer,
                    size,
                    min: *range.start(),
                    max: *range.end(),
                });
            }
            state.set_font_size(layer, size);
        }
        PanelEdit::Move(layer, position) => {
            check_finite(layer, position.x, position.y)?;
            state.move_layer(layer, position);
        }
        PanelEdit::Drag(layer, dx, dy) => {
            check_finite(layer, dx, dy)?;
            state.drag_layer(layer, dx, dy, canvas);
        }
        PanelEdit::ResetPositions => state.reset_positions(),
        PanelEdit::ResetStyles => state.reset_styles(),
        PanelEdit::SelectBackground(name) => state.set_background(Background::bundled(&name)?),
    }
    Ok(())
}

fn check_finite(layer: LayerId, x: f64, y: f64) -> Result<(), PanelError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(PanelError::NonFiniteCoordinates { layer, x, y })
    }
}

/// Accept `#rgb` or `#rrggbb`
pub fn validate_color(color: &str) -> Result<(), PanelError> {
    let valid = color
        .strip_prefix('#')
        .map(|hex| (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(PanelError::InvalidColor(color.to_string()))
    }
}

/// Text view of the current values
pub fn render(state: &CardState) -> String {
    let mut out = String::new();

    out.push_str("FIELDS\n");
    for control in controls() {
        if let Control::Text { key, label } = control {
            let _ = writeln!(out, "  {:<18} {:<16} {:?}", label, key.name(), state.fields.get(key));
        }
    }

    out.push_str("\nLAYERS\n");
    for layer in LayerId::ALL {
        let style = &state.styles[layer];
        let pos = state.positions[layer];
        let range = layer.font_size_range();
        let _ = writeln!(
            out,
            "  {:<10} color {:<8} size {:>5} ({}-{})  at ({}, {})",
            layer.name(),
            style.color,
            style.font_size,
            range.start(),
            range.end(),
            pos.x,
            pos.y
        );
    }

    let _ = writeln!(out, "\nBACKGROUND\n  {}", state.background.describe());
    out
}

/// Parse `KEY=VALUE` into a field edit
pub fn parse_field_edit(input: &str) -> Result<PanelEdit, PanelError> {
    let (key, value) = split_assignment(input, "KEY=VALUE")?;
    // Shells cannot easily pass newlines, so accept a literal \n in comments
    let value = value.replace("\\n", "\n");
    Ok(PanelEdit::SetField(key.parse()?, value))
}

/// Parse `LAYER=#COLOR`
pub fn parse_color_edit(input: &str) -> Result<PanelEdit, PanelError> {
    let (layer, color) = split_assignment(input, "LAYER=#COLOR")?;
    Ok(PanelEdit::SetColor(layer.parse()?, color.trim().to_string()))
}

/// Parse `LAYER=SIZE`
pub fn parse_size_edit(input: &str) -> Result<PanelEdit, PanelError> {
    let (layer, size) = split_assignment(input, "LAYER=SIZE")?;
    let size = parse_number(size, input, "LAYER=SIZE")?;
    Ok(PanelEdit::SetFontSize(layer.parse()?, size))
}

/// Parse `LAYER=X,Y` as an absolute move
pub fn parse_move_edit(input: &str) -> Result<PanelEdit, PanelError> {
    let (layer, xy) = split_assignment(input, "LAYER=X,Y")?;
    let point = parse_point(xy, input, "LAYER=X,Y")?;
    Ok(PanelEdit::Move(layer.parse()?, point))
}

/// Parse `LAYER=DX,DY` as a drag delta
pub fn parse_drag_edit(input: &str) -> Result<PanelEdit, PanelError> {
    let (layer, delta) = split_assignment(input, "LAYER=DX,DY")?;
    let d = parse_point(delta, input, "LAYER=DX,DY")?;
    Ok(PanelEdit::Drag(layer.parse()?, d.x, d.y))
}

/// Parse a pointer gesture `X,Y:X,Y` into start and end points
pub fn parse_gesture(input: &str) -> Result<(Position, Position), PanelError> {
    const EXPECTED: &str = "X,Y:X,Y";
    let (start, end) = input.split_once(':').ok_or_else(|| PanelError::Syntax {
        input: input.to_string(),
        expected: EXPECTED,
    })?;
    Ok((
        parse_point(start, input, EXPECTED)?,
        parse_point(end, input, EXPECTED)?,
    ))
}

fn split_assignment<'a>(
    input: &'a str,
    expected: &'static str,
) -> Result<(&'a str, &'a str), PanelError> {
    input.split_once('=').ok_or_else(|| PanelError::Syntax {
        input: input.to_string(),
        expected,
    })
}

fn parse_number(text: &str, input: &str, expected: &'static str) -> Result<f64, PanelError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| PanelError::Syntax {
            input: input.to_string(),
            expected,
        })
}

fn parse_point(text: &str, input: &str, expected: &'static str) -> Result<Position, PanelError> {
    let (x, y) = text.split_once(',').ok_or_else(|| PanelError::Syntax {
        input: input.to_string(),
        expected,
    })?;
    Ok(Position::new(
        parse_number(x, input, expected)?,
        parse_number(y, input, expected)?,
    ))
}
