//! The card state store
//!
//! `CardState` is the single source of truth for an editing session. The
//! compositor and the panel read it; edits, drags, uploads and template
//! loads write it. Nothing is cached alongside it.

use log::debug;

use crate::background::Background;
use crate::fields::{FieldKey, Fields};
use crate::layers::{LayerId, LayerMap, LayerStyle, Position};
use crate::template::Template;

#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    pub fields: Fields,
    pub styles: LayerMap<LayerStyle>,
    pub positions: LayerMap<Position>,
    pub background: Background,
}

impl Default for CardState {
    fn default() -> Self {
        Self {
            fields: Fields::default(),
            styles: default_styles(),
            positions: default_positions(),
            background: Background::default(),
        }
    }
}

/// Position map of a fresh card
pub fn default_positions() -> LayerMap<Position> {
    LayerMap::from_fn(LayerId::default_position)
}

/// Style map of a fresh card
pub fn default_styles() -> LayerMap<LayerStyle> {
    LayerMap::from_fn(LayerId::default_style)
}

impl CardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, key: FieldKey, value: impl Into<String>) {
        let value = value.into();
        debug!("field {} = {:?}", key, value);
        self.fields.set(key, value);
    }

    pub fn set_color(&mut self, layer: LayerId, color: impl Into<String>) {
        let color = color.into();
        debug!("layer {} color = {}", layer, color);
        self.styles[layer].color = color;
    }

    pub fn set_font_size(&mut self, layer: LayerId, font_size: f64) {
        debug!("layer {} font size = {}", layer, font_size);
        self.styles[layer].font_size = font_size;
    }

    /// Place a layer's anchor at an absolute position
    pub fn move_layer(&mut self, layer: LayerId, position: Position) {
        debug!("layer {} moved to ({}, {})", layer, position.x, position.y);
        self.positions[layer] = position;
    }

    /// Move a layer by a drag delta, keeping its anchor on the canvas
    pub fn drag_layer(&mut self, layer: LayerId, dx: f64, dy: f64, canvas: (f64, f64)) -> Position {
        let target = self.positions[layer].offset(dx, dy).clamp_to(canvas.0, canvas.1);
        debug!(
            "layer {} dragged by ({}, {}) to ({}, {})",
            layer, dx, dy, target.x, target.y
        );
        self.positions[layer] = target;
        target
    }

    pub fn reset_positions(&mut self) {
        debug!("positions reset to defaults");
        self.positions = default_positions();
    }

    pub fn reset_styles(&mut self) {
        debug!("styles reset to defaults");
        self.styles = default_styles();
    }

    pub fn set_background(&mut self, background: Background) {
        debug!("background = {}", background.describe());
        self.background = background;
    }

    /// Capture the full state as a template
    pub fn snapshot(&self) -> Template {
        Template {
            fields: self.fields.clone(),
            styles: self.styles.clone(),
            positions: self.positions.clone(),
            background: self.background.clone(),
        }
    }

    /// Replace the full state with a template's contents
    pub fn restore(&mut self, template: Template) {
        let Template {
            fields,
            styles,
            positions,
            background,
        } = template;
        *self = Self {
            fields,
            styles,
            positions,
            background,
        };
    }
}
