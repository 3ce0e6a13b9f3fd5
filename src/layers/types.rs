//! Geometry and style types shared by the store, compositor and panel

use serde::{Deserialize, Serialize};

/// A 2D point in canvas pixels
///
/// Used both for layer anchors (top-left of the text block) and for
/// pointer coordinates of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by a delta
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Clamp into the rectangle `[0, width] x [0, height]`
    pub fn clamp_to(self, width: f64, height: f64) -> Self {
        Self::new(self.x.clamp(0.0, width.max(0.0)), self.y.clamp(0.0, height.max(0.0)))
    }
}

/// A bounding box representing the estimated extent of a text layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Color and size of one text layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    /// CSS color, e.g. `#ffd700`
    pub color: String,
    /// Font size in pixels
    pub font_size: f64,
}

impl LayerStyle {
    pub fn new(color: impl Into<String>, font_size: f64) -> Self {
        Self {
            color: color.into(),
            font_size,
        }
    }
}
