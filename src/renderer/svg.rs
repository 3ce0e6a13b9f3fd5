//! SVG generation from card state

use crate::layers::{LayerId, LayerStyle, Position, BASELINE_OFFSET, LINE_HEIGHT};
use crate::state::CardState;

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    background: Option<String>,
    layers: Vec<String>,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            background: None,
            layers: vec![],
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self, depth: usize) -> String {
        if self.config.pretty_print {
            "  ".repeat(depth)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Set the background image covering the whole canvas
    pub fn set_background(&mut self, href: &str) {
        let prefix = self.prefix();
        // slice keeps the aspect ratio and crops whatever overflows the card
        self.background = Some(format!(
            r#"{}<image class="{}background" x="0" y="0" width="{}" height="{}" preserveAspectRatio="xMidYMid slice" href="{}"/>"#,
            self.indent_str(1),
            prefix,
            self.config.width,
            self.config.height,
            escape_xml(href)
        ));
    }

    /// Add a text layer, one `<tspan>` per line
    pub fn add_text_layer(
        &mut self,
        layer: LayerId,
        lines: &[String],
        position: Position,
        style: &LayerStyle,
    ) {
        if lines.is_empty() {
            return;
        }

        let prefix = self.prefix();
        let nl = self.newline().to_string();
        let weight = if layer.is_bold() {
            r#" font-weight="bold""#
        } else {
            ""
        };

        let mut text = format!(
            r#"{}<text id="layer-{}" class="{}layer {}{}" fill="{}" font-size="{}" font-family="{}"{}>"#,
            self.indent_str(1),
            layer.name(),
            prefix,
            prefix,
            layer.name(),
            escape_xml(&style.color),
            style.font_size,
            escape_xml(&self.config.font_family),
            weight
        );
        text.push_str(&nl);

        for (i, line) in lines.iter().enumerate() {
            let y = position.y + style.font_size * (BASELINE_OFFSET + LINE_HEIGHT * i as f64);
            text.push_str(&format!(
                r#"{}<tspan x="{}" y="{}">{}</tspan>"#,
                self.indent_str(2),
                position.x,
                y,
                escape_xml(line)
            ));
            text.push_str(&nl);
        }

        text.push_str(&format!("{}</text>", self.indent_str(1)));
        self.layers.push(text);
    }

    /// Build the final SVG string
    pub fn build(self) -> String {
        let nl = self.newline();
        let (width, height) = (self.config.width, self.config.height);

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            width, height, width, height
        ));
        svg.push_str(nl);

        if let Some(background) = &self.background {
            svg.push_str(background);
            svg.push_str(nl);
        }

        // Text layers (draw order: later ones on top)
        for layer in &self.layers {
            svg.push_str(layer);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Compose the card as an SVG document
pub fn render_svg(state: &CardState, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.set_background(&state.background.data_url());

    for layer in LayerId::ALL {
        let lines = layer.lines(&state.fields);
        builder.add_text_layer(layer, &lines, state.positions[layer], &state.styles[layer]);
    }

    builder.build()
}

/// Topmost layer whose estimated text box contains `point`
///
/// Layers with no text cannot be grabbed.
pub fn hit_test(state: &CardState, point: Position) -> Option<LayerId> {
    LayerId::ALL.into_iter().rev().find(|&layer| {
        let bounds = layer.bounds(&state.fields, state.positions[layer], &state.styles[layer]);
        !bounds.is_empty() && bounds.contains(point)
    })
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
