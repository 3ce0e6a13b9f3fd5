//! An editing session: the state store plus its configuration
//!
//! Every user action goes through here, mutates the [`CardState`], and the
//! next render reads it back. Loads and uploads replace state wholesale.

use std::path::Path;

use log::{debug, info};

use crate::background::Background;
use crate::config::EditorConfig;
use crate::export::{self, ExportError};
use crate::layers::{LayerId, Position};
use crate::panel::{self, PanelEdit, PanelError};
use crate::renderer::{hit_test, render_svg};
use crate::state::CardState;
use crate::template::{Template, TemplateError};
use crate::CardError;

#[derive(Debug, Clone, Default)]
pub struct Editor {
    state: CardState,
    config: EditorConfig,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            state: CardState::new(),
            config,
        }
    }

    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Apply one panel edit
    pub fn apply(&mut self, edit: PanelEdit) -> Result<(), PanelError> {
        debug!("apply {:?}", edit);
        panel::apply(&mut self.state, edit, self.config.canvas())
    }

    /// Pointer drag from `start` to `end`
    ///
    /// Grabs the topmost layer under `start` and moves it by the pointer
    /// delta. Returns the layer that moved, if any.
    pub fn drag_from(&mut self, start: Position, end: Position) -> Option<LayerId> {
        let layer = hit_test(&self.state, start)?;
        self.state.drag_layer(
            layer,
            end.x - start.x,
            end.y - start.y,
            self.config.canvas(),
        );
        Some(layer)
    }

    /// Replace the background with an uploaded image
    pub fn upload_background(&mut self, bytes: Vec<u8>) -> Result<(), CardError> {
        let background = Background::from_upload(bytes)?;
        info!("background uploaded: {}", background.describe());
        self.state.set_background(background);
        Ok(())
    }

    /// Replace the whole state from template JSON; on error nothing changes
    pub fn load_template(&mut self, source: &str) -> Result<(), TemplateError> {
        let template = Template::from_json(source)?;
        self.state.restore(template);
        info!("template loaded");
        Ok(())
    }

    pub fn load_template_file(&mut self, path: &Path) -> Result<(), TemplateError> {
        let template = Template::from_file(path)?;
        self.state.restore(template);
        info!("template loaded from {}", path.display());
        Ok(())
    }

    /// Current state as template JSON
    pub fn save_template(&self) -> String {
        self.state.snapshot().to_json()
    }

    pub fn render_svg(&self) -> String {
        render_svg(&self.state, &self.config.svg_config())
    }

    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        export::render_png(&self.state, &self.config)
    }

    pub fn export_png_data_url(&self) -> Result<String, ExportError> {
        Ok(export::png_data_url(&self.export_png()?))
    }

    /// Download name for the PNG of the current card
    pub fn png_file_name(&self) -> String {
        export::default_png_name(&self.state.fields.callsign)
    }

    /// Text view of the property panel
    pub fn panel(&self) -> String {
        panel::render(&self.state)
    }
}
