//! Integration tests for a full editing session

use eqsl_card::background::BundledBackground;
use eqsl_card::panel::{self, PanelEdit, PanelError};
use eqsl_card::{Background, Editor, EditorConfig, FieldKey, LayerId, Position, Template};
use pretty_assertions::assert_eq;

const FIXTURE: &str = include_str!("fixtures/dl1abc.json");

fn small_config() -> EditorConfig {
    let mut config = EditorConfig::default();
    config.system_fonts = false;
    config.width = 300;
    config.height = 200;
    config
}

#[test]
fn test_load_fixture_template() {
    let mut editor = Editor::default();
    editor.load_template(FIXTURE).expect("Should load");

    let state = editor.state();
    assert_eq!(state.fields.callsign, "DL1ABC");
    assert_eq!(state.fields.comments, "Tnx for the QSO\n73 & gl");
    assert_eq!(state.styles[LayerId::Callsign].font_size, 110.0);
    assert_eq!(state.positions[LayerId::Contact], Position::new(640.0, 420.0));
    assert_eq!(state.background, Background::Bundled(BundledBackground::Sunset));
}

#[test]
fn test_fixture_renders_every_layer() {
    let mut editor = Editor::default();
    editor.load_template(FIXTURE).unwrap();
    let svg = editor.render_svg();

    for layer in LayerId::ALL {
        assert!(
            svg.contains(&format!(r#"id="layer-{}""#, layer)),
            "missing layer {}",
            layer
        );
    }
    assert!(svg.contains("To Radio: W1AW"));
    assert!(svg.contains("Freq: 14.205 MHz   Band: 20m"));
    assert!(svg.contains("73 &amp; gl"));
}

#[test]
fn test_edit_save_load_cycle() {
    let mut editor = Editor::default();
    let edits = [
        panel::parse_field_edit("callsign=PA3XYZ").unwrap(),
        panel::parse_field_edit("contact=JA1ZZZ").unwrap(),
        panel::parse_color_edit("contact=#ff8800").unwrap(),
        panel::parse_size_edit("callsign=140").unwrap(),
        panel::parse_drag_edit("qso=25,-40").unwrap(),
        PanelEdit::SelectBackground("night".to_string()),
    ];
    for edit in edits {
        editor.apply(edit).unwrap();
    }

    let json = editor.save_template();
    let mut restored = Editor::default();
    restored.load_template(&json).unwrap();

    assert_eq!(restored.state(), editor.state());
    assert_eq!(restored.render_svg(), editor.render_svg());
}

#[test]
fn test_uploaded_background_survives_template() {
    let mut editor = Editor::default();
    editor
        .upload_background(br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"/>"#.to_vec())
        .unwrap();
    let json = editor.save_template();
    assert!(json.contains(r#""kind": "embedded""#));
    assert!(json.contains("data:image/svg+xml;base64,"));

    let template = Template::from_json(&json).unwrap();
    assert_eq!(template.background, editor.state().background);
}

#[test]
fn test_rejected_edits_change_nothing() {
    let mut editor = Editor::default();
    let before = editor.state().clone();

    assert!(matches!(
        editor.apply(PanelEdit::SetFontSize(LayerId::Comments, 5.0)),
        Err(PanelError::FontSizeOutOfRange { .. })
    ));
    assert!(editor
        .apply(PanelEdit::SetColor(LayerId::Comments, "blue".into()))
        .is_err());
    assert!(editor
        .apply(PanelEdit::SelectBackground("jungle".into()))
        .is_err());
    assert!(editor.load_template(r#"{"fields": {}}"#).is_err());

    assert_eq!(editor.state(), &before);
}

#[test]
fn test_template_bypasses_panel_limits() {
    // Templates restore what they hold, even values the panel would refuse
    let mut json: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
    json["styles"]["callsign"]["font_size"] = serde_json::json!(400.0);
    json["styles"]["callsign"]["color"] = serde_json::json!("rebeccapurple");

    let mut editor = Editor::default();
    editor.load_template(&json.to_string()).unwrap();
    assert_eq!(editor.state().styles[LayerId::Callsign].font_size, 400.0);
    assert_eq!(editor.state().styles[LayerId::Callsign].color, "rebeccapurple");
}

#[test]
fn test_drag_gesture_then_reset() {
    let mut editor = Editor::default();
    editor.load_template(FIXTURE).unwrap();

    // Grab the contact layer near its anchor and pull it left
    let moved = editor.drag_from(Position::new(650.0, 430.0), Position::new(450.0, 430.0));
    assert_eq!(moved, Some(LayerId::Contact));
    assert_eq!(
        editor.state().positions[LayerId::Contact],
        Position::new(440.0, 420.0)
    );

    editor.apply(PanelEdit::ResetPositions).unwrap();
    for layer in LayerId::ALL {
        assert_eq!(editor.state().positions[layer], layer.default_position());
    }
    // Reset leaves text and styles alone
    assert_eq!(editor.state().fields.get(FieldKey::Callsign), "DL1ABC");
    assert_eq!(editor.state().styles[LayerId::Callsign].font_size, 110.0);
}

#[test]
fn test_export_png_and_data_url() {
    let mut editor = Editor::new(small_config());
    editor.load_template(FIXTURE).unwrap();

    let png = editor.export_png().expect("Should rasterize");
    assert_eq!(&png[..4], &[137, 80, 78, 71]);

    let url = editor.export_png_data_url().unwrap();
    assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    assert_eq!(editor.png_file_name(), "eqsl-DL1ABC.png");
}
