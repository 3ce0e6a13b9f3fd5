//! eQSL card editor CLI
//!
//! Usage:
//!   eqsl-card [OPTIONS]
//!
//! Edits are applied in this order: template, background, resets, field
//! values, styles, moves and drags. Outputs are written last.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::info;

use eqsl_card::background::BundledBackground;
use eqsl_card::export::{self, ExportError};
use eqsl_card::fields::FieldKey;
use eqsl_card::layers::LayerId;
use eqsl_card::panel::{self, PanelEdit, PanelError};
use eqsl_card::template::{TemplateError, TEMPLATE_FILE_NAME};
use eqsl_card::{CardError, ConfigError, Editor, EditorConfig};

#[derive(Parser)]
#[command(name = "eqsl-card")]
#[command(about = "Compose amateur-radio eQSL cards and export them as PNG or JSON templates")]
struct Cli {
    /// Template to start from (JSON saved with --save-template)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Editor configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set a text field, e.g. --set callsign=DL1ABC
    #[arg(long, value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Set a layer color, e.g. --color contact=#ffd700
    #[arg(long, value_name = "LAYER=#COLOR")]
    color: Vec<String>,

    /// Set a layer font size, e.g. --size callsign=120
    #[arg(long, value_name = "LAYER=SIZE")]
    size: Vec<String>,

    /// Place a layer at absolute canvas coordinates
    #[arg(long = "move", value_name = "LAYER=X,Y")]
    move_to: Vec<String>,

    /// Drag a layer by a delta
    #[arg(long, value_name = "LAYER=DX,DY")]
    drag: Vec<String>,

    /// Drag whatever layer is under the first point to the second point
    #[arg(long, value_name = "X,Y:X,Y")]
    drag_from: Vec<String>,

    /// Restore default layer positions
    #[arg(long)]
    reset_positions: bool,

    /// Restore default layer colors and sizes
    #[arg(long)]
    reset_styles: bool,

    /// Use a bundled background (see --list-backgrounds)
    #[arg(short, long, value_name = "NAME", conflicts_with = "background_file")]
    background: Option<String>,

    /// Use an image file as background (PNG, JPEG, GIF, WebP or SVG)
    #[arg(long, value_name = "FILE")]
    background_file: Option<PathBuf>,

    /// Export the card as PNG (file or directory)
    #[arg(long, value_name = "PATH")]
    png: Option<PathBuf>,

    /// Export the composed SVG canvas
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Print the PNG as a data URL on stdout
    #[arg(long)]
    data_url: bool,

    /// Save the card as a JSON template (file or directory)
    #[arg(long, value_name = "PATH")]
    save_template: Option<PathBuf>,

    /// Export scale (pixel ratio) for PNG output
    #[arg(long)]
    scale: Option<f32>,

    /// Print the property panel with current values
    #[arg(long)]
    show: bool,

    /// List bundled backgrounds
    #[arg(long)]
    list_backgrounds: bool,

    /// List text fields and layers
    #[arg(long)]
    list_fields: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn has_output(&self) -> bool {
        self.png.is_some()
            || self.svg.is_some()
            || self.data_url
            || self.save_template.is_some()
            || self.show
    }

    fn has_edits(&self) -> bool {
        self.template.is_some()
            || !self.set.is_empty()
            || !self.color.is_empty()
            || !self.size.is_empty()
            || !self.move_to.is_empty()
            || !self.drag.is_empty()
            || !self.drag_from.is_empty()
            || self.reset_positions
            || self.reset_styles
            || self.background.is_some()
            || self.background_file.is_some()
            || self.scale.is_some()
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_backgrounds {
        print_backgrounds();
        return;
    }

    if cli.list_fields {
        print_fields();
        return;
    }

    if !cli.has_output() {
        if cli.has_edits() {
            eprintln!(
                "Error: nothing to write; add --png, --svg, --data-url, --save-template or --show"
            );
            process::exit(1);
        }
        print_intro();
        return;
    }

    if let Err(e) = run(&cli) {
        match e {
            RunError::TemplateSource { path, source, error } => {
                eprint!("{}", error.format(&source, &path.display().to_string()));
            }
            RunError::Card(e) => eprintln!("Error: {}", e),
        }
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Failures of a CLI run
enum RunError {
    /// Template JSON that failed to parse, kept for an annotated report
    TemplateSource {
        path: PathBuf,
        source: String,
        error: TemplateError,
    },
    Card(CardError),
}

impl From<CardError> for RunError {
    fn from(e: CardError) -> Self {
        RunError::Card(e)
    }
}

impl From<TemplateError> for RunError {
    fn from(e: TemplateError) -> Self {
        RunError::Card(e.into())
    }
}

impl From<PanelError> for RunError {
    fn from(e: PanelError) -> Self {
        RunError::Card(e.into())
    }
}

impl From<ExportError> for RunError {
    fn from(e: ExportError) -> Self {
        RunError::Card(e.into())
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        RunError::Card(e.into())
    }
}

fn run(cli: &Cli) -> Result<(), RunError> {
    let mut config = match &cli.config {
        Some(path) => EditorConfig::from_file(path)?,
        None => EditorConfig::default(),
    };
    if let Some(scale) = cli.scale {
        config = config.with_export_scale(scale);
        config.validate()?;
    }

    let mut editor = Editor::new(config);

    if let Some(path) = &cli.template {
        load_template(&mut editor, path)?;
    }

    if let Some(name) = &cli.background {
        editor.apply(PanelEdit::SelectBackground(name.clone()))?;
    }
    if let Some(path) = &cli.background_file {
        let bytes = fs::read(path).map_err(|source| CardError::Io {
            path: path.clone(),
            source,
        })?;
        editor.upload_background(bytes)?;
    }

    if cli.reset_positions {
        editor.apply(PanelEdit::ResetPositions)?;
    }
    if cli.reset_styles {
        editor.apply(PanelEdit::ResetStyles)?;
    }

    let parsers: [(&Vec<String>, fn(&str) -> Result<PanelEdit, PanelError>); 5] = [
        (&cli.set, panel::parse_field_edit),
        (&cli.color, panel::parse_color_edit),
        (&cli.size, panel::parse_size_edit),
        (&cli.move_to, panel::parse_move_edit),
        (&cli.drag, panel::parse_drag_edit),
    ];
    for (inputs, parse) in parsers {
        for input in inputs {
            editor.apply(parse(input)?)?;
        }
    }

    for gesture in &cli.drag_from {
        let (start, end) = panel::parse_gesture(gesture)?;
        match editor.drag_from(start, end) {
            Some(layer) => info!("dragged layer {}", layer),
            None => eprintln!("Warning: no layer at ({}, {})", start.x, start.y),
        }
    }

    write_outputs(cli, &editor)
}

fn load_template(editor: &mut Editor, path: &Path) -> Result<(), RunError> {
    let bytes = fs::read(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source = String::from_utf8(bytes).map_err(|_| TemplateError::Utf8)?;
    editor
        .load_template(&source)
        .map_err(|error| RunError::TemplateSource {
            path: path.to_path_buf(),
            source,
            error,
        })
}

fn write_outputs(cli: &Cli, editor: &Editor) -> Result<(), RunError> {
    if let Some(path) = &cli.save_template {
        let json = editor.save_template();
        let written = export::download(path, TEMPLATE_FILE_NAME, json.as_bytes())?;
        eprintln!("Saved template to {}", written.display());
    }

    if let Some(path) = &cli.svg {
        let svg = editor.render_svg();
        let written = export::download(path, "eqsl-card.svg", svg.as_bytes())?;
        eprintln!("Saved SVG to {}", written.display());
    }

    if cli.png.is_some() || cli.data_url {
        let png = editor.export_png()?;
        if let Some(path) = &cli.png {
            let written = export::download(path, &editor.png_file_name(), &png)?;
            eprintln!("Saved PNG to {}", written.display());
        }
        if cli.data_url {
            println!("{}", export::png_data_url(&png));
        }
    }

    if cli.show {
        print!("{}", editor.panel());
    }

    Ok(())
}

fn print_intro() {
    println!(
        r#"eqsl-card - compose amateur-radio eQSL cards

USAGE:
    eqsl-card [OPTIONS]

QUICK START:
    eqsl-card --set callsign=DL1ABC --set contact=W1AW --set band=20m \
              --set mode=SSB --set rst=59 --background sunset --png card.png

    eqsl-card --template card.json --drag callsign=0,20 --save-template card.json

Run --list-fields for field and layer names, --list-backgrounds for the
bundled artwork, --show to print the current values, or --help for all
options."#
    );
}

fn print_backgrounds() {
    println!("BUNDLED BACKGROUNDS");
    for bg in BundledBackground::ALL {
        println!("  {:<10} {}", bg.name(), bg.description());
    }
}

fn print_fields() {
    println!("FIELDS (--set KEY=VALUE)");
    for key in FieldKey::ALL {
        println!("  {:<16} {}", key.name(), key.label());
    }
    println!();
    println!("LAYERS (--color, --size, --move, --drag)");
    for layer in LayerId::ALL {
        let range = layer.font_size_range();
        println!(
            "  {:<10} {:<16} size {}-{}",
            layer.name(),
            layer.label(),
            range.start(),
            range.end()
        );
    }
}
