use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

use strokecanvas::Config;
use strokecanvas::draw::{Point, RecordingBackend};
use strokecanvas::export::{self, StrokeExport};
use strokecanvas::input::{EngineSettings, InputEvent, StrokeEngine};

#[derive(Parser, Debug)]
#[command(name = "strokecanvas")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("STROKECANVAS_GIT_HASH"), ")"),
    about = "Stroke capture and eraser engine for drawing surfaces"
)]
struct Cli {
    /// Config file to use instead of ~/.config/strokecanvas/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Logical width of the drawing surface
    #[arg(long, value_name = "UNITS")]
    width: Option<f64>,

    /// Logical height of the drawing surface
    #[arg(long, value_name = "UNITS")]
    height: Option<f64>,

    /// JSON file with stroke records (an export document or a bare array) to replay
    #[arg(long, short = 's', value_name = "FILE")]
    strokes: Option<PathBuf>,

    /// JSON file with an array of gesture samples to feed through the engine
    #[arg(long, short = 'g', value_name = "FILE")]
    gestures: Option<PathBuf>,

    /// Feed the gesture samples in eraser mode
    #[arg(long, action = ArgAction::SetTrue)]
    eraser: bool,

    /// Owner tag for drawn strokes (overrides the config)
    #[arg(long, value_name = "NAME")]
    owner: Option<String>,

    /// Erase the strokes near a logical point, e.g. --erase 75,2 (repeatable)
    #[arg(long, value_name = "X,Y")]
    erase: Vec<Point>,

    /// Undo the most recent stroke of the owner
    #[arg(long, action = ArgAction::SetTrue)]
    undo: bool,

    /// Write the committed strokes as JSON to FILE ("-" for stdout)
    #[arg(long, value_name = "FILE")]
    export: Option<String>,
}

impl Cli {
    fn has_action(&self) -> bool {
        self.strokes.is_some()
            || self.gestures.is_some()
            || !self.erase.is_empty()
            || self.undo
            || self.export.is_some()
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if !cli.has_action() {
        print_usage();
        return Ok(());
    }

    let (Some(width), Some(height)) = (cli.width, cli.height) else {
        bail!("--width and --height are required to lay out the surface");
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut settings = EngineSettings::from(&config);
    if cli.owner.is_some() {
        settings.owner = cli.owner.clone();
    }

    let backend = RecordingBackend::new();
    let mut engine = StrokeEngine::new(settings, Box::new(backend.clone()));
    // Lines on stdout would corrupt an export written there
    let to_stdout = cli.export.as_deref() == Some("-");

    if let Some(path) = &cli.strokes {
        let records = export::load_records_file(path)?;
        info!("Replaying {} stroke(s) from {}", records.len(), path.display());
        for record in records {
            engine.add_stroke(record);
        }
    }

    engine.on_layout(width, height);

    if let Some(path) = &cli.gestures {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read gesture file {}", path.display()))?;
        let events: Vec<InputEvent> = serde_json::from_str(&json)
            .with_context(|| format!("invalid gesture file {}", path.display()))?;

        engine.set_eraser_mode(cli.eraser);
        debug!("Feeding {} gesture sample(s)", events.len());
        for event in &events {
            engine.on_event(event);
        }
        engine.finish_open_stroke();
        engine.set_eraser_mode(false);
    }

    for point in &cli.erase {
        let erased = engine.erase_at(*point);
        if to_stdout {
            info!("Erase at {point} removed {} stroke(s)", erased.len());
            continue;
        }
        if erased.is_empty() {
            println!("erase {point}: no hit");
        }
        for record in &erased {
            println!("erased {}", record.id());
        }
    }

    if cli.undo {
        let owner = engine.owner().map(str::to_string);
        let undone = engine.undo_last(owner.as_deref());
        match undone {
            Some(id) if !to_stdout => println!("undone {id}"),
            None if !to_stdout => println!("undo: nothing to undo"),
            _ => debug!("Undo result: {undone:?}"),
        }
    }

    match cli.export.as_deref() {
        Some("-") => {
            println!("{}", StrokeExport::from_engine(&engine).to_json_pretty()?);
            return Ok(());
        }
        Some(path) => StrokeExport::from_engine(&engine).save(path.as_ref())?,
        None => {}
    }

    for command in backend.commands() {
        println!("{command}");
    }

    Ok(())
}

fn print_usage() {
    println!("strokecanvas: Stroke capture and eraser engine for drawing surfaces");
    println!();
    println!("Usage:");
    println!("  strokecanvas --width W --height H --strokes FILE      Replay stroke records");
    println!("  strokecanvas --width W --height H --gestures FILE     Draw from gesture samples");
    println!("  strokecanvas ... --erase X,Y                          Erase strokes near a point");
    println!("  strokecanvas ... --export FILE                        Export committed strokes");
    println!("  strokecanvas --help                                   Show help");
    println!();
    println!("Render commands are printed one per line. Set RUST_LOG=debug for diagnostics.");
}
