//! Stroke export and import in the JSON wire form.
//!
//! An export document bundles every committed record with the surface size
//! at export time. Loading accepts either a full document or a bare array of
//! wire records.

use crate::draw::{StrokeRecord, SurfaceSize, WireRecord};
use crate::input::StrokeEngine;
use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CURRENT_VERSION: u32 = 1;

/// Serializable snapshot of a surface's committed strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeExport {
    pub version: u32,
    /// RFC 3339 timestamp of the export
    pub exported_at: String,
    /// Surface size when exported (zero when the surface was never laid out)
    pub surface: SurfaceSize,
    pub strokes: Vec<WireRecord>,
}

impl StrokeExport {
    pub fn from_records(records: &[StrokeRecord], surface: SurfaceSize) -> Self {
        Self {
            version: CURRENT_VERSION,
            exported_at: Utc::now().to_rfc3339(),
            surface,
            strokes: records.iter().map(WireRecord::from).collect(),
        }
    }

    /// Snapshot of the engine's committed strokes.
    pub fn from_engine(engine: &StrokeEngine) -> Self {
        Self::from_records(engine.strokes(), engine.surface().size())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialise stroke export")
    }

    /// Writes the export document to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        fs::write(path, json)
            .with_context(|| format!("failed to write stroke export {}", path.display()))?;
        info!("Exported {} stroke(s) to {}", self.strokes.len(), path.display());
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StrokeDocument {
    Export(StrokeExport),
    Records(Vec<WireRecord>),
}

/// Parses stroke records from JSON.
///
/// Records with an invalid color or width are skipped with a warning;
/// malformed points inside an otherwise valid record are dropped.
pub fn load_records(json: &str) -> Result<Vec<StrokeRecord>> {
    let document: StrokeDocument =
        serde_json::from_str(json).context("failed to parse stroke json")?;

    let wire = match document {
        StrokeDocument::Export(export) => {
            if export.version > CURRENT_VERSION {
                warn!(
                    "Stroke export version {} is newer than supported version {}",
                    export.version, CURRENT_VERSION
                );
            }
            debug!("Loading export from {}", export.exported_at);
            export.strokes
        }
        StrokeDocument::Records(records) => records,
    };

    let total = wire.len();
    let records: Vec<StrokeRecord> = wire
        .into_iter()
        .filter_map(|record| {
            let id = record.path.id;
            StrokeRecord::try_from(record)
                .map_err(|err| warn!("Skipping stroke {id}: {err}"))
                .ok()
        })
        .collect();
    debug!("Loaded {} of {} stroke record(s)", records.len(), total);
    Ok(records)
}

/// Reads and parses a stroke file.
pub fn load_records_file(path: &Path) -> Result<Vec<StrokeRecord>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read stroke file {}", path.display()))?;
    load_records(&json).with_context(|| format!("invalid stroke file {}", path.display()))
}
