//! CSV export of the inheritance sheet → planner records.
//!
//! The export is read headerless so the core can map columns by name and
//! report a missing one. Multi-line `Acquired By` cells arrive as quoted
//! fields with embedded newlines.

use ae_core::ingest::{records_from_rows, IngestStats};
use ae_core::TraitRecord;
use anyhow::{Context, Result};
use std::path::Path;

/// Read every row (header included) as raw strings.
pub fn read_rows(csv_path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to read CSV row {} of {}", line + 1, csv_path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

pub fn load_records(csv_path: &Path) -> Result<(Vec<TraitRecord>, IngestStats)> {
    let rows = read_rows(csv_path)?;
    let parsed = records_from_rows(&rows)
        .with_context(|| format!("Unexpected sheet layout in {}", csv_path.display()))?;
    Ok(parsed)
}
