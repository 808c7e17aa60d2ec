//! Sheet ingest: raw exported rows → normalized [`TraitRecord`]s.
//!
//! The first row is the header. Columns are located by name, so sheet column
//! order does not matter, but all of [`REQUIRED_COLUMNS`] must be present.
//!
//! Per row:
//! - `Acquired By` is a multi-line cell: split on newlines, trim, drop blanks
//! - `Level` "3" rows are dropped (already maxed, irrelevant to planning)
//! - unparseable levels fall back to 0
//! - rows with a blank `Inheritance Name` are skipped

use crate::error::{PlannerError, Result};
use crate::optimizer::{Rarity, TraitRecord};

pub const COL_NAME: &str = "Inheritance Name";
pub const COL_LEVEL: &str = "Level";
pub const COL_ACQUIRED_BY: &str = "Acquired By";
pub const COL_RARITY: &str = "Rarity";

pub const REQUIRED_COLUMNS: [&str; 4] = [COL_NAME, COL_LEVEL, COL_ACQUIRED_BY, COL_RARITY];

/// Level at which an inheritance is maxed out and excluded.
pub const MAX_LEVEL: u8 = 3;

/// Header name → column position for the required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub level: usize,
    pub acquired_by: usize,
    pub rarity: usize,
}

impl ColumnMap {
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self> {
        let find = |column: &str| {
            header
                .iter()
                .position(|h| AsRef::<str>::as_ref(h).trim() == column)
                .ok_or_else(|| PlannerError::MissingColumn { column: column.to_string() })
        };
        Ok(Self {
            name: find(COL_NAME)?,
            level: find(COL_LEVEL)?,
            acquired_by: find(COL_ACQUIRED_BY)?,
            rarity: find(COL_RARITY)?,
        })
    }
}

/// Ingest statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub skipped_max_level: u32,
    pub skipped_blank: u32,
    pub level_fallbacks: u32,
}

/// Split a multi-line `Acquired By` cell into source names.
pub fn normalize_sources(cell: &str) -> Vec<String> {
    cell.lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parsed level, or `None` for a maxed row. The flag reports a fallback to 0.
pub fn parse_level(raw: &str) -> (Option<u8>, bool) {
    match raw.trim().parse::<u8>() {
        Ok(MAX_LEVEL) => (None, false),
        Ok(level) if level < MAX_LEVEL => (Some(level), false),
        _ => (Some(0), true),
    }
}

/// Convert exported rows (header first) into planner records.
pub fn records_from_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<(Vec<TraitRecord>, IngestStats)> {
    let (header, data) = rows.split_first().ok_or(PlannerError::EmptySheet)?;
    let columns = ColumnMap::from_header(header)?;

    let mut stats = IngestStats::default();
    let mut records = Vec::with_capacity(data.len());

    for (offset, row) in data.iter().enumerate() {
        stats.total_rows += 1;
        // short rows: trailing empty cells are dropped by the export
        let cell = |idx: usize| row.get(idx).map(AsRef::<str>::as_ref).unwrap_or("");

        let trait_name = cell(columns.name).trim();
        if trait_name.is_empty() {
            stats.skipped_blank += 1;
            continue;
        }

        let level = match parse_level(cell(columns.level)) {
            (None, _) => {
                stats.skipped_max_level += 1;
                continue;
            }
            (Some(level), fallback) => {
                if fallback {
                    stats.level_fallbacks += 1;
                    log::warn!(
                        "Row {} ('{}'): invalid level '{}', using 0",
                        offset + 2,
                        trait_name,
                        cell(columns.level)
                    );
                }
                level
            }
        };

        records.push(TraitRecord {
            trait_name: trait_name.to_string(),
            level,
            sources: normalize_sources(cell(columns.acquired_by)),
            rarity: Rarity::parse(cell(columns.rarity)),
        });
        stats.parsed += 1;
    }

    log::info!(
        "Ingested {} of {} rows ({} maxed, {} blank)",
        stats.parsed,
        stats.total_rows,
        stats.skipped_max_level,
        stats.skipped_blank
    );
    Ok((records, stats))
}
