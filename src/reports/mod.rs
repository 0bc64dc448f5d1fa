//! Flat, denormalized CSV outputs consumed by the external plotting stage.

pub mod bigtech;
pub mod unified;

pub use bigtech::BigTechAnalyzer;
pub use unified::UnifiedCsvGenerator;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use crate::error::Result;

/// Outcome of writing one CSV file.
#[derive(Debug, Clone)]
pub struct CsvReport {
    pub path: PathBuf,
    pub rows: usize,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<CsvReport> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if rows.is_empty() {
        warn!("no rows to write to {}", path.display());
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(CsvReport {
        path: path.to_path_buf(),
        rows: rows.len(),
    })
}
