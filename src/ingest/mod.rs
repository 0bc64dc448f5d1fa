//! Tolerant loading of crawled JSON files.
//!
//! Crawler output is messy: mixed schemas, nulls where lists belong, the
//! occasional truncated file. Loading is forgiving at the record level and
//! only errors out when a whole file or directory is unusable.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{Paper, ProcessedPaper};

pub fn load_json(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, data)?;
    Ok(())
}

/// Conference stems for files named `<stem><suffix>` in a directory, sorted.
pub fn conference_stems(dir: &Path, suffix: &str) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(Error::MissingDirectory(dir.to_path_buf()));
    }

    let mut stems = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(stem) = name.strip_suffix(suffix) {
            if !stem.is_empty() && !stems.iter().any(|s| s == stem) {
                stems.push(stem.to_string());
            }
        }
    }
    stems.sort();
    Ok(stems)
}

/// Year-keyed paper records from an extended crawler file. Years that are not
/// lists and records that fail to parse are skipped with a warning.
pub fn papers_by_year(path: &Path) -> Result<Vec<(String, Vec<Paper>)>> {
    records_by_year(path)
}

/// Year-keyed records from a processed data file.
pub fn processed_by_year(path: &Path) -> Result<Vec<(String, Vec<ProcessedPaper>)>> {
    records_by_year(path)
}

fn records_by_year<T: DeserializeOwned>(path: &Path) -> Result<Vec<(String, Vec<T>)>> {
    let data = load_json(path)?;
    let map = match data {
        Value::Object(map) => map,
        _ => {
            warn!(
                "skipping {}: expected a year-to-records object",
                path.display()
            );
            return Ok(Vec::new());
        }
    };

    let mut years = Vec::new();
    for (year, records) in map {
        let entries = match records {
            Value::Array(entries) => entries,
            _ => {
                warn!(
                    "skipping year {} in {}: expected a list",
                    year,
                    path.display()
                );
                continue;
            }
        };

        let mut parsed = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<T>(entry) {
                Ok(record) => parsed.push(record),
                Err(e) => warn!(
                    "skipping malformed record in {} (year {}): {}",
                    path.display(),
                    year,
                    e
                ),
            }
        }
        years.push((year, parsed));
    }

    Ok(years)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerates_schema_violations() {
        let raw = serde_json::json!({
            "2020": [
                {"Title": "A paper", "Year": "2020", "Authors and Institutions": null},
                "not a paper record"
            ],
            "2021": "not a list"
        });

        let dir = std::env::temp_dir().join("confgeo_ingest_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("conf_extended_data.json");
        save_json(&path, &raw).unwrap();

        let years = papers_by_year(&path).unwrap();
        assert_eq!(years.len(), 1);
        assert_eq!(years[0].0, "2020");
        assert_eq!(years[0].1.len(), 1);
        assert_eq!(years[0].1[0].title, "A paper");
        assert!(years[0].1[0].authors.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = Path::new("/nonexistent/confgeo/file.json");
        assert!(matches!(
            load_json(path),
            Err(Error::MissingFile(_))
        ));
    }
}
