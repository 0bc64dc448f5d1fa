use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory layout relative to the project root. The crawler writes the
/// input directories; the pipeline owns the processed and output directories.
pub const EXTENDED_DATA_DIR: &str = "CrawlerData/ExtendedCrawlerData";
pub const CITATIONS_DATA_DIR: &str = "CrawlerData/CitationsCrawlerData";
pub const COMMITTEE_DATA_DIR: &str = "CommitteeData";
pub const PROCESSED_DATA_DIR: &str = "ProcessedData";
pub const CSV_OUTPUT_DIR: &str = "outputs/csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub project_root: PathBuf,
    pub output_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let project_root = env::var("CONFGEO_PROJECT_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        if !project_root.exists() {
            return Err(Error::Config(format!(
                "project root does not exist: {}",
                project_root.display()
            )));
        }

        let output_dir = env::var("CONFGEO_OUTPUT_DIR").ok().map(PathBuf::from);

        Ok(Self {
            project_root,
            output_dir,
        })
    }

    pub fn extended_data_dir(&self) -> PathBuf {
        self.project_root.join(EXTENDED_DATA_DIR)
    }

    pub fn citations_data_dir(&self) -> PathBuf {
        self.project_root.join(CITATIONS_DATA_DIR)
    }

    pub fn committee_data_dir(&self) -> PathBuf {
        self.project_root.join(COMMITTEE_DATA_DIR)
    }

    pub fn processed_data_dir(&self) -> PathBuf {
        self.project_root.join(PROCESSED_DATA_DIR)
    }

    pub fn csv_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.project_root.join(CSV_OUTPUT_DIR))
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub project_root: PathBuf,
    pub csv_output_dir: PathBuf,
    pub skip_reports: bool,
}

impl PipelineConfig {
    pub fn new(config: &Config) -> Self {
        Self {
            project_root: config.project_root.clone(),
            csv_output_dir: config.csv_output_dir(),
            skip_reports: false,
        }
    }

    pub fn processed_data_dir(&self) -> PathBuf {
        self.project_root.join(PROCESSED_DATA_DIR)
    }

    pub fn dir(&self, relative: &str) -> PathBuf {
        self.project_root.join(relative)
    }
}

/// Create the output directory structure the pipeline writes into.
pub fn setup_output_directories(project_root: &Path) -> Result<()> {
    for dir in [PROCESSED_DATA_DIR, CSV_OUTPUT_DIR] {
        std::fs::create_dir_all(project_root.join(dir))?;
    }
    Ok(())
}
