pub mod config;
pub mod error;
pub mod models;
pub mod ingest;
pub mod taxonomy;
pub mod analysis;
pub mod reports;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use analysis::{AnalysisPipeline, CompanyClassifier, ContinentMapper};
pub use reports::{BigTechAnalyzer, UnifiedCsvGenerator};
