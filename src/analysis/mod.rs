pub mod company;
pub mod continent;
pub mod pipeline;
pub mod predominance;

pub use company::CompanyClassifier;
pub use continent::ContinentMapper;
pub use pipeline::AnalysisPipeline;
pub use predominance::{predominant_continent, PredominanceResult};
