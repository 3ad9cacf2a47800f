pub mod analysis;
pub mod config;
pub mod error;
pub mod pipeline;

pub use config::{load_config, AnalysisConfig};
pub use error::{AnalyseError, AnalyseResult};
pub use pipeline::{run, PipelineReport};
