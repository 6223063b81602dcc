// Service exports
pub mod analysis;
pub mod cache;

pub use analysis::{read_request, AnalysisService, ReportError};
pub use cache::{AnalysisCache, CacheStats, PairKey};
