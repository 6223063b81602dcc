use serde::{Deserialize, Serialize};

use crate::models::analysis::{PersonalityProfile, SwipeBehavior};
use crate::models::score::EnhancedCompatibilityScore;

/// Derived profiles of one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAnalysis {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub personality: PersonalityProfile,
    pub behavior: SwipeBehavior,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairReport {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "targetUserId")]
    pub target_user_id: String,
    pub compatibility: EnhancedCompatibilityScore,
}

/// Output of a batch analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(rename = "reportId")]
    pub report_id: uuid::Uuid,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub users: Vec<UserAnalysis>,
    pub pairs: Vec<PairReport>,
}
