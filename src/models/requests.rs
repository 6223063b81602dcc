use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::models::domain::{Message, Profile, SwipeEvent};
use crate::models::neuro::NeuroProfile;

/// Batch analysis request consumed by the report runner
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalysisRequest {
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub profiles: Vec<Profile>,
    /// Swipe history keyed by user id
    #[serde(default)]
    pub swipes: HashMap<String, Vec<SwipeEvent>>,
    /// Message history keyed by user id
    #[serde(default)]
    pub messages: HashMap<String, Vec<Message>>,
    #[serde(rename = "neuroProfiles", default)]
    pub neuro_profiles: Vec<NeuroProfile>,
    /// Pairs to score; every unordered pair of `profiles` when empty
    #[serde(default)]
    #[validate(nested)]
    pub pairs: Vec<PairRequest>,
}

/// Ordered pair: `user_id` is the side whose neuro profile is applied
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PairRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: String,
}
