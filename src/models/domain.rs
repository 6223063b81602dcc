use serde::{Deserialize, Serialize};
use validator::Validate;

/// Snapshot of a user profile supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(length(min = 1))]
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub bio: String,
    /// Treated as a set: order and duplicates are irrelevant
    #[serde(default)]
    pub interests: Vec<String>,
    pub age: u8,
}

impl Profile {
    pub fn new(user_id: impl Into<String>, bio: impl Into<String>, interests: &[&str], age: u8) -> Self {
        Self {
            user_id: user_id.into(),
            bio: bio.into(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            age,
        }
    }
}

/// Decision taken on a discovery card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAction {
    Pass,
    Like,
    /// Recorded for the caller; behavior patterns count only plain likes
    SuperLike,
}

/// One swipe decision with the optional signals captured alongside it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeEvent {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "targetUserId")]
    pub target_user_id: String,
    pub action: SwipeAction,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "targetAge", default)]
    pub target_age: Option<u8>,
    #[serde(rename = "distanceKm", default)]
    pub distance_km: Option<f64>,
    /// Time from card shown to decision, in milliseconds
    #[serde(rename = "decisionMs", default)]
    pub decision_ms: Option<u64>,
    #[serde(rename = "profileViewMs", default)]
    pub profile_view_ms: Option<u64>,
}

/// Chat message as delivered by the conversation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "senderId")]
    pub sender_id: String,
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
