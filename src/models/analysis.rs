use serde::{Deserialize, Serialize};

/// Big-Five style trait estimate, every value in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalityTraits {
    /// 0.0 introverted, 1.0 extraverted
    pub extraversion: f64,
    pub agreeableness: f64,
    pub conscientiousness: f64,
    /// 0.0 stable, 1.0 neurotic
    pub neuroticism: f64,
    pub openness: f64,
}

impl Default for PersonalityTraits {
    fn default() -> Self {
        Self {
            extraversion: 0.5,
            agreeableness: 0.7,
            conscientiousness: 0.6,
            neuroticism: 0.3,
            openness: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSpeed {
    /// Under 5 minutes
    Immediate,
    /// 5 to 30 minutes
    Quick,
    /// 30 minutes to 2 hours
    Moderate,
    /// 2 to 12 hours
    Slow,
    VerySlow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLength {
    /// Under 20 characters
    VeryShort,
    /// 20 to 50 characters
    Short,
    /// 50 to 150 characters
    Medium,
    /// 150 to 300 characters
    Long,
    VeryLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommunicationStyle {
    pub directness: f64,
    pub emotionality: f64,
    pub humor: f64,
    #[serde(rename = "responseSpeed")]
    pub response_speed: ResponseSpeed,
    #[serde(rename = "messageLength")]
    pub message_length: MessageLength,
}

impl Default for CommunicationStyle {
    fn default() -> Self {
        Self {
            directness: 0.5,
            emotionality: 0.5,
            humor: 0.3,
            response_speed: ResponseSpeed::Moderate,
            message_length: MessageLength::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SocialPreferences {
    #[serde(rename = "prefersGroupActivities")]
    pub prefers_group_activities: bool,
    #[serde(rename = "likesDeepConversations")]
    pub likes_deep_conversations: bool,
    #[serde(rename = "enjoysDebates")]
    pub enjoys_debates: bool,
    #[serde(rename = "prefersPlannedActivities")]
    pub prefers_planned_activities: bool,
    #[serde(rename = "socialEnergyLevel")]
    pub social_energy_level: f64,
}

/// Derived personality of one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Four-letter type tag such as "ENFJ"
    #[serde(rename = "typeTag")]
    pub type_tag: Option<String>,
    pub traits: PersonalityTraits,
    #[serde(rename = "communicationStyle")]
    pub communication_style: CommunicationStyle,
    #[serde(rename = "socialPreferences")]
    pub social_preferences: SocialPreferences,
    pub confidence: f64,
}

/// Inclusive age range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Number of ages covered, zero for an inverted range
    pub fn span(&self) -> i32 {
        (self.max as i32 - self.min as i32 + 1).max(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgePattern {
    #[serde(rename = "preferredRange")]
    pub preferred: AgeRange,
    /// Interquartile range of liked ages
    #[serde(rename = "mostLikedRange")]
    pub most_liked: AgeRange,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistancePattern {
    #[serde(rename = "averageKm")]
    pub average_km: f64,
    #[serde(rename = "maxAcceptableKm")]
    pub max_acceptable_km: f64,
    #[serde(rename = "preferredKm")]
    pub preferred_km: f64,
}

/// Coarse photo heuristics, not derived from image content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPreferences {
    #[serde(rename = "prefersMultiplePhotos")]
    pub prefers_multiple_photos: bool,
    #[serde(rename = "likesSmiling")]
    pub likes_smiling: bool,
    #[serde(rename = "likesOutdoorPhotos")]
    pub likes_outdoor_photos: bool,
    #[serde(rename = "likesGroupPhotos")]
    pub likes_group_photos: bool,
    #[serde(rename = "prefersCloseUp")]
    pub prefers_close_up: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioReadingBehavior {
    #[serde(rename = "averageReadingMs")]
    pub average_reading_ms: u64,
    #[serde(rename = "likesLongerBios")]
    pub likes_longer_bios: bool,
    #[serde(rename = "prefersKeywords")]
    pub prefers_keywords: Vec<String>,
    #[serde(rename = "avoidsKeywords")]
    pub avoids_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipePatterns {
    #[serde(rename = "averageDecisionMs")]
    pub average_decision_ms: u64,
    #[serde(rename = "likeRate")]
    pub like_rate: f64,
    #[serde(rename = "agePattern")]
    pub age_pattern: AgePattern,
    #[serde(rename = "distancePattern")]
    pub distance_pattern: DistancePattern,
    #[serde(rename = "photoPreferences")]
    pub photo_preferences: PhotoPreferences,
    #[serde(rename = "bioReading")]
    pub bio_reading: BioReadingBehavior,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredPreferences {
    #[serde(rename = "personalityTypes")]
    pub personality_types: Vec<String>,
    pub lifestyle: Vec<String>,
    pub interests: Vec<String>,
    #[serde(rename = "dealBreakers")]
    pub deal_breakers: Vec<String>,
}

/// Derived swipe behavior of one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeBehavior {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "swipeCount")]
    pub swipe_count: usize,
    pub patterns: SwipePatterns,
    pub preferences: InferredPreferences,
}
