use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeuroCondition {
    Autism,
    Adhd,
    Anxiety,
    Depression,
    Dyslexia,
    Other,
}

/// Who may see a self report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharingLevel {
    Private,
    /// Only after matching
    Selective,
    Public,
    Proud,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeuroSelfReport {
    pub conditions: Vec<NeuroCondition>,
    #[serde(rename = "needsSupport")]
    pub needs_support: bool,
    #[serde(rename = "sharingLevel")]
    pub sharing_level: SharingLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeuroPreferences {
    #[serde(rename = "needsClearCommunication", default)]
    pub needs_clear_communication: bool,
    #[serde(rename = "prefersDirectness", default)]
    pub prefers_directness: bool,
    #[serde(rename = "sensitiveToCriticism", default)]
    pub sensitive_to_criticism: bool,
    #[serde(rename = "needsRoutine", default)]
    pub needs_routine: bool,
    #[serde(rename = "prefersTextOverVoice", default)]
    pub prefers_text_over_voice: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccommodationType {
    SensoryFiltering,
    SimplifiedInterface,
    ExtendedTime,
    ClearInstructions,
    ReducedStimulation,
    StructuredConversation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accommodation {
    pub kind: AccommodationType,
    pub description: String,
    pub implemented: bool,
}

impl Accommodation {
    fn implemented(kind: AccommodationType, description: &str) -> Self {
        Self {
            kind,
            description: description.to_string(),
            implemented: true,
        }
    }
}

/// Declared neurodiversity preferences of one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeuroProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "selfReport", default)]
    pub self_report: Option<NeuroSelfReport>,
    #[serde(default)]
    pub preferences: NeuroPreferences,
    #[serde(default)]
    pub accommodations: Vec<Accommodation>,
}

impl NeuroProfile {
    /// Build a profile whose accommodations follow from the declared preferences
    pub fn from_preferences(
        user_id: impl Into<String>,
        self_report: Option<NeuroSelfReport>,
        preferences: NeuroPreferences,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            self_report,
            accommodations: accommodations_for(&preferences),
            preferences,
        }
    }
}

/// Interface adjustments implied by a set of declared preferences
pub fn accommodations_for(preferences: &NeuroPreferences) -> Vec<Accommodation> {
    let mut accommodations = Vec::new();

    if preferences.needs_clear_communication {
        accommodations.push(Accommodation::implemented(
            AccommodationType::ClearInstructions,
            "Provide clear, detailed instructions",
        ));
    }
    if preferences.prefers_directness {
        accommodations.push(Accommodation::implemented(
            AccommodationType::StructuredConversation,
            "Structure conversations more directly",
        ));
    }
    if preferences.sensitive_to_criticism {
        accommodations.push(Accommodation::implemented(
            AccommodationType::ExtendedTime,
            "Allow extra time to process feedback",
        ));
    }
    if preferences.needs_routine {
        accommodations.push(Accommodation::implemented(
            AccommodationType::SimplifiedInterface,
            "Keep the interface simple and consistent",
        ));
    }

    accommodations
}
