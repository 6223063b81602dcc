use std::sync::Arc;

use crate::core::similarity::unit;
use crate::models::{CompatibilityScore, EnhancedCompatibilityScore, MatchingRecommendation, NeuroProfile, Priority, Profile};

const NEURO_FACTOR_WEIGHT: f64 = 0.2;
const COMMUNICATION_ALIGNMENT_WEIGHT: f64 = 0.15;
const SUPPORT_ALIGNMENT_WEIGHT: f64 = 0.1;

/// Source of the three uplift signals blended into an enhanced score
///
/// Implementations must return values in [0, 1]; anything else is clamped.
pub trait NeuroSignalSource: Send + Sync {
    /// How well the two neurodiversity profiles fit together
    fn neuro_factor(&self, profile: &NeuroProfile, candidate: &Profile) -> f64;

    /// Whether the candidate's communication suits the declared needs
    fn communication_alignment(&self, profile: &NeuroProfile, candidate: &Profile) -> f64;

    /// Whether the pair could support each other's needs
    fn support_alignment(&self, profile: &NeuroProfile, candidate: &Profile) -> f64;
}

/// Fixed baseline signals used until real signal extraction exists
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineSignals;

impl NeuroSignalSource for BaselineSignals {
    fn neuro_factor(&self, _profile: &NeuroProfile, _candidate: &Profile) -> f64 {
        0.7
    }

    fn communication_alignment(&self, _profile: &NeuroProfile, _candidate: &Profile) -> f64 {
        0.8
    }

    fn support_alignment(&self, _profile: &NeuroProfile, _candidate: &Profile) -> f64 {
        0.6
    }
}

/// Adjusts a base compatibility score for one side's declared accommodations
#[derive(Clone)]
pub struct NeuroMatchingEnhancer {
    signals: Arc<dyn NeuroSignalSource>,
}

impl NeuroMatchingEnhancer {
    pub fn new(signals: Arc<dyn NeuroSignalSource>) -> Self {
        Self { signals }
    }

    pub fn with_baseline() -> Self {
        Self::new(Arc::new(BaselineSignals))
    }

    /// Blend the uplift signals into the base score
    ///
    /// The final score never drops below the (sanitized) base and never exceeds 1.0.
    pub fn enhance(
        &self,
        profile: &NeuroProfile,
        candidate: &Profile,
        base: CompatibilityScore,
    ) -> EnhancedCompatibilityScore {
        let neuro_factor = unit(self.signals.neuro_factor(profile, candidate));
        let communication_alignment = unit(self.signals.communication_alignment(profile, candidate));
        let support_alignment = unit(self.signals.support_alignment(profile, candidate));

        let uplift = NEURO_FACTOR_WEIGHT * neuro_factor
            + COMMUNICATION_ALIGNMENT_WEIGHT * communication_alignment
            + SUPPORT_ALIGNMENT_WEIGHT * support_alignment;
        let final_score = (unit(base.overall) + uplift).min(1.0);

        tracing::debug!(
            "Enhanced {} -> {}: base {:.3}, final {:.3}",
            profile.user_id,
            candidate.user_id,
            base.overall,
            final_score
        );

        EnhancedCompatibilityScore {
            base,
            neuro_factor,
            communication_alignment,
            support_alignment,
            final_score,
            recommendations: recommendations(profile),
        }
    }
}

impl Default for NeuroMatchingEnhancer {
    fn default() -> Self {
        Self::with_baseline()
    }
}

impl std::fmt::Debug for NeuroMatchingEnhancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeuroMatchingEnhancer").finish_non_exhaustive()
    }
}

fn recommendation(kind: &str, title: &str, description: &str, priority: Priority) -> MatchingRecommendation {
    MatchingRecommendation {
        kind: kind.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        priority,
    }
}

/// Tips for the candidate derived from the declared preferences
///
/// Communication and interaction tips are the core rules; the feedback and
/// planning tips are an extension covering the remaining preferences.
pub fn recommendations(profile: &NeuroProfile) -> Vec<MatchingRecommendation> {
    let preferences = &profile.preferences;
    let mut tips = Vec::new();

    if preferences.needs_clear_communication {
        tips.push(recommendation(
            "communication_tip",
            "Communication tip",
            "Be direct and clear in your messages. This person appreciates plain communication.",
            Priority::High,
        ));
    }
    if preferences.prefers_text_over_voice {
        tips.push(recommendation(
            "interaction_preference",
            "Interaction preference",
            "This person prefers text messages. Avoid voice calls initially.",
            Priority::Medium,
        ));
    }
    if preferences.sensitive_to_criticism {
        tips.push(recommendation(
            "feedback_tip",
            "Feedback tip",
            "Frame disagreements gently and give time to respond.",
            Priority::Medium,
        ));
    }
    if preferences.needs_routine {
        tips.push(recommendation(
            "planning_tip",
            "Planning tip",
            "Suggest dates with a clear plan and avoid last-minute changes.",
            Priority::Low,
        ));
    }

    tips
}
