use crate::core::scoring::{
    behavior_description, behavior_score, communication_description, communication_score, confidence,
    interest_description, interest_score, personality_description, personality_score,
};
use crate::models::{CompatibilityScore, CompatibilityWeights, Factor, PersonalityProfile, Profile, SwipeBehavior};

/// Optional derived inputs for one side of a pair
#[derive(Debug, Clone, Copy, Default)]
pub struct DerivedInputs<'a> {
    pub behavior: Option<&'a SwipeBehavior>,
    pub personality: Option<&'a PersonalityProfile>,
}

/// Weighted compatibility scoring between two users
///
/// # Factors
/// 1. Personality (complementary/similarity per trait)
/// 2. Swipe behavior
/// 3. Shared interests
/// 4. Communication style
///
/// Missing derived inputs contribute a neutral 0.5, so scoring always
/// produces a number.
#[derive(Debug, Clone)]
pub struct CompatibilityEngine {
    weights: CompatibilityWeights,
}

impl CompatibilityEngine {
    /// Weights are normalized so factor weights always sum to 1.0
    pub fn new(weights: CompatibilityWeights) -> Self {
        Self {
            weights: weights.normalized(),
        }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: CompatibilityWeights::default(),
        }
    }

    pub fn weights(&self) -> CompatibilityWeights {
        self.weights
    }

    /// Score a pair of profiles with whichever derived inputs are available
    pub fn score(
        &self,
        profile_a: &Profile,
        profile_b: &Profile,
        behavior_a: Option<&SwipeBehavior>,
        behavior_b: Option<&SwipeBehavior>,
        personality_a: Option<&PersonalityProfile>,
        personality_b: Option<&PersonalityProfile>,
    ) -> CompatibilityScore {
        let personality = personality_score(personality_a, personality_b);
        let behavior = behavior_score(behavior_a, behavior_b);
        let interests = interest_score(profile_a, profile_b);
        let communication = communication_score(personality_a, personality_b);

        let factors = vec![
            Factor {
                name: "Personality".to_string(),
                weight: self.weights.personality,
                score: personality,
                description: personality_description(personality).to_string(),
            },
            Factor {
                name: "Behavior".to_string(),
                weight: self.weights.behavior,
                score: behavior,
                description: behavior_description(behavior).to_string(),
            },
            Factor {
                name: "Interests".to_string(),
                weight: self.weights.interests,
                score: interests,
                description: interest_description(interests).to_string(),
            },
            Factor {
                name: "Communication".to_string(),
                weight: self.weights.communication,
                score: communication,
                description: communication_description(communication).to_string(),
            },
        ];

        let overall = factors.iter().map(|f| f.weight * f.score).sum::<f64>();
        let confidence = confidence(personality_a, personality_b, behavior_a, behavior_b);

        tracing::trace!(
            "Scored {} <-> {}: overall {:.3} (personality {:.2}, behavior {:.2}, interests {:.2}, communication {:.2})",
            profile_a.user_id,
            profile_b.user_id,
            overall,
            personality,
            behavior,
            interests,
            communication
        );

        CompatibilityScore {
            overall,
            personality,
            behavior,
            interests,
            communication,
            confidence,
            factors,
        }
    }

    /// Same as [`score`](Self::score) with the derived inputs grouped per side
    pub fn score_with(
        &self,
        profile_a: &Profile,
        profile_b: &Profile,
        a: DerivedInputs<'_>,
        b: DerivedInputs<'_>,
    ) -> CompatibilityScore {
        self.score(profile_a, profile_b, a.behavior, b.behavior, a.personality, b.personality)
    }
}

impl Default for CompatibilityEngine {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::behavior::derive_behavior;
    use crate::core::traits::derive_personality;

    fn weighted_sum(score: &CompatibilityScore) -> f64 {
        score.factors.iter().map(|f| f.weight * f.score).sum()
    }

    #[test]
    fn test_self_score_without_derived_data() {
        let engine = CompatibilityEngine::with_default_weights();
        let profile = Profile::new("a", "Loves hiking", &["hiking"], 28);

        let score = engine.score(&profile, &profile, None, None, None, None);

        assert_eq!(score.personality, 0.5);
        assert_eq!(score.behavior, 0.5);
        assert_eq!(score.communication, 0.5);
        assert_eq!(score.interests, 1.0);
        assert_eq!(score.confidence, 0.3);
        assert!((score.overall - (0.35 * 0.5 + 0.25 * 0.5 + 0.20 * 1.0 + 0.20 * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_factor_weights_and_overall() {
        let engine = CompatibilityEngine::default();
        let a = Profile::new("a", "Social butterfly, love to party", &["music", "dance"], 26);
        let b = Profile::new("b", "Quiet evenings reading at home", &["books", "music"], 31);
        let pa = derive_personality(&a, &[]);
        let pb = derive_personality(&b, &[]);
        let ba = derive_behavior("a", &[]);
        let bb = derive_behavior("b", &[]);

        let score = engine.score(&a, &b, Some(&ba), Some(&bb), Some(&pa), Some(&pb));

        let names: Vec<&str> = score.factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Personality", "Behavior", "Interests", "Communication"]);

        let weight_sum: f64 = score.factors.iter().map(|f| f.weight).sum();
        assert!((weight_sum - 1.0).abs() < 1e-9);
        assert!((score.overall - weighted_sum(&score)).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&score.overall));
        assert!((0.0..=1.0).contains(&score.confidence));
    }

    #[test]
    fn test_score_is_symmetric() {
        let engine = CompatibilityEngine::default();
        let a = Profile::new("a", "Adventure and travel", &["travel", "food"], 24);
        let b = Profile::new("b", "Meet people at events", &["food"], 29);
        let pa = derive_personality(&a, &[]);
        let pb = derive_personality(&b, &[]);

        let ab = engine.score(&a, &b, None, None, Some(&pa), Some(&pb));
        let ba = engine.score(&b, &a, None, None, Some(&pb), Some(&pa));

        assert!((ab.overall - ba.overall).abs() < 1e-12);
    }

    #[test]
    fn test_custom_weights_are_normalized() {
        let engine = CompatibilityEngine::new(CompatibilityWeights {
            personality: 1.0,
            behavior: 1.0,
            interests: 1.0,
            communication: 1.0,
        });

        assert!((engine.weights().sum() - 1.0).abs() < 1e-9);
        assert!((engine.weights().interests - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_score_with_matches_score() {
        let engine = CompatibilityEngine::default();
        let a = Profile::new("a", "", &["chess"], 30);
        let b = Profile::new("b", "", &["chess", "go"], 32);
        let ba = derive_behavior("a", &[]);

        let grouped = engine.score_with(
            &a,
            &b,
            DerivedInputs { behavior: Some(&ba), personality: None },
            DerivedInputs::default(),
        );
        let flat = engine.score(&a, &b, Some(&ba), None, None, None);

        assert_eq!(grouped, flat);
    }
}
