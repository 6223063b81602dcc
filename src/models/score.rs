use serde::{Deserialize, Serialize};

/// One weighted component of a compatibility score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub weight: f64,
    pub score: f64,
    pub description: String,
}

/// Weighted, explainable compatibility between two users
///
/// `factors` weights sum to 1.0 and their weighted sum equals `overall`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    pub overall: f64,
    pub personality: f64,
    pub behavior: f64,
    pub interests: f64,
    pub communication: f64,
    pub confidence: f64,
    pub factors: Vec<Factor>,
}

/// Factor weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompatibilityWeights {
    pub personality: f64,
    pub behavior: f64,
    pub interests: f64,
    pub communication: f64,
}

impl Default for CompatibilityWeights {
    fn default() -> Self {
        Self {
            personality: 0.35,
            behavior: 0.25,
            interests: 0.20,
            communication: 0.20,
        }
    }
}

impl CompatibilityWeights {
    pub fn sum(&self) -> f64 {
        self.personality + self.behavior + self.interests + self.communication
    }

    /// Rescale so the weights sum to 1.0
    ///
    /// Negative or non-finite weights fall back to the defaults.
    pub fn normalized(self) -> Self {
        let parts = [self.personality, self.behavior, self.interests, self.communication];
        if parts.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Self::default();
        }

        let sum = self.sum();
        if sum <= 0.0 {
            return Self::default();
        }

        Self {
            personality: self.personality / sum,
            behavior: self.behavior / sum,
            interests: self.interests / sum,
            communication: self.communication / sum,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingRecommendation {
    pub kind: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

/// Base compatibility adjusted for one side's neuro-accommodation profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedCompatibilityScore {
    #[serde(rename = "baseScore")]
    pub base: CompatibilityScore,
    #[serde(rename = "neuroFactor")]
    pub neuro_factor: f64,
    #[serde(rename = "communicationAlignment")]
    pub communication_alignment: f64,
    #[serde(rename = "supportAlignment")]
    pub support_alignment: f64,
    #[serde(rename = "finalScore")]
    pub final_score: f64,
    pub recommendations: Vec<MatchingRecommendation>,
}

impl EnhancedCompatibilityScore {
    /// Wrap a base score when no neuro profile is known for the requesting side
    pub fn without_neuro_profile(base: CompatibilityScore) -> Self {
        Self {
            final_score: base.overall,
            base,
            neuro_factor: 0.0,
            communication_alignment: 0.5,
            support_alignment: 0.5,
            recommendations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((CompatibilityWeights::default().sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_rescales() {
        let weights = CompatibilityWeights {
            personality: 2.0,
            behavior: 1.0,
            interests: 1.0,
            communication: 0.0,
        }
        .normalized();

        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!((weights.personality - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_rejects_negative() {
        let weights = CompatibilityWeights {
            personality: -1.0,
            ..Default::default()
        };
        assert_eq!(weights.normalized(), CompatibilityWeights::default());
    }
}
