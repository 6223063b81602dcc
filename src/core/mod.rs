// Core algorithm exports
pub mod behavior;
pub mod engine;
pub mod neuro;
pub mod scoring;
pub mod similarity;
pub mod traits;

pub use behavior::{default_patterns, derive_behavior, interquartile_range};
pub use engine::{CompatibilityEngine, DerivedInputs};
pub use neuro::{recommendations, BaselineSignals, NeuroMatchingEnhancer, NeuroSignalSource};
pub use scoring::{behavior_score, communication_score, interest_score, personality_score};
pub use similarity::{complementary, jaccard, mid_range, range_overlap, similarity, unit, NEUTRAL_SCORE};
pub use traits::derive_personality;
