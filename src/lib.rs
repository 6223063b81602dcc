//! Compat Engine - compatibility scoring for a dating app
//!
//! Turns raw per-user signals (profile text, swipe history, message history,
//! declared neurodiversity preferences) into derived profiles and combines
//! pairs of them into a weighted compatibility score with a factor breakdown.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{derive_behavior, derive_personality, CompatibilityEngine, NeuroMatchingEnhancer};
pub use models::{
    CompatibilityScore, CompatibilityWeights, EnhancedCompatibilityScore, NeuroProfile, PersonalityProfile, Profile,
    SwipeBehavior,
};
pub use services::{AnalysisCache, AnalysisService};
