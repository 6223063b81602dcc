// Model exports
pub mod analysis;
pub mod domain;
pub mod neuro;
pub mod requests;
pub mod responses;
pub mod score;

pub use analysis::{
    AgePattern, AgeRange, BioReadingBehavior, CommunicationStyle, DistancePattern, InferredPreferences,
    MessageLength, PersonalityProfile, PersonalityTraits, PhotoPreferences, ResponseSpeed, SocialPreferences,
    SwipeBehavior, SwipePatterns,
};
pub use domain::{Message, Profile, SwipeAction, SwipeEvent};
pub use neuro::{
    accommodations_for, Accommodation, AccommodationType, NeuroCondition, NeuroPreferences, NeuroProfile,
    NeuroSelfReport, SharingLevel,
};
pub use requests::{AnalysisRequest, PairRequest};
pub use responses::{AnalysisReport, PairReport, UserAnalysis};
pub use score::{
    CompatibilityScore, CompatibilityWeights, EnhancedCompatibilityScore, Factor, MatchingRecommendation, Priority,
};
