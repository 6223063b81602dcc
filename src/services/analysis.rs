use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use thiserror::Error;
use validator::Validate;

use crate::config::Settings;
use crate::core::{derive_behavior, derive_personality, CompatibilityEngine, DerivedInputs, NeuroMatchingEnhancer};
use crate::models::{
    AnalysisReport, AnalysisRequest, CompatibilityScore, EnhancedCompatibilityScore, Message, NeuroProfile, PairReport,
    PairRequest, PersonalityProfile, Profile, SwipeBehavior, SwipeEvent, UserAnalysis,
};
use crate::services::cache::{AnalysisCache, CacheStats};

/// Errors that can occur while running a batch report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Entry point for callers: memoizes derived profiles and pair scores
///
/// The analytics themselves are pure; this service owns the only shared
/// mutable state (the [`AnalysisCache`]) and may be used from many tasks.
pub struct AnalysisService {
    engine: CompatibilityEngine,
    enhancer: NeuroMatchingEnhancer,
    cache: AnalysisCache,
}

impl AnalysisService {
    pub fn new(engine: CompatibilityEngine, enhancer: NeuroMatchingEnhancer, cache: AnalysisCache) -> Self {
        Self { engine, enhancer, cache }
    }

    /// Build a service with configured weights and cache limits
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            CompatibilityEngine::new(settings.scoring.weights.into()),
            NeuroMatchingEnhancer::default(),
            AnalysisCache::new(settings.cache.max_capacity, settings.cache.ttl_secs),
        )
    }

    pub fn engine(&self) -> &CompatibilityEngine {
        &self.engine
    }

    /// Re-derive the personality and overwrite any cached one
    pub async fn analyze_personality(&self, profile: &Profile, messages: &[Message]) -> Arc<PersonalityProfile> {
        self.cache.put_personality(derive_personality(profile, messages)).await
    }

    /// Cached personality for the profile's user, derived on first use
    pub async fn get_or_compute_personality(&self, profile: &Profile, messages: &[Message]) -> Arc<PersonalityProfile> {
        self.cache
            .personality_or_insert_with(&profile.user_id, || derive_personality(profile, messages))
            .await
    }

    /// Re-derive the swipe behavior and overwrite any cached one
    pub async fn analyze_behavior(&self, user_id: &str, history: &[SwipeEvent]) -> Arc<SwipeBehavior> {
        self.cache.put_behavior(derive_behavior(user_id, history)).await
    }

    pub async fn get_or_compute_behavior(&self, user_id: &str, history: &[SwipeEvent]) -> Arc<SwipeBehavior> {
        self.cache
            .behavior_or_insert_with(user_id, || derive_behavior(user_id, history))
            .await
    }

    pub async fn register_neuro_profile(&self, profile: NeuroProfile) -> Arc<NeuroProfile> {
        self.cache.put_neuro_profile(profile).await
    }

    pub async fn cached_personality(&self, user_id: &str) -> Option<Arc<PersonalityProfile>> {
        self.cache.personality(user_id).await
    }

    pub async fn cached_behavior(&self, user_id: &str) -> Option<Arc<SwipeBehavior>> {
        self.cache.behavior(user_id).await
    }

    pub async fn cached_neuro_profile(&self, user_id: &str) -> Option<Arc<NeuroProfile>> {
        self.cache.neuro_profile(user_id).await
    }

    /// Score cached for the pair, in either order
    pub async fn cached_score(&self, user_a: &str, user_b: &str) -> Option<Arc<CompatibilityScore>> {
        self.cache.score(user_a, user_b).await
    }

    async fn score_fresh(&self, profile_a: &Profile, profile_b: &Profile) -> CompatibilityScore {
        let personality_a = self.cache.personality(&profile_a.user_id).await;
        let personality_b = self.cache.personality(&profile_b.user_id).await;
        let behavior_a = self.cache.behavior(&profile_a.user_id).await;
        let behavior_b = self.cache.behavior(&profile_b.user_id).await;

        self.engine.score_with(
            profile_a,
            profile_b,
            DerivedInputs {
                behavior: behavior_a.as_deref(),
                personality: personality_a.as_deref(),
            },
            DerivedInputs {
                behavior: behavior_b.as_deref(),
                personality: personality_b.as_deref(),
            },
        )
    }

    /// Score the pair from whatever derived profiles are cached and overwrite the stored score
    pub async fn compute_score(&self, profile_a: &Profile, profile_b: &Profile) -> Arc<CompatibilityScore> {
        let score = self.score_fresh(profile_a, profile_b).await;
        self.cache
            .put_score(&profile_a.user_id, &profile_b.user_id, score)
            .await
    }

    /// Cached score for the unordered pair, computed on first use
    pub async fn get_or_compute_score(&self, profile_a: &Profile, profile_b: &Profile) -> Arc<CompatibilityScore> {
        if let Some(score) = self.cache.score(&profile_a.user_id, &profile_b.user_id).await {
            return score;
        }

        let score = self.score_fresh(profile_a, profile_b).await;
        self.cache
            .score_or_insert_with(&profile_a.user_id, &profile_b.user_id, move || score)
            .await
    }

    fn enhance(&self, neuro: Option<&NeuroProfile>, candidate: &Profile, base: CompatibilityScore) -> EnhancedCompatibilityScore {
        match neuro {
            Some(neuro) => self.enhancer.enhance(neuro, candidate, base),
            None => EnhancedCompatibilityScore::without_neuro_profile(base),
        }
    }

    /// Compatibility adjusted for `profile_a`'s neuro profile, if one is registered
    ///
    /// The base score is recomputed from the current derived profiles and
    /// replaces any stored pair score.
    pub async fn enhanced_compatibility(&self, profile_a: &Profile, profile_b: &Profile) -> EnhancedCompatibilityScore {
        let base = self.compute_score(profile_a, profile_b).await;
        let neuro = self.cache.neuro_profile(&profile_a.user_id).await;

        self.enhance(neuro.as_deref(), profile_b, base.as_ref().clone())
    }

    /// Re-derive personalities for many users at once
    pub async fn batch_analyze_personalities(
        &self,
        profiles: &[Profile],
        histories: &HashMap<String, Vec<Message>>,
    ) -> HashMap<String, Arc<PersonalityProfile>> {
        let mut results = HashMap::with_capacity(profiles.len());

        for profile in profiles {
            let messages = histories.get(&profile.user_id).map(Vec::as_slice).unwrap_or_default();
            let personality = self.analyze_personality(profile, messages).await;
            results.insert(profile.user_id.clone(), personality);
        }

        tracing::info!("Batch analyzed {} personalities", results.len());
        results
    }

    /// Drop every cached result
    pub async fn clear(&self) {
        self.cache.clear().await;
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Analyze every user in the request and score the requested pairs
    pub async fn run_report(&self, request: &AnalysisRequest) -> Result<AnalysisReport, ReportError> {
        request.validate()?;

        let profiles: HashMap<&str, &Profile> = request
            .profiles
            .iter()
            .map(|p| (p.user_id.as_str(), p))
            .collect();

        let pairs = if request.pairs.is_empty() {
            all_pairs(&request.profiles)
        } else {
            request.pairs.clone()
        };

        let lookup = |id: &str| {
            profiles
                .get(id)
                .copied()
                .ok_or_else(|| ReportError::UnknownProfile(id.to_string()))
        };

        // Resolve ids before touching the cache so a bad request leaves it unchanged
        let resolved = pairs
            .iter()
            .map(|pair| Ok((lookup(&pair.user_id)?, lookup(&pair.target_user_id)?)))
            .collect::<Result<Vec<_>, ReportError>>()?;

        for neuro in &request.neuro_profiles {
            self.register_neuro_profile(neuro.clone()).await;
        }

        let mut users = Vec::with_capacity(request.profiles.len());
        for profile in &request.profiles {
            let messages = request.messages.get(&profile.user_id).map(Vec::as_slice).unwrap_or_default();
            let swipes = request.swipes.get(&profile.user_id).map(Vec::as_slice).unwrap_or_default();

            let personality = self.analyze_personality(profile, messages).await;
            let behavior = self.analyze_behavior(&profile.user_id, swipes).await;

            users.push(UserAnalysis {
                user_id: profile.user_id.clone(),
                personality: personality.as_ref().clone(),
                behavior: behavior.as_ref().clone(),
            });
        }

        let mut reports = Vec::with_capacity(resolved.len());
        for (profile_a, profile_b) in resolved {
            let base = self.compute_score(profile_a, profile_b).await;
            let neuro = self.cache.neuro_profile(&profile_a.user_id).await;

            reports.push(PairReport {
                user_id: profile_a.user_id.clone(),
                target_user_id: profile_b.user_id.clone(),
                compatibility: self.enhance(neuro.as_deref(), profile_b, base.as_ref().clone()),
            });
        }

        tracing::info!("Report covers {} users and {} pairs", users.len(), reports.len());

        Ok(AnalysisReport {
            report_id: uuid::Uuid::new_v4(),
            generated_at: chrono::Utc::now(),
            users,
            pairs: reports,
        })
    }
}

impl Default for AnalysisService {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Every unordered pair of distinct profiles, in input order
fn all_pairs(profiles: &[Profile]) -> Vec<PairRequest> {
    profiles
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            profiles[i + 1..].iter().map(move |b| PairRequest {
                user_id: a.user_id.clone(),
                target_user_id: b.user_id.clone(),
            })
        })
        .collect()
}

/// Parse a JSON analysis request
pub fn read_request<R: Read>(reader: R) -> Result<AnalysisRequest, ReportError> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NeuroPreferences;

    fn service() -> AnalysisService {
        AnalysisService::default()
    }

    #[tokio::test]
    async fn test_get_or_compute_reuses_until_clear() {
        let service = service();
        let quiet = Profile::new("u1", "quiet nights at home", &[], 30);
        let loud = Profile::new("u1", "party every weekend", &[], 30);

        let first = service.get_or_compute_personality(&quiet, &[]).await;
        let reused = service.get_or_compute_personality(&loud, &[]).await;
        assert_eq!(reused.traits.extraversion, first.traits.extraversion);

        service.clear().await;

        let recomputed = service.get_or_compute_personality(&loud, &[]).await;
        assert_eq!(recomputed.traits.extraversion, 0.8);
    }

    #[tokio::test]
    async fn test_analyze_overwrites() {
        let service = service();
        let quiet = Profile::new("u1", "quiet nights at home", &[], 30);
        let loud = Profile::new("u1", "party every weekend", &[], 30);

        service.analyze_personality(&quiet, &[]).await;
        service.analyze_personality(&loud, &[]).await;

        let cached = service.cached_personality("u1").await.unwrap();
        assert_eq!(cached.traits.extraversion, 0.8);
    }

    #[tokio::test]
    async fn test_score_cached_symmetrically() {
        let service = service();
        let a = Profile::new("a", "", &["music"], 25);
        let b = Profile::new("b", "", &["music", "art"], 27);

        let computed = service.get_or_compute_score(&a, &b).await;
        let reversed = service.cached_score("b", "a").await.unwrap();
        assert!(Arc::ptr_eq(&computed, &reversed));

        let via_reverse_call = service.get_or_compute_score(&b, &a).await;
        assert!(Arc::ptr_eq(&computed, &via_reverse_call));
    }

    #[tokio::test]
    async fn test_score_uses_cached_derived_profiles() {
        let service = service();
        let a = Profile::new("a", "", &[], 25);
        let b = Profile::new("b", "", &[], 27);

        let neutral = service.compute_score(&a, &b).await;
        assert_eq!(neutral.personality, 0.5);

        service.analyze_personality(&a, &[]).await;
        service.analyze_personality(&b, &[]).await;
        let informed = service.compute_score(&a, &b).await;
        assert!((informed.personality - 0.72).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_enhanced_without_neuro_profile() {
        let service = service();
        let a = Profile::new("a", "", &["x"], 25);
        let b = Profile::new("b", "", &["x"], 27);

        let enhanced = service.enhanced_compatibility(&a, &b).await;

        assert_eq!(enhanced.neuro_factor, 0.0);
        assert_eq!(enhanced.communication_alignment, 0.5);
        assert_eq!(enhanced.support_alignment, 0.5);
        assert_eq!(enhanced.final_score, enhanced.base.overall);
        assert!(enhanced.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_enhanced_uses_current_derived_profiles() {
        let service = service();
        let a = Profile::new("a", "", &["x"], 25);
        let b = Profile::new("b", "", &["x"], 27);

        let memoized = service.get_or_compute_score(&a, &b).await;
        assert_eq!(memoized.personality, 0.5);

        service.analyze_personality(&a, &[]).await;
        service.analyze_personality(&b, &[]).await;
        let enhanced = service.enhanced_compatibility(&a, &b).await;

        assert!((enhanced.base.personality - 0.72).abs() < 1e-9);
        let stored = service.cached_score("b", "a").await.unwrap();
        assert_eq!(stored.personality, enhanced.base.personality);
    }

    #[tokio::test]
    async fn test_enhanced_with_neuro_profile() {
        let service = service();
        let a = Profile::new("a", "", &["x"], 25);
        let b = Profile::new("b", "", &["x"], 27);
        let preferences = NeuroPreferences {
            prefers_text_over_voice: true,
            ..Default::default()
        };
        service
            .register_neuro_profile(NeuroProfile::from_preferences("a", None, preferences))
            .await;

        let enhanced = service.enhanced_compatibility(&a, &b).await;

        assert!(enhanced.final_score > enhanced.base.overall);
        assert_eq!(enhanced.recommendations.len(), 1);

        // Only the requesting side's neuro profile applies
        let reverse = service.enhanced_compatibility(&b, &a).await;
        assert_eq!(reverse.final_score, reverse.base.overall);
    }

    #[tokio::test]
    async fn test_batch_analyze() {
        let service = service();
        let profiles = vec![
            Profile::new("a", "social", &[], 25),
            Profile::new("b", "reading", &[], 27),
        ];

        let results = service.batch_analyze_personalities(&profiles, &HashMap::new()).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results["a"].traits.extraversion, 0.8);
        assert_eq!(results["b"].traits.extraversion, 0.3);
        assert!(service.cached_personality("b").await.is_some());
    }

    #[test]
    fn test_all_pairs() {
        let profiles = vec![
            Profile::new("a", "", &[], 25),
            Profile::new("b", "", &[], 26),
            Profile::new("c", "", &[], 27),
        ];

        let pairs: Vec<(String, String)> = all_pairs(&profiles)
            .into_iter()
            .map(|p| (p.user_id, p.target_user_id))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "b".to_string()),
                ("a".to_string(), "c".to_string()),
                ("b".to_string(), "c".to_string()),
            ]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_share_cache() {
        let service = Arc::new(service());
        let mut handles = Vec::new();

        for i in 0..32 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let profile = Profile::new(format!("u{}", i % 8), "social", &["music"], 25);
                let other = Profile::new("hub", "", &["music"], 30);
                service.get_or_compute_personality(&profile, &[]).await;
                service.get_or_compute_behavior(&profile.user_id, &[]).await;
                service.get_or_compute_score(&profile, &other).await
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        let stats = service.stats().await;
        assert_eq!(stats.personalities, 8);
        assert_eq!(stats.behaviors, 8);
        assert_eq!(stats.scores, 8);
    }

    #[tokio::test]
    async fn test_run_report_scores_all_pairs() {
        let service = service();
        let request = AnalysisRequest {
            profiles: vec![
                Profile::new("a", "", &["x"], 25),
                Profile::new("b", "", &["x"], 26),
                Profile::new("c", "", &["y"], 27),
            ],
            swipes: HashMap::new(),
            messages: HashMap::new(),
            neuro_profiles: vec![],
            pairs: vec![],
        };

        let report = service.run_report(&request).await.unwrap();

        assert_eq!(report.users.len(), 3);
        assert_eq!(report.pairs.len(), 3);
        assert_eq!(report.pairs[0].user_id, "a");
        assert_eq!(report.pairs[0].target_user_id, "b");
    }

    #[tokio::test]
    async fn test_run_report_rejects_unknown_ids() {
        let service = service();
        let request = AnalysisRequest {
            profiles: vec![Profile::new("a", "", &[], 25)],
            swipes: HashMap::new(),
            messages: HashMap::new(),
            neuro_profiles: vec![],
            pairs: vec![PairRequest {
                user_id: "a".to_string(),
                target_user_id: "ghost".to_string(),
            }],
        };

        let result = service.run_report(&request).await;

        assert!(matches!(result, Err(ReportError::UnknownProfile(ref id)) if id == "ghost"));
        assert!(service.cached_personality("a").await.is_none());
    }

    #[tokio::test]
    async fn test_run_report_validates() {
        let service = service();
        let request = AnalysisRequest {
            profiles: vec![],
            swipes: HashMap::new(),
            messages: HashMap::new(),
            neuro_profiles: vec![],
            pairs: vec![],
        };

        assert!(matches!(service.run_report(&request).await, Err(ReportError::Validation(_))));
    }

    #[test]
    fn test_read_request() {
        let json = r#"{"profiles": [{"userId": "a", "bio": "hi", "interests": [], "age": 30}]}"#;
        let request = read_request(json.as_bytes()).unwrap();
        assert_eq!(request.profiles[0].user_id, "a");
        assert!(request.pairs.is_empty());

        assert!(matches!(read_request("{".as_bytes()), Err(ReportError::Json(_))));
    }
}
