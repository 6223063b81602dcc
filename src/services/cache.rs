use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::models::{CompatibilityScore, NeuroProfile, PersonalityProfile, SwipeBehavior};

/// Unordered pair of user ids
///
/// `PairKey::new(a, b) == PairKey::new(b, a)`, so a score stored for (A, B)
/// also answers a lookup for (B, A).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey {
    low: String,
    high: String,
}

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    pub fn members(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }
}

/// Memoized analysis results
///
/// Per-user maps are keyed by user id with last-write-wins semantics; scores
/// are keyed by [`PairKey`]. Every access holds the shared side of `gate`
/// and [`clear`](Self::clear) takes the exclusive side, so a clear is never
/// interleaved with a read or write.
pub struct AnalysisCache {
    personalities: Cache<String, Arc<PersonalityProfile>>,
    behaviors: Cache<String, Arc<SwipeBehavior>>,
    neuro_profiles: Cache<String, Arc<NeuroProfile>>,
    scores: Cache<PairKey, Arc<CompatibilityScore>>,
    gate: RwLock<()>,
}

fn build<K, V>(capacity: Option<u64>, ttl: Option<Duration>) -> Cache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let mut builder = Cache::builder();
    if let Some(capacity) = capacity {
        builder = builder.max_capacity(capacity);
    }
    if let Some(ttl) = ttl {
        builder = builder.time_to_live(ttl);
    }
    builder.build()
}

impl AnalysisCache {
    /// Create a cache, optionally bounded to `capacity` entries per map
    ///
    /// Without a capacity or TTL nothing is evicted: entries live until
    /// [`clear`](Self::clear).
    pub fn new(capacity: Option<u64>, ttl_secs: Option<u64>) -> Self {
        let ttl = ttl_secs.map(Duration::from_secs);

        Self {
            personalities: build(capacity, ttl),
            behaviors: build(capacity, ttl),
            neuro_profiles: build(capacity, ttl),
            scores: build(capacity, ttl),
            gate: RwLock::new(()),
        }
    }

    pub async fn personality(&self, user_id: &str) -> Option<Arc<PersonalityProfile>> {
        let _guard = self.gate.read().await;
        let hit = self.personalities.get(user_id).await;
        tracing::trace!("Personality cache {}: {}", if hit.is_some() { "hit" } else { "miss" }, user_id);
        hit
    }

    pub async fn put_personality(&self, profile: PersonalityProfile) -> Arc<PersonalityProfile> {
        let _guard = self.gate.read().await;
        let value = Arc::new(profile);
        self.personalities.insert(value.user_id.clone(), value.clone()).await;
        value
    }

    /// Return the cached personality or store the one produced by `compute`
    ///
    /// Concurrent callers for the same key share a single computation.
    pub async fn personality_or_insert_with<F>(&self, user_id: &str, compute: F) -> Arc<PersonalityProfile>
    where
        F: FnOnce() -> PersonalityProfile,
    {
        let _guard = self.gate.read().await;
        self.personalities
            .get_with_by_ref(user_id, async move { Arc::new(compute()) })
            .await
    }

    pub async fn behavior(&self, user_id: &str) -> Option<Arc<SwipeBehavior>> {
        let _guard = self.gate.read().await;
        let hit = self.behaviors.get(user_id).await;
        tracing::trace!("Behavior cache {}: {}", if hit.is_some() { "hit" } else { "miss" }, user_id);
        hit
    }

    pub async fn put_behavior(&self, behavior: SwipeBehavior) -> Arc<SwipeBehavior> {
        let _guard = self.gate.read().await;
        let value = Arc::new(behavior);
        self.behaviors.insert(value.user_id.clone(), value.clone()).await;
        value
    }

    pub async fn behavior_or_insert_with<F>(&self, user_id: &str, compute: F) -> Arc<SwipeBehavior>
    where
        F: FnOnce() -> SwipeBehavior,
    {
        let _guard = self.gate.read().await;
        self.behaviors
            .get_with_by_ref(user_id, async move { Arc::new(compute()) })
            .await
    }

    pub async fn neuro_profile(&self, user_id: &str) -> Option<Arc<NeuroProfile>> {
        let _guard = self.gate.read().await;
        self.neuro_profiles.get(user_id).await
    }

    pub async fn put_neuro_profile(&self, profile: NeuroProfile) -> Arc<NeuroProfile> {
        let _guard = self.gate.read().await;
        let value = Arc::new(profile);
        self.neuro_profiles.insert(value.user_id.clone(), value.clone()).await;
        value
    }

    /// Score cached for the pair in either order
    pub async fn score(&self, a: &str, b: &str) -> Option<Arc<CompatibilityScore>> {
        let _guard = self.gate.read().await;
        let key = PairKey::new(a, b);
        let hit = self.scores.get(&key).await;
        tracing::trace!("Score cache {}: {} <-> {}", if hit.is_some() { "hit" } else { "miss" }, a, b);
        hit
    }

    pub async fn put_score(&self, a: &str, b: &str, score: CompatibilityScore) -> Arc<CompatibilityScore> {
        let _guard = self.gate.read().await;
        let value = Arc::new(score);
        self.scores.insert(PairKey::new(a, b), value.clone()).await;
        value
    }

    pub async fn score_or_insert_with<F>(&self, a: &str, b: &str, compute: F) -> Arc<CompatibilityScore>
    where
        F: FnOnce() -> CompatibilityScore,
    {
        let _guard = self.gate.read().await;
        self.scores
            .get_with(PairKey::new(a, b), async move { Arc::new(compute()) })
            .await
    }

    /// Drop every entry of every map in one step
    pub async fn clear(&self) {
        let _guard = self.gate.write().await;
        self.personalities.invalidate_all();
        self.behaviors.invalidate_all();
        self.neuro_profiles.invalidate_all();
        self.scores.invalidate_all();
        tracing::debug!("Analysis cache cleared");
    }

    /// Entry counts after flushing pending maintenance
    pub async fn stats(&self) -> CacheStats {
        let _guard = self.gate.read().await;
        self.personalities.run_pending_tasks().await;
        self.behaviors.run_pending_tasks().await;
        self.neuro_profiles.run_pending_tasks().await;
        self.scores.run_pending_tasks().await;

        CacheStats {
            personalities: self.personalities.entry_count(),
            behaviors: self.behaviors.entry_count(),
            neuro_profiles: self.neuro_profiles.entry_count(),
            scores: self.scores.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub personalities: u64,
    pub behaviors: u64,
    #[serde(rename = "neuroProfiles")]
    pub neuro_profiles: u64,
    pub scores: u64,
}
