// Unit tests for Compat Engine

use compat_engine::core::{
    behavior_score, complementary, derive_behavior, interest_score, jaccard, mid_range, range_overlap, similarity, unit,
    CompatibilityEngine, NeuroMatchingEnhancer,
};
use compat_engine::models::{
    AgeRange, CompatibilityWeights, NeuroPreferences, NeuroProfile, Profile, SwipeAction, SwipeBehavior, SwipeEvent,
};
use chrono::Utc;

fn grid() -> Vec<f64> {
    (0..=20).map(|i| i as f64 / 20.0).collect()
}

fn create_test_swipe(action: SwipeAction, target_age: u8, distance_km: f64) -> SwipeEvent {
    SwipeEvent {
        user_id: "current_user".to_string(),
        target_user_id: format!("target_{}", target_age),
        action,
        timestamp: Utc::now(),
        target_age: Some(target_age),
        distance_km: Some(distance_km),
        decision_ms: Some(2500),
        profile_view_ms: Some(4000),
    }
}

fn behavior_with_most_liked(user_id: &str, most_liked: AgeRange) -> SwipeBehavior {
    let mut behavior = derive_behavior(user_id, &[]);
    behavior.patterns.age_pattern.most_liked = most_liked;
    behavior
}

#[test]
fn test_metrics_stay_in_unit_interval() {
    for a in grid() {
        for b in grid() {
            for value in [similarity(a, b), complementary(a, b), mid_range(a, b)] {
                assert!((0.0..=1.0).contains(&value), "{} for ({}, {})", value, a, b);
            }
        }
    }
}

#[test]
fn test_unit_sanitizes_malformed_input() {
    assert_eq!(unit(f64::NAN), 0.5);
    assert_eq!(unit(-3.0), 0.0);
    assert_eq!(unit(7.5), 1.0);
    assert_eq!(unit(f64::INFINITY), 1.0);
    assert_eq!(unit(0.42), 0.42);
}

#[test]
fn test_complementary_bands() {
    assert_eq!(complementary(0.2, 0.7), 0.8);
    assert_eq!(complementary(0.5, 0.6), 0.6);
    assert_eq!(complementary(0.0, 1.0), 0.4);
}

#[test]
fn test_mid_range_rules() {
    assert_eq!(mid_range(0.4, 0.6), 0.9);
    assert_eq!(mid_range(0.5, 0.9), 0.7);
    assert!((mid_range(0.1, 0.9) - 0.2).abs() < 1e-9);
}

#[test]
fn test_default_weights_sum_to_one() {
    let weights = CompatibilityWeights::default();
    assert!((weights.sum() - 1.0).abs() < 1e-12);
    assert_eq!(weights.personality, 0.35);
    assert_eq!(weights.behavior, 0.25);
    assert_eq!(weights.interests, 0.20);
    assert_eq!(weights.communication, 0.20);
}

#[test]
fn test_identical_large_interest_sets_score_one() {
    let a = Profile::new("a", "", &["music", "hiking", "cooking", "film"], 25);
    let b = Profile::new("b", "", &["film", "cooking", "hiking", "music"], 30);

    assert_eq!(interest_score(&a, &b), 1.0);
}

#[test]
fn test_disjoint_interest_sets_score_zero() {
    let a = Profile::new("a", "", &["music", "hiking"], 25);
    let b = Profile::new("b", "", &["chess"], 30);

    assert_eq!(interest_score(&a, &b), 0.0);
}

#[test]
fn test_jaccard_ignores_duplicates() {
    let a = vec!["x".to_string(), "x".to_string(), "y".to_string()];
    let b = vec!["y".to_string()];

    let (value, common) = jaccard(&a, &b).unwrap();
    assert_eq!(common, 1);
    assert!((value - 0.5).abs() < 1e-9);
    assert!(jaccard(&a, &[]).is_none());
}

#[test]
fn test_empty_history_defaults() {
    let behavior = derive_behavior("current_user", &[]);
    let patterns = &behavior.patterns;

    assert_eq!(behavior.swipe_count, 0);
    assert_eq!(patterns.average_decision_ms, 3000);
    assert_eq!(patterns.like_rate, 0.5);
    assert_eq!(patterns.age_pattern.preferred, AgeRange::new(18, 35));
    assert_eq!(patterns.age_pattern.most_liked, AgeRange::new(22, 28));
    assert_eq!(patterns.age_pattern.confidence, 0.3);
    assert_eq!(patterns.distance_pattern.average_km, 10.0);
    assert_eq!(patterns.distance_pattern.max_acceptable_km, 25.0);
    assert_eq!(patterns.distance_pattern.preferred_km, 15.0);
    assert!(behavior.preferences.interests.is_empty());
}

#[test]
fn test_history_patterns() {
    let history = vec![
        create_test_swipe(SwipeAction::Like, 24, 5.0),
        create_test_swipe(SwipeAction::Like, 27, 12.0),
        create_test_swipe(SwipeAction::Like, 29, 8.0),
        create_test_swipe(SwipeAction::Like, 33, 20.0),
        create_test_swipe(SwipeAction::Pass, 45, 60.0),
    ];

    let behavior = derive_behavior("current_user", &history);
    let patterns = &behavior.patterns;

    assert_eq!(behavior.swipe_count, 5);
    assert_eq!(patterns.average_decision_ms, 2500);
    assert!((patterns.like_rate - 0.8).abs() < 1e-9);
    // Passed profiles do not shape the age or distance patterns
    assert_eq!(patterns.age_pattern.preferred, AgeRange::new(24, 33));
    assert_eq!(patterns.age_pattern.most_liked, AgeRange::new(27, 33));
    assert_eq!(patterns.distance_pattern.max_acceptable_km, 20.0);
    assert_eq!(patterns.distance_pattern.preferred_km, 12.0);
    assert!((patterns.distance_pattern.average_km - 11.25).abs() < 1e-9);
    assert!(!behavior.preferences.interests.is_empty());
}

#[test]
fn test_super_likes_do_not_count_as_likes() {
    let history = vec![
        create_test_swipe(SwipeAction::Like, 26, 4.0),
        create_test_swipe(SwipeAction::SuperLike, 40, 90.0),
        create_test_swipe(SwipeAction::Pass, 50, 70.0),
    ];

    let patterns = derive_behavior("current_user", &history).patterns;

    assert!((patterns.like_rate - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(patterns.age_pattern.preferred, AgeRange::new(26, 26));
    assert_eq!(patterns.distance_pattern.max_acceptable_km, 4.0);
}

#[test]
fn test_age_range_overlap_example() {
    let overlap = range_overlap(&AgeRange::new(20, 30), &AgeRange::new(25, 35));
    assert!((overlap - 6.0 / 11.0).abs() < 1e-9);

    assert_eq!(range_overlap(&AgeRange::new(20, 22), &AgeRange::new(30, 35)), 0.0);
}

#[test]
fn test_behavior_score_uses_age_overlap() {
    let a = behavior_with_most_liked("a", AgeRange::new(20, 30));
    let b = behavior_with_most_liked("b", AgeRange::new(25, 35));

    // Same latency and like rate, so only the age overlap is below 1.0
    let expected = (1.0 + 1.0 + 6.0 / 11.0) / 3.0;
    assert!((behavior_score(Some(&a), Some(&b)) - expected).abs() < 1e-9);
    assert_eq!(behavior_score(Some(&a), None), 0.5);
}

#[test]
fn test_self_score_with_no_derived_data() {
    let profile = Profile::new("a", "Coffee and long walks", &["coffee"], 29);
    let score = CompatibilityEngine::default().score(&profile, &profile, None, None, None, None);

    assert_eq!(score.personality, 0.5);
    assert_eq!(score.behavior, 0.5);
    assert_eq!(score.communication, 0.5);
    assert_eq!(score.interests, 1.0);

    let overall: f64 = score.factors.iter().map(|f| f.weight * f.score).sum();
    assert!((score.overall - overall).abs() < 1e-9);
}

#[test]
fn test_enhance_bounds() {
    let engine = CompatibilityEngine::default();
    let enhancer = NeuroMatchingEnhancer::default();
    let neuro = NeuroProfile::from_preferences("a", None, NeuroPreferences::default());
    let candidates = [
        Profile::new("b", "", &[], 20),
        Profile::new("c", "", &["x"], 30),
        Profile::new("d", "", &["x", "y", "z"], 40),
    ];
    let me = Profile::new("a", "", &["x", "y", "z"], 30);

    for candidate in &candidates {
        let base = engine.score(&me, candidate, None, None, None, None);
        let overall = base.overall;
        let enhanced = enhancer.enhance(&neuro, candidate, base);

        assert!(enhanced.final_score >= overall);
        assert!(enhanced.final_score <= 1.0);
    }
}
