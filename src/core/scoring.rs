use crate::core::similarity::{complementary, jaccard, mid_range, pair_or_neutral, range_overlap, similarity, unit};
use crate::models::{PersonalityProfile, Profile, SwipeBehavior};

/// Interest score when either side lists no interests
pub const EMPTY_INTERESTS_SCORE: f64 = 0.3;

/// Latency normalisation divisor in milliseconds
const LATENCY_SCALE_MS: f64 = 10_000.0;

/// Confidence credited to each side that has swipe behavior
const BEHAVIOR_CONFIDENCE: f64 = 0.8;
const BASELINE_CONFIDENCE: f64 = 0.3;

/// Personality factor: complementary extraversion, similar agreeableness,
/// conscientiousness and openness
///
/// Neuroticism scores `1 - similarity`, so larger differences score higher.
pub fn personality_score(a: Option<&PersonalityProfile>, b: Option<&PersonalityProfile>) -> f64 {
    pair_or_neutral(a, b, |a, b| {
        let (ta, tb) = (&a.traits, &b.traits);

        let extraversion = complementary(ta.extraversion, tb.extraversion);
        let agreeableness = similarity(ta.agreeableness, tb.agreeableness);
        let conscientiousness = similarity(ta.conscientiousness, tb.conscientiousness);
        let neuroticism = 1.0 - similarity(ta.neuroticism, tb.neuroticism);
        let openness = similarity(ta.openness, tb.openness);

        (extraversion + agreeableness + conscientiousness + neuroticism + openness) / 5.0
    })
}

/// Behavior factor: decision latency, like rate and most-liked age overlap
pub fn behavior_score(a: Option<&SwipeBehavior>, b: Option<&SwipeBehavior>) -> f64 {
    pair_or_neutral(a, b, |a, b| {
        let (pa, pb) = (&a.patterns, &b.patterns);

        // Ratios above 1.0 are kept so slow deciders still differ from each other
        let latency_gap = (pa.average_decision_ms as f64 - pb.average_decision_ms as f64).abs() / LATENCY_SCALE_MS;
        let latency = unit(1.0 - latency_gap);
        let like_rate = similarity(pa.like_rate, pb.like_rate);
        let ages = range_overlap(&pa.age_pattern.most_liked, &pb.age_pattern.most_liked);

        (latency + like_rate + ages) / 3.0
    })
}

/// Bonus for the absolute number of shared interests
#[inline]
pub fn common_interest_bonus(common: usize) -> f64 {
    match common {
        0 => 0.0,
        1 => 0.1,
        2 => 0.2,
        _ => 0.3,
    }
}

/// Interest factor: Jaccard similarity plus a shared-count bonus, capped at 1.0
pub fn interest_score(a: &Profile, b: &Profile) -> f64 {
    match jaccard(&a.interests, &b.interests) {
        Some((jaccard, common)) => (jaccard + common_interest_bonus(common)).min(1.0),
        None => EMPTY_INTERESTS_SCORE,
    }
}

/// Communication factor: mid-range directness, similar emotionality and humor
pub fn communication_score(a: Option<&PersonalityProfile>, b: Option<&PersonalityProfile>) -> f64 {
    pair_or_neutral(a, b, |a, b| {
        let (ca, cb) = (&a.communication_style, &b.communication_style);

        let directness = mid_range(ca.directness, cb.directness);
        let emotionality = similarity(ca.emotionality, cb.emotionality);
        let humor = similarity(ca.humor, cb.humor);

        (directness + emotionality + humor) / 3.0
    })
}

/// Mean confidence of whichever derived inputs are present
pub fn confidence(
    personality_a: Option<&PersonalityProfile>,
    personality_b: Option<&PersonalityProfile>,
    behavior_a: Option<&SwipeBehavior>,
    behavior_b: Option<&SwipeBehavior>,
) -> f64 {
    let sources: Vec<f64> = [personality_a, personality_b]
        .into_iter()
        .flatten()
        .map(|p| unit(p.confidence))
        .chain(
            [behavior_a, behavior_b]
                .into_iter()
                .flatten()
                .map(|_| BEHAVIOR_CONFIDENCE),
        )
        .collect();

    if sources.is_empty() {
        return BASELINE_CONFIDENCE;
    }

    sources.iter().sum::<f64>() / sources.len() as f64
}

fn bucket(score: f64, labels: [&'static str; 4]) -> &'static str {
    if score >= 0.8 {
        labels[0]
    } else if score >= 0.6 {
        labels[1]
    } else if score >= 0.4 {
        labels[2]
    } else {
        labels[3]
    }
}

pub fn personality_description(score: f64) -> &'static str {
    bucket(
        score,
        [
            "Highly compatible personalities",
            "Good personality compatibility",
            "Moderately compatible personalities",
            "Personalities may differ significantly",
        ],
    )
}

pub fn behavior_description(score: f64) -> &'static str {
    bucket(
        score,
        [
            "Very similar in-app behavior",
            "Compatible usage patterns",
            "Some similar patterns",
            "Different in-app behavior",
        ],
    )
}

pub fn interest_description(score: f64) -> &'static str {
    bucket(
        score,
        [
            "Many interests in common",
            "Several shared interests",
            "Some interests in common",
            "Few shared interests",
        ],
    )
}

pub fn communication_description(score: f64) -> &'static str {
    bucket(
        score,
        [
            "Highly compatible communication styles",
            "Good communication compatibility",
            "Communication can flow well",
            "Different communication styles",
        ],
    )
}
