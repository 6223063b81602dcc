use crate::models::{
    AgePattern, AgeRange, BioReadingBehavior, DistancePattern, InferredPreferences, PhotoPreferences, SwipeBehavior,
    SwipeAction, SwipeEvent, SwipePatterns,
};

/// Decision latency assumed when an event carries none
pub const DEFAULT_DECISION_MS: u64 = 3000;

pub const DEFAULT_AGE_PATTERN: AgePattern = AgePattern {
    preferred: AgeRange::new(18, 35),
    most_liked: AgeRange::new(22, 28),
    confidence: 0.3,
};

pub const DEFAULT_DISTANCE_PATTERN: DistancePattern = DistancePattern {
    average_km: 10.0,
    max_acceptable_km: 25.0,
    preferred_km: 15.0,
};

const OBSERVED_AGE_CONFIDENCE: f64 = 0.8;
/// Likes above which the user is assumed to favour profiles with many photos
const MULTIPLE_PHOTOS_LIKES: usize = 10;
const LONG_BIO_READING_MS: u64 = 5000;

// Simplified signals: content of liked profiles is not analysed yet
const PLACEHOLDER_KEYWORDS: &[&str] = &["travel", "music", "exercise", "nature"];
const PLACEHOLDER_PERSONALITY_TYPES: &[&str] = &["extroverted", "adventurous"];
const PLACEHOLDER_LIFESTYLE: &[&str] = &["active", "social"];
const PLACEHOLDER_INTERESTS: &[&str] = &["travel", "music"];

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Patterns reported for a user with no swipe history
pub fn default_patterns() -> SwipePatterns {
    SwipePatterns {
        average_decision_ms: DEFAULT_DECISION_MS,
        like_rate: 0.5,
        age_pattern: DEFAULT_AGE_PATTERN,
        distance_pattern: DEFAULT_DISTANCE_PATTERN,
        photo_preferences: PhotoPreferences::default(),
        bio_reading: BioReadingBehavior::default(),
    }
}

/// Aggregate a swipe history into patterns and inferred preferences
///
/// Never fails: an empty history yields [`default_patterns`].
pub fn derive_behavior(user_id: &str, history: &[SwipeEvent]) -> SwipeBehavior {
    // Super likes are kept in the history but only plain likes shape the patterns
    let likes: Vec<&SwipeEvent> = history.iter().filter(|e| e.action == SwipeAction::Like).collect();
    let passes = history.iter().filter(|e| e.action == SwipeAction::Pass).count();

    let patterns = if history.is_empty() {
        default_patterns()
    } else {
        SwipePatterns {
            average_decision_ms: average_decision_ms(history),
            like_rate: likes.len() as f64 / history.len() as f64,
            age_pattern: age_pattern(&likes),
            distance_pattern: distance_pattern(&likes),
            photo_preferences: photo_preferences(&likes),
            bio_reading: bio_reading(&likes),
        }
    };

    tracing::debug!(
        "Derived behavior for {}: {} swipes, {} passes, like rate {:.2}",
        user_id,
        history.len(),
        passes,
        patterns.like_rate
    );

    SwipeBehavior {
        user_id: user_id.to_string(),
        swipe_count: history.len(),
        preferences: inferred_preferences(&likes),
        patterns,
    }
}

fn average_decision_ms(history: &[SwipeEvent]) -> u64 {
    mean_ms(history.iter().map(|e| e.decision_ms.unwrap_or(DEFAULT_DECISION_MS))).unwrap_or(DEFAULT_DECISION_MS)
}

/// Mean of millisecond durations, summed wide so huge upstream values cannot overflow
fn mean_ms(values: impl Iterator<Item = u64>) -> Option<u64> {
    let (total, count) = values.fold((0u128, 0u128), |(total, count), v| (total + v as u128, count + 1));
    if count == 0 {
        return None;
    }

    // The mean never exceeds the largest input, so it fits back into u64
    Some((total / count) as u64)
}

/// Nearest-rank interquartile range of a sorted list
///
/// Uses the elements at `len / 4` and `3 * len / 4` without interpolation, so
/// lists shorter than four elements degrade to (min, max).
pub fn interquartile_range(sorted: &[u8]) -> Option<AgeRange> {
    let first = *sorted.first()?;
    let last = *sorted.last()?;

    let q1 = sorted.get(sorted.len() / 4).copied().unwrap_or(first);
    let q3 = sorted.get(3 * sorted.len() / 4).copied().unwrap_or(last);

    Some(AgeRange::new(q1, q3))
}

fn age_pattern(likes: &[&SwipeEvent]) -> AgePattern {
    let mut ages: Vec<u8> = likes.iter().filter_map(|e| e.target_age).collect();
    ages.sort_unstable();

    let (Some(&min), Some(&max), Some(most_liked)) = (ages.first(), ages.last(), interquartile_range(&ages)) else {
        return DEFAULT_AGE_PATTERN;
    };

    AgePattern {
        preferred: AgeRange::new(min, max),
        most_liked,
        confidence: OBSERVED_AGE_CONFIDENCE,
    }
}

fn distance_pattern(likes: &[&SwipeEvent]) -> DistancePattern {
    let mut distances: Vec<f64> = likes
        .iter()
        .filter_map(|e| e.distance_km)
        .filter(|d| d.is_finite())
        .collect();

    if distances.is_empty() {
        return DEFAULT_DISTANCE_PATTERN;
    }

    distances.sort_by(|a, b| a.total_cmp(b));
    let average_km = distances.iter().sum::<f64>() / distances.len() as f64;

    DistancePattern {
        average_km,
        max_acceptable_km: distances[distances.len() - 1],
        preferred_km: distances[distances.len() / 2],
    }
}

fn photo_preferences(likes: &[&SwipeEvent]) -> PhotoPreferences {
    PhotoPreferences {
        prefers_multiple_photos: likes.len() > MULTIPLE_PHOTOS_LIKES,
        likes_smiling: true,
        likes_outdoor_photos: false,
        likes_group_photos: false,
        prefers_close_up: true,
    }
}

fn bio_reading(likes: &[&SwipeEvent]) -> BioReadingBehavior {
    let average_reading_ms = mean_ms(likes.iter().filter_map(|e| e.profile_view_ms)).unwrap_or(0);

    BioReadingBehavior {
        average_reading_ms,
        likes_longer_bios: average_reading_ms > LONG_BIO_READING_MS,
        prefers_keywords: if likes.is_empty() { Vec::new() } else { owned(PLACEHOLDER_KEYWORDS) },
        avoids_keywords: Vec::new(),
    }
}

fn inferred_preferences(likes: &[&SwipeEvent]) -> InferredPreferences {
    if likes.is_empty() {
        return InferredPreferences::default();
    }

    InferredPreferences {
        personality_types: owned(PLACEHOLDER_PERSONALITY_TYPES),
        lifestyle: owned(PLACEHOLDER_LIFESTYLE),
        interests: owned(PLACEHOLDER_INTERESTS),
        deal_breakers: Vec::new(),
    }
}
