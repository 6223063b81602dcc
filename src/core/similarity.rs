use std::collections::HashSet;

use crate::models::AgeRange;

/// Contribution used whenever one side of a comparison is missing
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Sanitize an upstream float into [0, 1]
///
/// NaN is treated as "no signal" and maps to the neutral score.
#[inline]
pub fn unit(value: f64) -> f64 {
    if value.is_nan() {
        NEUTRAL_SCORE
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Score a pair of optional inputs, falling back to [`NEUTRAL_SCORE`] when either is absent
#[inline]
pub fn pair_or_neutral<T, F>(a: Option<&T>, b: Option<&T>, score: F) -> f64
where
    F: FnOnce(&T, &T) -> f64,
{
    match (a, b) {
        (Some(a), Some(b)) => unit(score(a, b)),
        _ => NEUTRAL_SCORE,
    }
}

/// 1.0 for equal values, falling linearly with the distance between them
#[inline]
pub fn similarity(a: f64, b: f64) -> f64 {
    1.0 - (unit(a) - unit(b)).abs()
}

/// For traits where moderate opposites attract
///
/// A difference strictly between 0.3 and 0.7 scores 0.8, a smaller one 0.6,
/// anything larger 0.4.
#[inline]
pub fn complementary(a: f64, b: f64) -> f64 {
    let difference = (unit(a) - unit(b)).abs();
    if difference > 0.3 && difference < 0.7 {
        0.8
    } else if difference <= 0.3 {
        0.6
    } else {
        0.4
    }
}

#[inline]
fn in_mid_range(value: f64) -> bool {
    (0.3..=0.7).contains(&value)
}

/// Best when both values sit in the middle band, plain similarity when neither does
#[inline]
pub fn mid_range(a: f64, b: f64) -> f64 {
    let (a, b) = (unit(a), unit(b));
    match (in_mid_range(a), in_mid_range(b)) {
        (true, true) => 0.9,
        (true, false) | (false, true) => 0.7,
        (false, false) => similarity(a, b),
    }
}

/// Overlap of two inclusive age ranges relative to the wider one
pub fn range_overlap(first: &AgeRange, second: &AgeRange) -> f64 {
    let start = first.min.max(second.min) as i32;
    let end = first.max.min(second.max) as i32;
    let overlap = (end - start + 1).max(0);
    let widest = first.span().max(second.span());

    if widest == 0 {
        return 0.0;
    }

    overlap as f64 / widest as f64
}

/// Jaccard similarity of two interest lists with set semantics
///
/// Returns `None` when either list is empty, otherwise the similarity and
/// the number of shared interests.
pub fn jaccard(first: &[String], second: &[String]) -> Option<(f64, usize)> {
    let first: HashSet<&str> = first.iter().map(String::as_str).collect();
    let second: HashSet<&str> = second.iter().map(String::as_str).collect();

    if first.is_empty() || second.is_empty() {
        return None;
    }

    let common = first.intersection(&second).count();
    let union = first.union(&second).count();

    Some((common as f64 / union as f64, common))
}
