use crate::models::{
    CommunicationStyle, Message, MessageLength, PersonalityProfile, PersonalityTraits, Profile, ResponseSpeed,
    SocialPreferences,
};

const EXTRAVERT_KEYWORDS: &[&str] = &["extrovert", "outgoing", "social", "party", "meet people"];
const INTROVERT_KEYWORDS: &[&str] = &["introvert", "quiet", "home", "reading"];
const ADVENTURE_KEYWORDS: &[&str] = &["adventure", "travel"];

const GROUP_KEYWORDS: &[&str] = &["friends", "group", "party", "events"];
const DEEP_TALK_KEYWORDS: &[&str] = &["deep", "philosophy", "serious conversation", "meaningful"];
const DEBATE_KEYWORDS: &[&str] = &["debate", "discussion", "politics", "opinion"];
const PLANNING_KEYWORDS: &[&str] = &["plan", "organized", "schedule"];
const HIGH_ENERGY_KEYWORDS: &[&str] = &["energy", "active", "sport", "gym"];
const LOW_ENERGY_KEYWORDS: &[&str] = &["quiet", "calm", "relax"];

const LAUGHTER_MARKERS: &[&str] = &["haha", "kkk", "lol", "\u{1F602}", "\u{1F604}"];

/// Emoticons plus the supplemental faces block
const EMOJI_RANGES: &[(char, char)] = &[('\u{1F600}', '\u{1F67F}'), ('\u{1F910}', '\u{1F9FF}')];

/// Mean message length (in chars) above which a writer reads as conscientious
const LONG_MESSAGE_CHARS: f64 = 100.0;
const QUESTION_RATIO_THRESHOLD: f64 = 0.3;
const TYPE_THRESHOLD: f64 = 0.6;

/// Directness reported once any message history exists
const OBSERVED_DIRECTNESS: f64 = 0.6;

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn is_emoji(c: char) -> bool {
    EMOJI_RANGES.iter().any(|(lo, hi)| (*lo..=*hi).contains(&c))
}

/// Emoji or exclamation marks
pub fn has_expressive_marker(text: &str) -> bool {
    text.chars().any(|c| c == '!' || is_emoji(c))
}

pub fn has_laughter_marker(text: &str) -> bool {
    let lower = text.to_lowercase();
    contains_any(&lower, LAUGHTER_MARKERS)
}

fn mean_chars<'a>(messages: impl Iterator<Item = &'a Message>) -> Option<f64> {
    let (total, count) = messages.fold((0usize, 0usize), |(total, count), m| {
        (total + m.content.chars().count(), count + 1)
    });

    if count == 0 {
        None
    } else {
        Some(total as f64 / count as f64)
    }
}

/// Derive a personality estimate from a profile and the user's message history
///
/// Never fails: with no usable signal the fixed priors are returned.
pub fn derive_personality(profile: &Profile, messages: &[Message]) -> PersonalityProfile {
    let traits = derive_traits(profile, messages);
    let communication_style = derive_communication_style(&profile.user_id, messages);
    let social_preferences = derive_social_preferences(profile);
    let type_tag = type_tag(&traits);
    let confidence = personality_confidence(profile, messages);

    tracing::debug!(
        "Derived personality for {}: type {}, confidence {:.2}",
        profile.user_id,
        type_tag,
        confidence
    );

    PersonalityProfile {
        user_id: profile.user_id.clone(),
        type_tag: Some(type_tag),
        traits,
        communication_style,
        social_preferences,
        confidence,
    }
}

/// Trait estimate from bio keywords and the user's own messages
pub fn derive_traits(profile: &Profile, messages: &[Message]) -> PersonalityTraits {
    let mut traits = PersonalityTraits::default();
    let bio = profile.bio.to_lowercase();

    // One dominant adjustment, first matching family wins
    if contains_any(&bio, EXTRAVERT_KEYWORDS) {
        traits.extraversion = 0.8;
    } else if contains_any(&bio, INTROVERT_KEYWORDS) {
        traits.extraversion = 0.3;
    } else if contains_any(&bio, ADVENTURE_KEYWORDS) {
        traits.extraversion += 0.2;
        traits.openness += 0.3;
    }

    let own: Vec<&Message> = messages.iter().filter(|m| m.sender_id == profile.user_id).collect();

    if let Some(avg_length) = mean_chars(own.iter().copied()) {
        if avg_length > LONG_MESSAGE_CHARS {
            traits.conscientiousness += 0.2;
        }

        if own.iter().any(|m| has_expressive_marker(&m.content)) {
            traits.agreeableness += 0.1;
        }

        let questions = own.iter().filter(|m| m.content.contains('?')).count();
        if questions as f64 / own.len() as f64 > QUESTION_RATIO_THRESHOLD {
            traits.agreeableness += 0.2;
        }
    }

    clamp_traits(traits)
}

/// Clamp every trait into [0, 1]
pub fn clamp_traits(traits: PersonalityTraits) -> PersonalityTraits {
    use super::similarity::unit;

    PersonalityTraits {
        extraversion: unit(traits.extraversion),
        agreeableness: unit(traits.agreeableness),
        conscientiousness: unit(traits.conscientiousness),
        neuroticism: unit(traits.neuroticism),
        openness: unit(traits.openness),
    }
}

/// Communication style over the whole supplied history
pub fn derive_communication_style(user_id: &str, messages: &[Message]) -> CommunicationStyle {
    let Some(avg_length) = mean_chars(messages.iter()) else {
        return CommunicationStyle::default();
    };

    let total = messages.len() as f64;
    let expressive = messages.iter().filter(|m| has_expressive_marker(&m.content)).count();
    let laughing = messages.iter().filter(|m| has_laughter_marker(&m.content)).count();

    CommunicationStyle {
        directness: OBSERVED_DIRECTNESS,
        emotionality: (expressive as f64 / total).min(1.0),
        humor: (laughing as f64 / total).min(1.0),
        response_speed: response_speed(user_id, messages),
        message_length: message_length_bucket(avg_length),
    }
}

pub fn message_length_bucket(avg_chars: f64) -> MessageLength {
    match avg_chars {
        l if l < 20.0 => MessageLength::VeryShort,
        l if l < 50.0 => MessageLength::Short,
        l if l < 150.0 => MessageLength::Medium,
        l if l < 300.0 => MessageLength::Long,
        _ => MessageLength::VeryLong,
    }
}

/// Bucket the median delay between someone else's message and the user's reply
///
/// Moderate when the history contains no reply by the user.
pub fn response_speed(user_id: &str, messages: &[Message]) -> ResponseSpeed {
    let mut ordered: Vec<&Message> = messages.iter().collect();
    ordered.sort_by_key(|m| m.timestamp);

    let mut gaps: Vec<i64> = ordered
        .windows(2)
        .filter(|pair| pair[0].sender_id != user_id && pair[1].sender_id == user_id)
        .map(|pair| (pair[1].timestamp - pair[0].timestamp).num_seconds())
        .collect();

    if gaps.is_empty() {
        return ResponseSpeed::Moderate;
    }

    gaps.sort_unstable();
    let median_minutes = gaps[gaps.len() / 2] / 60;

    match median_minutes {
        m if m < 5 => ResponseSpeed::Immediate,
        m if m < 30 => ResponseSpeed::Quick,
        m if m < 120 => ResponseSpeed::Moderate,
        m if m < 720 => ResponseSpeed::Slow,
        _ => ResponseSpeed::VerySlow,
    }
}

pub fn derive_social_preferences(profile: &Profile) -> SocialPreferences {
    let bio = profile.bio.to_lowercase();

    let social_energy_level = if contains_any(&bio, HIGH_ENERGY_KEYWORDS) {
        0.8
    } else if contains_any(&bio, LOW_ENERGY_KEYWORDS) {
        0.3
    } else {
        0.5
    };

    SocialPreferences {
        prefers_group_activities: contains_any(&bio, GROUP_KEYWORDS),
        likes_deep_conversations: contains_any(&bio, DEEP_TALK_KEYWORDS),
        enjoys_debates: contains_any(&bio, DEBATE_KEYWORDS),
        prefers_planned_activities: contains_any(&bio, PLANNING_KEYWORDS)
            || profile.interests.iter().any(|i| i.eq_ignore_ascii_case("organization")),
        social_energy_level,
    }
}

/// Four independent threshold tests on extraversion, openness, agreeableness
/// and conscientiousness
pub fn type_tag(traits: &PersonalityTraits) -> String {
    let letter = |value: f64, high: char, low: char| if value > TYPE_THRESHOLD { high } else { low };

    [
        letter(traits.extraversion, 'E', 'I'),
        letter(traits.openness, 'N', 'S'),
        letter(traits.agreeableness, 'F', 'T'),
        letter(traits.conscientiousness, 'J', 'P'),
    ]
    .iter()
    .collect()
}

pub fn personality_confidence(profile: &Profile, messages: &[Message]) -> f64 {
    let mut confidence: f64 = 0.3;

    if profile.bio.chars().count() > 100 {
        confidence += 0.2;
    }
    if messages.len() > 10 {
        confidence += 0.3;
    }

    let mut interests: Vec<&str> = profile.interests.iter().map(String::as_str).collect();
    interests.sort_unstable();
    interests.dedup();
    if interests.len() >= 3 {
        confidence += 0.2;
    }

    confidence.min(1.0)
}
