//! Free-text mood classification.
//!
//! # Responsibility
//! - Map typed or recognized text to one canonical mood label.
//! - Resolve the effective mood from selector choice plus optional text.
//!
//! # Invariants
//! - Matching is case-insensitive substring containment.
//! - Keyword priority order decides ties, not position in the text.
//! - Unmatched text maps to `Neutral`; classification never fails.

use crate::model::mood::MoodLabel;

/// Keyword rules in priority order. First rule whose keyword occurs wins.
const KEYWORD_RULES: &[(&str, MoodLabel)] = &[
    ("sad", MoodLabel::Sad),
    ("stress", MoodLabel::Stressed),
    ("angry", MoodLabel::Angry),
    ("tired", MoodLabel::Tired),
    ("happy", MoodLabel::Happy),
];

/// Returns the keyword rules in priority order.
pub fn keyword_rules() -> &'static [(&'static str, MoodLabel)] {
    KEYWORD_RULES
}

/// Classifies free text into a mood label.
pub fn classify(text: &str) -> MoodLabel {
    let lowered = text.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, label)| *label)
        .unwrap_or(MoodLabel::Neutral)
}

/// Resolves the effective mood for one user action.
///
/// Non-blank typed text takes precedence over the selector and is
/// classified; blank text leaves the selector value in place.
pub fn resolve_selection(selected: MoodLabel, typed_text: &str) -> MoodLabel {
    if typed_text.trim().is_empty() {
        selected
    } else {
        classify(typed_text)
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, keyword_rules, resolve_selection};
    use crate::model::mood::MoodLabel;

    #[test]
    fn single_keyword_maps_to_its_label() {
        for (keyword, label) in keyword_rules() {
            assert_eq!(classify(&format!("today I am {keyword}")), *label);
        }
    }

    #[test]
    fn no_keyword_maps_to_neutral() {
        assert_eq!(classify("just an ordinary day"), MoodLabel::Neutral);
        assert_eq!(classify(""), MoodLabel::Neutral);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("SO HAPPY"), MoodLabel::Happy);
        assert_eq!(classify("Stressful week"), MoodLabel::Stressed);
    }

    #[test]
    fn priority_order_beats_position_for_every_pair() {
        let rules = keyword_rules();
        for (i, (first_kw, first_label)) in rules.iter().enumerate() {
            for (second_kw, _) in &rules[i + 1..] {
                assert_eq!(classify(&format!("{first_kw} {second_kw}")), *first_label);
                assert_eq!(classify(&format!("{second_kw} {first_kw}")), *first_label);
            }
        }
    }

    #[test]
    fn sad_wins_over_tired() {
        assert_eq!(classify("I feel sad and tired"), MoodLabel::Sad);
    }

    #[test]
    fn blank_text_keeps_selector_value() {
        assert_eq!(resolve_selection(MoodLabel::Angry, "   "), MoodLabel::Angry);
    }

    #[test]
    fn typed_text_overrides_selector() {
        assert_eq!(
            resolve_selection(MoodLabel::Happy, "pretty tired"),
            MoodLabel::Tired
        );
        assert_eq!(
            resolve_selection(MoodLabel::Happy, "nothing special"),
            MoodLabel::Neutral
        );
    }
}
