//! Mood label and mood record types.
//!
//! # Responsibility
//! - Map each canonical label to its glyph and display string.
//! - Parse persisted display strings back into labels.
//!
//! # Invariants
//! - `MoodLabel::ALL` is the selector order; `Neutral` comes first and is the
//!   default selection.
//! - `parse_display(label.display())` always returns `Some(label)`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

// Optional leading glyph token, then the label word.
static DISPLAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:(\S+)\s+)?([A-Za-z]+)\s*$").expect("valid mood display regex")
});

/// Canonical emotional-state category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MoodLabel {
    #[default]
    Neutral,
    Sad,
    Angry,
    Stressed,
    Happy,
    Tired,
}

impl MoodLabel {
    /// All labels in selector order.
    pub const ALL: [MoodLabel; 6] = [
        Self::Neutral,
        Self::Sad,
        Self::Angry,
        Self::Stressed,
        Self::Happy,
        Self::Tired,
    ];

    /// Bare label name, e.g. `Sad`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Sad => "Sad",
            Self::Angry => "Angry",
            Self::Stressed => "Stressed",
            Self::Happy => "Happy",
            Self::Tired => "Tired",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Neutral => "😐",
            Self::Sad => "😞",
            Self::Angry => "😡",
            Self::Stressed => "😰",
            Self::Happy => "😊",
            Self::Tired => "😴",
        }
    }

    /// Display string with glyph, e.g. `😞 Sad`. This is the persisted form.
    pub fn display(self) -> &'static str {
        match self {
            Self::Neutral => "😐 Neutral",
            Self::Sad => "😞 Sad",
            Self::Angry => "😡 Angry",
            Self::Stressed => "😰 Stressed",
            Self::Happy => "😊 Happy",
            Self::Tired => "😴 Tired",
        }
    }

    /// Parses a display string (`😞 Sad`) or a bare label (`sad`).
    ///
    /// Matching on the label word is case-insensitive. A prefix is only
    /// accepted when it is the label's own glyph, so `not happy` or
    /// `😞 Happy` are rejected.
    pub fn parse_display(value: &str) -> Option<Self> {
        let captures = DISPLAY_RE.captures(value)?;
        let word = captures.get(2)?.as_str();
        let label = Self::ALL
            .into_iter()
            .find(|label| label.name().eq_ignore_ascii_case(word))?;
        match captures.get(1) {
            Some(prefix) if prefix.as_str() != label.glyph() => None,
            _ => Some(label),
        }
    }
}

impl Display for MoodLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

/// One day's mood entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoodRecord {
    pub date: NaiveDate,
    pub mood: MoodLabel,
}

impl MoodRecord {
    pub fn new(date: NaiveDate, mood: MoodLabel) -> Self {
        Self { date, mood }
    }
}
