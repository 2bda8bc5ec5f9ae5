//! Per-day emotion journal kept on the client. Not persisted by the server.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Emoji shown for labels that are not in [`EMOTION_OPTIONS`].
pub const UNKNOWN_EMOJI: &str = "😐";

/// Number of days covered by [`EmotionJournal::recent_week`].
pub const RECENT_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmotionOption {
    pub emoji: &'static str,
    pub label: &'static str,
}

pub const EMOTION_OPTIONS: &[EmotionOption] = &[
    EmotionOption { emoji: "😊", label: "happy" },
    EmotionOption { emoji: "😌", label: "calm" },
    EmotionOption { emoji: "😢", label: "sad" },
    EmotionOption { emoji: "😰", label: "anxious" },
    EmotionOption { emoji: "😠", label: "angry" },
    EmotionOption { emoji: "😴", label: "tired" },
];

pub fn emoji_for(label: &str) -> &'static str {
    EMOTION_OPTIONS
        .iter()
        .find(|opt| opt.label.eq_ignore_ascii_case(label))
        .map_or(UNKNOWN_EMOJI, |opt| opt.emoji)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionEntry {
    pub id: String,
    /// Calendar day in the client's own timezone.
    pub date: NaiveDate,
    pub emotion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Per-day emotion log. Holds at most one entry per calendar day; recording
/// again on the same day replaces that day's entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionJournal {
    entries: Vec<EmotionEntry>,
}

impl EmotionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` without touching the journal when `emotion` is blank.
    pub fn record(
        &mut self,
        date: NaiveDate,
        emotion: &str,
        note: Option<&str>,
    ) -> Option<&EmotionEntry> {
        let emotion = emotion.trim();
        if emotion.is_empty() {
            return None;
        }

        let entry = EmotionEntry {
            id: format!("emotion-{}", uuid::Uuid::new_v4()),
            date,
            emotion: emotion.to_string(),
            note: note.map(str::trim).filter(|n| !n.is_empty()).map(String::from),
        };

        let idx = match self.entries.iter().position(|e| e.date == date) {
            Some(idx) => {
                self.entries[idx] = entry;
                idx
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        self.entries.get(idx)
    }

    pub fn entry_for(&self, date: NaiveDate) -> Option<&EmotionEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// One slot per day for the week ending on `today`, oldest first.
    pub fn recent_week(&self, today: NaiveDate) -> Vec<Option<&EmotionEntry>> {
        (0..RECENT_DAYS)
            .rev()
            .map(|back| today.checked_sub_days(Days::new(back)).and_then(|d| self.entry_for(d)))
            .collect()
    }

    pub fn entries(&self) -> &[EmotionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn same_day_entry_is_replaced() {
        let mut journal = EmotionJournal::new();
        journal.record(day(10), "sad", Some("rough morning"));
        journal.record(day(10), "calm", None);

        assert_eq!(journal.len(), 1);
        let entry = journal.entry_for(day(10)).unwrap();
        assert_eq!(entry.emotion, "calm");
        assert!(entry.note.is_none());
    }

    #[test]
    fn blank_emotion_is_ignored() {
        let mut journal = EmotionJournal::new();
        assert!(journal.record(day(1), "   ", Some("note")).is_none());
        assert!(journal.is_empty());
    }

    #[test]
    fn blank_note_becomes_none() {
        let mut journal = EmotionJournal::new();
        let entry = journal.record(day(2), "happy", Some("  ")).unwrap();
        assert!(entry.note.is_none());
    }

    #[test]
    fn recent_week_has_gaps_oldest_first() {
        let mut journal = EmotionJournal::new();
        journal.record(day(4), "tired", None);
        journal.record(day(10), "happy", None);
        journal.record(day(1), "angry", None);

        let week = journal.recent_week(day(10));
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].map(|e| e.emotion.as_str()), Some("tired"));
        assert!(week[1..6].iter().all(Option::is_none));
        assert_eq!(week[6].map(|e| e.emotion.as_str()), Some("happy"));
    }

    #[test]
    fn emoji_lookup_falls_back() {
        assert_eq!(emoji_for("Happy"), "😊");
        assert_eq!(emoji_for("bewildered"), UNKNOWN_EMOJI);
    }
}
