//! Device-local practice record.
//!
//! # Responsibility
//! - Hold the chapters and calendar days a learner has practiced.
//! - Own the persisted JSON layout and its lenient decoding rules.
//!
//! # Invariants
//! - `chapters_practiced` and `practice_dates` never contain duplicates.
//! - The encoded form has exactly `chaptersPracticed`, `lastPracticed` and
//!   `practiceDates`.

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Date stamp layout used in the persisted record (`YYYY-MM-DD`).
pub const DATE_STAMP_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Practiced chapters in first-practiced order.
    pub chapters_practiced: Vec<String>,
    pub last_practiced: Option<NaiveDate>,
    /// One entry per practiced calendar day, in recording order.
    pub practice_dates: Vec<NaiveDate>,
}

impl ProgressRecord {
    pub fn is_empty(&self) -> bool {
        self.chapters_practiced.is_empty()
            && self.last_practiced.is_none()
            && self.practice_dates.is_empty()
    }

    /// Adds `chapter` unless it is already present. Returns whether it was added.
    pub fn add_chapter(&mut self, chapter: &str) -> bool {
        if self.chapters_practiced.iter().any(|known| known == chapter) {
            return false;
        }
        self.chapters_practiced.push(chapter.to_string());
        true
    }

    /// Adds `date` unless that day is already recorded. Returns whether it was added.
    pub fn add_practice_date(&mut self, date: NaiveDate) -> bool {
        if self.practiced_on(date) {
            return false;
        }
        self.practice_dates.push(date);
        true
    }

    pub fn practiced_on(&self, date: NaiveDate) -> bool {
        self.practice_dates.contains(&date)
    }

    /// Serializes the record to its persisted JSON form.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decodes a persisted value, tolerating foreign or damaged shapes.
    ///
    /// Returns `None` when `raw` is not JSON, is not an object, or lacks a
    /// `chaptersPracticed` array; callers then start from an empty record.
    /// Non-string chapters and unparseable stamps are dropped and duplicates
    /// collapse to their first occurrence.
    pub fn decode_lenient(raw: &str) -> Option<Self> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("event=progress_decode module=model status=error error_code=invalid_json error={err}");
                return None;
            }
        };

        let object = value.as_object()?;
        let chapters = object.get("chaptersPracticed")?.as_array()?;

        let mut record = Self::default();
        for chapter in chapters.iter().filter_map(Value::as_str) {
            record.add_chapter(chapter);
        }

        record.last_practiced = object
            .get("lastPracticed")
            .and_then(Value::as_str)
            .and_then(parse_date_stamp);

        let mut dropped = 0usize;
        if let Some(dates) = object.get("practiceDates").and_then(Value::as_array) {
            for entry in dates {
                match entry.as_str().and_then(parse_date_stamp) {
                    Some(date) => {
                        record.add_practice_date(date);
                    }
                    None => dropped += 1,
                }
            }
        }
        if dropped > 0 {
            warn!("event=progress_decode module=model status=partial dropped_dates={dropped}");
        }

        Some(record)
    }
}

/// Parses a `YYYY-MM-DD` stamp. A trailing time component is ignored.
pub fn parse_date_stamp(stamp: &str) -> Option<NaiveDate> {
    let day = stamp.trim().split('T').next()?;
    NaiveDate::parse_from_str(day, DATE_STAMP_FORMAT).ok()
}

/// Formats a day as its persisted stamp.
pub fn format_date_stamp(date: NaiveDate) -> String {
    date.format(DATE_STAMP_FORMAT).to_string()
}
