//! Practice streak tracking over the device-local progress record.
//!
//! # Responsibility
//! - Record practice events and reset progress through a `ProgressStore`.
//! - Derive the trailing-week calendar and the consecutive-day streak.
//!
//! # Invariants
//! - Each mutation performs one read-modify-write and at most one store write.
//! - Storage failures are logged and reported as `PersistOutcome`, never
//!   returned as errors.
//! - Streak arithmetic is day-granular; time of day never matters.

use crate::model::progress::{format_date_stamp, ProgressRecord};
use crate::repo::progress_store::{ProgressStore, StoreResult, PROGRESS_KEY};
use crate::service::clock::Clock;
use chrono::{Duration, NaiveDate};
use log::{debug, error, info, warn};
use serde::Serialize;

/// Number of days shown by the calendar view, today included.
pub const STREAK_WINDOW_DAYS: usize = 7;

/// One day of the trailing-week calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakDay {
    pub date: NaiveDate,
    pub practiced: bool,
}

/// Whether a mutation reached durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved,
    /// The in-memory record changed but the store rejected the operation.
    NotPersisted,
}

impl PersistOutcome {
    pub fn is_saved(self) -> bool {
        self == Self::Saved
    }
}

/// Tracker owning the learner's progress record.
pub struct StreakTracker<S: ProgressStore, C: Clock> {
    store: S,
    clock: C,
    progress: ProgressRecord,
    /// Whether `progress` reflects a successful store read (or a successful
    /// reset). Until then it must not overwrite the stored record.
    synced: bool,
}

impl<S: ProgressStore, C: Clock> StreakTracker<S, C> {
    /// Creates a tracker and loads the stored record (empty when absent or
    /// unreadable).
    pub fn new(store: S, clock: C) -> Self {
        let loaded = read_record(&store);
        let synced = loaded.is_ok();
        Self {
            store,
            clock,
            progress: loaded.ok().flatten().unwrap_or_default(),
            synced,
        }
    }

    pub fn progress(&self) -> &ProgressRecord {
        &self.progress
    }

    /// Practiced chapters, used as study history by relevance filtering.
    pub fn study_history(&self) -> &[String] {
        &self.progress.chapters_practiced
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Re-reads the stored record, replacing the in-memory copy.
    pub fn reload(&mut self) {
        let loaded = read_record(&self.store);
        self.synced = loaded.is_ok();
        self.progress = loaded.ok().flatten().unwrap_or_default();
    }

    /// Records a practice event for `chapter` on today's date.
    ///
    /// Repeating the call on the same day for the same chapter leaves the
    /// record unchanged apart from rewriting it. Chapter names are trimmed
    /// before they are stored; a blank name only marks the day.
    ///
    /// When the store cannot be read, the in-memory record is extended
    /// instead. If the tracker has never seen the stored record, the update
    /// stays in memory and `NotPersisted` is returned, so an unread history
    /// is never overwritten.
    pub fn record_practice(&mut self, chapter: &str) -> PersistOutcome {
        let today = self.clock.today();

        let read = read_record(&self.store);
        let can_write = read.is_ok() || self.synced;
        let mut next = match read {
            Ok(Some(record)) => record,
            Ok(None) => ProgressRecord::default(),
            Err(_) => self.progress.clone(),
        };

        let chapter = chapter.trim();
        let chapter_added = !chapter.is_empty() && next.add_chapter(chapter);
        let day_added = next.add_practice_date(today);
        next.last_practiced = Some(today);

        debug!(
            "event=practice_record module=service status=start today={} chapter_added={chapter_added} day_added={day_added}",
            format_date_stamp(today)
        );

        self.progress = next;
        if !can_write {
            warn!(
                "event=progress_save module=service status=skipped reason=stored_record_never_read"
            );
            return PersistOutcome::NotPersisted;
        }
        self.synced = true;
        self.persist()
    }

    /// Erases the record in memory and in storage. There is no undo.
    pub fn reset_progress(&mut self) -> PersistOutcome {
        self.progress = ProgressRecord::default();
        match self.store.delete(PROGRESS_KEY) {
            Ok(()) => {
                self.synced = true;
                info!("event=progress_reset module=service status=ok");
                PersistOutcome::Saved
            }
            Err(err) => {
                error!(
                    "event=progress_reset module=service status=error error_code=store_delete_failed error={err}"
                );
                PersistOutcome::NotPersisted
            }
        }
    }

    /// Trailing seven days including today, oldest first.
    pub fn streak_data(&self) -> Vec<StreakDay> {
        trailing_week(&self.progress.practice_dates, self.clock.today())
    }

    /// Consecutive practiced days ending today, or ending yesterday when today
    /// has not been practiced yet.
    pub fn streak(&self) -> u32 {
        compute_streak(&self.progress.practice_dates, self.clock.today())
    }

    fn persist(&self) -> PersistOutcome {
        let encoded = match self.progress.encode() {
            Ok(encoded) => encoded,
            Err(err) => {
                error!(
                    "event=progress_save module=service status=error error_code=encode_failed error={err}"
                );
                return PersistOutcome::NotPersisted;
            }
        };

        match self.store.write(PROGRESS_KEY, &encoded) {
            Ok(()) => {
                info!(
                    "event=progress_save module=service status=ok chapters={} days={}",
                    self.progress.chapters_practiced.len(),
                    self.progress.practice_dates.len()
                );
                PersistOutcome::Saved
            }
            Err(err) => {
                error!(
                    "event=progress_save module=service status=error error_code=store_write_failed error={err}"
                );
                PersistOutcome::NotPersisted
            }
        }
    }
}

/// Reads and decodes the stored record.
///
/// `Ok(None)` means no record is stored. A stored value with an unrecognized
/// shape decodes to the empty record. Store failures are logged and returned.
fn read_record<S: ProgressStore>(store: &S) -> StoreResult<Option<ProgressRecord>> {
    let raw = match store.read(PROGRESS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ok(None),
        Err(err) => {
            warn!(
                "event=progress_load module=service status=error error_code=store_read_failed error={err}"
            );
            return Err(err);
        }
    };

    Ok(Some(ProgressRecord::decode_lenient(&raw).unwrap_or_else(|| {
        warn!("event=progress_load module=service status=fallback reason=unrecognized_shape");
        ProgressRecord::default()
    })))
}

/// Builds the trailing-week calendar ending at `today`, oldest first.
pub fn trailing_week(practice_dates: &[NaiveDate], today: NaiveDate) -> Vec<StreakDay> {
    let mut days: Vec<StreakDay> = (0..STREAK_WINDOW_DAYS as i64)
        .map(|offset| {
            let date = today - Duration::days(offset);
            StreakDay {
                date,
                practiced: practice_dates.contains(&date),
            }
        })
        .collect();
    days.reverse();
    days
}

/// Counts consecutive practiced days.
///
/// - No dates: 0.
/// - Today not practiced: 0 unless the latest practiced day is yesterday, in
///   which case counting starts from yesterday.
/// - Walk distinct dates newest first; stop once two neighbours are more than
///   one day apart.
///
/// Dates after `today` are ignored.
pub fn compute_streak(practice_dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = practice_dates
        .iter()
        .copied()
        .filter(|date| *date <= today)
        .collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();

    let Some(latest) = dates.first().copied() else {
        return 0;
    };
    if latest != today && latest != today - Duration::days(1) {
        return 0;
    }

    let mut streak = 1;
    for pair in dates.windows(2) {
        if (pair[0] - pair[1]).num_days() > 1 {
            break;
        }
        streak += 1;
    }
    streak
}
