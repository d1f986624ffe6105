//! Spaced repetition scheduling.
//!
//! A two-bucket rule: correct answers come back after a week, incorrect ones
//! the next day. There is no interval growth and no streak tracking.

use chrono::{DateTime, Days, Utc};

/// Trait for review schedulers.
pub trait ReviewScheduler: Send + Sync {
    /// Scheduler identifier.
    fn name(&self) -> &'static str;

    /// Calculate when a question should be reviewed again.
    fn next_review(&self, submitted_at: DateTime<Utc>, is_correct: bool) -> DateTime<Utc>;
}

/// Fixed-offset scheduler.
#[derive(Debug, Clone)]
pub struct FixedInterval {
    pub correct_days: u64,
    pub incorrect_days: u64,
}

impl Default for FixedInterval {
    fn default() -> Self {
        Self {
            correct_days: 7,
            incorrect_days: 1,
        }
    }
}

impl ReviewScheduler for FixedInterval {
    fn name(&self) -> &'static str {
        "fixed_interval"
    }

    fn next_review(&self, submitted_at: DateTime<Utc>, is_correct: bool) -> DateTime<Utc> {
        let days = if is_correct {
            self.correct_days
        } else {
            self.incorrect_days
        };
        // Only fails past year 262143.
        submitted_at
            .checked_add_days(Days::new(days))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Next review date under the default 7-day / 1-day rule.
pub fn compute_next_review_date(submitted_at: DateTime<Utc>, is_correct: bool) -> DateTime<Utc> {
    FixedInterval::default().next_review(submitted_at, is_correct)
}

/// Whether a record scheduled for `next_review_date` is due at `now`.
pub fn is_due(next_review_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    next_review_date <= now
}
