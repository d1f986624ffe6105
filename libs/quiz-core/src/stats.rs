//! Accuracy statistics over answer records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{AnswerRecord, QuestionKind};

/// Attempt counts and accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccuracyStats {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Fraction of correct attempts (0.0 to 1.0); 0.0 when there are none.
    pub accuracy: f64,
}

impl AccuracyStats {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a AnswerRecord>,
    {
        let mut stats = Self::default();
        for record in records {
            stats.add(record.is_correct);
        }
        stats
    }

    fn add(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.accuracy = self.correct as f64 / self.total as f64;
    }
}

/// Overall stats plus a per-kind breakdown.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsBreakdown {
    pub overall: AccuracyStats,
    pub by_kind: BTreeMap<QuestionKind, AccuracyStats>,
}

impl StatsBreakdown {
    pub fn from_records(records: &[AnswerRecord]) -> Self {
        let mut breakdown = Self::default();
        for record in records {
            breakdown.overall.add(record.is_correct);
            breakdown
                .by_kind
                .entry(record.kind)
                .or_default()
                .add(record.is_correct);
        }
        breakdown
    }
}
