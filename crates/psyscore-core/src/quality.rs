//! Data-quality heuristics.
//!
//! These flag submissions for review; they never exclude them.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerMap, ResponseQuality};

/// Fewer answers than this are never flagged as straight-lining.
pub const STRAIGHT_LINING_MIN_ANSWERS: usize = 5;

/// Completion faster than this (10 minutes) is `TooFast`.
pub const TOO_FAST_SECONDS: u64 = 600;

/// Completion slower than this (60 minutes) is `Slow`.
pub const SLOW_SECONDS: u64 = 3600;

/// True when at least five answers were given and all are identical.
pub fn detect_straight_lining(responses: &AnswerMap) -> bool {
    if responses.len() < STRAIGHT_LINING_MIN_ANSWERS {
        return false;
    }
    let mut values = responses.values();
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeCategory {
    TooFast,
    Normal,
    Slow,
}

/// Response-time verdict with a human-readable rationale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseTimeAnalysis {
    /// The completion time that was classified.
    pub seconds: u64,
    pub category: TimeCategory,
    /// True for `TooFast` and `Slow`.
    pub flag: bool,
    pub message: &'static str,
}

/// Classify total completion time. Both pivots are inclusive of `Normal`.
pub fn analyze_response_time(seconds: u64) -> ResponseTimeAnalysis {
    if seconds < TOO_FAST_SECONDS {
        ResponseTimeAnalysis {
            seconds,
            category: TimeCategory::TooFast,
            flag: true,
            message: "Completed in less than 10 minutes - may indicate insufficient attention",
        }
    } else if seconds > SLOW_SECONDS {
        ResponseTimeAnalysis {
            seconds,
            category: TimeCategory::Slow,
            flag: true,
            message: "Took more than 60 minutes - may indicate distractions or interruptions",
        }
    } else {
        ResponseTimeAnalysis {
            seconds,
            category: TimeCategory::Normal,
            flag: false,
            message: "Normal completion time",
        }
    }
}

/// Fold both heuristics into the stored quality label.
///
/// `Good` is never derived here; only an administrator assigns it.
pub fn response_quality(straight_lining: bool, time: Option<TimeCategory>) -> ResponseQuality {
    match (straight_lining, time) {
        (true, Some(TimeCategory::TooFast)) => ResponseQuality::Invalid,
        (true, _) => ResponseQuality::Suspicious,
        (false, Some(TimeCategory::TooFast)) => ResponseQuality::TooFast,
        (false, Some(TimeCategory::Slow)) => ResponseQuality::TooSlow,
        (false, _) => ResponseQuality::Normal,
    }
}

/// Result of both checks on one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub straight_lining: bool,
    pub response_time: Option<ResponseTimeAnalysis>,
    pub quality: ResponseQuality,
}

impl QualityReport {
    pub fn assess(responses: &AnswerMap, response_time_seconds: Option<u64>) -> Self {
        let straight_lining = detect_straight_lining(responses);
        let response_time = response_time_seconds.map(analyze_response_time);
        let quality = response_quality(straight_lining, response_time.map(|r| r.category));
        if quality != ResponseQuality::Normal {
            tracing::debug!(%quality, straight_lining, ?response_time_seconds, "submission flagged");
        }
        Self {
            straight_lining,
            response_time,
            quality,
        }
    }

    /// Whether any check raised a flag.
    pub fn flagged(&self) -> bool {
        self.straight_lining || self.response_time.is_some_and(|r| r.flag)
    }
}
