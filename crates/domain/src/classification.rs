// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date classification for expiry-driven alerts.
//!
//! This module converts a calendar date into a signed day count relative to
//! a caller-supplied "today" and maps that count into an ordered severity
//! bucket. Every surface (contract lists, medical checkup tracker, HSE
//! documents, ISO certificates) calls this one implementation instead of
//! re-deriving day math with drifting constants.
//!
//! ## Invariants
//!
//! - "Today" is always passed in by the caller; the classifier never reads
//!   the wall clock.
//! - Day counts are whole calendar days: both sides are dates, so midnight
//!   truncation is inherent.
//! - The read/display path parses leniently (`None` on malformed input);
//!   the write path parses strictly (field-identifying error). The two
//!   policies must not be merged.
//! - Threshold cut points are named per record/document category and are
//!   intentionally NOT unified across categories.

use crate::error::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A named set of day-count cut points for bucket classification.
///
/// Each record or document category carries its own set; the cut points
/// are inclusive upper bounds for `DueSoon`, `Reminder2`, and `Reminder1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdSet {
    /// Inclusive upper bound of the `DueSoon` bucket (days).
    pub due_soon: i64,
    /// Inclusive upper bound of the `Reminder2` bucket (days).
    pub reminder2: i64,
    /// Inclusive upper bound of the `Reminder1` bucket (days).
    pub reminder1: i64,
}

impl ThresholdSet {
    /// Contract, medical checkup, and HSE document thresholds (30/60/90).
    pub const CONTRACT: Self = Self {
        due_soon: 30,
        reminder2: 60,
        reminder1: 90,
    };

    /// Notification-bubble widget thresholds (14/30/42).
    pub const NOTIFICATION: Self = Self {
        due_soon: 14,
        reminder2: 30,
        reminder1: 42,
    };

    /// ISO certificate thresholds: "within six months" (180 days) is the
    /// only alerting boundary for this category.
    pub const ISO_CERT: Self = Self {
        due_soon: 180,
        reminder2: 180,
        reminder1: 180,
    };

    /// Resolves a threshold set from its category name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name does not match a known category.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        match name.trim().to_lowercase().as_str() {
            "contract" => Ok(Self::CONTRACT),
            "notification" => Ok(Self::NOTIFICATION),
            "iso" | "iso_cert" => Ok(Self::ISO_CERT),
            other => Err(DomainError::UnknownThresholdSet(other.to_string())),
        }
    }
}

/// Ordered severity bucket derived from a day count.
///
/// Priorities are used for most-urgent-first sorting; lower is more urgent.
/// `Normal` and `Unknown` share the lowest priority, with `Unknown` sorting
/// after `Normal` via the nulls-last day-count tie break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationBucket {
    /// The date is in the past.
    Expired,
    /// Within the `due_soon` cut point.
    DueSoon,
    /// Between `due_soon` and `reminder2`.
    Reminder2,
    /// Between `reminder2` and `reminder1`.
    Reminder1,
    /// Beyond `reminder1`.
    Normal,
    /// No date present or the date could not be parsed.
    Unknown,
}

impl ClassificationBucket {
    /// Returns the sort priority for this bucket (1 is most urgent).
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Expired => 1,
            Self::DueSoon => 2,
            Self::Reminder2 => 3,
            Self::Reminder1 => 4,
            Self::Normal | Self::Unknown => 5,
        }
    }

    /// Converts this bucket to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::DueSoon => "due_soon",
            Self::Reminder2 => "reminder2",
            Self::Reminder1 => "reminder1",
            Self::Normal => "normal",
            Self::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for ClassificationBucket {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expired" => Ok(Self::Expired),
            "due_soon" => Ok(Self::DueSoon),
            "reminder2" => Ok(Self::Reminder2),
            "reminder1" => Ok(Self::Reminder1),
            "normal" => Ok(Self::Normal),
            "unknown" => Ok(Self::Unknown),
            other => Err(DomainError::UnknownBucket(other.to_string())),
        }
    }
}

impl std::fmt::Display for ClassificationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The result of classifying a single date against a threshold set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Whole calendar days until the target date; negative when past,
    /// `None` when no date was available.
    pub days_remaining: Option<i64>,
    /// The severity bucket the day count falls into.
    pub bucket: ClassificationBucket,
}

/// Computes whole calendar days from `today` to `date`.
///
/// Returns `None` when no date is present. Negative counts mean the date
/// is in the past.
#[must_use]
pub fn days_remaining(date: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    date.map(|d| (d - today).num_days())
}

/// Classifies a date into a severity bucket using the given thresholds.
///
/// The decision table is fixed and ordered; the first matching row wins:
///
/// | Condition | Bucket |
/// |---|---|
/// | no date | `Unknown` |
/// | `days < 0` | `Expired` |
/// | `days <= due_soon` | `DueSoon` |
/// | `days <= reminder2` | `Reminder2` |
/// | `days <= reminder1` | `Reminder1` |
/// | otherwise | `Normal` |
#[must_use]
pub fn classify(
    date: Option<NaiveDate>,
    today: NaiveDate,
    thresholds: &ThresholdSet,
) -> Classification {
    let days: Option<i64> = days_remaining(date, today);
    let bucket: ClassificationBucket = match days {
        None => ClassificationBucket::Unknown,
        Some(d) if d < 0 => ClassificationBucket::Expired,
        Some(d) if d <= thresholds.due_soon => ClassificationBucket::DueSoon,
        Some(d) if d <= thresholds.reminder2 => ClassificationBucket::Reminder2,
        Some(d) if d <= thresholds.reminder1 => ClassificationBucket::Reminder1,
        Some(_) => ClassificationBucket::Normal,
    };

    Classification {
        days_remaining: days,
        bucket,
    }
}

/// Compares two classifications for most-urgent-first ordering.
///
/// The sort key is `(priority, days_remaining nulls-last)`: ties in
/// priority are broken by ascending day count, and entries without a day
/// count sort after entries with one.
#[must_use]
pub fn urgency_cmp(a: &Classification, b: &Classification) -> Ordering {
    match a.bucket.priority().cmp(&b.bucket.priority()) {
        Ordering::Equal => match (a.days_remaining, b.days_remaining) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        other => other,
    }
}

/// Parses a date leniently for the read/display path.
///
/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY`, or an ISO 8601 timestamp (only the
/// date part is significant). Malformed or empty input yields `None`
/// rather than an error.
#[must_use]
pub fn parse_date_lenient(value: &str) -> Option<NaiveDate> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Timestamps carry the date in the first ten characters.
    let date_part: &str = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d/%m/%Y"))
        .ok()
}

/// Parses a date strictly for the write path.
///
/// Accepts the same forms as [`parse_date_lenient`] but surfaces a
/// field-identifying validation error on malformed input instead of
/// degrading to `None`.
///
/// # Errors
///
/// Returns `DomainError::DateParse` naming the offending field.
pub fn parse_date_strict(field: &'static str, value: &str) -> Result<NaiveDate, DomainError> {
    parse_date_lenient(value).ok_or_else(|| DomainError::DateParse {
        field,
        value: value.to_string(),
    })
}
