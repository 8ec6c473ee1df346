// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bucket counting, filtering, and urgency sorting over record collections.
//!
//! These are pure, side-effect-free functions over in-memory collections;
//! they never touch the persistence layer. The caller supplies the
//! already-fetched records, the date field to classify on, and the
//! threshold set appropriate to the record category.

use crate::classification::{
    Classification, ClassificationBucket, ThresholdSet, classify, urgency_cmp,
};
use crate::types::Employee;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The date field a list view classifies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateField {
    /// Classify on `contract_start`.
    ContractStart,
    /// Classify on `contract_end`.
    ContractEnd,
}

impl DateField {
    /// Extracts the chosen date from an employee record.
    #[must_use]
    pub const fn extract(&self, employee: &Employee) -> Option<NaiveDate> {
        match self {
            Self::ContractStart => Some(employee.contract_start),
            Self::ContractEnd => Some(employee.contract_end),
        }
    }

    /// Converts this field to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ContractStart => "contract_start",
            Self::ContractEnd => "contract_end",
        }
    }
}

impl std::str::FromStr for DateField {
    type Err = crate::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contract_start" => Ok(Self::ContractStart),
            "contract_end" => Ok(Self::ContractEnd),
            other => Err(crate::error::DomainError::UnknownDateField(
                other.to_string(),
            )),
        }
    }
}

/// Per-bucket tallies over a record collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    /// Total records examined.
    pub total: usize,
    /// Records whose date is in the past.
    pub expired: usize,
    /// Records within the `due_soon` cut point.
    pub due_soon: usize,
    /// Records in the `Reminder2` band.
    pub reminder2: usize,
    /// Records in the `Reminder1` band.
    pub reminder1: usize,
    /// Records beyond the last cut point.
    pub normal: usize,
    /// Records without a usable date.
    pub unknown: usize,
}

impl BucketCounts {
    const fn record(&mut self, bucket: ClassificationBucket) {
        self.total += 1;
        match bucket {
            ClassificationBucket::Expired => self.expired += 1,
            ClassificationBucket::DueSoon => self.due_soon += 1,
            ClassificationBucket::Reminder2 => self.reminder2 += 1,
            ClassificationBucket::Reminder1 => self.reminder1 += 1,
            ClassificationBucket::Normal => self.normal += 1,
            ClassificationBucket::Unknown => self.unknown += 1,
        }
    }
}

/// Bucket selector for list filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketFilter {
    /// Match every record.
    All,
    /// Match records classified into the given bucket.
    Only(ClassificationBucket),
}

/// Tallies bucket counts over an arbitrary collection.
///
/// `date_of` extracts the date to classify from each item; categories with
/// different alerting cut points pass their own [`ThresholdSet`].
#[must_use]
pub fn tally<T>(
    items: &[T],
    date_of: impl Fn(&T) -> Option<NaiveDate>,
    today: NaiveDate,
    thresholds: &ThresholdSet,
) -> BucketCounts {
    let mut counts: BucketCounts = BucketCounts::default();
    for item in items {
        let classification: Classification = classify(date_of(item), today, thresholds);
        counts.record(classification.bucket);
    }
    counts
}

/// Tallies bucket counts for employee records on a chosen date field.
#[must_use]
pub fn tally_employees(
    employees: &[Employee],
    field: DateField,
    today: NaiveDate,
    thresholds: &ThresholdSet,
) -> BucketCounts {
    tally(employees, |e| field.extract(e), today, thresholds)
}

/// Filters a collection by bucket and case-insensitive substring search.
///
/// The bucket predicate applies first; a non-empty `search` term then
/// narrows the subset to items whose haystack contains the term,
/// case-insensitively. An empty term matches everything.
#[must_use]
pub fn filter<'a, T>(
    items: &'a [T],
    date_of: impl Fn(&T) -> Option<NaiveDate>,
    haystack_of: impl Fn(&T) -> String,
    bucket_filter: BucketFilter,
    search: &str,
    today: NaiveDate,
    thresholds: &ThresholdSet,
) -> Vec<&'a T> {
    let needle: String = search.trim().to_lowercase();
    items
        .iter()
        .filter(|item| match bucket_filter {
            BucketFilter::All => true,
            BucketFilter::Only(bucket) => {
                classify(date_of(item), today, thresholds).bucket == bucket
            }
        })
        .filter(|item| needle.is_empty() || haystack_of(item).contains(&needle))
        .collect()
}

/// Filters employee records by bucket and search term on a chosen field.
#[must_use]
pub fn filter_employees<'a>(
    employees: &'a [Employee],
    field: DateField,
    bucket_filter: BucketFilter,
    search: &str,
    today: NaiveDate,
    thresholds: &ThresholdSet,
) -> Vec<&'a Employee> {
    filter(
        employees,
        |e| field.extract(e),
        Employee::search_haystack,
        bucket_filter,
        search,
        today,
        thresholds,
    )
}

/// Sorts employee records most-urgent-first on the chosen date field.
///
/// The sort is stable and delegates to the classifier's comparator:
/// `(priority, days_remaining nulls-last)`.
pub fn sort_by_urgency(
    employees: &mut [Employee],
    field: DateField,
    today: NaiveDate,
    thresholds: &ThresholdSet,
) {
    employees.sort_by(|a, b| {
        let ca: Classification = classify(field.extract(a), today, thresholds);
        let cb: Classification = classify(field.extract(b), today, thresholds);
        urgency_cmp(&ca, &cb)
    });
}
