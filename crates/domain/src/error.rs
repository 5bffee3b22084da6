// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, NaiveDate, Utc};

/// A single rejected field within an event draft.
///
/// Validation collects every violated rule so callers can report all
/// offending fields in one pass instead of failing one field at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// The field that failed validation.
    pub field: &'static str,
    /// Why the field was rejected.
    pub reason: String,
}

impl FieldViolation {
    /// Creates a new `FieldViolation`.
    #[must_use]
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Event title is empty or invalid.
    InvalidTitle(String),
    /// Resource name is empty or invalid.
    InvalidName(String),
    /// A time range's end does not come strictly after its start.
    InvalidTimeRange {
        /// The range start.
        start: DateTime<Utc>,
        /// The range end.
        end: DateTime<Utc>,
    },
    /// A color value is not a `#rrggbb` hex string.
    InvalidColor(String),
    /// A time value matched neither the RFC 3339 nor the wall-clock form.
    UnparsableInstant {
        /// The value that could not be parsed.
        value: String,
    },
    /// A wall-clock label could not be resolved to a single instant in the
    /// requested zone (ambiguous or nonexistent due to a DST transition).
    UnresolvableLocalTime {
        /// The wall-clock value.
        value: String,
        /// The reference calendar day.
        day: NaiveDate,
        /// The zone the resolution was attempted in.
        zone: String,
    },
    /// An event draft violated one or more field rules.
    EventRejected {
        /// Every violated rule, in field order.
        violations: Vec<FieldViolation>,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidTimeRange { start, end } => {
                write!(
                    f,
                    "Invalid time range: end {end} must be strictly after start {start}"
                )
            }
            Self::InvalidColor(msg) => write!(f, "Invalid color: {msg}"),
            Self::UnparsableInstant { value } => {
                write!(f, "Could not parse '{value}' as a timestamp or wall-clock time")
            }
            Self::UnresolvableLocalTime { value, day, zone } => {
                write!(
                    f,
                    "Wall-clock time '{value}' on {day} does not resolve to a single instant in {zone}"
                )
            }
            Self::EventRejected { violations } => {
                let listed: Vec<String> = violations.iter().map(ToString::to_string).collect();
                write!(f, "Event rejected: {}", listed.join("; "))
            }
        }
    }
}

impl std::error::Error for DomainError {}
