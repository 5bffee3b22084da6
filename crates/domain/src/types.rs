// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::timeparse::duration_minutes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated `#rrggbb` hex color.
///
/// Colors are normalized to lowercase so equal colors compare equal
/// regardless of the casing the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexColor {
    /// The normalized color value, including the leading `#`.
    value: String,
}

impl HexColor {
    /// Parses a `#rrggbb` hex color.
    ///
    /// # Arguments
    ///
    /// * `value` - The candidate color string
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidColor` if the value is not a `#`
    /// followed by exactly six hex digits.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let rest = value.strip_prefix('#').ok_or_else(|| {
            DomainError::InvalidColor(format!("'{value}' must start with '#'"))
        })?;
        if rest.len() != 6 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DomainError::InvalidColor(format!(
                "'{value}' must be '#' followed by exactly 6 hex digits"
            )));
        }
        Ok(Self {
            value: format!("#{}", rest.to_lowercase()),
        })
    }

    /// Returns the normalized color value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the red, green, and blue channels.
    #[must_use]
    pub fn channels(&self) -> (u8, u8, u8) {
        // The value is validated at construction; a parse failure here is
        // unreachable, so fall back to zero rather than panic.
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&self.value[range], 16).unwrap_or_default()
        };
        (channel(1..3), channel(3..5), channel(5..7))
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A half-open-free, strictly ordered time window.
///
/// The constructor is the only way to obtain a `TimeRange`, so every value
/// in circulation satisfies `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// The inclusive start instant.
    start: DateTime<Utc>,
    /// The exclusive end instant.
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a new `TimeRange`.
    ///
    /// # Arguments
    ///
    /// * `start` - The start instant
    /// * `end` - The end instant
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeRange` unless `end > start`
    /// strictly. Zero-duration ranges are rejected.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if end <= start {
            return Err(DomainError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the start instant.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the end instant.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the duration of this range in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        duration_minutes(self.start, self.end)
    }

    /// Moves this range to a new anchor, preserving its duration exactly.
    ///
    /// # Arguments
    ///
    /// * `new_start` - The new start instant
    #[must_use]
    pub fn shift(&self, new_start: DateTime<Utc>) -> Self {
        Self {
            start: new_start,
            end: new_start + (self.end - self.start),
        }
    }

    /// Extends the range's end, keeping the later of the two ends.
    #[must_use]
    pub(crate) fn extended_to(&self, end: DateTime<Utc>) -> Self {
        Self {
            start: self.start,
            end: self.end.max(end),
        }
    }

    /// Checks whether this range overlaps or touches another.
    ///
    /// Touching ranges (one's end equal to the other's start) count as
    /// connected, which is the contract interval merging relies on.
    #[must_use]
    pub fn touches(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks whether this range strictly overlaps another.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A schedulable resource (an employee).
///
/// `resource_id` is the canonical identifier assigned by the store;
/// `None` means the resource has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// The canonical identifier assigned by the store.
    pub resource_id: Option<i64>,
    /// The resource's display name.
    pub name: String,
    /// An optional role label (e.g. "Nurse", "Dispatcher").
    pub role: Option<String>,
    /// An optional display color for the resource's events.
    pub color: Option<HexColor>,
}

impl Resource {
    /// Creates a new `Resource` without a persisted id.
    ///
    /// # Arguments
    ///
    /// * `name` - The display name
    /// * `role` - An optional role label
    /// * `color` - An optional display color
    #[must_use]
    pub const fn new(name: String, role: Option<String>, color: Option<HexColor>) -> Self {
        Self {
            resource_id: None,
            name,
            role,
            color,
        }
    }

    /// Creates a `Resource` with an existing persisted id.
    ///
    /// # Arguments
    ///
    /// * `resource_id` - The canonical identifier
    /// * `name` - The display name
    /// * `role` - An optional role label
    /// * `color` - An optional display color
    #[must_use]
    pub const fn with_id(
        resource_id: i64,
        name: String,
        role: Option<String>,
        color: Option<HexColor>,
    ) -> Self {
        Self {
            resource_id: Some(resource_id),
            name,
            role,
            color,
        }
    }
}

/// A titled time interval assigned to exactly one resource.
///
/// The authoritative copy of every event lives in the store; in-memory
/// copies are transient view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The canonical identifier assigned by the store.
    pub event_id: Option<i64>,
    /// The event title.
    pub title: String,
    /// An optional free-text description.
    pub description: Option<String>,
    /// The event's time window (`end > start` guaranteed).
    pub window: TimeRange,
    /// The resource this event is assigned to.
    pub resource_id: i64,
    /// An optional display color overriding the resource's color.
    pub color: Option<HexColor>,
}

impl Event {
    /// Creates a new `Event` without a persisted id.
    #[must_use]
    pub const fn new(
        title: String,
        description: Option<String>,
        window: TimeRange,
        resource_id: i64,
        color: Option<HexColor>,
    ) -> Self {
        Self {
            event_id: None,
            title,
            description,
            window,
            resource_id,
            color,
        }
    }

    /// Creates an `Event` with an existing persisted id.
    #[must_use]
    pub const fn with_id(
        event_id: i64,
        title: String,
        description: Option<String>,
        window: TimeRange,
        resource_id: i64,
        color: Option<HexColor>,
    ) -> Self {
        Self {
            event_id: Some(event_id),
            title,
            description,
            window,
            resource_id,
            color,
        }
    }

    /// Returns the event's duration in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        self.window.duration_minutes()
    }
}

/// The raw material for a new event, prior to validation.
///
/// Unlike `Event`, a draft carries unvalidated start/end instants; the
/// validation pass produces the `TimeRange` the event is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    /// The event title.
    pub title: String,
    /// An optional free-text description.
    pub description: Option<String>,
    /// The proposed start instant.
    pub start: DateTime<Utc>,
    /// The proposed end instant.
    pub end: DateTime<Utc>,
    /// The resource this event is assigned to.
    pub resource_id: i64,
    /// An optional display color.
    pub color: Option<HexColor>,
}

/// A sparse patch against an existing event.
///
/// Only fields that are `Some` are modified; absent fields are left
/// untouched, never nulled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    /// Replacement title, if present.
    pub title: Option<String>,
    /// Replacement description, if present.
    pub description: Option<String>,
    /// Replacement start instant, if present.
    pub start: Option<DateTime<Utc>>,
    /// Replacement end instant, if present.
    pub end: Option<DateTime<Utc>>,
    /// Replacement resource assignment, if present.
    pub resource_id: Option<i64>,
    /// Replacement color, if present.
    pub color: Option<HexColor>,
}

impl EventPatch {
    /// Checks whether the patch modifies nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.resource_id.is_none()
            && self.color.is_none()
    }

    /// Merges this patch over an existing event, producing the draft the
    /// updated event would be built from.
    ///
    /// The merged draft must be re-validated before it is written: a patch
    /// that changes only `start` can still invert the range against the
    /// event's existing `end`.
    #[must_use]
    pub fn apply_to(&self, event: &Event) -> EventDraft {
        EventDraft {
            title: self.title.clone().unwrap_or_else(|| event.title.clone()),
            description: self
                .description
                .clone()
                .or_else(|| event.description.clone()),
            start: self.start.unwrap_or_else(|| event.window.start()),
            end: self.end.unwrap_or_else(|| event.window.end()),
            resource_id: self.resource_id.unwrap_or(event.resource_id),
            color: self.color.clone().or_else(|| event.color.clone()),
        }
    }
}
