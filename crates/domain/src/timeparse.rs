// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time-representation arithmetic.
//!
//! The UI-facing surfaces alternate between two serializations of the same
//! concept: a short wall-clock label ("09:30") while everything stays on
//! one displayed day, and an absolute RFC 3339 timestamp once a date
//! boundary or persistence is involved. This module accepts either form so
//! callers never need to know which one they are holding.
//!
//! ## Invariants
//!
//! - Wall-clock labels are resolved against an explicit reference day in an
//!   explicit time zone; there is no ambient "today" or default zone.
//! - Resolved instants are always UTC.
//! - Durations are clamped at zero; an inverted pair yields zero minutes
//!   rather than a negative value.

use crate::error::DomainError;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parses a time value in either of its two accepted forms.
///
/// An RFC 3339 timestamp is taken as-is (converted to UTC). A bare
/// wall-clock label (`HH:MM`) is combined with `reference_day` and
/// resolved in `zone`.
///
/// # Arguments
///
/// * `value` - The time value in either form
/// * `reference_day` - The calendar day wall-clock labels resolve against
/// * `zone` - The zone wall-clock labels are interpreted in
///
/// # Errors
///
/// Returns an error if the value matches neither form, or if the
/// wall-clock time is ambiguous or nonexistent in `zone` on that day
/// (DST transitions).
pub fn parse_instant(
    value: &str,
    reference_day: NaiveDate,
    zone: Tz,
) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(absolute) = DateTime::parse_from_rfc3339(value) {
        return Ok(absolute.with_timezone(&Utc));
    }

    let wall_clock: NaiveTime = NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        DomainError::UnparsableInstant {
            value: value.to_string(),
        }
    })?;

    zone.from_local_datetime(&reference_day.and_time(wall_clock))
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| DomainError::UnresolvableLocalTime {
            value: value.to_string(),
            day: reference_day,
            zone: zone.name().to_string(),
        })
}

/// Returns the whole minutes between two instants, clamped at zero.
///
/// A corrupted end-before-start pair yields zero rather than a negative
/// duration. The clamp does not validate anything; inverted ranges are
/// rejected elsewhere before they are stored.
#[must_use]
pub fn duration_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_minutes().max(0)
}
