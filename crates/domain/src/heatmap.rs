// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-day heatmap aggregation for coarse calendar views.
//!
//! Events are bucketed by the calendar day of their start instant in an
//! explicit, caller-supplied time zone. "Day" is meaningless without a
//! zone, so there is no default: server-side aggregation and client-side
//! display must agree on the zone or they will disagree near midnight.
//!
//! ## Invariants
//!
//! - Aggregation never mutates its input; rebuilding from the same input
//!   yields identical output.
//! - Merged busy intervals are disjoint, ordered by start, and treat
//!   touching intervals the same as overlapping ones.
//! - Overlapping events on one resource are a legal state; merging is how
//!   overlap is surfaced, not an error path.

use crate::timeparse::duration_minutes;
use crate::types::{Event, TimeRange};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::BTreeMap;

/// The fixed severity palette, coolest to hottest.
pub const HEAT_PALETTE: [&str; 5] = ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"];

/// A per-calendar-day aggregate of event load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapBucket {
    /// The calendar day, in the zone the heatmap was built with.
    pub day: NaiveDate,
    /// Number of events starting on this day.
    pub event_count: usize,
    /// Sum of event durations in whole minutes.
    pub total_minutes: i64,
    /// The earliest event start on this day.
    pub earliest_start: DateTime<Utc>,
    /// The latest event end on this day.
    pub latest_end: DateTime<Utc>,
    /// The merged disjoint busy intervals, capped for display.
    pub busy_intervals: Vec<TimeRange>,
    /// How many merged intervals were dropped by the display cap.
    pub hidden_interval_count: usize,
    /// Index into [`HEAT_PALETTE`], relative to the busiest day in range.
    pub heat_level: usize,
}

/// Merges a set of intervals into the minimal disjoint busy set.
///
/// Intervals are sorted by start; an interval whose start is at or before
/// the running merge's end extends it (touching and overlapping intervals
/// are treated identically).
///
/// # Arguments
///
/// * `intervals` - The intervals to merge, in any order
#[must_use]
pub fn merge_intervals(intervals: &[TimeRange]) -> Vec<TimeRange> {
    let mut sorted: Vec<TimeRange> = intervals.to_vec();
    sorted.sort_by_key(TimeRange::start);

    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(current) if interval.start() <= current.end() => {
                *current = current.extended_to(interval.end());
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Maps a bucket's minutes onto the fixed palette.
///
/// `ratio = minutes / max(1, max_minutes)`, clamped to `[0, 1]`, then
/// `floor(ratio * steps)` clamped to the last palette index.
///
/// # Arguments
///
/// * `minutes` - The bucket's total minutes
/// * `max_minutes` - The maximum total minutes across all buckets in range
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn heat_level(minutes: i64, max_minutes: i64) -> usize {
    let ratio: f64 = (minutes.max(0) as f64 / max_minutes.max(1) as f64).clamp(0.0, 1.0);
    let step: usize = (ratio * HEAT_PALETTE.len() as f64).floor() as usize;
    step.min(HEAT_PALETTE.len() - 1)
}

/// Builds per-day heatmap buckets from an event collection.
///
/// Buckets are keyed by the calendar day of each event's start in `zone`
/// and returned in ascending day order. At most `interval_cap` merged busy
/// intervals are kept per bucket; the remainder is reported as
/// `hidden_interval_count` for a "+N" display label.
///
/// # Arguments
///
/// * `events` - The event collection to bucket
/// * `zone` - The zone "calendar day" is computed in
/// * `interval_cap` - Maximum merged intervals to keep per bucket
#[must_use]
pub fn build_heatmap(events: &[Event], zone: Tz, interval_cap: usize) -> Vec<HeatmapBucket> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&Event>> = BTreeMap::new();
    for event in events {
        let day: NaiveDate = event.window.start().with_timezone(&zone).date_naive();
        by_day.entry(day).or_default().push(event);
    }

    let mut buckets: Vec<HeatmapBucket> = by_day
        .into_iter()
        .filter_map(|(day, day_events)| {
            let earliest_start = day_events.iter().map(|e| e.window.start()).min()?;
            let latest_end = day_events.iter().map(|e| e.window.end()).max()?;
            let total_minutes: i64 = day_events
                .iter()
                .map(|e| duration_minutes(e.window.start(), e.window.end()))
                .sum();

            let intervals: Vec<TimeRange> = day_events.iter().map(|e| e.window).collect();
            let mut merged: Vec<TimeRange> = merge_intervals(&intervals);
            let hidden_interval_count: usize = merged.len().saturating_sub(interval_cap);
            merged.truncate(interval_cap);

            Some(HeatmapBucket {
                day,
                event_count: day_events.len(),
                total_minutes,
                earliest_start,
                latest_end,
                busy_intervals: merged,
                hidden_interval_count,
                heat_level: 0,
            })
        })
        .collect();

    let max_minutes: i64 = buckets.iter().map(|b| b.total_minutes).max().unwrap_or(0);
    for bucket in &mut buckets {
        bucket.heat_level = heat_level(bucket.total_minutes, max_minutes);
    }

    buckets
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn range(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> TimeRange {
        TimeRange::new(
            Utc.with_ymd_and_hms(2024, 1, 1, start_h, start_m, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, end_h, end_m, 0).unwrap(),
        )
        .unwrap()
    }

    fn event_at(resource_id: i64, window: TimeRange) -> Event {
        Event::with_id(1, String::from("Shift"), None, window, resource_id, None)
    }

    #[test]
    fn test_merge_intervals_canonical_case() {
        let intervals = vec![range(9, 0, 9, 30), range(9, 15, 10, 0), range(11, 0, 11, 30)];
        let merged = merge_intervals(&intervals);

        assert_eq!(merged, vec![range(9, 0, 10, 0), range(11, 0, 11, 30)]);
    }

    #[test]
    fn test_merge_intervals_touching_counts_as_connected() {
        let intervals = vec![range(9, 0, 9, 30), range(9, 30, 10, 0)];
        let merged = merge_intervals(&intervals);

        assert_eq!(merged, vec![range(9, 0, 10, 0)]);
    }

    #[test]
    fn test_merge_intervals_contained_interval_is_absorbed() {
        let intervals = vec![range(9, 0, 12, 0), range(10, 0, 10, 30)];
        let merged = merge_intervals(&intervals);

        assert_eq!(merged, vec![range(9, 0, 12, 0)]);
    }

    #[test]
    fn test_merge_intervals_unsorted_input() {
        let intervals = vec![range(11, 0, 11, 30), range(9, 15, 10, 0), range(9, 0, 9, 30)];
        let merged = merge_intervals(&intervals);

        assert_eq!(merged, vec![range(9, 0, 10, 0), range(11, 0, 11, 30)]);
    }

    #[test]
    fn test_heat_level_scales_and_clamps() {
        assert_eq!(heat_level(0, 480), 0);
        assert_eq!(heat_level(120, 480), 1);
        assert_eq!(heat_level(240, 480), 2);
        assert_eq!(heat_level(480, 480), 4);
        // Above-max input clamps to the hottest step.
        assert_eq!(heat_level(960, 480), 4);
        // An empty range never divides by zero.
        assert_eq!(heat_level(0, 0), 0);
    }

    #[test]
    fn test_build_heatmap_buckets_by_zone_day() {
        // 23:30 UTC on Jan 1 is still Jan 1 in UTC but Jan 2 in Auckland.
        let late = TimeRange::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 30, 0).unwrap(),
        )
        .unwrap();
        let events = vec![event_at(1, late)];

        let utc_buckets = build_heatmap(&events, chrono_tz::UTC, 3);
        assert_eq!(utc_buckets[0].day, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let auckland_buckets = build_heatmap(&events, chrono_tz::Pacific::Auckland, 3);
        assert_eq!(
            auckland_buckets[0].day,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_build_heatmap_caps_intervals_and_reports_overflow() {
        let events = vec![
            event_at(1, range(8, 0, 8, 30)),
            event_at(1, range(10, 0, 10, 30)),
            event_at(1, range(12, 0, 12, 30)),
            event_at(1, range(14, 0, 14, 30)),
            event_at(1, range(16, 0, 16, 30)),
        ];

        let buckets = build_heatmap(&events, chrono_tz::UTC, 3);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].busy_intervals.len(), 3);
        assert_eq!(buckets[0].hidden_interval_count, 2);
        assert_eq!(buckets[0].event_count, 5);
    }

    #[test]
    fn test_build_heatmap_double_booked_resource_is_legal() {
        // Two overlapping events on the same resource merge into one busy
        // interval instead of being rejected.
        let events = vec![
            event_at(1, range(9, 0, 11, 0)),
            event_at(1, range(10, 0, 12, 0)),
        ];

        let buckets = build_heatmap(&events, chrono_tz::UTC, 3);
        assert_eq!(buckets[0].event_count, 2);
        assert_eq!(buckets[0].total_minutes, 240);
        assert_eq!(buckets[0].busy_intervals, vec![range(9, 0, 12, 0)]);
    }

    #[test]
    fn test_build_heatmap_is_idempotent() {
        let events = vec![
            event_at(1, range(9, 0, 11, 0)),
            event_at(2, range(10, 0, 12, 0)),
        ];
        assert_eq!(
            build_heatmap(&events, chrono_tz::UTC, 3),
            build_heatmap(&events, chrono_tz::UTC, 3)
        );
    }

    #[test]
    fn test_build_heatmap_tracks_earliest_and_latest() {
        let events = vec![
            event_at(1, range(9, 0, 10, 0)),
            event_at(2, range(7, 30, 8, 0)),
            event_at(3, range(15, 0, 17, 45)),
        ];

        let buckets = build_heatmap(&events, chrono_tz::UTC, 3);
        assert_eq!(
            buckets[0].earliest_start,
            Utc.with_ymd_and_hms(2024, 1, 1, 7, 30, 0).unwrap()
        );
        assert_eq!(
            buckets[0].latest_end,
            Utc.with_ymd_and_hms(2024, 1, 1, 17, 45, 0).unwrap()
        );
    }
}
