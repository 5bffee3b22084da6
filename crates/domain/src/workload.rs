// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-resource workload aggregation.
//!
//! This module provides read-only aggregation over an event collection
//! already resident in memory (the result of a range query). It is pure
//! and deterministic: the same input always produces the same output, and
//! the input is never mutated.

use crate::types::Event;
use serde::Serialize;
use std::collections::BTreeMap;

/// A per-resource workload summary for a queried range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadSummary {
    /// The resource the row describes.
    pub resource_id: i64,
    /// Number of events assigned to the resource in the range.
    pub event_count: usize,
    /// Sum of event durations in whole minutes.
    pub total_minutes: i64,
    /// `total_minutes` expressed in hours.
    pub total_hours: f64,
    /// Average event length in hours; zero when there are no events.
    pub avg_hours_per_event: f64,
}

/// Summarizes workload per resource over an event collection.
///
/// Rows are ordered busiest-first (descending `total_minutes`), with equal
/// totals broken by ascending resource id so the output is deterministic.
///
/// # Arguments
///
/// * `events` - The event collection to summarize
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize_workload(events: &[Event]) -> Vec<WorkloadSummary> {
    // BTreeMap keeps the accumulation order deterministic before sorting.
    let mut per_resource: BTreeMap<i64, (usize, i64)> = BTreeMap::new();

    for event in events {
        let entry = per_resource.entry(event.resource_id).or_insert((0, 0));
        entry.0 += 1;
        entry.1 = entry.1.saturating_add(event.duration_minutes());
    }

    let mut rows: Vec<WorkloadSummary> = per_resource
        .into_iter()
        .map(|(resource_id, (event_count, total_minutes))| {
            let total_hours: f64 = total_minutes as f64 / 60.0;
            let avg_hours_per_event: f64 = if event_count == 0 {
                0.0
            } else {
                total_hours / event_count as f64
            };
            WorkloadSummary {
                resource_id,
                event_count,
                total_minutes,
                total_hours,
                avg_hours_per_event,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_minutes
            .cmp(&a.total_minutes)
            .then(a.resource_id.cmp(&b.resource_id))
    });

    rows
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::TimeRange;
    use chrono::{TimeZone, Utc};

    fn event(resource_id: i64, start_hour: u32, minutes: i64) -> Event {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, start_hour, 0, 0).unwrap();
        let window = TimeRange::new(start, start + chrono::Duration::minutes(minutes)).unwrap();
        Event::with_id(1, String::from("Shift"), None, window, resource_id, None)
    }

    #[test]
    fn test_summarize_workload_empty_input() {
        assert!(summarize_workload(&[]).is_empty());
    }

    #[test]
    fn test_summarize_workload_sums_per_resource() {
        let events = vec![event(1, 9, 30), event(1, 11, 60), event(2, 9, 45)];
        let rows = summarize_workload(&events);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].resource_id, 1);
        assert_eq!(rows[0].event_count, 2);
        assert_eq!(rows[0].total_minutes, 90);
        assert!((rows[0].total_hours - 1.5).abs() < f64::EPSILON);
        assert!((rows[0].avg_hours_per_event - 0.75).abs() < f64::EPSILON);
        assert_eq!(rows[1].resource_id, 2);
        assert_eq!(rows[1].total_minutes, 45);
    }

    #[test]
    fn test_summarize_workload_orders_busiest_first() {
        let events = vec![event(1, 9, 30), event(2, 9, 120)];
        let rows = summarize_workload(&events);

        assert_eq!(rows[0].resource_id, 2);
        assert_eq!(rows[1].resource_id, 1);
    }

    #[test]
    fn test_summarize_workload_ties_break_on_resource_id() {
        let events = vec![event(7, 9, 60), event(3, 14, 60)];
        let rows = summarize_workload(&events);

        assert_eq!(rows[0].resource_id, 3);
        assert_eq!(rows[1].resource_id, 7);
    }

    #[test]
    fn test_summarize_workload_is_idempotent() {
        let events = vec![event(1, 9, 30), event(2, 10, 60), event(1, 13, 15)];
        assert_eq!(summarize_workload(&events), summarize_workload(&events));
    }

    #[test]
    fn test_summarize_workload_conserves_total_minutes() {
        let events = vec![event(1, 9, 30), event(2, 10, 60), event(3, 13, 15)];
        let rows = summarize_workload(&events);

        let summarized: i64 = rows.iter().map(|r| r.total_minutes).sum();
        let raw: i64 = events.iter().map(Event::duration_minutes).sum();
        assert_eq!(summarized, raw);
    }
}
