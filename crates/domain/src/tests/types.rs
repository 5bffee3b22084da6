// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Event, EventPatch, HexColor, Resource, TimeRange};
use chrono::{TimeZone, Utc};

fn window(start_hour: u32, end_hour: u32) -> TimeRange {
    TimeRange::new(
        Utc.with_ymd_and_hms(2024, 1, 1, start_hour, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 1, end_hour, 0, 0).unwrap(),
    )
    .unwrap()
}

#[test]
fn test_time_range_rejects_inverted_order() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

    let result = TimeRange::new(start, end);
    assert!(matches!(result, Err(DomainError::InvalidTimeRange { .. })));
}

#[test]
fn test_time_range_rejects_zero_duration() {
    let instant = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

    let result = TimeRange::new(instant, instant);
    assert!(matches!(result, Err(DomainError::InvalidTimeRange { .. })));
}

#[test]
fn test_time_range_shift_preserves_duration() {
    let range = window(9, 11);
    let new_start = Utc.with_ymd_and_hms(2024, 1, 3, 14, 30, 0).unwrap();

    let shifted = range.shift(new_start);
    assert_eq!(shifted.start(), new_start);
    assert_eq!(
        shifted.end() - shifted.start(),
        range.end() - range.start()
    );
    assert_eq!(shifted.duration_minutes(), range.duration_minutes());
}

#[test]
fn test_time_range_overlap_is_strict() {
    let morning = window(9, 10);
    let touching = window(10, 11);
    let overlapping = window(9, 11);

    assert!(!morning.overlaps(&touching));
    assert!(morning.touches(&touching));
    assert!(morning.overlaps(&overlapping));
}

#[test]
fn test_hex_color_normalizes_case() {
    let color = HexColor::parse("#A1B2C3").unwrap();
    assert_eq!(color.as_str(), "#a1b2c3");
    assert_eq!(color, HexColor::parse("#a1b2c3").unwrap());
}

#[test]
fn test_hex_color_rejects_malformed_values() {
    assert!(matches!(
        HexColor::parse("a1b2c3"),
        Err(DomainError::InvalidColor(_))
    ));
    assert!(matches!(
        HexColor::parse("#fff"),
        Err(DomainError::InvalidColor(_))
    ));
    assert!(matches!(
        HexColor::parse("#a1b2cg"),
        Err(DomainError::InvalidColor(_))
    ));
}

#[test]
fn test_hex_color_channels() {
    let color = HexColor::parse("#102030").unwrap();
    assert_eq!(color.channels(), (0x10, 0x20, 0x30));
}

#[test]
fn test_event_patch_empty_detection() {
    assert!(EventPatch::default().is_empty());

    let patch = EventPatch {
        title: Some(String::from("New")),
        ..EventPatch::default()
    };
    assert!(!patch.is_empty());
}

#[test]
fn test_event_patch_leaves_absent_fields_untouched() {
    let event = Event::with_id(
        7,
        String::from("Standup"),
        Some(String::from("Daily sync")),
        window(9, 10),
        1,
        Some(HexColor::parse("#336699").unwrap()),
    );

    let patch = EventPatch {
        title: Some(String::from("Retro")),
        ..EventPatch::default()
    };
    let draft = patch.apply_to(&event);

    assert_eq!(draft.title, "Retro");
    assert_eq!(draft.description.as_deref(), Some("Daily sync"));
    assert_eq!(draft.start, event.window.start());
    assert_eq!(draft.end, event.window.end());
    assert_eq!(draft.resource_id, 1);
    assert_eq!(draft.color, event.color);
}

#[test]
fn test_event_patch_reassigns_resource() {
    let event = Event::with_id(7, String::from("Standup"), None, window(9, 10), 1, None);

    let patch = EventPatch {
        resource_id: Some(2),
        ..EventPatch::default()
    };
    let draft = patch.apply_to(&event);

    assert_eq!(draft.resource_id, 2);
    assert_eq!(draft.title, "Standup");
}

#[test]
fn test_resource_constructors() {
    let unsaved = Resource::new(String::from("Ada"), Some(String::from("Nurse")), None);
    assert_eq!(unsaved.resource_id, None);

    let saved = Resource::with_id(3, String::from("Ada"), None, None);
    assert_eq!(saved.resource_id, Some(3));
}
