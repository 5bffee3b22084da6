// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{caller, create_event_request, create_resource_request, persistence, seed_event};
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    ListEventsRequest, MoveEventRequest, UpdateEventRequest,
};

#[test]
fn test_create_event_returns_rendered_event() {
    let mut p = persistence();
    let me = caller();

    let (resource_id, event) = seed_event(
        &mut p,
        &me,
        "Standup",
        "2024-01-01T09:00:00Z",
        "2024-01-01T09:30:00Z",
    );

    assert_eq!(event.title, "Standup");
    assert_eq!(event.start, "2024-01-01T09:00:00Z");
    assert_eq!(event.end, "2024-01-01T09:30:00Z");
    assert_eq!(event.duration_minutes, 30);
    assert_eq!(event.resource_id, resource_id);
}

#[test]
fn test_create_event_rejects_inverted_range_before_any_write() {
    let mut p = persistence();
    let me = caller();
    let resource = handlers::create_resource(&mut p, &me, create_resource_request("Ada")).unwrap();

    let result = handlers::create_event(
        &mut p,
        &me,
        create_event_request(
            resource.resource_id,
            "X",
            "2024-01-01T10:00:00Z",
            "2024-01-01T09:00:00Z",
        ),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "end"));

    // No event was produced.
    let listed = handlers::list_events(
        &mut p,
        &me,
        &ListEventsRequest {
            start: String::from("2024-01-01T00:00:00Z"),
            end: String::from("2024-01-01T23:59:00Z"),
            resource_id: None,
            reference_day: None,
            zone: None,
        },
    )
    .unwrap();
    assert!(listed.events.is_empty());
}

#[test]
fn test_create_event_lists_every_invalid_field() {
    let mut p = persistence();
    let me = caller();
    let resource = handlers::create_resource(&mut p, &me, create_resource_request("Ada")).unwrap();

    let result = handlers::create_event(
        &mut p,
        &me,
        create_event_request(
            resource.resource_id,
            "",
            "2024-01-01T10:00:00Z",
            "2024-01-01T09:00:00Z",
        ),
    );

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "title, end"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_create_event_requires_resource_id() {
    let mut p = persistence();
    let me = caller();

    let mut request = create_event_request(1, "X", "2024-01-01T09:00:00Z", "2024-01-01T10:00:00Z");
    request.resource_id = None;

    let result = handlers::create_event(&mut p, &me, request);
    assert!(
        matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "resource_id")
    );
}

#[test]
fn test_create_event_rejects_unknown_resource() {
    let mut p = persistence();
    let me = caller();

    let result = handlers::create_event(
        &mut p,
        &me,
        create_event_request(999, "X", "2024-01-01T09:00:00Z", "2024-01-01T10:00:00Z"),
    );
    assert!(
        matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "resource_id")
    );
}

#[test]
fn test_create_event_accepts_wall_clock_times_with_reference_day() {
    let mut p = persistence();
    let me = caller();
    let resource = handlers::create_resource(&mut p, &me, create_resource_request("Ada")).unwrap();

    let mut request = create_event_request(resource.resource_id, "Standup", "09:00", "09:30");
    request.reference_day = Some(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

    let event = handlers::create_event(&mut p, &me, request).unwrap();
    assert_eq!(event.start, "2024-01-01T09:00:00Z");
    assert_eq!(event.duration_minutes, 30);
}

#[test]
fn test_create_event_wall_clock_without_reference_day_fails() {
    let mut p = persistence();
    let me = caller();
    let resource = handlers::create_resource(&mut p, &me, create_resource_request("Ada")).unwrap();

    let result = handlers::create_event(
        &mut p,
        &me,
        create_event_request(resource.resource_id, "Standup", "09:00", "09:30"),
    );
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_list_events_returns_range_ordered() {
    let mut p = persistence();
    let me = caller();
    let resource = handlers::create_resource(&mut p, &me, create_resource_request("Ada")).unwrap();
    for (title, start, end) in [
        ("Late", "2024-01-01T14:00:00Z", "2024-01-01T15:00:00Z"),
        ("Early", "2024-01-01T08:00:00Z", "2024-01-01T09:00:00Z"),
        ("Other day", "2024-01-05T08:00:00Z", "2024-01-05T09:00:00Z"),
    ] {
        handlers::create_event(
            &mut p,
            &me,
            create_event_request(resource.resource_id, title, start, end),
        )
        .unwrap();
    }

    let listed = handlers::list_events(
        &mut p,
        &me,
        &ListEventsRequest {
            start: String::from("2024-01-01T00:00:00Z"),
            end: String::from("2024-01-01T23:59:00Z"),
            resource_id: None,
            reference_day: None,
            zone: None,
        },
    )
    .unwrap();

    let titles: Vec<&str> = listed.events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Early", "Late"]);
}

#[test]
fn test_update_event_sparse_patch_semantics() {
    let mut p = persistence();
    let me = caller();
    let (_, event) = seed_event(
        &mut p,
        &me,
        "Standup",
        "2024-01-01T09:00:00Z",
        "2024-01-01T09:30:00Z",
    );

    // Set a description, then patch only the title.
    handlers::update_event(
        &mut p,
        &me,
        event.event_id,
        UpdateEventRequest {
            description: Some(String::from("Daily sync")),
            ..UpdateEventRequest::default()
        },
    )
    .unwrap();

    let updated = handlers::update_event(
        &mut p,
        &me,
        event.event_id,
        UpdateEventRequest {
            title: Some(String::from("Retro")),
            ..UpdateEventRequest::default()
        },
    )
    .unwrap();

    assert_eq!(updated.title, "Retro");
    assert_eq!(updated.description.as_deref(), Some("Daily sync"));
    assert_eq!(updated.start, event.start);
}

#[test]
fn test_update_event_rejects_empty_patch() {
    let mut p = persistence();
    let me = caller();
    let (_, event) = seed_event(
        &mut p,
        &me,
        "Standup",
        "2024-01-01T09:00:00Z",
        "2024-01-01T09:30:00Z",
    );

    let result = handlers::update_event(
        &mut p,
        &me,
        event.event_id,
        UpdateEventRequest::default(),
    );
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "patch"));
}

#[test]
fn test_update_event_rejects_merged_inversion() {
    let mut p = persistence();
    let me = caller();
    let (_, event) = seed_event(
        &mut p,
        &me,
        "Standup",
        "2024-01-01T09:00:00Z",
        "2024-01-01T09:30:00Z",
    );

    // Moving only the start past the stored end inverts the merged range.
    let result = handlers::update_event(
        &mut p,
        &me,
        event.event_id,
        UpdateEventRequest {
            start: Some(String::from("2024-01-01T12:00:00Z")),
            ..UpdateEventRequest::default()
        },
    );
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_update_missing_event_is_not_found() {
    let mut p = persistence();
    let me = caller();

    let result = handlers::update_event(
        &mut p,
        &me,
        42,
        UpdateEventRequest {
            title: Some(String::from("Ghost")),
            ..UpdateEventRequest::default()
        },
    );
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_update_event_accepts_camel_case_aliases() {
    let mut p = persistence();
    let me = caller();
    let (_, event) = seed_event(
        &mut p,
        &me,
        "Standup",
        "2024-01-01T09:00:00Z",
        "2024-01-01T09:30:00Z",
    );

    // Both spellings land on the canonical field.
    let request: UpdateEventRequest =
        serde_json::from_str(r#"{"startAt": "2024-01-01T11:00:00Z", "endAt": "2024-01-01T11:30:00Z"}"#)
            .unwrap();
    let updated = handlers::update_event(&mut p, &me, event.event_id, request).unwrap();
    assert_eq!(updated.start, "2024-01-01T11:00:00Z");

    let request: UpdateEventRequest =
        serde_json::from_str(r#"{"start_at": "2024-01-01T12:00:00Z", "end_at": "2024-01-01T12:30:00Z"}"#)
            .unwrap();
    let updated = handlers::update_event(&mut p, &me, event.event_id, request).unwrap();
    assert_eq!(updated.start, "2024-01-01T12:00:00Z");
}

#[test]
fn test_delete_event_returns_snapshot_then_not_found() {
    let mut p = persistence();
    let me = caller();
    let (_, event) = seed_event(
        &mut p,
        &me,
        "Standup",
        "2024-01-01T09:00:00Z",
        "2024-01-01T09:30:00Z",
    );

    let snapshot = handlers::delete_event(&mut p, &me, event.event_id).unwrap();
    assert_eq!(snapshot.title, "Standup");

    let again = handlers::delete_event(&mut p, &me, event.event_id);
    assert!(matches!(again, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_move_event_preserves_duration() {
    let mut p = persistence();
    let me = caller();
    let (_, event) = seed_event(
        &mut p,
        &me,
        "Standup",
        "2024-01-01T09:00:00Z",
        "2024-01-01T09:45:00Z",
    );

    let moved = handlers::move_event(
        &mut p,
        &me,
        event.event_id,
        MoveEventRequest {
            start: String::from("2024-01-03T14:00:00Z"),
            resource_id: None,
            reference_day: None,
            zone: None,
        },
    )
    .unwrap();

    assert_eq!(moved.start, "2024-01-03T14:00:00Z");
    assert_eq!(moved.end, "2024-01-03T14:45:00Z");
    assert_eq!(moved.duration_minutes, event.duration_minutes);
}

#[test]
fn test_move_event_can_reassign_resource() {
    let mut p = persistence();
    let me = caller();
    let (_, event) = seed_event(
        &mut p,
        &me,
        "Standup",
        "2024-01-01T09:00:00Z",
        "2024-01-01T09:30:00Z",
    );
    let noor = handlers::create_resource(&mut p, &me, create_resource_request("Noor")).unwrap();

    let moved = handlers::move_event(
        &mut p,
        &me,
        event.event_id,
        MoveEventRequest {
            start: String::from("2024-01-01T10:00:00Z"),
            resource_id: Some(noor.resource_id),
            reference_day: None,
            zone: None,
        },
    )
    .unwrap();

    assert_eq!(moved.resource_id, noor.resource_id);
}

#[test]
fn test_move_event_to_unknown_resource_fails() {
    let mut p = persistence();
    let me = caller();
    let (_, event) = seed_event(
        &mut p,
        &me,
        "Standup",
        "2024-01-01T09:00:00Z",
        "2024-01-01T09:30:00Z",
    );

    let result = handlers::move_event(
        &mut p,
        &me,
        event.event_id,
        MoveEventRequest {
            start: String::from("2024-01-01T10:00:00Z"),
            resource_id: Some(999),
            reference_day: None,
            zone: None,
        },
    );
    assert!(
        matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "resource_id")
    );
}

#[test]
fn test_event_with_color_gets_readable_text_color() {
    let mut p = persistence();
    let me = caller();
    let resource = handlers::create_resource(&mut p, &me, create_resource_request("Ada")).unwrap();

    let mut request = create_event_request(
        resource.resource_id,
        "Standup",
        "2024-01-01T09:00:00Z",
        "2024-01-01T09:30:00Z",
    );
    request.color = Some(String::from("#ffff00"));

    let event = handlers::create_event(&mut p, &me, request).unwrap();
    assert_eq!(event.color.as_deref(), Some("#ffff00"));
    assert_eq!(event.text_color.as_deref(), Some("#1f2328"));
}
