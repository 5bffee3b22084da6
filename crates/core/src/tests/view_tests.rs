// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{day_range, event};
use crate::{CoreError, ScheduleView};

#[test]
fn test_commit_fetch_replaces_view_contents() {
    let mut view = ScheduleView::new(day_range(1));
    let ticket = view.begin_fetch(day_range(1));

    view.commit_fetch(&ticket, vec![event(2, 1, 1, 11, 12), event(1, 1, 1, 9, 10)])
        .unwrap();

    // Events come back ordered by start regardless of payload order.
    let ids: Vec<Option<i64>> = view.events().iter().map(|e| e.event_id).collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);
}

#[test]
fn test_superseded_fetch_is_rejected_as_stale() {
    let mut view = ScheduleView::new(day_range(1));

    let first = view.begin_fetch(day_range(1));
    let second = view.begin_fetch(day_range(2));

    // The late response for the first fetch must not clobber the view.
    let result = view.commit_fetch(&first, vec![event(1, 1, 1, 9, 10)]);
    assert_eq!(
        result,
        Err(CoreError::StaleResponse {
            current: 2,
            received: 1
        })
    );
    assert!(view.events().is_empty());

    view.commit_fetch(&second, vec![event(2, 1, 2, 9, 10)])
        .unwrap();
    assert_eq!(view.range(), day_range(2));
    assert_eq!(view.events().len(), 1);
}

#[test]
fn test_stale_rejection_leaves_newer_contents_intact() {
    let mut view = ScheduleView::new(day_range(1));

    let first = view.begin_fetch(day_range(1));
    let second = view.begin_fetch(day_range(2));
    view.commit_fetch(&second, vec![event(2, 1, 2, 9, 10)])
        .unwrap();

    let result = view.commit_fetch(&first, vec![event(1, 1, 1, 9, 10)]);
    assert!(matches!(result, Err(CoreError::StaleResponse { .. })));
    assert_eq!(view.events()[0].event_id, Some(2));
}

#[test]
fn test_upsert_replaces_matching_event() {
    let mut view = ScheduleView::new(day_range(1));
    let ticket = view.begin_fetch(day_range(1));
    view.commit_fetch(&ticket, vec![event(1, 1, 1, 9, 10)])
        .unwrap();

    let mut updated = event(1, 1, 1, 14, 15);
    updated.title = String::from("Renamed");
    view.upsert(updated).unwrap();

    assert_eq!(view.events().len(), 1);
    assert_eq!(view.events()[0].title, "Renamed");
}

#[test]
fn test_upsert_inserts_new_event_in_order() {
    let mut view = ScheduleView::new(day_range(1));
    let ticket = view.begin_fetch(day_range(1));
    view.commit_fetch(&ticket, vec![event(2, 1, 1, 11, 12)])
        .unwrap();

    view.upsert(event(1, 1, 1, 9, 10)).unwrap();

    let ids: Vec<Option<i64>> = view.events().iter().map(|e| e.event_id).collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);
}

#[test]
fn test_upsert_rejects_unsaved_event() {
    let mut view = ScheduleView::new(day_range(1));
    let mut unsaved = event(1, 1, 1, 9, 10);
    unsaved.event_id = None;

    assert_eq!(view.upsert(unsaved), Err(CoreError::UnidentifiedEvent));
}

#[test]
fn test_remove_returns_the_removed_event() {
    let mut view = ScheduleView::new(day_range(1));
    let ticket = view.begin_fetch(day_range(1));
    view.commit_fetch(&ticket, vec![event(1, 1, 1, 9, 10)])
        .unwrap();

    let removed = view.remove(1);
    assert_eq!(removed.map(|e| e.event_id), Some(Some(1)));
    assert!(view.events().is_empty());
    assert_eq!(view.remove(1), None);
}

#[test]
fn test_find_by_id() {
    let mut view = ScheduleView::new(day_range(1));
    let ticket = view.begin_fetch(day_range(1));
    view.commit_fetch(&ticket, vec![event(1, 1, 1, 9, 10), event(2, 2, 1, 11, 12)])
        .unwrap();

    assert_eq!(view.find(2).map(|e| e.resource_id), Some(2));
    assert!(view.find(99).is_none());
}
