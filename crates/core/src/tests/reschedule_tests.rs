// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{day_range, event, instant};
use crate::{CoreError, ScheduleView, plan_move};
use shift_board_domain::Event;

fn view_with(events: Vec<Event>) -> ScheduleView {
    let mut view = ScheduleView::new(day_range(1));
    let ticket = view.begin_fetch(day_range(1));
    view.commit_fetch(&ticket, events).unwrap();
    view
}

#[test]
fn test_plan_move_preserves_duration() {
    let original = event(1, 1, 1, 9, 11);
    let new_start = instant(3, 14, 30);

    let plan = plan_move(1, &original, new_start, None);

    assert_eq!(plan.window.start(), new_start);
    assert_eq!(
        plan.window.duration_minutes(),
        original.window.duration_minutes()
    );
    assert_eq!(plan.resource_id, 1);
}

#[test]
fn test_plan_move_reassigns_resource() {
    let original = event(1, 1, 1, 9, 11);
    let plan = plan_move(1, &original, instant(1, 9, 0), Some(5));
    assert_eq!(plan.resource_id, 5);
}

#[test]
fn test_apply_optimistic_patches_view_immediately() {
    let mut view = view_with(vec![event(1, 1, 1, 9, 11)]);
    let plan = plan_move(1, &view.find(1).unwrap().clone(), instant(1, 14, 0), Some(2));

    let pending = view.apply_optimistic(&plan).unwrap();

    let moved = view.find(1).unwrap();
    assert_eq!(moved.window.start(), instant(1, 14, 0));
    assert_eq!(moved.resource_id, 2);
    assert!(view.has_pending_move());
    assert_eq!(pending.previous().window.start(), instant(1, 9, 0));
}

#[test]
fn test_apply_optimistic_rejects_unknown_event() {
    let mut view = view_with(vec![event(1, 1, 1, 9, 11)]);
    let plan = plan_move(99, &event(99, 1, 1, 9, 11), instant(1, 14, 0), None);

    assert_eq!(
        view.apply_optimistic(&plan),
        Err(CoreError::EventNotFound(99))
    );
    assert!(!view.has_pending_move());
}

#[test]
fn test_same_entity_moves_are_not_pipelined() {
    let mut view = view_with(vec![event(1, 1, 1, 9, 11), event(2, 1, 1, 12, 13)]);

    let first = plan_move(1, &view.find(1).unwrap().clone(), instant(1, 14, 0), None);
    let _pending = view.apply_optimistic(&first).unwrap();

    let second = plan_move(2, &view.find(2).unwrap().clone(), instant(1, 16, 0), None);
    assert_eq!(
        view.apply_optimistic(&second),
        Err(CoreError::MoveInFlight(1))
    );
}

#[test]
fn test_confirm_move_promotes_canonical_event() {
    let mut view = view_with(vec![event(1, 1, 1, 9, 11)]);
    let plan = plan_move(1, &view.find(1).unwrap().clone(), instant(1, 14, 0), None);
    let pending = view.apply_optimistic(&plan).unwrap();

    // The store echoes the move back with a server-normalized title.
    let mut canonical = event(1, 1, 1, 14, 16);
    canonical.title = String::from("Shift 1 (rescheduled)");
    view.confirm_move(pending, canonical).unwrap();

    assert!(!view.has_pending_move());
    assert_eq!(view.find(1).unwrap().title, "Shift 1 (rescheduled)");
}

#[test]
fn test_confirm_move_rejects_mismatched_event() {
    let mut view = view_with(vec![event(1, 1, 1, 9, 11)]);
    let plan = plan_move(1, &view.find(1).unwrap().clone(), instant(1, 14, 0), None);
    let pending = view.apply_optimistic(&plan).unwrap();

    let result = view.confirm_move(pending, event(2, 1, 1, 14, 16));
    assert_eq!(
        result,
        Err(CoreError::ConfirmationMismatch {
            expected: 1,
            received: 2
        })
    );
}

#[test]
fn test_invalidate_move_resynchronizes_instead_of_undoing() {
    let mut view = view_with(vec![event(1, 1, 1, 9, 11)]);
    let plan = plan_move(1, &view.find(1).unwrap().clone(), instant(1, 14, 0), None);
    let pending = view.apply_optimistic(&plan).unwrap();

    let ticket = view.invalidate_move(pending);

    // No local undo: the optimistic window stays until the refetch lands.
    assert!(!view.has_pending_move());
    assert_eq!(view.find(1).unwrap().window.start(), instant(1, 14, 0));
    assert_eq!(ticket.range(), view.range());

    // The authoritative payload then wins wholesale.
    view.commit_fetch(&ticket, vec![event(1, 1, 1, 9, 11)])
        .unwrap();
    assert_eq!(view.find(1).unwrap().window.start(), instant(1, 9, 0));
}

#[test]
fn test_move_allowed_again_after_confirmation() {
    let mut view = view_with(vec![event(1, 1, 1, 9, 11)]);

    let plan = plan_move(1, &view.find(1).unwrap().clone(), instant(1, 14, 0), None);
    let pending = view.apply_optimistic(&plan).unwrap();
    view.confirm_move(pending, event(1, 1, 1, 14, 16)).unwrap();

    let again = plan_move(1, &view.find(1).unwrap().clone(), instant(1, 8, 0), None);
    assert!(view.apply_optimistic(&again).is_ok());
}

#[test]
fn test_committed_fetch_clears_pending_move() {
    let mut view = view_with(vec![event(1, 1, 1, 9, 11)]);
    let plan = plan_move(1, &view.find(1).unwrap().clone(), instant(1, 14, 0), None);
    let _pending = view.apply_optimistic(&plan).unwrap();

    let ticket = view.begin_fetch(day_range(1));
    view.commit_fetch(&ticket, vec![event(1, 1, 1, 9, 11)])
        .unwrap();

    assert!(!view.has_pending_move());
}
