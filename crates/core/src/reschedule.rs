// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Drag/drop rescheduling as an explicit two-phase protocol.
//!
//! Phase one applies the move to the local view immediately with a marker
//! that it is unconfirmed, so the UI reflects the drop with zero
//! round-trip latency. Phase two resolves the marker: the store's
//! canonical event either promotes the patch, or the optimistic state is
//! discarded and the view re-fetches the authoritative range.
//!
//! The failure path is always a full resynchronization, never a local
//! undo: after a failed write (a timeout the server may have processed,
//! for instance) the store's actual state is unknown, and no local
//! rollback can be proven correct against it.

use crate::error::CoreError;
use crate::state::{FetchTicket, ScheduleView};
use chrono::{DateTime, Utc};
use shift_board_domain::{Event, TimeRange};

/// The computed target of one drag/drop move.
///
/// Duration is preserved exactly; only the anchor and, optionally, the
/// resource assignment change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    /// The event being moved.
    pub event_id: i64,
    /// The event's new window.
    pub window: TimeRange,
    /// The event's new resource assignment.
    pub resource_id: i64,
}

/// Computes the target window and assignment for a move.
///
/// # Arguments
///
/// * `event_id` - The id of the event being moved
/// * `event` - The event's current state
/// * `new_start` - The new anchor instant
/// * `new_resource` - A new resource assignment, or `None` to keep the
///   current one
#[must_use]
pub fn plan_move(
    event_id: i64,
    event: &Event,
    new_start: DateTime<Utc>,
    new_resource: Option<i64>,
) -> MovePlan {
    MovePlan {
        event_id,
        window: event.window.shift(new_start),
        resource_id: new_resource.unwrap_or(event.resource_id),
    }
}

/// The marker for an optimistic move awaiting its authoritative outcome.
///
/// Holding the marker is holding the obligation to resolve it: either
/// [`ScheduleView::confirm_move`] with the store's canonical event, or
/// [`ScheduleView::invalidate_move`] to resynchronize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    /// The event the move was applied to.
    event_id: i64,
    /// The event as it was before the optimistic patch.
    previous: Event,
}

impl PendingMove {
    /// Returns the id of the event being moved.
    #[must_use]
    pub const fn event_id(&self) -> i64 {
        self.event_id
    }

    /// Returns the event as it was before the optimistic patch.
    #[must_use]
    pub const fn previous(&self) -> &Event {
        &self.previous
    }
}

impl ScheduleView {
    /// Applies a move to the view optimistically.
    ///
    /// The view reflects the move immediately; the caller then issues the
    /// store update and resolves the returned marker.
    ///
    /// # Arguments
    ///
    /// * `plan` - The computed move
    ///
    /// # Errors
    ///
    /// - `CoreError::MoveInFlight` if another move is awaiting
    ///   confirmation (same-entity mutations are not pipelined)
    /// - `CoreError::EventNotFound` if the event is not in the view
    pub fn apply_optimistic(&mut self, plan: &MovePlan) -> Result<PendingMove, CoreError> {
        if let Some(in_flight) = self.pending_move() {
            return Err(CoreError::MoveInFlight(in_flight));
        }

        let event = self
            .events_mut()
            .iter_mut()
            .find(|e| e.event_id == Some(plan.event_id))
            .ok_or(CoreError::EventNotFound(plan.event_id))?;

        let previous: Event = event.clone();
        event.window = plan.window;
        event.resource_id = plan.resource_id;
        self.sort_events();
        self.set_pending_move(Some(plan.event_id));

        Ok(PendingMove {
            event_id: plan.event_id,
            previous,
        })
    }

    /// Promotes a pending move using the store's canonical event.
    ///
    /// The server is authoritative for any server-computed fields, so the
    /// canonical event replaces the optimistic patch wholesale.
    ///
    /// # Arguments
    ///
    /// * `pending` - The marker returned by `apply_optimistic`
    /// * `canonical` - The event as the store returned it
    ///
    /// # Errors
    ///
    /// - `CoreError::UnidentifiedEvent` if the canonical event has no id
    /// - `CoreError::ConfirmationMismatch` if it is a different event
    pub fn confirm_move(
        &mut self,
        pending: PendingMove,
        canonical: Event,
    ) -> Result<(), CoreError> {
        let canonical_id: i64 = canonical.event_id.ok_or(CoreError::UnidentifiedEvent)?;
        if canonical_id != pending.event_id {
            return Err(CoreError::ConfirmationMismatch {
                expected: pending.event_id,
                received: canonical_id,
            });
        }

        self.upsert(canonical)?;
        self.set_pending_move(None);
        Ok(())
    }

    /// Discards a pending move after a failed store update.
    ///
    /// The optimistic patch is not rolled back locally; the returned
    /// ticket re-fetches the current range, and the committed payload
    /// replaces whatever the view shows in the meantime.
    ///
    /// # Arguments
    ///
    /// * `pending` - The marker returned by `apply_optimistic`
    pub fn invalidate_move(&mut self, pending: PendingMove) -> FetchTicket {
        drop(pending);
        self.set_pending_move(None);
        self.begin_fetch(self.range())
    }
}
