// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use shift_board_domain::{Event, TimeRange};

/// A ticket identifying one range fetch against a [`ScheduleView`].
///
/// Issuing a ticket is cheap; committing one is fenced by the view's
/// generation counter so a superseded fetch can never overwrite newer
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    /// The generation this ticket was issued at.
    generation: u64,
    /// The range the fetch was issued for.
    range: TimeRange,
}

impl FetchTicket {
    /// Returns the generation this ticket was issued at.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the range the fetch was issued for.
    #[must_use]
    pub const fn range(&self) -> TimeRange {
        self.range
    }
}

/// The transient in-memory event collection owned by the active view.
///
/// The authoritative copy of every event lives in the store; this view is
/// a possibly stale cache that is mutated only by three paths, each an
/// indivisible transition: a committed range fetch (full replace), an
/// optimistic move patch (single entity), or a server-confirmed
/// upsert/remove (single entity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleView {
    /// The range currently displayed.
    range: TimeRange,
    /// Events in the range, ordered by start then id.
    events: Vec<Event>,
    /// Fetch generation; bumped by every `begin_fetch`.
    generation: u64,
    /// The event id with an unconfirmed optimistic move, if any.
    pending_move: Option<i64>,
}

impl ScheduleView {
    /// Creates an empty view for a range.
    ///
    /// # Arguments
    ///
    /// * `range` - The range the view will display
    #[must_use]
    pub const fn new(range: TimeRange) -> Self {
        Self {
            range,
            events: Vec::new(),
            generation: 0,
            pending_move: None,
        }
    }

    /// Returns the range currently displayed.
    #[must_use]
    pub const fn range(&self) -> TimeRange {
        self.range
    }

    /// Returns the events in the view, ordered by start then id.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the current fetch generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Checks whether an optimistic move is awaiting confirmation.
    #[must_use]
    pub const fn has_pending_move(&self) -> bool {
        self.pending_move.is_some()
    }

    /// Finds an event in the view by id.
    #[must_use]
    pub fn find(&self, event_id: i64) -> Option<&Event> {
        self.events
            .iter()
            .find(|e| e.event_id == Some(event_id))
    }

    /// Starts a new range fetch, superseding any fetch still in flight.
    ///
    /// The returned ticket must be presented back to [`Self::commit_fetch`]
    /// with the fetched events.
    ///
    /// # Arguments
    ///
    /// * `range` - The range being fetched
    pub const fn begin_fetch(&mut self, range: TimeRange) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            range,
        }
    }

    /// Commits a completed range fetch, replacing the view's contents.
    ///
    /// A committed fetch clears any pending optimistic move: the fetched
    /// payload is authoritative for everything in range.
    ///
    /// # Arguments
    ///
    /// * `ticket` - The ticket issued by `begin_fetch`
    /// * `events` - The fetched events
    ///
    /// # Errors
    ///
    /// Returns `CoreError::StaleResponse` if a newer fetch superseded the
    /// ticket; the caller discards the payload and keeps the current view.
    pub fn commit_fetch(
        &mut self,
        ticket: &FetchTicket,
        events: Vec<Event>,
    ) -> Result<(), CoreError> {
        if ticket.generation != self.generation {
            return Err(CoreError::StaleResponse {
                current: self.generation,
                received: ticket.generation,
            });
        }

        self.range = ticket.range;
        self.events = events;
        self.sort_events();
        self.pending_move = None;
        Ok(())
    }

    /// Applies a server-confirmed event to the view as a single upsert.
    ///
    /// # Arguments
    ///
    /// * `event` - The canonical event returned by the store
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnidentifiedEvent` if the event carries no id.
    pub fn upsert(&mut self, event: Event) -> Result<(), CoreError> {
        let event_id: i64 = event.event_id.ok_or(CoreError::UnidentifiedEvent)?;
        self.events.retain(|e| e.event_id != Some(event_id));
        self.events.push(event);
        self.sort_events();
        Ok(())
    }

    /// Removes an event from the view after a confirmed delete.
    ///
    /// Returns the removed event, or `None` if it was not in the view
    /// (already outside the displayed range, for instance).
    ///
    /// # Arguments
    ///
    /// * `event_id` - The id of the deleted event
    pub fn remove(&mut self, event_id: i64) -> Option<Event> {
        let index: usize = self
            .events
            .iter()
            .position(|e| e.event_id == Some(event_id))?;
        Some(self.events.remove(index))
    }

    pub(crate) const fn pending_move(&self) -> Option<i64> {
        self.pending_move
    }

    pub(crate) const fn set_pending_move(&mut self, event_id: Option<i64>) {
        self.pending_move = event_id;
    }

    pub(crate) fn events_mut(&mut self) -> &mut Vec<Event> {
        &mut self.events
    }

    pub(crate) fn sort_events(&mut self) {
        self.events
            .sort_by_key(|e| (e.window.start(), e.event_id));
    }
}
