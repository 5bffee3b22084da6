// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during schedule view transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A fetch response arrived after a newer fetch superseded it.
    ///
    /// Callers discard this silently; committing the stale payload would
    /// flicker the view back to older data.
    StaleResponse {
        /// The view's current fetch generation.
        current: u64,
        /// The generation the late response was issued for.
        received: u64,
    },
    /// The targeted event is not present in the view.
    EventNotFound(i64),
    /// A move is already awaiting confirmation for this event.
    ///
    /// Mutations on the same entity are never pipelined; the in-flight
    /// move must be confirmed or invalidated first.
    MoveInFlight(i64),
    /// An event without a persisted id cannot participate in view upserts.
    UnidentifiedEvent,
    /// A confirmation carried a different event than the pending move.
    ConfirmationMismatch {
        /// The event id the pending move was opened for.
        expected: i64,
        /// The event id the confirmation carried.
        received: i64,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaleResponse { current, received } => {
                write!(
                    f,
                    "Stale fetch response: generation {received} superseded by {current}"
                )
            }
            Self::EventNotFound(id) => write!(f, "Event {id} is not in the current view"),
            Self::MoveInFlight(id) => {
                write!(f, "Event {id} already has a move awaiting confirmation")
            }
            Self::UnidentifiedEvent => {
                write!(f, "Event has no persisted id and cannot enter the view")
            }
            Self::ConfirmationMismatch { expected, received } => {
                write!(
                    f,
                    "Confirmation for event {received} does not match pending move for event {expected}"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}
