// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{DomainError, FieldViolation};
use crate::types::{EventDraft, TimeRange};

/// Validates an event draft and produces its time window.
///
/// Every violated rule is collected so callers can surface all offending
/// fields at once. Resource existence is a boundary concern (the caller
/// checks it against the store, backed by the store's foreign key) and is
/// not validated here.
///
/// # Arguments
///
/// * `draft` - The draft to validate
///
/// # Returns
///
/// The validated `TimeRange` the event should be built from.
///
/// # Errors
///
/// Returns `DomainError::EventRejected` listing each violated field if:
/// - The title is empty or whitespace-only
/// - The end instant is not strictly after the start instant
pub fn validate_event_draft(draft: &EventDraft) -> Result<TimeRange, DomainError> {
    let mut violations: Vec<FieldViolation> = Vec::new();

    // Rule: title must carry visible content
    if draft.title.trim().is_empty() {
        violations.push(FieldViolation::new("title", "must not be empty"));
    }

    // Rule: the window must have strictly positive duration
    if draft.end <= draft.start {
        violations.push(FieldViolation::new(
            "end",
            format!(
                "must be strictly after start ({} is not after {})",
                draft.end, draft.start
            ),
        ));
    }

    if !violations.is_empty() {
        return Err(DomainError::EventRejected { violations });
    }

    TimeRange::new(draft.start, draft.end)
}

/// Validates a resource's display name.
///
/// # Arguments
///
/// * `name` - The candidate name
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty or
/// whitespace-only.
pub fn validate_resource_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}
