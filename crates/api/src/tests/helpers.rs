// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::auth::Caller;
use crate::handlers;
use crate::request_response::{CreateEventRequest, CreateResourceRequest, EventResponse};
use shift_board_persistence::Persistence;

pub fn persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn caller() -> Caller {
    Caller::from_token("caller-token-1")
}

pub fn create_resource_request(name: &str) -> CreateResourceRequest {
    CreateResourceRequest {
        name: name.to_string(),
        role: None,
        color: None,
    }
}

pub fn create_event_request(resource_id: i64, title: &str, start: &str, end: &str) -> CreateEventRequest {
    CreateEventRequest {
        title: title.to_string(),
        description: None,
        start: start.to_string(),
        end: end.to_string(),
        resource_id: Some(resource_id),
        color: None,
        reference_day: None,
        zone: None,
    }
}

/// Creates a resource and one event on it, returning both ids.
pub fn seed_event(
    p: &mut Persistence,
    caller: &Caller,
    title: &str,
    start: &str,
    end: &str,
) -> (i64, EventResponse) {
    let resource = handlers::create_resource(p, caller, create_resource_request("Ada")).unwrap();
    let event = handlers::create_event(
        p,
        caller,
        create_event_request(resource.resource_id, title, start, end),
    )
    .unwrap();
    (resource.resource_id, event)
}
