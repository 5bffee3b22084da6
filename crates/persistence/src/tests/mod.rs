// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::Persistence;
use chrono::{DateTime, TimeZone, Utc};
use shift_board_domain::{EventDraft, TimeRange};


pub const OWNER: &str = "caller-token-1";
pub const OTHER_OWNER: &str = "caller-token-2";

pub fn persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn instant(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap()
}

pub fn day_range(day: u32) -> TimeRange {
    TimeRange::new(instant(day, 0, 0), instant(day, 23, 59)).unwrap()
}

pub fn draft(resource_id: i64, title: &str, day: u32, start_hour: u32, end_hour: u32) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: None,
        start: instant(day, start_hour, 0),
        end: instant(day, end_hour, 0),
        resource_id,
        color: None,
    }
}
