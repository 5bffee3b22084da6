// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, TimeZone, Utc};
use shift_board_domain::{Event, TimeRange};

pub fn instant(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap()
}

pub fn day_range(day: u32) -> TimeRange {
    TimeRange::new(instant(day, 0, 0), instant(day, 23, 59)).unwrap()
}

pub fn event(event_id: i64, resource_id: i64, day: u32, start_hour: u32, end_hour: u32) -> Event {
    let window = TimeRange::new(instant(day, start_hour, 0), instant(day, end_hour, 0)).unwrap();
    Event::with_id(
        event_id,
        format!("Shift {event_id}"),
        None,
        window,
        resource_id,
        None,
    )
}
