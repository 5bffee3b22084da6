// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod contrast;
mod error;
mod heatmap;
mod timeparse;
mod types;
mod validation;
mod workload;

#[cfg(test)]
mod tests;

pub use contrast::{TextColor, readable_text_color};
pub use error::{DomainError, FieldViolation};
pub use heatmap::{HEAT_PALETTE, HeatmapBucket, build_heatmap, heat_level, merge_intervals};
pub use timeparse::{duration_minutes, parse_instant};
pub use types::{Event, EventDraft, EventPatch, HexColor, Resource, TimeRange};
pub use validation::{validate_event_draft, validate_resource_name};
pub use workload::{WorkloadSummary, summarize_workload};
