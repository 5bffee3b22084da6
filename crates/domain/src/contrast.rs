// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Readable text color selection for colored event chips.

use crate::types::HexColor;
use serde::Serialize;

/// The text color that stays readable on a given background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextColor {
    /// Dark text, for light backgrounds.
    Dark,
    /// Light text, for dark backgrounds.
    Light,
}

impl TextColor {
    /// Returns the concrete hex value views should render.
    #[must_use]
    pub const fn as_hex(&self) -> &'static str {
        match self {
            Self::Dark => "#1f2328",
            Self::Light => "#ffffff",
        }
    }
}

/// Chooses a readable text color for a background color.
///
/// Uses the YIQ luma approximation: backgrounds with luma at or above 128
/// are treated as light and get dark text, everything else gets light
/// text.
///
/// # Arguments
///
/// * `background` - The background color
#[must_use]
pub fn readable_text_color(background: &HexColor) -> TextColor {
    let (red, green, blue) = background.channels();
    let luma: u32 =
        (299 * u32::from(red) + 587 * u32::from(green) + 114 * u32::from(blue)) / 1000;

    if luma >= 128 {
        TextColor::Dark
    } else {
        TextColor::Light
    }
}
