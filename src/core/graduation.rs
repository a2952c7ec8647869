use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::core::types::{CELL_WIDTH_PX, HOURS_PER_CELL};

/// One fixed-width tick unit spanning two hours.
///
/// Cells are pooled by the strip: their base origin never changes, and a
/// cell whose drift leaves `[0, CELL_WIDTH_PX)` is relabelled instead of
/// being moved across the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraduationCell {
    anchor_time: NaiveDateTime,
    base_origin_x: f64,
    pixel_drift: f64,
}

impl GraduationCell {
    #[must_use]
    pub fn new(anchor_time: NaiveDateTime, base_origin_x: f64) -> Self {
        Self {
            anchor_time,
            base_origin_x,
            pixel_drift: 0.0,
        }
    }

    #[must_use]
    pub fn anchor_time(&self) -> NaiveDateTime {
        self.anchor_time
    }

    #[must_use]
    pub fn pixel_drift(&self) -> f64 {
        self.pixel_drift
    }

    /// Current left edge in viewport pixels.
    #[must_use]
    pub fn origin_x(&self) -> f64 {
        self.base_origin_x + self.pixel_drift
    }

    #[must_use]
    pub fn span(&self) -> (f64, f64) {
        let origin = self.origin_x();
        (origin, origin + CELL_WIDTH_PX)
    }

    /// Cells anchored at midnight or noon also carry a date label.
    #[must_use]
    pub fn shows_date_label(&self) -> bool {
        self.anchor_time.hour() % 12 == 0
    }

    /// Accumulates `dx` into the drift. Returns `true` when the anchor was relabelled.
    pub fn shift(&mut self, dx: f64) -> bool {
        let (whole_cells, drift) = normalize_drift(self.pixel_drift + dx);
        self.pixel_drift = drift;
        if whole_cells == 0 {
            return false;
        }
        let hours = (HOURS_PER_CELL as i64).saturating_mul(whole_cells);
        // Out of chrono's range only after ~262k years of scrolling.
        self.anchor_time = self
            .anchor_time
            .checked_sub_signed(Duration::hours(hours))
            .unwrap_or(self.anchor_time);
        true
    }
}

/// Splits a raw drift into whole cells and a remainder in `[0, CELL_WIDTH_PX)`.
#[must_use]
pub(crate) fn normalize_drift(raw: f64) -> (i64, f64) {
    if (0.0..CELL_WIDTH_PX).contains(&raw) {
        return (0, raw);
    }
    let mut whole = raw.div_euclid(CELL_WIDTH_PX);
    let mut rem = raw.rem_euclid(CELL_WIDTH_PX);
    // rem_euclid rounds tiny negative values up to the divisor.
    if rem >= CELL_WIDTH_PX {
        rem = 0.0;
        whole += 1.0;
    }
    (whole as i64, rem)
}
