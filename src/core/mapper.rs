use chrono::NaiveDateTime;

use crate::core::clock::{add_hours, hours_between};
use crate::core::types::{CELL_WIDTH_PX, HOURS_PER_CELL, Viewport};

/// Pixel <-> calendar transform for the visible viewport.
///
/// `leading_anchor` is the time of the cell whose origin sits at
/// `background_offset - CELL_WIDTH_PX`; its label (and anchor) is drawn at
/// the cell's horizontal centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    leading_anchor: NaiveDateTime,
    background_offset: f64,
    viewport: Viewport,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(leading_anchor: NaiveDateTime, background_offset: f64, viewport: Viewport) -> Self {
        Self {
            leading_anchor,
            background_offset,
            viewport,
        }
    }

    #[must_use]
    pub fn leading_anchor(self) -> NaiveDateTime {
        self.leading_anchor
    }

    #[must_use]
    pub fn background_offset(self) -> f64 {
        self.background_offset
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        self.viewport
    }

    /// Calendar time under a viewport-relative pixel.
    ///
    /// Returns `None` only for non-finite input.
    #[must_use]
    pub fn time_at(self, pixel_x: f64) -> Option<NaiveDateTime> {
        let real_position = pixel_x - self.background_offset + CELL_WIDTH_PX / 2.0;
        add_hours(
            self.leading_anchor,
            HOURS_PER_CELL * real_position / CELL_WIDTH_PX,
        )
    }

    /// Times under the left and right viewport edges.
    #[must_use]
    pub fn visible_range(self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.time_at(0.0)?, self.time_at(self.viewport.width_px())?))
    }

    /// Pixel `time` would occupy on the infinite line, visible or not.
    #[must_use]
    pub fn line_x(self, time: NaiveDateTime) -> f64 {
        self.background_offset - CELL_WIDTH_PX / 2.0
            + CELL_WIDTH_PX * hours_between(self.leading_anchor, time) / HOURS_PER_CELL
    }

    /// Viewport-relative pixel of `time`.
    ///
    /// Returns `None` when `time` lies outside the visible window; callers
    /// treat that as "off-screen".
    #[must_use]
    pub fn pixel_at(self, time: NaiveDateTime) -> Option<f64> {
        let (left, right) = self.visible_range()?;
        if time < left || time > right {
            return None;
        }
        let span = hours_between(left, right);
        if span <= 0.0 {
            return None;
        }
        let ratio = hours_between(left, time) / span;
        Some(self.viewport.clamp_x(ratio * self.viewport.width_px()))
    }
}
