use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::clock::{add_hours, floor_to_even_hour, hours_between};
use crate::core::graduation::{GraduationCell, normalize_drift};
use crate::core::mapper::CoordinateMapper;
use crate::core::types::{CELL_WIDTH_PX, HOURS_PER_CELL, Viewport};
use crate::error::{RulerError, RulerResult};

/// Index of the cell whose origin is `background_offset - CELL_WIDTH_PX`.
const LEADING_CELL: usize = 1;

/// Result of one [`GraduationStrip::shift`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShiftOutcome {
    /// Cells were relabelled and their label text must be refreshed.
    pub relabeled: bool,
}

/// Fixed pool of graduation cells giving the illusion of an unbounded timeline.
///
/// Layout: `ceil(width / cell) + 2` cells (the visible slots plus one overscan
/// cell per side, the left one at `-cell`) and one spare cell ahead of the
/// left overscan cell. The spare keeps the left margin covered while the
/// sub-cell offset is positive, so the union of cell spans always contains
/// `[-cell, width + cell]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraduationStrip {
    viewport: Viewport,
    cells: Vec<GraduationCell>,
    background_offset: f64,
    total_shift: f64,
}

impl GraduationStrip {
    /// Builds the strip so that the viewport centre maps exactly to `center_time`.
    pub fn new(viewport: Viewport, center_time: NaiveDateTime) -> RulerResult<Self> {
        if !viewport.is_valid() {
            return Err(RulerError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let root = floor_to_even_hour(center_time);
        let fraction = hours_between(root, center_time) / HOURS_PER_CELL;
        // Cells between the leading anchor and the centre pixel at zero offset.
        let cells_to_center = (viewport.center_x() + CELL_WIDTH_PX / 2.0) / CELL_WIDTH_PX;
        let whole = (cells_to_center - fraction).floor();
        let alignment = (viewport.center_x() + CELL_WIDTH_PX / 2.0)
            - CELL_WIDTH_PX * (whole + fraction);
        let (_, alignment) = normalize_drift(alignment);

        let leading_anchor = add_hours(root, -HOURS_PER_CELL * whole).ok_or_else(|| {
            RulerError::InvalidData("ruler end time is out of calendar range".to_owned())
        })?;

        let count = (viewport.width_px() / CELL_WIDTH_PX).ceil() as usize + 3;
        let mut cells = Vec::with_capacity(count);
        for index in 0..count {
            let rank = index as f64 - LEADING_CELL as f64;
            let anchor = add_hours(leading_anchor, HOURS_PER_CELL * rank).ok_or_else(|| {
                RulerError::InvalidData("ruler end time is out of calendar range".to_owned())
            })?;
            let mut cell = GraduationCell::new(anchor, (rank - 1.0) * CELL_WIDTH_PX);
            cell.shift(alignment);
            cells.push(cell);
        }

        Ok(Self {
            viewport,
            cells,
            background_offset: alignment,
            total_shift: 0.0,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn cells(&self) -> &[GraduationCell] {
        &self.cells
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Sub-cell offset in `[0, CELL_WIDTH_PX)`.
    #[must_use]
    pub fn background_offset(&self) -> f64 {
        self.background_offset
    }

    /// Sum of every shift applied since construction.
    #[must_use]
    pub fn total_shift(&self) -> f64 {
        self.total_shift
    }

    #[must_use]
    pub fn leading_anchor(&self) -> NaiveDateTime {
        self.cells[LEADING_CELL].anchor_time()
    }

    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.leading_anchor(), self.background_offset, self.viewport)
    }

    /// Union of all cell spans.
    #[must_use]
    pub fn covered_span(&self) -> (f64, f64) {
        self.cells
            .iter()
            .map(GraduationCell::span)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
                (lo.min(a), hi.max(b))
            })
    }

    /// Moves every cell and the background by `dx` pixels (positive = right).
    pub fn shift(&mut self, dx: f64) -> ShiftOutcome {
        if !dx.is_finite() || dx == 0.0 {
            return ShiftOutcome::default();
        }
        let mut relabeled = false;
        for cell in &mut self.cells {
            relabeled |= cell.shift(dx);
        }
        let (_, offset) = normalize_drift(self.background_offset + dx);
        self.background_offset = offset;
        self.total_shift += dx;
        ShiftOutcome { relabeled }
    }
}
