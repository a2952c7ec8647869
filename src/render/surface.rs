use std::fmt::Write as _;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CELL_WIDTH_PX, GraduationCell, SUB_TICKS_PER_CELL, Viewport};
use crate::error::RulerResult;
use crate::render::Color;

/// Opaque handle to a visual element owned by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    Cursor,
    StartBound,
    EndBound,
}

/// chrono strftime patterns used for cell labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelFormats {
    pub time: String,
    pub date: String,
}

impl Default for LabelFormats {
    fn default() -> Self {
        Self {
            time: "%-H:%M".to_owned(),
            date: "%-m/%-d".to_owned(),
        }
    }
}

/// Text shown by one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLabels {
    pub time_label: String,
    /// Present only for cells anchored at midnight or noon; `None` clears it.
    pub date_label: Option<String>,
}

impl CellLabels {
    #[must_use]
    pub fn for_cell(cell: &GraduationCell, formats: &LabelFormats) -> Self {
        let anchor = cell.anchor_time();
        Self {
            time_label: format_time(anchor, &formats.time),
            date_label: cell
                .shows_date_label()
                .then(|| format_time(anchor, &formats.date)),
        }
    }
}

fn format_time(time: NaiveDateTime, pattern: &str) -> String {
    let mut text = String::new();
    // Patterns are validated with the options; a failure leaves the label empty.
    if write!(text, "{}", time.format(pattern)).is_err() {
        text.clear();
    }
    text
}

/// One sub-graduation inside a cell, relative to the cell origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubTick {
    pub offset_x: f64,
    pub major: bool,
}

/// Everything the surface needs to build the visuals of one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellVisual {
    pub anchor_time: NaiveDateTime,
    pub origin_x: f64,
    pub width: f64,
    pub stroke: Color,
    pub labels: CellLabels,
}

impl CellVisual {
    #[must_use]
    pub fn new(cell: &GraduationCell, stroke: Color, formats: &LabelFormats) -> Self {
        Self {
            anchor_time: cell.anchor_time(),
            origin_x: cell.origin_x(),
            width: CELL_WIDTH_PX,
            stroke,
            labels: CellLabels::for_cell(cell, formats),
        }
    }

    /// Horizontal label anchor relative to the origin (cells are labelled at their centre).
    #[must_use]
    pub fn label_offset_x(&self) -> f64 {
        self.width / 2.0
    }

    /// Sub-tick layout: every sixth tick is a major (hour) tick.
    #[must_use]
    pub fn sub_ticks(&self) -> SmallVec<[SubTick; 12]> {
        let spacing = self.width / f64::from(SUB_TICKS_PER_CELL);
        (1..=SUB_TICKS_PER_CELL)
            .map(|index| SubTick {
                offset_x: f64::from(index) * spacing,
                major: index % 6 == 0,
            })
            .collect()
    }
}

/// Retained-mode drawing collaborator consumed by the ruler.
///
/// Implementations own every visual primitive; the ruler only creates
/// elements, relabels cells and moves elements horizontally.
pub trait RulerSurface {
    /// Attaches the ruler to its container.
    ///
    /// Fails with `RulerError::UnmountableContainer` when no drawable surface exists.
    fn mount(&mut self, viewport: Viewport, background: Color) -> RulerResult<()>;

    /// Whether the first layout pass has completed.
    fn is_ready(&self) -> bool;

    fn create_cell(&mut self, cell: &CellVisual) -> ElementId;

    /// Reflects a relabelled anchor time on an existing cell.
    fn update_cell(&mut self, id: ElementId, anchor_time: NaiveDateTime, labels: &CellLabels);

    fn create_marker(&mut self, kind: MarkerKind, x: f64) -> ElementId;

    fn set_element_x(&mut self, id: ElementId, x: f64);

    /// Client-space x of the viewport's left edge.
    fn viewport_left(&self) -> f64;

    /// Client-space y of the viewport's top edge.
    fn viewport_top(&self) -> f64;

    /// Asks the host to call `TimeRuler::advance_frame` on the next rendered frame.
    fn request_frame(&mut self);
}
