use serde::{Deserialize, Serialize};

/// Width of one graduation cell: 12 sub-ticks, 6 px apart.
pub const CELL_WIDTH_PX: f64 = 72.0;
/// Calendar span of one graduation cell.
pub const HOURS_PER_CELL: f64 = 2.0;
pub const SUB_TICKS_PER_CELL: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        self.width_px() / 2.0
    }

    /// Clamps a viewport-relative x into `[0, width]`.
    #[must_use]
    pub fn clamp_x(self, x: f64) -> f64 {
        x.clamp(0.0, self.width_px())
    }
}
