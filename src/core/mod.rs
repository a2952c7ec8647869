pub mod bounds;
pub mod clock;
pub mod graduation;
pub mod mapper;
pub mod strip;
pub mod types;

pub use bounds::{BoundKind, PARKED_MARKER_X, TimeBounds};
pub use clock::{IntoRulerTime, add_hours, floor_to_even_hour, hours_between, start_of_hour};
pub use graduation::GraduationCell;
pub use mapper::CoordinateMapper;
pub use strip::{GraduationStrip, ShiftOutcome};
pub use types::{CELL_WIDTH_PX, HOURS_PER_CELL, SUB_TICKS_PER_CELL, Viewport};
