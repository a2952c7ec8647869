mod primitives;
mod recording_surface;
mod surface;

pub use primitives::Color;
pub use recording_surface::{RecordedElement, RecordingSurface};
pub use surface::{
    CellLabels, CellVisual, ElementId, LabelFormats, MarkerKind, RulerSurface, SubTick,
};
