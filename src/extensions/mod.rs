//! Host-facing extension points.

pub mod observers;

pub use observers::{RulerContext, RulerEvent, RulerObserver};
