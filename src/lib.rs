//! time-ruler: headless engine for an interactive, horizontally scrolling
//! hour ruler.
//!
//! The ruler keeps a fixed pool of graduation cells consistent with an
//! unbounded scroll offset, maps pixels to calendar time and back, and
//! drives drag, edge auto-scroll and animated seeks from a host frame
//! loop. Drawing is delegated to a [`render::RulerSurface`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod motion;
pub mod render;
pub mod telemetry;

pub use api::{RulerOptions, TimeRuler};
pub use error::{RulerError, RulerResult};
