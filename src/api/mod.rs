mod animation_controller;
mod auto_scroll_controller;
mod bounds_controller;
mod drag_controller;
mod frame_loop;
mod observer_dispatch;
mod observer_registry;
mod ruler;
mod ruler_config;
mod surface_sync;
mod validation;

use ruler::{Animation, Motion};

pub use ruler::TimeRuler;
pub use ruler_config::{RULER_OPTIONS_JSON_SCHEMA_V1, RulerOptions, RulerOptionsJsonContractV1};
