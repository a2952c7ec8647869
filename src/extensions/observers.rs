use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::{BoundKind, TimeBounds};
use crate::interaction::{CursorState, MotionMode};

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RulerContext {
    pub viewport_width: u32,
    pub cursor_x: f64,
    pub cursor_time: Option<NaiveDateTime>,
    pub background_offset: f64,
    pub bounds: TimeBounds,
    pub motion_mode: MotionMode,
    pub cursor_state: CursorState,
}

/// Notifications published by the ruler, delivered synchronously in the
/// order they were produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RulerEvent {
    Ready,
    TimeUpdate {
        time: NaiveDateTime,
    },
    DragStart {
        time: NaiveDateTime,
    },
    DragEnd {
        time: NaiveDateTime,
    },
    AutoScrollStarted {
        direction: CursorState,
    },
    AutoScrollStopped,
    AnimationFinished {
        time: NaiveDateTime,
    },
    BoundChanged {
        kind: BoundKind,
        time: Option<NaiveDateTime>,
    },
}

/// Subscriber interface for ruler notifications.
///
/// Observers see events and a context snapshot but cannot mutate the ruler.
pub trait RulerObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: RulerEvent, context: RulerContext);
}
