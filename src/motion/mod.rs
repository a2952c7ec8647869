//! Frame-scheduled motion: tweens, cancellation tokens and completion handles.

mod scheduler;
mod tween;

pub use scheduler::{
    CancelToken, Completion, CompletionState, FrameJob, FrameScheduler, ScheduledTick,
};
pub use tween::{CursorTween, OffsetTween, TweenClock, TweenStep};
