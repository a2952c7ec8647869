use tracing::trace;

use crate::motion::FrameJob;
use crate::render::RulerSurface;

use super::TimeRuler;

impl<S: RulerSurface> TimeRuler<S> {
    /// Runs one rendered frame at host timestamp `timestamp_ms`.
    ///
    /// Completes readiness first, then every tick scheduled for this frame
    /// in scheduling order. Ticks reschedule themselves while they still
    /// have work.
    pub fn advance_frame(&mut self, timestamp_ms: f64) {
        if !self.poll_ready() {
            return;
        }
        let due = self.scheduler.take_due();
        trace!(timestamp_ms, ticks = due.len(), "frame");
        for tick in due {
            if tick.token.is_cancelled() {
                continue;
            }
            match tick.job {
                FrameJob::AutoScroll => self.run_auto_scroll_tick(&tick.token, timestamp_ms),
                FrameJob::Animation => self.run_animation_tick(&tick.token, timestamp_ms),
            }
        }
    }

    /// Whether a live tick waits for the next frame.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        !self.scheduler.is_idle()
    }
}
