use tracing::{debug, trace};

use crate::extensions::RulerEvent;
use crate::motion::{CancelToken, FrameJob};
use crate::render::RulerSurface;

use super::{Motion, TimeRuler};

impl<S: RulerSurface> TimeRuler<S> {
    /// One edge-scroll frame for the run identified by `token`.
    ///
    /// Stale ticks (the run ended or was replaced) return without effect.
    pub(super) fn run_auto_scroll_tick(&mut self, token: &CancelToken, now_ms: f64) {
        let guards = self.edge_guards();
        let speed = self.options.scroll_speed_px_per_ms;
        let Motion::Dragging(session) = &mut self.motion else {
            return;
        };
        let Some(run) = session.auto_scroll_mut() else {
            return;
        };
        if !run.token().same_task(token) {
            return;
        }

        let direction = run.direction();
        if guards.blocks(direction) {
            session.stop_auto_scroll();
            debug!(?direction, "auto-scroll stopped at a bound");
            self.emit_event(RulerEvent::AutoScrollStopped);
            return;
        }

        let Some(dx) = run.advance(now_ms, speed) else {
            self.schedule_tick(FrameJob::AutoScroll, token);
            return;
        };
        let (dx, reached_bound) = self.limit_scroll_shift(direction, dx);
        trace!(dx, now_ms, reached_bound, "auto-scroll frame");
        self.apply_shift(dx);
        self.clamp_cursor_to_bounds();
        self.publish_time();

        if reached_bound {
            if let Motion::Dragging(session) = &mut self.motion {
                session.stop_auto_scroll();
            }
            debug!(?direction, "auto-scroll carried a bound to the edge");
            self.emit_event(RulerEvent::AutoScrollStopped);
            return;
        }
        self.schedule_tick(FrameJob::AutoScroll, token);
    }
}
