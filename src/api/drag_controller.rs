use tracing::{debug, trace};

use crate::extensions::RulerEvent;
use crate::interaction::{CursorState, DragSession, next_cursor_state};
use crate::motion::FrameJob;
use crate::render::RulerSurface;

use super::{Motion, TimeRuler};

impl<S: RulerSurface> TimeRuler<S> {
    /// Starts a drag when `client_x` falls within the cursor marker's width.
    ///
    /// For hosts that only route horizontal pointer position; see
    /// [`Self::pointer_down_at`] for the full hit test. A hit cancels any
    /// in-flight animation. Returns `true` when a drag session is active
    /// afterwards.
    pub fn pointer_down(&mut self, client_x: f64) -> bool {
        self.begin_drag(client_x, None)
    }

    /// Starts a drag when the client-space point hits the cursor marker,
    /// which spans `cursor_width` around the cursor pixel and
    /// `cursor_height` down from the viewport top.
    pub fn pointer_down_at(&mut self, client_x: f64, client_y: f64) -> bool {
        self.begin_drag(client_x, Some(client_y))
    }

    fn begin_drag(&mut self, client_x: f64, client_y: Option<f64>) -> bool {
        let Some(cursor_x) = self.cursor_x() else {
            debug!("ignoring pointer down before ruler is ready");
            return false;
        };
        if matches!(self.motion, Motion::Dragging(_)) {
            return true;
        }

        let viewport_left = self.surface.viewport_left();
        let relative_x = client_x - viewport_left;
        if !relative_x.is_finite() || (relative_x - cursor_x).abs() > self.options.cursor_width / 2.0
        {
            trace!(relative_x, cursor_x, "pointer down missed the cursor");
            return false;
        }
        if let Some(client_y) = client_y {
            let relative_y = client_y - self.surface.viewport_top();
            if !(0.0..=self.options.cursor_height).contains(&relative_y) {
                trace!(relative_y, "pointer down below the cursor handle");
                return false;
            }
        }

        self.cancel_animation();
        self.motion = Motion::Dragging(DragSession::new(viewport_left));
        debug!(viewport_left, cursor_x, "drag started");
        if let Some(time) = self.cursor_time() {
            self.emit_event(RulerEvent::DragStart { time });
        }
        true
    }

    /// Moves the cursor with the pointer and drives edge auto-scroll.
    pub fn pointer_move(&mut self, client_x: f64) {
        if !client_x.is_finite() {
            return;
        }
        let guards = self.edge_guards();
        let width = self.options.viewport.width_px();
        let Motion::Dragging(session) = &mut self.motion else {
            return;
        };

        let relative_x = session.relative_x(client_x);
        let current = session.cursor_state();
        let next = next_cursor_state(current, relative_x, width, guards);
        let mut started = None;
        let mut stopped = false;
        if next != current {
            if next == CursorState::Normal {
                stopped = session.stop_auto_scroll();
            } else {
                started = session
                    .start_auto_scroll(next)
                    .map(|run| run.token().clone());
            }
        }

        if let Some(token) = started {
            debug!(direction = ?next, "auto-scroll started");
            self.emit_event(RulerEvent::AutoScrollStarted { direction: next });
            self.schedule_tick(FrameJob::AutoScroll, &token);
        }
        if stopped {
            debug!("auto-scroll stopped, pointer back inside viewport");
            self.emit_event(RulerEvent::AutoScrollStopped);
        }

        self.set_cursor_pixel(relative_x);
        self.clamp_cursor_to_bounds();
        self.publish_time();
    }

    /// Ends the drag session unconditionally.
    pub fn pointer_up(&mut self) {
        if !matches!(self.motion, Motion::Dragging(_)) {
            return;
        }
        let Motion::Dragging(mut session) = std::mem::replace(&mut self.motion, Motion::Idle)
        else {
            return;
        };
        if session.stop_auto_scroll() {
            self.emit_event(RulerEvent::AutoScrollStopped);
        }
        let time = self.cursor_time();
        debug!(time = ?time, "drag ended");
        if let Some(time) = time {
            self.emit_event(RulerEvent::DragEnd { time });
        }
    }
}
