use tracing::{debug, warn};

use crate::core::IntoRulerTime;
use crate::extensions::RulerEvent;
use crate::motion::{CancelToken, Completion, CompletionState, CursorTween, FrameJob, OffsetTween};
use crate::render::RulerSurface;

use super::{Animation, Motion, TimeRuler};

impl<S: RulerSurface> TimeRuler<S> {
    /// Animated seek: recentres the cursor on `target`, limited to the bounds.
    ///
    /// `duration_ms` defaults to the configured seek duration. Invalid
    /// targets, calls before readiness and calls during a drag return an
    /// already cancelled completion and change nothing.
    pub fn set_time(
        &mut self,
        target: impl IntoRulerTime,
        duration_ms: impl Into<Option<f64>>,
    ) -> Completion {
        let Some(target) = target.into_ruler_time() else {
            warn!("ignoring seek to an invalid time");
            return Completion::cancelled();
        };
        if !self.accepts_animation("set_time") {
            return Completion::cancelled();
        }
        let target = self.bounds.clamp_time(target);
        let Some(delta) = self.recentre_delta(target) else {
            return Completion::cancelled();
        };
        let duration_ms = self.resolve_duration(duration_ms);
        debug!(%target, delta, duration_ms, "seek requested");
        self.start_animation(
            Some(delta),
            Some(self.options.viewport.center_x()),
            duration_ms,
        )
    }

    /// Animates the strip by `delta` pixels; the increments always sum to `delta`.
    pub fn set_offset_animate(
        &mut self,
        delta: f64,
        duration_ms: impl Into<Option<f64>>,
    ) -> Completion {
        if !delta.is_finite() {
            warn!(delta, "ignoring non-finite offset animation");
            return Completion::cancelled();
        }
        if !self.accepts_animation("set_offset_animate") {
            return Completion::cancelled();
        }
        let duration_ms = self.resolve_duration(duration_ms);
        self.start_animation(Some(delta), None, duration_ms)
    }

    /// Moves the cursor marker linearly to `target_x`, clamped to the viewport.
    pub fn set_cursor_x(&mut self, target_x: f64, duration_ms: impl Into<Option<f64>>) -> Completion {
        if !target_x.is_finite() {
            warn!(target_x, "ignoring non-finite cursor target");
            return Completion::cancelled();
        }
        if !self.accepts_animation("set_cursor_x") {
            return Completion::cancelled();
        }
        let target_x = self.options.viewport.clamp_x(target_x);
        let duration_ms = self.resolve_duration(duration_ms);
        self.start_animation(None, Some(target_x), duration_ms)
    }

    /// Recentres on `target` immediately, replacing any animation.
    pub fn move_to_time(&mut self, target: impl IntoRulerTime) {
        let Some(target) = target.into_ruler_time() else {
            warn!("ignoring move to an invalid time");
            return;
        };
        if !self.accepts_animation("move_to_time") {
            return;
        }
        self.cancel_animation();
        self.seek_now(target);
    }

    /// Cancels the in-flight animation, if any. Returns `true` when one was running.
    pub(super) fn cancel_animation(&mut self) -> bool {
        if !matches!(self.motion, Motion::Animating(_)) {
            return false;
        }
        if let Motion::Animating(animation) = std::mem::replace(&mut self.motion, Motion::Idle) {
            animation.token.cancel();
            animation.completion.settle(CompletionState::Cancelled);
            debug!("animation cancelled");
        }
        true
    }

    fn accepts_animation(&self, operation: &'static str) -> bool {
        if !self.is_ready() {
            debug!(operation, "ignoring call before ruler is ready");
            return false;
        }
        if matches!(self.motion, Motion::Dragging(_)) {
            debug!(operation, "ignoring animation request during drag");
            return false;
        }
        true
    }

    fn resolve_duration(&self, duration_ms: impl Into<Option<f64>>) -> f64 {
        duration_ms
            .into()
            .filter(|duration| !duration.is_nan())
            .unwrap_or(self.options.default_seek_duration_ms)
    }

    fn start_animation(
        &mut self,
        offset_delta: Option<f64>,
        cursor_target: Option<f64>,
        duration_ms: f64,
    ) -> Completion {
        self.cancel_animation();
        let Some(cursor_x) = self.cursor_x() else {
            return Completion::cancelled();
        };

        if duration_ms <= 0.0 || !duration_ms.is_finite() {
            if let Some(dx) = offset_delta {
                self.apply_shift(dx);
            }
            if let Some(x) = cursor_target {
                self.set_cursor_pixel(x);
            }
            self.clamp_cursor_to_bounds();
            self.finish_animation_publish();
            return Completion::finished();
        }

        let token = CancelToken::new();
        let completion = Completion::pending();
        self.motion = Motion::Animating(Animation {
            token: token.clone(),
            completion: completion.clone(),
            offset: offset_delta.map(|delta| OffsetTween::new(delta, duration_ms)),
            cursor: cursor_target.map(|to| CursorTween::new(cursor_x, to, duration_ms)),
        });
        self.schedule_tick(FrameJob::Animation, &token);
        completion
    }

    /// One tween frame for the animation identified by `token`.
    pub(super) fn run_animation_tick(&mut self, token: &CancelToken, now_ms: f64) {
        let Motion::Animating(animation) = &mut self.motion else {
            return;
        };
        if !animation.token.same_task(token) {
            return;
        }

        let offset_step = animation.offset.as_mut().map(|tween| tween.step(now_ms));
        let cursor_sample = animation
            .cursor
            .as_mut()
            .map(|tween| tween.sample(now_ms));
        let finished = offset_step.is_none_or(|step| step.finished)
            && cursor_sample.is_none_or(|(_, done)| done);

        if let Some(step) = offset_step {
            self.apply_shift(step.dx);
        }
        if let Some((x, _)) = cursor_sample {
            self.set_cursor_pixel(x);
        }
        self.clamp_cursor_to_bounds();

        if !finished {
            self.publish_time();
            self.schedule_tick(FrameJob::Animation, token);
            return;
        }
        if let Motion::Animating(animation) = std::mem::replace(&mut self.motion, Motion::Idle) {
            animation.completion.settle(CompletionState::Finished);
        }
        self.finish_animation_publish();
    }

    fn finish_animation_publish(&mut self) {
        self.publish_time();
        if let Some(time) = self.cursor_time() {
            debug!(%time, "animation finished");
            self.emit_event(RulerEvent::AnimationFinished { time });
        }
    }
}
