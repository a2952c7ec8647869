use crate::extensions::{RulerContext, RulerEvent};
use crate::render::RulerSurface;

use super::TimeRuler;

impl<S: RulerSurface> TimeRuler<S> {
    pub(super) fn ruler_context(&self) -> RulerContext {
        RulerContext {
            viewport_width: self.options.viewport.width,
            cursor_x: self.cursor_x().unwrap_or_else(|| self.options.viewport.center_x()),
            cursor_time: self.cursor_time(),
            background_offset: self.background_offset().unwrap_or(0.0),
            bounds: self.bounds,
            motion_mode: self.motion_mode(),
            cursor_state: self.cursor_state(),
        }
    }

    pub(super) fn emit_event(&mut self, event: RulerEvent) {
        let context = self.ruler_context();
        for observer in self.observers.values_mut() {
            observer.on_event(event, context);
        }
    }
}
