use chrono::NaiveDateTime;
use tracing::trace;

use crate::core::{BoundKind, CoordinateMapper};
use crate::extensions::RulerEvent;
use crate::interaction::{CursorState, EdgeGuards};
use crate::motion::{CancelToken, FrameJob};
use crate::render::{CellLabels, RulerSurface};

use super::TimeRuler;

impl<S: RulerSurface> TimeRuler<S> {
    pub(super) fn mapper(&self) -> Option<CoordinateMapper> {
        self.layout.as_ref().map(|layout| layout.strip.mapper())
    }

    /// Shifts the strip by `dx` and mirrors cells and bound markers on the surface.
    pub(super) fn apply_shift(&mut self, dx: f64) {
        let Some(layout) = self.layout.as_mut() else {
            return;
        };
        let outcome = layout.strip.shift(dx);
        for (cell, id) in layout.strip.cells().iter().zip(&layout.cell_elements) {
            self.surface.set_element_x(*id, cell.origin_x());
            if outcome.relabeled {
                let labels = CellLabels::for_cell(cell, &self.options.label_formats);
                self.surface.update_cell(*id, cell.anchor_time(), &labels);
            }
        }
        trace!(
            dx,
            background_offset = layout.strip.background_offset(),
            relabeled = outcome.relabeled,
            "strip shifted"
        );
        self.sync_bound_markers();
    }

    pub(super) fn sync_bound_markers(&mut self) {
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        let mapper = layout.strip.mapper();
        for (kind, marker) in [
            (BoundKind::Start, layout.start_marker),
            (BoundKind::End, layout.end_marker),
        ] {
            if let Some(id) = marker {
                self.surface
                    .set_element_x(id, self.bounds.marker_x(kind, mapper));
            }
        }
    }

    /// Moves the cursor marker, keeping it inside the viewport.
    pub(super) fn set_cursor_pixel(&mut self, x: f64) {
        let viewport = self.options.viewport;
        let Some(layout) = self.layout.as_mut() else {
            return;
        };
        let x = viewport.clamp_x(x);
        layout.cursor_x = x;
        self.surface.set_element_x(layout.cursor_element, x);
    }

    /// Puts the cursor back on a bound it has crossed.
    ///
    /// An on-screen bound takes the cursor pixel; an off-screen one is
    /// shifted in so it lands under the cursor. Returns `true` on a correction.
    pub(super) fn clamp_cursor_to_bounds(&mut self) -> bool {
        let Some(layout) = self.layout.as_ref() else {
            return false;
        };
        let mapper = layout.strip.mapper();
        let cursor_x = layout.cursor_x;
        let Some((kind, bound)) = mapper
            .time_at(cursor_x)
            .and_then(|time| self.bounds.crossed(time))
        else {
            return false;
        };

        let bound_x = mapper.line_x(bound);
        if (0.0..=self.options.viewport.width_px()).contains(&bound_x) {
            self.set_cursor_pixel(bound_x);
        } else {
            self.apply_shift(cursor_x - bound_x);
        }
        trace!(?kind, cursor_x, bound_x, "cursor held at bound");
        true
    }

    pub(super) fn edge_guards(&self) -> EdgeGuards {
        let Some(mapper) = self.mapper() else {
            return EdgeGuards::default();
        };
        EdgeGuards {
            start_reached: self.bounds.reached(BoundKind::Start, mapper),
            end_reached: self.bounds.reached(BoundKind::End, mapper),
        }
    }

    /// Limits an auto-scroll shift so the guarding bound stops at the viewport edge.
    ///
    /// Returns the shift to apply and whether it was cut short.
    pub(super) fn limit_scroll_shift(&self, direction: CursorState, dx: f64) -> (f64, bool) {
        let Some(mapper) = self.mapper() else {
            return (dx, false);
        };
        let limited = match direction {
            CursorState::Back => self
                .bounds
                .line_x(BoundKind::Start, mapper)
                .map(|start_x| dx.min(-start_x)),
            CursorState::Forward => self
                .bounds
                .line_x(BoundKind::End, mapper)
                .map(|end_x| dx.max(self.options.viewport.width_px() - end_x)),
            CursorState::Normal => Some(0.0),
        };
        match limited {
            Some(limited) if limited != dx => (limited, true),
            _ => (dx, false),
        }
    }

    /// Background shift that brings `target` under the viewport centre.
    pub(super) fn recentre_delta(&self, target: NaiveDateTime) -> Option<f64> {
        let mapper = self.mapper()?;
        Some(self.options.viewport.center_x() - mapper.line_x(target))
    }

    /// Recentres on `target` (limited to the bounds) without animating.
    pub(super) fn seek_now(&mut self, target: NaiveDateTime) {
        let target = self.bounds.clamp_time(target);
        let Some(dx) = self.recentre_delta(target) else {
            return;
        };
        self.apply_shift(dx);
        self.set_cursor_pixel(self.options.viewport.center_x());
        self.clamp_cursor_to_bounds();
        self.publish_time();
    }

    pub(super) fn publish_time(&mut self) {
        if let Some(time) = self.cursor_time() {
            self.emit_event(RulerEvent::TimeUpdate { time });
        }
    }

    /// Queues a frame tick, asking the host for a frame when none is pending.
    pub(super) fn schedule_tick(&mut self, job: FrameJob, token: &CancelToken) {
        if self.scheduler.schedule(job, token) {
            self.surface.request_frame();
        }
    }
}
