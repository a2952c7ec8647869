use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::core::{BoundKind, IntoRulerTime};
use crate::extensions::RulerEvent;
use crate::render::{MarkerKind, RulerSurface};

use super::{Motion, TimeRuler};

impl<S: RulerSurface> TimeRuler<S> {
    /// Sets or replaces the start bound.
    ///
    /// No-op for invalid times, before readiness, or when the value would
    /// lie after the end bound. A cursor left before the new bound is
    /// re-seeked onto it without animation; during a drag it is held at
    /// the bound where it is instead of being recentred.
    pub fn set_start_time(&mut self, time: impl IntoRulerTime) {
        self.set_bound(BoundKind::Start, time.into_ruler_time());
    }

    /// Sets or replaces the end bound. See [`Self::set_start_time`].
    pub fn set_end_time(&mut self, time: impl IntoRulerTime) {
        self.set_bound(BoundKind::End, time.into_ruler_time());
    }

    pub fn clear_start_time(&mut self) {
        self.clear_bound(BoundKind::Start);
    }

    pub fn clear_end_time(&mut self) {
        self.clear_bound(BoundKind::End);
    }

    #[must_use]
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.bounds.start()
    }

    #[must_use]
    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.bounds.end()
    }

    /// Pixel of the start bound, `None` when unset or off-screen.
    #[must_use]
    pub fn start_x(&self) -> Option<f64> {
        self.bound_x(BoundKind::Start)
    }

    /// Pixel of the end bound, `None` when unset or off-screen.
    #[must_use]
    pub fn end_x(&self) -> Option<f64> {
        self.bound_x(BoundKind::End)
    }

    fn bound_x(&self, kind: BoundKind) -> Option<f64> {
        self.mapper()
            .and_then(|mapper| self.bounds.project(kind, mapper))
    }

    fn set_bound(&mut self, kind: BoundKind, time: Option<NaiveDateTime>) {
        if !self.is_ready() {
            debug!(?kind, "ignoring bound change before ruler is ready");
            return;
        }
        let Some(time) = time else {
            warn!(?kind, "ignoring invalid bound time");
            return;
        };
        if !self.bounds.set(kind, time) {
            warn!(?kind, %time, "ignoring bound that would invert the range");
            return;
        }

        self.ensure_bound_marker(kind);
        self.sync_bound_markers();
        debug!(?kind, %time, "bound set");
        self.emit_event(RulerEvent::BoundChanged {
            kind,
            time: Some(time),
        });

        let beyond = self
            .cursor_time()
            .is_some_and(|cursor| self.bounds.is_beyond(kind, cursor));
        if !beyond {
            return;
        }
        if matches!(self.motion, Motion::Dragging(_)) {
            // The pointer owns the cursor pixel; hold it at the bound in place.
            self.clamp_cursor_to_bounds();
            self.publish_time();
        } else {
            self.cancel_animation();
            self.seek_now(time);
        }
    }

    fn clear_bound(&mut self, kind: BoundKind) {
        if self.bounds.get(kind).is_none() {
            return;
        }
        self.bounds.clear(kind);
        self.sync_bound_markers();
        debug!(?kind, "bound cleared");
        self.emit_event(RulerEvent::BoundChanged { kind, time: None });
    }

    fn ensure_bound_marker(&mut self, kind: BoundKind) {
        let Some(mapper) = self.mapper() else {
            return;
        };
        let x = self.bounds.marker_x(kind, mapper);
        let Some(layout) = self.layout.as_mut() else {
            return;
        };
        let (slot, marker_kind) = match kind {
            BoundKind::Start => (&mut layout.start_marker, MarkerKind::StartBound),
            BoundKind::End => (&mut layout.end_marker, MarkerKind::EndBound),
        };
        if slot.is_none() {
            *slot = Some(self.surface.create_marker(marker_kind, x));
        }
    }
}
