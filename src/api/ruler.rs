use chrono::NaiveDateTime;
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{GraduationCell, GraduationStrip, TimeBounds, Viewport};
use crate::error::RulerResult;
use crate::extensions::{RulerEvent, RulerObserver};
use crate::interaction::{CursorState, DragSession, MotionMode};
use crate::motion::{CancelToken, Completion, CursorTween, FrameScheduler, OffsetTween};
use crate::render::{CellVisual, ElementId, MarkerKind, RulerSurface};

use super::RulerOptions;
use super::validation::{ResolvedOptions, validate_ruler_options};

/// Surface elements and geometry that exist once the first layout completed.
pub(super) struct RulerLayout {
    pub strip: GraduationStrip,
    pub cell_elements: Vec<ElementId>,
    pub cursor_element: ElementId,
    pub cursor_x: f64,
    pub start_marker: Option<ElementId>,
    pub end_marker: Option<ElementId>,
}

/// In-flight programmatic motion.
pub(super) struct Animation {
    pub token: CancelToken,
    pub completion: Completion,
    pub offset: Option<OffsetTween>,
    pub cursor: Option<CursorTween>,
}

/// The single actor allowed to mutate offset and cursor.
pub(super) enum Motion {
    Idle,
    Dragging(DragSession),
    Animating(Animation),
}

/// Interactive hour ruler bound to a rendering surface.
///
/// Construction mounts the surface and returns immediately; the strip and
/// cursor are built on the first [`TimeRuler::poll_ready`] (or
/// [`TimeRuler::advance_frame`]) after the surface reports its layout as
/// ready. Every mutating call made before that is a no-op.
pub struct TimeRuler<S: RulerSurface> {
    pub(super) surface: S,
    pub(super) options: ResolvedOptions,
    pub(super) layout: Option<RulerLayout>,
    pub(super) bounds: TimeBounds,
    pub(super) motion: Motion,
    pub(super) scheduler: FrameScheduler,
    pub(super) observers: IndexMap<String, Box<dyn RulerObserver>>,
}

impl<S: RulerSurface> TimeRuler<S> {
    /// Validates `options` and mounts `surface`.
    ///
    /// Fails when the options are invalid or the surface cannot be mounted.
    pub fn new(mut surface: S, options: RulerOptions) -> RulerResult<Self> {
        let options = validate_ruler_options(&options)?;
        surface.mount(options.viewport, options.background)?;
        debug!(
            width = options.viewport.width,
            height = options.viewport.height,
            end_time = %options.end_time,
            "time ruler mounted"
        );
        surface.request_frame();

        Ok(Self {
            surface,
            options,
            layout: None,
            bounds: TimeBounds::default(),
            motion: Motion::Idle,
            scheduler: FrameScheduler::default(),
            observers: IndexMap::new(),
        })
    }

    /// Completes the first layout once the surface is ready.
    ///
    /// Returns `true` when the ruler is ready (now or earlier). Emits
    /// [`RulerEvent::Ready`] followed by the initial time update exactly once.
    pub fn poll_ready(&mut self) -> bool {
        if self.layout.is_some() {
            return true;
        }
        if !self.surface.is_ready() {
            self.surface.request_frame();
            return false;
        }

        let strip = match GraduationStrip::new(self.options.viewport, self.options.end_time) {
            Ok(strip) => strip,
            Err(err) => {
                warn!(error = %err, "cannot lay out ruler strip");
                return false;
            }
        };
        let cell_elements = strip
            .cells()
            .iter()
            .map(|cell| {
                let visual =
                    CellVisual::new(cell, self.options.stroke, &self.options.label_formats);
                self.surface.create_cell(&visual)
            })
            .collect();
        let cursor_x = self.options.viewport.center_x();
        let cursor_element = self.surface.create_marker(MarkerKind::Cursor, cursor_x);

        self.layout = Some(RulerLayout {
            strip,
            cell_elements,
            cursor_element,
            cursor_x,
            start_marker: None,
            end_marker: None,
        });
        debug!(cells = self.cell_count(), "time ruler ready");
        self.emit_event(RulerEvent::Ready);
        self.publish_time();
        true
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.layout.is_some()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.options.viewport
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    #[must_use]
    pub fn motion_mode(&self) -> MotionMode {
        match self.motion {
            Motion::Idle => MotionMode::Idle,
            Motion::Dragging(_) => MotionMode::Dragging,
            Motion::Animating(_) => MotionMode::Animating,
        }
    }

    #[must_use]
    pub fn cursor_state(&self) -> CursorState {
        match &self.motion {
            Motion::Dragging(session) => session.cursor_state(),
            Motion::Idle | Motion::Animating(_) => CursorState::Normal,
        }
    }

    /// Cursor pixel, `None` before readiness.
    #[must_use]
    pub fn cursor_x(&self) -> Option<f64> {
        self.layout.as_ref().map(|layout| layout.cursor_x)
    }

    /// Time under the cursor pixel.
    #[must_use]
    pub fn cursor_time(&self) -> Option<NaiveDateTime> {
        self.layout
            .as_ref()
            .and_then(|layout| layout.strip.mapper().time_at(layout.cursor_x))
    }

    #[must_use]
    pub fn time_at(&self, pixel_x: f64) -> Option<NaiveDateTime> {
        self.layout
            .as_ref()
            .and_then(|layout| layout.strip.mapper().time_at(pixel_x))
    }

    /// Pixel of `time`, `None` when it is off-screen or before readiness.
    #[must_use]
    pub fn pixel_at(&self, time: NaiveDateTime) -> Option<f64> {
        self.layout
            .as_ref()
            .and_then(|layout| layout.strip.mapper().pixel_at(time))
    }

    #[must_use]
    pub fn visible_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.layout
            .as_ref()
            .and_then(|layout| layout.strip.mapper().visible_range())
    }

    #[must_use]
    pub fn background_offset(&self) -> Option<f64> {
        self.layout
            .as_ref()
            .map(|layout| layout.strip.background_offset())
    }

    /// Cumulative background displacement since the ruler became ready.
    #[must_use]
    pub fn total_shift(&self) -> Option<f64> {
        self.layout.as_ref().map(|layout| layout.strip.total_shift())
    }

    #[must_use]
    pub fn cells(&self) -> &[GraduationCell] {
        self.layout
            .as_ref()
            .map(|layout| layout.strip.cells())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells().len()
    }
}
