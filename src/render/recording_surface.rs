use chrono::NaiveDateTime;
use indexmap::IndexMap;

use crate::core::Viewport;
use crate::error::{RulerError, RulerResult};
use crate::render::{CellLabels, CellVisual, Color, ElementId, MarkerKind, RulerSurface};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedElement {
    Cell {
        anchor_time: NaiveDateTime,
        labels: CellLabels,
        stroke: Color,
        x: f64,
        relabel_count: usize,
    },
    Marker {
        kind: MarkerKind,
        x: f64,
    },
}

impl RecordedElement {
    #[must_use]
    pub fn x(&self) -> f64 {
        match self {
            Self::Cell { x, .. } | Self::Marker { x, .. } => *x,
        }
    }
}

/// Headless surface used by tests, benches and host-side snapshots.
///
/// It records every element and position instead of drawing, and lets the
/// caller control mount failures and when layout completes.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    mountable: bool,
    ready_on_mount: bool,
    ready: bool,
    mounted: Option<(Viewport, Color)>,
    viewport_left: f64,
    viewport_top: f64,
    elements: IndexMap<ElementId, RecordedElement>,
    next_id: u32,
    pub frame_requests: usize,
}

impl RecordingSurface {
    /// Surface that becomes ready as soon as it is mounted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mountable: true,
            ready_on_mount: true,
            ..Self::default()
        }
    }

    /// Surface whose layout completes only after [`Self::complete_layout`].
    #[must_use]
    pub fn deferred() -> Self {
        Self {
            mountable: true,
            ready_on_mount: false,
            ..Self::default()
        }
    }

    /// Surface standing in for a container that cannot be resolved.
    #[must_use]
    pub fn unmountable() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_viewport_left(mut self, left: f64) -> Self {
        self.viewport_left = left;
        self
    }

    #[must_use]
    pub fn with_viewport_top(mut self, top: f64) -> Self {
        self.viewport_top = top;
        self
    }

    pub fn complete_layout(&mut self) {
        if self.mounted.is_some() {
            self.ready = true;
        }
    }

    #[must_use]
    pub fn mounted(&self) -> Option<(Viewport, Color)> {
        self.mounted
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&RecordedElement> {
        self.elements.get(&id)
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Cells in creation order.
    pub fn cells(&self) -> impl Iterator<Item = (ElementId, &RecordedElement)> {
        self.elements
            .iter()
            .filter(|(_, element)| matches!(element, RecordedElement::Cell { .. }))
            .map(|(id, element)| (*id, element))
    }

    #[must_use]
    pub fn marker(&self, kind: MarkerKind) -> Option<&RecordedElement> {
        self.elements.values().find(
            |element| matches!(element, RecordedElement::Marker { kind: k, .. } if *k == kind),
        )
    }

    fn allocate(&mut self, element: RecordedElement) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, element);
        id
    }
}

impl RulerSurface for RecordingSurface {
    fn mount(&mut self, viewport: Viewport, background: Color) -> RulerResult<()> {
        if !self.mountable {
            return Err(RulerError::UnmountableContainer(
                "recording surface was created without a container".to_owned(),
            ));
        }
        self.mounted = Some((viewport, background));
        self.ready = self.ready_on_mount;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn create_cell(&mut self, cell: &CellVisual) -> ElementId {
        self.allocate(RecordedElement::Cell {
            anchor_time: cell.anchor_time,
            labels: cell.labels.clone(),
            stroke: cell.stroke,
            x: cell.origin_x,
            relabel_count: 0,
        })
    }

    fn update_cell(&mut self, id: ElementId, anchor_time: NaiveDateTime, labels: &CellLabels) {
        if let Some(RecordedElement::Cell {
            anchor_time: current_anchor,
            labels: current,
            relabel_count,
            ..
        }) = self.elements.get_mut(&id)
        {
            *current_anchor = anchor_time;
            *current = labels.clone();
            *relabel_count += 1;
        }
    }

    fn create_marker(&mut self, kind: MarkerKind, x: f64) -> ElementId {
        self.allocate(RecordedElement::Marker { kind, x })
    }

    fn set_element_x(&mut self, id: ElementId, x: f64) {
        match self.elements.get_mut(&id) {
            Some(RecordedElement::Cell { x: current, .. })
            | Some(RecordedElement::Marker { x: current, .. }) => *current = x,
            None => {}
        }
    }

    fn viewport_left(&self) -> f64 {
        self.viewport_left
    }

    fn viewport_top(&self) -> f64 {
        self.viewport_top
    }

    fn request_frame(&mut self) {
        self.frame_requests += 1;
    }
}
