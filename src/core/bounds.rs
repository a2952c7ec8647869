use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::mapper::CoordinateMapper;

/// Pixel used for boundary markers whose time is outside the visible window.
pub const PARKED_MARKER_X: f64 = -10_000.0;

/// Slack for a bound carried exactly onto a viewport edge.
const EDGE_EPSILON_PX: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundKind {
    Start,
    End,
}

/// Optional inclusive calendar limits for cursor and scroll range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeBounds {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl TimeBounds {
    #[must_use]
    pub fn start(self) -> Option<NaiveDateTime> {
        self.start
    }

    #[must_use]
    pub fn end(self) -> Option<NaiveDateTime> {
        self.end
    }

    #[must_use]
    pub fn get(self, kind: BoundKind) -> Option<NaiveDateTime> {
        match kind {
            BoundKind::Start => self.start,
            BoundKind::End => self.end,
        }
    }

    /// Sets or replaces one bound.
    ///
    /// Returns `false` (and leaves the bounds untouched) when the new value
    /// would invert the range.
    pub fn set(&mut self, kind: BoundKind, time: NaiveDateTime) -> bool {
        let inverted = match kind {
            BoundKind::Start => self.end.is_some_and(|end| time > end),
            BoundKind::End => self.start.is_some_and(|start| time < start),
        };
        if inverted {
            return false;
        }
        match kind {
            BoundKind::Start => self.start = Some(time),
            BoundKind::End => self.end = Some(time),
        }
        true
    }

    pub fn clear(&mut self, kind: BoundKind) {
        match kind {
            BoundKind::Start => self.start = None,
            BoundKind::End => self.end = None,
        }
    }

    #[must_use]
    pub fn clamp_time(self, time: NaiveDateTime) -> NaiveDateTime {
        let mut clamped = time;
        if let Some(start) = self.start {
            clamped = clamped.max(start);
        }
        if let Some(end) = self.end {
            clamped = clamped.min(end);
        }
        clamped
    }

    /// `true` when `time` lies past the given bound.
    #[must_use]
    pub fn is_beyond(self, kind: BoundKind, time: NaiveDateTime) -> bool {
        match kind {
            BoundKind::Start => self.start.is_some_and(|start| time < start),
            BoundKind::End => self.end.is_some_and(|end| time > end),
        }
    }

    /// The bound `time` lies past, if any.
    #[must_use]
    pub fn crossed(self, time: NaiveDateTime) -> Option<(BoundKind, NaiveDateTime)> {
        [BoundKind::Start, BoundKind::End]
            .into_iter()
            .find(|kind| self.is_beyond(*kind, time))
            .and_then(|kind| self.get(kind).map(|bound| (kind, bound)))
    }

    /// Line pixel of a bound, visible or not. `None` when unset.
    #[must_use]
    pub fn line_x(self, kind: BoundKind, mapper: CoordinateMapper) -> Option<f64> {
        self.get(kind).map(|time| mapper.line_x(time))
    }

    /// `true` once the bound sits at or inside the viewport edge it guards,
    /// so scrolling further in that direction would carry it past the edge.
    #[must_use]
    pub fn reached(self, kind: BoundKind, mapper: CoordinateMapper) -> bool {
        self.line_x(kind, mapper).is_some_and(|x| match kind {
            BoundKind::Start => x >= -EDGE_EPSILON_PX,
            BoundKind::End => x <= mapper.viewport().width_px() + EDGE_EPSILON_PX,
        })
    }

    /// Pixel of a bound, `None` when unset or currently off-screen.
    #[must_use]
    pub fn project(self, kind: BoundKind, mapper: CoordinateMapper) -> Option<f64> {
        let width = mapper.viewport().width_px();
        self.line_x(kind, mapper)
            .filter(|x| (-EDGE_EPSILON_PX..=width + EDGE_EPSILON_PX).contains(x))
            .map(|x| x.clamp(0.0, width))
    }

    /// Marker position for a bound: projected pixel or the parked sentinel.
    #[must_use]
    pub fn marker_x(self, kind: BoundKind, mapper: CoordinateMapper) -> f64 {
        self.project(kind, mapper).unwrap_or(PARKED_MARKER_X)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::core::types::Viewport;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .expect("valid fixture")
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let mut bounds = TimeBounds::default();
        assert!(bounds.set(BoundKind::End, at(10)));
        assert!(!bounds.set(BoundKind::Start, at(11)));
        assert_eq!(bounds.start(), None);
        assert!(bounds.set(BoundKind::Start, at(10)));
        assert_eq!(bounds.clamp_time(at(12)), at(10));
        assert_eq!(bounds.clamp_time(at(9)), at(10));
    }

    #[test]
    fn beyond_checks_are_strict() {
        let mut bounds = TimeBounds::default();
        bounds.set(BoundKind::End, at(10));
        assert!(bounds.is_beyond(BoundKind::End, at(11)));
        assert!(!bounds.is_beyond(BoundKind::End, at(10)));
        assert!(!bounds.is_beyond(BoundKind::Start, at(0)));
        bounds.clear(BoundKind::End);
        assert!(!bounds.is_beyond(BoundKind::End, at(23)));
    }

    #[test]
    fn crossed_reports_the_violated_bound() {
        let mut bounds = TimeBounds::default();
        bounds.set(BoundKind::Start, at(8));
        bounds.set(BoundKind::End, at(10));
        assert_eq!(bounds.crossed(at(9)), None);
        assert_eq!(bounds.crossed(at(7)), Some((BoundKind::Start, at(8))));
        assert_eq!(bounds.crossed(at(11)), Some((BoundKind::End, at(10))));
    }

    #[test]
    fn reached_counts_bounds_past_the_edge() {
        // Leading anchor 00:00 at -36 px: one hour is 36 px, 01:00 sits at 0.
        let viewport = Viewport::new(720, 40);
        let mapper = CoordinateMapper::new(at(0), 0.0, viewport);
        let mut bounds = TimeBounds::default();
        assert!(!bounds.reached(BoundKind::Start, mapper));

        bounds.set(BoundKind::Start, at(0));
        assert!(!bounds.reached(BoundKind::Start, mapper));
        bounds.set(BoundKind::Start, at(1));
        assert!(bounds.reached(BoundKind::Start, mapper));
        bounds.set(BoundKind::Start, at(5));
        assert!(bounds.reached(BoundKind::Start, mapper));
        assert_eq!(bounds.project(BoundKind::Start, mapper), Some(144.0));

        bounds.set(BoundKind::End, at(23));
        assert!(!bounds.reached(BoundKind::End, mapper));
        assert_eq!(bounds.project(BoundKind::End, mapper), None);
        bounds.set(BoundKind::End, at(21));
        assert!(bounds.reached(BoundKind::End, mapper));
        bounds.set(BoundKind::End, at(6));
        assert!(bounds.reached(BoundKind::End, mapper));
    }
}
