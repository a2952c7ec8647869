use crate::interaction::CursorState;
use crate::motion::CancelToken;

/// One continuous edge-scroll run, from activation until the pointer
/// returns inside the viewport, a bound becomes visible, or the drag ends.
#[derive(Debug, Clone)]
pub struct AutoScrollRun {
    direction: CursorState,
    token: CancelToken,
    last_frame_ms: Option<f64>,
}

impl AutoScrollRun {
    #[must_use]
    pub fn new(direction: CursorState) -> Self {
        Self {
            direction,
            token: CancelToken::new(),
            last_frame_ms: None,
        }
    }

    #[must_use]
    pub fn direction(&self) -> CursorState {
        self.direction
    }

    #[must_use]
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    #[must_use]
    pub fn last_frame_ms(&self) -> Option<f64> {
        self.last_frame_ms
    }

    /// Background shift for the frame at `now_ms`.
    ///
    /// The first frame of a run only records its timestamp and returns `None`.
    pub fn advance(&mut self, now_ms: f64, speed_px_per_ms: f64) -> Option<f64> {
        let sign = self.direction.scroll_sign()?;
        let previous = self.last_frame_ms.replace(now_ms)?;
        let elapsed = (now_ms - previous).max(0.0);
        Some(sign * elapsed * speed_px_per_ms)
    }
}
