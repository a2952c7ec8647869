mod auto_scroll;

pub use auto_scroll::AutoScrollRun;

use serde::{Deserialize, Serialize};

/// Which single actor currently owns the background offset and cursor pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionMode {
    Idle,
    Dragging,
    Animating,
}

/// Drag sub-state: `Back`/`Forward` mean the pointer is held past the left
/// or right viewport edge and the background scrolls continuously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorState {
    #[default]
    Normal,
    Back,
    Forward,
}

impl CursorState {
    /// Background shift sign while auto-scrolling: back reveals earlier time.
    #[must_use]
    pub fn scroll_sign(self) -> Option<f64> {
        match self {
            Self::Normal => None,
            Self::Back => Some(1.0),
            Self::Forward => Some(-1.0),
        }
    }
}

/// Bounds already at or inside the viewport edge they guard. A reached
/// bound blocks auto-scroll in its direction, whether it is on-screen or
/// the window has been carried past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeGuards {
    pub start_reached: bool,
    pub end_reached: bool,
}

impl EdgeGuards {
    /// Whether scrolling in `direction` is blocked.
    #[must_use]
    pub fn blocks(self, direction: CursorState) -> bool {
        match direction {
            CursorState::Back => self.start_reached,
            CursorState::Forward => self.end_reached,
            CursorState::Normal => true,
        }
    }
}

/// Resolves the drag state after a pointer move to viewport-relative `x`.
#[must_use]
pub fn next_cursor_state(
    current: CursorState,
    x: f64,
    viewport_width: f64,
    guards: EdgeGuards,
) -> CursorState {
    let mut state = current;
    if state == CursorState::Normal {
        if x < 0.0 && !guards.blocks(CursorState::Back) {
            state = CursorState::Back;
        } else if x > viewport_width && !guards.blocks(CursorState::Forward) {
            state = CursorState::Forward;
        }
    }
    if x > 0.0 && x < viewport_width {
        state = CursorState::Normal;
    }
    state
}

/// State captured between pointer-down and pointer-up.
#[derive(Debug, Clone)]
pub struct DragSession {
    viewport_left: f64,
    cursor_state: CursorState,
    auto_scroll: Option<AutoScrollRun>,
}

impl DragSession {
    #[must_use]
    pub fn new(viewport_left: f64) -> Self {
        Self {
            viewport_left,
            cursor_state: CursorState::Normal,
            auto_scroll: None,
        }
    }

    #[must_use]
    pub fn viewport_left(&self) -> f64 {
        self.viewport_left
    }

    /// Converts a client-space pointer x into viewport space.
    #[must_use]
    pub fn relative_x(&self, client_x: f64) -> f64 {
        client_x - self.viewport_left
    }

    #[must_use]
    pub fn cursor_state(&self) -> CursorState {
        self.cursor_state
    }

    #[must_use]
    pub fn auto_scroll(&self) -> Option<&AutoScrollRun> {
        self.auto_scroll.as_ref()
    }

    pub fn auto_scroll_mut(&mut self) -> Option<&mut AutoScrollRun> {
        self.auto_scroll.as_mut()
    }

    /// Enters `Back`/`Forward` with a fresh run, returning it for scheduling.
    pub fn start_auto_scroll(&mut self, state: CursorState) -> Option<&AutoScrollRun> {
        state.scroll_sign()?;
        self.stop_auto_scroll();
        self.cursor_state = state;
        self.auto_scroll = Some(AutoScrollRun::new(state));
        self.auto_scroll.as_ref()
    }

    /// Returns to `Normal`, cancelling any run. Returns `true` if one was active.
    pub fn stop_auto_scroll(&mut self) -> bool {
        self.cursor_state = CursorState::Normal;
        match self.auto_scroll.take() {
            Some(run) => {
                run.token().cancel();
                true
            }
            None => false,
        }
    }
}
