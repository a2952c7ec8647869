//! Time-bounded linear tweens driven by frame timestamps.
//!
//! Both tweens start their clock on the first sampled frame, so a tween
//! created between frames never jumps ahead. A non-positive duration
//! finishes on the first sample.

/// Frame-time to progress mapping shared by the tweens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenClock {
    duration_ms: f64,
    started_at: Option<f64>,
}

impl TweenClock {
    #[must_use]
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            started_at: None,
        }
    }

    #[must_use]
    pub fn duration_ms(self) -> f64 {
        self.duration_ms
    }

    /// Returns `(percent, finished)` for the frame at `now_ms`.
    pub fn progress(&mut self, now_ms: f64) -> (f64, bool) {
        if self.duration_ms.is_nan() || self.duration_ms <= 0.0 || !now_ms.is_finite() {
            return (1.0, true);
        }
        let start = *self.started_at.get_or_insert(now_ms);
        if now_ms >= start + self.duration_ms {
            return (1.0, true);
        }
        (((now_ms - start) / self.duration_ms).max(0.0), false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenStep {
    pub dx: f64,
    pub finished: bool,
}

/// Animates a relative background displacement.
///
/// Each step applies only the difference between the target fraction and
/// what was already applied, so the steps always add up to `delta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetTween {
    delta: f64,
    applied: f64,
    clock: TweenClock,
}

impl OffsetTween {
    #[must_use]
    pub fn new(delta: f64, duration_ms: f64) -> Self {
        Self {
            delta,
            applied: 0.0,
            clock: TweenClock::new(duration_ms),
        }
    }

    #[must_use]
    pub fn delta(self) -> f64 {
        self.delta
    }

    #[must_use]
    pub fn applied(self) -> f64 {
        self.applied
    }

    pub fn step(&mut self, now_ms: f64) -> TweenStep {
        let (percent, finished) = self.clock.progress(now_ms);
        let target = if finished {
            self.delta
        } else {
            self.delta * percent
        };
        let dx = target - self.applied;
        self.applied = target;
        TweenStep { dx, finished }
    }
}

/// Animates the cursor pixel with straight linear interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorTween {
    from: f64,
    to: f64,
    clock: TweenClock,
}

impl CursorTween {
    #[must_use]
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            clock: TweenClock::new(duration_ms),
        }
    }

    #[must_use]
    pub fn target(self) -> f64 {
        self.to
    }

    /// Returns `(x, finished)`; the final sample is exactly the target.
    pub fn sample(&mut self, now_ms: f64) -> (f64, bool) {
        let (percent, finished) = self.clock.progress(now_ms);
        if finished {
            return (self.to, true);
        }
        (self.from + (self.to - self.from) * percent, false)
    }
}
