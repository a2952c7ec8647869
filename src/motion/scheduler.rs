use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Shared cancellation flag handed to every frame-scheduled task.
///
/// Clones observe the same flag. A task checks it on each tick and drops
/// itself once cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }

    #[must_use]
    pub fn same_task(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionState {
    Pending,
    Finished,
    Cancelled,
}

/// Awaitable handle for an animated operation.
///
/// The ruler settles it when the animation reaches its target
/// (`Finished`) or is superseded (`Cancelled`). Settling is one-shot.
#[derive(Debug, Clone)]
pub struct Completion(Rc<Cell<CompletionState>>);

impl Completion {
    #[must_use]
    pub(crate) fn pending() -> Self {
        Self(Rc::new(Cell::new(CompletionState::Pending)))
    }

    #[must_use]
    pub(crate) fn finished() -> Self {
        Self(Rc::new(Cell::new(CompletionState::Finished)))
    }

    #[must_use]
    pub(crate) fn cancelled() -> Self {
        Self(Rc::new(Cell::new(CompletionState::Cancelled)))
    }

    #[must_use]
    pub fn state(&self) -> CompletionState {
        self.0.get()
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.state() != CompletionState::Pending
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state() == CompletionState::Finished
    }

    pub(crate) fn settle(&self, state: CompletionState) {
        if self.0.get() == CompletionState::Pending {
            self.0.set(state);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameJob {
    AutoScroll,
    Animation,
}

#[derive(Debug, Clone)]
pub struct ScheduledTick {
    pub job: FrameJob,
    pub token: CancelToken,
}

/// Ticks waiting for the next rendered frame.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: SmallVec<[ScheduledTick; 2]>,
}

impl FrameScheduler {
    /// Queues a tick for the next frame.
    ///
    /// Returns `true` when the queue was empty, i.e. the host must be asked
    /// for a new frame.
    pub fn schedule(&mut self, job: FrameJob, token: &CancelToken) -> bool {
        let was_idle = self.pending.is_empty();
        let duplicate = self
            .pending
            .iter()
            .any(|tick| tick.job == job && tick.token.same_task(token));
        if !duplicate {
            self.pending.push(ScheduledTick {
                job,
                token: token.clone(),
            });
        }
        was_idle
    }

    /// Drains the queue, discarding ticks whose token was cancelled.
    pub fn take_due(&mut self) -> SmallVec<[ScheduledTick; 2]> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .filter(|tick| !tick.token.is_cancelled())
            .collect()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.iter().all(|tick| tick.token.is_cancelled())
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
