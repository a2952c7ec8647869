use tracing::debug;

use crate::error::{RulerError, RulerResult};
use crate::extensions::RulerObserver;
use crate::render::RulerSurface;

use super::TimeRuler;

impl<S: RulerSurface> TimeRuler<S> {
    /// Registers an observer with a unique identifier.
    ///
    /// Observers registered before readiness receive the `Ready` event.
    pub fn register_observer(&mut self, observer: Box<dyn RulerObserver>) -> RulerResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(RulerError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.observers.contains_key(&observer_id) {
            return Err(RulerError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        debug!(observer_id = %observer_id, "observer registered");
        self.observers.insert(observer_id, observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        self.observers.shift_remove(observer_id).is_some()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers.contains_key(observer_id)
    }
}
