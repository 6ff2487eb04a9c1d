//! Entity presence counting and last-one-out cleanup.
//!
//! Each tracked entity holds an [`EntityPresence`] for as long as it lives.
//! When the last presence drops, the slot's sampler is cleaned up so it does
//! not outlive the session it was observing.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use vt_core::Clock;

use crate::SamplerSlot;

/// Shared counter of live entities, tied to a [`SamplerSlot`].
pub struct LifecycleTracker<C: Clock> {
    active: Arc<AtomicUsize>,
    slot:   SamplerSlot<C>,
}

impl<C: Clock> Clone for LifecycleTracker<C> {
    fn clone(&self) -> Self {
        Self {
            active: Arc::clone(&self.active),
            slot:   self.slot.clone(),
        }
    }
}

impl<C: Clock> LifecycleTracker<C> {
    pub fn new(slot: SamplerSlot<C>) -> Self {
        Self {
            active: Arc::new(AtomicUsize::new(0)),
            slot,
        }
    }

    /// Register a newly spawned entity.  Keep the returned guard alive with
    /// the entity; dropping it counts the entity as gone.
    pub fn attach(&self, name: impl Into<String>) -> EntityPresence<C> {
        let name = name.into();
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(entity = %name, active = now_active, "entity joined");
        EntityPresence { name, tracker: self.clone() }
    }

    /// Entities currently attached.
    pub fn active_count(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// Proof that one entity is alive.  Dropping it detaches the entity.
pub struct EntityPresence<C: Clock> {
    name:    String,
    tracker: LifecycleTracker<C>,
}

impl<C: Clock> EntityPresence<C> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<C: Clock> Drop for EntityPresence<C> {
    fn drop(&mut self) {
        let remaining = self.tracker.active.fetch_sub(1, Ordering::SeqCst) - 1;
        tracing::info!(entity = %self.name, active = remaining, "entity left");
        if remaining == 0 {
            self.tracker.slot.request_cleanup();
        }
    }
}
