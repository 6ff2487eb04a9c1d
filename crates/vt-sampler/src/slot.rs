//! `SamplerSlot` — the process's one sampler, owned by the composition root.
//!
//! The slot is created once at startup and cloned into whatever needs the
//! sampler (the main loop, lifecycle observers, the exit hook).  Clones share
//! the same inner `Mutex`, which also serializes ticks against export if the
//! host calls in from more than one thread.
//!
//! A sampler leaves the slot when it terminates ([`cleanup`](SamplerSlot::cleanup)
//! or [`shutdown`](SamplerSlot::shutdown)); a new one may then be installed.
//!
//! [`request_cleanup`](SamplerSlot::request_cleanup) never blocks.  If the
//! slot is busy (say, the last entity left from inside [`with`](SamplerSlot::with)),
//! the cleanup runs when that call returns, or at the next slot operation.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use vt_core::Clock;
use vt_zone::ZoneSet;

use crate::{EntitySource, PositionSampler, TickReport};

type Guard<'a, C> = MutexGuard<'a, Option<PositionSampler<C>>>;

pub struct SamplerSlot<C: Clock> {
    inner:           Arc<Mutex<Option<PositionSampler<C>>>>,
    cleanup_pending: Arc<AtomicBool>,
}

impl<C: Clock> Clone for SamplerSlot<C> {
    fn clone(&self) -> Self {
        Self {
            inner:           Arc::clone(&self.inner),
            cleanup_pending: Arc::clone(&self.cleanup_pending),
        }
    }
}

impl<C: Clock> Default for SamplerSlot<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SamplerSlot<C> {
    /// An empty slot.
    pub fn new() -> Self {
        Self {
            inner:           Arc::new(Mutex::new(None)),
            cleanup_pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Put `sampler` in the slot.  If one is already there, `sampler` is
    /// handed back unchanged and the existing one stays.
    pub fn install(&self, sampler: PositionSampler<C>) -> Result<(), PositionSampler<C>> {
        let mut guard = self.lock();
        if guard.is_some() {
            tracing::warn!("a position sampler is already installed; keeping the existing one");
            return Err(sampler);
        }
        *guard = Some(sampler);
        Ok(())
    }

    /// `true` while a sampler is installed.
    pub fn is_live(&self) -> bool {
        self.lock().is_some()
    }

    /// Run `f` against the installed sampler.  `None` if the slot is empty.
    ///
    /// A cleanup requested while `f` runs is applied before the lock is
    /// released.
    pub fn with<R>(&self, f: impl FnOnce(&mut PositionSampler<C>) -> R) -> Option<R> {
        let mut guard = self.lock();
        let out = guard.as_mut().map(f);
        self.settle(&mut guard);
        out
    }

    /// Forward to [`PositionSampler::pump`].
    pub fn pump<E>(&self, entities: &E, zones: &ZoneSet) -> Option<TickReport>
    where
        E: EntitySource + ?Sized,
    {
        self.with(|s| s.pump(entities, zones)).flatten()
    }

    /// Clean up and release the installed sampler, if any.  Idempotent.
    pub fn cleanup(&self) {
        if let Some(mut sampler) = self.lock().take() {
            sampler.cleanup();
        }
    }

    /// Like [`cleanup`](Self::cleanup), but never blocks.  If the slot is
    /// held elsewhere the cleanup is deferred: `with` applies it before
    /// releasing the lock, and every other slot operation applies it on entry.
    pub fn request_cleanup(&self) {
        let mut guard = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(e)) => e.into_inner(),
            Err(TryLockError::WouldBlock) => {
                self.cleanup_pending.store(true, Ordering::SeqCst);
                tracing::debug!("slot busy; sampler cleanup deferred");
                return;
            }
        };
        self.cleanup_pending.store(true, Ordering::SeqCst);
        self.settle(&mut guard);
    }

    /// Process-exit hook: shut down and release the installed sampler.
    /// Returns the summary path if one was written.
    pub fn shutdown(&self) -> Option<PathBuf> {
        let mut sampler = self.lock().take()?;
        sampler.shutdown()
    }

    fn lock(&self) -> Guard<'_, C> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        self.settle(&mut guard);
        guard
    }

    /// Apply a deferred cleanup, if one was requested.
    fn settle(&self, guard: &mut Guard<'_, C>) {
        if self.cleanup_pending.swap(false, Ordering::SeqCst) {
            if let Some(mut sampler) = guard.take() {
                sampler.cleanup();
            }
        }
    }
}
