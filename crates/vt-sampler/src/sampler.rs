//! The `PositionSampler` and its lifecycle.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use vt_core::time::format_wall_clock;
use vt_core::{AppPaths, Clock, EntityHandle, EntityId, SamplerConfig};
use vt_output::{
    RawLog, SampleRecord, ensure_dir_or_fallback, resolve_output_dir, timestamped_file,
    write_summary_csv,
};
use vt_track::{DwellAccumulator, DwellSnapshot, ExclusionPolicy, IdentityRegistry};
use vt_zone::ZoneSet;

use crate::{EntitySource, SamplerError, SamplerResult, StopHandle, Ticker, Trackable};

// ── State ─────────────────────────────────────────────────────────────────────

/// Lifecycle of one sampler.
///
/// ```text
/// Uninitialized ──start()──▶ Active ──cleanup()──────────────▶ Terminated
///                              └────shutdown()──▶ ShuttingDown ──▶ Terminated
/// ```
///
/// There is no way back to `Active` from `Terminated`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SamplerState {
    Uninitialized,
    Active,
    ShuttingDown,
    Terminated,
}

// ── Tick output ───────────────────────────────────────────────────────────────

/// What one tick did.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub sim_secs:     f64,
    /// Ids sampled this tick, in enumeration order.
    pub entity_ids:   Vec<EntityId>,
    pub rows_written: usize,
    /// Rows that could not be appended to the raw log.  Not retried.
    pub rows_failed:  usize,
}

/// The samples of one tick, kept in memory for the session.
#[derive(Clone, Debug, PartialEq)]
pub struct TickFrame {
    pub sim_secs: f64,
    pub records:  Vec<SampleRecord>,
}

// ── PositionSampler ───────────────────────────────────────────────────────────

/// Periodically records every live entity's position and zone.
///
/// `PositionSampler<C>` owns the identity registry, the dwell accumulator,
/// and the raw log.  The host drives it by calling [`pump`](Self::pump) from
/// its main loop; the sampler decides, from `C`'s sim clock, when a tick is
/// due.
///
/// One sampler per process: keep it in a [`SamplerSlot`][crate::SamplerSlot]
/// owned by the composition root.
pub struct PositionSampler<C: Clock> {
    config:       SamplerConfig,
    paths:        AppPaths,
    clock:        C,
    state:        SamplerState,
    stop:         StopHandle,
    ticker:       Ticker,
    identities:   IdentityRegistry,
    dwell:        DwellAccumulator,
    history:      Vec<TickFrame>,
    output_dir:   Option<PathBuf>,
    raw_log:      Option<RawLog>,
    summary_path: Option<PathBuf>,
    started_at:   Option<NaiveDateTime>,
}

impl<C: Clock> PositionSampler<C> {
    /// Build an idle sampler.  Nothing touches the disk until
    /// [`start`](Self::start).
    pub fn new(config: SamplerConfig, paths: AppPaths, clock: C) -> Self {
        let policy = ExclusionPolicy::new(config.excluded_name_fragments.iter().cloned());
        Self {
            ticker:       Ticker::new(config.sampling_interval_secs),
            config,
            paths,
            clock,
            state:        SamplerState::Uninitialized,
            stop:         StopHandle::new(),
            identities:   IdentityRegistry::new(policy),
            dwell:        DwellAccumulator::new(),
            history:      Vec::new(),
            output_dir:   None,
            raw_log:      None,
            summary_path: None,
            started_at:   None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Resolve the output directory, create the raw log with its header, and
    /// begin ticking.
    ///
    /// A second call while active does nothing.  Directory and header
    /// failures are logged and recovered from; only an invalid configuration
    /// is returned as an error, and then the sampler stays idle.
    ///
    /// # Errors
    ///
    /// - [`SamplerError::Config`] if the config fails validation.
    /// - [`SamplerError::Terminated`] if this sampler was already shut down.
    pub fn start(&mut self) -> SamplerResult<()> {
        match self.state {
            SamplerState::Active => return Ok(()),
            SamplerState::ShuttingDown | SamplerState::Terminated => {
                return Err(SamplerError::Terminated);
            }
            SamplerState::Uninitialized => {}
        }

        if let Err(e) = self.config.validate() {
            tracing::error!(error = %e, "refusing to start position sampler");
            return Err(e.into());
        }

        let dir = self.prepare_output_dir();
        let started_at = self.clock.wall_now();
        let raw_log = RawLog::new(timestamped_file(&dir, &self.config.raw_log_prefix, started_at));
        if let Err(e) = raw_log.write_header() {
            tracing::error!(path = %raw_log.path().display(), error = %e, "failed to create raw log");
        }

        self.summary_path = Some(timestamped_file(&dir, &self.config.summary_log_prefix, started_at));
        tracing::info!(
            raw_log = %raw_log.path().display(),
            interval_secs = self.config.sampling_interval_secs,
            "position sampler started"
        );

        self.raw_log = Some(raw_log);
        self.started_at = Some(started_at);
        self.output_dir = Some(dir);
        self.ticker = Ticker::new(self.config.sampling_interval_secs);
        self.state = SamplerState::Active;
        Ok(())
    }

    /// Point future output at `new_output_dir` (same resolution rules as the
    /// config).  The already-open raw log keeps its path; the summary, not
    /// yet written, moves to the new directory.
    ///
    /// Before [`start`](Self::start) only the config changes; nothing is
    /// created on disk until the sampler starts.
    pub fn reconfigure(&mut self, new_output_dir: impl Into<PathBuf>) {
        if self.state == SamplerState::Terminated {
            tracing::warn!("ignoring reconfigure on a terminated sampler");
            return;
        }

        self.config.output_dir = Some(new_output_dir.into());
        if self.state == SamplerState::Uninitialized {
            tracing::info!("output directory set; created on start");
            return;
        }

        let dir = self.prepare_output_dir();
        if let Some(started_at) = self.started_at {
            self.summary_path = Some(timestamped_file(&dir, &self.config.summary_log_prefix, started_at));
        }
        tracing::info!(dir = %dir.display(), "output directory updated");
        self.output_dir = Some(dir);
    }

    /// Stop ticking and drop identity and sample caches without exporting a
    /// summary.  Idempotent.
    pub fn cleanup(&mut self) {
        if self.state == SamplerState::Terminated {
            return;
        }
        self.stop.stop();
        self.identities.clear();
        self.history.clear();
        self.state = SamplerState::Terminated;
        tracing::info!("position sampler cleaned up");
    }

    /// Process-exit hook: stop ticking, write the dwell-time summary, and
    /// terminate.  Returns the summary path if one was written.
    pub fn shutdown(&mut self) -> Option<PathBuf> {
        match self.state {
            SamplerState::Terminated | SamplerState::ShuttingDown => return None,
            SamplerState::Uninitialized => {
                self.state = SamplerState::Terminated;
                return None;
            }
            SamplerState::Active => {}
        }

        self.state = SamplerState::ShuttingDown;
        self.stop.stop();
        let written = self.export_summary();
        if let Some(raw) = &self.raw_log {
            tracing::info!(raw_log = %raw.path().display(), "position sampler shut down");
        }
        self.state = SamplerState::Terminated;
        written
    }

    // ── Ticking ───────────────────────────────────────────────────────────

    /// Record a tick if one is due.  Call from the host loop as often as
    /// convenient.
    ///
    /// Returns `None` when not active, stopped, or not yet due.
    pub fn pump<E>(&mut self, entities: &E, zones: &ZoneSet) -> Option<TickReport>
    where
        E: EntitySource + ?Sized,
    {
        if !self.is_ticking() {
            return None;
        }
        if !self.ticker.poll(self.clock.sim_secs()) {
            return None;
        }
        Some(self.record_tick(entities, zones))
    }

    fn record_tick<E>(&mut self, entities: &E, zones: &ZoneSet) -> TickReport
    where
        E: EntitySource + ?Sized,
    {
        let now = self.clock.sim_secs();
        let wall_clock = format_wall_clock(self.clock.wall_now());

        let identities = &mut self.identities;
        let dwell = &mut self.dwell;
        let mut records: Vec<SampleRecord> = Vec::new();

        entities.for_each_entity(&mut |entity: &dyn Trackable| {
            let Some(id) = identities.resolve(entity.handle(), entity.name()) else {
                return;
            };
            let position = entity.world_position();
            let zone = zones.zone_name_at(position);
            dwell.update(id, zone, now);
            records.push(SampleRecord::new(id, position, now, wall_clock.as_str(), zone));
        });

        let mut rows_written = 0;
        let mut rows_failed = 0;
        if let Some(raw) = &self.raw_log {
            for record in &records {
                match raw.append(record) {
                    Ok(()) => rows_written += 1,
                    Err(e) => {
                        rows_failed += 1;
                        tracing::error!(entity = %record.entity_id, error = %e, "failed to append sample row");
                    }
                }
            }
        }

        let entity_ids: Vec<EntityId> = records.iter().map(|r| r.entity_id).collect();
        let id_list = entity_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(
            wall_clock = %wall_clock,
            entities = entity_ids.len(),
            ids = %id_list,
            "recorded entity positions"
        );

        self.history.push(TickFrame { sim_secs: now, records });
        TickReport { sim_secs: now, entity_ids, rows_written, rows_failed }
    }

    // ── Summary export ────────────────────────────────────────────────────

    fn export_summary(&self) -> Option<PathBuf> {
        let snapshot = self.dwell.snapshot();
        if !snapshot.has_charges() {
            tracing::warn!(entities = snapshot.len(), "no dwell time charged to any zone; summary not written");
            return None;
        }
        let path = self.summary_path.clone()?;
        match write_summary_csv(&path, &snapshot) {
            Ok(()) => {
                tracing::info!(path = %path.display(), entities = snapshot.len(), "dwell-time summary saved");
                Some(path)
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to save dwell-time summary");
                None
            }
        }
    }

    fn prepare_output_dir(&self) -> PathBuf {
        let wanted = resolve_output_dir(&self.config, &self.paths);
        ensure_dir_or_fallback(&wanted, &self.paths.persistent_data_dir)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// `true` while ticks can fire: active and not asked to stop.
    pub fn is_ticking(&self) -> bool {
        self.state == SamplerState::Active && !self.stop.is_stopped()
    }

    /// A handle other code can use to stop ticking.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// The resolved output directory, once started or reconfigured.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn raw_log_path(&self) -> Option<&Path> {
        self.raw_log.as_ref().map(RawLog::path)
    }

    pub fn summary_log_path(&self) -> Option<&Path> {
        self.summary_path.as_deref()
    }

    /// Every tick recorded this session, oldest first.
    pub fn history(&self) -> &[TickFrame] {
        &self.history
    }

    pub fn dwell(&self) -> &DwellAccumulator {
        &self.dwell
    }

    pub fn dwell_snapshot(&self) -> DwellSnapshot {
        self.dwell.snapshot()
    }

    pub fn identities(&self) -> &IdentityRegistry {
        &self.identities
    }

    /// Forget a destroyed entity's handle so a recycled handle gets a fresh
    /// id.  Its dwell totals are kept.
    pub fn forget_entity(&mut self, handle: EntityHandle) -> Option<EntityId> {
        self.identities.release(handle)
    }
}
