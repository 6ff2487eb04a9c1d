//! Sampler configuration and host-provided directories.
//!
//! Typically loaded from a JSON file by the application crate:
//!
//! ```json
//! {
//!   "sampling_interval_secs": 5.0,
//!   "output_dir": "TrackData"
//! }
//! ```
//!
//! Every field is optional; missing fields take the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Default seconds between two sampling ticks.
pub const DEFAULT_SAMPLING_INTERVAL_SECS: f64 = 5.0;

// ── SamplerConfig ─────────────────────────────────────────────────────────────

/// Top-level sampler configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Seconds between two sampling ticks.  Must be finite and > 0.
    pub sampling_interval_secs: f64,

    /// Where output files go.  Absolute paths are used as-is; relative paths
    /// are joined onto [`AppPaths::app_root`].  `None` or an empty path means
    /// [`AppPaths::persistent_data_dir`].
    pub output_dir: Option<PathBuf>,

    /// File-name prefix of the per-sample raw log.
    pub raw_log_prefix: String,

    /// File-name prefix of the dwell-time summary.
    pub summary_log_prefix: String,

    /// Entities whose name contains any of these fragments are never tracked.
    /// Keeps the host's own bookkeeping objects out of the samples.
    pub excluded_name_fragments: Vec<String>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sampling_interval_secs:  DEFAULT_SAMPLING_INTERVAL_SECS,
            output_dir:              None,
            raw_log_prefix:          "player_positions".to_owned(),
            summary_log_prefix:      "venue_times".to_owned(),
            excluded_name_fragments: vec!["EventSystem".to_owned(), "PositionTracker".to_owned()],
        }
    }
}

impl SamplerConfig {
    /// Parse a config from a JSON string.  Does not validate.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.  Does not validate.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Reject configurations the sampler must never run with.
    pub fn validate(&self) -> CoreResult<()> {
        let secs = self.sampling_interval_secs;
        if !secs.is_finite() || secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "sampling_interval_secs must be a positive, finite number of seconds (got {secs})"
            )));
        }
        if self.raw_log_prefix.trim().is_empty() || self.summary_log_prefix.trim().is_empty() {
            return Err(CoreError::Config("log file prefixes must not be empty".to_owned()));
        }
        Ok(())
    }

    /// The configured output directory, with an empty path treated as unset.
    pub fn configured_output_dir(&self) -> Option<&Path> {
        self.output_dir
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

// ── AppPaths ──────────────────────────────────────────────────────────────────

/// Directories the host application provides to the sampler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppPaths {
    /// Base for relative `output_dir` values.
    pub app_root: PathBuf,
    /// Per-user writable directory that always exists (or can be created).
    /// Used when `output_dir` is unset or cannot be created.
    pub persistent_data_dir: PathBuf,
}

impl AppPaths {
    pub fn new(app_root: impl Into<PathBuf>, persistent_data_dir: impl Into<PathBuf>) -> Self {
        Self {
            app_root:            app_root.into(),
            persistent_data_dir: persistent_data_dir.into(),
        }
    }

    /// Derive defaults from the process environment.
    ///
    /// `app_root` is the current directory.  The persistent-data directory is
    /// `<data home>/<app_name>`, where the data home is `XDG_DATA_HOME`,
    /// `APPDATA`, or `HOME/.local/share`, in that order; the OS temp dir is the
    /// last resort.
    pub fn from_env(app_name: &str) -> Self {
        let app_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let data_home = env_dir("XDG_DATA_HOME")
            .or_else(|| env_dir("APPDATA"))
            .or_else(|| env_dir("HOME").map(|h| h.join(".local").join("share")))
            .unwrap_or_else(std::env::temp_dir);
        Self::new(app_root, data_home.join(app_name))
    }
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
