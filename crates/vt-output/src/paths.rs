//! Output directory resolution and file naming.
//!
//! | Configured `output_dir` | Resolved directory                       |
//! |-------------------------|------------------------------------------|
//! | unset / empty           | `AppPaths::persistent_data_dir`          |
//! | absolute                | used as-is                               |
//! | relative                | `AppPaths::app_root.join(output_dir)`    |

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use vt_core::time::format_file_stamp;
use vt_core::{AppPaths, SamplerConfig};

/// Where output files should go according to `config`.  Pure; touches no
/// files.
pub fn resolve_output_dir(config: &SamplerConfig, paths: &AppPaths) -> PathBuf {
    match config.configured_output_dir() {
        None => paths.persistent_data_dir.clone(),
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => paths.app_root.join(dir),
    }
}

/// Make sure `dir` exists and return it.  If it cannot be created, log the
/// failure and return `fallback` instead (creating it too, best effort).
///
/// Never fails: telemetry must keep running with some directory.
pub fn ensure_dir_or_fallback(dir: &Path, fallback: &Path) -> PathBuf {
    if dir.is_dir() {
        return dir.to_path_buf();
    }

    match std::fs::create_dir_all(dir) {
        Ok(()) => {
            tracing::info!(dir = %dir.display(), "created output directory");
            dir.to_path_buf()
        }
        Err(e) => {
            tracing::error!(dir = %dir.display(), error = %e, "failed to create output directory");
            tracing::warn!(fallback = %fallback.display(), "falling back to persistent data directory");
            if !fallback.is_dir() {
                if let Err(e) = std::fs::create_dir_all(fallback) {
                    tracing::error!(dir = %fallback.display(), error = %e, "failed to create fallback directory");
                }
            }
            fallback.to_path_buf()
        }
    }
}

/// `<dir>/<prefix>_<YYYYMMDD_HHmmss>.csv`
pub fn timestamped_file(dir: &Path, prefix: &str, stamp: NaiveDateTime) -> PathBuf {
    dir.join(format!("{prefix}_{}.csv", format_file_stamp(stamp)))
}
