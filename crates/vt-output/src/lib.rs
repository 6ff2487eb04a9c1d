//! `vt-output` — telemetry files on disk.
//!
//! Two CSV files are produced per session, both named
//! `<prefix>_<YYYYMMDD_HHmmss>.csv` in the resolved output directory:
//!
//! | File        | Written                    | Rows                                   |
//! |-------------|----------------------------|----------------------------------------|
//! | raw log     | header at start, appended every tick | one per entity per tick      |
//! | summary log | once, at shutdown          | one per entity, one column per zone    |
//!
//! # Usage
//!
//! ```rust,ignore
//! use vt_output::{RawLog, write_summary_csv};
//!
//! let log = RawLog::new(dir.join("player_positions_20250420_191027.csv"));
//! log.write_header()?;
//! log.append(&record)?;
//! write_summary_csv(&dir.join("venue_times_20250420_191027.csv"), &acc.snapshot())?;
//! ```

pub mod csv;
pub mod error;
pub mod paths;
pub mod reader;
pub mod row;
pub mod summary;

#[cfg(test)]
mod tests;

pub use self::csv::{RAW_LOG_HEADER, RawLog};
pub use error::{OutputError, OutputResult};
pub use paths::{ensure_dir_or_fallback, resolve_output_dir, timestamped_file};
pub use reader::{load_samples_csv, load_samples_reader};
pub use row::SampleRecord;
pub use summary::{SUMMARY_COLUMN_SUFFIX, summary_header, write_summary_csv};
