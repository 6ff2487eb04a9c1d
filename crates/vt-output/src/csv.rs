//! Raw sample log: an append-only CSV file.
//!
//! The header is written once when the session starts.  Every row is
//! appended through a fresh append-mode handle and flushed before `append`
//! returns, so a crash loses at most the row being written.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};

use crate::{OutputResult, SampleRecord};

/// Column names of the raw log, in order.
pub const RAW_LOG_HEADER: [&str; 7] = [
    "recorded_time",
    "wall_clock_datetime",
    "entity_id",
    "position_x",
    "position_y",
    "position_z",
    "zone_name",
];

/// Handle to one raw log file.  Only the sampler writes to it.
#[derive(Debug, Clone)]
pub struct RawLog {
    path: PathBuf,
}

impl RawLog {
    /// Point at `path`.  Nothing is written until
    /// [`write_header`](Self::write_header) or [`append`](Self::append).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create (or truncate) the file and write the header row.
    pub fn write_header(&self) -> OutputResult<()> {
        let mut w = Writer::from_writer(File::create(&self.path)?);
        w.write_record(RAW_LOG_HEADER)?;
        w.flush()?;
        Ok(())
    }

    /// Append one row.  Creates the file (without header) if it is missing.
    pub fn append(&self, record: &SampleRecord) -> OutputResult<()> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut w = WriterBuilder::new().has_headers(false).from_writer(file);
        w.write_record(record.to_fields())?;
        w.flush()?;
        Ok(())
    }
}
