//! Zone error type.

use thiserror::Error;

/// Errors produced by `vt-zone`.
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("zone {zone:?} has invalid half-extents ({x}, {y}, {z}): must be finite and >= 0")]
    InvalidExtents { zone: String, x: f32, y: f32, z: f32 },
}

pub type ZoneResult<T> = Result<T, ZoneError>;
