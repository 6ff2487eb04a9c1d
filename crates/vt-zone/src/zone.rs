//! `Zone` — one named, oriented box region.

use std::sync::atomic::{AtomicU32, Ordering};

use vt_core::{Quat, Vec3};

use crate::{ZoneError, ZoneResult};

/// Counter behind generated `Zone_<n>` fallback names.
static UNNAMED_ZONES: AtomicU32 = AtomicU32::new(0);

// ── Transform ─────────────────────────────────────────────────────────────────

/// Rigid placement of a zone in the world: translation plus rotation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[inline]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Axis-aligned placement at `position`.
    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Map a world-space point into this transform's local frame.
    #[inline]
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ── Zone ──────────────────────────────────────────────────────────────────────

/// A named box region: `half_extents` in the zone's local frame, placed in the
/// world by `transform`.
///
/// Immutable once built.  Names are not checked for uniqueness here; a
/// [`ZoneSet`][crate::ZoneSet] keeps duplicates but only the first can win.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    name:         String,
    half_extents: Vec3,
    transform:    Transform,
}

impl Zone {
    /// Build a zone.
    ///
    /// A missing or blank `name` is replaced with a generated `Zone_<n>` and a
    /// warning is logged.
    ///
    /// # Errors
    ///
    /// [`ZoneError::InvalidExtents`] if any half-extent is negative or not
    /// finite.
    pub fn new(name: Option<&str>, transform: Transform, half_extents: Vec3) -> ZoneResult<Self> {
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(n) => n.to_owned(),
            None => {
                let n = UNNAMED_ZONES.fetch_add(1, Ordering::Relaxed) + 1;
                let generated = format!("Zone_{n}");
                tracing::warn!(zone = %generated, "zone created without a name; using generated name");
                generated
            }
        };

        if !half_extents.is_finite() || half_extents.min_element() < 0.0 {
            return Err(ZoneError::InvalidExtents {
                zone: name,
                x:    half_extents.x,
                y:    half_extents.y,
                z:    half_extents.z,
            });
        }

        Ok(Self { name, half_extents, transform })
    }

    /// Like [`new`](Self::new) but takes the full box size (edge lengths), the
    /// way box colliders are usually authored.
    pub fn from_size(name: Option<&str>, transform: Transform, size: Vec3) -> ZoneResult<Self> {
        Self::new(name, transform, size * 0.5)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// `true` if `world` lies inside or on the surface of the box.
    pub fn contains(&self, world: Vec3) -> bool {
        let local = self.transform.inverse_transform_point(world);
        local.abs().cmple(self.half_extents).all()
    }

    /// World-space axis-aligned bounds `(min, max)` of the rotated box.
    pub fn world_bounds(&self) -> (Vec3, Vec3) {
        let rot = self.transform.rotation;
        let h = self.half_extents;
        let world_half = (rot * Vec3::X).abs() * h.x
            + (rot * Vec3::Y).abs() * h.y
            + (rot * Vec3::Z).abs() * h.z;
        (self.transform.position - world_half, self.transform.position + world_half)
    }
}
