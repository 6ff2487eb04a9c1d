//! What the sampler needs from the host: entities that can report a handle,
//! a name, and a world position.

use vt_core::{EntityHandle, Vec3};

/// Capability implemented by anything the sampler can track.
pub trait Trackable {
    /// Volatile host handle; stable for as long as the entity lives.
    fn handle(&self) -> EntityHandle;

    /// Host-side display name.  Used by the exclusion policy and in logs.
    fn name(&self) -> &str;

    fn world_position(&self) -> Vec3;
}

/// Enumerates the entities that are live right now.
///
/// Called once per tick.  Implementations should visit each live entity
/// exactly once; the order is the order rows are written in.
pub trait EntitySource {
    fn for_each_entity(&self, visit: &mut dyn FnMut(&dyn Trackable));
}

impl<T: Trackable> EntitySource for [T] {
    fn for_each_entity(&self, visit: &mut dyn FnMut(&dyn Trackable)) {
        for entity in self {
            visit(entity);
        }
    }
}

impl<T: Trackable> EntitySource for Vec<T> {
    fn for_each_entity(&self, visit: &mut dyn FnMut(&dyn Trackable)) {
        self.as_slice().for_each_entity(visit);
    }
}

/// A plain snapshot of one entity, for hosts that copy state out each frame
/// rather than implementing [`Trackable`] on their own types.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedEntity {
    pub handle:   EntityHandle,
    pub name:     String,
    pub position: Vec3,
}

impl TrackedEntity {
    pub fn new(handle: impl Into<EntityHandle>, name: impl Into<String>, position: Vec3) -> Self {
        Self {
            handle: handle.into(),
            name: name.into(),
            position,
        }
    }
}

impl Trackable for TrackedEntity {
    fn handle(&self) -> EntityHandle {
        self.handle
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn world_position(&self) -> Vec3 {
        self.position
    }
}
