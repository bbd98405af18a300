//! Renderer seam
//!
//! The simulation never draws. It asks a `Stage` to create, move and destroy
//! primitives and keeps the returned id as a non-owning back-reference.

use glam::Vec2;

use super::shape::Geometry;

/// Opaque handle to a stage-owned drawable
/// Ids are allocated in increasing order, so ordering by id is creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub u32);

/// Drawing surface the simulation publishes shapes to
pub trait Stage {
    /// Create a primitive from a center-relative geometry and a 0xRRGGBB fill
    fn create_primitive(&mut self, geometry: &Geometry, color: u32) -> PrimitiveId;
    /// Move a primitive's center to a screen position
    fn set_position(&mut self, id: PrimitiveId, position: Vec2);
    /// Release a primitive; unknown ids are ignored
    fn destroy(&mut self, id: PrimitiveId);
}

/// Stage that draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullStage {
    next_id: u32,
}

impl Stage for NullStage {
    fn create_primitive(&mut self, _geometry: &Geometry, _color: u32) -> PrimitiveId {
        self.next_id += 1;
        PrimitiveId(self.next_id)
    }

    fn set_position(&mut self, _id: PrimitiveId, _position: Vec2) {}

    fn destroy(&mut self, _id: PrimitiveId) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use super::*;

    /// Stage that records every call for assertions
    #[derive(Debug, Default)]
    pub struct RecordingStage {
        next_id: u32,
        pub live: HashMap<PrimitiveId, Vec2>,
        pub created: u32,
        pub destroyed: Vec<PrimitiveId>,
    }

    impl Stage for RecordingStage {
        fn create_primitive(&mut self, _geometry: &Geometry, _color: u32) -> PrimitiveId {
            self.next_id += 1;
            self.created += 1;
            let id = PrimitiveId(self.next_id);
            self.live.insert(id, Vec2::ZERO);
            id
        }

        fn set_position(&mut self, id: PrimitiveId, position: Vec2) {
            if let Some(pos) = self.live.get_mut(&id) {
                *pos = position;
            }
        }

        fn destroy(&mut self, id: PrimitiveId) {
            if self.live.remove(&id).is_some() {
                self.destroyed.push(id);
            }
        }
    }
}
