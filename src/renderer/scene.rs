//! Retained primitive list backing the GPU renderer

use glam::Vec2;
use std::collections::BTreeMap;

use super::shapes::tessellate;
use super::vertex::{Vertex, colors::SHAPE_ALPHA};
use crate::rgb_to_rgba;
use crate::sim::{Geometry, PrimitiveId, Stage};

#[derive(Debug, Clone)]
struct Primitive {
    /// Center-relative triangles, tessellated once
    local: Vec<Vertex>,
    position: Vec2,
}

/// Primitives keyed by id; ids only grow, so key order is draw order
/// (later ones on top)
#[derive(Debug, Default)]
pub struct Scene {
    primitives: BTreeMap<PrimitiveId, Primitive>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn position(&self, id: PrimitiveId) -> Option<Vec2> {
        self.primitives.get(&id).map(|p| p.position)
    }

    /// Screen-space triangles for the whole scene
    pub fn vertices(&self) -> Vec<Vertex> {
        let total = self.primitives.values().map(|p| p.local.len()).sum();
        let mut out = Vec::with_capacity(total);
        for primitive in self.primitives.values() {
            let Vec2 { x, y } = primitive.position;
            out.extend(primitive.local.iter().map(|v| v.translated(x, y)));
        }
        out
    }
}

impl Stage for Scene {
    fn create_primitive(&mut self, geometry: &Geometry, color: u32) -> PrimitiveId {
        self.next_id += 1;
        let id = PrimitiveId(self.next_id);
        self.primitives.insert(
            id,
            Primitive {
                local: tessellate(geometry, rgb_to_rgba(color, SHAPE_ALPHA)),
                position: Vec2::ZERO,
            },
        );
        id
    }

    fn set_position(&mut self, id: PrimitiveId, position: Vec2) {
        if let Some(p) = self.primitives.get_mut(&id) {
            p.position = position;
        }
    }

    fn destroy(&mut self, id: PrimitiveId) {
        self.primitives.remove(&id);
    }
}
