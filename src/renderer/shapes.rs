//! Tessellation of shape geometry into triangle lists
//!
//! Every generated ring is star-shaped around its center (vertices at
//! increasing angles), so a fan from the center covers it exactly.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::sim::Geometry;

/// Segments used for circles and ellipses
pub const CURVE_SEGMENTS: u32 = 48;

/// Triangle fan from the origin over a closed ring
pub fn fan(ring: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if ring.len() < 3 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity(ring.len() * 3);
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        vertices.push(Vertex::new(0.0, 0.0, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }
    vertices
}

/// Filled ellipse centered on the origin
pub fn ellipse(rx: f32, ry: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let ring: Vec<Vec2> = (0..segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * TAU;
            Vec2::new(rx * theta.cos(), ry * theta.sin())
        })
        .collect();
    fan(&ring, color)
}

/// Center-relative triangles for any geometry
pub fn tessellate(geometry: &Geometry, color: [f32; 4]) -> Vec<Vertex> {
    match geometry {
        Geometry::Polygon(ring) => fan(ring, color),
        Geometry::Circle { radius } => ellipse(*radius, *radius, color, CURVE_SEGMENTS),
        Geometry::Ellipse { rx, ry } => ellipse(*rx, *ry, color, CURVE_SEGMENTS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ShapeKind, regular_shape, shoelace_area};

    /// Sum of triangle areas in a triangle list
    fn triangles_area(vertices: &[Vertex]) -> f32 {
        vertices
            .chunks_exact(3)
            .map(|t| {
                let a = Vec2::from(t[0].position);
                let b = Vec2::from(t[1].position);
                let c = Vec2::from(t[2].position);
                shoelace_area(&[a, b, c])
            })
            .sum()
    }

    #[test]
    fn test_fan_covers_square() {
        let spec = regular_shape(ShapeKind::Square, 30.0, 0).unwrap();
        let vertices = tessellate(&spec.geometry, [1.0; 4]);
        assert_eq!(vertices.len(), 12);
        // Diamond with circumradius 30 has area 2 * 30^2
        assert!((triangles_area(&vertices) - 1800.0).abs() < 0.01);
    }

    #[test]
    fn test_fan_covers_star_ring() {
        let spec = regular_shape(ShapeKind::Star, 40.0, 0).unwrap();
        let ring = spec.geometry.vertices().unwrap();
        let vertices = fan(ring, [1.0; 4]);
        assert!((triangles_area(&vertices) - shoelace_area(ring)).abs() < 0.1);
    }

    #[test]
    fn test_circle_approximates_area() {
        let vertices = tessellate(&Geometry::Circle { radius: 20.0 }, [1.0; 4]);
        assert_eq!(vertices.len(), CURVE_SEGMENTS as usize * 3);
        let area = triangles_area(&vertices);
        assert!(area < 1256.64 && area > 1256.64 * 0.99);
    }

    #[test]
    fn test_degenerate_ring_is_empty() {
        assert!(fan(&[Vec2::ZERO, Vec2::X], [1.0; 4]).is_empty());
        assert!(tessellate(&Geometry::Polygon(Vec::new()), [1.0; 4]).is_empty());
    }
}
