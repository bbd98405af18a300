//! Random shape generation
//!
//! Regular kinds get closed-form areas, irregular blobs get an exact
//! shoelace area over their generated ring.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::{PI, TAU};

use super::shape::{Geometry, ShapeKind, ShapeSpec};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Vertex ring of a regular polygon, vertex 0 at `(radius, 0)`
pub fn regular_polygon(sides: u32, radius: f32) -> Vec<Vec2> {
    debug_assert!(sides >= 3, "polygon needs at least 3 sides, got {sides}");
    let step = TAU / sides as f32;
    (0..sides)
        .map(|i| polar_to_cartesian(radius, i as f32 * step))
        .collect()
}

/// Star ring alternating `radius` and `radius / 2`, starting at `(cx + radius, cy)`
///
/// Fewer than 2 points yields an empty ring.
pub fn build_star_geometry(center: Vec2, points: u32, radius: f32) -> Vec<Vec2> {
    if points < 2 {
        return Vec::new();
    }
    let step = PI / points as f32;
    (0..points * 2)
        .map(|i| {
            let r = if i % 2 == 0 { radius } else { radius / 2.0 };
            center + polar_to_cartesian(r, i as f32 * step)
        })
        .collect()
}

/// Polygon area via the shoelace formula (absolute, wraparound)
pub fn shoelace_area(ring: &[Vec2]) -> f32 {
    if ring.len() < 3 {
        return 0.0;
    }
    let twice: f32 = ring
        .iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    (twice / 2.0).abs()
}

/// Spec for `ShapeKind::RANDOM_KINDS[index]` with its closed-form area
///
/// Indices past the table land on the star. The star value is the
/// long-standing approximation, not the area of the drawn outer/inner ring.
fn build_regular(index: usize, size: f32, color: u32) -> ShapeSpec {
    let s2 = size * size;
    let (kind, geometry, area) = match index {
        0 => (
            ShapeKind::Triangle,
            Geometry::Polygon(regular_polygon(3, size)),
            3.0_f32.sqrt() / 4.0 * s2,
        ),
        1 => (
            ShapeKind::Square,
            Geometry::Polygon(regular_polygon(4, size)),
            s2,
        ),
        2 => (
            ShapeKind::Pentagon,
            Geometry::Polygon(regular_polygon(5, size)),
            1.25 * s2 * (PI / 5.0).tan(),
        ),
        3 => (
            ShapeKind::Hexagon,
            Geometry::Polygon(regular_polygon(6, size)),
            3.0 * 3.0_f32.sqrt() / 2.0 * s2,
        ),
        4 => (ShapeKind::Circle, Geometry::Circle { radius: size }, PI * s2),
        5 => (
            ShapeKind::Ellipse,
            Geometry::Ellipse {
                rx: size,
                ry: size / 2.0,
            },
            PI * size * (size / 2.0),
        ),
        _ => (
            ShapeKind::Star,
            Geometry::Polygon(build_star_geometry(Vec2::ZERO, STAR_POINTS, size)),
            2.5 * s2 * (TAU / 5.0).sin(),
        ),
    };
    ShapeSpec {
        kind,
        size,
        geometry,
        area,
        color,
    }
}

/// Build a regular shape of the given kind and size
///
/// Returns `None` for `ShapeKind::Irregular`, which needs randomness.
pub fn regular_shape(kind: ShapeKind, size: f32, color: u32) -> Option<ShapeSpec> {
    let index = ShapeKind::RANDOM_KINDS.iter().position(|k| *k == kind)?;
    Some(build_regular(index, size, color))
}

/// Closed-form area for the timer-spawnable kinds
pub fn closed_form_area(kind: ShapeKind, size: f32) -> Option<f32> {
    regular_shape(kind, size, 0).map(|spec| spec.area)
}

/// Shape generator; the only consumer of the simulation's random source
#[derive(Debug, Clone)]
pub struct ShapeFactory {
    rng: Pcg32,
}

impl ShapeFactory {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn random_size(&mut self) -> f32 {
        let size = self.rng.random_range(MIN_SIZE..=MAX_SIZE);
        debug_assert!(size.is_finite());
        size
    }

    fn random_color(&mut self) -> u32 {
        self.rng.random_range(0..=0xFF_FFFF)
    }

    /// One of the 7 regular kinds, equally likely, size in [MIN_SIZE, MAX_SIZE]
    pub fn create_random_shape(&mut self) -> ShapeSpec {
        let index = self.rng.random_range(0..ShapeKind::RANDOM_KINDS.len());
        let size = self.random_size();
        let color = self.random_color();
        build_regular(index, size, color)
    }

    /// Non-convex blob with 5..=9 vertices and an exact shoelace area
    pub fn create_irregular_shape(&mut self) -> ShapeSpec {
        let count = self
            .rng
            .random_range(IRREGULAR_MIN_VERTICES..=IRREGULAR_MAX_VERTICES);
        let base_radius = self.random_size();
        let step = TAU / count as f32;

        let ring: Vec<Vec2> = (0..count)
            .map(|i| {
                let r = base_radius * (0.5 + self.rng.random::<f32>());
                polar_to_cartesian(r, i as f32 * step)
            })
            .collect();

        let area = shoelace_area(&ring);
        let color = self.random_color();
        ShapeSpec {
            kind: ShapeKind::Irregular,
            size: base_radius,
            geometry: Geometry::Polygon(ring),
            area,
            color,
        }
    }

    /// Horizontal spawn position in [0, width)
    pub fn random_x(&mut self, width: f32) -> f32 {
        if width > 0.0 {
            self.rng.random_range(0.0..width)
        } else {
            0.0
        }
    }

    /// Bernoulli roll used for click spawns
    pub fn roll(&mut self, chance: f64) -> bool {
        self.rng.random_bool(chance.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_square_area() {
        let spec = regular_shape(ShapeKind::Square, 30.0, 0).unwrap();
        assert!((spec.area - 900.0).abs() < 1e-3);
    }

    #[test]
    fn test_circle_area() {
        let spec = regular_shape(ShapeKind::Circle, 20.0, 0).unwrap();
        assert!((spec.area - 1256.64).abs() < 0.01);
        assert_eq!(spec.geometry, Geometry::Circle { radius: 20.0 });
    }

    #[test]
    fn test_ellipse_geometry_and_area() {
        let spec = regular_shape(ShapeKind::Ellipse, 40.0, 0).unwrap();
        assert_eq!(spec.geometry, Geometry::Ellipse { rx: 40.0, ry: 20.0 });
        assert!((spec.area - PI * 800.0).abs() < 0.01);
    }

    #[test]
    fn test_closed_forms_match_shoelace_for_hexagon() {
        // Hexagon formula is exact for the generated ring
        let ring = regular_polygon(6, 25.0);
        let formula = closed_form_area(ShapeKind::Hexagon, 25.0).unwrap();
        assert!((shoelace_area(&ring) - formula).abs() < 0.1);
    }

    #[test]
    fn test_polygon_is_vertex_first() {
        let ring = regular_polygon(4, 30.0);
        assert!((ring[0] - Vec2::new(30.0, 0.0)).length() < 1e-4);
        assert!((ring[1] - Vec2::new(0.0, 30.0)).length() < 1e-3);
    }

    #[test]
    fn test_star_geometry() {
        let ring = build_star_geometry(Vec2::new(5.0, 5.0), 5, 40.0);
        assert_eq!(ring.len(), 10);
        assert!((ring[0] - Vec2::new(45.0, 5.0)).length() < 1e-4);
        for (i, v) in ring.iter().enumerate() {
            let expected = if i % 2 == 0 { 40.0 } else { 20.0 };
            assert!(((*v - Vec2::new(5.0, 5.0)).length() - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_star_degenerate() {
        assert!(build_star_geometry(Vec2::ZERO, 1, 40.0).is_empty());
        assert!(build_star_geometry(Vec2::ZERO, 0, 40.0).is_empty());
    }

    #[test]
    fn test_star_keeps_legacy_area() {
        let spec = regular_shape(ShapeKind::Star, 20.0, 0).unwrap();
        let expected = 2.5 * 400.0 * (TAU / 5.0).sin();
        assert!((spec.area - expected).abs() < 1e-3);
    }

    #[test]
    fn test_build_regular_follows_kind_table() {
        for (index, kind) in ShapeKind::RANDOM_KINDS.iter().enumerate() {
            let spec = build_regular(index, 30.0, 0);
            assert_eq!(spec.kind, *kind);
            if let Some(sides) = kind.sides() {
                assert_eq!(spec.geometry.vertices().unwrap().len(), sides as usize);
            }
        }
        // Out-of-table indices never panic
        assert_eq!(build_regular(99, 30.0, 0).kind, ShapeKind::Star);
    }

    #[test]
    fn test_irregular_is_not_regular() {
        assert!(regular_shape(ShapeKind::Irregular, 30.0, 0).is_none());
        assert!(closed_form_area(ShapeKind::Irregular, 30.0).is_none());
    }

    #[test]
    fn test_shoelace_unit_square() {
        let ring = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        assert!((shoelace_area(&ring) - 1.0).abs() < 1e-6);
        assert_eq!(shoelace_area(&ring[..2]), 0.0);
    }

    #[test]
    fn test_random_shapes_never_irregular() {
        let mut factory = ShapeFactory::new(7);
        for _ in 0..200 {
            let spec = factory.create_random_shape();
            assert_ne!(spec.kind, ShapeKind::Irregular);
            assert!((MIN_SIZE..=MAX_SIZE).contains(&spec.size));
            assert!(spec.color <= 0xFF_FFFF);
        }
    }

    #[test]
    fn test_random_shapes_cover_all_kinds() {
        let mut factory = ShapeFactory::new(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(factory.create_random_shape().kind);
        }
        assert_eq!(seen.len(), ShapeKind::RANDOM_KINDS.len());
    }

    #[test]
    fn test_irregular_shape() {
        let mut factory = ShapeFactory::new(3);
        for _ in 0..100 {
            let spec = factory.create_irregular_shape();
            assert_eq!(spec.kind, ShapeKind::Irregular);
            let ring = spec.geometry.vertices().unwrap();
            assert!((5..=9).contains(&ring.len()));
            for v in ring {
                let r = v.length();
                assert!(r >= spec.size * 0.5 - 1e-3 && r <= spec.size * 1.5 + 1e-3);
            }
            assert!((spec.area - shoelace_area(ring)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = ShapeFactory::new(42);
        let mut b = ShapeFactory::new(42);
        for _ in 0..20 {
            assert_eq!(a.create_random_shape(), b.create_random_shape());
            assert_eq!(a.create_irregular_shape(), b.create_irregular_shape());
        }
    }

    #[test]
    fn test_random_x_range() {
        let mut factory = ShapeFactory::new(5);
        for _ in 0..100 {
            let x = factory.random_x(800.0);
            assert!((0.0..800.0).contains(&x));
        }
        assert_eq!(factory.random_x(0.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_regular_ring_radius(sides in 3u32..12, size in MIN_SIZE..=MAX_SIZE) {
            let ring = regular_polygon(sides, size);
            prop_assert_eq!(ring.len(), sides as usize);
            for v in &ring {
                prop_assert!((v.length() - size).abs() < 1e-3);
            }
        }

        #[test]
        fn prop_generated_polygons_on_radius(seed in any::<u64>()) {
            let mut factory = ShapeFactory::new(seed);
            let spec = factory.create_random_shape();
            if let (Some(sides), Some(ring)) = (spec.kind.sides(), spec.geometry.vertices()) {
                prop_assert_eq!(ring.len(), sides as usize);
                for v in ring {
                    prop_assert!((v.length() - spec.size).abs() < 1e-3);
                }
            }
            prop_assert!(spec.area >= 0.0);
        }

        #[test]
        fn prop_shoelace_winding_invariant(seed in any::<u64>()) {
            let mut factory = ShapeFactory::new(seed);
            let spec = factory.create_irregular_shape();
            let ring = spec.geometry.vertices().unwrap().to_vec();
            let mut reversed = ring.clone();
            reversed.reverse();
            let forward = shoelace_area(&ring);
            prop_assert!(forward >= 0.0);
            prop_assert!((forward - shoelace_area(&reversed)).abs() <= forward * 1e-4 + 1e-2);
        }
    }
}
