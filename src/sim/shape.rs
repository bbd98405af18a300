//! Shape entity and geometry descriptions
//!
//! Geometry is stored relative to the shape center; `Shape::pos` places it
//! on screen (pixels, y down).

use glam::Vec2;

use super::stage::PrimitiveId;

/// Kinds of shape the factory can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Triangle,
    Square,
    Pentagon,
    Hexagon,
    Circle,
    Ellipse,
    Star,
    /// Random "blob" polygon, only produced by click spawns
    Irregular,
}

impl ShapeKind {
    /// Kinds picked by the timer spawner (equal weight)
    pub const RANDOM_KINDS: [ShapeKind; 7] = [
        ShapeKind::Triangle,
        ShapeKind::Square,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Star,
    ];

    /// Number of sides for the regular polygon kinds
    pub fn sides(&self) -> Option<u32> {
        match self {
            ShapeKind::Triangle => Some(3),
            ShapeKind::Square => Some(4),
            ShapeKind::Pentagon => Some(5),
            ShapeKind::Hexagon => Some(6),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Triangle => "triangle",
            ShapeKind::Square => "square",
            ShapeKind::Pentagon => "pentagon",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Star => "star",
            ShapeKind::Irregular => "irregular",
        }
    }
}

/// Geometry handed to the stage when creating a primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Closed vertex ring, relative to center
    Polygon(Vec<Vec2>),
    Circle { radius: f32 },
    Ellipse { rx: f32, ry: f32 },
}

impl Geometry {
    /// Check if a point (relative to the shape center) lies inside
    pub fn contains(&self, p: Vec2) -> bool {
        match self {
            Geometry::Polygon(ring) => polygon_contains(ring, p),
            Geometry::Circle { radius } => p.length_squared() <= radius * radius,
            Geometry::Ellipse { rx, ry } => {
                if *rx <= 0.0 || *ry <= 0.0 {
                    return false;
                }
                let nx = p.x / rx;
                let ny = p.y / ry;
                nx * nx + ny * ny <= 1.0
            }
        }
    }

    /// Vertex ring, if this geometry is described by one
    pub fn vertices(&self) -> Option<&[Vec2]> {
        match self {
            Geometry::Polygon(ring) => Some(ring),
            _ => None,
        }
    }
}

/// Even-odd ray cast; handles non-convex rings
fn polygon_contains(ring: &[Vec2], p: Vec2) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// A freshly generated shape, not yet placed on the stage
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub size: f32,
    pub geometry: Geometry,
    pub area: f32,
    /// 0xRRGGBB fill
    pub color: u32,
}

/// Simulation-unique shape identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u32);

/// A live, falling shape
#[derive(Debug, Clone)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub size: f32,
    pub geometry: Geometry,
    pub area: f32,
    pub color: u32,
    /// Screen position of the center; `x` never changes after spawn
    pub pos: Vec2,
    /// Back-reference into the stage, only for positioning and destroy
    pub primitive: PrimitiveId,
}

impl Shape {
    pub fn from_spec(id: ShapeId, spec: ShapeSpec, pos: Vec2, primitive: PrimitiveId) -> Self {
        Self {
            id,
            kind: spec.kind,
            size: spec.size,
            geometry: spec.geometry,
            area: spec.area,
            color: spec.color,
            pos,
            primitive,
        }
    }

    /// Check if a screen point hits this shape
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.geometry.contains(point - self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ring(half: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ]
    }

    #[test]
    fn test_polygon_contains() {
        let geometry = Geometry::Polygon(square_ring(10.0));
        assert!(geometry.contains(Vec2::ZERO));
        assert!(geometry.contains(Vec2::new(9.0, -9.0)));
        assert!(!geometry.contains(Vec2::new(11.0, 0.0)));
    }

    #[test]
    fn test_polygon_contains_non_convex() {
        // U shape: notch cut from the top middle
        let ring = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 0.0),
            Vec2::new(30.0, 30.0),
            Vec2::new(20.0, 30.0),
            Vec2::new(20.0, 10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(10.0, 30.0),
            Vec2::new(0.0, 30.0),
        ];
        let geometry = Geometry::Polygon(ring);
        assert!(geometry.contains(Vec2::new(5.0, 20.0)));
        assert!(geometry.contains(Vec2::new(25.0, 20.0)));
        assert!(!geometry.contains(Vec2::new(15.0, 20.0)));
    }

    #[test]
    fn test_degenerate_polygon_never_contains() {
        let geometry = Geometry::Polygon(vec![Vec2::ZERO, Vec2::X]);
        assert!(!geometry.contains(Vec2::ZERO));
        assert!(!Geometry::Polygon(Vec::new()).contains(Vec2::ZERO));
    }

    #[test]
    fn test_circle_and_ellipse_contains() {
        let circle = Geometry::Circle { radius: 20.0 };
        assert!(circle.contains(Vec2::new(0.0, 19.0)));
        assert!(!circle.contains(Vec2::new(15.0, 15.0)));

        let ellipse = Geometry::Ellipse { rx: 40.0, ry: 20.0 };
        assert!(ellipse.contains(Vec2::new(35.0, 0.0)));
        assert!(!ellipse.contains(Vec2::new(0.0, 25.0)));
    }

    #[test]
    fn test_shape_contains_point_uses_position() {
        let shape = Shape {
            id: ShapeId(1),
            kind: ShapeKind::Circle,
            size: 20.0,
            geometry: Geometry::Circle { radius: 20.0 },
            area: 0.0,
            color: 0,
            pos: Vec2::new(100.0, 100.0),
            primitive: PrimitiveId(1),
        };
        assert!(shape.contains_point(Vec2::new(110.0, 95.0)));
        assert!(!shape.contains_point(Vec2::new(10.0, 10.0)));
    }
}
