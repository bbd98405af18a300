//! Simulation module
//!
//! All shape logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Seeded RNG only
//! - Wall-clock time passed in, never read
//! - Drawing goes through the `Stage` trait

pub mod factory;
pub mod shape;
pub mod stage;
pub mod state;
pub mod tick;

pub use factory::{
    ShapeFactory, build_star_geometry, closed_form_area, regular_polygon, regular_shape,
    shoelace_area,
};
pub use shape::{Geometry, Shape, ShapeId, ShapeKind, ShapeSpec};
pub use stage::{NullStage, PrimitiveId, Stage};
pub use state::{Control, Request, SimEvent, SimulationConfig, SimulationState, Stats};
pub use tick::{
    TickInput, apply_control, classify_click, handle_request, remove_shape, reset, set_gravity,
    set_spawn_rate, spawn_at, tick,
};
