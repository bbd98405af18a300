//! Per-frame simulation tick and the operations input can trigger
//!
//! Requests from pointer input are queued in `TickInput` and applied at the
//! start of the next tick, so a click never lands mid-update.

use glam::Vec2;

use super::shape::ShapeId;
use super::stage::Stage;
use super::state::{Control, Request, SimulationState, clamp_non_negative};
use crate::consts::*;

/// Input gathered between frames
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub requests: Vec<Request>,
}

impl TickInput {
    pub fn push(&mut self, request: Request) {
        self.requests.push(request);
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Advance the simulation by one frame
///
/// `now_ms` is wall-clock time (drives the spawn timer), `delta` is
/// frame-scaled elapsed time (drives falling).
pub fn tick(
    state: &mut SimulationState,
    stage: &mut impl Stage,
    input: &mut TickInput,
    now_ms: f64,
    delta: f32,
) {
    for request in input.requests.drain(..) {
        handle_request(state, stage, request);
    }

    // Timer spawn
    if now_ms - state.last_spawn_ms >= state.config.spawn_interval_ms() {
        state.last_spawn_ms = now_ms;
        if state.config.spawn_per_second > 0.0 {
            let width = state.width;
            let x = state.factory_mut().random_x(width);
            let spec = state.factory_mut().create_random_shape();
            state.insert(spec, Vec2::new(x, SPAWN_Y), stage);
        }
    }

    // Fall
    let dy = state.config.gravity * delta;
    for shape in &mut state.shapes {
        shape.pos.y += dy;
        stage.set_position(shape.primitive, shape.pos);
    }

    // Cull below the bottom margin
    let limit = state.cull_limit();
    let before = state.shapes.len();
    state.shapes.retain(|shape| {
        if shape.pos.y > limit {
            stage.destroy(shape.primitive);
            false
        } else {
            true
        }
    });
    let culled = before - state.shapes.len();
    if culled > 0 {
        log::debug!("Culled {} off-screen shapes", culled);
    }

    state.refresh_stats();
}

/// Apply one input request immediately
pub fn handle_request(state: &mut SimulationState, stage: &mut impl Stage, request: Request) {
    match request {
        Request::Spawn { x, y } => {
            spawn_at(state, stage, x, y);
        }
        Request::Remove(id) => {
            remove_shape(state, stage, id);
        }
    }
}

/// Decide what a click at a screen point means: remove the topmost shape
/// under it, or spawn a new one there. Exactly one of the two.
pub fn classify_click(state: &SimulationState, point: Vec2) -> Request {
    match state.shape_at(point) {
        Some(id) => Request::Remove(id),
        None => Request::Spawn {
            x: point.x,
            y: point.y,
        },
    }
}

/// Spawn a shape at a point, ignoring the timer
pub fn spawn_at(state: &mut SimulationState, stage: &mut impl Stage, x: f32, y: f32) -> ShapeId {
    let chance = state.config.irregular_chance;
    let factory = state.factory_mut();
    let spec = if factory.roll(chance) {
        factory.create_irregular_shape()
    } else {
        factory.create_random_shape()
    };
    let id = state.insert(spec, Vec2::new(x, y), stage);
    state.refresh_stats();
    id
}

/// Remove a shape; returns false if it was already gone
pub fn remove_shape(state: &mut SimulationState, stage: &mut impl Stage, id: ShapeId) -> bool {
    let Some(index) = state.shapes.iter().position(|s| s.id == id) else {
        return false;
    };
    let shape = state.shapes.remove(index);
    stage.destroy(shape.primitive);
    log::debug!("Removed {} #{}", shape.kind.as_str(), id.0);
    state.refresh_stats();
    true
}

/// Discard every shape and adopt a new screen size
pub fn reset(state: &mut SimulationState, stage: &mut impl Stage, width: f32, height: f32) {
    for shape in state.shapes.drain(..) {
        stage.destroy(shape.primitive);
    }
    state.width = width;
    state.height = height;
    state.last_spawn_ms = 0.0;
    state.refresh_stats();
    log::info!("Simulation reset to {}x{}", width, height);
}

pub fn set_gravity(state: &mut SimulationState, value: f32) {
    state.config.gravity = clamp_non_negative(value);
    log::info!("Gravity set to {}", state.config.gravity);
    state.publish_settings();
}

pub fn set_spawn_rate(state: &mut SimulationState, value: f32) {
    state.config.spawn_per_second = clamp_non_negative(value);
    log::info!("Spawn rate set to {}/s", state.config.spawn_per_second);
    state.publish_settings();
}

/// Apply a control panel button (+1 / -1, floored at 0)
pub fn apply_control(state: &mut SimulationState, control: Control) {
    let config = state.config;
    match control {
        Control::SpawnRateUp => set_spawn_rate(state, config.spawn_per_second + 1.0),
        Control::SpawnRateDown => set_spawn_rate(state, config.spawn_per_second - 1.0),
        Control::GravityUp => set_gravity(state, config.gravity + 1.0),
        Control::GravityDown => set_gravity(state, config.gravity - 1.0),
    }
}
