//! Simulation state and control types
//!
//! Everything here is transient: a resize rebuilds it from scratch.

use glam::Vec2;

use super::factory::ShapeFactory;
use super::shape::{Shape, ShapeId, ShapeSpec};
use super::stage::Stage;
use crate::consts::*;
use crate::settings::Settings;

/// Live-adjustable settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Downward speed in units per frame-delta (never negative)
    pub gravity: f32,
    /// Timer spawns per second (never negative, 0 disables the timer)
    pub spawn_per_second: f32,
    /// Chance that a click spawn is an irregular polygon
    pub irregular_chance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            spawn_per_second: DEFAULT_SPAWN_PER_SECOND,
            irregular_chance: IRREGULAR_CHANCE,
        }
    }
}

impl SimulationConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            gravity: clamp_non_negative(settings.gravity),
            spawn_per_second: clamp_non_negative(settings.spawn_per_second),
            irregular_chance: settings.irregular_chance.clamp(0.0, 1.0),
        }
    }

    /// Milliseconds between timer spawns (rate floored at 1 for the division)
    pub fn spawn_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.spawn_per_second.max(1.0))
    }
}

/// Clamp a control value to `>= 0`; NaN and infinities collapse to 0
pub fn clamp_non_negative(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Aggregate numbers for the stats panel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    pub count: usize,
    pub total_area: f32,
}

impl Stats {
    /// Area as displayed (nearest integer)
    pub fn rounded_area(&self) -> u64 {
        self.total_area.round().max(0.0) as u64
    }
}

/// Notifications for the HUD, drained by the host once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    StatsChanged(Stats),
    SettingsChanged { spawn_per_second: f32, gravity: f32 },
}

/// Requests produced by pointer input, applied between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Request {
    Spawn { x: f32, y: f32 },
    Remove(ShapeId),
}

/// Control panel actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SpawnRateUp,
    SpawnRateDown,
    GravityUp,
    GravityDown,
}

impl Control {
    pub fn from_element_id(id: &str) -> Option<Self> {
        match id {
            "spawn-inc" => Some(Control::SpawnRateUp),
            "spawn-dec" => Some(Control::SpawnRateDown),
            "gravity-inc" => Some(Control::GravityUp),
            "gravity-dec" => Some(Control::GravityDown),
            _ => None,
        }
    }

    pub fn element_id(&self) -> &'static str {
        match self {
            Control::SpawnRateUp => "spawn-inc",
            Control::SpawnRateDown => "spawn-dec",
            Control::GravityUp => "gravity-inc",
            Control::GravityDown => "gravity-dec",
        }
    }

    pub const ALL: [Control; 4] = [
        Control::SpawnRateUp,
        Control::SpawnRateDown,
        Control::GravityUp,
        Control::GravityDown,
    ];
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub config: SimulationConfig,
    /// Live shapes in draw order (last is on top)
    pub shapes: Vec<Shape>,
    /// Screen size in pixels
    pub width: f32,
    pub height: f32,
    /// Wall-clock time of the last timer spawn (ms)
    pub last_spawn_ms: f64,
    pub stats: Stats,
    factory: ShapeFactory,
    events: Vec<SimEvent>,
    next_id: u32,
}

impl SimulationState {
    pub fn new(config: SimulationConfig, seed: u64, width: f32, height: f32) -> Self {
        Self {
            config,
            shapes: Vec::new(),
            width,
            height,
            last_spawn_ms: 0.0,
            stats: Stats::default(),
            factory: ShapeFactory::new(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Lowest y a shape may have at the end of a tick
    pub fn cull_limit(&self) -> f32 {
        self.height + CULL_MARGIN
    }

    pub fn factory_mut(&mut self) -> &mut ShapeFactory {
        &mut self.factory
    }

    fn next_shape_id(&mut self) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Place a generated shape on the stage and track it
    pub fn insert(&mut self, spec: ShapeSpec, pos: Vec2, stage: &mut impl Stage) -> ShapeId {
        let primitive = stage.create_primitive(&spec.geometry, spec.color);
        stage.set_position(primitive, pos);
        let id = self.next_shape_id();
        log::debug!(
            "Spawned {} #{} at ({:.0}, {:.0}), area {:.1}",
            spec.kind.as_str(),
            id.0,
            pos.x,
            pos.y,
            spec.area
        );
        self.shapes.push(Shape::from_spec(id, spec, pos, primitive));
        id
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Topmost shape under a screen point
    pub fn shape_at(&self, point: Vec2) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.contains_point(point))
            .map(|s| s.id)
    }

    /// Recompute stats from the live shapes and publish them
    pub fn refresh_stats(&mut self) {
        self.stats = Stats {
            count: self.shapes.len(),
            total_area: self.shapes.iter().map(|s| s.area).sum(),
        };
        self.events.push(SimEvent::StatsChanged(self.stats));
    }

    pub fn publish_settings(&mut self) {
        self.events.push(SimEvent::SettingsChanged {
            spawn_per_second: self.config.spawn_per_second,
            gravity: self.config.gravity,
        });
    }

    /// Take pending HUD notifications
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
