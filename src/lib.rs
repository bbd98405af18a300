//! Falling Shapes - random 2D shapes raining down a canvas
//!
//! Core modules:
//! - `sim`: Simulation (shape generation, falling, culling, click handling)
//! - `renderer`: WebGPU rendering pipeline and the primitive scene
//! - `settings`: Startup configuration
//! - `pacing`: Frame loop gating on visibility and focus

pub mod pacing;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use pacing::FrameGate;
pub use settings::Settings;

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Shape size range (radius-like units)
    pub const MIN_SIZE: f32 = 20.0;
    pub const MAX_SIZE: f32 = 50.0;

    /// Timer spawns appear just above the top edge
    pub const SPAWN_Y: f32 = -50.0;
    /// Shapes are culled once they fall this far below the bottom edge
    pub const CULL_MARGIN: f32 = 100.0;

    /// Points on the generated star
    pub const STAR_POINTS: u32 = 5;

    /// Irregular polygon vertex count range (inclusive)
    pub const IRREGULAR_MIN_VERTICES: u32 = 5;
    pub const IRREGULAR_MAX_VERTICES: u32 = 9;
    /// Chance that a click spawn produces an irregular polygon
    pub const IRREGULAR_CHANCE: f64 = 0.3;

    /// Defaults for the live controls
    pub const DEFAULT_GRAVITY: f32 = 1.0;
    pub const DEFAULT_SPAWN_PER_SECOND: f32 = 1.0;

    /// Frame duration that `delta == 1.0` corresponds to (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest frame delta applied in one tick (100 ms)
    pub const MAX_FRAME_DELTA: f32 = 6.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Frame-scaled delta between two animation timestamps (ms)
///
/// The first frame (`last_ms <= 0`) counts as one frame; long gaps are capped
/// so a stalled tab does not teleport shapes.
pub fn frame_delta(last_ms: f64, now_ms: f64) -> f32 {
    if last_ms <= 0.0 || now_ms < last_ms {
        return 1.0;
    }
    (((now_ms - last_ms) / consts::FRAME_MS) as f32).min(consts::MAX_FRAME_DELTA)
}

/// Unpack a 0xRRGGBB color into linear-ish RGBA floats
#[inline]
pub fn rgb_to_rgba(color: u32, alpha: f32) -> [f32; 4] {
    let r = ((color >> 16) & 0xFF) as f32 / 255.0;
    let g = ((color >> 8) & 0xFF) as f32 / 255.0;
    let b = (color & 0xFF) as f32 / 255.0;
    [r, g, b, alpha]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(10.0, 0.0);
        assert!((p.x - 10.0).abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);

        let p = polar_to_cartesian(10.0, PI / 2.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_frame_delta() {
        assert_eq!(frame_delta(0.0, 500.0), 1.0);
        assert!((frame_delta(1000.0, 1000.0 + consts::FRAME_MS * 2.0) - 2.0).abs() < 1e-4);
        assert_eq!(frame_delta(1000.0, 60_000.0), consts::MAX_FRAME_DELTA);
        assert_eq!(frame_delta(2000.0, 1000.0), 1.0);
    }

    #[test]
    fn test_rgb_to_rgba() {
        assert_eq!(rgb_to_rgba(0xFF0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb_to_rgba(0x0000FF, 0.5), [0.0, 0.0, 1.0, 0.5]);
    }
}
