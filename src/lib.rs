//! Cue Shot - a browser-based 2D pool table
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, collisions, aim prediction)
//! - `render`: Canvas 2D drawing (wasm only)
//! - `tuning`: Data-driven physics balance

pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod render;

pub use tuning::Tuning;

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Table dimensions in pixels (the canvas is sized to match)
    pub const TABLE_WIDTH: f32 = 600.0;
    pub const TABLE_HEIGHT: f32 = 400.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_MASS: f32 = 1.0;

    /// Per-step velocity damping (flat cloth friction)
    pub const DAMPING: f32 = 0.99;
    /// Velocity components with magnitude below this snap to exactly zero
    pub const REST_THRESHOLD: f32 = 0.05;
    /// Extra separation pushed between a resolved ball pair
    pub const SEPARATION_MARGIN: f32 = 1.0;

    /// Shot power range in pixels/step (angles wrap modulo 360)
    pub const MIN_POWER: i32 = 1;
    pub const MAX_POWER: i32 = 20;
    pub const DEFAULT_POWER: i32 = 10;

    /// Length of the drawn ricochet/ejection preview past a predicted impact
    pub const RICOCHET_PREVIEW_LEN: f32 = 60.0;
}

/// Unit direction vector for an aim angle in degrees
///
/// Canvas coordinates: +x right, +y down, so 90° points toward the bottom rail.
#[inline]
pub fn aim_direction(angle_degrees: i32) -> Vec2 {
    let rad = (angle_degrees as f32).to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Reflect a direction about a unit surface normal: v' = v - 2(v·n)n
#[inline]
pub fn reflect(v: Vec2, n: Vec2) -> Vec2 {
    v - 2.0 * v.dot(n) * n
}
