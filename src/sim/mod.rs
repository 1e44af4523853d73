//! Deterministic simulation module
//!
//! All table physics lives here. This module must be pure and deterministic:
//! - One `step` per display frame, fixed ordering (integrate, then pairs)
//! - Seeded RNG only
//! - Stable iteration order (ball insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod predict;
pub mod state;
pub mod tick;

pub use collision::resolve_pair;
pub use predict::{AimOverlay, LineStyle, Marker, Prediction, Segment, cast_ray, overlay, predict};
pub use state::{AimState, Ball, BallColor, BallRole, Motion, ShotError, TableState};
pub use tick::step;
