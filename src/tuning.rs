//! Data-driven physics and aim tuning
//!
//! Everything here has a sensible default from `consts`; the struct exists so
//! the front end (or a test) can tweak table feel without recompiling the sim.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::AimState;

/// Tunable simulation parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tuning {
    /// Per-step velocity multiplier (cloth friction)
    pub damping: f32,
    /// Velocity components below this snap to exactly zero
    pub rest_threshold: f32,
    /// Extra gap pushed between a resolved ball pair
    pub separation_margin: f32,
    /// Shot power range accepted from the aim control
    pub min_power: i32,
    pub max_power: i32,
    /// Length of the ricochet/ejection preview segments
    pub ricochet_preview_len: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            rest_threshold: REST_THRESHOLD,
            separation_margin: SEPARATION_MARGIN,
            min_power: MIN_POWER,
            max_power: MAX_POWER,
            ricochet_preview_len: RICOCHET_PREVIEW_LEN,
        }
    }
}

impl Tuning {
    /// Clamp an externally supplied aim into the legal control ranges
    pub fn clamp_aim(&self, aim: &AimState) -> AimState {
        AimState {
            angle_degrees: aim.angle_degrees.rem_euclid(360),
            power: aim.power.clamp(self.min_power, self.max_power),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.damping, DAMPING);
        assert_eq!(t.rest_threshold, REST_THRESHOLD);
        assert_eq!(t.separation_margin, SEPARATION_MARGIN);
    }

    #[test]
    fn test_clamp_aim() {
        let t = Tuning::default();
        let aim = AimState {
            angle_degrees: 365,
            power: 99,
        };
        let clamped = t.clamp_aim(&aim);
        assert_eq!(clamped.angle_degrees, 5);
        assert_eq!(clamped.power, t.max_power);

        let aim = AimState {
            angle_degrees: -10,
            power: 0,
        };
        let clamped = t.clamp_aim(&aim);
        assert_eq!(clamped.angle_degrees, 350);
        assert_eq!(clamped.power, t.min_power);
    }
}
