//! Table state and core simulation types
//!
//! The whole table is one explicitly owned struct; nothing in the sim reads
//! ambient globals. Ball iteration order is the `Vec` order, which is stable,
//! so every run with the same seed and inputs replays identically.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;
use crate::aim_direction;

/// Role of a ball on the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallRole {
    /// The user-controlled ball launched via aim angle and power
    Cue,
    /// Any other ball that can be struck
    Object,
}

/// Color tag used for drawing (and to tell object balls apart)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallColor {
    White,
    Red,
    Yellow,
    Blue,
    Green,
    Orange,
    Purple,
    Maroon,
}

impl BallColor {
    /// Object-ball palette (the cue is always white)
    pub const PALETTE: [BallColor; 7] = [
        BallColor::Red,
        BallColor::Yellow,
        BallColor::Blue,
        BallColor::Green,
        BallColor::Orange,
        BallColor::Purple,
        BallColor::Maroon,
    ];

    pub fn as_css(&self) -> &'static str {
        match self {
            BallColor::White => "white",
            BallColor::Red => "red",
            BallColor::Yellow => "yellow",
            BallColor::Blue => "blue",
            BallColor::Green => "green",
            BallColor::Orange => "orange",
            BallColor::Purple => "purple",
            BallColor::Maroon => "maroon",
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub role: BallRole,
    pub color: BallColor,
}

impl Ball {
    /// Create the cue ball at the given position
    pub fn cue(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            mass: BALL_MASS,
            role: BallRole::Cue,
            color: BallColor::White,
        }
    }

    /// Create an object ball at the given position
    pub fn object(id: u32, pos: Vec2, color: BallColor) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            mass: BALL_MASS,
            role: BallRole::Object,
            color,
        }
    }

    #[inline]
    pub fn is_cue(&self) -> bool {
        self.role == BallRole::Cue
    }

    #[inline]
    pub fn at_rest(&self) -> bool {
        self.vel == Vec2::ZERO
    }

    /// Kinetic energy (½mv²)
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }

    /// Advance this ball by one step: move, damp, snap to rest, bounce.
    ///
    /// Snapping small components to exactly zero guarantees the table reaches
    /// true rest in finite steps instead of creeping asymptotically.
    pub fn integrate(&mut self, width: f32, height: f32, tuning: &Tuning) {
        self.pos += self.vel;

        self.vel *= tuning.damping;
        if self.vel.x.abs() < tuning.rest_threshold {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < tuning.rest_threshold {
            self.vel.y = 0.0;
        }

        // Wall bounce: invert the crossing axis, clamp back onto the table
        if self.pos.x - self.radius < 0.0 || self.pos.x + self.radius > width {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.clamp(self.radius, width - self.radius);
        }
        if self.pos.y - self.radius < 0.0 || self.pos.y + self.radius > height {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.clamp(self.radius, height - self.radius);
        }
    }
}

/// Table-wide motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    /// Every ball has zero velocity; aiming and shooting are allowed
    AtRest,
    /// At least one ball is still rolling
    Moving,
}

/// Externally supplied aim control values (read-only to the sim)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AimState {
    /// Aim angle in degrees, 0 = +x, 90 = +y (down in canvas coords)
    pub angle_degrees: i32,
    /// Shot power in pixels per step
    pub power: i32,
}

impl Default for AimState {
    fn default() -> Self {
        Self {
            angle_degrees: 0,
            power: DEFAULT_POWER,
        }
    }
}

/// Errors from guarded shot operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotError {
    /// The active set has no cue ball (invariant violation)
    NoCueBall,
    /// The table has not come to rest yet
    CueBallMoving,
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotError::NoCueBall => write!(f, "no cue ball on the table"),
            ShotError::CueBallMoving => write!(f, "cue ball is still moving"),
        }
    }
}

impl std::error::Error for ShotError {}

/// RNG state wrapper: a fresh stream per spawn batch keeps placement
/// deterministic for a given seed without serializing generator internals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Next generator; bumps the stream so subsequent batches differ
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete table state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state for ball placement
    pub rng_state: RngState,
    /// Table dimensions
    pub width: f32,
    pub height: f32,
    /// Simulation step counter
    pub time_ticks: u64,
    /// Physics tuning
    pub tuning: Tuning,
    /// Active balls, in stable insertion order
    pub balls: Vec<Ball>,
    /// Index of the cue ball within `balls`, maintained on add/remove
    cue_index: Option<usize>,
    /// Next entity ID
    next_id: u32,
}

impl TableState {
    /// Create a table with the standard break layout: cue on the left,
    /// three object balls racked loosely on the right.
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            width: TABLE_WIDTH,
            height: TABLE_HEIGHT,
            time_ticks: 0,
            tuning: Tuning::default(),
            balls: Vec::new(),
            cue_index: None,
            next_id: 1,
        };

        let cue_id = state.next_entity_id();
        state.balls.push(Ball::cue(cue_id, Vec2::new(100.0, 200.0)));
        state.cue_index = Some(0);

        let rack = [
            (Vec2::new(500.0, 200.0), BallColor::Red),
            (Vec2::new(520.0, 190.0), BallColor::Yellow),
            (Vec2::new(520.0, 210.0), BallColor::Blue),
        ];
        for (pos, color) in rack {
            let id = state.next_entity_id();
            state.balls.push(Ball::object(id, pos, color));
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The cue ball, if present
    pub fn cue(&self) -> Option<&Ball> {
        self.cue_index.and_then(|i| self.balls.get(i))
    }

    pub fn cue_mut(&mut self) -> Option<&mut Ball> {
        self.cue_index.and_then(|i| self.balls.get_mut(i))
    }

    /// Table-wide motion phase: `AtRest` only when every ball is stopped
    pub fn motion(&self) -> Motion {
        if self.balls.iter().all(Ball::at_rest) {
            Motion::AtRest
        } else {
            Motion::Moving
        }
    }

    /// Total kinetic energy of the table
    pub fn kinetic_energy(&self) -> f32 {
        self.balls.iter().map(Ball::kinetic_energy).sum()
    }

    /// Launch the cue ball from the aim control.
    ///
    /// Guarded: the cue ball must exist and the table must be at rest.
    pub fn shoot(&mut self, aim: &AimState) -> Result<(), ShotError> {
        if self.motion() == Motion::Moving {
            return Err(ShotError::CueBallMoving);
        }
        let aim = self.tuning.clamp_aim(aim);
        let dir = aim_direction(aim.angle_degrees);
        let cue = self.cue_mut().ok_or(ShotError::NoCueBall)?;
        cue.vel = dir * aim.power as f32;
        log::info!(
            "shot: angle={}° power={} vel=({:.2},{:.2})",
            aim.angle_degrees,
            aim.power,
            cue.vel.x,
            cue.vel.y
        );
        Ok(())
    }

    /// Add `n` object balls at seeded-random positions inside the rails.
    ///
    /// Placement does not check for overlap with existing balls; an
    /// overlapping spawn resolves itself on the next step.
    pub fn add_balls(&mut self, n: u32) {
        let mut rng = self.rng_state.next_rng();
        for _ in 0..n {
            let id = self.next_entity_id();
            let pos = Vec2::new(
                rng.random_range(BALL_RADIUS..self.width - BALL_RADIUS),
                rng.random_range(BALL_RADIUS..self.height - BALL_RADIUS),
            );
            let color = BallColor::PALETTE[rng.random_range(0..BallColor::PALETTE.len())];
            self.balls.push(Ball::object(id, pos, color));
        }
    }

    /// Remove up to `n` object balls, newest first. The cue ball is never
    /// removed.
    pub fn remove_balls(&mut self, n: u32) {
        for _ in 0..n {
            let Some(idx) = self.balls.iter().rposition(|b| !b.is_cue()) else {
                break;
            };
            self.balls.remove(idx);
            // Vec::remove shifts everything after idx left by one
            if let Some(cue) = self.cue_index {
                if cue > idx {
                    self.cue_index = Some(cue - 1);
                }
            }
        }
    }
}
