//! Ray-cast aim prediction
//!
//! While the cue ball sits still, the aim control casts a ray and reports the
//! nearest thing it would strike: one of the four rail planes, or an object
//! ball via quadratic ray/circle intersection against the Minkowski-expanded
//! radius (object radius + cue radius). The result is a sum type instead of
//! an assumed contact point, and the overlay builder turns it into plain
//! drawing directives for the render layer. Nothing here mutates the table.

use glam::Vec2;
use serde::Serialize;

use super::state::{AimState, Ball, Motion, TableState};
use crate::{aim_direction, reflect};

/// Outcome of casting the aim ray
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Prediction {
    /// No positive-distance hit. Cannot occur for a cue ball strictly inside
    /// the rails, but a cue resting exactly on a rail plane and aimed along it
    /// has no candidate ahead, so a contact point is never assumed.
    NoHit,
    /// The cue ball reaches a rail first
    Wall {
        /// Cue center at the moment of contact
        point: Vec2,
        /// Outgoing cue direction (struck axis negated)
        ricochet: Vec2,
        /// Ray distance to the contact
        distance: f32,
    },
    /// The cue ball reaches an object ball first
    Ball {
        /// Id of the struck ball
        id: u32,
        /// Cue center at the moment of contact (radii sum before the target)
        point: Vec2,
        /// Object ejection direction: contact-point-to-object-center normal
        object_dir: Vec2,
        /// Cue direction specularly reflected about that same normal
        cue_ricochet: Vec2,
        /// Ray distance to the contact
        distance: f32,
    },
}

/// Which rail axis a wall candidate belongs to
#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Predict what the cue ball would strike for the given aim
pub fn predict(cue: &Ball, balls: &[Ball], aim: &AimState, width: f32, height: f32) -> Prediction {
    cast_ray(cue, balls, aim_direction(aim.angle_degrees), width, height)
}

/// Cast a ray from the cue ball center along `dir` (unit length)
pub fn cast_ray(cue: &Ball, balls: &[Ball], dir: Vec2, width: f32, height: f32) -> Prediction {
    debug_assert!(dir.length_squared() > 1e-6, "aim direction must be nonzero");
    if dir == Vec2::ZERO {
        return Prediction::NoHit;
    }

    let start = cue.pos;

    // Nearest rail plane, offset inward by the cue radius. A rail only counts
    // when the ray moves toward it, so a grazing or outward ray never reports
    // the near rail.
    let mut wall: Option<(f32, Axis)> = None;
    let mut consider = |t: f32, axis: Axis| {
        if t > 0.0 && wall.is_none_or(|(best, _)| t < best) {
            wall = Some((t, axis));
        }
    };
    if dir.x < 0.0 {
        consider((cue.radius - start.x) / dir.x, Axis::X);
    }
    if dir.x > 0.0 {
        consider((width - cue.radius - start.x) / dir.x, Axis::X);
    }
    if dir.y < 0.0 {
        consider((cue.radius - start.y) / dir.y, Axis::Y);
    }
    if dir.y > 0.0 {
        consider((height - cue.radius - start.y) / dir.y, Axis::Y);
    }

    // Nearest object ball: solve |p - t·dir|² = rSum² for the smallest
    // positive root
    let mut nearest_ball: Option<(f32, &Ball)> = None;
    for ball in balls {
        if ball.id == cue.id || ball.is_cue() {
            continue;
        }
        let p = ball.pos - start;
        let r_sum = ball.radius + cue.radius;
        let a = dir.length_squared();
        let b = -2.0 * p.dot(dir);
        let c = p.length_squared() - r_sum * r_sum;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            continue;
        }
        let sq = disc.sqrt();
        let t1 = (-b - sq) / (2.0 * a);
        let t2 = (-b + sq) / (2.0 * a);
        let t = if t1 > 0.0 {
            t1
        } else if t2 > 0.0 {
            t2
        } else {
            continue;
        };
        if nearest_ball.is_none_or(|(best, _)| t < best) {
            nearest_ball = Some((t, ball));
        }
    }

    match (wall, nearest_ball) {
        (None, None) => Prediction::NoHit,
        (Some((t, axis)), None) => wall_hit(start, dir, t, axis),
        (None, Some((t, ball))) => ball_hit(start, dir, t, ball),
        (Some((wt, axis)), Some((bt, ball))) => {
            if bt < wt {
                ball_hit(start, dir, bt, ball)
            } else {
                wall_hit(start, dir, wt, axis)
            }
        }
    }
}

fn wall_hit(start: Vec2, dir: Vec2, t: f32, axis: Axis) -> Prediction {
    let ricochet = match axis {
        Axis::X => Vec2::new(-dir.x, dir.y),
        Axis::Y => Vec2::new(dir.x, -dir.y),
    };
    Prediction::Wall {
        point: start + dir * t,
        ricochet,
        distance: t,
    }
}

fn ball_hit(start: Vec2, dir: Vec2, t: f32, ball: &Ball) -> Prediction {
    let point = start + dir * t;
    // At contact the cue center sits exactly rSum from the object center, so
    // this normal is well defined
    let normal = (ball.pos - point).normalize();
    Prediction::Ball {
        id: ball.id,
        point,
        object_dir: normal,
        cue_ricochet: reflect(dir, normal),
        distance: t,
    }
}

/// A stroke style for one overlay segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    /// CSS color
    pub color: &'static str,
    pub width: f32,
    /// Dash pattern (on, off) in pixels; `None` for a solid stroke
    pub dash: Option<[f32; 2]>,
}

impl LineStyle {
    /// Dashed aim line from cue to contact
    pub const AIM: LineStyle = LineStyle {
        color: "white",
        width: 2.0,
        dash: Some([5.0, 5.0]),
    };
    /// Faint dashed cue ricochet preview
    pub const RICOCHET: LineStyle = LineStyle {
        color: "rgba(255, 255, 255, 0.5)",
        width: 1.5,
        dash: Some([5.0, 5.0]),
    };

    /// Solid object-ejection preview in the struck ball's color
    pub fn eject(color: &'static str) -> LineStyle {
        LineStyle {
            color,
            width: 1.5,
            dash: None,
        }
    }
}

/// One overlay line segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub style: LineStyle,
}

/// Ghost-ball circle drawn at a predicted ball contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub center: Vec2,
    pub radius: f32,
    pub color: &'static str,
}

/// Renderable description of an aim prediction
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AimOverlay {
    pub segments: Vec<Segment>,
    pub marker: Option<Marker>,
}

/// Build drawing directives from a prediction. Pure data; the render layer
/// decides how to stroke it.
pub fn overlay(cue: &Ball, balls: &[Ball], prediction: &Prediction, preview_len: f32) -> AimOverlay {
    match prediction {
        Prediction::NoHit => AimOverlay::default(),
        Prediction::Wall { point, ricochet, .. } => AimOverlay {
            segments: vec![
                Segment {
                    from: cue.pos,
                    to: *point,
                    style: LineStyle::AIM,
                },
                Segment {
                    from: *point,
                    to: *point + *ricochet * preview_len,
                    style: LineStyle::RICOCHET,
                },
            ],
            marker: None,
        },
        Prediction::Ball {
            id,
            point,
            object_dir,
            cue_ricochet,
            ..
        } => {
            let eject_color = balls
                .iter()
                .find(|b| b.id == *id)
                .map(|b| b.color.as_css())
                .unwrap_or("white");
            AimOverlay {
                segments: vec![
                    Segment {
                        from: cue.pos,
                        to: *point,
                        style: LineStyle::AIM,
                    },
                    Segment {
                        from: *point,
                        to: *point + *object_dir * preview_len,
                        style: LineStyle::eject(eject_color),
                    },
                    Segment {
                        from: *point,
                        to: *point + *cue_ricochet * preview_len,
                        style: LineStyle::RICOCHET,
                    },
                ],
                marker: Some(Marker {
                    center: *point,
                    radius: cue.radius,
                    color: "rgba(255, 255, 255, 0.6)",
                }),
            }
        }
    }
}

impl TableState {
    /// Prediction for the current aim. `None` while the cue ball is missing
    /// or still rolling; drawing a preview from a moving ball is meaningless.
    pub fn predict(&self, aim: &AimState) -> Option<Prediction> {
        let cue = self.cue()?;
        if !cue.at_rest() {
            return None;
        }
        Some(predict(cue, &self.balls, aim, self.width, self.height))
    }

    /// Overlay for the current aim, or `None` when prediction is inactive
    pub fn aim_overlay(&self, aim: &AimState) -> Option<AimOverlay> {
        let prediction = self.predict(aim)?;
        let cue = self.cue()?;
        Some(overlay(
            cue,
            &self.balls,
            &prediction,
            self.tuning.ricochet_preview_len,
        ))
    }

    /// Whether the whole table has settled (shooting allowed)
    pub fn can_shoot(&self) -> bool {
        self.motion() == Motion::AtRest && self.cue().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BallColor;

    fn cue_at(pos: Vec2) -> Ball {
        Ball::cue(1, pos)
    }

    fn object_at(id: u32, pos: Vec2) -> Ball {
        Ball::object(id, pos, BallColor::Red)
    }

    #[test]
    fn test_wall_aim_east() {
        // Cue at (10,10), aiming +x across a 600-wide table: far rail at 590
        let cue = cue_at(Vec2::new(10.0, 10.0));
        let aim = AimState {
            angle_degrees: 0,
            power: 10,
        };
        match predict(&cue, &[], &aim, 600.0, 400.0) {
            Prediction::Wall {
                point,
                ricochet,
                distance,
            } => {
                assert!((point.x - 590.0).abs() < 1e-3);
                assert!((point.y - 10.0).abs() < 1e-3);
                assert!((ricochet.x - (-1.0)).abs() < 1e-4);
                assert!(ricochet.y.abs() < 1e-4);
                assert!((distance - 580.0).abs() < 1e-3);
            }
            other => panic!("expected wall hit, got {other:?}"),
        }
    }

    #[test]
    fn test_ball_aim_contact_at_radii_sum() {
        // Object ball dead ahead: contact lands radii-sum before its center
        let cue = cue_at(Vec2::new(0.0, 0.0));
        let target = object_at(2, Vec2::new(100.0, 0.0));
        let aim = AimState {
            angle_degrees: 0,
            power: 10,
        };
        match predict(&cue, &[target], &aim, 600.0, 400.0) {
            Prediction::Ball {
                id,
                point,
                object_dir,
                cue_ricochet,
                distance,
            } => {
                assert_eq!(id, 2);
                assert!((point.x - 80.0).abs() < 1e-3);
                assert!(point.y.abs() < 1e-3);
                assert!((object_dir.x - 1.0).abs() < 1e-4);
                assert!(object_dir.y.abs() < 1e-4);
                // Head-on: cue bounces straight back
                assert!((cue_ricochet.x - (-1.0)).abs() < 1e-4);
                assert!((distance - 80.0).abs() < 1e-3);
            }
            other => panic!("expected ball hit, got {other:?}"),
        }
    }

    #[test]
    fn test_nearest_ball_wins() {
        let cue = cue_at(Vec2::new(50.0, 200.0));
        let near = object_at(2, Vec2::new(200.0, 200.0));
        let far = object_at(3, Vec2::new(400.0, 200.0));
        let aim = AimState {
            angle_degrees: 0,
            power: 10,
        };
        // Same result regardless of iteration order
        for balls in [[near.clone(), far.clone()], [far.clone(), near.clone()]] {
            match predict(&cue, &balls, &aim, 600.0, 400.0) {
                Prediction::Ball { id, .. } => assert_eq!(id, 2),
                other => panic!("expected ball hit, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_ball_behind_ray_ignored() {
        let cue = cue_at(Vec2::new(300.0, 200.0));
        let behind = object_at(2, Vec2::new(100.0, 200.0));
        let aim = AimState {
            angle_degrees: 0,
            power: 10,
        };
        match predict(&cue, &[behind], &aim, 600.0, 400.0) {
            Prediction::Wall { point, .. } => assert!((point.x - 590.0).abs() < 1e-3),
            other => panic!("expected wall hit, got {other:?}"),
        }
    }

    #[test]
    fn test_wall_aim_south() {
        // 90° points down in canvas coordinates
        let cue = cue_at(Vec2::new(300.0, 200.0));
        let aim = AimState {
            angle_degrees: 90,
            power: 10,
        };
        match predict(&cue, &[], &aim, 600.0, 400.0) {
            Prediction::Wall { point, ricochet, .. } => {
                assert!((point.y - 390.0).abs() < 1e-3);
                assert!((ricochet.y - (-1.0)).abs() < 1e-3);
            }
            other => panic!("expected wall hit, got {other:?}"),
        }
    }

    #[test]
    fn test_no_hit_when_resting_on_rail_plane() {
        // Cue touching the right rail, aimed straight at it: the contact is at
        // t = 0, which is not ahead of the ball, and nothing else is in reach
        let cue = cue_at(Vec2::new(590.0, 200.0));
        let aim = AimState {
            angle_degrees: 0,
            power: 10,
        };
        assert_eq!(predict(&cue, &[], &aim, 600.0, 400.0), Prediction::NoHit);
        // The overlay degrades to nothing rather than garbage geometry
        let ov = overlay(&cue, &[], &Prediction::NoHit, 60.0);
        assert!(ov.segments.is_empty());
        assert!(ov.marker.is_none());
    }

    #[test]
    fn test_table_predict_inactive_while_moving() {
        let mut state = TableState::new(1);
        assert!(state.predict(&AimState::default()).is_some());

        state.shoot(&AimState::default()).unwrap();
        assert!(state.predict(&AimState::default()).is_none());
        assert!(state.aim_overlay(&AimState::default()).is_none());
        assert!(!state.can_shoot());
    }

    #[test]
    fn test_table_predict_none_without_cue() {
        let mut state = TableState::new(1);
        state.balls.clear();
        assert!(state.predict(&AimState::default()).is_none());
        assert!(!state.can_shoot());
    }

    #[test]
    fn test_table_predict_break_layout() {
        // Cue (100,200) aimed at the rack ball (500,200): contact at 480
        let state = TableState::new(1);
        match state.predict(&AimState {
            angle_degrees: 0,
            power: 10,
        }) {
            Some(Prediction::Ball { point, .. }) => {
                assert!((point.x - 480.0).abs() < 1e-3);
                assert!((point.y - 200.0).abs() < 1e-3);
            }
            other => panic!("expected ball hit, got {other:?}"),
        }
    }

    #[test]
    fn test_overlay_wall_shape() {
        let cue = cue_at(Vec2::new(10.0, 10.0));
        let prediction = cast_ray(&cue, &[], Vec2::new(1.0, 0.0), 600.0, 400.0);
        let ov = overlay(&cue, &[], &prediction, 60.0);
        assert_eq!(ov.segments.len(), 2);
        assert!(ov.marker.is_none());
        assert_eq!(ov.segments[0].from, cue.pos);
        assert_eq!(ov.segments[0].style, LineStyle::AIM);
        // Ricochet preview heads back the way we came
        assert!(ov.segments[1].to.x < ov.segments[1].from.x);
    }

    #[test]
    fn test_overlay_ball_shape() {
        let cue = cue_at(Vec2::new(0.0, 0.0));
        let target = object_at(2, Vec2::new(100.0, 0.0));
        let balls = [target];
        let prediction = cast_ray(&cue, &balls, Vec2::new(1.0, 0.0), 600.0, 400.0);
        let ov = overlay(&cue, &balls, &prediction, 60.0);
        assert_eq!(ov.segments.len(), 3);
        let marker = ov.marker.expect("ghost ball marker");
        assert!((marker.center.x - 80.0).abs() < 1e-3);
        assert_eq!(marker.radius, cue.radius);
        // Ejection preview carries the struck ball's color
        assert_eq!(ov.segments[1].style.color, "red");
    }
}
