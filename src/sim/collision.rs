//! Pairwise elastic collision resolution
//!
//! Velocities are rotated into the frame aligned with the line of centers,
//! a 1D elastic exchange is applied along the normal axis only (tangential
//! components are untouched), then everything rotates back. Overlapping pairs
//! are pushed apart so discrete stepping can't leave balls stuck together.

use glam::Vec2;

use super::state::Ball;

/// Center distances below this are treated as degenerate, not as a contact
const MIN_CONTACT_DIST: f32 = 1e-4;

/// Rotate a velocity into (`reverse = true`) or out of the contact frame
#[inline]
fn rotate(v: Vec2, sin: f32, cos: f32, reverse: bool) -> Vec2 {
    if reverse {
        Vec2::new(v.x * cos + v.y * sin, v.y * cos - v.x * sin)
    } else {
        Vec2::new(v.x * cos - v.y * sin, v.y * cos + v.x * sin)
    }
}

/// Detect and resolve a contact between two balls.
///
/// Returns `true` if the pair was in contact and got resolved. Coincident
/// centers have no usable contact normal, so that pair is skipped rather than
/// resolved along a garbage direction.
pub fn resolve_pair(a: &mut Ball, b: &mut Ball, separation_margin: f32) -> bool {
    let delta = b.pos - a.pos;
    let dist = delta.length();

    if dist >= a.radius + b.radius {
        return false;
    }
    if dist < MIN_CONTACT_DIST {
        log::debug!("skipping degenerate contact: balls {} and {} coincide", a.id, b.id);
        return false;
    }

    let angle = delta.y.atan2(delta.x);
    let (sin, cos) = angle.sin_cos();

    // Contact frame: x' along the line of centers
    let va = rotate(a.vel, sin, cos, true);
    let vb = rotate(b.vel, sin, cos, true);

    // 1D elastic exchange on the normal axis, from conservation of momentum
    // plus the relative-velocity-reversal identity
    let rel = va.x - vb.x;
    let va_n = ((a.mass - b.mass) * va.x + 2.0 * b.mass * vb.x) / (a.mass + b.mass);
    let vb_n = rel + va_n;

    a.vel = rotate(Vec2::new(va_n, va.y), sin, cos, false);
    b.vel = rotate(Vec2::new(vb_n, vb.y), sin, cos, false);

    // Push the pair apart along the contact normal; the margin leaves a small
    // gap so the same contact doesn't re-fire next step
    let overlap = 0.5 * (a.radius + b.radius - dist + separation_margin);
    let push = Vec2::new(cos, sin) * overlap;
    a.pos -= push;
    b.pos += push;

    true
}
