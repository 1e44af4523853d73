//! Per-frame simulation step
//!
//! The external driver (requestAnimationFrame on the web, a plain loop in the
//! native demo) calls [`step`] once per display frame. Ordering is fixed:
//! every ball integrates first, then contacts resolve pairwise. Prediction
//! reads the table only after both phases, so identical inputs replay
//! identically.

use super::collision::resolve_pair;
use super::state::TableState;

/// Advance the table by one frame: integrate every ball, then resolve every
/// unordered pair once. O(n²) pair scan; table-sized ball counts make spatial
/// partitioning pointless.
pub fn step(state: &mut TableState) {
    state.time_ticks += 1;
    let (width, height) = (state.width, state.height);
    let tuning = state.tuning;

    for ball in &mut state.balls {
        ball.integrate(width, height, &tuning);
    }

    for i in 0..state.balls.len() {
        let (head, tail) = state.balls.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            resolve_pair(a, b, tuning.separation_margin);
        }
    }

    // Overlap separation can shove a rail-adjacent ball past the boundary;
    // containment must hold at the end of every step
    for ball in &mut state.balls {
        ball.pos.x = ball.pos.x.clamp(ball.radius, width - ball.radius);
        ball.pos.y = ball.pos.y.clamp(ball.radius, height - ball.radius);
    }
}
