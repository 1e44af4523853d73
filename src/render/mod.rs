//! Canvas 2D drawing of the table, balls, and aim overlay
//!
//! Pure consumer of sim state and overlay data; owns no simulation logic.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::sim::{AimOverlay, Ball, TableState};

const FELT_COLOR: &str = "#0b6623";

/// Draw the felt and every ball
pub fn draw_table(ctx: &CanvasRenderingContext2d, state: &TableState) {
    ctx.set_fill_style_str(FELT_COLOR);
    ctx.fill_rect(0.0, 0.0, state.width as f64, state.height as f64);

    for ball in &state.balls {
        draw_ball(ctx, ball);
    }
}

fn draw_ball(ctx: &CanvasRenderingContext2d, ball: &Ball) {
    ctx.begin_path();
    ctx.set_fill_style_str(ball.color.as_css());
    let _ = ctx.arc(
        ball.pos.x as f64,
        ball.pos.y as f64,
        ball.radius as f64,
        0.0,
        std::f64::consts::TAU,
    );
    ctx.fill();
}

fn dash_pattern(dash: Option<[f32; 2]>) -> JsValue {
    let arr = js_sys::Array::new();
    if let Some([on, off]) = dash {
        arr.push(&JsValue::from_f64(on as f64));
        arr.push(&JsValue::from_f64(off as f64));
    }
    arr.into()
}

/// Stroke the aim-line segments and the ghost-ball marker
pub fn draw_overlay(ctx: &CanvasRenderingContext2d, overlay: &AimOverlay) {
    for seg in &overlay.segments {
        ctx.begin_path();
        let _ = ctx.set_line_dash(&dash_pattern(seg.style.dash));
        ctx.set_stroke_style_str(seg.style.color);
        ctx.set_line_width(seg.style.width as f64);
        ctx.move_to(seg.from.x as f64, seg.from.y as f64);
        ctx.line_to(seg.to.x as f64, seg.to.y as f64);
        ctx.stroke();
    }
    let _ = ctx.set_line_dash(&dash_pattern(None));

    if let Some(marker) = overlay.marker {
        ctx.begin_path();
        ctx.set_stroke_style_str(marker.color);
        ctx.set_line_width(1.0);
        let _ = ctx.arc(
            marker.center.x as f64,
            marker.center.y as f64,
            marker.radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.stroke();
    }
}
