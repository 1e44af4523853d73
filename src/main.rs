//! Cue Shot entry point
//!
//! Handles platform-specific initialization: on the web this wires the canvas,
//! the angle/power sliders, and the shoot/add/remove buttons, then drives the
//! sim from requestAnimationFrame. Native runs a headless break-shot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement};

    use cue_shot::consts::*;
    use cue_shot::render;
    use cue_shot::sim::{AimState, TableState, step};

    /// Game instance holding all state
    struct Game {
        state: TableState,
        aim: AimState,
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("poolCanvas")
            .expect("missing #poolCanvas")
            .dyn_into()
            .expect("#poolCanvas is not a canvas");
        canvas.set_width(TABLE_WIDTH as u32);
        canvas.set_height(TABLE_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("context is not 2d");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: TableState::new(seed),
            aim: AimState::default(),
        }));
        log::info!("table ready, seed {seed}");

        setup_controls(game.clone(), &document);
        start_frame_loop(game, ctx);
    }

    fn slider_value(document: &Document, id: &str) -> Option<i32> {
        document
            .get_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()?
            .value()
            .parse()
            .ok()
    }

    fn on_click(document: &Document, id: &str, closure: Closure<dyn FnMut(web_sys::MouseEvent)>) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    fn setup_controls(game: Rc<RefCell<Game>>, document: &Document) {
        // Angle slider (mirrors its value into the #angleValue label)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(v) = slider_value(&document_clone, "angleRange") {
                    game.borrow_mut().aim.angle_degrees = v;
                    if let Some(label) = document_clone.get_element_by_id("angleValue") {
                        label.set_text_content(Some(&v.to_string()));
                    }
                }
            });
            if let Some(el) = document.get_element_by_id("angleRange") {
                let _ =
                    el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Power slider
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(v) = slider_value(&document_clone, "powerRange") {
                    game.borrow_mut().aim.power = v;
                }
            });
            if let Some(el) = document.get_element_by_id("powerRange") {
                let _ =
                    el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Shoot: guarded, a shot while the table is rolling is ignored
        {
            let game = game.clone();
            on_click(
                document,
                "shootBtn",
                Closure::new(move |_event: web_sys::MouseEvent| {
                    let mut g = game.borrow_mut();
                    let aim = g.aim;
                    match g.state.shoot(&aim) {
                        Ok(()) => {
                            if log::log_enabled!(log::Level::Debug) {
                                match serde_json::to_string(&g.state) {
                                    Ok(json) => log::debug!("table after shot: {json}"),
                                    Err(err) => log::debug!("table dump failed: {err}"),
                                }
                            }
                        }
                        Err(err) => log::info!("shot ignored: {err}"),
                    }
                }),
            );
        }

        // Add/remove object balls
        {
            let game = game.clone();
            on_click(
                document,
                "addBallBtn",
                Closure::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().state.add_balls(1);
                }),
            );
        }
        {
            let game = game.clone();
            on_click(
                document,
                "removeBallBtn",
                Closure::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().state.remove_balls(1);
                }),
            );
        }
    }

    /// Drive the sim at one step per display frame
    fn start_frame_loop(game: Rc<RefCell<Game>>, ctx: CanvasRenderingContext2d) {
        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();

        *g.borrow_mut() = Some(Closure::new(move || {
            {
                let mut game = game.borrow_mut();
                step(&mut game.state);
                render::draw_table(&ctx, &game.state);
                let aim = game.aim;
                if let Some(overlay) = game.state.aim_overlay(&aim) {
                    render::draw_overlay(&ctx, &overlay);
                }
            }
            request_animation_frame(f.borrow().as_ref().unwrap());
        }));

        request_animation_frame(g.borrow().as_ref().unwrap());
    }

    fn request_animation_frame(closure: &Closure<dyn FnMut()>) {
        web_sys::window()
            .expect("no window")
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .expect("requestAnimationFrame failed");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cue Shot (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    demo_break();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: break the rack and run the table to rest
#[cfg(not(target_arch = "wasm32"))]
fn demo_break() {
    use cue_shot::sim::{AimState, Motion, TableState, step};

    let mut state = TableState::new(42);
    state
        .shoot(&AimState {
            angle_degrees: 0,
            power: 15,
        })
        .expect("fresh table starts at rest");

    let mut frames = 0u32;
    while state.motion() == Motion::Moving {
        step(&mut state);
        frames += 1;
        assert!(frames < 100_000, "table never settled");
    }

    for ball in &state.balls {
        log::info!(
            "ball {} ({:?}) settled at ({:.1}, {:.1})",
            ball.id,
            ball.color,
            ball.pos.x,
            ball.pos.y
        );
        assert!(ball.pos.x >= ball.radius && ball.pos.x <= state.width - ball.radius);
        assert!(ball.pos.y >= ball.radius && ball.pos.y <= state.height - ball.radius);
    }
    match serde_json::to_string(&state) {
        Ok(json) => log::debug!("settled table: {json}"),
        Err(err) => log::debug!("table dump failed: {err}"),
    }
    println!("✓ Table settled after {frames} frames");
}
