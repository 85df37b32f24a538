//! Browser front-end for the platform simulation.
//!
//! Owns the canvas, the animation-frame loop, keyboard / pointer input and the DOM
//! overlays (score, hearts, stage name). All game rules live in `crate::sim`; this
//! module only decides *when* to step, forwards input between steps, and draws
//! the resulting snapshot.
//!
//! Ticks run at a fixed 60 Hz cadence derived from animation-frame timestamps, so
//! the simulation speed does not depend on the display refresh rate.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use crate::sim::{Obstacle, SimConfig, SimEvent, Simulation, stage_by_name};

mod clock;
mod draw;

use clock::TickClock;

pub const TICK_HZ: f64 = 60.0;
/// Upper bound on catch-up ticks run inside one animation frame.
const MAX_TICKS_PER_FRAME: u32 = 5;
const SPARKLE_MS: f64 = 350.0;
const CANVAS_ID: &str = "hop-canvas";
// Marks a canvas whose pointer listener is already attached.
const LISTENERS_ATTR: &str = "data-hop-listeners";

// --- Input -------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Jump,
    Left,
    Right,
    Restart,
}

/// Map a `KeyboardEvent.key` value to a game action.
pub(crate) fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Spacebar" | "ArrowUp" => Some(KeyAction::Jump),
        "ArrowLeft" => Some(KeyAction::Left),
        "ArrowRight" => Some(KeyAction::Right),
        "Enter" => Some(KeyAction::Restart),
        k if k.len() == 1 => match k.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('w') => Some(KeyAction::Jump),
            Some('a') => Some(KeyAction::Left),
            Some('d') => Some(KeyAction::Right),
            Some('r') => Some(KeyAction::Restart),
            _ => None,
        },
        _ => None,
    }
}

/// Keys whose browser default (page scroll) is suppressed while playing. Letter
/// keys keep their default so the host page can still take text input.
pub(crate) fn suppresses_default(key: &str) -> bool {
    matches!(key, " " | "Spacebar" | "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight")
}

/// Tag names of elements that own keyboard input themselves.
pub(crate) fn is_text_entry(tag: &str) -> bool {
    matches!(tag.to_ascii_uppercase().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
}

fn typing_into_page(evt: &web_sys::KeyboardEvent) -> bool {
    let Some(el) = evt
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return false;
    };
    is_text_entry(&el.tag_name()) || el.is_content_editable()
}

// --- Runtime state -----------------------------------------------------------

// Short-lived landing burst drawn under the cat's feet.
struct Sparkle {
    x: f64,
    y: f64,
    start_ms: f64,
}

struct StageState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    stage_name: String,
    sim: Simulation,
    clock: TickClock,
    sparkles: Vec<Sparkle>,
    best_score: u64,
    holding_left: bool,
    holding_right: bool,
}

impl StageState {
    fn restart(&mut self, now: f64) {
        self.best_score = self.best_score.max(self.sim.score());
        self.sim = self.sim.reset(fresh_seed());
        self.clock = TickClock::new(TICK_HZ, now);
        self.sparkles.clear();
    }
}

thread_local! {
    static STAGE_STATE: std::cell::RefCell<Option<StageState>> = const { std::cell::RefCell::new(None) };
    static LOOP_RUNNING: std::cell::Cell<bool> = const { std::cell::Cell::new(false) };
}

// --- Entry points ------------------------------------------------------------

/// Start (or restart) the game on the named stage preset.
#[wasm_bindgen]
pub fn start_game_with_stage(name: &str) -> Result<(), JsValue> {
    let stage = stage_by_name(name)
        .ok_or_else(|| JsValue::from_str(&format!("unknown stage `{name}`")))?;
    start_with_config(stage.name, stage.blurb, stage.config.clone())
}

/// Start the game from a JSON `SimConfig`; missing fields take their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config: SimConfig =
        serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    start_with_config("custom", "", config)
}

/// Throw away the current run and begin a new one with the same stage.
#[wasm_bindgen]
pub fn reset_game() {
    let now = now_ms();
    STAGE_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            state.restart(now);
        }
    });
}

#[wasm_bindgen]
pub fn current_score() -> f64 {
    STAGE_STATE.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|s| s.sim.score() as f64)
            .unwrap_or(0.0)
    })
}

pub(crate) fn start_with_config(
    stage_name: &str,
    blurb: &str,
    config: SimConfig,
) -> Result<(), JsValue> {
    let seed = fresh_seed();
    let sim = Simulation::new(config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_attribute("style", "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); box-shadow:0 0 32px 0 rgba(0,0,0,0.18); border-radius:18px; border:2px solid #222; background:#181818; z-index:20;").ok();
        body.append_child(&c)?;
        c
    };
    if !canvas.has_attribute(LISTENERS_ATTR) {
        install_canvas_listeners(&canvas)?;
        canvas.set_attribute(LISTENERS_ATTR, "1")?;
    }
    canvas.set_width(sim.config().width.round() as u32);
    canvas.set_height(sim.config().height.round() as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;
    ctx.set_text_align("center");

    ensure_overlay(&doc, &body, "hop-score", "Score: 0", "position:fixed; top:10px; left:12px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45; letter-spacing:0.5px;")?;
    ensure_overlay(&doc, &body, "hop-lives", "", "position:fixed; top:10px; left:170px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; z-index:44; letter-spacing:0.5px;")?;
    ensure_overlay(&doc, &body, "hop-stage", "", "position:fixed; top:10px; right:12px; font-family:'Fira Code', monospace; font-size:13px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#9ad; z-index:44;")?;
    if let Some(el) = doc.get_element_by_id("hop-stage") {
        el.set_text_content(Some(&stage_label(stage_name, blurb)));
    }

    let now = now_ms();
    let previous_best = STAGE_STATE.with(|cell| cell.borrow().as_ref().map(|s| s.best_score.max(s.sim.score())));
    let state = StageState {
        canvas,
        ctx,
        stage_name: stage_name.to_string(),
        sim,
        clock: TickClock::new(TICK_HZ, now),
        sparkles: Vec::new(),
        best_score: previous_best.unwrap_or(0),
        holding_left: false,
        holding_right: false,
    };
    log::info!("stage `{}` started (seed {seed})", state.stage_name);
    STAGE_STATE.with(|b| b.replace(Some(state)));

    if !LOOP_RUNNING.with(|r| r.replace(true)) {
        install_key_listeners(&doc)?;
        start_stage_loop();
    }
    Ok(())
}

fn ensure_overlay(
    doc: &web_sys::Document,
    body: &web_sys::HtmlElement,
    id: &str,
    text: &str,
    style: &str,
) -> Result<(), JsValue> {
    if doc.get_element_by_id(id).is_none() {
        let div = doc.create_element("div")?;
        div.set_id(id);
        div.set_text_content(Some(text));
        div.set_attribute("style", style).ok();
        body.append_child(&div)?;
    }
    Ok(())
}

fn install_key_listeners(doc: &web_sys::Document) -> Result<(), JsValue> {
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if typing_into_page(&evt) {
                return;
            }
            let key = evt.key();
            let Some(action) = key_action(&key) else {
                return;
            };
            if suppresses_default(&key) {
                evt.prevent_default();
            }
            let now = now_ms();
            STAGE_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    match action {
                        KeyAction::Jump => state.sim.jump(),
                        KeyAction::Left => state.holding_left = true,
                        KeyAction::Right => state.holding_right = true,
                        KeyAction::Restart => {
                            if state.sim.is_terminal() {
                                state.restart(now);
                            }
                        }
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            STAGE_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    match key_action(&evt.key()) {
                        Some(KeyAction::Left) => state.holding_left = false,
                        Some(KeyAction::Right) => state.holding_right = false,
                        _ => {}
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn install_canvas_listeners(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    // Clicking the canvas jumps; after game over it starts a new run.
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        let now = now_ms();
        STAGE_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                if state.sim.is_terminal() {
                    state.restart(now);
                } else {
                    state.sim.jump();
                }
            }
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_stage_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        STAGE_STATE.with(|state_cell| {
            if let Some(state) = state_cell.borrow_mut().as_mut() {
                stage_frame(state, ts);
            }
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(cb: &FrameCallback) {
    let Some(w) = window() else {
        return;
    };
    if let Some(closure) = cb.borrow().as_ref() {
        if w.request_animation_frame(closure.as_ref().unchecked_ref()).is_err() {
            log::warn!("requestAnimationFrame failed; frame loop stopped");
        }
    }
}

// --- Tick & rendering --------------------------------------------------------

fn stage_frame(state: &mut StageState, now: f64) {
    let due = state.clock.due_ticks(now, MAX_TICKS_PER_FRAME);
    for _ in 0..due {
        run_tick(state, now);
        if state.sim.is_terminal() {
            break;
        }
    }
    state.sparkles.retain(|s| now - s.start_ms < SPARKLE_MS);
    draw::render_stage(state, now);
    update_overlays(state);
}

fn run_tick(state: &mut StageState, now: f64) {
    match (state.holding_left, state.holding_right) {
        (true, false) => state.sim.steer(-1.0),
        (false, true) => state.sim.steer(1.0),
        _ => {}
    }
    let was_airborne = state.sim.entity().is_jumping();
    for event in state.sim.step() {
        match event {
            SimEvent::Landed { top, .. } if was_airborne => {
                let cat = state.sim.entity();
                state.sparkles.push(Sparkle {
                    x: f64::from(cat.x() + cat.width() / 2.0),
                    y: f64::from(top),
                    start_ms: now,
                });
            }
            SimEvent::GameOver { score } => {
                state.best_score = state.best_score.max(score);
            }
            _ => {}
        }
    }
}

/// Text for the stage overlay: the name, then the blurb when there is one.
pub(crate) fn stage_label(name: &str, blurb: &str) -> String {
    if blurb.is_empty() {
        name.to_string()
    } else {
        format!("{name} · {blurb}")
    }
}

/// Hearts markup for the lives overlay: filled for remaining lives, hollow for lost ones.
pub(crate) fn hearts_html(lives: u32, max_lives: u32) -> String {
    let filled = lives.min(max_lives);
    let mut html = String::new();
    for _ in 0..filled {
        html.push_str("<span style='color:#ff4d4d;font-size:16px;margin-right:6px;'>♥</span>");
    }
    for _ in filled..max_lives {
        html.push_str("<span style='color:#6b6b6b;font-size:16px;margin-right:6px;'>♡</span>");
    }
    html
}

fn update_overlays(state: &StageState) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(score_el) = doc.get_element_by_id("hop-score") {
        score_el.set_text_content(Some(&format!("Score: {}", state.sim.score())));
    }
    if let Some(lives_el) = doc.get_element_by_id("hop-lives") {
        lives_el.set_inner_html(&hearts_html(state.sim.lives(), state.sim.config().lives));
    }
}

// --- Helpers -----------------------------------------------------------------

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(feature = "rng")]
fn fresh_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            log::warn!("getrandom failed ({e}); seeding from the clock");
            clock_seed()
        }
    }
}

#[cfg(not(feature = "rng"))]
fn fresh_seed() -> u64 {
    clock_seed()
}

fn clock_seed() -> u64 {
    // Sub-millisecond bits of performance.now() vary enough between page loads.
    (now_ms() * 1_000.0) as u64 ^ 0x9E37_79B9_7F4A_7C15
}

/// Centre x of the platform.
pub(crate) fn platform_center(p: &Obstacle) -> f32 {
    p.x() + p.width() / 2.0
}
