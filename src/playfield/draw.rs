// Canvas rendering for one frame. Reads the simulation, never mutates it.

use std::f64::consts::{PI, TAU};

use web_sys::CanvasRenderingContext2d;

use super::{SPARKLE_MS, StageState, platform_center};
use crate::sim::{Entity, Obstacle};

pub(super) fn render_stage(state: &StageState, now: f64) {
    let ctx = &state.ctx;
    let w = f64::from(state.canvas.width());
    let h = f64::from(state.canvas.height());
    let cfg = state.sim.config();

    // Night-sky gradient backdrop
    let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    sky.add_color_stop(0.0, "#1b1d33").ok();
    sky.add_color_stop(1.0, "#2a1f2d").ok();
    ctx.set_fill_style_canvas_gradient(&sky);
    ctx.fill_rect(0.0, 0.0, w, h);

    // Danger band below the fall-through line
    let fall_y = f64::from(cfg.fall_through_y);
    if fall_y < h {
        ctx.set_fill_style_str("rgba(255,80,80,0.10)");
        ctx.fill_rect(0.0, fall_y, w, h - fall_y);
        ctx.set_stroke_style_str("rgba(255,80,80,0.35)");
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.move_to(0.0, fall_y);
        ctx.line_to(w, fall_y);
        ctx.stroke();
    }

    for p in state.sim.obstacles() {
        draw_platform(ctx, p);
    }

    draw_cat(ctx, state.sim.entity(), now);

    for s in &state.sparkles {
        let age = ((now - s.start_ms) / SPARKLE_MS).clamp(0.0, 1.0);
        let alpha = 1.0 - age;
        let reach = 6.0 + age * 18.0;
        ctx.set_stroke_style_str(&format!("rgba(255,230,140,{alpha})"));
        ctx.set_line_width(2.0);
        for i in 0..6 {
            let a = PI + (i as f64 + 0.5) * PI / 6.0;
            ctx.begin_path();
            ctx.move_to(s.x + a.cos() * 4.0, s.y + a.sin() * 4.0);
            ctx.line_to(s.x + a.cos() * reach, s.y + a.sin() * reach);
            ctx.stroke();
        }
    }

    if state.sim.is_terminal() {
        draw_game_over(state, w, h);
    }
}

fn draw_platform(ctx: &CanvasRenderingContext2d, p: &Obstacle) {
    let (x, y) = (f64::from(p.x()), f64::from(p.y()));
    let (pw, ph) = (f64::from(p.width()), f64::from(p.height()));
    ctx.set_fill_style_str("#6b8f4e");
    ctx.fill_rect(x, y, pw, ph);
    // grassy top edge
    ctx.set_fill_style_str("#9fd36b");
    ctx.fill_rect(x, y, pw, ph.min(4.0));
    // centre rivet
    let cx = f64::from(platform_center(p));
    ctx.set_fill_style_str("rgba(0,0,0,0.25)");
    ctx.begin_path();
    ctx.arc(cx, y + ph * 0.6, 2.0, 0.0, TAU).ok();
    ctx.fill();
}

fn draw_cat(ctx: &CanvasRenderingContext2d, cat: &Entity, now: f64) {
    let (x, y) = (f64::from(cat.x()), f64::from(cat.y()));
    let (cw, ch) = (f64::from(cat.width()), f64::from(cat.height()));
    let cx = x + cw / 2.0;

    // Tail, swaying slowly
    let sway = (now / 300.0).sin() * cw * 0.12;
    ctx.set_stroke_style_str("#f4a261");
    ctx.set_line_width(4.0);
    ctx.begin_path();
    ctx.move_to(x + cw * 0.9, y + ch * 0.8);
    ctx.quadratic_curve_to(x + cw * 1.25, y + ch * 0.6, x + cw * 1.1 + sway, y + ch * 0.25);
    ctx.stroke();

    // Body
    ctx.set_fill_style_str("#f4a261");
    ctx.fill_rect(x + cw * 0.1, y + ch * 0.45, cw * 0.8, ch * 0.55);

    // Head
    let head_r = cw * 0.3;
    let head_y = y + ch * 0.35;
    ctx.begin_path();
    ctx.arc(cx, head_y, head_r, 0.0, TAU).ok();
    ctx.fill();

    // Ears
    for side in [-1.0, 1.0] {
        ctx.begin_path();
        ctx.move_to(cx + side * head_r * 0.35, head_y - head_r * 0.8);
        ctx.line_to(cx + side * head_r * 0.95, head_y - head_r * 1.45);
        ctx.line_to(cx + side * head_r * 1.0, head_y - head_r * 0.3);
        ctx.fill();
    }

    // Eyes squint while airborne
    ctx.set_fill_style_str("#1d1d1d");
    for side in [-1.0, 1.0] {
        let ex = cx + side * head_r * 0.4;
        if cat.is_jumping() {
            ctx.fill_rect(ex - 3.0, head_y - 1.0, 6.0, 2.0);
        } else {
            ctx.begin_path();
            ctx.arc(ex, head_y, 2.5, 0.0, TAU).ok();
            ctx.fill();
        }
    }
}

fn draw_game_over(state: &StageState, w: f64, h: f64) {
    let ctx = &state.ctx;
    ctx.set_fill_style_str("rgba(0,0,0,0.55)");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str("#ffffff");
    ctx.set_font("48px 'Fira Code', monospace");
    ctx.set_text_align("center");
    ctx.set_line_width(6.0);
    ctx.set_stroke_style_str("#000000");
    let cx = w / 2.0;
    let cy = h / 2.0;
    ctx.stroke_text("GAME OVER", cx, cy).ok();
    ctx.fill_text("GAME OVER", cx, cy).ok();
    ctx.set_font("18px 'Fira Code', monospace");
    let best = state.best_score.max(state.sim.score());
    ctx.fill_text(
        &format!("{}: {} (best {})", state.stage_name, state.sim.score(), best),
        cx,
        cy + 40.0,
    )
    .ok();
    ctx.fill_text("Press Enter or click to play again", cx, cy + 70.0)
        .ok();
}
