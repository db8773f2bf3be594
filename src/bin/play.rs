use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use rand::{SeedableRng, rngs::StdRng};
use std::time::{Duration, Instant};

use tilecast::{
    config::Opts,
    renderer::{Effects, Renderer, RendererExt, Software, Viewport, cast_rays, compose},
    sim::{Buttons, InputCmd, PLAYER_START, Player, TicRunner},
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    let map = opts.load_map()?;
    log::info!(
        "level {}: {}×{} cells",
        opts.map
            .as_deref()
            .map_or_else(|| "<built-in>".into(), |p| p.display().to_string()),
        map.width(),
        map.height()
    );

    let start = if map.is_wall(PLAYER_START.x, PLAYER_START.y) {
        let fallback = map
            .first_floor_center()
            .ok_or_else(|| anyhow::anyhow!("level has no floor cell to start on"))?;
        log::warn!("start {PLAYER_START} is inside a wall; using {fallback}");
        fallback
    } else {
        PLAYER_START
    };
    let mut sim = TicRunner::new(Player::new(start, 0.0));

    let mut rng = match opts.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    match sim.spawn_enemies(&map, opts.enemies, &mut rng) {
        Ok(n) => log::info!("spawned {n} enemies"),
        Err(e) => log::warn!("{e}; playing with {} enemies", sim.enemy_count()),
    }

    let (w, h) = (opts.width as usize, opts.height as usize);
    let view = Viewport::new(w, h);
    let mut renderer = Software::default();
    let mut effects = Effects::new();

    let mut win = Window::new("tilecast", w, h, WindowOptions::default())?;
    win.set_target_fps(opts.fps);

    // scratch reused every frame
    let mut rays = Vec::new();
    let mut enemies = Vec::new();
    let mut calls = Vec::new();

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* --------------- one InputCmd per frame --------------------------- */
        let held = |keys: &[Key]| keys.iter().any(|&k| win.is_key_down(k));
        let mut buttons = Buttons::empty();
        buttons.set(Buttons::FORWARD, held(&[Key::W, Key::Up]));
        buttons.set(Buttons::BACKWARD, held(&[Key::S, Key::Down]));
        buttons.set(Buttons::LEFT, held(&[Key::A, Key::Left]));
        buttons.set(Buttons::RIGHT, held(&[Key::D, Key::Right]));
        // edge-trigger
        buttons.set(
            Buttons::FIRE,
            [Key::Space, Key::LeftCtrl, Key::RightCtrl]
                .iter()
                .any(|&k| win.is_key_pressed(k, KeyRepeat::No)),
        );

        if let Some(hit) = sim.apply_input(&InputCmd::new(buttons)) {
            effects.fire(t0);
            if let Some(e) = hit.hit {
                log::debug!("hit {e:?}, {} killed", hit.killed);
            }
        }

        sim.pump(&map);
        effects.update(Instant::now());

        /* --------------- draw --------------------------------------------- */
        let cam = sim.player().camera();
        cast_rays(&map, &cam, &mut rays);
        sim.enemy_positions(&mut enemies);
        compose(&rays, &cam, &enemies, view, &mut calls);

        renderer.begin_frame(w, h);
        renderer.draw_calls(&calls);
        renderer.draw_effects(&effects);
        renderer.end_frame(|fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            win.update_with_buffer(fb, w, h)
        })?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            log::trace!(
                "avg frame: {:.2} ms ({:.1} FPS), {} enemies left",
                avg_ms,
                1000.0 / avg_ms,
                sim.enemy_count()
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
