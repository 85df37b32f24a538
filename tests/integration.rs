// Integration tests (native) for the `hop-cat` crate.
// These exercise the simulation through its public API only and never touch
// wasm/browser APIs, so they run under `cargo test` on the host.

use hop_cat::{ConfigError, Obstacle, SimConfig, SimEvent, Simulation, stage_by_name, stages};

// Spawned platforms sit at x = 300, well clear of a cat standing at x = 0.
fn isolated(start_y: f32, floor_y: f32, fall_through_y: f32) -> SimConfig {
    SimConfig {
        start_x: 0.0,
        start_y,
        floor_y,
        fall_through_y,
        spawn_x_min: 300.0,
        spawn_x_max: 300.0,
        ..SimConfig::default()
    }
}

fn run_until<F>(sim: &mut Simulation, max_ticks: u32, mut done: F) -> Vec<SimEvent>
where
    F: FnMut(&Simulation, &[SimEvent]) -> bool,
{
    for _ in 0..max_ticks {
        let events = sim.step();
        if done(sim, &events) {
            return events;
        }
    }
    panic!("condition not reached within {max_ticks} ticks");
}

#[test]
fn resting_cat_is_scooped_up_by_descending_platform() {
    let cfg = isolated(500.0, 550.0, 600.0);
    let platform = Obstacle::new(0.0, 100.0, 90.0, 14.0, 2.0, 10);
    let mut sim = Simulation::with_obstacles(cfg, 3, vec![platform]).unwrap();

    let events = run_until(&mut sim, 400, |s, _| s.score() != 0);

    assert_eq!(sim.score(), 10);
    assert!(matches!(events.as_slice(), [SimEvent::Landed { points: 10, .. }]));
    let cat = sim.entity();
    assert!(!cat.is_jumping());
    assert_eq!(cat.velocity_y(), 0.0);
    assert_eq!(cat.y() + cat.height(), sim.obstacles()[0].y());
}

#[test]
fn jump_arc_ends_on_platform() {
    let cfg = isolated(300.0, 550.0, 600.0);
    let platform = Obstacle::new(0.0, 420.0, 90.0, 14.0, 2.0, 10);
    let mut sim = Simulation::with_obstacles(cfg, 3, vec![platform]).unwrap();

    sim.jump();
    assert!(sim.entity().is_jumping());
    let mut peak = sim.entity().y();
    let events = run_until(&mut sim, 200, |s, ev| {
        peak = peak.min(s.entity().y());
        !ev.is_empty()
    });

    assert!(peak < 300.0, "the cat should have risen first");
    let [SimEvent::Landed { top, points }] = events.as_slice() else {
        panic!("expected a single landing, got {events:?}");
    };
    assert_eq!(*points, 10);
    assert!(!sim.entity().is_jumping());
    assert_eq!(sim.entity().y() + sim.entity().height(), *top);
}

#[test]
fn falling_through_costs_lives_until_game_over() {
    let cfg = isolated(500.0, 2_000.0, 600.0);
    let mut sim = Simulation::with_obstacles(cfg, 11, Vec::new()).unwrap();
    assert_eq!(sim.lives(), 3);

    for expected in [2, 1] {
        let events = run_until(&mut sim, 100, |_, ev| !ev.is_empty());
        assert_eq!(events, vec![SimEvent::LifeLost { remaining: expected }]);
        assert_eq!(sim.lives(), expected);
        assert_eq!(sim.entity().y(), 500.0);
        assert_eq!(sim.entity().velocity_y(), 0.0);
        assert!(!sim.is_terminal());
    }

    let events = run_until(&mut sim, 100, |_, ev| !ev.is_empty());
    assert_eq!(
        events,
        vec![
            SimEvent::LifeLost { remaining: 0 },
            SimEvent::GameOver { score: 0 }
        ]
    );
    assert!(sim.is_terminal());
    assert_eq!(sim.lives(), 0);
}

#[test]
fn default_geometry_costs_a_life_for_a_missed_jump() {
    // default floor clamp (550) and fall-through line (520), no platform under the cat
    let cfg = SimConfig {
        start_x: 0.0,
        spawn_x_min: 300.0,
        spawn_x_max: 300.0,
        ..SimConfig::default()
    };
    let mut sim = Simulation::with_obstacles(cfg.clone(), 4, Vec::new()).unwrap();

    let mut lost = 0;
    run_until(&mut sim, 500, |s, ev| {
        assert!(s.entity().y() <= cfg.floor_y);
        lost += ev
            .iter()
            .filter(|e| matches!(e, SimEvent::LifeLost { .. }))
            .count();
        s.is_terminal()
    });
    assert_eq!(lost, 3);
    assert_eq!(sim.lives(), 0);
}

#[test]
fn floor_clamp_and_fall_through_in_the_same_tick() {
    // one tick of gravity carries the cat past the floor; the clamp lands it at
    // 550, which is still beyond the fall-through line
    let cfg = SimConfig {
        gravity: 60.0,
        ..isolated(500.0, 550.0, 520.0)
    };
    let mut sim = Simulation::with_obstacles(cfg, 0, Vec::new()).unwrap();

    let events = sim.step();
    assert_eq!(events, vec![SimEvent::LifeLost { remaining: 2 }]);
    assert_eq!(sim.entity().y(), 500.0);
    assert_eq!(sim.entity().velocity_y(), 0.0);
}

#[test]
fn landed_cat_never_sinks_into_a_platform() {
    for (speed, gravity) in [(2.0, 0.5), (0.25, 0.5), (5.0, 0.1)] {
        let cfg = SimConfig {
            gravity,
            obstacle_speed: speed,
            ..isolated(500.0, 550.0, 600.0)
        };
        let platform = Obstacle::new(0.0, 530.0, 90.0, 14.0, speed, 10);
        let mut sim = Simulation::with_obstacles(cfg, 6, vec![platform]).unwrap();

        run_until(&mut sim, 100, |_, ev| {
            ev.iter().any(|e| matches!(e, SimEvent::Landed { .. }))
        });
        for _ in 0..30 {
            sim.step();
            for o in sim.obstacles() {
                assert!(
                    !o.collides_with(sim.entity()),
                    "speed {speed}, gravity {gravity}: cat overlaps platform at y {}",
                    o.y()
                );
            }
        }
    }
}

#[test]
fn respawn_keeps_horizontal_position() {
    let cfg = isolated(500.0, 2_000.0, 600.0);
    let mut sim = Simulation::with_obstacles(cfg, 2, Vec::new()).unwrap();
    sim.steer(1.0);
    sim.steer(1.0);
    let x = sim.entity().x();
    run_until(&mut sim, 100, |_, ev| !ev.is_empty());
    assert_eq!(sim.entity().x(), x);
}

#[test]
fn terminal_state_is_frozen() {
    let cfg = SimConfig {
        lives: 1,
        ..isolated(500.0, 2_000.0, 600.0)
    };
    let mut sim = Simulation::with_obstacles(cfg, 5, Vec::new()).unwrap();
    run_until(&mut sim, 100, |s, _| s.is_terminal());

    let frozen = sim.snapshot();
    for _ in 0..50 {
        assert!(sim.step().is_empty());
    }
    assert_eq!(sim.snapshot(), frozen);
}

#[test]
fn long_run_keeps_invariants() {
    let cfg = SimConfig::default();
    let min = cfg.min_obstacles;
    let mut sim = Simulation::new(cfg.clone(), 7).unwrap();
    let mut last_score = 0;
    let mut last_lives = sim.lives();

    for tick in 0..3_000u32 {
        if tick % 45 == 0 {
            sim.jump();
        }
        if tick % 200 < 60 {
            sim.steer(if tick % 400 < 200 { 1.0 } else { -1.0 });
        }
        let events = sim.step();

        assert!(sim.obstacles().len() >= min, "tick {tick}");
        assert!(sim.score() >= last_score, "score went down at tick {tick}");
        assert!(sim.lives() <= last_lives);
        assert_eq!(sim.is_terminal(), sim.lives() == 0);
        let cat = sim.entity();
        assert!(cat.y() <= cfg.floor_y);
        assert!(cat.x() >= 0.0 && cat.x() <= cfg.max_entity_x());
        let respawned = events
            .iter()
            .any(|e| matches!(e, SimEvent::LifeLost { .. }));
        for event in &events {
            if let SimEvent::Landed { top, .. } = event {
                if !respawned {
                    assert!((cat.y() + cat.height() - top).abs() < 1e-3);
                }
            }
        }
        last_score = sim.score();
        last_lives = sim.lives();
    }
}

#[test]
fn same_seed_same_run() {
    let play = |seed: u64| {
        let mut sim = Simulation::new(SimConfig::default(), seed).unwrap();
        for tick in 0..600 {
            if tick % 37 == 0 {
                sim.jump();
            }
            sim.step();
        }
        sim.snapshot()
    };
    assert_eq!(play(42), play(42));
}

#[test]
fn different_seeds_place_platforms_differently() {
    let xs = |seed: u64| -> Vec<f32> {
        Simulation::new(SimConfig::default(), seed)
            .unwrap()
            .obstacles()
            .iter()
            .skip(1)
            .map(|o| o.x())
            .collect()
    };
    assert_ne!(xs(1), xs(2));
}

#[test]
fn spawned_platforms_respect_spawn_range() {
    let cfg = SimConfig {
        spawn_x_min: 50.0,
        spawn_x_max: 120.0,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(cfg, 99).unwrap();
    let start_platform_x = sim.obstacles()[0].x();
    for _ in 0..1_000 {
        sim.step();
        for o in sim.obstacles() {
            assert!((50.0..=120.0).contains(&o.x()) || o.x() == start_platform_x);
        }
    }
}

#[test]
fn reset_starts_over_with_same_config() {
    let cfg = SimConfig {
        lives: 1,
        ..isolated(500.0, 2_000.0, 600.0)
    };
    let mut sim = Simulation::with_obstacles(cfg.clone(), 1, Vec::new()).unwrap();
    run_until(&mut sim, 100, |s, _| s.is_terminal());

    let fresh = sim.reset(8);
    assert!(!fresh.is_terminal());
    assert_eq!(fresh.score(), 0);
    assert_eq!(fresh.ticks(), 0);
    assert_eq!(fresh.seed(), 8);
    assert_eq!(fresh.lives(), cfg.lives);
    assert_eq!(fresh.config(), &cfg);
    assert_eq!(fresh.entity().y(), cfg.start_y);
}

#[test]
fn invalid_configs_are_rejected() {
    let no_lives = SimConfig {
        lives: 0,
        ..SimConfig::default()
    };
    assert_eq!(
        Simulation::new(no_lives, 0).err(),
        Some(ConfigError::NoLives)
    );

    let no_obstacles = SimConfig {
        min_obstacles: 0,
        ..SimConfig::default()
    };
    assert_eq!(
        Simulation::with_obstacles(no_obstacles, 0, Vec::new()).err(),
        Some(ConfigError::NoObstacles)
    );

    let flat = SimConfig {
        obstacle_height: 0.0,
        ..SimConfig::default()
    };
    let err = Simulation::new(flat, 0).err().unwrap();
    assert_eq!(err.to_string(), "`obstacle_height` must be greater than zero (got 0)");
}

#[test]
fn caller_platforms_must_keep_falling() {
    let stalled = Obstacle::new(0.0, 100.0, 90.0, 14.0, -1.0, 10);
    let err = Simulation::with_obstacles(SimConfig::default(), 0, vec![stalled]).err();
    assert_eq!(
        err,
        Some(ConfigError::NotPositive {
            field: "obstacle.speed",
            value: -1.0
        })
    );

    let adrift = Obstacle::new(0.0, f32::NAN, 90.0, 14.0, 2.0, 10);
    assert!(matches!(
        Simulation::with_obstacles(SimConfig::default(), 0, vec![adrift]),
        Err(ConfigError::NotFinite { field: "obstacle.y" })
    ));
}

#[test]
fn every_stage_starts_a_game() {
    let names: Vec<_> = stages().iter().map(|s| s.name).collect();
    assert_eq!(names, ["calm", "brisk", "frantic"]);
    for stage in stages() {
        let sim = Simulation::new(stage.config.clone(), 0).unwrap();
        assert_eq!(sim.obstacles().len(), stage.config.min_obstacles);
        assert!(!stage.blurb.is_empty());
    }
    assert!(stage_by_name("FRANTIC").is_some());
}

#[cfg(feature = "serde_json")]
#[test]
fn partial_json_config_falls_back_to_defaults() {
    let cfg: SimConfig = serde_json::from_str(r#"{ "lives": 5, "obstacle_speed": 3.5 }"#).unwrap();
    assert_eq!(cfg.lives, 5);
    assert_eq!(cfg.obstacle_speed, 3.5);
    assert_eq!(cfg.gravity, SimConfig::default().gravity);
}
