//! Platform-hopping simulation core.
//!
//! A `Simulation` owns the cat (`Entity`) and the drifting platforms
//! (`Obstacle`s). Each call to `step()` advances one fixed tick:
//!
//! 1. gravity on the cat, clamped at the floor
//! 2. every platform moves down; a falling cat that overlaps one lands on it and scores
//! 3. platforms past the bottom are recycled
//! 4. new platforms are spawned above the newest one until the minimum count is back
//! 5. a cat below the fall-through line loses a life and respawns, or the game ends
//!
//! The only randomness is the x position of new platforms, drawn from a seeded
//! `SmallRng` so a run is reproducible from `(config, seed)` and the inputs.
//! Nothing here touches the browser; the `playfield` module drives it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

mod config;
mod entity;
mod obstacle;
mod stage_brisk;
mod stage_calm;
mod stage_frantic;

pub use config::{ConfigError, SimConfig};
pub use entity::Entity;
pub use obstacle::Obstacle;

// --- Stage presets -----------------------------------------------------------

/// A named, ready-made configuration.
#[derive(Debug)]
pub struct StagePreset {
    pub name: &'static str,
    pub blurb: &'static str,
    pub config: SimConfig,
}

/// All presets, easiest first.
pub fn stages() -> &'static [&'static StagePreset] {
    use std::sync::OnceLock;
    static STAGES: OnceLock<Vec<&'static StagePreset>> = OnceLock::new();
    STAGES.get_or_init(|| {
        vec![
            stage_calm::calm(),
            stage_brisk::brisk(),
            stage_frantic::frantic(),
        ]
    })
}

pub fn stage_by_name(name: &str) -> Option<&'static StagePreset> {
    stages()
        .iter()
        .copied()
        .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
}

// --- Events & snapshots ------------------------------------------------------

/// Something noteworthy that happened during one `step()`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimEvent {
    /// The cat came to rest on a platform whose top edge is at `top`.
    Landed { top: f32, points: u32 },
    LifeLost { remaining: u32 },
    GameOver { score: u64 },
}

/// Read-only copy of everything a renderer needs, taken between ticks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimSnapshot {
    pub entity: Entity,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub terminal: bool,
    pub spawn_cursor: f32,
    pub ticks: u64,
}

// --- Simulation ----------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimConfig,
    entity: Entity,
    obstacles: Vec<Obstacle>, // spawn order
    score: u64,
    terminal: bool,
    // y of the most recently spawned platform, advanced with it every tick
    spawn_cursor: f32,
    cursor_speed: f32,
    ticks: u64,
    seed: u64,
    rng: SmallRng,
}

impl Simulation {
    /// Fresh game: the cat at its start position standing over a starting
    /// platform, with the rest of the platforms spawned above it.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Fresh game with caller-chosen initial platforms (kept in the given order)
    /// instead of the starting platform. Missing platforms are spawned above the
    /// last one given. Each platform is checked with [`Obstacle::validate`].
    pub fn with_obstacles(
        config: SimConfig,
        seed: u64,
        obstacles: Vec<Obstacle>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        obstacles.iter().try_for_each(Obstacle::validate)?;
        let mut sim = Self::empty(config, seed);
        for obstacle in obstacles {
            sim.push_spawned(obstacle);
        }
        sim.replenish();
        Ok(sim)
    }

    /// New game with the same configuration. Nothing but the config carries over.
    pub fn reset(&self, seed: u64) -> Self {
        log::info!("simulation reset (seed {seed})");
        Self::build(self.config.clone(), seed)
    }

    fn build(config: SimConfig, seed: u64) -> Self {
        let mut sim = Self::empty(config, seed);
        let cfg = &sim.config;
        let start_x = (cfg.start_x + (cfg.entity_width - cfg.obstacle_width) / 2.0)
            .clamp(0.0, (cfg.width - cfg.obstacle_width).max(0.0));
        let start_platform = Obstacle::new(
            start_x,
            cfg.start_y + cfg.entity_height,
            cfg.obstacle_width,
            cfg.obstacle_height,
            cfg.obstacle_speed,
            cfg.score_value,
        );
        sim.push_spawned(start_platform);
        sim.replenish();
        sim
    }

    fn empty(config: SimConfig, seed: u64) -> Self {
        let entity = Entity::new(
            config.start_x,
            config.start_y,
            config.entity_width,
            config.entity_height,
            config.lives,
        );
        Self {
            spawn_cursor: config.spawn_origin_y,
            cursor_speed: 0.0,
            entity,
            obstacles: Vec::with_capacity(config.min_obstacles + 1),
            score: 0,
            terminal: false,
            ticks: 0,
            seed,
            rng: SmallRng::seed_from_u64(seed),
            config,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
    pub fn entity(&self) -> &Entity {
        &self.entity
    }
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
    pub fn score(&self) -> u64 {
        self.score
    }
    pub fn lives(&self) -> u32 {
        self.entity.lives
    }
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
    pub fn spawn_cursor(&self) -> f32 {
        self.spawn_cursor
    }
    /// Ticks actually simulated; terminal no-op steps are not counted.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            entity: self.entity.clone(),
            obstacles: self.obstacles.clone(),
            score: self.score,
            terminal: self.terminal,
            spawn_cursor: self.spawn_cursor,
            ticks: self.ticks,
        }
    }

    /// Jump request from input. Ignored when airborne or after game over.
    pub fn jump(&mut self) {
        if self.terminal {
            return;
        }
        self.entity.jump(self.config.jump_impulse);
    }

    /// Horizontal input: `direction` is typically -1.0 or 1.0.
    pub fn steer(&mut self, direction: f32) {
        if self.terminal {
            return;
        }
        let max_x = self.config.max_entity_x();
        self.entity
            .steer(direction * self.config.steer_speed, 0.0, max_x);
    }

    /// Advance one tick. Does nothing once the game is over.
    pub fn step(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if self.terminal {
            return events;
        }
        self.ticks += 1;

        self.entity
            .update(self.config.gravity, self.config.floor_y);

        for obstacle in self.obstacles.iter_mut() {
            obstacle.update();
            // Rising through a platform never lands on it.
            if self.entity.velocity_y >= 0.0 && obstacle.collides_with(&self.entity) {
                self.entity.land_on(obstacle);
                self.score += u64::from(obstacle.score_value);
                log::debug!("landed at y {} (+{})", obstacle.y, obstacle.score_value);
                events.push(SimEvent::Landed {
                    top: obstacle.y,
                    points: obstacle.score_value,
                });
            }
        }
        self.spawn_cursor += self.cursor_speed;

        let offscreen_y = self.config.offscreen_y;
        self.obstacles.retain(|o| o.y <= offscreen_y);
        self.replenish();

        if self.entity.y > self.config.fall_through_y {
            let remaining = self.entity.lose_life();
            log::info!("fell off the playfield, {remaining} lives left");
            events.push(SimEvent::LifeLost { remaining });
            if remaining == 0 {
                self.terminal = true;
                log::info!("game over with score {}", self.score);
                events.push(SimEvent::GameOver { score: self.score });
            } else {
                self.entity.respawn(self.config.start_y);
                log::debug!("respawned at y {}", self.config.start_y);
            }
        }

        events
    }

    fn replenish(&mut self) {
        while self.obstacles.len() < self.config.min_obstacles {
            let cfg = &self.config;
            let x = self.rng.gen_range(cfg.spawn_x_min..=cfg.spawn_x_max);
            let obstacle = Obstacle::new(
                x,
                self.spawn_cursor - cfg.vertical_gap,
                cfg.obstacle_width,
                cfg.obstacle_height,
                cfg.obstacle_speed,
                cfg.score_value,
            );
            self.push_spawned(obstacle);
        }
    }

    fn push_spawned(&mut self, obstacle: Obstacle) {
        self.spawn_cursor = obstacle.y;
        self.cursor_speed = obstacle.speed;
        self.obstacles.push(obstacle);
    }
}
