//! Tunable constants for one simulation, validated before a `Simulation` is built.

use thiserror::Error;

/// Every number the simulation needs. Coordinates are playfield pixels with y
/// growing downward.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    /// Velocity applied by a jump; must be negative (upward).
    pub jump_impulse: f32,
    pub steer_speed: f32,
    pub entity_width: f32,
    pub entity_height: f32,
    pub start_x: f32,
    pub start_y: f32,
    pub lives: u32,
    /// Safety clamp: the entity never ends a physics update below this y.
    pub floor_y: f32,
    /// A life is lost once the entity's y exceeds this line.
    pub fall_through_y: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_speed: f32,
    pub score_value: u32,
    pub min_obstacles: usize,
    pub vertical_gap: f32,
    /// Obstacles whose y exceeds this are recycled.
    pub offscreen_y: f32,
    pub spawn_x_min: f32,
    pub spawn_x_max: f32,
    /// Spawn cursor used when no obstacle has been spawned yet.
    pub spawn_origin_y: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 600.0,
            gravity: 0.5,
            jump_impulse: -12.0,
            steer_speed: 6.0,
            entity_width: 40.0,
            entity_height: 40.0,
            start_x: 180.0,
            start_y: 300.0,
            lives: 3,
            floor_y: 550.0,
            fall_through_y: 520.0,
            obstacle_width: 90.0,
            obstacle_height: 14.0,
            obstacle_speed: 2.0,
            score_value: 10,
            min_obstacles: 4,
            vertical_gap: 150.0,
            offscreen_y: 600.0,
            spawn_x_min: 0.0,
            spawn_x_max: 310.0,
            spawn_origin_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number")]
    NotFinite { field: &'static str },
    #[error("`{field}` must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("jump impulse must point upward (negative), got {0}")]
    JumpNotUpward(f32),
    #[error("at least one life is required")]
    NoLives,
    #[error("at least one obstacle must stay active")]
    NoObstacles,
    #[error("spawn range {min}..={max} is empty")]
    EmptySpawnRange { min: f32, max: f32 },
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let numbers = [
            ("width", self.width),
            ("height", self.height),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("steer_speed", self.steer_speed),
            ("entity_width", self.entity_width),
            ("entity_height", self.entity_height),
            ("start_x", self.start_x),
            ("start_y", self.start_y),
            ("floor_y", self.floor_y),
            ("fall_through_y", self.fall_through_y),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("obstacle_speed", self.obstacle_speed),
            ("vertical_gap", self.vertical_gap),
            ("offscreen_y", self.offscreen_y),
            ("spawn_x_min", self.spawn_x_min),
            ("spawn_x_max", self.spawn_x_max),
            ("spawn_origin_y", self.spawn_origin_y),
        ];
        if let Some(&(field, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite { field });
        }

        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("entity_width", self.entity_width),
            ("entity_height", self.entity_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("obstacle_speed", self.obstacle_speed),
            ("vertical_gap", self.vertical_gap),
        ];
        if let Some(&(field, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::NotPositive { field, value });
        }

        if self.jump_impulse >= 0.0 {
            return Err(ConfigError::JumpNotUpward(self.jump_impulse));
        }
        if self.lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.min_obstacles == 0 {
            return Err(ConfigError::NoObstacles);
        }
        if self.spawn_x_min > self.spawn_x_max {
            return Err(ConfigError::EmptySpawnRange {
                min: self.spawn_x_min,
                max: self.spawn_x_max,
            });
        }
        Ok(())
    }

    /// Rightmost x the entity may occupy while staying on the playfield.
    pub fn max_entity_x(&self) -> f32 {
        (self.width - self.entity_width).max(0.0)
    }
}
