use super::config::ConfigError;
use super::entity::Entity;

/// A platform drifting down the playfield at a constant speed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) speed: f32,
    pub(crate) score_value: u32,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, width: f32, height: f32, speed: f32, score_value: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            speed,
            score_value,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }
    pub fn y(&self) -> f32 {
        self.y
    }
    pub fn width(&self) -> f32 {
        self.width
    }
    pub fn height(&self) -> f32 {
        self.height
    }
    pub fn speed(&self) -> f32 {
        self.speed
    }
    pub fn score_value(&self) -> u32 {
        self.score_value
    }

    /// Caller-built platforms must be finite, have a real size and keep moving
    /// down, the same guarantees `SimConfig::validate` gives spawned ones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let numbers = [
            ("obstacle.x", self.x),
            ("obstacle.y", self.y),
            ("obstacle.width", self.width),
            ("obstacle.height", self.height),
            ("obstacle.speed", self.speed),
        ];
        if let Some(&(field, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite { field });
        }
        if let Some(&(field, value)) = numbers[2..].iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::NotPositive { field, value });
        }
        Ok(())
    }

    pub fn update(&mut self) {
        self.y += self.speed;
    }

    /// Axis-aligned overlap test. Edges that only touch do not count.
    pub fn collides_with(&self, entity: &Entity) -> bool {
        entity.x < self.x + self.width
            && entity.x + entity.width > self.x
            && entity.y < self.y + self.height
            && entity.y + entity.height > self.y
    }
}
