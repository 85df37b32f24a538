use super::obstacle::Obstacle;

/// The cat. Gravity pulls it down each tick; a jump is allowed only while grounded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) velocity_y: f32, // positive = falling
    pub(crate) is_jumping: bool,
    pub(crate) lives: u32,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl Entity {
    pub fn new(x: f32, y: f32, width: f32, height: f32, lives: u32) -> Self {
        Self {
            x,
            y,
            velocity_y: 0.0,
            is_jumping: false,
            lives,
            width,
            height,
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
    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }
    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Start a jump. Ignored while already airborne from a previous jump; there
    /// is no double jump.
    pub fn jump(&mut self, impulse: f32) {
        if self.is_jumping {
            return;
        }
        self.velocity_y = impulse;
        self.is_jumping = true;
    }

    /// One gravity step. Past `floor_y` the entity is clamped back onto the floor.
    pub fn update(&mut self, gravity: f32, floor_y: f32) {
        self.velocity_y += gravity;
        self.y += self.velocity_y;
        if self.y > floor_y {
            self.y = floor_y;
            self.velocity_y = 0.0;
            self.is_jumping = false;
        }
    }

    /// Horizontal nudge from player input, kept inside `[min_x, max_x]`.
    pub fn steer(&mut self, dx: f32, min_x: f32, max_x: f32) {
        self.x = (self.x + dx).clamp(min_x, max_x.max(min_x));
    }

    /// Sit exactly on top of `obstacle`.
    pub fn land_on(&mut self, obstacle: &Obstacle) {
        self.y = obstacle.y - self.height;
        self.velocity_y = 0.0;
        self.is_jumping = false;
    }

    /// Back to the resting start height. Lives and x are left alone.
    pub fn respawn(&mut self, y: f32) {
        self.y = y;
        self.velocity_y = 0.0;
        self.is_jumping = false;
    }

    /// Returns the lives left afterwards.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }
}
