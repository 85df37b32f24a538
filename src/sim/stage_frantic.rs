// Stage: frantic. Narrow, fast platforms and only three of them on screen.
use super::{SimConfig, StagePreset};
use std::sync::OnceLock;

const NARROW: f32 = 70.0;

pub fn frantic() -> &'static StagePreset {
    static STAGE: OnceLock<StagePreset> = OnceLock::new();
    STAGE.get_or_init(|| {
        let base = SimConfig::default();
        StagePreset {
            name: "frantic",
            blurb: "Narrow ledges falling fast",
            config: SimConfig {
                jump_impulse: -14.0,
                steer_speed: 8.0,
                obstacle_width: NARROW,
                obstacle_speed: 4.0,
                min_obstacles: 3,
                vertical_gap: 190.0,
                score_value: 25,
                spawn_x_max: base.width - NARROW,
                ..base
            },
        }
    })
}
