// Stage: brisk. Faster platforms spaced further apart; a stronger jump keeps
// the gaps reachable.
use super::{SimConfig, StagePreset};
use std::sync::OnceLock;

pub fn brisk() -> &'static StagePreset {
    static STAGE: OnceLock<StagePreset> = OnceLock::new();
    STAGE.get_or_init(|| StagePreset {
        name: "brisk",
        blurb: "Quicker drift, wider gaps",
        config: SimConfig {
            jump_impulse: -13.0,
            obstacle_speed: 3.0,
            vertical_gap: 170.0,
            score_value: 15,
            ..SimConfig::default()
        },
    })
}
