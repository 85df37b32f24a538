// Stage: calm. The default tuning.
use super::{SimConfig, StagePreset};
use std::sync::OnceLock;

pub fn calm() -> &'static StagePreset {
    static STAGE: OnceLock<StagePreset> = OnceLock::new();
    STAGE.get_or_init(|| StagePreset {
        name: "calm",
        blurb: "Slow platforms, generous spacing",
        config: SimConfig::default(),
    })
}
