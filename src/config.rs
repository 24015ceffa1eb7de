use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::animation::{AnimationTuning, IDLE_YAW_SPEED, MAX_JAW_ANGLE, TIME_STEP, TONGUE_THRESHOLD};
use crate::interaction::DRAG_SENSITIVITY;
use crate::viewport::SURFACE_HEIGHT;

/// Tuning knobs read from an optional JSON file. Anything left out keeps the
/// built-in value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PuppetConfig {
    pub idle_yaw_speed: f32,
    pub time_step: f64,
    pub max_jaw_angle: f32,
    pub tongue_threshold: f32,
    pub drag_sensitivity: f32,
    pub surface_height: u32,
}

impl Default for PuppetConfig {
    fn default() -> Self {
        Self {
            idle_yaw_speed: IDLE_YAW_SPEED,
            time_step: TIME_STEP,
            max_jaw_angle: MAX_JAW_ANGLE,
            tongue_threshold: TONGUE_THRESHOLD,
            drag_sensitivity: DRAG_SENSITIVITY,
            surface_height: SURFACE_HEIGHT,
        }
    }
}

impl PuppetConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("failed to parse puppet config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.surface_height > 0, "surface_height must be positive");
        ensure!(self.idle_yaw_speed.is_finite(), "idle_yaw_speed must be finite");
        ensure!(self.time_step.is_finite(), "time_step must be finite");
        ensure!(self.max_jaw_angle.is_finite(), "max_jaw_angle must be finite");
        ensure!(self.tongue_threshold.is_finite(), "tongue_threshold must be finite");
        ensure!(self.drag_sensitivity.is_finite(), "drag_sensitivity must be finite");
        Ok(())
    }

    pub fn animation_tuning(&self) -> AnimationTuning {
        AnimationTuning {
            idle_yaw_speed: self.idle_yaw_speed,
            time_step: self.time_step,
            max_jaw_angle: self.max_jaw_angle,
            tongue_threshold: self.tongue_threshold,
        }
    }
}
