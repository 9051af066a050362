//! Engine tuning, loaded from `LAYERFORM_*` environment variables.
//!
//! Unset or unparsable variables fall back to the defaults in
//! [`crate::consts`]; values that parse but make no sense (a zero swap
//! sensitivity, a negative snap step) are caught by [`EngineConfig::validate`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{BIG_NUDGE_STEP, NUDGE_STEP, ROTATE_SNAP_DEG, SWAP_SENSITIVITY};
use crate::error::TransformError;
use crate::nudge::NudgeSteps;

pub const ENV_SWAP_SENSITIVITY: &str = "LAYERFORM_SWAP_SENSITIVITY";
pub const ENV_NUDGE_STEP: &str = "LAYERFORM_NUDGE_STEP";
pub const ENV_BIG_NUDGE_STEP: &str = "LAYERFORM_BIG_NUDGE_STEP";
pub const ENV_ROTATE_SNAP_DEG: &str = "LAYERFORM_ROTATE_SNAP_DEG";
pub const ENV_HANDLE_SCALE: &str = "LAYERFORM_HANDLE_SCALE";

/// Tuning knobs for [`crate::engine::TransformEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Divisor of the shared bounding box used as the swap proximity threshold.
    pub swap_sensitivity: f64,
    /// Plain and accelerated nudge distances, in pixels.
    pub nudge: NudgeSteps,
    /// Rotation step while the snap modifier is held, in degrees.
    pub rotate_snap_deg: f64,
    /// Overlay scale (1 / zoom) applied to handle radii.
    pub handle_scale: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            swap_sensitivity: SWAP_SENSITIVITY,
            nudge: NudgeSteps { small: NUDGE_STEP, big: BIG_NUDGE_STEP },
            rotate_snap_deg: ROTATE_SNAP_DEG,
            handle_scale: 1.0,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            swap_sensitivity: env_parse(ENV_SWAP_SENSITIVITY, defaults.swap_sensitivity),
            nudge: NudgeSteps {
                small: env_parse(ENV_NUDGE_STEP, defaults.nudge.small),
                big: env_parse(ENV_BIG_NUDGE_STEP, defaults.nudge.big),
            },
            rotate_snap_deg: env_parse(ENV_ROTATE_SNAP_DEG, defaults.rotate_snap_deg),
            handle_scale: env_parse(ENV_HANDLE_SCALE, defaults.handle_scale),
        }
    }

    /// Reject values the geometry divides by or steps with.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Config`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), TransformError> {
        let checks = [
            (ENV_SWAP_SENSITIVITY, self.swap_sensitivity),
            (ENV_NUDGE_STEP, self.nudge.small),
            (ENV_BIG_NUDGE_STEP, self.nudge.big),
            (ENV_ROTATE_SNAP_DEG, self.rotate_snap_deg),
            (ENV_HANDLE_SCALE, self.handle_scale),
        ];
        for (key, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(TransformError::Config(format!("{key} must be a positive number, got {value}")));
            }
        }
        Ok(())
    }
}

/// Parse `key` from the environment, falling back to `default`.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
