//! Render configuration.
//!
//! Display channel toggles and bounce limits live here and are passed
//! explicitly into the tracer and the session.

use serde::{Deserialize, Serialize};

use crate::{RenderError, RenderResult, SkyGradient};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Hard cap on reflection bounces per primary ray
    pub max_bounce_limit: u32,
    /// Start each scene at one bounce and add one per frame up to the cap
    pub ramp_bounces: bool,

    // Display channels, for isolating lighting terms while debugging
    pub show_ambient: bool,
    pub show_diffuse: bool,
    pub show_specular: bool,
    pub show_sky: bool,

    /// Offset along the hit normal for shadow and reflection rays
    pub shadow_bias: f32,
    /// Squared ray energy below which the bounce loop stops early
    pub energy_cutoff: f32,
    /// Seconds each frame advances the world by
    pub time_step: f32,
    /// Render rows in parallel with rayon
    pub parallel: bool,

    pub sky: SkyGradient,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_bounce_limit: 5,
            ramp_bounces: true,
            show_ambient: true,
            show_diffuse: true,
            show_specular: true,
            show_sky: true,
            shadow_bias: 1e-3,
            energy_cutoff: 1e-6,
            time_step: 1.0 / 60.0,
            parallel: true,
            sky: SkyGradient::default(),
        }
    }
}

impl RenderConfig {
    /// Reject settings that would make the render meaningless.
    pub fn validate(&self) -> RenderResult<()> {
        if self.max_bounce_limit == 0 {
            return Err(RenderError::InvalidConfig(
                "max_bounce_limit must be at least 1".into(),
            ));
        }
        if !(self.time_step > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }
        if !(self.shadow_bias >= 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "shadow_bias must not be negative, got {}",
                self.shadow_bias
            )));
        }
        if !self.sky.is_valid() {
            log::warn!("Rejecting sky horizon band {}", self.sky.horizon_band);
            return Err(RenderError::InvalidConfig(format!(
                "sky.horizon_band must lie in (0, 1), got {}",
                self.sky.horizon_band
            )));
        }
        Ok(())
    }

    /// Bounce limit for the first frame of a scene.
    pub fn initial_bounce_limit(&self) -> u32 {
        if self.ramp_bounces {
            1
        } else {
            self.max_bounce_limit
        }
    }

    /// Channel toggles as 0/1 masks: ambient, diffuse, specular.
    pub(crate) fn channel_masks(&self) -> [f32; 3] {
        let mask = |on: bool| if on { 1.0 } else { 0.0 };
        [
            mask(self.show_ambient),
            mask(self.show_diffuse),
            mask(self.show_specular),
        ]
    }
}
