//! Procedural sky used when a ray escapes the scene.
//!
//! An artistic gradient keyed on how far the ray points above the horizon,
//! not a physical sky model.

use serde::{Deserialize, Serialize};
use whitted_core::Color;
use whitted_math::{Interval, Vec3};

/// Sky colours and the angular band blending the horizon into the sky.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyGradient {
    /// Below the horizon
    pub ground: Color,
    /// At the horizon
    pub horizon: Color,
    /// Top of the horizon band
    pub sky_bottom: Color,
    /// Straight up
    pub sky_top: Color,
    /// Height of the horizon band as `dot(direction, up)`, in (0, 1)
    pub horizon_band: f32,
}

impl Default for SkyGradient {
    fn default() -> Self {
        Self {
            ground: Vec3::new(0.408, 0.380, 0.357),
            horizon: Vec3::new(0.482, 0.937, 0.976),
            sky_bottom: Vec3::new(0.008, 0.725, 1.0),
            sky_top: Vec3::new(0.0, 0.059, 0.486),
            horizon_band: 0.08,
        }
    }
}

impl SkyGradient {
    /// Sky colour in the unit `direction`.
    pub fn sample(&self, direction: Vec3) -> Color {
        let up = direction.dot(Vec3::Y);
        if up < 0.0 {
            return self.ground;
        }

        let band = Interval::new(0.0, self.horizon_band);
        if up < self.horizon_band {
            return self.horizon.lerp(self.sky_bottom, band.normalise(up));
        }

        let sky = Interval::new(self.horizon_band, 1.0);
        self.sky_bottom.lerp(self.sky_top, sky.normalise(up))
    }

    /// True when the band threshold lies strictly between the horizon and zenith.
    pub fn is_valid(&self) -> bool {
        Interval::UNIT.surrounds(self.horizon_band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direction_with_up(up: f32) -> Vec3 {
        Vec3::new((1.0 - up * up).max(0.0).sqrt(), up, 0.0)
    }

    #[test]
    fn test_below_horizon_is_ground() {
        let sky = SkyGradient::default();
        assert_eq!(sky.sample(Vec3::NEG_Y), sky.ground);
        assert_eq!(sky.sample(direction_with_up(-0.01)), sky.ground);
    }

    #[test]
    fn test_horizon_and_zenith() {
        let sky = SkyGradient::default();
        assert!((sky.sample(Vec3::X) - sky.horizon).length() < 1e-6);
        assert!((sky.sample(Vec3::Y) - sky.sky_top).length() < 1e-6);
    }

    #[test]
    fn test_continuous_at_band_boundary() {
        let sky = SkyGradient::default();
        let band = sky.horizon_band;

        let just_below = sky.sample(direction_with_up(band - 1e-5));
        let at = sky.sample(direction_with_up(band));
        assert!((just_below - at).length() < 1e-3);
        assert!((at - sky.sky_bottom).length() < 1e-3);
    }

    #[test]
    fn test_band_validation() {
        let mut sky = SkyGradient::default();
        assert!(sky.is_valid());
        sky.horizon_band = 0.0;
        assert!(!sky.is_valid());
        sky.horizon_band = 1.0;
        assert!(!sky.is_valid());
    }
}
