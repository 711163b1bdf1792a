//! Light sources.
//!
//! Lights are invisible to camera rays; they only contribute through shading.

use whitted_math::{Transform, Vec3};

use crate::{Color, CoreError, CoreResult, Entity, LightingMaterial, Ray};

/// Infinitely distant light shining from a fixed direction, like the sun.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    transform: Transform,
    /// Unit vector from a surface toward the light
    direction: Vec3,
    material: LightingMaterial,
}

impl DirectionalLight {
    /// `direction` points from the scene toward the light and is normalised here.
    pub fn new(direction: Vec3, color: Color, intensity: f32) -> CoreResult<Self> {
        let direction = direction.try_normalize().ok_or(CoreError::ZeroDirection)?;
        Ok(Self {
            transform: Transform::default(),
            direction,
            material: LightingMaterial::from_color(color * intensity),
        })
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn material(&self) -> &LightingMaterial {
        &self.material
    }
}

/// A point in space emitting in all directions with inverse-square fall-off.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    transform: Transform,
    material: LightingMaterial,
    /// Scales the inverse-square attenuation; 1 = plain 1/d^2
    fall_off: f32,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color, intensity: f32, fall_off: f32) -> Self {
        Self {
            transform: Transform::from_position(position),
            material: LightingMaterial::from_color(color * intensity),
            fall_off,
        }
    }

    pub fn fall_off(&self) -> f32 {
        self.fall_off
    }

    pub fn material(&self) -> &LightingMaterial {
        &self.material
    }
}

/// Every kind of light the tracer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum LightSource {
    Directional(DirectionalLight),
    Point(PointLight),
}

impl LightSource {
    /// A shadow ray from `position` toward the light.
    ///
    /// The ray carries no energy so it can never be mistaken for a scene ray.
    pub fn ray_to_light(&self, position: Vec3) -> Ray {
        let direction = match self {
            LightSource::Directional(light) => light.direction,
            LightSource::Point(light) => (light.transform.position - position).normalize_or_zero(),
        };
        Ray::new(position, direction, Vec3::ZERO)
    }

    /// The light's intensities as seen from `position`.
    ///
    /// Point lights attenuate diffuse and specular by `fall_off / d^2`;
    /// base colour and ambient pass through. A surface sitting exactly on a
    /// point light receives no diffuse or specular light.
    pub fn sample(&self, position: Vec3) -> LightingMaterial {
        match self {
            LightSource::Directional(light) => light.material,
            LightSource::Point(light) => {
                let distance_sq = (light.transform.position - position).length_squared();
                let attenuation = if distance_sq > f32::EPSILON {
                    light.fall_off / distance_sq
                } else {
                    0.0
                };
                LightingMaterial {
                    diffuse: light.material.diffuse * attenuation,
                    specular: light.material.specular * attenuation,
                    ..light.material
                }
            }
        }
    }

    /// Distance from `position` to the light; `None` when infinitely far away.
    pub fn distance_from(&self, position: Vec3) -> Option<f32> {
        match self {
            LightSource::Directional(_) => None,
            LightSource::Point(light) => Some(light.transform.position.distance(position)),
        }
    }
}

impl From<DirectionalLight> for LightSource {
    fn from(light: DirectionalLight) -> Self {
        LightSource::Directional(light)
    }
}

impl From<PointLight> for LightSource {
    fn from(light: PointLight) -> Self {
        LightSource::Point(light)
    }
}

impl Entity for LightSource {
    fn transform(&self) -> &Transform {
        match self {
            LightSource::Directional(light) => &light.transform,
            LightSource::Point(light) => &light.transform,
        }
    }

    fn update(&mut self, _delta_time: f32) {}
}
