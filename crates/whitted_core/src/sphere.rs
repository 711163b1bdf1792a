//! Sphere primitive for ray tracing.
//!
//! Known limitation: a sphere whose centre lies behind the ray origin is
//! never hit, even when the origin is inside it.

use std::f32::consts::TAU;

use whitted_math::{ray_sphere_roots, Transform, Vec3};

use crate::{ActorLightingMaterial, Entity, HitInfo, Ray};

/// Vertical sine-wave motion around a resting position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bobbing {
    pub amplitude: f32,
    /// Cycles per phase revolution; whole numbers keep the phase wrap seamless.
    pub frequency: f32,
    phase: f32,
    rest_position: Vec3,
}

impl Bobbing {
    /// Current phase in `[0, 2*pi)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Where the sphere sits when the wave crosses zero.
    pub fn rest_position(&self) -> Vec3 {
        self.rest_position
    }
}

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    transform: Transform,
    radius: f32,
    material: ActorLightingMaterial,
    bobbing: Option<Bobbing>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: ActorLightingMaterial) -> Self {
        Self {
            transform: Transform::from_position(center),
            radius: radius.max(0.0),
            material,
            bobbing: None,
        }
    }

    /// Make the sphere bob up and down around its current centre.
    pub fn with_bobbing(mut self, amplitude: f32, frequency: f32) -> Self {
        self.bobbing = Some(Bobbing {
            amplitude,
            frequency,
            phase: 0.0,
            rest_position: self.transform.position,
        });
        self
    }

    pub fn center(&self) -> Vec3 {
        self.transform.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &ActorLightingMaterial {
        &self.material
    }

    pub fn bobbing(&self) -> Option<&Bobbing> {
        self.bobbing.as_ref()
    }

    /// Closed-form ray/sphere intersection.
    ///
    /// Takes the near root, or the far root when the origin is inside the
    /// sphere. The normal always faces the incoming ray.
    pub fn intersect(&self, ray: &Ray) -> HitInfo {
        let center = self.center();
        let Some(roots) = ray_sphere_roots(ray.origin, ray.direction, center, self.radius) else {
            return HitInfo::miss();
        };

        let distance = if roots.near > 0.0 { roots.near } else { roots.far };
        let position = ray.at(distance);

        let Some(outward) = (position - center).try_normalize() else {
            return HitInfo::miss();
        };
        let normal = if ray.direction.dot(outward) > 0.0 {
            -outward
        } else {
            outward
        };

        HitInfo::new(position, normal, distance, self.material)
    }

    /// Occlusion-only version of [`Sphere::intersect`].
    pub fn quick_intersect(&self, ray: &Ray) -> bool {
        ray_sphere_roots(ray.origin, ray.direction, self.center(), self.radius).is_some()
    }
}

impl Entity for Sphere {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn update(&mut self, delta_time: f32) {
        if let Some(bob) = &mut self.bobbing {
            bob.phase = (bob.phase + delta_time).rem_euclid(TAU);

            let offset = (bob.phase * bob.frequency).sin() * bob.amplitude;
            self.transform.position.y = bob.rest_position.y + offset;
        }
    }
}
