//! The Whitted bounce loop.
//!
//! Each primary ray is followed through at most `bounce_limit` mirror
//! reflections. At every surface the tracer adds local Blinn-Phong lighting
//! from every light that can see the hit point, weighted by the energy the
//! ray still carries, then reflects the ray and scales its energy by the
//! surface reflectivity. A ray that escapes picks up the sky and stops.

use whitted_core::{Color, HitInfo, LightSource, Ray};
use whitted_math::{reflect, Vec3};

use crate::{RenderConfig, World};

/// Read-only view of a world and the settings to trace it with.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    world: &'a World,
    config: &'a RenderConfig,
}

impl<'a> Tracer<'a> {
    pub fn new(world: &'a World, config: &'a RenderConfig) -> Self {
        Self { world, config }
    }

    /// Colour seen through pixel `(x, y)` of the world's camera.
    pub fn trace_pixel(&self, x: u32, y: u32, bounce_limit: u32) -> Color {
        let ray = self.world.camera().generate_ray(x, y);
        self.trace(ray, bounce_limit)
    }

    /// Total colour gathered along `ray` and its reflections.
    pub fn trace(&self, mut ray: Ray, bounce_limit: u32) -> Color {
        let mut color = Color::ZERO;
        for _ in 0..bounce_limit {
            let hit = self.closest_hit(&ray);
            let energy = ray.energy;
            color += energy * self.shade_and_reflect(&mut ray, &hit);

            if ray.is_spent(self.config.energy_cutoff) {
                break;
            }
        }
        color
    }

    /// Nearest hit along the ray, or a miss.
    pub fn closest_hit(&self, ray: &Ray) -> HitInfo {
        let mut closest = HitInfo::miss();
        for actor in self.world.actors() {
            let hit = actor.intersect(ray);
            if hit.hit && (!closest.hit || hit.distance < closest.distance) {
                closest = hit;
            }
        }
        closest
    }

    /// True if anything lies in front of the ray.
    pub fn any_hit(&self, ray: &Ray) -> bool {
        self.world.actors().iter().any(|actor| actor.quick_intersect(ray))
    }

    /// True if nothing blocks `shadow_ray` before it reaches `light`.
    ///
    /// Directional lights are infinitely far away, so any occluder counts.
    /// A point light is only blocked by occluders nearer than the light.
    pub fn is_lit(&self, shadow_ray: &Ray, light: &LightSource) -> bool {
        match light.distance_from(shadow_ray.origin) {
            None => !self.any_hit(shadow_ray),
            Some(light_distance) => {
                let occluder = self.closest_hit(shadow_ray);
                !occluder.hit || light_distance < occluder.distance
            }
        }
    }

    /// Local lighting at `hit`, then turn `ray` into its reflection.
    ///
    /// On a miss the ray's energy is zeroed and the sky is returned.
    pub fn shade_and_reflect(&self, ray: &mut Ray, hit: &HitInfo) -> Color {
        if !hit.hit {
            ray.energy = Vec3::ZERO;
            return if self.config.show_sky {
                self.config.sky.sample(ray.direction)
            } else {
                Color::ZERO
            };
        }

        let bias = self.config.shadow_bias;
        let surface = &hit.material.surface;
        let mut diffuse = Color::ZERO;
        let mut specular = Color::ZERO;

        for light in self.world.lights() {
            let mut shadow_ray = light.ray_to_light(hit.position);
            shadow_ray.origin += hit.normal * bias;
            if !self.is_lit(&shadow_ray, light) {
                continue;
            }

            let light_info = light.sample(hit.position);
            let to_light = shadow_ray.direction;

            let lambert = hit.normal.dot(to_light).max(0.0);
            diffuse += lambert * light_info.diffuse * surface.diffuse;

            // Opposite light and view directions have no half vector
            if let Some(half) = (to_light - ray.direction).try_normalize() {
                let highlight = hit.normal.dot(half).max(0.0).powf(hit.material.shininess);
                specular += highlight * light_info.specular * surface.specular;
            }
        }

        ray.direction = reflect(ray.direction, hit.normal);
        ray.origin = hit.position + hit.normal * bias;
        ray.energy *= hit.material.reflectivity;

        let [ambient_mask, diffuse_mask, specular_mask] = self.config.channel_masks();
        surface.ambient * ambient_mask + diffuse * diffuse_mask + specular * specular_mask
    }
}
