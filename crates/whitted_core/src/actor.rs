//! Visible world objects.

use whitted_math::Transform;

use crate::{ActorLightingMaterial, Entity, HitInfo, Ray, Sphere, Triangle};

/// An object in world space that camera rays can hit.
#[derive(Debug, Clone, PartialEq)]
pub enum Actor {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Actor {
    /// Full intersection: position, normal and material of the hit.
    pub fn intersect(&self, ray: &Ray) -> HitInfo {
        match self {
            Actor::Sphere(sphere) => sphere.intersect(ray),
            Actor::Triangle(triangle) => triangle.intersect(ray),
        }
    }

    /// True if the ray hits the actor anywhere in front of its origin.
    pub fn quick_intersect(&self, ray: &Ray) -> bool {
        match self {
            Actor::Sphere(sphere) => sphere.quick_intersect(ray),
            Actor::Triangle(triangle) => triangle.quick_intersect(ray),
        }
    }

    pub fn material(&self) -> &ActorLightingMaterial {
        match self {
            Actor::Sphere(sphere) => sphere.material(),
            Actor::Triangle(triangle) => triangle.material(),
        }
    }
}

impl From<Sphere> for Actor {
    fn from(sphere: Sphere) -> Self {
        Actor::Sphere(sphere)
    }
}

impl From<Triangle> for Actor {
    fn from(triangle: Triangle) -> Self {
        Actor::Triangle(triangle)
    }
}

impl Entity for Actor {
    fn transform(&self) -> &Transform {
        match self {
            Actor::Sphere(sphere) => sphere.transform(),
            Actor::Triangle(triangle) => triangle.transform(),
        }
    }

    fn update(&mut self, delta_time: f32) {
        match self {
            Actor::Sphere(sphere) => sphere.update(delta_time),
            Actor::Triangle(triangle) => triangle.update(delta_time),
        }
    }
}
