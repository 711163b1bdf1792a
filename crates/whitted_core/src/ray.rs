//! Ray type and intersection results.
//!
//! A ray carries the energy it has left after earlier bounces so the
//! tracer can weight every shading term it gathers along the way.

use whitted_math::Vec3;

use crate::ActorLightingMaterial;

/// A ray with origin, unit direction and per-channel energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray
    pub origin: Vec3,
    /// Direction vector (unit length)
    pub direction: Vec3,
    /// Remaining light-carrying capacity per channel
    pub energy: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3, energy: Vec3) -> Self {
        Self {
            origin,
            direction,
            energy,
        }
    }

    /// Create a ray with full energy, as cast from a camera.
    #[inline]
    pub fn primary(origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction, Vec3::ONE)
    }

    /// Compute a point along the ray at parameter t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }

    /// True when the squared energy has dropped below `cutoff`.
    #[inline]
    pub fn is_spent(&self, cutoff: f32) -> bool {
        self.energy.length_squared() < cutoff
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            energy: Vec3::ZERO,
        }
    }
}

/// Record of a ray-object intersection.
///
/// A miss is still a fully initialised value: every field is zeroed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// Did the ray strike a surface?
    pub hit: bool,
    /// Point of intersection
    pub position: Vec3,
    /// Unit surface normal, facing the incoming ray
    pub normal: Vec3,
    /// Distance from the ray origin to `position`
    pub distance: f32,
    /// Material at the intersection point
    pub material: ActorLightingMaterial,
}

impl HitInfo {
    /// A zeroed miss.
    pub const MISS: HitInfo = HitInfo {
        hit: false,
        position: Vec3::ZERO,
        normal: Vec3::ZERO,
        distance: 0.0,
        material: ActorLightingMaterial::BLACK,
    };

    /// A hit at `position`, `distance` along the ray.
    pub fn new(
        position: Vec3,
        normal: Vec3,
        distance: f32,
        material: ActorLightingMaterial,
    ) -> Self {
        Self {
            hit: true,
            position,
            normal,
            distance,
            material,
        }
    }

    /// A zeroed miss.
    #[inline]
    pub fn miss() -> Self {
        Self::MISS
    }
}

impl Default for HitInfo {
    fn default() -> Self {
        Self::MISS
    }
}
