//! Ray intersection math shared by the scene primitives.
//!
//! Directions passed in here are expected to be unit length.

use glam::{Vec2, Vec3};

/// Below this `|dot(direction, normal)|` a ray counts as parallel to a plane.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Smallest projected triangle area (times two) still treated as a triangle.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Mirror reflection of `direction` about the unit `normal`: d - 2(d.n)n.
#[inline]
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - 2.0 * direction.dot(normal) * normal
}

/// Closest point to `point` on the infinite line through `origin` along `direction`.
///
/// Returns the signed distance along the line together with the point itself.
/// A negative distance means the point lies behind the origin.
#[inline]
pub fn closest_point_on_ray(origin: Vec3, direction: Vec3, point: Vec3) -> (f32, Vec3) {
    let t = (point - origin).dot(direction);
    (t, origin + direction * t)
}

/// Both intersection distances of a ray with a sphere, `near <= far`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereRoots {
    pub near: f32,
    pub far: f32,
}

/// Geometric ray/sphere test.
///
/// Spheres whose centre projects behind the ray origin are never hit, even when
/// the origin sits inside them. A ray exactly tangent to the sphere is a hit,
/// with both roots equal.
pub fn ray_sphere_roots(
    origin: Vec3,
    direction: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<SphereRoots> {
    let (t_closest, closest) = closest_point_on_ray(origin, direction, center);
    if t_closest < 0.0 {
        return None;
    }

    let radius_sq = radius * radius;
    let perp_sq = (center - closest).length_squared();
    if perp_sq > radius_sq {
        return None;
    }

    let half_chord = (radius_sq - perp_sq).max(0.0).sqrt();
    Some(SphereRoots {
        near: t_closest - half_chord,
        far: t_closest + half_chord,
    })
}

/// Distance along the ray to a plane, if the plane lies strictly in front of it.
///
/// Parallel rays and planes at or behind the origin give `None`.
pub fn ray_plane_distance(
    origin: Vec3,
    direction: Vec3,
    plane_point: Vec3,
    normal: Vec3,
) -> Option<f32> {
    let denom = direction.dot(normal);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (plane_point - origin).dot(normal) / denom;
    if t <= 0.0 || !t.is_finite() {
        return None;
    }
    Some(t)
}

/// A triangle flattened onto the axis pair that keeps most of its area.
///
/// The axis most aligned with the surface normal is dropped, so the 2x2
/// system solved in [`ProjectedTriangle::weights`] never collapses for
/// non-degenerate triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedTriangle {
    drop_axis: usize,
    ab: Vec2,
    ac: Vec2,
    denominator: f32,
}

impl Default for ProjectedTriangle {
    fn default() -> Self {
        Self {
            drop_axis: 2,
            ab: Vec2::ZERO,
            ac: Vec2::ZERO,
            denominator: 0.0,
        }
    }
}

impl ProjectedTriangle {
    /// Precompute the projected edges of triangle `abc` with surface `normal`.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, normal: Vec3) -> Self {
        let n = normal.abs();
        let drop_axis = if n.x >= n.y && n.x >= n.z {
            0
        } else if n.y >= n.z {
            1
        } else {
            2
        };

        let ab = project(b - a, drop_axis);
        let ac = project(c - a, drop_axis);
        let denominator = ab.x * ac.y - ab.y * ac.x;

        Self {
            drop_axis,
            ab,
            ac,
            denominator,
        }
    }

    /// Index of the world axis ignored by the projection (0 = X, 1 = Y, 2 = Z).
    pub fn drop_axis(&self) -> usize {
        self.drop_axis
    }

    /// True when the projected triangle has (numerically) no area.
    pub fn is_degenerate(&self) -> bool {
        !(self.denominator.abs() > DEGENERATE_EPSILON)
    }

    /// Weights `(w1, w2)` such that `p = a + w1 (b - a) + w2 (c - a)`.
    ///
    /// Only points strictly inside the triangle are returned: `w1 > 0`,
    /// `w2 > 0` and `w1 + w2 < 1`. Points exactly on an edge belong to
    /// neither of the two triangles sharing it.
    pub fn weights(&self, a: Vec3, p: Vec3) -> Option<(f32, f32)> {
        if self.is_degenerate() {
            return None;
        }

        let ap = project(p - a, self.drop_axis);
        let w1 = (ap.x * self.ac.y - ap.y * self.ac.x) / self.denominator;
        let w2 = (self.ab.x * ap.y - self.ab.y * ap.x) / self.denominator;

        if w1 <= 0.0 || w2 <= 0.0 || w1 + w2 >= 1.0 {
            return None;
        }
        Some((w1, w2))
    }
}

#[inline]
fn project(v: Vec3, drop_axis: usize) -> Vec2 {
    match drop_axis {
        0 => Vec2::new(v.y, v.z),
        1 => Vec2::new(v.x, v.z),
        _ => Vec2::new(v.x, v.y),
    }
}
