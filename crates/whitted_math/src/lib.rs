//! Math layer for the whitted ray tracer.
//!
//! Re-exports glam and adds the handful of helpers every other crate leans on:
//! scalar range mapping, entity transforms and ray intersection math.

// Re-export glam for convenience
pub use glam::*;

mod geometry;
mod interval;
mod transform;

pub use geometry::{
    closest_point_on_ray, ray_plane_distance, ray_sphere_roots, reflect, ProjectedTriangle,
    SphereRoots, PARALLEL_EPSILON,
};
pub use interval::Interval;
pub use transform::Transform;
