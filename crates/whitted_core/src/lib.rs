//! Whitted Core - world objects for the whitted ray tracer.
//!
//! This crate provides:
//!
//! - **Rays and hits**: `Ray`, `HitInfo`
//! - **Materials**: `LightingMaterial` for lights, `ActorLightingMaterial` for surfaces
//! - **Entities**: `Camera`, the `Actor` shapes (`Sphere`, `Triangle`) and the
//!   `LightSource` variants (`DirectionalLight`, `PointLight`)
//!
//! # Example
//!
//! ```ignore
//! use whitted_core::{Actor, ActorLightingMaterial, Camera, Ray, Sphere};
//! use whitted_math::{UVec2, Vec3};
//!
//! let camera = Camera::new(UVec2::new(640, 480))?;
//! let material = ActorLightingMaterial::default();
//! let ball = Actor::from(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, material));
//! let hit = ball.intersect(&camera.generate_ray(320, 240));
//! assert!(hit.hit);
//! ```

mod actor;
mod camera;
mod entity;
mod error;
mod light;
mod material;
mod ray;
mod sphere;
mod triangle;

pub use actor::Actor;
pub use camera::Camera;
pub use entity::Entity;
pub use error::{CoreError, CoreResult};
pub use light::{DirectionalLight, LightSource, PointLight};
pub use material::{ActorLightingMaterial, Color, LightingMaterial};
pub use ray::{HitInfo, Ray};
pub use sphere::{Bobbing, Sphere};
pub use triangle::{Triangle, Vertex};

/// Re-export the math types used throughout the public API.
pub use whitted_math::{Quat, Transform, UVec2, Vec3};
