//! The common behaviour of everything that lives in world space.

use whitted_math::{Transform, Vec3};

/// An object placed in the world by a transform and advanced once per frame.
///
/// Cameras, actors and lights are all entities. Updates are independent of
/// one another, so the order in which a world updates them does not matter.
pub trait Entity {
    /// Current world transform.
    fn transform(&self) -> &Transform;

    /// Advance the entity by `delta_time` seconds.
    fn update(&mut self, delta_time: f32);

    /// World position.
    fn position(&self) -> Vec3 {
        self.transform().position
    }
}
