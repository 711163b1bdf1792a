//! The set of objects a frame is rendered from.

use whitted_core::{Actor, Camera, Entity, LightSource};

use crate::Scene;

/// Owns the active camera, the actors and the lights of one scene.
///
/// A world is replaced as a whole when the scene changes; nothing inside it
/// outlives the world that built it.
#[derive(Debug, Clone)]
pub struct World {
    name: String,
    camera: Camera,
    actors: Vec<Actor>,
    lights: Vec<LightSource>,
}

impl World {
    pub fn new(camera: Camera) -> Self {
        Self {
            name: String::new(),
            camera,
            actors: Vec::new(),
            lights: Vec::new(),
        }
    }

    pub fn with_actor(mut self, actor: impl Into<Actor>) -> Self {
        self.actors.push(actor.into());
        self
    }

    pub fn with_light(mut self, light: impl Into<LightSource>) -> Self {
        self.lights.push(light.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    /// Advance every entity by `delta_time` seconds.
    pub fn update(&mut self, delta_time: f32) {
        self.camera.update(delta_time);
        for actor in &mut self.actors {
            actor.update(delta_time);
        }
        for light in &mut self.lights {
            light.update(delta_time);
        }
    }
}

impl From<Scene> for World {
    fn from(scene: Scene) -> Self {
        Self {
            name: scene.name,
            camera: scene.camera,
            actors: scene.actors,
            lights: scene.lights,
        }
    }
}
