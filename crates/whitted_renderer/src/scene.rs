//! Scene descriptions and the built-in levels.

use std::f32::consts::FRAC_PI_2;

use whitted_core::{
    Actor, ActorLightingMaterial, Camera, Color, DirectionalLight, LightSource, PointLight,
    Sphere, Transform, Triangle, UVec2, Vec3, Vertex,
};

use crate::{RenderError, RenderResult};

/// Everything a world is built from.
#[derive(Debug, Clone)]
pub struct Scene {
    pub name: String,
    pub camera: Camera,
    pub actors: Vec<Actor>,
    pub lights: Vec<LightSource>,
}

impl Scene {
    pub fn new(name: impl Into<String>, camera: Camera) -> Self {
        Self {
            name: name.into(),
            camera,
            actors: Vec::new(),
            lights: Vec::new(),
        }
    }

    pub fn with_actor(mut self, actor: impl Into<Actor>) -> Self {
        self.actors.push(actor.into());
        self
    }

    pub fn with_actors(mut self, actors: impl IntoIterator<Item = Actor>) -> Self {
        self.actors.extend(actors);
        self
    }

    pub fn with_light(mut self, light: impl Into<LightSource>) -> Self {
        self.lights.push(light.into());
        self
    }
}

/// Source of scenes addressed by index.
pub trait SceneProvider {
    /// Number of scenes available; valid indices are `0..scene_count()`.
    fn scene_count(&self) -> usize;

    /// Build scene `index` for a screen of `resolution` pixels.
    fn load(&self, resolution: UVec2, index: usize) -> RenderResult<Scene>;
}

/// The four hand-built levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinScenes;

impl BuiltinScenes {
    pub const NAMES: [&'static str; 4] =
        ["mirror-ball", "rgb-triangle", "mirror-room", "basic-ball"];
}

impl SceneProvider for BuiltinScenes {
    fn scene_count(&self) -> usize {
        Self::NAMES.len()
    }

    fn load(&self, resolution: UVec2, index: usize) -> RenderResult<Scene> {
        match index {
            0 => mirror_ball(resolution),
            1 => rgb_triangle(resolution),
            2 => mirror_room(resolution),
            3 => basic_ball(resolution),
            _ => {
                log::warn!("Requested scene {} but only {} exist", index, Self::NAMES.len());
                Err(RenderError::UnknownScene {
                    index,
                    available: Self::NAMES.len(),
                })
            }
        }
    }
}

fn camera(
    resolution: UVec2,
    position: Vec3,
    euler: Vec3,
    fov_half_angle: f32,
) -> RenderResult<Camera> {
    let transform = Transform::from_euler(position, euler, Vec3::ONE);
    Ok(Camera::with_transform(transform, resolution, fov_half_angle)?)
}

fn white() -> ActorLightingMaterial {
    ActorLightingMaterial::glossy(Vec3::splat(0.9), Vec3::splat(0.1), Vec3::splat(0.1), 50.0)
}

fn metallic() -> ActorLightingMaterial {
    ActorLightingMaterial::glossy(Vec3::ZERO, Vec3::ONE, Vec3::splat(0.8), 50.0)
}

/// Unit square in the local XZ plane, as two triangles, placed by `transform`.
fn quad(transform: Transform, material: ActorLightingMaterial) -> [Actor; 2] {
    let first = [
        Vertex::new(Vec3::new(0.0, 0.0, 0.0)),
        Vertex::new(Vec3::new(0.0, 0.0, 1.0)),
        Vertex::new(Vec3::new(1.0, 0.0, 0.0)),
    ];
    let second = [
        Vertex::new(Vec3::new(1.0, 0.0, 1.0)),
        Vertex::new(Vec3::new(1.0, 0.0, 0.0)),
        Vertex::new(Vec3::new(0.0, 0.0, 1.0)),
    ];
    [
        Triangle::new(transform, material, first).into(),
        Triangle::new(transform, material, second).into(),
    ]
}

/// Floor at y = 0 covering `size` (x, z) with its corner at `corner`.
fn floor(corner: Vec3, size: Vec3, material: ActorLightingMaterial) -> [Actor; 2] {
    quad(
        Transform::from_position(corner).with_scale(Vec3::new(size.x, 1.0, size.z)),
        material,
    )
}

/// A mirror sphere resting on a white floor under a single sun.
fn mirror_ball(resolution: UVec2) -> RenderResult<Scene> {
    let camera = camera(resolution, Vec3::new(0.0, 1.5, 6.0), Vec3::ZERO, 22.5)?;

    Ok(Scene::new(BuiltinScenes::NAMES[0], camera)
        .with_light(DirectionalLight::new(Vec3::ONE, Vec3::ONE, 1.0)?)
        .with_actor(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, metallic()))
        .with_actors(floor(Vec3::new(-20.0, 0.0, -20.0), Vec3::splat(40.0), white())))
}

/// A triangle blending red, green and blue across its corners.
fn rgb_triangle(resolution: UVec2) -> RenderResult<Scene> {
    let camera = camera(
        resolution,
        Vec3::new(2.0, 1.0, 2.0),
        Vec3::new(-0.05, 0.79, 0.0),
        22.5,
    )?;

    let red = ActorLightingMaterial::glossy(Vec3::X, Vec3::ONE, Vec3::ZERO, 10.0);
    let green = ActorLightingMaterial::glossy(Vec3::Y, Vec3::ZERO, Vec3::ZERO, 0.0);
    let blue = ActorLightingMaterial::glossy(Vec3::Z, Vec3::ZERO, Vec3::ZERO, 0.0);
    let triangle = Triangle::new(
        Transform::from_position(Vec3::new(0.0, 0.3, 0.0)),
        red,
        [
            Vertex::with_material(Vec3::new(0.0, 0.577, 0.0), red),
            Vertex::with_material(Vec3::new(-0.5, -0.289, 0.0), green),
            Vertex::with_material(Vec3::new(0.5, -0.289, 0.0), blue),
        ],
    )
    .with_vertex_materials();

    Ok(Scene::new(BuiltinScenes::NAMES[1], camera)
        .with_light(DirectionalLight::new(Vec3::ONE, Vec3::ONE, 1.0)?)
        .with_actor(triangle)
        .with_actors(floor(Vec3::new(-5.0, 0.0, -20.0), Vec3::new(10.0, 1.0, 40.0), white())))
}

/// Spheres between two facing mirrors, so reflections repeat into the distance.
fn mirror_room(resolution: UVec2) -> RenderResult<Scene> {
    let camera = camera(resolution, Vec3::new(0.0, 1.5, 6.0), Vec3::new(-0.1, 0.0, 0.0), 30.0)?;

    let mirror = ActorLightingMaterial::glossy(
        Vec3::splat(0.05),
        Vec3::splat(0.5),
        Vec3::splat(0.85),
        250.0,
    );
    let red: Color = Vec3::new(0.8, 0.1, 0.1);
    let blue: Color = Vec3::new(0.1, 0.2, 0.8);
    let red_ball =
        ActorLightingMaterial::glossy(red, Vec3::splat(0.15), Vec3::splat(0.1), 250.0);
    let blue_ball = ActorLightingMaterial::glossy(blue, Vec3::splat(0.08), Vec3::ZERO, 10.0);

    // Floor quad stood on its edge: local X becomes world Y
    let wall = |x: f32| {
        quad(
            Transform::from_euler(
                Vec3::new(x, 0.0, -15.0),
                Vec3::new(0.0, 0.0, FRAC_PI_2),
                Vec3::new(6.0, 1.0, 20.0),
            ),
            mirror,
        )
    };

    Ok(Scene::new(BuiltinScenes::NAMES[2], camera)
        .with_light(PointLight::new(Vec3::new(0.0, 4.0, 0.0), Vec3::ONE, 1.0, 12.0))
        .with_light(DirectionalLight::new(Vec3::new(0.3, 1.0, 0.5), Vec3::ONE, 0.4)?)
        .with_actor(Sphere::new(Vec3::new(-1.0, 1.0, -2.0), 1.0, metallic()))
        .with_actor(Sphere::new(Vec3::new(1.2, 0.8, -3.0), 0.8, red_ball).with_bobbing(0.4, 2.0))
        .with_actor(Sphere::new(Vec3::new(0.3, 0.4, -0.5), 0.4, blue_ball))
        .with_actors(wall(-3.0))
        .with_actors(wall(3.0))
        .with_actors(floor(Vec3::new(-3.0, 0.0, -15.0), Vec3::new(6.0, 1.0, 20.0), white())))
}

/// One bobbing ball above a floor, lit by a nearby point light.
fn basic_ball(resolution: UVec2) -> RenderResult<Scene> {
    let camera = camera(resolution, Vec3::new(0.0, 1.5, 6.0), Vec3::ZERO, 22.5)?;

    let ball = Sphere::new(Vec3::new(0.0, 1.2, 0.0), 1.0, ActorLightingMaterial::default())
        .with_bobbing(0.5, 1.0);

    Ok(Scene::new(BuiltinScenes::NAMES[3], camera)
        .with_light(PointLight::new(Vec3::new(2.0, 4.0, 2.0), Vec3::ONE, 1.0, 20.0))
        .with_actor(ball)
        .with_actors(floor(Vec3::new(-20.0, 0.0, -20.0), Vec3::splat(40.0), white())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use whitted_core::Entity;

    const RESOLUTION: UVec2 = UVec2::new(64, 48);

    #[test]
    fn test_every_builtin_scene_loads() {
        let scenes = BuiltinScenes;
        for index in 0..scenes.scene_count() {
            let scene = scenes.load(RESOLUTION, index).unwrap();
            assert_eq!(scene.name, BuiltinScenes::NAMES[index]);
            assert!(!scene.actors.is_empty());
            assert!(!scene.lights.is_empty());
            assert_eq!(scene.camera.resolution(), RESOLUTION);
        }
    }

    #[test]
    fn test_unknown_index_is_an_error() {
        let result = BuiltinScenes.load(RESOLUTION, 4);
        assert!(matches!(
            result,
            Err(RenderError::UnknownScene { index: 4, available: 4 })
        ));
    }

    #[test]
    fn test_zero_resolution_is_an_error() {
        let result = BuiltinScenes.load(UVec2::new(0, 48), 0);
        assert!(matches!(result, Err(RenderError::Core(_))));
    }

    #[test]
    fn test_floor_is_horizontal_and_not_degenerate() {
        for actor in floor(Vec3::new(-20.0, 0.0, -20.0), Vec3::splat(40.0), white()) {
            let Actor::Triangle(triangle) = actor else {
                panic!("floor should be made of triangles");
            };
            assert!(!triangle.is_degenerate());
            assert!(triangle.normal().dot(Vec3::Y).abs() > 0.999);
        }
    }

    #[test]
    fn test_mirror_room_walls_are_vertical() {
        let scene = BuiltinScenes.load(RESOLUTION, 2).unwrap();
        let walls = scene
            .actors
            .iter()
            .filter_map(|actor| match actor {
                Actor::Triangle(triangle) if triangle.normal().x.abs() > 0.999 => Some(triangle),
                _ => None,
            })
            .count();
        assert_eq!(walls, 4);
    }

    #[test]
    fn test_basic_ball_bobs() {
        let mut scene = BuiltinScenes.load(RESOLUTION, 3).unwrap();
        let before = scene.actors[0].position();
        scene.actors[0].update(0.5);
        assert_ne!(scene.actors[0].position(), before);
    }
}
