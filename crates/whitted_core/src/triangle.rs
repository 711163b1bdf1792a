//! Triangle primitive for ray tracing.
//!
//! Intersection is a ray/plane test followed by a 2D point-in-triangle test
//! on the axis pair that best preserves the triangle's area. World-space
//! vertices, the flat normal and the projected edges are all cached and
//! rebuilt whenever the transform changes.

use whitted_math::{ray_plane_distance, ProjectedTriangle, Transform, Vec3};

use crate::{ActorLightingMaterial, Entity, HitInfo, Ray};

/// A triangle corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position relative to the owning triangle's transform
    pub local: Vec3,
    /// Optional per-vertex material for interpolated shading
    pub material: Option<ActorLightingMaterial>,
    world: Vec3,
}

impl Vertex {
    pub fn new(local: Vec3) -> Self {
        Self {
            local,
            material: None,
            world: local,
        }
    }

    pub fn with_material(local: Vec3, material: ActorLightingMaterial) -> Self {
        Self {
            material: Some(material),
            ..Self::new(local)
        }
    }

    /// World-space position as of the last transform.
    pub fn world(&self) -> Vec3 {
        self.world
    }
}

/// A flat-shaded triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    transform: Transform,
    material: ActorLightingMaterial,
    vertices: [Vertex; 3],
    /// Unit face normal from the world-space winding, zero when degenerate
    normal: Vec3,
    projection: ProjectedTriangle,
    vertex_materials: bool,
    two_sided: bool,
}

impl Triangle {
    /// Create a triangle from three local-space vertices.
    pub fn new(
        transform: Transform,
        material: ActorLightingMaterial,
        vertices: [Vertex; 3],
    ) -> Self {
        let mut triangle = Self {
            transform,
            material,
            vertices,
            normal: Vec3::ZERO,
            projection: ProjectedTriangle::default(),
            vertex_materials: false,
            two_sided: true,
        };
        triangle.transform_vertices();

        if triangle.is_degenerate() {
            log::debug!(
                "Degenerate triangle at {:?}; it will never be hit",
                triangle.transform.position
            );
        }
        triangle
    }

    /// Interpolate the per-vertex materials across the face.
    ///
    /// Vertices without a material fall back to the triangle's own.
    pub fn with_vertex_materials(mut self) -> Self {
        self.vertex_materials = true;
        self
    }

    /// Report the winding normal as-is instead of turning it toward each ray.
    pub fn single_sided(mut self) -> Self {
        self.two_sided = false;
        self
    }

    /// Replace the transform and rebuild the world-space data.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.transform_vertices();
    }

    pub fn material(&self) -> &ActorLightingMaterial {
        &self.material
    }

    pub fn vertices(&self) -> &[Vertex; 3] {
        &self.vertices
    }

    /// Unit face normal following the vertex winding (zero when degenerate).
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// True when the triangle has no area and can never be hit.
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO || self.projection.is_degenerate()
    }

    /// Find the closest hit of `ray` with this triangle.
    pub fn intersect(&self, ray: &Ray) -> HitInfo {
        let Some((distance, position, w1, w2)) = self.solve(ray) else {
            return HitInfo::miss();
        };

        let normal = if self.two_sided && ray.direction.dot(self.normal) > 0.0 {
            -self.normal
        } else {
            self.normal
        };

        let material = if self.vertex_materials {
            let [a, b, c] = &self.vertices;
            ActorLightingMaterial::blend(
                [
                    a.material.as_ref().unwrap_or(&self.material),
                    b.material.as_ref().unwrap_or(&self.material),
                    c.material.as_ref().unwrap_or(&self.material),
                ],
                [1.0 - w1 - w2, w1, w2],
            )
        } else {
            self.material
        };

        HitInfo::new(position, normal, distance, material)
    }

    /// Occlusion-only version of [`Triangle::intersect`].
    pub fn quick_intersect(&self, ray: &Ray) -> bool {
        self.solve(ray).is_some()
    }

    /// Distance, hit point and the weights of vertices 1 and 2.
    fn solve(&self, ray: &Ray) -> Option<(f32, Vec3, f32, f32)> {
        if self.is_degenerate() {
            return None;
        }

        let a = self.vertices[0].world;
        let distance = ray_plane_distance(ray.origin, ray.direction, a, self.normal)?;
        let position = ray.at(distance);
        let (w1, w2) = self.projection.weights(a, position)?;
        Some((distance, position, w1, w2))
    }

    /// Apply translation * rotation * scale to every local vertex and
    /// rebuild the normal and projected edges.
    fn transform_vertices(&mut self) {
        let matrix = self.transform.to_matrix();
        for vertex in &mut self.vertices {
            vertex.world = matrix.transform_point3(vertex.local);
        }

        let [a, b, c] = [
            self.vertices[0].world,
            self.vertices[1].world,
            self.vertices[2].world,
        ];
        self.normal = (b - a).cross(c - a).try_normalize().unwrap_or(Vec3::ZERO);
        self.projection = if self.normal == Vec3::ZERO {
            ProjectedTriangle::default()
        } else {
            ProjectedTriangle::new(a, b, c, self.normal)
        };
    }
}

impl Entity for Triangle {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn update(&mut self, _delta_time: f32) {
        self.transform_vertices();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;
    use whitted_math::Quat;

    fn white() -> ActorLightingMaterial {
        ActorLightingMaterial::glossy(Vec3::splat(0.9), Vec3::splat(0.1), Vec3::splat(0.1), 50.0)
    }

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Transform::default(),
            white(),
            [
                Vertex::new(Vec3::ZERO),
                Vertex::new(Vec3::X),
                Vertex::new(Vec3::Y),
            ],
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = unit_triangle();
        let ray = Ray::primary(Vec3::new(0.2, 0.2, 1.0), Vec3::NEG_Z);

        let hit = tri.intersect(&ray);
        assert!(hit.hit);
        assert!((hit.position - Vec3::new(0.2, 0.2, 0.0)).length() < 1e-5);
        assert!((hit.distance - 1.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
        assert!(tri.quick_intersect(&ray));
    }

    #[test]
    fn test_triangle_miss_outside() {
        let tri = unit_triangle();
        let ray = Ray::primary(Vec3::new(0.8, 0.8, 1.0), Vec3::NEG_Z);

        assert!(!tri.intersect(&ray).hit);
        assert!(!tri.quick_intersect(&ray));
    }

    #[test]
    fn test_triangle_back_face_normal_opposes_ray() {
        let tri = unit_triangle();
        let ray = Ray::primary(Vec3::new(0.2, 0.2, -1.0), Vec3::Z);

        let hit = tri.intersect(&ray);
        assert!(hit.hit);
        assert!((hit.normal - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_single_sided_keeps_winding_normal() {
        let tri = unit_triangle().single_sided();
        let ray = Ray::primary(Vec3::new(0.2, 0.2, -1.0), Vec3::Z);

        let hit = tri.intersect(&ray);
        assert!(hit.hit);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_triangle_parallel_and_behind() {
        let tri = unit_triangle();
        assert!(!tri.intersect(&Ray::primary(Vec3::new(-1.0, 0.2, 0.0), Vec3::X)).hit);
        assert!(!tri.intersect(&Ray::primary(Vec3::new(0.2, 0.2, 1.0), Vec3::Z)).hit);
    }

    #[test]
    fn test_horizontal_floor_is_hit() {
        // Lies in the XZ plane, where an XY-only projection would collapse.
        let floor = Triangle::new(
            Transform::from_position(Vec3::new(-20.0, 0.0, -20.0))
                .with_scale(Vec3::new(40.0, 1.0, 40.0)),
            white(),
            [
                Vertex::new(Vec3::ZERO),
                Vertex::new(Vec3::Z),
                Vertex::new(Vec3::X),
            ],
        );
        assert!(!floor.is_degenerate());

        let hit = floor.intersect(&Ray::primary(Vec3::new(-10.0, 5.0, -10.0), Vec3::NEG_Y));
        assert!(hit.hit);
        assert!((hit.position - Vec3::new(-10.0, 0.0, -10.0)).length() < 1e-4);
        assert!((hit.normal - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let tri = Triangle::new(
            Transform::default(),
            white(),
            [
                Vertex::new(Vec3::ZERO),
                Vertex::new(Vec3::X),
                Vertex::new(Vec3::X * 2.0),
            ],
        );
        assert!(tri.is_degenerate());
        let on_edge = Ray::primary(Vec3::new(0.5, 0.0, 1.0), Vec3::NEG_Z);
        assert_eq!(tri.intersect(&on_edge), HitInfo::MISS);

        // Zero scale collapses a healthy triangle too.
        let mut flat = unit_triangle();
        flat.set_transform(Transform::default().with_scale(Vec3::new(1.0, 0.0, 1.0)));
        assert!(flat.is_degenerate());
        assert!(!flat.quick_intersect(&Ray::primary(Vec3::new(0.1, 0.0, 1.0), Vec3::NEG_Z)));
    }

    #[test]
    fn test_transform_rebuilds_world_vertices_and_normal() {
        let mut tri = unit_triangle();
        tri.set_transform(
            Transform::from_position(Vec3::new(0.0, 0.0, -5.0))
                .with_rotation(Quat::from_rotation_x(-PI / 2.0)),
        );

        // Rotated -90 degrees about X: +Y goes to -Z, so the face now lies flat.
        assert!((tri.normal() - Vec3::Y).length() < 1e-5);
        assert!((tri.vertices()[2].world() - Vec3::new(0.0, 0.0, -6.0)).length() < 1e-5);

        let hit = tri.intersect(&Ray::primary(Vec3::new(0.2, 3.0, -5.2), Vec3::NEG_Y));
        assert!(hit.hit);
    }

    #[test]
    fn test_negative_scale_flips_winding() {
        let mut tri = unit_triangle();
        tri.set_transform(Transform::default().with_scale(Vec3::new(-1.0, 1.0, 1.0)));
        assert!((tri.normal() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_vertex_material_interpolation() {
        let red = ActorLightingMaterial::glossy(Vec3::X, Vec3::ZERO, Vec3::ZERO, 0.0);
        let green = ActorLightingMaterial::glossy(Vec3::Y, Vec3::ZERO, Vec3::ZERO, 0.0);
        let blue = ActorLightingMaterial::glossy(Vec3::Z, Vec3::ZERO, Vec3::ZERO, 0.0);

        let tri = Triangle::new(
            Transform::default(),
            white(),
            [
                Vertex::with_material(Vec3::ZERO, red),
                Vertex::with_material(Vec3::X, green),
                Vertex::with_material(Vec3::Y, blue),
            ],
        )
        .with_vertex_materials();

        let hit = tri.intersect(&Ray::primary(Vec3::new(0.25, 0.25, 1.0), Vec3::NEG_Z));
        assert!(hit.hit);
        assert!((hit.material.surface.diffuse - Vec3::new(0.5, 0.25, 0.25)).length() < 1e-5);

        // Without the flag the flat material is used.
        let flat = Triangle::new(Transform::default(), white(), *tri.vertices());
        let hit = flat.intersect(&Ray::primary(Vec3::new(0.25, 0.25, 1.0), Vec3::NEG_Z));
        assert_eq!(hit.material, white());
    }
}
