//! Camera for primary ray generation.
//!
//! Rays are built by unprojecting each pixel's near and far clip-space points
//! through the cached inverse projection, rotation and translation. The cache
//! is rebuilt eagerly whenever the transform or projection changes, never
//! lazily during ray generation.

use whitted_math::{Interval, Mat4, Quat, Transform, UVec2, Vec3, Vec4};

use crate::{CoreError, CoreResult, Entity, Ray};

/// Vertical half field of view used by [`Camera::new`], in degrees.
pub const DEFAULT_FOV_HALF_ANGLE: f32 = 45.0;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    transform: Transform,

    // Image settings
    resolution: UVec2,
    aspect_ratio: f32,

    // Vertical half field of view in degrees
    fov_half_angle: f32,

    // Cached matrices (rebuilt by update_matrices())
    inverse_projection: Mat4,
    rotation: Mat4,
    translation: Mat4,
    inverse_prt: Mat4,
}

impl Camera {
    /// Create a camera at the origin looking down -Z.
    pub fn new(resolution: UVec2) -> CoreResult<Self> {
        Self::with_transform(Transform::default(), resolution, DEFAULT_FOV_HALF_ANGLE)
    }

    /// Create a camera with an explicit transform and vertical half field of view (degrees).
    ///
    /// Scale is ignored for ray generation.
    pub fn with_transform(
        transform: Transform,
        resolution: UVec2,
        fov_half_angle: f32,
    ) -> CoreResult<Self> {
        if resolution.x == 0 || resolution.y == 0 {
            return Err(CoreError::InvalidResolution {
                width: resolution.x,
                height: resolution.y,
            });
        }
        validate_fov(fov_half_angle)?;

        let mut camera = Self {
            transform,
            resolution,
            aspect_ratio: resolution.x as f32 / resolution.y as f32,
            fov_half_angle,
            inverse_projection: Mat4::IDENTITY,
            rotation: Mat4::IDENTITY,
            translation: Mat4::IDENTITY,
            inverse_prt: Mat4::IDENTITY,
        };
        camera.update_matrices();
        Ok(camera)
    }

    /// Screen resolution in pixels.
    pub fn resolution(&self) -> UVec2 {
        self.resolution
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Vertical half field of view in degrees.
    pub fn fov_half_angle(&self) -> f32 {
        self.fov_half_angle
    }

    /// Move the camera.
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.update_matrices();
    }

    /// Re-orient the camera.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
        self.update_matrices();
    }

    /// Replace the whole transform.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.update_matrices();
    }

    /// Change the vertical half field of view (degrees).
    pub fn set_fov_half_angle(&mut self, fov_half_angle: f32) -> CoreResult<()> {
        validate_fov(fov_half_angle)?;
        self.fov_half_angle = fov_half_angle;
        self.update_matrices();
        Ok(())
    }

    /// Rebuild the cached projection and world matrices.
    pub fn update_matrices(&mut self) {
        // perspective_rh_gl takes the full vertical angle; its Y scale is
        // cot(half angle) and its X scale that divided by the aspect ratio.
        let projection = Mat4::perspective_rh_gl(
            2.0 * self.fov_half_angle.to_radians(),
            self.aspect_ratio,
            NEAR_PLANE,
            FAR_PLANE,
        );
        self.inverse_projection = projection.inverse();
        self.rotation = self.transform.rotation_matrix();
        self.translation = self.transform.translation_matrix();
        self.inverse_prt = self.translation * self.rotation * self.inverse_projection;
    }

    /// Generate the ray through the centre of pixel `(x, y)`.
    ///
    /// Pixel rows run top to bottom while view-space Y points up, so the
    /// first row maps to the top of the view.
    pub fn generate_ray(&self, x: u32, y: u32) -> Ray {
        let columns = Interval::new(0.0, self.resolution.x as f32);
        let rows = Interval::new(0.0, self.resolution.y as f32);

        let ndc_x = columns.map(x as f32 + 0.5, &Interval::NDC);
        let ndc_y = rows.map(y as f32 + 0.5, &Interval::new(1.0, -1.0));

        let near = self.unproject(Vec4::new(ndc_x, ndc_y, -1.0, 1.0));
        let far = self.unproject(Vec4::new(ndc_x, ndc_y, 1.0, 1.0));

        Ray::primary(near, (far - near).normalize_or_zero())
    }

    /// Clip space to world space, including the perspective divide.
    ///
    /// The translation and rotation are affine, so dividing after the
    /// composite transform is the same as dividing before it.
    fn unproject(&self, clip: Vec4) -> Vec3 {
        let world = self.inverse_prt * clip;
        world.truncate() / world.w
    }
}

impl Entity for Camera {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn update(&mut self, _delta_time: f32) {
        self.update_matrices();
    }
}

fn validate_fov(fov_half_angle: f32) -> CoreResult<()> {
    if fov_half_angle > 0.0 && fov_half_angle < 90.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidFieldOfView(fov_half_angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_rejects_zero_height() {
        let err = Camera::new(UVec2::new(640, 0)).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidResolution {
                width: 640,
                height: 0
            }
        );
    }

    #[test]
    fn test_rejects_bad_fov() {
        let res = UVec2::new(10, 10);
        assert!(Camera::with_transform(Transform::default(), res, 0.0).is_err());
        assert!(Camera::with_transform(Transform::default(), res, 90.0).is_err());

        let mut camera = Camera::new(res).unwrap();
        assert!(camera.set_fov_half_angle(-5.0).is_err());
        assert_eq!(camera.fov_half_angle(), DEFAULT_FOV_HALF_ANGLE);
    }

    #[test]
    fn test_aspect_ratio() {
        let camera = Camera::new(UVec2::new(1920, 1080)).unwrap();
        assert!((camera.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_center_ray_looks_forward() {
        let camera = Camera::new(UVec2::new(101, 101)).unwrap();
        let ray = camera.generate_ray(50, 50);

        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-5);
        assert!((ray.origin - Vec3::new(0.0, 0.0, -NEAR_PLANE)).length() < 1e-5);
        assert_eq!(ray.energy, Vec3::ONE);
    }

    #[test]
    fn test_top_row_points_up_and_left_column_points_left() {
        let camera = Camera::new(UVec2::new(100, 100)).unwrap();

        let top = camera.generate_ray(50, 0);
        let bottom = camera.generate_ray(50, 99);
        assert!(top.direction.y > 0.0);
        assert!(bottom.direction.y < 0.0);

        let left = camera.generate_ray(0, 50);
        let right = camera.generate_ray(99, 50);
        assert!(left.direction.x < 0.0);
        assert!(right.direction.x > 0.0);
    }

    #[test]
    fn test_field_of_view_and_aspect() {
        // 45 degree half angle: view-space slope is ndc * tan(45) = ndc on Y,
        // and ndc * aspect on X.
        let camera = Camera::new(UVec2::new(200, 100)).unwrap();

        let ray = camera.generate_ray(199, 50);
        let ndc_x = 199.5 / 200.0 * 2.0 - 1.0;
        let slope = ray.direction.x / -ray.direction.z;
        assert!((slope - ndc_x * 2.0).abs() < 1e-3);

        let ray = camera.generate_ray(100, 0);
        let ndc_y = 1.0 - 0.5 / 100.0 * 2.0;
        let slope = ray.direction.y / -ray.direction.z;
        assert!((slope - ndc_y).abs() < 1e-3);
    }

    #[test]
    fn test_transform_moves_rays() {
        let mut camera = Camera::new(UVec2::new(101, 101)).unwrap();
        camera.set_position(Vec3::new(1.0, 2.0, 3.0));
        camera.set_rotation(Quat::from_rotation_y(PI / 2.0));

        let ray = camera.generate_ray(50, 50);
        assert!((ray.direction - Vec3::NEG_X).length() < 1e-5);
        assert!((ray.origin - Vec3::new(1.0 - NEAR_PLANE, 2.0, 3.0)).length() < 1e-4);
    }

    #[test]
    fn test_ray_directions_are_unit() {
        let camera = Camera::new(UVec2::new(64, 48)).unwrap();
        for (x, y) in [(0, 0), (63, 47), (10, 30)] {
            let ray = camera.generate_ray(x, y);
            assert!((ray.direction.length() - 1.0).abs() < 1e-5);
        }
    }
}
