//! Lighting materials for surfaces and light sources.
//!
//! Every intensity is a per-channel colour rather than a scalar so a
//! material can tint each lighting term separately. Values are
//! conventionally in `[0, 1]` but never clamped here.

use whitted_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Fraction of the base colour used as ambient light by the colour-only constructors.
const AMBIENT_FRACTION: f32 = 0.05;

/// How a surface or light contributes to ambient, diffuse and specular lighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingMaterial {
    /// Unlit colour of the surface
    pub base_color: Color,
    /// Light reaching the surface regardless of light sources
    pub ambient: Color,
    /// Lambertian response
    pub diffuse: Color,
    /// Highlight response
    pub specular: Color,
}

impl LightingMaterial {
    /// All channels zero.
    pub const BLACK: LightingMaterial = LightingMaterial {
        base_color: Vec3::ZERO,
        ambient: Vec3::ZERO,
        diffuse: Vec3::ZERO,
        specular: Vec3::ZERO,
    };

    /// Create a material from explicit intensities.
    pub fn new(base_color: Color, ambient: Color, diffuse: Color, specular: Color) -> Self {
        Self {
            base_color,
            ambient,
            diffuse,
            specular,
        }
    }

    /// Derive every term from one colour with a full-strength highlight.
    pub fn from_color(base_color: Color) -> Self {
        Self::with_specular(base_color, Vec3::ONE)
    }

    /// Derive ambient and diffuse from `base_color`, with an explicit specular term.
    pub fn with_specular(base_color: Color, specular: Color) -> Self {
        Self {
            base_color,
            ambient: base_color * AMBIENT_FRACTION,
            diffuse: base_color,
            specular,
        }
    }
}

impl Default for LightingMaterial {
    fn default() -> Self {
        Self::with_specular(Vec3::new(1.0, 0.0, 0.498), Vec3::splat(0.647))
    }
}

/// A surface material: lighting terms plus reflection and highlight shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorLightingMaterial {
    pub surface: LightingMaterial,
    /// Carried for completeness; refraction is not traced.
    pub transmission: Color,
    /// Scales the energy of the reflected ray, channel by channel.
    pub reflectivity: Color,
    /// Specular exponent: larger values give a tighter highlight.
    pub shininess: f32,
}

impl ActorLightingMaterial {
    /// All channels zero; the material of a miss.
    pub const BLACK: ActorLightingMaterial = ActorLightingMaterial {
        surface: LightingMaterial::BLACK,
        transmission: Vec3::ZERO,
        reflectivity: Vec3::ZERO,
        shininess: 0.0,
    };

    /// Create a material from explicit intensities.
    pub fn new(
        base_color: Color,
        ambient: Color,
        diffuse: Color,
        specular: Color,
        transmission: Color,
        reflectivity: Color,
        shininess: f32,
    ) -> Self {
        Self {
            surface: LightingMaterial::new(base_color, ambient, diffuse, specular),
            transmission,
            reflectivity,
            shininess,
        }
    }

    /// An opaque material described by its colour, highlight and mirror strength.
    ///
    /// Sensible pairings keep specular proportional to shininess, e.g.
    /// `n = 10, ks = 0.08` or `n = 250, ks = 0.15`.
    pub fn glossy(base_color: Color, specular: Color, reflectivity: Color, shininess: f32) -> Self {
        Self {
            surface: LightingMaterial::with_specular(base_color, specular),
            transmission: Vec3::ZERO,
            reflectivity,
            shininess,
        }
    }

    /// Weighted per-channel blend of three materials (barycentric interpolation).
    pub fn blend(materials: [&ActorLightingMaterial; 3], weights: [f32; 3]) -> Self {
        let mix = |f: fn(&ActorLightingMaterial) -> Vec3| {
            f(materials[0]) * weights[0]
                + f(materials[1]) * weights[1]
                + f(materials[2]) * weights[2]
        };

        Self {
            surface: LightingMaterial {
                base_color: mix(|m| m.surface.base_color),
                ambient: mix(|m| m.surface.ambient),
                diffuse: mix(|m| m.surface.diffuse),
                specular: mix(|m| m.surface.specular),
            },
            transmission: mix(|m| m.transmission),
            reflectivity: mix(|m| m.reflectivity),
            shininess: materials[0].shininess * weights[0]
                + materials[1].shininess * weights[1]
                + materials[2].shininess * weights[2],
        }
    }
}

impl Default for ActorLightingMaterial {
    fn default() -> Self {
        Self {
            surface: LightingMaterial::default(),
            transmission: Vec3::ZERO,
            reflectivity: Vec3::splat(0.38),
            shininess: 2048.0,
        }
    }
}
