//! Whitted Renderer - the ray tracing pipeline.
//!
//! Turns a scene of spheres, triangles and lights into pixels:
//! - Bounded mirror-reflection trace with Blinn-Phong local lighting
//! - Shadow rays per light, distance-aware for point lights
//! - Procedural sky gradient for escaping rays
//! - A frame loop with scene switching and a gradual bounce-limit ramp
//!
//! Output goes through the [`PixelSink`] trait, input through [`InputSource`],
//! so the loop runs the same against a PNG writer or an in-memory buffer.

mod config;
mod error;
mod input;
mod scene;
mod session;
mod sink;
mod sky;
mod tracer;
mod world;

pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use input::{Command, InputSource, ScriptedInput};
pub use scene::{BuiltinScenes, Scene, SceneProvider};
pub use session::{RayTracer, RunSummary};
pub use sink::{channel_to_u8, color_to_rgba, ImageBuffer, PixelSink, PngSink};
pub use sky::SkyGradient;
pub use tracer::Tracer;
pub use world::World;

/// Re-export the world types from whitted_core
pub use whitted_core::{Color, UVec2, Vec3};
