//! The frame loop: update the world, trace every pixel, present, react to input.

use std::time::Instant;

use rayon::prelude::*;
use whitted_core::{Color, CoreError, UVec2};

use crate::{
    BuiltinScenes, Command, InputSource, PixelSink, RenderConfig, RenderResult, SceneProvider,
    Tracer, World,
};

/// What a call to [`RayTracer::run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_rendered: u64,
    pub last_scene: usize,
}

/// Owns the active world and drives it frame by frame.
#[derive(Debug)]
pub struct RayTracer<P: SceneProvider = BuiltinScenes> {
    resolution: UVec2,
    config: RenderConfig,
    provider: P,
    world: World,
    scene_index: usize,
    /// Frames since the current scene was loaded
    frame_count: u64,
    bounce_limit: u32,
}

impl<P: SceneProvider> RayTracer<P> {
    /// Validate the settings and load scene 0.
    pub fn new(resolution: UVec2, config: RenderConfig, provider: P) -> RenderResult<Self> {
        Self::with_scene(resolution, config, provider, 0)
    }

    /// Validate the settings and start on scene `index`.
    pub fn with_scene(
        resolution: UVec2,
        config: RenderConfig,
        provider: P,
        index: usize,
    ) -> RenderResult<Self> {
        if resolution.x == 0 || resolution.y == 0 {
            return Err(CoreError::InvalidResolution {
                width: resolution.x,
                height: resolution.y,
            }
            .into());
        }
        config.validate()?;

        let world = load_world(&provider, resolution, index)?;
        let bounce_limit = config.initial_bounce_limit();
        log::info!(
            "Ray tracer ready at {}x{}, max {} bounces",
            resolution.x,
            resolution.y,
            config.max_bounce_limit
        );

        Ok(Self {
            resolution,
            config,
            provider,
            world,
            scene_index: index,
            frame_count: 0,
            bounce_limit,
        })
    }

    pub fn resolution(&self) -> UVec2 {
        self.resolution
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scene_index(&self) -> usize {
        self.scene_index
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Bounces traced per primary ray in the next frame.
    pub fn bounce_limit(&self) -> u32 {
        self.bounce_limit
    }

    /// Replace the world with scene `index`.
    ///
    /// Does nothing if that scene is already active. On failure the current
    /// world is kept.
    pub fn change_scene(&mut self, index: usize) -> RenderResult<()> {
        if index == self.scene_index {
            return Ok(());
        }

        self.world = load_world(&self.provider, self.resolution, index)?;
        self.scene_index = index;
        self.frame_count = 0;
        self.bounce_limit = self.config.initial_bounce_limit();
        Ok(())
    }

    /// Advance every entity by one time step.
    pub fn update(&mut self) {
        self.world.update(self.config.time_step);
    }

    /// Trace every pixel of the current world into `sink`.
    pub fn render(&self, sink: &mut dyn PixelSink) {
        let tracer = Tracer::new(&self.world, &self.config);
        let UVec2 { x: width, y: height } = self.resolution;
        let bounce_limit = self.bounce_limit;

        if self.config.parallel {
            let rows: Vec<Vec<Color>> = (0..height)
                .into_par_iter()
                .map(|y| {
                    (0..width)
                        .map(|x| tracer.trace_pixel(x, y, bounce_limit))
                        .collect()
                })
                .collect();

            for (y, row) in rows.into_iter().enumerate() {
                for (x, color) in row.into_iter().enumerate() {
                    sink.draw_pixel(x as u32, y as u32, color);
                }
            }
        } else {
            for y in 0..height {
                for x in 0..width {
                    sink.draw_pixel(x, y, tracer.trace_pixel(x, y, bounce_limit));
                }
            }
        }
    }

    /// Render a single frame and present it.
    pub fn render_once(&mut self, sink: &mut dyn PixelSink) -> RenderResult<()> {
        sink.init(self.resolution)?;
        self.update();
        self.render(sink);
        sink.present()
    }

    /// Render frames until the sink or the input asks to stop.
    pub fn run(
        &mut self,
        sink: &mut dyn PixelSink,
        input: &mut dyn InputSource,
    ) -> RenderResult<RunSummary> {
        sink.init(self.resolution)?;
        sink.set_background(Color::ZERO);

        let mut frames_rendered = 0;
        let mut running = true;
        let mut last_frame = Instant::now();

        while running && sink.poll_events() {
            self.update();
            self.render(sink);
            sink.present()?;

            let now = Instant::now();
            log::debug!(
                "Frame: {}  Frame time: {:.3}s  Bounce limit: {}/{}",
                self.frame_count,
                now.duration_since(last_frame).as_secs_f32(),
                self.bounce_limit,
                self.config.max_bounce_limit
            );
            last_frame = now;

            self.frame_count += 1;
            self.bounce_limit = (self.bounce_limit + 1).min(self.config.max_bounce_limit);

            for command in input.poll(frames_rendered) {
                match command {
                    Command::SwitchScene(index) => self.change_scene(index)?,
                    Command::Quit => running = false,
                }
            }
            frames_rendered += 1;
        }

        let summary = RunSummary {
            frames_rendered,
            last_scene: self.scene_index,
        };
        log::info!(
            "Rendered {} frames, finished on scene {} ({})",
            summary.frames_rendered,
            summary.last_scene,
            self.world.name()
        );
        Ok(summary)
    }
}

fn load_world<P: SceneProvider>(
    provider: &P,
    resolution: UVec2,
    index: usize,
) -> RenderResult<World> {
    let scene = provider.load(resolution, index)?;
    log::info!(
        "Loaded scene {} '{}': {} actors, {} lights",
        index,
        scene.name,
        scene.actors.len(),
        scene.lights.len()
    );
    Ok(World::from(scene))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImageBuffer, RenderError, ScriptedInput};

    const RESOLUTION: UVec2 = UVec2::new(16, 12);

    fn tracer() -> RayTracer {
        RayTracer::new(RESOLUTION, RenderConfig::default(), BuiltinScenes).unwrap()
    }

    /// Stops after a fixed number of polls, like a window being closed.
    struct ClosingSink {
        buffer: ImageBuffer,
        polls_left: u32,
    }

    impl PixelSink for ClosingSink {
        fn init(&mut self, resolution: UVec2) -> RenderResult<()> {
            self.buffer.init(resolution)
        }

        fn set_background(&mut self, color: Color) {
            self.buffer.set_background(color);
        }

        fn draw_pixel(&mut self, x: u32, y: u32, color: Color) {
            self.buffer.draw_pixel(x, y, color);
        }

        fn present(&mut self) -> RenderResult<()> {
            self.buffer.present()
        }

        fn poll_events(&mut self) -> bool {
            if self.polls_left == 0 {
                return false;
            }
            self.polls_left -= 1;
            true
        }
    }

    #[test]
    fn test_new_loads_first_scene() {
        let tracer = tracer();
        assert_eq!(tracer.scene_index(), 0);
        assert_eq!(tracer.world().name(), BuiltinScenes::NAMES[0]);
        assert_eq!(tracer.bounce_limit(), 1);
    }

    #[test]
    fn test_with_scene_starts_on_requested_scene() {
        let tracer =
            RayTracer::with_scene(RESOLUTION, RenderConfig::default(), BuiltinScenes, 3).unwrap();
        assert_eq!(tracer.scene_index(), 3);
        assert_eq!(tracer.world().name(), BuiltinScenes::NAMES[3]);

        let missing = RayTracer::with_scene(RESOLUTION, RenderConfig::default(), BuiltinScenes, 4);
        assert!(matches!(missing, Err(RenderError::UnknownScene { index: 4, .. })));
    }

    #[test]
    fn test_new_rejects_bad_settings() {
        let zero = RayTracer::new(UVec2::new(0, 10), RenderConfig::default(), BuiltinScenes);
        assert!(matches!(zero, Err(RenderError::Core(CoreError::InvalidResolution { .. }))));

        let config = RenderConfig {
            max_bounce_limit: 0,
            ..Default::default()
        };
        let bad = RayTracer::new(RESOLUTION, config, BuiltinScenes);
        assert!(matches!(bad, Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_scene_switch_replaces_world() {
        let mut tracer = tracer();
        tracer.frame_count = 7;
        tracer.bounce_limit = 5;
        let old_actors = tracer.world().actors().to_vec();

        tracer.change_scene(2).unwrap();
        assert_eq!(tracer.scene_index(), 2);
        assert_eq!(tracer.world().name(), BuiltinScenes::NAMES[2]);
        assert_eq!(tracer.frame_count(), 0);
        assert_eq!(tracer.bounce_limit(), 1);
        assert!(old_actors.iter().all(|old| !tracer.world().actors().contains(old)));
    }

    #[test]
    fn test_switch_to_current_scene_is_noop() {
        let mut tracer = tracer();
        tracer.frame_count = 3;
        tracer.change_scene(0).unwrap();
        assert_eq!(tracer.frame_count(), 3);
    }

    #[test]
    fn test_failed_switch_keeps_world() {
        let mut tracer = tracer();
        let result = tracer.change_scene(9);
        assert!(matches!(result, Err(RenderError::UnknownScene { index: 9, .. })));
        assert_eq!(tracer.scene_index(), 0);
        assert_eq!(tracer.world().name(), BuiltinScenes::NAMES[0]);
    }

    #[test]
    fn test_run_ramps_bounce_limit_and_stops_on_budget() {
        let mut tracer = tracer();
        let mut sink = ImageBuffer::default();
        let mut input = ScriptedInput::new().with_frame_budget(8);

        let summary = tracer.run(&mut sink, &mut input).unwrap();
        assert_eq!(summary.frames_rendered, 8);
        assert_eq!(summary.last_scene, 0);
        assert_eq!(sink.presented(), 8);
        assert_eq!(tracer.bounce_limit(), tracer.config().max_bounce_limit);
    }

    #[test]
    fn test_run_applies_scene_switch() {
        let mut tracer = tracer();
        let mut sink = ImageBuffer::default();
        let mut input = ScriptedInput::new()
            .with_command(1, Command::SwitchScene(3))
            .with_frame_budget(4);

        let summary = tracer.run(&mut sink, &mut input).unwrap();
        assert_eq!(summary.frames_rendered, 4);
        assert_eq!(summary.last_scene, 3);
        // Two frames of the new scene
        assert_eq!(tracer.frame_count(), 2);
        assert_eq!(tracer.bounce_limit(), 3);
    }

    #[test]
    fn test_run_stops_when_sink_closes() {
        let mut tracer = tracer();
        let mut sink = ClosingSink {
            buffer: ImageBuffer::default(),
            polls_left: 2,
        };
        let summary = tracer.run(&mut sink, &mut ScriptedInput::new()).unwrap();
        assert_eq!(summary.frames_rendered, 2);
    }

    #[test]
    fn test_run_propagates_bad_switch() {
        let mut tracer = tracer();
        let mut sink = ImageBuffer::default();
        let mut input = ScriptedInput::new().with_command(0, Command::SwitchScene(42));
        assert!(tracer.run(&mut sink, &mut input).is_err());
        assert_eq!(tracer.scene_index(), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = tracer();
        let sequential = RayTracer::new(
            RESOLUTION,
            RenderConfig {
                parallel: false,
                ..Default::default()
            },
            BuiltinScenes,
        )
        .unwrap();

        let mut a = ImageBuffer::new(RESOLUTION.x, RESOLUTION.y);
        let mut b = ImageBuffer::new(RESOLUTION.x, RESOLUTION.y);
        parallel.render(&mut a);
        sequential.render(&mut b);
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_render_once_draws_scene() {
        let mut tracer = tracer();
        let mut sink = ImageBuffer::default();
        tracer.render_once(&mut sink).unwrap();

        assert_eq!(sink.presented(), 1);
        assert_eq!(sink.pixels().len(), (RESOLUTION.x * RESOLUTION.y) as usize);
        assert!(sink.pixels().iter().all(|p| p.is_finite()));
        assert!(sink.pixels().iter().any(|p| *p != Color::ZERO));
    }
}
