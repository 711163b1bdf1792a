use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use whitted_math::UVec2;
use whitted_renderer::{BuiltinScenes, Command, PngSink, RayTracer, RenderConfig, ScriptedInput};

/// Render the built-in scenes with a Whitted-style ray tracer.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Width in pixels of the generated image
    #[arg(
        short = 'W',
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        default_value_t = 640
    )]
    width: u32,

    /// Height in pixels of the generated image
    #[arg(
        short = 'H',
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        default_value_t = 480
    )]
    height: u32,

    /// Scene to start on (0 mirror-ball, 1 rgb-triangle, 2 mirror-room, 3 basic-ball)
    #[arg(short, long, default_value_t = 0)]
    scene: usize,

    /// Number of frames to render
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..), default_value_t = 1)]
    frames: u64,

    /// Output PNG path
    #[arg(short, long, default_value = "whitted.png")]
    output: PathBuf,

    /// Write every frame to its own numbered file instead of overwriting the output
    #[arg(long)]
    numbered: bool,

    /// Render one frame at full bounce depth and stop
    #[arg(long, conflicts_with_all = ["frames", "switch"])]
    once: bool,

    /// JSON render configuration; command line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum reflection bounces per pixel
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_bounces: Option<u32>,

    /// Start every scene at the maximum bounce limit instead of ramping up
    #[arg(long)]
    no_ramp: bool,

    #[arg(long)]
    no_ambient: bool,

    #[arg(long)]
    no_diffuse: bool,

    #[arg(long)]
    no_specular: bool,

    /// Render escaping rays black
    #[arg(long)]
    no_sky: bool,

    /// Trace on a single thread
    #[arg(long)]
    sequential: bool,

    /// Switch scene after a frame, as FRAME:SCENE (repeatable)
    #[arg(long, value_parser = parse_switch)]
    switch: Vec<(u64, usize)>,
}

fn parse_switch(value: &str) -> Result<(u64, usize), String> {
    let (frame, scene) = value
        .split_once(':')
        .ok_or_else(|| format!("expected FRAME:SCENE, got '{value}'"))?;
    let frame = frame
        .trim()
        .parse()
        .map_err(|e| format!("bad frame '{frame}': {e}"))?;
    let scene = scene
        .trim()
        .parse()
        .map_err(|e| format!("bad scene '{scene}': {e}"))?;
    Ok((frame, scene))
}

impl Args {
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => RenderConfig::default(),
        };

        if let Some(max_bounces) = self.max_bounces {
            config.max_bounce_limit = max_bounces;
        }
        if self.no_ramp || self.once {
            config.ramp_bounces = false;
        }
        config.show_ambient &= !self.no_ambient;
        config.show_diffuse &= !self.no_diffuse;
        config.show_specular &= !self.no_specular;
        config.show_sky &= !self.no_sky;
        config.parallel &= !self.sequential;
        Ok(config)
    }

    fn input(&self) -> ScriptedInput {
        self.switch
            .iter()
            .fold(ScriptedInput::new(), |input, &(frame, scene)| {
                input.with_command(frame, Command::SwitchScene(scene))
            })
            .with_frame_budget(self.frames)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    log::info!("Starting whitted");

    let config = args.render_config()?;
    let resolution = UVec2::new(args.width, args.height);
    let mut tracer = RayTracer::with_scene(resolution, config, BuiltinScenes, args.scene)?;

    let mut sink = PngSink::new(&args.output);
    if args.numbered {
        sink = sink.numbered();
    }

    if args.once {
        tracer.render_once(&mut sink)?;
    } else {
        tracer.run(&mut sink, &mut args.input())?;
    }

    log::info!("Output written to {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use whitted_renderer::InputSource;

    #[test]
    fn test_parse_switch() {
        assert_eq!(parse_switch("3:2"), Ok((3, 2)));
        assert_eq!(parse_switch(" 10 : 1 "), Ok((10, 1)));
        assert!(parse_switch("3").is_err());
        assert!(parse_switch("a:1").is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["whitted", "--max-bounces", "8", "--no-sky", "--sequential"]);
        let config = args.render_config().unwrap();
        assert_eq!(config.max_bounce_limit, 8);
        assert!(!config.show_sky);
        assert!(!config.parallel);
        assert!(config.show_ambient);
        assert!(config.ramp_bounces);
    }

    #[test]
    fn test_once_disables_ramp() {
        let args = Args::parse_from(["whitted", "--once"]);
        assert!(!args.render_config().unwrap().ramp_bounces);
    }

    #[test]
    fn test_switches_become_commands() {
        let args = Args::parse_from([
            "whitted", "--frames", "5", "--switch", "1:2", "--switch", "3:0",
        ]);
        let mut input = args.input();
        assert_eq!(input.poll(1), vec![Command::SwitchScene(2)]);
        assert_eq!(input.poll(3), vec![Command::SwitchScene(0)]);
        assert_eq!(input.poll(4), vec![Command::Quit]);
    }
}
