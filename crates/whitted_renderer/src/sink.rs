//! Pixel sinks: where finished pixels go.
//!
//! The tracer hands out unclamped colours; clamping to the displayable
//! range happens here, when a sink converts to 8-bit.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use whitted_core::{Color, UVec2};

use crate::{RenderError, RenderResult};

/// A surface the session draws frames onto.
pub trait PixelSink {
    /// Prepare a drawing surface of `resolution` pixels.
    fn init(&mut self, resolution: UVec2) -> RenderResult<()>;

    /// Clear every pixel to `color`.
    fn set_background(&mut self, color: Color);

    fn draw_pixel(&mut self, x: u32, y: u32, color: Color);

    /// Show the finished frame.
    fn present(&mut self) -> RenderResult<()>;

    /// Returns false once the sink wants the frame loop to stop.
    fn poll_events(&mut self) -> bool {
        true
    }
}

/// Convert a linear colour channel to 8 bits, clamping to [0, 1].
#[inline]
pub fn channel_to_u8(value: f32) -> u8 {
    (255.0 * value.clamp(0.0, 1.0)).round() as u8
}

/// Convert a colour to 8-bit RGBA with opaque alpha.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    [
        channel_to_u8(color.x),
        channel_to_u8(color.y),
        channel_to_u8(color.z),
        255,
    ]
}

/// In-memory float frame buffer, row-major from the top-left.
#[derive(Debug, Clone, Default)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    background: Color,
    pixels: Vec<Color>,
    presented: usize,
}

impl ImageBuffer {
    /// Create a buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Color::ZERO,
            pixels: vec![Color::ZERO; (width * height) as usize],
            presented: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> usize {
        self.presented
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    /// Pixel at (x, y), or `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y). Writes outside the buffer are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Convert to RGBA bytes, clamping every channel.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Convert to an `image` RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(color_to_rgba(self.pixels[(y * self.width + x) as usize]))
        })
    }
}

impl PixelSink for ImageBuffer {
    fn init(&mut self, resolution: UVec2) -> RenderResult<()> {
        if resolution.x == 0 || resolution.y == 0 {
            return Err(RenderError::SinkInit(format!(
                "cannot create a {}x{} frame",
                resolution.x, resolution.y
            )));
        }
        self.width = resolution.x;
        self.height = resolution.y;
        self.pixels = vec![self.background; (resolution.x * resolution.y) as usize];
        Ok(())
    }

    fn set_background(&mut self, color: Color) {
        self.background = color;
        self.pixels.fill(color);
    }

    fn draw_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.set(x, y, color);
    }

    fn present(&mut self) -> RenderResult<()> {
        self.presented += 1;
        Ok(())
    }
}

/// Writes each presented frame to a PNG file.
#[derive(Debug, Clone)]
pub struct PngSink {
    path: PathBuf,
    numbered: bool,
    buffer: ImageBuffer,
}

impl PngSink {
    /// Overwrite `path` with every frame.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            numbered: false,
            buffer: ImageBuffer::default(),
        }
    }

    /// Write frame N to `<stem>_NNNN.<ext>` next to `path` instead.
    pub fn numbered(mut self) -> Self {
        self.numbered = true;
        self
    }

    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }

    /// File the next `present` will write.
    pub fn frame_path(&self) -> PathBuf {
        if !self.numbered {
            return self.path.clone();
        }
        numbered_path(&self.path, self.buffer.presented())
    }
}

fn numbered_path(path: &Path, frame: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    path.with_file_name(format!("{stem}_{frame:04}.{extension}"))
}

impl PixelSink for PngSink {
    fn init(&mut self, resolution: UVec2) -> RenderResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.buffer.init(resolution)
    }

    fn set_background(&mut self, color: Color) {
        self.buffer.set_background(color);
    }

    fn draw_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.buffer.draw_pixel(x, y, color);
    }

    fn present(&mut self) -> RenderResult<()> {
        let path = self.frame_path();
        self.buffer.to_image().save(&path)?;
        log::debug!("Wrote {}", path.display());
        self.buffer.present()
    }
}
