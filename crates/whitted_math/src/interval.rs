/// A closed scalar range `[min, max]` used for range mapping.
///
/// The bounds do not have to be ordered: a reversed interval maps values
/// back to front, which is how pixel rows are flipped into view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// The unit interval `[0, 1]`.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Normalised device range `[-1, 1]`.
    pub const NDC: Interval = Interval {
        min: -1.0,
        max: 1.0,
    };

    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Position of `x` relative to the bounds: 0 at `min`, 1 at `max`.
    ///
    /// No bounds checks; values outside the interval land outside `[0, 1]`.
    /// A zero-sized interval yields 0 rather than a division by zero.
    pub fn normalise(&self, x: f32) -> f32 {
        let size = self.size();
        if size == 0.0 {
            return 0.0;
        }
        (x - self.min) / size
    }

    /// Linear interpolation from `min` (t = 0) to `max` (t = 1).
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + t * self.size()
    }

    /// Maps `x` from this interval onto `target`.
    pub fn map(&self, x: f32, target: &Interval) -> f32 {
        target.lerp(self.normalise(x))
    }
}
