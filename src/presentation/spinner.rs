//! Rotating icon animation.

/// Terminal frames for the rotating icon, one per quarter turn.
const FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Continuously rotating decoration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spinner {
    degrees: f32,
    degrees_per_second: f32,
}

impl Spinner {
    /// Creates a spinner at 0° rotating at `degrees_per_second`.
    pub fn new(degrees_per_second: f32) -> Self {
        Self {
            degrees: 0.0,
            degrees_per_second,
        }
    }

    /// Rotates by the time elapsed this frame; the angle stays in `[0, 360)`.
    pub fn advance(&mut self, delta_seconds: f64) -> f32 {
        let delta = if delta_seconds.is_finite() {
            delta_seconds.max(0.0) as f32
        } else {
            0.0
        };
        self.degrees = (self.degrees + self.degrees_per_second * delta).rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        if self.degrees >= 360.0 {
            self.degrees = 0.0;
        }
        self.degrees
    }

    /// Current angle in degrees.
    pub fn degrees(&self) -> f32 {
        self.degrees
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(90.0)
    }
}

/// Maps an angle to one of the four terminal frames.
pub fn glyph_for(degrees: f32) -> char {
    let quarter = (degrees.rem_euclid(360.0) / 90.0) as usize;
    FRAMES[quarter % FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates() {
        let mut spinner = Spinner::new(90.0);
        assert_eq!(spinner.advance(0.5), 45.0);
        assert_eq!(spinner.advance(0.5), 90.0);
    }

    #[test]
    fn test_advance_wraps() {
        let mut spinner = Spinner::new(90.0);
        spinner.advance(5.0);
        assert_eq!(spinner.degrees(), 90.0);
    }

    #[test]
    fn test_counter_clockwise_stays_in_range() {
        let mut spinner = Spinner::new(-90.0);
        let degrees = spinner.advance(1.0);
        assert_eq!(degrees, 270.0);
    }

    #[test]
    fn test_invalid_delta_ignored() {
        let mut spinner = Spinner::new(90.0);
        spinner.advance(f64::NAN);
        spinner.advance(-1.0);
        assert_eq!(spinner.degrees(), 0.0);
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(glyph_for(0.0), '|');
        assert_eq!(glyph_for(95.0), '/');
        assert_eq!(glyph_for(180.0), '-');
        assert_eq!(glyph_for(359.0), '\\');
        assert_eq!(glyph_for(-10.0), '\\');
    }
}
