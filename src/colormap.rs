//! This module defines a generalized trait for a colormap, a mapping of numbers to colors in a
//! continuous way, and the piecewise-linear ramp that consumes tables like the snail gradient.

use std::error::Error;
use std::fmt;

use crate::color::RGBColor;
use crate::coord::Coord;

/// A trait that models a colormap, a continuous mapping of numbers to colors.
pub trait ColorMap {
    /// Maps a given number to a color. This should never fail or panic except for NaN and similar:
    /// out-of-range inputs map to the color at the nearest end.
    fn transform_single(&self, x: f64) -> RGBColor;
    /// Maps a given collection of numbers to colors. Does not evaluate lazily.
    fn transform<U: IntoIterator<Item = f64>>(&self, inputs: U) -> Vec<RGBColor> {
        inputs.into_iter().map(|x| self.transform_single(x)).collect()
    }
}

/// One stop of a [`ColorRamp`]: the color at an integer position.
///
/// [`ColorRamp`]: struct.ColorRamp.html
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RampEntry {
    /// Where on the ramp this color sits.
    pub position: i32,
    /// The color at that position.
    pub color: RGBColor,
}

impl RampEntry {
    /// Makes a new entry.
    pub fn new(position: i32, color: RGBColor) -> RampEntry {
        RampEntry { position, color }
    }
}

/// A colormap given by a table of stops at increasing positions. Between two stops the color is
/// interpolated linearly in sRGB and rounded to 8 bits; before the first stop and after the last
/// one, the color of that stop is used.
/// # Example
/// ```
/// # use lightness_palette::prelude::*;
/// # use lightness_palette::colormap::{ColorMap, ColorRamp, RampEntry};
/// let ramp = ColorRamp::new(vec![
///     RampEntry::new(0, RGBColor::from((0, 0, 0))),
///     RampEntry::new(100, RGBColor::from((200, 100, 40))),
/// ]).unwrap();
/// assert_eq!(ramp.transform_single(25.).int_rgb_tup(), (50, 25, 10));
/// assert_eq!(ramp.transform_single(500.).int_rgb_tup(), (200, 100, 40));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorRamp {
    entries: Vec<RampEntry>,
}

impl ColorRamp {
    /// Builds a ramp from its stops.
    /// # Errors
    /// Returns `RampError::Empty` for no stops and `RampError::NonIncreasingPositions` unless
    /// every position is larger than the one before it.
    pub fn new(entries: Vec<RampEntry>) -> Result<ColorRamp, RampError> {
        if entries.is_empty() {
            return Err(RampError::Empty);
        }
        if entries.windows(2).any(|w| w[0].position >= w[1].position) {
            return Err(RampError::NonIncreasingPositions);
        }
        Ok(ColorRamp { entries })
    }

    /// The stops, in order.
    pub fn entries(&self) -> &[RampEntry] {
        &self.entries
    }
}

impl ColorMap for ColorRamp {
    fn transform_single(&self, x: f64) -> RGBColor {
        let first = self.entries[0];
        let last = self.entries[self.entries.len() - 1];
        // NaN lands here too
        if !(x > f64::from(first.position)) {
            return first.color;
        }
        if x >= f64::from(last.position) {
            return last.color;
        }
        // the first stop past x, and the one before it, bound x
        let upper = self
            .entries
            .iter()
            .position(|e| f64::from(e.position) >= x)
            .unwrap_or(self.entries.len() - 1);
        let (lo, hi) = (self.entries[upper - 1], self.entries[upper]);
        let (lo_pos, hi_pos) = (f64::from(lo.position), f64::from(hi.position));
        let weight = (hi_pos - x) / (hi_pos - lo_pos);
        let lo_coord: Coord = lo.color.into();
        let hi_coord: Coord = hi.color.into();
        RGBColor::from(lo_coord.weighted_midpoint(&hi_coord, weight)).quantized()
    }
}

/// An error in the stops given to a [`ColorRamp`].
///
/// [`ColorRamp`]: struct.ColorRamp.html
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RampError {
    /// There were no stops at all.
    Empty,
    /// Two stops were out of order or at the same position.
    NonIncreasingPositions,
}

impl fmt::Display for RampError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RampError::Empty => write!(f, "a color ramp needs at least one entry"),
            RampError::NonIncreasingPositions => {
                write!(f, "color ramp positions must be strictly increasing")
            }
        }
    }
}

impl Error for RampError {}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    fn ramp() -> ColorRamp {
        ColorRamp::new(vec![
            RampEntry::new(0, RGBColor::from((0xd6, 0x5f, 0x29))),
            RampEntry::new(100, RGBColor::from((0x4d, 0x4d, 0x4d))),
            RampEntry::new(110, RGBColor::from((0x40, 0x80, 0x00))),
        ])
        .unwrap()
    }

    #[test]
    fn test_stops_are_exact() {
        let ramp = ramp();
        for entry in ramp.entries() {
            assert_eq!(
                ramp.transform_single(f64::from(entry.position)),
                entry.color
            );
        }
    }

    #[test]
    fn test_clamps_outside() {
        let ramp = ramp();
        assert_eq!(ramp.transform_single(-40.).to_string(), "#D65F29");
        assert_eq!(ramp.transform_single(1e6).to_string(), "#408000");
    }

    #[test]
    fn test_interpolates() {
        let ramp = ramp();
        // 0.6 * 0x4d + 0.4 * 0x40 = 71.8
        assert_eq!(ramp.transform_single(104.).int_rgb_tup(), (72, 97, 46));
        // 0xd6 + (0x4d - 0xd6) / 4 = 179.75
        assert_eq!(ramp.transform_single(25.).int_rgb_tup().0, 180);
        let colors = ramp.transform(vec![0., 40., 100.]);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[1].int_rgb_tup(), (159, 88, 55));
    }

    #[test]
    fn test_extreme_positions() {
        let ramp = ColorRamp::new(vec![
            RampEntry::new(std::i32::MIN, RGBColor::from((0, 0, 0))),
            RampEntry::new(std::i32::MAX, RGBColor::from((200, 100, 40))),
        ])
        .unwrap();
        // just past the middle of the full i32 range
        assert_eq!(ramp.transform_single(0.).int_rgb_tup(), (100, 50, 20));
        assert_eq!(
            ramp.transform_single(f64::from(std::i32::MAX)).int_rgb_tup(),
            (200, 100, 40)
        );
    }

    #[test]
    fn test_single_entry() {
        let gray = RGBColor::from((77, 77, 77));
        let ramp = ColorRamp::new(vec![RampEntry::new(5, gray)]).unwrap();
        assert_eq!(ramp.transform_single(-3.), gray);
        assert_eq!(ramp.transform_single(30.), gray);
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert_eq!(ColorRamp::new(vec![]), Err(RampError::Empty));
        let c = RGBColor::from((1, 2, 3));
        assert_eq!(
            ColorRamp::new(vec![RampEntry::new(10, c), RampEntry::new(10, c)]),
            Err(RampError::NonIncreasingPositions)
        );
        assert_eq!(
            ColorRamp::new(vec![RampEntry::new(10, c), RampEntry::new(0, c)]),
            Err(RampError::NonIncreasingPositions)
        );
    }
}
