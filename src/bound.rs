//! This module describes the Bound trait, which allows for a description of what colors a color
//! gamut supports. For example, the sRGB gamut only supports RGB values ranging from 0-1 that are
//! scaled to 0-255, which is well under half of the visible range of human vision. Palette colors
//! that land outside of it are clamped per channel, which is why saturated hues flatten out at the
//! light end of a lightness ramp.

use crate::color::{Color, RGBColor};
use crate::coord::Coord;

/// Describes a color space in which the total space of representable colors has explicit bounds
/// besides those imposed by human vision. For example, an sRGB color can't have negative values for
/// any of its components, whereas CIELUV can feasibly describe even those colors that cannot be
/// viewed by humans. This only applies to colors that can be embedded in 3D space.
/// # Example
/// Bound a clearly-problematic color within sRGB.
///
/// ```
/// # use lightness_palette::prelude::*;
/// # use lightness_palette::colors::CIELUVColor;
/// let out_of_bounds = CIELUVColor{l: 40., u: 150., v: -150.};
/// let in_bounds: RGBColor = RGBColor::clamp(out_of_bounds).convert();
/// let still_in_bounds: RGBColor = RGBColor::clamp(in_bounds).convert();
/// assert_eq!(in_bounds.to_string(), still_in_bounds.to_string());
/// ```
pub trait Bound: Color + Into<Coord> + From<Coord> + Copy {
    /// Returns an array [(min1, max1), (min2, max2), (min3, max3)] that represents the bounds on each
    /// component of the color space, in the order that they appear in the Coord representation. If
    /// some parts of the bounds don't exist, using infinity or negative infinity works.
    fn bounds() -> [(f64, f64); 3];
    /// Given a Coord, returns a Coord such that each component has been clamped to the correct
    /// bounds. See trait documentation for example usage.
    fn clamp_coord(point: Coord) -> Coord {
        let ranges = Self::bounds();
        let mut point_vals = [0.; 3];
        for i in 0..3 {
            let component = [point.x, point.y, point.z][i];
            let (min, max) = ranges[i];
            point_vals[i] = if component < min {
                min
            } else if component > max {
                max
            } else {
                component
            };
        }
        Coord {
            x: point_vals[0],
            y: point_vals[1],
            z: point_vals[2],
        }
    }
    /// Given any Color, returns a new version of that color that is in the bounds of this color
    /// space, even if the coordinate systems of the two spaces differ. If the color is already in
    /// the gamut, it simply returns a copy. See trait documentation for example usage.
    fn clamp<T: Color>(color: T) -> T {
        let converted_color: Self = color.convert();
        let point: Coord = converted_color.into();
        Self::from(Self::clamp_coord(point)).convert()
    }
}

impl Bound for RGBColor {
    fn bounds() -> [(f64, f64); 3] {
        [(0., 1.), (0., 1.), (0., 1.)]
    }
}

#[cfg(test)]
mod tests {
    use super::Bound;
    use crate::color::RGBColor;
    use crate::coord::Coord;

    #[test]
    fn test_zero_one_bounds() {
        let clamped = RGBColor::clamp_coord(Coord {
            x: 0.1,
            y: -0.2,
            z: 1.2,
        });
        assert_eq!(
            clamped,
            Coord {
                x: 0.1,
                y: 0.,
                z: 1.
            }
        );
    }

    #[test]
    fn test_in_gamut_is_untouched() {
        let rgb = RGBColor {
            r: 0.25,
            g: 0.5,
            b: 0.75,
        };
        let clamped = RGBColor::clamp(rgb);
        assert!((clamped.r - rgb.r).abs() <= 1e-8);
        assert!((clamped.g - rgb.g).abs() <= 1e-8);
        assert!((clamped.b - rgb.b).abs() <= 1e-8);
    }
}
