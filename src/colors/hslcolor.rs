//! This file implements what I refer to as HSL but which would precisely be called sHSL: a simple
//! transformation of sRGB that creates a cylindrical space. HSL has the same problems with
//! perceptual uniformity as sRGB does, but its lightness is exactly what a palette consumer sees
//! when it asks for "a 45% orange", so the resolver uses it as its stopping criterion. *Lightness*
//! in HSL runs from black to fully saturated in the middle to white at the end. This
//! implementation is hexagonal: first values are put on a hexagon, and then that hexagon is
//! "squeezed" into a circle. Converting gray into HSL will give a hue of 0 degrees, although any hue
//! could be used in its place.

use crate::bound::Bound;
use crate::color::{Color, RGBColor, XYZColor};
use crate::coord::Coord;
use crate::illuminants::Illuminant;

/// A color in the HSL color space, a direct transformation of the sRGB space. Conversion from XYZ
/// goes through a clamped, 8-bit sRGB color, so the lightness is always a multiple of 1/510.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct HSLColor {
    /// The hue component. Ranges from 0 to 360, as the angle in a cylindrical space.
    pub h: f64,
    /// The saturation component. Ranges between 0 and 1. Note that this is much less accurate to
    /// human perception than the chroma or saturation found in other, higher-fidelity color spaces.
    pub s: f64,
    /// The lightness component. Ranges from 0 to 1. Defined in HSL as the average of the largest and
    /// smallest color components in RGB, which sacrifices accuracy for convenience.
    pub l: f64,
}

impl HSLColor {
    /// Computes HSL directly from an sRGB color, without clamping or rounding it first.
    /// # Example
    /// ```
    /// # use lightness_palette::prelude::*;
    /// # use lightness_palette::colors::HSLColor;
    /// let hsl = HSLColor::from_rgb(RGBColor::from((0x8b, 0x29, 0xbd)));
    /// assert!((hsl.h - 280.0).abs() <= 1.0);
    /// assert!((hsl.l - (0xbd as f64 + 0x29 as f64) / 510.).abs() <= 1e-3);
    /// ```
    pub fn from_rgb(rgb: RGBColor) -> HSLColor {
        // if you tilt the RGB cube and project it into a hexagon, the equivalent of radius is simply
        // the largest component minus the smallest component
        // More info: https://en.wikipedia.org/wiki/HSL_and_HSV#Formal_derivation
        let components = [rgb.r, rgb.g, rgb.b];
        let max_c = components.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min_c = components.iter().cloned().fold(f64::INFINITY, f64::min);
        let chroma = max_c - min_c;

        let hue = if chroma == 0.0 {
            // undefined according to Wikipedia, just 0 for gray
            0.0
        } else if max_c == rgb.r {
            // in red sector: adding green moves up on the hexagon, adding blue moves down
            // the modulo makes sure it's in the range 0-360
            (((rgb.g - rgb.b) / chroma + 6.0) % 6.0) * 60.0
        } else if max_c == rgb.g {
            ((rgb.b - rgb.r) / chroma) * 60.0 + 120.0
        } else {
            ((rgb.r - rgb.g) / chroma) * 60.0 + 240.0
        };

        // lightness is the average of the largest and smallest components: a double hex cone
        let lightness = (max_c + min_c) / 2.0;
        let saturation = if lightness == 1.0 || lightness == 0.0 {
            // this would be a divide by 0 otherwise, just set it to 0 because it doesn't matter
            0.0
        } else {
            chroma / (1.0 - (2.0 * lightness - 1.0).abs())
        };

        HSLColor {
            h: hue,
            s: saturation,
            l: lightness,
        }
    }

    /// Goes back to sRGB by retracing the hexagon.
    pub fn to_rgb(&self) -> RGBColor {
        let chroma = (1.0 - (2.0 * self.l - 1.0).abs()) * self.s;
        // intermediate value is the second-largest RGB value, where C is the largest because the
        // smallest is 0: call this x
        let x = chroma * (1.0 - ((self.h / 60.0) % 2.0 - 1.0).abs());
        let (r1, g1, b1) = if self.h <= 60.0 {
            (chroma, x, 0.0)
        } else if self.h <= 120.0 {
            (x, chroma, 0.0)
        } else if self.h <= 180.0 {
            (0.0, chroma, x)
        } else if self.h <= 240.0 {
            (0.0, x, chroma)
        } else if self.h <= 300.0 {
            (x, 0.0, chroma)
        } else {
            (chroma, 0.0, x)
        };
        // add the same value to each component to get the correct lightness
        let offset = self.l - chroma / 2.0;
        RGBColor {
            r: r1 + offset,
            g: g1 + offset,
            b: b1 + offset,
        }
    }
}

impl Color for HSLColor {
    /// Converts from XYZ to HSL through sRGB: the RGB color is clamped to the gamut and rounded to
    /// 8 bits first, so HSL describes what a display would show.
    fn from_xyz(xyz: XYZColor) -> HSLColor {
        HSLColor::from_rgb(RGBColor::from_xyz(xyz).quantized())
    }
    // Converts back to XYZ through RGB.
    fn to_xyz(&self, illuminant: Illuminant) -> XYZColor {
        self.to_rgb().to_xyz(illuminant)
    }
}

impl From<Coord> for HSLColor {
    fn from(c: Coord) -> HSLColor {
        HSLColor {
            h: c.x,
            s: c.y,
            l: c.z,
        }
    }
}

impl From<HSLColor> for Coord {
    fn from(hsl: HSLColor) -> Coord {
        Coord {
            x: hsl.h,
            y: hsl.s,
            z: hsl.l,
        }
    }
}

impl Bound for HSLColor {
    fn bounds() -> [(f64, f64); 3] {
        [(0., 360.), (0., 1.), (0., 1.)]
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_hsl_rgb_conversion() {
        let red_rgb = RGBColor {
            r: 1.,
            g: 0.,
            b: 0.,
        };
        let red_hsl: HSLColor = red_rgb.convert();
        assert!(red_hsl.h.abs() <= 0.0001);
        assert!((red_hsl.s - 1.0).abs() <= 0.0001);
        assert!((red_hsl.l - 0.5).abs() <= 0.0001);
        let lavender_hsl = HSLColor {
            h: 245.0,
            s: 0.5,
            l: 0.55,
        };
        let lavender_rgb: RGBColor = lavender_hsl.convert();
        assert_eq!(lavender_rgb.to_string(), "#5C53C6");
    }

    #[test]
    fn test_lightness_is_quantized() {
        let xyz = RGBColor {
            r: 0.32,
            g: 0.6,
            b: 0.11,
        }
        .to_xyz(Illuminant::D50);
        let hsl = HSLColor::from_xyz(xyz);
        // 0.6 * 255 = 153, 0.11 * 255 = 28.05 -> 28
        assert!((hsl.l - (153.0 + 28.0) / 510.0).abs() <= 1e-12);
    }

    #[test]
    fn test_gray_has_no_hue() {
        let gray = HSLColor::from_rgb(RGBColor::from((77, 77, 77)));
        assert_eq!((gray.h, gray.s), (0.0, 0.0));
        assert!((gray.l - 77.0 / 255.0).abs() <= 1e-12);
    }

    #[test]
    fn test_hue_wraps_in_red_sector() {
        // more blue than green in the red sector gives a hue just under 360
        let hsl = HSLColor::from_rgb(RGBColor {
            r: 1.0,
            g: 0.0,
            b: 0.2,
        });
        assert!((hsl.h - 348.0).abs() <= 1e-9);
        let clamped = HSLColor::clamp_coord(Coord {
            x: 400.,
            y: -0.1,
            z: 0.5,
        });
        assert_eq!(clamped, Coord { x: 360., y: 0., z: 0.5 });
    }
}
