//! This file defines the [`Color`] trait, the CIE 1931 XYZ hub every conversion passes through, and
//! the sRGB color that palette entries are finally expressed in.
//!
//! [`Color`]: trait.Color.html

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use float_cmp::ApproxEq;
use regex::Regex;

use crate::bound::Bound;
use crate::consts;
use crate::consts::{BRADFORD_TRANSFORM, BRADFORD_TRANSFORM_INV};
use crate::consts::{STANDARD_RGB_TRANSFORM, STANDARD_RGB_TRANSFORM_INV};
use crate::coord::Coord;
use crate::illuminants::Illuminant;

/// A point in the CIE 1931 XYZ color space. Luminance is normalized so that the white point of the
/// given illuminant has Y = 1.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct XYZColor {
    /// The X axis of the CIE 1931 XYZ space, roughly representing the long-wavelength receptors in
    /// the human eye.
    pub x: f64,
    /// The Y axis of the CIE 1931 XYZ space, the relative luminance of the color.
    pub y: f64,
    /// The Z axis of the CIE 1931 XYZ space, roughly representing the short-wavelength receptors.
    pub z: f64,
    /// The illuminant that is assumed to be the lighting environment for this color.
    pub illuminant: Illuminant,
}

impl XYZColor {
    /// Returns the white point of the given illuminant, scaled so that Y = 1.
    pub fn white_point(illuminant: Illuminant) -> XYZColor {
        let wp = illuminant.white_point();
        XYZColor {
            x: wp[0] / wp[1],
            y: 1.0,
            z: wp[2] / wp[1],
            illuminant,
        }
    }

    /// Converts this color to one that appears the same under a different illuminant, using the
    /// Bradford chromatic adaptation transform. If the illuminants already match, this is a copy.
    pub fn color_adapt(&self, other_illuminant: Illuminant) -> XYZColor {
        if self.illuminant == other_illuminant {
            return *self;
        }
        // cone responses of both white points, then scale each cone by the ratio between them
        let src_wp = XYZColor::white_point(self.illuminant);
        let dst_wp = XYZColor::white_point(other_illuminant);
        let src = consts::mul3(&BRADFORD_TRANSFORM, src_wp.x, src_wp.y, src_wp.z);
        let dst = consts::mul3(&BRADFORD_TRANSFORM, dst_wp.x, dst_wp.y, dst_wp.z);
        let cone = consts::mul3(&BRADFORD_TRANSFORM, self.x, self.y, self.z);
        let xyz = consts::mul3(
            &BRADFORD_TRANSFORM_INV,
            cone[0] * dst[0] / src[0],
            cone[1] * dst[1] / src[1],
            cone[2] * dst[2] / src[2],
        );
        XYZColor {
            x: xyz[0],
            y: xyz[1],
            z: xyz[2],
            illuminant: other_illuminant,
        }
    }

    /// Returns `true` if both colors have the same illuminant and every component agrees within a
    /// small tolerance. Useful for testing conversions that should round-trip.
    pub fn approx_equal(&self, other: &XYZColor) -> bool {
        self.illuminant == other.illuminant
            && self.x.approx_eq(&other.x, 1e-8, 4)
            && self.y.approx_eq(&other.y, 1e-8, 4)
            && self.z.approx_eq(&other.z, 1e-8, 4)
    }
}

/// A trait that includes any color representation that can be converted to and from the CIE 1931
/// XYZ color space.
pub trait Color: Sized {
    /// Converts from a color in CIE 1931 XYZ to the given color type.
    fn from_xyz(xyz: XYZColor) -> Self;
    /// Converts from the given color type to a color in CIE 1931 XYZ space, under the given
    /// illuminant.
    fn to_xyz(&self, illuminant: Illuminant) -> XYZColor;
    /// Converts the given Color to a different Color type, passing through XYZ under D50.
    /// # Example
    /// ```
    /// # use lightness_palette::prelude::*;
    /// # use lightness_palette::colors::HSLColor;
    /// let red = RGBColor{r: 1., g: 0., b: 0.};
    /// let red_hsl: HSLColor = red.convert();
    /// assert!((red_hsl.l - 0.5).abs() <= 1e-6);
    /// ```
    fn convert<T: Color>(&self) -> T {
        T::from_xyz(self.to_xyz(Illuminant::D50))
    }
}

impl Color for XYZColor {
    fn from_xyz(xyz: XYZColor) -> XYZColor {
        xyz
    }
    fn to_xyz(&self, illuminant: Illuminant) -> XYZColor {
        self.color_adapt(illuminant)
    }
}

/// A color in the sRGB color space, with components stored as floating points between 0 and 1. sRGB
/// is what every screen the palette ends up on speaks, so this is the output type of the resolver.
/// Colors produced by the resolver are quantized: every component is exactly `k / 255`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RGBColor {
    /// The red component, between 0 and 1.
    pub r: f64,
    /// The green component, between 0 and 1.
    pub g: f64,
    /// The blue component, between 0 and 1.
    pub b: f64,
}

/// Undoes sRGB companding, mapping an encoded component to linear light.
fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Applies sRGB companding to a linear-light component.
fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

impl Color for RGBColor {
    /// sRGB is D65, so anything else is chromatically adapted first. No clamping is done here:
    /// out-of-gamut colors have components outside [0, 1], use [`Bound`] to bring them back.
    ///
    /// [`Bound`]: ../bound/trait.Bound.html
    fn from_xyz(xyz: XYZColor) -> RGBColor {
        let xyz_c = xyz.color_adapt(Illuminant::D65);
        let rgb = consts::mul3(&STANDARD_RGB_TRANSFORM, xyz_c.x, xyz_c.y, xyz_c.z);
        RGBColor {
            r: linear_to_srgb(rgb[0]),
            g: linear_to_srgb(rgb[1]),
            b: linear_to_srgb(rgb[2]),
        }
    }
    fn to_xyz(&self, illuminant: Illuminant) -> XYZColor {
        let xyz = consts::mul3(
            &STANDARD_RGB_TRANSFORM_INV,
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        );
        XYZColor {
            x: xyz[0],
            y: xyz[1],
            z: xyz[2],
            illuminant: Illuminant::D65,
        }
        .color_adapt(illuminant)
    }
}

lazy_static! {
    static ref HEX_CODE: Regex = Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
}

impl RGBColor {
    /// Gets the components as integers from 0 to 255, rounding to the nearest value.
    pub fn int_rgb_tup(&self) -> (u8, u8, u8) {
        let rounded = (RGBColor::clamp_coord((*self).into()) * 255u8).round();
        (rounded.x as u8, rounded.y as u8, rounded.z as u8)
    }

    /// Rounds every component to the nearest multiple of 1/255, i.e., to what a 24-bit display
    /// can actually show. Components are clamped to [0, 1] first.
    /// # Example
    /// ```
    /// # use lightness_palette::prelude::*;
    /// let rgb = RGBColor{r: 0.5, g: 1.2, b: -0.1}.quantized();
    /// assert_eq!(rgb.int_rgb_tup(), (128, 255, 0));
    /// assert_eq!(rgb.r, 128. / 255.);
    /// ```
    pub fn quantized(&self) -> RGBColor {
        let clamped = RGBColor::clamp_coord((*self).into());
        RGBColor::from((clamped * 255u8).round() / 255u8)
    }

    /// Parses a hex code like `#A3C` or `#FF8800`, case-insensitive. The shorthand form repeats each
    /// digit, so `#A3C` is `#AA33CC`.
    /// # Errors
    /// Returns `RGBParseError::InvalidHexSyntax` if the string is not a `#` followed by 3 or 6 hex
    /// digits.
    /// # Example
    /// ```
    /// # use lightness_palette::prelude::*;
    /// let orange = RGBColor::from_hex_code("#d65f29").unwrap();
    /// assert_eq!(orange.int_rgb_tup(), (0xd6, 0x5f, 0x29));
    /// assert!(RGBColor::from_hex_code("d65f29").is_err());
    /// ```
    pub fn from_hex_code(hex: &str) -> Result<RGBColor, RGBParseError> {
        let digits = match HEX_CODE.captures(hex).and_then(|caps| caps.get(1)) {
            Some(digits) => digits.as_str(),
            None => return Err(RGBParseError::InvalidHexSyntax),
        };
        let expanded: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| vec![c, c]).collect()
        } else {
            digits.to_string()
        };
        let full = u32::from_str_radix(&expanded, 16).map_err(|_| RGBParseError::InvalidHexSyntax)?;
        Ok(RGBColor::from((
            (full >> 16) as u8,
            ((full >> 8) & 0xff) as u8,
            (full & 0xff) as u8,
        )))
    }

    /// Blends the color towards its own gray intensity. `k` runs from 0 (unchanged) to 255 (fully
    /// gray); anything larger counts as 255. This works on the 8-bit representation with integer
    /// arithmetic, so the result is always quantized. The intensity weights green most and blue
    /// least, as `(2r + 3g + b) / 6`.
    /// # Example
    /// ```
    /// # use lightness_palette::prelude::*;
    /// let orange = RGBColor::from((0xd6, 0x5f, 0x29));
    /// assert_eq!(orange.desaturate(0).int_rgb_tup(), (0xd6, 0x5f, 0x29));
    /// assert_eq!(orange.desaturate(255).int_rgb_tup(), (125, 125, 125));
    /// ```
    pub fn desaturate(&self, k: u32) -> RGBColor {
        let k = k.min(255);
        let (r, g, b) = self.int_rgb_tup();
        let (r, g, b) = (u32::from(r), u32::from(g), u32::from(b));
        let intensity = (2 * r + b + 3 * g) / 6;
        let blend = |c: u32| ((c * (255 - k) + intensity * k) / 255) as u8;
        RGBColor::from((blend(r), blend(g), blend(b)))
    }
}

impl From<(u8, u8, u8)> for RGBColor {
    fn from(rgb: (u8, u8, u8)) -> RGBColor {
        let (r, g, b) = rgb;
        RGBColor {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }
}

impl From<Coord> for RGBColor {
    fn from(c: Coord) -> RGBColor {
        RGBColor {
            r: c.x,
            g: c.y,
            b: c.z,
        }
    }
}

impl From<RGBColor> for Coord {
    fn from(rgb: RGBColor) -> Coord {
        Coord {
            x: rgb.r,
            y: rgb.g,
            z: rgb.b,
        }
    }
}

impl fmt::Display for RGBColor {
    /// Formats as an uppercase hex code, like `#8B29BD`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (r, g, b) = self.int_rgb_tup();
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

impl FromStr for RGBColor {
    type Err = RGBParseError;
    fn from_str(s: &str) -> Result<RGBColor, RGBParseError> {
        RGBColor::from_hex_code(s.trim())
    }
}

/// An error that can occur when parsing a string as an `RGBColor`.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum RGBParseError {
    /// The string is not a `#` followed by 3 or 6 hexadecimal digits.
    InvalidHexSyntax,
}

impl fmt::Display for RGBParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RGBParseError::InvalidHexSyntax => write!(f, "invalid hex code syntax"),
        }
    }
}

impl Error for RGBParseError {}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_white_points_map_to_white() {
        let white = XYZColor::white_point(Illuminant::D50).color_adapt(Illuminant::D65);
        assert!(white.approx_equal(&XYZColor::white_point(Illuminant::D65)));
        let rgb = RGBColor::from_xyz(XYZColor::white_point(Illuminant::D65));
        assert_eq!(rgb.to_string(), "#FFFFFF");
        let rgb = RGBColor::from_xyz(XYZColor::white_point(Illuminant::D50));
        assert_eq!(rgb.to_string(), "#FFFFFF");
    }

    #[test]
    fn test_rgb_xyz_round_trip() {
        let rgb = RGBColor {
            r: 0.7,
            g: 0.3,
            b: 0.55,
        };
        let xyz = rgb.to_xyz(Illuminant::D50);
        let back = RGBColor::from_xyz(xyz);
        assert!((rgb.r - back.r).abs() <= 1e-8);
        assert!((rgb.g - back.g).abs() <= 1e-8);
        assert!((rgb.b - back.b).abs() <= 1e-8);
    }

    #[test]
    fn test_color_adapt_round_trip() {
        let xyz = XYZColor {
            x: 0.3,
            y: 0.53,
            z: 0.65,
            illuminant: Illuminant::D65,
        };
        let there = xyz.color_adapt(Illuminant::D50);
        assert_eq!(there.illuminant, Illuminant::D50);
        assert!(!there.approx_equal(&xyz));
        assert!(there.color_adapt(Illuminant::D65).approx_equal(&xyz));
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(
            RGBColor::from_hex_code("#8B29BD").unwrap().to_string(),
            "#8B29BD"
        );
        assert_eq!(
            RGBColor::from_hex_code("#a3c").unwrap().int_rgb_tup(),
            (0xaa, 0x33, 0xcc)
        );
        assert_eq!("  #000000 ".parse::<RGBColor>().unwrap().int_rgb_tup(), (0, 0, 0));
        for bad in &["", "#", "#12345", "#1234567", "#GGHHII", "8B29BD", "#8B29BD "] {
            assert_eq!(
                RGBColor::from_hex_code(bad),
                Err(RGBParseError::InvalidHexSyntax)
            );
        }
    }

    #[test]
    fn test_int_rgb_tup_clamps_out_of_gamut() {
        let rgb = RGBColor {
            r: 1.3,
            g: -0.2,
            b: 0.5,
        };
        assert_eq!(rgb.int_rgb_tup(), (255, 0, 128));
        assert_eq!(rgb.to_string(), "#FF0080");
    }

    #[test]
    fn test_desaturate() {
        let orange = RGBColor::from((0xd6, 0x5f, 0x29));
        // intensity is (2 * 214 + 41 + 3 * 95) / 6 = 125
        assert_eq!(orange.desaturate(1000).int_rgb_tup(), (125, 125, 125));
        // halfway: (214 * 128 + 125 * 127) / 255 = 169, (95 * 128 + 125 * 127) / 255 = 109,
        // (41 * 128 + 125 * 127) / 255 = 82
        assert_eq!(orange.desaturate(127).int_rgb_tup(), (169, 109, 82));
        let gray = RGBColor::from((77, 77, 77));
        assert_eq!(gray.desaturate(200), gray);
    }
}
