//! This module implements the CIELUV color specification, which was adopted concurrently with
//! CIELAB. CIELUV is very similar to CIELAB, but chromaticity is expressed relative to the UCS
//! (u′, v′) diagram, which is exactly how palette colors are specified: a fixed (u′, v′) and a
//! lightness that varies.

use crate::chromaticity::{ChromaticityPoint, ReferenceWhite};
use crate::color::{Color, XYZColor};
use crate::coord::Coord;
use crate::illuminants::Illuminant;

/// The CIE lightness threshold (6/29)^3 below which L* is linear in relative luminance.
pub const CIE_EPSILON: f64 = (6.0 / 29.0) * (6.0 / 29.0) * (6.0 / 29.0);

/// Computes CIE L* from relative luminance Y / Yn. Near black the curve is linear, which avoids
/// the infinite slope of the cube root at 0; everywhere else it is `116 * cbrt(Y / Yn) - 16`.
/// # Example
/// ```
/// # use lightness_palette::colors::cieluvcolor::cie_lightness;
/// assert_eq!(cie_lightness(0.0), 0.0);
/// assert!((cie_lightness(1.0) - 100.0).abs() <= 1e-10);
/// assert!((cie_lightness(0.18) - 49.496).abs() <= 1e-3);
/// ```
pub fn cie_lightness(y_ratio: f64) -> f64 {
    if y_ratio < CIE_EPSILON {
        (29.0f64 / 3.0).powf(3.0) * y_ratio
    } else {
        116.0 * y_ratio.powf(1.0 / 3.0) - 16.0
    }
}

/// A similar color system to CIELAB, adapted at the same time and with similar goals. It attempts to
/// be an easy-to-convert color space from XYZ that approaches perceptual uniformity. U and V
/// represent chromaticity and roughly equate to CIELAB's A and B, but they're scaled differently and
/// act slightly differently. This is CIELUV D50: conversions to and from other illuminants are
/// chromatically adapted.
/// # Example
///
/// ```
/// # use lightness_palette::prelude::*;
/// # use lightness_palette::colors::CIELUVColor;
/// # use lightness_palette::color::XYZColor;
/// let white: CIELUVColor = XYZColor::white_point(Illuminant::D50).convert();
/// assert!((white.l - 100.).abs() <= 1e-10);
/// assert!(white.u.abs() <= 1e-10);
/// assert!(white.v.abs() <= 1e-10);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CIELUVColor {
    /// The lightness component of LUV. Ranges from 0 to 100 by definition.
    pub l: f64,
    /// The component of LUV that roughly equates to how red the color is vs. how green it is.
    pub u: f64,
    /// The component of LUV that roughly equates to how yellow vs. blue the color is.
    pub v: f64,
}

impl CIELUVColor {
    /// Builds the Luv color with lightness `l` whose chromaticity sits at `point`, measured against
    /// the given reference white: `u* = 13 L* (u′ − u′n)` and `v* = 13 L* (v′ − v′n)`. The
    /// reference white only sets the origin of the (u*, v*) plane: the color is still CIELUV D50,
    /// so the reference white chromaticity always maps to a neutral gray.
    pub fn from_chromaticity(point: ChromaticityPoint, white: ReferenceWhite, l: f64) -> CIELUVColor {
        CIELUVColor {
            l,
            u: 13.0 * l * (point.u - white.u),
            v: 13.0 * l * (point.v - white.v),
        }
    }
}

impl Color for CIELUVColor {
    /// Given an XYZ color, gets a new CIELUV color. This is CIELUV D50, so anything else is
    /// chromatically adapted before conversion.
    fn from_xyz(xyz: XYZColor) -> CIELUVColor {
        // https://en.wikipedia.org/wiki/CIELUV
        let xyz_c = xyz.color_adapt(Illuminant::D50);
        let wp = XYZColor::white_point(Illuminant::D50);
        let denom = |color: XYZColor| color.x + 15.0 * color.y + 3.0 * color.z;
        let u_func = |color: XYZColor| 4.0 * color.x / denom(color);
        let v_func = |color: XYZColor| 9.0 * color.y / denom(color);

        let l = cie_lightness(xyz_c.y / wp.y);
        if denom(xyz_c) == 0.0 {
            // black has no chromaticity
            return CIELUVColor { l, u: 0.0, v: 0.0 };
        }

        let u = 13.0 * l * (u_func(xyz_c) - u_func(wp));
        let v = 13.0 * l * (v_func(xyz_c) - v_func(wp));
        CIELUVColor { l, u, v }
    }
    /// Returns a new `XYZColor` that matches the given color. Any illuminant other than D50 is
    /// chromatically adapted after the initial conversion. Zero or negative lightness is black.
    fn to_xyz(&self, illuminant: Illuminant) -> XYZColor {
        let wp = XYZColor::white_point(Illuminant::D50);
        if self.l <= 0.0 {
            return XYZColor {
                x: 0.0,
                y: 0.0,
                z: 0.0,
                illuminant: Illuminant::D50,
            }
            .color_adapt(illuminant);
        }
        let (u_prime_n, v_prime_n) = Illuminant::D50.uv_chromaticity();

        let u_prime = self.u / (13.0 * self.l) + u_prime_n;
        let v_prime = self.v / (13.0 * self.l) + v_prime_n;

        let delta: f64 = 6.0 / 29.0;

        let y = if self.l <= 8.0 {
            wp.y * self.l * (delta / 2.0).powf(3.0)
        } else {
            wp.y * ((self.l + 16.0) / 116.0).powf(3.0)
        };

        let x = y * 9.0 * u_prime / (4.0 * v_prime);
        let z = y * (12.0 - 3.0 * u_prime - 20.0 * v_prime) / (4.0 * v_prime);
        XYZColor {
            x,
            y,
            z,
            illuminant: Illuminant::D50,
        }
        .color_adapt(illuminant)
    }
}

impl From<Coord> for CIELUVColor {
    fn from(c: Coord) -> CIELUVColor {
        CIELUVColor {
            l: c.x,
            u: c.y,
            v: c.z,
        }
    }
}

impl From<CIELUVColor> for Coord {
    fn from(luv: CIELUVColor) -> Coord {
        Coord {
            x: luv.l,
            y: luv.u,
            z: luv.v,
        }
    }
}
