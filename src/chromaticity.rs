//! Chromaticity in the CIE 1976 UCS diagram: the (u′, v′) pairs palette colors are specified by,
//! and the reference white they are measured against.

use geo::prelude::*;
use geo::{LineString, Point, Polygon};

/// A point (u′, v′) of the CIE 1976 UCS diagram. It fixes hue and saturation but says nothing
/// about lightness: the resolver supplies that.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChromaticityPoint {
    /// The u′ coordinate, between 0 and 1.
    pub u: f64,
    /// The v′ coordinate, between 0 and 1.
    pub v: f64,
}

/// The (u′, v′) chromaticities of the sRGB red, green, and blue primaries, in that order.
pub static SRGB_PRIMARIES: [(f64, f64); 3] = [
    (0.4507042253521127, 0.522887323943662),
    (0.125, 0.5625),
    (0.17543859649122806, 0.15789473684210528),
];

impl ChromaticityPoint {
    /// Makes a new point. No validation happens here: see [`is_valid`].
    ///
    /// [`is_valid`]: #method.is_valid
    pub const fn new(u: f64, v: f64) -> ChromaticityPoint {
        ChromaticityPoint { u, v }
    }

    /// Returns `true` if both coordinates are finite and between 0 and 1.
    pub fn is_valid(&self) -> bool {
        let in_range = |x: f64| x.is_finite() && x >= 0.0 && x <= 1.0;
        in_range(self.u) && in_range(self.v)
    }

    /// Returns `true` if the chromaticity lies strictly inside the triangle spanned by the sRGB
    /// primaries. Points outside it can still be resolved, but some channel will clip at every
    /// lightness, so the hue drifts.
    /// # Example
    /// ```
    /// # use lightness_palette::chromaticity::{ChromaticityPoint, ReferenceWhite};
    /// assert!(ReferenceWhite::PALETTE.chromaticity().in_srgb_gamut());
    /// assert!(!ChromaticityPoint::new(0.6, 0.1).in_srgb_gamut());
    /// ```
    pub fn in_srgb_gamut(&self) -> bool {
        let mut vertices = SRGB_PRIMARIES.to_vec();
        vertices.push(SRGB_PRIMARIES[0]);
        let exterior: LineString<f64> = vertices.into();
        let triangle = Polygon::new(exterior, vec![]);
        triangle.contains(&Point::new(self.u, self.v))
    }
}

/// The white everything is measured against: relative luminance is `Y / yn`, and (u*, v*) are
/// offsets from (`u`, `v`).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceWhite {
    /// The luminance of white, Yn.
    pub yn: f64,
    /// The u′ chromaticity of white.
    pub u: f64,
    /// The v′ chromaticity of white.
    pub v: f64,
}

impl ReferenceWhite {
    /// The white the palette chromaticities are tabulated against: Yn = 100 and (u′n, v′n) =
    /// (0.1978, 0.4684), which is D65 to four places.
    pub const PALETTE: ReferenceWhite = ReferenceWhite {
        yn: 100.0,
        u: 0.1978,
        v: 0.4684,
    };

    /// The chromaticity of this white, as a point.
    pub fn chromaticity(&self) -> ChromaticityPoint {
        ChromaticityPoint::new(self.u, self.v)
    }

    /// Returns `true` if the luminance is positive and finite and the chromaticity is valid.
    pub fn is_valid(&self) -> bool {
        self.yn.is_finite() && self.yn > 0.0 && self.chromaticity().is_valid()
    }
}

impl Default for ReferenceWhite {
    fn default() -> ReferenceWhite {
        ReferenceWhite::PALETTE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::illuminants::Illuminant;

    #[test]
    fn test_validity() {
        assert!(ChromaticityPoint::new(0.0, 1.0).is_valid());
        assert!(ChromaticityPoint::new(0.2595, 0.3079).is_valid());
        assert!(!ChromaticityPoint::new(-0.01, 0.5).is_valid());
        assert!(!ChromaticityPoint::new(0.5, 1.5).is_valid());
        assert!(!ChromaticityPoint::new(std::f64::NAN, 0.5).is_valid());
        assert!(!ChromaticityPoint::new(0.5, std::f64::INFINITY).is_valid());
    }

    #[test]
    fn test_reference_white_validity() {
        assert!(ReferenceWhite::PALETTE.is_valid());
        let dark = ReferenceWhite {
            yn: 0.0,
            ..ReferenceWhite::PALETTE
        };
        assert!(!dark.is_valid());
        let unknown = ReferenceWhite {
            yn: std::f64::NAN,
            ..ReferenceWhite::PALETTE
        };
        assert!(!unknown.is_valid());
        let off_diagram = ReferenceWhite {
            u: 1.2,
            ..ReferenceWhite::PALETTE
        };
        assert!(!off_diagram.is_valid());
    }

    #[test]
    fn test_primaries_match_srgb() {
        // CIE xy of the sRGB primaries, converted to u'v'
        let xy = [(0.64, 0.33), (0.30, 0.60), (0.15, 0.06)];
        for (&(x, y), &(u, v)) in xy.iter().zip(SRGB_PRIMARIES.iter()) {
            let denom = -2.0 * x + 12.0 * y + 3.0;
            assert!((4.0 * x / denom - u).abs() <= 1e-12);
            assert!((9.0 * y / denom - v).abs() <= 1e-12);
        }
    }

    #[test]
    fn test_gamut_membership() {
        let (u, v) = Illuminant::D50.uv_chromaticity();
        assert!(ChromaticityPoint::new(u, v).in_srgb_gamut());
        // a point near the blue primary, but just inside
        assert!(ChromaticityPoint::new(0.18, 0.2).in_srgb_gamut());
        // the saturated palette red sits just beyond the red-green edge
        assert!(!ChromaticityPoint::new(0.4161, 0.5285).in_srgb_gamut());
        assert!(!ChromaticityPoint::new(0.05, 0.05).in_srgb_gamut());
    }
}
