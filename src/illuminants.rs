//! This module provides an enum of the illuminants the palette math needs, as well as a table of
//! white point values for them. The source for this table is the [ASTM E308
//! standard](https://www.astm.org/Standards/E308.htm). These are normalized so that the Y
//! (luminance) value is 100.

/// A listing of the supported CIE standard illuminants. D50 is the reference white CIELUV is
/// expressed against, and D65 is the white point of sRGB: every resolved color goes through both.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum Illuminant {
    /// Horizon daylight, about 5000 K. The reference white of CIELUV here.
    D50,
    /// Noon daylight, about 6500 K. The white point of sRGB.
    D65,
    /// Represents a light of any given hue, as an array [X, Y, Z] in CIE 1931 space.
    Custom([f64; 3]),
}

/// An array of the named illuminants, in the same order as below.
pub static ILLUMINANTS: [Illuminant; 2] = [Illuminant::D50, Illuminant::D65];

/// A table of white point values, in the order of the Illuminant enum definition. Each white point is
/// an array of 3 `f64` values X, Y, and Z, normalized so that Y is 100.
pub static ILLUMINANT_WHITE_POINTS: [[f64; 3]; 2] = [
    [96.422, 100.000, 82.521],
    [95.047, 100.000, 108.884],
];

impl Illuminant {
    /// Gets the XYZ coordinates of the white point value of the illuminant, with Y = 100.
    pub fn white_point(&self) -> [f64; 3] {
        match *self {
            Illuminant::D50 => ILLUMINANT_WHITE_POINTS[0],
            Illuminant::D65 => ILLUMINANT_WHITE_POINTS[1],
            Illuminant::Custom(xyz) => [xyz[0] * 100.0 / xyz[1], 100.0, xyz[2] * 100.0 / xyz[1]],
        }
    }

    /// The CIE 1976 UCS chromaticity (u′, v′) of the white point.
    pub fn uv_chromaticity(&self) -> (f64, f64) {
        let [x, y, z] = self.white_point();
        let denom = x + 15.0 * y + 3.0 * z;
        (4.0 * x / denom, 9.0 * y / denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_white_point_normalized() {
        let custom = Illuminant::Custom([0.5, 0.5, 0.25]);
        assert_eq!(custom.white_point(), [100.0, 100.0, 50.0]);
    }

    #[test]
    fn test_uv_chromaticity() {
        // D65 lands right on top of the palette reference white
        let (u, v) = Illuminant::D65.uv_chromaticity();
        assert!((u - 0.1978).abs() <= 1e-4);
        assert!((v - 0.4683).abs() <= 1e-4);
        let (u, v) = Illuminant::D50.uv_chromaticity();
        assert!((u - 0.2091).abs() <= 1e-4);
        assert!((v - 0.4881).abs() <= 1e-4);
        for illuminant in ILLUMINANTS.iter() {
            assert_eq!(illuminant.white_point()[1], 100.0);
        }
    }
}
