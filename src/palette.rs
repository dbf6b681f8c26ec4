//! The named colors of the palette and the constants built from them.
//!
//! Each of the eight named colors comes in two chromaticities, a saturated one and a desaturated
//! one closer to white. A palette constant picks one of those and a lightness percentage.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::chromaticity::ChromaticityPoint;

/// One of the eight hues of the palette.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    /// Red.
    Red,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Orange.
    Orange,
    /// Yellow.
    Yellow,
    /// A light, slightly cyan blue.
    LightBlue,
    /// Pink, closer to purple at low lightness.
    Pink,
    /// The reference white itself: every lightness of it is a gray.
    White,
}

/// Which of the two chromaticities of a named color to use.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Saturation {
    /// The vivid chromaticity.
    Saturated,
    /// The chromaticity pulled towards white.
    Desaturated,
}

impl Saturation {
    /// `true` is saturated, `false` is desaturated.
    pub fn from_flag(saturated: bool) -> Saturation {
        if saturated {
            Saturation::Saturated
        } else {
            Saturation::Desaturated
        }
    }

    /// 1 for saturated, 0 for desaturated, as printed in palette comments.
    pub fn flag(self) -> u8 {
        match self {
            Saturation::Saturated => 1,
            Saturation::Desaturated => 0,
        }
    }

    /// `SATURATED` or `DESATURATED`.
    pub fn label(self) -> &'static str {
        match self {
            Saturation::Saturated => "SATURATED",
            Saturation::Desaturated => "DESATURATED",
        }
    }
}

lazy_static! {
    static ref CHROMATICITIES: HashMap<(NamedColor, Saturation), ChromaticityPoint> = {
        use self::NamedColor::*;
        use self::Saturation::*;
        hashmap! {
            (Red, Saturated) => ChromaticityPoint::new(0.4161, 0.5285),
            (Green, Saturated) => ChromaticityPoint::new(0.1206, 0.5613),
            (Blue, Saturated) => ChromaticityPoint::new(0.1724, 0.1681),
            (Orange, Saturated) => ChromaticityPoint::new(0.3347, 0.5119),
            (Yellow, Saturated) => ChromaticityPoint::new(0.2023, 0.5204),
            (LightBlue, Saturated) => ChromaticityPoint::new(0.1590, 0.3052),
            (Pink, Saturated) => ChromaticityPoint::new(0.2595, 0.3079),
            (White, Saturated) => ChromaticityPoint::new(0.1978, 0.4684),
            (Red, Desaturated) => ChromaticityPoint::new(0.3819, 0.5112),
            (Green, Desaturated) => ChromaticityPoint::new(0.1462, 0.5546),
            (Blue, Desaturated) => ChromaticityPoint::new(0.1594, 0.2679),
            (Orange, Desaturated) => ChromaticityPoint::new(0.2794, 0.4998),
            (Yellow, Desaturated) => ChromaticityPoint::new(0.2023, 0.5204),
            (LightBlue, Desaturated) => ChromaticityPoint::new(0.1600, 0.3800),
            (Pink, Desaturated) => ChromaticityPoint::new(0.2500, 0.3700),
            (White, Desaturated) => ChromaticityPoint::new(0.1978, 0.4684),
        }
    };
}

impl NamedColor {
    /// Every named color, in the order tables list them.
    pub const ALL: [NamedColor; 8] = [
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Blue,
        NamedColor::Orange,
        NamedColor::Yellow,
        NamedColor::LightBlue,
        NamedColor::Pink,
        NamedColor::White,
    ];

    /// The lowercase name, as used in palette labels and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Blue => "blue",
            NamedColor::Orange => "orange",
            NamedColor::Yellow => "yellow",
            NamedColor::LightBlue => "lightblue",
            NamedColor::Pink => "pink",
            NamedColor::White => "white",
        }
    }

    /// The chromaticity of this color at the given saturation.
    /// # Example
    /// ```
    /// # use lightness_palette::palette::{NamedColor, Saturation};
    /// let pink = NamedColor::Pink.chromaticity(Saturation::Saturated);
    /// assert_eq!((pink.u, pink.v), (0.2595, 0.3079));
    /// ```
    pub fn chromaticity(self, saturation: Saturation) -> ChromaticityPoint {
        CHROMATICITIES[&(self, saturation)]
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for NamedColor {
    type Err = NamedColorParseError;
    /// Parses one of the lowercase names, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<NamedColor, NamedColorParseError> {
        let wanted = s.trim().to_lowercase();
        NamedColor::ALL
            .iter()
            .cloned()
            .find(|color| color.name() == wanted)
            .ok_or_else(|| NamedColorParseError(s.trim().to_string()))
    }
}

/// The error returned when a string isn't the name of a palette color. Holds the string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedColorParseError(pub String);

impl fmt::Display for NamedColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown color name '{}'", self.0)
    }
}

impl Error for NamedColorParseError {}

/// A palette constant: a label, the color and saturation it takes its chromaticity from, and the
/// HSL lightness it should have, in percent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ColorDefine {
    /// The name the constant is emitted under, without any prefix.
    pub label: &'static str,
    /// The hue.
    pub color: NamedColor,
    /// Which chromaticity of the hue.
    pub saturation: Saturation,
    /// The target HSL lightness, from 0 to 100.
    pub lightness: u8,
}

impl ColorDefine {
    /// The chromaticity this constant is resolved at.
    pub fn chromaticity(&self) -> ChromaticityPoint {
        self.color.chromaticity(self.saturation)
    }

    /// The lightness as a fraction between 0 and 1.
    pub fn target(&self) -> f64 {
        f64::from(self.lightness) * 0.01
    }
}

macro_rules! define {
    ($label:expr, $color:ident, $sat:ident, $lt:expr) => {
        ColorDefine {
            label: $label,
            color: NamedColor::$color,
            saturation: Saturation::$sat,
            lightness: $lt,
        }
    };
}

/// The constants of the palette, in the order they are emitted.
pub static DEFINES: [ColorDefine; 23] = [
    define!("alertSafe", LightBlue, Saturated, 55),
    define!("alertWarning", Orange, Saturated, 55),
    define!("alertAlarm", Red, Saturated, 45),
    define!("task", Pink, Desaturated, 45),
    define!("bearing", LightBlue, Desaturated, 20),
    define!("bearing_d", LightBlue, Desaturated, 13),
    define!("wind", LightBlue, Desaturated, 30),
    define!("wind_l", LightBlue, Desaturated, 55),
    define!("fgabove", Green, Desaturated, 30),
    define!("fgbelow", Red, Desaturated, 40),
    define!("fgbelowlandable", Orange, Desaturated, 60),
    define!("fgabove_d", Green, Desaturated, 15),
    define!("fgbelow_d", Red, Desaturated, 25),
    define!("fgbelowlandable_d", Orange, Desaturated, 40),
    define!("ground", Orange, Desaturated, 35),
    define!("ground_d", Orange, Desaturated, 25),
    define!("sky", LightBlue, Desaturated, 70),
    define!("sky_d", LightBlue, Desaturated, 50),
    define!("landable_g", Green, Desaturated, 35),
    define!("landable_m", Pink, Saturated, 60),
    define!("landable_o", Orange, Saturated, 45),
    define!("landable_r", Red, Saturated, 40),
    define!("landable_n", White, Saturated, 60),
];
