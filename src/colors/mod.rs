//! This module contains the color spaces the resolver passes through besides sRGB and XYZ: CIELUV,
//! where palette colors are specified, and HSL, where their lightness is measured. For
//! convenience, each main type is imported into this module's namespace directly.
pub mod cieluvcolor;
pub mod hslcolor;

// for convenience, use this namespace for the color objects
pub use self::cieluvcolor::CIELUVColor;
pub use self::hslcolor::HSLColor;
