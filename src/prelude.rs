//! This module simply brings the most common functionality under a single namespace, to prevent
//! excessive imports. As of now, this prelude includes every trait in the crate, the ubiquitous
//! [`RGBColor`] and its parse error [`RGBParseError`], the important [`Illuminant`], and the
//! pieces needed to resolve a color: [`ChromaticityPoint`], [`LightnessResolver`] and
//! [`resolve`]. The alternative color spaces in the [`colors`] module are not included.
//!
//! [`RGBColor`]: ../color/struct.RGBColor.html
//! [`RGBParseError`]: ../color/enum.RGBParseError.html
//! [`Illuminant`]: ../illuminants/enum.Illuminant.html
//! [`ChromaticityPoint`]: ../chromaticity/struct.ChromaticityPoint.html
//! [`LightnessResolver`]: ../resolver/struct.LightnessResolver.html
//! [`resolve`]: ../resolver/fn.resolve.html
//! [`colors`]: ../colors/index.html

pub use crate::bound::Bound;
pub use crate::chromaticity::ChromaticityPoint;
pub use crate::color::{Color, RGBColor, RGBParseError};
pub use crate::colormap::ColorMap;
pub use crate::illuminants::Illuminant;
pub use crate::resolver::{resolve, LightnessResolver};
pub use crate::tables::TableRow;
