//! This crate finds sRGB colors that sit at a requested perceptual lightness for a given point of the
//! CIE 1976 UCS chromaticity diagram, and turns them into the constants and tables of a UI palette.
//! The idea is simple: a palette designer picks a hue and a saturation once, as a chromaticity
//! (u′, v′), and then asks for that same color at 20%, 45% or 70% lightness. Colors chosen this way
//! keep the same hue as they get lighter or darker, which is not true of tweaking RGB by hand.
//!
//! The core is [`resolver`], which walks up the luminance axis until the HSL lightness of the
//! derived color meets the target. The conversion machinery it relies on lives in [`color`] and
//! [`colors`]; everything that enumerates named colors and formats tables sits on top, in
//! [`palette`], [`tables`] and [`colormap`].
//!
//! [`resolver`]: resolver/index.html
//! [`color`]: color/index.html
//! [`colors`]: colors/index.html
//! [`palette`]: palette/index.html
//! [`tables`]: tables/index.html
//! [`colormap`]: colormap/index.html

// we don't mess around with documentation
#![deny(missing_docs)]
// Clippy doesn't like long decimals, but adding separators in decimals isn't any more readable
// compare -0.96924 with -0.96_924
#![allow(clippy::unreadable_literal)]

extern crate csv;
extern crate float_cmp;
extern crate geo;
extern crate num;
extern crate regex;
extern crate rulinalg;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate maplit;
extern crate tracing;

pub mod bound;
pub mod chromaticity;
pub mod color;
pub mod colormap;
pub mod colors;
mod consts;
pub mod coord;
pub mod illuminants;
pub mod palette;
pub mod prelude;
pub mod resolver;
pub mod tables;

pub use resolver::resolve;
