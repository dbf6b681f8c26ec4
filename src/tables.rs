//! Builds the palette tables by resolving every entry, and renders them as source lines or CSV.
//!
//! There are three tables:
//!
//! - the palette constants of [`DEFINES`], as `#define COLOR_<label> Color(...)` lines,
//! - the bar table, every named color at 10% to 50% lightness in both saturations,
//! - the snail table, the stops of the lift and sink gradient of a trail display: orange
//!   darkening from 50% to 30%, a gray, then a desaturated green.
//!
//! [`DEFINES`]: ../palette/static.DEFINES.html

use std::fmt;
use std::io;

use serde::Serialize;
use tracing::debug;

use crate::color::RGBColor;
use crate::colormap::RampEntry;
use crate::palette::{ColorDefine, NamedColor, Saturation, DEFINES};
use crate::resolver::{LightnessResolver, ResolveError};

/// The lightness percentages of the bar table.
pub const BAR_LIGHTNESSES: [u8; 9] = [10, 15, 20, 25, 30, 35, 40, 45, 50];

/// A row of any table: it prints as one line of text, serializes as one CSV record, and has a
/// color.
pub trait TableRow: fmt::Display + Serialize {
    /// The color of this row.
    fn rgb(&self) -> RGBColor;
}

fn lower_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("{:02x}{:02x}{:02x}", r, g, b)
}

/// A resolved palette constant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DefineRow {
    /// The constant's name, without the `COLOR_` prefix.
    pub label: &'static str,
    /// The hue.
    pub color: NamedColor,
    /// Which chromaticity of the hue.
    pub saturation: Saturation,
    /// The target lightness in percent.
    pub lightness: u8,
    /// Red, from 0 to 255.
    pub r: u8,
    /// Green, from 0 to 255.
    pub g: u8,
    /// Blue, from 0 to 255.
    pub b: u8,
    /// Whether the color actually reaches the target lightness.
    pub reached: bool,
}

impl TableRow for DefineRow {
    fn rgb(&self) -> RGBColor {
        RGBColor::from((self.r, self.g, self.b))
    }
}

impl fmt::Display for DefineRow {
    /// Formats as a C preprocessor constant with a comment naming where the color came from.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "#define COLOR_{} Color(0x{:02x}, 0x{:02x}, 0x{:02x}) // {}{} lt {} #{}",
            self.label,
            self.r,
            self.g,
            self.b,
            self.color,
            self.saturation.flag(),
            self.lightness,
            lower_hex((self.r, self.g, self.b))
        )
    }
}

/// One entry of the bar table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BarRow {
    /// The hue.
    pub color: NamedColor,
    /// Which chromaticity of the hue.
    pub saturation: Saturation,
    /// The target lightness in percent.
    pub lightness: u8,
    /// Red, from 0 to 255.
    pub r: u8,
    /// Green, from 0 to 255.
    pub g: u8,
    /// Blue, from 0 to 255.
    pub b: u8,
}

impl TableRow for BarRow {
    fn rgb(&self) -> RGBColor {
        RGBColor::from((self.r, self.g, self.b))
    }
}

impl fmt::Display for BarRow {
    /// Formats like `pink_SATURATED_45 #8b29bd`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}_{}_{:02} #{}",
            self.color,
            self.saturation.label(),
            self.lightness,
            lower_hex((self.r, self.g, self.b))
        )
    }
}

/// A stop of the snail gradient, flattened for printing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SnailRow {
    /// The position of the stop on the ramp.
    pub position: i32,
    /// Red, from 0 to 255.
    pub r: u8,
    /// Green, from 0 to 255.
    pub g: u8,
    /// Blue, from 0 to 255.
    pub b: u8,
}

impl From<RampEntry> for SnailRow {
    fn from(entry: RampEntry) -> SnailRow {
        let (r, g, b) = entry.color.int_rgb_tup();
        SnailRow {
            position: entry.position,
            r,
            g,
            b,
        }
    }
}

impl TableRow for SnailRow {
    fn rgb(&self) -> RGBColor {
        RGBColor::from((self.r, self.g, self.b))
    }
}

impl fmt::Display for SnailRow {
    /// Formats as a C initializer, like `{0, 0xd6, 0x5f, 0x29},`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{{}, 0x{:02x}, 0x{:02x}, 0x{:02x}}},",
            self.position, self.r, self.g, self.b
        )
    }
}

/// Resolves one palette constant.
pub fn define_row(
    resolver: &LightnessResolver,
    define: &ColorDefine,
) -> Result<DefineRow, ResolveError> {
    let res = resolver.resolution(define.chromaticity(), define.target())?;
    let (r, g, b) = res.rgb.int_rgb_tup();
    Ok(DefineRow {
        label: define.label,
        color: define.color,
        saturation: define.saturation,
        lightness: define.lightness,
        r,
        g,
        b,
        reached: res.reached,
    })
}

/// Resolves every constant of [`DEFINES`], in order.
///
/// [`DEFINES`]: ../palette/static.DEFINES.html
pub fn define_colors(resolver: &LightnessResolver) -> Result<Vec<DefineRow>, ResolveError> {
    let rows = DEFINES
        .iter()
        .map(|define| define_row(resolver, define))
        .collect::<Result<Vec<_>, _>>()?;
    let unreached = rows.iter().filter(|row| !row.reached).count();
    debug!(rows = rows.len(), unreached, "resolved palette constants");
    Ok(rows)
}

/// Resolves the bar table: for every named color and every lightness in [`BAR_LIGHTNESSES`], the
/// saturated entry followed by the desaturated one.
///
/// [`BAR_LIGHTNESSES`]: constant.BAR_LIGHTNESSES.html
pub fn bar_table(resolver: &LightnessResolver) -> Result<Vec<BarRow>, ResolveError> {
    let mut rows = Vec::with_capacity(NamedColor::ALL.len() * BAR_LIGHTNESSES.len() * 2);
    for &color in NamedColor::ALL.iter() {
        for &lightness in BAR_LIGHTNESSES.iter() {
            for &saturation in &[Saturation::Saturated, Saturation::Desaturated] {
                let rgb = resolver.resolve(
                    color.chromaticity(saturation),
                    f64::from(lightness) * 0.01,
                )?;
                let (r, g, b) = rgb.int_rgb_tup();
                rows.push(BarRow {
                    color,
                    saturation,
                    lightness,
                    r,
                    g,
                    b,
                });
            }
        }
    }
    debug!(rows = rows.len(), "resolved bar table");
    Ok(rows)
}

/// Resolves the stops of the snail gradient. Positions 0 to 90 are saturated orange going from 50%
/// down to 30% lightness, 100 is white at 30%, and 110 to 200 are desaturated green from 25% up to
/// 50%.
/// # Example
/// ```
/// # use lightness_palette::resolver::LightnessResolver;
/// # use lightness_palette::tables::snail_table;
/// let stops = snail_table(&LightnessResolver::default()).unwrap();
/// assert_eq!(stops.len(), 21);
/// assert_eq!(stops[10].position, 100);
/// assert_eq!(stops[10].color.to_string(), "#4D4D4D");
/// ```
pub fn snail_table(resolver: &LightnessResolver) -> Result<Vec<RampEntry>, ResolveError> {
    let mut entries = Vec::with_capacity(21);
    let orange = NamedColor::Orange.chromaticity(Saturation::Saturated);
    for c in 0..10 {
        let lightness = 50.0 + (30.0 - 50.0) * f64::from(c) / 9.0;
        let rgb = resolver.resolve(orange, lightness * 0.01)?;
        entries.push(RampEntry::new(c * 10, rgb));
    }
    let white = NamedColor::White.chromaticity(Saturation::Saturated);
    entries.push(RampEntry::new(100, resolver.resolve(white, 0.3)?));
    let green = NamedColor::Green.chromaticity(Saturation::Desaturated);
    for c in 0..10 {
        let lightness = 25.0 + (40.0 - 15.0) * f64::from(c) / 9.0;
        let rgb = resolver.resolve(green, lightness * 0.01)?;
        entries.push(RampEntry::new(110 + c * 10, rgb));
    }
    debug!(rows = entries.len(), "resolved snail table");
    Ok(entries)
}

/// Writes every row as a line of text.
pub fn write_lines<W: io::Write, T: TableRow>(out: &mut W, rows: &[T]) -> io::Result<()> {
    for row in rows {
        writeln!(out, "{}", row)?;
    }
    Ok(())
}

/// Writes the rows as CSV, with a header row named after the fields.
pub fn write_csv<W: io::Write, T: TableRow>(out: W, rows: &[T]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
