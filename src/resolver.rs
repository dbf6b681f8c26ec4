//! This module is the heart of the crate: given a chromaticity and a target HSL lightness, it finds
//! the sRGB color of that chromaticity that a display shows at that lightness.
//!
//! HSL lightness is not a function of CIE lightness alone. Once a channel clips at 0 or 1 the two
//! drift apart, and quantization to 8 bits makes the relation a staircase. So instead of inverting
//! anything, the resolver walks up the luminance axis: for each luminance it builds the CIELUV color
//! with the requested chromaticity, converts it to a clamped 8-bit sRGB color, and stops as soon as
//! that color is light enough.
//!
//! # Example
//! ```
//! # use lightness_palette::chromaticity::ChromaticityPoint;
//! let pink = ChromaticityPoint::new(0.2595, 0.3079);
//! let rgb = lightness_palette::resolve(pink, 0.45).unwrap();
//! assert_eq!(rgb.to_string(), "#8B29BD");
//! ```

use std::error::Error;
use std::fmt;

use tracing::{debug, trace};

use crate::chromaticity::{ChromaticityPoint, ReferenceWhite};
use crate::color::{Color, RGBColor};
use crate::colors::cieluvcolor::{cie_lightness, CIE_EPSILON};
use crate::colors::{CIELUVColor, HSLColor};
use crate::illuminants::Illuminant;

/// How the resolver moves along the luminance axis.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Starts at Y = 0 and adds `step` until the lightness is reached or Y passes the reference
    /// white. The returned color is the first one at or above the target, so results depend on the
    /// step: this is how published palette tables were produced.
    FixedStep {
        /// The luminance increment, on the scale where white is `ReferenceWhite::yn`.
        step: f64,
    },
    /// Bisects the luminance range for the smallest Y whose color reaches the target. Cheaper than
    /// a fine fixed step, but can land on a different 8-bit color than the fixed step does.
    Bisection {
        /// The number of halvings of the luminance range.
        iterations: u32,
    },
}

impl Default for SearchStrategy {
    fn default() -> SearchStrategy {
        SearchStrategy::FixedStep { step: 0.2 }
    }
}

/// Which steps of a fixed-step search actually produce a color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchUpdate {
    /// Every step is converted, whichever branch of the L* curve it falls on.
    Always,
    /// Steps whose relative luminance falls on the linear branch of the L* curve are skipped
    /// without converting, so the darkest colors a search can return start at the cube-root
    /// branch. Older palette tables were generated this way; it only matters for very dark
    /// targets.
    CubeRootOnly,
}

impl Default for BranchUpdate {
    fn default() -> BranchUpdate {
        BranchUpdate::Always
    }
}

/// Everything that changes how a resolver searches.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ResolverConfig {
    /// How luminance is searched.
    pub strategy: SearchStrategy,
    /// Which fixed-step luminances are converted. Ignored by bisection.
    pub branch_update: BranchUpdate,
    /// The white luminance and chromaticity are measured against.
    pub white: ReferenceWhite,
}

impl ResolverConfig {
    /// The configuration older palette tables were generated with: a fixed step of 0.2 that skips
    /// steps on the linear branch of the L* curve.
    pub fn legacy() -> ResolverConfig {
        ResolverConfig {
            branch_update: BranchUpdate::CubeRootOnly,
            ..ResolverConfig::default()
        }
    }
}

/// Everything one search found, not only the color.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// The resolved color, quantized to 8 bits per channel.
    pub rgb: RGBColor,
    /// The HSL lightness of `rgb`, between 0 and 1.
    pub hsl_lightness: f64,
    /// The CIELUV color `rgb` was derived from, before clamping and rounding.
    pub luv: CIELUVColor,
    /// The luminance that produced `luv`, on the scale where white is `ReferenceWhite::yn`.
    pub luminance: f64,
    /// `false` if the search ran out of luminance before reaching the target lightness, in which
    /// case `rgb` is the lightest color the search saw.
    pub reached: bool,
}

impl Resolution {
    fn black() -> Resolution {
        Resolution {
            rgb: RGBColor::from((0, 0, 0)),
            hsl_lightness: 0.0,
            luv: CIELUVColor {
                l: 0.0,
                u: 0.0,
                v: 0.0,
            },
            luminance: 0.0,
            reached: true,
        }
    }
}

/// The ways a resolve call can be rejected. Unreachable targets are not errors: see
/// [`Resolution::reached`].
///
/// [`Resolution::reached`]: struct.Resolution.html#structfield.reached
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResolveError {
    /// The target lightness is NaN or outside of [0, 1].
    InvalidLightness,
    /// A chromaticity coordinate is not finite or outside of [0, 1].
    InvalidChromaticity,
    /// The fixed step is not a positive, finite number, or is so small that the search would take
    /// more than [`MAX_STEPS`] conversions.
    ///
    /// [`MAX_STEPS`]: constant.MAX_STEPS.html
    InvalidStep,
    /// The reference white has no positive, finite luminance or an invalid chromaticity.
    InvalidWhite,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ResolveError::InvalidLightness => {
                write!(f, "target lightness must be a number between 0 and 1")
            }
            ResolveError::InvalidChromaticity => {
                write!(f, "chromaticity coordinates must be finite and between 0 and 1")
            }
            ResolveError::InvalidStep => write!(
                f,
                "luminance step must be positive, finite and at least 1/{} of the white luminance",
                MAX_STEPS
            ),
            ResolveError::InvalidWhite => write!(
                f,
                "reference white must have a positive, finite luminance and a valid chromaticity"
            ),
        }
    }
}

impl Error for ResolveError {}

/// The most steps a fixed-step search may take from black to the reference white.
pub const MAX_STEPS: f64 = 1e6;

/// A configured lightness search. Resolvers hold no state between calls, so one can be shared
/// freely.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct LightnessResolver {
    config: ResolverConfig,
}

impl LightnessResolver {
    /// Makes a resolver that searches according to `config`.
    pub fn new(config: ResolverConfig) -> LightnessResolver {
        LightnessResolver { config }
    }

    /// A resolver with [`ResolverConfig::legacy`].
    ///
    /// [`ResolverConfig::legacy`]: struct.ResolverConfig.html#method.legacy
    pub fn legacy() -> LightnessResolver {
        LightnessResolver::new(ResolverConfig::legacy())
    }

    /// The configuration this resolver searches with.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Finds the color with the given chromaticity whose HSL lightness first reaches `target`,
    /// between 0 and 1.
    /// # Errors
    /// See [`resolution`](#method.resolution).
    pub fn resolve(&self, point: ChromaticityPoint, target: f64) -> Result<RGBColor, ResolveError> {
        self.resolution(point, target).map(|res| res.rgb)
    }

    /// Like [`resolve`](#method.resolve), but returns everything the search found. If the target
    /// can't be reached, this is the last color searched with `reached` set to `false`. A target of
    /// 0 needs no search at all and gives black.
    /// # Errors
    /// Returns `ResolveError::InvalidLightness` for a target outside [0, 1],
    /// `ResolveError::InvalidChromaticity` if `point` is not valid, `ResolveError::InvalidWhite` if
    /// the configured reference white is not usable, and `ResolveError::InvalidStep` if the
    /// configured fixed step can't make progress or would need more than [`MAX_STEPS`] steps.
    ///
    /// [`MAX_STEPS`]: constant.MAX_STEPS.html
    /// # Example
    /// ```
    /// # use lightness_palette::chromaticity::ChromaticityPoint;
    /// # use lightness_palette::resolver::LightnessResolver;
    /// let pink = ChromaticityPoint::new(0.2595, 0.3079);
    /// let res = LightnessResolver::default().resolution(pink, 1.0).unwrap();
    /// // no sRGB pink is as light as white
    /// assert!(!res.reached);
    /// assert_eq!(res.rgb.to_string(), "#FF7FFF");
    /// ```
    pub fn resolution(
        &self,
        point: ChromaticityPoint,
        target: f64,
    ) -> Result<Resolution, ResolveError> {
        if !(target >= 0.0 && target <= 1.0) {
            return Err(ResolveError::InvalidLightness);
        }
        if !point.is_valid() {
            return Err(ResolveError::InvalidChromaticity);
        }
        let white = self.config.white;
        if !white.is_valid() {
            return Err(ResolveError::InvalidWhite);
        }
        let res = match self.config.strategy {
            SearchStrategy::FixedStep { step } => {
                if !(step.is_finite() && step > 0.0 && white.yn / step <= MAX_STEPS) {
                    return Err(ResolveError::InvalidStep);
                }
                self.step_search(point, target, step)
            }
            SearchStrategy::Bisection { iterations } => self.bisect(point, target, iterations),
        };
        if !res.reached {
            debug!(
                u = point.u,
                v = point.v,
                target_lightness = target,
                hsl_lightness = res.hsl_lightness,
                "target lightness not reachable, returning the last color"
            );
        }
        Ok(res)
    }

    /// Converts a single luminance to a color, without any searching. `luminance` is on the scale
    /// where white is `ReferenceWhite::yn`; `reached` is always `false` on the result.
    pub fn probe(&self, point: ChromaticityPoint, luminance: f64) -> Resolution {
        let white = self.config.white;
        let luv = CIELUVColor::from_chromaticity(point, white, cie_lightness(luminance / white.yn));
        let rgb = RGBColor::from_xyz(luv.to_xyz(Illuminant::D65)).quantized();
        Resolution {
            rgb,
            hsl_lightness: HSLColor::from_rgb(rgb).l,
            luv,
            luminance,
            reached: false,
        }
    }

    fn step_search(&self, point: ChromaticityPoint, target: f64, step: f64) -> Resolution {
        let yn = self.config.white.yn;
        let mut luminance = 0.0;
        let mut lightness = 0.0;
        let mut last = None;
        let mut conversions = 0u32;
        while lightness < target && luminance < yn {
            let sampled = luminance;
            luminance += step;
            if self.config.branch_update == BranchUpdate::CubeRootOnly
                && sampled / yn < CIE_EPSILON
            {
                continue;
            }
            let res = self.probe(point, sampled);
            conversions += 1;
            lightness = res.hsl_lightness;
            last = Some(res);
        }
        trace!(conversions, luminance, lightness, "fixed-step search done");
        match last {
            Some(mut res) => {
                res.reached = res.hsl_lightness >= target;
                res
            }
            // no step was converted
            None => Resolution {
                reached: target <= 0.0,
                ..Resolution::black()
            },
        }
    }

    fn bisect(&self, point: ChromaticityPoint, target: f64, iterations: u32) -> Resolution {
        let yn = self.config.white.yn;
        let mut darkest = self.probe(point, 0.0);
        if darkest.hsl_lightness >= target {
            darkest.reached = true;
            return darkest;
        }
        let mut best = self.probe(point, yn);
        if best.hsl_lightness < target {
            return best;
        }
        best.reached = true;
        let (mut lo, mut hi) = (0.0, yn);
        for _ in 0..iterations {
            let mid = (lo + hi) / 2.0;
            let res = self.probe(point, mid);
            if res.hsl_lightness >= target {
                hi = mid;
                best = Resolution {
                    reached: true,
                    ..res
                };
            } else {
                lo = mid;
            }
        }
        trace!(iterations, luminance = hi, lightness = best.hsl_lightness, "bisection done");
        best
    }
}

/// Resolves a chromaticity and a target lightness with the default resolver: a fixed step of 0.2
/// against [`ReferenceWhite::PALETTE`], converting every step.
///
/// [`ReferenceWhite::PALETTE`]: ../chromaticity/struct.ReferenceWhite.html#associatedconstant.PALETTE
pub fn resolve(point: ChromaticityPoint, target: f64) -> Result<RGBColor, ResolveError> {
    LightnessResolver::default().resolve(point, target)
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    const PINK: ChromaticityPoint = ChromaticityPoint::new(0.2595, 0.3079);

    #[test]
    fn test_reference_pink() {
        let res = LightnessResolver::default().resolution(PINK, 0.45).unwrap();
        assert_eq!(res.rgb.to_string(), "#8B29BD");
        assert!(res.reached);
        assert!((res.luminance - 10.4).abs() <= 1e-9);
        assert!((res.hsl_lightness - 115.0 / 255.0).abs() <= 1e-12);
        assert_eq!(resolve(PINK, 0.45).unwrap(), res.rgb);
    }

    #[test]
    fn test_pink_ramp() {
        let expected = [
            (0.2, "#3F0E58"),
            (0.3, "#5F1982"),
            (0.4, "#7C24AA"),
            (0.5, "#9B2FD2"),
            (0.6, "#B839F9"),
            (0.7, "#FF66FF"),
        ];
        for &(target, hex) in expected.iter() {
            assert_eq!(resolve(PINK, target).unwrap().to_string(), hex);
        }
    }

    #[test]
    fn test_white_is_achromatic() {
        let white = ReferenceWhite::PALETTE.chromaticity();
        for i in 0..=10 {
            let (r, g, b) = resolve(white, f64::from(i) * 0.1).unwrap().int_rgb_tup();
            let max = r.max(g).max(b);
            let min = r.min(g).min(b);
            assert!(max - min <= 1);
        }
        assert_eq!(resolve(white, 0.5).unwrap().to_string(), "#808080");
        assert_eq!(resolve(white, 0.3).unwrap().to_string(), "#4D4D4D");
    }

    #[test]
    fn test_full_lightness_of_white_is_reached() {
        let white = ReferenceWhite::PALETTE.chromaticity();
        let res = LightnessResolver::default().resolution(white, 1.0).unwrap();
        assert_eq!(res.rgb.to_string(), "#FFFFFF");
        assert!(res.reached);
        assert!(res.luminance < 100.0);
    }

    #[test]
    fn test_monotonic_in_target() {
        let resolver = LightnessResolver::default();
        let mut prev = resolver.resolution(PINK, 0.0).unwrap();
        for i in 1..=20 {
            let res = resolver.resolution(PINK, f64::from(i) * 0.05).unwrap();
            assert!(res.hsl_lightness >= prev.hsl_lightness);
            assert!(res.luminance >= prev.luminance);
            prev = res;
        }
    }

    #[test]
    fn test_deterministic() {
        let resolver = LightnessResolver::default();
        let first = resolver.resolution(PINK, 0.37).unwrap();
        for _ in 0..3 {
            assert_eq!(resolver.resolution(PINK, 0.37).unwrap(), first);
        }
    }

    #[test]
    fn test_zero_target_is_black() {
        for resolver in &[LightnessResolver::default(), LightnessResolver::legacy()] {
            let res = resolver.resolution(PINK, 0.0).unwrap();
            assert_eq!(res.rgb.to_string(), "#000000");
            assert!(res.reached);
            assert_eq!(res.luminance, 0.0);
        }
    }

    #[test]
    fn test_unreachable_returns_last_color() {
        let res = LightnessResolver::default().resolution(PINK, 1.0).unwrap();
        assert!(!res.reached);
        assert_eq!(res.rgb.int_rgb_tup(), (255, 127, 255));
        assert!((res.luminance - 99.8).abs() <= 1e-6);
    }

    #[test]
    fn test_legacy_differs_only_when_dark() {
        let corrected = LightnessResolver::default();
        let legacy = LightnessResolver::legacy();
        assert_eq!(corrected.resolve(PINK, 0.1).unwrap().to_string(), "#210430");
        let old = legacy.resolution(PINK, 0.1).unwrap();
        assert_eq!(old.rgb.to_string(), "#2C073E");
        // the first step on the cube-root branch
        assert!((old.luminance - 1.0).abs() <= 1e-9);
        for &target in &[0.3, 0.45, 0.6] {
            assert_eq!(
                corrected.resolve(PINK, target).unwrap(),
                legacy.resolve(PINK, target).unwrap()
            );
        }
    }

    #[test]
    fn test_invalid_arguments() {
        let resolver = LightnessResolver::default();
        for &bad in &[-0.1, 1.1, std::f64::NAN, std::f64::INFINITY] {
            assert_eq!(
                resolver.resolve(PINK, bad),
                Err(ResolveError::InvalidLightness)
            );
        }
        assert_eq!(
            resolve(ChromaticityPoint::new(1.5, 0.3), 0.5),
            Err(ResolveError::InvalidChromaticity)
        );
        assert_eq!(
            resolve(ChromaticityPoint::new(0.2, std::f64::NAN), 0.5),
            Err(ResolveError::InvalidChromaticity)
        );
        let stuck = LightnessResolver::new(ResolverConfig {
            strategy: SearchStrategy::FixedStep { step: 0.0 },
            ..ResolverConfig::default()
        });
        assert_eq!(stuck.resolve(PINK, 0.5), Err(ResolveError::InvalidStep));
    }

    #[test]
    fn test_all_steps_skipped_is_not_reached() {
        // one step from black straight to white, and black is on the linear branch
        let coarse = LightnessResolver::new(ResolverConfig {
            strategy: SearchStrategy::FixedStep { step: 100.0 },
            ..ResolverConfig::legacy()
        });
        let res = coarse.resolution(PINK, 0.5).unwrap();
        assert_eq!(res.rgb.to_string(), "#000000");
        assert!(!res.reached);
        assert!(coarse.resolution(PINK, 0.0).unwrap().reached);
    }

    #[test]
    fn test_invalid_white() {
        for &yn in &[0.0, -100.0, std::f64::NAN, std::f64::INFINITY] {
            for &strategy in &[
                SearchStrategy::FixedStep { step: 0.2 },
                SearchStrategy::Bisection { iterations: 8 },
            ] {
                let resolver = LightnessResolver::new(ResolverConfig {
                    strategy,
                    white: ReferenceWhite {
                        yn,
                        ..ReferenceWhite::PALETTE
                    },
                    ..ResolverConfig::default()
                });
                assert_eq!(resolver.resolve(PINK, 0.5), Err(ResolveError::InvalidWhite));
            }
        }
        let off_diagram = LightnessResolver::new(ResolverConfig {
            white: ReferenceWhite {
                v: std::f64::NAN,
                ..ReferenceWhite::PALETTE
            },
            ..ResolverConfig::default()
        });
        assert_eq!(
            off_diagram.resolve(PINK, 0.5),
            Err(ResolveError::InvalidWhite)
        );
    }

    #[test]
    fn test_step_limit() {
        let with_step = |step| {
            LightnessResolver::new(ResolverConfig {
                strategy: SearchStrategy::FixedStep { step },
                ..ResolverConfig::default()
            })
        };
        for &step in &[1e-300, 1e-5, std::f64::MIN_POSITIVE] {
            assert_eq!(
                with_step(step).resolve(PINK, 0.5),
                Err(ResolveError::InvalidStep)
            );
        }
        assert_eq!(
            with_step(1e-2).resolve(PINK, 0.45).unwrap().to_string(),
            "#8B29BD"
        );
    }

    #[test]
    fn test_bisection() {
        let resolver = LightnessResolver::new(ResolverConfig {
            strategy: SearchStrategy::Bisection { iterations: 32 },
            ..ResolverConfig::default()
        });
        assert_eq!(resolver.resolve(PINK, 0.45).unwrap().to_string(), "#8B29BD");
        let gray = resolver
            .resolve(ReferenceWhite::PALETTE.chromaticity(), 0.5)
            .unwrap()
            .int_rgb_tup();
        assert!(gray.0.max(gray.1).max(gray.2) - gray.0.min(gray.1).min(gray.2) <= 1);
        assert_eq!(resolver.resolve(PINK, 0.0).unwrap().to_string(), "#000000");
        let res = resolver.resolution(PINK, 1.0).unwrap();
        assert!(!res.reached);
        assert_eq!(res.luminance, 100.0);
    }

    #[test]
    fn test_single_luminance() {
        let resolver = LightnessResolver::default();
        let res = resolver.probe(PINK, 10.4);
        assert_eq!(res.rgb.to_string(), "#8B29BD");
        assert!(!res.reached);
        assert_eq!(resolver.probe(PINK, 0.0).rgb.to_string(), "#000000");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ResolveError::InvalidLightness.to_string(),
            "target lightness must be a number between 0 and 1"
        );
        assert!(ResolveError::InvalidWhite
            .to_string()
            .starts_with("reference white"));
    }
}
