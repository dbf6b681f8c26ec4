//! This module contains a struct, [`Coord`](coord::Coord), that models a 3D coordinate space and
//! supports limited math in 3 dimensions with scalars. Used to unify math on colors that is the same,
//! just with different projections into 3D space: clamping, quantizing, and interpolating.

use num::{Num, NumCast};
use std::ops::{Div, Mul};

/// Represents a scalar value that can be easily converted, described using the common numeric traits
/// in [`num`]. Anything that falls under this category can be multiplied by a [`Coord`] to scale
/// it. This has no added functionality: it's just for convenience.
pub trait Scalar: NumCast + Num {}

impl<T: NumCast + Num> Scalar for T {}

/// A point in 3D space. `Coord` has three axes, denoted `x`, `y`, and `z`. Any color that converts to
/// and from a `Coord` matches its components with these axes in the order of the letters in its
/// name: for example, `CIELUVColor` maps to a coordinate such that `l` is on the x-axis, `u` is on
/// the y-axis, and `v` is on the z-axis.
///
/// # Example
/// ```
/// # use lightness_palette::coord::Coord;
/// let point = Coord{x: 1., y: 8., z: 7.};
/// // scalar multiplication and division; the scalar has to go on the right
/// let prod = point * 2u8; // the point (2, 16, 14)
/// let quot = point / 2.; // the point (0.5, 4, 3.5)
/// assert_eq!(prod, Coord{x: 2., y: 16., z: 14.});
/// assert_eq!(quot, Coord{x: 0.5, y: 4., z: 3.5});
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coord {
    /// The first axis.
    pub x: f64,
    /// The second axis.
    pub y: f64,
    /// The third axis.
    pub z: f64,
}

// Scalar multiplication and division: (a, b, c) * s = (sa, sb, sc) and similarly for
// division. This is unfortunately not commutative, but it'll do.
impl<U: Scalar> Mul<U> for Coord {
    type Output = Coord;
    fn mul(self, rhs: U) -> Coord {
        // every Scalar we use is a primitive number, which always casts to f64
        let r: f64 = num::cast(rhs).unwrap_or(std::f64::NAN);
        Coord {
            x: self.x * r,
            y: self.y * r,
            z: self.z * r,
        }
    }
}

impl<U: Scalar> Div<U> for Coord {
    type Output = Coord;
    fn div(self, rhs: U) -> Coord {
        if rhs.is_zero() {
            panic!("Division by 0!");
        } else {
            let r: f64 = num::cast(rhs).unwrap_or(std::f64::NAN);
            Coord {
                x: self.x / r,
                y: self.y / r,
                z: self.z / r,
            }
        }
    }
}

impl Coord {
    /// The weighted midpoint: a weight of 1 gives `self`, a weight of 0 gives `other`, and anything in
    /// between lies on the segment joining them. Very strange things may happen if the weight is not
    /// between 0 and 1.
    /// # Example
    /// ```
    /// # use lightness_palette::coord::Coord;
    /// let point1 = Coord{x: 0.2, y: 0., z: 1.};
    /// let point2 = Coord{x: 1., y: 0.8, z: 1.};
    /// let mid = point1.weighted_midpoint(&point2, 0.25);
    /// // not 0.6: the weight has shifted it towards the second point
    /// assert!((mid.x - 0.8).abs() <= 1e-10);
    /// assert!((mid.y - 0.6).abs() <= 1e-10);
    /// assert!((mid.z - 1.).abs() <= 1e-10);
    /// ```
    pub fn weighted_midpoint(&self, other: &Coord, weight: f64) -> Coord {
        Coord {
            x: self.x * weight + (1.0 - weight) * other.x,
            y: self.y * weight + (1.0 - weight) * other.y,
            z: self.z * weight + (1.0 - weight) * other.z,
        }
    }

    /// Rounds every component to the nearest integer, halfway cases away from zero.
    pub fn round(&self) -> Coord {
        Coord {
            x: self.x.round(),
            y: self.y.round(),
            z: self.z.round(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_ops_accept_ints_and_floats() {
        let point = Coord {
            x: 0.5,
            y: 0.25,
            z: 1.0,
        };
        assert_eq!(
            point * 255u8,
            Coord {
                x: 127.5,
                y: 63.75,
                z: 255.0
            }
        );
        assert_eq!((point * 4i32) / 2.0, point * 2u16);
    }

    #[test]
    #[should_panic]
    fn test_div_by_zero_panics() {
        let _ = Coord {
            x: 1.,
            y: 1.,
            z: 1.,
        } / 0u8;
    }

    #[test]
    fn test_round_halfway_away_from_zero() {
        let point = Coord {
            x: 127.5,
            y: 63.49,
            z: -0.5,
        };
        assert_eq!(
            point.round(),
            Coord {
                x: 128.0,
                y: 63.0,
                z: -1.0
            }
        );
    }
}
