//! This file provides the constant matrices used for chromatic adaptation and sRGB conversion. They
//! are built once and kept around, along with their inverses, which are computed from the forward
//! matrices rather than tabulated.

use rulinalg::matrix::Matrix;
use rulinalg::vector::Vector;

/// Not safe for general use. The only reason this is here is to calculate the inverse of constant
/// matrices. This panics on singular matrices!
pub fn inv(m: &Matrix<f64>) -> Matrix<f64> {
    match m.clone().inverse() {
        Ok(inverse) => inverse,
        Err(_) => panic!("Constant matrix not invertible!"),
    }
}

/// Multiplies a 3x3 matrix by the column vector [a, b, c], returning the three components.
pub fn mul3(m: &Matrix<f64>, a: f64, b: f64, c: f64) -> [f64; 3] {
    let out: Vector<f64> = m * &Vector::new(vec![a, b, c]);
    [out[0], out[1], out[2]]
}

lazy_static! {
    /// The Bradford cone response matrix, used for chromatic adaptation between white points.
    pub static ref BRADFORD_TRANSFORM: Matrix<f64> = Matrix::new(3, 3, vec![
        00.8951, 00.2664, -0.1614,
        -0.7502, 01.7135, 00.0367,
        00.0389, -0.0685, 01.0296,
    ]);
    pub static ref BRADFORD_TRANSFORM_INV: Matrix<f64> = inv(&BRADFORD_TRANSFORM);
    /// Linear XYZ (D65, Y normalized to 1) to linear sRGB.
    pub static ref STANDARD_RGB_TRANSFORM: Matrix<f64> = Matrix::new(3, 3, vec![
        03.2406, -1.5372, -0.4986,
        -0.9689, 01.8758, 00.0415,
        00.0557, -0.2040, 01.0570,
    ]);
    pub static ref STANDARD_RGB_TRANSFORM_INV: Matrix<f64> = inv(&STANDARD_RGB_TRANSFORM);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_round_trip() {
        let xyz = [0.3, 0.53, 0.65];
        let rgb = mul3(&STANDARD_RGB_TRANSFORM, xyz[0], xyz[1], xyz[2]);
        let back = mul3(&STANDARD_RGB_TRANSFORM_INV, rgb[0], rgb[1], rgb[2]);
        for i in 0..3 {
            assert!((xyz[i] - back[i]).abs() <= 1e-10);
        }
    }

    #[test]
    fn test_bradford_inverse_is_identity() {
        let identity = &*BRADFORD_TRANSFORM_INV * &*BRADFORD_TRANSFORM;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((identity[[i, j]] - expected).abs() <= 1e-10);
            }
        }
    }
}
