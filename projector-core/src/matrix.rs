/// Row-major 3x3 matrix
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Mul;

use crate::vector::Vec3;

/// An immutable 3x3 matrix, stored row by row.
///
/// Like [`Vec3`], equality and hashing are bit-exact on the entries.
#[derive(Debug, Clone, Copy)]
pub struct Mat3 {
    pub a00: f64,
    pub a01: f64,
    pub a02: f64,
    pub a10: f64,
    pub a11: f64,
    pub a12: f64,
    pub a20: f64,
    pub a21: f64,
    pub a22: f64,
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);

    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        a00: f64,
        a01: f64,
        a02: f64,
        a10: f64,
        a11: f64,
        a12: f64,
        a20: f64,
        a21: f64,
        a22: f64,
    ) -> Self {
        Self {
            a00,
            a01,
            a02,
            a10,
            a11,
            a12,
            a20,
            a21,
            a22,
        }
    }

    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let [[a00, a01, a02], [a10, a11, a12], [a20, a21, a22]] = rows;
        Self::new(a00, a01, a02, a10, a11, a12, a20, a21, a22)
    }

    pub fn rows(&self) -> [[f64; 3]; 3] {
        [
            [self.a00, self.a01, self.a02],
            [self.a10, self.a11, self.a12],
            [self.a20, self.a21, self.a22],
        ]
    }

    /// Matrix product `self · other`.
    pub fn multiply(&self, other: &Mat3) -> Mat3 {
        Mat3::new(
            self.a00 * other.a00 + self.a01 * other.a10 + self.a02 * other.a20,
            self.a00 * other.a01 + self.a01 * other.a11 + self.a02 * other.a21,
            self.a00 * other.a02 + self.a01 * other.a12 + self.a02 * other.a22,
            self.a10 * other.a00 + self.a11 * other.a10 + self.a12 * other.a20,
            self.a10 * other.a01 + self.a11 * other.a11 + self.a12 * other.a21,
            self.a10 * other.a02 + self.a11 * other.a12 + self.a12 * other.a22,
            self.a20 * other.a00 + self.a21 * other.a10 + self.a22 * other.a20,
            self.a20 * other.a01 + self.a21 * other.a11 + self.a22 * other.a21,
            self.a20 * other.a02 + self.a21 * other.a12 + self.a22 * other.a22,
        )
    }

    /// Apply the matrix to a column vector.
    pub fn transform(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.a00 * v.x + self.a01 * v.y + self.a02 * v.z,
            self.a10 * v.x + self.a11 * v.y + self.a12 * v.z,
            self.a20 * v.x + self.a21 * v.y + self.a22 * v.z,
        )
    }

    pub fn transpose(&self) -> Mat3 {
        Mat3::new(
            self.a00, self.a10, self.a20, //
            self.a01, self.a11, self.a21, //
            self.a02, self.a12, self.a22,
        )
    }

    /// Largest absolute difference between corresponding entries.
    pub fn max_abs_diff(&self, other: &Mat3) -> f64 {
        self.entries()
            .iter()
            .zip(other.entries().iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    fn entries(&self) -> [f64; 9] {
        [
            self.a00, self.a01, self.a02, self.a10, self.a11, self.a12, self.a20, self.a21,
            self.a22,
        ]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Mat3 {
    fn eq(&self, other: &Self) -> bool {
        self.entries()
            .iter()
            .zip(other.entries().iter())
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for Mat3 {}

impl Hash for Mat3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for entry in self.entries() {
            entry.to_bits().hash(state);
        }
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        self.multiply(&rhs)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(rhs)
    }
}

impl fmt::Display for Mat3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r0, r1, r2] = self.rows();
        write!(
            f,
            "[{} {} {}; {} {} {}; {} {} {}]",
            r0[0], r0[1], r0[2], r1[0], r1[1], r1[2], r2[0], r2[1], r2[2]
        )
    }
}

impl From<Mat3> for nalgebra::Matrix3<f64> {
    fn from(m: Mat3) -> Self {
        nalgebra::Matrix3::new(
            m.a00, m.a01, m.a02, //
            m.a10, m.a11, m.a12, //
            m.a20, m.a21, m.a22,
        )
    }
}

impl From<nalgebra::Matrix3<f64>> for Mat3 {
    fn from(m: nalgebra::Matrix3<f64>) -> Self {
        Mat3::new(
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            m[(2, 0)],
            m[(2, 1)],
            m[(2, 2)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mat3 {
        Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]])
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = sample();
        assert_eq!(m * Mat3::IDENTITY, m);
        assert_eq!(Mat3::IDENTITY * m, m);

        let v = Vec3::new(1.0, -2.0, 3.5);
        assert_eq!(Mat3::IDENTITY * v, v);
    }

    #[test]
    fn test_multiply_matches_nalgebra() {
        let a = sample();
        let b = Mat3::from_rows([[0.5, -1.0, 0.0], [2.0, 0.0, 1.0], [-3.0, 4.0, 0.25]]);

        let expected = nalgebra::Matrix3::from(a) * nalgebra::Matrix3::from(b);
        assert_eq!(a * b, Mat3::from(expected));

        let v = Vec3::new(1.0, 2.0, -1.0);
        let expected_v = nalgebra::Matrix3::from(a) * nalgebra::Vector3::from(v);
        assert_eq!(a * v, Vec3::from(expected_v));
    }

    #[test]
    fn test_transform_by_rows() {
        let m = sample();
        assert_eq!(m.transform(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(1.0, 4.0, 7.0));
        assert_eq!(m.transform(Vec3::new(0.0, 0.0, 1.0)), Vec3::new(3.0, 6.0, 10.0));
    }

    #[test]
    fn test_transpose_swaps_off_diagonal() {
        let t = sample().transpose();
        assert_eq!(t.rows(), [[1.0, 4.0, 7.0], [2.0, 5.0, 8.0], [3.0, 6.0, 10.0]]);
        assert_eq!(t.transpose(), sample());
    }

    #[test]
    fn test_max_abs_diff() {
        let mut m = sample();
        m.a12 += 0.25;
        assert_eq!(m.max_abs_diff(&sample()), 0.25);
        assert_eq!(sample().max_abs_diff(&sample()), 0.0);
    }
}
