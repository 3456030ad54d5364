/// Rotation angles and rotation matrices
use crate::matrix::Mat3;

/// Rotation about the three axes (in radians), sampled once per frame.
///
/// Pitch turns about X, yaw about Y and roll about Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAngles {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl RotationAngles {
    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    pub fn zero() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
        }
    }

    pub fn from_degrees(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self::new(pitch.to_radians(), yaw.to_radians(), roll.to_radians())
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, d_pitch: f64, d_yaw: f64, d_roll: f64) {
        self.pitch += d_pitch;
        self.yaw += d_yaw;
        self.roll += d_roll;
    }
}

impl Default for RotationAngles {
    fn default() -> Self {
        Self::zero()
    }
}

/// Builder for rotation matrices.
///
/// Every elementary rotation uses the same handedness: a quarter turn about
/// X carries `(1, -1, -1)` to `(1, -1, 1)`.
pub struct Rotation;

impl Rotation {
    /// Rotation about the X axis.
    pub fn x(angle: f64) -> Mat3 {
        let (s, c) = angle.sin_cos();
        Mat3::new(
            1.0, 0.0, 0.0, //
            0.0, c, s, //
            0.0, negate(s), c,
        )
    }

    /// Rotation about the Y axis.
    pub fn y(angle: f64) -> Mat3 {
        let (s, c) = angle.sin_cos();
        Mat3::new(
            c, 0.0, negate(s), //
            0.0, 1.0, 0.0, //
            s, 0.0, c,
        )
    }

    /// Rotation about the Z axis.
    pub fn z(angle: f64) -> Mat3 {
        let (s, c) = angle.sin_cos();
        Mat3::new(
            c, s, 0.0, //
            negate(s), c, 0.0, //
            0.0, 0.0, 1.0,
        )
    }

    /// Combined per-frame rotation `Rx(pitch) · Ry(yaw) · Rz(roll)`.
    ///
    /// Rotations do not commute; this order is what the renderer relies on.
    pub fn compose(angles: &RotationAngles) -> Mat3 {
        Self::x(angles.pitch) * Self::y(angles.yaw) * Self::z(angles.roll)
    }

    /// Closed form of [`Rotation::compose`], without the two matrix products.
    pub fn euler(angles: &RotationAngles) -> Mat3 {
        let (s1, c1) = angles.pitch.sin_cos();
        let (s2, c2) = angles.yaw.sin_cos();
        let (s3, c3) = angles.roll.sin_cos();
        let (s1, s2, s3) = (negate(s1), negate(s2), negate(s3));

        Mat3::new(
            c2 * c3,
            -c2 * s3,
            s2,
            c1 * s3 + c3 * s1 * s2,
            c1 * c3 - s1 * s2 * s3,
            -c2 * s1,
            s1 * s3 - c1 * c3 * s2,
            c3 * s1 + c1 * s2 * s3,
            c1 * c2,
        )
    }
}

/// `-x`, except that a zero input yields `+0.0`.
#[inline]
fn negate(x: f64) -> f64 {
    0.0 - x
}
