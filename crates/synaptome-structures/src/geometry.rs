// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Orientation of directional units (e.g. ommatidia).

A [`Rotation`] is an immutable unit quaternion. Euler angles follow the
intrinsic Z-Y-X (yaw, pitch, roll) convention: the rotation matrix is
`Rz(yaw) · Ry(pitch) · Rx(roll)`.
*/

use crate::error::{StructureError, StructureResult};
use core::ops::Mul;
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Direction each unit faces before its own rotation is applied
pub const REFERENCE_DIRECTION: [f64; 3] = [1.0, 0.0, 0.0];

/// 3D rotation stored as a unit quaternion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rotation(UnitQuaternion<f64>);

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<UnitQuaternion<f64>> for Rotation {
    fn from(quaternion: UnitQuaternion<f64>) -> Self {
        Self(quaternion)
    }
}

impl Rotation {
    pub fn identity() -> Self {
        Self(UnitQuaternion::identity())
    }

    /// Build from raw quaternion components `w + xi + yj + zk`, normalising
    /// to unit length.
    ///
    /// # Errors
    /// `InvalidQuaternion` if any component is non-finite or the norm is zero.
    pub fn from_quaternion(w: f64, x: f64, y: f64, z: f64) -> StructureResult<Self> {
        if ![w, x, y, z].iter().all(|c| c.is_finite()) {
            return Err(StructureError::InvalidQuaternion(format!(
                "non-finite component in ({w}, {x}, {y}, {z})"
            )));
        }
        UnitQuaternion::try_new(Quaternion::new(w, x, y, z), f64::EPSILON)
            .map(Self)
            .ok_or_else(|| {
                StructureError::InvalidQuaternion("quaternion has zero norm".to_string())
            })
    }

    /// Rotation by `angle` radians around the vertical (Z) axis
    pub fn about_z(angle: f64) -> Self {
        Self(UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle))
    }

    /// Rotation by `angle` radians around the Y axis
    pub fn about_y(angle: f64) -> Self {
        Self(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle))
    }

    /// Rotation by `angle` radians around the X axis
    pub fn about_x(angle: f64) -> Self {
        Self(UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angle))
    }

    /// Build from intrinsic Z-Y-X Euler angles in radians.
    ///
    /// # Errors
    /// `InvalidAngle` if any angle is non-finite.
    pub fn from_euler_zyx(yaw: f64, pitch: f64, roll: f64) -> StructureResult<Self> {
        if !(yaw.is_finite() && pitch.is_finite() && roll.is_finite()) {
            return Err(StructureError::InvalidAngle(format!(
                "euler angles must be finite, got ({yaw}, {pitch}, {roll})"
            )));
        }
        Ok(Self(UnitQuaternion::from_euler_angles(roll, pitch, yaw)))
    }

    /// Decompose into intrinsic Z-Y-X Euler angles `(yaw, pitch, roll)`.
    ///
    /// Yaw and roll lie in `(-π, π]`, pitch in `[-π/2, π/2]`.
    pub fn to_euler_zyx(&self) -> (f64, f64, f64) {
        let (roll, pitch, yaw) = self.0.euler_angles();
        (yaw, pitch, roll)
    }

    /// Quaternion components as `[w, x, y, z]`
    pub fn quaternion(&self) -> [f64; 4] {
        let q = self.0.quaternion();
        [q.w, q.i, q.j, q.k]
    }

    pub fn as_unit_quaternion(&self) -> &UnitQuaternion<f64> {
        &self.0
    }

    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }

    /// `self ∘ other`: applies `other` first, then `self`
    pub fn compose(&self, other: &Rotation) -> Rotation {
        Self(self.0 * other.0)
    }

    /// Rotate a vector
    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        let rotated = self.0.transform_vector(&Vector3::new(v[0], v[1], v[2]));
        [rotated.x, rotated.y, rotated.z]
    }

    /// Unit direction this rotation gives to [`REFERENCE_DIRECTION`]
    pub fn direction(&self) -> [f64; 3] {
        self.apply(REFERENCE_DIRECTION)
    }
}

impl Mul for Rotation {
    type Output = Rotation;

    fn mul(self, rhs: Rotation) -> Rotation {
        self.compose(&rhs)
    }
}
