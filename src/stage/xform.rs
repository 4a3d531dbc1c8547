//! Ordered transform operations on scene-document nodes.

use crate::math::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// A single transform operation. A node carries an ordered op stack; the
/// stack is always replaced wholesale, never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum XformOp {
    /// Translation in meters.
    Translate(Vec3),
    /// Euler rotation in degrees, applied about X, then Y, then Z.
    RotateXyz(Vec3),
    Scale(Vec3),
}

impl XformOp {
    pub fn to_mat4(&self) -> Mat4 {
        match self {
            Self::Translate(v) => Mat4::from_translation(*v),
            Self::RotateXyz(degrees) => {
                // X first, then Y, then Z: composed so a vector passes
                // through Rx before Ry before Rz.
                Mat4::from_rotation_z(degrees.z.to_radians())
                    * Mat4::from_rotation_y(degrees.y.to_radians())
                    * Mat4::from_rotation_x(degrees.x.to_radians())
            }
            Self::Scale(v) => Mat4::from_scale(*v),
        }
    }
}

/// Composes an op stack into a single local-to-parent matrix. Ops apply to
/// a point in reverse stack order: for `[Translate, RotateXyz, Scale]` a
/// local point is scaled, then rotated, then translated.
pub fn compose(ops: &[XformOp]) -> Mat4 {
    ops.iter()
        .fold(Mat4::IDENTITY, |acc, op| acc * op.to_mat4())
}
