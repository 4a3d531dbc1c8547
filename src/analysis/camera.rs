//! Camera estimate for the observed viewpoint.

use super::wire;
use crate::math::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraEstimation {
    #[serde(with = "wire::xyz", default = "wire::camera_position")]
    pub position: Vec3,

    #[serde(with = "wire::xyz", default = "wire::camera_look_at")]
    pub look_at: Vec3,

    /// Millimeters.
    #[serde(default = "wire::focal_length")]
    pub focal_length: f32,
}

impl Default for CameraEstimation {
    fn default() -> Self {
        Self {
            position: wire::camera_position(),
            look_at: wire::camera_look_at(),
            focal_length: wire::focal_length(),
        }
    }
}
