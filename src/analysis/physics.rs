//! Physics estimates extracted from the video.

use super::wire;
use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// Physics estimate for one object, id-joinable to the scene composition.
///
/// The join is not guaranteed to be 1:1; unmatched ids on either side are
/// tolerated downstream. The `Default` values double as the substitution
/// values used when a scene object has no matching physics entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsObject {
    #[serde(default)]
    pub id: String,

    #[serde(default = "wire::one")]
    pub mass: f32,

    /// Meters per second at simulation start.
    #[serde(with = "wire::xyz", default)]
    pub initial_velocity: Vec3,

    #[serde(default = "wire::half")]
    pub static_friction: f32,

    #[serde(default = "wire::half")]
    pub dynamic_friction: f32,

    #[serde(default = "wire::half")]
    pub restitution: f32,
}

impl Default for PhysicsObject {
    fn default() -> Self {
        Self {
            id: String::new(),
            mass: 1.0,
            initial_velocity: Vec3::ZERO,
            static_friction: 0.5,
            dynamic_friction: 0.5,
            restitution: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsEstimation {
    #[serde(with = "wire::xyz", default = "wire::earth_gravity")]
    pub gravity: Vec3,

    #[serde(default)]
    pub objects: Vec<PhysicsObject>,
}

impl Default for PhysicsEstimation {
    fn default() -> Self {
        Self {
            gravity: wire::earth_gravity(),
            objects: Vec::new(),
        }
    }
}

impl PhysicsEstimation {
    /// Scalar gravity strength. Direction is assumed downward along the
    /// vertical axis, so only the vertical component contributes.
    pub fn gravity_magnitude(&self) -> f32 {
        self.gravity.y.abs()
    }
}
