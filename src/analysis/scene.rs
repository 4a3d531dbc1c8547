//! Scene composition: what the model saw in the video.

use super::wire;
use crate::math::{Rgb, Vec3};
use serde::{Deserialize, Serialize};

/// One object recognized in the source video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: String,

    /// Raw shape label as reported by the model ("sphere", "cube",
    /// "cylinder", "mesh", ...). Resolved to a concrete shape by
    /// [`ShapeKind::resolve`](super::ShapeKind::resolve).
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(with = "wire::xyz", default)]
    pub position: Vec3,

    /// Euler rotation in degrees.
    #[serde(with = "wire::xyz", default)]
    pub rotation: Vec3,

    #[serde(with = "wire::scale_xyz", default = "wire::vec3_one")]
    pub scale: Vec3,

    /// Visual material; absent until the randomizer assigns one, and
    /// optional even after that.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<ObjectMaterial>,
}

/// Visual surface properties of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectMaterial {
    #[serde(default)]
    pub base_color: Rgb,
    #[serde(default = "wire::half")]
    pub roughness: f32,
    #[serde(default)]
    pub metallic: f32,
}

impl Default for ObjectMaterial {
    fn default() -> Self {
        Self {
            base_color: Rgb::WHITE,
            roughness: 0.5,
            metallic: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneComposition {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}
