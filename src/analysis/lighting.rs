//! Lighting conditions observed in the video.

use super::wire;
use crate::math::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomeLightParams {
    #[serde(default = "wire::dome_intensity")]
    pub intensity: f32,

    /// Rotation of the dome around the vertical axis, in degrees.
    #[serde(default)]
    pub rotation: f32,
}

impl Default for DomeLightParams {
    fn default() -> Self {
        Self {
            intensity: wire::dome_intensity(),
            rotation: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyLightParams {
    #[serde(default = "wire::key_light_intensity")]
    pub intensity: f32,

    #[serde(with = "wire::xyz", default = "wire::key_light_position")]
    pub position: Vec3,

    /// Kelvin.
    #[serde(default = "wire::color_temperature")]
    pub color_temperature: f32,
}

impl Default for KeyLightParams {
    fn default() -> Self {
        Self {
            intensity: wire::key_light_intensity(),
            position: wire::key_light_position(),
            color_temperature: wire::color_temperature(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LightingConditions {
    #[serde(default)]
    pub dome_light: DomeLightParams,

    #[serde(default)]
    pub key_light: KeyLightParams,
}
