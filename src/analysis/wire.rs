//! Serde adapters and substitution defaults for the model's JSON wire shapes.
//!
//! The vision model reports vectors as `{"x": .., "y": .., "z": ..}` maps
//! with any component possibly absent. These adapters translate that shape
//! to [`Vec3`](glam::Vec3) once, at the boundary; nothing deeper in the
//! crate re-checks for missing fields.

use glam::Vec3;

pub(crate) mod xyz {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize, Default)]
    struct Xyz {
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
        #[serde(default)]
        z: f32,
    }

    pub fn serialize<S: Serializer>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        Xyz {
            x: v.x,
            y: v.y,
            z: v.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let raw = Xyz::deserialize(deserializer)?;
        Ok(Vec3::new(raw.x, raw.y, raw.z))
    }
}

/// Scale vectors get the uniform-scale fallback: a missing `y` or `z` takes
/// the value of `x`, and a missing `x` means 1.0.
pub(crate) mod scale_xyz {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize, Default)]
    struct Xyz {
        #[serde(default)]
        x: Option<f32>,
        #[serde(default)]
        y: Option<f32>,
        #[serde(default)]
        z: Option<f32>,
    }

    pub fn serialize<S: Serializer>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        super::xyz::serialize(v, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        let raw = Xyz::deserialize(deserializer)?;
        let x = raw.x.unwrap_or(1.0);
        Ok(Vec3::new(x, raw.y.unwrap_or(x), raw.z.unwrap_or(x)))
    }
}

pub(crate) fn vec3_one() -> Vec3 {
    Vec3::ONE
}

pub(crate) fn one() -> f32 {
    1.0
}

pub(crate) fn half() -> f32 {
    0.5
}

pub(crate) fn earth_gravity() -> Vec3 {
    Vec3::new(0.0, -9.81, 0.0)
}

pub(crate) fn dome_intensity() -> f32 {
    1000.0
}

pub(crate) fn key_light_intensity() -> f32 {
    5000.0
}

pub(crate) fn key_light_position() -> Vec3 {
    Vec3::new(5.0, 5.0, 5.0)
}

pub(crate) fn color_temperature() -> f32 {
    6500.0
}

pub(crate) fn camera_position() -> Vec3 {
    Vec3::new(0.0, 1.5, 3.0)
}

pub(crate) fn camera_look_at() -> Vec3 {
    Vec3::new(0.0, 0.5, 0.0)
}

pub(crate) fn focal_length() -> f32 {
    50.0
}
