//! Math types for SynthForge

use serde::{Deserialize, Serialize};

pub use glam::{Mat4, Vec3};

/// Linear RGB color triple with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Converts an HSV triple to RGB.
    ///
    /// Hue is expressed as a fraction of a full turn in [0, 1] (not degrees);
    /// saturation and value are in [0, 1].
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        if saturation <= 0.0 {
            return Self::new(value, value, value);
        }

        let h = hue.rem_euclid(1.0) * 6.0;
        let sector = h.floor() as u32 % 6;
        let f = h - h.floor();

        let p = value * (1.0 - saturation);
        let q = value * (1.0 - saturation * f);
        let t = value * (1.0 - saturation * (1.0 - f));

        match sector {
            0 => Self::new(value, t, p),
            1 => Self::new(q, value, p),
            2 => Self::new(p, value, t),
            3 => Self::new(p, q, value),
            4 => Self::new(t, p, value),
            _ => Self::new(value, p, q),
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}
