//! Configuration for SynthForge
//!
//! All configuration is carried as explicit immutable values handed to the
//! components that need them; there are no process-wide defaults hidden
//! inside authoring or randomization logic.

use crate::error::{Result, SynthForgeError};
use crate::math::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed numeric interval sampled uniformly by the randomizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Fails fast on an inverted interval; a degenerate range (min == max)
    /// is allowed and always samples that value.
    pub fn validate(&self, name: &'static str) -> Result<()> {
        if self.min > self.max {
            return Err(SynthForgeError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        rng.random_range(self.min..=self.max)
    }
}

/// Material randomization ranges. Color is sampled in HSV and converted to
/// RGB; hue is a fraction of a full turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialRanges {
    pub base_color_hue: ValueRange,
    pub base_color_saturation: ValueRange,
    pub base_color_value: ValueRange,
    pub roughness: ValueRange,
    pub metallic: ValueRange,
}

impl Default for MaterialRanges {
    fn default() -> Self {
        Self {
            base_color_hue: ValueRange::new(0.0, 1.0),
            base_color_saturation: ValueRange::new(0.5, 1.0),
            base_color_value: ValueRange::new(0.4, 1.0),
            roughness: ValueRange::new(0.1, 0.9),
            metallic: ValueRange::new(0.0, 0.8),
        }
    }
}

/// Lighting randomization ranges. Rotations are degrees, color temperature
/// is Kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingRanges {
    pub dome_rotation: ValueRange,
    pub dome_intensity: ValueRange,
    pub key_light_intensity: ValueRange,
    pub key_light_position_x: ValueRange,
    pub key_light_position_y: ValueRange,
    pub key_light_position_z: ValueRange,
    pub color_temperature: ValueRange,
}

impl Default for LightingRanges {
    fn default() -> Self {
        Self {
            dome_rotation: ValueRange::new(0.0, 360.0),
            dome_intensity: ValueRange::new(500.0, 3000.0),
            key_light_intensity: ValueRange::new(3000.0, 10000.0),
            key_light_position_x: ValueRange::new(-10.0, 10.0),
            key_light_position_y: ValueRange::new(3.0, 10.0),
            key_light_position_z: ValueRange::new(-10.0, 10.0),
            color_temperature: ValueRange::new(2700.0, 6500.0),
        }
    }
}

/// Physics randomization ranges. Mass and initial velocity are perturbed by
/// multiplicative factors so the base estimate stays the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsRanges {
    pub static_friction: ValueRange,
    pub dynamic_friction: ValueRange,
    pub restitution: ValueRange,
    pub mass_multiplier: ValueRange,
    pub initial_velocity_scale: ValueRange,
}

impl Default for PhysicsRanges {
    fn default() -> Self {
        Self {
            static_friction: ValueRange::new(0.1, 0.8),
            dynamic_friction: ValueRange::new(0.05, 0.7),
            restitution: ValueRange::new(0.2, 0.95),
            mass_multiplier: ValueRange::new(0.5, 2.0),
            initial_velocity_scale: ValueRange::new(0.8, 1.2),
        }
    }
}

/// Camera randomization ranges. Position offsets are meters added to the
/// base estimate, focal length is millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRanges {
    pub position_offset_x: ValueRange,
    pub position_offset_y: ValueRange,
    pub position_offset_z: ValueRange,
    pub focal_length: ValueRange,
}

impl Default for CameraRanges {
    fn default() -> Self {
        Self {
            position_offset_x: ValueRange::new(-2.0, 2.0),
            position_offset_y: ValueRange::new(-1.0, 1.0),
            position_offset_z: ValueRange::new(-2.0, 2.0),
            focal_length: ValueRange::new(24.0, 85.0),
        }
    }
}

/// Declared ranges for every parameter the [`DomainRandomizer`] resamples.
///
/// [`DomainRandomizer`]: crate::randomizer::DomainRandomizer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RandomizationConfig {
    pub material: MaterialRanges,
    pub lighting: LightingRanges,
    pub physics: PhysicsRanges,
    pub camera: CameraRanges,
}

impl RandomizationConfig {
    /// Validates every declared range. An inverted range is a caller
    /// contract violation and fails fast rather than being clamped.
    pub fn validate(&self) -> Result<()> {
        self.material
            .base_color_hue
            .validate("material.base_color_hue")?;
        self.material
            .base_color_saturation
            .validate("material.base_color_saturation")?;
        self.material
            .base_color_value
            .validate("material.base_color_value")?;
        self.material.roughness.validate("material.roughness")?;
        self.material.metallic.validate("material.metallic")?;

        self.lighting.dome_rotation.validate("lighting.dome_rotation")?;
        self.lighting
            .dome_intensity
            .validate("lighting.dome_intensity")?;
        self.lighting
            .key_light_intensity
            .validate("lighting.key_light_intensity")?;
        self.lighting
            .key_light_position_x
            .validate("lighting.key_light_position_x")?;
        self.lighting
            .key_light_position_y
            .validate("lighting.key_light_position_y")?;
        self.lighting
            .key_light_position_z
            .validate("lighting.key_light_position_z")?;
        self.lighting
            .color_temperature
            .validate("lighting.color_temperature")?;

        self.physics
            .static_friction
            .validate("physics.static_friction")?;
        self.physics
            .dynamic_friction
            .validate("physics.dynamic_friction")?;
        self.physics.restitution.validate("physics.restitution")?;
        self.physics
            .mass_multiplier
            .validate("physics.mass_multiplier")?;
        self.physics
            .initial_velocity_scale
            .validate("physics.initial_velocity_scale")?;

        self.camera
            .position_offset_x
            .validate("camera.position_offset_x")?;
        self.camera
            .position_offset_y
            .validate("camera.position_offset_y")?;
        self.camera
            .position_offset_z
            .validate("camera.position_offset_z")?;
        self.camera.focal_length.validate("camera.focal_length")?;

        Ok(())
    }
}

/// Ground plane defaults used by the topology author.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundDefaults {
    /// Edge length of the square ground quad, in meters.
    pub size: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
    pub restitution: f32,
}

impl Default for GroundDefaults {
    fn default() -> Self {
        Self {
            size: 10.0,
            static_friction: 0.5,
            dynamic_friction: 0.4,
            restitution: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDefaults {
    pub position: Vec3,
    pub look_at: Vec3,
    pub focal_length: f32,
}

impl Default for CameraDefaults {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, 3.0),
            look_at: Vec3::new(0.0, 0.5, 0.0),
            focal_length: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingDefaults {
    pub dome_intensity: f32,
    pub key_light_intensity: f32,
    pub key_light_position: Vec3,
}

impl Default for LightingDefaults {
    fn default() -> Self {
        Self {
            dome_intensity: 1000.0,
            key_light_intensity: 5000.0,
            key_light_position: Vec3::new(5.0, 5.0, 5.0),
        }
    }
}

/// Variant-independent scene defaults handed to the topology author.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDefaults {
    pub ground: GroundDefaults,
    pub camera: CameraDefaults,
    pub lighting: LightingDefaults,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RandomizationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_range_fails_fast() {
        let mut config = RandomizationConfig::default();
        config.physics.restitution = ValueRange::new(0.9, 0.2);

        let err = config.validate().unwrap_err();
        match err {
            SynthForgeError::InvalidRange { name, min, max } => {
                assert_eq!(name, "physics.restitution");
                assert_eq!(min, 0.9);
                assert_eq!(max, 0.2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_degenerate_range_samples_its_value() {
        let range = ValueRange::new(2.5, 2.5);
        assert!(range.validate("degenerate").is_ok());

        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(range.sample(&mut rng), 2.5);
    }
}
