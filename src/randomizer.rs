//! Domain randomization: turning one analysis into many plausible variants.

use crate::analysis::{ObjectMaterial, SceneAnalysis};
use crate::config::RandomizationConfig;
use crate::error::Result;
use crate::math::{Rgb, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generates randomized variations of a base scene analysis.
///
/// Every declared range in the [`RandomizationConfig`] is resampled
/// independently and uniformly per variation; there is no cross-field
/// correlation. The base analysis is never mutated.
pub struct DomainRandomizer {
    base: SceneAnalysis,
    config: RandomizationConfig,
    rng: StdRng,
}

impl DomainRandomizer {
    /// Creates a randomizer seeded from OS entropy. Runs are not
    /// reproducible; use [`with_seed`](Self::with_seed) when they must be.
    pub fn new(base: SceneAnalysis, config: RandomizationConfig) -> Result<Self> {
        Self::build(base, config, StdRng::from_os_rng())
    }

    /// Creates a fully reproducible randomizer: the same base, config,
    /// seed, and count always yield the same variations.
    pub fn with_seed(base: SceneAnalysis, config: RandomizationConfig, seed: u64) -> Result<Self> {
        Self::build(base, config, StdRng::seed_from_u64(seed))
    }

    fn build(base: SceneAnalysis, config: RandomizationConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self { base, config, rng })
    }

    /// Generates `count` randomized variations of the base analysis.
    pub fn generate_variations(&mut self, count: usize) -> Vec<SceneAnalysis> {
        log::info!("Generating {count} scene variations");
        (0..count).map(|i| self.create_variation(i)).collect()
    }

    fn create_variation(&mut self, index: usize) -> SceneAnalysis {
        let mut variation = self.base.clone();
        variation.variation_id = Some(index as u32);

        self.randomize_materials(&mut variation);
        self.randomize_lighting(&mut variation);
        self.randomize_physics(&mut variation);
        self.randomize_camera(&mut variation);

        variation
    }

    /// Assigns every object a fresh material: color sampled in HSV and
    /// converted to RGB, plus roughness and metallic.
    fn randomize_materials(&mut self, variation: &mut SceneAnalysis) {
        let ranges = &self.config.material;
        for obj in &mut variation.scene_composition.objects {
            let hue = ranges.base_color_hue.sample(&mut self.rng);
            let saturation = ranges.base_color_saturation.sample(&mut self.rng);
            let value = ranges.base_color_value.sample(&mut self.rng);

            obj.material = Some(ObjectMaterial {
                base_color: Rgb::from_hsv(hue, saturation, value),
                roughness: ranges.roughness.sample(&mut self.rng),
                metallic: ranges.metallic.sample(&mut self.rng),
            });
        }
    }

    fn randomize_lighting(&mut self, variation: &mut SceneAnalysis) {
        let ranges = &self.config.lighting;
        let lighting = &mut variation.lighting_conditions;

        lighting.dome_light.intensity = ranges.dome_intensity.sample(&mut self.rng);
        lighting.dome_light.rotation = ranges.dome_rotation.sample(&mut self.rng);

        lighting.key_light.intensity = ranges.key_light_intensity.sample(&mut self.rng);
        lighting.key_light.position = Vec3::new(
            ranges.key_light_position_x.sample(&mut self.rng),
            ranges.key_light_position_y.sample(&mut self.rng),
            ranges.key_light_position_z.sample(&mut self.rng),
        );
        lighting.key_light.color_temperature = ranges.color_temperature.sample(&mut self.rng);
    }

    /// Friction and restitution are resampled outright; mass and initial
    /// velocity are scaled by multiplicative factors so the base estimate
    /// stays the anchor.
    fn randomize_physics(&mut self, variation: &mut SceneAnalysis) {
        let ranges = &self.config.physics;
        for obj in &mut variation.physics_estimation.objects {
            obj.static_friction = ranges.static_friction.sample(&mut self.rng);
            obj.dynamic_friction = ranges.dynamic_friction.sample(&mut self.rng);
            obj.restitution = ranges.restitution.sample(&mut self.rng);
            obj.mass *= ranges.mass_multiplier.sample(&mut self.rng);
            obj.initial_velocity *= ranges.initial_velocity_scale.sample(&mut self.rng);
        }
    }

    fn randomize_camera(&mut self, variation: &mut SceneAnalysis) {
        let ranges = &self.config.camera;
        let camera = &mut variation.camera_estimation;

        camera.position += Vec3::new(
            ranges.position_offset_x.sample(&mut self.rng),
            ranges.position_offset_y.sample(&mut self.rng),
            ranges.position_offset_z.sample(&mut self.rng),
        );
        camera.focal_length = ranges.focal_length.sample(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{PhysicsObject, SceneObject};
    use crate::config::ValueRange;

    fn base_analysis() -> SceneAnalysis {
        let mut analysis = SceneAnalysis::default();
        analysis.scene_composition.objects.push(SceneObject {
            id: "ball".into(),
            kind: "sphere".into(),
            position: Vec3::new(0.0, 1.5, 0.0),
            rotation: Vec3::ZERO,
            scale: Vec3::splat(0.1),
            material: None,
        });
        analysis.physics_estimation.objects.push(PhysicsObject {
            id: "ball".into(),
            mass: 0.1,
            initial_velocity: Vec3::new(2.0, 0.0, 0.0),
            ..PhysicsObject::default()
        });
        analysis
    }

    #[test]
    fn test_base_is_left_untouched() {
        let base = base_analysis();
        let mut randomizer =
            DomainRandomizer::with_seed(base.clone(), RandomizationConfig::default(), 1).unwrap();
        randomizer.generate_variations(3);

        assert!(base.scene_composition.objects[0].material.is_none());
        assert_eq!(base.physics_estimation.objects[0].mass, 0.1);
    }

    #[test]
    fn test_variations_are_stamped_and_materialized() {
        let mut randomizer =
            DomainRandomizer::with_seed(base_analysis(), RandomizationConfig::default(), 2)
                .unwrap();
        let variations = randomizer.generate_variations(4);

        assert_eq!(variations.len(), 4);
        for (i, variation) in variations.iter().enumerate() {
            assert_eq!(variation.variation_id, Some(i as u32));
            assert!(variation.scene_composition.objects[0].material.is_some());
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = RandomizationConfig::default();
        let mut a = DomainRandomizer::with_seed(base_analysis(), config, 42).unwrap();
        let mut b = DomainRandomizer::with_seed(base_analysis(), config, 42).unwrap();

        assert_eq!(a.generate_variations(5), b.generate_variations(5));
    }

    #[test]
    fn test_different_seeds_diverge() {
        let config = RandomizationConfig::default();
        let mut a = DomainRandomizer::with_seed(base_analysis(), config, 1).unwrap();
        let mut b = DomainRandomizer::with_seed(base_analysis(), config, 2).unwrap();

        assert_ne!(a.generate_variations(1), b.generate_variations(1));
    }

    #[test]
    fn test_invalid_range_fails_at_construction() {
        let mut config = RandomizationConfig::default();
        config.material.roughness = ValueRange::new(0.9, 0.1);
        assert!(DomainRandomizer::with_seed(base_analysis(), config, 0).is_err());
    }

    #[test]
    fn test_range_containment_over_many_samples() {
        let config = RandomizationConfig::default();
        let mut randomizer = DomainRandomizer::with_seed(base_analysis(), config, 7).unwrap();

        for variation in randomizer.generate_variations(10_000) {
            let material = variation.scene_composition.objects[0]
                .material
                .expect("randomizer assigns a material");
            let ranges = &config.material;
            assert!(
                material.roughness >= ranges.roughness.min
                    && material.roughness <= ranges.roughness.max
            );
            assert!(
                material.metallic >= ranges.metallic.min
                    && material.metallic <= ranges.metallic.max
            );

            let physics = &variation.physics_estimation.objects[0];
            let p = &config.physics;
            assert!(
                physics.static_friction >= p.static_friction.min
                    && physics.static_friction <= p.static_friction.max
            );
            assert!(
                physics.dynamic_friction >= p.dynamic_friction.min
                    && physics.dynamic_friction <= p.dynamic_friction.max
            );
            assert!(
                physics.restitution >= p.restitution.min
                    && physics.restitution <= p.restitution.max
            );
            // Mass is base * multiplier; check the implied multiplier.
            let multiplier = physics.mass / 0.1;
            assert!(
                multiplier >= p.mass_multiplier.min - 1e-4
                    && multiplier <= p.mass_multiplier.max + 1e-4
            );

            let lighting = &variation.lighting_conditions;
            let l = &config.lighting;
            assert!(
                lighting.dome_light.intensity >= l.dome_intensity.min
                    && lighting.dome_light.intensity <= l.dome_intensity.max
            );
            assert!(
                lighting.key_light.position.y >= l.key_light_position_y.min
                    && lighting.key_light.position.y <= l.key_light_position_y.max
            );

            let camera = &variation.camera_estimation;
            let c = &config.camera;
            assert!(
                camera.focal_length >= c.focal_length.min
                    && camera.focal_length <= c.focal_length.max
            );
            // Offsets are applied to the default base position (0, 1.5, 3).
            assert!(
                camera.position.x >= c.position_offset_x.min
                    && camera.position.x <= c.position_offset_x.max
            );
        }
    }
}
