//! Typed parameter-set tree extracted from a video.
//!
//! A [`SceneAnalysis`] is the unit of variation: one fully specified
//! description of a scene instance, either the base analysis produced by the
//! vision model or one of its randomized variants. It is deserialized and
//! validated exactly once, at the boundary where model output enters the
//! crate; downstream components treat it as immutable and never re-validate.

mod camera;
mod lighting;
mod physics;
mod scene;
mod shape;
pub(crate) mod wire;

pub use camera::CameraEstimation;
pub use lighting::{DomeLightParams, KeyLightParams, LightingConditions};
pub use physics::{PhysicsEstimation, PhysicsObject};
pub use scene::{ObjectMaterial, SceneComposition, SceneObject};
pub use shape::ShapeKind;

use crate::error::{Result, SynthForgeError};
use serde::{Deserialize, Serialize};

/// One fully specified numeric/categorical description of a scene instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneAnalysis {
    #[serde(default)]
    pub scene_composition: SceneComposition,

    #[serde(default)]
    pub physics_estimation: PhysicsEstimation,

    #[serde(default)]
    pub lighting_conditions: LightingConditions,

    #[serde(default)]
    pub camera_estimation: CameraEstimation,

    /// Index assigned by the randomizer; absent on the base analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<u32>,
}

impl SceneAnalysis {
    /// Parses and validates raw model output in one step.
    pub fn from_json(raw: &str) -> Result<Self> {
        let analysis: Self = serde_json::from_str(raw)?;
        analysis.validate()?;
        Ok(analysis)
    }

    /// Checks the caller contract: both required sections must be present
    /// and list at least one object. Anything softer (unmatched ids,
    /// missing materials, odd shape labels) is handled downstream with
    /// defaults, not here.
    pub fn validate(&self) -> Result<()> {
        if self.scene_composition.objects.is_empty() {
            return Err(SynthForgeError::InvalidAnalysis(
                "scene_composition is missing or lists no objects".into(),
            ));
        }
        if self.physics_estimation.objects.is_empty() {
            return Err(SynthForgeError::InvalidAnalysis(
                "physics_estimation is missing or lists no objects".into(),
            ));
        }
        Ok(())
    }

    /// Looks up the physics estimate joined to a scene object id.
    pub fn physics_for(&self, id: &str) -> Option<&PhysicsObject> {
        self.physics_estimation
            .objects
            .iter()
            .find(|obj| obj.id == id)
    }
}
