//! Vision-model boundary.
//!
//! Inference is a black box to this crate: video bytes plus a prompt go
//! in, a structured JSON string (or a failure) comes out. Everything past
//! that single call is typed; the raw payload is parsed and validated once
//! by [`SceneAnalysis::from_json`] and never re-inspected downstream.

use crate::analysis::SceneAnalysis;
use crate::error::Result;

/// Prompt sent alongside the video. Instructs the model to return only the
/// structured JSON this crate's boundary types deserialize.
pub const PHYSICS_ANALYSIS_PROMPT: &str = r#"You are a Physics Simulation Engineer specializing in 4D analysis and rigid-body simulation.

Analyze this video frame-by-frame and extract ONLY numerical/categorical data in strict JSON format.

Required output structure:
{
  "scene_composition": {
    "objects": [
      {
        "id": "unique_object_id",
        "type": "sphere/cylinder/cube/mesh",
        "position": {"x": 0.0, "y": 0.0, "z": 0.0},
        "rotation": {"x": 0.0, "y": 0.0, "z": 0.0},
        "scale": {"x": 1.0, "y": 1.0, "z": 1.0}
      }
    ]
  },
  "physics_estimation": {
    "gravity": {"x": 0.0, "y": -9.81, "z": 0.0},
    "objects": [
      {
        "id": "object_1",
        "mass": 1.0,
        "initial_velocity": {"x": 2.0, "y": 0.0, "z": 0.0},
        "restitution": 0.5,
        "static_friction": 0.3,
        "dynamic_friction": 0.25
      }
    ]
  },
  "lighting_conditions": {
    "dome_light": {"intensity": 1000.0},
    "key_light": {
      "position": {"x": 5.0, "y": 5.0, "z": 5.0},
      "intensity": 5000.0
    }
  },
  "camera_estimation": {
    "position": {"x": 0.0, "y": 1.5, "z": 3.0},
    "look_at": {"x": 0.0, "y": 0.5, "z": 0.0},
    "focal_length": 50.0
  }
}

CRITICAL RULES:
1. NO prose or descriptions - ONLY structured JSON
2. Use numerical values, not categories (e.g., mass: 1.0, not "heavy")
3. All positions in meters, all angles in degrees
4. Estimate realistic rigid-body parameters
"#;

/// A vision-language model capable of structured scene extraction.
///
/// Implementations wrap whatever inference service is in use; the call may
/// be long-running and is expected to block. Failures surface as
/// [`SynthForgeError::Inference`](crate::SynthForgeError::Inference).
pub trait SceneModel {
    /// Runs inference over raw video bytes and returns the model's JSON
    /// payload as text.
    fn infer(&self, video: &[u8], prompt: &str) -> Result<String>;
}

/// Extracts a validated [`SceneAnalysis`] from a video via a
/// [`SceneModel`].
pub struct VideoAnalyzer<M> {
    model: M,
}

impl<M: SceneModel> VideoAnalyzer<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Analyzes a video and returns the typed, validated parameter set.
    pub fn analyze(&self, video: &[u8]) -> Result<SceneAnalysis> {
        log::info!("Running physics analysis on {} bytes of video", video.len());
        let raw = self.model.infer(video, PHYSICS_ANALYSIS_PROMPT)?;
        SceneAnalysis::from_json(&raw)
    }
}
