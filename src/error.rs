//! Error types for SynthForge

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthForgeError {
    #[error("Invalid analysis: {0}")]
    InvalidAnalysis(String),

    #[error("Invalid randomization range '{name}': min {min} > max {max}")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("Failed to parse analysis JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No node at path '{0}'")]
    NodeNotFound(String),

    #[error("Attribute '{attribute}' on '{path}' requires the {capability:?} capability")]
    MissingCapability {
        path: String,
        attribute: String,
        capability: crate::stage::Capability,
    },

    #[error("Variant set '{0}' not found")]
    VariantSetNotFound(String),

    #[error("Variant '{variant}' not found in set '{set}'")]
    VariantNotFound { set: String, variant: String },

    #[error("Stage error: {0}")]
    Stage(String),

    #[error("Scene backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Authoring variant {index} failed: {source}")]
    VariantAuthoring {
        index: usize,
        #[source]
        source: Box<SynthForgeError>,
    },

    #[error("Model inference failed: {0}")]
    Inference(String),
}

pub type Result<T> = std::result::Result<T, SynthForgeError>;
