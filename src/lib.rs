//! SynthForge: parametric multi-variant 3D physics scene authoring for
//! synthetic-data generation.
//!
//! A vision-language model turns a short real-world video into a typed
//! parameter set ([`SceneAnalysis`]); the [`DomainRandomizer`] perturbs it
//! into many plausible variants; the [`VariantSceneGenerator`] authors one
//! scene document holding every variant as a selectable alternative over a
//! single shared topology.
//!
//! # Architecture
//!
//! - **Boundary** ([`analyzer`]): model inference is a black box behind
//!   [`SceneModel`]; its JSON output is parsed and validated exactly once.
//! - **Variation** ([`randomizer`]): uniform, independent resampling of
//!   every declared range in a [`RandomizationConfig`].
//! - **Document** ([`stage`]): hierarchical typed nodes with capability
//!   markers, attributes, transform-op stacks, and variant sets, kept in a
//!   [`StageCache`] working set and persisted as JSON.
//! - **Authoring** ([`author`], [`generator`]): shared topology once, then
//!   one isolated override pass per variant; `Variation_000` is selected
//!   before the document is persisted.
//!
//! # Example
//!
//! ```
//! use synthforge::{
//!     DomainRandomizer, RandomizationConfig, SceneAnalysis, SceneDefaults, StageCache,
//!     VariantSceneGenerator,
//! };
//!
//! # fn run() -> synthforge::Result<()> {
//! let base = SceneAnalysis::from_json(
//!     r#"{
//!         "scene_composition": {"objects": [{"id": "ball", "type": "sphere"}]},
//!         "physics_estimation": {"objects": [{"id": "ball", "mass": 0.1}]}
//!     }"#,
//! )?;
//!
//! let mut randomizer =
//!     DomainRandomizer::with_seed(base.clone(), RandomizationConfig::default(), 42)?;
//! let variations = randomizer.generate_variations(9);
//!
//! let mut cache = StageCache::new();
//! let generator = VariantSceneGenerator::new(SceneDefaults::default());
//! generator.create_variant_stage(&mut cache, &base, &variations, "output/master_scene.json")?;
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod analyzer;
pub mod author;
pub mod config;
pub mod deferred;
pub mod error;
pub mod generator;
pub mod math;
pub mod randomizer;
pub mod stage;

pub use analysis::{
    CameraEstimation, DomeLightParams, KeyLightParams, LightingConditions, ObjectMaterial,
    PhysicsEstimation, PhysicsObject, SceneAnalysis, SceneComposition, SceneObject, ShapeKind,
};
pub use analyzer::{PHYSICS_ANALYSIS_PROMPT, SceneModel, VideoAnalyzer};
pub use author::{NodeCategory, OverrideAuthor, OverrideStrategy, TopologyAuthor};
pub use config::{RandomizationConfig, SceneDefaults, ValueRange};
pub use deferred::{DeferredBundle, DeferredManifest, write_deferred_bundle};
pub use error::{Result, SynthForgeError};
pub use generator::{VARIANT_SET_NAME, VariantSceneGenerator, variant_name};
pub use randomizer::DomainRandomizer;
pub use stage::{
    AttrValue, Capability, Node, NodePath, NodeType, Stage, StageCache, UpAxis, XformOp,
};
