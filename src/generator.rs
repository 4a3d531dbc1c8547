//! Variant stage generation: one document, many selectable variations.

use crate::analysis::SceneAnalysis;
use crate::author::{OverrideAuthor, OverrideStrategy, TopologyAuthor};
use crate::config::SceneDefaults;
use crate::error::{Result, SynthForgeError};
use crate::stage::{Stage, StageCache, UpAxis};
use std::path::{Path, PathBuf};

/// Name of the variant axis declared on every generated document.
pub const VARIANT_SET_NAME: &str = "SimulationVariant";

/// Name of the alternative at a given variant index.
pub fn variant_name(index: usize) -> String {
    format!("Variation_{index:03}")
}

/// Composes a single scene document holding every variation as a
/// selectable alternative over one shared topology.
///
/// A run walks fixed phases in order: open or recycle the target document,
/// author the shared topology once, author each variant inside its own
/// isolated edit scope, select the default alternative, persist. An error
/// in any variant aborts the whole run before anything is written; there
/// is no partially persisted document.
pub struct VariantSceneGenerator {
    defaults: SceneDefaults,
}

impl VariantSceneGenerator {
    pub fn new(defaults: SceneDefaults) -> Self {
        Self { defaults }
    }

    /// Authors a complete variant document from a base analysis.
    ///
    /// The base supplies the topology; each entry of `variations` becomes
    /// one override layer, matched to topology nodes by object id. If the
    /// working set already holds a document with this identity it is
    /// cleared and reauthored, so reruns are idempotent. Returns the path
    /// the document was persisted to.
    pub fn create_variant_stage(
        &self,
        cache: &mut StageCache,
        base: &SceneAnalysis,
        variations: &[SceneAnalysis],
        identity: &str,
    ) -> Result<PathBuf> {
        base.validate()?;
        check_backend(identity)?;

        log::info!(
            "Creating scene document with {} variants at: {identity}",
            variations.len()
        );

        let stage = cache.open_or_create(identity);
        stage.set_up_axis(UpAxis::Y);
        stage.set_meters_per_unit(1.0);

        TopologyAuthor::new(self.defaults).author(stage, base)?;
        Self::author_variants(stage, variations, OverrideStrategy::DirectId)?;

        let path = stage.save()?;
        log::info!("Saved scene document: {}", path.display());
        Ok(path)
    }

    /// Hybrid mode: grafts variant overrides onto a hand-authored base
    /// document instead of generating topology.
    ///
    /// The base is copied to the output identity first (replacing any
    /// resident document with that identity) and topology authoring is
    /// skipped entirely, since the base supplies it. Override values are
    /// matched to nodes by their role-name prefixes.
    pub fn graft_variant_stage(
        &self,
        cache: &mut StageCache,
        base_document: &Path,
        variations: &[SceneAnalysis],
        identity: &str,
    ) -> Result<PathBuf> {
        check_backend(identity)?;

        log::info!(
            "Grafting {} variants onto {} at: {identity}",
            variations.len(),
            base_document.display()
        );

        let mut base = Stage::load_from(base_document)?;
        base.set_identity(identity);
        let stage = cache.insert(base);

        Self::author_variants(stage, variations, OverrideStrategy::CategoryTag)?;

        let path = stage.save()?;
        log::info!("Saved scene document: {}", path.display());
        Ok(path)
    }

    /// Declares the variant axis and authors every variation into its own
    /// alternative. `Variation_000` ends up selected even though authoring
    /// finishes at N-1: the first consumer to open the document must see a
    /// deterministic scene.
    fn author_variants(
        stage: &mut Stage,
        variations: &[SceneAnalysis],
        strategy: OverrideStrategy,
    ) -> Result<()> {
        let author = OverrideAuthor::new(strategy);
        stage.add_variant_set(VARIANT_SET_NAME);

        for (index, data) in variations.iter().enumerate() {
            let name = variant_name(index);
            log::info!("Authoring variant: {name}");

            stage.add_variant(VARIANT_SET_NAME, &name)?;
            stage.set_variant_selection(VARIANT_SET_NAME, &name)?;
            stage
                .with_variant_edit(VARIANT_SET_NAME, &name, |s| author.author(s, data))
                .map_err(|source| SynthForgeError::VariantAuthoring {
                    index,
                    source: Box::new(source),
                })?;
        }

        if !variations.is_empty() {
            stage.set_variant_selection(VARIANT_SET_NAME, &variant_name(0))?;
        }
        Ok(())
    }
}

impl Default for VariantSceneGenerator {
    fn default() -> Self {
        Self::new(SceneDefaults::default())
    }
}

/// Native simulator formats cannot be authored from this environment; the
/// documented fallback is a deferred bundle (`deferred` module), which
/// preserves the data and intent for an environment that can.
fn check_backend(identity: &str) -> Result<()> {
    let lower = identity.to_ascii_lowercase();
    if lower.ends_with(".usd") || lower.ends_with(".usda") || lower.ends_with(".usdc") {
        return Err(SynthForgeError::BackendUnavailable(format!(
            "cannot author '{identity}' directly here; \
             emit a deferred bundle with deferred::write_deferred_bundle instead"
        )));
    }
    Ok(())
}
