//! In-memory scene-description backend.
//!
//! A [`Stage`] is a hierarchical document of typed nodes addressed by
//! slash-separated paths, with attachable capability markers, typed
//! attributes, ordered transform-op stacks, and variant sets: named,
//! mutually exclusive override layers applied on top of the shared node
//! structure. Documents are keyed by a caller-supplied identity (their
//! save path) and live in a [`StageCache`] working set while open.
//!
//! Attribute and transform writes route through the stage's *edit target*:
//! with no target active they land on the shared layer, inside a variant
//! edit scope they land on that variant's sparse override layer. Reads go
//! the other way, preferring the override layer of each variant set's
//! active selection.

mod cache;
mod node;
mod path;
mod value;
mod xform;

pub use cache::StageCache;
pub use node::{Capability, Node, NodeType};
pub use path::NodePath;
pub use value::AttrValue;
pub use xform::{XformOp, compose};

use crate::error::{Result, SynthForgeError};
use crate::math::Mat4;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Vertical axis of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpAxis {
    #[default]
    Y,
    Z,
}

/// Sparse per-variant overrides for one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeOverride {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attrs: BTreeMap<String, AttrValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    xform_ops: Option<Vec<XformOp>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Variant {
    name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    overrides: BTreeMap<NodePath, NodeOverride>,
}

/// An ordered set of mutually exclusive named alternatives attached to the
/// document. At most one alternative is selected at a time; its overrides
/// shadow the shared layer during resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSet {
    name: String,
    variants: Vec<Variant>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    selection: Option<String>,
}

#[derive(Debug, Clone)]
struct EditTarget {
    set: String,
    variant: String,
}

/// One scene document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    identity: String,
    up_axis: UpAxis,
    meters_per_unit: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_node: Option<NodePath>,

    nodes: BTreeMap<NodePath, Node>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    variant_sets: Vec<VariantSet>,

    #[serde(skip)]
    edit_target: Option<EditTarget>,
}

impl Stage {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            up_axis: UpAxis::Y,
            meters_per_unit: 1.0,
            default_node: None,
            nodes: BTreeMap::new(),
            variant_sets: Vec::new(),
            edit_target: None,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn set_identity(&mut self, identity: impl Into<String>) {
        self.identity = identity.into();
    }

    pub fn up_axis(&self) -> UpAxis {
        self.up_axis
    }

    pub fn set_up_axis(&mut self, axis: UpAxis) {
        self.up_axis = axis;
    }

    pub fn meters_per_unit(&self) -> f32 {
        self.meters_per_unit
    }

    pub fn set_meters_per_unit(&mut self, scale: f32) {
        self.meters_per_unit = scale;
    }

    /// Drops all authored content while keeping the identity, so the
    /// document can be reauthored from scratch.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.variant_sets.clear();
        self.default_node = None;
        self.edit_target = None;
        self.up_axis = UpAxis::Y;
        self.meters_per_unit = 1.0;
    }

    // -- Nodes -----------------------------------------------------------

    /// Creates a node, or returns the existing one if the path is already
    /// defined with the same type. Redefining with a different type
    /// replaces the node.
    pub fn define_node(&mut self, path: impl Into<NodePath>, node_type: NodeType) -> &mut Node {
        let path = path.into();
        let node = self
            .nodes
            .entry(path)
            .or_insert_with(|| Node::new(node_type));
        if node.node_type() != node_type {
            *node = Node::new(node_type);
        }
        node
    }

    pub fn node(&self, path: &NodePath) -> Option<&Node> {
        self.nodes.get(path)
    }

    pub fn has_node(&self, path: &NodePath) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_paths(&self) -> impl Iterator<Item = &NodePath> {
        self.nodes.keys()
    }

    pub fn default_node(&self) -> Option<&NodePath> {
        self.default_node.as_ref()
    }

    pub fn set_default_node(&mut self, path: impl Into<NodePath>) -> Result<()> {
        let path = path.into();
        if !self.nodes.contains_key(&path) {
            return Err(SynthForgeError::NodeNotFound(path.to_string()));
        }
        self.default_node = Some(path);
        Ok(())
    }

    /// Attaches a capability marker to the shared layer of a node.
    /// Capabilities are topology, not values: adding one inside a variant
    /// edit scope is a stage misuse error.
    pub fn apply_capability(&mut self, path: &NodePath, capability: Capability) -> Result<()> {
        if self.edit_target.is_some() {
            return Err(SynthForgeError::Stage(format!(
                "capability {capability:?} cannot be applied inside a variant edit scope ({path})"
            )));
        }
        let node = self
            .nodes
            .get_mut(path)
            .ok_or_else(|| SynthForgeError::NodeNotFound(path.to_string()))?;
        node.apply_capability(capability);
        Ok(())
    }

    // -- Attribute and transform writes ----------------------------------

    /// Sets an attribute on the node, routed to the active edit target.
    ///
    /// The node must exist and must already carry the capability gating
    /// the attribute (if any); override passes only ever set values.
    pub fn set_attr(
        &mut self,
        path: &NodePath,
        name: &str,
        value: impl Into<AttrValue>,
    ) -> Result<()> {
        self.check_writable(path, name)?;
        let value = value.into();
        match self.edit_target.clone() {
            Some(target) => {
                let variant = self.variant_mut(&target.set, &target.variant)?;
                variant
                    .overrides
                    .entry(path.clone())
                    .or_default()
                    .attrs
                    .insert(name.to_string(), value);
            }
            None => {
                let node = self
                    .nodes
                    .get_mut(path)
                    .ok_or_else(|| SynthForgeError::NodeNotFound(path.to_string()))?;
                node.set_attr(name, value);
            }
        }
        Ok(())
    }

    /// Replaces the node's transform-op stack, routed to the active edit
    /// target.
    pub fn set_xform_ops(&mut self, path: &NodePath, ops: Vec<XformOp>) -> Result<()> {
        if !self.nodes.contains_key(path) {
            return Err(SynthForgeError::NodeNotFound(path.to_string()));
        }
        match self.edit_target.clone() {
            Some(target) => {
                let variant = self.variant_mut(&target.set, &target.variant)?;
                variant.overrides.entry(path.clone()).or_default().xform_ops = Some(ops);
            }
            None => {
                let node = self
                    .nodes
                    .get_mut(path)
                    .ok_or_else(|| SynthForgeError::NodeNotFound(path.to_string()))?;
                node.set_xform_ops(ops);
            }
        }
        Ok(())
    }

    fn check_writable(&self, path: &NodePath, attribute: &str) -> Result<()> {
        let node = self
            .nodes
            .get(path)
            .ok_or_else(|| SynthForgeError::NodeNotFound(path.to_string()))?;
        if let Some(capability) = Capability::required_for(attribute) {
            if !node.has_capability(capability) {
                return Err(SynthForgeError::MissingCapability {
                    path: path.to_string(),
                    attribute: attribute.to_string(),
                    capability,
                });
            }
        }
        Ok(())
    }

    // -- Variant sets ----------------------------------------------------

    /// Declares a variant set on the document. Re-declaring an existing
    /// set is a no-op.
    pub fn add_variant_set(&mut self, name: &str) {
        if self.variant_set(name).is_none() {
            self.variant_sets.push(VariantSet {
                name: name.to_string(),
                variants: Vec::new(),
                selection: None,
            });
        }
    }

    /// Registers a named alternative in a variant set. Re-registering an
    /// existing name is a no-op.
    pub fn add_variant(&mut self, set: &str, variant: &str) -> Result<()> {
        let set = self
            .variant_sets
            .iter_mut()
            .find(|s| s.name == set)
            .ok_or_else(|| SynthForgeError::VariantSetNotFound(set.to_string()))?;
        if !set.variants.iter().any(|v| v.name == variant) {
            set.variants.push(Variant {
                name: variant.to_string(),
                overrides: BTreeMap::new(),
            });
        }
        Ok(())
    }

    pub fn variant_names(&self, set: &str) -> Vec<&str> {
        self.variant_set(set)
            .map(|s| s.variants.iter().map(|v| v.name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn selection(&self, set: &str) -> Option<&str> {
        self.variant_set(set)?.selection.as_deref()
    }

    pub fn set_variant_selection(&mut self, set: &str, variant: &str) -> Result<()> {
        let set = self
            .variant_sets
            .iter_mut()
            .find(|s| s.name == set)
            .ok_or_else(|| SynthForgeError::VariantSetNotFound(set.to_string()))?;
        if !set.variants.iter().any(|v| v.name == variant) {
            return Err(SynthForgeError::VariantNotFound {
                set: set.name.clone(),
                variant: variant.to_string(),
            });
        }
        set.selection = Some(variant.to_string());
        Ok(())
    }

    /// Runs `f` with the edit target pointed at the given alternative, so
    /// every write inside belongs only to that alternative. The previous
    /// target is restored on exit whether or not `f` succeeds.
    pub fn with_variant_edit<F>(&mut self, set: &str, variant: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Stage) -> Result<()>,
    {
        // Validate up front so a typo'd target fails before any writes.
        self.variant_mut(set, variant)?;

        let previous = self.edit_target.take();
        self.edit_target = Some(EditTarget {
            set: set.to_string(),
            variant: variant.to_string(),
        });
        let result = f(self);
        self.edit_target = previous;
        result
    }

    fn variant_set(&self, name: &str) -> Option<&VariantSet> {
        self.variant_sets.iter().find(|s| s.name == name)
    }

    fn variant_mut(&mut self, set: &str, variant: &str) -> Result<&mut Variant> {
        let set_entry = self
            .variant_sets
            .iter_mut()
            .find(|s| s.name == set)
            .ok_or_else(|| SynthForgeError::VariantSetNotFound(set.to_string()))?;
        set_entry
            .variants
            .iter_mut()
            .find(|v| v.name == variant)
            .ok_or_else(|| SynthForgeError::VariantNotFound {
                set: set.to_string(),
                variant: variant.to_string(),
            })
    }

    // -- Resolution ------------------------------------------------------

    /// Resolves an attribute: the override layer of each variant set's
    /// active selection shadows the shared layer.
    pub fn resolve_attr(&self, path: &NodePath, name: &str) -> Option<&AttrValue> {
        for set in &self.variant_sets {
            let Some(selection) = &set.selection else {
                continue;
            };
            if let Some(value) = set
                .variants
                .iter()
                .find(|v| &v.name == selection)
                .and_then(|v| v.overrides.get(path))
                .and_then(|o| o.attrs.get(name))
            {
                return Some(value);
            }
        }
        self.nodes.get(path)?.attr(name)
    }

    /// Resolves the effective transform-op stack for a node.
    pub fn resolve_xform_ops(&self, path: &NodePath) -> Option<&[XformOp]> {
        for set in &self.variant_sets {
            let Some(selection) = &set.selection else {
                continue;
            };
            if let Some(ops) = set
                .variants
                .iter()
                .find(|v| &v.name == selection)
                .and_then(|v| v.overrides.get(path))
                .and_then(|o| o.xform_ops.as_deref())
            {
                return Some(ops);
            }
        }
        self.nodes.get(path).map(|n| n.xform_ops())
    }

    /// Composes the effective local transform of a node.
    pub fn resolve_xform(&self, path: &NodePath) -> Mat4 {
        self.resolve_xform_ops(path)
            .map(compose)
            .unwrap_or(Mat4::IDENTITY)
    }

    // -- Persistence -----------------------------------------------------

    /// Writes the document to its identity path, creating parent
    /// directories as needed. Returns the path written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = PathBuf::from(&self.identity);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, payload)?;
        Ok(path)
    }

    /// Loads a document from disk. Its identity is whatever was saved;
    /// callers re-identify it before inserting it into a working set under
    /// a different identity.
    pub fn load_from(path: &Path) -> Result<Self> {
        let payload = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&payload)?)
    }
}
