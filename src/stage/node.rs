//! Typed nodes and capability markers.

use super::value::AttrValue;
use super::xform::XformOp;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Schema type of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Xform,
    Mesh,
    Sphere,
    Cube,
    Cylinder,
    DomeLight,
    SphereLight,
    Camera,
    PhysicsScene,
}

/// Attachable role marker. A capability must exist on a node before any
/// attribute it gates can be set; override passes only ever set values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    RigidBody,
    Collision,
    Mass,
    PhysicsMaterial,
}

impl Capability {
    /// Capability gating an attribute, if any. Ungated attributes may be
    /// set on any node.
    pub fn required_for(attribute: &str) -> Option<Self> {
        match attribute {
            "physics:mass" => Some(Self::Mass),
            "physics:velocity" => Some(Self::RigidBody),
            "physics:staticFriction" | "physics:dynamicFriction" | "physics:restitution" => {
                Some(Self::PhysicsMaterial)
            }
            _ => None,
        }
    }
}

/// One node of the shared topology. Attribute values stored here are the
/// shared (variant-independent) layer; variant-scoped values live in the
/// owning stage's variant sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    node_type: NodeType,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    capabilities: BTreeSet<Capability>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attrs: BTreeMap<String, AttrValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    xform_ops: Vec<XformOp>,
}

impl Node {
    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            capabilities: BTreeSet::new(),
            attrs: BTreeMap::new(),
            xform_ops: Vec::new(),
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn apply_capability(&mut self, capability: Capability) {
        self.capabilities.insert(capability);
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub(crate) fn set_attr(&mut self, name: &str, value: AttrValue) {
        self.attrs.insert(name.to_string(), value);
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    pub(crate) fn set_xform_ops(&mut self, ops: Vec<XformOp>) {
        self.xform_ops = ops;
    }

    pub fn xform_ops(&self) -> &[XformOp] {
        &self.xform_ops
    }
}
