//! Authoring passes over a scene document: shared topology once, then one
//! override pass per variant.

mod overrides;
mod topology;

pub use overrides::{NodeCategory, OverrideAuthor, OverrideStrategy};
pub use topology::TopologyAuthor;

use crate::stage::NodePath;

/// Well-known node paths shared by both authoring passes.
pub(crate) mod paths {
    pub const WORLD: &str = "/World";
    pub const GROUND: &str = "/World/Ground";
    pub const DOME_LIGHT: &str = "/World/DomeLight";
    pub const KEY_LIGHT: &str = "/World/KeyLight";
    pub const CAMERA: &str = "/World/Camera";
    pub const PHYSICS_SCENE: &str = "/World/PhysicsScene";
}

/// Path of the placeholder node for a scene object id.
pub(crate) fn object_path(id: &str) -> NodePath {
    NodePath::new(format!("{}/{id}", paths::WORLD))
}
