//! Per-variant override authoring.

use super::{object_path, paths};
use crate::analysis::{PhysicsObject, SceneAnalysis};
use crate::error::Result;
use crate::stage::{NodePath, Stage, XformOp};

/// How override values are matched to topology nodes.
///
/// The strategy is chosen once, at controller entry, from how the topology
/// came to be; the two matching rules are never mixed within one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideStrategy {
    /// Topology was generated from the same analysis family: nodes are
    /// matched to parameter objects by id.
    DirectId,
    /// Topology is hand-authored with role-prefixed node names
    /// (`Dynamic_*`, `Surface_*`, `Background_*`/`Env_*`).
    CategoryTag,
}

/// Role of a hand-authored node, encoded in its name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    /// Simulated body: receives mass and initial velocity.
    Dynamic,
    /// Contact surface: receives friction and restitution.
    Surface,
    /// Set dressing: visual override only.
    Background,
}

impl NodeCategory {
    pub fn classify(name: &str) -> Option<Self> {
        if name.starts_with("Dynamic_") {
            Some(Self::Dynamic)
        } else if name.starts_with("Surface_") {
            Some(Self::Surface)
        } else if name.starts_with("Background_") || name.starts_with("Env_") {
            Some(Self::Background)
        } else {
            None
        }
    }
}

/// Authors the value overrides for one variant.
///
/// Must run inside a variant edit scope so every write lands on that
/// variant's override layer; the author itself never touches topology.
/// Nodes referenced by the data but absent from the topology are skipped,
/// tolerating partial topologies. Missing optional data falls back to
/// documented defaults instead of failing.
pub struct OverrideAuthor {
    strategy: OverrideStrategy,
}

impl OverrideAuthor {
    pub fn new(strategy: OverrideStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> OverrideStrategy {
        self.strategy
    }

    pub fn author(&self, stage: &mut Stage, data: &SceneAnalysis) -> Result<()> {
        match self.strategy {
            OverrideStrategy::DirectId => self.author_by_id(stage, data)?,
            OverrideStrategy::CategoryTag => self.author_by_category(stage, data)?,
        }
        self.author_scene_globals(stage, data)
    }

    fn author_by_id(&self, stage: &mut Stage, data: &SceneAnalysis) -> Result<()> {
        for obj in &data.scene_composition.objects {
            let path = object_path(&obj.id);
            if !stage.has_node(&path) {
                log::debug!("No topology node for object '{}', skipping", obj.id);
                continue;
            }

            // Fixed composition order: a local point is scaled, rotated,
            // then translated. Changing this reorders every scene visually.
            stage.set_xform_ops(
                &path,
                vec![
                    XformOp::Translate(obj.position),
                    XformOp::RotateXyz(obj.rotation),
                    XformOp::Scale(obj.scale),
                ],
            )?;

            let fallback;
            let physics = match data.physics_for(&obj.id) {
                Some(matched) => matched,
                None => {
                    log::warn!(
                        "No physics estimate for object '{}', applying defaults",
                        obj.id
                    );
                    fallback = PhysicsObject::default();
                    &fallback
                }
            };
            self.set_body_physics(stage, &path, physics)?;
            self.set_contact_physics(stage, &path, physics)?;

            if let Some(material) = &obj.material {
                stage.set_attr(&path, "displayColor", material.base_color)?;
            }
        }
        Ok(())
    }

    fn author_by_category(&self, stage: &mut Stage, data: &SceneAnalysis) -> Result<()> {
        // All dynamic and surface nodes share the first physics estimate.
        // Coarse on multi-object variants, but the hand-authored names
        // carry no id to join on.
        let physics = data.physics_estimation.objects.first().cloned();
        if physics.is_none() {
            log::warn!("No physics objects in data; category overrides are visual-only");
        }

        let tagged: Vec<(NodePath, NodeCategory)> = stage
            .node_paths()
            .filter_map(|path| NodeCategory::classify(path.name()).map(|c| (path.clone(), c)))
            .collect();

        for (path, category) in tagged {
            match category {
                NodeCategory::Dynamic => {
                    if let Some(physics) = &physics {
                        self.set_body_physics(stage, &path, physics)?;
                    }
                    self.set_visual_override(stage, &path, data)?;
                }
                NodeCategory::Surface => {
                    if let Some(physics) = &physics {
                        self.set_contact_physics(stage, &path, physics)?;
                    }
                    self.set_visual_override(stage, &path, data)?;
                }
                NodeCategory::Background => {
                    self.set_visual_override(stage, &path, data)?;
                }
            }
        }
        Ok(())
    }

    fn set_body_physics(
        &self,
        stage: &mut Stage,
        path: &NodePath,
        physics: &PhysicsObject,
    ) -> Result<()> {
        stage.set_attr(path, "physics:mass", physics.mass)?;
        stage.set_attr(path, "physics:velocity", physics.initial_velocity)?;
        Ok(())
    }

    fn set_contact_physics(
        &self,
        stage: &mut Stage,
        path: &NodePath,
        physics: &PhysicsObject,
    ) -> Result<()> {
        stage.set_attr(path, "physics:staticFriction", physics.static_friction)?;
        stage.set_attr(path, "physics:dynamicFriction", physics.dynamic_friction)?;
        stage.set_attr(path, "physics:restitution", physics.restitution)?;
        Ok(())
    }

    /// Picks a material for a hand-authored node by `name length mod
    /// object count`: stable across runs, but a pseudo-assignment, not a
    /// content-aware match.
    fn set_visual_override(
        &self,
        stage: &mut Stage,
        path: &NodePath,
        data: &SceneAnalysis,
    ) -> Result<()> {
        let objects = &data.scene_composition.objects;
        if objects.is_empty() {
            return Ok(());
        }
        let index = path.name().len() % objects.len();
        if let Some(material) = &objects[index].material {
            stage.set_attr(path, "displayColor", material.base_color)?;
        }
        Ok(())
    }

    /// Variant-scoped values on the singletons: gravity strength, light
    /// parameters, camera framing. Each is skipped when its node is absent.
    fn author_scene_globals(&self, stage: &mut Stage, data: &SceneAnalysis) -> Result<()> {
        let scene = NodePath::new(paths::PHYSICS_SCENE);
        if stage.has_node(&scene) {
            stage.set_attr(
                &scene,
                "physics:gravityMagnitude",
                data.physics_estimation.gravity_magnitude(),
            )?;
        }

        let dome = NodePath::new(paths::DOME_LIGHT);
        if stage.has_node(&dome) {
            let params = &data.lighting_conditions.dome_light;
            stage.set_attr(&dome, "intensity", params.intensity)?;
            stage.set_attr(&dome, "rotation", params.rotation)?;
        }

        let key = NodePath::new(paths::KEY_LIGHT);
        if stage.has_node(&key) {
            let params = &data.lighting_conditions.key_light;
            stage.set_attr(&key, "intensity", params.intensity)?;
            stage.set_attr(&key, "colorTemperature", params.color_temperature)?;
            stage.set_xform_ops(&key, vec![XformOp::Translate(params.position)])?;
        }

        let camera = NodePath::new(paths::CAMERA);
        if stage.has_node(&camera) {
            let params = &data.camera_estimation;
            stage.set_attr(&camera, "focalLength", params.focal_length)?;
            stage.set_xform_ops(&camera, vec![XformOp::Translate(params.position)])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ObjectMaterial, SceneObject};
    use crate::author::TopologyAuthor;
    use crate::config::SceneDefaults;
    use crate::math::{Rgb, Vec3};
    use crate::stage::{Capability, NodeType};

    const SET: &str = "SimulationVariant";
    const VARIANT: &str = "Variation_000";

    fn analysis() -> SceneAnalysis {
        let mut data = SceneAnalysis::default();
        data.scene_composition.objects.push(SceneObject {
            id: "ball".into(),
            kind: "sphere".into(),
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Vec3::new(0.0, 90.0, 0.0),
            scale: Vec3::new(2.0, 1.0, 1.0),
            material: Some(ObjectMaterial {
                base_color: Rgb::new(0.9, 0.1, 0.1),
                ..ObjectMaterial::default()
            }),
        });
        data.scene_composition.objects.push(SceneObject {
            id: "cup".into(),
            kind: "cylinder".into(),
            position: Vec3::new(1.5, 0.5, 0.0),
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            material: None,
        });
        data.physics_estimation.objects.push(PhysicsObject {
            id: "ball".into(),
            mass: 0.1,
            initial_velocity: Vec3::new(2.0, 0.0, 0.0),
            static_friction: 0.3,
            dynamic_friction: 0.25,
            restitution: 0.7,
        });
        data
    }

    /// Topology plus a registered, selected variant ready for editing.
    fn prepared_stage(data: &SceneAnalysis) -> Stage {
        let mut stage = Stage::new("override-test.json");
        TopologyAuthor::new(SceneDefaults::default())
            .author(&mut stage, data)
            .unwrap();
        stage.add_variant_set(SET);
        stage.add_variant(SET, VARIANT).unwrap();
        stage.set_variant_selection(SET, VARIANT).unwrap();
        stage
    }

    fn author_in_variant(stage: &mut Stage, data: &SceneAnalysis, strategy: OverrideStrategy) {
        let author = OverrideAuthor::new(strategy);
        stage
            .with_variant_edit(SET, VARIANT, |s| author.author(s, data))
            .unwrap();
    }

    #[test]
    fn test_direct_mode_authors_matched_physics() {
        let data = analysis();
        let mut stage = prepared_stage(&data);
        author_in_variant(&mut stage, &data, OverrideStrategy::DirectId);

        let ball = object_path("ball");
        let resolved = |name: &str| stage.resolve_attr(&ball, name).unwrap().as_float().unwrap();
        assert_eq!(resolved("physics:mass"), 0.1);
        assert_eq!(resolved("physics:staticFriction"), 0.3);
        assert_eq!(resolved("physics:dynamicFriction"), 0.25);
        assert_eq!(resolved("physics:restitution"), 0.7);
        assert_eq!(
            stage.resolve_attr(&ball, "physics:velocity").unwrap().as_vec3(),
            Some(Vec3::new(2.0, 0.0, 0.0))
        );
        assert_eq!(
            stage.resolve_attr(&ball, "displayColor").unwrap().as_color(),
            Some(Rgb::new(0.9, 0.1, 0.1))
        );
    }

    #[test]
    fn test_direct_mode_defaults_for_unmatched_physics_id() {
        let data = analysis();
        let mut stage = prepared_stage(&data);
        author_in_variant(&mut stage, &data, OverrideStrategy::DirectId);

        // "cup" has no physics estimate: documented defaults apply.
        let cup = object_path("cup");
        let resolved = |name: &str| stage.resolve_attr(&cup, name).unwrap().as_float().unwrap();
        assert_eq!(resolved("physics:mass"), 1.0);
        assert_eq!(resolved("physics:staticFriction"), 0.5);
        assert_eq!(resolved("physics:dynamicFriction"), 0.5);
        assert_eq!(resolved("physics:restitution"), 0.5);
        assert_eq!(
            stage.resolve_attr(&cup, "physics:velocity").unwrap().as_vec3(),
            Some(Vec3::ZERO)
        );
        // No material was assigned, so no visual override either.
        assert!(stage.resolve_attr(&cup, "displayColor").is_none());
    }

    #[test]
    fn test_direct_mode_transform_order() {
        let data = analysis();
        let mut stage = prepared_stage(&data);
        author_in_variant(&mut stage, &data, OverrideStrategy::DirectId);

        // Scale (2,1,1), rotate 90 degrees about Y, translate (1,0,0):
        // the reference point (1,0,0) must land on (1,0,-2).
        let transformed = stage
            .resolve_xform(&object_path("ball"))
            .transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((transformed - Vec3::new(1.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_direct_mode_skips_objects_without_topology() {
        let mut data = analysis();
        data.scene_composition.objects.push(SceneObject {
            id: "late_addition".into(),
            kind: "sphere".into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            material: None,
        });

        // Topology authored from the original two objects only.
        let mut stage = prepared_stage(&analysis());
        author_in_variant(&mut stage, &data, OverrideStrategy::DirectId);

        assert!(!stage.has_node(&object_path("late_addition")));
    }

    #[test]
    fn test_globals_are_authored_per_variant() {
        let mut data = analysis();
        data.lighting_conditions.dome_light.intensity = 1234.0;
        data.camera_estimation.focal_length = 35.0;

        let mut stage = prepared_stage(&data);
        author_in_variant(&mut stage, &data, OverrideStrategy::DirectId);

        let dome = NodePath::new(paths::DOME_LIGHT);
        assert_eq!(
            stage.resolve_attr(&dome, "intensity").unwrap().as_float(),
            Some(1234.0)
        );
        let scene = NodePath::new(paths::PHYSICS_SCENE);
        assert_eq!(
            stage
                .resolve_attr(&scene, "physics:gravityMagnitude")
                .unwrap()
                .as_float(),
            Some(9.81)
        );
        let camera = NodePath::new(paths::CAMERA);
        assert_eq!(
            stage.resolve_attr(&camera, "focalLength").unwrap().as_float(),
            Some(35.0)
        );
    }

    #[test]
    fn test_category_classification() {
        assert_eq!(
            NodeCategory::classify("Dynamic_Ball"),
            Some(NodeCategory::Dynamic)
        );
        assert_eq!(
            NodeCategory::classify("Surface_Table"),
            Some(NodeCategory::Surface)
        );
        assert_eq!(
            NodeCategory::classify("Background_Wall"),
            Some(NodeCategory::Background)
        );
        assert_eq!(
            NodeCategory::classify("Env_Sky"),
            Some(NodeCategory::Background)
        );
        assert_eq!(NodeCategory::classify("Ground"), None);
        assert_eq!(NodeCategory::classify("dynamic_ball"), None);
    }

    /// Hand-authored base: role-prefixed nodes with capabilities attached.
    fn hand_authored_stage() -> Stage {
        let mut stage = Stage::new("hand-authored.json");
        stage.define_node("/World", NodeType::Xform);

        let ball = NodePath::new("/World/Dynamic_Ball");
        stage.define_node("/World/Dynamic_Ball", NodeType::Sphere);
        stage.apply_capability(&ball, Capability::RigidBody).unwrap();
        stage.apply_capability(&ball, Capability::Mass).unwrap();

        let table = NodePath::new("/World/Surface_Table");
        stage.define_node("/World/Surface_Table", NodeType::Cube);
        stage
            .apply_capability(&table, Capability::PhysicsMaterial)
            .unwrap();

        stage.define_node("/World/Background_Wall", NodeType::Cube);

        stage.add_variant_set(SET);
        stage.add_variant(SET, VARIANT).unwrap();
        stage.set_variant_selection(SET, VARIANT).unwrap();
        stage
    }

    #[test]
    fn test_category_mode_routes_by_prefix() {
        let data = analysis();
        let mut stage = hand_authored_stage();
        author_in_variant(&mut stage, &data, OverrideStrategy::CategoryTag);

        // Dynamic node takes mass and velocity from the first physics
        // object; no contact attributes.
        let ball = NodePath::new("/World/Dynamic_Ball");
        assert_eq!(
            stage.resolve_attr(&ball, "physics:mass").unwrap().as_float(),
            Some(0.1)
        );
        assert!(stage.resolve_attr(&ball, "physics:staticFriction").is_none());

        // Surface node takes the friction pair and restitution; no mass.
        let table = NodePath::new("/World/Surface_Table");
        assert_eq!(
            stage
                .resolve_attr(&table, "physics:staticFriction")
                .unwrap()
                .as_float(),
            Some(0.3)
        );
        assert!(stage.resolve_attr(&table, "physics:mass").is_none());
    }

    #[test]
    fn test_category_mode_visual_pseudo_assignment() {
        let data = analysis();
        let mut stage = hand_authored_stage();
        author_in_variant(&mut stage, &data, OverrideStrategy::CategoryTag);

        // "Background_Wall" is 15 characters; 15 mod 2 objects = index 1,
        // the material-less cup, so no color is authored.
        let wall = NodePath::new("/World/Background_Wall");
        assert!(stage.resolve_attr(&wall, "displayColor").is_none());

        // "Dynamic_Ball" is 12 characters; 12 mod 2 = 0, the ball's red.
        let ball = NodePath::new("/World/Dynamic_Ball");
        assert_eq!(
            stage.resolve_attr(&ball, "displayColor").unwrap().as_color(),
            Some(Rgb::new(0.9, 0.1, 0.1))
        );
    }

    #[test]
    fn test_category_mode_without_physics_objects_is_visual_only() {
        let mut data = analysis();
        data.physics_estimation.objects.clear();

        let mut stage = hand_authored_stage();
        author_in_variant(&mut stage, &data, OverrideStrategy::CategoryTag);

        let ball = NodePath::new("/World/Dynamic_Ball");
        assert!(stage.resolve_attr(&ball, "physics:mass").is_none());
        assert!(stage.resolve_attr(&ball, "displayColor").is_some());
    }
}
