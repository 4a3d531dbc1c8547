//! Shared topology authoring.

use super::{object_path, paths};
use crate::analysis::{SceneAnalysis, ShapeKind};
use crate::config::SceneDefaults;
use crate::error::Result;
use crate::math::Vec3;
use crate::stage::{AttrValue, Capability, NodePath, NodeType, Stage};

/// Authors the variant-independent structure of a scene document: ground,
/// one placeholder node per object in the base analysis, lights, camera,
/// and the physics-scene singleton.
///
/// Runs exactly once per document lifecycle; reauthoring against a
/// recycled document is the controller's job. Every object placeholder
/// gets its rigid-body, collision, mass, and physics-material capabilities
/// attached here, up front, so override passes only ever set attribute
/// values. Skipping that step makes every later physics override fail for
/// the node.
pub struct TopologyAuthor {
    defaults: SceneDefaults,
}

impl TopologyAuthor {
    pub fn new(defaults: SceneDefaults) -> Self {
        Self { defaults }
    }

    pub fn author(&self, stage: &mut Stage, base: &SceneAnalysis) -> Result<()> {
        stage.define_node(paths::WORLD, NodeType::Xform);
        stage.set_default_node(paths::WORLD)?;

        self.author_ground(stage)?;
        self.author_objects(stage, base)?;
        self.author_lights(stage)?;
        self.author_camera(stage)?;
        self.author_physics_scene(stage)?;

        log::info!(
            "Authored topology: {} nodes for {} objects",
            stage.node_count(),
            base.scene_composition.objects.len()
        );
        Ok(())
    }

    /// Fixed square quad in the horizontal plane with collision and ground
    /// friction defaults.
    fn author_ground(&self, stage: &mut Stage) -> Result<()> {
        let ground = NodePath::new(paths::GROUND);
        let half = self.defaults.ground.size / 2.0;

        stage.define_node(paths::GROUND, NodeType::Mesh);
        stage.set_attr(
            &ground,
            "points",
            AttrValue::Vec3Array(vec![
                Vec3::new(-half, 0.0, -half),
                Vec3::new(half, 0.0, -half),
                Vec3::new(half, 0.0, half),
                Vec3::new(-half, 0.0, half),
            ]),
        )?;
        stage.set_attr(&ground, "faceVertexCounts", AttrValue::IntArray(vec![4]))?;
        stage.set_attr(
            &ground,
            "faceVertexIndices",
            AttrValue::IntArray(vec![0, 1, 2, 3]),
        )?;
        stage.set_attr(&ground, "normals", AttrValue::Vec3Array(vec![Vec3::Y; 4]))?;

        stage.apply_capability(&ground, Capability::Collision)?;
        stage.apply_capability(&ground, Capability::PhysicsMaterial)?;
        stage.set_attr(&ground, "physics:staticFriction", self.defaults.ground.static_friction)?;
        stage.set_attr(
            &ground,
            "physics:dynamicFriction",
            self.defaults.ground.dynamic_friction,
        )?;
        stage.set_attr(&ground, "physics:restitution", self.defaults.ground.restitution)?;
        Ok(())
    }

    fn author_objects(&self, stage: &mut Stage, base: &SceneAnalysis) -> Result<()> {
        for obj in &base.scene_composition.objects {
            let path = object_path(&obj.id);
            let node_type = match ShapeKind::resolve(&obj.kind, &obj.id) {
                ShapeKind::Sphere => NodeType::Sphere,
                ShapeKind::Cube => NodeType::Cube,
                ShapeKind::Cylinder => NodeType::Cylinder,
            };
            stage.define_node(path.clone(), node_type);

            stage.apply_capability(&path, Capability::RigidBody)?;
            stage.apply_capability(&path, Capability::Collision)?;
            stage.apply_capability(&path, Capability::Mass)?;
            stage.apply_capability(&path, Capability::PhysicsMaterial)?;
        }
        Ok(())
    }

    fn author_lights(&self, stage: &mut Stage) -> Result<()> {
        stage.define_node(paths::DOME_LIGHT, NodeType::DomeLight);

        let key = NodePath::new(paths::KEY_LIGHT);
        stage.define_node(paths::KEY_LIGHT, NodeType::SphereLight);
        stage.set_attr(&key, "radius", 0.5)?;
        Ok(())
    }

    fn author_camera(&self, stage: &mut Stage) -> Result<()> {
        let camera = NodePath::new(paths::CAMERA);
        stage.define_node(paths::CAMERA, NodeType::Camera);
        stage.set_attr(&camera, "focusDistance", 100.0)?;
        Ok(())
    }

    fn author_physics_scene(&self, stage: &mut Stage) -> Result<()> {
        let scene = NodePath::new(paths::PHYSICS_SCENE);
        stage.define_node(paths::PHYSICS_SCENE, NodeType::PhysicsScene);
        stage.set_attr(&scene, "physics:gravityDirection", Vec3::new(0.0, -1.0, 0.0))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{PhysicsObject, SceneObject};

    fn base_with_objects(objects: &[(&str, &str)]) -> SceneAnalysis {
        let mut analysis = SceneAnalysis::default();
        for (id, kind) in objects {
            analysis.scene_composition.objects.push(SceneObject {
                id: (*id).into(),
                kind: (*kind).into(),
                position: Vec3::ZERO,
                rotation: Vec3::ZERO,
                scale: Vec3::ONE,
                material: None,
            });
            analysis
                .physics_estimation
                .objects
                .push(PhysicsObject::default());
        }
        analysis
    }

    fn authored_stage(base: &SceneAnalysis) -> Stage {
        let mut stage = Stage::new("topology-test.json");
        TopologyAuthor::new(SceneDefaults::default())
            .author(&mut stage, base)
            .unwrap();
        stage
    }

    #[test]
    fn test_fixed_nodes_exist() {
        let stage = authored_stage(&base_with_objects(&[("ball", "sphere")]));

        for path in [
            paths::WORLD,
            paths::GROUND,
            paths::DOME_LIGHT,
            paths::KEY_LIGHT,
            paths::CAMERA,
            paths::PHYSICS_SCENE,
        ] {
            assert!(stage.has_node(&NodePath::new(path)), "missing {path}");
        }
        assert_eq!(stage.default_node().unwrap().as_str(), paths::WORLD);
        // Six fixed nodes plus one placeholder.
        assert_eq!(stage.node_count(), 7);
    }

    #[test]
    fn test_placeholder_shapes_follow_resolution() {
        let stage = authored_stage(&base_with_objects(&[
            ("ball", "sphere"),
            ("wooden_cup_1", "mesh"),
            ("side_table", "mesh"),
            ("blob_42", "mesh"),
        ]));

        let node_type =
            |id: &str| stage.node(&object_path(id)).unwrap().node_type();
        assert_eq!(node_type("ball"), NodeType::Sphere);
        assert_eq!(node_type("wooden_cup_1"), NodeType::Cylinder);
        assert_eq!(node_type("side_table"), NodeType::Cube);
        assert_eq!(node_type("blob_42"), NodeType::Sphere);
    }

    #[test]
    fn test_placeholders_carry_physics_capabilities() {
        let stage = authored_stage(&base_with_objects(&[("ball", "sphere")]));
        let ball = stage.node(&object_path("ball")).unwrap();

        for capability in [
            Capability::RigidBody,
            Capability::Collision,
            Capability::Mass,
            Capability::PhysicsMaterial,
        ] {
            assert!(ball.has_capability(capability), "missing {capability:?}");
        }
    }

    #[test]
    fn test_ground_is_a_quad_with_collision() {
        let stage = authored_stage(&base_with_objects(&[("ball", "sphere")]));
        let ground = stage.node(&NodePath::new(paths::GROUND)).unwrap();

        assert!(ground.has_capability(Capability::Collision));
        match ground.attr("points") {
            Some(AttrValue::Vec3Array(points)) => {
                assert_eq!(points.len(), 4);
                assert!(points.iter().all(|p| p.y == 0.0));
            }
            other => panic!("unexpected points attribute: {other:?}"),
        }
    }

    #[test]
    fn test_gravity_direction_is_downward() {
        let stage = authored_stage(&base_with_objects(&[("ball", "sphere")]));
        let scene = NodePath::new(paths::PHYSICS_SCENE);
        assert_eq!(
            stage.resolve_attr(&scene, "physics:gravityDirection").unwrap().as_vec3(),
            Some(Vec3::new(0.0, -1.0, 0.0))
        );
    }
}
