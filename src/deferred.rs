//! Deferred-execution fallback for environments that cannot author
//! documents for the consuming simulator directly.
//!
//! When the caller needs the output in the simulator's native scene format
//! rather than this crate's, and that backend is only available inside the
//! simulator's own Python environment, authoring can be deferred: the
//! parameter data is written out as a JSON manifest next to a generated
//! script that performs the equivalent authoring when run where the
//! backend exists. Data and intent are preserved even though execution
//! moves elsewhere.

use crate::analysis::SceneAnalysis;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "variant_manifest.json";
const SCRIPT_FILE: &str = "build_variants.py";

/// Everything the deferred script needs: the base analysis for topology,
/// the variations for override layers, and where to put the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeferredManifest {
    pub base: SceneAnalysis,
    pub variations: Vec<SceneAnalysis>,
    pub output: String,
}

/// Paths of an emitted deferred-authoring bundle.
#[derive(Debug, Clone)]
pub struct DeferredBundle {
    pub manifest: PathBuf,
    pub script: PathBuf,
}

/// Writes a deferred-authoring bundle into `dir`.
///
/// The manifest carries the full parameter data; the script rebuilds the
/// same topology-plus-variants document against the simulator's USD
/// backend. Returns the paths written.
pub fn write_deferred_bundle(
    dir: &Path,
    base: &SceneAnalysis,
    variations: &[SceneAnalysis],
    output_identity: &str,
) -> Result<DeferredBundle> {
    base.validate()?;
    std::fs::create_dir_all(dir)?;

    log::warn!(
        "Scene backend not reachable here; emitting deferred bundle to {}",
        dir.display()
    );

    let manifest_path = dir.join(MANIFEST_FILE);
    let manifest = DeferredManifest {
        base: base.clone(),
        variations: variations.to_vec(),
        output: output_identity.to_string(),
    };
    std::fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;

    let script_path = dir.join(SCRIPT_FILE);
    let script = BUILDER_TEMPLATE.replace("__MANIFEST_FILE__", MANIFEST_FILE);
    std::fs::write(&script_path, script)?;

    log::info!("Deferred builder script created: {}", script_path.display());
    Ok(DeferredBundle {
        manifest: manifest_path,
        script: script_path,
    })
}

/// Python builder executed inside the simulator environment. Mirrors the
/// direct authoring pass: static topology once, one variant-set edit per
/// variation, default selection, save.
const BUILDER_TEMPLATE: &str = r#""""Deferred variant-scene authoring.

Auto-generated; run inside an environment that provides the pxr USD
libraries (e.g. the simulator's bundled python).
"""
import json
import os

from pxr import Usd, UsdGeom, UsdPhysics, UsdLux, Gf, Sdf

HERE = os.path.dirname(os.path.abspath(__file__))
MANIFEST_PATH = os.path.join(HERE, "__MANIFEST_FILE__")

CYLINDER_HINTS = ("cup", "mug", "cylinder", "bottle", "can", "saucer", "plate", "disk")
CUBE_HINTS = ("box", "cube", "table", "block", "brick", "monitor", "screen")


def vec3(data, default=(0.0, 0.0, 0.0)):
    data = data or {}
    return Gf.Vec3f(
        data.get("x", default[0]),
        data.get("y", default[1]),
        data.get("z", default[2]),
    )


def define_shape(stage, path, obj):
    kind = obj.get("type", "")
    if kind == "sphere":
        return UsdGeom.Sphere.Define(stage, path)
    if kind == "cube":
        return UsdGeom.Cube.Define(stage, path)
    if kind == "cylinder":
        return UsdGeom.Cylinder.Define(stage, path)
    name = obj.get("id", "").lower()
    if any(hint in name for hint in CYLINDER_HINTS):
        return UsdGeom.Cylinder.Define(stage, path)
    if any(hint in name for hint in CUBE_HINTS):
        return UsdGeom.Cube.Define(stage, path)
    return UsdGeom.Sphere.Define(stage, path)


def author_topology(stage, base):
    ground = UsdGeom.Mesh.Define(stage, "/World/Ground")
    half = 5.0
    ground.CreatePointsAttr([
        Gf.Vec3f(-half, 0, -half),
        Gf.Vec3f(half, 0, -half),
        Gf.Vec3f(half, 0, half),
        Gf.Vec3f(-half, 0, half),
    ])
    ground.CreateFaceVertexCountsAttr([4])
    ground.CreateFaceVertexIndicesAttr([0, 1, 2, 3])
    ground.CreateNormalsAttr([Gf.Vec3f(0, 1, 0)] * 4)
    UsdPhysics.CollisionAPI.Apply(ground.GetPrim())

    for obj in base.get("scene_composition", {}).get("objects", []):
        path = "/World/%s" % obj.get("id")
        define_shape(stage, path, obj)
        prim = stage.GetPrimAtPath(path)
        UsdPhysics.RigidBodyAPI.Apply(prim)
        UsdPhysics.CollisionAPI.Apply(prim)
        UsdPhysics.MassAPI.Apply(prim)
        UsdPhysics.MaterialAPI.Apply(prim)

    UsdLux.DomeLight.Define(stage, "/World/DomeLight")
    UsdLux.SphereLight.Define(stage, "/World/KeyLight")
    UsdGeom.Camera.Define(stage, "/World/Camera")
    scene = UsdPhysics.Scene.Define(stage, "/World/PhysicsScene")
    scene.CreateGravityDirectionAttr().Set(Gf.Vec3f(0.0, -1.0, 0.0))


def author_overrides(stage, data):
    physics = data.get("physics_estimation", {})
    lighting = data.get("lighting_conditions", {})

    gravity = physics.get("gravity", {"y": -9.81})
    scene_prim = stage.GetPrimAtPath("/World/PhysicsScene")
    scene_prim.GetAttribute("physics:gravityMagnitude").Set(abs(gravity.get("y", -9.81)))

    physics_map = {obj.get("id"): obj for obj in physics.get("objects", [])}
    for obj in data.get("scene_composition", {}).get("objects", []):
        prim = stage.GetPrimAtPath("/World/%s" % obj.get("id"))
        if not prim.IsValid():
            continue

        xform = UsdGeom.Xformable(prim)
        xform.ClearXformOpOrder()
        xform.AddTranslateOp().Set(Gf.Vec3d(vec3(obj.get("position"))))
        xform.AddRotateXYZOp().Set(vec3(obj.get("rotation")))
        xform.AddScaleOp().Set(vec3(obj.get("scale"), (1.0, 1.0, 1.0)))

        props = physics_map.get(obj.get("id"), {})
        UsdPhysics.MassAPI(prim).GetMassAttr().Set(props.get("mass", 1.0))
        material = UsdPhysics.MaterialAPI(prim)
        material.CreateStaticFrictionAttr().Set(props.get("static_friction", 0.5))
        material.CreateDynamicFrictionAttr().Set(props.get("dynamic_friction", 0.5))
        material.CreateRestitutionAttr().Set(props.get("restitution", 0.5))
        velocity = vec3(props.get("initial_velocity"))
        UsdPhysics.RigidBodyAPI(prim).GetVelocityAttr().Set(velocity)

        if obj.get("material"):
            color = obj["material"].get("base_color", {})
            UsdGeom.Gprim(prim).GetDisplayColorAttr().Set([
                Gf.Vec3f(color.get("r", 1.0), color.get("g", 1.0), color.get("b", 1.0))
            ])

    dome = lighting.get("dome_light", {})
    dome_light = UsdLux.DomeLight(stage.GetPrimAtPath("/World/DomeLight"))
    dome_light.GetIntensityAttr().Set(dome.get("intensity", 1000.0))

    key = lighting.get("key_light", {})
    key_prim = stage.GetPrimAtPath("/World/KeyLight")
    UsdLux.SphereLight(key_prim).GetIntensityAttr().Set(key.get("intensity", 5000.0))
    key_xform = UsdGeom.Xformable(key_prim)
    key_xform.ClearXformOpOrder()
    key_xform.AddTranslateOp().Set(Gf.Vec3d(vec3(key.get("position"), (5.0, 5.0, 5.0))))

    camera_data = data.get("camera_estimation", {})
    camera = UsdGeom.Camera(stage.GetPrimAtPath("/World/Camera"))
    camera.CreateFocalLengthAttr(camera_data.get("focal_length", 50.0))
    cam_xform = UsdGeom.Xformable(camera.GetPrim())
    cam_xform.ClearXformOpOrder()
    cam_xform.AddTranslateOp().Set(Gf.Vec3d(vec3(camera_data.get("position"), (0.0, 1.5, 3.0))))


def main():
    with open(MANIFEST_PATH, "r") as handle:
        manifest = json.load(handle)

    output = manifest["output"]
    existing = Sdf.Layer.Find(output)
    if existing:
        existing.Clear()
        stage = Usd.Stage.Open(existing)
    else:
        stage = Usd.Stage.CreateNew(output)

    UsdGeom.SetStageUpAxis(stage, UsdGeom.Tokens.y)
    UsdGeom.SetStageMetersPerUnit(stage, 1.0)
    root = UsdGeom.Xform.Define(stage, "/World").GetPrim()
    stage.SetDefaultPrim(root)

    author_topology(stage, manifest["base"])

    variant_set = root.GetVariantSets().AddVariantSet("SimulationVariant")
    for index, variation in enumerate(manifest["variations"]):
        name = "Variation_%03d" % index
        variant_set.AddVariant(name)
        variant_set.SetVariantSelection(name)
        with variant_set.GetVariantEditContext():
            author_overrides(stage, variation)

    if manifest["variations"]:
        variant_set.SetVariantSelection("Variation_000")

    stage.Save()
    print("Saved variant scene: %s" % output)


if __name__ == "__main__":
    main()
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{PhysicsObject, SceneObject};
    use crate::math::Vec3;

    fn base_analysis() -> SceneAnalysis {
        let mut analysis = SceneAnalysis::default();
        analysis.scene_composition.objects.push(SceneObject {
            id: "ball".into(),
            kind: "sphere".into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            material: None,
        });
        analysis
            .physics_estimation
            .objects
            .push(PhysicsObject::default());
        analysis
    }

    #[test]
    fn test_bundle_round_trips_the_data() {
        let dir = tempfile::tempdir().unwrap();
        let base = base_analysis();

        let bundle =
            write_deferred_bundle(dir.path(), &base, &[base.clone()], "out/scene.usd").unwrap();

        let manifest: DeferredManifest =
            serde_json::from_str(&std::fs::read_to_string(&bundle.manifest).unwrap()).unwrap();
        assert_eq!(manifest.base, base);
        assert_eq!(manifest.variations.len(), 1);
        assert_eq!(manifest.output, "out/scene.usd");

        let script = std::fs::read_to_string(&bundle.script).unwrap();
        assert!(script.contains("variant_manifest.json"));
        assert!(script.contains("SimulationVariant"));
        assert!(!script.contains("__MANIFEST_FILE__"));
    }

    #[test]
    fn test_bundle_rejects_invalid_base() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_deferred_bundle(dir.path(), &SceneAnalysis::default(), &[], "scene.usd")
            .unwrap_err();
        assert!(err.to_string().contains("scene_composition"));
    }
}
