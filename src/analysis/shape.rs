//! Shape resolution for scene objects.

/// Substrings that suggest a roughly cylindrical silhouette.
const CYLINDER_HINTS: [&str; 8] = [
    "cup", "mug", "cylinder", "bottle", "can", "saucer", "plate", "disk",
];

/// Substrings that suggest a box-like silhouette.
const CUBE_HINTS: [&str; 7] = [
    "box", "cube", "table", "block", "brick", "monitor", "screen",
];

/// Concrete placeholder shape authored for a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Sphere,
    Cube,
    Cylinder,
}

impl ShapeKind {
    /// Total mapping from the model's raw shape label to a concrete shape.
    ///
    /// Resolution stages, in order: exact match on the label; substring
    /// heuristics on the lowercased object id for unrecognized labels
    /// (e.g. "mesh"); sphere as the final fallback, logged at warning
    /// level since the placeholder geometry is then a guess.
    pub fn resolve(kind: &str, id: &str) -> Self {
        match kind {
            "sphere" => Self::Sphere,
            "cube" => Self::Cube,
            "cylinder" => Self::Cylinder,
            _ => {
                let name = id.to_lowercase();
                if CYLINDER_HINTS.iter().any(|hint| name.contains(hint)) {
                    Self::Cylinder
                } else if CUBE_HINTS.iter().any(|hint| name.contains(hint)) {
                    Self::Cube
                } else {
                    log::warn!("Unknown object type '{kind}' for {id}. Defaulting to sphere.");
                    Self::Sphere
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_labels() {
        assert_eq!(ShapeKind::resolve("sphere", "anything"), ShapeKind::Sphere);
        assert_eq!(ShapeKind::resolve("cube", "anything"), ShapeKind::Cube);
        assert_eq!(
            ShapeKind::resolve("cylinder", "anything"),
            ShapeKind::Cylinder
        );
    }

    #[test]
    fn test_id_heuristics_for_unknown_labels() {
        assert_eq!(
            ShapeKind::resolve("mesh", "wooden_cup_1"),
            ShapeKind::Cylinder
        );
        assert_eq!(ShapeKind::resolve("mesh", "side_table"), ShapeKind::Cube);
        assert_eq!(ShapeKind::resolve("mesh", "Saucer_A"), ShapeKind::Cylinder);
    }

    #[test]
    fn test_sphere_fallback() {
        assert_eq!(ShapeKind::resolve("mesh", "blob_42"), ShapeKind::Sphere);
        assert_eq!(ShapeKind::resolve("", "thing"), ShapeKind::Sphere);
    }

    #[test]
    fn test_exact_label_wins_over_id_hint() {
        // The id suggests a cylinder, but the label is authoritative.
        assert_eq!(ShapeKind::resolve("sphere", "cup_3"), ShapeKind::Sphere);
    }
}
