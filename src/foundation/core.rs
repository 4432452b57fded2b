pub use kurbo::{Affine, BezPath, Circle, Point, Rect, Vec2};

/// Renderer family a scene is composed for.
///
/// Both backends consume the same configuration and animation state and must
/// agree on which features are visible at every detail level; they differ in
/// how visual cost is counted (path complexity vs. mesh tessellation).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Flat 2D scalable shapes (paths, gradients).
    #[default]
    Vector,
    /// 3D primitive meshes with materials.
    Polygonal,
}

impl BackendKind {
    /// All backend kinds, in a stable order.
    pub const ALL: [BackendKind; 2] = [BackendKind::Vector, BackendKind::Polygonal];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kind_serde_is_snake_case() {
        let s = serde_json::to_string(&BackendKind::Polygonal).unwrap();
        assert_eq!(s, "\"polygonal\"");
        let de: BackendKind = serde_json::from_str("\"vector\"").unwrap();
        assert_eq!(de, BackendKind::Vector);
    }
}
