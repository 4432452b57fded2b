use crate::detail::Component;
use crate::palette::Rgb8;

/// 3D scene: primitive mesh nodes grouped per component, plus camera
/// placement passed through from the configuration.
#[derive(Clone, Debug, serde::Serialize)]
pub struct MeshScene {
    pub camera: Camera,
    /// Character root transform (model scale, idle sway, gesture offset).
    pub root_transform: Transform3,
    pub groups: Vec<MeshGroup>,
}

impl MeshScene {
    /// Total mesh nodes emitted for `component` across all groups.
    pub fn node_count(&self, component: Component) -> usize {
        self.groups
            .iter()
            .filter(|g| g.component == component)
            .map(|g| g.nodes.len())
            .sum()
    }

    pub fn find(&self, name: &str) -> Option<&MeshNode> {
        self.groups
            .iter()
            .flat_map(|g| g.nodes.iter())
            .find(|n| n.name == name)
    }
}

#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct Camera {
    pub y: f64,
    pub z: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct MeshGroup {
    pub name: &'static str,
    pub component: Component,
    /// Whether the character root transform applies to this group.
    pub attached_to_root: bool,
    pub transform: Transform3,
    pub nodes: Vec<MeshNode>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct MeshNode {
    pub name: &'static str,
    pub primitive: MeshPrimitive,
    pub material: Material,
    pub transform: Transform3,
}

/// Tessellated primitives; `segments` carries the budgeted smoothness.
#[derive(Clone, Copy, Debug, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshPrimitive {
    Sphere { radius: f64, segments: u32 },
    Capsule { radius: f64, height: f64, segments: u32 },
    Cylinder { radius: f64, height: f64, segments: u32 },
    Box3 { size: [f64; 3] },
    Plane { size: [f64; 2] },
}

#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct Material {
    pub color: Rgb8,
    /// Flat-shaded (background props) vs. smooth-shaded (character).
    pub flat: bool,
    pub opacity: f64,
}

/// Position / euler rotation (radians) / per-axis scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Transform3 {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform3 {
    pub const IDENTITY: Transform3 = Transform3 {
        position: [0.0; 3],
        rotation: [0.0; 3],
        scale: [1.0; 3],
    };

    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: [x, y, z],
            ..Self::IDENTITY
        }
    }

    pub fn with_scale(mut self, x: f64, y: f64, z: f64) -> Self {
        self.scale = [x, y, z];
        self
    }

    pub fn with_rotation(mut self, x: f64, y: f64, z: f64) -> Self {
        self.rotation = [x, y, z];
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_builders_compose() {
        let t = Transform3::at(1.0, 2.0, 3.0)
            .with_scale(2.0, 2.0, 2.0)
            .with_rotation(0.0, 0.5, 0.0);
        assert_eq!(t.position, [1.0, 2.0, 3.0]);
        assert_eq!(t.scale, [2.0, 2.0, 2.0]);
        assert_eq!(t.rotation[1], 0.5);
    }
}
