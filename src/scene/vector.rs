use kurbo::{Affine, BezPath};

use crate::detail::Component;
use crate::palette::Rgb8;

/// Flat 2D scene: layered groups of filled paths in paint order.
#[derive(Clone, Debug, serde::Serialize)]
pub struct VectorScene {
    pub viewport: Viewport,
    /// Character root transform (model scale, idle sway, gesture offset).
    /// Background groups are not affected by it.
    pub root_transform: Affine,
    pub groups: Vec<VectorGroup>,
}

impl VectorScene {
    /// Total shapes emitted for `component` across all groups.
    pub fn shape_count(&self, component: Component) -> usize {
        self.groups
            .iter()
            .filter(|g| g.component == component)
            .map(|g| g.shapes.len())
            .sum()
    }

    /// Find a shape by name anywhere in the scene.
    pub fn find(&self, name: &str) -> Option<&VectorShape> {
        self.groups
            .iter()
            .flat_map(|g| g.shapes.iter())
            .find(|s| s.name == name)
    }
}

/// Drawing surface placement, consumed opaquely by the host.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub center_y: f64,
}

/// One paint layer; all shapes share the group transform.
#[derive(Clone, Debug, serde::Serialize)]
pub struct VectorGroup {
    pub name: &'static str,
    pub component: Component,
    /// Whether the character root transform applies to this group.
    pub attached_to_root: bool,
    pub transform: Affine,
    pub shapes: Vec<VectorShape>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct VectorShape {
    pub name: &'static str,
    pub path: BezPath,
    pub fill: Fill,
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Solid(Rgb8),
    /// Top-to-bottom linear gradient.
    Linear { start: Rgb8, end: Rgb8 },
    /// Center-out radial gradient.
    Radial { inner: Rgb8, outer: Rgb8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_count_sums_across_groups_of_one_component() {
        let shape = |name| VectorShape {
            name,
            path: BezPath::new(),
            fill: Fill::Solid(Rgb8::new(1, 2, 3)),
            opacity: 1.0,
        };
        let scene = VectorScene {
            viewport: Viewport {
                width: 360.0,
                height: 640.0,
                center_y: 0.0,
            },
            root_transform: Affine::IDENTITY,
            groups: vec![
                VectorGroup {
                    name: "hair_back",
                    component: Component::Hair,
                    attached_to_root: true,
                    transform: Affine::IDENTITY,
                    shapes: vec![shape("a"), shape("b")],
                },
                VectorGroup {
                    name: "hair_front",
                    component: Component::Hair,
                    attached_to_root: true,
                    transform: Affine::IDENTITY,
                    shapes: vec![shape("c")],
                },
            ],
        };
        assert_eq!(scene.shape_count(Component::Hair), 3);
        assert_eq!(scene.shape_count(Component::Body), 0);
        assert!(scene.find("b").is_some());
        assert!(scene.find("zzz").is_none());
    }
}
