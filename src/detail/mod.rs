//! Detail-level budgets.
//!
//! A detail level (1–10) maps to a per-component budget: how many shapes (or
//! mesh segments) a component may emit, and which named features are visible.
//! The mapping is a pure table lookup — the thresholds encode hand-tuned
//! visual decisions (the ahoge appears at level 7, sparkle highlights only at
//! 10) that no formula reproduces.
//!
//! The two backends keep *independent* literal tables: vector shape counts
//! are calibrated to path complexity, polygonal counts to mesh tessellation,
//! and each must stay tunable without touching the other. What the tables
//! must agree on is the feature-flag set per (level, component) — that parity
//! is what makes the two renderings visually equivalent, and it is asserted
//! by tests rather than shared code.

mod polygon;
mod vector;

use crate::foundation::core::BackendKind;

/// The fixed character components, in paint order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Background,
    Legs,
    Body,
    Head,
    Hair,
    Eyes,
}

impl Component {
    /// All components, in paint order.
    pub const ALL: [Component; 6] = [
        Component::Background,
        Component::Legs,
        Component::Body,
        Component::Head,
        Component::Hair,
        Component::Eyes,
    ];
}

/// Named visual features gated by detail level.
///
/// Each component draws from its own subset; the base shape of a component
/// (face oval, torso, back-hair mass) is implied by a non-zero shape count
/// rather than a flag.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    // background
    Sky,
    Ground,
    Hills,
    Trees,
    Fence,
    City,
    Petals,
    PowerLines,
    // legs
    Shoes,
    Socks,
    // body
    Arms,
    Hands,
    Sleeves,
    Collar,
    Bow,
    SkirtPleats,
    ClothShading,
    // head
    Mouth,
    Nose,
    Eyebrows,
    Blush,
    FaceShading,
    // hair
    FrontFringe,
    HairShadow,
    Ahoge,
    FrontStrands,
    HairHighlight,
    // eyes
    Pupils,
    Iris,
    Highlight,
    Eyelashes,
    IrisGradient,
    Sparkle,
}

/// Resolved budget for one (level, component, backend) cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DetailBudget {
    /// Shape count (vector) or segment count (polygonal). Zero means the
    /// component is fully absent at this level.
    pub shape_count: u32,
    /// Feature flags visible at this level.
    pub features: &'static [Feature],
}

impl DetailBudget {
    pub fn has(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

/// Look up the budget for `component` at `level` on `backend`.
///
/// Levels below 1 clamp to 1; levels above 10 and non-finite levels clamp to
/// 10 (the richest entry is the defined fallback, not an error).
pub fn resolve(level: f64, component: Component, backend: BackendKind) -> DetailBudget {
    let idx = clamp_level(level) - 1;
    let table = match backend {
        BackendKind::Vector => vector::table(component),
        BackendKind::Polygonal => polygon::table(component),
    };
    table[idx]
}

fn clamp_level(level: f64) -> usize {
    if !level.is_finite() {
        tracing::debug!(level, "non-finite detail level, using richest");
        return 10;
    }
    let clamped = level.clamp(1.0, 10.0) as usize;
    if clamped as f64 != level {
        tracing::debug!(level, clamped, "detail level clamped");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_low_high_and_non_finite() {
        for backend in BackendKind::ALL {
            for component in Component::ALL {
                assert_eq!(
                    resolve(0.0, component, backend),
                    resolve(1.0, component, backend)
                );
                assert_eq!(
                    resolve(-3.0, component, backend),
                    resolve(1.0, component, backend)
                );
                assert_eq!(
                    resolve(11.0, component, backend),
                    resolve(10.0, component, backend)
                );
                assert_eq!(
                    resolve(f64::NAN, component, backend),
                    resolve(10.0, component, backend)
                );
                assert_eq!(
                    resolve(f64::INFINITY, component, backend),
                    resolve(10.0, component, backend)
                );
            }
        }
    }

    #[test]
    fn level_one_matches_minimal_scene() {
        for backend in BackendKind::ALL {
            assert!(resolve(1.0, Component::Background, backend).shape_count >= 1);
            assert_eq!(resolve(1.0, Component::Hair, backend).shape_count, 0);
            assert_eq!(resolve(1.0, Component::Body, backend).shape_count, 0);
            assert_eq!(resolve(1.0, Component::Legs, backend).shape_count, 0);
            assert_eq!(resolve(1.0, Component::Eyes, backend).shape_count, 0);
            assert!(resolve(1.0, Component::Head, backend).features.is_empty());
        }
    }

    #[test]
    fn hand_tuned_thresholds_hold() {
        for backend in BackendKind::ALL {
            assert!(!resolve(6.0, Component::Hair, backend).has(Feature::Ahoge));
            assert!(resolve(7.0, Component::Hair, backend).has(Feature::Ahoge));
            assert!(!resolve(9.0, Component::Eyes, backend).has(Feature::Sparkle));
            assert!(resolve(10.0, Component::Eyes, backend).has(Feature::Sparkle));
            assert!(!resolve(9.0, Component::Background, backend).has(Feature::PowerLines));
            assert!(resolve(10.0, Component::Background, backend).has(Feature::PowerLines));
        }
    }
}
