//! End-to-end composition scenarios across both backends.

use avakit::compose::{polygon, vector};
use avakit::{
    AnimationState, AnimationTimerEngine, BackendKind, Component, Configuration, detail,
};

fn cfg_at(level: f64, backend: BackendKind) -> Configuration {
    let mut cfg = Configuration::default();
    cfg.detail_level = level;
    cfg.backend = backend;
    cfg
}

/// If a component's budget is zero, the composer emits nothing for it — on
/// both backends, at every level.
#[test]
fn zero_budget_silence_everywhere() {
    let state = AnimationState::default();
    for level in 0..=11 {
        let level = f64::from(level);

        let v = vector::compose(&cfg_at(level, BackendKind::Vector), &state, 0.0);
        for component in Component::ALL {
            let budget = detail::resolve(level, component, BackendKind::Vector);
            if budget.shape_count == 0 {
                assert_eq!(v.shape_count(component), 0, "vector {component:?} level {level}");
            } else {
                assert!(v.shape_count(component) > 0, "vector {component:?} level {level}");
            }
        }

        let p = polygon::compose(&cfg_at(level, BackendKind::Polygonal), &state, 0.0);
        for component in Component::ALL {
            let budget = detail::resolve(level, component, BackendKind::Polygonal);
            if budget.shape_count == 0 {
                assert_eq!(p.node_count(component), 0, "polygon {component:?} level {level}");
            } else {
                assert!(p.node_count(component) > 0, "polygon {component:?} level {level}");
            }
        }
    }
}

/// Cross-backend visual equivalence: the same named features appear and
/// disappear at the same levels in both backends.
#[test]
fn feature_shapes_appear_at_same_levels_in_both_backends() {
    let state = AnimationState::default();
    // Marker shape names shared by the two composers.
    let markers = [
        "face_shading",
        "mouth",
        "nose",
        "brow_left",
        "blush_left",
        "fringe",
        "hair_highlight",
        "ahoge",
        "torso",
        "collar",
        "sock_left",
        "shoe_left",
        "eye_left",
        "pupil_left",
        "eye_highlight_left",
        "eye_sparkle_left",
        "eyelash_left",
        "iris_left",
        "strand_left",
        "sky",
        "ground",
    ];
    for level in 1..=10 {
        let level = f64::from(level);
        let v = vector::compose(&cfg_at(level, BackendKind::Vector), &state, 0.0);
        let p = polygon::compose(&cfg_at(level, BackendKind::Polygonal), &state, 0.0);
        for marker in markers {
            assert_eq!(
                v.find(marker).is_some(),
                p.find(marker).is_some(),
                "'{marker}' presence differs at level {level}"
            );
        }
    }
}

/// Level 1 is one background shape, one face shape, nothing else; level 10
/// carries the full feature set.
#[test]
fn level_extremes_scenario() {
    let state = AnimationState::default();

    let v = vector::compose(&cfg_at(1.0, BackendKind::Vector), &state, 0.0);
    assert_eq!(v.shape_count(Component::Background), 1);
    assert_eq!(v.shape_count(Component::Head), 1);
    assert_eq!(v.shape_count(Component::Eyes), 0);

    let p = polygon::compose(&cfg_at(1.0, BackendKind::Polygonal), &state, 0.0);
    assert_eq!(p.node_count(Component::Background), 1);
    assert_eq!(p.node_count(Component::Head), 1);
    assert_eq!(p.node_count(Component::Eyes), 0);

    let v10 = vector::compose(&cfg_at(10.0, BackendKind::Vector), &state, 0.0);
    for name in ["ahoge", "bow", "power_lines", "eye_sparkle_left", "sock_left"] {
        assert!(v10.find(name).is_some(), "vector missing {name}");
    }
    let p10 = polygon::compose(&cfg_at(10.0, BackendKind::Polygonal), &state, 0.0);
    for name in ["ahoge", "bow_knot", "power_wire", "eye_sparkle_left", "sock_left"] {
        assert!(p10.find(name).is_some(), "polygon missing {name}");
    }
}

/// The determinism obligation to the screenshot harness: same configuration,
/// same state snapshot, same clock ⇒ byte-identical serialized scenes.
#[test]
fn composition_is_deterministic() {
    let cfg = cfg_at(8.0, BackendKind::Vector);
    let mut engine = AnimationTimerEngine::new(&cfg, 1234);
    engine.advance(5000.0);
    let state = *engine.state();

    let a = serde_json::to_string(&vector::compose(&cfg, &state, 5000.0)).unwrap();
    let b = serde_json::to_string(&vector::compose(&cfg, &state, 5000.0)).unwrap();
    assert_eq!(a, b);

    let pcfg = cfg_at(8.0, BackendKind::Polygonal);
    let c = serde_json::to_string(&polygon::compose(&pcfg, &state, 5000.0)).unwrap();
    let d = serde_json::to_string(&polygon::compose(&pcfg, &state, 5000.0)).unwrap();
    assert_eq!(c, d);
}

/// Options flow end to end: URL-parameter overrides reach the emitted scene.
#[test]
fn options_reach_the_scene() {
    let cfg = Configuration::from_options([
        ("detailLevel", "2"),
        ("showBackground", "false"),
        ("viewportCenterY", "42.5"),
        ("modelScale", "1.5"),
        ("staticPose", "true"),
    ])
    .unwrap();

    let scene = vector::compose(&cfg, &AnimationState::default(), 0.0);
    assert_eq!(scene.shape_count(Component::Background), 0);
    assert_eq!(scene.viewport.center_y, 42.5);
    // Static pose: no sway, so the root transform is a pure scale about the
    // pivot (no rotation term).
    let coeffs = scene.root_transform.as_coeffs();
    assert_eq!(coeffs[1], 0.0);
    assert_eq!(coeffs[0], 1.5);
}

/// The engine drives composition over a simulated session without the two
/// ever disagreeing about state.
#[test]
fn engine_and_composer_cooperate_over_a_session() {
    let cfg = cfg_at(10.0, BackendKind::Vector);
    let mut engine = AnimationTimerEngine::new(&cfg, 77);

    let mut saw_closed_eyes = false;
    for step in 0..2000 {
        let now = f64::from(step) * 16.0;
        engine.advance(now);
        let scene = vector::compose(&cfg, engine.state(), now);
        let eyes = scene.groups.iter().find(|g| g.name == "eyes").unwrap();
        let sy = eyes.transform.as_coeffs()[3];
        assert!(sy > 0.0 && sy <= 1.0 + 1e-9);
        if sy < 0.2 {
            saw_closed_eyes = true;
        }
    }
    // 32 seconds of session time with a 3s blink interval: blinks happened.
    assert!(saw_closed_eyes);
}
