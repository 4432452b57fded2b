//! Polygonal shape composer.
//!
//! The primitive-rig twin of the vector composer: same feature gating, same
//! layer grouping, same animation-state handling, but emitting tessellated
//! primitives whose segment counts come from the polygonal budget table.
//! Secondary colors are derived in HSL space, the polygonal calibration of
//! the color-derivation contract.

use crate::animation::state::AnimationState;
use crate::compose::motion::{self, MotionSample};
use crate::config::Configuration;
use crate::detail::{Component, DetailBudget, Feature, resolve};
use crate::foundation::core::BackendKind;
use crate::palette::{ACCENT_PUPIL_NAVY, ACCENT_RIBBON_RED, ACCENT_WHITE, Palette};
use crate::scene::mesh::{
    Camera, Material, MeshGroup, MeshNode, MeshPrimitive, MeshScene, Transform3,
};

const HEAD_Y: f64 = 1.50;
const HEAD_R: f64 = 0.34;
const EYE_Y: f64 = 1.54;
const EYE_DX: f64 = 0.13;
const EYE_Z: f64 = 0.30;
const SHOULDER: [f64; 3] = [0.26, 1.14, 0.0];
const SWAY_BOB_M: f64 = 0.012;
const GESTURE_BOB_M: f64 = 0.10;

/// Compose a polygonal scene for one frame.
#[tracing::instrument(skip_all, fields(level = cfg.detail_level))]
pub fn compose(cfg: &Configuration, state: &AnimationState, now_ms: f64) -> MeshScene {
    let palette = Palette::derive(cfg);
    let m = motion::sample(cfg, state, now_ms);
    let budget = |component| resolve(cfg.detail_level, component, BackendKind::Polygonal);

    let mut groups = Vec::new();
    if cfg.show_background {
        groups.push(background(budget(Component::Background), &palette));
    }
    if cfg.show_legs {
        groups.push(legs(budget(Component::Legs), &palette));
    }
    groups.push(hair_back(budget(Component::Hair), &palette, &m));
    groups.extend(body(budget(Component::Body), &palette, &m));
    groups.push(head(budget(Component::Head), &palette, &m));
    groups.push(hair_front(budget(Component::Hair), &palette, &m, cfg.no_ahoge));
    groups.push(eyes(budget(Component::Eyes), &palette, &m));

    MeshScene {
        camera: Camera {
            y: cfg.camera_y,
            z: cfg.camera_z,
        },
        root_transform: root_transform(cfg, &m),
        groups,
    }
}

fn root_transform(cfg: &Configuration, m: &MotionSample) -> Transform3 {
    let dy = m.sway_bob * SWAY_BOB_M - m.gesture.root_bob * GESTURE_BOB_M;
    Transform3::at(0.0, dy, 0.0)
        .with_rotation(0.0, 0.0, m.sway_rot)
        .with_scale(cfg.model_scale, cfg.model_scale, cfg.model_scale)
}

fn node(
    name: &'static str,
    primitive: MeshPrimitive,
    color: crate::palette::Rgb8,
    transform: Transform3,
) -> MeshNode {
    MeshNode {
        name,
        primitive,
        material: Material {
            color,
            flat: false,
            opacity: 1.0,
        },
        transform,
    }
}

fn group(
    name: &'static str,
    component: Component,
    attached_to_root: bool,
    transform: Transform3,
    nodes: Vec<MeshNode>,
) -> MeshGroup {
    MeshGroup {
        name,
        component,
        attached_to_root,
        transform,
        nodes,
    }
}

fn segments(budget: DetailBudget) -> u32 {
    budget.shape_count.max(4)
}

fn background(budget: DetailBudget, palette: &Palette) -> MeshGroup {
    let mut nodes = Vec::new();
    if budget.shape_count > 0 {
        if budget.has(Feature::Sky) {
            let mut sky = node(
                "sky",
                MeshPrimitive::Plane { size: [30.0, 18.0] },
                palette.clothes_secondary.highlight,
                Transform3::at(0.0, 6.0, -8.0),
            );
            sky.material.flat = true;
            nodes.push(sky);
        }
        if budget.has(Feature::Ground) {
            let mut ground = node(
                "ground",
                MeshPrimitive::Plane { size: [30.0, 30.0] },
                palette.clothes.shadow,
                Transform3::at(0.0, 0.0, 0.0).with_rotation(-std::f64::consts::FRAC_PI_2, 0.0, 0.0),
            );
            ground.material.flat = true;
            nodes.push(ground);
        }
        if budget.has(Feature::Hills) {
            nodes.push(node(
                "hill_far",
                MeshPrimitive::Sphere {
                    radius: 3.0,
                    segments: segments(budget).min(12),
                },
                palette.clothes.highlight,
                Transform3::at(-4.0, -1.8, -7.0).with_scale(1.0, 0.5, 1.0),
            ));
            nodes.push(node(
                "hill_near",
                MeshPrimitive::Sphere {
                    radius: 3.6,
                    segments: segments(budget).min(12),
                },
                palette.clothes.base,
                Transform3::at(4.5, -2.2, -6.0).with_scale(1.0, 0.45, 1.0),
            ));
        }
        if budget.has(Feature::Trees) {
            for (name, x) in [("tree_left", -2.6), ("tree_right", 2.8)] {
                nodes.push(node(
                    name,
                    MeshPrimitive::Cylinder {
                        radius: 0.07,
                        height: 1.2,
                        segments: 6,
                    },
                    palette.hair.shadow,
                    Transform3::at(x, 0.6, -4.0),
                ));
                nodes.push(node(
                    if x < 0.0 { "crown_left" } else { "crown_right" },
                    MeshPrimitive::Sphere {
                        radius: 0.5,
                        segments: segments(budget).min(10),
                    },
                    palette.hair.shadow,
                    Transform3::at(x, 1.5, -4.0),
                ));
            }
        }
        if budget.has(Feature::Fence) {
            for i in 0..5 {
                let names = ["post_0", "post_1", "post_2", "post_3", "post_4"];
                nodes.push(node(
                    names[i],
                    MeshPrimitive::Box3 {
                        size: [0.06, 0.5, 0.06],
                    },
                    palette.hair.highlight,
                    Transform3::at(-2.0 + f64::from(i as u32), 0.25, -3.0),
                ));
            }
            nodes.push(node(
                "fence_rail",
                MeshPrimitive::Box3 {
                    size: [4.4, 0.05, 0.05],
                },
                palette.hair.highlight,
                Transform3::at(0.0, 0.4, -3.0),
            ));
        }
        if budget.has(Feature::City) {
            let names = ["tower_0", "tower_1", "tower_2", "tower_3"];
            for (i, name) in names.iter().enumerate() {
                let h = 2.0 + 0.8 * f64::from(i as u32 % 3);
                nodes.push(node(
                    name,
                    MeshPrimitive::Box3 {
                        size: [0.7, h, 0.7],
                    },
                    palette.eye.shadow,
                    Transform3::at(-3.0 + 2.0 * f64::from(i as u32), h / 2.0, -9.0),
                ));
            }
        }
        if budget.has(Feature::Petals) {
            let names = ["petal_0", "petal_1", "petal_2", "petal_3"];
            for (i, name) in names.iter().enumerate() {
                nodes.push(node(
                    name,
                    MeshPrimitive::Plane { size: [0.05, 0.03] },
                    palette.blush,
                    Transform3::at(
                        -1.5 + f64::from(i as u32),
                        1.8 + 0.4 * f64::from(i as u32 % 2),
                        -2.0,
                    ),
                ));
            }
        }
        if budget.has(Feature::PowerLines) {
            for (name, x) in [("pole_left", -3.2), ("pole_right", 3.2)] {
                nodes.push(node(
                    name,
                    MeshPrimitive::Cylinder {
                        radius: 0.05,
                        height: 2.4,
                        segments: 6,
                    },
                    palette.eye.shadow,
                    Transform3::at(x, 1.2, -5.0),
                ));
            }
            nodes.push(node(
                "power_wire",
                MeshPrimitive::Box3 {
                    size: [6.4, 0.02, 0.02],
                },
                palette.eye.shadow,
                Transform3::at(0.0, 2.3, -5.0),
            ));
        }
    }
    group(
        "background",
        Component::Background,
        false,
        Transform3::IDENTITY,
        nodes,
    )
}

fn legs(budget: DetailBudget, palette: &Palette) -> MeshGroup {
    let mut nodes = Vec::new();
    if budget.shape_count > 0 {
        for (name, dx) in [("leg_left", -0.09_f64), ("leg_right", 0.09)] {
            nodes.push(node(
                name,
                MeshPrimitive::Capsule {
                    radius: 0.055,
                    height: 0.52,
                    segments: segments(budget),
                },
                palette.skin.base,
                Transform3::at(dx, 0.30, 0.0),
            ));
        }
        if budget.has(Feature::Socks) {
            for (name, dx) in [("sock_left", -0.09_f64), ("sock_right", 0.09)] {
                nodes.push(node(
                    name,
                    MeshPrimitive::Cylinder {
                        radius: 0.06,
                        height: 0.14,
                        segments: segments(budget),
                    },
                    palette.clothes_secondary.base,
                    Transform3::at(dx, 0.13, 0.0),
                ));
            }
        }
        if budget.has(Feature::Shoes) {
            for (name, dx) in [("shoe_left", -0.09_f64), ("shoe_right", 0.09)] {
                nodes.push(node(
                    name,
                    MeshPrimitive::Sphere {
                        radius: 0.075,
                        segments: segments(budget),
                    },
                    palette.clothes.shadow,
                    Transform3::at(dx, 0.04, 0.03).with_scale(1.0, 0.6, 1.4),
                ));
            }
        }
    }
    group("legs", Component::Legs, true, Transform3::IDENTITY, nodes)
}

fn hair_group_transform(m: &MotionSample) -> Transform3 {
    Transform3::at(0.0, 0.0, 0.0).with_rotation(0.0, 0.0, m.hair_sway)
}

fn hair_back(budget: DetailBudget, palette: &Palette, m: &MotionSample) -> MeshGroup {
    let mut nodes = Vec::new();
    if budget.shape_count > 0 {
        nodes.push(node(
            "hair_back_mass",
            MeshPrimitive::Sphere {
                radius: HEAD_R * 1.16,
                segments: segments(budget),
            },
            palette.hair.base,
            Transform3::at(0.0, HEAD_Y + 0.02, -0.06).with_scale(1.0, 1.18, 1.0),
        ));
        if budget.has(Feature::HairShadow) {
            nodes.push(node(
                "hair_back_shadow",
                MeshPrimitive::Sphere {
                    radius: HEAD_R * 0.9,
                    segments: segments(budget),
                },
                palette.hair.shadow,
                Transform3::at(0.0, HEAD_Y - 0.22, -0.12).with_scale(1.0, 0.7, 0.8),
            ));
        }
    }
    group(
        "hair_back",
        Component::Hair,
        true,
        hair_group_transform(m),
        nodes,
    )
}

fn body(budget: DetailBudget, palette: &Palette, m: &MotionSample) -> Vec<MeshGroup> {
    let mut nodes = Vec::new();
    let mut arm_nodes = Vec::new();
    if budget.shape_count > 0 {
        nodes.push(node(
            "torso",
            MeshPrimitive::Capsule {
                radius: 0.17,
                height: 0.46,
                segments: segments(budget),
            },
            palette.clothes.base,
            Transform3::at(0.0, 0.92, 0.0),
        ));
        if budget.has(Feature::SkirtPleats) {
            nodes.push(node(
                "skirt",
                MeshPrimitive::Cylinder {
                    radius: 0.24,
                    height: 0.2,
                    segments: segments(budget),
                },
                palette.clothes.shadow,
                Transform3::at(0.0, 0.66, 0.0).with_scale(1.0, 1.0, 0.9),
            ));
        }
        if budget.has(Feature::ClothShading) {
            nodes.push(node(
                "cloth_shading",
                MeshPrimitive::Capsule {
                    radius: 0.172,
                    height: 0.46,
                    segments: segments(budget),
                },
                palette.clothes.shadow,
                Transform3::at(0.04, 0.92, -0.01).with_scale(0.9, 1.0, 0.9),
            ));
        }
        if budget.has(Feature::Collar) {
            nodes.push(node(
                "collar",
                MeshPrimitive::Cylinder {
                    radius: 0.12,
                    height: 0.04,
                    segments: segments(budget),
                },
                palette.clothes_secondary.base,
                Transform3::at(0.0, 1.18, 0.0),
            ));
        }
        if budget.has(Feature::Bow) {
            for (name, dx) in [("bow_left", -0.05_f64), ("bow_right", 0.05)] {
                nodes.push(node(
                    name,
                    MeshPrimitive::Sphere {
                        radius: 0.045,
                        segments: 8,
                    },
                    ACCENT_RIBBON_RED,
                    Transform3::at(dx, 1.12, 0.16).with_scale(1.2, 0.8, 0.6),
                ));
            }
            nodes.push(node(
                "bow_knot",
                MeshPrimitive::Sphere {
                    radius: 0.025,
                    segments: 8,
                },
                ACCENT_RIBBON_RED,
                Transform3::at(0.0, 1.12, 0.17),
            ));
        }
        if budget.has(Feature::Arms) {
            nodes.push(node(
                "arm_rest",
                MeshPrimitive::Capsule {
                    radius: 0.05,
                    height: 0.38,
                    segments: segments(budget),
                },
                palette.clothes.base,
                Transform3::at(-SHOULDER[0], 0.94, 0.0),
            ));
            arm_nodes.push(node(
                "arm_raised",
                MeshPrimitive::Capsule {
                    radius: 0.05,
                    height: 0.38,
                    segments: segments(budget),
                },
                palette.clothes.base,
                Transform3::at(0.0, 0.19, 0.0),
            ));
            if budget.has(Feature::Sleeves) {
                nodes.push(node(
                    "sleeve_rest",
                    MeshPrimitive::Cylinder {
                        radius: 0.062,
                        height: 0.12,
                        segments: segments(budget),
                    },
                    palette.clothes_secondary.base,
                    Transform3::at(-SHOULDER[0], 1.08, 0.0),
                ));
                arm_nodes.push(node(
                    "sleeve_raised",
                    MeshPrimitive::Cylinder {
                        radius: 0.062,
                        height: 0.12,
                        segments: segments(budget),
                    },
                    palette.clothes_secondary.base,
                    Transform3::at(0.0, 0.06, 0.0),
                ));
            }
            if budget.has(Feature::Hands) {
                nodes.push(node(
                    "hand_rest",
                    MeshPrimitive::Sphere {
                        radius: 0.055,
                        segments: segments(budget),
                    },
                    palette.skin.base,
                    Transform3::at(-SHOULDER[0], 0.72, 0.0),
                ));
                arm_nodes.push(node(
                    "hand_raised",
                    MeshPrimitive::Sphere {
                        radius: 0.055,
                        segments: segments(budget),
                    },
                    palette.skin.base,
                    Transform3::at(0.0, 0.42, 0.0),
                ));
            }
        }
    }

    // Raised arm pivots at the shoulder; its nodes are authored relative to
    // the pivot so the group rotation swings the whole limb.
    let hang = 1.0 - m.gesture.arm_raise;
    let arm_angle = hang * std::f64::consts::PI + m.gesture.arm_rot + m.arm_sway;
    let arm_tf =
        Transform3::at(SHOULDER[0], SHOULDER[1], SHOULDER[2]).with_rotation(0.0, 0.0, arm_angle);

    vec![
        group("body", Component::Body, true, Transform3::IDENTITY, nodes),
        group("arm_raised", Component::Body, true, arm_tf, arm_nodes),
    ]
}

fn head(budget: DetailBudget, palette: &Palette, m: &MotionSample) -> MeshGroup {
    let mut nodes = Vec::new();
    if budget.shape_count > 0 {
        nodes.push(node(
            "head",
            MeshPrimitive::Sphere {
                radius: HEAD_R,
                segments: segments(budget),
            },
            palette.skin.base,
            Transform3::at(0.0, HEAD_Y, 0.0).with_scale(1.0, 1.04, 1.0),
        ));
        if budget.has(Feature::FaceShading) {
            nodes.push(node(
                "face_shading",
                MeshPrimitive::Sphere {
                    radius: HEAD_R * 0.84,
                    segments: segments(budget),
                },
                palette.skin.shadow,
                Transform3::at(0.0, HEAD_Y + 0.12, -0.04).with_scale(1.0, 0.5, 0.9),
            ));
        }
        if budget.has(Feature::Nose) {
            nodes.push(node(
                "nose",
                MeshPrimitive::Sphere {
                    radius: 0.012,
                    segments: 6,
                },
                palette.skin.shadow,
                Transform3::at(0.0, HEAD_Y - 0.05, HEAD_R - 0.01),
            ));
        }
        if budget.has(Feature::Mouth) {
            let (sx, sy) = m.mouth_scale;
            nodes.push(node(
                "mouth",
                MeshPrimitive::Sphere {
                    radius: 0.035,
                    segments: 8,
                },
                palette.mouth,
                Transform3::at(0.0, HEAD_Y - 0.13, HEAD_R - 0.02).with_scale(
                    sx,
                    0.45 * sy,
                    0.25,
                ),
            ));
        }
        if budget.has(Feature::Eyebrows) {
            for (name, dx) in [("brow_left", -EYE_DX), ("brow_right", EYE_DX)] {
                nodes.push(node(
                    name,
                    MeshPrimitive::Box3 {
                        size: [0.09, 0.015, 0.02],
                    },
                    palette.hair.shadow,
                    Transform3::at(dx, EYE_Y + 0.1, EYE_Z),
                ));
            }
        }
        if budget.has(Feature::Blush) {
            for (name, dx) in [("blush_left", -0.2_f64), ("blush_right", 0.2)] {
                nodes.push(node(
                    name,
                    MeshPrimitive::Sphere {
                        radius: 0.045,
                        segments: 8,
                    },
                    palette.blush,
                    Transform3::at(dx, HEAD_Y - 0.06, HEAD_R - 0.08).with_scale(1.0, 0.6, 0.3),
                ));
            }
        }
    }

    let tf = Transform3::at(0.0, m.gesture.head_bob * -0.02, 0.0).with_rotation(
        m.gesture.head_bob * 0.3,
        0.0,
        m.gesture.head_rot,
    );
    group("head", Component::Head, true, tf, nodes)
}

fn hair_front(
    budget: DetailBudget,
    palette: &Palette,
    m: &MotionSample,
    no_ahoge: bool,
) -> MeshGroup {
    let mut nodes = Vec::new();
    if budget.shape_count > 0 {
        if budget.has(Feature::FrontFringe) {
            nodes.push(node(
                "fringe",
                MeshPrimitive::Sphere {
                    radius: HEAD_R * 1.05,
                    segments: segments(budget),
                },
                palette.hair.base,
                Transform3::at(0.0, HEAD_Y + 0.16, 0.07).with_scale(1.0, 0.55, 1.0),
            ));
        }
        if budget.has(Feature::FrontStrands) {
            for (name, dx) in [("strand_left", -0.3_f64), ("strand_right", 0.3)] {
                nodes.push(node(
                    name,
                    MeshPrimitive::Capsule {
                        radius: 0.04,
                        height: 0.3,
                        segments: segments(budget),
                    },
                    palette.hair.base,
                    Transform3::at(dx, HEAD_Y - 0.08, 0.12),
                ));
            }
        }
        if budget.has(Feature::HairHighlight) {
            nodes.push(node(
                "hair_highlight",
                MeshPrimitive::Sphere {
                    radius: 0.1,
                    segments: 8,
                },
                palette.hair.highlight,
                Transform3::at(-0.12, HEAD_Y + 0.26, 0.16).with_scale(1.4, 0.4, 0.6),
            ));
        }
        if budget.has(Feature::Ahoge) && !no_ahoge {
            nodes.push(node(
                "ahoge",
                MeshPrimitive::Capsule {
                    radius: 0.015,
                    height: 0.16,
                    segments: 6,
                },
                palette.hair.base,
                Transform3::at(0.02, HEAD_Y + HEAD_R * 1.2 + 0.06, 0.0)
                    .with_rotation(0.0, 0.0, -0.3),
            ));
        }
    }
    group(
        "hair_front",
        Component::Hair,
        true,
        hair_group_transform(m),
        nodes,
    )
}

fn eyes(budget: DetailBudget, palette: &Palette, m: &MotionSample) -> MeshGroup {
    let mut nodes = Vec::new();
    if budget.shape_count > 0 {
        for (side, dx) in [(0usize, -EYE_DX), (1, EYE_DX)] {
            let names = [
                ["eye_left", "iris_left", "pupil_left", "eye_highlight_left", "eye_sparkle_left"],
                [
                    "eye_right",
                    "iris_right",
                    "pupil_right",
                    "eye_highlight_right",
                    "eye_sparkle_right",
                ],
            ];
            let white_color = if budget.has(Feature::Iris) {
                ACCENT_WHITE
            } else {
                ACCENT_PUPIL_NAVY
            };
            // Blink: the whole eye collapses on Y, lerped every frame rather
            // than toggled, so there is no visible snap.
            nodes.push(node(
                names[side][0],
                MeshPrimitive::Sphere {
                    radius: 0.05,
                    segments: segments(budget),
                },
                white_color,
                Transform3::at(dx, EYE_Y, EYE_Z).with_scale(0.9, 1.2 * m.eye_openness, 0.4),
            ));
            if budget.has(Feature::Iris) {
                let iris_color = if budget.has(Feature::IrisGradient) {
                    palette.eye.highlight
                } else {
                    palette.eye.base
                };
                nodes.push(node(
                    names[side][1],
                    MeshPrimitive::Sphere {
                        radius: 0.034,
                        segments: segments(budget),
                    },
                    iris_color,
                    Transform3::at(dx, EYE_Y, EYE_Z + 0.02)
                        .with_scale(1.0, m.eye_openness, 0.4),
                ));
            }
            if budget.has(Feature::Pupils) {
                nodes.push(node(
                    names[side][2],
                    MeshPrimitive::Sphere {
                        radius: 0.016,
                        segments: segments(budget).min(12),
                    },
                    ACCENT_PUPIL_NAVY,
                    Transform3::at(dx, EYE_Y, EYE_Z + 0.04)
                        .with_scale(1.0, m.eye_openness, 0.4),
                ));
            }
            if budget.has(Feature::Highlight) {
                nodes.push(node(
                    names[side][3],
                    MeshPrimitive::Sphere {
                        radius: 0.01,
                        segments: 6,
                    },
                    ACCENT_WHITE,
                    Transform3::at(dx - 0.015, EYE_Y + 0.018 * m.eye_openness, EYE_Z + 0.05),
                ));
            }
            if budget.has(Feature::Sparkle) {
                nodes.push(node(
                    names[side][4],
                    MeshPrimitive::Sphere {
                        radius: 0.006,
                        segments: 6,
                    },
                    ACCENT_WHITE,
                    Transform3::at(dx + 0.018, EYE_Y - 0.014 * m.eye_openness, EYE_Z + 0.05),
                ));
            }
            if budget.has(Feature::Eyelashes) {
                let lash = if side == 0 {
                    "eyelash_left"
                } else {
                    "eyelash_right"
                };
                nodes.push(node(
                    lash,
                    MeshPrimitive::Box3 {
                        size: [0.1, 0.012, 0.02],
                    },
                    palette.hair.shadow,
                    Transform3::at(dx, EYE_Y + 0.06 * m.eye_openness, EYE_Z + 0.02),
                ));
            }
        }
    }
    group("eyes", Component::Eyes, true, Transform3::IDENTITY, nodes)
}
