//! Vector shape composer.
//!
//! Consumes resolved budgets, the derived palette and an animation-state
//! snapshot, and emits a layered path tree in paint order: background, legs,
//! back hair, body, head, front hair, eyes. Every shape is gated on its
//! budget flag; a zero-count component emits nothing.

use kurbo::{Affine, BezPath, Circle, Ellipse, Point, Rect, Shape, Vec2};

use crate::animation::state::AnimationState;
use crate::compose::motion::{self, MotionSample};
use crate::config::Configuration;
use crate::detail::{Component, DetailBudget, Feature, resolve};
use crate::foundation::core::BackendKind;
use crate::palette::{ACCENT_PUPIL_NAVY, ACCENT_RIBBON_RED, ACCENT_WHITE, Palette};
use crate::scene::vector::{Fill, VectorGroup, VectorScene, VectorShape, Viewport};

const VIEW_W: f64 = 360.0;
const VIEW_H: f64 = 640.0;
const CX: f64 = 180.0;

const HEAD_C: Point = Point::new(CX, 210.0);
const HEAD_R: f64 = 72.0;
const EYE_Y: f64 = 218.0;
const EYE_DX: f64 = 30.0;
const SHOULDER: Point = Point::new(CX + 52.0, 310.0);
const SWAY_BOB_PX: f64 = 4.0;
const GESTURE_BOB_PX: f64 = 26.0;

/// Compose a vector scene for one frame.
#[tracing::instrument(skip_all, fields(level = cfg.detail_level))]
pub fn compose(cfg: &Configuration, state: &AnimationState, now_ms: f64) -> VectorScene {
    let palette = Palette::derive(cfg);
    let m = motion::sample(cfg, state, now_ms);
    let budget = |component| resolve(cfg.detail_level, component, BackendKind::Vector);

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

    VectorScene {
        viewport: Viewport {
            width: VIEW_W,
            height: VIEW_H,
            center_y: cfg.viewport_center_y,
        },
        root_transform: root_transform(cfg, &m),
        groups,
    }
}

fn root_transform(cfg: &Configuration, m: &MotionSample) -> Affine {
    let pivot = Point::new(CX, 560.0);
    let dy = m.sway_bob * SWAY_BOB_PX + m.gesture.root_bob * GESTURE_BOB_PX;
    Affine::translate(Vec2::new(0.0, dy))
        * Affine::translate(pivot.to_vec2())
        * Affine::rotate(m.sway_rot)
        * Affine::scale(cfg.model_scale)
        * Affine::translate(-pivot.to_vec2())
}

fn shape(name: &'static str, path: BezPath, fill: Fill) -> VectorShape {
    VectorShape {
        name,
        path,
        fill,
        opacity: 1.0,
    }
}

fn group(
    name: &'static str,
    component: Component,
    attached_to_root: bool,
    transform: Affine,
    shapes: Vec<VectorShape>,
) -> VectorGroup {
    VectorGroup {
        name,
        component,
        attached_to_root,
        transform,
        shapes,
    }
}

fn ellipse(c: Point, rx: f64, ry: f64) -> BezPath {
    Ellipse::new(c, Vec2::new(rx, ry), 0.0).to_path(0.1)
}

fn circle(c: Point, r: f64) -> BezPath {
    Circle::new(c, r).to_path(0.1)
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    Rect::new(x0, y0, x1, y1).to_path(0.1)
}

fn background(budget: DetailBudget, palette: &Palette) -> VectorGroup {
    let mut shapes = Vec::new();
    if budget.shape_count == 0 {
        return group("background", Component::Background, false, Affine::IDENTITY, shapes);
    }

    if budget.has(Feature::Sky) {
        shapes.push(shape(
            "sky",
            rect(0.0, 0.0, VIEW_W, VIEW_H),
            Fill::Linear {
                start: palette.clothes_secondary.highlight,
                end: palette.clothes_secondary.base,
            },
        ));
    }
    if budget.has(Feature::Ground) {
        shapes.push(shape(
            "ground",
            rect(0.0, 520.0, VIEW_W, VIEW_H),
            Fill::Solid(palette.clothes.shadow),
        ));
    }
    if budget.has(Feature::Hills) {
        shapes.push(shape(
            "hill_far",
            ellipse(Point::new(70.0, 540.0), 160.0, 60.0),
            Fill::Solid(palette.clothes.highlight),
        ));
        shapes.push(shape(
            "hill_near",
            ellipse(Point::new(320.0, 550.0), 180.0, 70.0),
            Fill::Solid(palette.clothes.base),
        ));
    }
    if budget.has(Feature::Trees) {
        for (i, x) in [40.0, 320.0].into_iter().enumerate() {
            let name = if i == 0 { "tree_left" } else { "tree_right" };
            let mut p = rect(x - 4.0, 430.0, x + 4.0, 520.0);
            p.extend(circle(Point::new(x, 415.0), 34.0));
            shapes.push(shape(name, p, Fill::Solid(palette.hair.shadow)));
        }
    }
    if budget.has(Feature::Fence) {
        let mut p = BezPath::new();
        for i in 0..6 {
            let x = 20.0 + 64.0 * f64::from(i);
            p.extend(rect(x, 480.0, x + 6.0, 524.0));
        }
        p.extend(rect(8.0, 492.0, VIEW_W - 8.0, 498.0));
        shapes.push(shape("fence", p, Fill::Solid(palette.hair.highlight)));
    }
    if budget.has(Feature::City) {
        let buildings = (budget.shape_count / 3).clamp(2, 5);
        let mut p = BezPath::new();
        for i in 0..buildings {
            let x = 30.0 + 70.0 * f64::from(i);
            let h = 120.0 + 40.0 * f64::from(i % 3);
            p.extend(rect(x, 470.0 - h, x + 44.0, 470.0));
        }
        shapes.push(shape("city", p, Fill::Solid(palette.eye.shadow)));
    }
    if budget.has(Feature::Petals) {
        let petals = budget.shape_count.saturating_sub(9).clamp(2, 6);
        let mut p = BezPath::new();
        for i in 0..petals {
            let x = 50.0 + 55.0 * f64::from(i);
            let y = 90.0 + 70.0 * f64::from(i % 3);
            p.extend(ellipse(Point::new(x, y), 5.0, 3.0));
        }
        shapes.push(shape("petals", p, Fill::Solid(palette.blush)));
    }
    if budget.has(Feature::PowerLines) {
        let mut p = rect(300.0, 330.0, 306.0, 520.0);
        p.extend(rect(60.0, 340.0, 66.0, 520.0));
        p.extend(rect(40.0, 352.0, VIEW_W - 20.0, 355.0));
        shapes.push(shape("power_lines", p, Fill::Solid(palette.eye.shadow)));
    }

    group("background", Component::Background, false, Affine::IDENTITY, shapes)
}

fn legs(budget: DetailBudget, palette: &Palette) -> VectorGroup {
    let mut shapes = Vec::new();
    if budget.shape_count > 0 {
        for (name, dx) in [("leg_left", -22.0), ("leg_right", 22.0)] {
            shapes.push(shape(
                name,
                rect(CX + dx - 11.0, 420.0, CX + dx + 11.0, 520.0),
                Fill::Solid(palette.skin.base),
            ));
        }
        if budget.has(Feature::Socks) {
            for (name, dx) in [("sock_left", -22.0), ("sock_right", 22.0)] {
                shapes.push(shape(
                    name,
                    rect(CX + dx - 11.0, 486.0, CX + dx + 11.0, 512.0),
                    Fill::Solid(palette.clothes_secondary.base),
                ));
            }
        }
        if budget.has(Feature::Shoes) {
            for (name, dx) in [("shoe_left", -22.0), ("shoe_right", 22.0)] {
                shapes.push(shape(
                    name,
                    ellipse(Point::new(CX + dx, 524.0), 16.0, 10.0),
                    Fill::Solid(palette.clothes.shadow),
                ));
            }
        }
    }
    group("legs", Component::Legs, true, Affine::IDENTITY, shapes)
}

fn hair_sway_transform(m: &MotionSample) -> Affine {
    let pivot = HEAD_C.to_vec2();
    Affine::translate(pivot) * Affine::rotate(m.hair_sway) * Affine::translate(-pivot)
}

fn hair_back(budget: DetailBudget, palette: &Palette, m: &MotionSample) -> VectorGroup {
    let mut shapes = Vec::new();
    if budget.shape_count > 0 {
        shapes.push(shape(
            "hair_back_mass",
            ellipse(Point::new(CX, 236.0), 86.0, 104.0),
            Fill::Solid(palette.hair.base),
        ));
        if budget.has(Feature::HairShadow) {
            shapes.push(shape(
                "hair_back_shadow",
                ellipse(Point::new(CX, 300.0), 70.0, 42.0),
                Fill::Solid(palette.hair.shadow),
            ));
        }
    }
    group("hair_back", Component::Hair, true, hair_sway_transform(m), shapes)
}

fn body(budget: DetailBudget, palette: &Palette, m: &MotionSample) -> Vec<VectorGroup> {
    let mut shapes = Vec::new();
    let mut arm_shapes = Vec::new();
    if budget.shape_count > 0 {
        shapes.push(shape(
            "torso",
            rect(CX - 48.0, 282.0, CX + 48.0, 430.0),
            Fill::Solid(palette.clothes.base),
        ));
        if budget.has(Feature::SkirtPleats) {
            let mut p = BezPath::new();
            p.move_to((CX - 56.0, 430.0));
            for i in 0..6 {
                let x = CX - 56.0 + 112.0 / 6.0 * f64::from(i + 1);
                let y = if i % 2 == 0 { 452.0 } else { 430.0 };
                p.line_to((x, y));
            }
            p.line_to((CX + 56.0, 408.0));
            p.line_to((CX - 56.0, 408.0));
            p.close_path();
            shapes.push(shape("skirt_pleats", p, Fill::Solid(palette.clothes.shadow)));
        }
        if budget.has(Feature::ClothShading) {
            shapes.push(shape(
                "cloth_shading",
                rect(CX + 16.0, 282.0, CX + 48.0, 430.0),
                Fill::Solid(palette.clothes.shadow),
            ));
        }
        if budget.has(Feature::Collar) {
            shapes.push(shape(
                "collar",
                ellipse(Point::new(CX, 288.0), 34.0, 14.0),
                Fill::Solid(palette.clothes_secondary.base),
            ));
        }
        if budget.has(Feature::Bow) {
            let mut p = ellipse(Point::new(CX - 14.0, 302.0), 12.0, 8.0);
            p.extend(ellipse(Point::new(CX + 14.0, 302.0), 12.0, 8.0));
            p.extend(circle(Point::new(CX, 302.0), 5.0));
            shapes.push(shape("bow", p, Fill::Solid(ACCENT_RIBBON_RED)));
        }
        if budget.has(Feature::Arms) {
            shapes.push(shape(
                "arm_rest",
                rect(CX - 64.0, 292.0, CX - 44.0, 392.0),
                Fill::Solid(palette.clothes.base),
            ));
            arm_shapes.push(shape(
                "arm_raised",
                rect(SHOULDER.x - 10.0, SHOULDER.y - 100.0, SHOULDER.x + 10.0, SHOULDER.y),
                Fill::Solid(palette.clothes.base),
            ));
            if budget.has(Feature::Sleeves) {
                shapes.push(shape(
                    "sleeve_rest",
                    rect(CX - 66.0, 292.0, CX - 42.0, 330.0),
                    Fill::Solid(palette.clothes_secondary.base),
                ));
                arm_shapes.push(shape(
                    "sleeve_raised",
                    rect(SHOULDER.x - 12.0, SHOULDER.y - 38.0, SHOULDER.x + 12.0, SHOULDER.y),
                    Fill::Solid(palette.clothes_secondary.base),
                ));
            }
            if budget.has(Feature::Hands) {
                shapes.push(shape(
                    "hand_rest",
                    circle(Point::new(CX - 54.0, 400.0), 11.0),
                    Fill::Solid(palette.skin.base),
                ));
                arm_shapes.push(shape(
                    "hand_raised",
                    circle(Point::new(SHOULDER.x, SHOULDER.y - 108.0), 11.0),
                    Fill::Solid(palette.skin.base),
                ));
            }
        }
    }

    // The raised arm rotates about the shoulder: hangs when no gesture wants
    // it up, swings up for wave/thinking, and rocks with its own sway phase.
    let hang = 1.0 - m.gesture.arm_raise;
    let arm_angle = hang * 2.6 + m.gesture.arm_rot + m.arm_sway;
    let arm_tf = Affine::translate(SHOULDER.to_vec2())
        * Affine::rotate(arm_angle)
        * Affine::translate(-SHOULDER.to_vec2());

    vec![
        group("body", Component::Body, true, Affine::IDENTITY, shapes),
        group("arm_raised", Component::Body, true, arm_tf, arm_shapes),
    ]
}

fn head(budget: DetailBudget, palette: &Palette, m: &MotionSample) -> VectorGroup {
    let mut shapes = Vec::new();
    if budget.shape_count > 0 {
        shapes.push(shape(
            "face",
            ellipse(HEAD_C, HEAD_R, HEAD_R * 1.04),
            Fill::Solid(palette.skin.base),
        ));
        if budget.has(Feature::FaceShading) {
            shapes.push(shape(
                "face_shading",
                ellipse(Point::new(CX, 160.0), 60.0, 26.0),
                Fill::Solid(palette.skin.shadow),
            ));
        }
        if budget.has(Feature::Nose) {
            shapes.push(shape(
                "nose",
                circle(Point::new(CX, 238.0), 2.4),
                Fill::Solid(palette.skin.shadow),
            ));
        }
        if budget.has(Feature::Mouth) {
            // Chatter scaling about the mouth center while talking.
            let c = Point::new(CX, 256.0);
            let (sx, sy) = m.mouth_scale;
            shapes.push(shape(
                "mouth",
                ellipse(c, 10.0 * sx, 4.5 * sy),
                Fill::Solid(palette.mouth),
            ));
        }
        if budget.has(Feature::Eyebrows) {
            for (name, dx) in [("brow_left", -EYE_DX), ("brow_right", EYE_DX)] {
                shapes.push(shape(
                    name,
                    rect(CX + dx - 13.0, 196.0, CX + dx + 13.0, 200.0),
                    Fill::Solid(palette.hair.shadow),
                ));
            }
        }
        if budget.has(Feature::Blush) {
            for (name, dx) in [("blush_left", -46.0), ("blush_right", 46.0)] {
                shapes.push(shape(
                    name,
                    ellipse(Point::new(CX + dx, 240.0), 11.0, 6.0),
                    Fill::Solid(palette.blush),
                ));
            }
        }
    }

    let pivot = Point::new(CX, 282.0).to_vec2();
    let tf = Affine::translate(Vec2::new(0.0, m.gesture.head_bob * 6.0))
        * Affine::translate(pivot)
        * Affine::rotate(m.gesture.head_rot)
        * Affine::translate(-pivot);
    group("head", Component::Head, true, tf, shapes)
}

fn hair_front(
    budget: DetailBudget,
    palette: &Palette,
    m: &MotionSample,
    no_ahoge: bool,
) -> VectorGroup {
    let mut shapes = Vec::new();
    if budget.shape_count > 0 {
        if budget.has(Feature::FrontFringe) {
            let mut p = BezPath::new();
            p.move_to((CX - 70.0, 196.0));
            p.quad_to((CX - 40.0, 150.0), (CX, 148.0));
            p.quad_to((CX + 40.0, 150.0), (CX + 70.0, 196.0));
            p.quad_to((CX + 40.0, 176.0), (CX, 178.0));
            p.quad_to((CX - 40.0, 176.0), (CX - 70.0, 196.0));
            p.close_path();
            shapes.push(shape("fringe", p, Fill::Solid(palette.hair.base)));
        }
        if budget.has(Feature::FrontStrands) {
            for (name, dx) in [("strand_left", -62.0), ("strand_right", 62.0)] {
                shapes.push(shape(
                    name,
                    ellipse(Point::new(CX + dx, 230.0), 9.0, 44.0),
                    Fill::Solid(palette.hair.base),
                ));
            }
        }
        if budget.has(Feature::HairHighlight) {
            shapes.push(shape(
                "hair_highlight",
                ellipse(Point::new(CX - 24.0, 158.0), 26.0, 7.0),
                Fill::Solid(palette.hair.highlight),
            ));
        }
        if budget.has(Feature::Ahoge) && !no_ahoge {
            let mut p = BezPath::new();
            p.move_to((CX - 2.0, 146.0));
            p.quad_to((CX - 14.0, 116.0), (CX + 10.0, 104.0));
            p.quad_to((CX - 2.0, 120.0), (CX + 4.0, 146.0));
            p.close_path();
            shapes.push(shape("ahoge", p, Fill::Solid(palette.hair.base)));
        }
    }
    group("hair_front", Component::Hair, true, hair_sway_transform(m), shapes)
}

fn eyes(budget: DetailBudget, palette: &Palette, m: &MotionSample) -> VectorGroup {
    let mut shapes = Vec::new();
    if budget.shape_count > 0 {
        let iris_fill = if budget.has(Feature::IrisGradient) {
            Fill::Linear {
                start: palette.eye.highlight,
                end: palette.eye.shadow,
            }
        } else {
            Fill::Solid(palette.eye.base)
        };

        for (side, dx) in [("left", -EYE_DX), ("right", EYE_DX)] {
            let c = Point::new(CX + dx, EYE_Y);
            let white_fill = if budget.has(Feature::Iris) {
                Fill::Solid(ACCENT_WHITE)
            } else {
                // Dot eyes at the lowest levels that show eyes at all.
                Fill::Solid(ACCENT_PUPIL_NAVY)
            };
            shapes.push(named(side, "eye", ellipse(c, 13.0, 16.0), white_fill));
            if budget.has(Feature::Iris) {
                shapes.push(named(side, "iris", circle(c, 9.0), iris_fill));
            }
            if budget.has(Feature::Pupils) {
                shapes.push(named(
                    side,
                    "pupil",
                    circle(c, 4.5),
                    Fill::Solid(ACCENT_PUPIL_NAVY),
                ));
            }
            if budget.has(Feature::Highlight) {
                shapes.push(named(
                    side,
                    "eye_highlight",
                    circle(Point::new(c.x - 4.0, c.y - 5.0), 3.0),
                    Fill::Solid(ACCENT_WHITE),
                ));
            }
            if budget.has(Feature::Sparkle) {
                shapes.push(named(
                    side,
                    "eye_sparkle",
                    circle(Point::new(c.x + 5.0, c.y + 4.0), 1.6),
                    Fill::Solid(ACCENT_WHITE),
                ));
            }
            if budget.has(Feature::Eyelashes) {
                shapes.push(named(
                    side,
                    "eyelash",
                    rect(c.x - 14.0, c.y - 19.0, c.x + 14.0, c.y - 15.0),
                    Fill::Solid(palette.hair.shadow),
                ));
            }
        }
    }

    // Blink: collapse the whole eye layer vertically about the eye line.
    let pivot = Vec2::new(CX, EYE_Y);
    let tf = Affine::translate(pivot)
        * Affine::scale_non_uniform(1.0, m.eye_openness)
        * Affine::translate(-pivot);
    group("eyes", Component::Eyes, true, tf, shapes)
}

fn named(side: &str, base: &'static str, path: BezPath, fill: Fill) -> VectorShape {
    // Stable per-side names without allocating: the closed set is known.
    let name = match (side, base) {
        ("left", "eye") => "eye_left",
        ("right", "eye") => "eye_right",
        ("left", "iris") => "iris_left",
        ("right", "iris") => "iris_right",
        ("left", "pupil") => "pupil_left",
        ("right", "pupil") => "pupil_right",
        ("left", "eye_highlight") => "eye_highlight_left",
        ("right", "eye_highlight") => "eye_highlight_right",
        ("left", "eye_sparkle") => "eye_sparkle_left",
        ("right", "eye_sparkle") => "eye_sparkle_right",
        ("left", "eyelash") => "eyelash_left",
        ("right", "eyelash") => "eyelash_right",
        _ => base,
    };
    VectorShape {
        name,
        path,
        fill,
        opacity: 1.0,
    }
}
