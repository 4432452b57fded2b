//! Vector-backend budget table.
//!
//! Shape counts are calibrated to path complexity (anchor points, gradient
//! fills). Tuned by eye against rendered output; edit cells, not code.

use super::Feature::*;
use super::{Component, DetailBudget, Feature};

const fn cell(shape_count: u32, features: &'static [Feature]) -> DetailBudget {
    DetailBudget {
        shape_count,
        features,
    }
}

pub(super) fn table(component: Component) -> &'static [DetailBudget; 10] {
    match component {
        Component::Background => &BACKGROUND,
        Component::Legs => &LEGS,
        Component::Body => &BODY,
        Component::Head => &HEAD,
        Component::Hair => &HAIR,
        Component::Eyes => &EYES,
    }
}

const BACKGROUND: [DetailBudget; 10] = [
    cell(1, &[Sky]),
    cell(1, &[Sky]),
    cell(2, &[Sky, Ground]),
    cell(3, &[Sky, Ground, Hills]),
    cell(3, &[Sky, Ground, Hills]),
    cell(5, &[Sky, Ground, Hills, Trees]),
    cell(6, &[Sky, Ground, Hills, Trees, Fence]),
    cell(9, &[Sky, Ground, Hills, Trees, Fence, City]),
    cell(12, &[Sky, Ground, Hills, Trees, Fence, City, Petals]),
    cell(
        14,
        &[Sky, Ground, Hills, Trees, Fence, City, Petals, PowerLines],
    ),
];

const LEGS: [DetailBudget; 10] = [
    cell(0, &[]),
    cell(0, &[]),
    cell(0, &[]),
    cell(2, &[]),
    cell(2, &[]),
    cell(4, &[Shoes]),
    cell(4, &[Shoes]),
    cell(6, &[Shoes, Socks]),
    cell(6, &[Shoes, Socks]),
    cell(6, &[Shoes, Socks]),
];

const BODY: [DetailBudget; 10] = [
    cell(0, &[]),
    cell(1, &[]),
    cell(3, &[Arms]),
    cell(5, &[Arms, Hands]),
    cell(6, &[Arms, Hands, Sleeves]),
    cell(8, &[Arms, Hands, Sleeves, Collar]),
    cell(10, &[Arms, Hands, Sleeves, Collar, Bow]),
    cell(13, &[Arms, Hands, Sleeves, Collar, Bow, SkirtPleats]),
    cell(
        16,
        &[Arms, Hands, Sleeves, Collar, Bow, SkirtPleats, ClothShading],
    ),
    cell(
        18,
        &[Arms, Hands, Sleeves, Collar, Bow, SkirtPleats, ClothShading],
    ),
];

const HEAD: [DetailBudget; 10] = [
    cell(1, &[]),
    cell(1, &[]),
    cell(2, &[Mouth]),
    cell(3, &[Mouth, Nose]),
    cell(4, &[Mouth, Nose, Eyebrows]),
    cell(6, &[Mouth, Nose, Eyebrows, Blush]),
    cell(6, &[Mouth, Nose, Eyebrows, Blush]),
    cell(6, &[Mouth, Nose, Eyebrows, Blush]),
    cell(8, &[Mouth, Nose, Eyebrows, Blush, FaceShading]),
    cell(9, &[Mouth, Nose, Eyebrows, Blush, FaceShading]),
];

const HAIR: [DetailBudget; 10] = [
    cell(0, &[]),
    cell(0, &[]),
    cell(2, &[]),
    cell(4, &[FrontFringe]),
    cell(4, &[FrontFringe]),
    cell(6, &[FrontFringe, HairShadow]),
    cell(7, &[FrontFringe, HairShadow, Ahoge]),
    cell(10, &[FrontFringe, HairShadow, Ahoge, FrontStrands]),
    cell(
        12,
        &[FrontFringe, HairShadow, Ahoge, FrontStrands, HairHighlight],
    ),
    cell(
        14,
        &[FrontFringe, HairShadow, Ahoge, FrontStrands, HairHighlight],
    ),
];

const EYES: [DetailBudget; 10] = [
    cell(0, &[]),
    cell(2, &[]),
    cell(4, &[Pupils]),
    cell(4, &[Pupils]),
    cell(6, &[Pupils, Iris]),
    cell(6, &[Pupils, Iris]),
    cell(8, &[Pupils, Iris, Highlight]),
    cell(10, &[Pupils, Iris, Highlight, Eyelashes]),
    cell(12, &[Pupils, Iris, Highlight, Eyelashes, IrisGradient]),
    cell(
        15,
        &[Pupils, Iris, Highlight, Eyelashes, IrisGradient, Sparkle],
    ),
];
