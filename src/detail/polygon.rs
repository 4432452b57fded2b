//! Polygonal-backend budget table.
//!
//! Counts are mesh segment budgets (sphere/capsule tessellation), so they run
//! higher than the vector table's shape counts. The feature-flag progression
//! must stay identical to the vector table cell-for-cell; only counts are
//! tuned independently.

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
    cell(4, &[Sky, Ground, Hills]),
    cell(4, &[Sky, Ground, Hills]),
    cell(8, &[Sky, Ground, Hills, Trees]),
    cell(10, &[Sky, Ground, Hills, Trees, Fence]),
    cell(16, &[Sky, Ground, Hills, Trees, Fence, City]),
    cell(24, &[Sky, Ground, Hills, Trees, Fence, City, Petals]),
    cell(
        28,
        &[Sky, Ground, Hills, Trees, Fence, City, Petals, PowerLines],
    ),
];

const LEGS: [DetailBudget; 10] = [
    cell(0, &[]),
    cell(0, &[]),
    cell(0, &[]),
    cell(6, &[]),
    cell(6, &[]),
    cell(10, &[Shoes]),
    cell(10, &[Shoes]),
    cell(14, &[Shoes, Socks]),
    cell(14, &[Shoes, Socks]),
    cell(16, &[Shoes, Socks]),
];

const BODY: [DetailBudget; 10] = [
    cell(0, &[]),
    cell(6, &[]),
    cell(10, &[Arms]),
    cell(12, &[Arms, Hands]),
    cell(16, &[Arms, Hands, Sleeves]),
    cell(20, &[Arms, Hands, Sleeves, Collar]),
    cell(24, &[Arms, Hands, Sleeves, Collar, Bow]),
    cell(28, &[Arms, Hands, Sleeves, Collar, Bow, SkirtPleats]),
    cell(
        32,
        &[Arms, Hands, Sleeves, Collar, Bow, SkirtPleats, ClothShading],
    ),
    cell(
        36,
        &[Arms, Hands, Sleeves, Collar, Bow, SkirtPleats, ClothShading],
    ),
];

const HEAD: [DetailBudget; 10] = [
    cell(6, &[]),
    cell(8, &[]),
    cell(10, &[Mouth]),
    cell(12, &[Mouth, Nose]),
    cell(16, &[Mouth, Nose, Eyebrows]),
    cell(20, &[Mouth, Nose, Eyebrows, Blush]),
    cell(20, &[Mouth, Nose, Eyebrows, Blush]),
    cell(24, &[Mouth, Nose, Eyebrows, Blush]),
    cell(28, &[Mouth, Nose, Eyebrows, Blush, FaceShading]),
    cell(32, &[Mouth, Nose, Eyebrows, Blush, FaceShading]),
];

const HAIR: [DetailBudget; 10] = [
    cell(0, &[]),
    cell(0, &[]),
    cell(6, &[]),
    cell(10, &[FrontFringe]),
    cell(10, &[FrontFringe]),
    cell(14, &[FrontFringe, HairShadow]),
    cell(16, &[FrontFringe, HairShadow, Ahoge]),
    cell(20, &[FrontFringe, HairShadow, Ahoge, FrontStrands]),
    cell(
        24,
        &[FrontFringe, HairShadow, Ahoge, FrontStrands, HairHighlight],
    ),
    cell(
        28,
        &[FrontFringe, HairShadow, Ahoge, FrontStrands, HairHighlight],
    ),
];

const EYES: [DetailBudget; 10] = [
    cell(0, &[]),
    cell(4, &[]),
    cell(6, &[Pupils]),
    cell(8, &[Pupils]),
    cell(10, &[Pupils, Iris]),
    cell(12, &[Pupils, Iris]),
    cell(16, &[Pupils, Iris, Highlight]),
    cell(20, &[Pupils, Iris, Highlight, Eyelashes]),
    cell(24, &[Pupils, Iris, Highlight, Eyelashes, IrisGradient]),
    cell(
        28,
        &[Pupils, Iris, Highlight, Eyelashes, IrisGradient, Sparkle],
    ),
];
