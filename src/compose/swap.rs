//! External replacement-mesh drive (polygonal backend only).
//!
//! When the host supplies an externally authored mesh asset instead of the
//! procedural rig, the composer does not build primitives: it recolors the
//! asset's sub-meshes by name/material-name heuristics and drives its morph
//! channels toward the blink/talk targets. Matching is best-effort by
//! design — a mesh with no matching names keeps its authored colors, which
//! is the defined (non-error) fallback.

use crate::animation::state::AnimationState;
use crate::compose::motion;
use crate::config::Configuration;
use crate::palette::Rgb8;

/// An externally loaded mesh asset, described by the names the heuristics
/// match against. Loading itself is the host's job; a load failure simply
/// means no rig is supplied and the procedural composer runs instead.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ExternalRig {
    pub meshes: Vec<ExternalMesh>,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ExternalMesh {
    pub name: String,
    #[serde(default)]
    pub material_name: String,
    #[serde(default)]
    pub morph_channels: Vec<String>,
}

/// Which configured base color a recolor rule assigns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSlot {
    Skin,
    Hair,
    Eye,
    Clothes,
}

/// Ordered recolor rules, evaluated first-match-wins against the lowercased
/// mesh name, then the lowercased material name.
const RECOLOR_RULES: &[(&[&str], ColorSlot)] = &[
    (&["skin", "face", "head"], ColorSlot::Skin),
    (&["hair"], ColorSlot::Hair),
    (&["eye", "iris"], ColorSlot::Eye),
    (&["cloth", "shirt", "dress", "body", "torso"], ColorSlot::Clothes),
];

/// Instructions for the host renderer: recolor these sub-meshes, set these
/// morph weights. Indices refer into the supplied [`ExternalRig`].
#[derive(Clone, Debug, serde::Serialize)]
pub struct RigDrive {
    pub recolors: Vec<Recolor>,
    pub morphs: Vec<MorphWeight>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct Recolor {
    pub mesh: usize,
    pub slot: ColorSlot,
    pub color: Rgb8,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct MorphWeight {
    pub mesh: usize,
    pub channel: usize,
    pub weight: f64,
}

/// Compute the drive for an external rig at `now_ms`.
#[tracing::instrument(skip_all, fields(meshes = rig.meshes.len()))]
pub fn drive(
    rig: &ExternalRig,
    cfg: &Configuration,
    state: &AnimationState,
    now_ms: f64,
) -> RigDrive {
    let m = motion::sample(cfg, state, now_ms);
    let blink_weight = 1.0 - m.eye_openness;
    // Mouth-open morph from the vertical chatter component; zero at rest.
    let talk_weight = ((m.mouth_scale.1 - 1.0) / 0.35).clamp(0.0, 1.0);

    let mut recolors = Vec::new();
    let mut morphs = Vec::new();

    for (mesh_index, mesh) in rig.meshes.iter().enumerate() {
        match match_slot(mesh) {
            Some(slot) => {
                let color = match slot {
                    ColorSlot::Skin => cfg.skin_color,
                    ColorSlot::Hair => cfg.hair_color,
                    ColorSlot::Eye => cfg.eye_color,
                    ColorSlot::Clothes => cfg.clothes_color,
                };
                recolors.push(Recolor {
                    mesh: mesh_index,
                    slot,
                    color,
                });
            }
            None => {
                tracing::debug!(mesh = %mesh.name, "no recolor rule matched; keeping authored colors");
            }
        }

        for (channel_index, channel) in mesh.morph_channels.iter().enumerate() {
            let channel_lc = channel.to_lowercase();
            let weight = if channel_lc.contains("blink") || channel_lc.starts_with("eyeclose") {
                Some(blink_weight)
            } else if channel_lc.contains("mouth_open")
                || channel_lc.contains("jaw_open")
                || channel_lc.contains("viseme_aa")
            {
                Some(talk_weight)
            } else {
                None
            };
            if let Some(weight) = weight {
                morphs.push(MorphWeight {
                    mesh: mesh_index,
                    channel: channel_index,
                    weight,
                });
            }
        }
    }

    RigDrive { recolors, morphs }
}

fn match_slot(mesh: &ExternalMesh) -> Option<ColorSlot> {
    let name = mesh.name.to_lowercase();
    let material = mesh.material_name.to_lowercase();
    for (patterns, slot) in RECOLOR_RULES {
        if patterns
            .iter()
            .any(|p| name.contains(p) || material.contains(p))
        {
            return Some(*slot);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::state::MouthState;

    fn mesh(name: &str, material: &str, channels: &[&str]) -> ExternalMesh {
        ExternalMesh {
            name: name.to_string(),
            material_name: material.to_string(),
            morph_channels: channels.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn recolors_by_name_then_material() {
        let rig = ExternalRig {
            meshes: vec![
                mesh("Face_01", "", &[]),
                mesh("geo_005", "HairMat", &[]),
                mesh("geo_006", "mat_dress", &[]),
                mesh("prop_hat", "mat_felt", &[]),
            ],
        };
        let cfg = Configuration::default();
        let d = drive(&rig, &cfg, &AnimationState::default(), 0.0);

        assert_eq!(d.recolors.len(), 3);
        assert_eq!(d.recolors[0].slot, ColorSlot::Skin);
        assert_eq!(d.recolors[0].color, cfg.skin_color);
        assert_eq!(d.recolors[1].slot, ColorSlot::Hair);
        assert_eq!(d.recolors[2].slot, ColorSlot::Clothes);
    }

    #[test]
    fn rule_order_breaks_overlaps() {
        // "head" wins over "body" because the skin rule is evaluated first.
        let rig = ExternalRig {
            meshes: vec![mesh("head_body", "", &[])],
        };
        let cfg = Configuration::default();
        let d = drive(&rig, &cfg, &AnimationState::default(), 0.0);
        assert_eq!(d.recolors[0].slot, ColorSlot::Skin);
    }

    #[test]
    fn unmatched_mesh_is_a_no_op() {
        let rig = ExternalRig {
            meshes: vec![mesh("prop_umbrella", "plastic", &[])],
        };
        let cfg = Configuration::default();
        let d = drive(&rig, &cfg, &AnimationState::default(), 0.0);
        assert!(d.recolors.is_empty());
    }

    #[test]
    fn blink_morph_follows_eye_closure() {
        let rig = ExternalRig {
            meshes: vec![mesh("face", "", &["eyeclose_L", "Blink", "smile"])],
        };
        let cfg = Configuration::default();
        let mut state = AnimationState::default();
        state.is_blinking = true;
        state.blink_changed_at_ms = 0.0;

        let d = drive(&rig, &cfg, &state, 140.0);
        // smile is unknown and gets no weight.
        assert_eq!(d.morphs.len(), 2);
        assert!(d.morphs.iter().all(|w| w.weight > 0.8));

        let open = drive(&rig, &cfg, &AnimationState::default(), 0.0);
        assert!(open.morphs.iter().all(|w| w.weight < 0.01));
    }

    #[test]
    fn talk_morph_oscillates_only_while_talking() {
        let rig = ExternalRig {
            meshes: vec![mesh("face", "", &["jaw_open"])],
        };
        let cfg = Configuration::default();
        let mut state = AnimationState::default();
        state.mouth = MouthState::Talking;

        // The sinusoid crosses zero; sample a quarter period in.
        let d = drive(&rig, &cfg, &state, 1000.0 / 7.0 / 4.0);
        assert!(d.morphs[0].weight > 0.5);

        state.mouth = MouthState::Normal;
        let silent = drive(&rig, &cfg, &state, 1000.0 / 7.0 / 4.0);
        assert_eq!(silent.morphs[0].weight, 0.0);
    }
}
