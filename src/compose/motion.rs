//! Continuous per-frame motion sampling.
//!
//! Everything here is a pure function of (configuration, animation-state
//! snapshot, elapsed milliseconds): blink closure approaches its target
//! exponentially from the last blink edge, the talking mouth chatters on two
//! sinusoids with distinct frequencies, and idle sway layers small
//! oscillations under whatever gesture is active. Smoothing rather than
//! exact timing keeps the motion tolerant of host scheduling jitter.

use std::f64::consts::TAU;

use crate::animation::state::{AnimationState, Gesture, MouthState};
use crate::config::Configuration;
use crate::foundation::math::approach;

/// Eyelid time constant; closure settles well inside the 150 ms pulse.
const BLINK_TAU_MS: f64 = 25.0;
/// Near-zero vertical eye scale while closed.
const EYE_CLOSED: f64 = 0.08;

const MOUTH_FREQ_Y_HZ: f64 = 7.0;
const MOUTH_FREQ_X_HZ: f64 = 4.5;
const SWAY_BOB_HZ: f64 = 0.4;
const SWAY_ROT_HZ: f64 = 0.25;
const ARM_SWAY_HZ: f64 = 0.5;
const HAIR_SWAY_HZ: f64 = 0.45;

/// Sampled continuous motion for one frame.
#[derive(Clone, Copy, Debug)]
pub struct MotionSample {
    /// Vertical eye openness in [EYE_CLOSED, 1].
    pub eye_openness: f64,
    /// Mouth (horizontal, vertical) scale multipliers; (1, 1) when silent.
    pub mouth_scale: (f64, f64),
    /// Idle sway: vertical bob in unit amplitude, rotation in radians.
    pub sway_bob: f64,
    pub sway_rot: f64,
    /// Distinct sway phases for the raised arm and hair groups.
    pub arm_sway: f64,
    pub hair_sway: f64,
    pub gesture: GestureAdjust,
}

/// Per-gesture transform adjustments, layered over the idle sway.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureAdjust {
    /// Root vertical offset in unit amplitude (negative = up).
    pub root_bob: f64,
    /// Head rotation in radians.
    pub head_rot: f64,
    /// Head vertical offset in unit amplitude.
    pub head_bob: f64,
    /// Raised-arm progress in [0, 1].
    pub arm_raise: f64,
    /// Raised-arm rocking in radians.
    pub arm_rot: f64,
}

/// Sample all continuous motion at `now_ms`.
pub fn sample(cfg: &Configuration, state: &AnimationState, now_ms: f64) -> MotionSample {
    let t = now_ms / 1000.0 * cfg.animation_speed;

    let eye_openness = {
        let (from, to) = if state.is_blinking {
            (1.0, EYE_CLOSED)
        } else {
            (EYE_CLOSED, 1.0)
        };
        approach(from, to, now_ms - state.blink_changed_at_ms, BLINK_TAU_MS)
    };

    let mouth_scale = match state.mouth {
        MouthState::Normal => (1.0, 1.0),
        MouthState::Talking => (
            1.0 + 0.12 * (TAU * MOUTH_FREQ_X_HZ * t + 0.9).sin(),
            1.0 + 0.35 * (TAU * MOUTH_FREQ_Y_HZ * t).sin(),
        ),
    };

    let swaying = cfg.enable_idle_animation && !cfg.static_pose;
    let (sway_bob, sway_rot, arm_sway, hair_sway) = if swaying {
        (
            (TAU * SWAY_BOB_HZ * t).sin(),
            0.02 * (TAU * SWAY_ROT_HZ * t + 0.8).sin(),
            0.06 * (TAU * ARM_SWAY_HZ * t + 1.7).sin(),
            0.04 * (TAU * HAIR_SWAY_HZ * t + 2.4).sin(),
        )
    } else {
        (0.0, 0.0, 0.0, 0.0)
    };

    let gesture = if cfg.static_pose {
        GestureAdjust::default()
    } else {
        gesture_adjust(state.active_animation, t)
    };

    MotionSample {
        eye_openness,
        mouth_scale,
        sway_bob,
        sway_rot,
        arm_sway,
        hair_sway,
        gesture,
    }
}

fn gesture_adjust(gesture: Gesture, t: f64) -> GestureAdjust {
    match gesture {
        Gesture::Idle => GestureAdjust::default(),
        Gesture::Wave => GestureAdjust {
            arm_raise: 1.0,
            arm_rot: 0.5 * (TAU * 2.2 * t).sin(),
            ..GestureAdjust::default()
        },
        Gesture::Nod => GestureAdjust {
            head_bob: 0.6 * (TAU * 2.5 * t).sin().max(0.0),
            ..GestureAdjust::default()
        },
        Gesture::Shake => GestureAdjust {
            head_rot: 0.12 * (TAU * 2.5 * t).sin(),
            ..GestureAdjust::default()
        },
        Gesture::Thinking => GestureAdjust {
            head_rot: 0.10,
            arm_raise: 0.8,
            ..GestureAdjust::default()
        },
        Gesture::Jump => GestureAdjust {
            root_bob: -(TAU * 2.0 * t).sin().abs(),
            ..GestureAdjust::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::state::SETTLED_AT_MS;

    fn state() -> AnimationState {
        AnimationState::default()
    }

    #[test]
    fn settled_open_eye_without_blink() {
        let cfg = Configuration::default();
        let m = sample(&cfg, &state(), 0.0);
        assert!((m.eye_openness - 1.0).abs() < 1e-9);
    }

    #[test]
    fn blink_closes_continuously_not_discretely() {
        let cfg = Configuration::default();
        let mut s = state();
        s.is_blinking = true;
        s.blink_changed_at_ms = 1000.0;

        let at_edge = sample(&cfg, &s, 1000.0).eye_openness;
        let shortly = sample(&cfg, &s, 1010.0).eye_openness;
        let settled = sample(&cfg, &s, 1140.0).eye_openness;
        assert_eq!(at_edge, 1.0);
        assert!(shortly < at_edge && shortly > EYE_CLOSED);
        assert!((settled - EYE_CLOSED).abs() < 0.01);
    }

    #[test]
    fn reopen_interpolates_from_closed() {
        let cfg = Configuration::default();
        let mut s = state();
        s.is_blinking = false;
        s.blink_changed_at_ms = 2000.0;

        let shortly = sample(&cfg, &s, 2010.0).eye_openness;
        assert!(shortly > EYE_CLOSED && shortly < 1.0);
        assert!((sample(&cfg, &s, 2500.0).eye_openness - 1.0).abs() < 1e-6);
    }

    #[test]
    fn talking_mouth_oscillates_on_two_frequencies() {
        let cfg = Configuration::default();
        let mut s = state();
        s.mouth = MouthState::Talking;

        let a = sample(&cfg, &s, 100.0).mouth_scale;
        let b = sample(&cfg, &s, 160.0).mouth_scale;
        assert_ne!(a, b);
        assert_ne!(a.0, a.1);

        s.mouth = MouthState::Normal;
        assert_eq!(sample(&cfg, &s, 100.0).mouth_scale, (1.0, 1.0));
    }

    #[test]
    fn static_pose_zeroes_sway_and_gesture() {
        let mut cfg = Configuration::default();
        cfg.static_pose = true;
        let mut s = state();
        s.active_animation = Gesture::Wave;

        let m = sample(&cfg, &s, 777.0);
        assert_eq!(m.sway_bob, 0.0);
        assert_eq!(m.sway_rot, 0.0);
        assert_eq!(m.gesture.arm_raise, 0.0);
    }

    #[test]
    fn sway_requires_idle_animation_enabled() {
        let mut cfg = Configuration::default();
        cfg.enable_idle_animation = false;
        let m = sample(&cfg, &state(), 625.0);
        assert_eq!(m.sway_bob, 0.0);
        assert_eq!(m.hair_sway, 0.0);
    }

    #[test]
    fn animation_speed_scales_oscillators() {
        let mut fast = Configuration::default();
        fast.animation_speed = 2.0;
        let slow = Configuration::default();
        let mut s = state();
        s.mouth = MouthState::Talking;

        // Double speed at t equals single speed at 2t.
        let a = sample(&fast, &s, 400.0).mouth_scale;
        let b = sample(&slow, &s, 800.0).mouth_scale;
        assert!((a.0 - b.0).abs() < 1e-12);
        assert!((a.1 - b.1).abs() < 1e-12);
    }

    #[test]
    fn gestures_adjust_disjoint_targets() {
        let wave = gesture_adjust(Gesture::Wave, 0.3);
        assert_eq!(wave.arm_raise, 1.0);
        assert_eq!(wave.head_rot, 0.0);

        let think = gesture_adjust(Gesture::Thinking, 0.3);
        assert!(think.head_rot > 0.0);
        assert!(think.arm_raise > 0.0);

        let jump = gesture_adjust(Gesture::Jump, 0.3);
        assert!(jump.root_bob <= 0.0);
    }

    #[test]
    fn default_edge_is_settled() {
        assert!(SETTLED_AT_MS < -1.0e8);
    }
}
