//! Timer-axis semantics under a simulated host clock.

use avakit::{AnimationTimerEngine, Configuration, Gesture};

fn engine_with_seed(seed: u64) -> AnimationTimerEngine {
    AnimationTimerEngine::new(&Configuration::default(), seed)
}

/// With blinkInterval=3000, a firing sets `is_blinking`, clears it exactly
/// 150 ms later, and schedules the next blink within [2000, 4000] ms of the
/// firing.
#[test]
fn blink_pulse_timing() {
    let mut engine = engine_with_seed(11);
    let fire = engine.pending_blink_at().expect("blink scheduled");

    engine.advance(fire);
    assert!(engine.state().is_blinking);

    engine.advance(fire + 150.0);
    assert!(!engine.state().is_blinking);

    let next = engine.pending_blink_at().expect("blink rescheduled");
    assert!(
        (fire + 2000.0..fire + 4000.0).contains(&next),
        "next blink at {next}, fired at {fire}"
    );
}

/// Blink scheduling across many cycles stays inside the jitter window and
/// never stacks releases.
#[test]
fn blink_jitter_stays_bounded_over_many_cycles() {
    let mut engine = engine_with_seed(5);
    let mut last_fire = 0.0;
    for _ in 0..50 {
        let fire = engine.pending_blink_at().unwrap();
        assert!(fire - last_fire <= 4000.0 + 150.0);
        engine.advance(fire);
        assert!(engine.state().is_blinking);
        engine.advance(fire + 150.0);
        assert!(!engine.state().is_blinking);
        last_fire = fire;
    }
}

/// A manual trigger overrides an autonomous gesture immediately, holds for
/// the animation duration, then resets, and the idle axis never overwrites
/// the gesture while the manual flag is up.
#[test]
fn manual_trigger_priority() {
    let mut engine = engine_with_seed(23);

    // Let the idle axis pick something autonomously.
    let idle_at = engine.pending_idle_gesture_at().unwrap();
    engine.advance(idle_at);
    assert_ne!(engine.state().active_animation, Gesture::Idle);
    assert!(!engine.state().is_manual_animation);

    engine.trigger_animation(Gesture::Thinking);
    assert_eq!(engine.state().active_animation, Gesture::Thinking);
    assert!(engine.state().is_manual_animation);

    // While manual is up, nothing the idle axis had pending may land.
    assert!(engine.pending_idle_gesture_at().is_none());
    let release = engine.pending_manual_release_at().unwrap();
    engine.advance(release - 1.0);
    assert_eq!(engine.state().active_animation, Gesture::Thinking);

    engine.advance(release);
    assert_eq!(engine.state().active_animation, Gesture::Idle);
    assert!(!engine.state().is_manual_animation);
}

#[test]
fn reentrant_triggers_never_stack_resets() {
    let mut engine = engine_with_seed(31);
    engine.advance(50.0);
    engine.trigger_animation(Gesture::Wave);
    engine.advance(800.0);
    engine.trigger_animation(Gesture::Shake);

    // The wave's reset time passes without effect.
    engine.advance(50.0 + 1500.0);
    assert_eq!(engine.state().active_animation, Gesture::Shake);
    assert!(engine.state().is_manual_animation);

    engine.advance(800.0 + 1500.0);
    assert_eq!(engine.state().active_animation, Gesture::Idle);
}

#[test]
fn idle_axis_runs_full_cycles_when_undisturbed() {
    let mut engine = engine_with_seed(47);
    let mut releases = 0;
    for _ in 0..10 {
        let fire = engine.pending_idle_gesture_at().unwrap();
        engine.advance(fire);
        assert!(Gesture::TRIGGERABLE.contains(&engine.state().active_animation));
        let t = fire + 1500.0;
        engine.advance(t);
        assert_eq!(engine.state().active_animation, Gesture::Idle);
        let next = engine.pending_idle_gesture_at().unwrap();
        assert!((t + 8000.0..t + 20000.0).contains(&next));
        releases += 1;
    }
    assert_eq!(releases, 10);
}

#[test]
fn teardown_prevents_late_mutation() {
    let mut engine = engine_with_seed(61);
    engine.trigger_animation(Gesture::Nod);
    engine.teardown();
    let before = *engine.state();
    engine.advance(1.0e7);
    assert_eq!(*engine.state(), before);
}

#[test]
fn blink_disabled_from_config_never_schedules() {
    let mut cfg = Configuration::default();
    cfg.enable_random_blink = false;
    let mut engine = AnimationTimerEngine::new(&cfg, 3);
    assert!(engine.pending_blink_at().is_none());
    engine.advance(120_000.0);
    assert!(!engine.state().is_blinking);
}
