//! Timer engine: three independent axes (blink, idle gesture, manual
//! trigger) plus the talk toggle.
//!
//! The engine never reads a wall clock. Pending timers are retained
//! `Option<f64>` deadline slots in host-time milliseconds, and the host
//! drives them through [`AnimationTimerEngine::advance`], which fires every
//! due deadline in chronological order. Cancellation is `None`; a slot holds
//! at most one deadline, so same-axis firings can never stack. All jitter
//! comes from a seeded generator, so one seed replays one schedule.

use crate::animation::state::{AnimationState, Gesture, MouthState};
use crate::config::Configuration;
use crate::foundation::math::{SplitMix64, stable_hash64};

/// Engine timing knobs with the stock defaults.
#[derive(Clone, Copy, Debug)]
pub struct EngineTuning {
    /// Shortest wait between autonomous idle gestures.
    pub idle_min_interval_ms: f64,
    /// Longest wait between autonomous idle gestures.
    pub idle_max_interval_ms: f64,
    /// Hold duration of a gesture, idle-picked or manually triggered.
    pub animation_duration_ms: f64,
    /// Length of the eyelid-closed pulse.
    pub blink_pulse_ms: f64,
    /// Half-width of the uniform jitter around the blink interval.
    pub blink_variance_ms: f64,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            idle_min_interval_ms: 8000.0,
            idle_max_interval_ms: 20000.0,
            animation_duration_ms: 1500.0,
            blink_pulse_ms: 150.0,
            blink_variance_ms: 1000.0,
        }
    }
}

// Deadline slots, in the fixed order used to break exact-time ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    BlinkRelease,
    NextBlink,
    ManualRelease,
    IdleRelease,
    NextIdle,
}

const SLOTS: [Slot; 5] = [
    Slot::BlinkRelease,
    Slot::NextBlink,
    Slot::ManualRelease,
    Slot::IdleRelease,
    Slot::NextIdle,
];

/// Timer-driven animation engine for one character instance.
pub struct AnimationTimerEngine {
    state: AnimationState,
    tuning: EngineTuning,
    blink_interval_ms: f64,
    enable_random_blink: bool,
    enable_idle_animation: bool,
    rng: SplitMix64,
    now_ms: f64,

    blink_release_at: Option<f64>,
    next_blink_at: Option<f64>,
    manual_release_at: Option<f64>,
    idle_release_at: Option<f64>,
    next_idle_at: Option<f64>,
}

impl AnimationTimerEngine {
    /// Create an engine at time zero with the stock tuning.
    pub fn new(cfg: &Configuration, seed: u64) -> Self {
        Self::with_tuning(cfg, seed, EngineTuning::default())
    }

    pub fn with_tuning(cfg: &Configuration, seed: u64, tuning: EngineTuning) -> Self {
        let mut engine = Self {
            state: AnimationState::default(),
            tuning,
            blink_interval_ms: cfg.blink_interval_ms,
            enable_random_blink: cfg.enable_random_blink,
            enable_idle_animation: cfg.enable_idle_animation,
            rng: SplitMix64::new(stable_hash64(seed, "animation-timers")),
            now_ms: 0.0,
            blink_release_at: None,
            next_blink_at: None,
            manual_release_at: None,
            idle_release_at: None,
            next_idle_at: None,
        };
        if engine.enable_random_blink {
            engine.next_blink_at = Some(engine.blink_deadline_from(0.0));
        }
        if engine.enable_idle_animation {
            engine.next_idle_at = Some(engine.idle_deadline_from(0.0));
        }
        engine
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Pending blink firing, if scheduled. Exposed for direct unit testing
    /// without a render.
    pub fn pending_blink_at(&self) -> Option<f64> {
        self.next_blink_at
    }

    pub fn pending_idle_gesture_at(&self) -> Option<f64> {
        self.next_idle_at
    }

    pub fn pending_manual_release_at(&self) -> Option<f64> {
        self.manual_release_at
    }

    /// Advance host time to `now_ms`, firing every due deadline in
    /// chronological order (stable slot order on exact ties).
    pub fn advance(&mut self, now_ms: f64) {
        loop {
            let mut due: Option<(Slot, f64)> = None;
            for slot in SLOTS {
                if let Some(at) = self.deadline(slot)
                    && at <= now_ms
                    && due.is_none_or(|(_, best)| at < best)
                {
                    due = Some((slot, at));
                }
            }
            let Some((slot, at)) = due else {
                break;
            };
            self.fire(slot, at);
        }
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
    }

    /// Trigger a gesture immediately, preempting the idle axis.
    ///
    /// A trigger that arrives while a previous manual gesture is still held
    /// replaces its pending reset; resets never stack.
    pub fn trigger_animation(&mut self, gesture: Gesture) {
        tracing::debug!(?gesture, "manual trigger");
        self.state.is_manual_animation = true;
        self.state.active_animation = gesture;
        self.manual_release_at = Some(self.now_ms + self.tuning.animation_duration_ms);
        // Idle axis is fully suspended while the manual gesture holds.
        self.next_idle_at = None;
        self.idle_release_at = None;
    }

    pub fn set_talking(&mut self, talking: bool) {
        self.state.mouth = if talking {
            MouthState::Talking
        } else {
            MouthState::Normal
        };
    }

    pub fn set_enable_random_blink(&mut self, enabled: bool) {
        if enabled == self.enable_random_blink {
            return;
        }
        self.enable_random_blink = enabled;
        if enabled {
            self.next_blink_at = Some(self.blink_deadline_from(self.now_ms));
        } else {
            self.next_blink_at = None;
            self.blink_release_at = None;
            if self.state.is_blinking {
                self.state.is_blinking = false;
                self.state.blink_changed_at_ms = self.now_ms;
            }
        }
    }

    pub fn set_enable_idle_animation(&mut self, enabled: bool) {
        if enabled == self.enable_idle_animation {
            return;
        }
        self.enable_idle_animation = enabled;
        if enabled {
            if !self.state.is_manual_animation && self.idle_release_at.is_none() {
                self.next_idle_at = Some(self.idle_deadline_from(self.now_ms));
            }
        } else {
            // An idle gesture already in flight still releases normally; it
            // just won't reschedule.
            self.next_idle_at = None;
        }
    }

    /// Cancel every pending deadline. After teardown a late `advance` call
    /// mutates nothing.
    pub fn teardown(&mut self) {
        tracing::debug!("engine teardown");
        self.blink_release_at = None;
        self.next_blink_at = None;
        self.manual_release_at = None;
        self.idle_release_at = None;
        self.next_idle_at = None;
    }

    fn deadline(&self, slot: Slot) -> Option<f64> {
        match slot {
            Slot::BlinkRelease => self.blink_release_at,
            Slot::NextBlink => self.next_blink_at,
            Slot::ManualRelease => self.manual_release_at,
            Slot::IdleRelease => self.idle_release_at,
            Slot::NextIdle => self.next_idle_at,
        }
    }

    fn fire(&mut self, slot: Slot, at: f64) {
        // Fired callbacks see the firing instant as "now": reschedules are
        // relative to the deadline, not to however late the host advanced.
        if at > self.now_ms {
            self.now_ms = at;
        }
        match slot {
            Slot::NextBlink => {
                self.state.is_blinking = true;
                self.state.blink_changed_at_ms = at;
                self.blink_release_at = Some(at + self.tuning.blink_pulse_ms);
                self.next_blink_at = Some(self.blink_deadline_from(at));
            }
            Slot::BlinkRelease => {
                self.state.is_blinking = false;
                self.state.blink_changed_at_ms = at;
                self.blink_release_at = None;
            }
            Slot::NextIdle => {
                self.next_idle_at = None;
                if !self.state.is_manual_animation {
                    let pick = self.rng.index(Gesture::TRIGGERABLE.len());
                    let gesture = Gesture::TRIGGERABLE[pick];
                    tracing::debug!(?gesture, "idle gesture");
                    self.state.active_animation = gesture;
                    self.idle_release_at = Some(at + self.tuning.animation_duration_ms);
                }
            }
            Slot::IdleRelease => {
                self.idle_release_at = None;
                if !self.state.is_manual_animation {
                    self.state.active_animation = Gesture::Idle;
                    if self.enable_idle_animation {
                        self.next_idle_at = Some(self.idle_deadline_from(at));
                    }
                }
            }
            Slot::ManualRelease => {
                self.manual_release_at = None;
                self.state.active_animation = Gesture::Idle;
                self.state.is_manual_animation = false;
                if self.enable_idle_animation {
                    self.next_idle_at = Some(self.idle_deadline_from(at));
                }
            }
        }
    }

    fn blink_deadline_from(&mut self, at: f64) -> f64 {
        let jitter = self
            .rng
            .uniform(-self.tuning.blink_variance_ms, self.tuning.blink_variance_ms);
        // A very short configured interval still may not land inside the
        // previous pulse.
        (at + self.blink_interval_ms + jitter).max(at + self.tuning.blink_pulse_ms)
    }

    fn idle_deadline_from(&mut self, at: f64) -> f64 {
        at + self
            .rng
            .uniform(self.tuning.idle_min_interval_ms, self.tuning.idle_max_interval_ms)
    }
}
