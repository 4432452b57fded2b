/// Closed set of named gestures.
///
/// `Idle` is the rest state; the others are short triggered animations, held
/// for a fixed duration and then released back to `Idle`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Idle,
    Wave,
    Nod,
    Shake,
    Thinking,
    Jump,
}

impl Gesture {
    /// Gestures the idle axis may pick from (everything except `Idle`).
    pub const TRIGGERABLE: [Gesture; 5] = [
        Gesture::Wave,
        Gesture::Nod,
        Gesture::Shake,
        Gesture::Thinking,
        Gesture::Jump,
    ];
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MouthState {
    #[default]
    Normal,
    Talking,
}

/// Timestamp far enough in the past that any smoothed motion derived from it
/// has fully settled by time zero.
pub(crate) const SETTLED_AT_MS: f64 = -1.0e9;

/// Live animation state for one character instance.
///
/// Owned by the timer engine and mutated only through its operations;
/// composers read it by shared reference.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AnimationState {
    /// True only during the short blink pulse.
    pub is_blinking: bool,
    /// Timestamp (ms) of the last `is_blinking` edge. Composers interpolate
    /// the eyelid from this edge, so blinks never snap.
    pub blink_changed_at_ms: f64,
    /// Currently active gesture (`Idle` when none).
    pub active_animation: Gesture,
    /// True while a manual trigger is overriding the idle axis.
    pub is_manual_animation: bool,
    pub mouth: MouthState,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            is_blinking: false,
            blink_changed_at_ms: SETTLED_AT_MS,
            active_animation: Gesture::Idle,
            is_manual_animation: false,
            mouth: MouthState::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggerable_excludes_idle() {
        assert!(!Gesture::TRIGGERABLE.contains(&Gesture::Idle));
        assert_eq!(Gesture::TRIGGERABLE.len(), 5);
    }

    #[test]
    fn default_state_is_settled_idle() {
        let s = AnimationState::default();
        assert!(!s.is_blinking);
        assert!(!s.is_manual_animation);
        assert_eq!(s.active_animation, Gesture::Idle);
        assert_eq!(s.mouth, MouthState::Normal);
        assert!(s.blink_changed_at_ms < 0.0);
    }
}
