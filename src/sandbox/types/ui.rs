//! UI markers, hints, pause state, and cross-system messages

use bevy::prelude::*;

/// Seconds before the grab hint appears on a fresh install.
pub const GRAB_HINT_DELAY_SECONDS: f32 = 5.0;
/// Seconds before the lever hint appears on a fresh install.
pub const LEVER_HINT_DELAY_SECONDS: f32 = 40.0;
/// Seconds a hint stays fully visible.
pub const HINT_VISIBLE_SECONDS: f32 = 5.0;
/// Seconds a hint takes to fade out.
pub const HINT_FADE_SECONDS: f32 = 2.0;

/// The lever was pulled: open the floor and flip the display mode.
#[derive(Message)]
pub struct TrapDoorTriggered;

/// The floor finished resetting to its initial pose.
#[derive(Message)]
pub struct TrapDoorClosed;

/// Full scene reset: clear drops, restore decor, reshuffle the queue.
#[derive(Message)]
pub struct SceneResetRequested;

/// Derived from window focus/occlusion; freezes timers and physics.
#[derive(Resource, Debug)]
pub struct PauseState {
    pub focused: bool,
    pub occluded: bool,
}

impl Default for PauseState {
    fn default() -> Self {
        Self::new_focused()
    }
}

impl PauseState {
    pub fn new_focused() -> Self {
        Self {
            focused: true,
            occluded: false,
        }
    }

    pub fn paused(&self) -> bool {
        !self.focused || self.occluded
    }
}

// UI markers.
#[derive(Component)]
pub struct ModeLeverButton;

#[derive(Component)]
pub struct ModeLeverKnob;

#[derive(Component)]
pub struct ResetButton;

#[derive(Component)]
pub struct HintPopupText;

#[derive(Component)]
pub struct HoverLabelText;

#[derive(Component)]
pub struct FpsOverlayText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    Grab,
    Lever,
}

impl HintKind {
    /// Key-value store flag marking this hint as seen.
    pub fn storage_key(&self) -> &'static str {
        match self {
            HintKind::Grab => "has-seen-grab-hint",
            HintKind::Lever => "has-seen-lever-hint",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            HintKind::Grab => "Click and hold to grab objects",
            HintKind::Lever => "Pull the lever!",
        }
    }

    pub fn delay_seconds(&self) -> f32 {
        match self {
            HintKind::Grab => GRAB_HINT_DELAY_SECONDS,
            HintKind::Lever => LEVER_HINT_DELAY_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintPhase {
    Waiting,
    Visible,
    Fading,
    Done,
}

/// One scheduled hint popup, advanced by elapsed seconds.
#[derive(Debug)]
pub struct HintSchedule {
    pub kind: HintKind,
    pub phase: HintPhase,
    clock: f32,
}

impl HintSchedule {
    pub fn new(kind: HintKind) -> Self {
        Self {
            kind,
            phase: HintPhase::Waiting,
            clock: 0.0,
        }
    }

    /// Advance by `dt` seconds. Returns `true` exactly once, when the hint
    /// finishes fading and should be marked as seen.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.clock += dt;
        match self.phase {
            HintPhase::Waiting => {
                if self.clock >= self.kind.delay_seconds() {
                    self.phase = HintPhase::Visible;
                    self.clock = 0.0;
                }
                false
            }
            HintPhase::Visible => {
                if self.clock >= HINT_VISIBLE_SECONDS {
                    self.phase = HintPhase::Fading;
                    self.clock = 0.0;
                }
                false
            }
            HintPhase::Fading => {
                if self.clock >= HINT_FADE_SECONDS {
                    self.phase = HintPhase::Done;
                    true
                } else {
                    false
                }
            }
            HintPhase::Done => false,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self.phase {
            HintPhase::Visible => 1.0,
            HintPhase::Fading => 1.0 - (self.clock / HINT_FADE_SECONDS).min(1.0),
            _ => 0.0,
        }
    }
}

/// The hints still scheduled this run. Hints whose storage flag is already
/// set are never scheduled, so each shows at most once ever.
#[derive(Resource, Default)]
pub struct HintState {
    pub scheduled: Vec<HintSchedule>,
}

impl HintState {
    /// Schedule every hint whose seen-flag is not set in the store.
    pub fn schedule_unseen(store: &crate::sandbox::storage::KeyValueStore) -> Self {
        let mut state = Self::default();
        for kind in [HintKind::Grab, HintKind::Lever] {
            if !store.hint_seen(kind.storage_key()) {
                state.scheduled.push(HintSchedule::new(kind));
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_waits_then_shows() {
        let mut hint = HintSchedule::new(HintKind::Grab);
        assert_eq!(hint.opacity(), 0.0);

        hint.advance(GRAB_HINT_DELAY_SECONDS - 0.1);
        assert_eq!(hint.phase, HintPhase::Waiting);

        hint.advance(0.2);
        assert_eq!(hint.phase, HintPhase::Visible);
        assert_eq!(hint.opacity(), 1.0);
    }

    #[test]
    fn test_hint_fades_then_reports_seen_once() {
        let mut hint = HintSchedule::new(HintKind::Lever);
        hint.advance(LEVER_HINT_DELAY_SECONDS + 0.1);
        hint.advance(HINT_VISIBLE_SECONDS + 0.1);
        assert_eq!(hint.phase, HintPhase::Fading);
        assert!(hint.opacity() < 1.0);

        let mut seen_reports = 0;
        for _ in 0..300 {
            if hint.advance(0.016) {
                seen_reports += 1;
            }
        }
        assert_eq!(seen_reports, 1);
        assert_eq!(hint.phase, HintPhase::Done);
        assert_eq!(hint.opacity(), 0.0);
    }

    #[test]
    fn test_pause_state_combines_focus_and_occlusion() {
        let mut pause = PauseState::new_focused();
        assert!(!pause.paused());
        pause.focused = false;
        assert!(pause.paused());
        pause.focused = true;
        pause.occluded = true;
        assert!(pause.paused());
    }
}
