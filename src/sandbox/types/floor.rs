//! Floor geometry and the trap-door state machine
//!
//! The floor is two hinged panels meeting at the center, tilted slightly
//! around X. Triggering the trap door turns both panels dynamic so they swing
//! open on their revolute joints; after a fixed delay each panel is
//! interpolated back to its recorded initial pose and frozen again.

use bevy::prelude::*;

/// Center of the floor group in world space.
pub const FLOOR_POSITION: Vec3 = Vec3::new(0.0, -2.0, 0.0);
/// The floor is tilted slightly around X so objects drift forward.
pub const FLOOR_TILT_X: f32 = 0.1;
/// Full extents of one panel (a 10 x 0.2 x 20 slab).
pub const PANEL_SIZE: Vec3 = Vec3::new(10.0, 0.2, 20.0);
/// Panel slab offset from the body origin toward the outer edge.
pub const PANEL_MESH_OFFSET_X: f32 = 5.0;
/// Hinge anchor offset from the floor center.
pub const ANCHOR_OFFSET_X: f32 = 10.0;
pub const PANEL_MASS: f32 = 100.0;
pub const PANEL_ANGULAR_DAMPING: f32 = 2.0;
pub const PANEL_LINEAR_DAMPING: f32 = 0.2;
pub const PANEL_FRICTION: f32 = 1.0;
pub const PANEL_RESTITUTION: f32 = 0.2;
/// Seconds the door stays open before the reset interpolation starts.
pub const RESET_DELAY_SECONDS: f32 = 3.5;
/// Seconds the reset interpolation takes.
pub const RESET_DURATION_SECONDS: f32 = 1.5;

/// Orientation of the whole floor group.
pub fn floor_rotation() -> Quat {
    Quat::from_rotation_x(FLOOR_TILT_X)
}

/// The floor plane in world space as (point, unit normal).
pub fn floor_plane() -> (Vec3, Vec3) {
    (FLOOR_POSITION, floor_rotation() * Vec3::Y)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSide {
    Left,
    Right,
}

impl PanelSide {
    /// X sign of the side's outer edge.
    pub fn sign(&self) -> f32 {
        match self {
            PanelSide::Left => -1.0,
            PanelSide::Right => 1.0,
        }
    }

    /// Swing limits around the hinge axis, in radians.
    pub fn hinge_limits(&self) -> [f32; 2] {
        match self {
            PanelSide::Left => [0.0, std::f32::consts::FRAC_PI_2],
            PanelSide::Right => [-std::f32::consts::FRAC_PI_2, 0.0],
        }
    }
}

/// One hinged floor panel, with its recorded initial pose.
#[derive(Component, Debug, Clone)]
pub struct TrapDoorPanel {
    pub side: PanelSide,
    pub initial_translation: Vec3,
    pub initial_rotation: Quat,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrapDoorPhase {
    /// Panels fixed at their initial pose.
    #[default]
    Idle,
    /// Panels dynamic, swinging on their hinges; counting down to the reset.
    Open { countdown: f32 },
    /// Interpolating panels back to their initial pose.
    Resetting { elapsed: f32 },
}

/// What `TrapDoorState::advance` asks the caller to do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapDoorStep {
    None,
    /// Blend each panel toward its initial pose by the given progress and
    /// zero its velocities.
    Blend,
    /// Snap panels to their exact initial pose and refreeze them.
    Finish,
}

#[derive(Resource, Debug, Default)]
pub struct TrapDoorState {
    pub phase: TrapDoorPhase,
}

impl TrapDoorState {
    /// True whenever the floor is not in its normal, closed configuration.
    pub fn is_open(&self) -> bool {
        self.phase != TrapDoorPhase::Idle
    }

    /// Rising-edge trigger. Only fires from `Idle`; re-triggering an open
    /// door is ignored, matching the lever being inert mid-cycle.
    pub fn trigger(&mut self) -> bool {
        if self.phase == TrapDoorPhase::Idle {
            self.phase = TrapDoorPhase::Open {
                countdown: RESET_DELAY_SECONDS,
            };
            true
        } else {
            false
        }
    }

    /// Advance the state machine by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> TrapDoorStep {
        match self.phase {
            TrapDoorPhase::Idle => TrapDoorStep::None,
            TrapDoorPhase::Open { countdown } => {
                let remaining = countdown - dt;
                if remaining <= 0.0 {
                    self.phase = TrapDoorPhase::Resetting { elapsed: 0.0 };
                } else {
                    self.phase = TrapDoorPhase::Open {
                        countdown: remaining,
                    };
                }
                TrapDoorStep::None
            }
            TrapDoorPhase::Resetting { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= RESET_DURATION_SECONDS {
                    self.phase = TrapDoorPhase::Idle;
                    TrapDoorStep::Finish
                } else {
                    self.phase = TrapDoorPhase::Resetting { elapsed };
                    TrapDoorStep::Blend
                }
            }
        }
    }

    /// Interpolation progress while resetting, in [0, 1].
    pub fn reset_progress(&self) -> f32 {
        match self.phase {
            TrapDoorPhase::Resetting { elapsed } => (elapsed / RESET_DURATION_SECONDS).min(1.0),
            _ => 0.0,
        }
    }
}

/// Blend a pose toward a target: linear for position, spherical for rotation.
/// `progress` of 1 lands exactly on the target.
pub fn blend_pose(
    current: (Vec3, Quat),
    target: (Vec3, Quat),
    progress: f32,
) -> (Vec3, Quat) {
    (
        current.0.lerp(target.0, progress),
        current.1.slerp(target.1, progress),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_only_from_idle() {
        let mut state = TrapDoorState::default();
        assert!(state.trigger());
        assert!(!state.trigger());
        assert!(state.is_open());
    }

    #[test]
    fn test_open_counts_down_to_reset() {
        let mut state = TrapDoorState::default();
        state.trigger();
        assert_eq!(state.advance(RESET_DELAY_SECONDS - 0.1), TrapDoorStep::None);
        assert!(matches!(state.phase, TrapDoorPhase::Open { .. }));
        assert_eq!(state.advance(0.2), TrapDoorStep::None);
        assert!(matches!(state.phase, TrapDoorPhase::Resetting { .. }));
    }

    #[test]
    fn test_reset_finishes_after_duration() {
        let mut state = TrapDoorState::default();
        state.trigger();
        state.advance(RESET_DELAY_SECONDS + 0.01);

        let mut finished = false;
        for _ in 0..200 {
            match state.advance(0.016) {
                TrapDoorStep::Finish => {
                    finished = true;
                    break;
                }
                TrapDoorStep::Blend => {
                    assert!(state.reset_progress() > 0.0);
                    assert!(state.reset_progress() < 1.0);
                }
                TrapDoorStep::None => panic!("reset stalled"),
            }
        }
        assert!(finished);
        assert_eq!(state.phase, TrapDoorPhase::Idle);
        assert!(!state.is_open());
    }

    #[test]
    fn test_blend_pose_reaches_target_exactly() {
        let current = (
            Vec3::new(3.0, -4.0, 1.0),
            Quat::from_rotation_z(0.7),
        );
        let target = (FLOOR_POSITION, floor_rotation());
        let (pos, rot) = blend_pose(current, target, 1.0);
        assert!(pos.abs_diff_eq(target.0, 1e-6));
        assert!(rot.abs_diff_eq(target.1, 1e-6));
    }

    #[test]
    fn test_blend_pose_moves_monotonically_closer() {
        let current = (Vec3::splat(5.0), Quat::from_rotation_y(1.0));
        let target = (Vec3::ZERO, Quat::IDENTITY);
        let (half, _) = blend_pose(current, target, 0.5);
        assert!(half.length() < current.0.length());
    }

    #[test]
    fn test_hinge_limits_mirror() {
        let [l_min, l_max] = PanelSide::Left.hinge_limits();
        let [r_min, r_max] = PanelSide::Right.hinge_limits();
        assert_eq!(l_min, -r_max);
        assert_eq!(l_max, -r_min);
    }

    #[test]
    fn test_floor_plane_normal_is_tilted_unit_y() {
        let (point, normal) = floor_plane();
        assert_eq!(point, FLOOR_POSITION);
        assert!((normal.length() - 1.0).abs() < 1e-6);
        assert!(normal.y > 0.99);
        assert!(normal.z > 0.0);
    }
}
