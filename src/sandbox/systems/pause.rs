//! Pause on focus loss
//!
//! Window blur or occlusion sets the pause flag; virtual time pauses (which
//! freezes every timer) and the physics pipeline is deactivated. Focus
//! regained resumes both.

use bevy::prelude::*;
use bevy::window::{WindowFocused, WindowOccluded};
use bevy_rapier3d::prelude::*;

use crate::sandbox::types::PauseState;

/// Fold focus and occlusion messages into the pause flag.
pub fn track_window_focus(
    mut focus_events: MessageReader<WindowFocused>,
    mut occluded_events: MessageReader<WindowOccluded>,
    mut pause: ResMut<PauseState>,
) {
    for event in focus_events.read() {
        pause.focused = event.focused;
    }
    for event in occluded_events.read() {
        pause.occluded = event.occluded;
    }
}

/// Apply pause-flag changes to virtual time and the physics pipeline.
pub fn apply_pause(
    pause: Res<PauseState>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut rapier_config: Query<&mut RapierConfiguration>,
) {
    if !pause.is_changed() {
        return;
    }

    let paused = pause.paused();
    if paused {
        virtual_time.pause();
        info!("paused");
    } else {
        virtual_time.unpause();
        info!("resumed");
    }
    for mut config in rapier_config.iter_mut() {
        config.physics_pipeline_active = !paused;
    }
}
