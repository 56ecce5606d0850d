//! Orbit camera control
//!
//! Left-drag rotates, the wheel zooms, both clamped and both suppressed by
//! the camera-enable flag while an object is being dragged.

use bevy::input::mouse::{AccumulatedMouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::sandbox::types::*;

const ROTATE_RADIANS_PER_PIXEL: f32 = 0.005;
const ZOOM_PER_LINE: f32 = 0.5;
const ZOOM_PER_PIXEL: f32 = 0.01;

pub fn orbit_camera(
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    mut wheel: MessageReader<MouseWheel>,
    mut orbit: ResMut<OrbitState>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    if orbit.enabled {
        if mouse.pressed(MouseButton::Left) && motion.delta != Vec2::ZERO {
            orbit.apply_rotation(motion.delta * ROTATE_RADIANS_PER_PIXEL * ROTATE_SPEED);
        }

        let mut zoom = 0.0;
        for event in wheel.read() {
            zoom += match event.unit {
                MouseScrollUnit::Line => event.y * ZOOM_PER_LINE,
                MouseScrollUnit::Pixel => event.y * ZOOM_PER_PIXEL,
            };
        }
        if zoom != 0.0 {
            orbit.apply_zoom(zoom);
        }
    } else {
        // Drop queued wheel input so it doesn't replay when the drag ends.
        wheel.clear();
    }

    for mut transform in camera_query.iter_mut() {
        *transform = orbit.camera_transform();
    }
}
