//! Grab-and-drag controller
//!
//! Pointer-down over a draggable body starts a drag and disables camera
//! orbiting. While active, the pointer ray is intersected with the floor
//! plane every frame and the body is steered toward the projected point with
//! clamped velocity commands, never teleported, so collision response stays
//! consistent. Only one object is dragged at a time.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier3d::prelude::*;

use crate::sandbox::types::*;

/// Start a drag on pointer-down over a draggable body.
pub fn begin_drag(
    mouse: Res<ButtonInput<MouseButton>>,
    pause: Res<PauseState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    rapier: ReadRapierContext,
    draggables: Query<&Transform, With<Draggable>>,
    mut drag: ResMut<DragState>,
    mut orbit: ResMut<OrbitState>,
) {
    if pause.paused() || drag.active.is_some() || !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        return;
    };
    let Ok(context) = rapier.single() else {
        return;
    };

    let Some((entity, toi)) = context.cast_ray(
        ray.origin,
        *ray.direction,
        f32::MAX,
        true,
        QueryFilter::default(),
    ) else {
        return;
    };
    let Ok(transform) = draggables.get(entity) else {
        return;
    };

    let grab_point = ray.origin + *ray.direction * toi;
    drag.active = Some(ActiveDrag {
        entity,
        grab_offset: transform.translation - grab_point,
    });
    orbit.enabled = false;
}

/// Steer the dragged body toward the pointer's floor-plane projection.
pub fn update_drag(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut drag: ResMut<DragState>,
    mut orbit: ResMut<OrbitState>,
    mut bodies: Query<(&Transform, &mut Velocity), With<Draggable>>,
) {
    let Some(active) = drag.active.as_ref() else {
        return;
    };

    // The object can vanish mid-drag (mode reset, fall sampling); release
    // the drag instead of holding a dead handle.
    let Ok((transform, mut velocity)) = bodies.get_mut(active.entity) else {
        drag.active = None;
        orbit.enabled = true;
        return;
    };

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        return;
    };

    let (plane_point, plane_normal) = floor_plane();
    let Some(hit) = ray_plane_intersection(ray.origin, *ray.direction, plane_point, plane_normal)
    else {
        return;
    };

    let target = Vec3::new(
        hit.x + active.grab_offset.x,
        FLOOR_POSITION.y + DRAG_HOVER_HEIGHT,
        hit.z + active.grab_offset.z,
    );

    velocity.linvel = steer_velocity(transform.translation, target);
    // No spin while held.
    velocity.angvel = Vec3::ZERO;
}

/// End the drag and give the camera back.
pub fn end_drag(
    mouse: Res<ButtonInput<MouseButton>>,
    mut drag: ResMut<DragState>,
    mut orbit: ResMut<OrbitState>,
) {
    if !mouse.just_released(MouseButton::Left) {
        return;
    }
    if drag.active.take().is_some() {
        orbit.enabled = true;
    }
}
