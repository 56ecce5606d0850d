//! Hover tracking and the click shockwave
//!
//! A quick press-release on empty space pushes every body within a radius of
//! the click's floor-plane intersection away from it. Clicks over draggable
//! objects, clicks held too long, and clicks during a drag do nothing.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier3d::prelude::*;

use crate::sandbox::types::*;

/// Refresh what the pointer is over by casting into the physics world.
pub fn track_pointer_hover(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    rapier: ReadRapierContext,
    draggables: Query<&DropObject, With<Draggable>>,
    icons: Query<&SocialIcon>,
    catalogs: Res<Catalogs>,
    mut pointer: ResMut<PointerState>,
) {
    pointer.hovered_entity = None;
    pointer.hovering_draggable = false;
    pointer.hovered_label = None;

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

    let Some((entity, _toi)) = context.cast_ray(
        ray.origin,
        *ray.direction,
        f32::MAX,
        true,
        QueryFilter::default(),
    ) else {
        return;
    };

    pointer.hovered_entity = Some(entity);
    if let Ok(drop) = draggables.get(entity) {
        pointer.hovering_draggable = true;
        pointer.hovered_label = catalogs
            .find(&drop.config_id)
            .and_then(|entry| entry.label.clone());
    } else if let Ok(icon) = icons.get(entity) {
        pointer.hovered_label = Some(icon.label.clone());
    }
}

/// Detect qualifying clicks and apply the radial impulse field.
#[allow(clippy::too_many_arguments)]
pub fn detect_shockwave_clicks(
    mouse: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    pause: Res<PauseState>,
    drag: Res<DragState>,
    mut pointer: ResMut<PointerState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut bodies: Query<(&Transform, &mut ExternalImpulse)>,
) {
    if pause.paused() {
        pointer.click_started_at = None;
        return;
    }

    if mouse.just_pressed(MouseButton::Left) {
        // Presses over draggable objects belong to the drag controller.
        if !pointer.hovering_draggable && drag.active.is_none() {
            pointer.click_started_at = Some(time.elapsed_secs());
        }
    }

    if !mouse.just_released(MouseButton::Left) {
        return;
    }
    let Some(started_at) = pointer.click_started_at.take() else {
        return;
    };

    let held = time.elapsed_secs() - started_at;
    if !shockwave_allowed(pointer.hovering_draggable, drag.active.is_some(), held) {
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

    let (plane_point, plane_normal) = floor_plane();
    let Some(center) = ray_plane_intersection(ray.origin, *ray.direction, plane_point, plane_normal)
    else {
        return;
    };

    let mut pushed = 0;
    for (transform, mut impulse) in bodies.iter_mut() {
        if let Some(push) = shockwave_impulse(center, transform.translation) {
            impulse.impulse += push;
            pushed += 1;
        }
    }
    info!("shockwave at {:?} pushed {} bodies", center, pushed);
}
