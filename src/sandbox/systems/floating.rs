//! Floating decor animation
//!
//! The title text and social icons bob while the scene is closed, fall with
//! the trap door, and are restored (pose snap, then a fade back in) once the
//! door has reset. Social icons also scale and tint under the pointer.

use bevy::color::{Alpha, Mix};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::sandbox::types::*;

/// Gentle vertical bob of the decor visuals while the door is closed.
pub fn bob_decor_visuals(
    time: Res<Time>,
    trap: Res<TrapDoorState>,
    mut visuals: Query<(&BobbingVisual, &mut Transform)>,
) {
    if trap.is_open() {
        return;
    }
    let wave = (time.elapsed_secs() * BOB_RATE).sin() * BOB_AMPLITUDE;
    for (visual, mut transform) in visuals.iter_mut() {
        transform.translation.y = visual.base_y + wave;
    }
}

/// Hover feedback on social icons: scale toward 1.1 and tint toward the
/// highlight color, both eased per frame.
pub fn animate_social_icons(
    pointer: Res<PointerState>,
    trap: Res<TrapDoorState>,
    icons: Query<(Entity, &SocialIcon, &Children)>,
    mut visuals: Query<(&mut Transform, &MeshMaterial3d<StandardMaterial>), With<IconVisual>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if trap.is_open() {
        return;
    }

    for (entity, icon, children) in icons.iter() {
        let hovered = pointer.hovered_entity == Some(entity);
        let target_scale = if hovered { ICON_HOVER_SCALE } else { 1.0 };
        let target_color = if hovered {
            icon_hover_tint()
        } else {
            icon.base_color
        };

        for child in children.iter() {
            let Ok((mut transform, material_handle)) = visuals.get_mut(child) else {
                continue;
            };
            transform.scale = transform
                .scale
                .lerp(Vec3::splat(target_scale), ICON_HOVER_LERP);
            if let Some(material) = materials.get_mut(&material_handle.0) {
                let alpha = material.base_color.alpha();
                material.base_color = material
                    .base_color
                    .mix(&target_color, ICON_HOVER_LERP)
                    .with_alpha(alpha);
            }
        }
    }
}

/// Once the trap door has closed, give every decor body a restore animation.
pub fn restore_decor_after_close(
    mut closed: MessageReader<TrapDoorClosed>,
    mut commands: Commands,
    time: Res<Time>,
    pause: Res<PauseState>,
    mut decor: Query<(
        Entity,
        &FloatingDecor,
        Option<&mut DecorRestore>,
        &mut RigidBody,
        &mut Transform,
        &mut Velocity,
        &Children,
    )>,
    visuals: Query<&MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if closed.read().next().is_some() {
        for (entity, ..) in decor.iter() {
            commands.entity(entity).insert(DecorRestore::new());
        }
        return;
    }

    if pause.paused() {
        return;
    }

    for (entity, anchor, restore, mut body, mut transform, mut velocity, children) in
        decor.iter_mut()
    {
        let Some(mut restore) = restore else {
            continue;
        };

        if !restore.snapped {
            restore.delay.tick(time.delta());
            if restore.delay.finished() {
                transform.translation = anchor.initial_translation;
                transform.rotation = anchor.initial_rotation;
                *velocity = Velocity::zero();
                *body = RigidBody::Fixed;
                restore.snapped = true;
            }
        } else {
            restore.fade.tick(time.delta());
        }

        set_decor_opacity(children, &visuals, &mut materials, restore.opacity());

        if restore.snapped && restore.fade.finished() {
            commands.entity(entity).remove::<DecorRestore>();
        }
    }
}

/// Manual reset: snap decor home immediately, fully opaque.
#[allow(clippy::type_complexity)]
pub fn reset_decor_instantly(
    mut resets: MessageReader<SceneResetRequested>,
    mut commands: Commands,
    mut decor: Query<(
        Entity,
        &FloatingDecor,
        &mut RigidBody,
        &mut Transform,
        &mut Velocity,
        &Children,
    )>,
    visuals: Query<&MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if resets.read().next().is_none() {
        return;
    }

    for (entity, anchor, mut body, mut transform, mut velocity, children) in decor.iter_mut() {
        transform.translation = anchor.initial_translation;
        transform.rotation = anchor.initial_rotation;
        *velocity = Velocity::zero();
        *body = RigidBody::Fixed;
        commands.entity(entity).remove::<DecorRestore>();
        set_decor_opacity(children, &visuals, &mut materials, 1.0);
    }
}

fn set_decor_opacity(
    children: &Children,
    visuals: &Query<&MeshMaterial3d<StandardMaterial>>,
    materials: &mut Assets<StandardMaterial>,
    opacity: f32,
) {
    for child in children.iter() {
        if let Ok(material_handle) = visuals.get(child) {
            if let Some(material) = materials.get_mut(&material_handle.0) {
                material.base_color = material.base_color.with_alpha(opacity);
            }
        }
    }
}
