//! Trap-door controller
//!
//! The lever raises `TrapDoorTriggered`. On the rising edge the two floor
//! panels and the floating decor switch to dynamic bodies and the display
//! mode flips. After the open delay, each panel is interpolated back to its
//! recorded initial pose with velocities zeroed each step so the
//! interpolation never fights the solver, then refrozen exactly in place.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::sandbox::types::*;

/// Open the floor on the trigger's rising edge and flip the display mode.
#[allow(clippy::type_complexity)]
pub fn handle_trap_door_trigger(
    mut triggers: MessageReader<TrapDoorTriggered>,
    mut commands: Commands,
    mut trap: ResMut<TrapDoorState>,
    mut mode: ResMut<DisplayMode>,
    mut spawner: ResMut<SpawnerState>,
    mut panels: Query<&mut RigidBody, With<TrapDoorPanel>>,
    mut decor: Query<(Entity, &mut RigidBody), (With<FloatingDecor>, Without<TrapDoorPanel>)>,
) {
    if triggers.read().next().is_none() {
        return;
    }
    if !trap.trigger() {
        // The lever is inert while the door is already cycling.
        return;
    }

    *mode = mode.toggled();
    spawner.phase = SpawnerPhase::Draining;

    for mut body in panels.iter_mut() {
        *body = RigidBody::Dynamic;
    }
    for (entity, mut body) in decor.iter_mut() {
        *body = RigidBody::Dynamic;
        // A restore still fading from the previous cycle is cancelled here,
        // never left running against a dynamic body.
        commands.entity(entity).remove::<DecorRestore>();
    }

    info!("trap door open, switching to {} mode", mode.name());
}

/// Advance the open/reset cycle and drive the reset interpolation.
pub fn advance_trap_door(
    time: Res<Time>,
    pause: Res<PauseState>,
    mut trap: ResMut<TrapDoorState>,
    mut panels: Query<(&TrapDoorPanel, &mut RigidBody, &mut Transform, &mut Velocity)>,
    mut closed: MessageWriter<TrapDoorClosed>,
) {
    if pause.paused() || !trap.is_open() {
        return;
    }

    match trap.advance(time.delta_secs()) {
        TrapDoorStep::None => {}
        TrapDoorStep::Blend => {
            let progress = trap.reset_progress();
            for (panel, _, mut transform, mut velocity) in panels.iter_mut() {
                let (translation, rotation) = blend_pose(
                    (transform.translation, transform.rotation),
                    (panel.initial_translation, panel.initial_rotation),
                    progress,
                );
                transform.translation = translation;
                transform.rotation = rotation;
                *velocity = Velocity::zero();
            }
        }
        TrapDoorStep::Finish => {
            for (panel, mut body, mut transform, mut velocity) in panels.iter_mut() {
                transform.translation = panel.initial_translation;
                transform.rotation = panel.initial_rotation;
                *velocity = Velocity::zero();
                *body = RigidBody::Fixed;
            }
            closed.write(TrapDoorClosed);
            info!("trap door reset complete");
        }
    }
}
