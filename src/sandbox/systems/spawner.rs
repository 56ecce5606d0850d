//! Spawner systems
//!
//! Releases queued catalog entries on the spawn interval, samples object
//! heights on the sampling interval, respawns or drains fallen objects
//! depending on the trap door, and rebuilds the cycle after a reset.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::sandbox::meshes::{create_drop_mesh_and_collider, scene_collider};
use crate::sandbox::textures::SceneTextures;
use crate::sandbox::types::*;

/// Start the first spawn cycle when the scene mounts.
pub fn start_spawn_cycle(
    mut spawner: ResMut<SpawnerState>,
    config: Res<SpawnerConfig>,
    catalogs: Res<Catalogs>,
    mode: Res<DisplayMode>,
) {
    spawner.apply_intervals(&config);
    spawner.begin_cycle(catalogs.active(*mode), &mut rand::thread_rng());
    info!(
        "spawn cycle started: {} entries in {} mode",
        spawner.queue.len(),
        mode.name()
    );
}

/// Release pending respawns immediately and queued entries on the interval.
/// Inert while paused or while the trap door is open.
#[allow(clippy::too_many_arguments)]
pub fn release_queued_drops(
    mut commands: Commands,
    time: Res<Time>,
    pause: Res<PauseState>,
    trap: Res<TrapDoorState>,
    config: Res<SpawnerConfig>,
    mut spawner: ResMut<SpawnerState>,
    catalogs: Res<Catalogs>,
    mode: Res<DisplayMode>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scene_textures: Res<SceneTextures>,
) {
    if pause.paused() {
        return;
    }
    if trap.is_open() {
        spawner.phase = SpawnerPhase::Draining;
        return;
    }

    let mut rng = rand::thread_rng();

    // Fallen objects respawn on the next frame, not the next interval tick.
    for config_id in spawner.take_respawns() {
        if let Some(entry) = catalogs.find(&config_id) {
            let id = spawner.allocate_id();
            spawn_drop(
                &mut commands,
                &mut meshes,
                &mut materials,
                &scene_textures,
                entry,
                id,
                &mut rng,
            );
        }
    }

    spawner.release_timer.tick(time.delta());
    if spawner.release_timer.just_finished() {
        let next = match config.population {
            PopulationMode::PerEntry => spawner.next_queued(),
            PopulationMode::Unbounded { .. } => {
                let active = catalogs.active(*mode);
                (!active.is_empty())
                    .then(|| active[rng.gen_range(0..active.len())].id.clone())
            }
        };
        if let Some(config_id) = next {
            if let Some(entry) = catalogs.find(&config_id) {
                let id = spawner.allocate_id();
                info!("releasing {}", entry.id);
                spawn_drop(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    &scene_textures,
                    entry,
                    id,
                    &mut rng,
                );
            }
        }
    }

    spawner.settle_phase();
}

/// Spawn one drop object from a catalog entry at a randomized pose.
/// Returns `None` when the entry's geometry cannot be built; the failure is
/// logged and affects nothing else.
pub fn spawn_drop(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    scene_textures: &SceneTextures,
    entry: &CatalogEntry,
    id: u64,
    rng: &mut impl Rng,
) -> Option<Entity> {
    let translation = sample_spawn_translation(rng);
    let rotation = sample_spawn_rotation(rng);

    let tint = match &entry.color {
        ColorPolicy::Randomized => Some(random_drop_color(rng)),
        ColorPolicy::Fixed(css) => match parse_css_color(css) {
            Ok(color) => Some(color),
            Err(e) => {
                warn!("entry {}: {}", entry.id, e);
                None
            }
        },
        ColorPolicy::Keep => None,
    };

    let is_sphere = matches!(entry.source, DropSource::Sphere { .. });
    let restitution = if is_sphere { 0.7 } else { 0.3 };
    let initial_velocity = if is_sphere {
        Velocity::linear(Vec3::new(0.0, -0.1, 0.0))
    } else {
        Velocity::zero()
    };

    let mut entity = commands.spawn((
        DropObject {
            id,
            config_id: entry.id.clone(),
        },
        Draggable,
        RigidBody::Dynamic,
        initial_velocity,
        ExternalImpulse::default(),
        Restitution::coefficient(restitution),
        Friction::coefficient(0.8),
        Transform::from_translation(translation).with_rotation(rotation),
    ));

    match &entry.source {
        DropSource::Scene { path } => {
            entity.insert((
                scene_collider(entry.collider, entry.scale),
                PendingSceneVisual { path: path.clone() },
            ));
        }
        source => {
            let Some((mesh, collider)) = create_drop_mesh_and_collider(source, entry.collider, entry.scale)
            else {
                error!("entry {}: geometry could not be built, skipping", entry.id);
                entity.despawn();
                return None;
            };
            let material = materials.add(StandardMaterial {
                base_color: tint.unwrap_or(Color::srgb(0.7, 0.7, 0.7)),
                // Spheres carry the run's selected texture set, tinted.
                base_color_texture: is_sphere
                    .then(|| scene_textures.sphere_diffuse.clone())
                    .flatten(),
                metallic_roughness_texture: is_sphere
                    .then(|| scene_textures.sphere_rough.clone())
                    .flatten(),
                metallic: 0.1,
                perceptual_roughness: 0.8,
                ..default()
            });
            entity.insert((collider, Mesh3d(meshes.add(mesh)), MeshMaterial3d(material)));
        }
    }

    Some(entity.id())
}

/// Attach asset-server scenes to pending drops and contain load failures:
/// a failed load removes that one object and logs, nothing more.
pub fn load_scene_visuals(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    pending: Query<(Entity, &DropObject, &PendingSceneVisual, Option<&SceneRoot>)>,
) {
    for (entity, drop, visual, root) in pending.iter() {
        match root {
            None => {
                let handle: Handle<Scene> = asset_server
                    .load(bevy::gltf::GltfAssetLabel::Scene(0).from_asset(visual.path.clone()));
                commands.entity(entity).insert(SceneRoot(handle));
            }
            Some(root) => match asset_server.get_load_state(root.0.id()) {
                Some(LoadState::Loaded) => {
                    commands.entity(entity).remove::<PendingSceneVisual>();
                }
                Some(LoadState::Failed(e)) => {
                    error!("drop {} failed to load {:?}: {}", drop.config_id, visual.path, e);
                    commands.entity(entity).despawn();
                }
                _ => {}
            },
        }
    }
}

/// Sample object heights on the sampling interval. An object observed at or
/// below the fall threshold is removed; with the door closed it is queued
/// for an immediate respawn, with the door open it is gone until the reset.
pub fn sample_fallen_drops(
    mut commands: Commands,
    time: Res<Time>,
    pause: Res<PauseState>,
    trap: Res<TrapDoorState>,
    mut spawner: ResMut<SpawnerState>,
    drops: Query<(Entity, &Transform, &DropObject)>,
) {
    if pause.paused() {
        return;
    }
    spawner.sample_timer.tick(time.delta());
    if !spawner.sample_timer.just_finished() {
        return;
    }

    let door_open = trap.is_open();
    for (entity, transform, drop) in drops.iter() {
        if transform.translation.y <= FALL_THRESHOLD_Y {
            info!("drop {} ({}) fell out of the scene", drop.id, drop.config_id);
            commands.entity(entity).despawn();
            spawner.note_fallen(&drop.config_id, door_open);
        }
    }
}

/// In unbounded population mode, trim the oldest drops past the cap.
pub fn enforce_population_cap(
    mut commands: Commands,
    config: Res<SpawnerConfig>,
    drops: Query<(Entity, &DropObject)>,
) {
    let PopulationMode::Unbounded { max_live } = config.population else {
        return;
    };
    let count = drops.iter().count();
    if count <= max_live {
        return;
    }

    let mut all: Vec<(u64, Entity)> = drops.iter().map(|(e, d)| (d.id, e)).collect();
    all.sort_unstable_by_key(|(id, _)| *id);
    for (_, entity) in all.into_iter().take(count - max_live) {
        commands.entity(entity).despawn();
    }
}

/// When the trap door finishes closing, clear any survivors and start a
/// fresh cycle from the now-active catalog.
pub fn restart_cycle_on_close(
    mut closed: MessageReader<TrapDoorClosed>,
    mut commands: Commands,
    mut spawner: ResMut<SpawnerState>,
    catalogs: Res<Catalogs>,
    mode: Res<DisplayMode>,
    drops: Query<Entity, With<DropObject>>,
) {
    if closed.read().next().is_none() {
        return;
    }
    for entity in drops.iter() {
        commands.entity(entity).despawn();
    }
    spawner.begin_cycle(catalogs.active(*mode), &mut rand::thread_rng());
    info!("trap door closed, repopulating from {} catalog", mode.name());
}

/// Manual full reset: clear all drops, close the floor instantly, and
/// reshuffle the queue.
#[allow(clippy::type_complexity)]
pub fn apply_scene_reset(
    mut resets: MessageReader<SceneResetRequested>,
    mut commands: Commands,
    mut spawner: ResMut<SpawnerState>,
    mut trap: ResMut<TrapDoorState>,
    catalogs: Res<Catalogs>,
    mode: Res<DisplayMode>,
    drops: Query<Entity, With<DropObject>>,
    mut panels: Query<(&TrapDoorPanel, &mut RigidBody, &mut Transform, &mut Velocity)>,
) {
    if resets.read().next().is_none() {
        return;
    }

    for entity in drops.iter() {
        commands.entity(entity).despawn();
    }

    trap.phase = TrapDoorPhase::Idle;
    for (panel, mut body, mut transform, mut velocity) in panels.iter_mut() {
        transform.translation = panel.initial_translation;
        transform.rotation = panel.initial_rotation;
        *velocity = Velocity::zero();
        *body = RigidBody::Fixed;
    }

    spawner.begin_cycle(catalogs.active(*mode), &mut rand::thread_rng());
    info!("scene reset");
}
