//! Drop-object bookkeeping
//!
//! The spawner releases catalog entries from a shuffled queue on a fixed
//! interval, samples object heights on its own interval, and replaces or
//! removes anything that has fallen out of the scene. All of the decisions
//! live here as plain state-machine methods; the systems in
//! `systems::spawner` only wire them to the ECS.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::catalog::CatalogEntry;

/// Seconds between queued releases.
pub const SPAWN_INTERVAL_SECONDS: f32 = 1.5;
/// Spawn height above the floor.
pub const SPAWN_HEIGHT: f32 = 10.0;
/// Horizontal spawn range, centered on the origin.
pub const SPAWN_RANGE_X: f32 = 3.0;
pub const SPAWN_RANGE_Z: f32 = 2.0;
/// An object sampled at or below this height has left the scene.
pub const FALL_THRESHOLD_Y: f32 = -10.0;
/// Seconds between height samples.
pub const FALL_SAMPLE_INTERVAL_SECONDS: f32 = 2.0;

/// A live spawned object. The physics engine owns the true position; the
/// `Transform` on the same entity is a synced copy that the sampler reads.
#[derive(Component, Debug, Clone)]
pub struct DropObject {
    pub id: u64,
    pub config_id: String,
}

/// Marker consulted by the drag controller and the shockwave trigger.
#[derive(Component, Default)]
pub struct Draggable;

/// Marker for drops whose scene-file visual is still loading.
#[derive(Component, Debug, Clone)]
pub struct PendingSceneVisual {
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerPhase {
    /// Queue exhausted, nothing to release.
    Idle,
    /// Releasing queued entries and respawning fallen ones.
    Spawning,
    /// Trap door open: fallen objects are removed, never replaced.
    Draining,
    /// Between a door close and the next cycle beginning.
    Resetting,
}

/// Steady-state population policy, an explicit configuration value rather
/// than a side effect of which spawner variant is wired in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationMode {
    /// At most one live object per catalog entry.
    PerEntry,
    /// Release a random entry every tick, trimming the oldest past the cap.
    Unbounded { max_live: usize },
}

#[derive(Resource, Clone)]
pub struct SpawnerConfig {
    pub population: PopulationMode,
    pub spawn_interval: f32,
    pub sample_interval: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            population: PopulationMode::PerEntry,
            spawn_interval: SPAWN_INTERVAL_SECONDS,
            sample_interval: FALL_SAMPLE_INTERVAL_SECONDS,
        }
    }
}

/// Spawner bookkeeping: the release queue, pending respawns, and timers.
#[derive(Resource)]
pub struct SpawnerState {
    pub phase: SpawnerPhase,
    /// Entry ids still waiting for their first release this cycle.
    pub queue: Vec<String>,
    /// Entry ids whose object fell with the door closed; respawned on the
    /// next frame without waiting for the release interval.
    pub respawns: Vec<String>,
    pub release_timer: Timer,
    pub sample_timer: Timer,
    next_id: u64,
}

impl Default for SpawnerState {
    fn default() -> Self {
        Self {
            phase: SpawnerPhase::Idle,
            queue: Vec::new(),
            respawns: Vec::new(),
            release_timer: Timer::from_seconds(SPAWN_INTERVAL_SECONDS, TimerMode::Repeating),
            sample_timer: Timer::from_seconds(FALL_SAMPLE_INTERVAL_SECONDS, TimerMode::Repeating),
            next_id: 1,
        }
    }
}

impl SpawnerState {
    /// Adopt the configured release and sampling intervals.
    pub fn apply_intervals(&mut self, config: &SpawnerConfig) {
        self.release_timer
            .set_duration(std::time::Duration::from_secs_f32(config.spawn_interval));
        self.sample_timer
            .set_duration(std::time::Duration::from_secs_f32(config.sample_interval));
    }

    /// Start a fresh cycle from the given catalog: shuffle the queue, drop
    /// pending respawns, restart the timers.
    pub fn begin_cycle(&mut self, entries: &[CatalogEntry], rng: &mut impl Rng) {
        self.queue = entries.iter().map(|e| e.id.clone()).collect();
        self.queue.shuffle(rng);
        self.respawns.clear();
        self.release_timer.reset();
        self.sample_timer.reset();
        self.phase = if self.queue.is_empty() {
            SpawnerPhase::Idle
        } else {
            SpawnerPhase::Spawning
        };
    }

    /// Pop the next first-release entry, if any.
    pub fn next_queued(&mut self) -> Option<String> {
        if self.queue.is_empty() {
            None
        } else {
            Some(self.queue.remove(0))
        }
    }

    /// Record that an object of `config_id` fell out of the scene. With the
    /// door closed it is queued for an immediate respawn; with the door open
    /// it is gone until the next cycle.
    pub fn note_fallen(&mut self, config_id: &str, door_open: bool) {
        if !door_open {
            self.respawns.push(config_id.to_string());
        }
    }

    /// Take everything awaiting an immediate respawn.
    pub fn take_respawns(&mut self) -> Vec<String> {
        std::mem::take(&mut self.respawns)
    }

    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Refresh the phase after releases: an empty queue with nothing pending
    /// means the spawner has gone idle (until the next reset).
    pub fn settle_phase(&mut self) {
        if self.phase == SpawnerPhase::Spawning && self.queue.is_empty() && self.respawns.is_empty()
        {
            self.phase = SpawnerPhase::Idle;
        }
    }
}

/// Random spawn point above the scene.
pub fn sample_spawn_translation(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-SPAWN_RANGE_X..SPAWN_RANGE_X),
        SPAWN_HEIGHT,
        rng.gen_range(-SPAWN_RANGE_Z..SPAWN_RANGE_Z),
    )
}

/// Random spawn orientation, up to half a turn per axis.
pub fn sample_spawn_rotation(rng: &mut impl Rng) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        rng.gen_range(0.0..std::f32::consts::PI),
        rng.gen_range(0.0..std::f32::consts::PI),
        rng.gen_range(0.0..std::f32::consts::PI),
    )
}

/// Random mid-saturation, mid-lightness HSL color for `Randomized` entries.
pub fn random_drop_color(rng: &mut impl Rng) -> Color {
    Color::hsl(
        rng.gen_range(0.0..360.0),
        rng.gen_range(0.3..0.6),
        rng.gen_range(0.4..0.6),
    )
}
