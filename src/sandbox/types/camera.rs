//! Orbit-camera state
//!
//! The camera orbits a fixed target under mouse control. Dragging an object
//! flips `enabled` off so the orbit and zoom stay put until the drag ends.

use bevy::prelude::*;

pub const CAMERA_START: Vec3 = Vec3::new(0.0, 2.0, 8.0);
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const ROTATE_SPEED: f32 = 1.0;
/// Polar angle clamp keeps the camera above the floor and below the zenith.
pub const MIN_POLAR_ANGLE: f32 = std::f32::consts::PI / 6.0;
pub const MAX_POLAR_ANGLE: f32 = std::f32::consts::PI / 1.95;
pub const MIN_DISTANCE: f32 = 3.0;
pub const MAX_DISTANCE: f32 = 10.0;

#[derive(Component)]
pub struct MainCamera;

/// Orbit parameters plus the process-wide camera-enable flag.
#[derive(Resource, Debug, Clone)]
pub struct OrbitState {
    /// Cleared while a drag is in progress; orbit and zoom ignore input.
    pub enabled: bool,
    /// Azimuth around the Y axis.
    pub yaw: f32,
    /// Polar angle measured from straight up.
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
}

impl Default for OrbitState {
    fn default() -> Self {
        let offset = CAMERA_START;
        let distance = offset.length();
        Self {
            enabled: true,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).acos().clamp(MIN_POLAR_ANGLE, MAX_POLAR_ANGLE),
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            target: Vec3::ZERO,
        }
    }
}

impl OrbitState {
    /// Apply a pointer delta (radians) to yaw/pitch, keeping pitch clamped.
    pub fn apply_rotation(&mut self, delta: Vec2) {
        self.yaw -= delta.x;
        self.pitch = (self.pitch - delta.y).clamp(MIN_POLAR_ANGLE, MAX_POLAR_ANGLE);
    }

    /// Zoom by `amount` (positive zooms in), keeping distance clamped.
    pub fn apply_zoom(&mut self, amount: f32) {
        self.distance = (self.distance - amount).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Camera transform for the current orbit parameters.
    pub fn camera_transform(&self) -> Transform {
        let offset = Vec3::new(
            self.pitch.sin() * self.yaw.sin(),
            self.pitch.cos(),
            self.pitch.sin() * self.yaw.cos(),
        ) * self.distance;
        Transform::from_translation(self.target + offset).looking_at(self.target, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_start_position() {
        let orbit = OrbitState::default();
        let transform = orbit.camera_transform();
        assert!(transform.translation.abs_diff_eq(CAMERA_START, 1e-4));
    }

    #[test]
    fn test_pitch_stays_clamped() {
        let mut orbit = OrbitState::default();
        orbit.apply_rotation(Vec2::new(0.0, 100.0));
        assert!(orbit.pitch >= MIN_POLAR_ANGLE);
        orbit.apply_rotation(Vec2::new(0.0, -100.0));
        assert!(orbit.pitch <= MAX_POLAR_ANGLE);
    }

    #[test]
    fn test_zoom_stays_clamped() {
        let mut orbit = OrbitState::default();
        orbit.apply_zoom(100.0);
        assert_eq!(orbit.distance, MIN_DISTANCE);
        orbit.apply_zoom(-100.0);
        assert_eq!(orbit.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_camera_keeps_distance_from_target() {
        let mut orbit = OrbitState::default();
        orbit.apply_rotation(Vec2::new(1.3, 0.2));
        let transform = orbit.camera_transform();
        let distance = (transform.translation - orbit.target).length();
        assert!((distance - orbit.distance).abs() < 1e-4);
    }
}
