//! Pointer interaction state and math
//!
//! Shared by the drag controller and the shockwave trigger: hover tracking,
//! the active drag, ray/plane intersection, the shockwave falloff, and the
//! drag velocity steering. The math lives here as pure functions so the
//! systems stay thin.

use bevy::prelude::*;

/// Bodies within this distance of the impact point are pushed.
pub const SHOCKWAVE_RADIUS: f32 = 4.0;
/// Impulse magnitude at the impact point itself.
pub const SHOCKWAVE_FORCE: f32 = 3.0;
/// Upward bias added to the impulse direction, fading with distance.
pub const SHOCKWAVE_UPLIFT: f32 = 2.0;
/// Floor on the impulse magnitude inside the radius.
pub const SHOCKWAVE_MIN_FORCE: f32 = 1.0;
/// A press-release longer than this is a drag, not a shockwave click.
pub const MAX_CLICK_SECONDS: f32 = 0.15;

/// Height the dragged object hovers above the floor plane.
pub const DRAG_HOVER_HEIGHT: f32 = 1.0;
/// Velocity gain per unit of positional error.
pub const DRAG_GAIN: f32 = 5.0;
/// Per-axis clamp on the commanded velocity.
pub const DRAG_MAX_SPEED: f32 = 30.0;

/// What the pointer is currently over, refreshed every pointer move.
#[derive(Resource, Default, Debug)]
pub struct PointerState {
    pub hovered_entity: Option<Entity>,
    pub hovering_draggable: bool,
    /// Label of the hovered object, if it has one.
    pub hovered_label: Option<String>,
    /// Elapsed-seconds stamp of a pending shockwave press.
    pub click_started_at: Option<f32>,
}

/// The drag in progress, if any. Camera orbiting is disabled while this is
/// occupied; only one object is dragged at a time.
#[derive(Resource, Default)]
pub struct DragState {
    pub active: Option<ActiveDrag>,
}

pub struct ActiveDrag {
    pub entity: Entity,
    /// Offset from the grab point to the body origin, preserved for the
    /// whole drag so the object does not snap to the pointer.
    pub grab_offset: Vec3,
}

/// Intersect a ray with a plane. Returns the hit point, or `None` when the
/// ray is parallel to the plane or the hit is behind the origin.
pub fn ray_plane_intersection(
    origin: Vec3,
    direction: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<Vec3> {
    let denom = direction.dot(plane_normal);
    if denom.abs() < 1e-4 {
        return None;
    }
    let t = (plane_point - origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;
    }
    Some(origin + direction * t)
}

/// Impulse applied to a body at `body_pos` by a shockwave centered on
/// `center`. `None` outside the radius. Magnitude falls off with the square
/// of normalized distance down to the minimum force; direction points away
/// from the center with an upward bias that fades linearly with distance.
pub fn shockwave_impulse(center: Vec3, body_pos: Vec3) -> Option<Vec3> {
    let distance = body_pos.distance(center);
    if distance > SHOCKWAVE_RADIUS {
        return None;
    }

    let normalized = distance / SHOCKWAVE_RADIUS;
    let magnitude = (SHOCKWAVE_FORCE * (1.0 - normalized).powi(2)).max(SHOCKWAVE_MIN_FORCE);

    let mut direction = (body_pos - center).normalize_or_zero();
    direction.y += SHOCKWAVE_UPLIFT * (1.0 - normalized);
    // A body exactly at the center has no radial direction; the uplift alone
    // sends it straight up.
    Some(direction.normalize_or_zero() * magnitude)
}

/// Whether a completed press-release qualifies as a shockwave click.
/// Hovering a draggable object or holding a drag always disqualifies it.
pub fn shockwave_allowed(hovering_draggable: bool, drag_active: bool, held_seconds: f32) -> bool {
    !hovering_draggable && !drag_active && held_seconds <= MAX_CLICK_SECONDS
}

/// Velocity command that steers a dragged body toward `target`: proportional
/// to the positional error, clamped per axis. The body is never teleported,
/// so collision response stays consistent.
pub fn steer_velocity(current: Vec3, target: Vec3) -> Vec3 {
    ((target - current) * DRAG_GAIN).clamp(
        Vec3::splat(-DRAG_MAX_SPEED),
        Vec3::splat(DRAG_MAX_SPEED),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_plane_hit() {
        let hit = ray_plane_intersection(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::NEG_Y,
            Vec3::ZERO,
            Vec3::Y,
        )
        .unwrap();
        assert!(hit.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn test_ray_plane_parallel_misses() {
        assert!(ray_plane_intersection(Vec3::new(0.0, 5.0, 0.0), Vec3::X, Vec3::ZERO, Vec3::Y)
            .is_none());
    }

    #[test]
    fn test_ray_plane_behind_origin_misses() {
        assert!(ray_plane_intersection(Vec3::new(0.0, 5.0, 0.0), Vec3::Y, Vec3::ZERO, Vec3::Y)
            .is_none());
    }

    #[test]
    fn test_shockwave_zero_outside_radius() {
        let center = Vec3::ZERO;
        let body = Vec3::new(SHOCKWAVE_RADIUS + 0.01, 0.0, 0.0);
        assert!(shockwave_impulse(center, body).is_none());
    }

    #[test]
    fn test_shockwave_peak_at_center() {
        let impulse = shockwave_impulse(Vec3::ZERO, Vec3::ZERO).unwrap();
        assert!((impulse.length() - SHOCKWAVE_FORCE).abs() < 1e-5);
        // Degenerate direction resolves to straight up.
        assert!(impulse.y > 0.0);
        assert!(impulse.x.abs() < 1e-6 && impulse.z.abs() < 1e-6);
    }

    #[test]
    fn test_shockwave_magnitude_monotonically_non_increasing() {
        let center = Vec3::ZERO;
        let mut previous = f32::MAX;
        for i in 0..=40 {
            let d = SHOCKWAVE_RADIUS * i as f32 / 40.0;
            let impulse = shockwave_impulse(center, Vec3::new(d, 0.0, 0.0)).unwrap();
            let magnitude = impulse.length();
            assert!(magnitude <= previous + 1e-5);
            assert!(magnitude >= SHOCKWAVE_MIN_FORCE - 1e-5);
            previous = magnitude;
        }
    }

    #[test]
    fn test_shockwave_uplift_fades_with_distance() {
        let near = shockwave_impulse(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0)).unwrap();
        let far = shockwave_impulse(Vec3::ZERO, Vec3::new(3.9, 0.0, 0.0)).unwrap();
        let near_tilt = near.y / near.length();
        let far_tilt = far.y / far.length();
        assert!(near_tilt > far_tilt);
    }

    #[test]
    fn test_click_window_gates_shockwave() {
        assert!(shockwave_allowed(false, false, MAX_CLICK_SECONDS));
        assert!(!shockwave_allowed(false, false, MAX_CLICK_SECONDS + 0.01));
    }

    #[test]
    fn test_drag_and_hover_exclude_shockwave() {
        // Drag and shockwave are mutually exclusive by construction.
        assert!(!shockwave_allowed(true, false, 0.01));
        assert!(!shockwave_allowed(false, true, 0.01));
        assert!(!shockwave_allowed(true, true, 0.01));
    }

    #[test]
    fn test_steer_velocity_proportional_below_clamp() {
        let v = steer_velocity(Vec3::ZERO, Vec3::new(1.0, 0.0, -2.0));
        assert!(v.abs_diff_eq(Vec3::new(5.0, 0.0, -10.0), 1e-6));
    }

    #[test]
    fn test_steer_velocity_clamped_per_axis() {
        let v = steer_velocity(Vec3::ZERO, Vec3::new(100.0, -100.0, 0.5));
        assert_eq!(v.x, DRAG_MAX_SPEED);
        assert_eq!(v.y, -DRAG_MAX_SPEED);
        assert!((v.z - 2.5).abs() < 1e-6);
    }
}
