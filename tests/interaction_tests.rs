//! Tests for the pointer interactions: shockwave falloff at the boundaries,
//! the drag/shockwave exclusion invariant, and drag steering.

use bevy::prelude::*;

use dropfolio::sandbox::{
    ray_plane_intersection, shockwave_allowed, shockwave_impulse, steer_velocity, floor_plane,
    DRAG_MAX_SPEED, MAX_CLICK_SECONDS, SHOCKWAVE_FORCE, SHOCKWAVE_MIN_FORCE, SHOCKWAVE_RADIUS,
};

#[test]
fn test_impulse_is_radially_symmetric() {
    let center = Vec3::new(1.0, -2.0, 0.5);
    let d = 2.0;
    let east = shockwave_impulse(center, center + Vec3::new(d, 0.0, 0.0)).unwrap();
    let west = shockwave_impulse(center, center + Vec3::new(-d, 0.0, 0.0)).unwrap();
    let north = shockwave_impulse(center, center + Vec3::new(0.0, 0.0, d)).unwrap();

    assert!((east.length() - west.length()).abs() < 1e-5);
    assert!((east.length() - north.length()).abs() < 1e-5);
    // Horizontal components point away from the center.
    assert!(east.x > 0.0 && west.x < 0.0 && north.z > 0.0);
    // The uplift bias is shared.
    assert!((east.y - west.y).abs() < 1e-5);
}

#[test]
fn test_impulse_at_radius_edge_is_clamped_minimum() {
    let impulse =
        shockwave_impulse(Vec3::ZERO, Vec3::new(SHOCKWAVE_RADIUS, 0.0, 0.0)).unwrap();
    assert!((impulse.length() - SHOCKWAVE_MIN_FORCE).abs() < 1e-5);

    assert!(shockwave_impulse(Vec3::ZERO, Vec3::new(SHOCKWAVE_RADIUS + 1e-3, 0.0, 0.0)).is_none());
}

#[test]
fn test_impulse_peak_never_exceeded() {
    for i in 0..100 {
        let d = SHOCKWAVE_RADIUS * i as f32 / 100.0;
        let impulse = shockwave_impulse(Vec3::ZERO, Vec3::new(d, 0.0, 0.0)).unwrap();
        assert!(impulse.length() <= SHOCKWAVE_FORCE + 1e-5);
    }
}

#[test]
fn test_shockwave_never_fires_against_draggable_interactions() {
    // Drag and shockwave are mutually exclusive by construction, whatever
    // the click timing.
    for held in [0.0, MAX_CLICK_SECONDS / 2.0, MAX_CLICK_SECONDS] {
        assert!(!shockwave_allowed(true, false, held));
        assert!(!shockwave_allowed(false, true, held));
    }
    assert!(shockwave_allowed(false, false, MAX_CLICK_SECONDS / 2.0));
}

#[test]
fn test_slow_clicks_are_drags_not_shockwaves() {
    assert!(!shockwave_allowed(false, false, MAX_CLICK_SECONDS * 2.0));
}

#[test]
fn test_drag_velocity_always_within_clamp() {
    let targets = [
        Vec3::ZERO,
        Vec3::splat(1e6),
        Vec3::splat(-1e6),
        Vec3::new(3.0, -40.0, 0.2),
    ];
    for target in targets {
        let v = steer_velocity(Vec3::new(0.3, 1.0, -0.2), target);
        assert!(v.x.abs() <= DRAG_MAX_SPEED);
        assert!(v.y.abs() <= DRAG_MAX_SPEED);
        assert!(v.z.abs() <= DRAG_MAX_SPEED);
    }
}

#[test]
fn test_pointer_ray_hits_the_tilted_floor() {
    let (point, normal) = floor_plane();
    // A ray from the default camera region, looking down toward the floor.
    let origin = Vec3::new(0.0, 2.0, 8.0);
    let direction = (point - origin).normalize();
    let hit = ray_plane_intersection(origin, direction, point, normal).unwrap();
    assert!(hit.abs_diff_eq(point, 1e-4));

    // Looking away misses.
    assert!(ray_plane_intersection(origin, Vec3::Y, point, normal).is_none());
}
