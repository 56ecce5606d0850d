//! Systems module for the sandbox
//!
//! The per-frame Bevy systems, organized by concern:
//!
//! - `setup`: scene construction (camera, lights, floor panels, decor)
//! - `spawner`: queued releases, fall sampling, respawn/drain, resets
//! - `shockwave`: hover tracking and the click shockwave
//! - `drag`: grab-and-drag with velocity steering
//! - `trap_door`: the hinged-floor open/reset cycle
//! - `camera`: mouse orbit and zoom
//! - `floating`: floating text and social-icon animation
//! - `pause`: window focus/occlusion driven pausing
//! - `ui`: lever, reset button, hints, overlays

mod camera;
mod drag;
mod floating;
mod pause;
mod setup;
mod shockwave;
mod spawner;
mod trap_door;
mod ui;

pub use camera::orbit_camera;
pub use drag::{begin_drag, end_drag, update_drag};
pub use floating::{
    animate_social_icons, bob_decor_visuals, reset_decor_instantly, restore_decor_after_close,
};
pub use pause::{apply_pause, track_window_focus};
pub use setup::setup_scene;
pub use shockwave::{detect_shockwave_clicks, track_pointer_hover};
pub use spawner::{
    apply_scene_reset, enforce_population_cap, load_scene_visuals, release_queued_drops,
    restart_cycle_on_close, sample_fallen_drops, spawn_drop, start_spawn_cycle,
};
pub use trap_door::{advance_trap_door, handle_trap_door_trigger};
pub use ui::{
    advance_hints, handle_mode_lever_clicks, handle_reset_clicks, setup_hud, update_fps_overlay,
    update_hover_label, update_lever_knob,
};
