//! Floating decor: the 3D name/subtitle text and the social-icon plaques
//!
//! Decor bodies are fixed while the scene is closed, bobbing gently via a
//! visual child. Triggering the trap door turns them dynamic so they fall
//! with everything else; once the door closes their poses are restored and
//! they fade back in.

use bevy::prelude::*;

pub const TITLE_POSITION: Vec3 = Vec3::new(0.0, 2.0, 0.0);
pub const SUBTITLE_POSITION: Vec3 = Vec3::new(0.0, 1.2, 0.0);
pub const BOB_RATE: f32 = 0.5;
pub const BOB_AMPLITUDE: f32 = 0.1;

/// Seconds after the door closes before decor snaps back.
pub const DECOR_RESTORE_DELAY_SECONDS: f32 = 0.5;
/// Seconds the restored decor takes to fade back in.
pub const DECOR_FADE_SECONDS: f32 = 2.0;

pub const ICON_POSITIONS: [Vec3; 2] = [Vec3::new(1.0, 0.4, 0.0), Vec3::new(-1.0, 0.4, 0.0)];
pub const ICON_HOVER_SCALE: f32 = 1.1;
/// Per-frame lerp factor for hover scale and tint.
pub const ICON_HOVER_LERP: f32 = 0.1;

/// Tint applied to a hovered social icon.
pub fn icon_hover_tint() -> Color {
    Color::srgb_u8(0x4a, 0x9e, 0xff)
}

/// Floating title/subtitle text, configured from the command line.
#[derive(Resource, Debug, Clone)]
pub struct FloatingTextConfig {
    pub title: String,
    pub subtitle: String,
}

impl Default for FloatingTextConfig {
    fn default() -> Self {
        Self {
            title: "HELLO".to_string(),
            subtitle: "PORTFOLIO SANDBOX".to_string(),
        }
    }
}

/// A decor body with its recorded initial pose.
#[derive(Component, Debug, Clone)]
pub struct FloatingDecor {
    pub initial_translation: Vec3,
    pub initial_rotation: Quat,
}

/// The bobbing visual child of a decor body.
#[derive(Component, Debug, Clone)]
pub struct BobbingVisual {
    pub base_y: f32,
}

/// A social-icon plaque; hover state drives scale and tint.
#[derive(Component, Debug, Clone)]
pub struct SocialIcon {
    pub label: String,
    pub base_color: Color,
}

/// The visual child of a social icon, scaled and tinted on hover.
#[derive(Component)]
pub struct IconVisual;

/// Attached to decor while it is being restored after a door close. Removing
/// the component cancels the animation, so a re-trigger mid-fade never leaks
/// a stale restore.
#[derive(Component, Debug)]
pub struct DecorRestore {
    pub delay: Timer,
    pub fade: Timer,
    pub snapped: bool,
}

impl DecorRestore {
    pub fn new() -> Self {
        Self {
            delay: Timer::from_seconds(DECOR_RESTORE_DELAY_SECONDS, TimerMode::Once),
            fade: Timer::from_seconds(DECOR_FADE_SECONDS, TimerMode::Once),
            snapped: false,
        }
    }

    /// Current decor opacity: invisible until the snap, then fading up to 1.
    pub fn opacity(&self) -> f32 {
        if !self.snapped {
            0.0
        } else {
            self.fade.fraction().min(1.0)
        }
    }
}

impl Default for DecorRestore {
    fn default() -> Self {
        Self::new()
    }
}
