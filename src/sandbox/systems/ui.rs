//! HUD: mode lever, reset button, hint popups, hover label, fps overlay

use bevy::color::Alpha;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::sandbox::storage::KeyValueStore;
use crate::sandbox::types::*;

const LEVER_BLUE: Color = Color::srgb(0.23, 0.51, 0.96);
const LEVER_KNOB_RED: Color = Color::srgb(0.94, 0.27, 0.27);

/// Build the HUD once the scene mounts.
pub fn setup_hud(mut commands: Commands) {
    // Hint popup, top center, starts invisible.
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(20.0),
            left: Val::Px(0.0),
            right: Val::Px(0.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgba(0.05, 0.05, 0.05, 0.0)),
                HintPopupText,
            ));
        });

    // Hover label for catalog entries, under the hint line.
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(52.0),
            left: Val::Px(0.0),
            right: Val::Px(0.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgba(0.1, 0.1, 0.1, 0.85)),
                HoverLabelText,
            ));
        });

    // Mode lever on the left edge.
    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Percent(42.0),
                width: Val::Px(26.0),
                height: Val::Px(72.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(LEVER_BLUE),
            BorderRadius::all(Val::Px(13.0)),
            ModeLeverButton,
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(18.0),
                    height: Val::Px(18.0),
                    top: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(LEVER_KNOB_RED),
                BorderRadius::all(Val::Px(9.0)),
                ModeLeverKnob,
            ));
        });

    // Reset button, top right.
    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                right: Val::Px(16.0),
                padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(LEVER_BLUE),
            BorderRadius::all(Val::Px(16.0)),
            ResetButton,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("RESET"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });

    // Frame-rate overlay, bottom right.
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(Color::srgba(0.2, 0.2, 0.2, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(8.0),
            right: Val::Px(10.0),
            ..default()
        },
        FpsOverlayText,
    ));
}

/// Pulling the lever triggers the trap door (when it is closed).
pub fn handle_mode_lever_clicks(
    interactions: Query<&Interaction, (Changed<Interaction>, With<ModeLeverButton>)>,
    trap: Res<TrapDoorState>,
    mut triggers: MessageWriter<TrapDoorTriggered>,
) {
    for interaction in interactions.iter() {
        if *interaction == Interaction::Pressed && !trap.is_open() {
            triggers.write(TrapDoorTriggered);
        }
    }
}

/// Slide the lever knob to match the active mode.
pub fn update_lever_knob(
    mode: Res<DisplayMode>,
    mut knobs: Query<&mut Node, With<ModeLeverKnob>>,
) {
    for mut node in knobs.iter_mut() {
        match *mode {
            DisplayMode::Work => {
                node.top = Val::Px(4.0);
                node.bottom = Val::Auto;
            }
            DisplayMode::Personal => {
                node.top = Val::Auto;
                node.bottom = Val::Px(4.0);
            }
        }
    }
}

/// The reset button requests a full scene reset.
pub fn handle_reset_clicks(
    interactions: Query<&Interaction, (Changed<Interaction>, With<ResetButton>)>,
    mut resets: MessageWriter<SceneResetRequested>,
) {
    for interaction in interactions.iter() {
        if *interaction == Interaction::Pressed {
            resets.write(SceneResetRequested);
        }
    }
}

/// Advance hint schedules, mark finished hints as seen, and render the
/// active one into the popup.
pub fn advance_hints(
    time: Res<Time>,
    mut hints: ResMut<HintState>,
    store: Res<KeyValueStore>,
    mut popup: Query<(&mut Text, &mut TextColor), With<HintPopupText>>,
) {
    let dt = time.delta_secs();
    for hint in hints.scheduled.iter_mut() {
        if hint.advance(dt) {
            store.mark_hint_seen(hint.kind.storage_key());
        }
    }

    let active = hints
        .scheduled
        .iter()
        .find(|hint| hint.opacity() > 0.0);

    for (mut text, mut color) in popup.iter_mut() {
        match active {
            Some(hint) => {
                text.0 = hint.kind.text().to_string();
                color.0 = Color::srgba(0.05, 0.05, 0.05, hint.opacity());
            }
            None => {
                text.0.clear();
                color.0 = color.0.with_alpha(0.0);
            }
        }
    }
}

/// Show the hovered object's catalog label, if any.
pub fn update_hover_label(
    pointer: Res<PointerState>,
    mut labels: Query<&mut Text, With<HoverLabelText>>,
) {
    for mut text in labels.iter_mut() {
        match &pointer.hovered_label {
            Some(label) if !label.is_empty() => {
                if text.0 != *label {
                    text.0 = label.clone();
                }
            }
            _ => text.0.clear(),
        }
    }
}

/// Frame-rate overlay from the frame-time diagnostics.
pub fn update_fps_overlay(
    diagnostics: Res<DiagnosticsStore>,
    mut overlay: Query<&mut Text, With<FpsOverlayText>>,
) {
    let Some(fps) = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
    else {
        return;
    };
    for mut text in overlay.iter_mut() {
        text.0 = format!("{:.0} fps", fps);
    }
}
