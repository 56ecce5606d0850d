// Hide console window on Windows for release builds (GUI app).
// In debug builds, keep the console so panics/backtraces are visible.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy::winit::WinitWindows;
use bevy_rapier3d::prelude::*;
use clap::{Parser, Subcommand};
use colored::Colorize;

use dropfolio::sandbox::{
    advance_hints, advance_trap_door, animate_social_icons, apply_pause, apply_scene_reset,
    begin_drag, bob_decor_visuals, detect_shockwave_clicks, end_drag, enforce_population_cap,
    finish_loading, handle_mode_lever_clicks, handle_reset_clicks, handle_trap_door_trigger,
    load_scene_visuals, orbit_camera, release_queued_drops, reset_decor_instantly,
    restart_cycle_on_close, restore_decor_after_close, run_preload_jobs, sample_fallen_drops,
    setup_hud, setup_loading_screen, setup_scene, start_spawn_cycle, teardown_loading_screen,
    track_pointer_hover, track_window_focus, update_drag, update_fps_overlay, update_hover_label,
    update_lever_knob, update_loading_bar, AppState, Catalogs, ColorPolicy, DisplayMode,
    DragState, DropSource, FloatingTextConfig, HintState, KeyValueStore, OrbitState, PauseState,
    PointerState, SceneResetRequested, SceneTextures, SelectedTextures, SpawnerConfig,
    SpawnerState, TexturePreloader, TrapDoorClosed, TrapDoorState, TrapDoorTriggered,
};

/// Dropfolio - interactive 3D portfolio sandbox
#[derive(Parser)]
#[command(name = "dropfolio")]
#[command(
    author,
    version,
    about = "Interactive 3D portfolio sandbox with a trap-door floor"
)]
struct Cli {
    /// Initial display mode
    #[arg(long, value_parser = parse_mode, default_value = "work")]
    mode: DisplayMode,

    /// Floating title text (A-Z, 0-9, and basic punctuation render)
    #[arg(long, default_value = "HELLO")]
    title: String,

    /// Floating subtitle text
    #[arg(long, default_value = "PORTFOLIO SANDBOX")]
    subtitle: String,

    /// Window width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the spawn catalogs and exit
    Catalog {
        /// Only print one mode's catalog
        #[arg(long, value_parser = parse_mode)]
        mode: Option<DisplayMode>,
    },
}

fn parse_mode(s: &str) -> Result<DisplayMode, String> {
    DisplayMode::parse(s).ok_or_else(|| format!("unknown mode: {}. Valid: work, personal", s))
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Catalog { mode }) => run_catalog_listing(*mode),
        None => run_sandbox(cli),
    }
}

// ============================================================================
// Catalog listing (terminal)
// ============================================================================

fn run_catalog_listing(mode: Option<DisplayMode>) {
    let catalogs = Catalogs::load_embedded();
    let modes = match mode {
        Some(m) => vec![m],
        None => vec![DisplayMode::Work, DisplayMode::Personal],
    };

    for mode in modes {
        println!("{}", format!("{} catalog:", mode.name()).bold().underline());
        for entry in catalogs.active(mode) {
            let source = match &entry.source {
                DropSource::Sphere { radius } => format!("sphere r={}", radius),
                DropSource::Cuboid { .. } => "cuboid".to_string(),
                DropSource::Extruded { .. } => "extruded outline".to_string(),
                DropSource::Text { text } => format!("text {:?}", text),
                DropSource::Scene { path } => format!("scene {}", path),
            };
            let color = match &entry.color {
                ColorPolicy::Keep => "keep".normal(),
                ColorPolicy::Fixed(css) => css.as_str().yellow(),
                ColorPolicy::Randomized => "randomized".magenta(),
            };
            let label = entry
                .label
                .as_deref()
                .map(|l| format!("  \"{}\"", l).dimmed().to_string())
                .unwrap_or_default();
            println!(
                "  {:<16} {:<20} color: {}{}",
                entry.id.cyan().bold(),
                source,
                color,
                label
            );
        }
        println!();
    }
}

// ============================================================================
// Sandbox (3D)
// ============================================================================

fn run_sandbox(cli: Cli) {
    let store = KeyValueStore::open_default();

    // Hints whose flag is already set are never scheduled again.
    let hints = HintState::schedule_unseen(&store);

    let selected = SelectedTextures::random(&mut rand::thread_rng());

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Dropfolio".to_string(),
                        resolution: (cli.width, cli.height).into(),
                        ..default()
                    }),
                    ..default()
                })
                // Keep app logs at info, silence graphics-stack noise.
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "info,wgpu=error,naga=warn".to_string(),
                    ..default()
                }),
        )
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .init_state::<AppState>()
        .insert_resource(cli.mode)
        .insert_resource(Catalogs::load_embedded())
        .insert_resource(store)
        .insert_resource(hints)
        .insert_resource(selected)
        .insert_resource(FloatingTextConfig {
            title: cli.title,
            subtitle: cli.subtitle,
        })
        .insert_resource(PauseState::new_focused())
        .init_resource::<SceneTextures>()
        .init_resource::<TexturePreloader>()
        .init_resource::<SpawnerState>()
        .insert_resource(SpawnerConfig::default())
        .init_resource::<TrapDoorState>()
        .init_resource::<OrbitState>()
        .init_resource::<PointerState>()
        .init_resource::<DragState>()
        .add_message::<TrapDoorTriggered>()
        .add_message::<TrapDoorClosed>()
        .add_message::<SceneResetRequested>()
        .add_systems(Startup, set_window_icon)
        .add_systems(OnEnter(AppState::Loading), setup_loading_screen)
        .add_systems(
            Update,
            (run_preload_jobs, update_loading_bar, finish_loading)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnExit(AppState::Loading), teardown_loading_screen)
        .add_systems(
            OnEnter(AppState::Running),
            (setup_scene, setup_hud, start_spawn_cycle).chain(),
        )
        .add_systems(Update, (track_window_focus, apply_pause).chain())
        .add_systems(
            Update,
            // Pointer pipeline: hover first, then the drag claims presses
            // before the shockwave sees them, then the camera (disabled
            // while a drag holds it).
            (
                track_pointer_hover,
                begin_drag,
                update_drag,
                detect_shockwave_clicks,
                end_drag,
                orbit_camera,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        )
        .add_systems(
            Update,
            (
                release_queued_drops,
                sample_fallen_drops,
                enforce_population_cap,
                load_scene_visuals,
            )
                .run_if(in_state(AppState::Running)),
        )
        .add_systems(
            Update,
            (
                handle_trap_door_trigger,
                advance_trap_door,
                restart_cycle_on_close,
                apply_scene_reset,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        )
        .add_systems(
            Update,
            (
                bob_decor_visuals,
                animate_social_icons,
                restore_decor_after_close,
                reset_decor_instantly,
            )
                .run_if(in_state(AppState::Running)),
        )
        .add_systems(
            Update,
            (
                handle_mode_lever_clicks,
                handle_reset_clicks,
                update_lever_knob,
                advance_hints,
                update_hover_label,
                update_fps_overlay,
            )
                .run_if(in_state(AppState::Running)),
        )
        .run();
}

/// Set the window icon if an icon file ships next to the binary. Purely
/// cosmetic; a missing or unreadable icon is skipped.
fn set_window_icon(
    windows: Option<NonSend<WinitWindows>>,
    primary_query: Query<Entity, With<PrimaryWindow>>,
) {
    let Some(windows) = windows else {
        return;
    };
    let Ok(primary_entity) = primary_query.single() else {
        return;
    };
    let Some(primary) = windows.get_window(primary_entity) else {
        return;
    };

    for candidate in ["assets/icon.png", "icon.png"] {
        let path = std::path::Path::new(candidate);
        if !path.exists() {
            continue;
        }
        match image::open(path) {
            Ok(img) => {
                let rgba = img.into_rgba8();
                let (width, height) = rgba.dimensions();
                if let Ok(icon) = winit::window::Icon::from_rgba(rgba.into_raw(), width, height) {
                    primary.set_window_icon(Some(icon));
                }
            }
            Err(e) => warn!("could not read window icon {:?}: {}", path, e),
        }
        break;
    }
}
