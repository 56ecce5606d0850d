//! Texture preload state
//!
//! Before the scene mounts, the run's selected floor and sphere texture sets
//! are generated one image per frame, with aggregate progress driving a
//! loading bar. The scene only appears at 100%.

use bevy::prelude::*;

use crate::sandbox::textures::{
    generate_floor_diffuse, generate_floor_roughness, generate_sphere_diffuse,
    generate_sphere_roughness, SceneTextures, SelectedTextures,
};

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PreloadJob {
    FloorDiffuse,
    FloorRough,
    SphereDiffuse,
    SphereRough,
}

/// Remaining generation jobs plus the original total, for progress.
#[derive(Resource)]
pub struct TexturePreloader {
    jobs: Vec<PreloadJob>,
    total: usize,
}

impl Default for TexturePreloader {
    fn default() -> Self {
        let jobs = vec![
            PreloadJob::FloorDiffuse,
            PreloadJob::FloorRough,
            PreloadJob::SphereDiffuse,
            PreloadJob::SphereRough,
        ];
        let total = jobs.len();
        Self { jobs, total }
    }
}

impl TexturePreloader {
    /// Aggregate progress in percent.
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            100.0
        } else {
            100.0 * (self.total - self.jobs.len()) as f32 / self.total as f32
        }
    }

    pub fn is_complete(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[derive(Component)]
pub struct LoadingUiRoot;

#[derive(Component)]
pub struct LoadingBarFill;

#[derive(Component)]
pub struct LoadingBarLabel;

#[derive(Component)]
pub struct LoadingCamera;

/// Loading screen: a bar and a percentage over a dark backdrop.
pub fn setup_loading_screen(mut commands: Commands) {
    commands.spawn((Camera2d, LoadingCamera));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.04, 0.04, 0.06)),
            LoadingUiRoot,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(256.0),
                        height: Val::Px(8.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.15, 0.15, 0.2)),
                    BorderRadius::all(Val::Px(4.0)),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.23, 0.51, 0.96)),
                        BorderRadius::all(Val::Px(4.0)),
                        LoadingBarFill,
                    ));
                });

            parent.spawn((
                Text::new("Loading 3D scene... 0%"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                LoadingBarLabel,
            ));
        });
}

/// Run one generation job per frame.
pub fn run_preload_jobs(
    mut preloader: ResMut<TexturePreloader>,
    selected: Res<SelectedTextures>,
    mut images: ResMut<Assets<Image>>,
    mut scene_textures: ResMut<SceneTextures>,
) {
    let Some(job) = preloader.jobs.first().copied() else {
        return;
    };

    match job {
        PreloadJob::FloorDiffuse => {
            scene_textures.floor_diffuse = Some(images.add(generate_floor_diffuse(selected.floor)));
        }
        PreloadJob::FloorRough => {
            scene_textures.floor_rough = Some(images.add(generate_floor_roughness(selected.floor)));
        }
        PreloadJob::SphereDiffuse => {
            scene_textures.sphere_diffuse =
                Some(images.add(generate_sphere_diffuse(selected.sphere)));
        }
        PreloadJob::SphereRough => {
            scene_textures.sphere_rough =
                Some(images.add(generate_sphere_roughness(selected.sphere)));
        }
    }
    preloader.jobs.remove(0);
}

/// Keep the bar and label in sync with the aggregate progress.
pub fn update_loading_bar(
    preloader: Res<TexturePreloader>,
    mut fill: Query<&mut Node, With<LoadingBarFill>>,
    mut label: Query<&mut Text, With<LoadingBarLabel>>,
) {
    let progress = preloader.progress();
    for mut node in fill.iter_mut() {
        node.width = Val::Percent(progress);
    }
    for mut text in label.iter_mut() {
        text.0 = format!("Loading 3D scene... {:.0}%", progress);
    }
}

/// Mount the scene once every job is done.
pub fn finish_loading(
    preloader: Res<TexturePreloader>,
    selected: Res<SelectedTextures>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if preloader.is_complete() {
        info!(
            "textures ready (floor: {}, spheres: {})",
            selected.floor.name(),
            selected.sphere.name()
        );
        next_state.set(AppState::Running);
    }
}

/// Tear the loading screen down on the way out.
pub fn teardown_loading_screen(
    mut commands: Commands,
    roots: Query<Entity, With<LoadingUiRoot>>,
    cameras: Query<Entity, With<LoadingCamera>>,
) {
    for entity in roots.iter().chain(cameras.iter()) {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_runs_zero_to_hundred() {
        let mut preloader = TexturePreloader::default();
        assert_eq!(preloader.progress(), 0.0);
        assert!(!preloader.is_complete());

        let total = preloader.total;
        for i in 1..=total {
            preloader.jobs.remove(0);
            let expected = 100.0 * i as f32 / total as f32;
            assert!((preloader.progress() - expected).abs() < 1e-4);
        }
        assert!(preloader.is_complete());
        assert_eq!(preloader.progress(), 100.0);
    }
}
