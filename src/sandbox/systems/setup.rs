//! Scene setup
//!
//! Builds the 3D scene once the preloader finishes: camera, lights, the two
//! hinged floor panels with their anchors and joints, the floating title
//! text, and the social-icon plaques.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::sandbox::meshes::create_text_mesh;
use crate::sandbox::textures::SceneTextures;
use crate::sandbox::types::*;

/// Main scene construction, run on entering `AppState::Running`.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scene_textures: Res<SceneTextures>,
    text_config: Res<FloatingTextConfig>,
    orbit: Res<OrbitState>,
) {
    // Camera
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        orbit.camera_transform(),
        MainCamera,
    ));

    // Lights
    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });

    // Floor material from the preloaded texture set, tiled 2x2.
    let floor_material = materials.add(StandardMaterial {
        base_color_texture: scene_textures.floor_diffuse.clone(),
        metallic_roughness_texture: scene_textures.floor_rough.clone(),
        perceptual_roughness: 0.8,
        metallic: 0.0,
        uv_transform: bevy::math::Affine2::from_scale(Vec2::splat(2.0)),
        ..default()
    });

    for side in [PanelSide::Left, PanelSide::Right] {
        spawn_trap_door_panel(
            &mut commands,
            &mut meshes,
            floor_material.clone(),
            side,
        );
    }

    spawn_floating_text(
        &mut commands,
        &mut meshes,
        &mut materials,
        &text_config,
    );
    spawn_social_icons(&mut commands, &mut meshes, &mut materials);
}

/// One hinged floor panel: a fixed anchor at the outer edge, the panel body
/// at the floor center with its slab offset toward the hinge, and a revolute
/// joint between them.
fn spawn_trap_door_panel(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    floor_material: Handle<StandardMaterial>,
    side: PanelSide,
) {
    let rotation = floor_rotation();
    let anchor_translation =
        FLOOR_POSITION + rotation * Vec3::new(side.sign() * ANCHOR_OFFSET_X, 0.0, 0.0);

    let anchor = commands
        .spawn((
            RigidBody::Fixed,
            Collider::cuboid(0.1, 0.1, 0.1),
            Sensor,
            Transform::from_translation(anchor_translation).with_rotation(rotation),
        ))
        .id();

    let joint = RevoluteJointBuilder::new(Vec3::Z)
        .local_anchor1(Vec3::ZERO)
        .local_anchor2(Vec3::new(side.sign() * ANCHOR_OFFSET_X, 0.0, 0.0))
        .limits(side.hinge_limits())
        .build();

    // The slab hangs toward the center, so its hinge sits on the outer edge.
    let slab_offset = Vec3::new(-side.sign() * PANEL_MESH_OFFSET_X, 0.0, 0.0);

    commands
        .spawn((
            TrapDoorPanel {
                side,
                initial_translation: FLOOR_POSITION,
                initial_rotation: rotation,
            },
            RigidBody::Fixed,
            Collider::compound(vec![(
                slab_offset,
                Quat::IDENTITY,
                Collider::cuboid(PANEL_SIZE.x / 2.0, PANEL_SIZE.y / 2.0, PANEL_SIZE.z / 2.0),
            )]),
            AdditionalMassProperties::Mass(PANEL_MASS),
            Damping {
                linear_damping: PANEL_LINEAR_DAMPING,
                angular_damping: PANEL_ANGULAR_DAMPING,
            },
            Friction::coefficient(PANEL_FRICTION),
            Restitution::coefficient(PANEL_RESTITUTION),
            Velocity::zero(),
            ExternalImpulse::default(),
            ImpulseJoint::new(anchor, TypedJoint::RevoluteJoint(joint)),
            Transform::from_translation(FLOOR_POSITION).with_rotation(rotation),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(PANEL_SIZE.x, PANEL_SIZE.y, PANEL_SIZE.z))),
                MeshMaterial3d(floor_material),
                Transform::from_translation(slab_offset),
            ));
        });
}

/// Fixed-body 3D text that bobs via its visual child. Turned dynamic when
/// the trap door opens.
fn spawn_floating_text(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    text_config: &FloatingTextConfig,
) {
    let entries = [
        (text_config.title.as_str(), TITLE_POSITION, 0.12, 0.2),
        (text_config.subtitle.as_str(), SUBTITLE_POSITION, 0.05, 0.1),
    ];

    for (text, position, cell, depth) in entries {
        let (mesh, half_extents) = create_text_mesh(text, cell, depth);
        let material = materials.add(StandardMaterial {
            base_color: Color::BLACK,
            metallic: 0.1,
            perceptual_roughness: 0.2,
            alpha_mode: AlphaMode::Blend,
            ..default()
        });

        commands
            .spawn((
                FloatingDecor {
                    initial_translation: position,
                    initial_rotation: Quat::IDENTITY,
                },
                RigidBody::Fixed,
                Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
                Velocity::zero(),
                ExternalImpulse::default(),
                Transform::from_translation(position),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(meshes.add(mesh)),
                    MeshMaterial3d(material),
                    BobbingVisual { base_y: 0.0 },
                    Transform::default(),
                ));
            });
    }
}

/// Social-icon plaques: hoverable fixed bodies that fall with the trap door.
fn spawn_social_icons(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let icons: [(&str, Mesh, Collider); 2] = [
        (
            "GitHub",
            Mesh::from(Extrusion::new(Annulus::new(0.22, 0.38), 0.12)),
            Collider::cuboid(0.38, 0.38, 0.06),
        ),
        (
            "LinkedIn",
            Mesh::from(Cuboid::new(0.6, 0.6, 0.12)),
            Collider::cuboid(0.3, 0.3, 0.06),
        ),
    ];

    for ((label, mesh, collider), position) in icons.into_iter().zip(ICON_POSITIONS) {
        let material = materials.add(StandardMaterial {
            base_color: Color::BLACK,
            metallic: 0.1,
            perceptual_roughness: 0.8,
            alpha_mode: AlphaMode::Blend,
            ..default()
        });

        commands
            .spawn((
                SocialIcon {
                    label: label.to_string(),
                    base_color: Color::BLACK,
                },
                FloatingDecor {
                    initial_translation: position,
                    initial_rotation: Quat::IDENTITY,
                },
                RigidBody::Fixed,
                collider,
                Velocity::zero(),
                ExternalImpulse::default(),
                Transform::from_translation(position),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(meshes.add(mesh)),
                    MeshMaterial3d(material),
                    IconVisual,
                    BobbingVisual { base_y: 0.0 },
                    Transform::default(),
                ));
            });
    }
}
