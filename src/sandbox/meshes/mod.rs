//! Procedural meshes and colliders for catalog entries

pub mod glyphs;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::sandbox::types::{ColliderKind, DropSource, Outline};

pub use glyphs::create_text_mesh;

/// Build the render mesh and collision shape for a catalog entry source.
/// `Scene` sources return `None`: their visuals come from the asset server
/// and their collider is derived from the entry's collider kind alone.
pub fn create_drop_mesh_and_collider(
    source: &DropSource,
    kind: ColliderKind,
    scale: f32,
) -> Option<(Mesh, Collider)> {
    match source {
        DropSource::Sphere { radius } => {
            let r = radius * scale;
            Some((Mesh::from(Sphere::new(r)), Collider::ball(r)))
        }
        DropSource::Cuboid { half_extents } => {
            let (hx, hy, hz) = (
                half_extents.0 * scale,
                half_extents.1 * scale,
                half_extents.2 * scale,
            );
            Some((
                Mesh::from(Cuboid::new(hx * 2.0, hy * 2.0, hz * 2.0)),
                Collider::cuboid(hx, hy, hz),
            ))
        }
        DropSource::Extruded { outline, depth } => {
            let depth = depth * scale;
            let mesh = match outline {
                Outline::Polygon { sides, circumradius } => Mesh::from(Extrusion::new(
                    RegularPolygon::new(circumradius * scale, *sides),
                    depth,
                )),
                Outline::Ring {
                    inner_radius,
                    outer_radius,
                } => Mesh::from(Extrusion::new(
                    Annulus::new(inner_radius * scale, outer_radius * scale),
                    depth,
                )),
            };
            let collider = collider_for_mesh(&mesh, kind)?;
            Some((mesh, collider))
        }
        DropSource::Text { text } => {
            let (mesh, half_extents) = create_text_mesh(text, 0.25 * scale, 0.1 * scale);
            let collider = match kind {
                ColliderKind::Hull => collider_for_mesh(&mesh, kind)
                    .unwrap_or(Collider::cuboid(half_extents.x, half_extents.y, half_extents.z)),
                _ => Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            };
            Some((mesh, collider))
        }
        DropSource::Scene { .. } => None,
    }
}

/// Collision shape for an asset-server scene entry, sized by its scale.
pub fn scene_collider(kind: ColliderKind, scale: f32) -> Collider {
    let half = 0.5 * scale;
    match kind {
        ColliderKind::Ball => Collider::ball(half),
        _ => Collider::cuboid(half, half, half),
    }
}

/// Derive a collider from mesh vertices: a convex hull for `Hull`, otherwise
/// a bounding ball or box.
fn collider_for_mesh(mesh: &Mesh, kind: ColliderKind) -> Option<Collider> {
    let points = mesh_points(mesh)?;
    match kind {
        ColliderKind::Hull => {
            Collider::convex_hull(&points).or_else(|| bounding_cuboid(&points))
        }
        ColliderKind::Ball => {
            let radius = points
                .iter()
                .map(|p| p.length())
                .fold(0.0f32, f32::max)
                .max(1e-3);
            Some(Collider::ball(radius))
        }
        ColliderKind::Cuboid => bounding_cuboid(&points),
    }
}

fn bounding_cuboid(points: &[Vec3]) -> Option<Collider> {
    let mut max = Vec3::splat(1e-3);
    for p in points {
        max = max.max(p.abs());
    }
    Some(Collider::cuboid(max.x, max.y, max.z))
}

fn mesh_points(mesh: &Mesh) -> Option<Vec<Vec3>> {
    use bevy_mesh::VertexAttributeValues;
    match mesh.attribute(Mesh::ATTRIBUTE_POSITION)? {
        VertexAttributeValues::Float32x3(values) => {
            Some(values.iter().map(|v| Vec3::from_array(*v)).collect())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::types::{ColliderKind, DropSource, Outline};

    #[test]
    fn test_sphere_source_builds() {
        let built =
            create_drop_mesh_and_collider(&DropSource::Sphere { radius: 0.3 }, ColliderKind::Ball, 1.0);
        assert!(built.is_some());
    }

    #[test]
    fn test_extruded_sources_build_with_hull() {
        for outline in [
            Outline::Polygon {
                sides: 6,
                circumradius: 0.4,
            },
            Outline::Ring {
                inner_radius: 0.2,
                outer_radius: 0.45,
            },
        ] {
            let built = create_drop_mesh_and_collider(
                &DropSource::Extruded {
                    outline,
                    depth: 0.2,
                },
                ColliderKind::Hull,
                1.0,
            );
            assert!(built.is_some());
        }
    }

    #[test]
    fn test_text_source_builds() {
        let built = create_drop_mesh_and_collider(
            &DropSource::Text {
                text: "BUILD".to_string(),
            },
            ColliderKind::Cuboid,
            1.0,
        );
        assert!(built.is_some());
    }

    #[test]
    fn test_scene_source_has_no_inline_mesh() {
        let built = create_drop_mesh_and_collider(
            &DropSource::Scene {
                path: "models/monitor.glb".to_string(),
            },
            ColliderKind::Cuboid,
            1.0,
        );
        assert!(built.is_none());
    }
}
