//! Block-glyph 3D text meshes
//!
//! The floating title text is built from a 5x7 dot-matrix font, one small
//! box per set bit, merged into a single mesh. No font file is involved, so
//! text can never fail to load.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy_mesh::{Indices, PrimitiveTopology};

/// 5x7 bitmap rows for a glyph, top row first, bit 4 = leftmost column.
fn glyph_rows(c: char) -> Option<[u8; 7]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        _ => return None,
    };
    Some(rows)
}

/// Append one axis-aligned box (24 vertices, 6 faces) to the buffers.
fn push_box(positions: &mut Vec<[f32; 3]>, indices: &mut Vec<u32>, center: Vec3, half: Vec3) {
    let (cx, cy, cz) = (center.x, center.y, center.z);
    let (hx, hy, hz) = (half.x, half.y, half.z);

    // Faces in the order the normal generator expects:
    // front(+Z), back(-Z), top(+Y), bottom(-Y), left(-X), right(+X),
    // each wound counter-clockwise seen from outside.
    let faces: [[[f32; 3]; 4]; 6] = [
        [
            [cx - hx, cy - hy, cz + hz],
            [cx + hx, cy - hy, cz + hz],
            [cx + hx, cy + hy, cz + hz],
            [cx - hx, cy + hy, cz + hz],
        ],
        [
            [cx + hx, cy - hy, cz - hz],
            [cx - hx, cy - hy, cz - hz],
            [cx - hx, cy + hy, cz - hz],
            [cx + hx, cy + hy, cz - hz],
        ],
        [
            [cx - hx, cy + hy, cz + hz],
            [cx + hx, cy + hy, cz + hz],
            [cx + hx, cy + hy, cz - hz],
            [cx - hx, cy + hy, cz - hz],
        ],
        [
            [cx - hx, cy - hy, cz - hz],
            [cx + hx, cy - hy, cz - hz],
            [cx + hx, cy - hy, cz + hz],
            [cx - hx, cy - hy, cz + hz],
        ],
        [
            [cx - hx, cy - hy, cz - hz],
            [cx - hx, cy - hy, cz + hz],
            [cx - hx, cy + hy, cz + hz],
            [cx - hx, cy + hy, cz - hz],
        ],
        [
            [cx + hx, cy - hy, cz + hz],
            [cx + hx, cy - hy, cz - hz],
            [cx + hx, cy + hy, cz - hz],
            [cx + hx, cy + hy, cz + hz],
        ],
    ];

    for face in faces {
        let base = positions.len() as u32;
        positions.extend_from_slice(&face);
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Per-vertex normals matching the face order of `push_box`.
fn box_normals(box_count: usize) -> Vec<[f32; 3]> {
    let face_normals: [[f32; 3]; 6] = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
    ];
    let mut normals = Vec::with_capacity(box_count * 24);
    for _ in 0..box_count {
        for normal in face_normals {
            for _ in 0..4 {
                normals.push(normal);
            }
        }
    }
    normals
}

/// Build a single mesh for `text` from dot-matrix boxes. `cell` is the size
/// of one matrix dot; `depth` the extrusion depth. Returns the mesh and its
/// half extents. Characters outside the font are skipped; an empty result
/// degrades to a single dot so the mesh is never vertex-free.
pub fn create_text_mesh(text: &str, cell: f32, depth: f32) -> (Mesh, Vec3) {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    // Spaces advance the cursor but draw nothing; unknown characters are
    // dropped from the layout entirely.
    let layout: Vec<Option<[u8; 7]>> = text
        .chars()
        .filter(|c| *c == ' ' || glyph_rows(*c).is_some())
        .map(glyph_rows)
        .collect();

    let advance = 6.0 * cell;
    let total_width = (layout.len() as f32 * advance - cell).max(cell);
    let half = Vec3::new(total_width / 2.0, 3.5 * cell, depth / 2.0);
    let half_dot = Vec3::new(cell / 2.0, cell / 2.0, depth / 2.0);

    for (slot, rows) in layout.iter().enumerate() {
        let Some(rows) = rows else { continue };
        let origin_x = -half.x + slot as f32 * advance;
        for (row_index, row) in rows.iter().enumerate() {
            for col in 0..5u32 {
                if (*row as u32) & (1 << (4 - col)) != 0 {
                    let center = Vec3::new(
                        origin_x + col as f32 * cell + cell / 2.0,
                        (3.0 - row_index as f32) * cell,
                        0.0,
                    );
                    push_box(&mut positions, &mut indices, center, half_dot);
                }
            }
        }
    }

    if positions.is_empty() {
        push_box(&mut positions, &mut indices, Vec3::ZERO, half_dot);
    }

    let box_count = positions.len() / 24;
    let normals = box_normals(box_count);
    let uvs: Vec<[f32; 2]> = positions.iter().map(|_| [0.5, 0.5]).collect();

    let mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices));

    (mesh, half)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_letter_and_digit_has_a_glyph() {
        for c in ('A'..='Z').chain('0'..='9') {
            assert!(glyph_rows(c).is_some(), "missing glyph for {:?}", c);
        }
        assert!(glyph_rows('a').is_some(), "lowercase should map to uppercase");
        assert!(glyph_rows('~').is_none());
    }

    #[test]
    fn test_text_mesh_vertex_count_is_box_aligned() {
        let (mesh, _) = create_text_mesh("HI", 0.25, 0.1);
        let count = mesh.count_vertices();
        assert!(count > 0);
        assert_eq!(count % 24, 0, "every box contributes 24 vertices");
    }

    #[test]
    fn test_text_mesh_extents_grow_with_length() {
        let (_, short) = create_text_mesh("HI", 0.25, 0.1);
        let (_, long) = create_text_mesh("HELLO WORLD", 0.25, 0.1);
        assert!(long.x > short.x);
        assert!(short.x > 0.0 && short.y > 0.0 && short.z > 0.0);
    }

    #[test]
    fn test_unknown_characters_are_skipped_not_fatal() {
        let (mesh, _) = create_text_mesh("~~~", 0.25, 0.1);
        // Degrades to the placeholder dot.
        assert_eq!(mesh.count_vertices(), 24);
    }
}
