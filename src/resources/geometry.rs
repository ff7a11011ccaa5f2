//! Procedural primitive meshes.
//!
//! All builders return CPU-side [`MeshData`] so they can be inspected without
//! a GPU; upload them with [`crate::data_structures::model::Mesh::upload`].
//! Triangles are wound counter-clockwise when seen from outside, matching the
//! pipeline's back-face culling.

use std::f32::consts::PI;

use crate::data_structures::model::{MeshData, MeshVertex};

// Corner order shared by every box: back face (-z) then front face (+z).
const BOX_INDICES: [u32; 36] = [
    4, 5, 6, 6, 7, 4, // front
    1, 0, 3, 3, 2, 1, // back
    0, 4, 7, 7, 3, 0, // left
    5, 1, 2, 2, 6, 5, // right
    7, 6, 2, 2, 3, 7, // top
    0, 1, 5, 5, 4, 0, // bottom
];

fn box_corners(min: [f32; 3], max: [f32; 3]) -> [[f32; 3]; 8] {
    [
        [min[0], min[1], min[2]],
        [max[0], min[1], min[2]],
        [max[0], max[1], min[2]],
        [min[0], max[1], min[2]],
        [min[0], min[1], max[2]],
        [max[0], min[1], max[2]],
        [max[0], max[1], max[2]],
        [min[0], max[1], max[2]],
    ]
}

fn solid_box(min: [f32; 3], max: [f32; 3], color: [f32; 3]) -> MeshData {
    let vertices = box_corners(min, max)
        .into_iter()
        .map(|position| MeshVertex { position, color })
        .collect();
    MeshData::new(vertices, BOX_INDICES.to_vec())
}

/// Axis-aligned cube centred on the origin with edge length `size`.
///
/// Every corner gets a distinct color so faces stay readable without lighting.
pub fn cube(size: f32) -> MeshData {
    let half = size * 0.5;
    let colors = [
        [1.0, 0.0, 1.0],
        [0.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.5, 0.5, 0.5],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 1.0, 0.0],
    ];
    let vertices = box_corners([-half; 3], [half; 3])
        .into_iter()
        .zip(colors)
        .map(|(position, color)| MeshVertex { position, color })
        .collect();
    MeshData::new(vertices, BOX_INDICES.to_vec())
}

/// UV sphere with `segments` slices around Y and `rings` stacks pole to pole.
pub fn sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let phi = PI * v;
        let y = radius * phi.cos();
        let ring_radius = radius * phi.sin();
        for segment in 0..=segments {
            let u = segment as f32 / segments as f32;
            let theta = 2.0 * PI * u;
            vertices.push(MeshVertex {
                position: [ring_radius * theta.cos(), y, ring_radius * theta.sin()],
                color: gradient(u, v),
            });
        }
    }

    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * (segments + 1) + segment;
            let next = current + segments + 1;
            indices.extend_from_slice(&[current, current + 1, next]);
            indices.extend_from_slice(&[current + 1, next + 1, next]);
        }
    }

    MeshData::new(vertices, indices)
}

/// Flat quad in the XZ plane facing +Y.
pub fn plane(width: f32, depth: f32) -> MeshData {
    let half_w = width * 0.5;
    let half_d = depth * 0.5;
    let vertices = vec![
        MeshVertex {
            position: [-half_w, 0.0, -half_d],
            color: [0.2, 0.8, 0.2],
        },
        MeshVertex {
            position: [half_w, 0.0, -half_d],
            color: [0.8, 0.8, 0.2],
        },
        MeshVertex {
            position: [half_w, 0.0, half_d],
            color: [0.8, 0.2, 0.8],
        },
        MeshVertex {
            position: [-half_w, 0.0, half_d],
            color: [0.2, 0.2, 0.8],
        },
    ];
    MeshData::new(vertices, vec![0, 2, 1, 2, 0, 3])
}

/// A blocky rifle pointing down −Z: barrel, wooden stock behind it and a grip.
pub fn rifle(scale: f32) -> MeshData {
    let barrel_color = [0.2, 0.2, 0.2];
    let stock_color = [0.4, 0.2, 0.1];
    let metal_color = [0.3, 0.3, 0.3];

    let barrel_length = 1.0 * scale;
    let barrel_half = 0.03 * scale;
    let mut mesh = solid_box(
        [-barrel_half, -barrel_half, -barrel_length / 2.0],
        [barrel_half, barrel_half, barrel_length / 2.0],
        barrel_color,
    );

    let stock_length = 0.6 * scale;
    let stock_half_w = 0.04 * scale;
    let stock_half_h = 0.125 * scale;
    let stock_start = barrel_length / 2.0 + 0.05 * scale;
    mesh.append(solid_box(
        [-stock_half_w, -stock_half_h, stock_start],
        [stock_half_w, stock_half_h, stock_start + stock_length],
        stock_color,
    ));

    let grip_half_w = stock_half_w * 1.2;
    let grip_height = stock_half_h * 2.0 * 1.5;
    let grip_half_l = 0.06 * scale;
    let grip_z = stock_start + stock_length * 0.2;
    mesh.append(solid_box(
        [-grip_half_w, -grip_height, grip_z - grip_half_l],
        [grip_half_w, -grip_height / 4.0, grip_z + grip_half_l],
        metal_color,
    ));

    mesh
}

fn gradient(u: f32, v: f32) -> [f32; 3] {
    [
        0.5 + 0.5 * (u * 2.0 * PI).sin(),
        0.5 + 0.5 * (v * 2.0 * PI).sin(),
        0.5 + 0.5 * ((u + v) * PI).sin(),
    ]
}
