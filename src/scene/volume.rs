//! Cube geometry for the simulation boundary.

use glam::Vec3;

use super::{LinePrimitive, LineTopology, MeshPrimitive, SceneNode};

/// Corner `i` of an origin-centered cube with half-extent `h`; bit 0 picks
/// +x, bit 1 +y, bit 2 +z.
fn corner(i: usize, h: f32) -> Vec3 {
    let sign = |bit: usize| if i & bit == 0 { -h } else { h };
    Vec3::new(sign(1), sign(2), sign(4))
}

/// The 12 edges of an origin-centered cube of edge `size`, as 24 segment
/// endpoints.
#[must_use]
pub fn box_edges(size: f32) -> Vec<Vec3> {
    let h = size / 2.0;
    let mut points = Vec::with_capacity(24);
    for i in 0..8 {
        for bit in [1, 2, 4] {
            // Emit each edge once, from its lower corner.
            if i & bit == 0 {
                points.push(corner(i, h));
                points.push(corner(i | bit, h));
            }
        }
    }
    points
}

/// Positions and counter-clockwise triangle indices of an origin-centered
/// cube of edge `size`.
#[must_use]
pub fn box_mesh(size: f32) -> (Vec<Vec3>, Vec<u32>) {
    let h = size / 2.0;
    let positions = (0..8).map(|i| corner(i, h)).collect();
    #[rustfmt::skip]
    let indices = vec![
        0, 4, 6, 0, 6, 2, // -x
        1, 3, 7, 1, 7, 5, // +x
        0, 1, 5, 0, 5, 4, // -y
        2, 6, 7, 2, 7, 3, // +y
        0, 2, 3, 0, 3, 1, // -z
        4, 5, 7, 4, 7, 6, // +z
    ];
    (positions, indices)
}

/// Wireframe edges plus a translucent back-face fill for a cube of edge
/// `size` centered on the origin.
#[must_use]
pub fn bounding_volume(
    size: f32,
    opacity: f32,
    edge_color: [f32; 3],
    fill_color: [f32; 3],
) -> [SceneNode; 2] {
    let (positions, indices) = box_mesh(size);
    [
        SceneNode::Lines(LinePrimitive {
            points: box_edges(size),
            topology: LineTopology::Segments,
            color: edge_color,
        }),
        SceneNode::Mesh(MeshPrimitive {
            positions,
            indices,
            color: fill_color,
            opacity: opacity.clamp(0.0, 1.0),
        }),
    ]
}
