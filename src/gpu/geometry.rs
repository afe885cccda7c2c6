//! CPU-side flattening of a [`Scene`] into GPU vertex and index arrays.
//!
//! Lines become a `LineList` (strips are expanded into segment pairs) and
//! meshes are concatenated into one indexed buffer with a draw range per
//! mesh, so a whole scene uploads as three buffers. Scenes only grow, so
//! [`SceneGeometry::sync`] flattens just the nodes added since the last
//! call.

use std::ops::Range;

use crate::scene::{Scene, SceneNode};

// ==================== VERTEX FORMAT ====================

/// 28-byte vertex shared by the line and mesh pipelines.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Linear RGBA.
    pub color: [f32; 4],
}

/// Vertex buffer layout matching `VertexInput` in `scene.wgsl`.
#[must_use]
pub fn scene_vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<SceneVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 12,
                shader_location: 1,
            },
        ],
    }
}

// ==================== BATCHED GEOMETRY ====================

/// One mesh inside the concatenated mesh buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshDraw {
    /// Range into the index buffer.
    pub indices: Range<u32>,
    /// Offset added to every index of this mesh.
    pub base_vertex: i32,
}

/// All scene geometry, ready for upload.
#[derive(Debug, Default)]
pub struct SceneGeometry {
    /// Segment endpoint pairs for the line pipeline.
    pub line_vertices: Vec<SceneVertex>,
    /// Concatenated mesh vertices.
    pub mesh_vertices: Vec<SceneVertex>,
    /// Concatenated mesh indices, each mesh's relative to its base vertex.
    pub mesh_indices: Vec<u32>,
    /// Per-mesh draw ranges, in scene order.
    pub mesh_draws: Vec<MeshDraw>,
    /// Scene nodes already flattened.
    flattened: usize,
}

/// What a [`SceneGeometry::sync`] changed, and so what must be uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryChange {
    /// Nothing new.
    Unchanged,
    /// Only line vertices were added, starting at this vertex index.
    LinesAppended {
        /// First new line vertex.
        from: usize,
    },
    /// Meshes changed or the geometry was rebuilt; upload everything.
    Rebuilt,
}

impl SceneGeometry {
    /// Flatten every node of `scene`.
    #[must_use]
    pub fn from_scene(scene: &Scene) -> Self {
        let mut geometry = Self::default();
        geometry.push_nodes(scene.nodes());
        geometry
    }

    /// Bring the geometry up to date with `scene`, flattening only nodes
    /// added since the last sync.
    pub fn sync(&mut self, scene: &Scene) -> GeometryChange {
        let nodes = scene.nodes();
        if nodes.len() < self.flattened {
            *self = Self::from_scene(scene);
            return GeometryChange::Rebuilt;
        }
        let added = &nodes[self.flattened..];
        if added.is_empty() {
            return GeometryChange::Unchanged;
        }

        let from = self.line_vertices.len();
        let meshes = self.mesh_draws.len();
        self.push_nodes(added);
        if self.mesh_draws.len() == meshes {
            GeometryChange::LinesAppended { from }
        } else {
            GeometryChange::Rebuilt
        }
    }

    fn push_nodes(&mut self, nodes: &[SceneNode]) {
        for node in nodes {
            match node {
                SceneNode::Lines(line) => {
                    let [r, g, b] = line.color;
                    let color = [r, g, b, 1.0];
                    for (a, b) in line.segments() {
                        self.line_vertices.push(SceneVertex {
                            position: a.to_array(),
                            color,
                        });
                        self.line_vertices.push(SceneVertex {
                            position: b.to_array(),
                            color,
                        });
                    }
                }
                SceneNode::Mesh(mesh) => {
                    let [r, g, b] = mesh.color;
                    let color = [r, g, b, mesh.opacity];
                    let base_vertex = self.mesh_vertices.len() as i32;
                    let start = self.mesh_indices.len() as u32;
                    self.mesh_vertices.extend(mesh.positions.iter().map(|p| {
                        SceneVertex {
                            position: p.to_array(),
                            color,
                        }
                    }));
                    self.mesh_indices.extend_from_slice(&mesh.indices);
                    self.mesh_draws.push(MeshDraw {
                        indices: start..self.mesh_indices.len() as u32,
                        base_vertex,
                    });
                }
            }
        }
        self.flattened += nodes.len();
    }

    /// Number of line-list vertices.
    #[must_use]
    pub fn line_vertex_count(&self) -> u32 {
        self.line_vertices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::bounding_volume;

    #[test]
    fn strips_expand_to_segment_pairs() {
        let mut scene = Scene::default();
        let _ = scene.append_trajectory(
            &[Vec3::ZERO, Vec3::X, Vec3::Y],
            [1.0, 0.5, 0.0],
        );
        let geometry = SceneGeometry::from_scene(&scene);
        let positions: Vec<_> =
            geometry.line_vertices.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
            ]
        );
        assert_eq!(geometry.line_vertices[0].color, [1.0, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn meshes_get_their_own_draw_ranges() {
        let mut scene = Scene::default();
        for node in bounding_volume(10.0, 0.2, [0.3; 3], [0.1; 3]) {
            scene.add(node);
        }
        for node in bounding_volume(20.0, 0.5, [0.3; 3], [0.1; 3]) {
            scene.add(node);
        }
        let geometry = SceneGeometry::from_scene(&scene);

        assert_eq!(geometry.line_vertex_count(), 48);
        assert_eq!(geometry.mesh_vertices.len(), 16);
        assert_eq!(
            geometry.mesh_draws,
            vec![
                MeshDraw {
                    indices: 0..36,
                    base_vertex: 0,
                },
                MeshDraw {
                    indices: 36..72,
                    base_vertex: 8,
                },
            ]
        );
        assert_eq!(geometry.mesh_vertices[8].color[3], 0.5);
    }

    #[test]
    fn trajectory_appends_only_flatten_new_lines() {
        let mut scene = Scene::default();
        for node in bounding_volume(10.0, 0.2, [0.3; 3], [0.1; 3]) {
            scene.add(node);
        }
        let mut geometry = SceneGeometry::default();
        assert_eq!(geometry.sync(&scene), GeometryChange::Rebuilt);
        assert_eq!(geometry.sync(&scene), GeometryChange::Unchanged);

        let _ = scene.append_trajectory(&[Vec3::ZERO, Vec3::X], [1.0; 3]);
        assert_eq!(
            geometry.sync(&scene),
            GeometryChange::LinesAppended { from: 24 }
        );
        let _ =
            scene.append_trajectory(&[Vec3::X, Vec3::Y, Vec3::Z], [1.0; 3]);
        assert_eq!(
            geometry.sync(&scene),
            GeometryChange::LinesAppended { from: 26 }
        );

        let fresh = SceneGeometry::from_scene(&scene);
        assert_eq!(geometry.line_vertices, fresh.line_vertices);
        assert_eq!(geometry.mesh_draws, fresh.mesh_draws);
    }

    #[test]
    fn added_mesh_forces_full_upload() {
        let mut scene = Scene::default();
        let _ = scene.append_trajectory(&[Vec3::ZERO, Vec3::X], [1.0; 3]);
        let mut geometry = SceneGeometry::from_scene(&scene);

        for node in bounding_volume(10.0, 0.2, [0.3; 3], [0.1; 3]) {
            scene.add(node);
        }
        assert_eq!(geometry.sync(&scene), GeometryChange::Rebuilt);
        assert_eq!(geometry.line_vertex_count(), 26);
        assert_eq!(geometry.mesh_draws.len(), 1);
    }

    #[test]
    fn vertex_layout_matches_struct() {
        let layout = scene_vertex_buffer_layout();
        assert_eq!(layout.array_stride, 28);
        assert_eq!(layout.attributes[1].offset, 12);
    }
}
