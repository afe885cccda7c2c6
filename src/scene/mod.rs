//! Scene root: the static boundary volume plus trajectory lines appended
//! frame by frame.
//!
//! The scene is plain data. Renderers read it through [`Scene::nodes`] and
//! use [`Scene::generation`] to decide when geometry needs re-uploading.

mod volume;

use glam::Vec3;
pub use volume::{box_edges, box_mesh, bounding_volume};

/// How a line primitive's points are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTopology {
    /// Each point connects to the next.
    Strip,
    /// Points pair up into independent segments.
    Segments,
}

/// Polyline geometry with a flat color.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    /// Vertices in draw order.
    pub points: Vec<Vec3>,
    /// How `points` are connected.
    pub topology: LineTopology,
    /// Linear RGB color.
    pub color: [f32; 3],
}

impl LinePrimitive {
    /// Number of drawn segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        match self.topology {
            LineTopology::Strip => self.points.len().saturating_sub(1),
            LineTopology::Segments => self.points.len() / 2,
        }
    }

    /// Endpoint pairs of every drawn segment.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        let step = match self.topology {
            LineTopology::Strip => 1,
            LineTopology::Segments => 2,
        };
        self.points
            .windows(2)
            .step_by(step)
            .map(|pair| (pair[0], pair[1]))
    }
}

/// Indexed triangle mesh with a flat, optionally translucent color.
///
/// Only back faces are drawn, so a closed mesh reads as a backdrop seen
/// from inside or behind.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPrimitive {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Triangle list indices into `positions`, counter-clockwise front faces.
    pub indices: Vec<u32>,
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Alpha in `[0, 1]`.
    pub opacity: f32,
}

/// One drawable item in the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    /// Line strip or segment list.
    Lines(LinePrimitive),
    /// Triangle mesh.
    Mesh(MeshPrimitive),
}

/// The scene root. Owns every node in insertion order; nodes are only ever
/// appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    background: [f32; 3],
    nodes: Vec<SceneNode>,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new([0.0; 3])
    }
}

impl Scene {
    /// Empty scene cleared to `background`.
    #[must_use]
    pub fn new(background: [f32; 3]) -> Self {
        Self {
            background,
            nodes: Vec::new(),
            generation: 0,
        }
    }

    /// Clear color (linear RGB).
    #[must_use]
    pub fn background(&self) -> [f32; 3] {
        self.background
    }

    /// All nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Mutation counter, for change detection by renderers.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Append a node.
    pub fn add(&mut self, node: SceneNode) {
        self.nodes.push(node);
        self.generation += 1;
    }

    /// Append one line strip through `points`, in order. Fewer than two
    /// points draw nothing, so nothing is added. Returns whether a line was
    /// added.
    pub fn append_trajectory(&mut self, points: &[Vec3], color: [f32; 3]) -> bool {
        if points.len() < 2 {
            if !points.is_empty() {
                log::trace!("skipping single-point trajectory chunk");
            }
            return false;
        }
        self.add(SceneNode::Lines(LinePrimitive {
            points: points.to_vec(),
            topology: LineTopology::Strip,
            color,
        }));
        true
    }

    /// Iterate over line primitives only.
    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.nodes.iter().filter_map(|node| match node {
            SceneNode::Lines(line) => Some(line),
            SceneNode::Mesh(_) => None,
        })
    }

    /// Iterate over meshes only.
    pub fn meshes(&self) -> impl Iterator<Item = &MeshPrimitive> {
        self.nodes.iter().filter_map(|node| match node {
            SceneNode::Mesh(mesh) => Some(mesh),
            SceneNode::Lines(_) => None,
        })
    }
}
