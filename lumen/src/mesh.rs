use glam::{Vec2, Vec3};

use crate::utils::{measure, Bounds};
use crate::{bvh, Error, Result};

/// Triangle of a mesh, together with its shading attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshFace {
    positions: [Vec3; 3],
    centroid: Vec3,
    normals: [Vec3; 3],
    uvs: [Vec2; 3],
    material_index: u32,
}

impl MeshFace {
    /// Creates a face with flat normals, zeroed UVs and material 0.
    pub fn new(positions: [Vec3; 3]) -> Self {
        let normal = (positions[1] - positions[0])
            .cross(positions[2] - positions[0])
            .normalize_or_zero();

        Self {
            positions,
            centroid: (positions[0] + positions[1] + positions[2]) / 3.0,
            normals: [normal; 3],
            uvs: Default::default(),
            material_index: 0,
        }
    }

    pub fn with_normals(mut self, normals: [Vec3; 3]) -> Self {
        self.normals = normals;
        self
    }

    pub fn with_uvs(mut self, uvs: [Vec2; 3]) -> Self {
        self.uvs = uvs;
        self
    }

    pub fn with_material(mut self, material_index: u32) -> Self {
        self.material_index = material_index;
        self
    }

    pub fn positions(&self) -> [Vec3; 3] {
        self.positions
    }

    pub fn centroid(&self) -> Vec3 {
        self.centroid
    }

    pub fn normals(&self) -> [Vec3; 3] {
        self.normals
    }

    pub fn uvs(&self) -> [Vec2; 3] {
        self.uvs
    }

    pub fn material_index(&self) -> u32 {
        self.material_index
    }

    pub fn bounds(&self) -> Bounds {
        self.positions.into_iter().collect()
    }
}

/// Node of a mesh's BVH.
///
/// Leaves have `child_node_index == 0` (the root can't be anybody's child);
/// internal nodes keep their children at `child_node_index` and the index
/// right after it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshNode {
    pub bounds: Bounds,
    pub face_begin_index: u32,
    pub face_end_index: u32,
    pub child_node_index: u32,
}

impl MeshNode {
    pub fn leaf(face_begin_index: u32, face_end_index: u32) -> Self {
        Self {
            bounds: Default::default(),
            face_begin_index,
            face_end_index,
            child_node_index: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.child_node_index == 0
    }

    pub fn face_count(&self) -> u32 {
        self.face_end_index - self.face_begin_index
    }
}

/// Triangle mesh together with its BVH.
///
/// Building the BVH reorders faces, so `faces()` doesn't necessarily match
/// the order in which they were given to [`Mesh::new()`].
#[derive(Clone, Debug)]
pub struct Mesh {
    pub(crate) faces: Vec<MeshFace>,
    pub(crate) nodes: Vec<MeshNode>,
    pub(crate) depth: u32,
}

impl Mesh {
    pub fn new(faces: Vec<MeshFace>) -> Self {
        let face_count = faces.len();

        let mut this = Self {
            nodes: vec![MeshNode::leaf(0, face_count as u32)],
            faces,
            depth: 0,
        };

        measure("mesh-bvh", || bvh::build_mesh_node(&mut this, 0, 0));

        log::debug!(
            "Mesh built; faces={}, nodes={}, depth={}",
            face_count,
            this.nodes.len(),
            this.depth,
        );

        this
    }

    /// Like [`Mesh::new()`], but rejects faces with non-finite positions.
    pub fn try_new(faces: Vec<MeshFace>) -> Result<Self> {
        let invalid = faces.iter().position(|face| {
            !face.positions.iter().all(|position| position.is_finite())
        });

        if let Some(face_index) = invalid {
            return Err(Error::InvalidFace { face_index });
        }

        Ok(Self::new(faces))
    }

    pub fn faces(&self) -> &[MeshFace] {
        &self.faces
    }

    pub fn nodes(&self) -> &[MeshNode] {
        &self.nodes
    }

    /// Deepest level at which a node got split (the root being level 0).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn bounds(&self) -> Bounds {
        self.nodes
            .first()
            .map(|node| node.bounds)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
