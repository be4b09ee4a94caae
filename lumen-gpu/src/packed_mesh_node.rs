use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Node of a mesh BVH, as seen by the GPU.
///
/// A node is a leaf iff `face_end_index > 0` - in that case it spans faces
/// `face_begin_or_node_index..face_end_index`; otherwise it's an internal
/// node whose children live at `face_begin_or_node_index` and
/// `face_begin_or_node_index + 1`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedMeshNode {
    pub minimum: Vec3,
    pub face_begin_or_node_index: u32,
    pub maximum: Vec3,
    pub face_end_index: u32,
}

impl PackedMeshNode {
    /// Creates a leaf spanning faces `begin..end`.
    ///
    /// A leaf with `end == 0` reads back as an internal node, so leaves of
    /// empty meshes packed at offset zero must never be traversed.
    pub fn leaf(minimum: Vec3, maximum: Vec3, begin: u32, end: u32) -> Self {
        Self {
            minimum,
            face_begin_or_node_index: begin,
            maximum,
            face_end_index: end,
        }
    }

    pub fn internal(minimum: Vec3, maximum: Vec3, child_index: u32) -> Self {
        Self {
            minimum,
            face_begin_or_node_index: child_index,
            maximum,
            face_end_index: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.face_end_index > 0
    }

    pub fn faces(&self) -> (u32, u32) {
        (self.face_begin_or_node_index, self.face_end_index)
    }

    pub fn child_index(&self) -> u32 {
        self.face_begin_or_node_index
    }
}
