use bytemuck::{Pod, Zeroable};

/// Lengths of the packed arrays.
///
/// Storage buffers only ever grow, so whatever lies past these lengths is
/// left over from earlier uploads and must not be read.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct PackedSceneInfo {
    pub mesh_face_count: u32,
    pub mesh_node_count: u32,
    pub scene_object_count: u32,
    pub scene_node_count: u32,
}

impl PackedSceneInfo {
    pub fn has_objects(&self) -> bool {
        self.scene_node_count > 0
    }
}
