use bytemuck::{Pod, Zeroable};

use crate::{ObjectType, PackedTransform};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedSceneObject {
    pub ty: u32,
    pub material_index: u32,
    pub mesh_root_node_index: u32,

    /// Pre-order rank of the entity this object was packed from; used by
    /// consumers to order overlapping objects deterministically.
    pub priority: u32,

    pub transform: PackedTransform,
}

impl PackedSceneObject {
    pub fn ty(&self) -> Option<ObjectType> {
        ObjectType::from_raw(self.ty)
    }
}
