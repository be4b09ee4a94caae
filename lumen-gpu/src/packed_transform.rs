use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Object-to-world matrix together with its inverse.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedTransform {
    pub to: Mat4,
    pub from: Mat4,
}

impl PackedTransform {
    pub fn new(to: Mat4) -> Self {
        Self {
            to,
            from: to.inverse(),
        }
    }
}
