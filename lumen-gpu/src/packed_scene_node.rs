use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::OBJECT_INDEX_NONE;

/// Node of the scene (top-level) BVH, as seen by the GPU.
///
/// Child indices are packed into 16 bits each (left in the low half, right in
/// the high half), which limits the tree to 65535 nodes. A node is a leaf iff
/// `child_node_indices == 0` - the root lives at index zero, so no other node
/// can point at it.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedSceneNode {
    pub minimum: Vec3,
    pub child_node_indices: u32,
    pub maximum: Vec3,
    pub object_index: u32,
}

impl PackedSceneNode {
    pub const MAX_NODES: usize = 0xFFFF;

    pub fn leaf(minimum: Vec3, maximum: Vec3, object_index: u32) -> Self {
        Self {
            minimum,
            child_node_indices: 0,
            maximum,
            object_index,
        }
    }

    pub fn internal(
        minimum: Vec3,
        maximum: Vec3,
        left: u32,
        right: u32,
    ) -> Self {
        assert!(
            left <= 0xFFFF && right <= 0xFFFF,
            "scene node index doesn't fit in 16 bits; left={left}, \
             right={right}"
        );

        Self {
            minimum,
            child_node_indices: left | (right << 16),
            maximum,
            object_index: OBJECT_INDEX_NONE,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.child_node_indices == 0
    }

    pub fn children(&self) -> (u32, u32) {
        (
            self.child_node_indices & 0xFFFF,
            self.child_node_indices >> 16,
        )
    }

    /// Rewrites child indices pointing at `from` so that they point at `to`.
    pub fn relink(&mut self, from: u32, to: u32) {
        if self.is_leaf() {
            return;
        }

        let (mut left, mut right) = self.children();

        if left == from {
            left = to;
        }

        if right == from {
            right = to;
        }

        *self = Self::internal(self.minimum, self.maximum, left, right);
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn children() {
        let target =
            PackedSceneNode::internal(Vec3::ZERO, Vec3::ONE, 0x1234, 0xFFFF);

        assert!(!target.is_leaf());
        assert_eq!((0x1234, 0xFFFF), target.children());
        assert_eq!(OBJECT_INDEX_NONE, target.object_index);

        let target = PackedSceneNode::leaf(Vec3::ZERO, vec3(1.0, 2.0, 3.0), 7);

        assert!(target.is_leaf());
        assert_eq!(7, target.object_index);
    }

    #[test]
    fn relink() {
        let mut target =
            PackedSceneNode::internal(Vec3::ZERO, Vec3::ONE, 3, 5);

        target.relink(5, 8);
        assert_eq!((3, 8), target.children());

        target.relink(3, 9);
        assert_eq!((9, 8), target.children());

        target.relink(1, 2);
        assert_eq!((9, 8), target.children());
    }

    #[test]
    #[should_panic]
    fn overflow() {
        PackedSceneNode::internal(Vec3::ZERO, Vec3::ONE, 0x10000, 1);
    }
}
