use lumen_gpu::PackedSceneNode;
use thiserror::Error;

use crate::EntityId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Entity doesn't exist (or has been removed already)
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Reparenting would make an entity its own ancestor
    #[error("cannot move entity {entity:?} under its descendant {parent:?}")]
    CyclicParent { entity: EntityId, parent: EntityId },

    /// The root entity cannot be removed nor reparented
    #[error("cannot detach the root entity")]
    RootEntity,

    /// Mesh index out of bounds
    #[error("mesh not found: {0}")]
    MeshNotFound(usize),

    /// Face has a non-finite vertex position
    #[error("face #{face_index} has a non-finite vertex position")]
    InvalidFace { face_index: usize },

    /// Scene BVH doesn't fit into 16-bit child indices
    #[error(
        "scene BVH would contain {count} nodes, but only {max} fit",
        max = PackedSceneNode::MAX_NODES
    )]
    TooManySceneNodes { count: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
