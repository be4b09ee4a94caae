//! Packed scene layouts shared by Lumen's compute shaders and its host-side
//! code, together with the ray-intersection routines that operate on them.

#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_range_contains)]

mod hit;
mod object_type;
mod packed_mesh_face;
mod packed_mesh_face_extra;
mod packed_mesh_node;
mod packed_scene_info;
mod packed_scene_node;
mod packed_scene_object;
mod packed_transform;
mod ray;
mod scene_view;
mod shapes;

pub use self::hit::*;
pub use self::object_type::*;
pub use self::packed_mesh_face::*;
pub use self::packed_mesh_face_extra::*;
pub use self::packed_mesh_node::*;
pub use self::packed_scene_info::*;
pub use self::packed_scene_node::*;
pub use self::packed_scene_object::*;
pub use self::packed_transform::*;
pub use self::ray::*;
pub use self::scene_view::*;
pub use self::shapes::*;

/// Inline capacity of the stack used when traversing a BVH (see
/// [`BvhStack`]).
///
/// Trees deeper than this still get traversed correctly, the stack just
/// spills onto the heap then.
pub const MESH_BVH_STACK_SIZE: usize = 32;

/// Marks "no object"; used by internal scene nodes and by mesh hits that
/// haven't been attributed to an object yet.
pub const OBJECT_INDEX_NONE: u32 = 0xFFFF_FFFF;

/// Rays whose direction is this close to being parallel to a face's plane
/// never hit that face.
pub const EPSILON: f32 = 1e-6;

/// Half-size of the plane primitive along its local x and y axes.
pub const PLANE_EXTENT: f32 = 1e4;
