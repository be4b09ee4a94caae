mod mesh_bvh;
mod scene_bvh;

pub use self::mesh_bvh::*;
pub use self::scene_bvh::*;
