//! Lumen's host side: scene graph, BVH builders and the packing that turns
//! them into arrays ready to be uploaded onto the GPU.
//!
//! # Usage
//!
//! ```no_run
//! use glam::vec3;
//! use lumen::gpu::Ray;
//! use lumen::{Entity, EntityKind, Material, Scene};
//!
//! let mut scene = Scene::new();
//! let material = scene.add_material(Material::new("white"));
//!
//! let sphere = Entity::new(
//!     "sphere",
//!     EntityKind::Sphere {
//!         material_index: material,
//!     },
//! );
//!
//! let sphere = scene.add_entity(None, sphere).unwrap();
//!
//! scene.pack().unwrap();
//!
//! let (entity, hit) = scene
//!     .pick(Ray::new(vec3(0.0, 0.0, 5.0), vec3(0.0, 0.0, -1.0)))
//!     .unwrap();
//!
//! assert_eq!(sphere, entity);
//! assert_eq!(4.0, hit.time);
//! ```

mod buffers;
mod bvh;
mod dirty;
mod entity;
mod error;
mod material;
mod mesh;
mod scene;
mod utils;

pub use lumen_gpu as gpu;

pub use self::buffers::*;
pub use self::bvh::*;
pub use self::dirty::*;
pub use self::entity::*;
pub use self::error::*;
pub use self::material::*;
pub use self::mesh::*;
pub use self::scene::*;
pub use self::utils::Bounds;
