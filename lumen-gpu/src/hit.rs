use glam::Vec3;

use crate::{ObjectType, OBJECT_INDEX_NONE};

/// Closest intersection found so far along a ray.
///
/// Intersection routines only ever overwrite a hit with a strictly closer
/// one, so a fresh `Hit::none()` doubles as "search up to infinity".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub time: f32,
    pub object_type: Option<ObjectType>,
    pub object_index: u32,
    pub primitive_index: u32,

    /// Barycentric coordinates for mesh faces, `(u, v, 0)` for planes and
    /// the local-space hit point for spheres and cubes.
    pub primitive_coordinates: Vec3,
}

impl Hit {
    pub fn none() -> Self {
        Self {
            time: f32::INFINITY,
            object_type: None,
            object_index: OBJECT_INDEX_NONE,
            primitive_index: 0,
            primitive_coordinates: Vec3::ZERO,
        }
    }

    pub fn is_some(&self) -> bool {
        self.time < f32::INFINITY
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }
}

impl Default for Hit {
    fn default() -> Self {
        Self::none()
    }
}
