use bytemuck::{Pod, Zeroable};
use glam::{vec3, Vec3, Vec4, Vec4Swizzles};

use crate::{Hit, ObjectType, Ray, EPSILON, OBJECT_INDEX_NONE};

/// Triangle prepared for intersection.
///
/// Instead of vertices, we store the triangle's plane together with two
/// vectors spanning the inverse of its first fundamental form - this way,
/// once we know where a ray crosses the plane, computing the barycentric
/// coordinates of that point boils down to two dot products.
///
/// Degenerate triangles end up with non-finite basis vectors and are never
/// hit.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedMeshFace {
    pub position: Vec3,
    pub _padding0: u32,
    pub plane: Vec4,
    pub base1: Vec3,
    pub _padding1: u32,
    pub base2: Vec3,
    pub _padding2: u32,
}

impl PackedMeshFace {
    pub fn new(positions: [Vec3; 3]) -> Self {
        let [p0, p1, p2] = positions;
        let edge1 = p1 - p0;
        let edge2 = p2 - p0;

        let normal = edge1.cross(edge2).normalize();
        let plane = normal.extend(normal.dot(p0));

        let e11 = edge1.dot(edge1);
        let e12 = edge1.dot(edge2);
        let e22 = edge2.dot(edge2);
        let inv_det = 1.0 / (e11 * e22 - e12 * e12);

        let base1 = (e22 * edge1 - e12 * edge2) * inv_det;
        let base2 = (e11 * edge2 - e12 * edge1) * inv_det;

        Self {
            position: p0,
            plane,
            base1,
            base2,
            ..Default::default()
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.plane.xyz()
    }

    /// Returns barycentric coordinates `(beta, gamma)` of a point lying on
    /// this face's plane.
    pub fn barycentrics(&self, point: Vec3) -> (f32, f32) {
        let offset = point - self.position;

        (self.base1.dot(offset), self.base2.dot(offset))
    }

    /// Checks whether given ray hits this face closer than `hit.time`; if
    /// so, overwrites the hit and returns `true`.
    ///
    /// The hit's object index is reset to [`OBJECT_INDEX_NONE`], it's up to
    /// the caller to attribute the hit to an object.
    pub fn hit(&self, ray: Ray, face_index: u32, hit: &mut Hit) -> bool {
        let normal = self.normal();
        let r = normal.dot(ray.direction());

        if r.abs() < EPSILON {
            return false;
        }

        let time = (self.plane.w - normal.dot(ray.origin())) / r;

        // Written as positive checks, so that NaNs coming from degenerate
        // faces get rejected as well
        let is_closer = (time >= 0.0) & (time < hit.time);

        if !is_closer {
            return false;
        }

        let (beta, gamma) = self.barycentrics(ray.at(time));

        let is_inside = (beta >= 0.0)
            & (beta <= 1.0)
            & (gamma >= 0.0)
            & (beta + gamma <= 1.0);

        if !is_inside {
            return false;
        }

        hit.time = time;
        hit.object_type = Some(ObjectType::MeshInstance);
        hit.object_index = OBJECT_INDEX_NONE;
        hit.primitive_index = face_index;
        hit.primitive_coordinates = vec3(1.0 - beta - gamma, beta, gamma);

        true
    }
}
