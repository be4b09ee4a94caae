use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};

/// Shading attributes of a face, stored index-aligned with
/// [`crate::PackedMeshFace`] so that intersection doesn't have to touch them.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedMeshFaceExtra {
    pub normals: [Vec4; 3],
    pub uvs: [Vec2; 3],
    pub material_index: u32,
    pub _padding0: u32,
}

impl PackedMeshFaceExtra {
    pub fn new(
        normals: [Vec3; 3],
        uvs: [Vec2; 3],
        material_index: u32,
    ) -> Self {
        Self {
            normals: normals.map(|normal| normal.extend(0.0)),
            uvs,
            material_index,
            _padding0: 0,
        }
    }

    /// Interpolates the vertex normals at given barycentric coordinates.
    pub fn normal(&self, coords: Vec3) -> Vec3 {
        (self.normals[0].xyz() * coords.x
            + self.normals[1].xyz() * coords.y
            + self.normals[2].xyz() * coords.z)
            .normalize_or_zero()
    }

    /// Interpolates the vertex UVs at given barycentric coordinates.
    pub fn uv(&self, coords: Vec3) -> Vec2 {
        self.uvs[0] * coords.x + self.uvs[1] * coords.y + self.uvs[2] * coords.z
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{vec2, vec3};

    use super::*;

    #[test]
    fn interpolation() {
        let target = PackedMeshFaceExtra::new(
            [
                vec3(1.0, 0.0, 0.0),
                vec3(0.0, 1.0, 0.0),
                vec3(0.0, 0.0, 1.0),
            ],
            [vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 1.0)],
            3,
        );

        let uv = target.uv(vec3(0.5, 0.25, 0.25));

        assert_relative_eq!(uv.x, 0.25);
        assert_relative_eq!(uv.y, 0.25);

        let normal = target.normal(vec3(0.0, 1.0, 0.0));

        assert_relative_eq!(normal.y, 1.0);
        assert_eq!(3, target.material_index);
        assert_eq!(80, std::mem::size_of::<PackedMeshFaceExtra>());
    }
}
