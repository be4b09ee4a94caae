use lumen_gpu::{
    PackedMeshFace, PackedMeshFaceExtra, PackedMeshNode, PackedSceneInfo,
    PackedSceneNode, PackedSceneObject,
};

use super::{StorageBuffer, UniformBuffer};
use crate::{Scene, SceneDirty, SceneDirtyFlags};

/// GPU-side copies of the packed scene arrays.
///
/// Storage buffers don't shrink, so their lengths get uploaded separately
/// (see [`PackedSceneInfo`]).
#[derive(Debug)]
pub struct SceneBuffers {
    info: UniformBuffer<PackedSceneInfo>,
    mesh_faces: StorageBuffer<PackedMeshFace>,
    mesh_face_extras: StorageBuffer<PackedMeshFaceExtra>,
    mesh_nodes: StorageBuffer<PackedMeshNode>,
    scene_objects: StorageBuffer<PackedSceneObject>,
    scene_nodes: StorageBuffer<PackedSceneNode>,
}

impl SceneBuffers {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            info: UniformBuffer::new(device, "lumen_scene_info"),
            mesh_faces: StorageBuffer::new(device, "lumen_mesh_faces"),
            mesh_face_extras: StorageBuffer::new(
                device,
                "lumen_mesh_face_extras",
            ),
            mesh_nodes: StorageBuffer::new(device, "lumen_mesh_nodes"),
            scene_objects: StorageBuffer::new(device, "lumen_scene_objects"),
            scene_nodes: StorageBuffer::new(device, "lumen_scene_nodes"),
        }
    }

    /// Uploads arrays affected by given flags (as returned from
    /// [`Scene::pack()`]); returns whether any buffer got reallocated, in
    /// which case bind groups have to be re-created.
    pub fn flush(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &Scene,
        acted: SceneDirtyFlags,
    ) -> bool {
        let mut reallocated = false;

        if acted.contains(SceneDirty::Meshes) {
            reallocated |=
                self.mesh_faces.write(device, queue, scene.mesh_face_pack());

            reallocated |= self.mesh_face_extras.write(
                device,
                queue,
                scene.mesh_face_extra_pack(),
            );

            reallocated |=
                self.mesh_nodes.write(device, queue, scene.mesh_node_pack());
        }

        if acted.contains(SceneDirty::Shapes) {
            reallocated |= self.scene_objects.write(
                device,
                queue,
                scene.scene_object_pack(),
            );

            reallocated |=
                self.scene_nodes.write(device, queue, scene.scene_node_pack());
        }

        if !acted.is_disjoint(SceneDirty::Meshes | SceneDirty::Shapes) {
            self.info.write(queue, &scene.info());
        }

        if reallocated {
            log::debug!("Scene buffers reallocated");
        }

        reallocated
    }

    /// Returns layout entries and resources for all buffers, at bindings
    /// starting from `first_binding` (in the order: mesh faces, mesh face
    /// extras, mesh nodes, scene objects, scene nodes, scene info).
    pub fn bind(
        &self,
        first_binding: u32,
    ) -> Vec<(wgpu::BindGroupLayoutEntry, wgpu::BindingResource)> {
        vec![
            self.mesh_faces.bind(first_binding),
            self.mesh_face_extras.bind(first_binding + 1),
            self.mesh_nodes.bind(first_binding + 2),
            self.scene_objects.bind(first_binding + 3),
            self.scene_nodes.bind(first_binding + 4),
            self.info.bind(first_binding + 5),
        ]
    }

    pub fn info(&self) -> &UniformBuffer<PackedSceneInfo> {
        &self.info
    }

    pub fn mesh_faces(&self) -> &StorageBuffer<PackedMeshFace> {
        &self.mesh_faces
    }

    pub fn mesh_face_extras(&self) -> &StorageBuffer<PackedMeshFaceExtra> {
        &self.mesh_face_extras
    }

    pub fn mesh_nodes(&self) -> &StorageBuffer<PackedMeshNode> {
        &self.mesh_nodes
    }

    pub fn scene_objects(&self) -> &StorageBuffer<PackedSceneObject> {
        &self.scene_objects
    }

    pub fn scene_nodes(&self) -> &StorageBuffer<PackedSceneNode> {
        &self.scene_nodes
    }
}
