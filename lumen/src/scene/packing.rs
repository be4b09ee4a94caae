use glam::Mat4;
use lumen_gpu::{
    plane_bounds, unit_bounds, ObjectType, PackedMeshFace,
    PackedMeshFaceExtra, PackedMeshNode, PackedSceneNode, PackedSceneObject,
    PackedTransform,
};

use super::Scene;
use crate::utils::{measure, Bounds};
use crate::{
    bvh, EntityId, EntityKind, Error, Mesh, Result, SceneDirty,
    SceneDirtyFlags,
};

impl Scene {
    /// Brings the packed arrays up to date with whatever's been changed
    /// since the last call, returning the flags that have been acted upon.
    ///
    /// Flags this crate doesn't pack anything for (textures, cameras and
    /// globals) get passed through, so that the caller can react to them.
    ///
    /// On error the previously packed arrays are left intact and the flags
    /// stay pending.
    pub fn pack(&mut self) -> Result<SceneDirtyFlags> {
        let dirty = SceneDirty::with_implications(self.dirty);

        if dirty.is_empty() {
            return Ok(dirty);
        }

        let meshes = dirty
            .contains(SceneDirty::Meshes)
            .then(|| measure("pack-meshes", || self.pack_meshes()));

        let objects = if dirty.contains(SceneDirty::Shapes) {
            let mesh_root_node_indices = meshes
                .as_ref()
                .map_or(&self.mesh_root_node_indices, |meshes| {
                    &meshes.root_node_indices
                });

            Some(measure("pack-objects", || {
                self.pack_objects(mesh_root_node_indices)
            })?)
        } else {
            None
        };

        if let Some(meshes) = meshes {
            self.mesh_face_pack = meshes.faces;
            self.mesh_face_extra_pack = meshes.face_extras;
            self.mesh_node_pack = meshes.nodes;
            self.mesh_root_node_indices = meshes.root_node_indices;
        }

        if let Some(objects) = objects {
            self.scene_object_pack = objects.objects;
            self.scene_node_pack = objects.nodes;
            self.object_entities = objects.entities;
        }

        self.dirty = SceneDirtyFlags::empty();

        log::info!(
            "Scene packed; dirty={:?}, mesh-faces={}, mesh-nodes={}, \
             objects={}, scene-nodes={}",
            dirty,
            self.mesh_face_pack.len(),
            self.mesh_node_pack.len(),
            self.scene_object_pack.len(),
            self.scene_node_pack.len(),
        );

        Ok(dirty)
    }

    fn pack_meshes(&self) -> PackedMeshes {
        let mut packed = PackedMeshes::default();

        for mesh in &self.meshes {
            let root_node_index = pack_mesh(
                mesh,
                &mut packed.faces,
                &mut packed.face_extras,
                &mut packed.nodes,
            );

            packed.root_node_indices.push(root_node_index);
        }

        packed
    }

    fn pack_objects(
        &self,
        mesh_root_node_indices: &[u32],
    ) -> Result<PackedObjects> {
        let mut packed = PackedObjects::default();
        let mut object_bounds = Vec::new();
        let mut priority = 0;

        // Pre-order walk; children get pushed in reverse, so that they are
        // popped in their natural order
        let mut pending = vec![(self.root, Mat4::IDENTITY)];

        while let Some((id, parent_xform)) = pending.pop() {
            let Some(entity) = self.entities.get(id) else {
                continue;
            };

            if !entity.active {
                continue;
            }

            let xform = parent_xform * entity.transform.matrix();

            for child in entity.children.iter().rev() {
                pending.push((*child, xform));
            }

            let entity_priority = priority;

            priority += 1;

            let Some(object) = self.pack_object(
                id,
                entity.kind,
                mesh_root_node_indices,
            ) else {
                continue;
            };

            object_bounds.push(object.bounds.with_transform(xform));

            packed.objects.push(PackedSceneObject {
                ty: object.ty.raw(),
                material_index: object.material_index,
                mesh_root_node_index: object.mesh_root_node_index,
                priority: entity_priority,
                transform: PackedTransform::new(xform),
            });

            packed.entities.push(id);
        }

        let node_count = (2 * object_bounds.len()).saturating_sub(1);

        if node_count > PackedSceneNode::MAX_NODES {
            return Err(Error::TooManySceneNodes { count: node_count });
        }

        packed.nodes =
            measure("scene-bvh", || bvh::build_scene_nodes(&object_bounds));

        Ok(packed)
    }

    /// Resolves entity's assets; returns `None` for entities that don't get
    /// packed as objects (cameras, instances of missing or empty meshes
    /// etc.).
    fn pack_object(
        &self,
        id: EntityId,
        kind: EntityKind,
        mesh_root_node_indices: &[u32],
    ) -> Option<UnpackedObject> {
        let ty = kind.object_type()?;

        let (bounds, mesh_root_node_index) = match kind {
            EntityKind::MeshInstance { mesh_index, .. } => {
                let Some(mesh) = self.meshes.get(mesh_index) else {
                    log::warn!(
                        "Entity {id:?} refers to a missing mesh #{mesh_index}"
                    );

                    return None;
                };

                // Leaves of empty meshes can't be told apart from internal
                // nodes, so such objects must not reach the GPU
                if mesh.is_empty() {
                    log::debug!(
                        "Entity {id:?} refers to an empty mesh #{mesh_index}"
                    );

                    return None;
                }

                (mesh.bounds(), *mesh_root_node_indices.get(mesh_index)?)
            }

            EntityKind::Plane { .. } => {
                let (min, max) = plane_bounds();

                (Bounds::new(min, max), 0)
            }

            _ => {
                let (min, max) = unit_bounds();

                (Bounds::new(min, max), 0)
            }
        };

        let material_index = kind.material_index().unwrap_or_default();

        let material_index = if material_index < self.materials.len() {
            material_index as u32
        } else {
            log::warn!(
                "Entity {id:?} refers to a missing material \
                 #{material_index}; falling back to material #0"
            );

            0
        };

        Some(UnpackedObject {
            ty,
            bounds,
            material_index,
            mesh_root_node_index,
        })
    }
}

/// Appends mesh's faces and nodes to given arrays, rebasing node and face
/// indices onto the arrays' current lengths; returns index of mesh's root
/// node.
fn pack_mesh(
    mesh: &Mesh,
    faces: &mut Vec<PackedMeshFace>,
    face_extras: &mut Vec<PackedMeshFaceExtra>,
    nodes: &mut Vec<PackedMeshNode>,
) -> u32 {
    let face_offset = faces.len() as u32;
    let node_offset = nodes.len() as u32;

    for face in mesh.faces() {
        faces.push(PackedMeshFace::new(face.positions()));

        face_extras.push(PackedMeshFaceExtra::new(
            face.normals(),
            face.uvs(),
            face.material_index(),
        ));
    }

    for node in mesh.nodes() {
        let min = node.bounds.min();
        let max = node.bounds.max();

        nodes.push(if node.is_leaf() {
            PackedMeshNode::leaf(
                min,
                max,
                face_offset + node.face_begin_index,
                face_offset + node.face_end_index,
            )
        } else {
            PackedMeshNode::internal(
                min,
                max,
                node_offset + node.child_node_index,
            )
        });
    }

    node_offset
}

#[derive(Default)]
struct PackedMeshes {
    faces: Vec<PackedMeshFace>,
    face_extras: Vec<PackedMeshFaceExtra>,
    nodes: Vec<PackedMeshNode>,
    root_node_indices: Vec<u32>,
}

#[derive(Default)]
struct PackedObjects {
    objects: Vec<PackedSceneObject>,
    nodes: Vec<PackedSceneNode>,
    entities: Vec<EntityId>,
}

struct UnpackedObject {
    ty: ObjectType,
    bounds: Bounds,
    material_index: u32,
    mesh_root_node_index: u32,
}
