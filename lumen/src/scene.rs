mod packing;
mod picking;

use derivative::Derivative;
use lumen_gpu::{
    PackedMeshFace, PackedMeshFaceExtra, PackedMeshNode, PackedSceneInfo,
    PackedSceneNode, PackedSceneObject,
};
use slotmap::SlotMap;

use crate::{
    Entity, EntityId, EntityKind, Error, Material, Mesh, Result, SceneDirty,
    SceneDirtyFlags,
};

/// Scene graph, together with the assets it refers to and their packed
/// (GPU-ready) representation.
///
/// Mutating the scene only marks parts of it as dirty; the packed arrays get
/// brought up to date by [`Scene::pack()`].
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Scene {
    entities: SlotMap<EntityId, Entity>,
    root: EntityId,
    meshes: Vec<Mesh>,
    materials: Vec<Material>,
    dirty: SceneDirtyFlags,

    #[derivative(Debug = "ignore")]
    mesh_face_pack: Vec<PackedMeshFace>,

    #[derivative(Debug = "ignore")]
    mesh_face_extra_pack: Vec<PackedMeshFaceExtra>,

    #[derivative(Debug = "ignore")]
    mesh_node_pack: Vec<PackedMeshNode>,

    #[derivative(Debug = "ignore")]
    scene_object_pack: Vec<PackedSceneObject>,

    #[derivative(Debug = "ignore")]
    scene_node_pack: Vec<PackedSceneNode>,

    /// Index of each mesh's root node within `mesh_node_pack`
    #[derivative(Debug = "ignore")]
    mesh_root_node_indices: Vec<u32>,

    /// Entity each packed object comes from
    #[derivative(Debug = "ignore")]
    object_entities: Vec<EntityId>,
}

impl Scene {
    pub fn new() -> Self {
        let mut entities = SlotMap::with_key();
        let root = entities.insert(Entity::new("Root", EntityKind::Root));

        Self {
            entities,
            root,
            meshes: Default::default(),
            materials: Default::default(),
            dirty: SceneDirtyFlags::all(),
            mesh_face_pack: Default::default(),
            mesh_face_extra_pack: Default::default(),
            mesh_node_pack: Default::default(),
            scene_object_pack: Default::default(),
            scene_node_pack: Default::default(),
            mesh_root_node_indices: Default::default(),
            object_entities: Default::default(),
        }
    }

    pub fn root(&self) -> EntityId {
        self.root
    }

    /// Adds entity as the last child of `parent` (or of the root, if no
    /// parent is given).
    pub fn add_entity(
        &mut self,
        parent: Option<EntityId>,
        mut entity: Entity,
    ) -> Result<EntityId> {
        let parent = parent.unwrap_or(self.root);

        if !self.entities.contains_key(parent) {
            return Err(Error::EntityNotFound(parent));
        }

        entity.parent = Some(parent);
        entity.children.clear();

        let id = self.entities.insert(entity);

        self.entities[parent].children.push(id);
        self.mark_dirty(SceneDirty::Shapes);

        Ok(id)
    }

    /// Removes entity together with all of its descendants.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<Entity> {
        if id == self.root {
            return Err(Error::RootEntity);
        }

        let entity = self
            .entities
            .remove(id)
            .ok_or(Error::EntityNotFound(id))?;

        if let Some(parent) = entity.parent {
            if let Some(parent) = self.entities.get_mut(parent) {
                parent.children.retain(|child| *child != id);
            }
        }

        let mut pending = entity.children.clone();

        while let Some(id) = pending.pop() {
            if let Some(child) = self.entities.remove(id) {
                pending.extend(child.children);
            }
        }

        self.mark_dirty(SceneDirty::Shapes);

        Ok(entity)
    }

    /// Moves entity (with its descendants) to the end of `parent`'s
    /// children.
    pub fn set_parent(
        &mut self,
        id: EntityId,
        parent: EntityId,
    ) -> Result<()> {
        if id == self.root {
            return Err(Error::RootEntity);
        }

        if !self.entities.contains_key(id) {
            return Err(Error::EntityNotFound(id));
        }

        if !self.entities.contains_key(parent) {
            return Err(Error::EntityNotFound(parent));
        }

        let mut ancestor = Some(parent);

        while let Some(ancestor_id) = ancestor {
            if ancestor_id == id {
                return Err(Error::CyclicParent { entity: id, parent });
            }

            ancestor = self.entities[ancestor_id].parent;
        }

        if let Some(old_parent) = self.entities[id].parent {
            self.entities[old_parent]
                .children
                .retain(|child| *child != id);
        }

        self.entities[id].parent = Some(parent);
        self.entities[parent].children.push(id);
        self.mark_dirty(SceneDirty::Shapes);

        Ok(())
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Returns entity for modification, assuming it's going to be modified
    /// (i.e. marking shapes as dirty).
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let entity = self.entities.get_mut(id)?;

        self.dirty |= SceneDirty::Shapes;

        if entity.kind == EntityKind::Camera {
            self.dirty |= SceneDirty::Cameras;
        }

        Some(entity)
    }

    /// Changes what given entity is, returning its previous kind.
    pub fn set_kind(
        &mut self,
        id: EntityId,
        kind: EntityKind,
    ) -> Result<EntityKind> {
        if id == self.root {
            return Err(Error::RootEntity);
        }

        let entity = self
            .entities
            .get_mut(id)
            .ok_or(Error::EntityNotFound(id))?;

        let prev = std::mem::replace(&mut entity.kind, kind);

        self.dirty |= SceneDirty::Shapes;

        if prev == EntityKind::Camera || kind == EntityKind::Camera {
            self.dirty |= SceneDirty::Cameras;
        }

        Ok(prev)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.meshes.push(mesh);
        self.mark_dirty(SceneDirty::Meshes);

        self.meshes.len() - 1
    }

    pub fn replace_mesh(&mut self, index: usize, mesh: Mesh) -> Result<Mesh> {
        let slot = self
            .meshes
            .get_mut(index)
            .ok_or(Error::MeshNotFound(index))?;

        let prev = std::mem::replace(slot, mesh);

        self.mark_dirty(SceneDirty::Meshes);

        Ok(prev)
    }

    pub fn mesh(&self, index: usize) -> Option<&Mesh> {
        self.meshes.get(index)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.mark_dirty(SceneDirty::Materials);

        self.materials.len() - 1
    }

    pub fn material_mut(&mut self, index: usize) -> Option<&mut Material> {
        let material = self.materials.get_mut(index)?;

        self.dirty = SceneDirty::with_implications(
            self.dirty | SceneDirty::Materials,
        );

        Some(material)
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn mark_dirty(&mut self, flags: impl Into<SceneDirtyFlags>) {
        self.dirty = SceneDirty::with_implications(self.dirty | flags.into());
    }

    pub fn dirty(&self) -> SceneDirtyFlags {
        self.dirty
    }

    pub fn mesh_face_pack(&self) -> &[PackedMeshFace] {
        &self.mesh_face_pack
    }

    pub fn mesh_face_extra_pack(&self) -> &[PackedMeshFaceExtra] {
        &self.mesh_face_extra_pack
    }

    pub fn mesh_node_pack(&self) -> &[PackedMeshNode] {
        &self.mesh_node_pack
    }

    pub fn scene_object_pack(&self) -> &[PackedSceneObject] {
        &self.scene_object_pack
    }

    pub fn scene_node_pack(&self) -> &[PackedSceneNode] {
        &self.scene_node_pack
    }

    /// Returns lengths of the packed arrays, as uploaded next to them.
    pub fn info(&self) -> PackedSceneInfo {
        PackedSceneInfo {
            mesh_face_count: self.mesh_face_pack.len() as u32,
            mesh_node_count: self.mesh_node_pack.len() as u32,
            scene_object_count: self.scene_object_pack.len() as u32,
            scene_node_count: self.scene_node_pack.len() as u32,
        }
    }

    /// Returns the entity given packed object was created from.
    pub fn object_entity(&self, object_index: u32) -> Option<EntityId> {
        self.object_entities.get(object_index as usize).copied()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
