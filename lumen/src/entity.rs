use glam::{Mat4, Quat, Vec3};
use lumen_gpu::ObjectType;
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Returns the parent-from-local matrix (scale, then rotation, then
    /// translation).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.position,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Root,
    Camera,
    MeshInstance {
        mesh_index: usize,
        material_index: usize,
    },
    Plane {
        material_index: usize,
    },
    Sphere {
        material_index: usize,
    },
    Cube {
        material_index: usize,
    },
}

impl EntityKind {
    /// Returns the kind of object this entity gets packed as, if any.
    pub fn object_type(&self) -> Option<ObjectType> {
        match self {
            EntityKind::Root | EntityKind::Camera => None,
            EntityKind::MeshInstance { .. } => Some(ObjectType::MeshInstance),
            EntityKind::Plane { .. } => Some(ObjectType::Plane),
            EntityKind::Sphere { .. } => Some(ObjectType::Sphere),
            EntityKind::Cube { .. } => Some(ObjectType::Cube),
        }
    }

    pub fn material_index(&self) -> Option<usize> {
        match *self {
            EntityKind::Root | EntityKind::Camera => None,
            EntityKind::MeshInstance { material_index, .. }
            | EntityKind::Plane { material_index }
            | EntityKind::Sphere { material_index }
            | EntityKind::Cube { material_index } => Some(material_index),
        }
    }
}

/// Node of the scene graph.
///
/// Entities form a tree (rooted at [`crate::Scene::root()`]); each one's
/// transform is relative to its parent.
#[derive(Clone, Debug)]
pub struct Entity {
    pub name: String,
    pub transform: Transform,

    /// Inactive entities are skipped when packing, together with their
    /// descendants.
    pub active: bool,

    /// Changed only through [`crate::Scene::set_kind()`], which knows what
    /// has to be repacked then.
    pub(crate) kind: EntityKind,
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<EntityId>,
}

impl Entity {
    pub fn new(name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Default::default(),
            active: true,
            parent: None,
            children: Default::default(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }
}
