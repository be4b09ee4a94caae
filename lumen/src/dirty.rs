use enumset::{EnumSet, EnumSetType};

/// Part of the scene that has changed since the last [`crate::Scene::pack()`].
#[derive(Debug, EnumSetType)]
pub enum SceneDirty {
    Textures,
    Materials,
    Shapes,
    Meshes,
    Cameras,
    Globals,
}

pub type SceneDirtyFlags = EnumSet<SceneDirty>;

impl SceneDirty {
    /// Extends given flags with everything they imply.
    ///
    /// Objects refer to meshes (through mesh root nodes) and materials, so
    /// changing either means objects have to be re-packed too.
    pub fn with_implications(flags: SceneDirtyFlags) -> SceneDirtyFlags {
        if flags.contains(SceneDirty::Meshes)
            || flags.contains(SceneDirty::Materials)
        {
            flags | SceneDirty::Shapes
        } else {
            flags
        }
    }
}
