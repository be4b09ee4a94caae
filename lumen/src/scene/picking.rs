use lumen_gpu::{Hit, Ray, SceneView};

use super::Scene;
use crate::EntityId;

impl Scene {
    /// Returns a view over the packed arrays.
    ///
    /// Reflects the state as of the last [`Scene::pack()`].
    pub fn view(&self) -> SceneView<'_> {
        SceneView {
            mesh_faces: &self.mesh_face_pack,
            mesh_nodes: &self.mesh_node_pack,
            scene_objects: &self.scene_object_pack,
            scene_nodes: &self.scene_node_pack,
        }
    }

    /// Finds the closest hit along given ray, using the scene BVH.
    pub fn trace(&self, ray: Ray, hit: &mut Hit) -> bool {
        self.view().trace(ray, hit)
    }

    /// Finds the closest hit along given ray by testing objects one by one.
    pub fn intersect(&self, ray: Ray, hit: &mut Hit) {
        self.view().intersect(ray, hit)
    }

    /// Returns the entity hit first by given ray, if any.
    pub fn pick(&self, ray: Ray) -> Option<(EntityId, Hit)> {
        let mut hit = Hit::none();

        if !self.trace(ray, &mut hit) {
            return None;
        }

        Some((self.object_entity(hit.object_index)?, hit))
    }
}
