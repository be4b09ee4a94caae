use core::mem;

use smallvec::SmallVec;

use crate::{
    hit_cube, hit_plane, hit_sphere, Hit, ObjectType, PackedMeshFace,
    PackedMeshNode, PackedSceneNode, PackedSceneObject, Ray,
    MESH_BVH_STACK_SIZE, OBJECT_INDEX_NONE,
};

/// Read-only view over packed scene data - exactly what gets uploaded into
/// the GPU's storage buffers.
#[derive(Clone, Copy, Debug, Default)]
pub struct SceneView<'a> {
    pub mesh_faces: &'a [PackedMeshFace],
    pub mesh_nodes: &'a [PackedMeshNode],
    pub scene_objects: &'a [PackedSceneObject],
    pub scene_nodes: &'a [PackedSceneNode],
}

impl<'a> SceneView<'a> {
    /// Traces given (world-space) ray through the scene BVH and returns
    /// whether anything got hit.
    pub fn trace(&self, ray: Ray, hit: &mut Hit) -> bool {
        *hit = Hit::none();

        self.intersect_scene_bvh(ray, hit);

        hit.is_some()
    }

    /// Tests given ray against all objects, one by one, in index order.
    ///
    /// Finds the same closest hit as [`Self::intersect_scene_bvh()`], just
    /// slower; handy as a reference.
    pub fn intersect(&self, ray: Ray, hit: &mut Hit) {
        for object_index in 0..self.scene_objects.len() {
            self.intersect_object(ray, object_index as u32, hit);
        }
    }

    pub fn intersect_scene_bvh(&self, ray: Ray, hit: &mut Hit) {
        if self.scene_nodes.is_empty()
            || self.intersect_scene_node_bounds(ray, 0, hit.time)
                == f32::INFINITY
        {
            return;
        }

        let mut stack = BvhStack::new();
        let mut node_index = 0;

        loop {
            let node = self.scene_nodes[node_index as usize];

            if node.is_leaf() {
                self.intersect_object(ray, node.object_index, hit);
            } else {
                let (left, right) = node.children();
                let left_time =
                    self.intersect_scene_node_bounds(ray, left, hit.time);

                let right_time =
                    self.intersect_scene_node_bounds(ray, right, hit.time);

                if let Some(near_index) = Self::descend(
                    &mut stack,
                    hit,
                    (left, left_time),
                    (right, right_time),
                ) {
                    node_index = near_index;
                    continue;
                }
            }

            match Self::pop(&mut stack, hit) {
                Some(next_index) => node_index = next_index,
                None => break,
            }
        }
    }

    /// Moves given ray into object's local space and tests it against that
    /// object.
    pub fn intersect_object(
        &self,
        ray: Ray,
        object_index: u32,
        hit: &mut Hit,
    ) {
        let object = &self.scene_objects[object_index as usize];
        let ray = ray.transform(&object.transform.from);

        let Some(ty) = object.ty() else {
            return;
        };

        let got_hit = match ty {
            ObjectType::MeshInstance => {
                let time = hit.time;

                self.intersect_mesh(ray, object.mesh_root_node_index, hit);

                // Faces don't know which object they belong to
                if hit.time < time && hit.object_index == OBJECT_INDEX_NONE {
                    hit.object_index = object_index;
                }

                return;
            }

            ObjectType::Plane => hit_plane(ray, hit),
            ObjectType::Sphere => hit_sphere(ray, hit),
            ObjectType::Cube => hit_cube(ray, hit),
        };

        if got_hit {
            hit.object_type = Some(ty);
            hit.object_index = object_index;
        }
    }

    /// Traverses the mesh BVH rooted at `root_node_index`, recording the
    /// closest face hit that's closer than `hit.time`.
    ///
    /// The ray is expected to be in the mesh's local space already.
    pub fn intersect_mesh(
        &self,
        ray: Ray,
        root_node_index: u32,
        hit: &mut Hit,
    ) {
        let mut stack = BvhStack::new();
        let mut node_index = root_node_index;

        loop {
            let node = self.mesh_nodes[node_index as usize];

            if node.is_leaf() {
                let (begin, end) = node.faces();

                for face_index in begin..end {
                    self.mesh_faces[face_index as usize]
                        .hit(ray, face_index, hit);
                }
            } else {
                let left = node.child_index();
                let right = left + 1;

                debug_assert!(left > node_index);

                let left_time =
                    self.intersect_mesh_node_bounds(ray, left, hit.time);

                let right_time =
                    self.intersect_mesh_node_bounds(ray, right, hit.time);

                if let Some(near_index) = Self::descend(
                    &mut stack,
                    hit,
                    (left, left_time),
                    (right, right_time),
                ) {
                    node_index = near_index;
                    continue;
                }
            }

            match Self::pop(&mut stack, hit) {
                Some(next_index) => node_index = next_index,
                None => break,
            }
        }
    }

    pub fn intersect_mesh_node_bounds(
        &self,
        ray: Ray,
        node_index: u32,
        reach: f32,
    ) -> f32 {
        let node = &self.mesh_nodes[node_index as usize];

        ray.intersect_bounds(node.minimum, node.maximum, reach)
    }

    pub fn intersect_scene_node_bounds(
        &self,
        ray: Ray,
        node_index: u32,
        reach: f32,
    ) -> f32 {
        let node = &self.scene_nodes[node_index as usize];

        ray.intersect_bounds(node.minimum, node.maximum, reach)
    }

    /// Given two children of an internal node, pushes the farther one onto
    /// the stack (if it's hit at all) and returns the nearer one (if it's
    /// hit at all).
    ///
    /// Visiting the nearer child first makes it more likely that the farther
    /// one is already occluded by the time we pop it.
    fn descend(
        stack: &mut BvhStack,
        hit: &Hit,
        mut near: (u32, f32),
        mut far: (u32, f32),
    ) -> Option<u32> {
        if far.1 < near.1 {
            mem::swap(&mut near, &mut far);
        }

        if far.1 < hit.time {
            stack.push(far);
        }

        (near.1 < hit.time).then_some(near.0)
    }

    /// Pops the next node worth visiting, skipping the ones that got occluded
    /// since they were pushed.
    fn pop(stack: &mut BvhStack, hit: &Hit) -> Option<u32> {
        while let Some((node_index, time)) = stack.pop() {
            if time < hit.time {
                return Some(node_index);
            }
        }

        None
    }
}

/// Stack of nodes yet-to-be-visited when traversing a BVH, together with the
/// times at which the ray enters them.
pub type BvhStack = SmallVec<[(u32, f32); MESH_BVH_STACK_SIZE]>;
