use crate::utils::Bounds;
use crate::{Mesh, MeshFace, MeshNode};

/// Number of bins per axis considered when looking for a splitting plane.
pub const MESH_BVH_BINS: usize = 32;

/// Fits `mesh.nodes[node_index]` around its faces and, if that's cheaper
/// according to SAH, splits it in two and recurses into the halves.
///
/// The node must already have its face range set; faces within that range
/// get reordered in place, and the children (if any) get appended to
/// `mesh.nodes` as a consecutive pair.
pub fn build_mesh_node(mesh: &mut Mesh, node_index: usize, depth: u32) {
    let node = mesh.nodes[node_index];
    let begin = node.face_begin_index as usize;
    let end = node.face_end_index as usize;

    let bounds: Bounds = mesh.faces[begin..end]
        .iter()
        .flat_map(|face| face.positions())
        .collect();

    mesh.nodes[node_index].bounds = bounds;

    let Some(plane) = find_splitting_plane(&mesh.faces[begin..end]) else {
        return;
    };

    if plane.cost >= node.face_count() as f32 * bounds.half_area() {
        return;
    }

    let split = begin + partition(&mut mesh.faces[begin..end], plane);

    // Binning and partitioning can disagree on faces lying right at the
    // plane; when that empties one side, the node stays a leaf
    if split == begin || split == end {
        return;
    }

    let left_index = mesh.nodes.len();
    let right_index = left_index + 1;

    mesh.nodes.push(MeshNode::leaf(begin as u32, split as u32));
    mesh.nodes.push(MeshNode::leaf(split as u32, end as u32));
    mesh.nodes[node_index].child_node_index = left_index as u32;
    mesh.depth = mesh.depth.max(depth);

    build_mesh_node(mesh, left_index, depth + 1);
    build_mesh_node(mesh, right_index, depth + 1);
}

fn find_splitting_plane(faces: &[MeshFace]) -> Option<SplittingPlane> {
    if faces.len() <= 1 {
        return None;
    }

    let centroid_bb: Bounds =
        faces.iter().map(|face| face.centroid()).collect();
    let mut best: Option<SplittingPlane> = None;

    for axis in 0..3 {
        let min = centroid_bb.min()[axis];
        let max = centroid_bb.max()[axis];

        if max <= min {
            continue;
        }

        let mut bins = [Bin::default(); MESH_BVH_BINS];
        let scale = (MESH_BVH_BINS as f32) / (max - min);

        for face in faces {
            let bin_idx = ((face.centroid()[axis] - min) * scale) as usize;
            let bin_idx = bin_idx.min(MESH_BVH_BINS - 1);

            bins[bin_idx].count += 1;
            bins[bin_idx].bounds += face.bounds();
        }

        // ---

        let mut left_areas = [0.0; MESH_BVH_BINS - 1];
        let mut right_areas = [0.0; MESH_BVH_BINS - 1];
        let mut left_counts = [0; MESH_BVH_BINS - 1];
        let mut right_counts = [0; MESH_BVH_BINS - 1];
        let mut left_bb = Bounds::default();
        let mut right_bb = Bounds::default();
        let mut left_count = 0;
        let mut right_count = 0;

        for i in 0..(MESH_BVH_BINS - 1) {
            let left_bin = bins[i];

            left_count += left_bin.count;
            left_counts[i] = left_count;
            left_bb += left_bin.bounds;
            left_areas[i] = left_bb.half_area();

            // ---

            let right_bin = bins[MESH_BVH_BINS - 1 - i];

            right_count += right_bin.count;
            right_counts[MESH_BVH_BINS - 2 - i] = right_count;
            right_bb += right_bin.bounds;
            right_areas[MESH_BVH_BINS - 2 - i] = right_bb.half_area();
        }

        // ---

        let bin_width = (max - min) / (MESH_BVH_BINS as f32);

        for i in 0..(MESH_BVH_BINS - 1) {
            if left_counts[i] == 0 || right_counts[i] == 0 {
                continue;
            }

            let cost = (left_counts[i] as f32) * left_areas[i]
                + (right_counts[i] as f32) * right_areas[i];

            if best.map_or(true, |best| cost < best.cost) {
                best = Some(SplittingPlane {
                    axis,
                    position: min + bin_width * ((i + 1) as f32),
                    cost,
                });
            }
        }
    }

    best
}

/// Moves faces whose centroids lie before the plane to the front of the
/// slice; returns the number of such faces.
fn partition(faces: &mut [MeshFace], plane: SplittingPlane) -> usize {
    let mut left = 0;
    let mut right = faces.len();

    while left < right {
        if faces[left].centroid()[plane.axis] < plane.position {
            left += 1;
        } else {
            right -= 1;
            faces.swap(left, right);
        }
    }

    left
}

#[derive(Clone, Copy, Debug, Default)]
struct Bin {
    bounds: Bounds,
    count: u32,
}

#[derive(Clone, Copy, Debug)]
struct SplittingPlane {
    axis: usize,
    position: f32,
    cost: f32,
}
