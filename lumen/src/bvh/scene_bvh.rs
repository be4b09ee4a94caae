use lumen_gpu::PackedSceneNode;

use crate::utils::Bounds;

/// Builds the scene BVH over objects with given (world-space) bounds, using
/// agglomerative clustering: repeatedly finds two clusters that are each
/// other's best match (the one whose union with it has the smallest area)
/// and merges them.
///
/// The returned array contains exactly one leaf per object plus one internal
/// node per merge, with the root at index 0. Caller must make sure that the
/// result fits within [`PackedSceneNode::MAX_NODES`].
pub fn build_scene_nodes(objects: &[Bounds]) -> Vec<PackedSceneNode> {
    let mut nodes: Vec<_> = objects
        .iter()
        .enumerate()
        .map(|(object_index, bounds)| {
            PackedSceneNode::leaf(
                bounds.min(),
                bounds.max(),
                object_index as u32,
            )
        })
        .collect();

    if nodes.len() <= 1 {
        return nodes;
    }

    // Node indices of clusters that haven't been merged yet
    let mut clusters: Vec<u32> = (0..nodes.len() as u32).collect();
    let mut index_a = 0;
    let mut index_b = find_best_match(&nodes, &clusters, index_a);

    while clusters.len() > 1 {
        let index_c = find_best_match(&nodes, &clusters, index_b);

        if index_c != index_a {
            index_a = index_b;
            index_b = index_c;
            continue;
        }

        let node_a = clusters[index_a];
        let node_b = clusters[index_b];
        let bounds = node_bounds(&nodes, node_a) + node_bounds(&nodes, node_b);

        nodes.push(PackedSceneNode::internal(
            bounds.min(),
            bounds.max(),
            node_a,
            node_b,
        ));

        let last_index = clusters.len() - 1;

        clusters[index_a] = (nodes.len() - 1) as u32;
        clusters.swap_remove(index_b);

        // swap_remove() moves the last cluster into `index_b`; if that was
        // our freshly merged one, follow it
        if index_a == last_index {
            index_a = index_b;
        }

        if clusters.len() > 1 {
            index_b = find_best_match(&nodes, &clusters, index_a);
        }
    }

    // The root is the last node created; it has to live at index 0, though
    let root_index = clusters[0];
    let moved_index = (nodes.len() - 1) as u32;

    debug_assert_eq!(root_index, moved_index);

    nodes.swap(0, root_index as usize);

    for node in &mut nodes {
        node.relink(0, moved_index);
    }

    nodes
}

/// Returns position (within `clusters`) of the cluster which, merged with
/// `clusters[index]`, yields the smallest bounding box.
///
/// Ties go to the cluster that comes last.
fn find_best_match(
    nodes: &[PackedSceneNode],
    clusters: &[u32],
    index: usize,
) -> usize {
    let bounds = node_bounds(nodes, clusters[index]);
    let mut best_index = if index == 0 { 1 } else { 0 };
    let mut best_cost = f32::INFINITY;

    for (other_index, &other_node) in clusters.iter().enumerate() {
        if other_index == index {
            continue;
        }

        let cost = (bounds + node_bounds(nodes, other_node)).half_area();

        if cost <= best_cost {
            best_index = other_index;
            best_cost = cost;
        }
    }

    best_index
}

fn node_bounds(nodes: &[PackedSceneNode], node_index: u32) -> Bounds {
    let node = &nodes[node_index as usize];

    Bounds::new(node.minimum, node.maximum)
}
