use super::tree::{TreeNode, TreeNodePair};
use super::Tree;
use crate::bounding_volume::Aabb;
use crate::math::Real;

impl Tree {
    /// Builds a tree over the given leaf bounds using a full-sweep
    /// surface-area-heuristic strategy.
    ///
    /// The leaf with index `i` in queries corresponds to `leaf_bounds[i]`.
    /// This is a one-time build: the tree cannot be refit or mutated
    /// afterwards, which is the intended usage for static geometry.
    pub fn sweep_build(leaf_bounds: &[Aabb]) -> Self {
        let mut tree = Tree { nodes: Vec::new() };

        match leaf_bounds.len() {
            0 => {}
            1 => {
                // Partial root: a single leaf lives in the left slot.
                tree.nodes.push(TreeNodePair {
                    left: TreeNode::leaf(0, &leaf_bounds[0]),
                    right: TreeNode::zeros(),
                });
            }
            _ => {
                let mut leaves: Vec<TreeNode> = leaf_bounds
                    .iter()
                    .enumerate()
                    .map(|(i, aabb)| TreeNode::leaf(i as u32, aabb))
                    .collect();
                tree.nodes.push(TreeNodePair::zeros());
                tree.build_range(0, &mut leaves);
            }
        }

        tree
    }

    fn build_range(&mut self, target_node_id: u32, leaves: &mut [TreeNode]) {
        debug_assert!(leaves.len() > 1);

        // Split along the axis where the leaf centroids spread the most.
        let centroid_aabb = Aabb::from_points(leaves.iter().map(|leaf| leaf.center()));
        let axis = centroid_aabb.extents().imax();

        leaves.sort_unstable_by(|a, b| a.center()[axis].total_cmp(&b.center()[axis]));

        // Sweep the sorted leaves once from the right to accumulate the cost
        // of every possible right part, then once from the left to find the
        // splitting plane minimizing the total cost.
        let mut right_costs = vec![0.0 as Real; leaves.len()];
        let mut right_acc = Aabb::new_invalid();
        for i in (1..leaves.len()).rev() {
            right_acc.merge(&leaves[i].aabb());
            right_costs[i] = right_acc.half_area() * (leaves.len() - i) as Real;
        }

        let mut best_cost = Real::MAX;
        let mut best_mid = leaves.len() / 2;
        let mut left_acc = Aabb::new_invalid();
        for i in 1..leaves.len() {
            left_acc.merge(&leaves[i - 1].aabb());
            let cost = left_acc.half_area() * i as Real + right_costs[i];
            if cost < best_cost {
                best_cost = cost;
                best_mid = i;
            }
        }

        let (left_leaves, right_leaves) = leaves.split_at_mut(best_mid);

        if left_leaves.len() == 1 {
            self.nodes[target_node_id as usize].left = left_leaves[0];
        } else {
            let left_id = self.nodes.len() as u32;
            self.nodes.push(TreeNodePair::zeros());
            self.build_range(left_id, left_leaves);
            self.nodes[target_node_id as usize].left = self.nodes[left_id as usize].merged(left_id);
        }

        if right_leaves.len() == 1 {
            self.nodes[target_node_id as usize].right = right_leaves[0];
        } else {
            let right_id = self.nodes.len() as u32;
            self.nodes.push(TreeNodePair::zeros());
            self.build_range(right_id, right_leaves);
            self.nodes[target_node_id as usize].right =
                self.nodes[right_id as usize].merged(right_id);
        }
    }
}
