use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};

/// A node (internal or leaf) of a [`Tree`].
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct TreeNode {
    /// Mins coordinates of the node's bounding volume.
    pub(super) mins: Point<Real>,
    /// Child of this node: the index of a [`TreeNodePair`] for an internal
    /// node, or the leaf index for a leaf.
    pub(super) children: u32,
    /// Maxs coordinates of the node's bounding volume.
    pub(super) maxs: Point<Real>,
    /// The number of leaves below this node. A node with a leaf count of 1 is
    /// itself a leaf; a zero leaf count marks the unused right slot of a
    /// partial root.
    pub(super) leaf_count: u32,
}

impl TreeNode {
    #[inline(always)]
    pub(super) fn zeros() -> Self {
        Self {
            mins: Point::origin(),
            children: 0,
            maxs: Point::origin(),
            leaf_count: 0,
        }
    }

    #[inline(always)]
    pub(super) fn leaf(leaf_index: u32, aabb: &Aabb) -> Self {
        Self {
            mins: aabb.mins,
            children: leaf_index,
            maxs: aabb.maxs,
            leaf_count: 1,
        }
    }

    /// Is this node a leaf?
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        self.leaf_count == 1
    }

    /// The number of leaves below this node.
    #[inline(always)]
    pub fn leaf_count(&self) -> u32 {
        self.leaf_count
    }

    /// The bounding volume of this node.
    #[inline(always)]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.mins, self.maxs)
    }

    #[inline(always)]
    pub(super) fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// Merges this node with `other` to form their parent, with `children`
    /// pointing to the node pair containing both.
    pub(super) fn merged(&self, other: &TreeNode, children: u32) -> TreeNode {
        let aabb = self.aabb().merged(&other.aabb());
        TreeNode {
            mins: aabb.mins,
            children,
            maxs: aabb.maxs,
            leaf_count: self.leaf_count + other.leaf_count,
        }
    }
}

/// A pair of sibling tree nodes.
///
/// Both `left` and `right` are valid except in the single-leaf case, where
/// only `left` is valid and `right` has a zero leaf count.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub(super) struct TreeNodePair {
    pub(super) left: TreeNode,
    pub(super) right: TreeNode,
}

impl TreeNodePair {
    #[inline(always)]
    pub(super) fn zeros() -> Self {
        Self {
            left: TreeNode::zeros(),
            right: TreeNode::zeros(),
        }
    }

    /// Merges both nodes contained by `self` to form its parent.
    pub(super) fn merged(&self, my_id: u32) -> TreeNode {
        self.left.merged(&self.right, my_id)
    }
}

/// A static binary bounding-volume tree over a set of leaf bounds.
///
/// Leaves are identified by their index in the bounds slice the tree was
/// built from. The tree is built once (see [`Tree::sweep_build`]) and only
/// queried afterwards; it never invokes leaf geometry itself, delegating
/// every candidate leaf to a caller-supplied tester.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Tree {
    pub(super) nodes: Vec<TreeNodePair>,
}

impl Tree {
    /// The number of leaves of this tree.
    pub fn leaf_count(&self) -> u32 {
        self.nodes
            .first()
            .map(|root| root.left.leaf_count + root.right.leaf_count)
            .unwrap_or(0)
    }

    /// Does this tree contain no leaf at all?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The bounding volume of the whole tree, if it is not empty.
    pub fn root_aabb(&self) -> Option<Aabb> {
        let root = self.nodes.first()?;
        if root.right.leaf_count == 0 {
            Some(root.left.aabb())
        } else {
            Some(root.left.aabb().merged(&root.right.aabb()))
        }
    }
}
