use super::tree::TreeNode;
use super::Tree;
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::query::Ray;
use smallvec::SmallVec;

const TRAVERSAL_STACK_SIZE: usize = 32;

/// The tester a [`Tree`] invokes on every candidate leaf of a ray traversal.
///
/// Shrinking `max_t` prunes every node the ray can only enter past the new
/// value.
pub trait RayLeafTester {
    /// Tests the leaf `leaf_index` against the traversed ray.
    fn test_leaf(&mut self, leaf_index: u32, ray: &Ray, max_t: &mut Real);
}

/// The tester a [`Tree`] invokes on every candidate leaf of a swept-volume
/// traversal.
pub trait SweepLeafTester {
    /// Tests the leaf `leaf_index` against the swept volume.
    fn test_leaf(&mut self, leaf_index: u32, max_t: &mut Real);
}

/// The visitor a [`Tree`] invokes on every leaf intersecting a query volume.
pub trait LeafVisitor {
    /// Visits one intersected leaf. Returning `false` stops the traversal.
    fn visit_leaf(&mut self, leaf_index: u32) -> bool;
}

impl<F: FnMut(u32) -> bool> LeafVisitor for F {
    #[inline(always)]
    fn visit_leaf(&mut self, leaf_index: u32) -> bool {
        self(leaf_index)
    }
}

/// Componentwise ray direction inverse, guarded so that near-zero components
/// yield a large finite value instead of an infinity (which would produce
/// NaNs in the slab test when the origin sits exactly on a node boundary).
fn guarded_inverse(dir: &Vector<Real>) -> Vector<Real> {
    dir.map(|x| {
        if x.abs() < Real::EPSILON {
            x.signum() / Real::EPSILON
        } else {
            1.0 / x
        }
    })
}

/// Slab test of a ray against an AABB dilated by `dilation`, limited to the
/// parameter range `[0, max_t]`.
#[inline(always)]
fn node_hit_by_ray(
    node: &TreeNode,
    origin: &Point<Real>,
    inv_dir: &Vector<Real>,
    dilation: &Vector<Real>,
    max_t: Real,
) -> bool {
    let t0 = (node.mins - dilation - origin).component_mul(inv_dir);
    let t1 = (node.maxs + dilation - origin).component_mul(inv_dir);
    let entry = t0.inf(&t1).max().max(0.0);
    let exit = t0.sup(&t1).min().min(max_t);
    entry <= exit
}

impl Tree {
    #[inline(always)]
    fn traversal_stack() -> SmallVec<[u32; TRAVERSAL_STACK_SIZE]> {
        Default::default()
    }

    /// Casts a ray on this tree, invoking `tester` on every leaf whose
    /// bounding volume the ray enters before `max_t`.
    ///
    /// The tester may shrink `max_t` to prune the rest of the traversal.
    pub fn ray_cast<T: RayLeafTester>(&self, ray: &Ray, max_t: &mut Real, tester: &mut T) {
        let inv_dir = guarded_inverse(&ray.dir);
        let no_dilation = Vector::zeros();

        self.traverse_leaves(
            |node, max_t| node_hit_by_ray(node, &ray.origin, &inv_dir, &no_dilation, max_t),
            |leaf, max_t| tester.test_leaf(leaf, ray, max_t),
            max_t,
        );
    }

    /// Traverses this tree with the box `[min, max]` swept along `dir`,
    /// invoking `tester` on every leaf the box may touch before `max_t`.
    pub fn sweep<T: SweepLeafTester>(
        &self,
        min: &Point<Real>,
        max: &Point<Real>,
        dir: &Vector<Real>,
        max_t: &mut Real,
        tester: &mut T,
    ) {
        let origin = na::center(min, max);
        let half_extents = (max - min) * 0.5;
        let inv_dir = guarded_inverse(dir);

        self.traverse_leaves(
            |node, max_t| node_hit_by_ray(node, &origin, &inv_dir, &half_extents, max_t),
            |leaf, max_t| tester.test_leaf(leaf, max_t),
            max_t,
        );
    }

    /// Invokes `visitor` on every leaf whose bounding volume intersects
    /// `aabb`.
    ///
    /// Returns `false` if the visitor stopped the traversal early.
    pub fn get_overlaps<V: LeafVisitor>(&self, aabb: &Aabb, visitor: &mut V) -> bool {
        let mut unlimited = Real::MAX;
        let stopped = core::cell::Cell::new(false);

        self.traverse_leaves(
            |node, _| !stopped.get() && node.aabb().intersects(aabb),
            |leaf, _| {
                if !visitor.visit_leaf(leaf) {
                    stopped.set(true);
                }
            },
            &mut unlimited,
        );

        !stopped.get()
    }

    /// Shared depth-first descent. `check` decides whether a node may contain
    /// relevant leaves given the current `max_t`; `process` handles a
    /// candidate leaf and may shrink `max_t`. A `max_t` lowered below zero
    /// prunes everything.
    fn traverse_leaves(
        &self,
        check: impl Fn(&TreeNode, Real) -> bool,
        mut process: impl FnMut(u32, &mut Real),
        max_t: &mut Real,
    ) {
        if self.nodes.is_empty() {
            return;
        }

        if self.nodes[0].right.leaf_count() == 0 {
            // Partial root: the single leaf lives in the left slot.
            let left = &self.nodes[0].left;
            if check(left, *max_t) {
                process(left.children, max_t);
            }
            return;
        }

        let mut stack = Self::traversal_stack();
        let mut curr_id = 0u32;

        loop {
            let node = &self.nodes[curr_id as usize];
            let left = &node.left;
            let right = &node.right;

            let mut go_left = false;
            if check(left, *max_t) {
                if left.is_leaf() {
                    process(left.children, max_t);
                } else {
                    go_left = true;
                }
            }

            let mut go_right = false;
            if check(right, *max_t) {
                if right.is_leaf() {
                    process(right.children, max_t);
                } else {
                    go_right = true;
                }
            }

            match (go_left, go_right) {
                (true, true) => {
                    curr_id = left.children;
                    stack.push(right.children);
                }
                (true, false) => curr_id = left.children,
                (false, true) => curr_id = right.children,
                (false, false) => {
                    let Some(next) = stack.pop() else {
                        return;
                    };
                    curr_id = next;
                }
            }
        }
    }
}
