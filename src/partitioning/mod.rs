//! Spatial partitioning tools.

pub use self::tree::{Tree, TreeNode};
pub use self::tree_traverse::{LeafVisitor, RayLeafTester, SweepLeafTester};

mod tree;
mod tree_build;
mod tree_traverse;
