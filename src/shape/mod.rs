//! Shapes supported by the collision-geometry core.

pub use self::capsule::{AngularExpansion, Capsule};
pub use self::capsule_wide::CapsuleWide;
pub use self::mesh::{Mesh, MeshOverlaps, OverlapBucket, OverlapCollection};
pub use self::triangle::{Triangle, TriangleWide};

mod capsule;
mod capsule_wide;
mod mesh;
mod triangle;
