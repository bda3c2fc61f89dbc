//! Various unsorted geometrical and logical operators.

pub use self::inv::inv;
pub use self::wops::{simd_swap, WBasis, WSign};

mod inv;
mod wops;
