use crate::math::Real;

/// Computes `1.0 / val`, returning zero if `val` is zero.
#[inline]
pub fn inv(val: Real) -> Real {
    if val == 0.0 {
        0.0
    } else {
        1.0 / val
    }
}
