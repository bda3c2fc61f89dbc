//! Miscellaneous utilities.

use crate::math::Real;
use crate::simd::{SimdBool, SimdReal};
use na::{SimdRealField, Vector3};
use simba::simd::SimdValue;

/// Conditionally swaps each lanes of `a` with those of `b`.
///
/// For each `i in [0..SIMD_WIDTH[`, if `do_swap.extract(i)` is `true` then
/// `a.extract(i)` is swapped with `b.extract(i)`.
pub fn simd_swap(do_swap: SimdBool, a: &mut SimdReal, b: &mut SimdReal) {
    let _a = *a;
    *a = b.select(do_swap, *a);
    *b = _a.select(do_swap, *b);
}

/// Trait to copy the sign of each component of one scalar/vector/matrix to another.
pub trait WSign<Rhs>: Sized {
    /// Copy the sign of each component of `self` to the corresponding component of `to`.
    fn copy_sign_to(self, to: Rhs) -> Rhs;
}

impl WSign<Real> for Real {
    fn copy_sign_to(self, to: Self) -> Self {
        to.copysign(self)
    }
}

impl<N: na::Scalar + Copy + WSign<N>> WSign<Vector3<N>> for N {
    fn copy_sign_to(self, to: Vector3<N>) -> Vector3<N> {
        Vector3::new(
            self.copy_sign_to(to.x),
            self.copy_sign_to(to.y),
            self.copy_sign_to(to.z),
        )
    }
}

impl WSign<SimdReal> for SimdReal {
    fn copy_sign_to(self, to: SimdReal) -> SimdReal {
        to.simd_copysign(self)
    }
}

/// Trait to compute an orthonormal basis completing a unit vector.
pub trait WBasis: Sized {
    /// The type of the array of orthonormal vectors.
    type Basis;
    /// Computes the vectors which, when combined with `self`, form an orthonormal basis.
    ///
    /// For a unit `self`, the returned `[t1, t2]` are unit-length, mutually
    /// orthogonal, and `(t1, self, t2)` is right-handed.
    fn orthonormal_basis(self) -> Self::Basis;
    /// Computes a single unit vector perpendicular to `self`.
    fn find_perpendicular(self) -> Self;
}

impl<N: SimdRealField + Copy + WSign<N>> WBasis for Vector3<N> {
    type Basis = [Vector3<N>; 2];

    // Branchless construction adapted from Pixar's "Building an Orthonormal
    // Basis, Revisited". The only residual discontinuity is at z == 0.
    fn orthonormal_basis(self) -> [Vector3<N>; 2] {
        let sign = self.z.copy_sign_to(N::one());
        let scale = -N::one() / (sign + self.z);
        let t1 = Vector3::new(
            self.x * self.y * scale,
            sign + self.y * self.y * scale,
            -self.y,
        );
        let t2 = Vector3::new(
            N::one() + sign * self.x * self.x * scale,
            sign * t1.x,
            -sign * self.x,
        );
        [t1, t2]
    }

    fn find_perpendicular(self) -> Vector3<N> {
        let sign = self.z.copy_sign_to(N::one());
        let scale = -N::one() / (sign + self.z);
        Vector3::new(
            self.x * self.y * scale,
            sign + self.y * self.y * scale,
            -self.y,
        )
    }
}
