use crate::math::{Point, SimdReal, Vector};
use crate::query::Ray;
use simba::simd::SimdValue;

/// A structure representing 4 rays in an SIMD SoA fashion.
#[derive(Debug, Copy, Clone)]
pub struct SimdRay {
    /// The origin of the rays represented as a single SIMD point.
    pub origin: Point<SimdReal>,
    /// The direction of the rays represented as a single SIMD vector.
    pub dir: Vector<SimdReal>,
}

impl SimdRay {
    /// Creates a new SIMD ray with all its lanes filled with the same ray.
    pub fn splat(ray: Ray) -> Self {
        Self {
            origin: Point::splat(ray.origin),
            dir: Vector::splat(ray.dir),
        }
    }

    /// Writes `ray` into the lane `i` of this SIMD ray.
    pub fn replace(&mut self, i: usize, ray: Ray) {
        self.origin.replace(i, ray.origin);
        self.dir.replace(i, ray.dir);
    }

    /// Extracts the ray stored in the lane `i` of this SIMD ray.
    pub fn extract(&self, i: usize) -> Ray {
        Ray::new(self.origin.extract(i), self.dir.extract(i))
    }
}
