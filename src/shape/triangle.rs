use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, SimdReal, Vector};
use simba::simd::SimdValue;

/// A triangle shape.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Triangle {
    /// The triangle's first vertex.
    pub a: Point<Real>,
    /// The triangle's second vertex.
    pub b: Point<Real>,
    /// The triangle's third vertex.
    pub c: Point<Real>,
}

impl Triangle {
    /// Creates a triangle from three vertices.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The axis-aligned bounding box of this triangle.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points([self.a, self.b, self.c])
    }

    /// This triangle with all vertices multiplied component-wise by `scale`.
    #[inline]
    pub fn scaled(&self, scale: &Vector<Real>) -> Self {
        Self::new(
            self.a.coords.component_mul(scale).into(),
            self.b.coords.component_mul(scale).into(),
            self.c.coords.component_mul(scale).into(),
        )
    }
}

/// A triangle with all its vertices replicated across SIMD lanes.
#[derive(Copy, Clone, Debug)]
pub struct TriangleWide {
    /// First vertices, one per lane.
    pub a: Point<SimdReal>,
    /// Second vertices, one per lane.
    pub b: Point<SimdReal>,
    /// Third vertices, one per lane.
    pub c: Point<SimdReal>,
}

impl TriangleWide {
    /// Creates a wide triangle with all its lanes filled with the same triangle.
    pub fn splat(triangle: &Triangle) -> Self {
        Self {
            a: Point::splat(triangle.a),
            b: Point::splat(triangle.b),
            c: Point::splat(triangle.c),
        }
    }

    /// Writes `triangle` into the lane `lane` of this wide triangle.
    pub fn replace(&mut self, lane: usize, triangle: &Triangle) {
        self.a.replace(lane, triangle.a);
        self.b.replace(lane, triangle.b);
        self.c.replace(lane, triangle.c);
    }

    /// Extracts the triangle stored in the lane `lane`.
    pub fn extract(&self, lane: usize) -> Triangle {
        Triangle::new(
            self.a.extract(lane),
            self.b.extract(lane),
            self.c.extract(lane),
        )
    }
}
