//! Traits and structures needed to cast rays.

use crate::math::{Isometry, Point, Real, Vector};

/// A ray for ray-casting queries.
///
/// A ray is a half-line starting at `origin` and extending along `dir`. The
/// direction does **not** need to be normalized: a reported time-of-impact `t`
/// is expressed in units of `dir`'s length, so the hit point is always
/// `origin + dir * t`.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction of the ray.
    pub dir: Vector<Real>,
}

impl Ray {
    /// Creates a new ray starting from `origin` and with the direction `dir`.
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray { origin, dir }
    }

    /// Transforms this ray by the given isometry.
    #[inline]
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        Self::new(m * self.origin, m * self.dir)
    }

    /// Transforms this ray by the inverse of the given isometry.
    ///
    /// This is equivalent to moving the ray to the local space of an object
    /// posed at `m`.
    #[inline]
    pub fn inverse_transform_by(&self, m: &Isometry<Real>) -> Self {
        Self::new(
            m.inverse_transform_point(&self.origin),
            m.inverse_transform_vector(&self.dir),
        )
    }

    /// Computes the point at the parameter `t` along this ray.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.origin + self.dir * t
    }
}

/// The result of a successful ray cast.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RayIntersection {
    /// The time of impact of the ray with the shape.
    ///
    /// The exact hit point is `ray.point_at(time_of_impact)`. If the ray
    /// direction is normalized, this is the distance traveled.
    pub time_of_impact: Real,

    /// The surface normal at the intersection point, in the same frame as the
    /// tested ray.
    pub normal: Vector<Real>,
}

impl RayIntersection {
    /// Creates a new `RayIntersection`.
    #[inline]
    pub fn new(time_of_impact: Real, normal: Vector<Real>) -> RayIntersection {
        RayIntersection {
            time_of_impact,
            normal,
        }
    }

    /// Rotates the normal of this intersection into the frame of `transform`.
    #[inline]
    pub fn transform_by(&self, transform: &Isometry<Real>) -> Self {
        RayIntersection {
            time_of_impact: self.time_of_impact,
            normal: transform * self.normal,
        }
    }
}

/// Traits of objects which can be tested for intersection with a ray.
///
/// Shapes starting a cast with the ray origin already inside of them report a
/// hit at `t = 0`.
pub trait RayCast {
    /// Computes the time of impact, and normal between this shape and a ray
    /// expressed in the shape's local frame.
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
    ) -> Option<RayIntersection>;

    /// Computes the time of impact between this shape and a ray expressed in
    /// the shape's local frame.
    fn cast_local_ray(&self, ray: &Ray, max_time_of_impact: Real) -> Option<Real> {
        self.cast_local_ray_and_get_normal(ray, max_time_of_impact)
            .map(|inter| inter.time_of_impact)
    }

    /// Tests whether a local-space ray intersects this shape.
    #[inline]
    fn intersects_local_ray(&self, ray: &Ray, max_time_of_impact: Real) -> bool {
        self.cast_local_ray(ray, max_time_of_impact).is_some()
    }

    /// Computes the time of impact between this shape posed at `m` and a
    /// world-space ray.
    fn cast_ray(&self, m: &Isometry<Real>, ray: &Ray, max_time_of_impact: Real) -> Option<Real> {
        let ls_ray = ray.inverse_transform_by(m);
        self.cast_local_ray(&ls_ray, max_time_of_impact)
    }

    /// Computes the time of impact and the world-space normal between this
    /// shape posed at `m` and a world-space ray.
    fn cast_ray_and_get_normal(
        &self,
        m: &Isometry<Real>,
        ray: &Ray,
        max_time_of_impact: Real,
    ) -> Option<RayIntersection> {
        let ls_ray = ray.inverse_transform_by(m);
        self.cast_local_ray_and_get_normal(&ls_ray, max_time_of_impact)
            .map(|inter| inter.transform_by(m))
    }

    /// Tests whether a world-space ray intersects this shape posed at `m`.
    #[inline]
    fn intersects_ray(&self, m: &Isometry<Real>, ray: &Ray, max_time_of_impact: Real) -> bool {
        let ls_ray = ray.inverse_transform_by(m);
        self.intersects_local_ray(&ls_ray, max_time_of_impact)
    }
}
