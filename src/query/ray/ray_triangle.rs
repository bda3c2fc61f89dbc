use crate::math::{Point, Real};
use crate::query::{Ray, RayCast, RayIntersection};
use crate::shape::Triangle;
use num::Zero;

impl RayCast for Triangle {
    #[inline]
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
    ) -> Option<RayIntersection> {
        let inter = local_ray_intersection_with_triangle(&self.a, &self.b, &self.c, ray)?;

        if inter.time_of_impact <= max_time_of_impact {
            Some(inter)
        } else {
            None
        }
    }
}

/// Computes the intersection between a triangle and a ray.
///
/// The reported normal is the triangle's geometric normal, with its sign
/// chosen so that it faces the half-space containing the ray origin
/// (handedness of the triangle's winding is irrelevant).
pub fn local_ray_intersection_with_triangle(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    ray: &Ray,
) -> Option<RayIntersection> {
    let ab = *b - *a;
    let ac = *c - *a;

    // normal
    let n = ab.cross(&ac);
    let d = n.dot(&ray.dir);

    // the normal and the ray direction are parallel
    if d.is_zero() {
        return None;
    }

    let ap = ray.origin - *a;
    let t = ap.dot(&n);

    // the ray does not intersect the halfspace defined by the triangle
    if (t < 0.0 && d < 0.0) || (t > 0.0 && d > 0.0) {
        return None;
    }

    let d = d.abs();

    //
    // intersection: compute barycentric coordinates
    //
    let e = -ray.dir.cross(&ap);

    let toi;
    let normal;

    if t < 0.0 {
        let v = -ac.dot(&e);

        if v < 0.0 || v > d {
            return None;
        }

        let w = ab.dot(&e);

        if w < 0.0 || v + w > d {
            return None;
        }

        toi = -t / d;
        normal = -n.normalize();
    } else {
        let v = ac.dot(&e);

        if v < 0.0 || v > d {
            return None;
        }

        let w = -ab.dot(&e);

        if w < 0.0 || v + w > d {
            return None;
        }

        toi = t / d;
        normal = n.normalize();
    }

    Some(RayIntersection::new(toi, normal))
}
