use crate::math::{Isometry, SimdBool, SimdReal, Vector};
use crate::query::SimdRay;
use crate::shape::Capsule;
use na::{SimdComplexField, SimdPartialOrd, SimdRealField};
use simba::simd::SimdValue;

/// A capsule with its fields replicated across SIMD lanes.
///
/// Each lane may hold a different capsule; the ray test below resolves all
/// branches of the scalar algorithm as per-lane selects.
#[derive(Copy, Clone, Debug)]
pub struct CapsuleWide {
    /// Per-lane capsule radii.
    pub radius: SimdReal,
    /// Per-lane axis half-lengths.
    pub half_length: SimdReal,
}

impl CapsuleWide {
    /// Batching rays against fewer than this many lanes is not worth the
    /// transposition overhead.
    pub const MINIMUM_WIDE_RAY_COUNT: usize = 2;

    /// Creates a wide capsule with all its lanes filled with the same shape.
    pub fn splat(shape: &Capsule) -> Self {
        Self {
            radius: SimdReal::splat(shape.radius),
            half_length: SimdReal::splat(shape.half_length),
        }
    }

    /// Writes `shape` into the lane `lane` of this wide capsule.
    pub fn replace(&mut self, lane: usize, shape: &Capsule) {
        self.radius.replace(lane, shape.radius);
        self.half_length.replace(lane, shape.half_length);
    }

    /// Extracts the capsule stored in the lane `lane`.
    pub fn extract(&self, lane: usize) -> Capsule {
        Capsule::new(self.radius.extract(lane), self.half_length.extract(lane))
    }

    /// Lane-parallel ray test against capsules posed at `pose`.
    ///
    /// Returns, per lane, whether the ray hit, the time of impact in units of
    /// the ray direction's length, and the world-space normal. Lanes of the
    /// two non-hit outputs are unspecified where the hit mask is unset.
    pub fn ray_test(
        &self,
        pose: &Isometry<SimdReal>,
        ray: &SimdRay,
    ) -> (SimdBool, SimdReal, Vector<SimdReal>) {
        let zero = SimdReal::splat(0.0);
        let degeneracy_epsilon = SimdReal::splat(1.0e-8);

        let local_origin = pose
            .rotation
            .inverse_transform_vector(&(ray.origin.coords - pose.translation.vector));
        let local_dir = pose.rotation.inverse_transform_vector(&ray.dir);

        let d_length = local_dir.norm();
        let inverse_d_length = SimdReal::splat(1.0) / d_length;
        let d = local_dir * inverse_d_length;

        // Advance the origin to the earliest time a hit is possible, keeping
        // the intersection math near the origin for precision.
        let t_offset = (-local_origin.dot(&d) - (self.half_length + self.radius)).simd_max(zero);
        let o = local_origin + d * t_offset;

        // Infinite cylinder around the local Y axis.
        let a = d.x * d.x + d.z * d.z;
        let b = o.x * d.x + o.z * d.z;
        let radius_squared = self.radius * self.radius;
        let c = o.x * o.x + o.z * o.z - radius_squared;

        // A ray radially outside the cylinder and pointing away can hit
        // neither the cylinder nor the end caps.
        let inside_or_toward = b.simd_le(zero) | c.simd_le(zero);
        let not_parallel = a.simd_gt(degeneracy_epsilon);

        let discriminant = b * b - a * c;
        let cylinder_intersected =
            not_parallel & inside_or_toward & discriminant.simd_ge(zero);
        let cylinder_t = ((-b - discriminant.simd_max(zero).simd_sqrt())
            / a.simd_max(degeneracy_epsilon))
        .simd_max(-t_offset);
        let cylinder_hit_y = o.y + d.y * cylinder_t;
        let use_cylinder = not_parallel & cylinder_hit_y.simd_abs().simd_le(self.half_length);

        // End cap sphere. Near-parallel lanes head for the cap the ray points
        // toward; the others take the cap on the cylinder hit's side.
        let fallback_y = (-self.half_length).select(d.y.simd_gt(zero), self.half_length);
        let sphere_y = self
            .half_length
            .simd_copysign(cylinder_hit_y)
            .select(not_parallel, fallback_y);

        let os = Vector::new(o.x, o.y - sphere_y, o.z);
        let cap_b = os.dot(&d);
        let cap_c = os.dot(&os) - radius_squared;
        let cap_inside_or_toward = cap_b.simd_le(zero) | cap_c.simd_le(zero);
        let cap_discriminant = cap_b * cap_b - cap_c;
        let cap_intersected = cap_inside_or_toward & cap_discriminant.simd_ge(zero);
        let cap_t = (-cap_b - cap_discriminant.simd_max(zero).simd_sqrt()).simd_max(-t_offset);

        let intersected =
            (use_cylinder & cylinder_intersected) | (!use_cylinder & cap_intersected);
        let local_t = cylinder_t.select(use_cylinder, cap_t);
        let t = (local_t + t_offset) * inverse_d_length;

        let inverse_radius = SimdReal::splat(1.0) / self.radius;
        let cylinder_normal = Vector::new(
            (o.x + d.x * cylinder_t) * inverse_radius,
            zero,
            (o.z + d.z * cylinder_t) * inverse_radius,
        );
        let cap_normal = (os + d * cap_t) * inverse_radius;
        let local_normal =
            cylinder_normal.zip_map(&cap_normal, |cyl, cap| cyl.select(use_cylinder, cap));
        let normal = pose.rotation * local_normal;

        (intersected, t, normal)
    }
}
