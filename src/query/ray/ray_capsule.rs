use crate::math::{Real, Vector};
use crate::query::{Ray, RayCast, RayIntersection};
use crate::shape::Capsule;

/// Below this value of the quadratic coefficient `a = dx² + dz²`, the ray is
/// treated as parallel to the capsule axis and skips straight to the end-cap
/// test.
const AXIS_PARALLEL_EPSILON: Real = 1.0e-8;

impl RayCast for Capsule {
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
    ) -> Option<RayIntersection> {
        // Work with a normalized direction; `inverse_d_length` rescales the
        // reported time of impact back into units of the caller's direction.
        let d_length = ray.dir.norm();
        let inverse_d_length = 1.0 / d_length;
        let d = ray.dir * inverse_d_length;

        // Advance the origin to the earliest time a hit is possible, keeping
        // the intersection math near the origin for precision.
        let t_offset = (-ray.origin.coords.dot(&d) - (self.half_length + self.radius)).max(0.0);
        let o = ray.origin.coords + d * t_offset;

        // Infinite cylinder around the local Y axis:
        // solve a * t^2 + 2 * b * t + c = 0.
        let a = d.x * d.x + d.z * d.z;
        let b = o.x * d.x + o.z * d.z;
        let radius_squared = self.radius * self.radius;
        let c = o.x * o.x + o.z * o.z - radius_squared;

        if b > 0.0 && c > 0.0 {
            // The ray starts radially outside the cylinder and points away:
            // it can hit neither the cylinder nor the end caps.
            return None;
        }

        let sphere_y = if a > AXIS_PARALLEL_EPSILON {
            let discriminant = b * b - a * c;
            if discriminant < 0.0 {
                return None;
            }

            let t = ((-b - discriminant.sqrt()) / a).max(-t_offset);
            let hit_y = o.y + d.y * t;
            if hit_y.abs() <= self.half_length {
                let time_of_impact = (t + t_offset) * inverse_d_length;
                if time_of_impact > max_time_of_impact {
                    return None;
                }
                let normal = Vector::new(o.x + d.x * t, 0.0, o.z + d.z * t) / self.radius;
                return Some(RayIntersection::new(time_of_impact, normal));
            }

            // The cylindrical hit lies beyond the Y band; test the cap on the
            // side the hit fell on.
            self.half_length.copysign(hit_y)
        } else {
            // Axis-parallel ray: aim for the cap the ray travels toward.
            if d.y > 0.0 {
                -self.half_length
            } else {
                self.half_length
            }
        };

        // End cap sphere centered at (0, sphere_y, 0).
        let os = Vector::new(o.x, o.y - sphere_y, o.z);
        let cap_b = os.dot(&d);
        let cap_c = os.dot(&os) - radius_squared;

        if cap_b > 0.0 && cap_c > 0.0 {
            return None;
        }

        let cap_discriminant = cap_b * cap_b - cap_c;
        if cap_discriminant < 0.0 {
            return None;
        }

        let t = (-cap_b - cap_discriminant.sqrt()).max(-t_offset);
        let time_of_impact = (t + t_offset) * inverse_d_length;
        if time_of_impact > max_time_of_impact {
            return None;
        }

        let normal = (os + d * t) / self.radius;
        Some(RayIntersection::new(time_of_impact, normal))
    }
}
