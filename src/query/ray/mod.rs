//! Ray-casting related definitions and implementations.

pub use self::ray::{Ray, RayCast, RayIntersection};
pub use self::ray_mesh::{CompositeRayHitHandler, RayBatchHitHandler};
pub use self::ray_triangle::local_ray_intersection_with_triangle;
pub use self::simd_ray::SimdRay;

mod ray;
mod ray_capsule;
mod ray_mesh;
mod ray_triangle;
mod simd_ray;
