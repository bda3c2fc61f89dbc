//! Geometric queries: ray casting against shapes.

pub use self::ray::{
    CompositeRayHitHandler, Ray, RayBatchHitHandler, RayCast, RayIntersection, SimdRay,
};

pub mod ray;
