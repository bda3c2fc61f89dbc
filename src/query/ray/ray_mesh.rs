use crate::math::{Isometry, Point, Real, Rotation, Vector};
use crate::partitioning::RayLeafTester;
use crate::query::ray::local_ray_intersection_with_triangle;
use crate::query::{Ray, RayCast, RayIntersection};
use crate::shape::{Mesh, Triangle};

/// Receiver of every hit found by a mesh all-hits ray cast.
pub trait CompositeRayHitHandler {
    /// Called once per triangle hit, with the triangle index, the hit time,
    /// and the world-space unit normal.
    ///
    /// Shrinking `max_t` prunes the rest of the traversal: later hits beyond
    /// the new value are not reported.
    fn on_ray_hit(&mut self, child_index: u32, max_t: &mut Real, t: Real, normal: Vector<Real>);
}

/// Receiver of the hits found by a batched mesh ray cast.
pub trait RayBatchHitHandler {
    /// Called at most once per ray, with the index of the ray in the batch.
    fn on_ray_hit(&mut self, ray_index: usize, t: Real, normal: Vector<Real>);
}

/// First-hit leaf tester: keeps the closest triangle hit and shrinks the
/// traversal bound as hits are found.
struct MeshFirstHitTester<'a> {
    triangles: &'a [Triangle],
    minimum_t: Real,
    normal: Vector<Real>,
}

impl RayLeafTester for MeshFirstHitTester<'_> {
    #[inline]
    fn test_leaf(&mut self, leaf_index: u32, ray: &Ray, max_t: &mut Real) {
        let triangle = &self.triangles[leaf_index as usize];
        if let Some(hit) =
            local_ray_intersection_with_triangle(&triangle.a, &triangle.b, &triangle.c, ray)
        {
            if hit.time_of_impact < self.minimum_t && hit.time_of_impact <= *max_t {
                self.minimum_t = hit.time_of_impact;
                self.normal = hit.normal;
                *max_t = hit.time_of_impact;
            }
        }
    }
}

/// All-hits leaf tester: maps every triangle hit to world space and forwards
/// it to the user handler.
struct MeshAllHitsTester<'a, H> {
    triangles: &'a [Triangle],
    inverse_scale: &'a Vector<Real>,
    orientation: &'a Rotation<Real>,
    handler: &'a mut H,
}

impl<H: CompositeRayHitHandler> RayLeafTester for MeshAllHitsTester<'_, H> {
    #[inline]
    fn test_leaf(&mut self, leaf_index: u32, ray: &Ray, max_t: &mut Real) {
        let triangle = &self.triangles[leaf_index as usize];
        if let Some(hit) =
            local_ray_intersection_with_triangle(&triangle.a, &triangle.b, &triangle.c, ray)
        {
            if hit.time_of_impact <= *max_t {
                let normal = self.orientation
                    * hit.normal.component_mul(self.inverse_scale).normalize();
                self.handler
                    .on_ray_hit(leaf_index, max_t, hit.time_of_impact, normal);
            }
        }
    }
}

impl RayCast for Mesh {
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
    ) -> Option<RayIntersection> {
        // Move the ray into the unscaled frame the tree and triangles live
        // in. The scaling is linear, so hit times need no rescaling.
        let local_ray = scale_ray(ray, self.inverse_scale());

        let mut tester = MeshFirstHitTester {
            triangles: self.triangles(),
            minimum_t: Real::MAX,
            normal: Vector::zeros(),
        };
        let mut max_t = max_time_of_impact;
        self.tree().ray_cast(&local_ray, &mut max_t, &mut tester);

        (tester.minimum_t != Real::MAX).then(|| {
            // Normals transform by the inverse transpose of the scale.
            let normal = tester
                .normal
                .component_mul(self.inverse_scale())
                .normalize();
            RayIntersection::new(tester.minimum_t, normal)
        })
    }
}

impl Mesh {
    /// Casts a ray and reports **every** triangle hit to `handler`, in
    /// traversal order (not sorted by hit time).
    ///
    /// Each triangle whose bounds the ray enters is tested exactly once. The
    /// handler receives world-space unit normals and may shrink `max_t` to
    /// prune the remaining traversal.
    pub fn cast_ray_with_handler<H: CompositeRayHitHandler>(
        &self,
        pose: &Isometry<Real>,
        ray: &Ray,
        max_time_of_impact: Real,
        handler: &mut H,
    ) {
        let local_ray = scale_ray(&ray.inverse_transform_by(pose), self.inverse_scale());

        let mut tester = MeshAllHitsTester {
            triangles: self.triangles(),
            inverse_scale: self.inverse_scale(),
            orientation: &pose.rotation,
            handler,
        };
        let mut max_t = max_time_of_impact;
        self.tree().ray_cast(&local_ray, &mut max_t, &mut tester);
    }

    /// Casts a batch of rays, reporting the first hit of each to `handler`
    /// together with the ray's index in the batch.
    pub fn cast_ray_batch<H: RayBatchHitHandler>(
        &self,
        pose: &Isometry<Real>,
        rays: &[Ray],
        max_time_of_impact: Real,
        handler: &mut H,
    ) {
        for (ray_index, ray) in rays.iter().enumerate() {
            if let Some(hit) = self.cast_ray_and_get_normal(pose, ray, max_time_of_impact) {
                handler.on_ray_hit(ray_index, hit.time_of_impact, hit.normal);
            }
        }
    }
}

#[inline]
fn scale_ray(ray: &Ray, inverse_scale: &Vector<Real>) -> Ray {
    Ray::new(
        Point::from(ray.origin.coords.component_mul(inverse_scale)),
        ray.dir.component_mul(inverse_scale),
    )
}
