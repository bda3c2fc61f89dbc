use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Rotation, Vector};
use crate::partitioning::Tree;
use crate::shape::{Triangle, TriangleWide};

/// A destination for leaf indices produced by a mesh overlap query.
pub trait OverlapBucket {
    /// Appends one overlapping leaf index.
    fn push(&mut self, leaf_index: u32);
}

impl OverlapBucket for Vec<u32> {
    #[inline]
    fn push(&mut self, leaf_index: u32) {
        Vec::push(self, leaf_index);
    }
}

/// A collection of per-query [`OverlapBucket`]s for batched overlap queries.
pub trait OverlapCollection {
    /// The bucket type owned by this collection.
    type Bucket: OverlapBucket;
    /// The bucket receiving the overlaps of the `query_index`-th query.
    fn bucket_mut(&mut self, query_index: usize) -> &mut Self::Bucket;
}

/// A simple [`OverlapCollection`] storing one `Vec<u32>` per query.
#[derive(Clone, Debug, Default)]
pub struct MeshOverlaps {
    buckets: Vec<Vec<u32>>,
}

impl MeshOverlaps {
    /// Creates a collection with one empty bucket per query.
    pub fn with_query_count(query_count: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); query_count],
        }
    }

    /// The overlaps collected for the `query_index`-th query.
    pub fn bucket(&self, query_index: usize) -> &[u32] {
        &self.buckets[query_index]
    }
}

impl OverlapCollection for MeshOverlaps {
    type Bucket = Vec<u32>;

    #[inline]
    fn bucket_mut(&mut self, query_index: usize) -> &mut Vec<u32> {
        &mut self.buckets[query_index]
    }
}

/// A triangle soup accelerated by a bounding-volume [`Tree`], with a
/// per-axis scale applied at query time.
///
/// The triangle set is immutable once built; only the scale may change.
/// Triangles keep their original winding: query normals are geometric
/// normals, never re-oriented.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Mesh {
    triangles: Vec<Triangle>,
    tree: Tree,
    scale: Vector<Real>,
    inverse_scale: Vector<Real>,
}

impl Mesh {
    /// The stable shape type id of meshes, used by external dispatch tables.
    pub const TYPE_ID: u32 = 8;

    /// Creates a mesh from a triangle soup and a per-axis scale.
    ///
    /// Builds the acceleration tree over the unscaled per-triangle bounds;
    /// the scale only affects queries, so it can be changed later without a
    /// rebuild.
    pub fn new(triangles: Vec<Triangle>, scale: Vector<Real>) -> Self {
        let bounds: Vec<Aabb> = triangles.iter().map(|tri| tri.local_aabb()).collect();
        let tree = Tree::sweep_build(&bounds);

        let mut result = Self {
            triangles,
            tree,
            scale: Vector::repeat(1.0),
            inverse_scale: Vector::repeat(1.0),
        };
        result.set_scale(scale);
        result
    }

    /// The per-axis scale of this mesh.
    #[inline]
    pub fn scale(&self) -> &Vector<Real> {
        &self.scale
    }

    /// The componentwise inverse of this mesh's scale.
    #[inline]
    pub fn inverse_scale(&self) -> &Vector<Real> {
        &self.inverse_scale
    }

    /// Sets the per-axis scale of this mesh.
    ///
    /// A zero scale component would produce an infinite inverse; such axes
    /// are clamped to the largest finite value instead so queries keep
    /// producing finite results.
    pub fn set_scale(&mut self, scale: Vector<Real>) {
        if scale.iter().any(|axis| *axis == 0.0) {
            log::warn!(
                "Mesh scale {:?} has a zero component; its inverse is clamped to the largest finite value.",
                scale
            );
        }

        self.scale = scale;
        self.inverse_scale = scale.map(|axis| if axis == 0.0 { Real::MAX } else { 1.0 / axis });
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// The unscaled triangles of this mesh.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// The acceleration tree of this mesh, in unscaled local space.
    #[inline]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The `i`-th triangle of this mesh with the mesh scale applied.
    #[inline]
    pub fn local_triangle(&self, i: u32) -> Triangle {
        self.triangles[i as usize].scaled(&self.scale)
    }

    /// Writes the `i`-th scaled triangle into the lane 0 of `target`.
    #[inline]
    pub fn local_triangle_wide(&self, i: u32, target: &mut TriangleWide) {
        target.replace(0, &self.local_triangle(i));
    }

    /// The axis-aligned bounding box of this mesh rotated by `orientation`,
    /// centered at the origin.
    ///
    /// This folds over every vertex, which is linear in the mesh size;
    /// meshes are expected to be static so bounds are rarely recomputed.
    pub fn compute_bounds(&self, orientation: &Rotation<Real>) -> Aabb {
        let mut bounds = Aabb::new_invalid();
        for triangle in &self.triangles {
            for vertex in [triangle.a, triangle.b, triangle.c] {
                let point = orientation * Point::from(vertex.coords.component_mul(&self.scale));
                bounds.take_point(point);
            }
        }
        bounds
    }

    /// Finds, for each query AABB expressed in the mesh's scaled local
    /// space, the indices of all triangles whose bounds it touches.
    ///
    /// Overlaps of the `i`-th query are appended to `overlaps.bucket_mut(i)`.
    pub fn find_local_overlaps<C: OverlapCollection>(
        &self,
        queries: &[Aabb],
        overlaps: &mut C,
    ) {
        for (query_index, query) in queries.iter().enumerate() {
            let local_query = query.scaled(&self.inverse_scale);
            let bucket = overlaps.bucket_mut(query_index);
            let _ = self.tree.get_overlaps(&local_query, &mut |leaf_index: u32| {
                bucket.push(leaf_index);
                true
            });
        }
    }

    /// Finds the indices of all triangles whose bounds may be touched by the
    /// box `[min, max]` swept along `sweep` for a duration of `max_t`, all
    /// expressed in the mesh's scaled local space.
    pub fn find_local_overlaps_in_sweep<B: OverlapBucket>(
        &self,
        min: &Point<Real>,
        max: &Point<Real>,
        sweep: &Vector<Real>,
        max_t: Real,
        bucket: &mut B,
    ) {
        let a = min.coords.component_mul(&self.inverse_scale);
        let b = max.coords.component_mul(&self.inverse_scale);
        let local_min = Point::from(a.inf(&b));
        let local_max = Point::from(a.sup(&b));
        let local_sweep = sweep.component_mul(&self.inverse_scale);

        struct Collector<'a, B> {
            bucket: &'a mut B,
        }

        impl<B: OverlapBucket> crate::partitioning::SweepLeafTester for Collector<'_, B> {
            #[inline]
            fn test_leaf(&mut self, leaf_index: u32, _: &mut Real) {
                self.bucket.push(leaf_index);
            }
        }

        let mut t = max_t;
        self.tree.sweep(
            &local_min,
            &local_max,
            &local_sweep,
            &mut t,
            &mut Collector { bucket },
        );
    }
}
