use lunge3d::bounding_volume::Aabb;
use lunge3d::math::{Point, Real, Vector, SIMD_WIDTH};
use lunge3d::shape::{Mesh, MeshOverlaps, Triangle, TriangleWide};

fn origin_triangle() -> Triangle {
    Triangle::new(
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
    )
}

fn far_triangle() -> Triangle {
    Triangle::new(
        Point::new(10.0, 10.0, 10.0),
        Point::new(11.0, 10.0, 10.0),
        Point::new(10.0, 11.0, 10.0),
    )
}

#[test]
fn aabb_query_finds_origin_triangle() {
    let mesh = Mesh::new(vec![origin_triangle()], Vector::repeat(1.0));
    let query = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));

    let mut overlaps = MeshOverlaps::with_query_count(1);
    mesh.find_local_overlaps(&[query], &mut overlaps);

    assert_eq!(overlaps.bucket(0), &[0]);
}

#[test]
fn aabb_query_batch_fills_per_query_buckets() {
    let mesh = Mesh::new(vec![origin_triangle(), far_triangle()], Vector::repeat(1.0));
    let queries = [
        Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0)),
        Aabb::new(Point::new(9.0, 9.0, 9.0), Point::new(12.0, 12.0, 12.0)),
        Aabb::new(Point::new(-5.0, -5.0, -5.0), Point::new(-4.0, -4.0, -4.0)),
    ];

    let mut overlaps = MeshOverlaps::with_query_count(queries.len());
    mesh.find_local_overlaps(&queries, &mut overlaps);

    assert_eq!(overlaps.bucket(0), &[0]);
    assert_eq!(overlaps.bucket(1), &[1]);
    assert!(overlaps.bucket(2).is_empty());
}

#[test]
fn aabb_query_respects_mesh_scale() {
    let mesh = Mesh::new(vec![origin_triangle()], Vector::repeat(4.0));

    // The scaled triangle spans [0, 4]; a box around (3, 0.5, 0) only
    // touches it thanks to the scale.
    let query = Aabb::new(Point::new(2.5, 0.25, -0.5), Point::new(3.5, 0.75, 0.5));
    let mut overlaps = MeshOverlaps::with_query_count(1);
    mesh.find_local_overlaps(&[query], &mut overlaps);
    assert_eq!(overlaps.bucket(0), &[0]);

    // The same box against the unscaled mesh misses.
    let unscaled = Mesh::new(vec![origin_triangle()], Vector::repeat(1.0));
    let mut overlaps = MeshOverlaps::with_query_count(1);
    unscaled.find_local_overlaps(&[query], &mut overlaps);
    assert!(overlaps.bucket(0).is_empty());
}

#[test]
fn swept_query_reports_triangles_on_the_path() {
    let mesh = Mesh::new(vec![origin_triangle(), far_triangle()], Vector::repeat(1.0));

    // A unit box starting below the origin triangle, sweeping up through it.
    let min = Point::new(0.0, 0.0, -3.0);
    let max = Point::new(1.0, 1.0, -2.0);
    let sweep = Vector::new(0.0, 0.0, 1.0);

    let mut bucket = Vec::new();
    mesh.find_local_overlaps_in_sweep(&min, &max, &sweep, 10.0, &mut bucket);
    assert_eq!(bucket, vec![0]);

    // Sweeping the other way reaches nothing.
    let mut bucket = Vec::new();
    mesh.find_local_overlaps_in_sweep(&min, &max, &Vector::new(0.0, 0.0, -1.0), 10.0, &mut bucket);
    assert!(bucket.is_empty());

    // A sweep budget too short to reach the triangle reports nothing.
    let mut bucket = Vec::new();
    mesh.find_local_overlaps_in_sweep(&min, &max, &sweep, 1.0, &mut bucket);
    assert!(bucket.is_empty());
}

#[test]
fn zero_scale_axis_is_clamped() {
    let mut mesh = Mesh::new(vec![origin_triangle()], Vector::repeat(1.0));
    mesh.set_scale(Vector::new(0.0, 1.0, 1.0));

    assert_eq!(mesh.inverse_scale().x, Real::MAX);
    assert_eq!(mesh.inverse_scale().y, 1.0);
    assert_eq!(mesh.scale().x, 0.0);
}

#[test]
fn local_triangle_applies_scale() {
    let mesh = Mesh::new(vec![origin_triangle()], Vector::new(2.0, 3.0, 4.0));
    let triangle = mesh.local_triangle(0);

    assert_eq!(triangle.b, Point::new(2.0, 0.0, 0.0));
    assert_eq!(triangle.c, Point::new(0.0, 3.0, 0.0));
}

#[test]
fn local_triangle_wide_gathers_into_lane_zero() {
    let mesh = Mesh::new(vec![origin_triangle(), far_triangle()], Vector::new(2.0, 3.0, 4.0));

    let filler = Triangle::new(
        Point::new(-7.0, -7.0, -7.0),
        Point::new(-8.0, -7.0, -7.0),
        Point::new(-7.0, -8.0, -7.0),
    );
    let mut wide = TriangleWide::splat(&filler);
    mesh.local_triangle_wide(1, &mut wide);

    // Lane 0 receives the scaled triangle; the other lanes are untouched.
    assert_eq!(wide.extract(0), mesh.local_triangle(1));
    assert_eq!(wide.extract(0).a, Point::new(20.0, 30.0, 40.0));
    for lane in 1..SIMD_WIDTH {
        assert_eq!(wide.extract(lane), filler);
    }
}
