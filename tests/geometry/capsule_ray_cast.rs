use lunge3d::math::{Isometry, Point, Real, Vector};
use lunge3d::na::{self, Isometry3, Translation3, UnitQuaternion, Vector3};
use lunge3d::query::{Ray, RayCast, SimdRay};
use lunge3d::shape::{Capsule, CapsuleWide};
use lunge3d::simba::simd::{SimdBool, SimdValue};

const RADIUS: Real = 0.4;
const HALF_LENGTH: Real = 0.6;

#[test]
fn side_hit_along_z() {
    let capsule = Capsule::new(RADIUS, HALF_LENGTH);
    let ray = Ray::new(
        Point::new(0.0, 0.0, -(RADIUS + 2.0)),
        Vector::new(0.0, 0.0, 1.0),
    );

    let hit = capsule
        .cast_ray_and_get_normal(&Isometry::identity(), &ray, Real::MAX)
        .unwrap();
    assert!((hit.time_of_impact - 2.0).abs() < 1.0e-5);
    assert!((hit.normal - Vector::new(0.0, 0.0, -1.0)).norm() < 1.0e-5);
}

#[test]
fn cap_hit_from_above() {
    let capsule = Capsule::new(RADIUS, HALF_LENGTH);
    let ray = Ray::new(
        Point::new(0.0, HALF_LENGTH + RADIUS + 1.0, 0.0),
        Vector::new(0.0, -1.0, 0.0),
    );

    let hit = capsule
        .cast_ray_and_get_normal(&Isometry::identity(), &ray, Real::MAX)
        .unwrap();
    assert!((hit.time_of_impact - 1.0).abs() < 1.0e-5);
    assert!((hit.normal - Vector::new(0.0, 1.0, 0.0)).norm() < 1.0e-5);
}

#[test]
fn outside_pointing_away_misses() {
    let capsule = Capsule::new(RADIUS, HALF_LENGTH);
    let ray = Ray::new(Point::new(RADIUS + 1.0, 0.0, 0.0), Vector::new(1.0, 0.0, 0.0));

    assert!(capsule
        .cast_ray_and_get_normal(&Isometry::identity(), &ray, Real::MAX)
        .is_none());
}

#[test]
fn axis_parallel_ray_picks_the_approached_cap() {
    let capsule = Capsule::new(RADIUS, HALF_LENGTH);

    // From below, traveling up: the bottom cap is hit after 2 units.
    let ray = Ray::new(
        Point::new(0.0, -(HALF_LENGTH + RADIUS + 2.0), 0.0),
        Vector::new(0.0, 1.0, 0.0),
    );
    let hit = capsule
        .cast_ray_and_get_normal(&Isometry::identity(), &ray, Real::MAX)
        .unwrap();
    assert!((hit.time_of_impact - 2.0).abs() < 1.0e-5);
    assert!((hit.normal - Vector::new(0.0, -1.0, 0.0)).norm() < 1.0e-5);

    // From above, traveling down, same distance to the top cap.
    let ray = Ray::new(
        Point::new(0.0, HALF_LENGTH + RADIUS + 2.0, 0.0),
        Vector::new(0.0, -1.0, 0.0),
    );
    let hit = capsule
        .cast_ray_and_get_normal(&Isometry::identity(), &ray, Real::MAX)
        .unwrap();
    assert!((hit.time_of_impact - 2.0).abs() < 1.0e-5);
    assert!((hit.normal - Vector::new(0.0, 1.0, 0.0)).norm() < 1.0e-5);
}

#[test]
fn unnormalized_direction_rescales_t() {
    let capsule = Capsule::new(RADIUS, HALF_LENGTH);
    let ray = Ray::new(
        Point::new(0.0, 0.0, -(RADIUS + 2.0)),
        Vector::new(0.0, 0.0, 4.0),
    );

    let t = capsule
        .cast_ray(&Isometry::identity(), &ray, Real::MAX)
        .unwrap();
    assert!((t - 0.5).abs() < 1.0e-5);
    assert!((ray.point_at(t).z + RADIUS).abs() < 1.0e-5);
}

#[test]
fn posed_capsule_side_hit() {
    let capsule = Capsule::new(RADIUS, HALF_LENGTH);
    // Axis rotated onto X, center translated to (5, 0, 0).
    let pose = Isometry3::from_parts(
        Translation3::new(5.0, 0.0, 0.0),
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), core::f32::consts::FRAC_PI_2),
    );
    let ray = Ray::new(
        Point::new(5.0, 0.0, -(RADIUS + 2.0)),
        Vector::new(0.0, 0.0, 1.0),
    );

    let hit = capsule.cast_ray_and_get_normal(&pose, &ray, Real::MAX).unwrap();
    assert!((hit.time_of_impact - 2.0).abs() < 1.0e-4);
    assert!((hit.normal - Vector::new(0.0, 0.0, -1.0)).norm() < 1.0e-4);

    // Localizing the ray and mapping it back round-trips.
    let round_trip = ray.inverse_transform_by(&pose).transform_by(&pose);
    assert!((round_trip.origin - ray.origin).norm() < 1.0e-5);
    assert!((round_trip.dir - ray.dir).norm() < 1.0e-5);
}

#[test]
fn max_time_of_impact_is_honored() {
    let capsule = Capsule::new(RADIUS, HALF_LENGTH);
    let ray = Ray::new(
        Point::new(0.0, 0.0, -(RADIUS + 2.0)),
        Vector::new(0.0, 0.0, 1.0),
    );

    assert!(capsule
        .cast_ray(&Isometry::identity(), &ray, 1.5)
        .is_none());
    assert!(capsule.cast_ray(&Isometry::identity(), &ray, 2.5).is_some());
}

fn random_unit_quaternion(rng: &mut oorandom::Rand32) -> UnitQuaternion<Real> {
    na::Unit::try_new(
        na::Quaternion::new(
            rng.rand_float() - 0.5,
            rng.rand_float() - 0.5,
            rng.rand_float() - 0.5,
            rng.rand_float() - 0.5,
        ),
        1.0e-5,
    )
    .unwrap_or(UnitQuaternion::identity())
}

#[test]
fn wide_ray_test_matches_scalar() {
    let mut rng = oorandom::Rand32::new(1234);

    for _ in 0..250 {
        let capsule = Capsule::new(0.1 + rng.rand_float(), 0.1 + rng.rand_float());
        let pose = Isometry3::from_parts(
            Translation3::new(
                (rng.rand_float() - 0.5) * 4.0,
                (rng.rand_float() - 0.5) * 4.0,
                (rng.rand_float() - 0.5) * 4.0,
            ),
            random_unit_quaternion(&mut rng),
        );

        // Four rays aimed at the capsule's vicinity, some of them missing.
        let rays: Vec<Ray> = (0..4)
            .map(|_| {
                let origin = Point::new(
                    (rng.rand_float() - 0.5) * 12.0,
                    (rng.rand_float() - 0.5) * 12.0,
                    (rng.rand_float() - 0.5) * 12.0,
                );
                let target = pose.translation.vector
                    + Vector::new(
                        (rng.rand_float() - 0.5) * 3.0,
                        (rng.rand_float() - 0.5) * 3.0,
                        (rng.rand_float() - 0.5) * 3.0,
                    );
                Ray::new(origin, target - origin.coords)
            })
            .collect();

        let wide_capsule = CapsuleWide::splat(&capsule);
        let wide_pose = Isometry::splat(pose);
        let mut wide_ray = SimdRay::splat(rays[0]);
        for (lane, ray) in rays.iter().enumerate() {
            wide_ray.replace(lane, *ray);
        }

        let (intersected, t, normal) = wide_capsule.ray_test(&wide_pose, &wide_ray);
        let hit_mask = intersected.bitmask();

        for (lane, ray) in rays.iter().enumerate() {
            let scalar_hit = capsule.cast_ray_and_get_normal(&pose, ray, Real::MAX);
            assert_eq!(
                hit_mask & (1 << lane) != 0,
                scalar_hit.is_some(),
                "hit mask mismatch on lane {lane}"
            );

            if let Some(scalar_hit) = scalar_hit {
                let wide_t = t.extract(lane);
                assert!(
                    (wide_t - scalar_hit.time_of_impact).abs()
                        <= 1.0e-4 * scalar_hit.time_of_impact.abs().max(1.0),
                    "t mismatch on lane {lane}: {wide_t} vs {}",
                    scalar_hit.time_of_impact
                );
                for i in 0..3 {
                    let wide_normal = normal[i].extract(lane);
                    assert!(
                        (wide_normal - scalar_hit.normal[i]).abs() <= 1.0e-4,
                        "normal mismatch on lane {lane}"
                    );
                }
            }
        }
    }
}

#[test]
fn wide_broadcast_and_lane_writes() {
    let first = Capsule::new(0.5, 1.5);
    let second = Capsule::new(0.25, 0.75);

    let mut wide = CapsuleWide::splat(&first);
    wide.replace(0, &second);

    assert_eq!(wide.extract(0), second);
    for lane in 1..lunge3d::math::SIMD_WIDTH {
        assert_eq!(wide.extract(lane), first);
    }
}
