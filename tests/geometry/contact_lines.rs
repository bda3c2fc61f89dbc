use lunge3d::debug_render::{
    extract_contact_lines, BodyPoses, ConstraintLineExtractor, ContactLines, ConvexPrestep,
    ConvexPrestepContact, LineInstance, NonconvexPrestep, NonconvexPrestepContact,
};
use lunge3d::math::{Isometry, Real, Vector};
use lunge3d::na::{Isometry3, Translation3, UnitQuaternion};

struct TestBodies {
    sets: Vec<Vec<Isometry<Real>>>,
}

impl BodyPoses for TestBodies {
    fn pose(&self, set_index: usize, body_index: u32) -> Isometry<Real> {
        self.sets[set_index][body_index as usize]
    }
}

fn test_bodies() -> TestBodies {
    TestBodies {
        sets: vec![
            vec![Isometry::identity()],
            vec![
                Isometry3::from_parts(Translation3::new(1.0, 2.0, 3.0), UnitQuaternion::identity()),
                Isometry3::from_parts(Translation3::new(9.0, 9.0, 9.0), UnitQuaternion::identity()),
            ],
        ],
    }
}

fn convex_prestep<const CONTACTS: usize>() -> ConvexPrestep<CONTACTS> {
    ConvexPrestep {
        normal: Vector::new(0.0, 1.0, 0.0),
        contacts: core::array::from_fn(|i| ConvexPrestepContact {
            offset_a: Vector::new(i as Real, 0.0, 0.0),
            depth: 0.1 * i as Real - 0.05,
        }),
    }
}

fn nonconvex_prestep<const CONTACTS: usize>() -> NonconvexPrestep<CONTACTS> {
    NonconvexPrestep {
        contacts: core::array::from_fn(|i| NonconvexPrestepContact {
            offset: Vector::new(0.0, i as Real, 0.0),
            normal: Vector::new(0.0, 0.0, 1.0),
            depth: 0.2 * i as Real,
        }),
    }
}

fn extracted_line_count<E: ConstraintLineExtractor>(prestep: &E) -> usize {
    let bodies = test_bodies();
    let mut lines = Vec::new();
    extract_contact_lines(
        prestep,
        &bodies,
        1,
        &[0, 1],
        &Vector::repeat(1.0),
        &mut lines,
    );
    lines.len()
}

#[test]
fn every_variant_emits_two_lines_per_contact() {
    assert_eq!(extracted_line_count(&convex_prestep::<1>()), 2);
    assert_eq!(extracted_line_count(&convex_prestep::<2>()), 4);
    assert_eq!(extracted_line_count(&convex_prestep::<3>()), 6);
    assert_eq!(extracted_line_count(&convex_prestep::<4>()), 8);

    assert_eq!(extracted_line_count(&nonconvex_prestep::<2>()), 4);
    assert_eq!(extracted_line_count(&nonconvex_prestep::<3>()), 6);
    assert_eq!(extracted_line_count(&nonconvex_prestep::<4>()), 8);
    assert_eq!(extracted_line_count(&nonconvex_prestep::<5>()), 10);
    assert_eq!(extracted_line_count(&nonconvex_prestep::<6>()), 12);
    assert_eq!(extracted_line_count(&nonconvex_prestep::<7>()), 14);
    assert_eq!(extracted_line_count(&nonconvex_prestep::<8>()), 16);

    assert_eq!(ConvexPrestep::<4>::LINES_PER_CONSTRAINT, 8);
    assert_eq!(NonconvexPrestep::<8>::LINES_PER_CONSTRAINT, 16);
}

#[test]
fn one_body_and_two_body_constraints_extract_identically() {
    let bodies = test_bodies();
    let prestep = convex_prestep::<4>();
    let tint = Vector::repeat(1.0);

    let mut one_body_lines = Vec::new();
    extract_contact_lines(&prestep, &bodies, 1, &[0], &tint, &mut one_body_lines);

    let mut two_body_lines = Vec::new();
    extract_contact_lines(&prestep, &bodies, 1, &[0, 1], &tint, &mut two_body_lines);

    // Only body A's pose is read, so an extra body changes nothing.
    assert_eq!(one_body_lines, two_body_lines);
}

#[test]
fn lines_are_anchored_at_the_contact_point() {
    let pose_a = Isometry3::from_parts(Translation3::new(1.0, 2.0, 3.0), UnitQuaternion::identity());
    let offset = Vector::new(0.5, 0.0, 0.0);
    let normal = Vector::new(0.0, 1.0, 0.0);
    let depth = 0.25;

    let mut lines: Vec<LineInstance> = Vec::new();
    ContactLines::add(&pose_a, &offset, &normal, depth, &Vector::repeat(1.0), &mut lines);

    assert_eq!(lines.len(), 2);
    let contact = pose_a.translation.vector + offset;

    // The tangent marker is centered on the contact point...
    let tangent_mid = (lines[0].start.coords + lines[0].end.coords) * 0.5;
    assert!((tangent_mid - contact).norm() < 1.0e-5);
    // ...and perpendicular to the normal.
    let tangent = lines[0].end - lines[0].start;
    assert!(tangent.dot(&normal).abs() < 1.0e-5);
    assert!(tangent.norm() > 0.0);

    // The normal line spans the penetration depth from the contact point.
    assert!((lines[1].start.coords - contact).norm() < 1.0e-5);
    assert!((lines[1].end - lines[1].start - normal * depth).norm() < 1.0e-5);
}

#[test]
fn speculative_contacts_are_tinted_differently() {
    let pose_a = Isometry::identity();
    let tint = Vector::repeat(1.0);
    let normal = Vector::new(0.0, 1.0, 0.0);

    let mut touching: Vec<LineInstance> = Vec::new();
    ContactLines::add(&pose_a, &Vector::zeros(), &normal, 0.1, &tint, &mut touching);
    let mut speculative: Vec<LineInstance> = Vec::new();
    ContactLines::add(
        &pose_a,
        &Vector::zeros(),
        &normal,
        -0.1,
        &tint,
        &mut speculative,
    );

    assert_ne!(touching[0].color, speculative[0].color);
}
