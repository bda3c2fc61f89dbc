use crate::debug_render::{ContactLines, LineInstance};
use crate::math::{Isometry, Real, Vector};

/// Read access to the poses of the bodies owned by the surrounding engine.
///
/// Bodies are grouped in sets (active, sleeping, ...); a body is addressed
/// by its set index and its index within the set.
pub trait BodyPoses {
    /// The pose of the `body_index`-th body of the `set_index`-th set.
    fn pose(&self, set_index: usize, body_index: u32) -> Isometry<Real>;
}

/// One contact of a convex constraint's prestep data: the solver keeps the
/// offset from body A and the penetration depth per contact, and one shared
/// normal for the whole constraint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConvexPrestepContact {
    /// World-space offset from body A's position to the contact.
    pub offset_a: Vector<Real>,
    /// Penetration depth at the contact.
    pub depth: Real,
}

/// The prestep data of a convex contact constraint with `CONTACTS` contacts,
/// restricted to the fields the line extractor reads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConvexPrestep<const CONTACTS: usize> {
    /// Surface normal shared by all contacts of the constraint.
    pub normal: Vector<Real>,
    /// Per-contact data.
    pub contacts: [ConvexPrestepContact; CONTACTS],
}

/// One contact of a nonconvex constraint's prestep data; every contact
/// carries its own normal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NonconvexPrestepContact {
    /// World-space offset from body A's position to the contact.
    pub offset: Vector<Real>,
    /// The surface normal at the contact.
    pub normal: Vector<Real>,
    /// Penetration depth at the contact.
    pub depth: Real,
}

/// The prestep data of a nonconvex contact constraint with `CONTACTS`
/// contacts, restricted to the fields the line extractor reads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NonconvexPrestep<const CONTACTS: usize> {
    /// Per-contact data.
    pub contacts: [NonconvexPrestepContact; CONTACTS],
}

/// Extraction of renderable debug lines from a contact constraint's prestep
/// data.
///
/// One implementation covers every contact count of a manifold kind through
/// const generics; one-body and two-body constraints share it, since only
/// body A's pose is ever read (contact offsets are expressed from body A).
pub trait ConstraintLineExtractor {
    /// The number of lines `extract_lines` appends: two per contact.
    const LINES_PER_CONSTRAINT: usize;

    /// Appends this constraint's debug lines to `lines`.
    fn extract_lines(
        &self,
        pose_a: &Isometry<Real>,
        tint: &Vector<Real>,
        lines: &mut Vec<LineInstance>,
    );
}

impl<const CONTACTS: usize> ConstraintLineExtractor for ConvexPrestep<CONTACTS> {
    const LINES_PER_CONSTRAINT: usize = 2 * CONTACTS;

    fn extract_lines(
        &self,
        pose_a: &Isometry<Real>,
        tint: &Vector<Real>,
        lines: &mut Vec<LineInstance>,
    ) {
        for contact in &self.contacts {
            ContactLines::add(
                pose_a,
                &contact.offset_a,
                &self.normal,
                contact.depth,
                tint,
                lines,
            );
        }
    }
}

impl<const CONTACTS: usize> ConstraintLineExtractor for NonconvexPrestep<CONTACTS> {
    const LINES_PER_CONSTRAINT: usize = 2 * CONTACTS;

    fn extract_lines(
        &self,
        pose_a: &Isometry<Real>,
        tint: &Vector<Real>,
        lines: &mut Vec<LineInstance>,
    ) {
        for contact in &self.contacts {
            ContactLines::add(
                pose_a,
                &contact.offset,
                &contact.normal,
                contact.depth,
                tint,
                lines,
            );
        }
    }
}

/// Extracts the debug lines of one contact constraint.
///
/// `body_indices` lists the bodies the constraint acts on (one or two);
/// only the first body's pose is used because contact offsets are expressed
/// from body A.
pub fn extract_contact_lines<E: ConstraintLineExtractor, B: BodyPoses>(
    prestep: &E,
    bodies: &B,
    set_index: usize,
    body_indices: &[u32],
    tint: &Vector<Real>,
    lines: &mut Vec<LineInstance>,
) {
    let pose_a = bodies.pose(set_index, body_indices[0]);
    prestep.extract_lines(&pose_a, tint, lines);
}
