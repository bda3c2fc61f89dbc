use crate::math::{Isometry, Point, Real, Vector};
use crate::utils::WBasis;

/// One line segment of the debug renderer, with an RGB color.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct LineInstance {
    /// World-space start of the segment.
    pub start: Point<Real>,
    /// World-space end of the segment.
    pub end: Point<Real>,
    /// RGB color of the segment, each channel in `[0, 1]`.
    pub color: Vector<Real>,
}

impl LineInstance {
    /// Creates a new line instance.
    #[inline]
    pub fn new(start: Point<Real>, end: Point<Real>, color: Vector<Real>) -> Self {
        Self { start, end, color }
    }
}

/// Rendering of single contacts as line segments.
pub struct ContactLines;

impl ContactLines {
    /// Half-length of the tangent marker drawn through each contact point.
    const TANGENT_MARKER_HALF_LENGTH: Real = 0.1;

    /// Appends the two line segments visualizing one contact: a marker along
    /// a tangent of the contact surface, and the contact normal scaled by
    /// the penetration depth.
    ///
    /// `offset` points from body A's position to the contact, in world
    /// space; `tint` modulates the base color channel-wise.
    pub fn add(
        pose_a: &Isometry<Real>,
        offset: &Vector<Real>,
        normal: &Vector<Real>,
        depth: Real,
        tint: &Vector<Real>,
        lines: &mut Vec<LineInstance>,
    ) {
        let contact = Point::from(pose_a.translation.vector + offset);
        // Touching contacts are tinted green, speculative ones gray.
        let base = if depth >= 0.0 {
            Vector::new(0.2, 1.0, 0.2)
        } else {
            Vector::new(0.55, 0.55, 0.55)
        };
        let color = base.component_mul(tint);

        let tangent = normal.find_perpendicular() * Self::TANGENT_MARKER_HALF_LENGTH;
        lines.push(LineInstance::new(contact - tangent, contact + tangent, color));
        lines.push(LineInstance::new(contact, contact + normal * depth, color));
    }
}
