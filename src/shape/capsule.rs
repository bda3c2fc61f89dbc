use crate::bounding_volume::Aabb;
use crate::mass_properties::MassProperties;
use crate::math::{Real, Rotation, Vector};

/// The extremal radii a shape exposes to speculative contact margin
/// computation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AngularExpansion {
    /// Distance from the shape center to its most distant point.
    pub maximum_radius: Real,
    /// Upper bound on the lateral displacement of any surface point under a
    /// rotation: the difference between the maximum and minimum radius.
    pub maximum_angular_expansion: Real,
}

/// A capsule: the Minkowski sum of a segment aligned with the local **Y**
/// axis and a sphere.
///
/// The segment spans `[-half_length, half_length]` along Y, so the full
/// capsule height is `2 * half_length + 2 * radius`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Capsule {
    /// The radius of the capsule.
    pub radius: Real,
    /// The half-length of the capsule's principal axis.
    pub half_length: Real,
}

impl Capsule {
    /// The stable shape type id of capsules, used by external dispatch tables.
    pub const TYPE_ID: u32 = 1;

    /// Creates a new capsule with the given radius and axis half-length.
    pub fn new(radius: Real, half_length: Real) -> Self {
        Self {
            radius,
            half_length,
        }
    }

    /// The length of the capsule's principal axis, excluding the end caps.
    pub fn length(&self) -> Real {
        self.half_length * 2.0
    }

    /// The extremal radii of this capsule.
    ///
    /// The minimum radius of a capsule equals its `radius`, so the angular
    /// expansion bound reduces to the axis half-length.
    pub fn angular_expansion_data(&self) -> AngularExpansion {
        AngularExpansion {
            maximum_radius: self.half_length + self.radius,
            maximum_angular_expansion: self.half_length,
        }
    }

    /// The axis-aligned bounding box of this capsule rotated by `orientation`,
    /// centered at the origin.
    pub fn compute_bounds(&self, orientation: &Rotation<Real>) -> Aabb {
        let axis = orientation * Vector::y();
        let half = axis.abs() * self.half_length + Vector::repeat(self.radius);
        Aabb::new((-half).into(), half.into())
    }

    /// The mass properties of this capsule for the given total mass.
    pub fn compute_inertia(&self, mass: Real) -> MassProperties {
        MassProperties::from_capsule(mass, self.radius, self.half_length)
    }
}
