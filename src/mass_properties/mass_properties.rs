use crate::math::{Point, Real, Vector};

/// The mass properties of a rigid body: inverse mass and inverse principal
/// angular inertia, expressed in the shape's local frame.
///
/// Inertia is stored in inverse, diagonal form: every shape of this crate
/// has its principal inertia axes aligned with the local frame, so the
/// off-diagonal terms are zero by construction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MassProperties {
    /// The center of mass, in the shape's local frame.
    pub local_com: Point<Real>,
    /// The inverse of the mass.
    pub inv_mass: Real,
    /// The inverse of the principal angular inertia, one entry per local
    /// axis.
    pub inv_principal_inertia: Vector<Real>,
}

impl MassProperties {
    /// The mass described by these properties.
    pub fn mass(&self) -> Real {
        crate::utils::inv(self.inv_mass)
    }

    /// The principal angular inertia described by these properties.
    pub fn principal_inertia(&self) -> Vector<Real> {
        self.inv_principal_inertia.map(crate::utils::inv)
    }
}
