use crate::mass_properties::MassProperties;
use crate::math::{Point, Real, Vector};
use core::f32::consts::PI;

impl MassProperties {
    /// Computes the mass properties of a capsule of the given total mass.
    ///
    /// The capsule is decomposed into a cylinder and two hemispheres (one
    /// full sphere); both parts' volumes are normalized to sum to one before
    /// composing their inertia, so the result is exact for any radius to
    /// half-length ratio.
    pub fn from_capsule(mass: Real, radius: Real, half_length: Real) -> Self {
        let radius_squared = radius * radius;
        let half_length_squared = half_length * half_length;

        let cylinder_volume = 2.0 * half_length * radius_squared * PI;
        let sphere_volume = PI * radius_squared * radius * 4.0 / 3.0;
        let inverse_total = 1.0 / (cylinder_volume + sphere_volume);
        let cylinder_share = cylinder_volume * inverse_total;
        let sphere_share = sphere_volume * inverse_total;

        let inv_transverse = 1.0
            / (mass
                * (cylinder_share * (half_length_squared / 3.0 + radius_squared / 4.0)
                    + sphere_share
                        * (radius_squared * 2.0 / 5.0
                            + half_length * radius * 0.75
                            + half_length_squared)));
        let inv_axial = 1.0
            / (mass
                * (cylinder_share * radius_squared / 2.0
                    + sphere_share * radius_squared * 2.0 / 5.0));

        Self {
            local_com: Point::origin(),
            inv_mass: 1.0 / mass,
            inv_principal_inertia: Vector::new(inv_transverse, inv_axial, inv_transverse),
        }
    }
}
