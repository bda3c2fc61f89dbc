//! Mass and inertia of shapes.

pub use self::mass_properties::MassProperties;

mod mass_properties;
mod mass_properties_capsule;
