//! Contact points and the fixed-capacity manifolds grouping them.

pub use self::manifold::{
    ContactData, ContactManifold, ConvexContact, ConvexContactManifold, NonconvexContact,
    NonconvexContactManifold,
};

mod manifold;
