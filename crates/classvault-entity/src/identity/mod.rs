//! Who is browsing, and with which credential.

pub mod acting;
pub mod actor;

pub use acting::ActingIdentity;
pub use actor::Actor;
