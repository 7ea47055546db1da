//! State structures for the bonding curve launchpad

pub mod curve;
pub mod status;

pub use curve::*;
pub use status::*;
