//! Off-chain ledger for the bonding curve launchpad
//!
//! Keeps one [`CurveConfiguration`](bonding_curve::CurveConfiguration) per
//! curve address and settles trades with the same state transitions the
//! on-chain program runs. Useful for simulations, indexers and tests that
//! need the program's exact integer results without a validator.
//!
//! - [`CurveLedger`] is the keyed store: per-record locking, versioned updates,
//!   holder balances settled in the same commit as the curve
//! - [`Launchpad`] exposes initialize / buy / sell / withdraw / get_state

pub mod error;
pub mod launchpad;
pub mod store;

pub use error::*;
pub use launchpad::*;
pub use store::*;
