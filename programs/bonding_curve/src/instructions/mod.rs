//! Instruction handlers for the bonding curve launchpad
//!
//! - `initialize` - Launch a token on a fresh curve (permissionless)
//! - `trade` - Buy/sell against the curve
//! - `withdraw` - Release the token reserve to the creator after graduation
//! - `get_state` - Read-only snapshot of a curve

pub mod initialize;
pub mod trade;
pub mod withdraw;
pub mod get_state;

pub use initialize::*;
pub use trade::*;
pub use withdraw::*;
pub use get_state::*;
