//! # Bonding Curve Launchpad
//!
//! Launch a token and trade it against SOL on a constant-product bonding curve.
//!
//! ## Overview
//!
//! Every token starts on its own curve with 30 SOL / 1.073B tokens of virtual
//! liquidity and the full 1B supply held by the curve. Buys pay a 1% fee,
//! sells are free. When the curve has collected 85 SOL of real reserve it
//! graduates: trading stops for good and the creator may withdraw the unsold
//! tokens once.
//!
//! ## How it works
//! - `amm` prices trades from the virtual reserves.
//! - `state` holds the per-token record and settles trades against it.
//! - `pda` derives every account address of a launch.
//! - `instructions` move SOL and tokens to match a settled trade.
//!

use anchor_lang::prelude::*;

pub mod amm;
pub mod constants;
pub mod errors;
pub mod instructions;
pub mod pda;
pub mod state;

pub use amm::*;
pub use constants::*;
pub use errors::*;
pub use instructions::*;
pub use pda::*;
pub use state::*;

declare_id!("9V7u5GQaQmvE4QuBNXC7ZxLDG8wE9twdegMA5JtXnKGv");

/// Main bonding curve program
#[program]
pub mod bonding_curve {
    use super::*;

    /// Launch a token on a fresh curve
    pub fn initialize(
        ctx: Context<Initialize>,
        name: String,
        symbol: String,
        uri: String,
    ) -> Result<()> {
        ctx.accounts.initialize(name, symbol, uri, &ctx.bumps)
    }

    /// Buy tokens with SOL; returns the tokens received
    pub fn buy(ctx: Context<Trade>, amount_in: u64, min_tokens_out: u64) -> Result<u64> {
        ctx.accounts.buy_tokens(amount_in, min_tokens_out)
    }

    /// Sell tokens for SOL; returns the lamports received
    pub fn sell(ctx: Context<Trade>, amount_in: u64, min_base_out: u64) -> Result<u64> {
        ctx.accounts.sell_tokens(amount_in, min_base_out)
    }

    /// Withdraw the token reserve after graduation (owner only)
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<u64> {
        ctx.accounts.withdraw()
    }

    /// Snapshot of a curve for client-side estimates
    pub fn get_state(ctx: Context<GetState>) -> Result<CurveConfiguration> {
        ctx.accounts.get_state()
    }
}
