//! # Constant-Product Pricing
//!
//! ## The Core Invariant
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                             │
//! │              k = virtual_base * virtual_token               │
//! │                                                             │
//! │   Where:                                                    │
//! │   • virtual_base  = notional SOL liquidity (lamports)       │
//! │   • virtual_token = notional token liquidity (sub-units)    │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Buying tokens
//!
//! A 1% protocol fee is taken off the input before it touches the curve:
//!
//! ```text
//! 1. fee         = floor(amount_in * 100 / 10_000)
//! 2. new_base    = base + (amount_in - fee)
//! 3. new_token   = floor(k / new_base)
//! 4. tokens_out  = token - new_token
//! ```
//!
//! ## Selling tokens
//!
//! Sells pay no fee:
//!
//! ```text
//! 1. new_token   = token + tokens_in
//! 2. new_base    = floor(k / new_token)
//! 3. base_out    = base - new_base
//! ```
//!
//! Truncating division is the only rounding step, so the product of the
//! reserves after a trade is never larger than before it.

use crate::constants::{BPS_DENOMINATOR, PROTOCOL_FEE_BPS, UNIT};
use crate::errors::CurveError;

/// Result of pricing a buy against a pair of virtual reserves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyQuote {
    /// Protocol fee routed to the fee recipient
    pub fee: u64,
    /// SOL that actually enters the curve
    pub amount_after_fee: u64,
    /// Tokens delivered to the buyer
    pub tokens_out: u64,
    pub new_virtual_base_reserve: u64,
    pub new_virtual_token_reserve: u64,
}

/// Result of pricing a sell against a pair of virtual reserves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellQuote {
    /// SOL paid out to the seller
    pub base_out: u64,
    pub new_virtual_base_reserve: u64,
    pub new_virtual_token_reserve: u64,
}

/// Constant-product bonding curve with a buy-side fee
pub struct ConstantProductCurve;

impl ConstantProductCurve {
    /// Protocol fee charged on a buy of `amount_in` lamports
    ///
    /// Amounts below 100 lamports round down to a zero fee.
    pub fn protocol_fee(amount_in: u64) -> Result<u64, CurveError> {
        let fee = (amount_in as u128)
            .checked_mul(PROTOCOL_FEE_BPS as u128)
            .ok_or(CurveError::MathOverflow)?
            / BPS_DENOMINATOR as u128;

        u64::try_from(fee).map_err(|_| CurveError::MathOverflow)
    }

    /// Product of the two virtual reserves
    pub fn invariant(virtual_base_reserve: u64, virtual_token_reserve: u64) -> Result<u128, CurveError> {
        (virtual_base_reserve as u128)
            .checked_mul(virtual_token_reserve as u128)
            .ok_or(CurveError::MathOverflow)
    }

    /// Price a buy of `amount_in` lamports
    ///
    /// # Arguments
    /// * `virtual_base_reserve` - Current virtual SOL reserve
    /// * `virtual_token_reserve` - Current virtual token reserve
    /// * `amount_in` - Lamports the buyer pays, fee included
    ///
    /// # Example
    /// ```ignore
    /// // Fresh curve: 30 SOL / 1.073B tokens, buy with 1 SOL
    /// let quote = ConstantProductCurve::quote_buy(30 * UNIT, 1_073_000_000 * UNIT, UNIT)?;
    /// // quote.fee == 10_000_000, quote.amount_after_fee == 990_000_000
    /// ```
    pub fn quote_buy(
        virtual_base_reserve: u64,
        virtual_token_reserve: u64,
        amount_in: u64,
    ) -> Result<BuyQuote, CurveError> {
        if amount_in == 0 {
            return Err(CurveError::InvalidAmount);
        }
        if virtual_base_reserve == 0 || virtual_token_reserve == 0 {
            return Err(CurveError::InsufficientLiquidity);
        }

        let fee = Self::protocol_fee(amount_in)?;
        let amount_after_fee = amount_in
            .checked_sub(fee)
            .ok_or(CurveError::MathOverflow)?;

        let k = Self::invariant(virtual_base_reserve, virtual_token_reserve)?;

        let new_virtual_base_reserve = virtual_base_reserve
            .checked_add(amount_after_fee)
            .ok_or(CurveError::MathOverflow)?;
        let new_virtual_token_reserve = k
            .checked_div(new_virtual_base_reserve as u128)
            .ok_or(CurveError::MathOverflow)?;
        let new_virtual_token_reserve =
            u64::try_from(new_virtual_token_reserve).map_err(|_| CurveError::MathOverflow)?;

        let tokens_out = virtual_token_reserve
            .checked_sub(new_virtual_token_reserve)
            .ok_or(CurveError::InsufficientLiquidity)?;

        // Either the input was too small to move the curve or the curve is drained
        if tokens_out == 0 || new_virtual_token_reserve == 0 {
            return Err(CurveError::InsufficientLiquidity);
        }

        Ok(BuyQuote {
            fee,
            amount_after_fee,
            tokens_out,
            new_virtual_base_reserve,
            new_virtual_token_reserve,
        })
    }

    /// Price a sell of `tokens_in` token sub-units
    ///
    /// `floor(k / vt')` rounds the new base reserve down, so `base_out` is
    /// rounded up by less than one lamport. A sell too small to be worth a
    /// lamport still pays one. The product of the reserves never grows; the
    /// rounding is paid for out of the curve's real base reserve, and each
    /// such sell costs the seller a transaction fee on-chain.
    ///
    /// # Arguments
    /// * `virtual_base_reserve` - Current virtual SOL reserve
    /// * `virtual_token_reserve` - Current virtual token reserve
    /// * `tokens_in` - Tokens the seller returns to the curve
    pub fn quote_sell(
        virtual_base_reserve: u64,
        virtual_token_reserve: u64,
        tokens_in: u64,
    ) -> Result<SellQuote, CurveError> {
        if tokens_in == 0 {
            return Err(CurveError::InvalidAmount);
        }
        if virtual_base_reserve == 0 || virtual_token_reserve == 0 {
            return Err(CurveError::InsufficientLiquidity);
        }

        let k = Self::invariant(virtual_base_reserve, virtual_token_reserve)?;

        let new_virtual_token_reserve = virtual_token_reserve
            .checked_add(tokens_in)
            .ok_or(CurveError::MathOverflow)?;
        let new_virtual_base_reserve = k
            .checked_div(new_virtual_token_reserve as u128)
            .ok_or(CurveError::MathOverflow)?;
        let new_virtual_base_reserve =
            u64::try_from(new_virtual_base_reserve).map_err(|_| CurveError::MathOverflow)?;

        let base_out = virtual_base_reserve
            .checked_sub(new_virtual_base_reserve)
            .ok_or(CurveError::InsufficientLiquidity)?;

        if base_out == 0 || new_virtual_base_reserve == 0 {
            return Err(CurveError::InsufficientLiquidity);
        }

        Ok(SellQuote {
            base_out,
            new_virtual_base_reserve,
            new_virtual_token_reserve,
        })
    }

    /// Marginal price of one whole token, in lamports
    ///
    /// Price = virtual_base / virtual_token, scaled by [`UNIT`].
    pub fn spot_price(virtual_base_reserve: u64, virtual_token_reserve: u64) -> Result<u64, CurveError> {
        if virtual_token_reserve == 0 {
            return Err(CurveError::InsufficientLiquidity);
        }

        let price = (virtual_base_reserve as u128)
            .checked_mul(UNIT as u128)
            .ok_or(CurveError::MathOverflow)?
            / virtual_token_reserve as u128;

        u64::try_from(price).map_err(|_| CurveError::MathOverflow)
    }
}

// ============================================================================
// TESTS
// ============================================================================
