//! Bonding Curve State
//!
//! One `CurveConfiguration` exists per launched token. It is the only record
//! the trade instructions mutate, and every mutation goes through the
//! `apply_*` methods below so the program and off-chain tooling settle trades
//! with the same arithmetic.

use anchor_lang::prelude::*;

use crate::amm::{BuyQuote, ConstantProductCurve, SellQuote};
use crate::constants::{INITIAL_VIRTUAL_BASE_RESERVE, INITIAL_VIRTUAL_TOKEN_RESERVE, TOKEN_TOTAL_SUPPLY};
use crate::errors::CurveError;
use crate::state::CurveStatus;

/// Per-token bonding curve account
///
/// Seeds: ["bonding-pump", token_mint]
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct CurveConfiguration {
    /// Creator of the token; the only key allowed to withdraw after graduation
    pub owner: Pubkey,

    /// Mint of the token traded on this curve
    pub token_mint: Pubkey,

    /// Notional SOL liquidity used for pricing
    pub virtual_base_reserve: u64,

    /// Notional token liquidity used for pricing
    pub virtual_token_reserve: u64,

    /// SOL actually held by the curve
    pub real_base_reserve: u64,

    /// Tokens actually held by the curve and deliverable to buyers
    pub real_token_reserve: u64,

    /// Tokens minted to the curve at launch
    pub token_total_supply: u64,

    pub status: CurveStatus,

    /// PDA bump seed
    pub bump: u8,
}

/// Settled buy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyFill {
    /// Lamports owed to the fee recipient
    pub fee: u64,
    /// Lamports owed to the curve
    pub amount_after_fee: u64,
    /// Tokens owed to the buyer
    pub tokens_out: u64,
    /// This buy tripped the graduation gate
    pub graduated: bool,
}

/// Settled sell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellFill {
    /// Lamports owed to the seller
    pub base_out: u64,
}

impl CurveConfiguration {
    pub const SEED: &'static [u8] = b"bonding-pump";
    pub const MINT_SEED: &'static [u8] = b"bonding-pump-mint";

    /// Fresh curve with the platform's launch parameters
    pub fn launch(owner: Pubkey, token_mint: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            token_mint,
            virtual_base_reserve: INITIAL_VIRTUAL_BASE_RESERVE,
            virtual_token_reserve: INITIAL_VIRTUAL_TOKEN_RESERVE,
            real_base_reserve: 0,
            real_token_reserve: TOKEN_TOTAL_SUPPLY,
            token_total_supply: TOKEN_TOTAL_SUPPLY,
            status: CurveStatus::Trading,
            bump,
        }
    }

    pub fn is_graduated(&self) -> bool {
        self.status.is_graduated()
    }

    /// Current product of the virtual reserves
    pub fn invariant(&self) -> std::result::Result<u128, CurveError> {
        ConstantProductCurve::invariant(self.virtual_base_reserve, self.virtual_token_reserve)
    }

    /// Lamports per whole token at the current reserves
    pub fn spot_price(&self) -> std::result::Result<u64, CurveError> {
        ConstantProductCurve::spot_price(self.virtual_base_reserve, self.virtual_token_reserve)
    }

    /// Advisory price for a buy against the current reserves
    pub fn quote_buy(&self, amount_in: u64) -> std::result::Result<BuyQuote, CurveError> {
        ConstantProductCurve::quote_buy(self.virtual_base_reserve, self.virtual_token_reserve, amount_in)
    }

    /// Advisory price for a sell against the current reserves
    pub fn quote_sell(&self, amount_in: u64) -> std::result::Result<SellQuote, CurveError> {
        ConstantProductCurve::quote_sell(self.virtual_base_reserve, self.virtual_token_reserve, amount_in)
    }

    /// Settle a buy of `amount_in` lamports against the on-record reserves.
    ///
    /// Nothing is written unless every check passes. The graduation gate is
    /// evaluated after the reserves are updated.
    pub fn apply_buy(
        &mut self,
        amount_in: u64,
        min_tokens_out: u64,
    ) -> std::result::Result<BuyFill, CurveError> {
        if amount_in == 0 {
            return Err(CurveError::InvalidAmount);
        }
        self.status.ensure_trading()?;

        let quote = self.quote_buy(amount_in)?;

        if quote.tokens_out < min_tokens_out {
            return Err(CurveError::SlippageExceeded);
        }
        if quote.tokens_out > self.real_token_reserve {
            return Err(CurveError::InsufficientLiquidity);
        }

        let real_base_reserve = self
            .real_base_reserve
            .checked_add(quote.amount_after_fee)
            .ok_or(CurveError::MathOverflow)?;
        let real_token_reserve = self
            .real_token_reserve
            .checked_sub(quote.tokens_out)
            .ok_or(CurveError::InsufficientLiquidity)?;

        self.virtual_base_reserve = quote.new_virtual_base_reserve;
        self.virtual_token_reserve = quote.new_virtual_token_reserve;
        self.real_base_reserve = real_base_reserve;
        self.real_token_reserve = real_token_reserve;

        let graduated = self.status.graduate_if_threshold_reached(self.real_base_reserve);

        Ok(BuyFill {
            fee: quote.fee,
            amount_after_fee: quote.amount_after_fee,
            tokens_out: quote.tokens_out,
            graduated,
        })
    }

    /// Settle a sell of `amount_in` tokens against the on-record reserves.
    pub fn apply_sell(
        &mut self,
        amount_in: u64,
        min_base_out: u64,
    ) -> std::result::Result<SellFill, CurveError> {
        if amount_in == 0 {
            return Err(CurveError::InvalidAmount);
        }
        self.status.ensure_trading()?;

        let quote = self.quote_sell(amount_in)?;

        if quote.base_out < min_base_out {
            return Err(CurveError::SlippageExceeded);
        }
        if quote.base_out > self.real_base_reserve {
            return Err(CurveError::InsufficientLiquidity);
        }

        let real_token_reserve = self
            .real_token_reserve
            .checked_add(amount_in)
            .ok_or(CurveError::MathOverflow)?;
        // The curve can never take back more than it issued
        if real_token_reserve > self.token_total_supply {
            return Err(CurveError::InsufficientLiquidity);
        }
        let real_base_reserve = self
            .real_base_reserve
            .checked_sub(quote.base_out)
            .ok_or(CurveError::InsufficientLiquidity)?;

        self.virtual_base_reserve = quote.new_virtual_base_reserve;
        self.virtual_token_reserve = quote.new_virtual_token_reserve;
        self.real_base_reserve = real_base_reserve;
        self.real_token_reserve = real_token_reserve;

        Ok(SellFill {
            base_out: quote.base_out,
        })
    }

    /// Release the remaining token reserve to the owner after graduation.
    ///
    /// SOL and virtual reserves are left in place as a record of the curve.
    pub fn apply_withdraw(&mut self, caller: &Pubkey) -> std::result::Result<u64, CurveError> {
        self.status.ensure_graduated()?;
        if *caller != self.owner {
            return Err(CurveError::Unauthorized);
        }
        if self.real_token_reserve == 0 {
            return Err(CurveError::NothingToWithdraw);
        }

        let amount = self.real_token_reserve;
        self.real_token_reserve = 0;
        Ok(amount)
    }
}
