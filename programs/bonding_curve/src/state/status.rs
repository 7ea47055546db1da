//! Curve lifecycle
//!
//! ```text
//!   Trading ──(real SOL reserve >= 85 SOL after a buy)──▶ Graduated
//! ```
//!
//! The transition is one-way. A graduated curve rejects every trade and
//! only accepts the owner's withdrawal of the remaining tokens.

use anchor_lang::prelude::*;

use crate::constants::GRADUATION_THRESHOLD;
use crate::errors::CurveError;

/// Curve lifecycle status
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum CurveStatus {
    /// Curve is open for buys and sells
    #[default]
    Trading,
    /// Threshold crossed; terminal
    Graduated,
}

impl CurveStatus {
    pub fn is_graduated(self) -> bool {
        self == CurveStatus::Graduated
    }

    /// Fails with `AlreadyGraduated` once the curve has graduated
    pub fn ensure_trading(self) -> std::result::Result<(), CurveError> {
        match self {
            CurveStatus::Trading => Ok(()),
            CurveStatus::Graduated => Err(CurveError::AlreadyGraduated),
        }
    }

    /// Fails with `NotGraduated` while the curve is still trading
    pub fn ensure_graduated(self) -> std::result::Result<(), CurveError> {
        match self {
            CurveStatus::Trading => Err(CurveError::NotGraduated),
            CurveStatus::Graduated => Ok(()),
        }
    }

    /// Graduation gate, evaluated after every successful buy.
    ///
    /// Returns `true` only on the call that performs the transition.
    pub fn graduate_if_threshold_reached(&mut self, real_base_reserve: u64) -> bool {
        if *self == CurveStatus::Trading && real_base_reserve >= GRADUATION_THRESHOLD {
            *self = CurveStatus::Graduated;
            return true;
        }
        false
    }
}
