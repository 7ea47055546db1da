use anchor_lang::prelude::Pubkey;
use bonding_curve::CurveError;
use thiserror::Error;

/// Errors returned by the off-chain ledger
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// The curve rules rejected the request
    #[error("request rejected: {0}")]
    Rejected(CurveError),

    /// Another writer committed to the record after the caller's snapshot
    #[error("curve {curve} moved from version {expected} to {found}")]
    StaleSnapshot {
        curve: Pubkey,
        expected: u64,
        found: u64,
    },

    /// The holder tried to sell more tokens than it holds on this curve
    #[error("holder {holder} has {balance} tokens, cannot sell {requested}")]
    InsufficientBalance {
        holder: Pubkey,
        balance: u64,
        requested: u64,
    },
}

impl LedgerError {
    /// The curve rule behind a rejection, if that is what this is
    pub fn curve_error(&self) -> Option<CurveError> {
        match self {
            LedgerError::Rejected(err) => Some(*err),
            LedgerError::StaleSnapshot { .. } | LedgerError::InsufficientBalance { .. } => None,
        }
    }
}

impl From<CurveError> for LedgerError {
    fn from(err: CurveError) -> Self {
        LedgerError::Rejected(err)
    }
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
