use anchor_lang::prelude::*;

/// Every way a launch, trade or withdrawal can be rejected.
///
/// A rejected request never leaves a partial update behind.
#[error_code]
#[derive(PartialEq, Eq)]
pub enum CurveError {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,
    #[msg("Not enough liquidity on the curve for this trade")]
    InsufficientLiquidity,
    #[msg("Bonding curve has graduated")]
    AlreadyGraduated,
    #[msg("Bonding curve has not graduated yet")]
    NotGraduated,
    #[msg("Only the curve owner can withdraw")]
    Unauthorized,
    /// Raised by the off-chain ledger. On-chain a missing curve fails
    /// Anchor's account checks (`AccountNotInitialized`) instead.
    #[msg("No curve is initialized at this address")]
    RecordNotFound,
    /// Raised by the off-chain ledger. On-chain a repeated launch fails
    /// inside `init` with the system program's "account already in use".
    #[msg("A curve already exists for this creator and name")]
    DuplicateInitialization,
    #[msg("Token name, symbol or uri is malformed")]
    InvalidMetadata,
    #[msg("Token reserve was already withdrawn")]
    NothingToWithdraw,
    #[msg("Fee recipient does not match the protocol address")]
    InvalidFeeRecipient,
    #[msg("Arithmetic overflow")]
    MathOverflow,
}
