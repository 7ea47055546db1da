//! Platform constants
//!
//! Every curve launched by the program shares the same parameters. None of these
//! are configurable per token.

use anchor_lang::prelude::*;

/// Decimals of the traded token (matches the 9 decimals of SOL)
pub const TOKEN_DECIMALS: u8 = 9;

/// One whole token / one SOL in sub-units
pub const UNIT: u64 = 1_000_000_000;

/// Virtual SOL liquidity every curve starts with (30 SOL)
pub const INITIAL_VIRTUAL_BASE_RESERVE: u64 = 30 * UNIT;

/// Virtual token liquidity every curve starts with (1.073B tokens)
pub const INITIAL_VIRTUAL_TOKEN_RESERVE: u64 = 1_073_000_000 * UNIT;

/// Supply minted to the curve's token account at launch (1B tokens)
pub const TOKEN_TOTAL_SUPPLY: u64 = 1_000_000_000 * UNIT;

/// Real SOL reserve at which the curve graduates (85 SOL)
pub const GRADUATION_THRESHOLD: u64 = 85 * UNIT;

/// Buy-side protocol fee in basis points (100 = 1%)
pub const PROTOCOL_FEE_BPS: u64 = 100;

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Receives the buy-side protocol fee
pub const FEE_RECIPIENT: Pubkey = pubkey!("Ex4xuNjnbmL7sbaM18WrgAMEv3LqurNQ379bUpWS4Xj3");

/// Metaplex limits for the metadata record
pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;
pub const MAX_URI_LEN: usize = 200;

/// Seed of the metadata PDA under the Metaplex program
pub const METADATA_SEED: &[u8] = b"metadata";
