//! Address derivation
//!
//! Every account a launch touches is a program-derived or associated address,
//! so clients and the program agree on them without any lookup:
//!
//! ```text
//! mint          = PDA(program,  ["bonding-pump-mint", creator, name])
//! curve         = PDA(program,  ["bonding-pump", mint])
//! curve_tokens  = ATA(curve, token_program, mint)
//! metadata      = PDA(metaplex, ["metadata", metaplex, mint])
//! ```

use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address_with_program_id;
use anchor_spl::metadata::mpl_token_metadata;

use crate::constants::{MAX_NAME_LEN, METADATA_SEED};
use crate::errors::CurveError;
use crate::state::CurveConfiguration;

/// Addresses of every account created for one launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchAddresses {
    pub mint: Pubkey,
    pub mint_bump: u8,
    pub curve: Pubkey,
    pub curve_bump: u8,
    pub curve_token_account: Pubkey,
    pub metadata: Pubkey,
}

/// Mint PDA for a creator's token name
pub fn find_mint_address(
    creator: &Pubkey,
    name: &str,
    program_id: &Pubkey,
) -> std::result::Result<(Pubkey, u8), CurveError> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(CurveError::InvalidMetadata);
    }
    Pubkey::try_find_program_address(
        &[CurveConfiguration::MINT_SEED, creator.as_ref(), name.as_bytes()],
        program_id,
    )
    .ok_or(CurveError::InvalidMetadata)
}

/// Curve configuration PDA for a mint
pub fn find_curve_address(
    mint: &Pubkey,
    program_id: &Pubkey,
) -> std::result::Result<(Pubkey, u8), CurveError> {
    Pubkey::try_find_program_address(&[CurveConfiguration::SEED, mint.as_ref()], program_id)
        .ok_or(CurveError::InvalidMetadata)
}

/// Token account holding the curve's token reserve
pub fn curve_token_account(curve: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(curve, mint, token_program)
}

/// Metaplex metadata PDA for a mint
pub fn find_metadata_address(mint: &Pubkey) -> std::result::Result<Pubkey, CurveError> {
    let metadata_program = mpl_token_metadata::ID;
    Pubkey::try_find_program_address(
        &[METADATA_SEED, metadata_program.as_ref(), mint.as_ref()],
        &metadata_program,
    )
    .map(|(address, _)| address)
    .ok_or(CurveError::InvalidMetadata)
}

/// Derive every address of a launch by `creator` of a token called `name`
pub fn derive_launch_addresses(
    creator: &Pubkey,
    name: &str,
    program_id: &Pubkey,
    token_program: &Pubkey,
) -> std::result::Result<LaunchAddresses, CurveError> {
    let (mint, mint_bump) = find_mint_address(creator, name, program_id)?;
    let (curve, curve_bump) = find_curve_address(&mint, program_id)?;

    Ok(LaunchAddresses {
        mint,
        mint_bump,
        curve,
        curve_bump,
        curve_token_account: curve_token_account(&curve, &mint, token_program),
        metadata: find_metadata_address(&mint)?,
    })
}
