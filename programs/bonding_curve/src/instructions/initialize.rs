//! Token Launch
//!
//! Anyone can launch a token. One call creates:
//! 1. The mint, with the curve PDA as mint and metadata authority
//! 2. The curve configuration record, seeded with the platform constants
//! 3. The curve's token account, holding the whole supply
//! 4. The Metaplex metadata record (name, symbol, uri)

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    metadata::{
        create_metadata_accounts_v3, mpl_token_metadata::types::DataV2, CreateMetadataAccountsV3,
        Metadata,
    },
    token_interface::{mint_to, Mint, MintTo, TokenAccount, TokenInterface},
};

use crate::constants::{
    MAX_NAME_LEN, MAX_SYMBOL_LEN, MAX_URI_LEN, METADATA_SEED, TOKEN_DECIMALS, TOKEN_TOTAL_SUPPLY,
};
use crate::errors::CurveError;
use crate::state::CurveConfiguration;

/// Event emitted when a token is launched
#[event]
pub struct TokenLaunched {
    pub curve: Pubkey,
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

/// Accounts for launching a token
#[derive(Accounts)]
#[instruction(name: String)]
pub struct Initialize<'info> {
    /// Token creator (pays for accounts, becomes the curve owner)
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Mint of the launched token; one per (creator, name)
    #[account(
        init,
        payer = creator,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = curve_config,
        seeds = [CurveConfiguration::MINT_SEED, creator.key().as_ref(), name.as_bytes()],
        bump,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    /// Curve record for the mint
    #[account(
        init,
        payer = creator,
        space = 8 + CurveConfiguration::INIT_SPACE,
        seeds = [CurveConfiguration::SEED, mint.key().as_ref()],
        bump,
    )]
    pub curve_config: Account<'info, CurveConfiguration>,

    /// Curve's token account, receives the full supply
    #[account(
        init,
        payer = creator,
        associated_token::mint = mint,
        associated_token::authority = curve_config,
        associated_token::token_program = token_program,
    )]
    pub curve_ata: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: created by the metadata program; address checked through seeds
    #[account(
        mut,
        seeds = [METADATA_SEED, token_metadata_program.key().as_ref(), mint.key().as_ref()],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub metadata: UncheckedAccount<'info>,

    /// Metaplex token metadata program
    pub token_metadata_program: Program<'info, Metadata>,
    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> Initialize<'info> {
    /// Launch the token and mint the whole supply to the curve
    pub fn initialize(
        &mut self,
        name: String,
        symbol: String,
        uri: String,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        validate_metadata(&name, &symbol, &uri)?;

        self.curve_config.set_inner(CurveConfiguration::launch(
            self.creator.key(),
            self.mint.key(),
            bumps.curve_config,
        ));

        let mint_key = self.mint.key();
        let bump = [bumps.curve_config];
        let curve_seeds: &[&[u8]] = &[CurveConfiguration::SEED, mint_key.as_ref(), &bump];
        let signer_seeds = &[curve_seeds];

        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.mint.to_account_info(),
                    to: self.curve_ata.to_account_info(),
                    authority: self.curve_config.to_account_info(),
                },
                signer_seeds,
            ),
            TOKEN_TOTAL_SUPPLY,
        )?;

        create_metadata_accounts_v3(
            CpiContext::new_with_signer(
                self.token_metadata_program.to_account_info(),
                CreateMetadataAccountsV3 {
                    metadata: self.metadata.to_account_info(),
                    mint: self.mint.to_account_info(),
                    mint_authority: self.curve_config.to_account_info(),
                    payer: self.creator.to_account_info(),
                    update_authority: self.curve_config.to_account_info(),
                    system_program: self.system_program.to_account_info(),
                    rent: self.rent.to_account_info(),
                },
                signer_seeds,
            ),
            DataV2 {
                name: name.clone(),
                symbol: symbol.clone(),
                uri: uri.clone(),
                seller_fee_basis_points: 0,
                creators: None,
                collection: None,
                uses: None,
            },
            true, // is mutable
            true, // update authority signs
            None,
        )?;

        msg!("Token launched!");
        msg!("Mint: {}", mint_key);
        msg!("Curve: {}", self.curve_config.key());

        emit!(TokenLaunched {
            curve: self.curve_config.key(),
            mint: mint_key,
            owner: self.creator.key(),
            name,
            symbol,
            uri,
        });

        Ok(())
    }
}

/// Metaplex length limits; name and symbol must be non-empty
pub fn validate_metadata(
    name: &str,
    symbol: &str,
    uri: &str,
) -> std::result::Result<(), CurveError> {
    let name_ok = !name.is_empty() && name.len() <= MAX_NAME_LEN;
    let symbol_ok = !symbol.is_empty() && symbol.len() <= MAX_SYMBOL_LEN;

    if name_ok && symbol_ok && uri.len() <= MAX_URI_LEN {
        Ok(())
    } else {
        Err(CurveError::InvalidMetadata)
    }
}
