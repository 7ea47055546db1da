//! Post-graduation Withdrawal
//!
//! Once a curve graduates, its creator can pull the unsold token reserve
//! out exactly once. The SOL reserve stays on the curve record.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::state::CurveConfiguration;

/// Event emitted when the owner withdraws the token reserve
#[event]
pub struct ReserveWithdrawn {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

/// Accounts for the owner withdrawal
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// Must be the curve owner; checked in the handler
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        constraint = mint.key() == curve_config.token_mint,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [CurveConfiguration::SEED, mint.key().as_ref()],
        bump = curve_config.bump,
    )]
    pub curve_config: Account<'info, CurveConfiguration>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = curve_config,
        associated_token::token_program = token_program,
    )]
    pub curve_ata: InterfaceAccount<'info, TokenAccount>,

    /// Owner's token account, receives the reserve
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_ata: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Withdraw<'info> {
    pub fn withdraw(&mut self) -> Result<u64> {
        let amount = self.curve_config.apply_withdraw(&self.owner.key())?;

        let mint_key = self.mint.key();
        let bump = [self.curve_config.bump];
        let curve_seeds: &[&[u8]] = &[CurveConfiguration::SEED, mint_key.as_ref(), &bump];
        let signer_seeds = &[curve_seeds];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.curve_ata.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: self.owner_ata.to_account_info(),
                    authority: self.curve_config.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
            self.mint.decimals,
        )?;

        msg!("Withdrew {} tokens to {}", amount, self.owner.key());

        emit!(ReserveWithdrawn {
            mint: mint_key,
            owner: self.owner.key(),
            amount,
        });

        Ok(amount)
    }
}
