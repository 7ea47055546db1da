//! Token Trading
//!
//! Buys and sells settle against the reserves stored on the curve record at
//! execution time. The caller's `min_*_out` is the only input taken from the
//! client side; any estimate it computed beforehand is advisory.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::constants::FEE_RECIPIENT;
use crate::errors::CurveError;
use crate::state::CurveConfiguration;

/// Event emitted when tokens are bought
#[event]
pub struct TokensBought {
    pub mint: Pubkey,
    pub buyer: Pubkey,
    pub amount_in: u64,
    pub fee: u64,
    pub tokens_out: u64,
    pub real_base_reserve: u64,
    pub real_token_reserve: u64,
}

/// Event emitted when tokens are sold
#[event]
pub struct TokensSold {
    pub mint: Pubkey,
    pub seller: Pubkey,
    pub tokens_in: u64,
    pub base_out: u64,
    pub real_base_reserve: u64,
    pub real_token_reserve: u64,
}

/// Event emitted on the buy that crosses the graduation threshold
#[event]
pub struct CurveGraduated {
    pub mint: Pubkey,
    pub curve: Pubkey,
    pub real_base_reserve: u64,
    pub real_token_reserve: u64,
}

/// Accounts for trading operations
#[derive(Accounts)]
pub struct Trade<'info> {
    /// Trader
    #[account(mut)]
    pub trader: Signer<'info>,

    /// Mint of the traded token
    #[account(
        constraint = mint.key() == curve_config.token_mint,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    /// Curve being traded on
    #[account(
        mut,
        seeds = [CurveConfiguration::SEED, mint.key().as_ref()],
        bump = curve_config.bump,
    )]
    pub curve_config: Account<'info, CurveConfiguration>,

    /// Curve's token reserve
    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = curve_config,
        associated_token::token_program = token_program,
    )]
    pub curve_ata: InterfaceAccount<'info, TokenAccount>,

    /// Trader's token account
    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = mint,
        associated_token::authority = trader,
        associated_token::token_program = token_program,
    )]
    pub trader_ata: InterfaceAccount<'info, TokenAccount>,

    /// Protocol fee recipient
    #[account(
        mut,
        address = FEE_RECIPIENT @ CurveError::InvalidFeeRecipient,
    )]
    pub fee_recipient: SystemAccount<'info>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Trade<'info> {
    /// Buy tokens with `amount_in` lamports (fee included)
    pub fn buy_tokens(&mut self, amount_in: u64, min_tokens_out: u64) -> Result<u64> {
        let fill = self.curve_config.apply_buy(amount_in, min_tokens_out)?;

        if fill.fee > 0 {
            transfer(
                CpiContext::new(
                    self.system_program.to_account_info(),
                    Transfer {
                        from: self.trader.to_account_info(),
                        to: self.fee_recipient.to_account_info(),
                    },
                ),
                fill.fee,
            )?;
        }

        transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.trader.to_account_info(),
                    to: self.curve_config.to_account_info(),
                },
            ),
            fill.amount_after_fee,
        )?;

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
                    to: self.trader_ata.to_account_info(),
                    authority: self.curve_config.to_account_info(),
                },
                signer_seeds,
            ),
            fill.tokens_out,
            self.mint.decimals,
        )?;

        emit!(TokensBought {
            mint: mint_key,
            buyer: self.trader.key(),
            amount_in,
            fee: fill.fee,
            tokens_out: fill.tokens_out,
            real_base_reserve: self.curve_config.real_base_reserve,
            real_token_reserve: self.curve_config.real_token_reserve,
        });

        if fill.graduated {
            msg!("Bonding curve has graduated!");
            emit!(CurveGraduated {
                mint: mint_key,
                curve: self.curve_config.key(),
                real_base_reserve: self.curve_config.real_base_reserve,
                real_token_reserve: self.curve_config.real_token_reserve,
            });
        }

        Ok(fill.tokens_out)
    }

    /// Sell `amount_in` tokens back to the curve
    pub fn sell_tokens(&mut self, amount_in: u64, min_base_out: u64) -> Result<u64> {
        let fill = self.curve_config.apply_sell(amount_in, min_base_out)?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_ata.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: self.curve_ata.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            amount_in,
            self.mint.decimals,
        )?;

        // The curve account is owned by this program, so lamports move directly
        self.curve_config.sub_lamports(fill.base_out)?;
        self.trader.add_lamports(fill.base_out)?;

        emit!(TokensSold {
            mint: self.mint.key(),
            seller: self.trader.key(),
            tokens_in: amount_in,
            base_out: fill.base_out,
            real_base_reserve: self.curve_config.real_base_reserve,
            real_token_reserve: self.curve_config.real_token_reserve,
        });

        Ok(fill.base_out)
    }
}
