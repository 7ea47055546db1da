//! Read-only curve snapshot, returned through the instruction's return data

use anchor_lang::prelude::*;

use crate::state::CurveConfiguration;

#[derive(Accounts)]
pub struct GetState<'info> {
    #[account(
        seeds = [CurveConfiguration::SEED, curve_config.token_mint.as_ref()],
        bump = curve_config.bump,
    )]
    pub curve_config: Account<'info, CurveConfiguration>,
}

impl<'info> GetState<'info> {
    pub fn get_state(&self) -> Result<CurveConfiguration> {
        Ok((*self.curve_config).clone())
    }
}
