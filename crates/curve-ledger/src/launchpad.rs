//! Launchpad
//!
//! Off-chain counterpart of the program's instruction set. Each operation
//! runs the same `CurveConfiguration` transition the program runs and
//! reports what the matching transaction would move.
//!
//! Token holdings stand in for the holders' token accounts: buys and the
//! owner withdrawal credit them, sells debit them, and a sell larger than
//! the seller's holding fails with `InsufficientBalance` the way the token
//! transfer would fail on-chain.

use anchor_lang::prelude::Pubkey;
use anchor_spl::token;
use bonding_curve::{
    derive_launch_addresses, validate_metadata, BuyQuote, CurveConfiguration, SellQuote,
    FEE_RECIPIENT,
};
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::store::{CurveLedger, VersionedCurve};

/// Addresses and metadata of a launched token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReceipt {
    pub curve: Pubkey,
    pub mint: Pubkey,
    pub curve_token_account: Pubkey,
    pub metadata: Pubkey,
    pub owner: Pubkey,
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

/// Settled buy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyReceipt {
    pub curve: Pubkey,
    pub buyer: Pubkey,
    pub amount_in: u64,
    /// Paid to `fee_recipient`, never enters the curve
    pub fee: u64,
    pub fee_recipient: Pubkey,
    pub tokens_out: u64,
    /// This buy tripped the graduation gate
    pub graduated: bool,
    /// Record version after the buy
    pub version: u64,
}

/// Settled sell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellReceipt {
    pub curve: Pubkey,
    pub seller: Pubkey,
    pub tokens_in: u64,
    pub base_out: u64,
    pub version: u64,
}

#[derive(Debug)]
pub struct Launchpad {
    program_id: Pubkey,
    token_program: Pubkey,
    ledger: CurveLedger,
}

impl Default for Launchpad {
    fn default() -> Self {
        Self::new()
    }
}

impl Launchpad {
    /// Launchpad keyed by the deployed program's addresses
    pub fn new() -> Self {
        Self::with_program_id(bonding_curve::ID)
    }

    pub fn with_program_id(program_id: Pubkey) -> Self {
        Self {
            program_id,
            token_program: token::ID,
            ledger: CurveLedger::new(),
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn ledger(&self) -> &CurveLedger {
        &self.ledger
    }

    /// Launch a token for `creator`.
    ///
    /// Addresses depend only on the creator and the name, so relaunching the
    /// same name fails with `DuplicateInitialization`.
    pub fn initialize(
        &self,
        creator: Pubkey,
        name: &str,
        symbol: &str,
        uri: &str,
    ) -> LedgerResult<LaunchReceipt> {
        validate_metadata(name, symbol, uri)?;
        let addresses =
            derive_launch_addresses(&creator, name, &self.program_id, &self.token_program)?;

        self.ledger.insert(
            addresses.curve,
            CurveConfiguration::launch(creator, addresses.mint, addresses.curve_bump),
        )?;

        info!(
            curve = %addresses.curve,
            mint = %addresses.mint,
            owner = %creator,
            token_name = name,
            token_symbol = symbol,
            "token launched"
        );

        Ok(LaunchReceipt {
            curve: addresses.curve,
            mint: addresses.mint,
            curve_token_account: addresses.curve_token_account,
            metadata: addresses.metadata,
            owner: creator,
            name: name.to_string(),
            symbol: symbol.to_string(),
            uri: uri.to_string(),
        })
    }

    pub fn get_state(&self, curve: &Pubkey) -> LedgerResult<CurveConfiguration> {
        Ok(self.ledger.snapshot(curve)?.state)
    }

    /// Tokens `holder` holds from trading on `curve`
    pub fn balance_of(&self, curve: &Pubkey, holder: &Pubkey) -> LedgerResult<u64> {
        Ok(self.ledger.snapshot(curve)?.balances.balance_of(holder))
    }

    /// State, holdings and version, for `*_if_unchanged` calls
    pub fn snapshot(&self, curve: &Pubkey) -> LedgerResult<VersionedCurve> {
        self.ledger.snapshot(curve)
    }

    /// Lamports per whole token at the curve's current reserves
    pub fn spot_price(&self, curve: &Pubkey) -> LedgerResult<u64> {
        Ok(self.get_state(curve)?.spot_price()?)
    }

    /// Advisory estimate; the executed buy prices against the state it commits to
    pub fn quote_buy(&self, curve: &Pubkey, amount_in: u64) -> LedgerResult<BuyQuote> {
        Ok(self.get_state(curve)?.quote_buy(amount_in)?)
    }

    /// Advisory estimate; the executed sell prices against the state it commits to
    pub fn quote_sell(&self, curve: &Pubkey, amount_in: u64) -> LedgerResult<SellQuote> {
        Ok(self.get_state(curve)?.quote_sell(amount_in)?)
    }

    pub fn buy(
        &self,
        curve: &Pubkey,
        buyer: Pubkey,
        amount_in: u64,
        min_tokens_out: u64,
    ) -> LedgerResult<BuyReceipt> {
        self.execute_buy(curve, buyer, amount_in, min_tokens_out, None)
    }

    /// Buy only if the curve is still at `version`
    pub fn buy_if_unchanged(
        &self,
        curve: &Pubkey,
        buyer: Pubkey,
        amount_in: u64,
        min_tokens_out: u64,
        version: u64,
    ) -> LedgerResult<BuyReceipt> {
        self.execute_buy(curve, buyer, amount_in, min_tokens_out, Some(version))
    }

    pub fn sell(
        &self,
        curve: &Pubkey,
        seller: Pubkey,
        amount_in: u64,
        min_base_out: u64,
    ) -> LedgerResult<SellReceipt> {
        self.execute_sell(curve, seller, amount_in, min_base_out, None)
    }

    /// Sell only if the curve is still at `version`
    pub fn sell_if_unchanged(
        &self,
        curve: &Pubkey,
        seller: Pubkey,
        amount_in: u64,
        min_base_out: u64,
        version: u64,
    ) -> LedgerResult<SellReceipt> {
        self.execute_sell(curve, seller, amount_in, min_base_out, Some(version))
    }

    /// Hand the unsold token reserve of a graduated curve to its owner
    pub fn withdraw(&self, curve: &Pubkey, caller: Pubkey) -> LedgerResult<u64> {
        let (amount, version) = self
            .ledger
            .update(curve, None, |state, balances| {
                let amount = state.apply_withdraw(&caller)?;
                balances.credit(caller, amount)?;
                Ok(amount)
            })
            .map_err(|err| rejected(curve, "withdraw", err))?;

        info!(curve = %curve, owner = %caller, amount, version, "token reserve withdrawn");
        Ok(amount)
    }

    fn execute_buy(
        &self,
        curve: &Pubkey,
        buyer: Pubkey,
        amount_in: u64,
        min_tokens_out: u64,
        expected_version: Option<u64>,
    ) -> LedgerResult<BuyReceipt> {
        let (fill, version) = self
            .ledger
            .update(curve, expected_version, |state, balances| {
                let fill = state.apply_buy(amount_in, min_tokens_out)?;
                balances.credit(buyer, fill.tokens_out)?;
                Ok(fill)
            })
            .map_err(|err| rejected(curve, "buy", err))?;

        debug!(
            curve = %curve,
            buyer = %buyer,
            amount_in,
            fee = fill.fee,
            tokens_out = fill.tokens_out,
            version,
            "buy settled"
        );
        if fill.graduated {
            info!(curve = %curve, version, "bonding curve graduated");
        }

        Ok(BuyReceipt {
            curve: *curve,
            buyer,
            amount_in,
            fee: fill.fee,
            fee_recipient: FEE_RECIPIENT,
            tokens_out: fill.tokens_out,
            graduated: fill.graduated,
            version,
        })
    }

    fn execute_sell(
        &self,
        curve: &Pubkey,
        seller: Pubkey,
        amount_in: u64,
        min_base_out: u64,
        expected_version: Option<u64>,
    ) -> LedgerResult<SellReceipt> {
        let (fill, version) = self
            .ledger
            .update(curve, expected_version, |state, balances| {
                let fill = state.apply_sell(amount_in, min_base_out)?;
                balances.debit(seller, amount_in)?;
                Ok(fill)
            })
            .map_err(|err| rejected(curve, "sell", err))?;

        debug!(
            curve = %curve,
            seller = %seller,
            tokens_in = amount_in,
            base_out = fill.base_out,
            version,
            "sell settled"
        );

        Ok(SellReceipt {
            curve: *curve,
            seller,
            tokens_in: amount_in,
            base_out: fill.base_out,
            version,
        })
    }
}

fn rejected(curve: &Pubkey, operation: &'static str, err: LedgerError) -> LedgerError {
    debug!(curve = %curve, operation, error = %err, "request rejected");
    err
}
