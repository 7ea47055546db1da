//! Program test harness
//!
//! The program runs natively inside `ProgramTest`. The SPL token and
//! associated token programs ship with the harness; the Metaplex program is
//! replaced by a stand-in that only checks the metadata address it is handed.

#![allow(dead_code)]

use anchor_lang::prelude::{AccountInfo, Pubkey};
use anchor_lang::solana_program::{
    entrypoint::ProgramResult, program_error::ProgramError, program_pack::Pack, system_program,
    sysvar,
};
use anchor_lang::{AccountDeserialize, InstructionData, ToAccountMetas};
use anchor_spl::associated_token::{self, get_associated_token_address};
use anchor_spl::metadata::mpl_token_metadata;
use anchor_spl::token::{self, spl_token};
use bonding_curve::{
    derive_launch_addresses, find_metadata_address, CurveConfiguration, CurveError, FEE_RECIPIENT,
    UNIT,
};
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    account::Account,
    instruction::{Instruction, InstructionError},
    signature::Keypair,
    signer::Signer,
    transaction::{Transaction, TransactionError},
};

pub const CREATOR_FUNDS: u64 = 10 * UNIT;
pub const TRADER_FUNDS: u64 = 500 * UNIT;

fn process_instruction(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    // `entry` wants the slice and the infos to share one lifetime
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    bonding_curve::entry(program_id, accounts, data)
}

fn token_metadata_stand_in(
    _program_id: &Pubkey,
    accounts: &[AccountInfo],
    _data: &[u8],
) -> ProgramResult {
    let [metadata, mint, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    let expected = find_metadata_address(mint.key).map_err(|_| ProgramError::InvalidSeeds)?;
    if *metadata.key != expected {
        return Err(ProgramError::InvalidSeeds);
    }
    Ok(())
}

fn system_account(lamports: u64) -> Account {
    Account::new(lamports, 0, &system_program::ID)
}

pub struct Harness {
    pub context: ProgramTestContext,
}

impl Harness {
    /// Fresh chain with a funded creator and trader
    pub async fn start() -> (Self, Keypair, Keypair) {
        let mut program_test = ProgramTest::new(
            "bonding_curve",
            bonding_curve::ID,
            processor!(process_instruction),
        );
        program_test.prefer_bpf(false);
        program_test.add_program(
            "mpl_token_metadata",
            mpl_token_metadata::ID,
            processor!(token_metadata_stand_in),
        );

        let creator = Keypair::new();
        let trader = Keypair::new();
        program_test.add_account(FEE_RECIPIENT, system_account(UNIT));
        program_test.add_account(creator.pubkey(), system_account(CREATOR_FUNDS));
        program_test.add_account(trader.pubkey(), system_account(TRADER_FUNDS));

        let context = program_test.start_with_context().await;
        (Self { context }, creator, trader)
    }

    /// Send one instruction; the harness payer covers the transaction fee
    pub async fn send(
        &mut self,
        instruction: Instruction,
        signers: &[&Keypair],
    ) -> Result<(), BanksClientError> {
        // Fresh blockhash so a retried instruction is a new transaction
        let blockhash = self.context.get_new_latest_blockhash().await?;
        let payer = &self.context.payer;
        let mut keypairs = vec![payer];
        keypairs.extend_from_slice(signers);

        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&payer.pubkey()),
            keypairs.as_slice(),
            blockhash,
        );
        self.context.banks_client.process_transaction(transaction).await
    }

    pub async fn lamports(&mut self, address: Pubkey) -> u64 {
        self.context.banks_client.get_balance(address).await.unwrap()
    }

    pub async fn exists(&mut self, address: Pubkey) -> bool {
        self.context
            .banks_client
            .get_account(address)
            .await
            .unwrap()
            .is_some()
    }

    async fn account(&mut self, address: Pubkey) -> Account {
        self.context
            .banks_client
            .get_account(address)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("account {address} does not exist"))
    }

    pub async fn token_balance(&mut self, address: Pubkey) -> u64 {
        let account = self.account(address).await;
        spl_token::state::Account::unpack(&account.data).unwrap().amount
    }

    pub async fn mint(&mut self, address: Pubkey) -> spl_token::state::Mint {
        let account = self.account(address).await;
        spl_token::state::Mint::unpack(&account.data).unwrap()
    }

    pub async fn curve_state(&mut self, curve: Pubkey) -> CurveConfiguration {
        let account = self.account(curve).await;
        CurveConfiguration::try_deserialize(&mut account.data.as_slice()).unwrap()
    }

    pub async fn rent_exempt(&mut self, size: usize) -> u64 {
        self.context
            .banks_client
            .get_rent()
            .await
            .unwrap()
            .minimum_balance(size)
    }
}

/// Addresses of one launch and builders for its instructions
pub struct Launch {
    pub creator: Pubkey,
    pub mint: Pubkey,
    pub curve: Pubkey,
    pub curve_bump: u8,
    pub curve_ata: Pubkey,
    pub metadata: Pubkey,
}

impl Launch {
    pub fn derive(creator: &Pubkey, name: &str) -> Self {
        let addresses =
            derive_launch_addresses(creator, name, &bonding_curve::ID, &token::ID).unwrap();
        Self {
            creator: *creator,
            mint: addresses.mint,
            curve: addresses.curve,
            curve_bump: addresses.curve_bump,
            curve_ata: addresses.curve_token_account,
            metadata: addresses.metadata,
        }
    }

    pub fn token_account(&self, holder: &Pubkey) -> Pubkey {
        get_associated_token_address(holder, &self.mint)
    }

    pub fn initialize(&self, name: &str, symbol: &str, uri: &str) -> Instruction {
        Instruction {
            program_id: bonding_curve::ID,
            accounts: bonding_curve::accounts::Initialize {
                creator: self.creator,
                mint: self.mint,
                curve_config: self.curve,
                curve_ata: self.curve_ata,
                metadata: self.metadata,
                token_metadata_program: mpl_token_metadata::ID,
                token_program: token::ID,
                associated_token_program: associated_token::ID,
                system_program: system_program::ID,
                rent: sysvar::rent::ID,
            }
            .to_account_metas(None),
            data: bonding_curve::instruction::Initialize {
                name: name.to_string(),
                symbol: symbol.to_string(),
                uri: uri.to_string(),
            }
            .data(),
        }
    }

    fn trade_accounts(&self, trader: &Pubkey, fee_recipient: Pubkey) -> bonding_curve::accounts::Trade {
        bonding_curve::accounts::Trade {
            trader: *trader,
            mint: self.mint,
            curve_config: self.curve,
            curve_ata: self.curve_ata,
            trader_ata: self.token_account(trader),
            fee_recipient,
            token_program: token::ID,
            associated_token_program: associated_token::ID,
            system_program: system_program::ID,
        }
    }

    pub fn buy_with_fee_recipient(
        &self,
        trader: &Pubkey,
        fee_recipient: Pubkey,
        amount_in: u64,
        min_tokens_out: u64,
    ) -> Instruction {
        Instruction {
            program_id: bonding_curve::ID,
            accounts: self.trade_accounts(trader, fee_recipient).to_account_metas(None),
            data: bonding_curve::instruction::Buy {
                amount_in,
                min_tokens_out,
            }
            .data(),
        }
    }

    pub fn buy(&self, trader: &Pubkey, amount_in: u64, min_tokens_out: u64) -> Instruction {
        self.buy_with_fee_recipient(trader, FEE_RECIPIENT, amount_in, min_tokens_out)
    }

    pub fn sell(&self, trader: &Pubkey, amount_in: u64, min_base_out: u64) -> Instruction {
        Instruction {
            program_id: bonding_curve::ID,
            accounts: self.trade_accounts(trader, FEE_RECIPIENT).to_account_metas(None),
            data: bonding_curve::instruction::Sell {
                amount_in,
                min_base_out,
            }
            .data(),
        }
    }

    pub fn withdraw(&self, owner: &Pubkey) -> Instruction {
        Instruction {
            program_id: bonding_curve::ID,
            accounts: bonding_curve::accounts::Withdraw {
                owner: *owner,
                mint: self.mint,
                curve_config: self.curve,
                curve_ata: self.curve_ata,
                owner_ata: self.token_account(owner),
                token_program: token::ID,
                associated_token_program: associated_token::ID,
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: bonding_curve::instruction::Withdraw {}.data(),
        }
    }
}

/// Launch "Moon" for `creator`
pub async fn launch_token(harness: &mut Harness, creator: &Keypair) -> Launch {
    let launch = Launch::derive(&creator.pubkey(), "Moon");
    harness
        .send(
            launch.initialize("Moon", "MOON", "https://example.com/moon.json"),
            &[creator],
        )
        .await
        .unwrap();
    launch
}

pub fn assert_curve_error(result: Result<(), BanksClientError>, expected: CurveError) {
    match result.map_err(|err| err.unwrap()) {
        Err(TransactionError::InstructionError(0, InstructionError::Custom(code))) => {
            assert_eq!(code, u32::from(expected), "expected {expected:?}")
        }
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}

/// The error of a transaction whose only instruction failed
pub fn failed_instruction(result: Result<(), BanksClientError>) -> InstructionError {
    match result.map_err(|err| err.unwrap()) {
        Err(TransactionError::InstructionError(0, error)) => error,
        other => panic!("instruction should have failed, got {other:?}"),
    }
}
