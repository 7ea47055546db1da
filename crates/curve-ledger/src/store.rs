//! Keyed curve store
//!
//! ```text
//!   RwLock<HashMap<curve address, Arc<Mutex<VersionedCurve>>>>
//!          │                            │
//!          │ write: insert only         │ one writer per curve
//!          │ read: lookup               │ clone → apply → commit, version += 1
//! ```
//!
//! Updates to different curves only share the read side of the map and run
//! in parallel. Updates to one curve are serialised by its mutex; a caller
//! that pins the version it read is rejected if someone else committed first.
//!
//! Each record carries the token balances of the curve's holders next to the
//! curve state, so a trade settles reserves and holdings in one commit.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use anchor_lang::prelude::Pubkey;
use bonding_curve::{CurveConfiguration, CurveError};
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};

/// Tokens of one curve held outside the curve, by holder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBalances {
    holdings: HashMap<Pubkey, u64>,
}

impl TokenBalances {
    pub fn balance_of(&self, holder: &Pubkey) -> u64 {
        self.holdings.get(holder).copied().unwrap_or(0)
    }

    /// Sum over all holders
    pub fn circulating(&self) -> u128 {
        self.holdings.values().map(|amount| *amount as u128).sum()
    }

    pub fn credit(&mut self, holder: Pubkey, amount: u64) -> LedgerResult<()> {
        let balance = self.holdings.entry(holder).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(CurveError::MathOverflow)?;
        Ok(())
    }

    pub fn debit(&mut self, holder: Pubkey, amount: u64) -> LedgerResult<()> {
        let balance = self.balance_of(&holder);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                holder,
                balance,
                requested: amount,
            })?;

        if remaining == 0 {
            self.holdings.remove(&holder);
        } else {
            self.holdings.insert(holder, remaining);
        }
        Ok(())
    }
}

/// A curve record, its holders and the number of updates committed to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedCurve {
    pub version: u64,
    pub state: CurveConfiguration,
    pub balances: TokenBalances,
}

type Record = Arc<Mutex<VersionedCurve>>;

#[derive(Debug, Default)]
pub struct CurveLedger {
    records: RwLock<HashMap<Pubkey, Record>>,
}

impl CurveLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store a freshly launched curve at version 0 with no holders
    pub fn insert(&self, address: Pubkey, state: CurveConfiguration) -> LedgerResult<()> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        match records.entry(address) {
            Entry::Occupied(_) => Err(CurveError::DuplicateInitialization.into()),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(VersionedCurve {
                    version: 0,
                    state,
                    balances: TokenBalances::default(),
                })));
                Ok(())
            }
        }
    }

    fn record(&self, address: &Pubkey) -> LedgerResult<Record> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(address)
            .cloned()
            .ok_or(LedgerError::Rejected(CurveError::RecordNotFound))
    }

    /// Consistent copy of one record
    pub fn snapshot(&self, address: &Pubkey) -> LedgerResult<VersionedCurve> {
        let record = self.record(address)?;
        let current = record.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(current.clone())
    }

    /// Apply `apply` to a copy of the record and commit it if it succeeds.
    ///
    /// With `expected_version` set, the update only runs if no other write
    /// landed since that version. Returns the closure's output and the new
    /// version. A failed closure leaves the record untouched.
    pub fn update<T, F>(
        &self,
        address: &Pubkey,
        expected_version: Option<u64>,
        apply: F,
    ) -> LedgerResult<(T, u64)>
    where
        F: FnOnce(&mut CurveConfiguration, &mut TokenBalances) -> LedgerResult<T>,
    {
        let record = self.record(address)?;
        // Commits only swap in fully applied copies, so a poisoned record is still consistent
        let mut current = record.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(expected) = expected_version {
            if expected != current.version {
                warn!(
                    curve = %address,
                    expected,
                    found = current.version,
                    "stale curve snapshot"
                );
                return Err(LedgerError::StaleSnapshot {
                    curve: *address,
                    expected,
                    found: current.version,
                });
            }
        }

        let mut state = current.state.clone();
        let mut balances = current.balances.clone();
        let output = apply(&mut state, &mut balances)?;

        current.state = state;
        current.balances = balances;
        current.version += 1;
        debug!(curve = %address, version = current.version, "curve updated");

        Ok((output, current.version))
    }
}
