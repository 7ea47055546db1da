use std::thread;

use anchor_lang::prelude::Pubkey;
use bonding_curve::{CurveError, CurveStatus, TOKEN_TOTAL_SUPPLY, UNIT};
use curve_ledger::{Launchpad, LedgerError};

const THREADS: usize = 8;

#[test]
fn test_concurrent_buys_on_one_curve_are_serialised() {
    const BUYS_PER_THREAD: usize = 25;
    let launchpad = Launchpad::new();
    let receipt = launchpad
        .initialize(Pubkey::new_unique(), "Moon", "MOON", "")
        .unwrap();
    let k = launchpad.get_state(&receipt.curve).unwrap().invariant().unwrap();

    let tokens_bought: u64 = thread::scope(|scope| {
        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    let buyer = Pubkey::new_unique();
                    (0..BUYS_PER_THREAD)
                        .map(|_| {
                            launchpad
                                .buy(&receipt.curve, buyer, UNIT / 10, 0)
                                .unwrap()
                                .tokens_out
                        })
                        .sum::<u64>()
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).sum()
    });

    let snapshot = launchpad.snapshot(&receipt.curve).unwrap();
    let buys = (THREADS * BUYS_PER_THREAD) as u64;
    assert_eq!(snapshot.version, buys);

    // 1% of 0.1 SOL is exact, so every buy adds the same amount
    assert_eq!(snapshot.state.real_base_reserve, buys * 99_000_000);
    assert_eq!(snapshot.state.real_token_reserve, TOKEN_TOTAL_SUPPLY - tokens_bought);
    assert_eq!(snapshot.balances.circulating(), tokens_bought as u128);
    assert!(snapshot.state.invariant().unwrap() <= k);
    assert_eq!(snapshot.state.status, CurveStatus::Trading);
}

#[test]
fn test_independent_curves_settle_identically() {
    let launchpad = Launchpad::new();
    let curves: Vec<_> = (0..THREADS)
        .map(|_| {
            launchpad
                .initialize(Pubkey::new_unique(), "Moon", "MOON", "")
                .unwrap()
                .curve
        })
        .collect();

    thread::scope(|scope| {
        for curve in &curves {
            let launchpad = &launchpad;
            scope.spawn(move || {
                let trader = Pubkey::new_unique();
                for _ in 0..10 {
                    launchpad.buy(curve, trader, UNIT, 0).unwrap();
                }
                let bought = TOKEN_TOTAL_SUPPLY
                    - launchpad.get_state(curve).unwrap().real_token_reserve;
                launchpad.sell(curve, trader, bought / 3, 0).unwrap();
            });
        }
    });

    // Same trades on the same launch parameters give the same reserves
    let reserves: Vec<_> = curves
        .iter()
        .map(|curve| {
            let snapshot = launchpad.snapshot(curve).unwrap();
            assert_eq!(snapshot.version, 11);
            assert_eq!(
                snapshot.balances.circulating() + snapshot.state.real_token_reserve as u128,
                TOKEN_TOTAL_SUPPLY as u128
            );
            let state = snapshot.state;
            (
                state.virtual_base_reserve,
                state.virtual_token_reserve,
                state.real_base_reserve,
                state.real_token_reserve,
            )
        })
        .collect();
    assert!(reserves.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_only_one_buy_graduates_the_curve() {
    let launchpad = Launchpad::new();
    let receipt = launchpad
        .initialize(Pubkey::new_unique(), "Moon", "MOON", "")
        .unwrap();
    // 84.9 SOL real reserve; any further 1 SOL buy crosses 85 SOL
    launchpad
        .buy(&receipt.curve, Pubkey::new_unique(), 85_757_575_757, 0)
        .unwrap();

    let results: Vec<_> = thread::scope(|scope| {
        let workers: Vec<_> = (0..THREADS)
            .map(|_| scope.spawn(|| launchpad.buy(&receipt.curve, Pubkey::new_unique(), UNIT, 0)))
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    let fills: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(fills.len(), 1);
    assert!(fills[0].graduated);
    assert_eq!(fills[0].version, 2);
    assert_eq!(
        results.iter().filter(|r| r.is_err()).count(),
        THREADS - 1
    );
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|err| *err == LedgerError::Rejected(CurveError::AlreadyGraduated)));

    let snapshot = launchpad.snapshot(&receipt.curve).unwrap();
    assert_eq!(snapshot.version, 2);
    assert_eq!(snapshot.state.real_base_reserve, 85_890_000_000);
    assert_eq!(snapshot.state.status, CurveStatus::Graduated);
}

#[test]
fn test_pinned_writers_race_for_one_version() {
    let launchpad = Launchpad::new();
    let receipt = launchpad
        .initialize(Pubkey::new_unique(), "Moon", "MOON", "")
        .unwrap();
    let seen = launchpad.snapshot(&receipt.curve).unwrap();

    let results: Vec<_> = thread::scope(|scope| {
        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    launchpad.buy_if_unchanged(
                        &receipt.curve,
                        Pubkey::new_unique(),
                        UNIT,
                        0,
                        seen.version,
                    )
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().filter_map(|r| r.as_ref().err()).all(|err| matches!(
        err,
        LedgerError::StaleSnapshot { expected: 0, found: 1, .. }
    )));
    assert_eq!(launchpad.snapshot(&receipt.curve).unwrap().version, 1);
}
