//! Benchmarks for `StateProcessor::process()`.
//!
//! Measures block processing with the value transfer engine, for blocks of unprotected and
//! replay protected transfers and for the uncle reward path.
#![allow(missing_docs)]

use std::{collections::BTreeMap, sync::Arc};

use alloy_primitives::{address, Address, BlockHash, BlockNumber, TxKind, U256};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use state_processor::{
    test_utils::{header, MemoryState, TestSigner, TransferEngine, TX_GAS},
    Block, BlockProcessor, ChainConfig, StateProcessor, Transaction, CLASSIC_MAINNET_CHAIN_ID,
};

const MINER: Address = address!("0x0000000000000000000000000000000000100000");
const RECIPIENT: Address = address!("0x0000000000000000000000000000000000100001");
const DIEHARD_BLOCK: u64 = 3_000_000;

/// Creates a block of `count` signed transfers from a single sender.
fn transfer_block(
    signer: &TestSigner,
    number: u64,
    count: u64,
    chain_id: Option<u64>,
) -> Block {
    let txs = (0..count)
        .map(|nonce| {
            let tx = Transaction {
                nonce,
                gas_price: 1_000_000_000,
                gas_limit: TX_GAS,
                to: TxKind::Call(RECIPIENT),
                value: U256::from(1),
                ..Default::default()
            };
            signer.sign(tx, chain_id)
        })
        .collect();
    Block::new(header(number, MINER, count * TX_GAS), txs, vec![])
}

/// Benchmark blocks of transfers before and after EIP-155 activation.
fn bench_transfer_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer_block");
    let signer = TestSigner::from_seed(1);
    let processor = StateProcessor::new(
        Arc::new(ChainConfig::classic_mainnet()),
        BTreeMap::<BlockNumber, BlockHash>::new(),
        TransferEngine::default(),
    );
    let pre_state = MemoryState::default()
        .account_balance(signer.address(), U256::from(10).pow(U256::from(18)));

    for count in [1, 10, 100] {
        for (name, number, chain_id) in [
            ("basic", DIEHARD_BLOCK - 1, None),
            ("eip155", DIEHARD_BLOCK, Some(CLASSIC_MAINNET_CHAIN_ID)),
        ] {
            let block = transfer_block(&signer, number, count, chain_id);
            group.bench_with_input(BenchmarkId::new(name, count), &block, |b, block| {
                b.iter(|| {
                    let mut state = pre_state.clone();
                    let output = processor
                        .process(black_box(block), &mut state)
                        .expect("block should be valid");
                    black_box(output)
                })
            });
        }
    }

    group.finish();
}

/// Benchmark reward accumulation for an empty block with two uncles.
fn bench_uncle_rewards(c: &mut Criterion) {
    let processor = StateProcessor::new(
        Arc::new(ChainConfig::classic_mainnet()),
        BTreeMap::<BlockNumber, BlockHash>::new(),
        TransferEngine::default(),
    );
    let ommers = vec![
        header(99, address!("0x0000000000000000000000000000000000200000"), 0),
        header(98, address!("0x0000000000000000000000000000000000200001"), 0),
    ];
    let block = Block::new(header(100, MINER, 0), vec![], ommers);

    c.bench_function("uncle_rewards", |b| {
        b.iter(|| {
            let mut state = MemoryState::default();
            let output =
                processor.process(black_box(&block), &mut state).expect("block should be valid");
            black_box(output)
        })
    });
}

criterion_group!(benches, bench_transfer_blocks, bench_uncle_rewards);
criterion_main!(benches);
