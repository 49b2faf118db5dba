use alloy_consensus::{Eip658Value, Header};
use tracing::debug;

use crate::{
    logs_bloom, ChainConfig, ExecutionEngine, ExecutionEnv, GasPool, ProcessErrorKind, Receipt,
    StateDb, Transaction, ValidationError,
};

/// Applies one transaction to `state` and builds its receipt.
///
/// The sender is recovered with the signer scheme active at `header.number`, then the message
/// is executed by `engine`, drawing gas from `gas_pool`. On success the gas used by the
/// transaction is added to `gas_used`, which holds the running total of the block, and the
/// receipt and the gas used by the transaction are returned.
///
/// Gas reported by `engine` beyond the transaction gas limit rejects the transaction.
///
/// Logs are collected by transaction hash, so the caller must have started the log record of
/// the transaction with [`StateDb::start_record`].
#[allow(clippy::too_many_arguments)]
pub fn apply_transaction<S, C, E>(
    config: &ChainConfig,
    chain: &C,
    engine: &E,
    gas_pool: &mut GasPool,
    state: &mut S,
    header: &Header,
    tx: &Transaction,
    gas_used: &mut u64,
) -> Result<(Receipt, u64), ProcessErrorKind<E::Error>>
where
    S: StateDb + ?Sized,
    C: ?Sized,
    E: ExecutionEngine<S, C> + ?Sized,
{
    let signer = config.signer_at(header.number);
    let sender = tx.recover_signer(signer).map_err(ValidationError::from)?;

    let env = ExecutionEnv { state: &mut *state, config, chain, header, sender, signer };
    let tx_gas_used =
        engine.apply_message(env, tx, gas_pool).map_err(ProcessErrorKind::Execution)?;
    if tx_gas_used > tx.gas_limit {
        return Err(ProcessErrorKind::GasLimitExceeded {
            gas_used: tx_gas_used,
            gas_limit: tx.gas_limit,
        });
    }
    *gas_used = gas_used.saturating_add(tx_gas_used);

    let tx_hash = tx.hash();
    let root = state.intermediate_root();
    let logs = state.logs(tx_hash);
    let receipt = Receipt {
        tx_hash,
        status: Eip658Value::PostState(root),
        cumulative_gas_used: *gas_used,
        gas_used: tx_gas_used,
        logs_bloom: logs_bloom(logs.iter().map(|log| &log.inner)),
        logs,
        contract_address: tx.is_create().then(|| sender.create(tx.nonce)),
    };

    debug!(
        target: "state_processor",
        %tx_hash,
        %sender,
        gas_used = tx_gas_used,
        cumulative_gas_used = receipt.cumulative_gas_used,
        contract_address = ?receipt.contract_address,
        logs = receipt.logs.len(),
        %root,
        "Built receipt"
    );

    Ok((receipt, tx_gas_used))
}
