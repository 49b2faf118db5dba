use std::collections::BTreeMap;

use alloy_primitives::{keccak256, Address, BlockHash, Log, TxHash, B256, U256};

use crate::{RecordedLog, StateDb};

/// Balance and nonce of an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountInfo {
    /// Balance in wei.
    pub balance: U256,
    /// Account nonce.
    pub nonce: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LogRecord {
    tx_hash: TxHash,
    block_hash: BlockHash,
    tx_index: usize,
}

/// An in-memory [`StateDb`] for testing purposes.
///
/// The state commitment is the keccak256 of all accounts in address order. Logs are attributed
/// to the context set by the last [`StateDb::start_record`] call; the block-wide log index
/// restarts whenever the block hash of the context changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryState {
    accounts: BTreeMap<Address, AccountInfo>,
    logs: BTreeMap<TxHash, Vec<RecordedLog>>,
    record: LogRecord,
    log_index: usize,
}

impl MemoryState {
    /// Sets the balance of an account.
    pub fn set_account_balance(&mut self, address: Address, balance: U256) {
        self.accounts.entry(address).or_default().balance = balance;
    }

    /// Sets the balance of an account.
    pub fn account_balance(mut self, address: Address, balance: U256) -> Self {
        self.set_account_balance(address, balance);
        self
    }

    /// Sets the nonce of an account.
    pub fn set_account_nonce(&mut self, address: Address, nonce: u64) {
        self.accounts.entry(address).or_default().nonce = nonce;
    }

    /// Sets the nonce of an account.
    pub fn account_nonce(mut self, address: Address, nonce: u64) -> Self {
        self.set_account_nonce(address, nonce);
        self
    }

    /// Returns the account at `address`, if it exists.
    pub fn account(&self, address: Address) -> Option<&AccountInfo> {
        self.accounts.get(&address)
    }

    /// The balance of an account, zero if it does not exist.
    pub fn balance(&self, address: Address) -> U256 {
        self.account(address).map(|account| account.balance).unwrap_or_default()
    }

    /// The nonce of an account, zero if it does not exist.
    pub fn nonce(&self, address: Address) -> u64 {
        self.account(address).map(|account| account.nonce).unwrap_or_default()
    }

    /// Debits `amount` from an account. Returns `false`, leaving the account untouched, if the
    /// balance is too low.
    pub fn sub_balance(&mut self, address: Address, amount: U256) -> bool {
        let account = self.accounts.entry(address).or_default();
        match account.balance.checked_sub(amount) {
            Some(balance) => {
                account.balance = balance;
                true
            }
            None => false,
        }
    }

    /// Increments the nonce of an account.
    pub fn increment_nonce(&mut self, address: Address) {
        let account = self.accounts.entry(address).or_default();
        account.nonce += 1;
    }

    /// Records a log in the current context.
    pub fn add_log(&mut self, log: Log) {
        let LogRecord { tx_hash, block_hash, tx_index } = self.record;
        self.logs.entry(tx_hash).or_default().push(RecordedLog {
            inner: log,
            tx_hash,
            block_hash,
            tx_index,
            log_index: self.log_index,
        });
        self.log_index += 1;
    }
}

impl StateDb for MemoryState {
    fn add_balance(&mut self, address: Address, amount: U256) {
        let account = self.accounts.entry(address).or_default();
        account.balance = account.balance.saturating_add(amount);
    }

    fn start_record(&mut self, tx_hash: TxHash, block_hash: BlockHash, tx_index: usize) {
        if self.record.block_hash != block_hash {
            self.log_index = 0;
        }
        self.record = LogRecord { tx_hash, block_hash, tx_index };
    }

    fn logs(&self, tx_hash: TxHash) -> Vec<RecordedLog> {
        self.logs.get(&tx_hash).cloned().unwrap_or_default()
    }

    fn intermediate_root(&mut self) -> B256 {
        let mut buf = Vec::with_capacity(self.accounts.len() * 60);
        for (address, account) in &self.accounts {
            buf.extend_from_slice(address.as_slice());
            buf.extend_from_slice(&account.nonce.to_be_bytes());
            buf.extend_from_slice(&account.balance.to_be_bytes::<32>());
        }
        keccak256(&buf)
    }
}
