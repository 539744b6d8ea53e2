//! Wallet and vault contract abstractions

use anyhow::Result;
use async_trait::async_trait;

/// Confirmation that a vault transaction was mined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: String,
    pub block_number: Option<u64>,
}

/// Access to the accounts exposed by a wallet endpoint.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Returns the accounts already exposed by the endpoint, without
    /// prompting for authorization.
    async fn accounts(&self) -> Result<Vec<String>>;

    /// Requests account authorization from the endpoint.
    async fn request_accounts(&self) -> Result<Vec<String>>;

    /// Returns the ether balance of `address` in wei.
    async fn account_balance(&self, address: &str) -> Result<u128>;
}

/// Pass-through calls to the deployed vault contract.
#[async_trait]
pub trait VaultClient: Send + Sync {
    async fn balance(&self) -> Result<u128>;

    async fn deposit(&self, from: &str, amount: u64) -> Result<Receipt>;

    async fn withdraw(&self, from: &str, amount: u64) -> Result<Receipt>;
}
