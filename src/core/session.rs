//! Wallet session state
//!
//! A `Session` is the single place the connected account and the last
//! observed vault balance live. Commands build one, update it through the
//! operations below and render from it; operations that need an account
//! fail with a "not connected" error instead of silently doing nothing.

use crate::core::vault::{VaultClient, WalletProvider};
use anyhow::{Result, anyhow, bail};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct Session {
    account: Option<String>,
    vault_balance: Option<u128>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Connects interactively: asks the wallet to authorize accounts and
    /// adopts the first one.
    pub async fn connect(&mut self, wallet: &dyn WalletProvider) -> Result<&str> {
        let accounts = wallet.request_accounts().await?;
        self.adopt(accounts)
    }

    /// Attaches passively: uses the accounts the wallet already exposes,
    /// without prompting for authorization.
    pub async fn attach(&mut self, wallet: &dyn WalletProvider) -> Result<&str> {
        let accounts = wallet.accounts().await?;
        self.adopt(accounts)
    }

    /// The connected account, or a "not connected" error.
    pub fn account(&self) -> Result<&str> {
        self.account
            .as_deref()
            .ok_or_else(|| anyhow!("No wallet account connected"))
    }

    /// Re-reads the vault balance. Requires a connected account.
    pub async fn refresh_balance(&mut self, vault: &dyn VaultClient) -> Result<u128> {
        self.account()?;
        let balance = vault.balance().await?;
        debug!("Vault balance refreshed: {balance}");
        self.vault_balance = Some(balance);
        Ok(balance)
    }

    /// The vault balance from the last refresh, if any.
    pub fn vault_balance(&self) -> Option<u128> {
        self.vault_balance
    }

    fn adopt(&mut self, accounts: Vec<String>) -> Result<&str> {
        let Some(account) = accounts.into_iter().next() else {
            bail!("Wallet returned no accounts");
        };
        info!("Account connected: {account}");
        self.account = Some(account);
        self.account()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vault::Receipt;
    use async_trait::async_trait;

    struct MockWallet {
        accounts: Vec<String>,
    }

    #[async_trait]
    impl WalletProvider for MockWallet {
        async fn accounts(&self) -> Result<Vec<String>> {
            Ok(self.accounts.clone())
        }

        async fn request_accounts(&self) -> Result<Vec<String>> {
            Ok(self.accounts.clone())
        }

        async fn account_balance(&self, _address: &str) -> Result<u128> {
            Ok(0)
        }
    }

    struct MockVault {
        balance: u128,
    }

    #[async_trait]
    impl VaultClient for MockVault {
        async fn balance(&self) -> Result<u128> {
            Ok(self.balance)
        }

        async fn deposit(&self, _from: &str, _amount: u64) -> Result<Receipt> {
            unimplemented!("not exercised")
        }

        async fn withdraw(&self, _from: &str, _amount: u64) -> Result<Receipt> {
            unimplemented!("not exercised")
        }
    }

    #[tokio::test]
    async fn connect_adopts_first_account() {
        let wallet = MockWallet {
            accounts: vec!["0xabc".to_string(), "0xdef".to_string()],
        };
        let mut session = Session::new();

        let account = session.connect(&wallet).await.unwrap().to_string();
        assert_eq!(account, "0xabc");
        assert_eq!(session.account().unwrap(), "0xabc");
    }

    #[tokio::test]
    async fn attach_fails_when_wallet_has_no_accounts() {
        let wallet = MockWallet { accounts: vec![] };
        let mut session = Session::new();

        let result = session.attach(&wallet).await;
        assert!(result.is_err());
        assert!(session.account().is_err());
    }

    #[tokio::test]
    async fn refresh_balance_requires_connection() {
        let vault = MockVault { balance: 42 };
        let mut session = Session::new();

        let result = session.refresh_balance(&vault).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No wallet account connected"
        );
        assert!(session.vault_balance().is_none());
    }

    #[tokio::test]
    async fn refresh_balance_updates_session() {
        let wallet = MockWallet {
            accounts: vec!["0xabc".to_string()],
        };
        let vault = MockVault { balance: 42 };
        let mut session = Session::new();

        session.attach(&wallet).await.unwrap();
        let balance = session.refresh_balance(&vault).await.unwrap();
        assert_eq!(balance, 42);
        assert_eq!(session.vault_balance(), Some(42));
    }
}
