use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::cache::Cache;
use crate::core::vault::{Receipt, VaultClient, WalletProvider};

// Vault ABI function selectors (first 4 bytes of the keccak-256 signature hash).
const SELECTOR_GET_BALANCE: &str = "0x12065fe0"; // getBalance()
const SELECTOR_DEPOSIT: &str = "0xb6b55f25"; // deposit(uint256)
const SELECTOR_WITHDRAW: &str = "0x2e1a7d4d"; // withdraw(uint256)

const RECEIPT_POLL_ATTEMPTS: usize = 20;
const RECEIPT_POLL_DELAY_MS: u64 = 250;

#[derive(Deserialize, Debug)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize, Debug)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Deserialize, Debug)]
struct TransactionReceipt {
    #[serde(rename = "transactionHash")]
    transaction_hash: String,
    #[serde(rename = "blockNumber")]
    block_number: Option<String>,
}

/// Sends a single JSON-RPC request. `Ok(None)` is a successful call whose
/// result was JSON null (e.g. a receipt that is not available yet).
async fn rpc_call<T: serde::de::DeserializeOwned>(
    base_url: &str,
    method: &str,
    params: Value,
) -> Result<Option<T>> {
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });
    debug!("Sending {} to {}", method, base_url);

    let client = reqwest::Client::builder().user_agent("sipvault/0.1").build()?;
    let response = client
        .post(base_url)
        .json(&body)
        .send()
        .await
        .map_err(|e| anyhow!("Request error: {} for method: {} URL: {}", e, method, base_url))?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "HTTP error: {} for method: {}",
            response.status(),
            method
        ));
    }

    let rpc: RpcResponse<T> = response
        .json()
        .await
        .map_err(|e| anyhow!("Failed to parse JSON-RPC response for {}: {}", method, e))?;

    if let Some(error) = rpc.error {
        return Err(anyhow!(
            "RPC error {} for method {}: {}",
            error.code,
            method,
            error.message
        ));
    }

    Ok(rpc.result)
}

/// Left-pads a uint256 call argument to a 32-byte word.
fn encode_amount(amount: u64) -> String {
    format!("{amount:064x}")
}

/// Decodes a hex quantity ("0x1a") or a 32-byte return word into an integer.
fn decode_quantity(hex: &str) -> Result<u128> {
    let digits = hex.trim_start_matches("0x").trim_start_matches('0');
    if digits.is_empty() {
        return Ok(0);
    }
    if digits.len() > 32 {
        return Err(anyhow!("Quantity out of range: {}", hex));
    }
    u128::from_str_radix(digits, 16).map_err(|e| anyhow!("Invalid hex quantity '{}': {}", hex, e))
}

// EthRpcProvider implementation for WalletProvider
pub struct EthRpcProvider {
    base_url: String,
    accounts_cache: Arc<Cache<String, Vec<String>>>,
}

impl EthRpcProvider {
    pub fn new(base_url: &str, accounts_cache: Arc<Cache<String, Vec<String>>>) -> Self {
        EthRpcProvider {
            base_url: base_url.to_string(),
            accounts_cache,
        }
    }
}

#[async_trait]
impl WalletProvider for EthRpcProvider {
    async fn accounts(&self) -> Result<Vec<String>> {
        if let Some(cached) = self.accounts_cache.get(&self.base_url).await {
            return Ok(cached);
        }

        let accounts: Vec<String> = rpc_call(&self.base_url, "eth_accounts", json!([]))
            .await?
            .ok_or_else(|| anyhow!("Empty result for eth_accounts"))?;

        self.accounts_cache
            .put(self.base_url.clone(), accounts.clone())
            .await;
        Ok(accounts)
    }

    async fn request_accounts(&self) -> Result<Vec<String>> {
        let accounts: Vec<String> = rpc_call(&self.base_url, "eth_requestAccounts", json!([]))
            .await?
            .ok_or_else(|| anyhow!("Empty result for eth_requestAccounts"))?;

        self.accounts_cache
            .put(self.base_url.clone(), accounts.clone())
            .await;
        Ok(accounts)
    }

    async fn account_balance(&self, address: &str) -> Result<u128> {
        let wei: String = rpc_call(&self.base_url, "eth_getBalance", json!([address, "latest"]))
            .await?
            .ok_or_else(|| anyhow!("Empty result for eth_getBalance of {}", address))?;
        decode_quantity(&wei)
    }
}

// EthRpcVault implementation for VaultClient
pub struct EthRpcVault {
    base_url: String,
    contract_address: String,
}

impl EthRpcVault {
    pub fn new(base_url: &str, contract_address: &str) -> Self {
        EthRpcVault {
            base_url: base_url.to_string(),
            contract_address: contract_address.to_string(),
        }
    }

    #[instrument(
        name = "VaultTransaction",
        skip(self, selector),
        fields(from = %from, amount = amount)
    )]
    async fn send_vault_tx(&self, from: &str, selector: &str, amount: u64) -> Result<Receipt> {
        let data = format!("{}{}", selector, encode_amount(amount));
        let tx = json!([{
            "from": from,
            "to": self.contract_address,
            "data": data,
        }]);

        let tx_hash: String = rpc_call(&self.base_url, "eth_sendTransaction", tx)
            .await?
            .ok_or_else(|| anyhow!("Empty result for eth_sendTransaction"))?;
        debug!("Transaction sent: {tx_hash}");

        self.wait_for_receipt(&tx_hash).await
    }

    async fn wait_for_receipt(&self, tx_hash: &str) -> Result<Receipt> {
        for attempt in 1..=RECEIPT_POLL_ATTEMPTS {
            let receipt: Option<TransactionReceipt> = rpc_call(
                &self.base_url,
                "eth_getTransactionReceipt",
                json!([tx_hash]),
            )
            .await?;

            if let Some(receipt) = receipt {
                let block_number = receipt
                    .block_number
                    .as_deref()
                    .map(decode_quantity)
                    .transpose()?
                    .map(|n| n as u64);
                return Ok(Receipt {
                    transaction_hash: receipt.transaction_hash,
                    block_number,
                });
            }

            debug!(
                "Receipt not available for {} (attempt {}/{}). Retrying...",
                tx_hash, attempt, RECEIPT_POLL_ATTEMPTS
            );
            if attempt < RECEIPT_POLL_ATTEMPTS {
                tokio::time::sleep(Duration::from_millis(RECEIPT_POLL_DELAY_MS)).await;
            }
        }

        Err(anyhow!(
            "Transaction {} was not mined after {} receipt checks",
            tx_hash,
            RECEIPT_POLL_ATTEMPTS
        ))
    }
}

#[async_trait]
impl VaultClient for EthRpcVault {
    async fn balance(&self) -> Result<u128> {
        let call = json!([{
            "to": self.contract_address,
            "data": SELECTOR_GET_BALANCE,
        }, "latest"]);

        let word: String = rpc_call(&self.base_url, "eth_call", call)
            .await?
            .ok_or_else(|| anyhow!("Empty result for eth_call to {}", self.contract_address))?;
        decode_quantity(&word)
    }

    async fn deposit(&self, from: &str, amount: u64) -> Result<Receipt> {
        self.send_vault_tx(from, SELECTOR_DEPOSIT, amount).await
    }

    async fn withdraw(&self, from: &str, amount: u64) -> Result<Receipt> {
        self.send_vault_tx(from, SELECTOR_WITHDRAW, amount).await
    }
}
