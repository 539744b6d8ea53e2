use super::ui;
use crate::core::{Session, VaultClient, WalletProvider};
use anyhow::{Result, bail};
use tracing::info;

pub async fn run(
    wallet: &(dyn WalletProvider + Send + Sync),
    vault: &(dyn VaultClient + Send + Sync),
    amount: u64,
    currency: &str,
) -> Result<()> {
    if amount == 0 {
        bail!("Withdrawal amount must be greater than zero");
    }

    let mut session = Session::new();
    let account = session.connect(wallet).await?.to_string();

    info!("Withdrawing {amount} {currency} to {account}");
    let receipt = vault.withdraw(&account, amount).await?;
    let balance = session.refresh_balance(vault).await?;

    println!("Withdrew {amount} {currency} to {account}");
    let confirmation = match receipt.block_number {
        Some(block) => format!("Mined in block {} ({})", block, receipt.transaction_hash),
        None => format!("Transaction {}", receipt.transaction_hash),
    };
    println!("{}", ui::style_text(&confirmation, ui::StyleType::Subtle));
    println!(
        "Vault Balance ({}): {}",
        ui::style_text(currency, ui::StyleType::TotalLabel),
        ui::style_text(&balance.to_string(), ui::StyleType::TotalValue)
    );
    Ok(())
}
