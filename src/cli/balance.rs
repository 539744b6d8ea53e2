use super::ui;
use crate::core::{Session, VaultClient, WalletProvider};
use anyhow::Result;
use comfy_table::Cell;
use futures::future::join_all;
use tracing::{debug, info};

const WEI_PER_ETHER: f64 = 1e18;

struct AccountBalance {
    address: String,
    wei: Option<u128>,
    error: Option<String>,
}

pub async fn run(
    wallet: &(dyn WalletProvider + Send + Sync),
    vault: &(dyn VaultClient + Send + Sync),
    currency: &str,
) -> Result<()> {
    let mut session = Session::new();
    session.attach(wallet).await?;
    info!("Using account {}", session.account()?);

    let accounts = wallet.accounts().await?;

    // Step 1: Fetch all account balances concurrently
    let pb = ui::new_progress_bar(accounts.len() as u64);
    let balance_futures = accounts.into_iter().map(|address| {
        let pb_clone = pb.clone();
        async move {
            let result = wallet.account_balance(&address).await;
            pb_clone.inc(1);
            (address, result)
        }
    });
    let results: Vec<(String, Result<u128>)> = join_all(balance_futures).await;
    pb.finish_and_clear();

    let balances: Vec<AccountBalance> = results
        .into_iter()
        .map(|(address, result)| match result {
            Ok(wei) => AccountBalance {
                address,
                wei: Some(wei),
                error: None,
            },
            Err(e) => {
                debug!("Balance fetch error for {}: {}", address, e);
                AccountBalance {
                    address,
                    wei: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    // Step 2: The vault balance requires the connected account
    let vault_balance = session.refresh_balance(vault).await;

    display_balances(&balances, &vault_balance, currency);
    Ok(())
}

fn format_ether(wei: u128) -> String {
    format!("{:.4}", wei as f64 / WEI_PER_ETHER)
}

fn display_balances(balances: &[AccountBalance], vault_balance: &Result<u128>, currency: &str) {
    println!(
        "\n{}",
        ui::style_text("Wallet Accounts", ui::StyleType::Title)
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Account"),
        ui::header_cell(&format!("Balance ({currency})")),
    ]);

    for balance in balances {
        let cell = match balance.wei {
            Some(wei) => ui::amount_cell(format_ether(wei)),
            None => ui::na_cell(balance.error.is_some()),
        };
        table.add_row(vec![Cell::new(&balance.address), cell]);
    }
    println!("{table}");

    for balance in balances {
        if let Some(error) = &balance.error {
            println!(
                "{}",
                ui::style_text(&format!("{}: {}", balance.address, error), ui::StyleType::Error)
            );
        }
    }

    ui::print_separator();
    match vault_balance {
        Ok(value) => println!(
            "Vault Balance ({}): {}",
            ui::style_text(currency, ui::StyleType::TotalLabel),
            ui::style_text(&value.to_string(), ui::StyleType::TotalValue)
        ),
        Err(e) => println!(
            "Vault Balance ({}): {}",
            ui::style_text(currency, ui::StyleType::TotalLabel),
            ui::style_text(&format!("unavailable ({e})"), ui::StyleType::Error)
        ),
    }
}
