pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::{AppConfig, SipPlan};
use anyhow::{Result, bail};
use std::sync::Arc;
use tracing::{debug, info};

/// Commands the application can execute.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Plan {
        years: Option<u32>,
        monthly: Option<f64>,
        rate: Option<f64>,
    },
    Projections,
    Balance,
    Deposit { amount: u64 },
    Withdraw { amount: u64 },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("SIP Vault starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Plan {
            years,
            monthly,
            rate,
        } => {
            let plans = resolve_plans(&config, years, monthly, rate)?;
            cli::plan::run(&plans, &config.currency)
        }
        AppCommand::Projections => {
            cli::projections::run();
            Ok(())
        }
        command => {
            let base_url = config
                .providers
                .rpc
                .as_ref()
                .map_or("http://127.0.0.1:8545", |p| &p.base_url);
            let accounts_cache = Arc::new(core::cache::Cache::new());
            let wallet = providers::eth_rpc::EthRpcProvider::new(base_url, accounts_cache);
            let vault =
                providers::eth_rpc::EthRpcVault::new(base_url, &config.vault.contract_address);

            match command {
                AppCommand::Balance => cli::balance::run(&wallet, &vault, &config.currency).await,
                AppCommand::Deposit { amount } => {
                    cli::deposit::run(&wallet, &vault, amount, &config.currency).await
                }
                AppCommand::Withdraw { amount } => {
                    cli::withdraw::run(&wallet, &vault, amount, &config.currency).await
                }
                _ => unreachable!("offline commands are handled above"),
            }
        }
    }
}

/// Either all three ad-hoc plan values or none of them; none means the
/// configured plans are projected.
fn resolve_plans(
    config: &AppConfig,
    years: Option<u32>,
    monthly: Option<f64>,
    rate: Option<f64>,
) -> Result<Vec<SipPlan>> {
    match (years, monthly, rate) {
        (None, None, None) => Ok(config.plans.clone()),
        (Some(years), Some(monthly), Some(rate)) => Ok(vec![SipPlan {
            name: "Ad-hoc".to_string(),
            monthly_contribution: monthly,
            annual_return_pct: rate,
            period_years: years,
        }]),
        _ => bail!("Pass all of --years, --monthly and --rate, or none to use configured plans"),
    }
}
