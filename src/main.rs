use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use sipvault::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for sipvault::AppCommand {
    fn from(cmd: Commands) -> sipvault::AppCommand {
        match cmd {
            Commands::Plan {
                years,
                monthly,
                rate,
            } => sipvault::AppCommand::Plan {
                years,
                monthly,
                rate,
            },
            Commands::Projections => sipvault::AppCommand::Projections,
            Commands::Balance => sipvault::AppCommand::Balance,
            Commands::Deposit { amount } => sipvault::AppCommand::Deposit { amount },
            Commands::Withdraw { amount } => sipvault::AppCommand::Withdraw { amount },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Project configured or ad-hoc SIP plans
    Plan {
        /// Investment period in years
        #[arg(long)]
        years: Option<u32>,
        /// Monthly contribution amount
        #[arg(long)]
        monthly: Option<f64>,
        /// Expected annual return in percent
        #[arg(long)]
        rate: Option<f64>,
    },
    /// Display the illustrative projections table at 12%
    Projections,
    /// Display wallet account and vault balances
    Balance,
    /// Deposit into the vault contract
    Deposit {
        /// Amount in vault units
        #[arg(default_value_t = 1)]
        amount: u64,
    },
    /// Withdraw from the vault contract
    Withdraw {
        /// Amount in vault units
        #[arg(default_value_t = 1)]
        amount: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => sipvault::cli::setup::setup(),
        Some(cmd) => sipvault::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
