mod config;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use config::DeploymentArgs;
use sd_api_types::{Notification, NotificationKind};
use sd_chain_rpc::HttpRpcProvider;
use sd_wallet_core::Dapp;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "storage-cli", version, about = "Read and write the storage contract's value")]
struct Cli {
    #[command(flatten)]
    deployment: DeploymentArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Connect and print the first authorized account.
    Account,
    /// Connect and print the stored value.
    Read,
    /// Store a new value, then print the value read back.
    Write {
        /// Unsigned decimal integer.
        value: String,
    },
}

fn print_notification(notification: Notification) {
    let tag = match notification.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
        NotificationKind::Info => "info",
    };
    eprintln!("[{tag}] {}", notification.message);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let deployment = cli.deployment.resolve()?;
    let provider = HttpRpcProvider::new(Some(config::rpc_url(&deployment)));
    info!(endpoint = provider.endpoint(), contract = %deployment.contract_address, "storage-cli starting");

    let dapp = Dapp::new(provider, print_notification, &deployment)?;
    let account = dapp.connect().await?;

    match cli.command {
        Command::Account => println!("{}", account.0),
        Command::Read => match dapp.state().scalar() {
            Some(scalar) => println!("{scalar}"),
            None => bail!("could not read the stored value"),
        },
        Command::Write { value } => {
            dapp.set_pending_input(&value);
            let ack = dapp.submit().await?;
            info!(tx_hash = %ack.tx_hash, "transaction accepted");
            match dapp.state().scalar() {
                Some(scalar) => println!("{scalar}"),
                None => bail!("transaction {} accepted but the value could not be read back", ack.tx_hash),
            }
        }
    }

    Ok(())
}
