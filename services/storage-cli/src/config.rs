use anyhow::{Context, Result, bail};
use clap::Args;
use sd_api_types::DeploymentConfig;
use sd_chain_rpc::DEFAULT_RPC_URL;
use std::path::PathBuf;

/// Deployment settings. Flags (or their env vars) override the config file.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct DeploymentArgs {
    /// JSON deployment file (`contract_address`, `chain_id`, `rpc_url`).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Address of the deployed storage contract.
    #[arg(long, env = "SD_CONTRACT_ADDRESS")]
    pub contract: Option<String>,
    /// JSON-RPC endpoint of the node.
    #[arg(long, env = "SD_RPC_URL")]
    pub rpc_url: Option<String>,
    /// Chain the contract is deployed on; a mismatch is reported, not fatal.
    #[arg(long, env = "SD_CHAIN_ID")]
    pub chain_id: Option<String>,
}

impl DeploymentArgs {
    pub(crate) fn resolve(&self) -> Result<DeploymentConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading deployment config {}", path.display()))?;
                serde_json::from_str::<DeploymentConfig>(&raw)
                    .with_context(|| format!("parsing deployment config {}", path.display()))?
            }
            None => DeploymentConfig {
                contract_address: String::new(),
                chain_id: None,
                rpc_url: None,
            },
        };

        if let Some(contract) = &self.contract {
            config.contract_address = contract.clone();
        }
        if self.rpc_url.is_some() {
            config.rpc_url = self.rpc_url.clone();
        }
        if self.chain_id.is_some() {
            config.chain_id = self.chain_id.clone();
        }

        if config.contract_address.trim().is_empty() {
            bail!("contract address required (--contract, SD_CONTRACT_ADDRESS or --config)");
        }
        Ok(config)
    }
}

pub(crate) fn rpc_url(config: &DeploymentConfig) -> String {
    config
        .rpc_url
        .clone()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_RPC_URL.to_owned())
}
