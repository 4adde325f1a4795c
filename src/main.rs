//! big-blocks: toggle Hyperliquid big blocks for the account behind `PRIVATE_KEY`.
//!
//! # Flow
//!
//! ```text
//!   env / .env ──▶ SecretSource ──▶ Wallet ──▶ ActionSigner ──▶ RequestBuilder ──▶ ExchangeClient
//!                                   (address)   (EIP-712 sig)    (JSON body)        (POST /exchange)
//! ```
//!
//! Exits 0 when the exchange confirms the change, 1 otherwise.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use big_blocks::config::validation::validate_config;
use big_blocks::config::{load_config, AppConfig, ConfigError, Network};
use big_blocks::exchange::confirmation_error;
use big_blocks::observability::logging;
use big_blocks::signing::{EnvSecret, Wallet};
use big_blocks::BigBlocksToggle;

#[derive(Parser)]
#[command(name = "big-blocks")]
#[command(about = "Enable or disable big blocks for a Hyperliquid account", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "BIG_BLOCKS_CONFIG")]
    config: Option<PathBuf>,

    /// Turn big blocks off instead of on.
    #[arg(long)]
    disable: bool,

    /// Network to sign for and submit to.
    #[arg(long, value_enum)]
    network: Option<Network>,

    /// Override the exchange endpoint URL.
    #[arg(long)]
    api_url: Option<String>,

    /// Environment variable holding the private key.
    #[arg(long)]
    key_env: Option<String>,

    /// Sign and print the payload without submitting it.
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => AppConfig::default(),
        };

        if let Some(network) = self.network {
            config.exchange.network = network;
        }
        if let Some(url) = &self.api_url {
            config.exchange.api_url = Some(url.clone());
        }
        if let Some(var) = &self.key_env {
            config.credentials.private_key_env = var.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init(&Default::default());
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.observability);

    match run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Big blocks update failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let enable = !cli.disable;

    tracing::info!(
        network = %config.exchange.network,
        endpoint = %config.exchange.endpoint(),
        using_big_blocks = enable,
        "big-blocks v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let source = EnvSecret::new(&config.credentials.private_key_env);
    let wallet = Wallet::from_source(&source)?;
    let toggle = BigBlocksToggle::new(wallet, &config.exchange)?;

    if cli.dry_run {
        let prepared = toggle.prepare(enable)?;
        let signed = &prepared.signed;
        let verified = toggle.signer().verify(
            &signed.action,
            signed.nonce,
            signed.expiration,
            &signed.signature,
            toggle.wallet().address(),
        )?;
        if !verified {
            return Err("signature does not recover to the wallet address".into());
        }

        tracing::info!(digest = %signed.digest, "Dry run: payload not submitted");
        println!("{}", serde_json::to_string_pretty(&prepared.request)?);
        return Ok(());
    }

    let confirmation = toggle.run(enable).await?;
    if let Some(reason) = confirmation_error(&confirmation) {
        return Err(format!("exchange refused the action: {}", reason).into());
    }

    tracing::info!(
        address = %toggle.wallet().address(),
        using_big_blocks = enable,
        result = %confirmation,
        "Big blocks updated"
    );
    println!("{}", serde_json::to_string_pretty(&confirmation)?);
    Ok(())
}
