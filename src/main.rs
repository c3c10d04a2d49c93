use std::env;
use std::process;

use clap::Parser;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::signer::Signer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::Result;
use storage::PinataUploader;
use utils::config::{Args, Config, env_file_path};
use utils::keypair;

mod error;
mod execute_ixs;
mod launch;
mod storage;
mod types;
mod utils;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    dotenv::from_path(".env").ok();

    match run(Args::parse()).await {
        Ok(()) => {
            println!("Finished successfully");
            process::exit(0);
        }
        Err(e) => {
            println!("❌ {}", e);
            process::exit(1);
        }
    }
}

async fn run(args: Args) -> Result<()> {
    // A generated PRIVATE_KEY lives in the env file, which may not be `.env`.
    let env_file = env_file_path(args.env_file.clone(), &|key: &str| env::var(key).ok())?;
    dotenv::from_path(&env_file).ok();

    let config = Config::load(args)?;
    config.print_info();

    let rpc_client = RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment);
    let payer = keypair::load_or_generate_keypair(&config)?;
    info!(pubkey = %payer.pubkey(), "Payer loaded");
    keypair::airdrop_if_required(&rpc_client, &payer.pubkey(), &config).await?;

    let uploader = PinataUploader::from_config(&config)?;
    let record = launch::launch_token(&rpc_client, &payer, &config, &uploader).await?;
    record.print_summary();

    Ok(())
}
