use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use tokio::time::{Duration, sleep};
use tracing::{debug, info};

use crate::error::{LaunchError, Result};
use crate::utils::config::Config;
use crate::utils::helper_functions::{lamports_to_sol, sol_to_lamports};

const PRIVATE_KEY: &str = "PRIVATE_KEY";
const AIRDROP_POLL_ATTEMPTS: u32 = 30;
const AIRDROP_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Parses a 64-byte secret key given either as a JSON byte array (Solana CLI
/// keypair file format) or as a base58 string.
pub fn parse_keypair(raw: &str) -> Result<Keypair> {
    let raw = raw.trim();
    let bytes: Vec<u8> = if raw.starts_with('[') {
        serde_json::from_str(raw).map_err(|e| LaunchError::Keypair(e.to_string()))?
    } else {
        bs58::decode(raw)
            .into_vec()
            .map_err(|e| LaunchError::Keypair(e.to_string()))?
    };

    if bytes.len() != 64 {
        return Err(LaunchError::Keypair(format!(
            "expected 64 secret key bytes, got {}",
            bytes.len()
        )));
    }

    Keypair::from_bytes(&bytes).map_err(|e| LaunchError::Keypair(e.to_string()))
}

/// Uses the configured key, then a `PRIVATE_KEY` already stored in the env
/// file, or generates one and stores it there so later runs reuse the payer.
pub fn load_or_generate_keypair(config: &Config) -> Result<Keypair> {
    if let Some(raw) = &config.private_key {
        return parse_keypair(raw);
    }
    if let Some(raw) = stored_private_key(&config.env_file)? {
        return parse_keypair(&raw);
    }

    let keypair = Keypair::new();
    persist_keypair(&keypair, &config.env_file)?;
    info!(
        pubkey = %keypair.pubkey(),
        env_file = %config.env_file.display(),
        "Generated new payer keypair"
    );
    Ok(keypair)
}

fn stored_private_key(env_file: &Path) -> Result<Option<String>> {
    if !env_file.exists() {
        return Ok(None);
    }
    let entries = dotenv::from_path_iter(env_file)
        .map_err(|e| LaunchError::Config(format!("{}: {e}", env_file.display())))?;
    for entry in entries {
        let (key, value) =
            entry.map_err(|e| LaunchError::Config(format!("{}: {e}", env_file.display())))?;
        if key == PRIVATE_KEY && !value.trim().is_empty() {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Writes `PRIVATE_KEY=[..]` into the env file, replacing any earlier
/// `PRIVATE_KEY` line. The file is readable by its owner only.
fn persist_keypair(keypair: &Keypair, env_file: &Path) -> Result<()> {
    let existing = match fs::read_to_string(env_file) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(LaunchError::io(env_file, e)),
    };

    let mut contents: String = existing
        .lines()
        .filter(|line| !is_private_key_line(line))
        .flat_map(|line| [line, "\n"])
        .collect();
    let secret = serde_json::to_string(&keypair.to_bytes().to_vec())?;
    contents.push_str(&format!("{PRIVATE_KEY}={secret}\n"));

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);
    let mut file = options
        .open(env_file)
        .map_err(|e| LaunchError::io(env_file, e))?;
    #[cfg(unix)]
    file.set_permissions(fs::Permissions::from_mode(0o600))
        .map_err(|e| LaunchError::io(env_file, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| LaunchError::io(env_file, e))
}

fn is_private_key_line(line: &str) -> bool {
    let line = line.trim_start();
    let line = line.strip_prefix("export ").unwrap_or(line).trim_start();
    line.strip_prefix(PRIVATE_KEY)
        .is_some_and(|rest| rest.trim_start().starts_with('='))
}

/// Tops the payer up from the devnet faucet when its balance is below the
/// configured minimum.
pub async fn airdrop_if_required(rpc: &RpcClient, payer: &Pubkey, config: &Config) -> Result<()> {
    let balance = rpc.get_balance(payer).await?;
    info!(pubkey = %payer, balance_sol = lamports_to_sol(balance), "Payer balance");

    if !config.airdrop || balance >= sol_to_lamports(config.min_balance_sol) {
        return Ok(());
    }

    let lamports = sol_to_lamports(config.airdrop_sol);
    info!(lamports, "Requesting airdrop");
    let signature = rpc.request_airdrop(payer, lamports).await?;

    for attempt in 1..=AIRDROP_POLL_ATTEMPTS {
        if rpc.confirm_transaction(&signature).await? {
            let balance = rpc.get_balance(payer).await?;
            info!(
                %signature,
                balance_sol = lamports_to_sol(balance),
                "Airdrop confirmed"
            );
            return Ok(());
        }
        debug!(attempt, %signature, "Airdrop not confirmed yet");
        sleep(AIRDROP_POLL_INTERVAL).await;
    }

    Err(LaunchError::AirdropTimeout {
        signature: signature.to_string(),
        attempts: AIRDROP_POLL_ATTEMPTS,
    })
}
