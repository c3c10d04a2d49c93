use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use solana_commitment_config::CommitmentConfig;

use crate::error::{LaunchError, Result};

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_PINATA_API_URL: &str = "https://api.pinata.cloud";
pub const DEFAULT_IPFS_GATEWAY: &str = "https://gateway.pinata.cloud/ipfs";

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, help = "Solana RPC endpoint")]
    pub rpc_url: Option<String>,
    #[arg(long, help = "Commitment level: processed, confirmed or finalized")]
    pub commitment: Option<String>,
    #[arg(long, help = "Payer secret key (JSON byte array or base58)")]
    pub private_key: Option<String>,
    #[arg(long, help = "File that receives a generated PRIVATE_KEY")]
    pub env_file: Option<PathBuf>,
    #[arg(long, help = "Pinata JWT used for IPFS uploads")]
    pub pinata_jwt: Option<String>,
    #[arg(long, help = "Pinata API base URL")]
    pub pinata_api_url: Option<String>,
    #[arg(long, help = "Gateway prefix for uploaded content")]
    pub ipfs_gateway: Option<String>,
    #[arg(long, help = "Upload request timeout in seconds")]
    pub upload_timeout_secs: Option<u64>,
    #[arg(long, help = "Token name")]
    pub name: Option<String>,
    #[arg(long, help = "Token symbol")]
    pub symbol: Option<String>,
    #[arg(long, help = "Token description")]
    pub description: Option<String>,
    #[arg(long, help = "Path of the token image")]
    pub image: Option<PathBuf>,
    #[arg(long, help = "Mint decimals")]
    pub decimals: Option<u8>,
    #[arg(long, help = "Where the launch record is written")]
    pub cache: Option<PathBuf>,
    #[arg(long, help = "Whole tokens to mint to the payer after launch")]
    pub initial_supply: Option<u64>,
    #[arg(long, help = "Never request a devnet airdrop")]
    pub no_airdrop: bool,
    #[arg(long, help = "Airdrop when the payer holds less than this many SOL")]
    pub min_balance_sol: Option<f64>,
    #[arg(long, help = "SOL requested per airdrop")]
    pub airdrop_sol: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
    pub private_key: Option<String>,
    pub env_file: PathBuf,
    pub pinata_jwt: String,
    pub pinata_api_url: String,
    pub ipfs_gateway: String,
    pub upload_timeout_secs: u64,
    pub token_name: String,
    pub token_symbol: String,
    pub token_description: String,
    pub image_path: PathBuf,
    pub decimals: u8,
    pub cache_path: PathBuf,
    pub initial_supply: Option<u64>,
    pub airdrop: bool,
    pub min_balance_sol: f64,
    pub airdrop_sol: f64,
}

impl Config {
    pub fn load(args: Args) -> Result<Self> {
        Self::from_sources(args, |key| env::var(key).ok())
    }

    /// Resolves every setting as CLI flag, then `lookup(ENV_KEY)`, then default.
    pub fn from_sources<F>(args: Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let commitment = pick(args.commitment, &lookup, "COMMITMENT")?
            .unwrap_or_else(|| "finalized".to_string());

        let pinata_jwt = pick(args.pinata_jwt, &lookup, "PINATA_JWT")?.ok_or_else(|| {
            LaunchError::Config("PINATA_JWT or --pinata-jwt must be set".to_string())
        })?;

        let config = Config {
            rpc_url: pick(args.rpc_url, &lookup, "RPC_URL")?
                .unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            commitment: parse_commitment(&commitment)?,
            private_key: pick(args.private_key, &lookup, "PRIVATE_KEY")?,
            env_file: env_file_path(args.env_file, &lookup)?,
            pinata_jwt,
            pinata_api_url: pick(args.pinata_api_url, &lookup, "PINATA_API_URL")?
                .unwrap_or_else(|| DEFAULT_PINATA_API_URL.to_string()),
            ipfs_gateway: pick(args.ipfs_gateway, &lookup, "IPFS_GATEWAY")?
                .unwrap_or_else(|| DEFAULT_IPFS_GATEWAY.to_string()),
            upload_timeout_secs: pick(args.upload_timeout_secs, &lookup, "UPLOAD_TIMEOUT_SECS")?
                .unwrap_or(60),
            token_name: pick(args.name, &lookup, "TOKEN_NAME")?
                .unwrap_or_else(|| "CASTLE".to_string()),
            token_symbol: pick(args.symbol, &lookup, "TOKEN_SYMBOL")?
                .unwrap_or_else(|| "CST".to_string()),
            token_description: pick(args.description, &lookup, "TOKEN_DESCRIPTION")?
                .unwrap_or_else(|| "A token for buildoors".to_string()),
            image_path: pick(args.image, &lookup, "TOKEN_IMAGE_PATH")?
                .unwrap_or_else(|| PathBuf::from("tokens/bld/assets/0.png")),
            decimals: pick(args.decimals, &lookup, "TOKEN_DECIMALS")?.unwrap_or(2),
            cache_path: pick(args.cache, &lookup, "CACHE_PATH")?
                .unwrap_or_else(|| PathBuf::from("tokens/bld/cache.json")),
            initial_supply: pick(args.initial_supply, &lookup, "INITIAL_SUPPLY")?,
            airdrop: pick(args.no_airdrop.then_some(false), &lookup, "AIRDROP")?.unwrap_or(true),
            min_balance_sol: pick(args.min_balance_sol, &lookup, "MIN_BALANCE_SOL")?
                .unwrap_or(1.0),
            airdrop_sol: pick(args.airdrop_sol, &lookup, "AIRDROP_SOL")?.unwrap_or(1.0),
        };
        config.check_ranges()?;
        Ok(config)
    }

    fn check_ranges(&self) -> Result<()> {
        if self.upload_timeout_secs == 0 {
            return Err(LaunchError::Config(
                "UPLOAD_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }
        if !self.min_balance_sol.is_finite() || self.min_balance_sol < 0.0 {
            return Err(LaunchError::Config(format!(
                "MIN_BALANCE_SOL must be a non-negative number, got {}",
                self.min_balance_sol
            )));
        }
        if !self.airdrop_sol.is_finite() || self.airdrop_sol <= 0.0 {
            return Err(LaunchError::Config(format!(
                "AIRDROP_SOL must be a positive number, got {}",
                self.airdrop_sol
            )));
        }
        Ok(())
    }

    pub fn print_info(&self) {
        println!("🪙 Token: {} ({})", self.token_name, self.token_symbol);
        println!("   Description: {}", self.token_description);
        println!("   Image: {}", self.image_path.display());
        println!("   Decimals: {}", self.decimals);
        if let Some(supply) = self.initial_supply {
            println!("   Initial supply: {} tokens", supply);
        }
        println!("🌐 RPC: {} ({:?})", self.rpc_url, self.commitment.commitment);
        println!("📁 Cache: {}\n", self.cache_path.display());
    }
}

/// File holding `PRIVATE_KEY`: `--env-file`, then `ENV_FILE`, then `.env`.
pub fn env_file_path<F>(cli: Option<PathBuf>, lookup: &F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(pick(cli, lookup, "ENV_FILE")?.unwrap_or_else(|| PathBuf::from(".env")))
}

fn pick<T, F>(cli: Option<T>, lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    if cli.is_some() {
        return Ok(cli);
    }
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| LaunchError::Config(format!("{key}={raw}: {e}"))),
        _ => Ok(None),
    }
}

pub fn parse_commitment(level: &str) -> Result<CommitmentConfig> {
    match level.trim().to_ascii_lowercase().as_str() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(LaunchError::Config(format!(
            "unknown commitment level `{other}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use solana_commitment_config::CommitmentLevel;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_jwt_is_set() {
        let config = Config::from_sources(Args::default(), lookup(&[("PINATA_JWT", "jwt")]))
            .unwrap();

        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.commitment.commitment, CommitmentLevel::Finalized);
        assert_eq!(config.token_name, "CASTLE");
        assert_eq!(config.token_symbol, "CST");
        assert_eq!(config.token_description, "A token for buildoors");
        assert_eq!(config.image_path, PathBuf::from("tokens/bld/assets/0.png"));
        assert_eq!(config.cache_path, PathBuf::from("tokens/bld/cache.json"));
        assert_eq!(config.decimals, 2);
        assert_eq!(config.upload_timeout_secs, 60);
        assert_eq!(config.initial_supply, None);
        assert!(config.airdrop);
        assert!(config.private_key.is_none());
    }

    #[test]
    fn missing_jwt_is_an_error() {
        let err = Config::from_sources(Args::default(), lookup(&[])).unwrap_err();
        assert!(matches!(err, LaunchError::Config(msg) if msg.contains("PINATA_JWT")));
    }

    #[test]
    fn cli_overrides_env() {
        let args = Args {
            name: Some("FROM_CLI".to_string()),
            decimals: Some(6),
            no_airdrop: true,
            ..Default::default()
        };
        let config = Config::from_sources(
            args,
            lookup(&[
                ("PINATA_JWT", "jwt"),
                ("TOKEN_NAME", "FROM_ENV"),
                ("TOKEN_DECIMALS", "4"),
                ("AIRDROP", "true"),
                ("TOKEN_SYMBOL", "ENV"),
            ]),
        )
        .unwrap();

        assert_eq!(config.token_name, "FROM_CLI");
        assert_eq!(config.decimals, 6);
        assert!(!config.airdrop);
        assert_eq!(config.token_symbol, "ENV");
    }

    #[test]
    fn empty_env_values_fall_back_to_defaults() {
        let config = Config::from_sources(
            Args::default(),
            lookup(&[("PINATA_JWT", "jwt"), ("PRIVATE_KEY", ""), ("RPC_URL", "  ")]),
        )
        .unwrap();

        assert!(config.private_key.is_none());
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
    }

    #[test]
    fn bad_number_names_the_setting() {
        let err = Config::from_sources(
            Args::default(),
            lookup(&[("PINATA_JWT", "jwt"), ("INITIAL_SUPPLY", "lots")]),
        )
        .unwrap_err();

        assert!(matches!(err, LaunchError::Config(msg) if msg.starts_with("INITIAL_SUPPLY=lots")));
    }

    #[test]
    fn env_file_resolution_order() {
        let env = lookup(&[("ENV_FILE", "wallet.env")]);

        assert_eq!(
            env_file_path(Some(PathBuf::from("cli.env")), &env).unwrap(),
            PathBuf::from("cli.env")
        );
        assert_eq!(env_file_path(None, &env).unwrap(), PathBuf::from("wallet.env"));
        assert_eq!(env_file_path(None, &lookup(&[])).unwrap(), PathBuf::from(".env"));
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        for (key, value) in [
            ("UPLOAD_TIMEOUT_SECS", "0"),
            ("AIRDROP_SOL", "-1"),
            ("AIRDROP_SOL", "0"),
            ("MIN_BALANCE_SOL", "NaN"),
            ("MIN_BALANCE_SOL", "-0.5"),
            ("AIRDROP_SOL", "inf"),
        ] {
            let err = Config::from_sources(
                Args::default(),
                lookup(&[("PINATA_JWT", "jwt"), (key, value)]),
            )
            .unwrap_err();
            assert!(
                matches!(&err, LaunchError::Config(msg) if msg.starts_with(key)),
                "{key}={value} gave {err}"
            );
        }
    }

    #[test]
    fn zero_min_balance_is_allowed() {
        let config = Config::from_sources(
            Args::default(),
            lookup(&[("PINATA_JWT", "jwt"), ("MIN_BALANCE_SOL", "0")]),
        )
        .unwrap();
        assert_eq!(config.min_balance_sol, 0.0);
    }

    #[test]
    fn commitment_levels() {
        assert_eq!(
            parse_commitment("Confirmed").unwrap().commitment,
            CommitmentLevel::Confirmed
        );
        assert_eq!(
            parse_commitment("processed").unwrap().commitment,
            CommitmentLevel::Processed
        );
        assert!(parse_commitment("recent").is_err());
    }
}
