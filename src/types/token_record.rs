use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LaunchError, Result};

/// Everything a launch produced, as written to the cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub mint: String,
    pub image_uri: String,
    pub metadata_uri: String,
    pub token_metadata: String,
    pub metadata_transaction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply_transaction: Option<String>,
}

impl TokenRecord {
    pub fn write_cache(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LaunchError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| LaunchError::io(path, e))
    }

    pub fn print_summary(&self) {
        println!("✅ TOKEN LAUNCHED!");
        println!("   Mint: {}", self.mint);
        println!("   Image URI: {}", self.image_uri);
        println!("   Metadata URI: {}", self.metadata_uri);
        println!("   Metadata Account: {}", self.token_metadata);
        println!("   Metadata Tx: {}", self.metadata_transaction);
        if let (Some(account), Some(tx)) = (&self.token_account, &self.supply_transaction) {
            println!("   Token Account: {}", account);
            println!("   Supply Tx: {}", tx);
        }
        println!();
    }
}
