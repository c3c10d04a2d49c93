use std::path::PathBuf;

use mpl_token_metadata::types::DataV2;
use serde::{Deserialize, Serialize};

use crate::error::{LaunchError, Result};
use crate::utils::config::Config;

// Limits enforced by the token metadata program.
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;
pub const MAX_DECIMALS: u8 = 9;

#[derive(Debug, Clone)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image_path: PathBuf,
    pub decimals: u8,
}

/// JSON document stored next to the image and referenced by the on-chain uri.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffChainMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
}

impl TokenMetadata {
    pub fn from_config(config: &Config) -> Result<Self> {
        let metadata = Self {
            name: config.token_name.clone(),
            symbol: config.token_symbol.clone(),
            description: config.token_description.clone(),
            image_path: config.image_path.clone(),
            decimals: config.decimals,
        };
        metadata.validate()?;
        Ok(metadata)
    }

    pub fn validate(&self) -> Result<()> {
        check_len("name", &self.name, MAX_NAME_LENGTH)?;
        check_len("symbol", &self.symbol, MAX_SYMBOL_LENGTH)?;
        if self.decimals > MAX_DECIMALS {
            return Err(LaunchError::Metadata(format!(
                "decimals must be at most {MAX_DECIMALS}, got {}",
                self.decimals
            )));
        }
        Ok(())
    }

    pub fn off_chain(&self, image_uri: &str) -> OffChainMetadata {
        OffChainMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            description: self.description.clone(),
            image: image_uri.to_string(),
        }
    }

    pub fn data_v2(&self, uri: &str) -> Result<DataV2> {
        if uri.len() > MAX_URI_LENGTH {
            return Err(LaunchError::Metadata(format!(
                "uri is {} bytes, limit is {MAX_URI_LENGTH}",
                uri.len()
            )));
        }
        Ok(DataV2 {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            uri: uri.to_string(),
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        })
    }
}

fn check_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LaunchError::Metadata(format!("{field} must not be empty")));
    }
    if value.len() > max {
        return Err(LaunchError::Metadata(format!(
            "{field} is {} bytes, limit is {max}",
            value.len()
        )));
    }
    Ok(())
}
