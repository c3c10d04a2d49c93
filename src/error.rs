use std::path::PathBuf;

use solana_client::client_error::ClientError;
use solana_sdk::program_error::ProgramError;
use solana_sdk::signer::SignerError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LaunchError>;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid keypair: {0}")]
    Keypair(String),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rpc error: {0}")]
    Rpc(#[from] Box<ClientError>),

    #[error("failed to build instruction: {0}")]
    Instruction(#[from] ProgramError),

    #[error("failed to sign transaction: {0}")]
    Signing(#[from] SignerError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upload rejected with status {status}: {body}")]
    Upload { status: u16, body: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid token metadata: {0}")]
    Metadata(String),

    #[error("amount overflow: {amount} tokens with {decimals} decimals")]
    Overflow { amount: u64, decimals: u8 },

    #[error("airdrop {signature} was not confirmed after {attempts} attempts")]
    AirdropTimeout { signature: String, attempts: u32 },
}

impl From<ClientError> for LaunchError {
    fn from(err: ClientError) -> Self {
        LaunchError::Rpc(Box::new(err))
    }
}

impl LaunchError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LaunchError::Io {
            path: path.into(),
            source,
        }
    }
}
