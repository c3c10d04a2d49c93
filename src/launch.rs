use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::signature::Keypair;
use tracing::info;

use crate::error::Result;
use crate::execute_ixs::{create_metadata, create_mint, mint_supply};
use crate::storage::{StorageUploader, UploadFile};
use crate::types::{TokenMetadata, TokenRecord};
use crate::utils::config::Config;
use crate::utils::helper_functions::to_base_units;

/// Uploads the image, then the metadata document pointing at it. Returns
/// `(image_uri, metadata_uri)`.
pub async fn upload_assets<U: StorageUploader>(
    uploader: &U,
    metadata: &TokenMetadata,
) -> Result<(String, String)> {
    let image = UploadFile::from_path(&metadata.image_path).await?;
    info!(file = %image.name, bytes = image.bytes.len(), "Uploading image");
    let image_uri = uploader.upload_file(image).await?;
    info!(%image_uri, "Image uploaded");

    let document = metadata.off_chain(&image_uri);
    let metadata_uri = uploader
        .upload_json(&format!("{}.json", metadata.symbol), &document)
        .await?;
    info!(%metadata_uri, "Metadata uploaded");

    Ok((image_uri, metadata_uri))
}

/// Runs every launch step in order and writes the resulting record to the
/// cache file. The first failing step aborts the launch.
pub async fn launch_token<U: StorageUploader>(
    rpc_client: &RpcClient,
    payer: &Keypair,
    config: &Config,
    uploader: &U,
) -> Result<TokenRecord> {
    let metadata = TokenMetadata::from_config(config)?;
    let supply = config
        .initial_supply
        .map(|amount| to_base_units(amount, metadata.decimals))
        .transpose()?;

    let mint = create_mint::create_mint(rpc_client, payer, metadata.decimals).await?;

    let (image_uri, metadata_uri) = upload_assets(uploader, &metadata).await?;

    let data = metadata.data_v2(&metadata_uri)?;
    let (metadata_account, metadata_signature) =
        create_metadata::create_metadata(rpc_client, payer, &mint, data).await?;

    let (token_account, supply_transaction) = match supply {
        Some(amount) => {
            let (account, signature) =
                mint_supply::mint_initial_supply(rpc_client, payer, &mint, amount).await?;
            (Some(account.to_string()), Some(signature.to_string()))
        }
        None => (None, None),
    };

    let record = TokenRecord {
        mint: mint.to_string(),
        image_uri,
        metadata_uri,
        token_metadata: metadata_account.to_string(),
        metadata_transaction: metadata_signature.to_string(),
        token_account,
        supply_transaction,
    };
    record.write_cache(&config.cache_path)?;
    info!(path = %config.cache_path.display(), "Launch record cached");

    Ok(record)
}
