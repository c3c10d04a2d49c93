use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::{LaunchError, Result};
use crate::storage::{StorageUploader, UploadFile};
use crate::utils::config::Config;

const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";
const PIN_JSON_PATH: &str = "/pinning/pinJSONToIPFS";

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// Pins content on IPFS through the Pinata API.
pub struct PinataUploader {
    client: Client,
    jwt: String,
    api_url: String,
    gateway: String,
}

impl PinataUploader {
    pub fn new(jwt: String, api_url: String, gateway: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            jwt,
            api_url: api_url.trim_end_matches('/').to_string(),
            gateway: gateway.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.pinata_jwt.clone(),
            config.pinata_api_url.clone(),
            config.ipfs_gateway.clone(),
            Duration::from_secs(config.upload_timeout_secs),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn gateway_uri(&self, hash: &str) -> String {
        format!("{}/{}", self.gateway, hash)
    }

    async fn into_uri(&self, response: Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(LaunchError::Upload {
                status: status.as_u16(),
                body,
            });
        }
        let pinned = parse_pin_response(&body)?;
        debug!(hash = %pinned.ipfs_hash, "Pinned content");
        Ok(self.gateway_uri(&pinned.ipfs_hash))
    }
}

fn parse_pin_response(body: &str) -> Result<PinResponse> {
    Ok(serde_json::from_str(body)?)
}

impl StorageUploader for PinataUploader {
    async fn upload_file(&self, file: UploadFile) -> Result<String> {
        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(file.content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint(PIN_FILE_PATH))
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await?;
        self.into_uri(response).await
    }

    async fn upload_json<T: Serialize + Sync>(&self, name: &str, value: &T) -> Result<String> {
        let body = json!({
            "pinataContent": value,
            "pinataMetadata": { "name": name },
        });

        let response = self
            .client
            .post(self.endpoint(PIN_JSON_PATH))
            .bearer_auth(&self.jwt)
            .json(&body)
            .send()
            .await?;
        self.into_uri(response).await
    }
}
