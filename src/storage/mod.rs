pub mod pinata;

use std::path::Path;

use serde::Serialize;

use crate::error::{LaunchError, Result};

pub use pinata::PinataUploader;

/// A file read from disk, ready to be pushed to storage.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| LaunchError::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        Ok(Self {
            content_type: content_type_for(&name),
            name,
            bytes,
        })
    }
}

pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Content-addressed storage that hands back a retrievable URI per upload.
pub trait StorageUploader {
    async fn upload_file(&self, file: UploadFile) -> Result<String>;

    async fn upload_json<T: Serialize + Sync>(&self, name: &str, value: &T) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type_for("0.png"), "image/png");
        assert_eq!(content_type_for("logo.JPG"), "image/jpeg");
        assert_eq!(content_type_for("logo.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.svg"), "image/svg+xml");
        assert_eq!(content_type_for("meta.json"), "application/json");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[tokio::test]
    async fn reads_file_with_name_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0.png");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();

        assert_eq!(file.name, "0.png");
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");

        let err = UploadFile::from_path(&path).await.unwrap_err();
        assert!(err.to_string().contains("missing.png"));
    }
}
