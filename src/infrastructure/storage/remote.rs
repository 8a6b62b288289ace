use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::{errors::AppError, settings::AppConfig};

/// How the remote store is asked to treat the bytes: images get the store's
/// image pipeline, everything else is served verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Raw,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::Raw => "raw",
        }
    }
}

/// A remotely stored object: durable URL plus the opaque handle needed to
/// delete it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAsset {
    pub url: String,
    pub asset_id: String,
}

/// Deletion handle paired with the resource kind it was uploaded under.
#[derive(Debug, Clone)]
pub struct AssetHandle {
    pub asset_id: String,
    pub kind: ResourceKind,
}

impl AssetHandle {
    pub fn image(asset_id: impl Into<String>) -> Self {
        AssetHandle { asset_id: asset_id.into(), kind: ResourceKind::Image }
    }

    pub fn raw(asset_id: impl Into<String>) -> Self {
        AssetHandle { asset_id: asset_id.into(), kind: ResourceKind::Raw }
    }
}

#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn upload(
        &self,
        local_path: &Path,
        folder: &str,
        kind: ResourceKind,
    ) -> Result<StoredAsset, AppError>;

    /// Deleting an already-absent handle is not an error.
    async fn delete(&self, asset_id: &str, kind: ResourceKind) -> Result<(), AppError>;
}

/// HTTP client for the remote asset store: `POST {base}/{kind}/upload` with a
/// multipart body, `POST {base}/{kind}/destroy` with the handle.
#[derive(Debug, Clone)]
pub struct HttpAssetStore {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

impl HttpAssetStore {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let mut base_url = Url::parse(&config.asset_store_url)
            .map_err(|e| AppError::InternalError(format!("invalid asset store URL: {}", e)))?;
        // Url::join drops the last path segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(HttpAssetStore {
            http: reqwest::Client::new(),
            base_url,
            token: config.asset_store_token.clone(),
        })
    }

    fn endpoint(&self, kind: ResourceKind, action: &str) -> Result<Url, AppError> {
        self.base_url
            .join(&format!("{}/{}", kind.as_str(), action))
            .map_err(|e| AppError::InternalError(format!("invalid asset store endpoint: {}", e)))
    }
}

#[async_trait]
impl AssetStore for HttpAssetStore {
    async fn upload(
        &self,
        local_path: &Path,
        folder: &str,
        kind: ResourceKind,
    ) -> Result<StoredAsset, AppError> {
        let file_name = local_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let bytes = tokio::fs::read(local_path).await?;

        let form = reqwest::multipart::Form::new()
            .text("folder", folder.to_string())
            .part("file", reqwest::multipart::Part::bytes(bytes).file_name(file_name));

        let response = self
            .http
            .post(self.endpoint(kind, "upload")?)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::RemoteStore(format!("upload request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RemoteStore(format!(
                "upload returned {}: {}",
                status,
                body.trim()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::RemoteStore(format!("malformed upload response: {}", e)))?;

        Ok(StoredAsset { url: body.secure_url, asset_id: body.public_id })
    }

    async fn delete(&self, asset_id: &str, kind: ResourceKind) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.endpoint(kind, "destroy")?)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "public_id": asset_id }))
            .send()
            .await
            .map_err(|e| AppError::RemoteStore(format!("delete request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RemoteStore(format!(
                "delete returned {}: {}",
                status,
                body.trim()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReleaseOutcome {
    pub asset_id: String,
    pub released: bool,
}

/// Best-effort deletion of a batch of remote assets. One failure never stops
/// the rest; failures are logged and reported in the outcome list, so record
/// mutations that trigger cleanup always proceed.
pub async fn release_assets<S: AssetStore + ?Sized>(
    store: &S,
    handles: &[AssetHandle],
) -> Vec<ReleaseOutcome> {
    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        match store.delete(&handle.asset_id, handle.kind).await {
            Ok(()) => outcomes.push(ReleaseOutcome {
                asset_id: handle.asset_id.clone(),
                released: true,
            }),
            Err(e) => {
                warn!(asset_id = %handle.asset_id, error = %e, "failed to release remote asset");
                outcomes.push(ReleaseOutcome {
                    asset_id: handle.asset_id.clone(),
                    released: false,
                });
            }
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deletes everything except asset ids starting with "bad".
    struct FlakyStore;

    #[async_trait]
    impl AssetStore for FlakyStore {
        async fn upload(
            &self,
            _local_path: &Path,
            _folder: &str,
            _kind: ResourceKind,
        ) -> Result<StoredAsset, AppError> {
            unreachable!("upload is not exercised here");
        }

        async fn delete(&self, asset_id: &str, _kind: ResourceKind) -> Result<(), AppError> {
            if asset_id.starts_with("bad") {
                Err(AppError::RemoteStore("delete returned 500: broken".into()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn reports_one_outcome_per_handle_and_never_stops_early() {
        let handles = vec![
            AssetHandle::image("ok-1"),
            AssetHandle::raw("bad-2"),
            AssetHandle::image("ok-3"),
        ];

        let outcomes = release_assets(&FlakyStore, &handles).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].released);
        assert!(!outcomes[1].released);
        assert!(outcomes[2].released);
        assert_eq!(outcomes[1].asset_id, "bad-2");
    }
}
