use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::infrastructure::storage::remote::{AssetHandle, StoredAsset};

/// A catalogued book: cover image, source document, and one rendered image
/// per document page, all stored remotely. The page URL and asset-id arrays
/// are parallel; index i of each refers to the same page.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub cover_url: String,
    pub cover_asset_id: String,
    pub document_url: Option<String>,
    pub document_asset_id: Option<String>,
    pub page_urls: Vec<String>,
    pub page_asset_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Re-pairs the storage-level parallel arrays, in page order.
    pub fn page_assets(&self) -> Vec<StoredAsset> {
        self.page_urls
            .iter()
            .zip(self.page_asset_ids.iter())
            .map(|(url, asset_id)| StoredAsset {
                url: url.clone(),
                asset_id: asset_id.clone(),
            })
            .collect()
    }

    /// Every remote deletion handle this record references: cover, source
    /// document (if kept), and all rendered pages.
    pub fn asset_handles(&self) -> Vec<AssetHandle> {
        let mut handles = vec![AssetHandle::image(&self.cover_asset_id)];
        if let Some(document_asset_id) = &self.document_asset_id {
            handles.push(AssetHandle::raw(document_asset_id));
        }
        handles.extend(self.page_asset_ids.iter().map(AssetHandle::image));
        handles
    }

    /// Handles for the rendered pages only.
    pub fn page_handles(&self) -> Vec<AssetHandle> {
        self.page_asset_ids.iter().map(AssetHandle::image).collect()
    }
}

/// Text fields of a create request, validated before any upload happens.
#[derive(Debug, Validate)]
pub struct NewBookFields {
    #[validate(length(min = 1, message = "is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "is required"))]
    pub category: String,
}

/// A fully processed book ready for persistence.
#[derive(Debug)]
pub struct BookInsert {
    pub title: String,
    pub description: String,
    pub category: String,
    pub cover: StoredAsset,
    pub document: StoredAsset,
    pub pages: Vec<StoredAsset>,
}

impl BookInsert {
    pub fn page_urls(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.url.clone()).collect()
    }

    pub fn page_asset_ids(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.asset_id.clone()).collect()
    }
}

/// Partial update; `None` fields keep their stored values.
#[derive(Debug, Default)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub cover: Option<StoredAsset>,
    pub document: Option<DocumentReplacement>,
}

/// Replacing the source document always replaces the rendered pages with it.
#[derive(Debug)]
pub struct DocumentReplacement {
    pub document: StoredAsset,
    pub pages: Vec<StoredAsset>,
}

impl DocumentReplacement {
    pub fn page_urls(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.url.clone()).collect()
    }

    pub fn page_asset_ids(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.asset_id.clone()).collect()
    }
}
