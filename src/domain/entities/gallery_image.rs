use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::infrastructure::storage::remote::StoredAsset;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct GalleryImage {
    pub id: Uuid,
    pub url: String,
    pub asset_id: String,
    pub position: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct GalleryImageInsert {
    pub asset: StoredAsset,
    pub position: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<Uuid>,
}
