use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::infrastructure::storage::remote::StoredAsset;

/// Single-image variant of the book pattern: one remote cover, no document.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub image_asset_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Validate)]
pub struct NewBlogPostFields {
    #[validate(length(min = 1, message = "is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "is required"))]
    pub description: String,
}

#[derive(Debug)]
pub struct BlogPostInsert {
    pub title: String,
    pub description: String,
    pub image: StoredAsset,
}

#[derive(Debug, Default)]
pub struct BlogPostUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<StoredAsset>,
}
