use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Reader-submitted story. Held unpublished until an admin flips the flag.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Story {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewStoryRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub title: String,

    pub description: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,

    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
}
