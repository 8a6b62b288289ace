use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewContactRequest {
    pub full_name: Option<String>,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    pub phone_number: Option<String>,
    pub message: Option<String>,
}
