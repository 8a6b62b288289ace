use async_trait::async_trait;
use uuid::Uuid;
use sqlx::PgPool;

use crate::{
    entities::video::Video,
    errors::AppError,
    repositories::sqlx_repo::SqlxVideoRepo,
};

#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn create_video(&self, link: &str) -> Result<Video, AppError>;
    async fn list_videos(&self) -> Result<Vec<Video>, AppError>;
    async fn delete_video(&self, id: &Uuid) -> Result<Video, AppError>;
}

impl SqlxVideoRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxVideoRepo { pool }
    }
}

#[async_trait]
impl VideoRepository for SqlxVideoRepo {
    async fn create_video(&self, link: &str) -> Result<Video, AppError> {
        let saved = sqlx::query_as::<_, Video>(
            "INSERT INTO videos (link) VALUES ($1) RETURNING *",
        )
        .bind(link)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn list_videos(&self) -> Result<Vec<Video>, AppError> {
        let videos = sqlx::query_as::<_, Video>(
            "SELECT * FROM videos ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn delete_video(&self, id: &Uuid) -> Result<Video, AppError> {
        sqlx::query_as::<_, Video>("DELETE FROM videos WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".into()))
    }
}
