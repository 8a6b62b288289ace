use async_trait::async_trait;
use uuid::Uuid;
use sqlx::PgPool;

use crate::{
    entities::story::{NewStoryRequest, Story},
    errors::AppError,
    repositories::sqlx_repo::SqlxStoryRepo,
};

#[async_trait]
pub trait StoryRepository: Send + Sync {
    async fn create_story(&self, story: &NewStoryRequest) -> Result<Story, AppError>;
    async fn list_stories(&self) -> Result<Vec<Story>, AppError>;
    async fn delete_story(&self, id: &Uuid) -> Result<Story, AppError>;
}

impl SqlxStoryRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxStoryRepo { pool }
    }
}

#[async_trait]
impl StoryRepository for SqlxStoryRepo {
    async fn create_story(&self, story: &NewStoryRequest) -> Result<Story, AppError> {
        let saved = sqlx::query_as::<_, Story>(
            r#"
            INSERT INTO stories (title, description, full_name, phone, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&story.title)
        .bind(&story.description)
        .bind(&story.full_name)
        .bind(&story.phone)
        .bind(&story.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn list_stories(&self) -> Result<Vec<Story>, AppError> {
        let stories = sqlx::query_as::<_, Story>(
            "SELECT * FROM stories ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stories)
    }

    async fn delete_story(&self, id: &Uuid) -> Result<Story, AppError> {
        sqlx::query_as::<_, Story>("DELETE FROM stories WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Story not found".into()))
    }
}
