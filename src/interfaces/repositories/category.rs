use async_trait::async_trait;
use uuid::Uuid;
use sqlx::PgPool;

use crate::{
    entities::category::Category,
    errors::AppError,
    repositories::sqlx_repo::SqlxCategoryRepo,
};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create_category(&self, title: &str) -> Result<Category, AppError>;
    async fn update_category(&self, id: &Uuid, title: &str) -> Result<Category, AppError>;
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;
}

impl SqlxCategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxCategoryRepo { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepo {
    async fn create_category(&self, title: &str) -> Result<Category, AppError> {
        let saved = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (title) VALUES ($1) RETURNING *",
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn update_category(&self, id: &Uuid, title: &str) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET title = $1 WHERE id = $2 RETURNING *",
        )
        .bind(title)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }
}
