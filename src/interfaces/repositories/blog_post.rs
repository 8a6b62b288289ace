use async_trait::async_trait;
use uuid::Uuid;
use sqlx::PgPool;

use crate::{
    entities::blog_post::{BlogPost, BlogPostInsert, BlogPostUpdate},
    errors::AppError,
    repositories::sqlx_repo::SqlxBlogPostRepo,
};

#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    async fn create_blog_post(&self, post: &BlogPostInsert) -> Result<BlogPost, AppError>;
    async fn get_blog_post_by_id(&self, id: &Uuid) -> Result<BlogPost, AppError>;
    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, AppError>;
    async fn update_blog_post(&self, id: &Uuid, changes: &BlogPostUpdate) -> Result<BlogPost, AppError>;
    async fn delete_blog_post(&self, id: &Uuid) -> Result<BlogPost, AppError>;
}

impl SqlxBlogPostRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxBlogPostRepo { pool }
    }
}

#[async_trait]
impl BlogPostRepository for SqlxBlogPostRepo {
    async fn create_blog_post(&self, post: &BlogPostInsert) -> Result<BlogPost, AppError> {
        let saved = sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts (title, description, image_url, image_asset_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&post.title)
        .bind(&post.description)
        .bind(&post.image.url)
        .bind(&post.image.asset_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn get_blog_post_by_id(&self, id: &Uuid) -> Result<BlogPost, AppError> {
        sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
    }

    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let posts = sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn update_blog_post(&self, id: &Uuid, changes: &BlogPostUpdate) -> Result<BlogPost, AppError> {
        let updated = sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                image_url = COALESCE($3, image_url),
                image_asset_id = COALESCE($4, image_asset_id),
                updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.image.as_ref().map(|i| i.url.clone()))
        .bind(changes.image.as_ref().map(|i| i.asset_id.clone()))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))?;

        Ok(updated)
    }

    async fn delete_blog_post(&self, id: &Uuid) -> Result<BlogPost, AppError> {
        sqlx::query_as::<_, BlogPost>("DELETE FROM blog_posts WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
    }
}
