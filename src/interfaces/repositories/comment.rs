use async_trait::async_trait;
use uuid::Uuid;
use sqlx::PgPool;

use crate::{
    entities::comment::Comment,
    errors::AppError,
    repositories::sqlx_repo::SqlxCommentRepo,
};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create_comment(
        &self,
        book_id: &Uuid,
        name: &str,
        email: &str,
        body: &str,
    ) -> Result<Comment, AppError>;
    async fn list_comments_for_book(&self, book_id: &Uuid) -> Result<Vec<Comment>, AppError>;
    async fn list_all_comments(&self) -> Result<Vec<Comment>, AppError>;
    async fn set_reply(&self, id: &Uuid, reply: &str) -> Result<Comment, AppError>;
    async fn delete_comment(&self, id: &Uuid) -> Result<Comment, AppError>;
}

impl SqlxCommentRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxCommentRepo { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepo {
    async fn create_comment(
        &self,
        book_id: &Uuid,
        name: &str,
        email: &str,
        body: &str,
    ) -> Result<Comment, AppError> {
        let saved = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (book_id, name, email, body)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(name)
        .bind(email)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            // FK violation means the referenced book is gone
            AppError::Conflict(_) => AppError::NotFound("Book not found".into()),
            other => other,
        })?;

        Ok(saved)
    }

    async fn list_comments_for_book(&self, book_id: &Uuid) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE book_id = $1 ORDER BY created_at DESC",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn list_all_comments(&self) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn set_reply(&self, id: &Uuid, reply: &str) -> Result<Comment, AppError> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET reply = $1 WHERE id = $2 RETURNING *",
        )
        .bind(reply)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".into()))
    }

    async fn delete_comment(&self, id: &Uuid) -> Result<Comment, AppError> {
        sqlx::query_as::<_, Comment>("DELETE FROM comments WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".into()))
    }
}
