use async_trait::async_trait;
use uuid::Uuid;
use sqlx::PgPool;

use crate::{
    entities::book::{Book, BookInsert, BookUpdate},
    errors::AppError,
    repositories::sqlx_repo::SqlxBookRepo,
};

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn create_book(&self, book: &BookInsert) -> Result<Book, AppError>;
    async fn get_book_by_id(&self, id: &Uuid) -> Result<Book, AppError>;
    async fn list_books(&self) -> Result<Vec<Book>, AppError>;
    async fn list_books_by_category(&self, category: &str) -> Result<Vec<Book>, AppError>;
    async fn search_books(&self, query: &str) -> Result<Vec<Book>, AppError>;
    async fn update_book(&self, id: &Uuid, changes: &BookUpdate) -> Result<Book, AppError>;
    /// Returns the deleted record so the caller can release its remote assets.
    async fn delete_book(&self, id: &Uuid) -> Result<Book, AppError>;
}

impl SqlxBookRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxBookRepo { pool }
    }
}

#[async_trait]
impl BookRepository for SqlxBookRepo {
    async fn create_book(&self, book: &BookInsert) -> Result<Book, AppError> {
        let saved = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (
                title, description, category,
                cover_url, cover_asset_id,
                document_url, document_asset_id,
                page_urls, page_asset_ids
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.description)
        .bind(&book.category)
        .bind(&book.cover.url)
        .bind(&book.cover.asset_id)
        .bind(&book.document.url)
        .bind(&book.document.asset_id)
        .bind(book.page_urls())
        .bind(book.page_asset_ids())
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn get_book_by_id(&self, id: &Uuid) -> Result<Book, AppError> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".into()))
    }

    async fn list_books(&self) -> Result<Vec<Book>, AppError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn list_books_by_category(&self, category: &str) -> Result<Vec<Book>, AppError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE category = $1 ORDER BY created_at DESC",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn search_books(&self, query: &str) -> Result<Vec<Book>, AppError> {
        let pattern = format!("%{}%", query);
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE title ILIKE $1 OR description ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn update_book(&self, id: &Uuid, changes: &BookUpdate) -> Result<Book, AppError> {
        let (document_url, document_asset_id, page_urls, page_asset_ids) =
            match &changes.document {
                Some(replacement) => (
                    Some(replacement.document.url.clone()),
                    Some(replacement.document.asset_id.clone()),
                    Some(replacement.page_urls()),
                    Some(replacement.page_asset_ids()),
                ),
                None => (None, None, None, None),
            };

        // COALESCE keeps stored values where the caller passed nothing
        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                category = COALESCE($3, category),
                cover_url = COALESCE($4, cover_url),
                cover_asset_id = COALESCE($5, cover_asset_id),
                document_url = COALESCE($6, document_url),
                document_asset_id = COALESCE($7, document_asset_id),
                page_urls = COALESCE($8, page_urls),
                page_asset_ids = COALESCE($9, page_asset_ids),
                updated_at = NOW()
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.category)
        .bind(changes.cover.as_ref().map(|c| c.url.clone()))
        .bind(changes.cover.as_ref().map(|c| c.asset_id.clone()))
        .bind(document_url)
        .bind(document_asset_id)
        .bind(page_urls)
        .bind(page_asset_ids)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".into()))?;

        Ok(updated)
    }

    async fn delete_book(&self, id: &Uuid) -> Result<Book, AppError> {
        sqlx::query_as::<_, Book>("DELETE FROM books WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".into()))
    }
}
